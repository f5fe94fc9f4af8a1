use super::{FactorPattern, FactorVariant, SymbolicError, SymbolicInfo, SymbolicSettings};
use std::io::{Result, Write};
use std::time::Duration;

pub(crate) fn print_header(
    out: &mut impl Write,
    settings: &SymbolicSettings,
    n: usize,
    nnz: usize,
) -> Result<()> {
    if !settings.verbose {
        return Ok(());
    }
    writeln!(out, "\nsymbolic factorization:")?;
    writeln!(out, "  variant       = {:?}", settings.variant)?;
    if settings.variant == FactorVariant::Lu {
        writeln!(out, "  lu packing    = {:?}", settings.lu_packing)?;
    }
    writeln!(out, "  rows          = {}", n)?;
    writeln!(out, "  nnz(A)        = {}", nnz)?;
    writeln!(out, "  fill ratio    = {}", settings.fill_ratio)?;
    Ok(())
}

pub(crate) fn print_summary(
    out: &mut impl Write,
    settings: &SymbolicSettings,
    pattern: &FactorPattern,
) -> Result<()> {
    if !settings.verbose {
        return Ok(());
    }
    let info: &SymbolicInfo = &pattern.info;

    writeln!(out, "  nnz(factor)   = {}", info.nnz)?;
    writeln!(out, "  chunks        = {}", info.chunks)?;
    writeln!(
        out,
        "Reallocs {} Fill ratio: given {} needed {}",
        info.reallocs, info.fill_ratio_given, info.fill_ratio_needed
    )?;
    if info.reallocs > 0 {
        writeln!(
            out,
            "Run with fill_ratio {} for best performance",
            info.fill_ratio_needed
        )?;
    }
    writeln!(
        out,
        "elimination time = {:?}",
        Duration::from_secs_f64(info.elimination_time)
    )?;
    writeln!(
        out,
        "compaction time  = {:?}",
        Duration::from_secs_f64(info.compaction_time)
    )?;
    Ok(())
}

pub(crate) fn print_failure(
    out: &mut impl Write,
    settings: &SymbolicSettings,
    err: &SymbolicError,
) -> Result<()> {
    if !settings.verbose {
        return Ok(());
    }
    writeln!(out, "symbolic factorization failed: {}", err)
}
