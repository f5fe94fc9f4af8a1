//! Symbolic factorization of sparse matrices.
//!
//! Given a CSR sparsity pattern and row and column elimination orders,
//! [`SymbolicFactorizer`] predicts the nonzero structure of the triangular
//! factors without computing any values, and packs it into one of the
//! layouts of [`FactorStorage`].
//!
//! Rows are eliminated one at a time.  The ids of each row are merged with
//! the not yet pruned upper parts of the rows it depends on, and the result
//! is appended to a chunked arena whose final size is unknown until the
//! last row is done.  The arena is then flattened into the requested layout,
//! releasing each chunk as soon as it has been copied.
//!
//! __Example usage__ :
//!
//! ```no_run
//! use symfact::algebra::{CsrMatrix, Permutation};
//! use symfact::symbolic::*;
//!
//! let A = CsrMatrix::<f64>::from(&[
//!     [4., 1., 0.],
//!     [1., 4., 1.],
//!     [0., 1., 4.],
//! ]);
//! let perm = Permutation::identity(3);
//!
//! let settings = SymbolicSettingsBuilder::default()
//!     .fill_ratio(2.0)
//!     .build()
//!     .unwrap();
//! let mut factorizer = SymbolicFactorizer::new(settings).unwrap();
//! let factor = factorizer.factor(&A.pattern(), &perm, &perm).unwrap();
//!
//! assert_eq!(factor.nnz(), 7);
//! ```

use crate::algebra::{Permutation, PermutationError, ShapedMatrix, SparsityPattern};
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::timers::*;
use std::io::Write;

mod compact;
mod elimination;
mod error;
mod fill_list;
mod freespace;
mod info_print;
mod pattern;
mod settings;

pub use error::*;
pub use pattern::*;
pub use settings::*;

/// Symbolic factorization driver holding settings, a print target for
/// verbose output and phase timers.
#[derive(Debug)]
pub struct SymbolicFactorizer {
    settings: SymbolicSettings,
    stream: PrintTarget,
    timers: Timers,
}

impl SymbolicFactorizer {
    pub fn new(settings: SymbolicSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            stream: PrintTarget::default(),
            timers: Timers::default(),
        })
    }

    pub fn settings(&self) -> &SymbolicSettings {
        &self.settings
    }

    /// Approximate minimum degree ordering of `pattern` using the
    /// configured dense row scaling.
    pub fn amd_ordering(
        &self,
        pattern: &SparsityPattern<'_>,
    ) -> Result<Permutation, PermutationError> {
        Permutation::amd(pattern, self.settings.amd_dense_scale)
    }

    /// Compute the factor pattern of the matrix with structure `pattern`
    /// eliminated in the order given by the permutations.
    ///
    /// New row `i` is original row `row_perm.apply(i)` and original column
    /// `c` becomes column `col_perm.invert(c)`.  For
    /// [`FactorVariant::Cholesky`] only the entries on or above the diagonal
    /// are read and both permutations must be equal.
    pub fn factor(
        &mut self,
        pattern: &SparsityPattern<'_>,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactorPattern, SymbolicError> {
        let result = self.factor_inner(pattern, row_perm, col_perm);

        let out = &mut self.stream;
        let _ = match &result {
            Ok(factor) => info_print::print_summary(out, &self.settings, factor),
            Err(e) => info_print::print_failure(out, &self.settings, e),
        };
        let _ = out.flush();

        result
    }

    fn factor_inner(
        &mut self,
        pattern: &SparsityPattern<'_>,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactorPattern, SymbolicError> {
        check_inputs(pattern, row_perm, col_perm, self.settings.variant)?;

        let n = pattern.nrows();
        let variant = self.settings.variant;
        let fill_ratio = self.settings.fill_ratio;

        let _ = info_print::print_header(&mut self.stream, &self.settings, n, pattern.nnz());

        // symmetric factors are computed from the upper triangle only
        let symmetric;
        let (structure, nnz_original) = match variant {
            FactorVariant::Cholesky => {
                symmetric = pattern.symmetrize_upper();
                (symmetric.as_pattern(), pattern.upper_nnz())
            }
            _ => (*pattern, pattern.distinct_nnz()),
        };

        let timers = &mut self.timers;
        timers.reset();

        timeit! {timers => "elimination";
            let elim = elimination::eliminate(
                &structure, row_perm, col_perm, fill_ratio, variant, nnz_original,
            );
        }
        let elim = elim?;

        let nnz = elim.nnz;
        let reallocs = elim.reallocs;
        let chunks = elim.chunks;

        timeit! {timers => "compaction";
            let storage = match (variant, self.settings.lu_packing) {
                (FactorVariant::Plain, _) => compact::contiguous(elim),
                (FactorVariant::Lu, LuPacking::Separate) => compact::contiguous_lu_split(elim),
                (FactorVariant::Lu, LuPacking::Packed) => compact::contiguous_lu_packed(elim),
                (FactorVariant::Cholesky, _) => compact::contiguous_cholesky(elim),
            };
        }
        let storage = storage?;

        let fill_ratio_needed = if nnz_original > 0 {
            nnz as f64 / nnz_original as f64
        } else {
            0.0
        };

        let info = SymbolicInfo {
            nnz_original,
            nnz,
            fill_ratio_given: fill_ratio,
            fill_ratio_needed,
            reallocs,
            chunks,
            elimination_time: timers.elapsed("elimination").as_secs_f64(),
            compaction_time: timers.elapsed("compaction").as_secs_f64(),
        };

        Ok(FactorPattern {
            n,
            variant,
            storage,
            info,
        })
    }
}

impl ConfigurablePrintTarget for SymbolicFactorizer {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

/// Compute the factor pattern with default settings apart from the
/// fill ratio hint and the layout.
///
/// LU patterns use [`LuPacking::Separate`].  Nothing is printed.
pub fn factor_symbolic(
    pattern: &SparsityPattern<'_>,
    row_perm: &Permutation,
    col_perm: &Permutation,
    fill_ratio: f64,
    variant: FactorVariant,
) -> Result<FactorPattern, SymbolicError> {
    // a bad hint only affects the first chunk size
    let fill_ratio = match validate_fill_ratio(fill_ratio) {
        Ok(()) => fill_ratio,
        Err(_) => SymbolicSettings::default().fill_ratio,
    };
    let settings = SymbolicSettings {
        fill_ratio,
        variant,
        ..SymbolicSettings::default()
    };
    let mut factorizer = SymbolicFactorizer {
        settings,
        stream: PrintTarget::Sink,
        timers: Timers::default(),
    };
    factorizer.factor(pattern, row_perm, col_perm)
}

fn check_inputs(
    pattern: &SparsityPattern<'_>,
    row_perm: &Permutation,
    col_perm: &Permutation,
    variant: FactorVariant,
) -> Result<(), StructuralError> {
    pattern.check_structure()?;

    let (nrows, ncols) = pattern.size();
    if nrows != ncols {
        return Err(StructuralError::NotSquare { nrows, ncols });
    }
    for perm in [row_perm, col_perm] {
        if perm.len() != nrows {
            return Err(StructuralError::PermutationLength {
                expected: nrows,
                found: perm.len(),
            });
        }
    }
    if variant == FactorVariant::Cholesky && row_perm != col_perm {
        return Err(StructuralError::AsymmetricPermutation);
    }
    Ok(())
}

#[path = "test.rs"]
#[cfg(test)]
mod test;
