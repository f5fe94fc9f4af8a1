//! Flattening of the arena into the final factor arrays.
//!
//! Every flavor walks the chunks in allocation order, copies the rows
//! each one holds and drops it before touching the next, so the arena
//! and the final arrays are never both fully resident.

use super::elimination::{Elimination, RowRecord};
use super::{ConsistencyError, FactorStorage, RowPattern, SymbolicError};

// Per-row visitor used by every layout.  `row` is the stored ids,
// already checked against the chunk and the diagonal record.
trait RowSink {
    fn accept(&mut self, i: usize, rec: &RowRecord, row: &[usize]);
}

// walk the chunks and hand every row to the sink, checking that rows
// sit back to back inside the used part of their chunk and that the
// diagonal splits each row where its record says
fn drain_rows(elim: Elimination, sink: &mut impl RowSink) -> Result<(), SymbolicError> {
    let Elimination {
        space,
        rows,
        nnz,
        upper_only,
        ..
    } = elim;

    let mut rows = rows.iter().enumerate().peekable();
    let mut copied = 0;

    for (chunk_idx, chunk) in space.into_chunks().enumerate() {
        let used = chunk.used();
        let mut cursor = 0;

        while let Some((i, rec)) = rows.next_if(|(_, rec)| rec.slot.chunk == chunk_idx) {
            if rec.slot.offset != cursor || rec.slot.offset + rec.len > used.len() {
                return Err(ConsistencyError::RowOverrun { row: i }.into());
            }
            let row = &used[cursor..cursor + rec.len];
            if row.get(rec.diag) != Some(&i) {
                return Err(ConsistencyError::MissingDiagonal { row: i }.into());
            }
            let split = if upper_only { 0 } else { rec.nlower };
            if rec.diag != split {
                return Err(ConsistencyError::LowerCount {
                    row: i,
                    nlower: rec.nlower,
                    diag: rec.diag,
                }
                .into());
            }
            sink.accept(i, rec, row);
            cursor += rec.len;
            copied += rec.len;
        }
        drop(chunk);
    }

    if let Some((i, _)) = rows.next() {
        return Err(ConsistencyError::RowOverrun { row: i }.into());
    }
    if copied != nnz {
        return Err(ConsistencyError::NnzMismatch {
            expected: nnz,
            found: copied,
        }
        .into());
    }
    Ok(())
}

// ---------------------------------------------------------
// plain: rows copied verbatim
// ---------------------------------------------------------

struct PlainSink {
    rowptr: Vec<usize>,
    colval: Vec<usize>,
    diag: Vec<usize>,
}

impl RowSink for PlainSink {
    fn accept(&mut self, _i: usize, rec: &RowRecord, row: &[usize]) {
        self.diag.push(self.colval.len() + rec.diag);
        self.colval.extend_from_slice(row);
        self.rowptr.push(self.colval.len());
    }
}

pub(crate) fn contiguous(elim: Elimination) -> Result<FactorStorage, SymbolicError> {
    let mut sink = PlainSink {
        rowptr: with_first(elim.n + 1, 0),
        colval: Vec::with_capacity(elim.nnz),
        diag: Vec::with_capacity(elim.n),
    };
    drain_rows(elim, &mut sink)?;

    Ok(FactorStorage::Plain {
        rowptr: sink.rowptr,
        colval: sink.colval,
        diag: sink.diag,
    })
}

// ---------------------------------------------------------
// LU in two buffers.  U rows lead with the diagonal
// ---------------------------------------------------------

struct LuSplitSink {
    lower: RowPattern,
    upper: RowPattern,
}

impl RowSink for LuSplitSink {
    fn accept(&mut self, _i: usize, rec: &RowRecord, row: &[usize]) {
        let (l, u) = row.split_at(rec.nlower);
        self.lower.colval.extend_from_slice(l);
        self.lower.rowptr.push(self.lower.colval.len());
        self.upper.colval.extend_from_slice(u);
        self.upper.rowptr.push(self.upper.colval.len());
    }
}

pub(crate) fn contiguous_lu_split(elim: Elimination) -> Result<FactorStorage, SymbolicError> {
    let nlower: usize = elim.rows.iter().map(|r| r.nlower).sum();
    let mut sink = LuSplitSink {
        lower: RowPattern {
            rowptr: with_first(elim.n + 1, 0),
            colval: Vec::with_capacity(nlower),
        },
        upper: RowPattern {
            rowptr: with_first(elim.n + 1, 0),
            colval: Vec::with_capacity(elim.nnz - nlower),
        },
    };
    drain_rows(elim, &mut sink)?;

    let LuSplitSink { lower, upper } = sink;
    let diag = upper.rowptr.clone();
    Ok(FactorStorage::LuSeparate { lower, upper, diag })
}

// ---------------------------------------------------------
// LU in one buffer.  L rows grow from the front, U rows from
// the back with the diagonal at the high end of each row
// ---------------------------------------------------------

struct LuPackedSink {
    rowptr: Vec<usize>,
    colval: Vec<usize>,
    diag: Vec<usize>,
    lower_end: usize,
    upper_next: usize,
}

impl RowSink for LuPackedSink {
    fn accept(&mut self, i: usize, rec: &RowRecord, row: &[usize]) {
        let (l, u) = row.split_at(rec.nlower);

        self.colval[self.lower_end..self.lower_end + l.len()].copy_from_slice(l);
        self.lower_end += l.len();
        self.rowptr.push(self.lower_end);

        // diagonal, then the strictly upper ids just below it
        self.diag.push(self.upper_next);
        self.colval[self.upper_next] = i;
        let start = self.upper_next - (u.len() - 1);
        self.colval[start..self.upper_next].copy_from_slice(&u[1..]);
        self.upper_next = start - 1;
    }
}

pub(crate) fn contiguous_lu_packed(elim: Elimination) -> Result<FactorStorage, SymbolicError> {
    let n = elim.n;
    let nnz = elim.nnz;

    // slot 0 is never written so that the sentinel below the
    // lowest U row stays a valid offset
    let mut sink = LuPackedSink {
        rowptr: with_first(n + 1, 1),
        colval: vec![n; nnz + 1],
        diag: Vec::with_capacity(n + 1),
        lower_end: 1,
        upper_next: nnz,
    };
    drain_rows(elim, &mut sink)?;

    let LuPackedSink {
        rowptr,
        colval,
        mut diag,
        ..
    } = sink;

    if n > 0 {
        diag.push(diag[n - 1] - 1);
        if rowptr[n] != diag[n - 1] {
            return Err(ConsistencyError::LuBoundary {
                lower_end: rowptr[n],
                upper_start: diag[n - 1],
            }
            .into());
        }
    } else {
        diag.push(nnz);
    }

    Ok(FactorStorage::LuPacked {
        rowptr,
        colval,
        diag,
    })
}

// ---------------------------------------------------------
// Cholesky / ICC: upper rows, diagonal moved to the end
// ---------------------------------------------------------

struct CholeskySink {
    rowptr: Vec<usize>,
    colval: Vec<usize>,
    diag: Vec<usize>,
}

impl RowSink for CholeskySink {
    fn accept(&mut self, i: usize, _rec: &RowRecord, row: &[usize]) {
        self.colval.extend_from_slice(&row[1..]);
        self.colval.push(i);
        self.diag.push(self.colval.len() - 1);
        self.rowptr.push(self.colval.len());
    }
}

pub(crate) fn contiguous_cholesky(elim: Elimination) -> Result<FactorStorage, SymbolicError> {
    if let Some((row, _)) = elim.rows.iter().enumerate().find(|(_, r)| r.diag != 0) {
        return Err(ConsistencyError::MissingDiagonal { row }.into());
    }
    let mut sink = CholeskySink {
        rowptr: with_first(elim.n + 1, 0),
        colval: Vec::with_capacity(elim.nnz),
        diag: Vec::with_capacity(elim.n),
    };
    drain_rows(elim, &mut sink)?;

    Ok(FactorStorage::Cholesky {
        rowptr: sink.rowptr,
        colval: sink.colval,
        diag: sink.diag,
    })
}

fn with_first(capacity: usize, first: usize) -> Vec<usize> {
    let mut v = Vec::with_capacity(capacity);
    v.push(first);
    v
}
