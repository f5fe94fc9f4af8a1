use super::fill_list::FillList;
use super::freespace::{FreeSpace, Slot};
use super::{FactorVariant, StructuralError, SymbolicError};
use crate::algebra::{Permutation, ShapedMatrix, SparsityPattern};
use std::cmp::max;

/// Arena location and shape of one eliminated row
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowRecord {
    pub slot: Slot,
    /// number of ids written to the arena
    pub len: usize,
    /// number of ids left of the diagonal
    pub nlower: usize,
    /// position of the diagonal within the stored ids
    pub diag: usize,
}

/// Everything the compactor needs from the elimination
#[derive(Debug)]
pub(crate) struct Elimination {
    pub n: usize,
    pub space: FreeSpace,
    pub rows: Vec<RowRecord>,
    /// number of ids stored in the arena
    pub nnz: usize,
    /// rows hold only the ids at or right of the diagonal
    pub upper_only: bool,
    pub reallocs: usize,
    pub chunks: usize,
}

/// Compute the fill pattern of the permuted matrix row by row.
///
/// For every variant except [`FactorVariant::Cholesky`] each row is stored
/// whole.  Cholesky stores only the ids at or right of the diagonal and
/// `pattern` must already be the full symmetric structure.
pub(crate) fn eliminate(
    pattern: &SparsityPattern<'_>,
    row_perm: &Permutation,
    col_perm: &Permutation,
    fill_ratio: f64,
    variant: FactorVariant,
    nnz_original: usize,
) -> Result<Elimination, SymbolicError> {
    let n = pattern.nrows();
    let mut space = FreeSpace::new();

    // sized by the hint only.  Later chunks are sized by the rows
    // still to come
    if n > 0 {
        let initial = (fill_ratio * nnz_original as f64).ceil() as usize;
        space.acquire(max(1, initial))?;
    }

    let mut work = EliminationWork::new(n, variant == FactorVariant::Cholesky);

    match work.run(pattern, row_perm, col_perm, &mut space) {
        Ok(()) => {
            let chunks = space.chunk_count();
            Ok(Elimination {
                n,
                nnz: space.total_used(),
                space,
                rows: work.rows,
                upper_only: work.upper_only,
                reallocs: work.reallocs,
                chunks,
            })
        }
        Err(e) => {
            space.destroy();
            Err(e)
        }
    }
}

struct EliminationWork {
    n: usize,
    upper_only: bool,
    list: FillList,
    // end of the part of each finished row later rows still merge
    im: Vec<usize>,
    rows: Vec<RowRecord>,
    reallocs: usize,
}

impl EliminationWork {
    fn new(n: usize, upper_only: bool) -> Self {
        Self {
            n,
            upper_only,
            list: FillList::new(n),
            im: vec![0; n],
            rows: Vec::with_capacity(n),
            reallocs: 0,
        }
    }

    fn run(
        &mut self,
        pattern: &SparsityPattern<'_>,
        row_perm: &Permutation,
        col_perm: &Permutation,
        space: &mut FreeSpace,
    ) -> Result<(), SymbolicError> {
        for i in 0..self.n {
            let original_row = row_perm.apply(i);
            let cols = pattern.row(original_row);
            if cols.is_empty() {
                return Err(StructuralError::EmptyRow {
                    row: i,
                    original_row,
                }
                .into());
            }

            // load the permuted row.  The diagonal always gets a slot
            self.list.clear();
            for &col in cols {
                self.list.insert(col_perm.invert(col));
            }
            self.list.insert(i);

            self.merge_frontiers(i, space);
            self.store_row(i, space)?;
        }
        Ok(())
    }

    // merge the remaining upper part of every finished row j < i that
    // appears in row i, including rows reached through earlier fill
    fn merge_frontiers(&mut self, i: usize, space: &FreeSpace) {
        let mut j = self.list.first();
        while j < i {
            let rec = self.rows[j];
            let upper = &space.row(rec.slot, rec.len)[rec.diag + 1..self.im[j]];

            let mut cursor = j;
            for (k, &id) in upper.iter().enumerate() {
                cursor = self.list.insert_after(cursor, id).0;
                if id == i {
                    // symmetric pruning: row i now carries everything of
                    // row j beyond this entry
                    self.im[j] = rec.diag + 1 + k + 1;
                }
            }
            j = self.list.next(j);
        }
    }

    fn store_row(&mut self, i: usize, space: &mut FreeSpace) -> Result<(), SymbolicError> {
        let total = self.list.len();
        let nlower = self.list.iter().take_while(|&id| id < i).count();
        let len = if self.upper_only { total - nlower } else { total };

        if space.remaining() < len {
            let request = max(space.total_capacity(), (self.n - i) * (len + 1));
            space.acquire(request)?;
            self.reallocs += 1;
        }

        let skip = if self.upper_only { nlower } else { 0 };
        let (slot, dest) = space.reserve(len);
        for (d, id) in dest.iter_mut().zip(self.list.iter().skip(skip)) {
            *d = id;
        }

        let diag = nlower - skip;
        self.im[i] = len;
        self.rows.push(RowRecord {
            slot,
            len,
            nlower,
            diag,
        });
        Ok(())
    }
}
