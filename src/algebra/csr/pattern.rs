use crate::algebra::{ShapedMatrix, SparseFormatError};
use itertools::Itertools;
use std::iter::zip;

/// Borrowed, immutable view of a CSR nonzero structure.
///
/// This is the only input the symbolic factorization reads.  Rows may hold
/// their column ids in any order and may repeat ids; the elimination
/// sorts and deduplicates as it goes.  Use
/// [`check_format`](SparsityPattern::check_format) when strictly ascending
/// rows are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparsityPattern<'a> {
    m: usize,
    n: usize,
    rowptr: &'a [usize],
    colval: &'a [usize],
}

impl<'a> SparsityPattern<'a> {
    /// Create a pattern view, checking array lengths, row pointer
    /// monotonicity and column bounds.
    pub fn new(
        m: usize,
        n: usize,
        rowptr: &'a [usize],
        colval: &'a [usize],
    ) -> Result<Self, SparseFormatError> {
        let pattern = Self::new_unchecked(m, n, rowptr, colval);
        pattern.check_structure()?;
        Ok(pattern)
    }

    pub(crate) fn new_unchecked(
        m: usize,
        n: usize,
        rowptr: &'a [usize],
        colval: &'a [usize],
    ) -> Self {
        Self {
            m,
            n,
            rowptr,
            colval,
        }
    }

    pub fn rowptr(&self) -> &'a [usize] {
        self.rowptr
    }

    pub fn colval(&self) -> &'a [usize] {
        self.colval
    }

    /// number of stored entries
    pub fn nnz(&self) -> usize {
        self.colval.len()
    }

    /// column ids of a single row, in storage order
    pub fn row(&self, row: usize) -> &'a [usize] {
        &self.colval[self.rowptr[row]..self.rowptr[row + 1]]
    }

    /// number of distinct entries, counting repeated ids within a row once
    pub fn distinct_nnz(&self) -> usize {
        (0..self.m).map(|row| self.row(row).iter().unique().count()).sum()
    }

    /// number of distinct entries on or above the diagonal
    pub fn upper_nnz(&self) -> usize {
        (0..self.m)
            .map(|row| {
                self.row(row)
                    .iter()
                    .filter(|&&col| col >= row)
                    .unique()
                    .count()
            })
            .sum()
    }

    /// Check array lengths, row pointer monotonicity and column bounds.
    pub fn check_structure(&self) -> Result<(), SparseFormatError> {
        if self.rowptr.len() != self.m + 1 || self.rowptr[self.m] != self.colval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for rowptr monotonicity
        if self.rowptr[0] != 0 || self.rowptr.iter().tuple_windows().any(|(a, b)| a > b) {
            return Err(SparseFormatError::BadRowptr);
        }

        //check for column values out of bounds
        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(SparseFormatError::BadColval);
        }
        Ok(())
    }

    /// Check structure and additionally that every row is strictly ascending.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        self.check_structure()?;
        if !(0..self.m).all(|row| is_strictly_ascending(self.row(row))) {
            return Err(SparseFormatError::BadColOrdering);
        }
        Ok(())
    }

    /// Full symmetric structure `U + Uᵀ` built from the entries on or above
    /// the diagonal.  Entries strictly below the diagonal are ignored.
    ///
    /// Rows of the result are not sorted.
    pub fn symmetrize_upper(&self) -> OwnedPattern {
        assert!(self.is_square());
        let n = self.n;

        // 1. count the entries each row will have, keeping in
        // mind that every off diagonal entry appears twice
        let mut counts = vec![0; n];
        for row in 0..n {
            for &col in self.row(row).iter().filter(|&&col| col >= row) {
                counts[row] += 1;
                if col != row {
                    counts[col] += 1;
                }
            }
        }

        // 2. row pointers from the counts.  rowptr is one longer than counts
        let mut rowptr = vec![0; n + 1];
        let mut acc = 0;
        for (rp, count) in zip(&mut rowptr[1..], &counts) {
            *rp = acc + count;
            acc = *rp;
        }

        // reuse the counts to track the next free location in each row
        let mut next = counts;
        next.copy_from_slice(&rowptr[0..n]);

        // 3. place each entry and its mirror
        let mut colval = vec![0; acc];
        for row in 0..n {
            for &col in self.row(row).iter().filter(|&&col| col >= row) {
                colval[next[row]] = col;
                next[row] += 1;
                if col != row {
                    colval[next[col]] = row;
                    next[col] += 1;
                }
            }
        }

        OwnedPattern {
            m: n,
            n,
            rowptr,
            colval,
        }
    }
}

impl ShapedMatrix for SparsityPattern<'_> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

/// Owned counterpart of [`SparsityPattern`], for structures that are
/// derived rather than borrowed from a matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedPattern {
    pub m: usize,
    pub n: usize,
    pub rowptr: Vec<usize>,
    pub colval: Vec<usize>,
}

impl OwnedPattern {
    /// Fully populated `m x n` structure
    pub fn dense(m: usize, n: usize) -> Self {
        let rowptr = (0..=m).map(|row| row * n).collect();
        let colval = (0..m).flat_map(|_| 0..n).collect();
        Self {
            m,
            n,
            rowptr,
            colval,
        }
    }

    pub fn as_pattern(&self) -> SparsityPattern<'_> {
        SparsityPattern::new_unchecked(self.m, self.n, &self.rowptr, &self.colval)
    }
}

pub(crate) fn is_strictly_ascending(cols: &[usize]) -> bool {
    cols.iter().tuple_windows().all(|(a, b)| a < b)
}

#[test]
fn test_pattern_check() {
    let rowptr = [0, 2, 3, 5];
    let colval = [0, 2, 1, 2, 0];
    let p = SparsityPattern::new(3, 3, &rowptr, &colval).unwrap();
    assert_eq!(p.nnz(), 5);
    assert_eq!(p.row(2), &[2, 0]);
    assert_eq!(p.upper_nnz(), 4);
    assert_eq!(p.distinct_nnz(), 5);

    // repeated ids count once
    let rowptr = [0, 3, 4];
    let colval = [0, 0, 1, 1];
    let p = SparsityPattern::new(2, 2, &rowptr, &colval).unwrap();
    assert_eq!(p.nnz(), 4);
    assert_eq!(p.distinct_nnz(), 3);
    assert_eq!(p.upper_nnz(), 3);
    assert_eq!(p.check_format(), Err(SparseFormatError::BadColOrdering));

    // bad row pointers
    let rowptr = [0, 3, 2, 5];
    assert_eq!(
        SparsityPattern::new(3, 3, &rowptr, &colval),
        Err(SparseFormatError::BadRowptr)
    );
    let rowptr = [0, 2, 3];
    assert_eq!(
        SparsityPattern::new(3, 3, &rowptr, &colval),
        Err(SparseFormatError::IncompatibleDimension)
    );

    // column out of bounds
    let rowptr = [0, 2, 3, 5];
    let colval = [0, 3, 1, 2, 0];
    assert_eq!(
        SparsityPattern::new(3, 3, &rowptr, &colval),
        Err(SparseFormatError::BadColval)
    );
}

#[test]
fn test_symmetrize_upper() {
    // rows {0:[0,2], 1:[1], 2:[0,2]}.  The (2,0) entry is
    // below the diagonal and is ignored in favour of (0,2)
    let rowptr = [0, 2, 3, 5];
    let colval = [0, 2, 1, 0, 2];
    let p = SparsityPattern::new(3, 3, &rowptr, &colval).unwrap();
    let s = p.symmetrize_upper();

    assert_eq!(s.rowptr, vec![0, 2, 3, 5]);
    assert_eq!(s.as_pattern().row(0), &[0, 2]);
    assert_eq!(s.as_pattern().row(1), &[1]);
    assert_eq!(s.as_pattern().row(2), &[0, 2]);
}

#[test]
fn test_dense_pattern() {
    let d = OwnedPattern::dense(2, 3);
    assert_eq!(d.rowptr, vec![0, 3, 6]);
    assert_eq!(d.colval, vec![0, 1, 2, 0, 1, 2]);
    assert!(d.as_pattern().check_format().is_ok());
}
