use crate::algebra::{FloatT, ShapedMatrix, SparseFormatError, SparsityPattern};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Row (CSR) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use symfact::algebra::CsrMatrix;
///
/// let A : CsrMatrix<f64> = CsrMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 3, 5, 7],                 //rowptr
///    vec![0, 1, 2, 0, 2, 1, 2],        //colval
///    vec![1., 3., 5., 2., 6., 4., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CsrMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSR format row pointer.
    ///
    /// This field should have length `m+1`. The last entry corresponds
    /// to the number of nonzeros and should agree with the lengths
    /// of the `colval` and `nzval` fields.
    pub rowptr: Vec<usize>,
    /// vector of column indices
    pub colval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CsrMatrix<T>
where
    T: FloatT,
{
    /// `CsrMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__ ensure that column indices
    /// are in bounds or sorted within each row.  Use
    /// [`check_format`](CsrMatrix::check_format) for that.
    pub fn new(m: usize, n: usize, rowptr: Vec<usize>, colval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(colval.len(), nzval.len());
        assert_eq!(rowptr.len(), m + 1);
        assert_eq!(rowptr[m], colval.len());
        CsrMatrix {
            m,
            n,
            rowptr,
            colval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut rowptr = vec![0; m + 1];
        let colval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        rowptr[m] = nnz;

        CsrMatrix::new(m, n, rowptr, colval, nzval)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let rowptr = (0usize..=n).collect();
        let colval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CsrMatrix::new(n, n, rowptr, colval, nzval)
    }

    /// Build a matrix from its structure only, with every stored value set to one
    pub fn from_pattern(m: usize, n: usize, rowptr: Vec<usize>, colval: Vec<usize>) -> Self {
        let nzval = vec![T::one(); colval.len()];
        CsrMatrix::new(m, n, rowptr, colval, nzval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.rowptr[self.m]
    }

    /// Borrowed view of the nonzero structure
    pub fn pattern(&self) -> SparsityPattern<'_> {
        SparsityPattern::new_unchecked(self.m, self.n, &self.rowptr, &self.colval)
    }

    /// Column indices and values of a single row
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> (&[usize], &[T]) {
        let rng = self.rowptr[row]..self.rowptr[row + 1];
        (&self.colval[rng.clone()], &self.nzval[rng])
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        self.pattern().check_format()
    }

    /// Returns the linear index into `nzval` of the entry at (row,col),
    /// or None if the entry is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn entry_index(&self, idx: (usize, usize)) -> Option<usize> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.rowptr[row];
        let last = self.rowptr[row + 1];
        let cols_in_this_row = &self.colval[first..last];
        cols_in_this_row
            .binary_search(&col)
            .ok()
            .map(|offset| first + offset)
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        self.entry_index(idx).map(|k| self.nzval[k])
    }

    /// True if the matrix is upper triangular
    pub fn is_triu(&self) -> bool {
        (0..self.m).all(|row| self.row(row).0.iter().all(|&col| col >= row))
    }
}

impl<T> ShapedMatrix for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

/// Build a CSR matrix from a dense array, keeping only the nonzero entries.
impl<'a, T, const M: usize, const N: usize> From<&'a [[T; N]; M]> for CsrMatrix<T>
where
    T: FloatT,
{
    fn from(rows: &'a [[T; N]; M]) -> Self {
        let mut rowptr = Vec::with_capacity(M + 1);
        let mut colval = Vec::new();
        let mut nzval = Vec::new();

        rowptr.push(0);
        for row in rows.iter() {
            for (col, &v) in row.iter().enumerate().filter(|(_, v)| **v != T::zero()) {
                colval.push(col);
                nzval.push(v);
            }
            rowptr.push(colval.len());
        }
        CsrMatrix::new(M, N, rowptr, colval, nzval)
    }
}

#[test]
fn test_csr_get_entry() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CsrMatrix::from(&[
        [0., 4., 0., 0., 12.],
        [1., 5., 0., 0., 0.],
        [0., 6., 0., 0., 13.],
        [2., 7., 10., 0., 0.],
        [0., 8., 11., 0., 14.],
        [3., 9., 0., 0., 0.],
    ]);

    assert_eq!(A.rowptr, vec![0, 2, 4, 6, 9, 12, 14]);
    assert!(A.check_format().is_ok());

    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((5, 0)).unwrap(), 3.);
    assert_eq!(A.get_entry((0, 1)).unwrap(), 4.);
    assert_eq!(A.get_entry((3, 1)).unwrap(), 7.);
    assert_eq!(A.get_entry((5, 1)).unwrap(), 9.);
    assert_eq!(A.get_entry((3, 2)).unwrap(), 10.);
    assert_eq!(A.get_entry((4, 2)).unwrap(), 11.);
    assert_eq!(A.get_entry((4, 4)).unwrap(), 14.);

    assert!(A.get_entry((0, 0)).is_none());
    assert!(A.get_entry((4, 0)).is_none());
    assert!(A.get_entry((2, 2)).is_none());
    assert!(A.get_entry((1, 3)).is_none());
    assert!(A.get_entry((3, 4)).is_none());
}

#[test]
fn test_csr_check_format() {
    let mut A = CsrMatrix::<f64>::identity(3);
    assert!(A.check_format().is_ok());
    assert!(A.is_triu());

    // out of range column
    A.colval[2] = 3;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColval));

    // unsorted row
    let A = CsrMatrix::<f64>::from_pattern(2, 2, vec![0, 2, 3], vec![1, 0, 0]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColOrdering));
    assert!(!A.is_triu());
}
