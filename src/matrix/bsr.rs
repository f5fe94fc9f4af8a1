use super::format::check_bounds;
use super::{MatrixError, MatrixFormat, RowView};
use crate::algebra::*;
use crate::symbolic::{FactorPattern, SymbolicError, SymbolicFactorizer};
use std::borrow::Cow;

/// Block compressed sparse row matrix.
///
/// The structure is a CSR pattern over `mb x nb` blocks, each of them a
/// dense `bs x bs` block stored row major in `nzval`, so block `k`
/// occupies `nzval[k*bs*bs..(k+1)*bs*bs]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BsrMatrix<T = f64> {
    /// block side length
    pub bs: usize,
    /// number of block rows
    pub mb: usize,
    /// number of block columns
    pub nb: usize,
    pub rowptr: Vec<usize>,
    pub colval: Vec<usize>,
    pub nzval: Vec<T>,
}

impl<T> BsrMatrix<T>
where
    T: FloatT,
{
    /// Block matrix with the given block structure and zero values
    pub fn new(
        bs: usize,
        mb: usize,
        nb: usize,
        rowptr: Vec<usize>,
        colval: Vec<usize>,
    ) -> Result<Self, SparseFormatError> {
        if bs == 0 {
            return Err(SparseFormatError::BadBlockSize);
        }
        SparsityPattern::new(mb, nb, &rowptr, &colval)?;
        let nzval = vec![T::zero(); colval.len() * bs * bs];
        Ok(Self {
            bs,
            mb,
            nb,
            rowptr,
            colval,
            nzval,
        })
    }

    /// number of stored blocks
    pub fn nnzb(&self) -> usize {
        self.colval.len()
    }

    /// Structure of the blocks
    pub fn block_pattern(&self) -> SparsityPattern<'_> {
        SparsityPattern::new_unchecked(self.mb, self.nb, &self.rowptr, &self.colval)
    }

    fn block_index(&self, brow: usize, bcol: usize) -> Option<usize> {
        let first = self.rowptr[brow];
        self.block_pattern()
            .row(brow)
            .iter()
            .position(|&c| c == bcol)
            .map(|k| first + k)
    }
}

impl<T> ShapedMatrix for BsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.mb * self.bs
    }
    fn ncols(&self) -> usize {
        self.nb * self.bs
    }
}

impl<T> MatrixFormat<T> for BsrMatrix<T>
where
    T: FloatT,
{
    fn format_name(&self) -> &'static str {
        "bsr"
    }

    fn shape(&self) -> (usize, usize) {
        self.size()
    }

    fn block_size(&self) -> usize {
        self.bs
    }

    fn get_row(&self, row: usize) -> Result<RowView<'_, T>, MatrixError> {
        check_bounds(self.size(), row, 0)?;
        let bs = self.bs;
        let (brow, r) = (row / bs, row % bs);
        let blocks = self.rowptr[brow]..self.rowptr[brow + 1];

        let mut cols = Vec::with_capacity(blocks.len() * bs);
        let mut vals = Vec::with_capacity(blocks.len() * bs);
        for k in blocks {
            let bcol = self.colval[k];
            cols.extend((0..bs).map(|c| bcol * bs + c));
            let start = k * bs * bs + r * bs;
            vals.extend_from_slice(&self.nzval[start..start + bs]);
        }
        Ok(RowView {
            cols: Cow::Owned(cols),
            vals: Cow::Owned(vals),
        })
    }

    fn value_slot(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        check_bounds(self.size(), row, col)?;
        let bs = self.bs;
        let k = self
            .block_index(row / bs, col / bs)
            .ok_or(MatrixError::NewNonzero { row, col })?;
        Ok(k * bs * bs + (row % bs) * bs + col % bs)
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.nzval
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.bs == 0 {
            return Err(SparseFormatError::BadBlockSize);
        }
        if self.nzval.len() != self.colval.len() * self.bs * self.bs {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        self.block_pattern().check_format()
    }

    fn factor_symbolic(
        &self,
        factorizer: &mut SymbolicFactorizer,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactorPattern, SymbolicError> {
        factorizer.factor(&self.block_pattern(), row_perm, col_perm)
    }
}

#[test]
fn test_bsr_rows() {
    use super::InsertMode;

    // 2 x 2 blocks of size 2, block diagonal plus block (0,1)
    let mut bsr = BsrMatrix::<f64>::new(2, 2, 2, vec![0, 2, 3], vec![0, 1, 1]).unwrap();
    assert_eq!(bsr.size(), (4, 4));
    assert!(MatrixFormat::check_format(&bsr).is_ok());

    bsr.set_value(1, 3, 5.0, InsertMode::Insert).unwrap();
    bsr.set_value(1, 3, 1.0, InsertMode::Add).unwrap();
    bsr.set_value(2, 2, 7.0, InsertMode::Insert).unwrap();
    assert_eq!(
        bsr.set_value(2, 0, 1.0, InsertMode::Insert),
        Err(MatrixError::NewNonzero { row: 2, col: 0 })
    );

    let row = bsr.get_row(1).unwrap();
    assert_eq!(&*row.cols, &[0, 1, 2, 3]);
    assert_eq!(&*row.vals, &[0., 0., 0., 6.]);
    let row = bsr.get_row(2).unwrap();
    assert_eq!(&*row.cols, &[2, 3]);
    assert_eq!(&*row.vals, &[7., 0.]);

    assert!(bsr.get_row(4).is_err());
    assert_eq!(
        BsrMatrix::<f64>::new(0, 1, 1, vec![0, 1], vec![0]),
        Err(SparseFormatError::BadBlockSize)
    );
}
