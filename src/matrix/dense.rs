use super::format::check_bounds;
use super::{MatrixError, MatrixFormat, RowView};
use crate::algebra::*;
use crate::symbolic::{FactorPattern, SymbolicError, SymbolicFactorizer};
use std::borrow::Cow;

/// Dense matrix stored in row major order.  Every entry is structural.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T = f64> {
    pub m: usize,
    pub n: usize,
    pub data: Vec<T>,
}

impl<T> DenseMatrix<T>
where
    T: FloatT,
{
    pub fn zeros(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            data: vec![T::zero(); m * n],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.n + col]
    }
}

impl<T> ShapedMatrix for DenseMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> MatrixFormat<T> for DenseMatrix<T>
where
    T: FloatT,
{
    fn format_name(&self) -> &'static str {
        "dense"
    }

    fn shape(&self) -> (usize, usize) {
        self.size()
    }

    fn block_size(&self) -> usize {
        1
    }

    fn get_row(&self, row: usize) -> Result<RowView<'_, T>, MatrixError> {
        check_bounds(self.size(), row, 0)?;
        Ok(RowView {
            cols: Cow::Owned((0..self.n).collect()),
            vals: Cow::Borrowed(&self.data[row * self.n..(row + 1) * self.n]),
        })
    }

    fn value_slot(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        check_bounds(self.size(), row, col)?;
        Ok(row * self.n + col)
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.data.len() != self.m * self.n {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        Ok(())
    }

    fn factor_symbolic(
        &self,
        factorizer: &mut SymbolicFactorizer,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactorPattern, SymbolicError> {
        let full = OwnedPattern::dense(self.m, self.n);
        factorizer.factor(&full.as_pattern(), row_perm, col_perm)
    }
}
