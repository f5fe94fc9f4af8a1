use super::{BsrMatrix, DenseMatrix, MatrixError};
use crate::algebra::*;
use crate::symbolic::{FactorPattern, SymbolicError, SymbolicFactorizer};
use enum_dispatch::*;
use std::borrow::Cow;

/// How a value passed to [`MatrixFormat::set_value`] combines with the
/// value already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    #[default]
    Insert,
    Add,
}

/// Column ids and values of one scalar row
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a, T: FloatT> {
    pub cols: Cow<'a, [usize]>,
    pub vals: Cow<'a, [T]>,
}

/// Operations every storage format supports
#[enum_dispatch]
pub trait MatrixFormat<T>
where
    T: FloatT,
{
    fn format_name(&self) -> &'static str;

    /// scalar (rows, columns)
    fn shape(&self) -> (usize, usize);

    /// side length of the dense blocks.  One for scalar formats
    fn block_size(&self) -> usize;

    fn get_row(&self, row: usize) -> Result<RowView<'_, T>, MatrixError>;

    /// Offset into [`values_mut`](MatrixFormat::values_mut) of the scalar
    /// entry (row, col), which must lie inside the nonzero structure.
    fn value_slot(&self, row: usize, col: usize) -> Result<usize, MatrixError>;

    /// stored values in storage order
    fn values_mut(&mut self) -> &mut [T];

    /// Set or accumulate a value at a scalar position inside the existing
    /// nonzero structure.
    fn set_value(
        &mut self,
        row: usize,
        col: usize,
        value: T,
        mode: InsertMode,
    ) -> Result<(), MatrixError> {
        let k = self.value_slot(row, col)?;
        insert_value(&mut self.values_mut()[k], value, mode);
        Ok(())
    }

    fn check_format(&self) -> Result<(), SparseFormatError>;

    /// Factor pattern of the (block) structure.  Permutations act on
    /// block rows and columns.
    fn factor_symbolic(
        &self,
        factorizer: &mut SymbolicFactorizer,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactorPattern, SymbolicError>;
}

/// Storage formats a [`Matrix`](crate::matrix::Matrix) can wrap
#[enum_dispatch(MatrixFormat<T>)]
#[derive(Debug, Clone, PartialEq)]
pub enum SparseMatrix<T>
where
    T: FloatT,
{
    Dense(DenseMatrix<T>),
    Csr(CsrMatrix<T>),
    Bsr(BsrMatrix<T>),
}

#[inline]
pub(crate) fn insert_value<T: FloatT>(slot: &mut T, value: T, mode: InsertMode) {
    match mode {
        InsertMode::Insert => *slot = value,
        InsertMode::Add => *slot += value,
    }
}

pub(crate) fn check_bounds(shape: (usize, usize), row: usize, col: usize) -> Result<(), MatrixError> {
    if row < shape.0 && col < shape.1 {
        Ok(())
    } else {
        Err(MatrixError::OutOfBounds { row, col })
    }
}

// ---------------------------------------------------------
// compressed sparse row
// ---------------------------------------------------------

impl<T> MatrixFormat<T> for CsrMatrix<T>
where
    T: FloatT,
{
    fn format_name(&self) -> &'static str {
        "csr"
    }

    fn shape(&self) -> (usize, usize) {
        self.size()
    }

    fn block_size(&self) -> usize {
        1
    }

    fn get_row(&self, row: usize) -> Result<RowView<'_, T>, MatrixError> {
        check_bounds(self.size(), row, 0)?;
        let (cols, vals) = self.row(row);
        Ok(RowView {
            cols: Cow::Borrowed(cols),
            vals: Cow::Borrowed(vals),
        })
    }

    fn value_slot(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        check_bounds(self.size(), row, col)?;
        self.entry_index((row, col))
            .ok_or(MatrixError::NewNonzero { row, col })
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.nzval
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        CsrMatrix::check_format(self)
    }

    fn factor_symbolic(
        &self,
        factorizer: &mut SymbolicFactorizer,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactorPattern, SymbolicError> {
        factorizer.factor(&self.pattern(), row_perm, col_perm)
    }
}
