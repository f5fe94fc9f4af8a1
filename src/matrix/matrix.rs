use super::format::insert_value;
use super::*;
use crate::algebra::*;
use crate::symbolic::SymbolicFactorizer;
use itertools::Itertools;
use std::iter::zip;

/// A matrix in one of the supported storage formats together with its
/// assembly state.
///
/// Values are inserted with [`set_values`](Matrix::set_values) and the
/// matrix is made ready with [`assemble`](Matrix::assemble).  Rows can only
/// be read and the matrix factored while it is assembled.
#[derive(Debug, Clone)]
pub struct Matrix<T: FloatT = f64> {
    format: SparseMatrix<T>,
    state: AssemblyState,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn new(format: impl Into<SparseMatrix<T>>) -> Self {
        Self {
            format: format.into(),
            state: AssemblyState::Unassembled,
        }
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    pub fn format(&self) -> &SparseMatrix<T> {
        &self.format
    }

    /// Insert a dense block of values.  `values` is row major with one row
    /// per entry of `rows` and one column per entry of `cols`.
    ///
    /// Every position is located before any value is written, so on error
    /// neither the values nor the assembly state change.
    pub fn set_values(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        values: &[T],
        mode: InsertMode,
    ) -> Result<(), MatrixError> {
        let state = self.state.on_insert()?;
        if values.len() != rows.len() * cols.len() {
            return Err(MatrixError::ValueCount {
                expected: rows.len() * cols.len(),
                found: values.len(),
            });
        }

        let slots = rows
            .iter()
            .cartesian_product(cols)
            .map(|(&row, &col)| self.format.value_slot(row, col))
            .collect::<Result<Vec<_>, _>>()?;

        self.state = state;
        let nzval = self.format.values_mut();
        for (k, &value) in zip(slots, values) {
            insert_value(&mut nzval[k], value, mode);
        }
        Ok(())
    }

    /// Validate the storage and mark the matrix ready for use
    pub fn assemble(&mut self) -> Result<(), MatrixError> {
        let state = self.state.on_assemble()?;
        self.format.check_format()?;
        self.state = state;
        Ok(())
    }

    pub fn get_row(&self, row: usize) -> Result<RowView<'_, T>, MatrixError> {
        self.state.require_assembled()?;
        self.format.get_row(row)
    }

    /// Symbolic factorization of the assembled matrix.  For block formats
    /// the permutations order block rows and columns.
    pub fn factor_symbolic(
        &self,
        factorizer: &mut SymbolicFactorizer,
        row_perm: &Permutation,
        col_perm: &Permutation,
    ) -> Result<FactoredMatrix<T>, MatrixError> {
        self.state.require_assembled()?;
        let pattern = self.format.factor_symbolic(factorizer, row_perm, col_perm)?;
        Ok(FactoredMatrix::new(
            pattern,
            self.format.block_size(),
            row_perm.clone(),
            col_perm.clone(),
        ))
    }
}

impl<T> ShapedMatrix for Matrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.format.shape().0
    }
    fn ncols(&self) -> usize {
        self.format.shape().1
    }
}
