use super::format::insert_value;
use super::*;
use crate::algebra::*;
use crate::symbolic::FactorPattern;

/// Result of a symbolic factorization, ready for the numeric pass.
///
/// Holds the factor pattern, a zeroed value array with `bs*bs` values per
/// structural entry and the orderings that produced it.  Row and column
/// indices of all methods are in the permuted (factor) numbering.
///
/// A numeric pass calls [`set_unfactored`](FactoredMatrix::set_unfactored),
/// writes values, [`assemble`](FactoredMatrix::assemble)s and finally
/// [`mark_factored`](FactoredMatrix::mark_factored).
#[derive(Debug, Clone)]
pub struct FactoredMatrix<T: FloatT = f64> {
    pattern: FactorPattern,
    nzval: Vec<T>,
    bs: usize,
    row_perm: Permutation,
    col_perm: Permutation,
    state: AssemblyState,
}

impl<T> FactoredMatrix<T>
where
    T: FloatT,
{
    pub(crate) fn new(
        pattern: FactorPattern,
        bs: usize,
        row_perm: Permutation,
        col_perm: Permutation,
    ) -> Self {
        let nzval = vec![T::zero(); pattern.nnz() * bs * bs];
        Self {
            pattern,
            nzval,
            bs,
            row_perm,
            col_perm,
            state: AssemblyState::Factored,
        }
    }

    pub fn pattern(&self) -> &FactorPattern {
        &self.pattern
    }

    pub fn nzval(&self) -> &[T] {
        &self.nzval
    }

    pub fn block_size(&self) -> usize {
        self.bs
    }

    pub fn row_perm(&self) -> &Permutation {
        &self.row_perm
    }

    pub fn col_perm(&self) -> &Permutation {
        &self.col_perm
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Position of scalar entry (row, col) in [`nzval`](FactoredMatrix::nzval)
    pub fn value_index(&self, row: usize, col: usize) -> Option<usize> {
        let bs = self.bs;
        self.pattern
            .value_index(row / bs, col / bs)
            .map(|k| k * bs * bs + (row % bs) * bs + col % bs)
    }

    pub fn get_value(&self, row: usize, col: usize) -> Option<T> {
        self.value_index(row, col).map(|k| self.nzval[k])
    }

    /// Reopen the values for a new numeric factorization
    pub fn set_unfactored(&mut self) {
        self.state = self.state.on_unfactor();
    }

    pub fn set_value(
        &mut self,
        row: usize,
        col: usize,
        value: T,
        mode: InsertMode,
    ) -> Result<(), MatrixError> {
        let state = self.state.on_insert()?;
        let n = self.pattern.nrows() * self.bs;
        if row >= n || col >= n {
            return Err(MatrixError::OutOfBounds { row, col });
        }
        let k = self
            .value_index(row, col)
            .ok_or(MatrixError::NewNonzero { row, col })?;
        insert_value(&mut self.nzval[k], value, mode);
        self.state = state;
        Ok(())
    }

    pub fn assemble(&mut self) -> Result<(), MatrixError> {
        self.state = self.state.on_assemble()?;
        Ok(())
    }

    pub fn mark_factored(&mut self) -> Result<(), MatrixError> {
        self.state = self.state.on_factor()?;
        Ok(())
    }
}
