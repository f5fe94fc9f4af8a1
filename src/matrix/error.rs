use crate::algebra::SparseFormatError;
use crate::symbolic::SymbolicError;
use thiserror::Error;

/// Error type returned by [`Matrix`](crate::matrix::Matrix) and
/// [`FactoredMatrix`](crate::matrix::FactoredMatrix) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Values can't be inserted into a factored matrix")]
    Factored,
    #[error("Matrix must be assembled first")]
    NotAssembled,
    #[error("Matrix is already factored")]
    AlreadyFactored,
    /// The entry is not part of the fixed nonzero structure
    #[error("Entry ({row}, {col}) is not in the nonzero structure")]
    NewNonzero { row: usize, col: usize },
    #[error("Index ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },
    #[error("Expected {expected} values, found {found}")]
    ValueCount { expected: usize, found: usize },
    #[error(transparent)]
    Format(#[from] SparseFormatError),
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}
