use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix and sparsity pattern checks.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Data is not sorted by column index within each row
    #[error("Data is not sorted by column index within each row")]
    BadColOrdering,
    #[error("Column value exceeds the matrix column dimension")]
    /// Column value exceeds the matrix column dimension
    BadColval,
    #[error("Bad row pointer values")]
    /// Matrix row pointer values are defective
    BadRowptr,
    #[error("Block size must be at least one")]
    /// Block sparse format with a zero block size
    BadBlockSize,
}

/// Error type returned by [`Permutation`](crate::algebra::Permutation) constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// The index vector is not a bijection on `0..n`
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    /// The fill-reducing ordering could not be computed
    #[error("Ordering failed for a {0} x {0} pattern")]
    OrderingFailed(usize),
}
