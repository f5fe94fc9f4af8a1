use crate::algebra::SparseFormatError;
use thiserror::Error;

/// Error type returned by the symbolic factorization.
///
/// All variants are fatal for the call that produced them.  No partial
/// pattern is returned and every arena chunk has been released by the
/// time the error reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    /// The input pattern or permutations can't be factored
    #[error(transparent)]
    Structural(#[from] StructuralError),
    /// The arena could not obtain a chunk of the requested size
    #[error("Unable to allocate {requested} pattern entries")]
    ResourceExhaustion { requested: usize },
    /// Compaction found the arena contents disagreeing with the row records
    #[error(transparent)]
    InternalConsistency(#[from] ConsistencyError),
}

/// Problems with the structure of the factorization input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Matrix must be square, found {nrows} x {ncols}")]
    NotSquare { nrows: usize, ncols: usize },
    /// A permuted row holds no entries at all
    #[error("Empty row {row} (row {original_row} before permutation)")]
    EmptyRow { row: usize, original_row: usize },
    #[error("Permutation has length {found}, expected {expected}")]
    PermutationLength { expected: usize, found: usize },
    /// Symmetric factorizations need identical row and column orderings
    #[error("Row and column permutations differ in a symmetric factorization")]
    AsymmetricPermutation,
    #[error(transparent)]
    Format(#[from] SparseFormatError),
}

/// Violated bookkeeping invariants found while compacting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("Lower part ends at {lower_end} but upper part starts at {upper_start}")]
    LuBoundary { lower_end: usize, upper_start: usize },
    #[error("Row {row} extends past the used part of its chunk")]
    RowOverrun { row: usize },
    #[error("Row {row} does not hold its diagonal where recorded")]
    MissingDiagonal { row: usize },
    #[error("Row {row} records {nlower} lower entries but its diagonal at position {diag}")]
    LowerCount {
        row: usize,
        nlower: usize,
        diag: usize,
    },
    #[error("Compacted {found} entries, expected {expected}")]
    NnzMismatch { expected: usize, found: usize },
}

/// Error type returned by settings validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadField(&'static str),
}
