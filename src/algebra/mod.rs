//! Sparse storage, sparsity patterns and permutations.
//!
//! All internal patterns and the user-facing matrix type are stored
//! in compressed sparse row (CSR) format.

mod csr;
mod error_types;
mod floats;
mod matrix_traits;
mod permutation;

pub use csr::*;
pub use error_types::*;
pub use floats::*;
pub use matrix_traits::*;
pub use permutation::*;
