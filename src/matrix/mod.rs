//! Matrix assembly and the entry point from assembled matrices to
//! symbolic factorization.
//!
//! [`Matrix`] wraps one of the storage formats of [`SparseMatrix`] with an
//! [`AssemblyState`].  Formats are dispatched statically through the
//! [`MatrixFormat`] trait.

mod bsr;
mod dense;
mod error;
mod factored;
mod format;
#[allow(clippy::module_inception)]
mod matrix;
mod state;

pub use bsr::*;
pub use dense::*;
pub use error::*;
pub use factored::*;
pub use format::{InsertMode, MatrixFormat, RowView, SparseMatrix};
pub use matrix::*;
pub use state::*;
