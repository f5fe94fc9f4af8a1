//! __symfact__ computes the nonzero structure of the triangular factors of a
//! sparse matrix without computing any values.
//!
//! Given a compressed sparse row pattern and row and column elimination
//! orders, the symbolic factorization predicts every entry that fills in
//! during an LU or Cholesky factorization and packs the result into arrays
//! laid out for a fast numeric factorization and triangular solves:
//!
//! * __Plain__: one compressed row structure, rows ascending.
//! * __LU__: the strictly lower part and the diagonal plus upper part,
//!   either in two buffers or packed into one (L from the front, U from the back).
//! * __Cholesky / ICC__: upper rows only, with the diagonal stored last.
//!
//! The factor size is not known in advance.  Rows are written to a chunked
//! arena sized from a fill ratio hint, which grows by appending chunks rather
//! than reallocating, and is flattened into the final layout once the last
//! row is done.  [`SymbolicInfo`](symbolic::SymbolicInfo) reports the fill
//! ratio actually needed so later runs can size the arena exactly.
//!
//! # Modules
//!
//! * [`algebra`]: CSR storage, sparsity patterns and permutations.
//! * [`symbolic`]: the symbolic factorization itself.
//! * [`matrix`]: an assembled matrix wrapper over dense, CSR and block CSR
//!   storage producing a [`FactoredMatrix`](matrix::FactoredMatrix).
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod io;
pub mod matrix;
pub mod symbolic;
mod timers;
