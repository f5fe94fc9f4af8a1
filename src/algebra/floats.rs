use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Trait for floating point values stored alongside a factor pattern.
///
/// The symbolic pass itself is integer-only. `FloatT` bounds the value
/// arrays of the matrix formats and of the
/// [`FactoredMatrix`](crate::matrix::FactoredMatrix) that consumes a pattern.
/// Implementations are provided for any type satisfying the bounds, which
/// in practice means `f32` and `f64`.
///
/// `FloatT` relies on [`num_traits`](num_traits) for its numeric bounds.
pub trait FloatT:
    'static + Send + Sync + Float + NumAssign + Default + FromPrimitive + Display + LowerExp + Debug
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Sync
        + Float
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
{
}
