mod core;
pub use self::core::*;
mod pattern;
pub use pattern::*;
