//! String similarity primitives for fuzzy matching.
//!
//! Every scorer returns a value between 0 and 100 and normalizes its input
//! the same way (see [`ratio::normalize`]), so `"The Avengers (2019)"` and
//! `"the avengers 2019"` compare as identical.

pub mod distance;
pub mod ratio;
pub mod similarity;

// Re-export commonly used types
pub use distance::*;
pub use ratio::*;
pub use similarity::*;
