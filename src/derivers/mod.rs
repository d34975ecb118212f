//! Scalar derivers.
//!
//! Pure functions from a key path to a primitive value. Only URL composition
//! can fail; everything else is total.

pub mod address;
pub mod numeric;
pub mod text;
pub mod timestamp;

pub use address::url;
pub use numeric::{bool, float32, float64, int, int64, length, uint, uint64};
pub use text::string;
pub use timestamp::time;
