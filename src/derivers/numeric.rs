//! Numeric and boolean derivers.

use crate::hash::hash64;

/// Upper bound of [`length`].
pub const MAX_LENGTH: usize = 5;

pub fn int64<S: AsRef<str>>(keys: &[S]) -> i64 {
    hash64(keys) as i64
}

pub fn int<S: AsRef<str>>(keys: &[S]) -> isize {
    int64(keys) as isize
}

pub fn uint64<S: AsRef<str>>(keys: &[S]) -> u64 {
    hash64(keys)
}

pub fn uint<S: AsRef<str>>(keys: &[S]) -> usize {
    uint64(keys) as usize
}

/// Container length in `1..=MAX_LENGTH`.
pub fn length<S: AsRef<str>>(keys: &[S]) -> usize {
    (uint64(keys) % MAX_LENGTH as u64) as usize + 1
}

pub fn bool<S: AsRef<str>>(keys: &[S]) -> bool {
    hash64(keys) % 2 == 1
}

/// Raw hash bits reinterpreted as an IEEE-754 double.
///
/// The result covers the whole bit space, so NaN and the infinities are
/// possible outputs.
pub fn float64<S: AsRef<str>>(keys: &[S]) -> f64 {
    f64::from_bits(hash64(keys))
}

/// [`float64`] narrowed to single precision.
pub fn float32<S: AsRef<str>>(keys: &[S]) -> f32 {
    float64(keys) as f32
}
