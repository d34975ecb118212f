//! Shared instance.
//!
//! The free functions forward to one process-wide [`Generator`], built on first
//! use with the [`fail_loudly`](crate::report::fail_loudly) reporter and the
//! built-in overrides only. It is never mutated after construction; callers
//! that need their own overrides or a recoverable reporter create a
//! [`Generator`] of their own.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::fill::Fill;
use crate::generator::Generator;

static GLOBAL: Lazy<Generator> = Lazy::new(Generator::default);

/// The shared instance.
pub fn global() -> &'static Generator {
    &GLOBAL
}

pub fn int<S: AsRef<str>>(keys: &[S]) -> isize {
    GLOBAL.int(keys)
}

pub fn int64<S: AsRef<str>>(keys: &[S]) -> i64 {
    GLOBAL.int64(keys)
}

pub fn uint<S: AsRef<str>>(keys: &[S]) -> usize {
    GLOBAL.uint(keys)
}

pub fn uint64<S: AsRef<str>>(keys: &[S]) -> u64 {
    GLOBAL.uint64(keys)
}

pub fn length<S: AsRef<str>>(keys: &[S]) -> usize {
    GLOBAL.length(keys)
}

pub fn string<S: AsRef<str>>(keys: &[S]) -> String {
    GLOBAL.string(keys)
}

pub fn bool<S: AsRef<str>>(keys: &[S]) -> bool {
    GLOBAL.bool(keys)
}

pub fn float32<S: AsRef<str>>(keys: &[S]) -> f32 {
    GLOBAL.float32(keys)
}

pub fn float64<S: AsRef<str>>(keys: &[S]) -> f64 {
    GLOBAL.float64(keys)
}

/// Timestamp between 2009-11-10T23:00:00Z and 2030-01-01T00:00:00Z.
pub fn time<S: AsRef<str>>(keys: &[S]) -> DateTime<Utc> {
    GLOBAL.time(keys)
}

/// Panics if the composed URL does not parse.
pub fn url<S: AsRef<str>>(keys: &[S]) -> Option<::url::Url> {
    GLOBAL.url(keys)
}

/// Panics on any derivation error.
pub fn any<T: Fill, S: AsRef<str>>(keys: &[S]) -> Option<T> {
    GLOBAL.any(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_matches_fresh_instance() {
        let gen = Generator::default();

        assert_eq!(int64(&["g"]), gen.int64(&["g"]));
        assert_eq!(string(&["g"]), gen.string(&["g"]));
        assert_eq!(time(&["g"]), gen.time(&["g"]));
        assert_eq!(url(&["g"]), gen.url(&["g"]));
        assert_eq!(any::<Vec<i32>, _>(&["g"]), gen.any::<Vec<i32>, _>(&["g"]));
    }

    #[test]
    fn test_global_is_one_instance() {
        assert!(std::ptr::eq(global(), global()));
    }
}
