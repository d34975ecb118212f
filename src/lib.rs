//! Deterministic value generator for reproducible test fixtures.
//!
//! Every value is derived from a *key path*, an ordered list of strings. The
//! same key path always yields the same value; different key paths yield
//! different values with overwhelming probability. Structured values are
//! produced by walking their shape and deriving each leaf under an extended
//! key path.
//!
//! # Architecture
//!
//! ```text
//!  key path ──► hash (HighwayHash, fixed key)
//!                  │
//!                  ▼
//!              derivers  (int, string, time, url, ...)
//!                  ▲
//!                  │ leaves
//!  Generator ─► fill walker ──► registry (named / type generators)
//! ```
//!
//! # Example
//!
//! ```rust
//! use keygen::{Fill, Generator};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Fill)]
//! struct User {
//!     id: u64,
//!     email: String,
//!     tags: Vec<String>,
//!     #[keygen(rename = "years")]
//!     age: u8,
//!     #[keygen(generator("bool"))]
//!     active: bool,
//!     #[keygen(skip)]
//!     cache: HashMap<String, String>,
//! }
//!
//! let gen = Generator::default();
//! let user: User = gen.any(&["users", "1"]).unwrap();
//!
//! assert_eq!(user.id, gen.uint64(&["users", "1", "id"]));
//! assert_eq!(user.tags.len(), gen.length(&["users", "1", "tags", "len"]));
//! assert_eq!(user.age, gen.uint64(&["users", "1", "years"]) as u8);
//! assert!(user.cache.is_empty());
//! ```
//!
//! # Field metadata
//!
//! `#[derive(Fill)]` reads `#[keygen(...)]` on fields:
//!
//! - `rename = "segment"` - key segment used instead of the field name
//! - `skip` - never populated, consumes no key segment (field needs `Default`)
//! - `generator("name", "arg", ...)` - value comes from the named generator;
//!   an empty `generator()` walks the field normally
//!
//! Field names are hashed in snake_case.

// Lets `#[derive(Fill)]` output refer to `::keygen` from inside this crate.
extern crate self as keygen;

pub mod derivers;
pub mod error;
pub mod fill;
pub mod generator;
pub mod global;
pub mod hash;
pub mod key_path;
pub mod registry;
pub mod report;
pub mod value;

// Re-exports for convenience
pub use error::KeygenError;
pub use fill::{Fill, Shape};
pub use generator::Generator;
pub use global::{
    any, bool, float32, float64, global, int, int64, length, string, time, uint, uint64, url,
};
pub use key_path::KeyPath;
pub use keygen_derive::Fill;
pub use registry::NamedGeneratorFn;
pub use report::Reporter;
pub use value::{FromValue, Value};
