//! Error taxonomy for the generator.
//!
//! None of these errors are returned to the caller of a derivation. They are
//! handed to the reporter configured on the [`Generator`](crate::Generator),
//! which alone decides whether a condition is fatal.

use crate::fill::Shape;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    /// A named generator was registered twice; the first registration stays active
    #[error("name {0:?} is already registered")]
    DuplicateNamedGenerator(String),

    /// A type generator was registered twice; the first registration stays active
    #[error("type {0:?} is already registered")]
    DuplicateTypeGenerator(&'static str),

    /// Field metadata invoked a named generator that does not exist
    #[error("generator {0:?} is not found")]
    GeneratorNotFound(String),

    /// Field metadata invoked a named generator without naming it
    #[error("name of generator is empty")]
    EmptyGeneratorName,

    /// The walker reached a value it cannot derive
    #[error("not supported shape: {0}")]
    UnsupportedShape(Shape),

    /// A named generator produced a value the destination cannot hold
    #[error("generator {name:?}: type mismatch {produced} and {expected}")]
    TypeMismatch {
        name: String,
        produced: &'static str,
        expected: &'static str,
    },

    /// A named generator failed
    #[error("generator {name:?}: {source}")]
    Generator {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A type generator failed
    #[error("type generator for {type_name:?}: {source}")]
    TypeGenerator {
        type_name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// URL composition produced a string that does not parse
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
