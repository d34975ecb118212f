//! Error reporting policies.

use crate::error::KeygenError;

/// Callback invoked for every recoverable error the generator encounters.
pub type Reporter = Box<dyn Fn(KeygenError) + Send + Sync>;

/// Treat every error as fatal.
///
/// This is the policy of [`Generator::default`](crate::Generator) and of the
/// shared instance behind the free functions.
pub fn fail_loudly(err: KeygenError) {
    panic!("keygen: {err}");
}

/// Log the error and carry on; the affected subtree keeps its zero value.
pub fn log_and_continue(err: KeygenError) {
    tracing::warn!(error = %err, "keygen: derivation error");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "keygen: generator \"zip\" is not found")]
    fn test_fail_loudly_panics() {
        fail_loudly(KeygenError::GeneratorNotFound("zip".to_string()));
    }

    #[test]
    fn test_log_and_continue_returns() {
        log_and_continue(KeygenError::EmptyGeneratorName);
    }
}
