//! The generator instance.

use chrono::{DateTime, Utc};
use std::fmt;
use url::Url;

use crate::derivers;
use crate::error::KeygenError;
use crate::fill::Fill;
use crate::key_path::KeyPath;
use crate::registry::{Registry, Resolved};
use crate::report::{self, Reporter};

/// Deterministic value generator.
///
/// Owns the error reporter and the override tables. Registration needs
/// `&mut self` and is expected to happen during setup; derivation only needs
/// `&self`, so a fully registered generator can be shared across threads.
pub struct Generator {
    /// Receives every recoverable error
    reporter: Reporter,
    /// Named and per-type overrides
    pub(crate) registry: Registry,
}

impl Generator {
    /// Create a generator reporting errors to `reporter`, with the built-in
    /// named generators (`int`, `uint`, `bool`, `float`) and type generators
    /// (`DateTime<Utc>`, `Url`) registered.
    pub fn new(reporter: impl Fn(KeygenError) + Send + Sync + 'static) -> Self {
        let mut gen = Self {
            reporter: Box::new(reporter),
            registry: Registry::default(),
        };
        gen.register_builtins();
        gen
    }

    /// Hand an error to the configured reporter.
    pub fn report(&self, err: KeygenError) {
        (self.reporter)(err);
    }

    pub fn int<S: AsRef<str>>(&self, keys: &[S]) -> isize {
        derivers::int(keys)
    }

    pub fn int64<S: AsRef<str>>(&self, keys: &[S]) -> i64 {
        derivers::int64(keys)
    }

    pub fn uint<S: AsRef<str>>(&self, keys: &[S]) -> usize {
        derivers::uint(keys)
    }

    pub fn uint64<S: AsRef<str>>(&self, keys: &[S]) -> u64 {
        derivers::uint64(keys)
    }

    /// Container length in `1..=5`.
    pub fn length<S: AsRef<str>>(&self, keys: &[S]) -> usize {
        derivers::length(keys)
    }

    pub fn string<S: AsRef<str>>(&self, keys: &[S]) -> String {
        derivers::string(keys)
    }

    pub fn bool<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        derivers::bool(keys)
    }

    pub fn float32<S: AsRef<str>>(&self, keys: &[S]) -> f32 {
        derivers::float32(keys)
    }

    /// Raw hash bits as a double; may be NaN or infinite.
    pub fn float64<S: AsRef<str>>(&self, keys: &[S]) -> f64 {
        derivers::float64(keys)
    }

    /// Timestamp between 2009-11-10T23:00:00Z and 2030-01-01T00:00:00Z.
    pub fn time<S: AsRef<str>>(&self, keys: &[S]) -> DateTime<Utc> {
        derivers::time(keys)
    }

    /// URL composed from derived parts. A composition that fails to parse is
    /// reported and yields `None`.
    pub fn url<S: AsRef<str>>(&self, keys: &[S]) -> Option<Url> {
        self.reported(derivers::url(keys))
    }

    fn reported<T>(&self, result: Result<T, KeygenError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Populate `dst` in place under `keys`.
    ///
    /// A type generator registered for `T` takes the whole subtree; otherwise
    /// the shape of `T` decides. On failure `dst` is left as it was.
    pub fn fill<T: Fill>(&self, dst: &mut T, keys: &KeyPath) {
        match self.resolve_type::<T>(keys) {
            Resolved::Produced(value) => *dst = value,
            Resolved::Failed => {}
            Resolved::Unregistered => dst.fill_shape(self, keys),
        }
    }

    /// Build a `T` from nothing under `keys`.
    ///
    /// A failing type generator leaves the zero value of `T`. Returns `None`
    /// only when `T` has no zero value and could not be produced.
    pub fn generate<T: Fill>(&self, keys: &KeyPath) -> Option<T> {
        match self.resolve_type::<T>(keys) {
            Resolved::Produced(value) => Some(value),
            Resolved::Failed => T::zero(),
            Resolved::Unregistered => T::generate_shape(self, keys),
        }
    }

    /// Build a fully populated `T` under `keys`.
    pub fn any<T: Fill, S: AsRef<str>>(&self, keys: &[S]) -> Option<T> {
        let keys = KeyPath::new(keys);
        tracing::debug!(
            keys = %keys,
            type_name = std::any::type_name::<T>(),
            "generating value"
        );
        self.generate(&keys)
    }
}

impl Default for Generator {
    /// Generator whose reporter panics on every error.
    fn default() -> Self {
        Self::new(report::fail_loudly)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_equality_across_instances() {
        let gen1 = Generator::default();
        let gen2 = Generator::new(report::log_and_continue);

        assert_eq!(gen1.string(&["a", "b"]), gen2.string(&["a", "b"]));
        assert_eq!(gen1.time(&["a", "b"]), gen2.time(&["a", "b"]));
        assert_eq!(gen1.url(&["a", "b"]), gen2.url(&["a", "b"]));
        assert_eq!(
            gen1.any::<Vec<u8>, _>(&["a", "b"]),
            gen2.any::<Vec<u8>, _>(&["a", "b"])
        );
    }

    #[test]
    fn test_time_and_url_go_through_type_generators() {
        let gen = Generator::default();

        assert_eq!(
            gen.any::<DateTime<Utc>, _>(&["stamp"]),
            Some(gen.time(&["stamp"]))
        );
        assert_eq!(gen.any::<Url, _>(&["site"]), gen.url(&["site"]));
        assert_eq!(
            gen.any::<Option<Url>, _>(&["site"]),
            Some(gen.url(&["site"]))
        );
    }

    #[test]
    fn test_fill_overwrites_in_place() {
        let gen = Generator::default();
        let mut values = vec![1u32; 20];

        gen.fill(&mut values, &KeyPath::from(["values"]));

        assert_eq!(values.len(), gen.length(&["values", "len"]));
        assert_eq!(values[0], gen.uint64(&["values", "0"]) as u32);
    }

    #[test]
    fn test_shared_across_threads() {
        let gen = Generator::default();
        let expected = gen.any::<Vec<String>, _>(&["shared"]);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    assert_eq!(gen.any::<Vec<String>, _>(&["shared"]), expected);
                });
            }
        });
    }

    #[test]
    fn test_malformed_url_is_reported() {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        let gen = Generator::new(move |err| sink.lock().unwrap().push(err));

        let raw = derivers::address::compose(&["site"]).replace("://", ":// ");
        assert_eq!(gen.reported(derivers::address::parse(raw.clone())), None);
        assert!(gen.url(&["site"]).is_some());

        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], KeygenError::InvalidUrl { url, .. } if *url == raw));
    }

    #[test]
    fn test_report_reaches_reporter() {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        let gen = Generator::new(move |err| sink.lock().unwrap().push(err.to_string()));

        gen.report(KeygenError::EmptyGeneratorName);

        assert_eq!(*errors.lock().unwrap(), vec!["name of generator is empty"]);
    }
}
