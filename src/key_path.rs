//! Key paths.

use std::fmt;

/// Ordered sequence of key segments addressing one derived value.
///
/// Paths are immutable: [`child`](KeyPath::child) and
/// [`index`](KeyPath::index) return a fresh path and leave the receiver
/// untouched, so a parent can hand out many extensions of the same prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Create a key path from its segments.
    pub fn new<S: AsRef<str>>(segments: &[S]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Extend the path with one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Extend the path with a decimal index segment.
    pub fn index(&self, i: usize) -> Self {
        self.child(i.to_string())
    }

    /// The segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for KeyPath {
    fn from(segments: [S; N]) -> Self {
        Self::new(&segments)
    }
}

impl AsRef<[String]> for KeyPath {
    fn as_ref(&self) -> &[String] {
        &self.segments
    }
}

/// Segments joined with `/`. For diagnostics only; hashing never sees the separator.
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
