//! Structural walker.
//!
//! Every type the walker can populate implements [`Fill`]. The implementation
//! for a shape decides how the key path is extended before recursing:
//!
//! | Shape              | Child key path                          |
//! |--------------------|-----------------------------------------|
//! | scalar             | unchanged, derived directly             |
//! | `[T; N]`           | `keys + [i]`                            |
//! | `Vec<T>`           | length from `keys + ["len"]`, then `keys + [i]` |
//! | map                | size from `keys + ["len"]`, then `keys + [i, "key"]` / `keys + [i, "value"]` |
//! | record (derived)   | `keys + [field name]`                   |
//! | `Option<T>`, `Box<T>` | unchanged                            |
//!
//! Recursion always goes through [`Generator::fill`] or
//! [`Generator::generate`], which consult the type-generator table before
//! falling back to [`Fill::fill_shape`] or [`Fill::generate_shape`].

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use url::Url;

use crate::error::KeygenError;
use crate::generator::Generator;
use crate::key_path::KeyPath;

/// Kind of a destination, driving dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Bool,
    Int,
    Uint,
    Float,
    String,
    /// Fixed-size array with its length
    Array(usize),
    /// Variable-length sequence
    Sequence,
    /// Associative map
    Map,
    /// Record with named or positional fields
    Record(&'static str),
    /// Optional value or owned pointer
    Indirect,
    /// Type with no structure the walker understands; only a type generator
    /// can produce it
    Opaque(&'static str),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Uint => f.write_str("uint"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Array(n) => write!(f, "array[{n}]"),
            Self::Sequence => f.write_str("sequence"),
            Self::Map => f.write_str("map"),
            Self::Record(name) => write!(f, "record {name}"),
            Self::Indirect => f.write_str("indirect"),
            Self::Opaque(name) => write!(f, "opaque {name}"),
        }
    }
}

/// A type the structural walker can populate.
///
/// Records get this through `#[derive(Fill)]`. Opaque types only need to name
/// their shape; the default methods make them producible by a registered type
/// generator and report an unsupported shape otherwise.
pub trait Fill: Sized + 'static {
    fn shape() -> Shape;

    /// Zero value allocated before filling. `None` when the type has no zero
    /// value and can only come from a type generator.
    fn zero() -> Option<Self> {
        None
    }

    /// Populate `self` in place under `keys`, without consulting the
    /// type-generator table for `Self`.
    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        let _ = keys;
        gen.report(KeygenError::UnsupportedShape(Self::shape()));
    }

    /// Build a value from nothing under `keys`, without consulting the
    /// type-generator table for `Self`.
    ///
    /// Defaults to filling the zero value. Composite types override this to
    /// build their parts one by one, so a part without a zero value can still
    /// come from its type generator.
    fn generate_shape(gen: &Generator, keys: &KeyPath) -> Option<Self> {
        let Some(mut value) = Self::zero() else {
            gen.report(KeygenError::UnsupportedShape(Self::shape()));
            return None;
        };
        value.fill_shape(gen, keys);
        Some(value)
    }
}

macro_rules! impl_fill_scalar {
    ($shape:ident, $deriver:ident => $($t:ty),* $(,)?) => {
        $(
            impl Fill for $t {
                fn shape() -> Shape {
                    Shape::$shape
                }

                fn zero() -> Option<Self> {
                    Some(<$t>::default())
                }

                fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
                    *self = gen.$deriver(keys.segments()) as $t;
                }
            }
        )*
    };
}

impl_fill_scalar!(Int, int64 => i8, i16, i32, i64, isize);
impl_fill_scalar!(Uint, uint64 => u8, u16, u32, u64, usize);
impl_fill_scalar!(Float, float64 => f32, f64);

impl Fill for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn zero() -> Option<Self> {
        Some(false)
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        *self = gen.bool(keys.segments());
    }
}

impl Fill for String {
    fn shape() -> Shape {
        Shape::String
    }

    fn zero() -> Option<Self> {
        Some(String::new())
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        *self = gen.string(keys.segments());
    }
}

impl<T: Fill, const N: usize> Fill for [T; N] {
    fn shape() -> Shape {
        Shape::Array(N)
    }

    fn zero() -> Option<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::zero()?);
        }
        items.try_into().ok()
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        for (i, item) in self.iter_mut().enumerate() {
            gen.fill(item, &keys.index(i));
        }
    }

    fn generate_shape(gen: &Generator, keys: &KeyPath) -> Option<Self> {
        let items = (0..N)
            .map(|i| gen.generate::<T>(&keys.index(i)))
            .collect::<Option<Vec<T>>>()?;
        items.try_into().ok()
    }
}

impl<T: Fill> Fill for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence
    }

    fn zero() -> Option<Self> {
        Some(Vec::new())
    }

    /// An element whose type has no zero value and cannot be produced is left
    /// out; every other failure leaves the element at its zero value.
    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        let len = gen.length(keys.child("len").segments());
        *self = (0..len)
            .filter_map(|i| gen.generate::<T>(&keys.index(i)))
            .collect();
    }
}

/// Derive `(key, value)` for map entry `i`.
fn map_entry<K: Fill, V: Fill>(gen: &Generator, keys: &KeyPath, i: usize) -> Option<(K, V)> {
    let entry = keys.index(i);
    let key = gen.generate::<K>(&entry.child("key"))?;
    let value = gen.generate::<V>(&entry.child("value"))?;
    Some((key, value))
}

/// Colliding derived keys overwrite earlier entries.
impl<K: Fill + Eq + Hash, V: Fill> Fill for HashMap<K, V> {
    fn shape() -> Shape {
        Shape::Map
    }

    fn zero() -> Option<Self> {
        Some(HashMap::new())
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        let len = gen.length(keys.child("len").segments());
        *self = (0..len).filter_map(|i| map_entry(gen, keys, i)).collect();
    }
}

impl<K: Fill + Ord, V: Fill> Fill for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map
    }

    fn zero() -> Option<Self> {
        Some(BTreeMap::new())
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        let len = gen.length(keys.child("len").segments());
        *self = (0..len).filter_map(|i| map_entry(gen, keys, i)).collect();
    }
}

/// Always replaced by a freshly generated value, even when already `Some`.
impl<T: Fill> Fill for Option<T> {
    fn shape() -> Shape {
        Shape::Indirect
    }

    fn zero() -> Option<Self> {
        Some(None)
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        if let Some(value) = gen.generate::<T>(keys) {
            *self = Some(value);
        }
    }
}

impl<T: Fill> Fill for Box<T> {
    fn shape() -> Shape {
        Shape::Indirect
    }

    fn zero() -> Option<Self> {
        T::zero().map(Box::new)
    }

    fn fill_shape(&mut self, gen: &Generator, keys: &KeyPath) {
        if let Some(value) = gen.generate::<T>(keys) {
            *self = Box::new(value);
        }
    }

    fn generate_shape(gen: &Generator, keys: &KeyPath) -> Option<Self> {
        gen.generate::<T>(keys).map(Box::new)
    }
}

impl<T: 'static> Fill for PhantomData<T> {
    fn shape() -> Shape {
        Shape::Record("PhantomData")
    }

    fn zero() -> Option<Self> {
        Some(PhantomData)
    }

    fn fill_shape(&mut self, _gen: &Generator, _keys: &KeyPath) {}
}

/// Produced by the pre-registered type generator.
impl Fill for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Opaque("DateTime<Utc>")
    }

    fn zero() -> Option<Self> {
        Some(DateTime::<Utc>::default())
    }
}

/// Produced by the pre-registered type generator. Has no zero value, so a
/// `Url` field is only ever built by that generator.
impl Fill for Url {
    fn shape() -> Shape {
        Shape::Opaque("Url")
    }
}
