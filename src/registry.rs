//! Override registry.
//!
//! Two independent tables, both keyed by exact match:
//!
//! - named generators, invoked from field metadata with explicit arguments
//!   (`#[keygen(generator("name", "arg", ...))]`);
//! - type generators, invoked automatically whenever the walker reaches a value
//!   of the registered type. `Option<T>` and `Box<T>` are walked through, so a
//!   generator registered for `T` also serves them.
//!
//! Re-registering a key reports a duplicate and keeps the first registration.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use url::Url;

use crate::derivers;
use crate::error::KeygenError;
use crate::fill::Fill;
use crate::generator::Generator;
use crate::key_path::KeyPath;
use crate::value::{FromValue, Value};

/// Named generator: receives the generator, the arguments from the field
/// metadata and the key path of the field.
pub type NamedGeneratorFn =
    dyn Fn(&Generator, &[&str], &KeyPath) -> anyhow::Result<Value> + Send + Sync;

type ErasedTypeGeneratorFn =
    dyn Fn(&Generator, &KeyPath) -> anyhow::Result<Box<dyn Any>> + Send + Sync;

struct TypeGenerator {
    type_name: &'static str,
    produce: Box<ErasedTypeGeneratorFn>,
}

/// Override tables owned by a [`Generator`].
#[derive(Default)]
pub(crate) struct Registry {
    named: HashMap<String, Box<NamedGeneratorFn>>,
    types: HashMap<TypeId, TypeGenerator>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: Vec<&str> = self.named.keys().map(String::as_str).collect();
        named.sort_unstable();
        let mut types: Vec<&str> = self.types.values().map(|t| t.type_name).collect();
        types.sort_unstable();

        f.debug_struct("Registry")
            .field("named", &named)
            .field("types", &types)
            .finish()
    }
}

/// Outcome of a type-generator lookup.
pub(crate) enum Resolved<T> {
    /// No generator registered for the type
    Unregistered,
    /// The generator produced a value
    Produced(T),
    /// The generator failed; the error has been reported
    Failed,
}

impl Generator {
    pub(crate) fn register_builtins(&mut self) {
        self.register_named_generator("int", |gen, _args, keys| {
            Ok(Value::Int(gen.int(keys.segments()) as i64))
        });
        self.register_named_generator("uint", |gen, _args, keys| {
            Ok(Value::Uint(gen.uint(keys.segments()) as u64))
        });
        self.register_named_generator("bool", |gen, _args, keys| {
            Ok(Value::Bool(gen.bool(keys.segments())))
        });
        self.register_named_generator("float", |gen, _args, keys| {
            Ok(Value::Float(gen.float64(keys.segments())))
        });

        self.register_type_generator::<DateTime<Utc>, _>(|gen, keys| Ok(gen.time(keys.segments())));
        self.register_type_generator::<Url, _>(|_, keys| Ok(derivers::url(keys.segments())?));
    }

    /// Register a generator invocable by name from field metadata.
    pub fn register_named_generator<F>(&mut self, name: impl Into<String>, generator: F)
    where
        F: Fn(&Generator, &[&str], &KeyPath) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.registry.named.contains_key(&name) {
            self.report(KeygenError::DuplicateNamedGenerator(name));
            return;
        }

        tracing::debug!(name = %name, "registered named generator");
        self.registry.named.insert(name, Box::new(generator));
    }

    /// Register a generator for every value of type `T` the walker reaches.
    pub fn register_type_generator<T, F>(&mut self, generator: F)
    where
        T: Fill,
        F: Fn(&Generator, &KeyPath) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let type_id = TypeId::of::<T>();
        if self.registry.types.contains_key(&type_id) {
            self.report(KeygenError::DuplicateTypeGenerator(type_name));
            return;
        }

        tracing::debug!(type_name, "registered type generator");
        self.registry.types.insert(
            type_id,
            TypeGenerator {
                type_name,
                produce: Box::new(move |gen, keys| {
                    generator(gen, keys).map(|value| Box::new(value) as Box<dyn Any>)
                }),
            },
        );
    }

    pub fn has_named_generator(&self, name: &str) -> bool {
        self.registry.named.contains_key(name)
    }

    pub fn has_type_generator<T: 'static>(&self) -> bool {
        self.registry.types.contains_key(&TypeId::of::<T>())
    }

    /// Populate `dst` with the value of the named generator `name`.
    ///
    /// The produced value goes through [`FromValue`]; string destinations
    /// accept every kind. Any failure is reported and leaves `dst` untouched.
    pub fn fill_named<T: FromValue>(
        &self,
        dst: &mut T,
        name: &str,
        args: &[&str],
        keys: &KeyPath,
    ) {
        if let Some(value) = self.run_named(name, args, keys) {
            *dst = value;
        }
    }

    /// Build a `T` from the named generator `name`, falling back to the zero
    /// value of `T` when the generator fails.
    pub fn generate_named<T: Fill + FromValue>(
        &self,
        name: &str,
        args: &[&str],
        keys: &KeyPath,
    ) -> Option<T> {
        self.run_named(name, args, keys).or_else(T::zero)
    }

    fn run_named<T: FromValue>(&self, name: &str, args: &[&str], keys: &KeyPath) -> Option<T> {
        if name.is_empty() {
            self.report(KeygenError::EmptyGeneratorName);
            return None;
        }

        let Some(generator) = self.registry.named.get(name) else {
            self.report(KeygenError::GeneratorNotFound(name.to_string()));
            return None;
        };

        let value = match generator(self, args, keys) {
            Ok(value) => value,
            Err(source) => {
                self.report(KeygenError::Generator {
                    name: name.to_string(),
                    source,
                });
                return None;
            }
        };

        match T::from_value(value) {
            Ok(converted) => Some(converted),
            Err(value) => {
                self.report(KeygenError::TypeMismatch {
                    name: name.to_string(),
                    produced: value.kind(),
                    expected: std::any::type_name::<T>(),
                });
                None
            }
        }
    }

    /// Run the type generator registered for `T`, if any.
    pub(crate) fn resolve_type<T: Fill>(&self, keys: &KeyPath) -> Resolved<T> {
        let Some(entry) = self.registry.types.get(&TypeId::of::<T>()) else {
            return Resolved::Unregistered;
        };

        let produced = (entry.produce)(self, keys).and_then(|value| {
            value
                .downcast::<T>()
                .map_err(|_| anyhow::anyhow!("produced a value of another type"))
        });

        match produced {
            Ok(value) => Resolved::Produced(*value),
            Err(source) => {
                self.report(KeygenError::TypeGenerator {
                    type_name: entry.type_name,
                    source,
                });
                Resolved::Failed
            }
        }
    }
}
