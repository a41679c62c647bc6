//! Registry of record types for type-erased validation.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use crate::record::{Describe, FieldDescriptor};

type DescribeFn = for<'a> fn(&'a dyn Any) -> Option<Vec<FieldDescriptor<'a>>>;

#[derive(Clone, Copy)]
struct Entry {
    type_name: &'static str,
    describe: DescribeFn,
}

/// Record types registered for validation through `&dyn Any`.
#[derive(Clone, Default)]
pub struct RecordRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl RecordRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `T`. A boxed `T` is registered alongside it.
    pub fn register<T: Describe + Any>(&mut self) {
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: type_name::<T>(),
                describe: describe_as::<T>,
            },
        );
        self.entries.insert(
            TypeId::of::<Box<T>>(),
            Entry {
                type_name: type_name::<Box<T>>(),
                describe: describe_as::<Box<T>>,
            },
        );
    }

    /// Describe a type-erased record, or `None` if its type is not registered.
    pub fn describe<'a>(&self, record: &'a dyn Any) -> Option<Vec<FieldDescriptor<'a>>> {
        let entry = self.entries.get(&record.type_id())?;
        (entry.describe)(record)
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types, boxed forms included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for RecordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.values().map(|entry| entry.type_name))
            .finish()
    }
}

fn describe_as<T: Describe + Any>(record: &dyn Any) -> Option<Vec<FieldDescriptor<'_>>> {
    record.downcast_ref::<T>().map(Describe::describe)
}
