// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type property tables and the process-wide registry that owns them.
//!
//! # Architecture
//!
//! ```text
//! TraitsRegistry (static global)
//! +-- tables: DashMap<TypeId, &'static OnceLock<ObjectTraits>>
//!
//! ObjectTraits (one per reflected type, built on first access)
//! +-- type_name: &'static str
//! +-- properties: Vec<Property>   (registration order, tag-unique)
//! ```
//!
//! # Thread Safety
//!
//! - The map only hands out the per-type cell; its shard lock is released
//!   before the table is built, so building one type may build others.
//! - The per-type `OnceLock` runs `describe` exactly once. Concurrent first
//!   accesses block until the table is complete and then share it.
//! - A published table is immutable and read without locking.
//!
//! A type's `describe` must not request its own traits: the cell is still
//! being initialized and the call would never return.

use crate::object::Reflect;
use crate::property::Property;
use crate::registration::Registrar;
use dashmap::DashMap;
use std::any::{type_name, TypeId};
use std::sync::OnceLock;

/// Immutable property table of one reflected type.
#[derive(Debug)]
pub struct ObjectTraits {
    type_name: &'static str,
    properties: Vec<Property>,
}

impl ObjectTraits {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            properties: Vec::new(),
        }
    }

    /// Traits of `T`, built on first use.
    pub fn of<T: Reflect>() -> &'static ObjectTraits {
        TraitsRegistry::global().get_or_build::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Properties in registration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property by tag; `None` when absent.
    pub fn find_property(&self, tag: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.tag() == tag)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Only mutating entry point; used by the registrar before publication.
    pub(crate) fn find_or_add_property(&mut self, tag: &str) -> &mut Property {
        let index = match self.properties.iter().position(|p| p.tag() == tag) {
            Some(index) => index,
            None => {
                self.properties.push(Property::shell(tag));
                self.properties.len() - 1
            }
        };
        &mut self.properties[index]
    }

    /// Tags of properties that only received attributes.
    pub(crate) fn incomplete_properties(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| !p.has_memory())
            .map(Property::tag)
            .collect()
    }
}

/// Process-wide owner of every [`ObjectTraits`] table.
pub struct TraitsRegistry {
    tables: DashMap<TypeId, &'static OnceLock<ObjectTraits>>,
}

impl TraitsRegistry {
    fn new() -> Self {
        Self {
            tables: DashMap::new(),
        }
    }

    /// Get the global registry instance
    pub fn global() -> &'static TraitsRegistry {
        static REGISTRY: OnceLock<TraitsRegistry> = OnceLock::new();
        REGISTRY.get_or_init(TraitsRegistry::new)
    }

    /// Traits of `T`, running `T::describe` exactly once per process.
    pub fn get_or_build<T: Reflect>(&self) -> &'static ObjectTraits {
        let cell = self.cell(TypeId::of::<T>());
        cell.get_or_init(build::<T>)
    }

    /// Traits of `T` if already built.
    pub fn get<T: Reflect>(&self) -> Option<&'static ObjectTraits> {
        let cell: &'static OnceLock<ObjectTraits> = *self.tables.get(&TypeId::of::<T>())?;
        cell.get()
    }

    /// Names of all types whose traits are built, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .tables
            .iter()
            .filter_map(|entry| entry.value().get().map(ObjectTraits::type_name))
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of built tables.
    pub fn len(&self) -> usize {
        self.tables
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, id: TypeId) -> &'static OnceLock<ObjectTraits> {
        if let Some(cell) = self.tables.get(&id) {
            return *cell;
        }
        let cell: &'static OnceLock<ObjectTraits> = *self
            .tables
            .entry(id)
            .or_insert_with(|| Box::leak(Box::new(OnceLock::new())));
        cell
    }
}

fn build<T: Reflect>() -> ObjectTraits {
    let mut registrar = Registrar::<T>::new();
    T::describe(&mut registrar);
    let traits = registrar.finish();
    log::debug!(
        "[ObjectTraits] built {} ({} properties)",
        type_name::<T>(),
        traits.len()
    );
    traits
}
