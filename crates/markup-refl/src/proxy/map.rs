// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{downcast, downcast_mut, locate, locate_mut, verify};
use crate::error::{ReflectError, Result};
use crate::etype::EType;
use crate::property::FieldInfo;
use crate::scalar::Scalar;
use std::any::Any;
use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// View of a `map<scalar>` property. Keys are unique; order is unspecified.
pub struct MapProxy<P> {
    entries: P,
}

impl<'a, T: Scalar> MapProxy<&'a HashMap<String, T>> {
    pub fn new(field: &dyn FieldInfo, base: &'a dyn Any) -> Result<Self> {
        verify(field, EType::Map(T::KIND))?;
        let storage = locate(field, base)?;
        Ok(Self {
            entries: downcast(field, storage),
        })
    }
}

impl<'a, T: Scalar> MapProxy<&'a mut HashMap<String, T>> {
    pub fn new_mut(field: &dyn FieldInfo, base: &'a mut dyn Any) -> Result<Self> {
        verify(field, EType::Map(T::KIND))?;
        let storage = locate_mut(field, base)?;
        Ok(Self {
            entries: downcast_mut(field, storage),
        })
    }
}

impl<T: Scalar, P: Deref<Target = HashMap<String, T>>> MapProxy<P> {
    /// Stored tag.
    pub fn ty(&self) -> EType {
        EType::Map(T::KIND)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `key`; [`ReflectError::KeyNotFound`] when absent.
    pub fn at(&self, key: &str) -> Result<&T> {
        self.entries
            .get(key)
            .ok_or_else(|| ReflectError::KeyNotFound(key.to_string()))
    }

    /// Value at `key`, or `None`.
    pub fn find(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, T> {
        self.entries.iter()
    }

    pub fn for_each(&self, mut f: impl FnMut(&str, &T)) {
        for (key, value) in self.entries.iter() {
            f(key, value);
        }
    }
}

impl<T: Scalar, P: DerefMut<Target = HashMap<String, T>>> MapProxy<P> {
    pub fn at_mut(&mut self, key: &str) -> Result<&mut T> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| ReflectError::KeyNotFound(key.to_string()))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Value at `key`, inserting a default one first if absent.
    pub fn insert(&mut self, key: &str) -> &mut T {
        self.entries.entry(key.to_string()).or_default()
    }

    /// Set `key` to `value`; returns the previous value.
    pub fn set(&mut self, key: &str, value: impl Into<T>) -> Option<T> {
        self.entries.insert(key.to_string(), value.into())
    }

    /// Remove `key`; returns whether it was present.
    pub fn erase(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&str, &mut T)) {
        for (key, value) in self.entries.iter_mut() {
            f(key, value);
        }
    }
}

impl<T: Scalar, P: Deref<Target = HashMap<String, T>>> fmt::Debug for MapProxy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
