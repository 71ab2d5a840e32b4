// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Proxies over nested objects.
//!
//! Container proxies never see the element type. Every operation is
//! forwarded to the adapter installed on the property at registration.

use super::{locate, locate_mut, verify};
use crate::container::{ObjectMapInterface, ObjectVecInterface};
use crate::error::{check_index, schema_violation, ReflectError, Result};
use crate::etype::{EType, ScalarKind};
use crate::object::Object;
use crate::property::{FieldInfo, Property};
use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

const OBJECT: EType = EType::Scalar(ScalarKind::Object);
const OBJECT_ARRAY: EType = EType::Array(ScalarKind::Object);
const OBJECT_MAP: EType = EType::Map(ScalarKind::Object);

/// View of an embedded nested object.
///
/// Dereferences to `dyn Object`, so the nested object's own properties are
/// reachable through [`ObjectExt`](crate::ObjectExt).
pub struct ObjectProxy<P> {
    object: P,
}

impl<'a> ObjectProxy<&'a dyn Object> {
    pub fn new(field: &dyn FieldInfo, base: &'a dyn Any) -> Result<Self> {
        verify(field, OBJECT)?;
        let object = field.memory().object(base).ok_or_else(|| {
            ReflectError::ForeignProperty {
                property: field.name().to_string(),
                owner: field.memory().owner(),
            }
        })?;
        Ok(Self { object })
    }
}

impl<'a> ObjectProxy<&'a mut dyn Object> {
    pub fn new_mut(field: &dyn FieldInfo, base: &'a mut dyn Any) -> Result<Self> {
        verify(field, OBJECT)?;
        let object = field.memory().object_mut(base).ok_or_else(|| {
            ReflectError::ForeignProperty {
                property: field.name().to_string(),
                owner: field.memory().owner(),
            }
        })?;
        Ok(Self { object })
    }
}

impl<P: Deref<Target = dyn Object>> ObjectProxy<P> {
    /// Stored tag.
    pub fn ty(&self) -> EType {
        OBJECT
    }

    pub fn get(&self) -> &dyn Object {
        &*self.object
    }

    /// Concrete nested object, if it is a `T`.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.object.base().downcast_ref::<T>()
    }
}

impl<P: DerefMut<Target = dyn Object>> ObjectProxy<P> {
    pub fn get_mut(&mut self) -> &mut dyn Object {
        &mut *self.object
    }

    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.object.base_mut().downcast_mut::<T>()
    }
}

impl<P: Deref<Target = dyn Object>> Deref for ObjectProxy<P> {
    type Target = dyn Object;

    fn deref(&self) -> &Self::Target {
        &*self.object
    }
}

impl<P: DerefMut<Target = dyn Object>> DerefMut for ObjectProxy<P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.object
    }
}

impl<P: Deref<Target = dyn Object>> fmt::Debug for ObjectProxy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectProxy")
            .field(&self.object.type_name())
            .finish()
    }
}

/// View of an `array<object>` property.
pub struct ObjectArrayProxy<'a, P> {
    iface: &'a dyn ObjectVecInterface,
    container: P,
}

impl<'a> ObjectArrayProxy<'a, &'a dyn Any> {
    pub fn new(property: &'a Property, base: &'a dyn Any) -> Result<Self> {
        verify(property, OBJECT_ARRAY)?;
        let container = locate(property, base)?;
        Ok(Self {
            iface: vec_iface(property),
            container,
        })
    }
}

impl<'a> ObjectArrayProxy<'a, &'a mut dyn Any> {
    pub fn new_mut(property: &'a Property, base: &'a mut dyn Any) -> Result<Self> {
        verify(property, OBJECT_ARRAY)?;
        let container = locate_mut(property, base)?;
        Ok(Self {
            iface: vec_iface(property),
            container,
        })
    }
}

impl<'a, P: Deref<Target = dyn Any>> ObjectArrayProxy<'a, P> {
    /// Stored tag.
    pub fn ty(&self) -> EType {
        OBJECT_ARRAY
    }

    /// Name of the concrete element type.
    pub fn element_type_name(&self) -> &'static str {
        self.iface.element_type_name()
    }

    pub fn len(&self) -> usize {
        self.iface.len(&*self.container)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<&dyn Object> {
        self.iface.get(&*self.container, index)
    }

    pub fn iter(&self) -> ObjectIter<'_> {
        ObjectIter {
            iface: self.iface,
            container: &*self.container,
            index: 0,
            len: self.len(),
        }
    }
}

impl<'a, P: DerefMut<Target = dyn Any>> ObjectArrayProxy<'a, P> {
    pub fn get_mut(&mut self, index: usize) -> Result<&mut dyn Object> {
        self.iface.get_mut(&mut *self.container, index)
    }

    /// Append an element built from its declared defaults.
    pub fn push_back(&mut self) -> &mut dyn Object {
        self.iface.push_back(&mut *self.container)
    }

    pub fn erase(&mut self, index: usize) -> Result<()> {
        check_index(index, self.len())?;
        self.iface.erase(&mut *self.container, index, index + 1)
    }

    /// Remove the half-open range `from..to`.
    pub fn erase_range(&mut self, from: usize, to: usize) -> Result<()> {
        self.iface.erase(&mut *self.container, from, to)
    }

    pub fn clear(&mut self) {
        let len = self.len();
        // 0..len is always in range
        let _ = self.iface.erase(&mut *self.container, 0, len);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.iface.reserve(&mut *self.container, additional);
    }

    /// Fill an empty container through `fill`, then swap it in.
    ///
    /// When `fill` fails the staged elements are dropped and the field keeps
    /// its previous contents.
    pub fn rebuild(
        &mut self,
        fill: impl FnOnce(&mut ObjectArrayProxy<'_, &mut (dyn Any + 'static)>) -> Result<()>,
    ) -> Result<()> {
        let mut staged = self.iface.staging();
        fill(&mut ObjectArrayProxy {
            iface: self.iface,
            container: &mut *staged,
        })?;
        self.iface.replace(&mut *self.container, staged);
        Ok(())
    }
}

impl<'a, P: Deref<Target = dyn Any>> fmt::Debug for ObjectArrayProxy<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectArrayProxy")
            .field("element", &self.element_type_name())
            .field("len", &self.len())
            .finish()
    }
}

/// Iterator over the elements of an [`ObjectArrayProxy`].
pub struct ObjectIter<'s> {
    iface: &'s dyn ObjectVecInterface,
    container: &'s dyn Any,
    index: usize,
    len: usize,
}

impl<'s> Iterator for ObjectIter<'s> {
    type Item = &'s dyn Object;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let item = self.iface.get(self.container, self.index).ok();
        self.index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

/// View of a `map<object>` property.
pub struct ObjectMapProxy<'a, P> {
    iface: &'a dyn ObjectMapInterface,
    container: P,
}

impl<'a> ObjectMapProxy<'a, &'a dyn Any> {
    pub fn new(property: &'a Property, base: &'a dyn Any) -> Result<Self> {
        verify(property, OBJECT_MAP)?;
        let container = locate(property, base)?;
        Ok(Self {
            iface: map_iface(property),
            container,
        })
    }
}

impl<'a> ObjectMapProxy<'a, &'a mut dyn Any> {
    pub fn new_mut(property: &'a Property, base: &'a mut dyn Any) -> Result<Self> {
        verify(property, OBJECT_MAP)?;
        let container = locate_mut(property, base)?;
        Ok(Self {
            iface: map_iface(property),
            container,
        })
    }
}

impl<'a, P: Deref<Target = dyn Any>> ObjectMapProxy<'a, P> {
    /// Stored tag.
    pub fn ty(&self) -> EType {
        OBJECT_MAP
    }

    /// Name of the concrete element type.
    pub fn element_type_name(&self) -> &'static str {
        self.iface.element_type_name()
    }

    pub fn len(&self) -> usize {
        self.iface.len(&*self.container)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `key`; [`ReflectError::KeyNotFound`] when absent.
    pub fn at(&self, key: &str) -> Result<&dyn Object> {
        self.find(key)
            .ok_or_else(|| ReflectError::KeyNotFound(key.to_string()))
    }

    pub fn find(&self, key: &str) -> Option<&dyn Object> {
        self.iface.find(&*self.container, key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len());
        self.for_each(|key, _| keys.push(key.to_string()));
        keys.sort_unstable();
        keys
    }

    pub fn for_each(&self, mut f: impl FnMut(&str, &dyn Object)) {
        self.iface.for_each(&*self.container, &mut f);
    }
}

impl<'a, P: DerefMut<Target = dyn Any>> ObjectMapProxy<'a, P> {
    pub fn at_mut(&mut self, key: &str) -> Result<&mut dyn Object> {
        self.find_mut(key)
            .ok_or_else(|| ReflectError::KeyNotFound(key.to_string()))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut dyn Object> {
        self.iface.find_mut(&mut *self.container, key)
    }

    /// Element at `key`, creating one from its declared defaults if absent.
    pub fn insert(&mut self, key: &str) -> &mut dyn Object {
        self.iface.insert(&mut *self.container, key)
    }

    /// Remove `key`; returns whether it was present.
    pub fn erase(&mut self, key: &str) -> bool {
        self.iface.erase(&mut *self.container, key)
    }

    pub fn clear(&mut self) {
        self.iface.clear(&mut *self.container);
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&str, &mut dyn Object)) {
        self.iface.for_each_mut(&mut *self.container, &mut f);
    }

    /// Fill an empty container through `fill`, then swap it in.
    ///
    /// When `fill` fails the staged entries are dropped and the field keeps
    /// its previous contents.
    pub fn rebuild(
        &mut self,
        fill: impl FnOnce(&mut ObjectMapProxy<'_, &mut (dyn Any + 'static)>) -> Result<()>,
    ) -> Result<()> {
        let mut staged = self.iface.staging();
        fill(&mut ObjectMapProxy {
            iface: self.iface,
            container: &mut *staged,
        })?;
        self.iface.replace(&mut *self.container, staged);
        Ok(())
    }
}

impl<'a, P: Deref<Target = dyn Any>> fmt::Debug for ObjectMapProxy<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectMapProxy")
            .field("element", &self.element_type_name())
            .field("keys", &self.keys())
            .finish()
    }
}

fn vec_iface(property: &Property) -> &dyn ObjectVecInterface {
    match property.object_vec() {
        Some(iface) => iface,
        None => schema_violation(format_args!(
            "property '{}' is tagged {} but has no sequence adapter",
            property.tag(),
            OBJECT_ARRAY
        )),
    }
}

fn map_iface(property: &Property) -> &dyn ObjectMapInterface {
    match property.object_map() {
        Some(iface) => iface,
        None => schema_violation(format_args!(
            "property '{}' is tagged {} but has no keyed adapter",
            property.tag(),
            OBJECT_MAP
        )),
    }
}
