// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Polymorphic adapters over containers of nested objects.
//!
//! A proxy over `array<object>` or `map<object>` only sees `&dyn Any`. The
//! adapter installed on the property at registration knows the element type
//! and performs the typed operation, including building new elements from
//! the element type's declared defaults.
//!
//! # Architecture
//!
//! ```text
//! Property "items" (array<object>)
//! +-- MemoryDescriptor  -> &dyn Any (really Vec<Item>)
//! +-- StaticObjectVec<Item> as Box<dyn ObjectVecInterface>
//!
//! ObjectArrayProxy::push_back()
//!     -> iface.push_back(&mut dyn Any)
//!         -> downcast to Vec<Item>, push Item::get_default()
//! ```

use crate::error::{check_index, check_range, schema_violation, Result};
use crate::object::{Object, Reflect};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Sequential container of nested objects with an erased element type.
pub trait ObjectVecInterface: Send + Sync {
    /// Name of the concrete element type.
    fn element_type_name(&self) -> &'static str;

    fn len(&self, container: &dyn Any) -> usize;

    fn get<'a>(&self, container: &'a dyn Any, index: usize) -> Result<&'a dyn Object>;

    fn get_mut<'a>(&self, container: &'a mut dyn Any, index: usize)
        -> Result<&'a mut dyn Object>;

    /// Append a defaulted element and return it.
    fn push_back<'a>(&self, container: &'a mut dyn Any) -> &'a mut dyn Object;

    /// Remove the half-open range `from..to`, shifting the tail down.
    fn erase(&self, container: &mut dyn Any, from: usize, to: usize) -> Result<()>;

    fn reserve(&self, container: &mut dyn Any, additional: usize);

    /// A new, empty container of the concrete type.
    fn staging(&self) -> Box<dyn Any>;

    /// Move `staged` (from [`staging`](Self::staging)) into `container`.
    fn replace(&self, container: &mut dyn Any, staged: Box<dyn Any>);
}

/// Text-keyed container of nested objects with an erased element type.
pub trait ObjectMapInterface: Send + Sync {
    /// Name of the concrete element type.
    fn element_type_name(&self) -> &'static str;

    fn len(&self, container: &dyn Any) -> usize;

    fn find<'a>(&self, container: &'a dyn Any, key: &str) -> Option<&'a dyn Object>;

    fn find_mut<'a>(&self, container: &'a mut dyn Any, key: &str) -> Option<&'a mut dyn Object>;

    /// Get the element at `key`, creating a defaulted one if absent.
    fn insert<'a>(&self, container: &'a mut dyn Any, key: &str) -> &'a mut dyn Object;

    /// Remove `key`; returns whether it was present.
    fn erase(&self, container: &mut dyn Any, key: &str) -> bool;

    fn clear(&self, container: &mut dyn Any);

    fn for_each(&self, container: &dyn Any, f: &mut dyn FnMut(&str, &dyn Object));

    fn for_each_mut(&self, container: &mut dyn Any, f: &mut dyn FnMut(&str, &mut dyn Object));

    /// A new, empty container of the concrete type.
    fn staging(&self) -> Box<dyn Any>;

    /// Move `staged` (from [`staging`](Self::staging)) into `container`.
    fn replace(&self, container: &mut dyn Any, staged: Box<dyn Any>);
}

/// [`ObjectVecInterface`] over `Vec<T>`.
pub struct StaticObjectVec<T>(PhantomData<fn() -> T>);

impl<T: Reflect> StaticObjectVec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    fn vec<'a>(&self, container: &'a dyn Any) -> &'a Vec<T> {
        match container.downcast_ref::<Vec<T>>() {
            Some(v) => v,
            None => mismatched_container::<Vec<T>>(),
        }
    }

    fn vec_mut<'a>(&self, container: &'a mut dyn Any) -> &'a mut Vec<T> {
        match container.downcast_mut::<Vec<T>>() {
            Some(v) => v,
            None => mismatched_container::<Vec<T>>(),
        }
    }
}

impl<T: Reflect> Default for StaticObjectVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reflect> ObjectVecInterface for StaticObjectVec<T> {
    fn element_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn len(&self, container: &dyn Any) -> usize {
        self.vec(container).len()
    }

    fn get<'a>(&self, container: &'a dyn Any, index: usize) -> Result<&'a dyn Object> {
        let vec = self.vec(container);
        check_index(index, vec.len())?;
        Ok(&vec[index])
    }

    fn get_mut<'a>(
        &self,
        container: &'a mut dyn Any,
        index: usize,
    ) -> Result<&'a mut dyn Object> {
        let vec = self.vec_mut(container);
        check_index(index, vec.len())?;
        Ok(&mut vec[index])
    }

    fn push_back<'a>(&self, container: &'a mut dyn Any) -> &'a mut dyn Object {
        let vec = self.vec_mut(container);
        let index = vec.len();
        vec.push(T::get_default());
        &mut vec[index]
    }

    fn erase(&self, container: &mut dyn Any, from: usize, to: usize) -> Result<()> {
        let vec = self.vec_mut(container);
        check_range(from, to, vec.len())?;
        vec.drain(from..to);
        Ok(())
    }

    fn reserve(&self, container: &mut dyn Any, additional: usize) {
        self.vec_mut(container).reserve(additional);
    }

    fn staging(&self) -> Box<dyn Any> {
        Box::new(Vec::<T>::new())
    }

    fn replace(&self, container: &mut dyn Any, staged: Box<dyn Any>) {
        match staged.downcast::<Vec<T>>() {
            Ok(staged) => *self.vec_mut(container) = *staged,
            Err(_) => mismatched_container::<Vec<T>>(),
        }
    }
}

/// [`ObjectMapInterface`] over `HashMap<String, T>`.
pub struct StaticObjectMap<T>(PhantomData<fn() -> T>);

impl<T: Reflect> StaticObjectMap<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    fn map<'a>(&self, container: &'a dyn Any) -> &'a HashMap<String, T> {
        match container.downcast_ref::<HashMap<String, T>>() {
            Some(m) => m,
            None => mismatched_container::<HashMap<String, T>>(),
        }
    }

    fn map_mut<'a>(&self, container: &'a mut dyn Any) -> &'a mut HashMap<String, T> {
        match container.downcast_mut::<HashMap<String, T>>() {
            Some(m) => m,
            None => mismatched_container::<HashMap<String, T>>(),
        }
    }
}

impl<T: Reflect> Default for StaticObjectMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reflect> ObjectMapInterface for StaticObjectMap<T> {
    fn element_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn len(&self, container: &dyn Any) -> usize {
        self.map(container).len()
    }

    fn find<'a>(&self, container: &'a dyn Any, key: &str) -> Option<&'a dyn Object> {
        self.map(container).get(key).map(|o| o as &dyn Object)
    }

    fn find_mut<'a>(&self, container: &'a mut dyn Any, key: &str) -> Option<&'a mut dyn Object> {
        self.map_mut(container)
            .get_mut(key)
            .map(|o| o as &mut dyn Object)
    }

    fn insert<'a>(&self, container: &'a mut dyn Any, key: &str) -> &'a mut dyn Object {
        self.map_mut(container)
            .entry(key.to_string())
            .or_insert_with(T::get_default)
    }

    fn erase(&self, container: &mut dyn Any, key: &str) -> bool {
        self.map_mut(container).remove(key).is_some()
    }

    fn clear(&self, container: &mut dyn Any) {
        self.map_mut(container).clear();
    }

    fn for_each(&self, container: &dyn Any, f: &mut dyn FnMut(&str, &dyn Object)) {
        for (key, value) in self.map(container) {
            f(key.as_str(), value as &dyn Object);
        }
    }

    fn for_each_mut(&self, container: &mut dyn Any, f: &mut dyn FnMut(&str, &mut dyn Object)) {
        for (key, value) in self.map_mut(container) {
            f(key.as_str(), value as &mut dyn Object);
        }
    }

    fn staging(&self) -> Box<dyn Any> {
        Box::new(HashMap::<String, T>::new())
    }

    fn replace(&self, container: &mut dyn Any, staged: Box<dyn Any>) {
        match staged.downcast::<HashMap<String, T>>() {
            Ok(staged) => *self.map_mut(container) = *staged,
            Err(_) => mismatched_container::<HashMap<String, T>>(),
        }
    }
}

#[cold]
fn mismatched_container<C>() -> ! {
    schema_violation(format_args!(
        "container adapter bound to {} was handed another container",
        type_name::<C>()
    ))
}
