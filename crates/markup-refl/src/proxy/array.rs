// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{downcast, downcast_mut, locate, locate_mut, verify};
use crate::error::{check_index, check_range, Result};
use crate::etype::EType;
use crate::property::FieldInfo;
use crate::scalar::Scalar;
use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// View of an `array<scalar>` property.
///
/// Out of range indices and ranges are reported as errors, never clamped.
pub struct ArrayProxy<P> {
    items: P,
}

impl<'a, T: Scalar> ArrayProxy<&'a Vec<T>> {
    pub fn new(field: &dyn FieldInfo, base: &'a dyn Any) -> Result<Self> {
        verify(field, EType::Array(T::KIND))?;
        let storage = locate(field, base)?;
        Ok(Self {
            items: downcast(field, storage),
        })
    }
}

impl<'a, T: Scalar> ArrayProxy<&'a mut Vec<T>> {
    pub fn new_mut(field: &dyn FieldInfo, base: &'a mut dyn Any) -> Result<Self> {
        verify(field, EType::Array(T::KIND))?;
        let storage = locate_mut(field, base)?;
        Ok(Self {
            items: downcast_mut(field, storage),
        })
    }
}

impl<T: Scalar, P: Deref<Target = Vec<T>>> ArrayProxy<P> {
    /// Stored tag.
    pub fn ty(&self) -> EType {
        EType::Array(T::KIND)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        check_index(index, self.items.len())?;
        Ok(&self.items[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Scalar, P: DerefMut<Target = Vec<T>>> ArrayProxy<P> {
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.items.len())?;
        Ok(&mut self.items[index])
    }

    /// Append a default element and return it for assignment.
    pub fn emplace_back(&mut self) -> &mut T {
        let index = self.items.len();
        self.items.push(T::default());
        &mut self.items[index]
    }

    pub fn push(&mut self, value: impl Into<T>) {
        self.items.push(value.into());
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Remove one element, shifting the tail down.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        check_index(index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    /// Remove the half-open range `from..to`, shifting the tail down.
    pub fn erase_range(&mut self, from: usize, to: usize) -> Result<()> {
        check_range(from, to, self.items.len())?;
        self.items.drain(from..to);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'p, T: Scalar, P: Deref<Target = Vec<T>>> IntoIterator for &'p ArrayProxy<P> {
    type Item = &'p T;
    type IntoIter = std::slice::Iter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Scalar, P: Deref<Target = Vec<T>>> fmt::Debug for ArrayProxy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
