// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{downcast, downcast_mut, locate, locate_mut, verify};
use crate::error::Result;
use crate::etype::EType;
use crate::property::FieldInfo;
use crate::scalar::{Field, Scalar};
use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// View of a single scalar property or attribute.
///
/// Dereferences to the field value.
pub struct ScalarProxy<P> {
    value: P,
}

impl<'a, T: Scalar> ScalarProxy<&'a T> {
    pub fn new(field: &dyn FieldInfo, base: &'a dyn Any) -> Result<Self> {
        verify(field, T::TYPE)?;
        let storage = locate(field, base)?;
        Ok(Self {
            value: downcast(field, storage),
        })
    }
}

impl<'a, T: Scalar> ScalarProxy<&'a mut T> {
    pub fn new_mut(field: &dyn FieldInfo, base: &'a mut dyn Any) -> Result<Self> {
        verify(field, T::TYPE)?;
        let storage = locate_mut(field, base)?;
        Ok(Self {
            value: downcast_mut(field, storage),
        })
    }
}

impl<P> ScalarProxy<P>
where
    P: Deref,
    P::Target: Scalar,
{
    /// Stored tag.
    pub fn ty(&self) -> EType {
        <P::Target as Field>::TYPE
    }

    pub fn get(&self) -> &P::Target {
        &self.value
    }
}

impl<P> ScalarProxy<P>
where
    P: DerefMut,
    P::Target: Scalar,
{
    pub fn get_mut(&mut self) -> &mut P::Target {
        &mut self.value
    }

    /// Assign a new value; returns the previous one.
    pub fn set(&mut self, value: impl Into<P::Target>) -> P::Target {
        std::mem::replace(&mut *self.value, value.into())
    }
}

impl<P: Deref> Deref for ScalarProxy<P> {
    type Target = P::Target;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<P: DerefMut> DerefMut for ScalarProxy<P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}

impl<P> fmt::Debug for ScalarProxy<P>
where
    P: Deref,
    P::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScalarProxy").field(&&*self.value).finish()
    }
}
