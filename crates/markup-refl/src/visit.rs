// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Visitor dispatch: recover static typing from a stored tag.
//!
//! Dispatch runs in two tiers. The first matches the scalar kind and covers
//! every non-container field, embedded objects included. The second is
//! reached for container tags on properties only and matches the element
//! kind to pick the array or map proxy. A visitor is therefore instantiated
//! once per reachable shape: 8 scalar, 8 array and 8 map paths.
//!
//! ```rust
//! use markup_refl::{
//!     visit, ArrayProxy, MapProxy, ObjectArrayProxy, ObjectMapProxy, ObjectProxy, Reflect,
//!     Registrar, Scalar, ScalarProxy, Visitor,
//! };
//! use std::any::Any;
//! use std::collections::HashMap;
//!
//! /// Counts the values held by a field.
//! struct Count;
//!
//! impl<'a> Visitor<'a> for Count {
//!     type Output = usize;
//!
//!     fn visit_scalar<T: Scalar>(self, _: ScalarProxy<&'a T>) -> usize { 1 }
//!     fn visit_object(self, _: ObjectProxy<&'a dyn markup_refl::Object>) -> usize { 1 }
//!     fn visit_array<T: Scalar>(self, p: ArrayProxy<&'a Vec<T>>) -> usize { p.len() }
//!     fn visit_map<T: Scalar>(self, p: MapProxy<&'a HashMap<String, T>>) -> usize { p.len() }
//!     fn visit_object_array(self, p: ObjectArrayProxy<'a, &'a dyn Any>) -> usize { p.len() }
//!     fn visit_object_map(self, p: ObjectMapProxy<'a, &'a dyn Any>) -> usize { p.len() }
//! }
//!
//! #[derive(Default, Clone)]
//! struct Foo {
//!     items: Vec<i64>,
//! }
//!
//! impl Reflect for Foo {
//!     fn describe(r: &mut Registrar<Self>) {
//!         r.element("items", |o| &o.items, |o| &mut o.items, vec![1i64, 2, 3]);
//!     }
//! }
//!
//! let foo = Foo::get_default();
//! let property = &markup_refl::ObjectTraits::of::<Foo>().properties()[0];
//! assert_eq!(visit(&foo, property, Count).unwrap(), 3);
//! ```

use crate::error::{schema_violation, Result};
use crate::etype::{EType, ScalarKind};
use crate::object::Object;
use crate::property::{Attribute, FieldInfo, Property};
use crate::proxy::{
    ArrayProxy, MapProxy, ObjectArrayProxy, ObjectMapProxy, ObjectProxy, ScalarProxy,
};
use crate::scalar::{Binary, Null, Scalar, Timestamp};
use std::any::Any;
use std::collections::HashMap;

/// Handler for read-only dispatch.
pub trait Visitor<'a> {
    type Output;

    fn visit_scalar<T: Scalar>(self, proxy: ScalarProxy<&'a T>) -> Self::Output;

    fn visit_object(self, proxy: ObjectProxy<&'a dyn Object>) -> Self::Output;

    fn visit_array<T: Scalar>(self, proxy: ArrayProxy<&'a Vec<T>>) -> Self::Output;

    fn visit_map<T: Scalar>(self, proxy: MapProxy<&'a HashMap<String, T>>) -> Self::Output;

    fn visit_object_array(self, proxy: ObjectArrayProxy<'a, &'a dyn Any>) -> Self::Output;

    fn visit_object_map(self, proxy: ObjectMapProxy<'a, &'a dyn Any>) -> Self::Output;
}

/// Handler for mutable dispatch.
pub trait VisitorMut<'a> {
    type Output;

    fn visit_scalar<T: Scalar>(self, proxy: ScalarProxy<&'a mut T>) -> Self::Output;

    fn visit_object(self, proxy: ObjectProxy<&'a mut dyn Object>) -> Self::Output;

    fn visit_array<T: Scalar>(self, proxy: ArrayProxy<&'a mut Vec<T>>) -> Self::Output;

    fn visit_map<T: Scalar>(self, proxy: MapProxy<&'a mut HashMap<String, T>>) -> Self::Output;

    fn visit_object_array(self, proxy: ObjectArrayProxy<'a, &'a mut dyn Any>) -> Self::Output;

    fn visit_object_map(self, proxy: ObjectMapProxy<'a, &'a mut dyn Any>) -> Self::Output;
}

/// Bind the native type of a non-object scalar kind to `$t` for `$body`.
macro_rules! with_scalar_type {
    ($kind:expr, $t:ident => $body:expr, object => $object:expr) => {
        match $kind {
            ScalarKind::Null => {
                type $t = Null;
                $body
            }
            ScalarKind::Boolean => {
                type $t = bool;
                $body
            }
            ScalarKind::Integer => {
                type $t = i64;
                $body
            }
            ScalarKind::Float => {
                type $t = f64;
                $body
            }
            ScalarKind::String => {
                type $t = String;
                $body
            }
            ScalarKind::Timestamp => {
                type $t = Timestamp;
                $body
            }
            ScalarKind::Binary => {
                type $t = Binary;
                $body
            }
            ScalarKind::Object => $object,
        }
    };
}

/// Dispatch `visitor` on the proxy matching the property's stored tag.
pub fn visit<'a, V: Visitor<'a>>(
    object: &'a dyn Object,
    property: &'a Property,
    visitor: V,
) -> Result<V::Output> {
    let base = object.base();
    let output = match property.ty() {
        EType::Scalar(kind) => with_scalar_type!(kind,
            T => visitor.visit_scalar(ScalarProxy::<&T>::new(property, base)?),
            object => visitor.visit_object(ObjectProxy::new(property, base)?)
        ),
        EType::Array(kind) => with_scalar_type!(kind,
            T => visitor.visit_array(ArrayProxy::<&Vec<T>>::new(property, base)?),
            object => visitor.visit_object_array(ObjectArrayProxy::new(property, base)?)
        ),
        EType::Map(kind) => with_scalar_type!(kind,
            T => visitor.visit_map(MapProxy::<&HashMap<String, T>>::new(property, base)?),
            object => visitor.visit_object_map(ObjectMapProxy::new(property, base)?)
        ),
    };
    Ok(output)
}

pub fn visit_mut<'a, V: VisitorMut<'a>>(
    object: &'a mut dyn Object,
    property: &'a Property,
    visitor: V,
) -> Result<V::Output> {
    let base = object.base_mut();
    let output = match property.ty() {
        EType::Scalar(kind) => with_scalar_type!(kind,
            T => visitor.visit_scalar(ScalarProxy::<&mut T>::new_mut(property, base)?),
            object => visitor.visit_object(ObjectProxy::new_mut(property, base)?)
        ),
        EType::Array(kind) => with_scalar_type!(kind,
            T => visitor.visit_array(ArrayProxy::<&mut Vec<T>>::new_mut(property, base)?),
            object => visitor.visit_object_array(ObjectArrayProxy::new_mut(property, base)?)
        ),
        EType::Map(kind) => with_scalar_type!(kind,
            T => visitor.visit_map(MapProxy::<&mut HashMap<String, T>>::new_mut(property, base)?),
            object => visitor.visit_object_map(ObjectMapProxy::new_mut(property, base)?)
        ),
    };
    Ok(output)
}

/// Dispatch on an attribute. Only the scalar tier exists for attributes.
pub fn visit_attribute<'a, V: Visitor<'a>>(
    object: &'a dyn Object,
    attribute: &'a Attribute,
    visitor: V,
) -> Result<V::Output> {
    let base = object.base();
    let output = match attribute.ty() {
        EType::Scalar(kind) => with_scalar_type!(kind,
            T => visitor.visit_scalar(ScalarProxy::<&T>::new(attribute, base)?),
            object => not_an_attribute_shape(attribute)
        ),
        EType::Array(_) | EType::Map(_) => not_an_attribute_shape(attribute),
    };
    Ok(output)
}

pub fn visit_attribute_mut<'a, V: VisitorMut<'a>>(
    object: &'a mut dyn Object,
    attribute: &'a Attribute,
    visitor: V,
) -> Result<V::Output> {
    let base = object.base_mut();
    let output = match attribute.ty() {
        EType::Scalar(kind) => with_scalar_type!(kind,
            T => visitor.visit_scalar(ScalarProxy::<&mut T>::new_mut(attribute, base)?),
            object => not_an_attribute_shape(attribute)
        ),
        EType::Array(_) | EType::Map(_) => not_an_attribute_shape(attribute),
    };
    Ok(output)
}

#[cold]
fn not_an_attribute_shape(attribute: &Attribute) -> ! {
    schema_violation(format_args!(
        "attribute '{}' dispatched with tag {}",
        attribute.name(),
        attribute.ty()
    ))
}
