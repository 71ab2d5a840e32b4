// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The object interface and the declaration trait behind it.
//!
//! A type author implements [`Reflect`] once; [`Object`] follows from a
//! blanket impl. Consumers work on `&dyn Object` and reach fields through
//! [`ObjectExt`].

use crate::error::{ReflectError, Result};
use crate::property::{Attribute, FieldInfo, Property};
use crate::proxy::{
    ArrayProxy, MapProxy, ObjectArrayProxy, ObjectMapProxy, ObjectProxy, ScalarProxy,
};
use crate::registration::Registrar;
use crate::scalar::Scalar;
use crate::traits::ObjectTraits;
use crate::tree;
use crate::value::Value;
use crate::visit::{self, Visitor, VisitorMut};
use std::any::{type_name, Any};
use std::collections::HashMap;

/// Runtime-introspectable instance.
pub trait Object: Any + Send + Sync + 'static {
    /// Property table of the concrete type.
    fn traits(&self) -> &'static ObjectTraits;

    /// Field storage origin; property accessors are resolved against it.
    fn base(&self) -> &dyn Any;

    fn base_mut(&mut self) -> &mut dyn Any;

    fn as_object(&self) -> &dyn Object;

    fn as_object_mut(&mut self) -> &mut dyn Object;

    /// Rewrite every property and attribute with its declared default.
    ///
    /// Storage is reused; no property is added or removed.
    fn reset(&mut self) {
        let traits = self.traits();
        let base = self.base_mut();
        for property in traits.properties() {
            property.memory().init(base);
            for attribute in property.attributes() {
                attribute.memory().init(base);
            }
        }
    }

    /// Properties in registration order.
    fn properties(&self) -> &'static [Property] {
        self.traits().properties()
    }

    fn find_property(&self, tag: &str) -> Option<&'static Property> {
        self.traits().find_property(tag)
    }

    fn type_name(&self) -> &'static str {
        self.traits().type_name()
    }
}

/// Declares the reflected fields of a type.
pub trait Reflect: Default + Clone + Send + Sync + 'static {
    /// Register every reflected field. Runs once per process.
    fn describe(registrar: &mut Registrar<Self>);

    /// `Default::default()` with every reflected field set to its declared
    /// default.
    fn get_default() -> Self {
        let mut value = Self::default();
        value.reset();
        value
    }
}

impl<T: Reflect> Object for T {
    fn traits(&self) -> &'static ObjectTraits {
        ObjectTraits::of::<T>()
    }

    fn base(&self) -> &dyn Any {
        self
    }

    fn base_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_object(&self) -> &dyn Object {
        self
    }

    fn as_object_mut(&mut self) -> &mut dyn Object {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Field access and dispatch on any [`Object`], including `dyn Object`.
pub trait ObjectExt: Object {
    /// Property by tag; [`ReflectError::PropertyNotFound`] when absent.
    fn property(&self, tag: &str) -> Result<&'static Property> {
        self.find_property(tag)
            .ok_or_else(|| ReflectError::PropertyNotFound(tag.to_string()))
    }

    /// Erased field storage of a property or attribute.
    fn field(&self, field: &dyn FieldInfo) -> Result<&dyn Any> {
        crate::proxy::locate(field, self.base())
    }

    fn field_mut(&mut self, field: &dyn FieldInfo) -> Result<&mut dyn Any> {
        crate::proxy::locate_mut(field, self.base_mut())
    }

    fn scalar<T: Scalar>(&self, field: &dyn FieldInfo) -> Result<ScalarProxy<&T>> {
        ScalarProxy::new(field, self.base())
    }

    fn scalar_mut<T: Scalar>(&mut self, field: &dyn FieldInfo) -> Result<ScalarProxy<&mut T>> {
        ScalarProxy::new_mut(field, self.base_mut())
    }

    fn array<T: Scalar>(&self, property: &Property) -> Result<ArrayProxy<&Vec<T>>> {
        ArrayProxy::new(property, self.base())
    }

    fn array_mut<T: Scalar>(&mut self, property: &Property) -> Result<ArrayProxy<&mut Vec<T>>> {
        ArrayProxy::new_mut(property, self.base_mut())
    }

    fn map<T: Scalar>(&self, property: &Property) -> Result<MapProxy<&HashMap<String, T>>> {
        MapProxy::new(property, self.base())
    }

    fn map_mut<T: Scalar>(
        &mut self,
        property: &Property,
    ) -> Result<MapProxy<&mut HashMap<String, T>>> {
        MapProxy::new_mut(property, self.base_mut())
    }

    fn object(&self, property: &Property) -> Result<ObjectProxy<&dyn Object>> {
        ObjectProxy::new(property, self.base())
    }

    fn object_mut(&mut self, property: &Property) -> Result<ObjectProxy<&mut dyn Object>> {
        ObjectProxy::new_mut(property, self.base_mut())
    }

    fn object_array<'a>(
        &'a self,
        property: &'a Property,
    ) -> Result<ObjectArrayProxy<'a, &'a dyn Any>> {
        ObjectArrayProxy::new(property, self.base())
    }

    fn object_array_mut<'a>(
        &'a mut self,
        property: &'a Property,
    ) -> Result<ObjectArrayProxy<'a, &'a mut dyn Any>> {
        ObjectArrayProxy::new_mut(property, self.base_mut())
    }

    fn object_map<'a>(&'a self, property: &'a Property) -> Result<ObjectMapProxy<'a, &'a dyn Any>> {
        ObjectMapProxy::new(property, self.base())
    }

    fn object_map_mut<'a>(
        &'a mut self,
        property: &'a Property,
    ) -> Result<ObjectMapProxy<'a, &'a mut dyn Any>> {
        ObjectMapProxy::new_mut(property, self.base_mut())
    }

    /// Dispatch `visitor` on the proxy matching the property's stored tag.
    fn visit<'a, V: Visitor<'a>>(&'a self, property: &'a Property, visitor: V) -> Result<V::Output> {
        visit::visit(self.as_object(), property, visitor)
    }

    fn visit_mut<'a, V: VisitorMut<'a>>(
        &'a mut self,
        property: &'a Property,
        visitor: V,
    ) -> Result<V::Output> {
        visit::visit_mut(self.as_object_mut(), property, visitor)
    }

    fn visit_attribute<'a, V: Visitor<'a>>(
        &'a self,
        attribute: &'a Attribute,
        visitor: V,
    ) -> Result<V::Output> {
        visit::visit_attribute(self.as_object(), attribute, visitor)
    }

    fn visit_attribute_mut<'a, V: VisitorMut<'a>>(
        &'a mut self,
        attribute: &'a Attribute,
        visitor: V,
    ) -> Result<V::Output> {
        visit::visit_attribute_mut(self.as_object_mut(), attribute, visitor)
    }

    /// Snapshot of one property as a dynamic value.
    fn get_value(&self, property: &Property) -> Result<Value> {
        tree::property_value(self.as_object(), property)
    }

    /// Overwrite one property from a dynamic value.
    fn set_value(&mut self, property: &Property, value: &Value) -> Result<()> {
        tree::set_property_value(self.as_object_mut(), property, value)
    }

    fn get_attribute_value(&self, attribute: &Attribute) -> Result<Value> {
        tree::attribute_value(self.as_object(), attribute)
    }

    fn set_attribute_value(&mut self, attribute: &Attribute, value: &Value) -> Result<()> {
        tree::set_attribute_value(self.as_object_mut(), attribute, value)
    }
}

impl<O: Object + ?Sized> ObjectExt for O {}
