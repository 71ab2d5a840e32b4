// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic dump and load between objects and [`Value`] trees.
//!
//! Both directions are ordinary visitors: nothing here knows a concrete type.
//! Members come out in property order and carry their attributes, which is
//! the shape a markup writer needs.
//!
//! Loading is lenient about what it does not know (unknown members and
//! attributes are skipped) and strict about what it does: a value whose kind
//! differs from the field tag fails with [`ReflectError::ValueMismatch`].

use crate::error::{ReflectError, Result};
use crate::etype::{EType, ScalarKind};
use crate::object::Object;
use crate::property::{Attribute, Property, PropertyFlags};
use crate::proxy::{
    ArrayProxy, MapProxy, ObjectArrayProxy, ObjectMapProxy, ObjectProxy, ScalarProxy,
};
use crate::scalar::Scalar;
use crate::value::{Member, Value};
use crate::visit::{self, Visitor, VisitorMut};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};

/// Snapshot every non-transient property of `object`.
pub fn dump(object: &dyn Object) -> Result<Value> {
    let properties = object.properties();
    let mut members = Vec::with_capacity(properties.len());
    for property in properties {
        if property.flags().contains(PropertyFlags::TRANSIENT) {
            continue;
        }
        let mut member = Member::new(property.tag(), property_value(object, property)?);
        for attribute in property.attributes() {
            member = member.with_attribute(attribute.name(), attribute_value(object, attribute)?);
        }
        members.push(member);
    }
    Ok(Value::Object(members))
}

/// Overwrite the properties of `object` named in `value`.
///
/// `value` must be an object tree. Transient and read-only properties are
/// left untouched.
pub fn load(object: &mut dyn Object, value: &Value) -> Result<()> {
    let members = value
        .as_object()
        .ok_or_else(|| mismatch(EType::Scalar(ScalarKind::Object), value))?;
    let skip = PropertyFlags::TRANSIENT | PropertyFlags::READ_ONLY;

    for property in object.properties() {
        if property.flags().intersects(skip) {
            continue;
        }
        let Some(member) = members.iter().find(|m| m.name == property.tag()) else {
            continue;
        };
        set_property_value(&mut *object, property, &member.value)?;
        for attribute in property.attributes() {
            if let Some(value) = member.attribute(attribute.name()) {
                set_attribute_value(&mut *object, attribute, value)?;
            }
        }
    }
    log::trace!(
        "[tree] loaded {} ({} members)",
        object.type_name(),
        members.len()
    );
    Ok(())
}

pub(crate) fn property_value(object: &dyn Object, property: &Property) -> Result<Value> {
    visit::visit(object, property, Dump)?
}

pub(crate) fn attribute_value(object: &dyn Object, attribute: &Attribute) -> Result<Value> {
    visit::visit_attribute(object, attribute, Dump)?
}

pub(crate) fn set_property_value(
    object: &mut dyn Object,
    property: &Property,
    value: &Value,
) -> Result<()> {
    visit::visit_mut(object, property, Load { value })?
}

pub(crate) fn set_attribute_value(
    object: &mut dyn Object,
    attribute: &Attribute,
    value: &Value,
) -> Result<()> {
    visit::visit_attribute_mut(object, attribute, Load { value })?
}

fn mismatch(expected: EType, found: &Value) -> ReflectError {
    ReflectError::ValueMismatch {
        expected,
        found: found.kind_name().to_string(),
    }
}

fn scalar_from<T: Scalar>(value: &Value, expected: EType) -> Result<T> {
    T::from_value(value).ok_or_else(|| mismatch(expected, value))
}

struct Dump;

impl<'a> Visitor<'a> for Dump {
    type Output = Result<Value>;

    fn visit_scalar<T: Scalar>(self, proxy: ScalarProxy<&'a T>) -> Result<Value> {
        Ok(proxy.get().to_value())
    }

    fn visit_object(self, proxy: ObjectProxy<&'a dyn Object>) -> Result<Value> {
        dump(proxy.get())
    }

    fn visit_array<T: Scalar>(self, proxy: ArrayProxy<&'a Vec<T>>) -> Result<Value> {
        Ok(Value::Array(proxy.iter().map(Scalar::to_value).collect()))
    }

    fn visit_map<T: Scalar>(self, proxy: MapProxy<&'a HashMap<String, T>>) -> Result<Value> {
        let entries: BTreeMap<String, Value> = proxy
            .iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect();
        Ok(Value::Map(entries))
    }

    fn visit_object_array(self, proxy: ObjectArrayProxy<'a, &'a dyn Any>) -> Result<Value> {
        let items = proxy.iter().map(dump).collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(items))
    }

    fn visit_object_map(self, proxy: ObjectMapProxy<'a, &'a dyn Any>) -> Result<Value> {
        let mut entries = BTreeMap::new();
        let mut failure = None;
        proxy.for_each(|key, object| {
            if failure.is_some() {
                return;
            }
            match dump(object) {
                Ok(value) => {
                    entries.insert(key.to_string(), value);
                }
                Err(err) => failure = Some(err),
            }
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(Value::Map(entries)),
        }
    }
}

struct Load<'v> {
    value: &'v Value,
}

impl<'a, 'v> VisitorMut<'a> for Load<'v> {
    type Output = Result<()>;

    fn visit_scalar<T: Scalar>(self, mut proxy: ScalarProxy<&'a mut T>) -> Result<()> {
        let value = scalar_from::<T>(self.value, proxy.ty())?;
        proxy.set(value);
        Ok(())
    }

    fn visit_object(self, mut proxy: ObjectProxy<&'a mut dyn Object>) -> Result<()> {
        load(proxy.get_mut(), self.value)
    }

    fn visit_array<T: Scalar>(self, mut proxy: ArrayProxy<&'a mut Vec<T>>) -> Result<()> {
        let ty = proxy.ty();
        let items = self.value.as_array().ok_or_else(|| mismatch(ty, self.value))?;
        // Convert first so a bad element leaves the field untouched.
        let items = items
            .iter()
            .map(|item| scalar_from::<T>(item, ty))
            .collect::<Result<Vec<_>>>()?;
        proxy.clear();
        proxy.reserve(items.len());
        for item in items {
            proxy.push(item);
        }
        Ok(())
    }

    fn visit_map<T: Scalar>(self, mut proxy: MapProxy<&'a mut HashMap<String, T>>) -> Result<()> {
        let ty = proxy.ty();
        let entries = self.value.as_map().ok_or_else(|| mismatch(ty, self.value))?;
        let entries = entries
            .iter()
            .map(|(key, item)| scalar_from::<T>(item, ty).map(|item| (key.as_str(), item)))
            .collect::<Result<Vec<_>>>()?;
        proxy.clear();
        for (key, item) in entries {
            proxy.set(key, item);
        }
        Ok(())
    }

    fn visit_object_array(self, mut proxy: ObjectArrayProxy<'a, &'a mut dyn Any>) -> Result<()> {
        let items = self
            .value
            .as_array()
            .ok_or_else(|| mismatch(proxy.ty(), self.value))?;
        // Stage the new elements so a bad one leaves the field untouched.
        proxy.rebuild(|staged| {
            staged.reserve(items.len());
            for item in items {
                load(staged.push_back(), item)?;
            }
            Ok(())
        })
    }

    fn visit_object_map(self, mut proxy: ObjectMapProxy<'a, &'a mut dyn Any>) -> Result<()> {
        let entries = self
            .value
            .as_map()
            .ok_or_else(|| mismatch(proxy.ty(), self.value))?;
        proxy.rebuild(|staged| {
            for (key, item) in entries {
                load(staged.insert(key), item)?;
            }
            Ok(())
        })
    }
}
