// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value tree.

use crate::scalar::{Binary, Null, Timestamp};
use std::collections::BTreeMap;

/// A dynamic value that can hold any reflected field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Scalars
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(Timestamp),
    Binary(Binary),

    // Composites
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Nested object, members in property order.
    Object(Vec<Member>),
}

/// One property of an object value, with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Property tag.
    pub name: String,
    /// Property value.
    pub value: Value,
    /// Attribute values in declaration order.
    pub attributes: Vec<(String, Value)>,
}

impl Member {
    /// Create a member without attributes.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            attributes: Vec::new(),
        }
    }

    /// Attach an attribute value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.push((name.into(), value));
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl Value {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::Binary(_) => "binary",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Member]> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Find an object member by property tag.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.as_object()?.iter().find(|m| m.name == name)
    }
}

// Conversion traits
impl From<Null> for Value {
    fn from(_: Null) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Binary> for Value {
    fn from(v: Binary) -> Self {
        Self::Binary(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_lookup() {
        let obj = Value::Object(vec![
            Member::new("x", Value::Integer(5)).with_attribute("unit", "px".into()),
            Member::new("y", Value::Null),
        ]);
        let x = obj.member("x").expect("member x");
        assert_eq!(x.value.as_i64(), Some(5));
        assert_eq!(x.attribute("unit").and_then(Value::as_str), Some("px"));
        assert!(x.attribute("missing").is_none());
        assert!(obj.member("z").is_none());
        assert_eq!(obj.kind_name(), "object");
    }
}
