// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `serde` support (feature `serde`).
//!
//! Objects serialize as maps in property order. A member that carries
//! attributes becomes a nested map: one `@name` entry per attribute and the
//! member value under `#value`.

use crate::object::Object;
use crate::tree;
use crate::value::{Member, Value};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

/// Key holding the member value when attributes are present.
pub const VALUE_KEY: &str = "#value";

/// Prefix of attribute keys.
pub const ATTRIBUTE_PREFIX: char = '@';

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(v) => serializer.serialize_bool(*v),
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Timestamp(v) => v.0.serialize(serializer),
            Self::Binary(v) => serializer.serialize_bytes(v.as_bytes()),
            Self::Array(items) => serializer.collect_seq(items),
            Self::Map(entries) => serializer.collect_map(entries),
            Self::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for member in members {
                    map.serialize_entry(&member.name, &MemberBody(member))?;
                }
                map.end()
            }
        }
    }
}

struct MemberBody<'a>(&'a Member);

impl Serialize for MemberBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let member = self.0;
        if member.attributes.is_empty() {
            return member.value.serialize(serializer);
        }
        let mut map = serializer.serialize_map(Some(member.attributes.len() + 1))?;
        for (name, value) in &member.attributes {
            map.serialize_entry(&format!("{}{}", ATTRIBUTE_PREFIX, name), value)?;
        }
        map.serialize_entry(VALUE_KEY, &member.value)?;
        map.end()
    }
}

/// Serialize any object through its reflected properties.
///
/// ```rust
/// use markup_refl::{Reflect, Registrar, Serialized};
///
/// #[derive(Default, Clone)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Reflect for Point {
///     fn describe(r: &mut Registrar<Self>) {
///         r.element("x", |p| &p.x, |p| &mut p.x, 1)
///             .element("y", |p| &p.y, |p| &mut p.y, 2);
///     }
/// }
///
/// let json = serde_json::to_string(&Serialized(&Point::get_default())).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":2}"#);
/// ```
pub struct Serialized<'a>(pub &'a dyn Object);

impl Serialize for Serialized<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        tree::dump(self.0)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
