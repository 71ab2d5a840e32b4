// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type tags for reflected fields.
//!
//! A tag is either a bare scalar kind or a scalar kind wrapped in exactly one
//! container modifier. Nested containers cannot be expressed.

use std::fmt;

/// Scalar kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Timestamp,
    Binary,
    /// Nested reflectable object.
    Object,
}

impl ScalarKind {
    /// All scalar kinds, in dispatch order.
    pub const ALL: [ScalarKind; 8] = [
        Self::Null,
        Self::Boolean,
        Self::Integer,
        Self::Float,
        Self::String,
        Self::Timestamp,
        Self::Binary,
        Self::Object,
    ];

    /// Lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::Binary => "binary",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field type tag.
///
/// Comparison is exact: `Scalar(Integer)` never equals `Scalar(Float)`, and
/// `Array(Integer)` never equals `Scalar(Integer)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EType {
    /// Single value.
    Scalar(ScalarKind),
    /// Ordered sequence of values.
    Array(ScalarKind),
    /// Text-keyed map of values.
    Map(ScalarKind),
}

impl EType {
    /// Every representable tag: 8 scalar, 8 array-of, 8 map-of.
    pub const ALL: [EType; 24] = {
        let mut all = [EType::Scalar(ScalarKind::Null); 24];
        let mut i = 0;
        while i < 8 {
            all[i] = EType::Scalar(ScalarKind::ALL[i]);
            all[i + 8] = EType::Array(ScalarKind::ALL[i]);
            all[i + 16] = EType::Map(ScalarKind::ALL[i]);
            i += 1;
        }
        all
    };

    /// Deduce the tag of a native field type.
    pub fn of<V: crate::scalar::Field>() -> Self {
        V::TYPE
    }

    /// Deduce the tag from a value.
    pub fn of_value<V: crate::scalar::Field>(_value: &V) -> Self {
        V::TYPE
    }

    /// Element ("leap") kind: the scalar kind with any container stripped.
    pub fn leap(self) -> ScalarKind {
        match self {
            Self::Scalar(k) | Self::Array(k) | Self::Map(k) => k,
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_map(self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn is_container(self) -> bool {
        !matches!(self, Self::Scalar(_))
    }

    /// True when the element kind is a nested object, in any shape.
    pub fn is_object(self) -> bool {
        self.leap() == ScalarKind::Object
    }
}

impl fmt::Display for EType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(k) => write!(f, "{}", k),
            Self::Array(k) => write!(f, "array<{}>", k),
            Self::Map(k) => write!(f, "map<{}>", k),
        }
    }
}

impl From<ScalarKind> for EType {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}
