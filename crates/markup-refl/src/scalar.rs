// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native field types and static tag deduction.
//!
//! The set is closed: [`Scalar`] and [`Field`] are sealed, so every type a
//! visitor can be handed is known here. Nested objects are not `Field`s; they
//! are registered through dedicated [`Registrar`](crate::Registrar) methods.

use crate::etype::{EType, ScalarKind};
use crate::value::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

mod sealed {
    pub trait Sealed {}
}

/// Unit value of a `null` field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Null;

/// Point in time; defaults to the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub SystemTime);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(UNIX_EPOCH);

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(SystemTime::now())
    }

    /// Timestamp `secs` seconds after the epoch.
    pub fn from_secs(secs: u64) -> Self {
        Self(UNIX_EPOCH + Duration::from_secs(secs))
    }

    pub fn as_system_time(&self) -> SystemTime {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        Self(t)
    }
}

/// Opaque byte chunk.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Binary {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for Binary {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

/// Any type that can be stored in a reflected field.
pub trait Field: sealed::Sealed + Any + Clone + Send + Sync + fmt::Debug {
    /// Tag deduced from the native type.
    const TYPE: EType;
}

/// Leaf value type: every scalar kind except `object`.
///
/// Attributes are restricted to this trait.
pub trait Scalar: Field + PartialEq + Default {
    const KIND: ScalarKind;

    /// Copy into a dynamic value.
    fn to_value(&self) -> Value;

    /// Extract from a dynamic value of the same kind; no widening.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Field for $ty {
            const TYPE: EType = EType::Scalar(ScalarKind::$kind);
        }

        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_scalar!(bool, Boolean, Boolean);
impl_scalar!(i64, Integer, Integer);
impl_scalar!(f64, Float, Float);
impl_scalar!(String, String, String);
impl_scalar!(Timestamp, Timestamp, Timestamp);
impl_scalar!(Binary, Binary, Binary);

impl sealed::Sealed for Null {}

impl Field for Null {
    const TYPE: EType = EType::Scalar(ScalarKind::Null);
}

impl Scalar for Null {
    const KIND: ScalarKind = ScalarKind::Null;

    fn to_value(&self) -> Value {
        Value::Null
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.is_null().then_some(Null)
    }
}

impl<T: Scalar> sealed::Sealed for Vec<T> {}

impl<T: Scalar> Field for Vec<T> {
    const TYPE: EType = EType::Array(T::KIND);
}

impl<T: Scalar> sealed::Sealed for HashMap<String, T> {}

impl<T: Scalar> Field for HashMap<String, T> {
    const TYPE: EType = EType::Map(T::KIND);
}

/// Build a text-keyed map default for a `map<..>` property.
///
/// Keys are converted with `String::from`; values keep their literal type and
/// are deduced to the field type on registration.
///
/// ```rust
/// use std::collections::HashMap;
///
/// let limits: HashMap<String, i64> = markup_refl::refl_map! { "min" => 1, "max" => 10 };
/// assert_eq!(limits["max"], 10);
/// ```
#[macro_export]
macro_rules! refl_map {
    () => {
        ::std::collections::HashMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = ::std::collections::HashMap::new();
        $( map.insert(::std::string::String::from($key), $value); )+
        map
    }};
}
