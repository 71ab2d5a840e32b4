// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-checked views over reflected fields.
//!
//! Every proxy is generic over the reference it wraps: `&T` gives a read-only
//! view, `&mut T` a mutable one. Construction checks the requested type
//! against the stored tag before anything is touched.
//!
//! | Stored tag        | Proxy                                     |
//! |-------------------|-------------------------------------------|
//! | scalar            | [`ScalarProxy<&T>`](ScalarProxy)          |
//! | `object`          | [`ObjectProxy<&dyn Object>`](ObjectProxy) |
//! | `array<scalar>`   | [`ArrayProxy<&Vec<T>>`](ArrayProxy)       |
//! | `map<scalar>`     | [`MapProxy<&HashMap<String, T>>`](MapProxy) |
//! | `array<object>`   | [`ObjectArrayProxy`]                      |
//! | `map<object>`     | [`ObjectMapProxy`]                        |

mod array;
mod map;
mod object;
mod scalar;

pub use array::ArrayProxy;
pub use map::MapProxy;
pub use object::{ObjectArrayProxy, ObjectIter, ObjectMapProxy, ObjectProxy};
pub use scalar::ScalarProxy;

use crate::error::{schema_violation, ReflectError, Result};
use crate::etype::EType;
use crate::property::FieldInfo;
use std::any::{type_name, Any};

/// Fail unless `requested` is exactly the stored tag.
pub(crate) fn verify(field: &dyn FieldInfo, requested: EType) -> Result<()> {
    let stored = field.ty();
    if stored != requested {
        return Err(ReflectError::TypeMismatch {
            expected: stored,
            actual: requested,
        });
    }
    Ok(())
}

/// Resolve a field against an instance base.
pub(crate) fn locate<'a>(field: &dyn FieldInfo, base: &'a dyn Any) -> Result<&'a dyn Any> {
    field.memory().get(base).ok_or_else(|| foreign(field))
}

pub(crate) fn locate_mut<'a>(
    field: &dyn FieldInfo,
    base: &'a mut dyn Any,
) -> Result<&'a mut dyn Any> {
    field.memory().get_mut(base).ok_or_else(|| foreign(field))
}

fn foreign(field: &dyn FieldInfo) -> ReflectError {
    ReflectError::ForeignProperty {
        property: field.name().to_string(),
        owner: field.memory().owner(),
    }
}

/// Typed view of a located field whose tag already matched.
fn downcast<'a, V: Any>(field: &dyn FieldInfo, storage: &'a dyn Any) -> &'a V {
    match storage.downcast_ref::<V>() {
        Some(value) => value,
        None => storage_mismatch::<V>(field),
    }
}

fn downcast_mut<'a, V: Any>(field: &dyn FieldInfo, storage: &'a mut dyn Any) -> &'a mut V {
    match storage.downcast_mut::<V>() {
        Some(value) => value,
        None => storage_mismatch::<V>(field),
    }
}

#[cold]
fn storage_mismatch<V>(field: &dyn FieldInfo) -> ! {
    schema_violation(format_args!(
        "field '{}' is tagged {} but its storage is not {}",
        field.name(),
        field.ty(),
        type_name::<V>()
    ))
}
