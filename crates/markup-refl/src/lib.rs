// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! markup-refl: runtime-introspectable objects declared once at compile time.
//!
//! A type lists its reflected fields ("properties") and their scalar
//! sub-fields ("attributes") in a [`Reflect::describe`] function. Generic
//! consumers such as serializers, editors and binders then enumerate, read,
//! write, reset and iterate those fields through `&dyn Object` without knowing
//! the concrete type.
//!
//! # Features
//!
//! - **EType**: closed tag set, 8 scalar kinds in plain, array or map shape
//! - **ObjectTraits**: per-type property table, built once per process
//! - **Proxies**: type-checked views, one per field representation
//! - **Visitor dispatch**: recovers static typing from a stored tag
//! - **Value trees**: generic [`dump`] / [`load`] built on dispatch
//!
//! # Example
//!
//! ```rust
//! use markup_refl::{Object, ObjectExt, Reflect, Registrar};
//!
//! #[derive(Debug, Default, Clone)]
//! struct Foo {
//!     x: i64,
//!     items: Vec<i64>,
//! }
//!
//! impl Reflect for Foo {
//!     fn describe(r: &mut Registrar<Self>) {
//!         r.element("x", |o| &o.x, |o| &mut o.x, 5)
//!             .element("items", |o| &o.items, |o| &mut o.items, Vec::<i64>::new());
//!     }
//! }
//!
//! let mut foo = Foo::get_default();
//! let items = foo.property("items").unwrap();
//! {
//!     let mut proxy = foo.array_mut::<i64>(items).unwrap();
//!     proxy.push(7);
//!     proxy.push(9);
//!     proxy.erase(0).unwrap();
//! }
//! assert_eq!(foo.items, vec![9]);
//!
//! foo.reset();
//! assert!(foo.items.is_empty());
//! assert_eq!(foo.x, 5);
//! ```
//!
//! # Errors
//!
//! Bad requests at runtime (wrong proxy type, index past the end, missing
//! key) return [`ReflectError`]. A broken declaration (duplicate tag,
//! attribute on a missing element) panics the first time the type's traits
//! are built.

mod container;
mod error;
mod etype;
mod memory;
mod object;
mod property;
mod proxy;
mod registration;
mod scalar;
#[cfg(feature = "serde")]
mod ser;
mod traits;
mod tree;
mod value;
mod visit;

pub use container::{ObjectMapInterface, ObjectVecInterface, StaticObjectMap, StaticObjectVec};
pub use error::{ReflectError, Result};
pub use etype::{EType, ScalarKind};
pub use memory::MemoryDescriptor;
pub use object::{Object, ObjectExt, Reflect};
pub use property::{Attribute, FieldInfo, Property, PropertyFlags};
pub use proxy::{
    ArrayProxy, MapProxy, ObjectArrayProxy, ObjectIter, ObjectMapProxy, ObjectProxy, ScalarProxy,
};
pub use registration::Registrar;
pub use scalar::{Binary, Field, Null, Scalar, Timestamp};
#[cfg(feature = "serde")]
pub use ser::{Serialized, ATTRIBUTE_PREFIX, VALUE_KEY};
pub use traits::{ObjectTraits, TraitsRegistry};
pub use tree::{dump, load};
pub use value::{Member, Value};
pub use visit::{visit, visit_attribute, visit_attribute_mut, visit_mut, Visitor, VisitorMut};
