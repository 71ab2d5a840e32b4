// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration API used by [`Reflect::describe`].
//!
//! Each declared field is registered once, with an accessor pair and its
//! default. Elements and attributes of the same tag may be registered in any
//! order; the first call creates the property shell.
//!
//! ```rust
//! use markup_refl::{Object, Reflect, Registrar};
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
//! let foo = Foo::get_default();
//! assert_eq!(foo.x, 5);
//! assert_eq!(foo.properties().len(), 2);
//! ```

use crate::container::{StaticObjectMap, StaticObjectVec};
use crate::error::schema_violation;
use crate::etype::{EType, ScalarKind};
use crate::memory::{FieldAccessor, MemoryDescriptor, ObjectAccessor};
use crate::object::Reflect;
use crate::property::{Attribute, ObjectContainer, PropertyFlags};
use crate::scalar::{Field, Scalar};
use crate::traits::ObjectTraits;
use std::any::type_name;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Collects the property table of `O` while its `describe` runs.
pub struct Registrar<O> {
    traits: ObjectTraits,
    _owner: PhantomData<fn() -> O>,
}

impl<O: Reflect> Registrar<O> {
    pub(crate) fn new() -> Self {
        Self {
            traits: ObjectTraits::new(type_name::<O>()),
            _owner: PhantomData,
        }
    }

    /// Register a scalar, `array<..>` or `map<..>` element.
    ///
    /// The tag is deduced from `V`; `default` may be any value convertible to
    /// `V` (`5` for `i64`, `"text"` for `String`).
    pub fn element<V: Field>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &V,
        get_mut: fn(&mut O) -> &mut V,
        default: impl Into<V>,
    ) -> &mut Self {
        self.element_with_flags(tag, get, get_mut, default, PropertyFlags::empty())
    }

    pub fn element_with_flags<V: Field>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &V,
        get_mut: fn(&mut O) -> &mut V,
        default: impl Into<V>,
        flags: PropertyFlags,
    ) -> &mut Self {
        let accessor = FieldAccessor::new(get, get_mut, default.into());
        let memory = MemoryDescriptor::field(V::TYPE, accessor);
        self.install(tag, memory, flags, None)
    }

    /// Register an embedded nested object.
    pub fn object<T: Reflect>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &T,
        get_mut: fn(&mut O) -> &mut T,
        default: T,
    ) -> &mut Self {
        self.object_with_flags(tag, get, get_mut, default, PropertyFlags::empty())
    }

    pub fn object_with_flags<T: Reflect>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &T,
        get_mut: fn(&mut O) -> &mut T,
        default: T,
        flags: PropertyFlags,
    ) -> &mut Self {
        let memory = MemoryDescriptor::embedded(ObjectAccessor::new(get, get_mut, default));
        self.install(tag, memory, flags, None)
    }

    /// Register an `array<object>` element; installs its sequence adapter.
    pub fn object_array<T: Reflect>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &Vec<T>,
        get_mut: fn(&mut O) -> &mut Vec<T>,
        default: Vec<T>,
    ) -> &mut Self {
        self.object_array_with_flags(tag, get, get_mut, default, PropertyFlags::empty())
    }

    pub fn object_array_with_flags<T: Reflect>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &Vec<T>,
        get_mut: fn(&mut O) -> &mut Vec<T>,
        default: Vec<T>,
        flags: PropertyFlags,
    ) -> &mut Self {
        let accessor = FieldAccessor::new(get, get_mut, default);
        let memory = MemoryDescriptor::field(EType::Array(ScalarKind::Object), accessor);
        let iface = ObjectContainer::Vec(Box::new(StaticObjectVec::<T>::new()));
        self.install(tag, memory, flags, Some(iface))
    }

    /// Register a `map<object>` element; installs its keyed adapter.
    pub fn object_map<T: Reflect>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &HashMap<String, T>,
        get_mut: fn(&mut O) -> &mut HashMap<String, T>,
        default: HashMap<String, T>,
    ) -> &mut Self {
        self.object_map_with_flags(tag, get, get_mut, default, PropertyFlags::empty())
    }

    pub fn object_map_with_flags<T: Reflect>(
        &mut self,
        tag: &str,
        get: fn(&O) -> &HashMap<String, T>,
        get_mut: fn(&mut O) -> &mut HashMap<String, T>,
        default: HashMap<String, T>,
        flags: PropertyFlags,
    ) -> &mut Self {
        let accessor = FieldAccessor::new(get, get_mut, default);
        let memory = MemoryDescriptor::field(EType::Map(ScalarKind::Object), accessor);
        let iface = ObjectContainer::Map(Box::new(StaticObjectMap::<T>::new()));
        self.install(tag, memory, flags, Some(iface))
    }

    /// Register attribute `name` on the element tagged `owner_tag`.
    pub fn attribute<A: Scalar>(
        &mut self,
        owner_tag: &str,
        name: &str,
        get: fn(&O) -> &A,
        get_mut: fn(&mut O) -> &mut A,
        default: impl Into<A>,
    ) -> &mut Self {
        if A::TYPE.is_container() || A::TYPE.is_object() {
            schema_violation(format_args!(
                "attribute '{}' of '{}' cannot be {}",
                name,
                owner_tag,
                A::TYPE
            ));
        }
        let accessor = FieldAccessor::new(get, get_mut, default.into());
        let memory = MemoryDescriptor::field(A::TYPE, accessor);
        self.traits
            .find_or_add_property(owner_tag)
            .add_attribute(Attribute::new(name, memory));
        log::trace!(
            "[Registrar] {}: attribute '{}@{}' ({})",
            type_name::<O>(),
            owner_tag,
            name,
            A::TYPE
        );
        self
    }

    fn install(
        &mut self,
        tag: &str,
        memory: MemoryDescriptor,
        flags: PropertyFlags,
        container: Option<ObjectContainer>,
    ) -> &mut Self {
        let ty = memory.ty();
        self.traits
            .find_or_add_property(tag)
            .set_element(memory, flags, container);
        log::trace!(
            "[Registrar] {}: element '{}' ({})",
            type_name::<O>(),
            tag,
            ty
        );
        self
    }

    /// Validate and publish the collected table.
    pub(crate) fn finish(self) -> ObjectTraits {
        let incomplete = self.traits.incomplete_properties();
        if !incomplete.is_empty() {
            schema_violation(format_args!(
                "{} declares attributes on unregistered elements: {}",
                type_name::<O>(),
                incomplete.join(", ")
            ));
        }
        self.traits
    }
}
