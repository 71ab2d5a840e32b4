// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Memory descriptors: how a field is reached and what it resets to.
//!
//! A descriptor does not hold a byte offset. It holds an accessor pair
//! (`fn(&O) -> &V`, `fn(&mut O) -> &mut V`) erased behind [`Accessor`], so a
//! field is located through the owner's real type and never through an
//! assumed layout.

use crate::etype::{EType, ScalarKind};
use crate::object::{Object, Reflect};
use std::any::{type_name, Any};
use std::fmt;
use std::mem::size_of;

/// Type-erased field accessor bound to one owner type.
///
/// Every method returns `None` when `base` is not the owner type.
pub(crate) trait Accessor: Send + Sync {
    fn get<'a>(&self, base: &'a dyn Any) -> Option<&'a dyn Any>;

    fn get_mut<'a>(&self, base: &'a mut dyn Any) -> Option<&'a mut dyn Any>;

    /// Object view of the field; only embedded-object fields have one.
    fn object<'a>(&self, _base: &'a dyn Any) -> Option<&'a dyn Object> {
        None
    }

    fn object_mut<'a>(&self, _base: &'a mut dyn Any) -> Option<&'a mut dyn Object> {
        None
    }

    /// Overwrite the field with a clone of the declared default.
    fn init(&self, base: &mut dyn Any);
}

/// Accessor for a plain field of type `V` inside `O`.
pub(crate) struct FieldAccessor<O, V> {
    get: fn(&O) -> &V,
    get_mut: fn(&mut O) -> &mut V,
    default: V,
}

impl<O, V> FieldAccessor<O, V> {
    pub(crate) fn new(get: fn(&O) -> &V, get_mut: fn(&mut O) -> &mut V, default: V) -> Self {
        Self {
            get,
            get_mut,
            default,
        }
    }
}

impl<O, V> Accessor for FieldAccessor<O, V>
where
    O: Any,
    V: Any + Clone + Send + Sync,
{
    fn get<'a>(&self, base: &'a dyn Any) -> Option<&'a dyn Any> {
        let owner = base.downcast_ref::<O>()?;
        Some((self.get)(owner))
    }

    fn get_mut<'a>(&self, base: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let owner = base.downcast_mut::<O>()?;
        Some((self.get_mut)(owner))
    }

    fn init(&self, base: &mut dyn Any) {
        if let Some(owner) = base.downcast_mut::<O>() {
            *(self.get_mut)(owner) = self.default.clone();
        }
    }
}

/// Accessor for an embedded nested object.
pub(crate) struct ObjectAccessor<O, T> {
    inner: FieldAccessor<O, T>,
}

impl<O, T> ObjectAccessor<O, T> {
    pub(crate) fn new(get: fn(&O) -> &T, get_mut: fn(&mut O) -> &mut T, default: T) -> Self {
        Self {
            inner: FieldAccessor::new(get, get_mut, default),
        }
    }
}

impl<O: Any, T: Reflect> Accessor for ObjectAccessor<O, T> {
    fn get<'a>(&self, base: &'a dyn Any) -> Option<&'a dyn Any> {
        self.inner.get(base)
    }

    fn get_mut<'a>(&self, base: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.inner.get_mut(base)
    }

    fn object<'a>(&self, base: &'a dyn Any) -> Option<&'a dyn Object> {
        let owner = base.downcast_ref::<O>()?;
        Some((self.inner.get)(owner))
    }

    fn object_mut<'a>(&self, base: &'a mut dyn Any) -> Option<&'a mut dyn Object> {
        let owner = base.downcast_mut::<O>()?;
        Some((self.inner.get_mut)(owner))
    }

    fn init(&self, base: &mut dyn Any) {
        self.inner.init(base);
    }
}

/// Where a field lives, what it holds, and what it resets to.
pub struct MemoryDescriptor {
    ty: EType,
    size: usize,
    owner: &'static str,
    accessor: Box<dyn Accessor>,
}

impl MemoryDescriptor {
    pub(crate) fn field<O: Any, V: Any + Clone + Send + Sync>(
        ty: EType,
        accessor: FieldAccessor<O, V>,
    ) -> Self {
        Self {
            ty,
            size: size_of::<V>(),
            owner: type_name::<O>(),
            accessor: Box::new(accessor),
        }
    }

    pub(crate) fn embedded<O: Any, T: Reflect>(accessor: ObjectAccessor<O, T>) -> Self {
        Self {
            ty: EType::Scalar(ScalarKind::Object),
            size: size_of::<T>(),
            owner: type_name::<O>(),
            accessor: Box::new(accessor),
        }
    }

    /// Stored type tag.
    pub fn ty(&self) -> EType {
        self.ty
    }

    /// Size in bytes of the native field type.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Name of the type the field is declared on.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub(crate) fn get<'a>(&self, base: &'a dyn Any) -> Option<&'a dyn Any> {
        self.accessor.get(base)
    }

    pub(crate) fn get_mut<'a>(&self, base: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.accessor.get_mut(base)
    }

    pub(crate) fn object<'a>(&self, base: &'a dyn Any) -> Option<&'a dyn Object> {
        self.accessor.object(base)
    }

    pub(crate) fn object_mut<'a>(&self, base: &'a mut dyn Any) -> Option<&'a mut dyn Object> {
        self.accessor.object_mut(base)
    }

    pub(crate) fn init(&self, base: &mut dyn Any) {
        self.accessor.init(base);
    }
}

impl fmt::Debug for MemoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDescriptor")
            .field("ty", &self.ty)
            .field("size", &self.size)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::Registrar;

    struct Owner {
        count: i64,
        label: String,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        level: i64,
    }

    impl Reflect for Inner {
        fn describe(r: &mut Registrar<Self>) {
            r.element("level", |i| &i.level, |i| &mut i.level, 3);
        }
    }

    struct Holder {
        inner: Inner,
    }

    #[test]
    fn test_field_accessor_reads_and_resets() {
        let desc = MemoryDescriptor::field(
            EType::Scalar(ScalarKind::Integer),
            FieldAccessor::new(|o: &Owner| &o.count, |o: &mut Owner| &mut o.count, 5i64),
        );
        assert_eq!(desc.size(), size_of::<i64>());
        assert!(desc.owner().ends_with("Owner"));

        let mut owner = Owner {
            count: 99,
            label: "keep".into(),
        };
        let read = desc.get(&owner).and_then(|v| v.downcast_ref::<i64>());
        assert_eq!(read, Some(&99));

        desc.init(&mut owner);
        assert_eq!(owner.count, 5);
        assert_eq!(owner.label, "keep");

        // idempotent
        desc.init(&mut owner);
        assert_eq!(owner.count, 5);
    }

    #[test]
    fn test_foreign_owner_is_rejected() {
        let desc = MemoryDescriptor::field(
            EType::Scalar(ScalarKind::String),
            FieldAccessor::new(
                |o: &Owner| &o.label,
                |o: &mut Owner| &mut o.label,
                String::new(),
            ),
        );
        let mut other = 42u32;
        assert!(desc.get(&other).is_none());
        assert!(desc.get_mut(&mut other).is_none());
        assert!(desc.object(&other).is_none());
        desc.init(&mut other);
        assert_eq!(other, 42);
    }

    #[test]
    fn test_embedded_object_view_and_reset() {
        let desc = MemoryDescriptor::embedded(ObjectAccessor::new(
            |h: &Holder| &h.inner,
            |h: &mut Holder| &mut h.inner,
            Inner { level: 3 },
        ));
        assert_eq!(desc.ty(), EType::Scalar(ScalarKind::Object));
        assert_eq!(desc.size(), size_of::<Inner>());

        let mut holder = Holder {
            inner: Inner { level: 8 },
        };
        let view = desc.object(&holder).expect("object view");
        assert!(view.type_name().ends_with("Inner"));
        assert_eq!(
            desc.get(&holder).and_then(|v| v.downcast_ref::<Inner>()),
            Some(&Inner { level: 8 })
        );

        desc.object_mut(&mut holder)
            .expect("object view")
            .reset();
        assert_eq!(holder.inner.level, 3);

        holder.inner.level = 11;
        desc.init(&mut holder);
        assert_eq!(holder.inner, Inner { level: 3 });
    }
}
