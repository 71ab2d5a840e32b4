// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Properties and their attributes.

use crate::container::{ObjectMapInterface, ObjectVecInterface};
use crate::error::schema_violation;
use crate::etype::EType;
use crate::memory::MemoryDescriptor;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Declaration flags of a property.
    ///
    /// The reflection core only stores them; consumers decide what they mean
    /// for their format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropertyFlags: u32 {
        /// May be omitted by a writer when it holds its default.
        const OPTIONAL = 1 << 0;
        /// Never dumped nor loaded by the value tree.
        const TRANSIENT = 1 << 1;
        /// Loaders leave it untouched.
        const READ_ONLY = 1 << 2;
    }
}

/// Anything that names a field and describes its memory.
///
/// Implemented by [`Property`] and [`Attribute`] so scalar proxies and
/// dispatch can serve both.
pub trait FieldInfo {
    /// Tag of a property, or name of an attribute.
    fn name(&self) -> &str;

    fn memory(&self) -> &MemoryDescriptor;

    fn ty(&self) -> EType {
        self.memory().ty()
    }
}

/// Named scalar sub-field attached to a property.
#[derive(Debug)]
pub struct Attribute {
    name: String,
    memory: MemoryDescriptor,
}

impl Attribute {
    pub(crate) fn new(name: impl Into<String>, memory: MemoryDescriptor) -> Self {
        Self {
            name: name.into(),
            memory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn memory(&self) -> &MemoryDescriptor {
        &self.memory
    }
}

impl FieldInfo for Attribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn memory(&self) -> &MemoryDescriptor {
        &self.memory
    }
}

/// Container adapter installed on an object-container property.
pub(crate) enum ObjectContainer {
    Vec(Box<dyn ObjectVecInterface>),
    Map(Box<dyn ObjectMapInterface>),
}

/// Named top-level field of a reflected type.
pub struct Property {
    tag: String,
    flags: PropertyFlags,
    memory: Option<MemoryDescriptor>,
    attributes: Vec<Attribute>,
    container: Option<ObjectContainer>,
}

impl Property {
    /// Empty shell; the element registration fills in the memory later.
    pub(crate) fn shell(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            flags: PropertyFlags::empty(),
            memory: None,
            attributes: Vec::new(),
            container: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Stored type tag.
    pub fn ty(&self) -> EType {
        self.memory().ty()
    }

    pub fn memory(&self) -> &MemoryDescriptor {
        match &self.memory {
            Some(memory) => memory,
            None => schema_violation(format_args!(
                "property '{}' has attributes but no element",
                self.tag
            )),
        }
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Sequence adapter, present on `array<object>` properties only.
    pub fn object_vec(&self) -> Option<&dyn ObjectVecInterface> {
        match &self.container {
            Some(ObjectContainer::Vec(iface)) => Some(iface.as_ref()),
            _ => None,
        }
    }

    /// Keyed adapter, present on `map<object>` properties only.
    pub fn object_map(&self) -> Option<&dyn ObjectMapInterface> {
        match &self.container {
            Some(ObjectContainer::Map(iface)) => Some(iface.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn has_memory(&self) -> bool {
        self.memory.is_some()
    }

    pub(crate) fn set_element(
        &mut self,
        memory: MemoryDescriptor,
        flags: PropertyFlags,
        container: Option<ObjectContainer>,
    ) {
        if self.memory.is_some() {
            schema_violation(format_args!(
                "element '{}' registered twice on {}",
                self.tag,
                memory.owner()
            ));
        }
        self.memory = Some(memory);
        self.flags = flags;
        self.container = container;
    }

    pub(crate) fn add_attribute(&mut self, attribute: Attribute) {
        if self.find_attribute(&attribute.name).is_some() {
            schema_violation(format_args!(
                "attribute '{}' registered twice on element '{}'",
                attribute.name, self.tag
            ));
        }
        self.attributes.push(attribute);
    }
}

impl FieldInfo for Property {
    fn name(&self) -> &str {
        &self.tag
    }

    fn memory(&self) -> &MemoryDescriptor {
        Property::memory(self)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("tag", &self.tag)
            .field("flags", &self.flags)
            .field("memory", &self.memory)
            .field("attributes", &self.attributes)
            .field("container", &self.container.is_some())
            .finish()
    }
}
