// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors for reflection operations.
//!
//! Two families exist:
//!
//! - [`ReflectError`]: recoverable, caller-facing failures (a proxy requested
//!   with the wrong type, an index past the end, a required key missing).
//! - Schema violations: a broken declaration (duplicate tag, attribute-only
//!   property shell, container bound to the wrong element type). These are
//!   never returned; they go through [`schema_violation`] and panic.

use crate::etype::EType;
use std::fmt;

/// Errors returned by proxies, containers and the tree binder.
#[derive(Debug, Clone, PartialEq)]
pub enum ReflectError {
    // ========================================================================
    // Typing
    // ========================================================================
    /// A proxy was requested with a type other than the stored one.
    ///
    /// `expected` is the tag the field was declared with, `actual` is the
    /// tag the caller asked for.
    TypeMismatch { expected: EType, actual: EType },
    /// A dynamic value did not fit the field it was bound to.
    ValueMismatch { expected: EType, found: String },

    // ========================================================================
    // Lookup
    // ========================================================================
    /// No property with this tag exists on the object.
    PropertyNotFound(String),
    /// The property (or attribute) was registered for another type.
    ForeignProperty {
        property: String,
        owner: &'static str,
    },
    /// `at`-style access on a key that is not present.
    KeyNotFound(String),

    // ========================================================================
    // Containers
    // ========================================================================
    /// Index past the end of a sequence.
    IndexOutOfBounds { index: usize, length: usize },
    /// Half-open range that is reversed or exceeds the sequence.
    InvalidRange { from: usize, to: usize, length: usize },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            Self::ValueMismatch { expected, found } => {
                write!(f, "Value mismatch: expected {}, found {}", expected, found)
            }
            Self::PropertyNotFound(tag) => write!(f, "Property not found: {}", tag),
            Self::ForeignProperty { property, owner } => write!(
                f,
                "Property '{}' is declared on {}, not on this object",
                property, owner
            ),
            Self::KeyNotFound(key) => write!(f, "Key not found: {}", key),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index out of bounds: {} >= {}", index, length)
            }
            Self::InvalidRange { from, to, length } => write!(
                f,
                "Invalid range: {}..{} for length {}",
                from, to, length
            ),
        }
    }
}

impl std::error::Error for ReflectError {}

/// Result alias for reflection operations.
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Abort on a broken declaration.
///
/// Schema errors describe a static declaration that cannot work; they are not
/// bad runtime input, so they are logged and turned into a panic.
#[cold]
#[track_caller]
pub(crate) fn schema_violation(args: fmt::Arguments<'_>) -> ! {
    log::error!("[markup-refl] schema violation: {}", args);
    panic!("schema violation: {}", args)
}

/// Check a half-open range against a sequence length.
pub(crate) fn check_range(from: usize, to: usize, length: usize) -> Result<()> {
    if from > to || to > length {
        return Err(ReflectError::InvalidRange { from, to, length });
    }
    Ok(())
}

/// Check an index against a sequence length.
pub(crate) fn check_index(index: usize, length: usize) -> Result<()> {
    if index >= length {
        return Err(ReflectError::IndexOutOfBounds { index, length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etype::ScalarKind;

    #[test]
    fn test_type_mismatch_display() {
        let err = ReflectError::TypeMismatch {
            expected: EType::Scalar(ScalarKind::Integer),
            actual: EType::Array(ScalarKind::Float),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: expected integer, got array<float>"
        );
    }

    #[test]
    fn test_range_checks() {
        assert!(check_range(0, 3, 3).is_ok());
        assert!(check_range(2, 2, 3).is_ok());
        assert_eq!(
            check_range(2, 1, 3),
            Err(ReflectError::InvalidRange {
                from: 2,
                to: 1,
                length: 3
            })
        );
        assert!(check_range(0, 4, 3).is_err());
        assert_eq!(
            check_index(3, 3),
            Err(ReflectError::IndexOutOfBounds {
                index: 3,
                length: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "schema violation: duplicate tag")]
    fn test_schema_violation_panics() {
        schema_violation(format_args!("duplicate tag"));
    }
}
