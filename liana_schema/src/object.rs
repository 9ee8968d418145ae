// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live object graph seam.
//!
//! Application objects participate in path resolution by implementing
//! [`DataObject`]: a single-hop field read, plus optional mutable descent and
//! field assignment for the write path. Nothing else is imposed on them; the
//! shape of their bindable surface is declared separately, in the schema.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use liana_property::Value;

/// The result of reading one field of a live object.
pub enum Field<'a> {
    /// The field holds a nested object that can be traversed further.
    Object(&'a dyn DataObject),
    /// The field holds a leaf value, returned as a snapshot.
    Value(Value),
    /// The field is absent on this object.
    Missing,
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(_) => f.debug_tuple("Object").field(&"DataObject").finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

/// A field or element key: a positional index or a name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Positional index into an ordered collection.
    Index(usize),
    /// Named field or keyed element.
    Name(Box<str>),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

/// A node of the live object graph.
///
/// The resolver walks objects one field hop at a time, in lock-step with the
/// schema. Runtime type identity (via [`Any`]) is what connects an object to
/// its registered struct. Only [`DataObject::field`] is required; the mutable
/// methods opt an object into the generic write path and default to
/// rejecting writes.
pub trait DataObject: Any {
    /// Reads one named field.
    fn field(&self, key: &str) -> Field<'_>;

    /// Descends mutably into a nested object field.
    ///
    /// Returning `None` (the default) makes paths through this object
    /// read-only.
    fn field_mut(&mut self, key: &str) -> Option<&mut dyn DataObject> {
        let _ = key;
        None
    }

    /// Assigns a leaf field. Returns `false` (the default) if the field is
    /// unknown or not writable.
    fn set_field(&mut self, key: &str, value: Value) -> bool {
        let _ = (key, value);
        false
    }
}

impl fmt::Debug for dyn DataObject + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataObject")
    }
}

impl dyn DataObject {
    /// Downcasts a shared object reference to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: DataObject>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Downcasts a mutable object reference to a concrete type.
    #[must_use]
    pub fn downcast_mut<T: DataObject>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot {
        x: f64,
    }

    impl DataObject for Dot {
        fn field(&self, key: &str) -> Field<'_> {
            match key {
                "x" => Field::Value(Value::Float(self.x)),
                _ => Field::Missing,
            }
        }
    }

    #[test]
    fn default_write_surface_refuses() {
        let mut dot = Dot { x: 1.0 };
        assert!(dot.field_mut("x").is_none());
        assert!(!dot.set_field("x", Value::Float(2.0)));
    }

    #[test]
    fn downcast_through_the_seam() {
        let dot = Dot { x: 4.0 };
        let erased: &dyn DataObject = &dot;
        assert!(erased.downcast_ref::<Dot>().is_some());
        let Field::Value(v) = erased.field("x") else {
            panic!("expected a value field");
        };
        assert_eq!(v, Value::Float(4.0));
    }

    #[test]
    fn keys_display_uniformly() {
        use alloc::string::ToString;
        assert_eq!(Key::from(3).to_string(), "3");
        assert_eq!(Key::from("name").to_string(), "name");
    }
}
