// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability-based list adapters.
//!
//! A [`ListAdapter`] is not a container: it is a bag of operations bound to
//! one list-typed schema edge, teaching the resolver how to index, count,
//! enumerate, and identify whatever collection actually backs that edge.
//! Arrays, keyed maps, and application-specific "active item" collections
//! all look the same through it.
//!
//! Only [`get`](ListAdapter::get) and [`len`](ListAdapter::len) are
//! required. Every other operation defaults to
//! [`AdapterError::Unsupported`] — invoking an unimplemented capability is a
//! programming error, reported distinctly from missing data so callers never
//! confuse the two.

use alloc::boxed::Box;
use core::fmt;

use liana_property::Value;

use crate::object::{DataObject, Key};
use crate::registry::SchemaRegistry;
use crate::structure::StructRef;

/// One adapter capability, named for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterOp {
    /// [`ListAdapter::get`].
    Get,
    /// [`ListAdapter::get_mut`].
    GetMut,
    /// [`ListAdapter::len`].
    Len,
    /// [`ListAdapter::set`].
    Set,
    /// [`ListAdapter::iter`].
    Iterate,
    /// [`ListAdapter::filter`].
    Filter,
    /// [`ListAdapter::active`].
    Active,
    /// [`ListAdapter::active_mut`].
    ActiveMut,
    /// [`ListAdapter::set_active`].
    SetActive,
    /// [`ListAdapter::key_of`].
    KeyOf,
    /// [`ListAdapter::element_struct`].
    ElementStruct,
}

impl fmt::Display for AdapterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "get",
            Self::GetMut => "get_mut",
            Self::Len => "len",
            Self::Set => "set",
            Self::Iterate => "iter",
            Self::Filter => "filter",
            Self::Active => "active",
            Self::ActiveMut => "active_mut",
            Self::SetActive => "set_active",
            Self::KeyOf => "key_of",
            Self::ElementStruct => "element_struct",
        };
        f.write_str(name)
    }
}

/// Errors reported by adapter operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdapterError {
    /// The adapter does not implement the requested operation. This is a
    /// setup defect, never suppressed by existence policies.
    Unsupported(AdapterOp),
    /// No element exists for the given key. This is a data error.
    Missing(Key),
    /// A write was refused by the adapter.
    Rejected {
        /// Why the write was refused.
        reason: &'static str,
    },
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(op) => write!(f, "adapter does not implement `{op}`"),
            Self::Missing(key) => write!(f, "no element for key `{key}`"),
            Self::Rejected { reason } => write!(f, "write rejected: {reason}"),
        }
    }
}

impl core::error::Error for AdapterError {}

bitflags::bitflags! {
    /// Composable element-filter bits for [`ListAdapter::filter`].
    ///
    /// The exact meaning of each bit is owner-defined.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFilter: u8 {
        /// Elements in the owner's current selection.
        const SELECTED = 1 << 0;
        /// Elements the owner considers editable.
        const EDITABLE = 1 << 1;
        /// Elements the owner considers visible.
        const VISIBLE = 1 << 2;
        /// The owner's active element.
        const ACTIVE = 1 << 3;
    }
}

/// A lazily evaluated, finite sequence of elements. A fresh iterator is
/// produced per call; adapters must not hand out a shared, partially
/// consumed one.
pub type ElementIter<'a> = Box<dyn Iterator<Item = &'a dyn DataObject> + 'a>;

/// The operation set of one list-typed schema edge.
///
/// `owner` is always the live object holding the collection; the adapter
/// knows which of the owner's fields it is bound to.
pub trait ListAdapter {
    /// The element for a key.
    ///
    /// Returns [`AdapterError::Missing`] when no element exists for `key`.
    fn get<'a>(
        &self,
        owner: &'a dyn DataObject,
        key: &Key,
    ) -> Result<&'a dyn DataObject, AdapterError>;

    /// Number of elements.
    fn len(&self, owner: &dyn DataObject) -> Result<usize, AdapterError>;

    /// Whether the collection is empty.
    fn is_empty(&self, owner: &dyn DataObject) -> Result<bool, AdapterError> {
        Ok(self.len(owner)? == 0)
    }

    /// Mutable access to the element for a key. Required for writes that
    /// descend through this list.
    fn get_mut<'a>(
        &self,
        owner: &'a mut dyn DataObject,
        key: &Key,
    ) -> Result<&'a mut dyn DataObject, AdapterError> {
        let _ = (owner, key);
        Err(AdapterError::Unsupported(AdapterOp::GetMut))
    }

    /// Assigns the slot for a key.
    fn set(
        &self,
        owner: &mut dyn DataObject,
        key: &Key,
        value: Value,
    ) -> Result<(), AdapterError> {
        let _ = (owner, key, value);
        Err(AdapterError::Unsupported(AdapterOp::Set))
    }

    /// Enumerates all elements.
    fn iter<'a>(&self, owner: &'a dyn DataObject) -> Result<ElementIter<'a>, AdapterError> {
        let _ = owner;
        Err(AdapterError::Unsupported(AdapterOp::Iterate))
    }

    /// Enumerates the elements matching a filter mask.
    fn filter<'a>(
        &self,
        owner: &'a dyn DataObject,
        mask: ElementFilter,
    ) -> Result<ElementIter<'a>, AdapterError> {
        let _ = (owner, mask);
        Err(AdapterError::Unsupported(AdapterOp::Filter))
    }

    /// The conventionally "current" element, if one is designated.
    ///
    /// `Ok(None)` means the collection has no active element right now — a
    /// data condition, not a capability failure.
    fn active<'a>(
        &self,
        owner: &'a dyn DataObject,
    ) -> Result<Option<&'a dyn DataObject>, AdapterError> {
        let _ = owner;
        Err(AdapterError::Unsupported(AdapterOp::Active))
    }

    /// Mutable access to the active element.
    fn active_mut<'a>(
        &self,
        owner: &'a mut dyn DataObject,
    ) -> Result<Option<&'a mut dyn DataObject>, AdapterError> {
        let _ = owner;
        Err(AdapterError::Unsupported(AdapterOp::ActiveMut))
    }

    /// Designates the active element by key.
    fn set_active(&self, owner: &mut dyn DataObject, key: &Key) -> Result<(), AdapterError> {
        let _ = (owner, key);
        Err(AdapterError::Unsupported(AdapterOp::SetActive))
    }

    /// The key identifying an element within the collection.
    fn key_of(
        &self,
        owner: &dyn DataObject,
        element: &dyn DataObject,
    ) -> Result<Key, AdapterError> {
        let _ = (owner, element);
        Err(AdapterError::Unsupported(AdapterOp::KeyOf))
    }

    /// The struct describing the element behind a key.
    ///
    /// The default re-derives it from the Schema Registry by the element's
    /// runtime type, which is what makes heterogeneous collections resolve
    /// correctly per element. `Ok(None)` means the element's type has no
    /// registered struct.
    fn element_struct(
        &self,
        owner: &dyn DataObject,
        key: &Key,
        registry: &SchemaRegistry,
    ) -> Result<Option<StructRef>, AdapterError> {
        let element = self.get(owner, key)?;
        Ok(registry.struct_for_object(element))
    }

    /// A static element struct for metadata-only traversal, used when an
    /// existence-ignoring walk pivots into a list that has no live element
    /// to derive a struct from. `None` (the default) ends schema validation
    /// at the pivot.
    fn element_struct_hint(&self, registry: &SchemaRegistry) -> Option<StructRef> {
        let _ = registry;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Field;
    use alloc::vec;
    use alloc::vec::Vec;

    struct Row {
        id: i64,
    }

    impl DataObject for Row {
        fn field(&self, key: &str) -> Field<'_> {
            match key {
                "id" => Field::Value(Value::Int(self.id)),
                _ => Field::Missing,
            }
        }
    }

    struct Table {
        rows: Vec<Row>,
    }

    impl DataObject for Table {
        fn field(&self, _key: &str) -> Field<'_> {
            Field::Missing
        }
    }

    struct RowsAdapter;

    impl ListAdapter for RowsAdapter {
        fn get<'a>(
            &self,
            owner: &'a dyn DataObject,
            key: &Key,
        ) -> Result<&'a dyn DataObject, AdapterError> {
            let table = owner
                .downcast_ref::<Table>()
                .ok_or(AdapterError::Rejected { reason: "not a Table" })?;
            let Key::Index(index) = key else {
                return Err(AdapterError::Missing(key.clone()));
            };
            match table.rows.get(*index) {
                Some(row) => Ok(row),
                None => Err(AdapterError::Missing(key.clone())),
            }
        }

        fn len(&self, owner: &dyn DataObject) -> Result<usize, AdapterError> {
            let table = owner
                .downcast_ref::<Table>()
                .ok_or(AdapterError::Rejected { reason: "not a Table" })?;
            Ok(table.rows.len())
        }
    }

    #[test]
    fn required_ops_work() {
        let table = Table {
            rows: vec![Row { id: 10 }, Row { id: 20 }],
        };
        let adapter = RowsAdapter;
        assert_eq!(adapter.len(&table).unwrap(), 2);
        assert!(!adapter.is_empty(&table).unwrap());
        let row = adapter.get(&table, &Key::Index(1)).unwrap();
        assert!(matches!(row.field("id"), Field::Value(Value::Int(20))));
    }

    #[test]
    fn missing_key_is_a_data_error() {
        let table = Table { rows: Vec::new() };
        let err = RowsAdapter.get(&table, &Key::Index(0)).unwrap_err();
        assert_eq!(err, AdapterError::Missing(Key::Index(0)));
    }

    #[test]
    fn unimplemented_ops_report_the_capability() {
        let mut table = Table { rows: Vec::new() };
        let err = RowsAdapter
            .set(&mut table, &Key::Index(0), Value::Int(0))
            .unwrap_err();
        assert_eq!(err, AdapterError::Unsupported(AdapterOp::Set));
        let err = RowsAdapter.active(&table).unwrap_err();
        assert_eq!(err, AdapterError::Unsupported(AdapterOp::Active));
    }
}
