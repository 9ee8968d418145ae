// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol tables for enum and flag properties.
//!
//! An enum or flag property carries a [`SymbolTable`] built once at
//! construction: symbolic name to stored value, stored value back to its
//! primary name, and per-name UI info (icon, description). Path tests such
//! as `mode=EDIT` or `flags[ENABLED]` resolve their literals through the
//! table of the active property.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// One symbolic entry of an enum or flag property.
#[derive(Clone, Debug)]
pub struct Symbol {
    /// The symbolic name used in paths and UI.
    pub name: Box<str>,
    /// The stored value the name maps to. For flag properties this is a
    /// single bit or a mask.
    pub value: i64,
    /// Optional icon identifier for UI.
    pub icon: Option<Box<str>>,
    /// Optional human-readable description.
    pub description: Option<Box<str>>,
}

impl Symbol {
    /// Creates a symbol with no icon or description.
    #[must_use]
    pub fn new(name: &str, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            icon: None,
            description: None,
        }
    }

    /// Sets the icon identifier.
    #[must_use]
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// UI info attached to one symbol name.
#[derive(Clone, Debug, Default)]
pub struct SymbolInfo {
    /// Optional icon identifier.
    pub icon: Option<Box<str>>,
    /// Optional human-readable description.
    pub description: Option<Box<str>>,
}

/// The parallel lookup maps of an enum or flag property.
///
/// Built once at construction and never mutated afterwards. Duplicate names
/// panic (schemas are authored at setup time); duplicate values are allowed
/// and reverse lookup returns the first name registered for a value.
#[derive(Debug, Default)]
pub struct SymbolTable {
    order: Vec<Box<str>>,
    by_name: HashMap<Box<str>, i64>,
    by_value: HashMap<i64, Box<str>>,
    info: HashMap<Box<str>, SymbolInfo>,
}

impl SymbolTable {
    /// Builds a table from symbols in the given order.
    ///
    /// # Panics
    ///
    /// Panics if two symbols share a name.
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut table = Self::default();
        for symbol in symbols {
            let Symbol {
                name,
                value,
                icon,
                description,
            } = symbol;
            assert!(
                !table.by_name.contains_key(&name),
                "symbol `{name}` already registered"
            );
            table.order.push(name.clone());
            table.by_name.insert(name.clone(), value);
            table.by_value.entry(value).or_insert_with(|| name.clone());
            if icon.is_some() || description.is_some() {
                table.info.insert(name, SymbolInfo { icon, description });
            }
        }
        table
    }

    /// Builds a table from `(name, value)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self::new(pairs.into_iter().map(|(name, value)| Symbol::new(name, value)))
    }

    /// The stored value for a symbolic name.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.by_name.get(name).copied()
    }

    /// The primary (first-registered) name for a stored value.
    #[must_use]
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.by_value.get(&value).map(|name| &**name)
    }

    /// The UI info attached to a name, if any was supplied.
    #[must_use]
    pub fn info(&self, name: &str) -> Option<&SymbolInfo> {
        self.info.get(name)
    }

    /// Symbol names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|name| &**name)
    }

    /// The value of the first registered symbol, used as the default for
    /// enum properties.
    #[must_use]
    pub fn first_value(&self) -> Option<i64> {
        self.order.first().and_then(|name| self.value_of(name))
    }

    /// Number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn forward_and_reverse_lookup() {
        let table = SymbolTable::from_pairs([("OFF", 0), ("ON", 1), ("AUTO", 2)]);
        assert_eq!(table.value_of("AUTO"), Some(2));
        assert_eq!(table.name_of(1), Some("ON"));
        assert_eq!(table.value_of("MISSING"), None);
        assert_eq!(table.first_value(), Some(0));
    }

    #[test]
    fn duplicate_values_keep_first_name() {
        let table = SymbolTable::from_pairs([("PRIMARY", 4), ("ALIAS", 4)]);
        assert_eq!(table.name_of(4), Some("PRIMARY"));
        assert_eq!(table.value_of("ALIAS"), Some(4));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_names_panic() {
        let _ = SymbolTable::from_pairs([("ON", 1), ("ON", 2)]);
    }

    #[test]
    fn info_and_order() {
        let table = SymbolTable::new(vec![
            Symbol::new("EDIT", 0).with_icon("pencil"),
            Symbol::new("VIEW", 1).with_description("read only"),
        ]);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, ["EDIT", "VIEW"]);
        assert_eq!(table.info("EDIT").unwrap().icon.as_deref(), Some("pencil"));
        assert!(table.info("VIEW").unwrap().icon.is_none());
        assert_eq!(table.len(), 2);
    }
}
