// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Liana Property: typed, observable properties for schema-driven binding.
//!
//! This crate provides the leaf value model of the Liana path resolution
//! engine: a closed set of property kinds (string, bool, int, float,
//! vector2/3/4, quaternion, 4x4 matrix, enum, bitflag, list, string-set),
//! each owning its value, coercion rules, UI metadata, and change
//! notification. Schema structure and path resolution live in
//! `liana_schema` and `liana_path`.
//!
//! ## Core Concepts
//!
//! ### Values
//!
//! [`Value`] is the exchange representation crossing every engine boundary.
//! Enum and flag properties store resolved numbers ([`Value::Int`]); their
//! symbolic names live in a [`SymbolTable`] built once at construction.
//!
//! ### Properties
//!
//! A [`Property`] pairs one fixed [`PropertyKind`] with a current value and
//! the metadata generic UI needs (display name, icon, flags, numeric hints,
//! symbols). `set_value` coerces laxly (floats floor to ints, vectors accept
//! numeric lists, flags accept symbol-name lists) and then notifies every
//! observer synchronously, in registration order.
//!
//! ## Quick Start
//!
//! ```rust
//! use liana_property::{Property, SymbolTable, Value};
//!
//! let mode = Property::enumeration(
//!     "mode",
//!     SymbolTable::from_pairs([("EDIT", 0), ("VIEW", 1)]),
//! )
//! .with_description("Interaction mode of the canvas");
//!
//! // Enum defaults to its first symbol.
//! assert_eq!(mode.get_value(), Value::Int(0));
//!
//! mode.observe(|new| assert_eq!(new, &Value::Int(1)));
//! mode.set_value(Value::from("VIEW")).unwrap();
//! assert_eq!(mode.get_value(), Value::Int(1));
//! ```
//!
//! ## Notification Hazard
//!
//! Observers run synchronously and immediately, mid-write, in registration
//! order. An observer may re-enter the property or the resolution engine
//! before the surrounding write returns; callers must not assume writes have
//! "settled" when their own observer fires.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod property;
mod symbols;
mod value;

pub use property::{Numeric, Property, PropertyError, PropertyFlags, PropertyKind};
pub use symbols::{Symbol, SymbolInfo, SymbolTable};
pub use value::Value;
