// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Liana Path: the lexer and resolver of the Liana binding engine.
//!
//! A path is a small textual expression such as
//! `canvas.paths.active.material.color` or `flags[ENABLED]` naming a
//! location in a schema-typed object graph. This crate interprets paths
//! against the schemas of `liana_schema` and the live objects behind them,
//! in a single pass that advances the schema and the data in lock-step.
//!
//! ## Core Concepts
//!
//! ### Grammar
//!
//! `segment ('.' segment)*` where a segment is an identifier optionally
//! followed by one of:
//!
//! * `[NUM]` / `['key']` — index into a list edge;
//! * `[SYM]`, `=SYM`, `=NUM` — test an enum/flag leaf against a value;
//! * `&SYM`, `&NUM` — the same test with forced bitmask semantics.
//!
//! The pseudo-segment `active` after a list edge pivots to the list's
//! conventionally selected element.
//!
//! ### Resolution
//!
//! [`resolve_path`] walks schema and data together and returns a
//! [`Resolution`]: the live objects around the final location, its value (or
//! the derived boolean of a test), and the schema metadata UI needs to
//! render a control for it. [`Existence::Ignore`] keeps the metadata walk
//! alive over missing live data, for driving disabled controls.
//!
//! ### Reads and writes
//!
//! [`get_value`] and [`set_value`] are thin wrappers: a read returns the
//! resolved value, a write coerces through the resolved property, replays
//! the resolved route mutably, updates the live graph, and then notifies the
//! property's observers synchronously.
//!
//! ## Quick Start
//!
//! ```rust
//! use liana_path::{get_value, set_value};
//! use liana_property::Value;
//! use liana_schema::{DataObject, Field, SchemaRegistry};
//!
//! struct Circle {
//!     radius: f64,
//! }
//!
//! impl DataObject for Circle {
//!     fn field(&self, key: &str) -> Field<'_> {
//!         match key {
//!             "radius" => Field::Value(Value::Float(self.radius)),
//!             _ => Field::Missing,
//!         }
//!     }
//!
//!     fn set_field(&mut self, key: &str, value: Value) -> bool {
//!         match (key, value.as_float()) {
//!             ("radius", Some(radius)) => {
//!                 self.radius = radius;
//!                 true
//!             }
//!             _ => false,
//!         }
//!     }
//! }
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register::<Circle>("Circle").float("radius");
//!
//! let mut circle = Circle { radius: 2.0 };
//! assert_eq!(
//!     get_value(&registry, &circle, "radius").unwrap(),
//!     Value::Float(2.0)
//! );
//! set_value(&registry, &mut circle, "radius", Value::Float(3.0)).unwrap();
//! assert_eq!(circle.radius, 3.0);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod lexer;
mod resolve;

pub use lexer::{GrammarError, Lexer, Token, TokenKind};
pub use resolve::{
    Existence, PathError, Resolution, get_value, resolve_from, resolve_path, set_value,
};
