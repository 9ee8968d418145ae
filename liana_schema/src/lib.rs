// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Liana Schema: struct schemas and list adapters over live object graphs.
//!
//! This crate describes the *shape* of application data so that paths such
//! as `canvas.paths.active.material.color` can be resolved against it.
//! Path parsing and resolution live in `liana_path`; this crate provides
//! what resolution walks.
//!
//! ## Core Concepts
//!
//! ### Data Objects
//!
//! [`DataObject`] is the seam to live data. An object exposes its fields by
//! string key as [`Field`] values and can be downcast to its concrete type.
//! The schema layer never owns objects, it only describes them.
//!
//! ### Structs
//!
//! A [`Struct`] is an ordered, uniquely named map of member edges for one
//! object type. Each [`Member`] is a nested struct, a property leaf bound
//! to a data key, or a list governed by an adapter. One struct describes
//! every instance of its type. [`Struct::merge_from`] composes schemas from
//! shared bases.
//!
//! ### List Adapters
//!
//! A [`ListAdapter`] teaches resolution how to operate one list edge:
//! indexing, counting, enumeration, active-element access, and element
//! identification. Capabilities are opt-in; an unimplemented one reports
//! [`AdapterError::Unsupported`] rather than pretending data is absent.
//!
//! ### The Registry
//!
//! [`SchemaRegistry`] keys structs by [`TypeId`](core::any::TypeId). List
//! elements re-derive their struct from their runtime type, so a single
//! list edge can hold differently shaped elements.
//!
//! ## Quick Start
//!
//! ```rust
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
//! }
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register::<Circle>("Circle")
//!     .float("radius")
//!     .nested("style", |style| {
//!         style.vec4("color");
//!     });
//!
//! let circle = Circle { radius: 2.0 };
//! let structure = registry.struct_for_object(&circle).unwrap();
//! assert_eq!(structure.name(), "Circle");
//! assert!(structure.member("radius").is_some());
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod list;
mod object;
mod registry;
mod structure;

pub use list::{AdapterError, AdapterOp, ElementFilter, ElementIter, ListAdapter};
pub use object::{DataObject, Field, Key};
pub use registry::{SchemaRegistry, StructBuilder};
pub use structure::{LeafKey, Member, Struct, StructRef};
