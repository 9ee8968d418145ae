// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The schema registry and its struct builder.
//!
//! The registry maps concrete Rust types to the [`Struct`] describing them,
//! keyed by [`TypeId`]. Resolution re-derives an element's struct from its
//! runtime type at every list pivot, which is what lets heterogeneous
//! collections hold differently shaped elements behind one schema edge.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use core::any::TypeId;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use liana_property::{Property, SymbolTable};

use crate::list::ListAdapter;
use crate::object::DataObject;
use crate::structure::{LeafKey, Member, Struct, StructRef};

/// Maps concrete object types to their structs.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    structs: HashMap<TypeId, StructRef>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `name` and returns a builder over its struct.
    ///
    /// Registering an already registered type returns a builder over the
    /// existing struct, so setup code can extend a schema in stages.
    pub fn register<T: 'static>(&mut self, name: impl Into<Box<str>>) -> StructBuilder {
        let name = name.into();
        match self.structs.entry(TypeId::of::<T>()) {
            Entry::Occupied(entry) => {
                let structure = entry.get().clone();
                debug_assert_eq!(
                    structure.name(),
                    &*name,
                    "type re-registered under a different name"
                );
                StructBuilder { structure }
            }
            Entry::Vacant(entry) => {
                let structure = Rc::new(Struct::new(name));
                entry.insert(structure.clone());
                StructBuilder { structure }
            }
        }
    }

    /// The struct registered for a type id, if any.
    #[must_use]
    pub fn struct_of(&self, type_id: TypeId) -> Option<StructRef> {
        self.structs.get(&type_id).cloned()
    }

    /// The struct registered for `T`, if any.
    #[must_use]
    pub fn struct_for<T: 'static>(&self) -> Option<StructRef> {
        self.struct_of(TypeId::of::<T>())
    }

    /// The struct registered for an object's runtime type, if any.
    #[must_use]
    pub fn struct_for_object(&self, object: &dyn DataObject) -> Option<StructRef> {
        self.struct_of(object.type_id())
    }
}

/// A chainable pen for writing member edges into one [`Struct`].
///
/// Builders are cheap handles; several may target the same struct.
#[derive(Debug)]
pub struct StructBuilder {
    structure: StructRef,
}

impl StructBuilder {
    /// Adds a property leaf whose data key equals the property name.
    pub fn property(&mut self, property: Property) -> &mut Self {
        let key: Box<str> = property.name().into();
        self.property_at(&key, property)
    }

    /// Adds a property leaf bound to an explicit data key.
    ///
    /// Dots split the key into hops: `data.angle1` reads the owner's
    /// `data` object, then its `angle1` field, all under this one edge.
    pub fn property_at(&mut self, key: &str, property: Property) -> &mut Self {
        let key: LeafKey = key.split('.').map(Box::from).collect();
        let name: Box<str> = property.name().into();
        self.structure.insert(
            name,
            Member::Leaf {
                property: Rc::new(property),
                key,
            },
        );
        self
    }

    /// Adds a boolean leaf.
    pub fn bool(&mut self, name: &str) -> &mut Self {
        self.property(Property::bool(name))
    }

    /// Adds an integer leaf.
    pub fn int(&mut self, name: &str) -> &mut Self {
        self.property(Property::int(name))
    }

    /// Adds a float leaf.
    pub fn float(&mut self, name: &str) -> &mut Self {
        self.property(Property::float(name))
    }

    /// Adds a string leaf.
    pub fn string(&mut self, name: &str) -> &mut Self {
        self.property(Property::string(name))
    }

    /// Adds a 2-vector leaf.
    pub fn vec2(&mut self, name: &str) -> &mut Self {
        self.property(Property::vec2(name))
    }

    /// Adds a 3-vector leaf.
    pub fn vec3(&mut self, name: &str) -> &mut Self {
        self.property(Property::vec3(name))
    }

    /// Adds a 4-vector leaf.
    pub fn vec4(&mut self, name: &str) -> &mut Self {
        self.property(Property::vec4(name))
    }

    /// Adds a quaternion leaf.
    pub fn quat(&mut self, name: &str) -> &mut Self {
        self.property(Property::quat(name))
    }

    /// Adds a 4x4 matrix leaf.
    pub fn mat4(&mut self, name: &str) -> &mut Self {
        self.property(Property::mat4(name))
    }

    /// Adds a string-set leaf.
    pub fn string_set(&mut self, name: &str) -> &mut Self {
        self.property(Property::string_set(name))
    }

    /// Adds an enumeration leaf over a symbol table.
    pub fn enumeration(&mut self, name: &str, symbols: SymbolTable) -> &mut Self {
        self.property(Property::enumeration(name, symbols))
    }

    /// Adds a flag-set leaf over a symbol table of bit masks.
    pub fn flags(&mut self, name: &str, symbols: SymbolTable) -> &mut Self {
        self.property(Property::bitflag(name, symbols))
    }

    /// Adds a list edge operated by `adapter`.
    ///
    /// This is a schema list of objects; a leaf whose value is a plain
    /// [`Value::List`](liana_property::Value::List) goes through
    /// [`property`](Self::property) instead.
    pub fn list(&mut self, name: &str, adapter: impl ListAdapter + 'static) -> &mut Self {
        self.structure.insert(name, Member::List(Rc::new(adapter)));
        self
    }

    /// Adds a nested struct edge and populates it through `build`.
    ///
    /// The child struct is named `{parent}.{name}` for diagnostics.
    pub fn nested(&mut self, name: &str, build: impl FnOnce(&mut Self)) -> &mut Self {
        let child = Rc::new(Struct::new(format!("{}.{name}", self.structure.name())));
        let mut builder = Self {
            structure: child.clone(),
        };
        build(&mut builder);
        self.structure.insert(name, Member::Struct(child));
        self
    }

    /// Copies every member of `base` into this struct, replacing members
    /// that share a name. See [`Struct::merge_from`].
    pub fn merge(&mut self, base: &Struct) -> &mut Self {
        self.structure.merge_from(base);
        self
    }

    /// The struct this builder writes into.
    #[must_use]
    pub fn structure(&self) -> StructRef {
        self.structure.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Field;

    struct Canvas;

    impl DataObject for Canvas {
        fn field(&self, _key: &str) -> Field<'_> {
            Field::Missing
        }
    }

    struct Shape;

    impl DataObject for Shape {
        fn field(&self, _key: &str) -> Field<'_> {
            Field::Missing
        }
    }

    #[test]
    fn registration_is_memoized() {
        let mut registry = SchemaRegistry::new();
        let first = registry.register::<Canvas>("Canvas").structure();
        let second = registry.register::<Canvas>("Canvas").structure();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(registry.struct_for::<Canvas>().is_some());
        assert!(registry.struct_for::<Shape>().is_none());
    }

    #[test]
    fn lookup_follows_runtime_type() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Canvas>("Canvas");
        registry.register::<Shape>("Shape");

        let canvas = Canvas;
        let shape = Shape;
        let canvas_struct = registry
            .struct_for_object(&canvas as &dyn DataObject)
            .unwrap();
        let shape_struct = registry
            .struct_for_object(&shape as &dyn DataObject)
            .unwrap();
        assert_eq!(canvas_struct.name(), "Canvas");
        assert_eq!(shape_struct.name(), "Shape");
    }

    #[test]
    fn nested_structs_carry_dotted_names() {
        let mut registry = SchemaRegistry::new();
        let canvas = registry
            .register::<Canvas>("Canvas")
            .nested("grid", |grid| {
                grid.bool("visible").float("spacing");
            })
            .structure();

        let Some(Member::Struct(grid)) = canvas.member("grid") else {
            panic!("grid edge missing");
        };
        assert_eq!(grid.name(), "Canvas.grid");
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn dotted_keys_split_into_hops() {
        let mut registry = SchemaRegistry::new();
        let shape = registry
            .register::<Shape>("Shape")
            .property_at("data.angle1", Property::float("angle1"))
            .structure();

        let Some(Member::Leaf { key, .. }) = shape.member("angle1") else {
            panic!("leaf missing");
        };
        assert_eq!(key.len(), 2);
        assert_eq!(&*key[0], "data");
        assert_eq!(&*key[1], "angle1");
    }
}
