// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `liana_path` resolution over a shape-list fixture.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use liana_path::{Existence, Lexer, get_value, resolve_path, set_value};
use liana_property::{Property, Value};
use liana_schema::{
    AdapterError, DataObject, Field, Key, ListAdapter, SchemaRegistry, StructRef,
};

struct Material {
    color: [f64; 4],
}

impl DataObject for Material {
    fn field(&self, key: &str) -> Field<'_> {
        match key {
            "color" => Field::Value(Value::from(self.color)),
            _ => Field::Missing,
        }
    }

    fn set_field(&mut self, key: &str, value: Value) -> bool {
        match (key, value) {
            ("color", Value::Vec4(v)) => {
                self.color = [v.x, v.y, v.z, v.w];
                true
            }
            _ => false,
        }
    }
}

struct Shape {
    width: f64,
    material: Material,
}

impl DataObject for Shape {
    fn field(&self, key: &str) -> Field<'_> {
        match key {
            "width" => Field::Value(Value::Float(self.width)),
            "material" => Field::Object(&self.material),
            _ => Field::Missing,
        }
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut dyn DataObject> {
        match key {
            "material" => Some(&mut self.material),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: Value) -> bool {
        match (key, value.as_float()) {
            ("width", Some(width)) => {
                self.width = width;
                true
            }
            _ => false,
        }
    }
}

struct Document {
    zoom: f64,
    shapes: Vec<Shape>,
    active: Option<usize>,
}

impl DataObject for Document {
    fn field(&self, key: &str) -> Field<'_> {
        match key {
            "zoom" => Field::Value(Value::Float(self.zoom)),
            _ => Field::Missing,
        }
    }

    fn set_field(&mut self, key: &str, value: Value) -> bool {
        match (key, value.as_float()) {
            ("zoom", Some(zoom)) => {
                self.zoom = zoom;
                true
            }
            _ => false,
        }
    }
}

struct ShapesAdapter;

impl ShapesAdapter {
    fn doc<'a>(owner: &'a dyn DataObject) -> Result<&'a Document, AdapterError> {
        owner.downcast_ref::<Document>().ok_or(AdapterError::Rejected {
            reason: "not a Document",
        })
    }
}

impl ListAdapter for ShapesAdapter {
    fn get<'a>(
        &self,
        owner: &'a dyn DataObject,
        key: &Key,
    ) -> Result<&'a dyn DataObject, AdapterError> {
        let doc = Self::doc(owner)?;
        let Key::Index(index) = key else {
            return Err(AdapterError::Missing(key.clone()));
        };
        doc.shapes
            .get(*index)
            .map(|s| s as &dyn DataObject)
            .ok_or_else(|| AdapterError::Missing(key.clone()))
    }

    fn len(&self, owner: &dyn DataObject) -> Result<usize, AdapterError> {
        Ok(Self::doc(owner)?.shapes.len())
    }

    fn get_mut<'a>(
        &self,
        owner: &'a mut dyn DataObject,
        key: &Key,
    ) -> Result<&'a mut dyn DataObject, AdapterError> {
        let doc = owner.downcast_mut::<Document>().ok_or(AdapterError::Rejected {
            reason: "not a Document",
        })?;
        let Key::Index(index) = key else {
            return Err(AdapterError::Missing(key.clone()));
        };
        doc.shapes
            .get_mut(*index)
            .map(|s| s as &mut dyn DataObject)
            .ok_or_else(|| AdapterError::Missing(key.clone()))
    }

    fn active<'a>(
        &self,
        owner: &'a dyn DataObject,
    ) -> Result<Option<&'a dyn DataObject>, AdapterError> {
        let doc = Self::doc(owner)?;
        Ok(doc
            .active
            .and_then(|i| doc.shapes.get(i))
            .map(|s| s as &dyn DataObject))
    }

    fn key_of(
        &self,
        owner: &dyn DataObject,
        element: &dyn DataObject,
    ) -> Result<Key, AdapterError> {
        let doc = Self::doc(owner)?;
        let shape = element.downcast_ref::<Shape>().ok_or(AdapterError::Rejected {
            reason: "not a Shape",
        })?;
        doc.shapes
            .iter()
            .position(|s| std::ptr::eq(s, shape))
            .map(Key::Index)
            .ok_or(AdapterError::Rejected {
                reason: "element is not in this list",
            })
    }

    fn element_struct_hint(&self, registry: &SchemaRegistry) -> Option<StructRef> {
        registry.struct_for::<Shape>()
    }
}

fn build_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .register::<Shape>("Shape")
        .float("width")
        .nested("material", |material| {
            material.property_at("material.color", Property::vec4("color"));
        });
    registry
        .register::<Document>("Document")
        .float("zoom")
        .list("shapes", ShapesAdapter);
    registry
}

fn sample_doc(shapes: usize) -> Document {
    Document {
        zoom: 1.0,
        shapes: (0..shapes)
            .map(|i| Shape {
                width: i as f64,
                material: Material {
                    color: [1.0, 1.0, 1.0, 1.0],
                },
            })
            .collect(),
        active: Some(shapes / 2),
    }
}

fn bench_resolve(c: &mut Criterion) {
    let registry = build_registry();
    let doc = sample_doc(64);

    let mut group = c.benchmark_group("path/resolve");
    group.bench_function("lex_deep", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box("shapes[12].material.color"));
            while let Ok(Some(token)) = lexer.next_token() {
                black_box(token);
            }
        });
    });
    group.bench_function("shallow_leaf", |b| {
        b.iter(|| get_value(&registry, black_box(&doc), "zoom").unwrap());
    });
    group.bench_function("indexed_deep_leaf", |b| {
        b.iter(|| get_value(&registry, black_box(&doc), "shapes[12].material.color").unwrap());
    });
    group.bench_function("active_pivot", |b| {
        b.iter(|| get_value(&registry, black_box(&doc), "shapes.active.width").unwrap());
    });
    group.bench_function("metadata_only", |b| {
        b.iter(|| {
            resolve_path(
                &registry,
                black_box(&doc),
                "shapes.active.material.color",
                Existence::Ignore,
            )
            .unwrap()
        });
    });
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let registry = build_registry();
    let mut doc = sample_doc(64);

    let mut group = c.benchmark_group("path/write");
    group.bench_function("pivoted_set", |b| {
        b.iter(|| {
            set_value(
                &registry,
                black_box(&mut doc),
                "shapes[7].material.color",
                Value::from([0.2, 0.4, 0.6, 1.0]),
            )
            .unwrap();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_write);
criterion_main!(benches);
