// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed, observable leaf properties.
//!
//! A [`Property`] is a value container of one fixed [`PropertyKind`] plus the
//! metadata generic UI needs to render and validate an edit control: display
//! name, description, icon, flags, numeric hints, and the symbol table of
//! enum/flag kinds. Setting a value coerces it to the kind and then notifies
//! every registered observer synchronously, in registration order.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use glam::{DMat4, DQuat, DVec2, DVec3, DVec4};

use crate::symbols::SymbolTable;
use crate::value::Value;

/// The closed set of property kinds.
///
/// A property's kind is fixed at construction and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Double-precision float.
    Float,
    /// String.
    String,
    /// 2-component vector.
    Vec2,
    /// 3-component vector.
    Vec3,
    /// 4-component vector.
    Vec4,
    /// Quaternion.
    Quat,
    /// 4x4 matrix.
    Mat4,
    /// Enumerated value with a symbol table.
    Enum,
    /// Bitflag value with a symbol table.
    Flags,
    /// Ordered list of values, coerced through an element template.
    List,
    /// Set of unique strings.
    StringSet,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Quat => "quat",
            Self::Mat4 => "mat4",
            Self::Enum => "enum",
            Self::Flags => "flags",
            Self::List => "list",
            Self::StringSet => "string set",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// Behavior flags attached to a property.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// The generic write surface refuses to set this property.
        const READ_ONLY = 1 << 0;
        /// Hidden from generated UI listings.
        const PRIVATE = 1 << 1;
        /// Present in schemas but not shown in inspector panels.
        const HIDDEN = 1 << 2;
    }
}

/// Advisory numeric metadata.
///
/// None of these are enforced by [`Property::set_value`]; they exist so UI
/// can build sliders and spinners. Clamping is the caller's decision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Numeric {
    /// Nominal value range.
    pub range: Option<(f64, f64)>,
    /// Range presented by UI controls, when narrower than `range`.
    pub ui_range: Option<(f64, f64)>,
    /// Step increment for spinners.
    pub step: Option<f64>,
    /// Decimal places to display.
    pub decimal_places: Option<u8>,
    /// Display radix (e.g. 16 for flag masks).
    pub radix: Option<u8>,
}

/// Errors produced by value coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyError {
    /// The supplied value cannot be coerced to the property's kind.
    Kind {
        /// The property's kind.
        kind: PropertyKind,
        /// Kind name of the value that was supplied.
        found: &'static str,
    },
    /// A symbolic name is not present in the property's symbol table.
    UnknownSymbol {
        /// The name that failed to resolve.
        name: Box<str>,
    },
    /// An element of a list value failed coercion.
    Element {
        /// Index of the offending element.
        index: usize,
        /// The element's own coercion error.
        source: Box<PropertyError>,
    },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind { kind, found } => {
                write!(f, "expected a {kind} value, found {found}")
            }
            Self::UnknownSymbol { name } => write!(f, "unknown symbol `{name}`"),
            Self::Element { index, source } => write!(f, "element {index}: {source}"),
        }
    }
}

impl core::error::Error for PropertyError {}

type Observer = Rc<dyn Fn(&Value)>;

/// A typed, observable value container.
///
/// Properties are created while a schema is built and live as long as the
/// owning struct. [`Property::set_value`] coerces, stores, and then invokes
/// every observer with the new value. Notification is synchronous and
/// re-entrant: an observer may register further observers or call back into
/// the engine mid-write, and observers registered during a notification are
/// reached in the same pass. This type is single-threaded by design.
pub struct Property {
    kind: PropertyKind,
    name: Box<str>,
    display_name: Option<Box<str>>,
    description: Option<Box<str>>,
    icon: Option<Box<str>>,
    flags: PropertyFlags,
    numeric: Option<Numeric>,
    symbols: Option<Rc<SymbolTable>>,
    element: Option<Rc<Property>>,
    value: RefCell<Value>,
    observers: RefCell<Vec<Observer>>,
}

impl Property {
    fn new(kind: PropertyKind, name: &str, value: Value) -> Self {
        Self {
            kind,
            name: name.into(),
            display_name: None,
            description: None,
            icon: None,
            flags: PropertyFlags::empty(),
            numeric: None,
            symbols: None,
            element: None,
            value: RefCell::new(value),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// A boolean property, initially `false`.
    #[must_use]
    pub fn bool(name: &str) -> Self {
        Self::new(PropertyKind::Bool, name, Value::Bool(false))
    }

    /// An integer property, initially `0`.
    #[must_use]
    pub fn int(name: &str) -> Self {
        Self::new(PropertyKind::Int, name, Value::Int(0))
    }

    /// A float property, initially `0.0`.
    #[must_use]
    pub fn float(name: &str) -> Self {
        Self::new(PropertyKind::Float, name, Value::Float(0.0))
    }

    /// A string property, initially empty.
    #[must_use]
    pub fn string(name: &str) -> Self {
        Self::new(PropertyKind::String, name, Value::String(String::new()))
    }

    /// A 2-component vector property, initially zero.
    #[must_use]
    pub fn vec2(name: &str) -> Self {
        Self::new(PropertyKind::Vec2, name, Value::Vec2(DVec2::ZERO))
    }

    /// A 3-component vector property, initially zero.
    #[must_use]
    pub fn vec3(name: &str) -> Self {
        Self::new(PropertyKind::Vec3, name, Value::Vec3(DVec3::ZERO))
    }

    /// A 4-component vector property, initially zero.
    #[must_use]
    pub fn vec4(name: &str) -> Self {
        Self::new(PropertyKind::Vec4, name, Value::Vec4(DVec4::ZERO))
    }

    /// A quaternion property, initially identity.
    #[must_use]
    pub fn quat(name: &str) -> Self {
        Self::new(PropertyKind::Quat, name, Value::Quat(DQuat::IDENTITY))
    }

    /// A 4x4 matrix property, initially identity.
    #[must_use]
    pub fn mat4(name: &str) -> Self {
        Self::new(PropertyKind::Mat4, name, Value::Mat4(DMat4::IDENTITY))
    }

    /// An enum property. The initial value is the first symbol's value.
    #[must_use]
    pub fn enumeration(name: &str, symbols: SymbolTable) -> Self {
        let initial = symbols.first_value().unwrap_or(0);
        let mut property = Self::new(PropertyKind::Enum, name, Value::Int(initial));
        property.symbols = Some(Rc::new(symbols));
        property
    }

    /// A bitflag property, initially zero.
    #[must_use]
    pub fn bitflag(name: &str, symbols: SymbolTable) -> Self {
        let mut property = Self::new(PropertyKind::Flags, name, Value::Int(0));
        property.symbols = Some(Rc::new(symbols));
        property
    }

    /// A string-set property, initially empty.
    #[must_use]
    pub fn string_set(name: &str) -> Self {
        Self::new(PropertyKind::StringSet, name, Value::StringSet(BTreeSet::new()))
    }

    /// A list property whose elements are coerced through `element`.
    #[must_use]
    pub fn list(name: &str, element: Self) -> Self {
        let mut property = Self::new(PropertyKind::List, name, Value::List(Vec::new()));
        property.element = Some(Rc::new(element));
        property
    }

    /// Sets the display name shown by UI.
    #[must_use]
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the icon identifier.
    #[must_use]
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the behavior flags.
    #[must_use]
    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets all numeric metadata at once.
    #[must_use]
    pub fn with_numeric(mut self, numeric: Numeric) -> Self {
        self.numeric = Some(numeric);
        self
    }

    /// Sets the advisory value range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.numeric.get_or_insert_default().range = Some((min, max));
        self
    }

    /// Sets the advisory UI range.
    #[must_use]
    pub fn with_ui_range(mut self, min: f64, max: f64) -> Self {
        self.numeric.get_or_insert_default().ui_range = Some((min, max));
        self
    }

    /// Sets the advisory step increment.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.numeric.get_or_insert_default().step = Some(step);
        self
    }

    /// Sets the initial value through coercion.
    ///
    /// # Panics
    ///
    /// Panics if the value cannot be coerced to the property's kind; initial
    /// values are authored at setup time together with the schema.
    #[must_use]
    pub fn with_value(self, value: Value) -> Self {
        match self.coerce(value) {
            Ok(coerced) => {
                *self.value.borrow_mut() = coerced;
                self
            }
            Err(err) => panic!("initial value for `{}` does not fit its kind: {err}", self.name),
        }
    }

    /// The property's kind. Fixed at construction.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// The schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display name, falling back to the schema name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// The description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The icon identifier, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The behavior flags.
    #[must_use]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Advisory numeric metadata, if any.
    #[must_use]
    pub fn numeric(&self) -> Option<&Numeric> {
        self.numeric.as_ref()
    }

    /// The symbol table of an enum or flag property.
    #[must_use]
    pub fn symbols(&self) -> Option<&SymbolTable> {
        self.symbols.as_deref()
    }

    /// The element template of a list property.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        self.element.as_deref()
    }

    /// A snapshot of the current value.
    #[must_use]
    pub fn get_value(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Coerces `value` to this property's kind without storing it.
    ///
    /// The rules are deliberately lax, matching the engine's write contract:
    /// floats floor to ints, ints widen to floats, vectors and matrices
    /// accept lists of numbers, enums accept any int or a known symbol name,
    /// flags additionally accept a list of names OR-ed together. Range
    /// metadata is advisory and never clamps.
    pub fn coerce(&self, value: Value) -> Result<Value, PropertyError> {
        let mismatch = |value: &Value| PropertyError::Kind {
            kind: self.kind,
            found: value.kind_name(),
        };
        let list_mismatch = || PropertyError::Kind {
            kind: self.kind,
            found: "list",
        };
        match self.kind {
            PropertyKind::Bool => match value {
                Value::Bool(_) => Ok(value),
                Value::Int(i) => Ok(Value::Bool(i != 0)),
                other => Err(mismatch(&other)),
            },
            PropertyKind::Int => match value {
                Value::Int(_) => Ok(value),
                Value::Float(f) => Ok(Value::Int(floor_to_i64(f))),
                other => Err(mismatch(&other)),
            },
            PropertyKind::Float => match value {
                Value::Float(_) => Ok(value),
                Value::Int(i) => Ok(Value::Float(i as f64)),
                other => Err(mismatch(&other)),
            },
            PropertyKind::String => match value {
                Value::String(_) => Ok(value),
                other => Err(mismatch(&other)),
            },
            PropertyKind::Vec2 => match value {
                Value::Vec2(_) => Ok(value),
                Value::List(items) => {
                    let [x, y] = numeric_array(&items).ok_or_else(list_mismatch)?;
                    Ok(Value::Vec2(DVec2::new(x, y)))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::Vec3 => match value {
                Value::Vec3(_) => Ok(value),
                Value::List(items) => {
                    let [x, y, z] = numeric_array(&items).ok_or_else(list_mismatch)?;
                    Ok(Value::Vec3(DVec3::new(x, y, z)))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::Vec4 => match value {
                Value::Vec4(_) => Ok(value),
                Value::List(items) => {
                    let [x, y, z, w] = numeric_array(&items).ok_or_else(list_mismatch)?;
                    Ok(Value::Vec4(DVec4::new(x, y, z, w)))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::Quat => match value {
                Value::Quat(_) => Ok(value),
                Value::List(items) => {
                    let [x, y, z, w] = numeric_array(&items).ok_or_else(list_mismatch)?;
                    Ok(Value::Quat(DQuat::from_xyzw(x, y, z, w)))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::Mat4 => match value {
                Value::Mat4(_) => Ok(value),
                Value::List(items) => {
                    if items.len() != 16 {
                        return Err(list_mismatch());
                    }
                    let mut cols = [0.0; 16];
                    for (slot, item) in cols.iter_mut().zip(&items) {
                        *slot = numeric_item(item).ok_or(mismatch(item))?;
                    }
                    Ok(Value::Mat4(DMat4::from_cols_array(&cols)))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::Enum => match value {
                Value::Int(_) => Ok(value),
                Value::String(name) => match self.symbol_value(&name) {
                    Some(stored) => Ok(Value::Int(stored)),
                    None => Err(PropertyError::UnknownSymbol { name: name.into() }),
                },
                other => Err(mismatch(&other)),
            },
            PropertyKind::Flags => match value {
                Value::Int(_) => Ok(value),
                Value::String(name) => match self.symbol_value(&name) {
                    Some(stored) => Ok(Value::Int(stored)),
                    None => Err(PropertyError::UnknownSymbol { name: name.into() }),
                },
                Value::List(items) => {
                    let mut mask = 0;
                    for (index, item) in items.iter().enumerate() {
                        let Some(name) = item.as_str() else {
                            return Err(PropertyError::Element {
                                index,
                                source: Box::new(mismatch(item)),
                            });
                        };
                        let Some(bit) = self.symbol_value(name) else {
                            return Err(PropertyError::Element {
                                index,
                                source: Box::new(PropertyError::UnknownSymbol { name: name.into() }),
                            });
                        };
                        mask |= bit;
                    }
                    Ok(Value::Int(mask))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::List => match value {
                Value::List(items) => {
                    let Some(element) = &self.element else {
                        return Err(list_mismatch());
                    };
                    let mut coerced = Vec::with_capacity(items.len());
                    for (index, item) in items.into_iter().enumerate() {
                        match element.coerce(item) {
                            Ok(item) => coerced.push(item),
                            Err(err) => {
                                return Err(PropertyError::Element {
                                    index,
                                    source: Box::new(err),
                                });
                            }
                        }
                    }
                    Ok(Value::List(coerced))
                }
                other => Err(mismatch(&other)),
            },
            PropertyKind::StringSet => match value {
                Value::StringSet(_) => Ok(value),
                Value::List(items) => {
                    let mut set = BTreeSet::new();
                    for (index, item) in items.iter().enumerate() {
                        let Some(s) = item.as_str() else {
                            return Err(PropertyError::Element {
                                index,
                                source: Box::new(mismatch(item)),
                            });
                        };
                        set.insert(String::from(s));
                    }
                    Ok(Value::StringSet(set))
                }
                other => Err(mismatch(&other)),
            },
        }
    }

    /// Coerces `value`, stores it, and notifies every observer with the new
    /// value in registration order.
    ///
    /// Notification is synchronous: observers run before this call returns,
    /// and may re-enter the property (or the engine) freely.
    pub fn set_value(&self, value: Value) -> Result<(), PropertyError> {
        let coerced = self.coerce(value)?;
        *self.value.borrow_mut() = coerced.clone();
        self.notify(&coerced);
        Ok(())
    }

    /// Registers a change observer. Observers are never unregistered; a
    /// property lives for the lifetime of its schema.
    pub fn observe(&self, observer: impl Fn(&Value) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Whether two properties hold the same effective value.
    ///
    /// Compares kinds and resolved values; two enum properties that reached
    /// the same stored value through different symbolic names are equal.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.kind == other.kind && *self.value.borrow() == *other.value.borrow()
    }

    fn symbol_value(&self, name: &str) -> Option<i64> {
        self.symbols.as_ref().and_then(|table| table.value_of(name))
    }

    fn notify(&self, value: &Value) {
        let mut index = 0;
        loop {
            let observer = {
                let observers = self.observers.borrow();
                match observers.get(index) {
                    Some(observer) => Rc::clone(observer),
                    None => break,
                }
            };
            observer(value);
            index += 1;
        }
    }
}

impl Clone for Property {
    /// A value-independent copy: metadata and the current value are
    /// duplicated, observers are not carried over.
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            flags: self.flags,
            numeric: self.numeric,
            symbols: self.symbols.clone(),
            element: self.element.clone(),
            value: RefCell::new(self.value.borrow().clone()),
            observers: RefCell::new(Vec::new()),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("icon", &self.icon)
            .field("flags", &self.flags)
            .field("numeric", &self.numeric)
            .field("symbols", &self.symbols)
            .field("element", &self.element)
            .field("value", &self.value)
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

/// Floors a float to an integer without `std`.
fn floor_to_i64(f: f64) -> i64 {
    #[expect(clippy::cast_possible_truncation, reason = "saturating cast is the lax contract")]
    let truncated = f as i64;
    if (truncated as f64) > f { truncated - 1 } else { truncated }
}

fn numeric_item(value: &Value) -> Option<f64> {
    value.as_float()
}

fn numeric_array<const N: usize>(items: &[Value]) -> Option<[f64; N]> {
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = numeric_item(item)?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;
    use alloc::vec;

    fn mode_symbols() -> SymbolTable {
        SymbolTable::from_pairs([("EDIT", 0), ("VIEW", 1), ("PLAY", 2)])
    }

    #[test]
    fn int_floors_floats() {
        let p = Property::int("count");
        p.set_value(Value::Float(2.9)).unwrap();
        assert_eq!(p.get_value(), Value::Int(2));
        p.set_value(Value::Float(-1.5)).unwrap();
        assert_eq!(p.get_value(), Value::Int(-2));
    }

    #[test]
    fn range_is_advisory_not_enforced() {
        let p = Property::int("count").with_range(0.0, 10.0);
        p.set_value(Value::Int(99)).unwrap();
        assert_eq!(p.get_value(), Value::Int(99));
        assert_eq!(p.numeric().unwrap().range, Some((0.0, 10.0)));
    }

    #[test]
    fn vec4_accepts_numeric_lists() {
        let p = Property::vec4("color");
        p.set_value(Value::List(vec![
            Value::Int(1),
            Value::Float(0.5),
            Value::Int(0),
            Value::Int(1),
        ]))
        .unwrap();
        assert_eq!(p.get_value(), Value::Vec4(DVec4::new(1.0, 0.5, 0.0, 1.0)));

        let err = p.set_value(Value::List(vec![Value::Int(1)])).unwrap_err();
        assert!(matches!(err, PropertyError::Kind { kind: PropertyKind::Vec4, .. }));
    }

    #[test]
    fn enum_accepts_names_and_raw_ints() {
        let p = Property::enumeration("mode", mode_symbols());
        assert_eq!(p.get_value(), Value::Int(0));
        p.set_value(Value::from("PLAY")).unwrap();
        assert_eq!(p.get_value(), Value::Int(2));
        p.set_value(Value::Int(7)).unwrap();
        assert_eq!(p.get_value(), Value::Int(7));
        let err = p.set_value(Value::from("NOPE")).unwrap_err();
        assert_eq!(err, PropertyError::UnknownSymbol { name: "NOPE".into() });
    }

    #[test]
    fn flag_lists_or_together() {
        let symbols = SymbolTable::from_pairs([("A", 0b001), ("B", 0b010), ("C", 0b100)]);
        let p = Property::bitflag("flags", symbols);
        p.set_value(Value::List(vec![Value::from("A"), Value::from("C")]))
            .unwrap();
        assert_eq!(p.get_value(), Value::Int(0b101));
    }

    #[test]
    fn list_property_delegates_to_element_template() {
        let p = Property::list("weights", Property::int("weight"));
        p.set_value(Value::List(vec![Value::Float(1.9), Value::Int(3)]))
            .unwrap();
        assert_eq!(p.get_value(), Value::List(vec![Value::Int(1), Value::Int(3)]));

        let err = p
            .set_value(Value::List(vec![Value::Int(1), Value::from("x")]))
            .unwrap_err();
        assert!(matches!(err, PropertyError::Element { index: 1, .. }));
    }

    #[test]
    fn observers_run_in_registration_order() {
        let p = Rc::new(Property::int("n"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        p.observe(move |_| s.borrow_mut().push("first"));
        let s = seen.clone();
        p.observe(move |_| s.borrow_mut().push("second"));

        p.set_value(Value::Int(1)).unwrap();
        assert_eq!(*seen.borrow(), ["first", "second"]);
    }

    #[test]
    fn observer_registered_mid_notification_is_reached() {
        let p = Rc::new(Property::int("n"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        let inner_p = p.clone();
        let inner_seen = seen.clone();
        p.observe(move |_| {
            s.borrow_mut().push("outer");
            if inner_seen.borrow().len() == 1 {
                let s = inner_seen.clone();
                inner_p.observe(move |_| s.borrow_mut().push("late"));
            }
        });

        p.set_value(Value::Int(1)).unwrap();
        assert_eq!(*seen.borrow(), ["outer", "late"]);
    }

    #[test]
    fn clone_is_value_independent() {
        let original = Property::vec2("pos").with_value(Value::from([1.0, 2.0]));
        let copy = original.clone();
        copy.set_value(Value::from([9.0, 9.0])).unwrap();
        assert_eq!(original.get_value(), Value::Vec2(DVec2::new(1.0, 2.0)));
        assert!(!original.equals(&copy));
    }

    #[test]
    fn equals_compares_resolved_values() {
        let a = Property::enumeration("mode", mode_symbols());
        let b = Property::enumeration("mode", mode_symbols());
        a.set_value(Value::from("VIEW")).unwrap();
        b.set_value(Value::Int(1)).unwrap();
        assert!(a.equals(&b));
    }

    #[test]
    #[should_panic(expected = "does not fit its kind")]
    fn bad_initial_value_panics() {
        let _ = Property::int("n").with_value(Value::from("nope"));
    }

    #[test]
    fn string_set_normalizes_lists() {
        let p = Property::string_set("tags");
        p.set_value(Value::List(vec![
            Value::from("b"),
            Value::from("a"),
            Value::from("b"),
        ]))
        .unwrap();
        let Value::StringSet(set) = p.get_value() else {
            panic!("expected a string set");
        };
        assert_eq!(set.len(), 2);
        assert!(set.contains("a") && set.contains("b"));
    }
}
