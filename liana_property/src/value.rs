// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed value vocabulary exchanged between properties and live data.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use glam::{DMat4, DQuat, DVec2, DVec3, DVec4};

/// A value of one of the closed property kinds.
///
/// `Value` is the exchange representation used everywhere a field value
/// crosses the engine boundary: live-object reads, property storage, change
/// notifications, and writes. Enum and flag properties store their resolved
/// numeric value as [`Value::Int`]; the symbolic names live in the property's
/// symbol table, not in the value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A string.
    String(String),
    /// A 2-component double vector.
    Vec2(DVec2),
    /// A 3-component double vector.
    Vec3(DVec3),
    /// A 4-component double vector.
    Vec4(DVec4),
    /// A quaternion (x, y, z, w).
    Quat(DQuat),
    /// A 4x4 column-major double matrix.
    Mat4(DMat4),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A set of unique strings.
    StringSet(BTreeSet<String>),
}

impl Value {
    /// The value as a boolean, if it is one.
    ///
    /// Integers are accepted as truthy/falsy for the benefit of flag-test
    /// writes driven by generic UI.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float, widening integers.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The value as a string slice, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// A short name for the value's kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Quat(_) => "quat",
            Self::Mat4(_) => "mat4",
            Self::List(_) => "list",
            Self::StringSet(_) => "string set",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(String::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<DVec2> for Value {
    fn from(v: DVec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<DVec3> for Value {
    fn from(v: DVec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<DVec4> for Value {
    fn from(v: DVec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<DQuat> for Value {
    fn from(v: DQuat) -> Self {
        Self::Quat(v)
    }
}

impl From<DMat4> for Value {
    fn from(v: DMat4) -> Self {
        Self::Mat4(v)
    }
}

impl From<[f64; 2]> for Value {
    fn from(v: [f64; 2]) -> Self {
        Self::Vec2(DVec2::from_array(v))
    }
}

impl From<[f64; 3]> for Value {
    fn from(v: [f64; 3]) -> Self {
        Self::Vec3(DVec3::from_array(v))
    }
}

impl From<[f64; 4]> for Value {
    fn from(v: [f64; 4]) -> Self {
        Self::Vec4(DVec4::from_array(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}
