// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structs: named, ordered edge maps over the live object graph.
//!
//! A [`Struct`] describes one object type. Each member edge is either a
//! nested [`Struct`], a [`Property`] leaf bound to a data key, or a list
//! governed by a [`ListAdapter`]. Structs describe shape only; they hold no
//! live objects, which is why one struct can describe every instance of a
//! type at once.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use liana_property::Property;
use smallvec::SmallVec;

use crate::list::ListAdapter;

/// A shared handle to a [`Struct`].
pub type StructRef = Rc<Struct>;

/// The data-graph key hops a leaf edge covers.
///
/// Most leaves address a field directly under their owner and carry one
/// hop. A dotted key such as `data.angle1` carries several: the walk
/// descends intermediate objects without any schema for them.
pub type LeafKey = SmallVec<[Box<str>; 1]>;

/// One edge out of a [`Struct`].
#[derive(Clone)]
pub enum Member {
    /// A nested struct. Descending this edge refines the schema without
    /// moving in the live object graph.
    Struct(StructRef),
    /// A typed property leaf and the key hops that reach its datum.
    Leaf {
        /// The shared property describing (and caching) the leaf value.
        property: Rc<Property>,
        /// Key hops from the owning object to the datum.
        key: LeafKey,
    },
    /// A list edge and the adapter that operates it.
    List(Rc<dyn ListAdapter>),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct(s) => f.debug_tuple("Struct").field(&s.name()).finish(),
            Self::Leaf { property, key } => f
                .debug_struct("Leaf")
                .field("property", &property.name())
                .field("key", key)
                .finish(),
            Self::List(_) => f.debug_tuple("List").field(&"ListAdapter").finish(),
        }
    }
}

#[derive(Debug, Default)]
struct MemberTable {
    entries: Vec<(Box<str>, Member)>,
    index: HashMap<Box<str>, usize>,
}

impl MemberTable {
    fn upsert(&mut self, name: Box<str>, member: Member) {
        if let Some(&at) = self.index.get(&name) {
            self.entries[at].1 = member;
        } else {
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push((name, member));
        }
    }
}

/// An ordered, uniquely named edge map describing one object type.
///
/// Interior mutability lets builders extend a struct that is already shared
/// through [`StructRef`] handles; resolution never holds a member borrow
/// across a user callback.
#[derive(Debug)]
pub struct Struct {
    name: Box<str>,
    members: RefCell<MemberTable>,
}

impl Struct {
    /// Creates an empty struct.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            members: RefCell::new(MemberTable::default()),
        }
    }

    /// The struct's diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a member edge.
    ///
    /// # Panics
    ///
    /// Panics when `name` is already a member. Member names identify edges;
    /// redefining one silently would corrupt every path through it.
    pub fn insert(&self, name: impl Into<Box<str>>, member: Member) {
        let name = name.into();
        let mut members = self.members.borrow_mut();
        assert!(
            !members.index.contains_key(&name),
            "member `{name}` already registered on `{}`",
            self.name
        );
        members.upsert(name, member);
    }

    /// The member edge for a name, if present.
    ///
    /// Returns a clone so no internal borrow outlives the call.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<Member> {
        let members = self.members.borrow();
        let &at = members.index.get(name)?;
        Some(members.entries[at].1.clone())
    }

    /// Whether a member edge with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.borrow().index.contains_key(name)
    }

    /// A snapshot of all member edges in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Box<str>, Member)> {
        self.members.borrow().entries.clone()
    }

    /// Number of member edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.borrow().entries.len()
    }

    /// Whether the struct has no member edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.borrow().entries.is_empty()
    }

    /// Copies every member of `other` into this struct, replacing members
    /// that share a name and appending the rest in `other`'s order.
    ///
    /// Leaf edges are deep-copied: each receives a fresh [`Property`] with
    /// its own value cell and observer list, so instances composed from a
    /// shared base never alias state. Struct and list edges are shared,
    /// since they describe shape rather than hold values.
    pub fn merge_from(&self, other: &Self) {
        for (name, member) in other.entries() {
            let member = match member {
                Member::Leaf { property, key } => Member::Leaf {
                    property: Rc::new((*property).clone()),
                    key,
                },
                shared => shared,
            };
            self.members.borrow_mut().upsert(name, member);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use liana_property::Value;
    use smallvec::smallvec;

    fn leaf(name: &str) -> Member {
        Member::Leaf {
            property: Rc::new(Property::float(name)),
            key: smallvec![name.into()],
        }
    }

    #[test]
    fn members_keep_insertion_order() {
        let shape = Struct::new("Shape");
        shape.insert("width", leaf("width"));
        shape.insert("height", leaf("height"));
        shape.insert("angle", leaf("angle"));
        let names: Vec<String> = shape
            .entries()
            .into_iter()
            .map(|(name, _)| name.into())
            .collect();
        assert_eq!(names, ["width", "height", "angle"]);
        assert!(shape.contains("height"));
        assert!(shape.member("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_member_panics() {
        let shape = Struct::new("Shape");
        shape.insert("width", leaf("width"));
        shape.insert("width", leaf("width"));
    }

    #[test]
    fn merge_deep_copies_leaves() {
        let base = Struct::new("Base");
        base.insert("width", leaf("width"));

        let derived = Struct::new("Derived");
        derived.merge_from(&base);

        let Some(Member::Leaf { property, .. }) = derived.member("width") else {
            panic!("merged leaf missing");
        };
        property.set_value(Value::Float(5.0)).unwrap();

        let Some(Member::Leaf { property: original, .. }) = base.member("width") else {
            panic!("base leaf missing");
        };
        assert_ne!(original.get_value(), Value::Float(5.0));
    }

    #[test]
    fn merge_shares_struct_edges_and_replaces_by_name() {
        let nested = Rc::new(Struct::new("Transform"));
        let base = Struct::new("Base");
        base.insert("transform", Member::Struct(nested.clone()));
        base.insert("width", leaf("width"));

        let derived = Struct::new("Derived");
        derived.insert("width", leaf("old_width"));
        derived.merge_from(&base);

        assert_eq!(derived.len(), 2);
        let Some(Member::Struct(shared)) = derived.member("transform") else {
            panic!("struct edge missing");
        };
        assert!(Rc::ptr_eq(&shared, &nested));
        let Some(Member::Leaf { property, .. }) = derived.member("width") else {
            panic!("leaf missing");
        };
        assert_eq!(property.name(), "width");
    }
}
