// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path resolver.
//!
//! Resolution is a single pass: tokens are consumed one at a time while a
//! schema cursor and a live-object cursor advance in lock-step. No AST is
//! built; the grammar is small enough that parse and evaluation interleave.
//!
//! The walk keeps, per call, the current [`Struct`](liana_schema::Struct)
//! (schema cursor), the current live object and its predecessor, the active
//! leaf property, and the active list adapter. Each production updates some
//! subset of that state:
//!
//! 1. An identifier is looked up in the current struct. A struct edge
//!    descends the schema only; a leaf edge records the property and walks
//!    the edge's (possibly dotted) live key hops; a list edge records the
//!    adapter. An identifier with no schema edge resolves only if the active
//!    edge is a list and the identifier is exactly `active`, which pivots to
//!    the adapter's active element.
//! 2. `=` and `&` test the active enum/flag leaf against a literal and
//!    replace the value with the derived boolean. `&` always has bitmask
//!    semantics.
//! 3. `[` either performs the same test (enum/flag leaf) or pivots into the
//!    active list by integer or string key. An element's struct is
//!    re-derived from its runtime type at every pivot, so heterogeneous
//!    lists resolve correctly per element.
//!
//! Alongside the read cursors, the walk records a replayable write plan so
//! that [`set_value`] can descend the same route mutably after the immutable
//! resolve has validated it.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use liana_property::{Property, PropertyError, PropertyFlags, PropertyKind, Value};
use liana_schema::{
    AdapterError, DataObject, Field, Key, LeafKey, ListAdapter, Member, SchemaRegistry, StructRef,
};

use crate::lexer::{GrammarError, Lexer, Token, TokenKind};

/// Hard cap on tokens consumed by one resolution.
///
/// Chained bracket pivots keep the adapter as the active edge, so a
/// degenerate path can loop grammatically forever. Exceeding the cap is a
/// resolver defect, logged and answered with the partial result rather than
/// an error.
const TOKEN_BUDGET: usize = 1000;

/// How to treat missing live data during resolution.
///
/// Only missing-data failures are policy-controlled. Grammar errors, unknown
/// schema names, unknown enum values, and adapter capability errors always
/// propagate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Existence {
    /// A missing live-graph hop fails with [`PathError::MissingData`].
    #[default]
    Require,
    /// Missing hops leave a dead live cursor while the schema walk
    /// continues, so metadata is still returned. Used to drive disabled UI
    /// controls over data that does not exist yet.
    Ignore,
}

/// Errors raised by path resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum PathError {
    /// The lexer rejected the path text.
    Grammar(GrammarError),
    /// A token appeared where the grammar does not allow it.
    Unexpected {
        /// Byte offset of the offending token (or path length at end).
        pos: usize,
        /// Display text of what was found.
        found: Box<str>,
        /// What the resolver was looking for.
        expected: &'static str,
    },
    /// An identifier segment has no edge in the current struct.
    UnknownProperty {
        /// The segment that failed to resolve.
        segment: Box<str>,
    },
    /// A live-graph hop is absent.
    MissingData {
        /// The key that had no data.
        key: Key,
    },
    /// An `=`/`&`/`[...]` literal matches neither a symbolic nor a stored
    /// value of the active enum/flag property.
    UnknownEnumValue {
        /// The literal as written.
        literal: Box<str>,
        /// Name of the property it was tested against.
        property: Box<str>,
    },
    /// The context or a list element has no struct registered for its
    /// runtime type. A schema setup defect, independent of existence policy.
    Unregistered,
    /// A list adapter failed, including unimplemented capabilities.
    Adapter(AdapterError),
    /// A write value failed coercion to the resolved property's kind.
    Property(PropertyError),
    /// The path resolved, but not to a readable value.
    NotAValue,
    /// The path resolved, but not to a location the engine may write.
    NotWritable {
        /// Why the write was refused.
        reason: &'static str,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grammar(err) => write!(f, "{err}"),
            Self::Unexpected {
                pos,
                found,
                expected,
            } => write!(f, "expected {expected} at offset {pos}, found {found}"),
            Self::UnknownProperty { segment } => write!(f, "unknown property `{segment}`"),
            Self::MissingData { key } => write!(f, "no data for `{key}`"),
            Self::UnknownEnumValue { literal, property } => {
                write!(f, "`{literal}` is not a value of `{property}`")
            }
            Self::Unregistered => f.write_str("no struct is registered for the object's runtime type"),
            Self::Adapter(err) => write!(f, "{err}"),
            Self::Property(err) => write!(f, "{err}"),
            Self::NotAValue => f.write_str("path does not resolve to a value"),
            Self::NotWritable { reason } => write!(f, "path is not writable: {reason}"),
        }
    }
}

impl core::error::Error for PathError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Grammar(err) => Some(err),
            Self::Adapter(err) => Some(err),
            Self::Property(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GrammarError> for PathError {
    fn from(err: GrammarError) -> Self {
        Self::Grammar(err)
    }
}

/// Maps adapter failures in a data position: a missing element is missing
/// data, everything else (capability misuse, rejected writes) stays loud.
fn adapter_error(err: AdapterError) -> PathError {
    match err {
        AdapterError::Missing(key) => PathError::MissingData { key },
        other => PathError::Adapter(other),
    }
}

/// The structured outcome of one resolution.
///
/// A read-only snapshot: it is not re-validated if the underlying graph
/// mutates afterwards. `node` is the live object at the cursor (the pivoted
/// element for list paths); `owner` is the object directly holding the final
/// field and `key` is that field's name on it.
pub struct Resolution<'a> {
    /// The object the final production navigated from.
    pub parent: Option<&'a dyn DataObject>,
    /// The object directly holding the final field.
    pub owner: Option<&'a dyn DataObject>,
    /// The live object at the cursor.
    pub node: Option<&'a dyn DataObject>,
    /// The resolved value: a leaf snapshot, or the derived boolean of an
    /// enum/flag test. `None` for non-value locations and for missing data
    /// under [`Existence::Ignore`].
    pub value: Option<Value>,
    /// The final field or element key.
    pub key: Option<Key>,
    /// Schema cursor at the end of the walk.
    pub structure: Option<StructRef>,
    /// The active leaf property, when the path ended on or tested one.
    pub property: Option<Rc<Property>>,
    /// The active list adapter, when the path ended on a list edge or a
    /// pivoted element.
    pub list: Option<Rc<dyn ListAdapter>>,
    /// The symbolic name matched by an enum/flag test, for per-value icons
    /// and descriptions.
    pub subkey: Option<Box<str>>,
}

impl fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("parent", &self.parent.is_some())
            .field("owner", &self.owner.is_some())
            .field("node", &self.node.is_some())
            .field("value", &self.value)
            .field("key", &self.key)
            .field("structure", &self.structure.as_ref().map(|s| s.name()))
            .field("property", &self.property.as_ref().map(|p| p.name()))
            .field("list", &self.list.is_some())
            .field("subkey", &self.subkey)
            .finish()
    }
}

/// One mutable descent step of the write replay.
enum PlanStep {
    /// Descend into a nested object field.
    Field(Box<str>),
    /// Pivot into a list element by key.
    ListGet(Rc<dyn ListAdapter>, Key),
    /// Pivot into the active element.
    ListActive(Rc<dyn ListAdapter>),
}

/// What the walk most recently resolved, i.e. what a write would target.
enum Terminal {
    /// Nothing yet, or a consumed pending edge.
    Root,
    /// A struct edge. Not writable.
    Struct,
    /// A bare list edge. Not writable.
    List,
    /// A leaf edge and its full live key hop list.
    Leaf { hops: LeafKey },
    /// A keyed list element.
    Slot {
        adapter: Rc<dyn ListAdapter>,
        key: Key,
    },
    /// The active list element.
    ActiveSlot {
        adapter: Rc<dyn ListAdapter>,
        key: Option<Key>,
    },
    /// An enum/flag test over a leaf.
    Test {
        /// Bitmask semantics (flags and `&`) versus equality (enum `=`).
        masked: bool,
        /// The resolved literal.
        bits: i64,
        /// The tested leaf's live key hops, for writing the result back.
        hops: LeafKey,
        /// The live value the test read, when it existed.
        subject: Option<i64>,
    },
}

/// The mutable route recorded during an immutable resolve.
struct WritePlan {
    steps: Vec<PlanStep>,
    terminal: Terminal,
    property: Option<Rc<Property>>,
}

struct Walker<'a, 'p, 'r> {
    registry: &'r SchemaRegistry,
    path: &'p str,
    lexer: Lexer<'p>,
    peeked: Option<Option<Token<'p>>>,
    consumed: usize,
    /// A segment identifier is permitted here: path start or just after `.`.
    segment_ok: bool,
    existence: Existence,
    structure: Option<StructRef>,
    anchor: Option<&'a dyn DataObject>,
    parent: Option<&'a dyn DataObject>,
    owner: Option<&'a dyn DataObject>,
    property: Option<Rc<Property>>,
    list: Option<Rc<dyn ListAdapter>>,
    value: Option<Value>,
    key: Option<Key>,
    subkey: Option<Box<str>>,
    plan: Vec<PlanStep>,
    terminal: Terminal,
}

impl<'a, 'p, 'r> Walker<'a, 'p, 'r> {
    fn new(
        registry: &'r SchemaRegistry,
        root: StructRef,
        ctx: &'a dyn DataObject,
        path: &'p str,
        existence: Existence,
    ) -> Self {
        Self {
            registry,
            path,
            lexer: Lexer::new(path),
            peeked: None,
            consumed: 0,
            segment_ok: true,
            existence,
            structure: Some(root),
            anchor: Some(ctx),
            parent: None,
            owner: None,
            property: None,
            list: None,
            value: None,
            key: None,
            subkey: None,
            plan: Vec::new(),
            terminal: Terminal::Root,
        }
    }

    fn next(&mut self) -> Result<Option<Token<'p>>, PathError> {
        let token = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lexer.next_token()?,
        };
        if token.is_some() {
            self.consumed += 1;
        }
        Ok(token)
    }

    fn peek(&mut self) -> Result<Option<Token<'p>>, PathError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        Ok(self.peeked.unwrap_or(None))
    }

    fn unexpected(&self, token: Option<Token<'_>>, expected: &'static str) -> PathError {
        match token {
            Some(token) => PathError::Unexpected {
                pos: token.pos,
                found: format!("{}", token.kind).into(),
                expected,
            },
            None => PathError::Unexpected {
                pos: self.path.len(),
                found: "end of path".into(),
                expected,
            },
        }
    }

    fn run(mut self) -> Result<(Resolution<'a>, WritePlan), PathError> {
        loop {
            if self.consumed >= TOKEN_BUDGET {
                log::warn!(
                    "path `{}` exceeded the {TOKEN_BUDGET}-token budget; returning a partial resolution",
                    self.path
                );
                break;
            }
            let Some(token) = self.next()? else { break };
            match token.kind {
                TokenKind::Ident(name) => {
                    if !self.segment_ok {
                        return Err(self.unexpected(Some(token), "`.` before a path segment"));
                    }
                    self.segment_ok = false;
                    self.segment(name)?;
                }
                TokenKind::Dot => {
                    if self.segment_ok {
                        return Err(self.unexpected(Some(token), "a path segment"));
                    }
                    self.segment_ok = true;
                    let next = self.peek()?;
                    if !matches!(
                        next,
                        Some(Token {
                            kind: TokenKind::Ident(_),
                            ..
                        })
                    ) {
                        return Err(self.unexpected(next, "a path segment after `.`"));
                    }
                }
                TokenKind::Eq => self.test_production(false)?,
                TokenKind::Amp => self.test_production(true)?,
                TokenKind::LBracket => self.bracket(token.pos)?,
                TokenKind::RBracket | TokenKind::Num(_) | TokenKind::StrLit(_) => {
                    return Err(self.unexpected(Some(token), "a path segment"));
                }
            }
        }
        Ok(self.finish())
    }

    fn finish(self) -> (Resolution<'a>, WritePlan) {
        let resolution = Resolution {
            parent: self.parent,
            owner: self.owner,
            node: self.anchor.or(self.owner),
            value: self.value.clone(),
            key: self.key.clone(),
            structure: self.structure.clone(),
            property: self.property.clone(),
            list: self.list.clone(),
            subkey: self.subkey.clone(),
        };
        let plan = WritePlan {
            steps: self.plan,
            terminal: self.terminal,
            property: self.property,
        };
        (resolution, plan)
    }

    /// Folds the pending terminal into the replay plan when the walk moves
    /// past it.
    fn commit_pending(&mut self) {
        match mem::replace(&mut self.terminal, Terminal::Root) {
            Terminal::Leaf { hops } => {
                for hop in hops {
                    self.plan.push(PlanStep::Field(hop));
                }
            }
            Terminal::Slot { adapter, key } => self.plan.push(PlanStep::ListGet(adapter, key)),
            Terminal::ActiveSlot { adapter, .. } => self.plan.push(PlanStep::ListActive(adapter)),
            Terminal::Root | Terminal::Struct | Terminal::List | Terminal::Test { .. } => {}
        }
    }

    fn segment(&mut self, name: &str) -> Result<(), PathError> {
        self.commit_pending();
        let Some(structure) = self.structure.clone() else {
            // Dead schema cursor: an existence-ignoring walk past a hint-less
            // pivot consumes the rest of the path without validation.
            self.parent = self.anchor;
            self.owner = None;
            self.anchor = None;
            self.property = None;
            self.list = None;
            self.value = None;
            self.subkey = None;
            self.key = Some(Key::Name(name.into()));
            return Ok(());
        };
        match structure.member(name) {
            Some(Member::Struct(next)) => {
                self.parent = self.anchor;
                self.owner = self.anchor;
                self.structure = Some(next);
                self.property = None;
                self.list = None;
                self.value = None;
                self.subkey = None;
                self.key = Some(Key::Name(name.into()));
                self.terminal = Terminal::Struct;
                Ok(())
            }
            Some(Member::Leaf { property, key }) => self.leaf_segment(property, &key),
            Some(Member::List(adapter)) => {
                self.parent = self.anchor;
                self.owner = self.anchor;
                self.property = None;
                self.list = Some(adapter);
                self.value = None;
                self.subkey = None;
                self.key = Some(Key::Name(name.into()));
                self.terminal = Terminal::List;
                Ok(())
            }
            None => {
                if name == "active" {
                    if let Some(adapter) = self.list.clone() {
                        return self.active_pivot(adapter);
                    }
                }
                Err(PathError::UnknownProperty {
                    segment: name.into(),
                })
            }
        }
    }

    fn leaf_segment(&mut self, property: Rc<Property>, hops: &LeafKey) -> Result<(), PathError> {
        self.parent = self.anchor;
        self.owner = None;
        self.property = Some(property);
        self.list = None;
        self.value = None;
        self.subkey = None;
        self.key = hops.last().map(|hop| Key::Name(hop.clone()));
        let Some((last, init)) = hops.split_last() else {
            self.terminal = Terminal::Leaf { hops: hops.clone() };
            return Ok(());
        };
        let Some(mut cur) = self.anchor else {
            // No live object to read the hop from, e.g. the walk continued
            // past a plain-value leaf.
            let first = init.first().unwrap_or(last);
            return self.missing_hop(Key::Name(first.clone()), hops);
        };
        for hop in init {
            match cur.field(hop) {
                Field::Object(next) => cur = next,
                Field::Value(_) | Field::Missing => {
                    return self.missing_hop(Key::Name(hop.clone()), hops);
                }
            }
        }
        self.owner = Some(cur);
        match cur.field(last) {
            Field::Value(value) => {
                self.value = Some(value);
                self.anchor = None;
            }
            Field::Object(next) => {
                self.anchor = Some(next);
            }
            Field::Missing => return self.missing_hop(Key::Name(last.clone()), hops),
        }
        self.terminal = Terminal::Leaf { hops: hops.clone() };
        Ok(())
    }

    fn missing_hop(&mut self, key: Key, hops: &LeafKey) -> Result<(), PathError> {
        match self.existence {
            Existence::Require => Err(PathError::MissingData { key }),
            Existence::Ignore => {
                self.anchor = None;
                self.terminal = Terminal::Leaf { hops: hops.clone() };
                Ok(())
            }
        }
    }

    fn active_pivot(&mut self, adapter: Rc<dyn ListAdapter>) -> Result<(), PathError> {
        let old = self.anchor;
        self.parent = old;
        self.owner = old;
        self.property = None;
        self.value = None;
        self.subkey = None;
        let element = match old {
            Some(owner) => adapter.active(owner).map_err(PathError::Adapter)?,
            None => None,
        };
        match (old, element) {
            (Some(owner), Some(element)) => {
                // `key_of` is optional; without it the pivot still works but
                // the element stays anonymous in the result.
                let key = match adapter.key_of(owner, element) {
                    Ok(key) => Some(key),
                    Err(AdapterError::Unsupported(_)) => None,
                    Err(err) => return Err(PathError::Adapter(err)),
                };
                let structure = match &key {
                    Some(key) => adapter
                        .element_struct(owner, key, self.registry)
                        .map_err(PathError::Adapter)?,
                    None => self.registry.struct_for_object(element),
                };
                let Some(structure) = structure else {
                    return Err(PathError::Unregistered);
                };
                self.structure = Some(structure);
                self.anchor = Some(element);
                self.key = key.clone();
                self.terminal = Terminal::ActiveSlot { adapter, key };
            }
            _ => match self.existence {
                Existence::Require => {
                    return Err(PathError::MissingData {
                        key: Key::Name("active".into()),
                    });
                }
                Existence::Ignore => self.hollow_pivot(adapter, None),
            },
        }
        Ok(())
    }

    /// A pivot with no live element: continue schema-only through the
    /// adapter's static hint, or go dead without one.
    fn hollow_pivot(&mut self, adapter: Rc<dyn ListAdapter>, key: Option<Key>) {
        self.structure = adapter.element_struct_hint(self.registry);
        self.anchor = None;
        self.key = key.clone();
        self.terminal = match key {
            Some(key) => Terminal::Slot { adapter, key },
            None => Terminal::ActiveSlot { adapter, key: None },
        };
    }

    fn bracket(&mut self, pos: usize) -> Result<(), PathError> {
        if let Some(property) = self.property.clone() {
            if matches!(property.kind(), PropertyKind::Enum | PropertyKind::Flags) {
                let literal = self.next()?;
                let Some(literal) = literal else {
                    return Err(self.unexpected(None, "a symbol or number"));
                };
                self.apply_test(literal, false)?;
                return self.expect_rbracket();
            }
        }
        let Some(adapter) = self.list.clone() else {
            return Err(PathError::Unexpected {
                pos,
                found: "`[`".into(),
                expected: "a list or enum/flag edge before `[`",
            });
        };
        self.commit_pending();
        let key = match self.next()? {
            Some(Token {
                kind: TokenKind::Num(n),
                pos,
            }) => {
                let index = usize::try_from(n).map_err(|_| PathError::Unexpected {
                    pos,
                    found: format!("`{n}`").into(),
                    expected: "a non-negative index",
                })?;
                Key::Index(index)
            }
            Some(Token {
                kind: TokenKind::StrLit(name),
                ..
            }) => Key::Name(name.into()),
            other => return Err(self.unexpected(other, "a numeric or string index")),
        };
        self.pivot_to(adapter, key)?;
        self.expect_rbracket()
    }

    fn pivot_to(&mut self, adapter: Rc<dyn ListAdapter>, key: Key) -> Result<(), PathError> {
        let old = self.anchor;
        self.parent = old;
        self.owner = old;
        self.property = None;
        self.value = None;
        self.subkey = None;
        let element = match old {
            Some(owner) => match adapter.get(owner, &key) {
                Ok(element) => Some(element),
                Err(AdapterError::Missing(missing)) => match self.existence {
                    Existence::Require => {
                        return Err(PathError::MissingData { key: missing });
                    }
                    Existence::Ignore => None,
                },
                Err(err) => return Err(PathError::Adapter(err)),
            },
            None => None,
        };
        match (old, element) {
            (Some(owner), Some(element)) => {
                let structure = adapter
                    .element_struct(owner, &key, self.registry)
                    .map_err(PathError::Adapter)?;
                let Some(structure) = structure else {
                    return Err(PathError::Unregistered);
                };
                self.structure = Some(structure);
                self.anchor = Some(element);
                self.key = Some(key.clone());
                self.terminal = Terminal::Slot { adapter, key };
            }
            _ => match self.existence {
                Existence::Require => return Err(PathError::MissingData { key }),
                Existence::Ignore => self.hollow_pivot(adapter, Some(key)),
            },
        }
        Ok(())
    }

    fn test_production(&mut self, always_mask: bool) -> Result<(), PathError> {
        match self.next()? {
            Some(
                literal @ Token {
                    kind: TokenKind::Ident(_) | TokenKind::Num(_),
                    ..
                },
            ) => self.apply_test(literal, always_mask),
            other => Err(self.unexpected(other, "a symbol or number")),
        }
    }

    fn apply_test(&mut self, literal: Token<'_>, always_mask: bool) -> Result<(), PathError> {
        let Some(property) = self.property.clone() else {
            return Err(self.unexpected(
                Some(literal),
                "an enum or flag property before a value test",
            ));
        };
        let kind = property.kind();
        if !matches!(kind, PropertyKind::Enum | PropertyKind::Flags) {
            return Err(self.unexpected(
                Some(literal),
                "an enum or flag property before a value test",
            ));
        }
        let masked = always_mask || kind == PropertyKind::Flags;
        let symbols = property.symbols();

        // Symbolic lookup first; a number falls back to its literal value,
        // which enum equality additionally requires to be a stored value.
        let (bits, subkey): (i64, Option<Box<str>>) = match literal.kind {
            TokenKind::Ident(name) => match symbols.and_then(|table| table.value_of(name)) {
                Some(value) => (value, Some(name.into())),
                None => {
                    return Err(PathError::UnknownEnumValue {
                        literal: name.into(),
                        property: property.name().into(),
                    });
                }
            },
            TokenKind::Num(n) => {
                let spelled = format!("{n}");
                match symbols.and_then(|table| table.value_of(&spelled)) {
                    Some(value) => (value, Some(spelled.into())),
                    None => {
                        let primary = symbols
                            .and_then(|table| table.name_of(n))
                            .map(Box::from);
                        if !masked && primary.is_none() {
                            return Err(PathError::UnknownEnumValue {
                                literal: spelled.into(),
                                property: property.name().into(),
                            });
                        }
                        (n, primary)
                    }
                }
            }
            _ => return Err(self.unexpected(Some(literal), "a symbol or number")),
        };

        let subject = match &self.value {
            Some(value) => match value.as_int() {
                Some(subject) => Some(subject),
                None => {
                    return Err(self.unexpected(Some(literal), "a numeric test subject"));
                }
            },
            None => None,
        };
        let result = subject.map(|subject| {
            if masked {
                subject & bits != 0
            } else {
                subject == bits
            }
        });

        let hops = match mem::replace(&mut self.terminal, Terminal::Root) {
            Terminal::Leaf { hops } | Terminal::Test { hops, .. } => hops,
            _ => LeafKey::new(),
        };
        self.value = result.map(Value::Bool);
        self.subkey = subkey;
        self.list = None;
        self.terminal = Terminal::Test {
            masked,
            bits,
            hops,
            subject,
        };
        Ok(())
    }

    fn expect_rbracket(&mut self) -> Result<(), PathError> {
        match self.next()? {
            Some(Token {
                kind: TokenKind::RBracket,
                ..
            }) => Ok(()),
            other => Err(self.unexpected(other, "`]`")),
        }
    }
}

/// Resolves `path` against `ctx`, looking the root struct up from `ctx`'s
/// runtime type.
pub fn resolve_path<'a>(
    registry: &SchemaRegistry,
    ctx: &'a dyn DataObject,
    path: &str,
    existence: Existence,
) -> Result<Resolution<'a>, PathError> {
    let root = registry
        .struct_for_object(ctx)
        .ok_or(PathError::Unregistered)?;
    resolve_from(registry, root, ctx, path, existence)
}

/// Resolves `path` against `ctx` under an explicit root struct.
///
/// This is the pure core of the engine: a function of the schema, the live
/// graph, and the token stream, with no UI involvement.
pub fn resolve_from<'a>(
    registry: &SchemaRegistry,
    root: StructRef,
    ctx: &'a dyn DataObject,
    path: &str,
    existence: Existence,
) -> Result<Resolution<'a>, PathError> {
    let (resolution, _) = Walker::new(registry, root, ctx, path, existence).run()?;
    Ok(resolution)
}

/// Reads the value a path resolves to.
pub fn get_value(
    registry: &SchemaRegistry,
    ctx: &dyn DataObject,
    path: &str,
) -> Result<Value, PathError> {
    let resolution = resolve_path(registry, ctx, path, Existence::Require)?;
    resolution.value.ok_or(PathError::NotAValue)
}

/// Writes `value` to the location a path resolves to.
///
/// The path is first resolved immutably, recording a replayable descent
/// plan; the value is coerced through the resolved property; then the plan
/// is replayed mutably and the live graph written before the property stores
/// the value and notifies its observers. Re-entrant resolutions triggered by
/// observers therefore see the new live value.
pub fn set_value(
    registry: &SchemaRegistry,
    ctx: &mut dyn DataObject,
    path: &str,
    value: Value,
) -> Result<(), PathError> {
    let plan = {
        let shared: &dyn DataObject = &*ctx;
        let root = registry
            .struct_for_object(shared)
            .ok_or(PathError::Unregistered)?;
        let (_, plan) = Walker::new(registry, root, shared, path, Existence::Ignore).run()?;
        plan
    };
    apply_write(ctx, plan, value)
}

fn writable_property(property: Option<Rc<Property>>) -> Result<Rc<Property>, PathError> {
    let property = property.ok_or(PathError::NotWritable {
        reason: "path does not end at a writable field",
    })?;
    if property.flags().contains(PropertyFlags::READ_ONLY) {
        return Err(PathError::NotWritable {
            reason: "property is read-only",
        });
    }
    Ok(property)
}

fn apply_write(ctx: &mut dyn DataObject, plan: WritePlan, value: Value) -> Result<(), PathError> {
    match plan.terminal {
        Terminal::Leaf { hops } => {
            let property = writable_property(plan.property)?;
            let coerced = property.coerce(value).map_err(PathError::Property)?;
            let target = replay(ctx, &plan.steps)?;
            write_leaf(target, &hops, coerced.clone())?;
            property.set_value(coerced).map_err(PathError::Property)?;
            Ok(())
        }
        Terminal::Test {
            masked,
            bits,
            hops,
            subject,
        } => {
            let property = writable_property(plan.property)?;
            let Some(on) = value.as_bool() else {
                return Err(PathError::NotWritable {
                    reason: "test writes take a boolean",
                });
            };
            let Some(last_hop) = hops.last() else {
                return Err(PathError::NotWritable {
                    reason: "test has no backing field",
                });
            };
            let stored = if masked {
                let Some(current) = subject else {
                    return Err(PathError::MissingData {
                        key: Key::Name(last_hop.clone()),
                    });
                };
                if on { current | bits } else { current & !bits }
            } else if on {
                bits
            } else {
                return Err(PathError::NotWritable {
                    reason: "clearing an enum selection through a test is undefined",
                });
            };
            let target = replay(ctx, &plan.steps)?;
            write_leaf(target, &hops, Value::Int(stored))?;
            property
                .set_value(Value::Int(stored))
                .map_err(PathError::Property)?;
            Ok(())
        }
        Terminal::Slot { adapter, key } => {
            let owner = replay(ctx, &plan.steps)?;
            adapter.set(owner, &key, value).map_err(adapter_error)
        }
        Terminal::ActiveSlot { adapter, key } => {
            let Some(key) = key else {
                return Err(PathError::NotWritable {
                    reason: "active element has no key",
                });
            };
            let owner = replay(ctx, &plan.steps)?;
            adapter.set(owner, &key, value).map_err(adapter_error)
        }
        Terminal::Root | Terminal::Struct | Terminal::List => Err(PathError::NotWritable {
            reason: "path does not end at a writable location",
        }),
    }
}

fn replay<'m>(
    root: &'m mut dyn DataObject,
    steps: &[PlanStep],
) -> Result<&'m mut dyn DataObject, PathError> {
    let mut cur = root;
    for step in steps {
        cur = match step {
            PlanStep::Field(hop) => {
                if matches!(cur.field(hop), Field::Missing) {
                    return Err(PathError::MissingData {
                        key: Key::Name(hop.clone()),
                    });
                }
                match DataObject::field_mut(cur, hop) {
                    Some(next) => next,
                    None => {
                        return Err(PathError::NotWritable {
                            reason: "object refused mutable descent",
                        });
                    }
                }
            }
            PlanStep::ListGet(adapter, key) => adapter.get_mut(cur, key).map_err(adapter_error)?,
            PlanStep::ListActive(adapter) => {
                match adapter.active_mut(cur).map_err(adapter_error)? {
                    Some(element) => element,
                    None => {
                        return Err(PathError::MissingData {
                            key: Key::Name("active".into()),
                        });
                    }
                }
            }
        };
    }
    Ok(cur)
}

fn write_leaf(
    target: &mut dyn DataObject,
    hops: &[Box<str>],
    value: Value,
) -> Result<(), PathError> {
    let Some((last, init)) = hops.split_last() else {
        return Err(PathError::NotWritable {
            reason: "leaf has no data key",
        });
    };
    let mut cur = target;
    for hop in init {
        if matches!(cur.field(hop), Field::Missing) {
            return Err(PathError::MissingData {
                key: Key::Name(hop.clone()),
            });
        }
        cur = match DataObject::field_mut(cur, hop) {
            Some(next) => next,
            None => {
                return Err(PathError::NotWritable {
                    reason: "object refused mutable descent",
                });
            }
        };
    }
    if cur.set_field(last, value) {
        Ok(())
    } else {
        Err(PathError::NotWritable {
            reason: "object refused the write",
        })
    }
}
