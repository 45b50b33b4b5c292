//! Graph core: the triple data model, the deduplicated store, the Turtle
//! codec, cross-store entity linking, and the node/edge projection.
//!
//! A graph is a set of [`Triple`]s: (subject, predicate, object) statements
//! where subject and predicate are canonical [`Identifier`]s and the object
//! is a [`Term`], either another identifier (an edge to an entity) or a
//! [`Literal`] leaf value.

pub mod codec;
pub mod link;
pub mod project;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::ident::Identifier;

/// Classification of a literal's value space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    /// Free text (including timestamps, which stay in their source form).
    Text,
    /// A numeric value; serialized as `xsd:double`.
    Number,
}

/// A leaf value with no outgoing edges.
///
/// The lexical form is preserved verbatim (`"37.02"` stays `"37.02"`) so
/// stores round-trip through serialization without drift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    kind: LiteralKind,
}

impl Literal {
    /// A text literal.
    pub fn text(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Text,
        }
    }

    /// A numeric literal, keeping the given lexical form.
    pub fn number(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Number,
        }
    }

    /// The exact lexical form.
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The literal's kind.
    pub fn kind(&self) -> LiteralKind {
        self.kind
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexical)
    }
}

/// The object position of a triple: an entity edge or a literal leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// An edge to another entity.
    Id(Identifier),
    /// A leaf value.
    Lit(Literal),
}

impl Term {
    /// The identifier, if this term is an entity.
    pub fn as_id(&self) -> Option<&Identifier> {
        match self {
            Term::Id(id) => Some(id),
            Term::Lit(_) => None,
        }
    }

    /// The literal, if this term is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Id(_) => None,
            Term::Lit(lit) => Some(lit),
        }
    }
}

impl From<Identifier> for Term {
    fn from(id: Identifier) -> Self {
        Term::Id(id)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Lit(lit)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Id(id) => write!(f, "{id}"),
            Term::Lit(lit) => write!(f, "{:?}", lit.lexical()),
        }
    }
}

/// A (subject, predicate, object) statement, immutable once created.
///
/// Triples compare and hash structurally, so a store holding them behaves as
/// a set: no two structurally identical triples coexist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// The entity the statement is about.
    pub subject: Identifier,
    /// The relation the statement asserts.
    pub predicate: Identifier,
    /// The entity or literal value asserted.
    pub object: Term,
}

impl Triple {
    /// Create a new triple.
    pub fn new(subject: Identifier, predicate: Identifier, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}
