//! Identifier canonicalization: stable graph-node identifiers from raw values.
//!
//! Every node in a graph is identified by an [`Identifier`]: a [`Namespace`]
//! prefix scoping it to one source domain, plus a local name derived from the
//! raw source value through a single substitution table. All call sites share
//! this one contract instead of per-source ad hoc cleanup.
//!
//! Canonicalization is deterministic and lossy: two raw values that differ
//! only in substituted characters collide. Callers that need uniqueness must
//! fold a disambiguating field (sequence counter, full timestamp) into the
//! raw value first.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::IdentError;

/// Characters that survive canonicalization unchanged.
fn is_legal(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.'
}

/// A prefix scoping identifiers to one source domain.
///
/// Prefixes are restricted to ASCII alphanumerics plus `-` and `.` so that the
/// rendered identifier `{prefix}_{local}` stays inside the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from a prefix, validating the identifier grammar.
    pub fn new(prefix: impl Into<String>) -> Result<Self, IdentError> {
        let prefix = prefix.into();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') {
            return Err(IdentError::InvalidNamespace { prefix });
        }
        Ok(Self(prefix))
    }

    /// The prefix string.
    pub fn prefix(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical, collision-resistant identifier for a graph node.
///
/// Rendered as `{namespace}_{local}`, e.g.
/// `sensor_reading_2025-01-01T00-00-00`. Identifiers compare and hash by
/// (namespace, local), so structurally identical identifiers are one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    namespace: String,
    local: String,
}

impl Identifier {
    /// Assemble an identifier from already-canonical parts.
    ///
    /// Errors if the local name contains characters the grammar forbids; use
    /// [`canonicalize`] for raw source values.
    pub fn from_parts(namespace: &Namespace, local: impl Into<String>) -> Result<Self, IdentError> {
        let local = local.into();
        if local.is_empty() || !local.chars().all(is_legal) {
            return Err(IdentError::InvalidLocal { local });
        }
        Ok(Self {
            namespace: namespace.prefix().to_string(),
            local,
        })
    }

    /// The namespace prefix this identifier belongs to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The local name within the namespace.
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.namespace, self.local)
    }
}

/// Canonicalize a raw source value into an [`Identifier`] under a namespace.
///
/// The raw value is NFC-normalized, then passed through the substitution
/// table: legal characters are kept, `:` becomes `-` (so timestamps stay
/// readable), and everything else (whitespace, control characters, symbols)
/// becomes `_`. The same raw value always yields the same identifier within
/// the same namespace.
///
/// Errors with [`IdentError::InvalidInput`] when the raw value is empty or
/// contains no legal character at all, since no identifier can be produced.
pub fn canonicalize(namespace: &Namespace, raw: &str) -> Result<Identifier, IdentError> {
    if raw.is_empty() {
        return Err(IdentError::InvalidInput { raw: raw.into() });
    }

    let mut local = String::with_capacity(raw.len());
    let mut any_legal = false;
    for ch in raw.nfc() {
        if is_legal(ch) {
            local.push(ch);
            any_legal = true;
        } else if ch == ':' {
            local.push('-');
        } else {
            local.push('_');
        }
    }

    if !any_legal {
        return Err(IdentError::InvalidInput { raw: raw.into() });
    }

    Ok(Identifier {
        namespace: namespace.prefix().to_string(),
        local,
    })
}
