//! Structured records and the explicit record-to-triple contract.
//!
//! A [`Record`] is a flat mapping of field name to scalar value: one row of
//! tabular data or one JSON object from an API response, already parsed by a
//! source adapter. A [`FieldMap`] states which field(s) form the subject
//! identifier and which fields become predicates, making the contract
//! explicit and testable instead of implicit in ingestion order.

use serde::{Deserialize, Serialize};

/// A flat field-name → scalar-value mapping.
///
/// `serde_json::Map` keeps keys sorted, so iteration (and therefore triple
/// building) is deterministic for a given record.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Binds one record field to the predicate its value is stated under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// Field name in the record.
    pub field: String,
    /// Predicate local name the value is emitted under.
    pub predicate: String,
}

impl FieldBinding {
    /// Bind a field to a predicate name.
    pub fn new(field: impl Into<String>, predicate: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            predicate: predicate.into(),
        }
    }
}

/// Describes how one record shape maps onto triples.
///
/// The subject identifier is canonicalized from the values of
/// `subject_fields` joined with `_` (optionally under a fixed prefix such as
/// `reading`); each binding in `literals` emits one triple per value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Field(s) whose values form the subject identifier, in order.
    pub subject_fields: Vec<String>,
    /// Fixed prefix prepended to the subject's raw value before
    /// canonicalization (e.g. `reading` for sensor rows).
    pub subject_prefix: Option<String>,
    /// Fields emitted as literal-object triples.
    pub literals: Vec<FieldBinding>,
}

impl FieldMap {
    /// A field map keyed on a single subject field.
    pub fn keyed_on(subject_field: impl Into<String>) -> Self {
        Self {
            subject_fields: vec![subject_field.into()],
            subject_prefix: None,
            literals: Vec::new(),
        }
    }

    /// A field map keyed on a composite of subject fields.
    pub fn keyed_on_all(subject_fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            subject_fields: subject_fields.into_iter().map(Into::into).collect(),
            subject_prefix: None,
            literals: Vec::new(),
        }
    }

    /// Set a fixed prefix for the subject's raw value.
    pub fn subject_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.subject_prefix = Some(prefix.into());
        self
    }

    /// Bind a record field to a predicate name.
    pub fn bind(mut self, field: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.literals.push(FieldBinding::new(field, predicate));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_style_construction() {
        let map = FieldMap::keyed_on("product_description")
            .bind("recalling_firm", "recallingFirm")
            .bind("report_date", "eventDate");
        assert_eq!(map.subject_fields, vec!["product_description"]);
        assert_eq!(map.literals.len(), 2);
        assert_eq!(map.literals[0].predicate, "recallingFirm");
    }

    #[test]
    fn composite_subject_with_prefix() {
        let map = FieldMap::keyed_on_all(["batch", "timestamp"]).subject_prefix("reading");
        assert_eq!(map.subject_fields.len(), 2);
        assert_eq!(map.subject_prefix.as_deref(), Some("reading"));
    }

    #[test]
    fn field_map_round_trips_through_json() {
        let map = FieldMap::keyed_on("timestamp")
            .subject_prefix("reading")
            .bind("temperature", "temperature");
        let text = serde_json::to_string(&map).unwrap();
        let back: FieldMap = serde_json::from_str(&text).unwrap();
        assert_eq!(map, back);
    }
}
