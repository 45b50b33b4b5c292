//! OpenFDA drug-enforcement recalls: public reference records.
//!
//! Fetches the latest recall events, scrubs control characters out of the
//! free-text fields, and builds a store in the `fda` namespace keyed on the
//! product description. Recall feeds are messy, so records missing the
//! product description are skipped and reported rather than fatal.

use regex::Regex;
use serde_json::Value;

use crate::builder::{BatchMode, build_batch};
use crate::config::{FetchConfig, RecallsConfig};
use crate::error::SourceError;
use crate::graph::store::GraphStore;
use crate::ident::Namespace;
use crate::record::{FieldMap, Record};

use super::{AssembledSource, fetch_json, missing};

/// Namespace prefix for recall records.
pub const NAMESPACE: &str = "fda";

/// The record-to-triple contract for recall events.
pub fn field_map() -> FieldMap {
    FieldMap::keyed_on("product_description")
        .bind("recalling_firm", "recallingFirm")
        .bind("report_date", "eventDate")
}

/// Fetch recall events and assemble the `recalls` store.
pub fn fetch(config: &RecallsConfig, fetch: &FetchConfig) -> Result<AssembledSource, SourceError> {
    let url = format!("{}?limit={}", config.endpoint, config.limit);
    tracing::info!(%url, "fetching recall events");
    let body = fetch_json(&url, fetch)?;

    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("recall response", "results array"))?;

    let records: Vec<Record> = results
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| scrub(obj.clone()))
        .collect();

    assemble(&records)
}

/// Build the recalls store from already-materialized records.
///
/// Split out from [`fetch`] so callers with offline record dumps reuse the
/// same scrubbing-free path the tests do.
pub fn assemble(records: &[Record]) -> Result<AssembledSource, SourceError> {
    let namespace = Namespace::new(NAMESPACE)?;
    let outcome = build_batch(&namespace, records, &field_map(), BatchMode::BestEffort)?;

    let mut store = GraphStore::new("recalls", namespace);
    store.extend(outcome.triples);
    tracing::info!(
        records = records.len(),
        skipped = outcome.skipped.len(),
        triples = store.len(),
        "assembled recall store"
    );
    Ok(AssembledSource {
        store,
        records: records.len() - outcome.skipped.len(),
        skipped: outcome.skipped,
    })
}

/// Replace control characters in string fields with spaces.
///
/// Recall descriptions occasionally embed raw control bytes that would
/// otherwise be substituted into identifier underscores one-by-one.
fn scrub(mut record: Record) -> Record {
    let control = Regex::new(r"[\x00-\x1F\x7F]").expect("control character class is valid");
    for value in record.values_mut() {
        if let Value::String(s) = value {
            if control.is_match(s) {
                *value = Value::String(control.replace_all(s, " ").into_owned());
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn assembles_two_triples_per_complete_record() {
        let records = vec![record(json!({
            "product_description": "Widget A",
            "recalling_firm": "Acme",
            "report_date": "2024-05-01",
        }))];
        let assembled = assemble(&records).unwrap();
        assert_eq!(assembled.store.len(), 2);
        assert_eq!(assembled.records, 1);
        assert!(assembled.skipped.is_empty());
        assert_eq!(assembled.store.namespace().prefix(), "fda");
    }

    #[test]
    fn records_without_a_product_description_are_skipped() {
        let records = vec![
            record(json!({
                "product_description": "Widget A",
                "recalling_firm": "Acme",
            })),
            record(json!({ "recalling_firm": "No Subject Inc" })),
        ];
        let assembled = assemble(&records).unwrap();
        assert_eq!(assembled.records, 1);
        assert_eq!(assembled.skipped.len(), 1);
        assert_eq!(assembled.skipped[0].index, 1);
    }

    #[test]
    fn scrub_replaces_control_characters() {
        let scrubbed = scrub(record(json!({
            "product_description": "Widget\u{0007}A",
            "count": 3,
        })));
        assert_eq!(scrubbed["product_description"], json!("Widget A"));
        assert_eq!(scrubbed["count"], json!(3));
    }

    #[test]
    fn field_map_matches_the_recall_contract() {
        let map = field_map();
        assert_eq!(map.subject_fields, vec!["product_description"]);
        let predicates: Vec<&str> = map.literals.iter().map(|b| b.predicate.as_str()).collect();
        assert_eq!(predicates, vec!["recallingFirm", "eventDate"]);
    }
}
