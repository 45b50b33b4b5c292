//! Triple builder: one structured record in, a set of canonical triples out.
//!
//! The builder is deterministic and referentially transparent: the same
//! record and field map always yield the same triples, and nothing outside
//! the arguments is read or mutated. Batch building exposes failures
//! per-record so callers choose between fail-fast and best-effort.

use serde_json::Value;

use crate::error::BuildError;
use crate::graph::{Literal, Triple};
use crate::ident::{Identifier, Namespace, canonicalize};
use crate::record::{FieldMap, Record};

/// Build the triples for one record under a namespace.
///
/// The subject is canonicalized from the `_`-joined values of the field
/// map's subject fields (under the optional subject prefix). Each literal
/// binding emits one triple `(subject, predicate, value)`; array values fan
/// out to one triple per element. Missing and null values are skipped;
/// no triple with an empty object is ever produced.
pub fn build(
    namespace: &Namespace,
    record: &Record,
    field_map: &FieldMap,
) -> Result<Vec<Triple>, BuildError> {
    let subject = subject_of(namespace, record, field_map)?;

    let mut triples = Vec::new();
    for binding in &field_map.literals {
        let Some(value) = record.get(&binding.field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let predicate = canonicalize(namespace, &binding.predicate)?;
        match value {
            Value::Array(items) => {
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    let literal = literal_of(&binding.field, item)?;
                    triples.push(Triple::new(subject.clone(), predicate.clone(), literal));
                }
            }
            scalar => {
                let literal = literal_of(&binding.field, scalar)?;
                triples.push(Triple::new(subject.clone(), predicate.clone(), literal));
            }
        }
    }
    Ok(triples)
}

/// Compute a record's subject identifier without emitting triples.
pub fn subject_of(
    namespace: &Namespace,
    record: &Record,
    field_map: &FieldMap,
) -> Result<Identifier, BuildError> {
    let mut parts = Vec::with_capacity(field_map.subject_fields.len());
    for field in &field_map.subject_fields {
        let value = record
            .get(field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| BuildError::MissingKeyField {
                field: field.clone(),
            })?;
        parts.push(scalar_text(field, value)?);
    }
    let joined = parts.join("_");
    let raw = match &field_map.subject_prefix {
        Some(prefix) => format!("{prefix}_{joined}"),
        None => joined,
    };
    Ok(canonicalize(namespace, &raw)?)
}

/// Render a scalar value as the raw text it contributes to an identifier.
fn scalar_text(field: &str, value: &Value) -> Result<String, BuildError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(BuildError::UnsupportedValue {
            field: field.into(),
            kind: kind_name(other).into(),
        }),
    }
}

fn literal_of(field: &str, value: &Value) -> Result<Literal, BuildError> {
    match value {
        Value::String(s) => Ok(Literal::text(s.clone())),
        Value::Number(n) => Ok(Literal::number(n.to_string())),
        Value::Bool(b) => Ok(Literal::text(b.to_string())),
        other => Err(BuildError::UnsupportedValue {
            field: field.into(),
            kind: kind_name(other).into(),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Batch building
// ---------------------------------------------------------------------------

/// How a batch reacts to a record that cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Abort on the first malformed record.
    FailFast,
    /// Skip malformed records and report them in the outcome.
    BestEffort,
}

/// A record the batch skipped, with the reason it was unusable.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Index of the record in the input slice.
    pub index: usize,
    /// Why no triples could be built from it.
    pub reason: BuildError,
}

/// Result of building a batch of records.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Triples from every record that built cleanly, in record order.
    pub triples: Vec<Triple>,
    /// Records skipped under [`BatchMode::BestEffort`]; empty when fail-fast.
    pub skipped: Vec<SkippedRecord>,
}

/// Build triples for a batch of records.
///
/// Under [`BatchMode::FailFast`] the first malformed record aborts the batch
/// with its error. Under [`BatchMode::BestEffort`] malformed records are
/// skipped, logged, and reported in the outcome, and every well-formed
/// record still contributes its triples.
pub fn build_batch(
    namespace: &Namespace,
    records: &[Record],
    field_map: &FieldMap,
    mode: BatchMode,
) -> Result<BatchOutcome, BuildError> {
    let mut outcome = BatchOutcome::default();
    for (index, record) in records.iter().enumerate() {
        match build(namespace, record, field_map) {
            Ok(triples) => outcome.triples.extend(triples),
            Err(reason) if mode == BatchMode::BestEffort => {
                tracing::debug!(index, %reason, "skipping malformed record");
                outcome.skipped.push(SkippedRecord { index, reason });
            }
            Err(reason) => return Err(reason),
        }
    }
    Ok(outcome)
}
