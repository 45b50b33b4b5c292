//! Synthetic batch sensor series: in-house process data.
//!
//! Generates an hourly series of reactor readings (temperature around a
//! setpoint, pH around neutral) and builds a store in the `sensor`
//! namespace. Each reading's subject is `reading_{timestamp}`, with the
//! timestamp's colons swapped for hyphens by the canonicalizer, so one
//! subject per instant and no collisions within a run.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use serde_json::{Number, Value};

use crate::builder::{BatchMode, build_batch};
use crate::config::SensorConfig;
use crate::error::SourceError;
use crate::graph::store::GraphStore;
use crate::ident::Namespace;
use crate::record::{FieldMap, Record};

use super::AssembledSource;

/// Namespace prefix for sensor readings.
pub const NAMESPACE: &str = "sensor";

/// Timestamp layout used in records and subject identifiers.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The record-to-triple contract for one reading.
pub fn field_map() -> FieldMap {
    FieldMap::keyed_on("timestamp")
        .subject_prefix("reading")
        .bind("timestamp", "timestamp")
        .bind("temperature", "temperature")
        .bind("pH", "pH")
}

/// Generate a synthetic series and assemble the `sensor` store.
pub fn generate(config: &SensorConfig) -> Result<AssembledSource, SourceError> {
    let start = NaiveDateTime::parse_from_str(&config.start, TIMESTAMP_FORMAT).map_err(|e| {
        SourceError::Series {
            message: format!("bad start timestamp {:?}: {e}", config.start),
        }
    })?;
    if config.readings == 0 {
        return Err(SourceError::Series {
            message: "reading count must be at least 1".into(),
        });
    }

    let mut rng = rand::thread_rng();
    let records: Vec<Record> = (0..config.readings)
        .map(|i| {
            let ts = start + Duration::hours(i as i64);
            let mut record = Record::new();
            record.insert(
                "timestamp".into(),
                Value::String(ts.format(TIMESTAMP_FORMAT).to_string()),
            );
            record.insert(
                "temperature".into(),
                number(jitter(&mut rng, config.base_temperature, config.temperature_jitter)),
            );
            record.insert(
                "pH".into(),
                number(jitter(&mut rng, config.base_ph, config.ph_jitter)),
            );
            record
        })
        .collect();

    assemble(&records)
}

/// Build the sensor store from already-materialized reading records.
pub fn assemble(records: &[Record]) -> Result<AssembledSource, SourceError> {
    let namespace = Namespace::new(NAMESPACE)?;
    let outcome = build_batch(&namespace, records, &field_map(), BatchMode::FailFast)?;

    let mut store = GraphStore::new("sensor", namespace);
    store.extend(outcome.triples);
    tracing::info!(
        readings = records.len(),
        triples = store.len(),
        "assembled sensor store"
    );
    Ok(AssembledSource {
        store,
        records: records.len(),
        skipped: Vec::new(),
    })
}

/// A uniform sample within `base ± spread`, rounded to two decimals.
fn jitter(rng: &mut impl Rng, base: f64, spread: f64) -> f64 {
    let value = if spread > 0.0 {
        rng.gen_range(base - spread..=base + spread)
    } else {
        base
    };
    (value * 100.0).round() / 100.0
}

fn number(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}
