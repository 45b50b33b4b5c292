//! ChEMBL compound properties plus PubChem synonyms.
//!
//! Fetches one molecule record from ChEMBL, extracts its structure and bulk
//! properties, then asks PubChem for the top synonyms of the canonical
//! SMILES. The result is a single-subject store in the `chem` namespace:
//! one entity, its properties, and a fan of `hasSynonym` literals.

use serde_json::Value;

use crate::builder::build;
use crate::config::{CompoundConfig, FetchConfig};
use crate::error::SourceError;
use crate::graph::store::GraphStore;
use crate::ident::Namespace;
use crate::record::{FieldMap, Record};

use super::{AssembledSource, fetch_json, missing};

/// Namespace prefix for compound records.
pub const NAMESPACE: &str = "chem";

/// The record-to-triple contract for a compound record.
pub fn field_map() -> FieldMap {
    FieldMap::keyed_on("molecule")
        .bind("molecular_weight", "molecularWeight")
        .bind("alogp", "alogp")
        .bind("synonyms", "hasSynonym")
}

/// Fetch a compound and assemble its store.
pub fn fetch(config: &CompoundConfig, fetch: &FetchConfig) -> Result<AssembledSource, SourceError> {
    let molecule_url = format!("{}/molecule/{}.json", config.chembl_endpoint, config.molecule);
    tracing::info!(url = %molecule_url, "fetching compound record");
    let chembl = fetch_json(&molecule_url, fetch)?;

    let smiles = chembl
        .pointer("/molecule_structures/canonical_smiles")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("compound response", "canonical SMILES"))?;

    let mut record = Record::new();
    record.insert("molecule".into(), Value::String(config.molecule.clone()));
    if let Some(props) = chembl.get("molecule_properties") {
        if let Some(weight) = props.get("full_molweight").filter(|v| !v.is_null()) {
            record.insert("molecular_weight".into(), weight.clone());
        }
        if let Some(alogp) = props.get("alogp").filter(|v| !v.is_null()) {
            record.insert("alogp".into(), alogp.clone());
        }
    }

    let synonyms = fetch_synonyms(config, fetch, smiles)?;
    record.insert("synonyms".into(), Value::Array(synonyms));

    assemble(&config.molecule, &record)
}

/// Build the compound store from an already-materialized record.
pub fn assemble(molecule: &str, record: &Record) -> Result<AssembledSource, SourceError> {
    let namespace = Namespace::new(NAMESPACE)?;
    let triples = build(&namespace, record, &field_map())?;

    let mut store = GraphStore::new(format!("compound-{molecule}"), namespace);
    store.extend(triples);
    tracing::info!(molecule, triples = store.len(), "assembled compound store");
    Ok(AssembledSource {
        store,
        records: 1,
        skipped: Vec::new(),
    })
}

/// Top synonyms for a SMILES string, in PubChem's ranking order.
fn fetch_synonyms(
    config: &CompoundConfig,
    fetch: &FetchConfig,
    smiles: &str,
) -> Result<Vec<Value>, SourceError> {
    let url = format!(
        "{}/compound/smiles/{}/synonyms/JSON",
        config.pubchem_endpoint, smiles
    );
    let body = fetch_json(&url, fetch)?;
    let synonyms = body
        .pointer("/InformationList/Information/0/Synonym")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("synonym response", "synonym list"))?;
    Ok(synonyms
        .iter()
        .take(config.synonym_limit)
        .cloned()
        .collect())
}
