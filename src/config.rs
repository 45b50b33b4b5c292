//! Engine configuration: TOML-backed settings for the source adapters.
//!
//! Every field has a default matching the public endpoints and series shape
//! the engine ships with, so an empty config file (or none at all) is
//! valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// HTTP behavior shared by all fetching adapters.
    pub fetch: FetchConfig,
    /// OpenFDA recall source.
    pub recalls: RecallsConfig,
    /// ChEMBL/PubChem compound source.
    pub compound: CompoundConfig,
    /// Synthetic sensor series source.
    pub sensor: SensorConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// HTTP fetch behavior: timeout and bounded retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first failed attempt.
    pub retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            retries: 3,
        }
    }
}

/// OpenFDA drug-enforcement source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallsConfig {
    /// Enforcement endpoint URL.
    pub endpoint: String,
    /// Number of recall events to request.
    pub limit: usize,
}

impl Default for RecallsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.fda.gov/drug/enforcement.json".into(),
            limit: 50,
        }
    }
}

/// ChEMBL/PubChem compound source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundConfig {
    /// ChEMBL REST API base.
    pub chembl_endpoint: String,
    /// PubChem PUG REST API base.
    pub pubchem_endpoint: String,
    /// ChEMBL molecule identifier to fetch.
    pub molecule: String,
    /// How many PubChem synonyms to keep.
    pub synonym_limit: usize,
}

impl Default for CompoundConfig {
    fn default() -> Self {
        Self {
            chembl_endpoint: "https://www.ebi.ac.uk/chembl/api/data".into(),
            pubchem_endpoint: "https://pubchem.ncbi.nlm.nih.gov/rest/pug".into(),
            molecule: "CHEMBL25".into(),
            synonym_limit: 5,
        }
    }
}

/// Synthetic sensor series settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// First reading timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub start: String,
    /// Number of hourly readings.
    pub readings: u32,
    /// Temperature setpoint in °C.
    pub base_temperature: f64,
    /// Half-width of the temperature band.
    pub temperature_jitter: f64,
    /// pH setpoint.
    pub base_ph: f64,
    /// Half-width of the pH band.
    pub ph_jitter: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            start: "2025-01-01T00:00:00".into(),
            readings: 48,
            base_temperature: 37.0,
            temperature_jitter: 0.5,
            base_ph: 7.0,
            ph_jitter: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_sources() {
        let config = EngineConfig::default();
        assert_eq!(config.recalls.limit, 50);
        assert_eq!(config.compound.molecule, "CHEMBL25");
        assert_eq!(config.compound.synonym_limit, 5);
        assert_eq!(config.sensor.readings, 48);
        assert_eq!(config.fetch.retries, 3);
    }

    #[test]
    fn partial_toml_overrides_only_what_it_names() {
        let config: EngineConfig = toml::from_str(
            r#"
            [compound]
            molecule = "CHEMBL1201"

            [sensor]
            readings = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.compound.molecule, "CHEMBL1201");
        assert_eq!(config.sensor.readings, 12);
        assert_eq!(config.recalls.limit, 50);
    }

    #[test]
    fn empty_toml_is_valid() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.sensor.base_temperature, 37.0);
    }

    #[test]
    fn load_reports_missing_files() {
        let err = EngineConfig::load(Path::new("/nonexistent/sema.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
