//! # sema-tawy
//!
//! A knowledge graph assembly and linking engine. Heterogeneous record
//! sources (tabular sensor data, REST API responses) become canonical
//! subject-predicate-object triples, one deduplicated store per source;
//! independently built stores are then linked into one unified graph by
//! discovering shared entities across them.
//!
//! ## Architecture
//!
//! - **Identifier canonicalization** (`ident`): stable, collision-resistant
//!   node identifiers under per-source namespaces
//! - **Triple building** (`record`, `builder`): explicit field-map contract
//!   from records to triples, fail-fast or best-effort per batch
//! - **Graph core** (`graph`): deduplicated stores with pure merge, a Turtle
//!   codec via `oxigraph`, cross-store entity linking, and a petgraph-backed
//!   node/edge projection
//! - **Source adapters** (`sources`): OpenFDA recalls, ChEMBL/PubChem
//!   compounds, synthetic sensor series
//!
//! ## Library usage
//!
//! ```
//! use sema_tawy::graph::link::{LocalContainment, link};
//! use sema_tawy::graph::store::GraphStore;
//! use sema_tawy::graph::{Literal, Triple};
//! use sema_tawy::ident::{Namespace, canonicalize};
//!
//! let chem = Namespace::new("chem").unwrap();
//! let pubchem = Namespace::new("pubchem").unwrap();
//!
//! let mut compounds = GraphStore::new("compound", chem.clone());
//! compounds.insert(Triple::new(
//!     canonicalize(&chem, "CHEMBL25").unwrap(),
//!     canonicalize(&chem, "alogp").unwrap(),
//!     Literal::number("1.31"),
//! ));
//!
//! let mut synonyms = GraphStore::new("synonyms", pubchem.clone());
//! synonyms.insert(Triple::new(
//!     canonicalize(&pubchem, "CHEMBL25_synonym_1").unwrap(),
//!     canonicalize(&pubchem, "label").unwrap(),
//!     Literal::text("aspirin"),
//! ));
//!
//! let bridges = link(&[&compounds, &synonyms], &LocalContainment);
//! let mut unified = compounds.merge(&synonyms);
//! unified.extend(bridges);
//! assert_eq!(unified.len(), 3);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod ident;
pub mod record;
pub mod sources;
