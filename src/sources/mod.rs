//! Source adapters: thin collaborators that materialize records and hand
//! them to the core.
//!
//! Each adapter fetches (or generates) raw records, scrubs them, and builds
//! one [`GraphStore`](crate::graph::store::GraphStore) under its source
//! namespace. All network access lives here; the core never performs I/O.
//! Fetches retry with a linear backoff before giving up; retry policy never
//! leaks into the core.

pub mod compound;
pub mod recalls;
pub mod sensor;

use std::time::Duration;

use crate::builder::SkippedRecord;
use crate::config::FetchConfig;
use crate::error::SourceError;
use crate::graph::store::GraphStore;

/// A store assembled by a source adapter, with its batch report.
#[derive(Debug)]
pub struct AssembledSource {
    /// The built store.
    pub store: GraphStore,
    /// Number of records that contributed triples.
    pub records: usize,
    /// Records skipped during best-effort building, with reasons.
    pub skipped: Vec<SkippedRecord>,
}

/// GET a URL and parse the body as JSON, retrying on failure.
pub(crate) fn fetch_json(url: &str, fetch: &FetchConfig) -> Result<serde_json::Value, SourceError> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .build();

    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match agent.get(url).call() {
            Ok(response) => {
                return response
                    .into_json::<serde_json::Value>()
                    .map_err(|e| SourceError::Fetch {
                        url: url.into(),
                        message: format!("body is not valid JSON: {e}"),
                    });
            }
            Err(err) if attempt <= fetch.retries => {
                tracing::warn!(url, attempt, error = %err, "fetch failed, backing off");
                std::thread::sleep(Duration::from_millis(u64::from(attempt) * 500));
            }
            Err(err) => {
                return Err(SourceError::Fetch {
                    url: url.into(),
                    message: err.to_string(),
                });
            }
        }
    }
}

/// Shorthand for the "field is missing" shape error.
pub(crate) fn missing(context: &str, what: &str) -> SourceError {
    SourceError::UnexpectedShape {
        context: context.into(),
        message: format!("missing {what}"),
    }
}
