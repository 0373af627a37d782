//! Title ingestion: resolve a title with the metadata provider, normalize
//! the match into a storable record and persist it once per external id.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::clients::{LookupOutcome, MetadataProvider, ProviderMovie};
use crate::constants::NOT_AVAILABLE;
use crate::constants::catalog::RATING_FALLBACK;
use crate::constants::metrics::{INGEST_FAILURES, MOVIES_INGESTED};
use crate::db::RecordStore;
use crate::models::movie::{MovieRecord, NewMovie};

use super::catalog_service::CatalogError;

/// Release-date layouts seen in provider payloads, tried in order.
const RELEASE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d %b %Y", "%b %d, %Y"];

pub struct IngestionEngine {
    provider: Arc<dyn MetadataProvider>,
    store: Arc<dyn RecordStore>,
}

impl IngestionEngine {
    pub fn new(provider: Arc<dyn MetadataProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self { provider, store }
    }

    /// Looks `title` up and stores the match with `notes` attached.
    ///
    /// The provider is queried at most once and nothing is written unless the
    /// provider reported a match whose external id is not yet catalogued.
    #[instrument(skip(self, notes), fields(provider = self.provider.name()))]
    pub async fn ingest(&self, title: &str, notes: &str) -> Result<MovieRecord, CatalogError> {
        let result = self.try_ingest(title, notes).await;

        match &result {
            Ok(_) => metrics::counter!(MOVIES_INGESTED).increment(1),
            Err(e) => metrics::counter!(INGEST_FAILURES, "reason" => e.kind()).increment(1),
        }

        result
    }

    async fn try_ingest(&self, title: &str, notes: &str) -> Result<MovieRecord, CatalogError> {
        let title = normalize_title(title);
        if title.is_empty() {
            return Err(CatalogError::InvalidInput(
                "Title must not be empty".to_string(),
            ));
        }

        let outcome = self
            .provider
            .lookup_by_title(&title)
            .await
            .map_err(|e| CatalogError::upstream(self.provider.name(), format!("{e:#}")))?;

        let found = match outcome {
            LookupOutcome::Found(movie) => movie,
            LookupOutcome::NotFound(reason) => {
                info!(title = %title, reason = %reason, "Provider reported no match");
                return Err(CatalogError::NotFound(format!("Error: {reason}")));
            }
        };

        if let Some(existing) = self.store.find_by_external_id(&found.external_id).await? {
            warn!(
                external_id = %found.external_id,
                id = %existing.id,
                "Movie already catalogued"
            );
            return Err(CatalogError::duplicate(&found.external_id));
        }

        let record = self.store.create(normalize_movie(found, notes)).await?;

        info!(
            id = %record.id,
            external_id = %record.external_id,
            title = %record.title,
            "Movie ingested"
        );
        Ok(record)
    }
}

/// Trims and collapses runs of whitespace to a single space.
#[must_use]
pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Provider release text to a date. `"N/A"`, blank and unparseable values are absent.
#[must_use]
pub fn normalize_released(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)?;

    let parsed = RELEASE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok());

    if parsed.is_none() {
        warn!(released = %raw, "Unrecognized release date, storing as absent");
    }
    parsed
}

/// Provider rating text to a number. `"N/A"`, garbage and non-finite values become 0.0.
#[must_use]
pub fn normalize_rating(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| *s != NOT_AVAILABLE)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|r| r.is_finite())
        .unwrap_or(RATING_FALLBACK)
}

/// Builds the record to store from a provider match. Text credits are kept verbatim.
#[must_use]
pub fn normalize_movie(found: ProviderMovie, notes: &str) -> NewMovie {
    NewMovie {
        released: normalize_released(found.released.as_deref()),
        rating: normalize_rating(found.rating.as_deref()),
        title: found.title,
        notes: notes.to_string(),
        external_id: found.external_id,
        director: found.director,
        writer: found.writer,
        actors: found.actors,
    }
}
