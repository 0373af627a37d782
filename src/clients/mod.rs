//! External metadata providers.
//!
//! [`MetadataProvider`] is the seam the ingestion path depends on; [`omdb`]
//! holds the production implementation.

pub mod omdb;

pub use omdb::OmdbClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw fields of a provider match, exactly as the provider reported them.
///
/// `released` and `rating` are left as text; turning them into typed values
/// (and handling the provider's `"N/A"` sentinel) is the ingestion engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMovie {
    pub title: String,
    pub released: Option<String>,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub external_id: String,
    pub rating: Option<String>,
}

/// Result of a title lookup that reached the provider.
///
/// Transport failures are not represented here; they are the `Err` arm of
/// [`MetadataProvider::lookup_by_title`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(ProviderMovie),
    /// The provider answered and explicitly reported no match.
    NotFound(String),
}

/// Async trait every movie-metadata backend implements.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short display name used in logs and error messages (e.g. `"OMDb"`).
    fn name(&self) -> &'static str;

    /// Looks up a single movie by its free-text title.
    ///
    /// `title` is expected to be already normalized (trimmed, single-spaced).
    ///
    /// # Errors
    ///
    /// Returns an error for network failures, timeouts, non-2xx responses and
    /// bodies that cannot be decoded. An explicit "no match" answer is
    /// `Ok(LookupOutcome::NotFound(..))`, never an error.
    async fn lookup_by_title(&self, title: &str) -> anyhow::Result<LookupOutcome>;
}
