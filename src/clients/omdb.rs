use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{LookupOutcome, MetadataProvider, ProviderMovie};
use crate::config::OmdbConfig;
use crate::constants::provider::{DEFAULT_NOT_FOUND_REASON, OMDB_SERVICE};

/// OMDb's title-lookup payload. Every field except `Response` is optional
/// because a negative answer carries only `Response` and `Error`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    error: Option<String>,
    title: Option<String>,
    released: Option<String>,
    director: Option<String>,
    writer: Option<String>,
    actors: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

impl OmdbResponse {
    fn into_outcome(self) -> Result<LookupOutcome> {
        if !self.response.eq_ignore_ascii_case("true") {
            let reason = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NOT_FOUND_REASON.to_string());
            return Ok(LookupOutcome::NotFound(reason));
        }

        let external_id = self
            .imdb_id
            .filter(|id| !id.trim().is_empty())
            .context("OMDb reported a match without an imdbID")?;

        Ok(LookupOutcome::Found(ProviderMovie {
            title: self.title.unwrap_or_default(),
            released: self.released,
            director: self.director.unwrap_or_default(),
            writer: self.writer.unwrap_or_default(),
            actors: self.actors.unwrap_or_default(),
            external_id,
            rating: self.imdb_rating,
        }))
    }
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &OmdbConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("cinedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build OMDb HTTP client")?;

        Ok(Self::new(client, &config.base_url, &config.api_key))
    }

    fn lookup_url(&self, title: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}apikey={}&t={}",
            self.base_url,
            separator,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    fn name(&self) -> &'static str {
        OMDB_SERVICE
    }

    async fn lookup_by_title(&self, title: &str) -> Result<LookupOutcome> {
        let url = self.lookup_url(title);
        debug!(title = %title, "OMDb lookup");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("OMDb request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("OMDb API error: {} - {}", status, body));
        }

        let payload: OmdbResponse = response
            .json()
            .await
            .context("Failed to parse OMDb response")?;

        payload.into_outcome()
    }
}
