//! Domain service for the movie catalog.
//!
//! [`CatalogService`] is the surface the HTTP handlers and the CLI call.
//! It takes plain values and returns either a record or a [`CatalogError`],
//! never a framework type.

use crate::db::StoreError;
use crate::domain::{ListFilters, MovieId};
use crate::models::movie::MovieRecord;
use serde::Serialize;
use thiserror::Error;

/// Domain errors for catalog operations.
///
/// Messages are meant for the caller: they name the id or external id
/// involved and never include storage internals, except for
/// [`CatalogError::Database`], which the API layer masks.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown movie id, or the provider reported no match for a title.
    #[error("{0}")]
    NotFound(String),

    /// A movie with the same external id is already catalogued.
    #[error("{0}")]
    Conflict(String),

    /// The metadata provider could not be reached or answered garbage.
    #[error("External API error: {service} - {message}")]
    Upstream { service: String, message: String },

    /// A create or delete affected no row.
    #[error("{0}")]
    StorageFailure(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogError {
    pub fn movie_not_found(id: MovieId) -> Self {
        Self::NotFound(format!("Movie with ID {id} not found"))
    }

    pub fn duplicate(external_id: &str) -> Self {
        Self::Conflict(format!("Movie with external ID {external_id} already exists"))
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Stable label for metrics and structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Upstream { .. } => "upstream",
            Self::StorageFailure(_) => "storage",
            Self::Database(_) => "database",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(external_id) => Self::duplicate(&external_id),
            StoreError::NotWritten => Self::StorageFailure("Error saving movie".to_string()),
            StoreError::Database(msg) => Self::Database(msg),
        }
    }
}

/// Confirmation returned by [`CatalogService::remove`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub id: MovieId,
    pub message: String,
}

impl Removal {
    #[must_use]
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            message: format!("Movie with ID {id} has been removed successfully"),
        }
    }
}

/// Domain service trait for catalog operations.
///
/// # Examples
///
/// ```rust,ignore
/// use cinedex::domain::MovieId;
/// use cinedex::services::{CatalogError, CatalogService};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn CatalogService>) -> Result<(), CatalogError> {
///     let movie = service.create("Inception", "Great movie").await?;
///     service.update(movie.id, "Watched twice").await?;
///     service.remove(MovieId::new(movie.id.value())).await?;
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Resolves `title` with the metadata provider and catalogues the match.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] if `title` is blank
    /// - [`CatalogError::NotFound`] if the provider has no match
    /// - [`CatalogError::Upstream`] if the provider call fails
    /// - [`CatalogError::Conflict`] if the provider's id is already catalogued
    /// - [`CatalogError::StorageFailure`] if the store wrote nothing
    async fn create(&self, title: &str, notes: &str) -> Result<MovieRecord, CatalogError>;

    /// Lists movies. Unknown sort input falls back to defaults; never rejects input.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] on connection failures.
    async fn list(
        &self,
        sort_by: Option<&str>,
        order: Option<&str>,
        filters: &ListFilters,
    ) -> Result<Vec<MovieRecord>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no movie has this id.
    async fn get(&self, id: MovieId) -> Result<MovieRecord, CatalogError>;

    /// Replaces the notes of a movie and returns the refreshed record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no movie has this id.
    async fn update(&self, id: MovieId, notes: &str) -> Result<MovieRecord, CatalogError>;

    /// Deletes a movie permanently.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if no movie has this id
    /// - [`CatalogError::StorageFailure`] if the store removed nothing
    async fn remove(&self, id: MovieId) -> Result<Removal, CatalogError>;
}
