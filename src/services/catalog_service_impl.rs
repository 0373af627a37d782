//! Store-backed implementation of [`CatalogService`].

use std::sync::Arc;

use tracing::{info, warn};

use super::catalog_service::{CatalogError, CatalogService, Removal};
use super::ingestion::IngestionEngine;
use super::query_planner::QueryPlanner;
use crate::clients::MetadataProvider;
use crate::db::RecordStore;
use crate::domain::{ListFilters, MovieId};
use crate::models::movie::MovieRecord;

pub struct DefaultCatalogService {
    engine: IngestionEngine,
    planner: QueryPlanner,
    store: Arc<dyn RecordStore>,
}

impl DefaultCatalogService {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        store: Arc<dyn RecordStore>,
        planner: QueryPlanner,
    ) -> Self {
        Self {
            engine: IngestionEngine::new(provider, store.clone()),
            planner,
            store,
        }
    }

    /// Loads a movie or fails with [`CatalogError::NotFound`]; shared by every by-id operation.
    async fn fetch_or_fail(&self, id: MovieId) -> Result<MovieRecord, CatalogError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::movie_not_found(id))
    }
}

#[async_trait::async_trait]
impl CatalogService for DefaultCatalogService {
    async fn create(&self, title: &str, notes: &str) -> Result<MovieRecord, CatalogError> {
        self.engine.ingest(title, notes).await
    }

    async fn list(
        &self,
        sort_by: Option<&str>,
        order: Option<&str>,
        filters: &ListFilters,
    ) -> Result<Vec<MovieRecord>, CatalogError> {
        let plan = self.planner.plan(sort_by, order, filters);
        Ok(self.store.query(&plan.sort, &plan.filter).await?)
    }

    async fn get(&self, id: MovieId) -> Result<MovieRecord, CatalogError> {
        self.fetch_or_fail(id).await
    }

    async fn update(&self, id: MovieId, notes: &str) -> Result<MovieRecord, CatalogError> {
        self.fetch_or_fail(id).await?;

        if !self.store.update_notes(id, notes).await? {
            return Err(CatalogError::movie_not_found(id));
        }

        // Re-read so the caller sees what was actually persisted.
        let updated = self.fetch_or_fail(id).await?;
        info!(id = %id, "Movie notes updated");
        Ok(updated)
    }

    async fn remove(&self, id: MovieId) -> Result<Removal, CatalogError> {
        let movie = self.fetch_or_fail(id).await?;

        if !self.store.delete(id).await? {
            warn!(id = %id, "Delete matched no row");
            return Err(CatalogError::StorageFailure(format!(
                "Error deleting movie with ID {id}"
            )));
        }

        info!(id = %id, title = %movie.title, "Movie removed");
        Ok(Removal::new(id))
    }
}
