use crate::domain::{FilterSpec, MovieId, SortSpec};
use crate::models::movie::{MovieRecord, NewMovie};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Failures reported by a [`RecordStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The UNIQUE constraint on `external_id` rejected the write.
    #[error("Duplicate external ID: {0}")]
    Duplicate(String),

    #[error("No record was written")]
    NotWritten,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted => Self::NotWritten,
            other => Self::Database(other.to_string()),
        }
    }
}

/// Persistence port for catalogued movies.
///
/// The catalog services only talk to storage through this trait, so tests
/// can substitute an in-memory double and count writes.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a new movie and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Duplicate`] if another record already has the same `external_id`
    /// - [`StoreError::NotWritten`] if the backend reports no row was inserted
    async fn create(&self, movie: NewMovie) -> Result<MovieRecord, StoreError>;

    async fn find_by_external_id(&self, external_id: &str)
    -> Result<Option<MovieRecord>, StoreError>;

    async fn find_by_id(&self, id: MovieId) -> Result<Option<MovieRecord>, StoreError>;

    /// Overwrites `notes` only. Returns whether a row matched.
    async fn update_notes(&self, id: MovieId, notes: &str) -> Result<bool, StoreError>;

    /// Hard-deletes a movie. Returns whether a row was removed.
    async fn delete(&self, id: MovieId) -> Result<bool, StoreError>;

    /// Returns every record matching `filter`, ordered by `sort`.
    async fn query(
        &self,
        sort: &SortSpec,
        filter: &FilterSpec,
    ) -> Result<Vec<MovieRecord>, StoreError>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Opens a single-connection in-memory database with migrations applied.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }
}

#[async_trait::async_trait]
impl RecordStore for Store {
    async fn create(&self, movie: NewMovie) -> Result<MovieRecord, StoreError> {
        self.movie_repo().create(movie).await
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<MovieRecord>, StoreError> {
        self.movie_repo().find_by_external_id(external_id).await
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<MovieRecord>, StoreError> {
        self.movie_repo().get(id).await
    }

    async fn update_notes(&self, id: MovieId, notes: &str) -> Result<bool, StoreError> {
        self.movie_repo().update_notes(id, notes).await
    }

    async fn delete(&self, id: MovieId) -> Result<bool, StoreError> {
        self.movie_repo().delete(id).await
    }

    async fn query(
        &self,
        sort: &SortSpec,
        filter: &FilterSpec,
    ) -> Result<Vec<MovieRecord>, StoreError> {
        self.movie_repo().query(sort, filter).await
    }
}
