//! In-memory doubles for the provider and store ports.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::clients::{LookupOutcome, MetadataProvider, ProviderMovie};
use crate::db::{RecordStore, StoreError};
use crate::domain::{FilterSpec, MovieId, SortSpec};
use crate::models::movie::{MovieRecord, NewMovie};

pub fn inception() -> ProviderMovie {
    ProviderMovie {
        title: "Inception".to_string(),
        released: Some("16 Jul 2010".to_string()),
        director: "Christopher Nolan".to_string(),
        writer: "Christopher Nolan".to_string(),
        actors: "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page".to_string(),
        external_id: "tt1375666".to_string(),
        rating: Some("8.8".to_string()),
    }
}

enum Reply {
    Found(ProviderMovie),
    NotFound(String),
    Fail(String),
}

/// Provider that answers every lookup the same way and records the titles it saw.
pub struct StubProvider {
    reply: Reply,
    seen: Mutex<Vec<String>>,
}

impl StubProvider {
    fn with(reply: Reply) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn found(movie: ProviderMovie) -> Self {
        Self::with(Reply::Found(movie))
    }

    pub fn not_found(reason: &str) -> Self {
        Self::with(Reply::NotFound(reason.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Reply::Fail(message.to_string()))
    }

    pub fn titles_seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    fn name(&self) -> &'static str {
        "Stub"
    }

    async fn lookup_by_title(&self, title: &str) -> anyhow::Result<LookupOutcome> {
        self.seen.lock().unwrap().push(title.to_string());
        match &self.reply {
            Reply::Found(movie) => Ok(LookupOutcome::Found(movie.clone())),
            Reply::NotFound(reason) => Ok(LookupOutcome::NotFound(reason.clone())),
            Reply::Fail(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

/// Vec-backed store that counts writes and can simulate storage failures.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<MovieRecord>>,
    next_id: AtomicI32,
    /// Successful creates, note updates and deletes.
    pub writes: AtomicUsize,
    pub last_query: Mutex<Option<(SortSpec, FilterSpec)>>,
    /// `create` fails with a unique violation even though lookups found nothing.
    reject_as_duplicate: bool,
    /// `create` reports that no row was written.
    fail_writes: bool,
    /// `delete` reports that no row was removed even if one matched.
    ignore_deletes: bool,
    /// `update_notes` succeeds but the row is gone by the time it is re-read.
    vanish_on_update: bool,
}

impl MemoryStore {
    pub fn rejecting_duplicates() -> Self {
        Self {
            reject_as_duplicate: true,
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn ignoring_deletes() -> Self {
        Self {
            ignore_deletes: true,
            ..Self::default()
        }
    }

    pub fn vanishing_on_update() -> Self {
        Self {
            vanish_on_update: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, movie: NewMovie) -> Result<MovieRecord, StoreError> {
        if self.reject_as_duplicate {
            return Err(StoreError::Duplicate(movie.external_id));
        }
        if self.fail_writes {
            return Err(StoreError::NotWritten);
        }

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.external_id == movie.external_id) {
            return Err(StoreError::Duplicate(movie.external_id));
        }

        let record = MovieRecord {
            id: MovieId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            title: movie.title,
            notes: movie.notes,
            released: movie.released,
            external_id: movie.external_id,
            rating: movie.rating,
            director: movie.director,
            writer: movie.writer,
            actors: movie.actors,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        };
        rows.push(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<MovieRecord>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.external_id == external_id).cloned())
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<MovieRecord>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn update_notes(&self, id: MovieId, notes: &str) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(pos) = rows.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        if self.vanish_on_update {
            rows.remove(pos);
        } else {
            rows[pos].notes = notes.to_string();
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn delete(&self, id: MovieId) -> Result<bool, StoreError> {
        if self.ignore_deletes {
            return Ok(false);
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        let removed = rows.len() < before;
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }

    async fn query(
        &self,
        sort: &SortSpec,
        filter: &FilterSpec,
    ) -> Result<Vec<MovieRecord>, StoreError> {
        *self.last_query.lock().unwrap() = Some((*sort, filter.clone()));
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| filter.matches(r)).cloned().collect())
    }
}
