use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::MovieId;

/// A catalogued movie as stored.
///
/// Everything except `notes` comes from the metadata provider at creation
/// time and is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub notes: String,
    pub released: Option<NaiveDate>,
    pub external_id: String,
    pub rating: f64,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub created_at: String,
}

/// A normalized movie ready to be inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub notes: String,
    pub released: Option<NaiveDate>,
    pub external_id: String,
    pub rating: f64,
    pub director: String,
    pub writer: String,
    pub actors: String,
}
