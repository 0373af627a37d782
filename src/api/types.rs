use serde::{Deserialize, Serialize};

use crate::domain::ListFilters;
use crate::models::movie::MovieRecord;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDto {
    pub id: i32,
    pub title: String,
    pub notes: String,
    /// ISO `YYYY-MM-DD`, or null when the provider had no date.
    pub released: Option<String>,
    pub external_id: String,
    pub rating: f64,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub created_at: String,
}

impl From<MovieRecord> for MovieDto {
    fn from(movie: MovieRecord) -> Self {
        Self {
            id: movie.id.value(),
            title: movie.title,
            notes: movie.notes,
            released: movie.released.map(|d| d.format("%Y-%m-%d").to_string()),
            external_id: movie.external_id,
            rating: movie.rating,
            director: movie.director,
            writer: movie.writer,
            actors: movie.actors,
            created_at: movie.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query string of `GET /api/movies`. Nothing here is rejected; the planner
/// falls back to defaults for anything it does not recognise.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesQuery {
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub title: Option<String>,
    pub search: Option<String>,
}

impl ListMoviesQuery {
    pub fn filters(&self) -> ListFilters {
        ListFilters {
            title: self.title.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemovalDto {
    pub id: i32,
    pub message: String,
}
