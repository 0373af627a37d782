//! Domain types for the movie catalog with strong typing.
//!
//! Identifiers are newtypes so a movie id cannot be confused with any other
//! integer, and sort/filter inputs are closed enums so the query layer never
//! sees raw user text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::movie::MovieRecord;

/// Store-assigned identifier of a catalogued movie.
///
/// # Examples
///
/// ```rust
/// use cinedex::domain::MovieId;
///
/// let id = MovieId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MovieId(i32);

impl MovieId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MovieId> for i32 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl From<i32> for MovieId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for MovieId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Columns a listing may be ordered by.
///
/// This is the whole whitelist: anything a caller sends that does not parse
/// into one of these variants never reaches the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Released,
    Rating,
}

impl SortField {
    /// Parses a user-supplied field name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "released" => Some(Self::Released),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order enumeration to replace boolean blindness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parses `asc`/`ascending`/`desc`/`descending` in any case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated ordering for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

/// Validated, lower-cased substring predicates for a listing.
///
/// `title` matches the title column only. `search` matches if any of
/// director, writer or actors contains it. Both apply together when set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSpec {
    pub title: Option<String>,
    pub search: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.search.is_none()
    }

    /// Unicode-aware case-insensitive match of both predicates against `movie`.
    #[must_use]
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        if self.is_empty() {
            return true;
        }

        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|needle| contains_folded(&movie.title, needle));
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            [&movie.director, &movie.writer, &movie.actors]
                .into_iter()
                .any(|credit| contains_folded(credit, needle))
        });

        title_ok && search_ok
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Raw, untrusted filter input as it arrives from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilters {
    pub title: Option<String>,
    pub search: Option<String>,
}
