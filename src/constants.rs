/// Sentinel the provider uses for any field it has no value for.
pub const NOT_AVAILABLE: &str = "N/A";

pub mod catalog {
    use crate::domain::{SortField, SortOrder};

    pub const DEFAULT_SORT_FIELD: SortField = SortField::Released;

    pub const DEFAULT_SORT_ORDER: SortOrder = SortOrder::Ascending;

    pub const RATING_FALLBACK: f64 = 0.0;
}

pub mod provider {

    pub const OMDB_SERVICE: &str = "OMDb";

    pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

    pub const DEFAULT_NOT_FOUND_REASON: &str = "Movie not found!";

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
}

pub mod metrics {

    pub const MOVIES_INGESTED: &str = "cinedex_movies_ingested_total";

    pub const INGEST_FAILURES: &str = "cinedex_ingest_failures_total";

    pub const HTTP_REQUESTS: &str = "cinedex_http_requests_total";

    pub const HTTP_REQUEST_DURATION: &str = "cinedex_http_request_duration_seconds";
}

/// Header carrying the per-request correlation id in and out of the API.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
