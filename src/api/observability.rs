//! Prometheus scrape endpoint and the per-request span/metrics middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::api::AppState;
use crate::constants::REQUEST_ID_HEADER;
use crate::constants::metrics::{HTTP_REQUEST_DURATION, HTTP_REQUESTS};

/// Longest caller-supplied request id that is echoed back instead of replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Coarse outcome label for a response status.
#[must_use]
pub fn outcome_for(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// Reuses a sane incoming `x-request-id`, otherwise mints a v4 uuid.
fn request_id_for(req: &Request) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string)
}

pub async fn request_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request_id_for(&req);

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    // Raw paths carry movie ids; the route template keeps label cardinality bounded.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.clone(),
    );

    async move {
        let mut response = next.run(req).await;

        let status = response.status();
        let labels = [
            ("method", method),
            ("route", route.unwrap_or(path)),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!(HTTP_REQUESTS, &labels).increment(1);
        metrics::histogram!(HTTP_REQUEST_DURATION, &labels)
            .record(start.elapsed().as_secs_f64());

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            outcome = outcome_for(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(id: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/movies");
        if let Some(id) = id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn outcome_buckets_statuses() {
        assert_eq!(outcome_for(StatusCode::OK), "success");
        assert_eq!(outcome_for(StatusCode::CREATED), "success");
        assert_eq!(outcome_for(StatusCode::NOT_FOUND), "client_error");
        assert_eq!(outcome_for(StatusCode::CONFLICT), "client_error");
        assert_eq!(outcome_for(StatusCode::BAD_GATEWAY), "error");
    }

    #[test]
    fn request_id_is_reused_or_generated() {
        assert_eq!(request_id_for(&request_with(Some(" abc-123 "))), "abc-123");

        let generated = request_id_for(&request_with(None));
        assert!(Uuid::parse_str(&generated).is_ok());

        let too_long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        let replaced = request_id_for(&request_with(Some(too_long.as_str())));
        assert!(Uuid::parse_str(&replaced).is_ok());
    }
}
