//! Scan endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method},
    Json,
};
use scanrelay_core::{ScanRequest, ScanService, VulnerabilityScannerPort};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Query string as ordered pairs, so repeated keys survive extraction.
type QueryPairs = Vec<(String, String)>;

/// `GET|POST /scan`. Runs one scan and returns the scanner's result as-is.
pub async fn handle<S>(
    State(service): State<Arc<ScanService<S>>>,
    method: Method,
    headers: HeaderMap,
    query: Option<Query<QueryPairs>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: VulnerabilityScannerPort + 'static,
{
    let pairs = query.map(|Query(q)| q).unwrap_or_default();
    let request = extract_request(&method, &headers, first_target(&pairs), &body);
    debug!(?request, %method, "Scan request");

    let result = service.scan(&request).await?;
    Ok(Json(result))
}

/// A JSON body wins over the query string; the query is only consulted on
/// GET. Anything else scans the default target.
fn extract_request(
    method: &Method,
    headers: &HeaderMap,
    query_target: Option<&str>,
    body: &[u8],
) -> ScanRequest {
    if is_json(headers) {
        ScanRequest::from_json_body(body)
    } else if *method == Method::GET {
        ScanRequest::from_query_target(query_target)
    } else {
        ScanRequest::default()
    }
}

/// First `target` value in the query string; later repeats are ignored.
fn first_target(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "target")
        .map(|(_, value)| value.as_str())
}

/// True for `application/json` and `application/*+json` content types.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
