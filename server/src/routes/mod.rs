//! HTTP routes.

pub mod health;
pub mod scan;

use std::sync::Arc;

use axum::{routing::get, Router};
use scanrelay_core::{ScanService, VulnerabilityScannerPort};

/// Build the application router around a scan service.
pub fn router<S>(service: Arc<ScanService<S>>) -> Router
where
    S: VulnerabilityScannerPort + 'static,
{
    Router::new()
        .route("/scan", get(scan::handle::<S>).post(scan::handle::<S>))
        .route("/health", get(health::handle))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use scanrelay_core::{Error, Result, ScanOptions};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Mock scanner for testing.
    struct MockScanner {
        result: Option<Value>,
        calls: Mutex<Vec<(Vec<String>, ScanOptions)>>,
    }

    impl MockScanner {
        fn returning(result: Value) -> Self {
            Self {
                result: Some(result),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                result: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn last_call(&self) -> (Vec<String>, ScanOptions) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl VulnerabilityScannerPort for MockScanner {
        async fn run_scan(&self, targets: &[String], options: &ScanOptions) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((targets.to_vec(), options.clone()));
            self.result
                .clone()
                .ok_or_else(|| Error::ScanFailed("scanner exited with exit status: 1".to_string()))
        }
    }

    fn scan_result() -> Value {
        json!({
            "scan_info": {"targets": ["10.0.0.5"]},
            "results": {"10.0.0.5": {"open_ports": [22, 80], "vulnerabilities": []}},
        })
    }

    fn app(scanner: MockScanner) -> (Router, Arc<ScanService<MockScanner>>) {
        let service = Arc::new(ScanService::new(scanner));
        (router(service.clone()), service)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/scan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(MockScanner::failing());

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_health_rejects_post() {
        let (app, _) = app(MockScanner::failing());

        let request = Request::builder()
            .method("POST")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_post_scan_quick() {
        let (app, service) = app(MockScanner::returning(scan_result()));

        let response = app
            .oneshot(post_json(r#"{"target":"10.0.0.5","quick":true}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, scan_result());

        let (targets, options) = service.scanner().last_call();
        assert_eq!(targets, vec!["10.0.0.5".to_string()]);
        assert_eq!(options.port_range, "1-100");
        assert_eq!(options.timeout, 2);
        assert_eq!(options.max_threads, 100);
    }

    #[tokio::test]
    async fn test_post_scan_full() {
        let (app, service) = app(MockScanner::returning(json!({})));

        let response = app
            .oneshot(post_json(r#"{"target":"10.0.0.5","quick":false}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (_, options) = service.scanner().last_call();
        assert_eq!(options, ScanOptions::for_quick(false));
    }

    #[tokio::test]
    async fn test_get_scan_query_target() {
        let (app, service) = app(MockScanner::returning(scan_result()));

        let response = app.oneshot(get_request("/scan?target=10.0.0.5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (targets, options) = service.scanner().last_call();
        assert_eq!(targets, vec!["10.0.0.5".to_string()]);
        assert_eq!(options, ScanOptions::for_quick(true));
    }

    #[tokio::test]
    async fn test_get_scan_repeated_target_uses_first() {
        let (app, service) = app(MockScanner::returning(json!({})));

        let response = app
            .oneshot(get_request("/scan?target=10.0.0.5&target=10.0.0.6"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (targets, _) = service.scanner().last_call();
        assert_eq!(targets, vec!["10.0.0.5".to_string()]);
    }

    #[tokio::test]
    async fn test_get_scan_without_target() {
        let (app, service) = app(MockScanner::returning(json!({})));

        let response = app.oneshot(get_request("/scan?target=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (targets, _) = service.scanner().last_call();
        assert_eq!(targets, vec!["127.0.0.1".to_string()]);
    }

    #[tokio::test]
    async fn test_post_scan_empty_body() {
        let (app, service) = app(MockScanner::returning(json!({})));

        let request = Request::builder()
            .method("POST")
            .uri("/scan")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (targets, options) = service.scanner().last_call();
        assert_eq!(targets, vec!["127.0.0.1".to_string()]);
        assert_eq!(options, ScanOptions::for_quick(true));
    }

    #[tokio::test]
    async fn test_post_scan_malformed_json() {
        let (app, service) = app(MockScanner::returning(json!({})));

        let response = app.oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (targets, options) = service.scanner().last_call();
        assert_eq!(targets, vec!["127.0.0.1".to_string()]);
        assert_eq!(options, ScanOptions::for_quick(true));
    }

    #[tokio::test]
    async fn test_scan_failure_is_server_error() {
        let (app, _) = app(MockScanner::failing());

        let response = app
            .oneshot(post_json(r#"{"target":"10.0.0.5"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_scan_rejects_other_methods() {
        let (app, _) = app(MockScanner::returning(json!({})));

        let request = Request::builder()
            .method("DELETE")
            .uri("/scan")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
