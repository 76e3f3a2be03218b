//! Router-level tests driven through `tower::ServiceExt::oneshot`, plus one
//! test against a real TCP listener.
//!
//! Run with: cargo test --test http_tests
use std::time::Duration;

use autoscaler_demo::http::serve;
use autoscaler_demo::{create_router, AppConfig, AppState};
use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

const TEST_POD: &str = "pod-abc123";

/// Build a router with the given workload sizes and a fixed pod identifier
fn test_router(load_iterations: u64, memory_bytes: usize) -> Router {
    let mut config = AppConfig::default();
    config.workload.load_iterations = load_iterations;
    config.workload.memory_bytes = memory_bytes;
    create_router(AppState::with_pod(config, TEST_POD))
}

fn default_router() -> Router {
    create_router(AppState::with_pod(AppConfig::default(), TEST_POD))
}

struct TestResponse {
    status: StatusCode,
    headers: http::HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

async fn get(router: Router, path: &str) -> TestResponse {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Parse "<digits>.<two digits>s" into seconds
fn parse_computation_time(value: &str) -> f64 {
    let number = value
        .strip_suffix('s')
        .unwrap_or_else(|| panic!("missing 's' suffix: {value}"));
    let (whole, fraction) = number
        .split_once('.')
        .unwrap_or_else(|| panic!("missing decimal point: {value}"));
    assert!(!whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit()));
    assert!(fraction.len() == 2 && fraction.chars().all(|c| c.is_ascii_digit()));
    number.parse().unwrap()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_exact_body() {
        let resp = get(default_router(), "/health").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, br#"{"status":"healthy"}"#);
        assert_eq!(
            resp.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_health_is_idempotent() {
        let router = default_router();
        for _ in 0..5 {
            let resp = get(router.clone(), "/health").await;
            assert_eq!(resp.status, StatusCode::OK);
            assert_eq!(resp.json(), serde_json::json!({"status": "healthy"}));
        }
    }
}

mod status {
    use super::*;

    #[tokio::test]
    async fn test_root_reports_pod() {
        let resp = get(default_router(), "/").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(
            resp.json(),
            serde_json::json!({
                "message": "Cluster Autoscaler Demo App",
                "pod": "pod-abc123",
                "status": "running"
            })
        );
    }

    #[tokio::test]
    async fn test_root_unknown_pod() {
        let router = create_router(AppState::with_pod(AppConfig::default(), "unknown"));
        let resp = get(router, "/").await;
        assert_eq!(resp.json()["pod"], "unknown");
    }

    #[tokio::test]
    async fn test_root_is_idempotent() {
        let router = default_router();
        let first = get(router.clone(), "/").await.json();
        let second = get(router, "/").await.json();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let resp = get(default_router(), "/does-not-exist").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_routes_disable_caching() {
        let router = test_router(1_000, 1024);
        for path in ["/", "/health", "/load", "/memory"] {
            let resp = get(router.clone(), path).await;
            assert_eq!(resp.status, StatusCode::OK, "{path}");
            assert_eq!(
                resp.headers.get(header::CACHE_CONTROL).unwrap(),
                "no-store",
                "{path}"
            );
        }
    }
}

mod load {
    use super::*;

    #[tokio::test]
    async fn test_load_reports_positive_computation_time() {
        let resp = get(test_router(500_000, 1024), "/load").await;
        assert_eq!(resp.status, StatusCode::OK);

        let body = resp.json();
        assert_eq!(body["pod"], TEST_POD);
        assert_eq!(body["message"], "Heavy computation completed");

        let seconds = parse_computation_time(body["computation_time"].as_str().unwrap());
        assert!(seconds > 0.0, "burn took {seconds}s");
    }

    #[tokio::test]
    async fn test_load_small_burn_is_fast() {
        let resp = get(test_router(10, 1024), "/load").await;
        let body = resp.json();
        let seconds = parse_computation_time(body["computation_time"].as_str().unwrap());
        assert!(seconds < 1.0, "ten rounds took {seconds}s");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_health_answers_while_load_in_flight() {
        let router = default_router();

        let load = tokio::spawn(get(router.clone(), "/load"));
        // Let the burn start on the blocking pool
        tokio::time::sleep(Duration::from_millis(50)).await;

        let health = tokio::time::timeout(Duration::from_secs(2), get(router, "/health"))
            .await
            .expect("/health must not wait for /load");
        assert_eq!(health.status, StatusCode::OK);
        assert!(!load.is_finished(), "/load finished before /health was checked");

        let load = load.await.unwrap();
        assert_eq!(load.status, StatusCode::OK);
    }
}

mod memory {
    use super::*;

    #[tokio::test]
    async fn test_memory_reports_100mb() {
        let resp = get(default_router(), "/memory").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(
            resp.json(),
            serde_json::json!({
                "pod": "pod-abc123",
                "memory_allocated": "100MB",
                "message": "Memory allocated"
            })
        );
    }

    #[tokio::test]
    async fn test_memory_refused_allocation_is_server_error() {
        let resp = get(test_router(1_000, usize::MAX), "/memory").await;
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);

        let body = resp.json();
        assert_eq!(body["error"], "Internal server error");
        let request_id = body["request_id"].as_str().unwrap();
        assert_eq!(request_id.len(), 36, "{request_id}");

        // The process keeps serving after the failed allocation
        let health = get(test_router(1_000, usize::MAX), "/health").await;
        assert_eq!(health.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_memory_repeated_requests() {
        let router = default_router();
        for _ in 0..3 {
            let resp = get(router.clone(), "/memory").await;
            assert_eq!(resp.status, StatusCode::OK);
        }
    }
}

mod server {
    use super::*;
    use axum_server::Handle;
    use std::net::SocketAddr;

    #[tokio::test]
    async fn test_serves_health_over_tcp() {
        let handle = Handle::new();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = tokio::spawn(serve(default_router(), addr, handle.clone()));

        let bound = handle.listening().await.expect("server is listening");

        let mut stream = tokio::net::TcpStream::connect(bound).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200"), "{raw}");
        assert!(raw.ends_with(r#"{"status":"healthy"}"#), "{raw}");

        handle.shutdown();
        server.await.unwrap().unwrap();
    }
}
