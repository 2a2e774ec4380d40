//! Upstream client behaviour against a local mock upstream.

use std::time::Duration;

use heroes_proxy::config::{TimeoutConfig, UpstreamConfig};
use heroes_proxy::upstream::{RequestSpec, Scheme, UpstreamClient, UpstreamError};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;

mod common;

fn client_for(host: String, upstream_secs: u64) -> UpstreamClient {
    let upstream = UpstreamConfig {
        host,
        system_proxy: false,
        ..UpstreamConfig::default()
    };
    let timeouts = TimeoutConfig {
        upstream_secs,
        ..TimeoutConfig::default()
    };
    UpstreamClient::new(&upstream, &timeouts).unwrap()
}

#[tokio::test]
async fn test_success_returns_raw_body() {
    let (addr, log) = common::start_heroes_upstream().await;
    let client = client_for(addr.to_string(), 2);

    let body = client.call(RequestSpec::get("/heroes")).await.unwrap();
    assert_eq!(&body[..], common::HEROES_JSON.as_bytes());

    let requests = log.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/heroes");
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_non_200_is_status_error() {
    let (addr, _log) = common::start_mock_upstream(|_| async { (400, String::new()) }).await;
    let client = client_for(addr.to_string(), 2);

    let err = client.call(RequestSpec::get("/auth")).await.unwrap_err();
    match &err {
        UpstreamError::Status { status, message } => {
            assert_eq!(*status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Bad Request");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr.to_string(), 2);
    let err = client.call(RequestSpec::get("/error")).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)), "got {:?}", err);
    assert_eq!(err.status(), None);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_hung_upstream_times_out() {
    let (addr, _log) = common::start_mock_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, "[]".into())
    })
    .await;
    let client = client_for(addr.to_string(), 1);

    let started = std::time::Instant::now();
    let err = client.call(RequestSpec::get("/heroes")).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_post_sends_body_and_merged_headers() {
    let (addr, log) = common::start_mock_upstream(|_| async { (200, "OK".into()) }).await;
    let client = client_for(addr.to_string(), 2);

    let spec = RequestSpec::post("/auth", br#"{"name":"hahow"}"#.to_vec())
        .with_scheme(Scheme::Http)
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/vnd.test+json"))
        .with_header(HeaderName::from_static("x-extra"), HeaderValue::from_static("1"));
    let body = client.call(spec).await.unwrap();
    assert_eq!(&body[..], b"OK");

    let requests = log.all();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].body, r#"{"name":"hahow"}"#);
    assert_eq!(requests[0].header("content-type"), Some("application/vnd.test+json"));
    assert_eq!(requests[0].header("x-extra"), Some("1"));
}
