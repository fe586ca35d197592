//! Executor tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port in a background thread,
//! then drives the blocking executor over real HTTP.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;

use fetch_core::{ExecuteError, Executor, ExecutorConfig, HttpRequest, ResponseBuffer};
use mock_server::{chunk_frames, Echo, Hits, HELLO, REDIRECTING};

fn start_server() -> SocketAddr {
    start_counting_server(Hits::default())
}

fn start_counting_server(hits: Hits) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_hits(listener, hits).await
        })
        .unwrap();
    });

    addr
}

fn executor() -> Executor {
    Executor::new(ExecutorConfig::default()).unwrap()
}

fn echo(body: &[u8]) -> Echo {
    serde_json::from_slice(body).unwrap()
}

#[test]
fn get_returns_served_body() {
    let addr = start_server();

    let response = executor().get(&format!("http://{addr}/")).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, HELLO.as_bytes());
}

#[test]
fn post_body_reaches_server_unchanged() {
    let addr = start_server();
    let data = "field1=value1&field2=value2";

    let response = executor().post(&format!("http://{addr}/post"), data).unwrap();
    assert_eq!(response.status, 200);
    assert!(response.text().contains(data));

    let seen = echo(&response.body);
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.data, data);
    assert_eq!(
        seen.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
}

#[test]
fn post_raw_sends_no_content_type() {
    let addr = start_server();
    let request = HttpRequest::post_raw(&format!("http://{addr}/post"), "a=1");

    let response = executor().execute(&request).unwrap();
    let seen = echo(&response.body);
    assert_eq!(seen.data, "a=1");
    assert!(!seen.headers.contains_key("content-type"));
}

#[test]
fn configured_user_agent_is_sent() {
    let addr = start_server();
    let executor = Executor::new(ExecutorConfig {
        user_agent: "probe/2.0".to_string(),
        ..ExecutorConfig::default()
    })
    .unwrap();

    let response = executor.get(&format!("http://{addr}/get")).unwrap();
    let seen = echo(&response.body);
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.headers.get("user-agent").map(String::as_str), Some("probe/2.0"));
}

#[test]
fn request_header_overrides_user_agent() {
    let addr = start_server();
    let request =
        HttpRequest::get(&format!("http://{addr}/get")).with_header("User-Agent", "custom/1");

    let response = executor().execute(&request).unwrap();
    let seen = echo(&response.body);
    assert_eq!(seen.headers.get("user-agent").map(String::as_str), Some("custom/1"));
}

#[test]
fn multi_chunk_body_is_reassembled_in_order() {
    let addr = start_server();
    let executor = Executor::new(ExecutorConfig {
        chunk_size: 5,
        ..ExecutorConfig::default()
    })
    .unwrap();

    let mut chunks: Vec<Vec<u8>> = Vec::new();
    let mut sink = |chunk: &[u8]| {
        chunks.push(chunk.to_vec());
        chunk.len()
    };
    let request = HttpRequest::get(&format!("http://{addr}/chunked/6"));
    let status = executor.execute_with(&request, &mut sink).unwrap();

    assert_eq!(status, 200);
    assert!(chunks.len() > 1, "expected several chunks, got {}", chunks.len());
    assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= 5));
    assert_eq!(chunks.concat(), chunk_frames(6).concat().into_bytes());
}

#[test]
fn buffer_sink_matches_execute() {
    let addr = start_server();
    let request = HttpRequest::get(&format!("http://{addr}/chunked/3"));

    let mut buffer = ResponseBuffer::new();
    executor().execute_with(&request, &mut buffer).unwrap();
    let response = executor().execute(&request).unwrap();
    assert_eq!(buffer.into_bytes(), response.body);
}

#[test]
fn short_sink_return_aborts_request() {
    let addr = start_server();

    let mut sink = |_: &[u8]| 0;
    let request = HttpRequest::get(&format!("http://{addr}/"));
    let err = executor().execute_with(&request, &mut sink).unwrap_err();
    assert!(matches!(err, ExecuteError::WriteAborted { consumed: 0, .. }));
}

#[test]
fn redirect_is_returned_not_followed() {
    let hits = Hits::default();
    let addr = start_counting_server(hits.clone());

    let response = executor()
        .post(&format!("http://{addr}/redirect"), "field1=value1")
        .unwrap();
    assert_eq!(response.status, 302);
    assert_eq!(response.body, REDIRECTING.as_bytes());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn get_redirect_is_a_single_exchange() {
    let hits = Hits::default();
    let addr = start_counting_server(hits.clone());

    let response = executor().get(&format!("http://{addr}/redirect")).unwrap();
    assert_eq!(response.status, 302);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn no_compression_is_negotiated() {
    let addr = start_server();

    let response = executor().get(&format!("http://{addr}/get")).unwrap();
    let seen = echo(&response.body);
    assert!(!seen.headers.contains_key("accept-encoding"));
}

#[test]
fn error_status_is_still_a_completed_exchange() {
    let addr = start_server();

    let response = executor().get(&format!("http://{addr}/status/404")).unwrap();
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[test]
fn executor_is_reusable_after_failure() {
    let addr = start_server();
    let executor = executor();

    assert!(executor.get("").is_err());
    let response = executor.get(&format!("http://{addr}/")).unwrap();
    assert_eq!(response.body, HELLO.as_bytes());
}

#[test]
fn closed_port_fails_with_description() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let err = executor().get(&format!("http://{addr}/")).unwrap_err();
    assert!(matches!(err, ExecuteError::Transport(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn unresolvable_host_fails() {
    let err = executor().get("http://host.invalid/").unwrap_err();
    assert!(matches!(err, ExecuteError::Transport(_)));
    assert!(!err.to_string().is_empty());
}
