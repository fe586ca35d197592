use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Body served by `GET /`.
pub const HELLO: &str = "hello";

/// Body sent along with the `/redirect` 302.
pub const REDIRECTING: &str = "redirecting";

/// Number of requests the server has answered, across all routes.
pub type Hits = Arc<AtomicUsize>;

/// What the server saw of a request, in the shape httpbin uses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub data: String,
}

pub fn app() -> Router {
    app_with_hits(Hits::default())
}

/// `app` that counts every request it receives into `hits`.
pub fn app_with_hits(hits: Hits) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/get", get(echo_get))
        .route("/post", post(echo_post))
        .route("/chunked/{n}", get(chunked))
        .route("/status/{code}", get(status))
        .route("/redirect", any(redirect))
        .layer(middleware::from_fn_with_state(hits, count_hits))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_hits(listener: TcpListener, hits: Hits) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_hits(hits)).await
}

/// The body `GET /chunked/{n}` streams, frame by frame.
pub fn chunk_frames(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("chunk-{i};")).collect()
}

async fn count_hits(State(hits): State<Hits>, request: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect()
}

async fn hello() -> &'static str {
    HELLO
}

async fn echo_get(headers: HeaderMap) -> Json<Echo> {
    Json(Echo {
        method: "GET".to_string(),
        headers: header_map(&headers),
        data: String::new(),
    })
}

async fn echo_post(headers: HeaderMap, body: Bytes) -> Json<Echo> {
    Json(Echo {
        method: "POST".to_string(),
        headers: header_map(&headers),
        data: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn chunked(Path(n): Path<usize>) -> Body {
    let frames = chunk_frames(n)
        .into_iter()
        .map(Ok::<_, std::io::Error>);
    Body::from_stream(futures::stream::iter(frames))
}

async fn status(Path(code): Path<u16>) -> Result<StatusCode, StatusCode> {
    StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)
}

async fn redirect() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    (StatusCode::FOUND, [(header::LOCATION, "/get")], REDIRECTING)
}
