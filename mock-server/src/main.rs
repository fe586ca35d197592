use tokio::net::TcpListener;

/// Serves the test double on `HOST:PORT` (default `127.0.0.1:3000`) so the
/// demo binary can be pointed at it through `FETCH_GET_URL` / `FETCH_POST_URL`.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock server on http://{addr} (routes: /, /get, /post, /chunked/{{n}}, /status/{{code}})");
    mock_server::run(listener).await
}
