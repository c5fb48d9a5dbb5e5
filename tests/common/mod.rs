//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use appsync_forwarder::config::{ForwarderConfig, ResponseContract};
use appsync_forwarder::{HttpServer, Shutdown};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_API_KEY: &str = "da2-integration-key";

/// What the mock upstream saw.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

async fn read_request(socket: &mut TcpStream) -> std::io::Result<CapturedRequest> {
    let mut reader = BufReader::new(socket);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let (name, value) = (name.trim().to_string(), value.trim().to_string());
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    Ok(CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` sees each request and returns the status and JSON body to send back.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> (SocketAddr, Captured)
where
    F: Fn(CapturedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = captured.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let Ok(request) = read_request(&mut socket).await else {
                    return;
                };
                seen.lock().unwrap().push(request.clone());

                let (status, body) = f(request).await;
                let reason = reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or_else(|| panic!("mock upstream cannot answer with status {}", status));
                let status_text = format!("{} {}", status, reason);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, captured)
}

/// Start a mock upstream that always answers 200 with `body`.
pub async fn start_mock_upstream(body: &'static str) -> (SocketAddr, Captured) {
    start_programmable_upstream(move |_| async move { (200, body.to_string()) }).await
}

/// An address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start the forwarder's HTTP server pointed at `upstream`.
pub async fn start_forwarder(upstream: SocketAddr, contract: ResponseContract) -> (SocketAddr, Shutdown) {
    let mut config = ForwarderConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.endpoint_url = format!("http://{}/graphql", upstream);
    config.upstream.api_key = TEST_API_KEY.to_string();
    config.forwarder.contract = contract;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::from_config(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
