//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

use auth_gateway::auth::BearerKeyVerifier;
use auth_gateway::config::{GatewayConfig, RouteConfig};
use auth_gateway::http::HttpServer;
use auth_gateway::lifecycle::Shutdown;
use auth_gateway::routing::RouteTable;

/// Start a mock backend returning a fixed response with a marker header.
pub async fn start_mock_backend(addr: SocketAddr, status: u16, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nX-Backend: mock\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a backend that echoes the request line and body back.
///
/// Response body is `"<METHOD> <path> HTTP/1.1\n<request body>"`, which lets
/// tests assert exactly what reached the backend.
pub async fn start_echo_backend(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];

                        // Read up to the end of the header block.
                        let header_end = loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => return,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if let Some(pos) =
                                        buf.windows(4).position(|w| w == b"\r\n\r\n")
                                    {
                                        break pos + 4;
                                    }
                                }
                                Err(_) => return,
                            }
                        };

                        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
                        let content_length = head
                            .lines()
                            .find_map(|line| {
                                let (name, value) = line.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse::<usize>().ok())
                                    .flatten()
                            })
                            .unwrap_or(0);

                        while buf.len() < header_end + content_length {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                                Err(_) => return,
                            }
                        }

                        let request_line = head.lines().next().unwrap_or("").to_string();
                        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
                        let payload = format!("{}\n{}", request_line, body);

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            payload.len(),
                            payload
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a backend that stalls for `delay` before answering.
#[allow(dead_code)]
pub async fn start_delayed_backend(addr: SocketAddr, delay: Duration) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = socket
                            .write_all(
                                b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nlate",
                            )
                            .await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        201 => "201 Created",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Spawn a gateway on `proxy_addr` serving the given route document.
///
/// Returns the shutdown coordinator and the route-update sender used by the
/// hot-swap test.
#[allow(dead_code)]
pub async fn spawn_gateway(
    proxy_addr: SocketAddr,
    routes_json: &str,
    api_key: &str,
) -> (Shutdown, mpsc::UnboundedSender<RouteTable>) {
    let routes: Vec<RouteConfig> = serde_json::from_str(routes_json).unwrap();
    let table = RouteTable::compile(routes).unwrap();

    let mut config = GatewayConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.auth.api_key = api_key.to_string();
    config.timeouts.upstream_secs = 2;

    let verifier = Arc::new(BearerKeyVerifier::new(api_key));
    let shutdown = Shutdown::new();
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    let server = HttpServer::new(config, table, verifier);
    let listener = TcpListener::bind(proxy_addr).await.unwrap();
    let server_shutdown: broadcast::Receiver<()> = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, update_rx, server_shutdown).await;
    });

    (shutdown, update_tx)
}

/// Non-pooled client so connections never outlive a test's gateway.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
