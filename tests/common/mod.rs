//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use insult_service::config::ServiceConfig;

/// Start a mock word provider that returns a fixed JSON body with 200 OK.
pub async fn start_word_backend(addr: SocketAddr, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
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

/// Start a programmable mock provider deciding status and body per request.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = std::sync::Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

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
                Err(_) => break,
            }
        }
    });
}

/// Config wired at two mock providers, with breaker windows shortened so
/// open/half-open transitions happen on test timescales.
#[allow(dead_code)]
pub fn test_config(noun_addr: SocketAddr, adj_addr: SocketAddr) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.noun.base_url = format!("http://{}", noun_addr);
    config.adjective.base_url = format!("http://{}", adj_addr);
    config.breaker.reset_timeout_ms = 500;
    config.client.request_timeout_ms = 500;
    config
}

/// Give spawned mock listeners a beat to start accepting.
#[allow(dead_code)]
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
