//! Hosted adapter behavior against misbehaving backends, using a
//! throwaway TCP listener instead of a live API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sema_config::{EmbeddingConfig, RetryConfig};
use sema_core::{Embedder, ProviderError};
use sema_embed::OpenAiEmbedder;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve the given status line to every connection, counting hits.
async fn spawn_static_server(status_line: &'static str, hits: Arc<AtomicUsize>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let hits = hits.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf).await;
                hits.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    status_line
                );
                let _ = stream.write_all(response.as_bytes()).await;
            });
        }
    });
    format!("http://{}", addr)
}

fn test_config(endpoint: String, max_retries: u32) -> EmbeddingConfig {
    EmbeddingConfig {
        model_name: "text-embedding-3-small".to_string(),
        api_key: Some("test-key".to_string()),
        endpoint: Some(endpoint),
        retry: RetryConfig {
            max_retries,
            initial_backoff_ms: 1,
            max_backoff_ms: 4,
            timeout_secs: 5,
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let hits = Arc::new(AtomicUsize::new(0));
    let endpoint = spawn_static_server("500 Internal Server Error", hits.clone()).await;

    let embedder = OpenAiEmbedder::new(&test_config(endpoint, 2)).unwrap();
    let err = embedder.embed("hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::ProviderUnavailable { .. }));
    // first attempt plus two retries, never a silent empty vector
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let endpoint = spawn_static_server("400 Bad Request", hits.clone()).await;

    let embedder = OpenAiEmbedder::new(&test_config(endpoint, 3)).unwrap();
    let err = embedder.embed("hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidInput { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refused_connection_is_unavailable() {
    // Grab a free port, then close the listener so connects are refused.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let embedder = OpenAiEmbedder::new(&test_config(endpoint, 1)).unwrap();
    let err = embedder.embed("hello").await.unwrap_err();
    assert!(matches!(err, ProviderError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_empty_text_rejected_before_any_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let endpoint = spawn_static_server("500 Internal Server Error", hits.clone()).await;

    let embedder = OpenAiEmbedder::new(&test_config(endpoint, 3)).unwrap();
    let err = embedder.embed("   ").await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidInput { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
