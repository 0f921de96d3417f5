//! Integration tests for HTTP chatroom discovery.
//!
//! A one-shot HTTP server on a loopback port answers a canned response and
//! hands back the raw request for inspection.

use searchbuddy_client::discovery::{DiscoveryClient, DiscoveryError};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

/// Serve one request with `status` and `body`. Resolves to the request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });

    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn lookup_decodes_chatrooms() {
    let body = r#"[{"chatroom_id":3,"num_users":2,"online":true,"term":"cats","url":"ws://x/3"}]"#;
    let (server, request) = serve_once("200 OK", body).await;

    let rooms = DiscoveryClient::new(server).lookup("cats").await.unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].chatroom_id, 3);
    assert_eq!(rooms[0].term, "cats");

    let request = request.await.unwrap();
    assert!(request.starts_with("GET /chatrooms?search=cats+searchbuddy "), "{request}");
}

#[tokio::test]
async fn trailing_slash_on_server_is_ignored() {
    let (server, request) = serve_once("200 OK", "[]").await;

    let rooms = DiscoveryClient::new(format!("{server}/")).lookup("").await.unwrap();

    assert!(rooms.is_empty());
    assert!(request.await.unwrap().starts_with("GET /chatrooms?search=searchbuddy "));
}

#[tokio::test]
async fn non_success_status_fails() {
    let (server, _request) = serve_once("503 Service Unavailable", "").await;

    let result = DiscoveryClient::new(server).lookup("cats").await;

    assert!(matches!(result, Err(DiscoveryError::Status(503))), "{result:?}");
}

#[tokio::test]
async fn malformed_body_fails() {
    let (server, _request) = serve_once("200 OK", r#"{"rooms":[]}"#).await;

    let result = DiscoveryClient::new(server).lookup("cats").await;

    assert!(matches!(result, Err(DiscoveryError::Malformed(_))), "{result:?}");
}

#[tokio::test]
async fn unreachable_server_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = DiscoveryClient::new(format!("http://{addr}")).lookup("cats").await;

    assert!(matches!(result, Err(DiscoveryError::Request(_))), "{result:?}");
}
