//! Integration tests for the WebSocket transport.
//!
//! These tests run a real WebSocket server on a loopback port and connect a
//! real [`Channel`] to it.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use searchbuddy_client::{ChannelEvent, transport};
use tokio::{net::TcpListener, sync::mpsc, time::timeout};
use tokio_tungstenite::{accept_async, tungstenite::Message};

const WAIT: Duration = Duration::from_secs(5);

/// Start a server that runs `script` against the first accepted socket.
async fn start_server<F, Fut>(script: F) -> String
where
    F: FnOnce(tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let socket = accept_async(stream).await.unwrap();
        script(socket).await;
    });

    format!("ws://{addr}/chat")
}

fn open(url: String) -> (transport::Channel, mpsc::UnboundedReceiver<ChannelEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let channel = transport::connect(url, move |event| {
        let _ = tx.send(event);
    });
    (channel, rx)
}

async fn next(rx: &mut mpsc::UnboundedReceiver<ChannelEvent>) -> ChannelEvent {
    timeout(WAIT, rx.recv()).await.expect("timed out").expect("event stream ended")
}

#[tokio::test]
async fn frames_flow_both_ways() {
    let url = start_server(|mut socket| async move {
        let Some(Ok(Message::Text(text))) = socket.next().await else {
            panic!("expected text frame");
        };
        assert_eq!(text.as_str(), r#"{"type":"ChatsFromTodayRequest"}"#);
        socket.send(Message::text(r#"{"type":"NewMessage","content":"hi"}"#)).await.unwrap();
        socket.close(None).await.unwrap();
    })
    .await;

    let (channel, mut rx) = open(url);
    assert_eq!(next(&mut rx).await, ChannelEvent::Opened);

    channel.send(r#"{"type":"ChatsFromTodayRequest"}"#.to_owned()).unwrap();

    assert_eq!(
        next(&mut rx).await,
        ChannelEvent::Frame(r#"{"type":"NewMessage","content":"hi"}"#.to_owned())
    );
    assert_eq!(next(&mut rx).await, ChannelEvent::Closed);
}

#[tokio::test]
async fn binary_frames_are_ignored() {
    let url = start_server(|mut socket| async move {
        socket.send(Message::binary(vec![1, 2, 3])).await.unwrap();
        socket.send(Message::text("after")).await.unwrap();
        socket.close(None).await.unwrap();
    })
    .await;

    let (_channel, mut rx) = open(url);

    assert_eq!(next(&mut rx).await, ChannelEvent::Opened);
    assert_eq!(next(&mut rx).await, ChannelEvent::Frame("after".to_owned()));
    assert_eq!(next(&mut rx).await, ChannelEvent::Closed);
}

#[tokio::test]
async fn connect_failure_reports_error_then_closed() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (_channel, mut rx) = open(format!("ws://{addr}/chat"));

    assert!(matches!(next(&mut rx).await, ChannelEvent::Error { .. }));
    assert_eq!(next(&mut rx).await, ChannelEvent::Closed);
}

#[tokio::test]
async fn local_close_reaches_server() {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let url = start_server(move |mut socket| async move {
        while let Some(Ok(message)) = socket.next().await {
            if message.is_close() {
                break;
            }
        }
        let _ = done_tx.send(());
    })
    .await;

    let (channel, mut rx) = open(url);
    assert_eq!(next(&mut rx).await, ChannelEvent::Opened);

    channel.close();

    timeout(WAIT, done_rx.recv()).await.expect("server saw no close").unwrap();
}

#[tokio::test]
async fn frame_pending_at_local_close_is_not_reported() {
    // The server runs on its own thread so this runtime can be held still
    // while a frame lands in the socket buffer.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (go_tx, go_rx) = std::sync::mpsc::channel::<()>();
    let (sent_tx, sent_rx) = std::sync::mpsc::channel::<()>();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    let server = std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async move {
            listener.set_nonblocking(true).unwrap();
            let listener = TcpListener::from_std(listener).unwrap();
            let (stream, _) = listener.accept().await.unwrap();
            let mut socket = accept_async(stream).await.unwrap();

            go_rx.recv().unwrap();
            socket.send(Message::text("late")).await.unwrap();
            sent_tx.send(()).unwrap();

            while let Some(Ok(message)) = socket.next().await {
                if message.is_close() {
                    break;
                }
            }
            let _ = done_tx.send(());
        });
    });

    let (channel, mut rx) = open(format!("ws://{addr}/chat"));
    assert_eq!(next(&mut rx).await, ChannelEvent::Opened);

    go_tx.send(()).unwrap();
    sent_rx.recv().unwrap();
    std::thread::sleep(Duration::from_millis(100));

    channel.close();

    timeout(WAIT, done_rx.recv()).await.expect("server saw no close").unwrap();
    assert_eq!(timeout(WAIT, rx.recv()).await.expect("channel task still running"), None);
    server.join().unwrap();
}
