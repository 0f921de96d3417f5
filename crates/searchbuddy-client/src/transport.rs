//! WebSocket transport for chatroom sessions.
//!
//! Provides [`Channel`], a handle to one WebSocket connection driven by a
//! background task. This is a thin layer that only moves text frames and
//! reports lifecycle events - session logic stays in the Sans-IO
//! [`crate::Session`].

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::ChannelEvent;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection task has exited.
    #[error("channel closed")]
    Closed,
}

/// Handle to one WebSocket channel.
///
/// Outbound text is queued to a background task. Dropping the handle (or
/// calling [`Channel::close`]) closes the socket gracefully; [`Channel::abort`]
/// stops the task immediately.
pub struct Channel {
    outbound: mpsc::UnboundedSender<String>,
    abort_handle: tokio::task::AbortHandle,
}

impl Channel {
    /// Queue a text frame.
    pub fn send(&self, text: String) -> Result<(), TransportError> {
        self.outbound.send(text).map_err(|_| TransportError::Closed)
    }

    /// Close gracefully once queued frames are flushed.
    pub fn close(self) {
        drop(self.outbound);
    }

    /// Stop the connection task without a close handshake.
    pub fn abort(&self) {
        self.abort_handle.abort();
    }
}

/// Open a WebSocket channel to `url`.
///
/// Lifecycle events are passed to `notify` in arrival order: `Opened` once
/// connected, `Frame` per text frame, and finally `Closed`. Failures are
/// reported as `Error` followed by `Closed`. Once the channel task observes
/// a local [`Channel::close`], nothing further is reported, including frames
/// that already arrived.
///
/// Must be called from within a tokio runtime.
pub fn connect<F>(url: String, notify: F) -> Channel
where
    F: Fn(ChannelEvent) + Send + 'static,
{
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_channel(url, outbound_rx, notify));

    Channel { outbound: outbound_tx, abort_handle: handle.abort_handle() }
}

/// Run the channel, bridging the outbound queue and the socket.
async fn run_channel<F>(url: String, mut outbound: mpsc::UnboundedReceiver<String>, notify: F)
where
    F: Fn(ChannelEvent) + Send + 'static,
{
    let socket = match connect_async(url.as_str()).await {
        Ok((socket, _response)) => socket,
        Err(e) => {
            tracing::warn!(%url, error = %e, "channel connect failed");
            notify(ChannelEvent::Error { reason: e.to_string() });
            notify(ChannelEvent::Closed);
            return;
        },
    };

    tracing::debug!(%url, "channel opened");
    notify(ChannelEvent::Opened);

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            biased;

            // Outbound first, so a local close wins over frames already read.
            queued = outbound.recv() => {
                let Some(text) = queued else {
                    // Local close: no further events are reported.
                    if let Err(e) = sink.close().await {
                        tracing::debug!(error = %e, "close handshake failed");
                    }
                    return;
                };
                if let Err(e) = sink.send(Message::text(text)).await {
                    tracing::warn!(error = %e, "channel send failed");
                    notify(ChannelEvent::Error { reason: e.to_string() });
                    notify(ChannelEvent::Closed);
                    return;
                }
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    notify(ChannelEvent::Frame(text.as_str().to_owned()));
                },
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(%url, "channel closed by server");
                    notify(ChannelEvent::Closed);
                    return;
                },
                Some(Ok(other)) => {
                    tracing::warn!(len = other.len(), "non-text frame ignored");
                },
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "channel receive failed");
                    notify(ChannelEvent::Error { reason: e.to_string() });
                    notify(ChannelEvent::Closed);
                    return;
                },
            },
        }
    }
}
