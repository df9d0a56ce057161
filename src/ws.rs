//! WebSocket transport.
//!
//! Wraps `tokio-tungstenite` behind owned reader and writer halves so the
//! session task can block on [`WsReader::recv`] while still answering
//! pings through the [`WsWriter`]. The STOMP layer is the only consumer
//! and never touches `tungstenite` types directly.

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Incoming WebSocket traffic, reduced to what the session layer handles.
#[derive(Debug)]
pub enum WsMessage {
    /// Text frame; STOMP frames and heart-beats arrive as these.
    Text(String),
    /// Binary frame. The session skips these.
    Binary(Vec<u8>),
    /// Ping that must be answered with [`WsWriter::send_pong`].
    Ping(Vec<u8>),
    /// Pong; unsolicited ones are legal and ignored.
    Pong(Vec<u8>),
    /// Connection close.
    Close {
        /// Close status code; 1005 when the peer sent none.
        code: u16,
        /// Close reason, possibly empty.
        reason: String,
    },
}

impl WsMessage {
    /// Surface a raw `tungstenite` message, or `None` for the internal
    /// `Frame` variant that callers never see.
    fn from_raw(msg: tungstenite::Message) -> Option<Self> {
        match msg {
            tungstenite::Message::Text(text) => Some(Self::Text(text)),
            tungstenite::Message::Binary(data) => Some(Self::Binary(data)),
            tungstenite::Message::Ping(data) => Some(Self::Ping(data)),
            tungstenite::Message::Pong(data) => Some(Self::Pong(data)),
            tungstenite::Message::Close(frame) => {
                let (code, reason) = match frame {
                    Some(f) => (f.code.into(), f.reason.into_owned()),
                    None => (1005, String::new()),
                };
                Some(Self::Close { code, reason })
            }
            tungstenite::Message::Frame(_) => None,
        }
    }
}

/// Write half of the connection.
#[derive(Debug)]
pub struct WsWriter {
    sink: futures_util::stream::SplitSink<WsStream, tungstenite::Message>,
}

impl WsWriter {
    /// Send a text frame.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection is closed or the write fails.
    pub async fn send_text(&mut self, text: String) -> Result<()> {
        self.sink
            .send(tungstenite::Message::Text(text))
            .await
            .context("WebSocket text send failed")
    }

    /// Answer a ping with its payload.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection is closed or the write fails.
    pub async fn send_pong(&mut self, data: Vec<u8>) -> Result<()> {
        self.sink
            .send(tungstenite::Message::Pong(data))
            .await
            .context("WebSocket pong send failed")
    }
}

/// Read half of the connection.
#[derive(Debug)]
pub struct WsReader {
    stream: futures_util::stream::SplitStream<WsStream>,
}

impl WsReader {
    /// Next message, or `None` once the stream is exhausted.
    pub async fn recv(&mut self) -> Option<Result<WsMessage>> {
        loop {
            match self.stream.next().await? {
                Ok(raw) => {
                    if let Some(msg) = WsMessage::from_raw(raw) {
                        return Some(Ok(msg));
                    }
                }
                Err(e) => return Some(Err(anyhow::anyhow!("WebSocket read error: {e}"))),
            }
        }
    }
}

/// Open a WebSocket connection to `url` and split it into halves.
///
/// # Errors
///
/// Returns an error when the URL cannot be turned into an upgrade request
/// or the handshake fails.
pub async fn connect(url: &str) -> Result<(WsWriter, WsReader)> {
    let request = url
        .into_client_request()
        .with_context(|| format!("invalid WebSocket URL: {url}"))?;

    let (ws_stream, _response) = tokio_tungstenite::connect_async(request)
        .await
        .context("WebSocket connect failed")?;

    let (sink, stream) = ws_stream.split();
    Ok((WsWriter { sink }, WsReader { stream }))
}

/// Rewrite an `http`/`https` URL to its `ws`/`wss` equivalent.
///
/// URLs already carrying a WebSocket scheme pass through untouched.
#[must_use]
pub fn http_to_ws_scheme(url: &str) -> String {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        return url.to_string();
    }
    url.replace("https://", "wss://").replace("http://", "ws://")
}
