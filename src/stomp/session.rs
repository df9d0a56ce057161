//! STOMP session task.
//!
//! Walks the fixed session choreography on the client's runtime: open the
//! WebSocket, complete the `CONNECT`/`CONNECTED` handshake, register the
//! node events subscription, then forward every `MESSAGE` body to the
//! notification queue verbatim.
//!
//! # Protocol
//!
//! ```text
//! Client                                Broker
//!   │  ws connect /messages               │
//!   │────────────────────────────────────►│
//!   │  CONNECT accept-version,host        │
//!   │────────────────────────────────────►│
//!   │  CONNECTED version:1.2              │
//!   │◄────────────────────────────────────│
//!   │  SUBSCRIBE id:sub-0 destination:…   │
//!   │────────────────────────────────────►│   state → Subscribed
//!   │  MESSAGE …body…                     │
//!   │◄────────────────────────────────────│   body → queue
//! ```
//!
//! The subscription is registered only after `CONNECTED` arrives; both
//! writes happen in this single task, so the ordering holds by
//! construction. There is no reconnection and no error surfacing: any
//! failure is logged and the task ends, leaving the session state wherever
//! it was and the display showing its last value.
//!
//! Rust guideline compliant 2026-02

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::constants::{ENDPOINT_PATH, NODE_EVENTS_TOPIC, SUBSCRIPTION_ID};
use crate::stomp::frame::{self, Command, Frame};
use crate::stomp::{SessionState, SharedSessionState};

/// Everything the session task needs from the client.
#[derive(Debug)]
pub struct SessionConfig {
    /// Server base URL (`http`/`https` scheme).
    pub server_url: String,
    /// Lifecycle state cell shared with the display loop.
    pub state: Arc<SharedSessionState>,
    /// Queue feeding payloads to the display loop.
    pub notification_tx: mpsc::Sender<String>,
}

/// Build the WebSocket URL from the configured server URL.
///
/// Converts `https://` to `wss://` and `http://` to `ws://`, then appends
/// the fixed endpoint path.
fn endpoint_url(server_url: &str) -> String {
    format!(
        "{}{}",
        crate::ws::http_to_ws_scheme(server_url),
        ENDPOINT_PATH
    )
}

/// Virtual host name for the `CONNECT` frame, taken from the server URL.
///
/// Falls back to the raw URL string when it does not parse; the broker
/// does not validate the value.
fn stomp_host(server_url: &str) -> String {
    url::Url::parse(server_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| server_url.to_string())
}

/// Run one notification session to completion.
///
/// Single attempt: a transport failure, a rejected handshake, or a broker
/// close ends the task. Progress is observable only through the shared
/// session state and the notification queue.
pub async fn run_session(config: SessionConfig) {
    let ws_url = endpoint_url(&config.server_url);
    log::info!("[Stomp] Connecting to {}", ws_url);

    let (mut writer, mut reader) = match crate::ws::connect(&ws_url).await {
        Ok(pair) => {
            log::info!("[Stomp] WebSocket connected");
            pair
        }
        Err(e) => {
            log::warn!("[Stomp] Connection failed: {}", e);
            return;
        }
    };

    let connect = Frame::connect(&stomp_host(&config.server_url));
    if let Err(e) = writer.send_text(connect.encode()).await {
        log::warn!("[Stomp] Failed to send CONNECT: {}", e);
        return;
    }

    if !wait_for_connected(&mut writer, &mut reader).await {
        log::warn!("[Stomp] Session not established, giving up");
        return;
    }

    // Register the single subscription now that the session is ready.
    // SUBSCRIBE carries no receipt request, so the subscription counts as
    // active the moment the frame is written.
    let subscribe = Frame::subscribe(SUBSCRIPTION_ID, NODE_EVENTS_TOPIC);
    if let Err(e) = writer.send_text(subscribe.encode()).await {
        log::warn!("[Stomp] Failed to send SUBSCRIBE: {}", e);
        return;
    }
    log::info!(
        "[Stomp] Subscribed to {} (id={})",
        NODE_EVENTS_TOPIC,
        SUBSCRIPTION_ID
    );
    config.state.set(SessionState::Subscribed);

    run_message_loop(&config, &mut writer, &mut reader).await;
}

/// Wait for the broker's `CONNECTED` frame after sending `CONNECT`.
///
/// Returns `true` once the handshake completes, `false` on rejection,
/// error, or close.
async fn wait_for_connected(
    writer: &mut crate::ws::WsWriter,
    reader: &mut crate::ws::WsReader,
) -> bool {
    while let Some(msg_result) = reader.recv().await {
        match msg_result {
            Ok(crate::ws::WsMessage::Text(text)) => {
                if frame::is_heartbeat(&text) {
                    continue;
                }
                match Frame::parse(&text) {
                    Ok(frame) if frame.command == Command::Connected => {
                        log::debug!(
                            "[Stomp] Session established (version={})",
                            frame.header("version").unwrap_or("1.0")
                        );
                        return true;
                    }
                    Ok(frame) if frame.command == Command::Error => {
                        log::warn!(
                            "[Stomp] Broker rejected session: {}",
                            frame.header("message").unwrap_or(&frame.body)
                        );
                        return false;
                    }
                    Ok(frame) => {
                        log::debug!("[Stomp] Ignoring {} before CONNECTED", frame.command);
                    }
                    Err(e) => {
                        log::warn!("[Stomp] Unparseable frame before CONNECTED: {}", e);
                    }
                }
            }
            Ok(crate::ws::WsMessage::Ping(data)) => {
                let _ = writer.send_pong(data).await;
            }
            Ok(crate::ws::WsMessage::Close { code, reason }) => {
                log::warn!(
                    "[Stomp] Connection closed before CONNECTED (code={code}, reason={reason})"
                );
                return false;
            }
            Err(e) => {
                log::warn!("[Stomp] Error waiting for CONNECTED: {}", e);
                return false;
            }
            _ => {}
        }
    }

    false
}

/// Forward broker frames until the connection ends.
///
/// `MESSAGE` bodies for the node events subscription go to the queue
/// untouched. `ERROR` frames are logged and `RECEIPT` frames ignored;
/// neither reaches the display.
async fn run_message_loop(
    config: &SessionConfig,
    writer: &mut crate::ws::WsWriter,
    reader: &mut crate::ws::WsReader,
) {
    while let Some(msg_result) = reader.recv().await {
        match msg_result {
            Ok(crate::ws::WsMessage::Text(text)) => {
                if frame::is_heartbeat(&text) {
                    continue;
                }
                let frame = match Frame::parse(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        log::warn!("[Stomp] Unparseable frame: {}", e);
                        continue;
                    }
                };
                match frame.command {
                    Command::Message => {
                        // Brokers echo the subscription id; anything else
                        // has no registered consumer here
                        let subscription =
                            frame.header("subscription").unwrap_or(SUBSCRIPTION_ID);
                        if subscription != SUBSCRIPTION_ID {
                            log::trace!(
                                "[Stomp] Message for unknown subscription: {}",
                                subscription
                            );
                            continue;
                        }
                        if config.notification_tx.send(frame.body).await.is_err() {
                            log::info!(
                                "[Stomp] Notification receiver dropped, ending session"
                            );
                            return;
                        }
                    }
                    Command::Error => {
                        log::warn!(
                            "[Stomp] Broker error: {}",
                            frame.header("message").unwrap_or(&frame.body)
                        );
                    }
                    Command::Receipt => {
                        log::debug!(
                            "[Stomp] Receipt {}",
                            frame.header("receipt-id").unwrap_or("")
                        );
                    }
                    other => {
                        log::debug!("[Stomp] Ignoring unexpected {} frame", other);
                    }
                }
            }
            Ok(crate::ws::WsMessage::Ping(data)) => {
                let _ = writer.send_pong(data).await;
            }
            Ok(crate::ws::WsMessage::Close { code, reason }) => {
                log::info!(
                    "[Stomp] Connection closed by broker (code={code}, reason={reason})"
                );
                return;
            }
            Err(e) => {
                log::warn!("[Stomp] WebSocket error: {}", e);
                return;
            }
            _ => {}
        }
    }

    log::info!("[Stomp] WebSocket stream ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_http() {
        assert_eq!(
            endpoint_url("http://localhost:8080"),
            "ws://localhost:8080/messages"
        );
    }

    #[test]
    fn test_endpoint_url_https() {
        assert_eq!(
            endpoint_url("https://afs.example.com"),
            "wss://afs.example.com/messages"
        );
    }

    #[test]
    fn test_stomp_host_strips_port_and_scheme() {
        assert_eq!(stomp_host("http://localhost:8080"), "localhost");
        assert_eq!(stomp_host("https://afs.example.com/base"), "afs.example.com");
    }

    #[test]
    fn test_stomp_host_falls_back_to_raw_value() {
        assert_eq!(stomp_host("not a url"), "not a url");
    }

    #[test]
    fn test_handshake_frames_use_fixed_values() {
        let connect = Frame::connect(&stomp_host("http://localhost:8080"));
        assert_eq!(connect.header("host"), Some("localhost"));
        assert_eq!(connect.header("heart-beat"), Some("0,0"));

        let subscribe = Frame::subscribe(SUBSCRIPTION_ID, NODE_EVENTS_TOPIC);
        assert_eq!(subscribe.header("id"), Some("sub-0"));
        assert_eq!(
            subscribe.header("destination"),
            Some("/afs/v1/node_events/mem")
        );
    }
}
