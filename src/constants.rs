//! Application-wide constants for afs-notify.
//!
//! This module centralizes all magic strings and configuration constants
//! to improve maintainability and discoverability. Constants are grouped
//! by domain with documentation explaining their purpose.
//!
//! # Categories
//!
//! - **Endpoints**: Fixed server paths and topic names
//! - **Session**: STOMP handshake values
//! - **Polling**: Event loop intervals and queue sizing

use std::time::Duration;

// ============================================================================
// Endpoints
// ============================================================================

/// WebSocket endpoint path on the notification server.
///
/// The server exposes its message broker at this fixed path. The client
/// appends it to the configured server URL when opening the connection.
pub const ENDPOINT_PATH: &str = "/messages";

/// Broker topic carrying node event payloads.
///
/// Assembled from [`NODE_EVENTS_API_VERSION`] and [`NODE_EVENTS_FILE_SYSTEM`];
/// the server publishes one topic per file system under a versioned prefix.
pub const NODE_EVENTS_TOPIC: &str = "/afs/v1/node_events/mem";

/// API version segment of the node events topic.
pub const NODE_EVENTS_API_VERSION: &str = "v1";

/// File system name segment of the node events topic.
///
/// The demo server stores its file system under the name `mem`.
pub const NODE_EVENTS_FILE_SYSTEM: &str = "mem";

// ============================================================================
// Session
// ============================================================================

/// Identifier assigned to the single subscription.
///
/// The client registers exactly one subscription per session; the broker
/// echoes this id back in every `MESSAGE` frame on the topic.
pub const SUBSCRIPTION_ID: &str = "sub-0";

/// Protocol versions offered in the `CONNECT` frame.
pub const STOMP_ACCEPT_VERSIONS: &str = "1.0,1.1,1.2";

/// Heart-beat offer in the `CONNECT` frame.
///
/// `0,0` disables heart-beating in both directions. The session has no
/// keepalive or timeout mechanism; a dead connection is simply never
/// noticed, and the display keeps its last value.
pub const STOMP_HEART_BEAT: &str = "0,0";

// ============================================================================
// Polling & Queues
// ============================================================================

/// Capacity of the notification queue between the session task and the
/// display loop.
///
/// Payloads beyond this backlog block the session task until the display
/// loop drains; since every payload overwrites the previous one, a deep
/// backlog only delays convergence to the latest value.
pub const NOTIFICATION_QUEUE_CAPACITY: usize = 256;

/// Display frame rate delay (approximately 60fps).
///
/// Controls how often the display redraws. 16ms gives roughly 60fps
/// which provides smooth visual updates without excessive CPU usage.
pub const FRAME_RATE_DELAY: Duration = Duration::from_millis(16);

/// Keyboard poll interval per display frame.
///
/// Bounds how long a frame waits for input before draining notifications
/// and redrawing.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths_are_rooted() {
        assert!(ENDPOINT_PATH.starts_with('/'));
        assert!(NODE_EVENTS_TOPIC.starts_with('/'));
    }

    #[test]
    fn test_topic_embeds_version_and_file_system() {
        assert_eq!(
            NODE_EVENTS_TOPIC,
            format!("/afs/{NODE_EVENTS_API_VERSION}/node_events/{NODE_EVENTS_FILE_SYSTEM}")
        );
    }

    #[test]
    fn test_heart_beat_is_disabled() {
        assert_eq!(STOMP_HEART_BEAT, "0,0");
    }

    #[test]
    fn test_poll_intervals_ordering() {
        // Input polling must leave headroom inside a frame
        assert!(INPUT_POLL_INTERVAL < FRAME_RATE_DELAY);
    }

    #[test]
    fn test_queue_capacity_is_positive() {
        assert!(NOTIFICATION_QUEUE_CAPACITY > 0);
    }
}
