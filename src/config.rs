#![cfg(feature = "std")]

use std::time::Duration;

/// Game id used when a request names none.
pub const DEFAULT_GAME_ID: &str = "default";
pub const DEFAULT_DEFENSE_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_CONNECT_ADDR: &str = "127.0.0.1:5000";

/// Default timeout for a single network operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest accepted binary frame (1 MiB).
pub const MAX_MESSAGE_SIZE: u32 = 1 << 20;
/// How often an idle server re-checks whether every game is over.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Network settings shared by servers and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetConfig {
    pub timeout: Duration,
    pub max_message_size: u32,
    pub poll_interval: Duration,
}

impl NetConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_message_size: MAX_MESSAGE_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
