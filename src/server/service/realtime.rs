//! In-process fan-out of real-time events to WebSocket connections.
//!
//! Every connection subscribes to one broadcast channel and filters events by target.
//! Publishing never blocks and never fails the caller: with no subscribers the event is
//! dropped, and slow subscribers skip events they lagged behind on.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::server::model::user::Role;

const CHANNEL_CAPACITY: usize = 256;

/// Who an event is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    User(i32),
    Role(Role),
    All,
}

#[derive(Debug, Clone)]
pub struct RealtimeEvent {
    pub target: Target,
    /// Event name sent to clients, e.g. `notification` or `announcement`.
    pub event: &'static str,
    pub data: serde_json::Value,
}

/// Frame written to the socket.
#[derive(Debug, Serialize)]
pub struct RealtimeFrame<'a> {
    pub event: &'a str,
    pub data: &'a serde_json::Value,
}

impl RealtimeEvent {
    pub fn new(target: Target, event: &'static str, data: impl Serialize) -> Self {
        let data = serde_json::to_value(data).unwrap_or(serde_json::Value::Null);
        Self {
            target,
            event,
            data,
        }
    }

    /// Whether a connection authenticated as `user_id` with `role` receives this event.
    pub fn is_for(&self, user_id: i32, role: Role) -> bool {
        match self.target {
            Target::User(id) => id == user_id,
            Target::Role(target_role) => role == target_role || role == Role::Admin,
            Target::All => true,
        }
    }

    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&RealtimeFrame {
            event: self.event,
            data: &self.data,
        })
    }
}

#[derive(Clone)]
pub struct RealtimeHub {
    sender: broadcast::Sender<RealtimeEvent>,
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event to every connection.
    ///
    /// # Returns
    /// - Number of connections the event was handed to (0 when nobody is connected)
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!("No realtime subscribers, event dropped");
                0
            }
        }
    }
}
