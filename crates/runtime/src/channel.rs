//! Channel - outbound send handle shared across the runtime.
//!
//! The Channel is the one way anything in the client talks to the server.
//! It wraps a slot holding the current connection's outbound queue; the
//! supervisor binds the slot when a connection opens and unbinds it when the
//! connection dies. Sends while unbound are dropped silently - callers must
//! never assume delivery.

use parking_lot::Mutex;
use rsc_protocol::ClientMessage;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Clonable fire-and-forget sender for console frames.
#[derive(Clone, Default)]
pub struct Channel {
    slot: Arc<Mutex<Option<mpsc::UnboundedSender<Value>>>>,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the outbound queue of a freshly opened connection.
    pub fn bind(&self, outbound: mpsc::UnboundedSender<Value>) {
        *self.slot.lock() = Some(outbound);
    }

    /// Detach from a dead connection; subsequent sends are dropped.
    pub fn unbind(&self) {
        *self.slot.lock() = None;
    }

    /// Whether a live connection is currently bound.
    pub fn is_open(&self) -> bool {
        matches!(&*self.slot.lock(), Some(tx) if !tx.is_closed())
    }

    /// Queue one frame for transmission. Returns whether the frame was
    /// queued; `false` means the channel was closed and the frame dropped.
    pub fn send(&self, message: &ClientMessage) -> bool {
        let value = match serde_json::to_value(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize outbound frame: {}", e);
                return false;
            }
        };

        let slot = self.slot.lock();
        match &*slot {
            Some(tx) if tx.send(value).is_ok() => true,
            _ => {
                tracing::debug!(?message, "Channel closed; dropping frame");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_channel_drops_frames_silently() {
        let channel = Channel::new();
        assert!(!channel.is_open());
        assert!(!channel.send(&ClientMessage::GetSessions));
    }

    #[tokio::test]
    async fn bound_channel_queues_frames() {
        let channel = Channel::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        channel.bind(tx);

        assert!(channel.is_open());
        assert!(channel.send(&ClientMessage::GetSystemInfo));

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame, serde_json::json!({ "type": "get_system_info" }));
    }

    #[tokio::test]
    async fn unbind_returns_to_silent_drop() {
        let channel = Channel::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        channel.bind(tx);
        channel.unbind();
        assert!(!channel.is_open());
        assert!(!channel.send(&ClientMessage::GetSessions));
    }

    #[tokio::test]
    async fn dropped_receiver_reads_as_closed() {
        let channel = Channel::new();
        let (tx, rx) = mpsc::unbounded_channel();
        channel.bind(tx);
        drop(rx);
        assert!(!channel.is_open());
        assert!(!channel.send(&ClientMessage::GetSessions));
    }
}
