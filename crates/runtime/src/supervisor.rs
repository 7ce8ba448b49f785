//! Supervisor: connect/retry lifecycle for the console connection.
//!
//! The underlying protocol has no reconnect of its own - once a socket
//! dies, it is dead. The supervisor wraps the connection in a loop:
//! connect, bind the shared Channel, resynchronize the session registry
//! with `get_sessions`, run the connection to completion, unbind, back off,
//! retry. Backoff is exponential with uniform jitter and resets after every
//! successful open, so a flapping server is not hammered but a brief blip
//! recovers quickly.

use crate::channel::Channel;
use crate::connection::Connection;
use crate::events::{AlertLevel, UiEvent};
use crate::state::ConsoleState;
use crate::transport::WebSocketTransport;
use rand::Rng;
use rsc_protocol::ClientMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);
const JITTER_MS: u64 = 500;

/// Owns the connect/reconnect loop for one server endpoint.
pub struct Supervisor {
    url: String,
    state: Arc<ConsoleState>,
    channel: Channel,
    events: mpsc::UnboundedSender<UiEvent>,
}

impl Supervisor {
    pub fn new(
        url: String,
        state: Arc<ConsoleState>,
        channel: Channel,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            url,
            state,
            channel,
            events,
        }
    }

    /// Run the supervision loop forever.
    pub async fn run(self) {
        let mut backoff = INITIAL_BACKOFF;

        loop {
            tracing::info!(url = %self.url, "Connecting to console server");
            match WebSocketTransport::connect(&self.url).await {
                Ok((transport, message_rx)) => {
                    let parts = transport.into_transport_parts(message_rx);
                    let connection = Arc::new(Connection::new(
                        parts,
                        Arc::clone(&self.state),
                        self.events.clone(),
                    ));

                    self.channel.bind(connection.outbound());
                    self.alert(AlertLevel::Success, "Connected to server".to_string());

                    // Populate the view immediately rather than waiting for
                    // a push; on reconnect this resynchronizes the registry.
                    self.channel.send(&ClientMessage::GetSessions);

                    connection.run().await;

                    self.channel.unbind();
                    self.alert(AlertLevel::Danger, "Disconnected from server".to_string());
                    backoff = INITIAL_BACKOFF;
                }
                Err(e) => {
                    tracing::warn!("Connection attempt failed: {}", e);
                    self.alert(AlertLevel::Danger, format!("Connection failed: {e}"));
                }
            }

            let jitter = Duration::from_millis(rand::rng().random_range(0..=JITTER_MS));
            tracing::debug!(
                backoff_secs = backoff.as_secs(),
                "Retrying after backoff"
            );
            tokio::time::sleep(backoff + jitter).await;
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
    }

    fn alert(&self, level: AlertLevel, message: String) {
        let _ = self.events.send(UiEvent::Alert { level, message });
    }
}
