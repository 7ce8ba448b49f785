//! Connection layer: frame dispatch for one established WebSocket.
//!
//! This module owns the lifetime of a single connection. It pumps the
//! transport in both directions and routes every inbound frame by its
//! `type` discriminator:
//!
//! 1. The reader task parses wire text into JSON values
//! 2. The dispatch loop interprets each value as a [`ServerMessage`]
//! 3. State frames (`sessions_update`, `system_info`) replace local state
//!    wholesale; stream frames (`command_output`) append; `error` frames
//!    surface verbatim
//! 4. The presentation layer is notified through [`UiEvent`]s
//!
//! Frames are handled strictly in delivery order. A frame that fails to
//! parse, or carries an unrecognized type, is logged and ignored - it never
//! disturbs the processing of later frames.

use crate::error::Result;
use crate::events::{AlertLevel, UiEvent};
use crate::state::ConsoleState;
use crate::transport::{Transport, TransportParts, TransportReceiver};
use rsc_protocol::ServerMessage;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;
use tokio::sync::mpsc;

/// One live connection to the console server.
///
/// Created by the supervisor from freshly split transport parts; torn down
/// when `run()` returns. The outbound queue handed out by [`Self::outbound`]
/// is what the shared [`crate::Channel`] binds to.
pub struct Connection {
    /// Queue of outbound frames consumed by the writer task.
    outbound_tx: mpsc::UnboundedSender<Value>,
    /// Transport sender (taken by run() to start the writer task).
    transport_sender: TokioMutex<Option<Box<dyn Transport>>>,
    /// Transport receiver (taken by run() to start the reader task).
    transport_receiver: TokioMutex<Option<Box<dyn TransportReceiver>>>,
    /// Inbound frames produced by the reader task.
    message_rx: TokioMutex<Option<mpsc::UnboundedReceiver<Value>>>,
    /// Receiver for outbound frames (taken by run() to start the writer task).
    outbound_rx: TokioMutex<Option<mpsc::UnboundedReceiver<Value>>>,
    /// Shared console view state.
    state: Arc<ConsoleState>,
    /// Notifications for the presentation layer.
    events: mpsc::UnboundedSender<UiEvent>,
}

impl Connection {
    /// Create a new Connection over the given transport.
    pub fn new(
        parts: TransportParts,
        state: Arc<ConsoleState>,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        let TransportParts {
            sender,
            receiver,
            message_rx,
        } = parts;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        Self {
            outbound_tx,
            transport_sender: TokioMutex::new(Some(sender)),
            transport_receiver: TokioMutex::new(Some(receiver)),
            message_rx: TokioMutex::new(Some(message_rx)),
            outbound_rx: TokioMutex::new(Some(outbound_rx)),
            state,
            events,
        }
    }

    /// Outbound queue for this connection, suitable for `Channel::bind`.
    pub fn outbound(&self) -> mpsc::UnboundedSender<Value> {
        self.outbound_tx.clone()
    }

    /// Run the dispatch loop until the transport dies or closes.
    ///
    /// Spawns reader and writer tasks, then consumes inbound frames in
    /// delivery order. Can only be called once per connection.
    pub async fn run(self: &Arc<Self>) {
        let mut transport_receiver = self
            .transport_receiver
            .lock()
            .await
            .take()
            .expect("run() can only be called once - transport receiver already taken");

        let mut transport_sender = self
            .transport_sender
            .lock()
            .await
            .take()
            .expect("run() can only be called once - transport sender already taken");

        let mut outbound_rx = self
            .outbound_rx
            .lock()
            .await
            .take()
            .expect("run() can only be called once - outbound receiver already taken");

        let reader_handle = tokio::spawn(async move {
            if let Err(e) = transport_receiver.run().await {
                tracing::error!("Transport read error: {}", e);
            }
        });

        let writer_handle = tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                if let Err(e) = transport_sender.send(message).await {
                    tracing::error!("Transport write error: {}", e);
                    break;
                }
            }
        });

        let mut message_rx = self
            .message_rx
            .lock()
            .await
            .take()
            .expect("run() can only be called once - message receiver already taken");

        while let Some(frame) = message_rx.recv().await {
            match serde_json::from_value::<ServerMessage>(frame) {
                Ok(message) => {
                    if let Err(e) = self.dispatch(message) {
                        tracing::warn!("Error dispatching frame: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed frame: {}", e);
                }
            }
        }

        let _ = reader_handle.await;
        writer_handle.abort();
        let _ = writer_handle.await;
    }

    /// Route one parsed frame into state and notify the presentation layer.
    fn dispatch(&self, message: ServerMessage) -> Result<()> {
        match message {
            ServerMessage::SessionsUpdate { sessions } => {
                tracing::debug!(count = sessions.len(), "Applying session registry replace");
                let previous_selection = self.state.selected();
                let selection_dropped = self.state.replace_sessions(sessions);
                self.emit(UiEvent::SessionsChanged);
                if selection_dropped {
                    self.emit(UiEvent::OutputCleared);
                    self.emit(UiEvent::Alert {
                        level: AlertLevel::Warning,
                        message: format!(
                            "Session {} is no longer active",
                            previous_selection.unwrap_or_default()
                        ),
                    });
                }
            }
            ServerMessage::CommandOutput { output, session_id } => {
                if self.state.append_output(&output, session_id.as_deref()) {
                    self.emit(UiEvent::OutputAppended(output));
                } else {
                    tracing::warn!(
                        origin = session_id.as_deref().unwrap_or("<untagged>"),
                        "Discarding output chunk for non-selected session"
                    );
                }
            }
            ServerMessage::SystemInfo { info } => {
                self.state.replace_telemetry(info);
                self.emit(UiEvent::TelemetryUpdated);
            }
            ServerMessage::Error { message } => {
                self.emit(UiEvent::Alert {
                    level: AlertLevel::Danger,
                    message,
                });
            }
            ServerMessage::Unknown => {
                tracing::debug!("Unknown frame type (forward-compatible, ignored)");
            }
        }
        Ok(())
    }

    fn emit(&self, event: UiEvent) {
        // Presentation layer may have gone away during shutdown.
        let _ = self.events.send(event);
    }
}
