//! Console Runtime - Connection lifecycle, state synchronization, and dispatch
//!
//! This crate provides the client-side infrastructure for keeping a local
//! view of a remote-session console consistent with an authoritative server
//! over a single WebSocket:
//!
//! - **Transport**: Bidirectional JSON frame transport over WebSocket
//! - **Connection**: Inbound frame parsing and dispatch by frame type
//! - **Console state**: Session registry, selection, output stream, telemetry
//! - **Channel**: Fire-and-forget outbound send handle (drops when closed)
//! - **Supervisor**: Reconnect loop with exponential backoff and resync
//! - **Poller**: Fixed-cadence telemetry requests
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐
//! │  rsc-cli   │  Rendering and user input
//! └─────┬──────┘
//!       │ UiEvent stream / CommandDispatcher
//! ┌─────▼──────┐
//! │rsc-runtime │  This crate
//! │ ┌────────┐ │
//! │ │ Superv │ │  Connect/retry lifecycle
//! │ └────────┘ │
//! │ ┌────────┐ │
//! │ │ Conn   │ │  Frame dispatch into ConsoleState
//! │ └────────┘ │
//! │ ┌────────┐ │
//! │ │ Trans  │ │  WebSocket transport
//! │ └────────┘ │
//! └────────────┘
//! ```
//!
//! All mutable view state lives in one [`state::ConsoleState`] object behind
//! a single coarse lock, so full-replace updates and clear-on-select stay
//! atomic no matter which task triggers them.

pub mod channel;
pub mod commands;
pub mod connection;
pub mod error;
pub mod events;
pub mod poller;
pub mod state;
pub mod supervisor;
pub mod transport;

// Re-export key types at crate root
pub use channel::Channel;
pub use commands::CommandDispatcher;
pub use connection::Connection;
pub use error::{Error, Result};
pub use events::{AlertLevel, UiEvent};
pub use poller::{DEFAULT_POLL_PERIOD, TelemetryPoller};
pub use state::ConsoleState;
pub use supervisor::Supervisor;
pub use transport::{
    Transport, TransportParts, TransportReceiver, WebSocketTransport, WebSocketTransportReceiver,
    WebSocketTransportSender,
};
