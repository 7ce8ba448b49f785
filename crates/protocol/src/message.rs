//! Frame envelopes exchanged over the console WebSocket.
//!
//! All frames are JSON objects discriminated by a `type` field. The client
//! sends small request frames; the server pushes state in full (session
//! list, telemetry snapshot) or streams incremental command output.

use crate::session::Session;
use crate::telemetry::SystemInfo;
use serde::{Deserialize, Serialize};

/// Frames sent from the console client to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request the full session list.
    GetSessions,
    /// Request a telemetry snapshot.
    GetSystemInfo,
    /// Run `command` in the context of `session_id`.
    ExecuteCommand { session_id: String, command: String },
    /// Request teardown of `session_id`.
    TerminateSession { session_id: String },
}

/// Frames pushed from the server to the console client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full replace of the session registry, in server order.
    SessionsUpdate { sessions: Vec<Session> },
    /// One chunk of streamed command output.
    ///
    /// `session_id` tags the originating session so the client can discard
    /// chunks that do not belong to the current selection. Servers predating
    /// the tag omit it; untagged chunks are attributed to the selection.
    CommandOutput {
        output: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    /// Wholesale replacement of the telemetry snapshot.
    SystemInfo { info: SystemInfo },
    /// User-visible error; does not alter client state.
    Error { message: String },
    /// Forward-compatible catch-all for unrecognized frame types.
    #[serde(other)]
    Unknown,
}
