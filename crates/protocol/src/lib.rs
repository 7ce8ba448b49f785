//! Wire types for the remote session console protocol.
//!
//! This crate contains the serde-serializable types exchanged with the
//! console server over a single WebSocket connection. These types represent
//! the "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **1:1 with the wire**: Every frame is a JSON object tagged by `type`
//! - **Forward-compatible**: Unrecognized server frame types deserialize to
//!   [`ServerMessage::Unknown`] instead of failing the whole read loop
//!
//! Synchronization logic is built on top of these types in `rsc-runtime`.

pub mod message;
pub mod session;
pub mod telemetry;

pub use message::*;
pub use session::*;
pub use telemetry::*;
