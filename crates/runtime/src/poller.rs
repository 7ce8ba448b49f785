//! Telemetry poller: fixed-cadence `get_system_info` requests.
//!
//! The poller ticks for the lifetime of the process. It never pauses, backs
//! off, or checks whether the connection is up - a tick while disconnected
//! just drops its frame at the Channel, which is the contract callers get
//! from fire-and-forget sends.

use crate::channel::Channel;
use rsc_protocol::ClientMessage;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Default cadence for telemetry requests.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(5);

/// Time-driven requester of host telemetry snapshots.
pub struct TelemetryPoller;

impl TelemetryPoller {
    /// Spawn the poll loop. The returned handle is never awaited in normal
    /// operation; the task runs until the process exits.
    pub fn spawn(channel: Channel, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !channel.send(&ClientMessage::GetSystemInfo) {
                    tracing::debug!("Telemetry tick while disconnected; request dropped");
                }
            }
        })
    }
}
