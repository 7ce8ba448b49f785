//! Command dispatcher: user actions validated and turned into frames.
//!
//! Everything here fails locally before anything touches the network: a
//! submit with no selection or an empty command never produces a frame, it
//! produces a warning alert. Valid actions are fire-and-forget through the
//! shared [`Channel`]; the server is the authority on whether they succeed.

use crate::channel::Channel;
use crate::events::{AlertLevel, UiEvent};
use crate::state::ConsoleState;
use rsc_protocol::ClientMessage;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Validates and dispatches user actions for the selected session.
#[derive(Clone)]
pub struct CommandDispatcher {
    state: Arc<ConsoleState>,
    channel: Channel,
    events: mpsc::UnboundedSender<UiEvent>,
}

impl CommandDispatcher {
    pub fn new(
        state: Arc<ConsoleState>,
        channel: Channel,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            state,
            channel,
            events,
        }
    }

    /// Select the session commands will target. Clears the previous
    /// session's output and announces the switch.
    pub fn select_session(&self, id: &str) {
        self.state.select(id);
        self.emit(UiEvent::OutputCleared);
        self.alert(AlertLevel::Info, format!("Session {id} selected"));
    }

    /// Submit a command for the selected session.
    ///
    /// Rejected locally, with a warning and no frame, when nothing is
    /// selected or the text trims to empty. Otherwise sends exactly one
    /// `execute_command` frame and asks the presentation layer to clear the
    /// input, regardless of whether the server ultimately accepts it.
    pub fn submit_command(&self, text: &str) {
        let Some(session_id) = self.state.selected() else {
            self.alert(AlertLevel::Warning, "Select a session first".to_string());
            return;
        };

        let command = text.trim();
        if command.is_empty() {
            self.alert(AlertLevel::Warning, "Enter a command".to_string());
            return;
        }

        self.channel.send(&ClientMessage::ExecuteCommand {
            session_id,
            command: command.to_string(),
        });
        self.emit(UiEvent::ClearInput);
    }

    /// Request teardown of a session. The confirmation step lives in the
    /// presentation layer; by the time this is called the user said yes.
    ///
    /// The row is NOT removed locally - removal only happens via the next
    /// `sessions_update` full replace, so a just-terminated session keeps
    /// rendering as live until the server confirms.
    pub fn request_termination(&self, id: &str) {
        self.channel.send(&ClientMessage::TerminateSession {
            session_id: id.to_string(),
        });
    }

    fn alert(&self, level: AlertLevel, message: String) {
        self.emit(UiEvent::Alert { level, message });
    }

    fn emit(&self, event: UiEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    struct Harness {
        dispatcher: CommandDispatcher,
        state: Arc<ConsoleState>,
        outbound: mpsc::UnboundedReceiver<Value>,
        events: mpsc::UnboundedReceiver<UiEvent>,
    }

    fn harness() -> Harness {
        let state = Arc::new(ConsoleState::new());
        let channel = Channel::new();
        let (outbound_tx, outbound) = mpsc::unbounded_channel();
        channel.bind(outbound_tx);
        let (events_tx, events) = mpsc::unbounded_channel();
        let dispatcher = CommandDispatcher::new(Arc::clone(&state), channel, events_tx);
        Harness {
            dispatcher,
            state,
            outbound,
            events,
        }
    }

    #[tokio::test]
    async fn submit_without_selection_sends_nothing() {
        let mut h = harness();
        h.dispatcher.submit_command("ls -la");

        assert!(h.outbound.try_recv().is_err(), "frame sent without selection");
        match h.events.try_recv().unwrap() {
            UiEvent::Alert { level, .. } => assert_eq!(level, AlertLevel::Warning),
            other => panic!("expected warning alert, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_and_whitespace_commands_send_nothing() {
        let mut h = harness();
        h.state.select("sess-1");

        h.dispatcher.submit_command("");
        h.dispatcher.submit_command("   ");

        assert!(h.outbound.try_recv().is_err());
    }

    #[tokio::test]
    async fn valid_submit_sends_one_trimmed_frame_and_clears_input() {
        let mut h = harness();
        h.dispatcher.select_session("sess-1");

        h.dispatcher.submit_command("  ls -la  ");

        let frame = h.outbound.try_recv().unwrap();
        assert_eq!(
            frame,
            serde_json::json!({
                "type": "execute_command",
                "session_id": "sess-1",
                "command": "ls -la",
            })
        );
        assert!(h.outbound.try_recv().is_err(), "more than one frame sent");

        let mut saw_clear_input = false;
        while let Ok(event) = h.events.try_recv() {
            if event == UiEvent::ClearInput {
                saw_clear_input = true;
            }
        }
        assert!(saw_clear_input);
    }

    #[tokio::test]
    async fn select_announces_and_clears_output() {
        let mut h = harness();
        h.state.select("old");
        h.state.append_output("stale\n", None);

        h.dispatcher.select_session("sess-9");

        assert_eq!(h.state.selected().as_deref(), Some("sess-9"));
        assert!(h.state.output().is_empty());
        assert_eq!(h.events.try_recv().unwrap(), UiEvent::OutputCleared);
        match h.events.try_recv().unwrap() {
            UiEvent::Alert { level, message } => {
                assert_eq!(level, AlertLevel::Info);
                assert!(message.contains("sess-9"));
            }
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn termination_sends_frame_but_keeps_row() {
        let mut h = harness();
        h.state.replace_sessions(vec![rsc_protocol::Session {
            id: "sess-1".into(),
            ..Default::default()
        }]);

        h.dispatcher.request_termination("sess-1");

        let frame = h.outbound.try_recv().unwrap();
        assert_eq!(
            frame,
            serde_json::json!({ "type": "terminate_session", "session_id": "sess-1" })
        );
        // Eventual consistency: the row stays until the next full replace.
        assert!(h.state.get("sess-1").is_some());
    }
}
