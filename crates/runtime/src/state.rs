//! Local mirror of the server's console state.
//!
//! [`ConsoleState`] holds everything the client knows: the session registry,
//! the current selection, the output stream for the selected session, and
//! the latest telemetry snapshot. All four live behind one coarse lock so
//! compound invariants hold regardless of which task mutates them:
//!
//! - a `sessions_update` replace is atomic - no stale entry survives it;
//! - selecting a session and clearing the output stream happen together;
//! - a dropped selection always takes its output with it.
//!
//! The registry is never patched incrementally. The server sends a full
//! session list each time and the client installs it wholesale, preserving
//! server order for rendering.

use indexmap::IndexMap;
use parking_lot::Mutex;
use rsc_protocol::{Session, SystemInfo};

#[derive(Default)]
struct Inner {
    sessions: IndexMap<String, Session>,
    selected: Option<String>,
    output: Vec<String>,
    telemetry: Option<SystemInfo>,
}

/// Shared console view state.
#[derive(Default)]
pub struct ConsoleState {
    inner: Mutex<Inner>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the whole session registry, preserving server
    /// order. Returns `true` if the current selection vanished with the
    /// update; in that case the selection and its output are cleared.
    pub fn replace_sessions(&self, sessions: Vec<Session>) -> bool {
        let mut inner = self.inner.lock();
        inner.sessions = sessions.into_iter().map(|s| (s.id.clone(), s)).collect();

        let selection_dropped = matches!(
            &inner.selected,
            Some(id) if !inner.sessions.contains_key(id)
        );
        if selection_dropped {
            inner.selected = None;
            inner.output.clear();
        }
        selection_dropped
    }

    /// Select a session and clear the output stream. Ids absent from the
    /// registry are allowed: validation belongs to the server at send time.
    pub fn select(&self, id: &str) {
        let mut inner = self.inner.lock();
        inner.selected = Some(id.to_string());
        inner.output.clear();
    }

    /// Drop the selection and its output.
    pub fn clear_selection(&self) {
        let mut inner = self.inner.lock();
        inner.selected = None;
        inner.output.clear();
    }

    /// Currently selected session id, if any.
    pub fn selected(&self) -> Option<String> {
        self.inner.lock().selected.clone()
    }

    /// Append an output chunk. `origin` is the session the chunk was tagged
    /// with; a tag that does not match the current selection means the chunk
    /// belongs to another session and is rejected. Untagged chunks (servers
    /// that predate the tag) are attributed to the selection.
    pub fn append_output(&self, chunk: &str, origin: Option<&str>) -> bool {
        let mut inner = self.inner.lock();
        match (origin, inner.selected.as_deref()) {
            (Some(tag), Some(selected)) if tag != selected => false,
            (Some(_), None) => false,
            _ => {
                inner.output.push(chunk.to_string());
                true
            }
        }
    }

    /// Snapshot of the output stream in arrival order.
    pub fn output(&self) -> Vec<String> {
        self.inner.lock().output.clone()
    }

    /// Replace the telemetry snapshot wholesale.
    pub fn replace_telemetry(&self, info: SystemInfo) {
        self.inner.lock().telemetry = Some(info);
    }

    /// Latest telemetry snapshot, if one has arrived.
    pub fn telemetry(&self) -> Option<SystemInfo> {
        self.inner.lock().telemetry.clone()
    }

    /// Look up a session by id. Defined iff the id appeared in the most
    /// recent replace.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner.lock().sessions.get(id).cloned()
    }

    /// Snapshot of all sessions in server order.
    pub fn sessions(&self) -> Vec<Session> {
        self.inner.lock().sessions.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            username: "user".to_string(),
            ip: "10.0.0.1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn replace_is_full_no_stale_entries() {
        let state = ConsoleState::new();
        state.replace_sessions(vec![session("a"), session("b")]);
        assert!(state.get("a").is_some());
        assert!(state.get("b").is_some());

        state.replace_sessions(vec![session("b"), session("c")]);
        assert!(state.get("a").is_none(), "stale entry survived replace");
        assert!(state.get("b").is_some());
        assert!(state.get("c").is_some());
    }

    #[test]
    fn replace_preserves_server_order() {
        let state = ConsoleState::new();
        state.replace_sessions(vec![session("z"), session("a"), session("m")]);
        let ids: Vec<String> = state.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn select_clears_output() {
        let state = ConsoleState::new();
        state.select("a");
        assert!(state.append_output("from a\n", None));
        assert_eq!(state.output().len(), 1);

        state.select("b");
        assert!(state.output().is_empty(), "output from a visible after selecting b");
    }

    #[test]
    fn selection_may_reference_unknown_id() {
        let state = ConsoleState::new();
        state.select("ghost");
        assert_eq!(state.selected().as_deref(), Some("ghost"));
    }

    #[test]
    fn replace_drops_vanished_selection_and_output() {
        let state = ConsoleState::new();
        state.replace_sessions(vec![session("a")]);
        state.select("a");
        state.append_output("hello\n", None);

        let dropped = state.replace_sessions(vec![session("b")]);
        assert!(dropped);
        assert!(state.selected().is_none());
        assert!(state.output().is_empty());
    }

    #[test]
    fn replace_keeps_surviving_selection() {
        let state = ConsoleState::new();
        state.replace_sessions(vec![session("a")]);
        state.select("a");
        state.append_output("hello\n", None);

        let dropped = state.replace_sessions(vec![session("a"), session("b")]);
        assert!(!dropped);
        assert_eq!(state.selected().as_deref(), Some("a"));
        assert_eq!(state.output().len(), 1);
    }

    #[test]
    fn tagged_output_for_other_session_is_rejected() {
        let state = ConsoleState::new();
        state.select("a");
        assert!(state.append_output("mine\n", Some("a")));
        assert!(!state.append_output("not mine\n", Some("b")));
        assert_eq!(state.output(), vec!["mine\n".to_string()]);
    }

    #[test]
    fn tagged_output_without_selection_is_rejected() {
        let state = ConsoleState::new();
        assert!(!state.append_output("orphan\n", Some("a")));
    }

    #[test]
    fn untagged_output_is_appended_in_order() {
        let state = ConsoleState::new();
        state.select("a");
        state.append_output("one\n", None);
        state.append_output("two\n", None);
        assert_eq!(state.output(), vec!["one\n".to_string(), "two\n".to_string()]);
    }

    #[test]
    fn telemetry_is_latest_wins() {
        let state = ConsoleState::new();
        assert!(state.telemetry().is_none());

        let mut first = SystemInfo::default();
        first.cpu.cores = 4;
        state.replace_telemetry(first);

        let mut second = SystemInfo::default();
        second.cpu.cores = 8;
        state.replace_telemetry(second.clone());

        assert_eq!(state.telemetry(), Some(second));
    }
}
