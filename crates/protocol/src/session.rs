//! Session records as reported by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One active remote session tracked by the server.
///
/// Sessions are owned by the server: the client never edits fields, it only
/// replaces its whole local set whenever a `sessions_update` frame arrives.
/// Every field carries a default so a record with missing fields renders
/// best-effort instead of aborting the update that contains it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Unique server-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// User the session authenticated as.
    #[serde(default)]
    pub username: String,
    /// Remote address of the session.
    #[serde(default)]
    pub ip: String,
    /// When the session connected.
    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
    /// When the session last ran a command.
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_round_trips() {
        let json = serde_json::json!({
            "id": "sess-1",
            "username": "operator",
            "ip": "10.0.0.7",
            "connected_at": "2024-05-01T12:00:00Z",
            "last_activity": "2024-05-01T12:30:00Z",
        });
        let session: Session = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(session.id, "sess-1");
        assert_eq!(session.username, "operator");
        assert_eq!(session.ip, "10.0.0.7");
        assert!(session.connected_at.is_some());
        assert_eq!(serde_json::to_value(&session).unwrap(), json);
    }

    #[test]
    fn missing_fields_are_tolerated() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "id": "sess-2"
        }))
        .unwrap();
        assert_eq!(session.id, "sess-2");
        assert_eq!(session.username, "");
        assert!(session.connected_at.is_none());
        assert!(session.last_activity.is_none());
    }
}
