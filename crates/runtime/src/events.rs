//! Notifications pushed to the presentation layer.
//!
//! The runtime never renders anything itself; it emits [`UiEvent`]s on an
//! unbounded channel and the front end decides how to draw them. Alert
//! levels mirror the transient banner kinds of the console UI.

/// Severity of a transient alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

/// One notification for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Show a transient alert banner.
    Alert { level: AlertLevel, message: String },
    /// The session registry was replaced; re-render the table.
    SessionsChanged,
    /// A chunk was appended to the output stream; scroll to it.
    OutputAppended(String),
    /// The output stream was cleared (selection changed or ended).
    OutputCleared,
    /// The telemetry snapshot was replaced.
    TelemetryUpdated,
    /// A command was dispatched; clear the input field.
    ClearInput,
}
