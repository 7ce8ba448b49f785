//! Terminal rendering for console data.
//!
//! Pure formatting: these functions take snapshots the runtime hands over
//! and return strings. Nothing here touches the network or the shared
//! state lock.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use rsc_protocol::{Session, SystemInfo};
use rsc_runtime::AlertLevel;

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable byte quantity with binary-prefix scaling.
///
/// 1024-based, two-decimal precision with trailing zeros trimmed:
/// `0 Bytes`, `1.5 KB`, `1 GB`. Quantities past TB stay in TB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(BYTE_UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut formatted = format!("{value:.2}");
    if formatted.contains('.') {
        formatted.truncate(formatted.trim_end_matches('0').trim_end_matches('.').len());
    }
    format!("{formatted} {}", BYTE_UNITS[exponent])
}

/// Local-time rendering of a server timestamp; `-` when the record lacked one.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}

/// One row per session, in the order the server sent them.
pub fn render_sessions(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return "No active sessions".to_string();
    }

    let id_width = column_width("ID", sessions.iter().map(|s| s.id.len()));
    let user_width = column_width("USER", sessions.iter().map(|s| s.username.len()));
    let ip_width = column_width("IP", sessions.iter().map(|s| s.ip.len()));

    let mut out = format!(
        "{:id_width$}  {:user_width$}  {:ip_width$}  {:19}  {:19}\n",
        "ID", "USER", "IP", "CONNECTED", "LAST ACTIVITY"
    );
    for session in sessions {
        out.push_str(&format!(
            "{:id_width$}  {:user_width$}  {:ip_width$}  {:19}  {:19}\n",
            session.id,
            session.username,
            session.ip,
            format_timestamp(session.connected_at),
            format_timestamp(session.last_activity),
        ));
    }
    out
}

/// Telemetry panel: CPU, memory, disk, network.
pub fn render_telemetry(info: &SystemInfo) -> String {
    format!(
        "CPU      {:.1}% across {} cores\n\
         Memory   total {} / used {} / free {}\n\
         Disk     total {} / used {} / free {}\n\
         Network  sent {} / received {}",
        info.cpu.usage,
        info.cpu.cores,
        format_bytes(info.memory.total),
        format_bytes(info.memory.used),
        format_bytes(info.memory.free),
        format_bytes(info.disk.total),
        format_bytes(info.disk.used),
        format_bytes(info.disk.free),
        format_bytes(info.network.sent),
        format_bytes(info.network.received),
    )
}

/// Colored transient alert line.
pub fn render_alert(level: AlertLevel, message: &str) -> String {
    match level {
        AlertLevel::Info => format!("{} {}", "info:".blue().bold(), message),
        AlertLevel::Success => format!("{} {}", "ok:".green().bold(), message),
        AlertLevel::Warning => format!("{} {}", "warning:".yellow().bold(), message),
        AlertLevel::Danger => format!("{} {}", "error:".red().bold(), message),
    }
}

fn column_width(header: &str, contents: impl Iterator<Item = usize>) -> usize {
    contents.chain(std::iter::once(header.len())).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_matches_console_conventions() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_073_741_824), "1 GB");
    }

    #[test]
    fn format_bytes_edge_cases() {
        assert_eq!(format_bytes(1), "1 Bytes");
        assert_eq!(format_bytes(1023), "1023 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        // Past TB the unit stays TB rather than indexing off the scale.
        assert_eq!(format_bytes(2_251_799_813_685_248), "2048 TB");
    }

    #[test]
    fn format_bytes_keeps_meaningful_decimals() {
        // 2.25 MB exactly
        assert_eq!(format_bytes(2_359_296), "2.25 MB");
        // Rounds to two decimals
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
    }

    #[test]
    fn missing_timestamp_renders_dash() {
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn sessions_render_in_server_order() {
        let sessions = vec![
            Session {
                id: "zulu".into(),
                username: "alice".into(),
                ip: "192.0.2.1".into(),
                ..Default::default()
            },
            Session {
                id: "alpha".into(),
                username: "bob".into(),
                ip: "192.0.2.2".into(),
                ..Default::default()
            },
        ];
        let table = render_sessions(&sessions);
        let zulu = table.find("zulu").unwrap();
        let alpha = table.find("alpha").unwrap();
        assert!(zulu < alpha, "server order not preserved");
        assert!(table.contains("alice"));
        assert!(table.contains("192.0.2.2"));
    }

    #[test]
    fn empty_registry_renders_placeholder() {
        assert_eq!(render_sessions(&[]), "No active sessions");
    }

    #[test]
    fn telemetry_panel_uses_byte_formatting() {
        let mut info = SystemInfo::default();
        info.cpu.usage = 42.5;
        info.cpu.cores = 8;
        info.memory.total = 1536;
        info.network.received = 1_073_741_824;
        let panel = render_telemetry(&info);
        assert!(panel.contains("42.5% across 8 cores"));
        assert!(panel.contains("total 1.5 KB"));
        assert!(panel.contains("received 1 GB"));
    }
}
