use clap::Parser;

/// Interactive console for managing remote sessions.
///
/// Connects to a console server over WebSocket, mirrors its session table,
/// streams command output for a selected session, and polls host telemetry.
#[derive(Debug, Parser)]
#[command(name = "rsc", version, about)]
pub struct Cli {
    /// WebSocket endpoint of the console server
    #[arg(long, default_value = "wss://127.0.0.1:8443/ws")]
    pub url: String,

    /// Seconds between telemetry requests
    #[arg(long, default_value_t = 5)]
    pub poll_interval: u64,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_console_conventions() {
        let cli = Cli::parse_from(["rsc"]);
        assert_eq!(cli.url, "wss://127.0.0.1:8443/ws");
        assert_eq!(cli.poll_interval, 5);
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["rsc", "--url", "ws://example:9000/ws", "--poll-interval", "10", "-v"]);
        assert_eq!(cli.url, "ws://example:9000/ws");
        assert_eq!(cli.poll_interval, 10);
        assert!(cli.verbose);
    }
}
