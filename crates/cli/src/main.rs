mod cli;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use rsc_runtime::{
    Channel, CommandDispatcher, ConsoleState, Supervisor, TelemetryPoller, UiEvent,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init_logging(args.verbose);

    let state = Arc::new(ConsoleState::new());
    let channel = Channel::new();
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let dispatcher = CommandDispatcher::new(Arc::clone(&state), channel.clone(), events_tx.clone());

    let supervisor = Supervisor::new(
        args.url.clone(),
        Arc::clone(&state),
        channel.clone(),
        events_tx,
    );
    tokio::spawn(supervisor.run());

    TelemetryPoller::spawn(channel.clone(), Duration::from_secs(args.poll_interval));

    tokio::spawn(render_events(events_rx, Arc::clone(&state)));

    input_loop(dispatcher, state).await
}

/// Draw runtime notifications as they arrive.
async fn render_events(mut events: mpsc::UnboundedReceiver<UiEvent>, state: Arc<ConsoleState>) {
    while let Some(event) = events.recv().await {
        match event {
            UiEvent::Alert { level, message } => {
                println!("{}", output::render_alert(level, &message));
            }
            UiEvent::SessionsChanged => {
                println!("{}", output::render_sessions(&state.sessions()));
            }
            UiEvent::OutputAppended(chunk) => {
                // Stream chunks verbatim; the newest is always at the bottom.
                print!("{chunk}");
                let _ = std::io::Write::flush(&mut std::io::stdout());
            }
            UiEvent::OutputCleared | UiEvent::TelemetryUpdated | UiEvent::ClearInput => {
                // Line-based terminal: nothing to redraw for these.
                tracing::trace!(?event, "presentation event");
            }
        }
    }
}

/// One parsed line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Help,
    Quit,
    Sessions,
    Select(String),
    Kill(String),
    Info,
    Usage(&'static str),
    Command(String),
}

/// Split a line into a console verb or a remote command.
///
/// A verb that requires an argument but received none becomes a usage
/// hint rather than falling through to the remote path.
fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line.split_once(' ').map_or((line, ""), |(a, b)| (a, b)) {
        ("help", _) => Input::Help,
        ("quit" | "exit", _) => Input::Quit,
        ("sessions", _) => Input::Sessions,
        ("select", "") => Input::Usage("usage: select <id>"),
        ("select", id) => Input::Select(id.trim().to_string()),
        ("kill", "") => Input::Usage("usage: kill <id>"),
        ("kill", id) => Input::Kill(id.trim().to_string()),
        ("info", _) => Input::Info,
        _ => Input::Command(line.to_string()),
    }
}

/// Read user input line by line and dispatch it.
async fn input_loop(dispatcher: CommandDispatcher, state: Arc<ConsoleState>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("rsc console - type 'help' for commands");
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Help => print_help(),
            Input::Quit => break,
            Input::Sessions => {
                println!("{}", output::render_sessions(&state.sessions()));
            }
            Input::Select(id) => dispatcher.select_session(&id),
            Input::Kill(id) => {
                if confirm(&mut lines, &id).await? {
                    dispatcher.request_termination(&id);
                } else {
                    println!("aborted");
                }
            }
            Input::Info => match state.telemetry() {
                Some(info) => println!("{}", output::render_telemetry(&info)),
                None => println!("No telemetry received yet"),
            },
            Input::Usage(hint) => println!("{hint}"),
            Input::Command(command) => dispatcher.submit_command(&command),
        }
    }
    Ok(())
}

/// Explicit confirmation step before a session is torn down.
async fn confirm(lines: &mut Lines<BufReader<Stdin>>, id: &str) -> Result<bool> {
    println!("Terminate session {id}? [y/N]");
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_help() {
    println!(
        "commands:\n\
         \tsessions         show the session table\n\
         \tselect <id>      target a session for commands\n\
         \tkill <id>        terminate a session (asks for confirmation)\n\
         \tinfo             show the latest host telemetry\n\
         \tquit             exit\n\
         anything else is run as a command in the selected session"
    );
}
