//! Command-line interface

pub mod assistant;
pub mod download;
pub mod export;
pub mod launch;
pub mod servers;
pub mod versions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::operation::{Payload, ProgressEvent, Severity};

#[derive(Parser)]
#[command(name = "sheihu")]
#[command(about = "Sheihu game launcher engine")]
#[command(version)]
pub struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true, env = "SHEIHU_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Boot a game version and stream the launch console
    Launch(launch::LaunchArgs),

    /// Download a game version
    Download(download::DownloadArgs),

    /// List known game versions
    Versions(versions::VersionsArgs),

    /// Manage multiplayer servers
    Servers(servers::ServersArgs),

    /// Package the portable launcher bundle
    Export(export::ExportArgs),

    /// Ask the assistant for mods matching a theme
    Mods(assistant::ModsArgs),

    /// Ask the assistant a question
    Chat(assistant::ChatArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Format an event the way the launch console shows it.
pub fn format_event(event: &ProgressEvent) -> String {
    let time = event
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M:%S");
    let body = match &event.payload {
        Payload::Log { line } => line.clone(),
        Payload::Progress { percent, .. } => format!("Downloading Assets... {}%", percent),
        Payload::Finished { state, reason } => match reason {
            Some(reason) => format!("Operation {}: {}", state, reason),
            None => format!("Operation {}", state),
        },
    };
    let marker = match event.severity {
        Severity::Info => "",
        Severity::Warning => "! ",
        Severity::Error => "✗ ",
    };
    format!("[{}] {}{}", time, marker, body)
}

/// Print one event to stdout, as text or as a JSON line.
pub fn print_event(event: &ProgressEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Failed to encode event: {}", e),
        }
    } else {
        println!("{}", format_event(event));
    }
}

/// Resolves when the user presses Ctrl-C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationState;
    use chrono::Utc;

    #[test]
    fn test_format_event_marks_severity() {
        let log = ProgressEvent {
            sequence: 0,
            timestamp: Utc::now(),
            payload: Payload::Log {
                line: "[WARN] low memory".to_string(),
            },
            severity: Severity::Warning,
        };
        assert!(format_event(&log).ends_with("] ! [WARN] low memory"));

        let failed = ProgressEvent {
            sequence: 4,
            timestamp: Utc::now(),
            payload: Payload::Finished {
                state: OperationState::Failed,
                reason: Some("disk full".to_string()),
            },
            severity: Severity::Error,
        };
        assert!(format_event(&failed).ends_with("✗ Operation failed: disk full"));
    }

    #[test]
    fn test_format_progress() {
        let event = ProgressEvent {
            sequence: 1,
            timestamp: Utc::now(),
            payload: Payload::Progress {
                delta: 5,
                percent: 10,
            },
            severity: Severity::Info,
        };
        assert!(format_event(&event).ends_with("] Downloading Assets... 10%"));
    }

    #[test]
    fn test_cli_parses_launch() {
        let cli = Cli::try_parse_from(["sheihu", "launch", "1.8.9", "--json"]).unwrap();
        match cli.command {
            Commands::Launch(args) => {
                assert_eq!(args.version, "1.8.9");
                assert!(args.json);
            }
            _ => panic!("expected launch"),
        }
    }

    #[test]
    fn test_cli_parses_servers_add() {
        let cli = Cli::try_parse_from(["sheihu", "servers", "add", "Lobby", "mc.example.net", "--json"])
            .unwrap();
        match cli.command {
            Commands::Servers(args) => {
                assert!(args.json);
                assert!(matches!(
                    args.command,
                    Some(servers::ServersCommand::Add { ref name, ref ip })
                        if name == "Lobby" && ip == "mc.example.net"
                ));
            }
            _ => panic!("expected servers"),
        }
    }
}
