//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands;
use crate::logging;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::process;

/// A terminal audio recorder and waveform bar analyzer
#[derive(Parser)]
#[command(name = "wavebar")]
#[command(version)]
#[command(about = "Record audio with live metering, analyze files into waveform bars, and replay a time-synced fill progress over them")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/wavebar/wavebar.toml\n    Logs:               ~/.local/state/wavebar/wavebar.log.*\n\nDEFAULT COMMAND:\n    If no command is specified, 'record' is used by default."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record audio with live waveform metering (default)
    ///
    /// Appends one metering level per tick while recording. Press Ctrl-C
    /// to stop; the live sequence is rescaled to the configured bar count
    /// and printed.
    #[command(visible_alias = "r")]
    Record,

    /// Analyze a WAV file into normalized waveform bars
    ///
    /// Runs the whole-file pipeline (decibel conversion, block-average
    /// decimation, min-max normalization) and prints the bar heights.
    #[command(visible_alias = "a")]
    Analyze {
        /// Path to the 16-bit PCM WAV file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of bars to produce (defaults to the configured value)
        #[arg(short, long, value_name = "N")]
        bars: Option<usize>,
    },

    /// Replay a time-synced fill progress over a file's waveform bars
    ///
    /// Analyzes the file, then drives the progress tracker over the file
    /// duration, reporting the fill percentage until completion.
    #[command(visible_alias = "p")]
    Play {
        /// Path to the 16-bit PCM WAV file to visualize
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Override the playback duration in seconds
        #[arg(short, long, value_name = "SECONDS")]
        duration: Option<f64>,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Edit audio and waveform settings. Uses $EDITOR environment variable
    /// or falls back to nano/vim.
    #[command(visible_alias = "c")]
    Config,

    /// List available audio input devices
    ///
    /// Shows device IDs, names, and configurations to help configure
    /// the correct input device in wavebar.toml.
    #[command(name = "list-devices")]
    ListDevices,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    /// Useful for troubleshooting issues.
    Logs,

    /// Generate shell completion script
    ///
    /// Generate completion script for your shell. Save the output to your
    /// shell's completion directory or source it directly.
    ///
    /// Examples:
    ///   wavebar completions bash > wavebar.bash
    ///   wavebar completions zsh > _wavebar
    ///   wavebar completions fish > wavebar.fish
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails (e.g., recording, analysis, playback)
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Handle commands that don't need logging or config setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "wavebar", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::ListDevices) => {
            return match commands::handle_list_devices() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        Some(Commands::Logs) => {
            return match commands::handle_logs() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        _ => {}
    }

    // Initialize logging for all other commands
    logging::init_logging()?;

    // Route to appropriate command handler
    match cli.command {
        None | Some(Commands::Record) => {
            commands::handle_record().await?;
        }
        Some(Commands::Analyze { file, bars }) => {
            commands::handle_analyze(file, bars).await?;
        }
        Some(Commands::Play { file, duration }) => {
            commands::handle_play(file, duration).await?;
        }
        Some(Commands::Config) => {
            commands::handle_config()?;
        }
        Some(Commands::Completions { .. }) | Some(Commands::ListDevices) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
