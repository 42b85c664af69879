pub mod commands;
pub mod http_source;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use wayfare_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "wayfare",
    about = "Wayfare booking wizard CLI",
    long_about = "Browse the flight catalog, replay scripted booking sessions, quote bookings, and inspect configuration.",
    after_help = "Examples:\n  wayfare destinations\n  wayfare classes --destination Paris\n  wayfare replay session.json\n  wayfare quote booking.json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the distinct destinations offered by the flight catalog")]
    Destinations,
    #[command(about = "List flight classes and prices for one destination")]
    Classes {
        #[arg(long, help = "Destination exactly as it appears in the catalog")]
        destination: String,
    },
    #[command(about = "Replay a JSON script of wizard actions and optionally confirm the booking")]
    Replay {
        #[arg(help = "Path to the replay script")]
        script: PathBuf,
    },
    #[command(about = "Validate a booking record and print its itemized price")]
    Quote {
        #[arg(help = "Path to a booking JSON document")]
        booking: PathBuf,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Destinations => commands::destinations::run(),
        Command::Classes { destination } => commands::classes::run(&destination),
        Command::Replay { script } => commands::replay::run(&script),
        Command::Quote { booking } => commands::quote::run(&booking),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a single JSON payload. An invalid config
/// falls back to compact `info`; the command itself reports the config error.
fn init_logging() {
    let (level, format) = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => (
            config.logging.level.parse::<Level>().unwrap_or(Level::INFO),
            config.logging.format,
        ),
        Err(_) => (Level::INFO, LogFormat::Compact),
    };

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
