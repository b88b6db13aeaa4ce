//! Hover Preview (HVP) - CLI entry point

mod commands;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hover_preview::cli::{build_cli_styles, Cli, Commands, ConfigCommands};

/// Environment variable holding the log filter
const LOG_ENV: &str = "HVP_LOG";

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let matches = Cli::command().styles(build_cli_styles()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Replay {
            trace,
            frames,
            viewport,
            workers,
        } => commands::replay::handle(config_path, &trace, &frames, viewport, workers),
        Commands::Position {
            x,
            y,
            viewport,
            size,
            margin,
        } => commands::position::handle(config_path, x, y, viewport, size, margin),
        Commands::Storyboard { duration, frames } => {
            commands::storyboard::handle(config_path, &duration, frames)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init { force } => commands::config::handle_init(config_path, force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
