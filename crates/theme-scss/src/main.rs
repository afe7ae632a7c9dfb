//! theme-scss CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use theme_scss_core::DEFAULT_CONFIG_FILE;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod watch;

#[derive(Parser)]
#[command(name = "theme-scss")]
#[command(version)]
#[command(about = "Compile an SCSS theme and publish it for Discord client mods", long_about = None)]
struct Cli {
    /// Path to the theme configuration file
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the theme and publish the source and client files
    Build,

    /// Watch the theme and rewrite the development theme file on every change
    Dev,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theme_scss=info,theme_scss_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build => commands::build::execute(commands::build::BuildArgs {
            config: cli.config,
        }),
        Commands::Dev => commands::dev::execute(commands::dev::DevArgs { config: cli.config }),
    }
}
