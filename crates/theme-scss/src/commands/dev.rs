//! Dev command implementation
//!
//! Watches the development source directory and, on start-up and on every
//! stylesheet change, recompiles the theme and rewrites the development
//! theme file in the client mod's theme folder.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use theme_scss_core::{Compiler, Publisher, ThemeSettings};
use theme_scss_runtime::{SystemRuntime, default_runtime};
use tracing::{error, info};

use crate::watch::{FileWatcher, WatchConfig, WatchEvent};

/// Arguments for the dev command
#[derive(Debug)]
pub struct DevArgs {
    pub config: PathBuf,
}

/// Execute the dev command
///
/// Runs until the process is terminated. A failed cycle is logged and the
/// next change starts a new one.
pub fn execute(args: DevArgs) -> Result<()> {
    let runtime = default_runtime();

    let settings = ThemeSettings::resolve(&runtime, &args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let watch_root = settings
        .paths
        .dev_target
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let watcher = FileWatcher::new(
        &watch_root,
        WatchConfig {
            ignore: vec![settings.paths.dev_output.clone()],
            ..WatchConfig::default()
        },
    )?;

    while let Some(event) = watcher.recv() {
        if let WatchEvent::Modified(path) = &event {
            info!(path = %path.display(), "Change detected");
        }
        if let Err(e) = run_cycle(&runtime, &settings) {
            error!("{:#}", e);
        }
    }

    Ok(())
}

/// One development cycle: compile fresh and rewrite the development file.
pub(crate) fn run_cycle(runtime: &dyn SystemRuntime, settings: &ThemeSettings) -> Result<PathBuf> {
    let start = Instant::now();

    info!(path = %settings.paths.dev_target.display(), "Compiling");
    let css = Compiler::new(runtime)
        .compile(&settings.paths.dev_target)
        .context("Failed to compile theme")?;

    let output = Publisher::new(runtime, settings)
        .publish_dev(&css)
        .context("Failed to write development theme")?;

    info!(
        path = %output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Development theme updated"
    );
    Ok(output)
}
