//! Filesystem watching for the development loop
//!
//! Detects when stylesheets under the development source directory change so
//! the `dev` command can recompile and rewrite the theme file.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::{DebouncedEvent, Debouncer, new_debouncer};
use tracing::{debug, info, warn};

/// Default debounce duration for filesystem events (in milliseconds).
/// This batches rapid file saves into a single event.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Extensions that trigger a development cycle.
const STYLESHEET_EXTENSIONS: &[&str] = &["scss", "sass", "css"];

/// Events emitted by the filesystem watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Sent once, as soon as the watcher is running
    Ready,
    /// A stylesheet changed; one event per debounced batch
    Modified(PathBuf),
}

/// Configuration for the filesystem watcher.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Debounce duration in milliseconds
    pub debounce_ms: u64,
    /// Files whose changes are never reported, such as our own output
    pub ignore: Vec<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            ignore: Vec::new(),
        }
    }
}

/// Debounced, recursive watcher over a theme source directory.
pub struct FileWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    event_rx: mpsc::Receiver<WatchEvent>,
}

impl FileWatcher {
    /// Start watching `root` recursively.
    ///
    /// A [`WatchEvent::Ready`] is queued before this returns.
    pub fn new(root: &Path, config: WatchConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let root = root.to_path_buf();
        let ignore: Vec<PathBuf> = config
            .ignore
            .iter()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
            .collect();

        let tx = event_tx.clone();
        let mut debouncer = new_debouncer(
            Duration::from_millis(config.debounce_ms),
            move |res: std::result::Result<Vec<DebouncedEvent>, notify::Error>| match res {
                Ok(events) => {
                    // Collapse the batch into one event
                    let changed = events
                        .into_iter()
                        .map(|event| event.path)
                        .find(|path| is_stylesheet(path) && !is_ignored(path, &ignore));
                    if let Some(path) = changed {
                        debug!(path = %path.display(), "Stylesheet change detected");
                        if tx.send(WatchEvent::Modified(path)).is_err() {
                            debug!("Event receiver dropped, stopping watcher");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Filesystem watch error");
                }
            },
        )
        .context("Failed to create filesystem watcher")?;

        debouncer
            .watcher()
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;

        info!(
            path = %root.display(),
            debounce_ms = config.debounce_ms,
            "Watching for stylesheet changes"
        );

        // The receiver is held below, so this send cannot fail
        let _ = event_tx.send(WatchEvent::Ready);

        Ok(Self {
            _debouncer: debouncer,
            event_rx,
        })
    }

    /// Block until the next event.
    ///
    /// Returns `None` once the watcher has stopped.
    pub fn recv(&self) -> Option<WatchEvent> {
        self.event_rx.recv().ok()
    }
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        STYLESHEET_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

fn is_ignored(path: &Path, ignore: &[PathBuf]) -> bool {
    if ignore.is_empty() {
        return false;
    }
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    ignore.iter().any(|p| *p == canonical || p == path)
}
