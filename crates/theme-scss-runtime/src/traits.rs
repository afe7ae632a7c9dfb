//! The [`SystemRuntime`] trait and its supporting types.
//!
//! Everything theme-scss does to the outside world goes through this trait:
//! reading configuration, writing theme files, looking up environment
//! variables and asking which operating system it runs on. The resolver and
//! publisher can therefore be exercised against a host that differs from the
//! real one.

use std::io;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug)]
pub enum RuntimeError {
    /// Standard I/O error
    Io(io::Error),

    /// SASS compilation failed
    SassError(String),
}

impl RuntimeError {
    /// Whether this error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RuntimeError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Io(e) => write!(f, "I/O error: {}", e),
            RuntimeError::SassError(msg) => write!(f, "SASS compilation error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
            RuntimeError::SassError(_) => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::Io(e)
    }
}

/// Type of filesystem path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// Trait defining the low-level system operations theme-scss needs.
///
/// Implementations provide the actual system interaction. The native
/// implementation talks to `std`; tests wrap it to pretend to be a
/// different host (another operating system, another environment).
pub trait SystemRuntime: Send + Sync {
    // ═══════════════════════════════════════════════════════════════════════
    // FILE OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Read entire file contents as bytes.
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Read file as string with UTF-8 encoding.
    ///
    /// Default implementation reads bytes and converts to string.
    fn file_read_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.file_read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            RuntimeError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid UTF-8 in file: {}", e),
            ))
        })
    }

    /// Write bytes to file (creates or overwrites).
    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()>;

    /// Check if path exists, optionally filtering by type.
    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> RuntimeResult<bool>;

    /// Check if path exists and is a file.
    fn is_file(&self, path: &Path) -> RuntimeResult<bool> {
        self.path_exists(path, Some(PathKind::File))
    }

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> RuntimeResult<bool> {
        self.path_exists(path, Some(PathKind::Directory))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DIRECTORY OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Create a directory.
    ///
    /// If `recursive` is true, creates parent directories as needed.
    fn dir_create(&self, path: &Path, recursive: bool) -> RuntimeResult<()>;

    /// Get the current working directory.
    fn cwd(&self) -> RuntimeResult<PathBuf>;

    // ═══════════════════════════════════════════════════════════════════════
    // ENVIRONMENT
    // ═══════════════════════════════════════════════════════════════════════

    /// Get an environment variable. Unset and non-UTF-8 values are `None`.
    fn env_get(&self, name: &str) -> RuntimeResult<Option<String>>;

    /// Name of the host operating system, as in `std::env::consts::OS`
    /// (`"windows"`, `"macos"`, `"linux"`, ...).
    fn os_name(&self) -> &'static str;
}
