//! SASS compilation using the grass crate.
//!
//! This module provides SASS/SCSS compilation using grass, a pure Rust
//! implementation that targets dart-sass. Every file grass touches (the entry
//! stylesheet and its `@use`/`@import` dependencies) is read through a
//! [`SystemRuntime`], so compilation sees the same file system as the rest
//! of theme-scss.

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

use grass::{Options, OutputStyle};

use crate::traits::{RuntimeError, RuntimeResult, SystemRuntime};

/// Adapter that implements `grass::Fs` using a `SystemRuntime`.
pub struct RuntimeFs<'a> {
    runtime: &'a dyn SystemRuntime,
}

impl<'a> RuntimeFs<'a> {
    /// Create a new RuntimeFs adapter wrapping the given runtime.
    pub fn new(runtime: &'a dyn SystemRuntime) -> Self {
        Self { runtime }
    }
}

impl Debug for RuntimeFs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeFs")
            .field("runtime", &"<SystemRuntime>")
            .finish()
    }
}

impl grass::Fs for RuntimeFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        self.runtime.is_dir(path).unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.runtime.is_file(path).unwrap_or(false)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.runtime.file_read(path).map_err(|e| match e {
            // Keep the kind so "not found" survives the round trip through grass
            RuntimeError::Io(io_err) => io_err,
            other => io::Error::other(other.to_string()),
        })
    }
}

/// Compile an SCSS (or plain CSS) file to CSS using grass.
///
/// Output is always in expanded (human readable) style.
///
/// # Arguments
///
/// * `runtime` - The runtime to use for file system access
/// * `path` - The entry stylesheet
/// * `load_paths` - Extra directories to search for @use/@import resolution
///
/// # Returns
///
/// Compiled CSS string on success, `RuntimeError::SassError` on failure.
pub fn compile_scss_file(
    runtime: &dyn SystemRuntime,
    path: &Path,
    load_paths: &[PathBuf],
) -> RuntimeResult<String> {
    let fs = RuntimeFs::new(runtime);

    let options = Options::default()
        .fs(&fs)
        .load_paths(load_paths)
        .style(OutputStyle::Expanded);

    grass::from_path(path, &options).map_err(|e| RuntimeError::SassError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NativeRuntime;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_compile_simple_scss() {
        let temp = TempDir::new().unwrap();
        let runtime = NativeRuntime::new();
        let source = write(
            temp.path(),
            "source.scss",
            "$primary: #007bff; .btn { color: $primary; }",
        );

        let css = compile_scss_file(&runtime, &source, &[]).unwrap();

        assert!(css.contains(".btn"));
        assert!(css.contains("#007bff"));
    }

    #[test]
    fn test_compile_is_expanded() {
        let temp = TempDir::new().unwrap();
        let runtime = NativeRuntime::new();
        let source = write(temp.path(), "source.scss", ".nav { .item { padding: 10px; } }");

        let css = compile_scss_file(&runtime, &source, &[]).unwrap();

        assert!(css.contains(".nav .item {\n"));
        assert!(css.contains("  padding: 10px;"));
    }

    #[test]
    fn test_compile_resolves_partials() {
        let temp = TempDir::new().unwrap();
        let runtime = NativeRuntime::new();
        write(temp.path(), "_colors.scss", "$accent: #5865f2;");
        let source = write(
            temp.path(),
            "source.scss",
            "@import 'colors';\n.link { color: $accent; }",
        );

        let css = compile_scss_file(&runtime, &source, &[]).unwrap();

        assert!(css.contains(".link"));
        assert!(css.contains("#5865f2"));
    }

    #[test]
    fn test_compile_scss_error() {
        let temp = TempDir::new().unwrap();
        let runtime = NativeRuntime::new();
        let source = write(temp.path(), "source.scss", ".btn { color: $undefined-variable; }");

        let err = compile_scss_file(&runtime, &source, &[]).unwrap_err();

        assert!(matches!(err, RuntimeError::SassError(_)));
    }

    #[test]
    fn test_runtime_fs_debug() {
        let runtime = NativeRuntime::new();
        let fs = RuntimeFs::new(&runtime);
        let debug_str = format!("{:?}", fs);
        assert!(debug_str.contains("RuntimeFs"));
    }
}
