//! Compiler adapter around grass.
//!
//! A [`Compiler`] lives for one invocation. `build` uses
//! [`Compiler::compile_cached`] so every target shares one compilation;
//! each `dev` cycle calls [`Compiler::compile`], which never reuses a result.

use std::cell::OnceCell;
use std::path::Path;

use theme_scss_runtime::{RuntimeError, SystemRuntime, sass_native::compile_scss_file};
use tracing::debug;

use crate::error::CompileError;

/// Compiles stylesheets and remembers the first successful result.
pub struct Compiler<'a> {
    runtime: &'a dyn SystemRuntime,
    cached: OnceCell<String>,
}

impl<'a> Compiler<'a> {
    pub fn new(runtime: &'a dyn SystemRuntime) -> Self {
        Self {
            runtime,
            cached: OnceCell::new(),
        }
    }

    /// Compile `source`, ignoring any cached result.
    pub fn compile(&self, source: &Path) -> Result<String, CompileError> {
        let exists = self.runtime.is_file(source).unwrap_or(false);
        if !exists {
            return Err(CompileError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        if !source.extension().is_some_and(|ext| ext == "scss") {
            return Err(CompileError::InvalidSourceExtension {
                path: source.to_path_buf(),
            });
        }

        debug!(path = %source.display(), "Compiling stylesheet");
        compile_scss_file(self.runtime, source, &[]).map_err(|err| classify(source, err))
    }

    /// Compile `source` once and return the same text on later calls.
    ///
    /// Failures are not cached.
    pub fn compile_cached(&self, source: &Path) -> Result<&str, CompileError> {
        if let Some(css) = self.cached.get() {
            debug!(path = %source.display(), "Reusing compiled stylesheet");
            return Ok(css.as_str());
        }
        let css = self.compile(source)?;
        Ok(self.cached.get_or_init(|| css).as_str())
    }
}

/// A compiler error that reports a missing file means the source is gone,
/// everything else is a genuine compile failure.
fn classify(source: &Path, err: RuntimeError) -> CompileError {
    let message = match err {
        RuntimeError::SassError(message) => message,
        other => other.to_string(),
    };

    let lowered = message.to_lowercase();
    if lowered.contains("no such file or directory") || lowered.contains("cannot find the file") {
        CompileError::SourceNotFound {
            path: source.to_path_buf(),
        }
    } else {
        CompileError::CompileFailed {
            path: source.to_path_buf(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use theme_scss_runtime::NativeRuntime;

    #[test]
    fn test_compile_expanded() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.scss");
        fs::write(&source, "$c: red; body { a { color: $c; } }").unwrap();
        let runtime = NativeRuntime::new();

        let css = Compiler::new(&runtime).compile(&source).unwrap();

        assert!(css.contains("body a {\n  color: red;\n}"));
    }

    #[test]
    fn test_missing_source() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("missing.scss");
        let runtime = NativeRuntime::new();

        let err = Compiler::new(&runtime).compile(&source).unwrap_err();

        assert!(matches!(err, CompileError::SourceNotFound { ref path } if path == &source));
    }

    #[test]
    fn test_directory_is_not_a_source() {
        let temp = TempDir::new().unwrap();
        let runtime = NativeRuntime::new();

        let err = Compiler::new(&runtime).compile(temp.path()).unwrap_err();

        assert!(matches!(err, CompileError::SourceNotFound { .. }));
    }

    #[test]
    fn test_source_must_be_scss() {
        let temp = TempDir::new().unwrap();
        let runtime = NativeRuntime::new();
        for name in ["source.css", "source.sass", "source"] {
            let source = temp.path().join(name);
            fs::write(&source, "a { color: red; }").unwrap();

            let err = Compiler::new(&runtime).compile(&source).unwrap_err();

            assert!(
                matches!(err, CompileError::InvalidSourceExtension { ref path } if path == &source),
                "{name}: {err}"
            );
            assert!(err.to_string().contains(".scss extension"));
        }
    }

    #[test]
    fn test_syntax_error_surfaces_message() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.scss");
        fs::write(&source, "body { color: $nope; }").unwrap();
        let runtime = NativeRuntime::new();

        let err = Compiler::new(&runtime).compile(&source).unwrap_err();

        match err {
            CompileError::CompileFailed { path, message } => {
                assert_eq!(path, source);
                assert!(message.contains("Undefined variable"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_import_is_compile_failure() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.scss");
        fs::write(&source, "@use 'does-not-exist';").unwrap();
        let runtime = NativeRuntime::new();

        let err = Compiler::new(&runtime).compile(&source).unwrap_err();

        assert!(matches!(err, CompileError::CompileFailed { .. }));
    }

    #[test]
    fn test_classify_missing_file_message() {
        let err = classify(
            Path::new("src/source.scss"),
            RuntimeError::SassError("Error: No such file or directory (os error 2)".to_string()),
        );
        assert!(matches!(err, CompileError::SourceNotFound { .. }));
    }

    #[test]
    fn test_cached_compile_reuses_result() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.scss");
        fs::write(&source, "a { color: red; }").unwrap();
        let runtime = NativeRuntime::new();
        let compiler = Compiler::new(&runtime);

        let first = compiler.compile_cached(&source).unwrap().to_string();
        fs::write(&source, "a { color: blue; }").unwrap();
        let second = compiler.compile_cached(&source).unwrap();
        assert_eq!(first, second);

        // A fresh compile sees the change
        let fresh = compiler.compile(&source).unwrap();
        assert!(fresh.contains("blue"));
    }

    #[test]
    fn test_failed_compile_is_not_cached() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.scss");
        fs::write(&source, "a { color: $missing; }").unwrap();
        let runtime = NativeRuntime::new();
        let compiler = Compiler::new(&runtime);

        assert!(compiler.compile_cached(&source).is_err());

        fs::write(&source, "a { color: red; }").unwrap();
        assert!(compiler.compile_cached(&source).unwrap().contains("red"));
    }
}
