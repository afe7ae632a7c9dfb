//! Native runtime implementation with full system access via std.

use std::path::{Path, PathBuf};

use crate::traits::{PathKind, RuntimeResult, SystemRuntime};

/// Runtime backed by the real file system and process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl SystemRuntime for NativeRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> RuntimeResult<bool> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        Ok(match kind {
            None => true,
            Some(PathKind::File) => metadata.is_file(),
            Some(PathKind::Directory) => metadata.is_dir(),
        })
    }

    fn dir_create(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        if recursive {
            std::fs::create_dir_all(path)?;
        } else {
            std::fs::create_dir(path)?;
        }
        Ok(())
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn env_get(&self, name: &str) -> RuntimeResult<Option<String>> {
        Ok(std::env::var(name).ok())
    }

    fn os_name(&self) -> &'static str {
        std::env::consts::OS
    }
}
