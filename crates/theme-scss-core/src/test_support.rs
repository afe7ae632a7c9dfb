//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use theme_scss_runtime::{NativeRuntime, PathKind, RuntimeResult, SystemRuntime};

/// A runtime that uses the real file system but pretends to be running on
/// `os` with exactly the given environment. File accesses are recorded.
pub struct FakeHost {
    os: &'static str,
    env: HashMap<String, String>,
    native: NativeRuntime,
    pub reads: Mutex<Vec<PathBuf>>,
    pub writes: Mutex<Vec<PathBuf>>,
}

impl FakeHost {
    pub fn new(os: &'static str) -> Self {
        Self {
            os,
            env: HashMap::new(),
            native: NativeRuntime::new(),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn read_paths(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }
}

impl SystemRuntime for FakeHost {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.native.file_read(path)
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        self.writes.lock().unwrap().push(path.to_path_buf());
        self.native.file_write(path, contents)
    }

    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> RuntimeResult<bool> {
        self.native.path_exists(path, kind)
    }

    fn dir_create(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        self.writes.lock().unwrap().push(path.to_path_buf());
        self.native.dir_create(path, recursive)
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        self.native.cwd()
    }

    fn env_get(&self, name: &str) -> RuntimeResult<Option<String>> {
        Ok(self.env.get(name).cloned())
    }

    fn os_name(&self) -> &'static str {
        self.os
    }
}
