//! Error types for theme-scss-core

use std::path::PathBuf;

use theme_scss_runtime::RuntimeError;
use thiserror::Error;

use crate::identity::IdentityField;

/// Errors raised while resolving the configuration.
///
/// Every variant is fatal: nothing is compiled or written once one of these
/// has been returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to locate your configuration file at {}. Double check that it exists.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("Failed to parse configuration file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Theme is missing required metadata ({}). Set it in your configuration file or package.json.", .fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", "))]
    MissingRequiredMeta { fields: Vec<IdentityField> },

    #[error("{os} is not supported for development. Set `dev.output` to the absolute path of your theme file.")]
    UnsupportedPlatform { os: String },

    #[error("Environment variable {var} is not set, so the development theme folder cannot be located. Set `dev.output` instead.")]
    MissingEnvironment { var: &'static str },

    #[error("`{field}` path {} does not end with a .css extension. Check your configuration and try again.", .path.display())]
    InvalidOutputExtension { field: &'static str, path: PathBuf },

    #[error("Failed to determine the working directory: {0}")]
    WorkingDirectory(#[source] RuntimeError),
}

/// Errors raised by the compiler adapter.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{} is not a valid file path.", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("{} does not end with a .scss extension. Check your configuration and try again.", .path.display())]
    InvalidSourceExtension { path: PathBuf },

    #[error("Failed to compile {}:\n{message}", .path.display())]
    CompileFailed { path: PathBuf, message: String },
}

/// Errors raised while loading platform metadata.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("Metadata file {} could not be used ({reason}), so a metadata block cannot be generated.", .path.display())]
    MetaFileMissing { path: PathBuf, reason: String },
}

/// Errors raised while publishing a single target.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{} is not a valid directory.", .path.display())]
    OutputDirMissing { path: PathBuf },

    #[error(transparent)]
    Meta(#[from] MetaError),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },
}

/// Any error produced by theme-scss-core.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub type Result<T> = std::result::Result<T, Error>;
