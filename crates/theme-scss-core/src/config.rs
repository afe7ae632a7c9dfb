//! The `theme-config.json` schema.
//!
//! This module only describes and loads the document. Turning it into paths,
//! identity and targets is the job of [`crate::settings`].
//!
//! ```json
//! {
//!   "name": "Midnight",
//!   "author": "Jane Doe",
//!   "version": "1.2.0",
//!   "metas": { "betterdiscord": "metas/betterdiscord.json" },
//!   "dist": {
//!     "target": "src/source.scss",
//!     "output": "src/source.css",
//!     "clients": { "output": "clients", "compileFor": ["betterdiscord", "userstyle"] }
//!   },
//!   "dev": { "mod": "vencord" }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use theme_scss_runtime::SystemRuntime;

use crate::error::ConfigError;
use crate::platform::DevMod;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "theme-config.json";

/// Parsed `theme-config.json`.
///
/// Identity fields are optional here; missing ones are filled from the
/// package descriptor during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,

    /// URL used for the `@import` in client files
    pub import: Option<String>,

    pub metas: MetasConfig,
    pub dist: DistConfig,
    pub dev: DevConfig,
}

/// Locations of the platform metadata files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetasConfig {
    pub betterdiscord: String,
    pub userstyle: String,
}

impl Default for MetasConfig {
    fn default() -> Self {
        Self {
            betterdiscord: "metas/betterdiscord.json".to_string(),
            userstyle: "metas/userstyle.json".to_string(),
        }
    }
}

/// How the built theme is distributed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DistConfig {
    pub target: String,
    pub output: String,
    pub clients: ClientsConfig,
}

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            target: default_source_target(),
            output: "src/source.css".to_string(),
            clients: ClientsConfig::default(),
        }
    }
}

/// Client (platform) outputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientsConfig {
    pub output: String,

    /// Raw platform names. Unknown names are kept so they can be reported
    /// and skipped at publish time.
    pub compile_for: Vec<String>,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            output: "clients".to_string(),
            compile_for: Vec::new(),
        }
    }
}

/// Development environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    #[serde(rename = "mod")]
    pub client_mod: Option<DevMod>,
    pub target: String,
    /// Absolute path of the development theme file
    pub output: Option<String>,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            client_mod: None,
            target: default_source_target(),
            output: None,
        }
    }
}

fn default_source_target() -> String {
    "src/source.scss".to_string()
}

impl ThemeConfig {
    /// Load and parse the configuration file at `path`.
    pub fn load(runtime: &dyn SystemRuntime, path: &Path) -> Result<Self, ConfigError> {
        let text = runtime.file_read_string(path).map_err(|err| {
            if err.is_not_found() {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                }
            }
        })?;

        Self::from_json(&text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Parse a configuration document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
