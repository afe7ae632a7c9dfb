//! Resolved, immutable settings for one process.
//!
//! [`ThemeSettings::resolve`] is the only place configuration is read. The
//! result is built once at start-up and handed by reference to the compiler
//! and publisher.

use std::path::{Path, PathBuf};

use theme_scss_runtime::SystemRuntime;
use tracing::debug;

use crate::config::ThemeConfig;
use crate::error::ConfigError;
use crate::identity::{Identity, PackageDescriptor, slug};
use crate::platform::{ClientPlatform, DevMod, HostOs, RequestedClient};

/// Absolute locations of every input and output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub dist_target: PathBuf,
    pub dist_output: PathBuf,
    pub clients_dir: PathBuf,
    pub betterdiscord_client: PathBuf,
    pub userstyle_client: PathBuf,
    pub betterdiscord_meta: PathBuf,
    pub userstyle_meta: PathBuf,
    pub dev_target: PathBuf,
    pub dev_output: PathBuf,
}

impl ResolvedPaths {
    /// Apply defaults and resolve relative paths against `base_dir`.
    fn resolve(
        config: &ThemeConfig,
        theme_name: &str,
        base_dir: &Path,
        dev: DevLocation,
    ) -> Result<Self, ConfigError> {
        let dist_output = base_dir.join(&config.dist.output);
        ensure_css_extension("dist.output", &dist_output)?;

        let clients_dir = base_dir.join(&config.dist.clients.output);

        Ok(Self {
            dist_target: base_dir.join(&config.dist.target),
            dist_output,
            betterdiscord_client: clients_dir.join(ClientPlatform::BetterDiscord.file_name(theme_name)),
            userstyle_client: clients_dir.join(ClientPlatform::Userstyle.file_name(theme_name)),
            clients_dir,
            betterdiscord_meta: base_dir.join(&config.metas.betterdiscord),
            userstyle_meta: base_dir.join(&config.metas.userstyle),
            dev_target: base_dir.join(&config.dev.target),
            dev_output: dev.file(theme_name),
        })
    }

    /// Output file of a client platform.
    pub fn client(&self, platform: ClientPlatform) -> &Path {
        match platform {
            ClientPlatform::BetterDiscord => &self.betterdiscord_client,
            ClientPlatform::Userstyle => &self.userstyle_client,
        }
    }

    /// Metadata file of a client platform.
    pub fn meta_file(&self, platform: ClientPlatform) -> &Path {
        match platform {
            ClientPlatform::BetterDiscord => &self.betterdiscord_meta,
            ClientPlatform::Userstyle => &self.userstyle_meta,
        }
    }
}

fn ensure_css_extension(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.extension().is_some_and(|ext| ext == "css") {
        Ok(())
    } else {
        Err(ConfigError::InvalidOutputExtension {
            field,
            path: path.to_path_buf(),
        })
    }
}

/// Where the development theme file goes, known before the theme name is.
enum DevLocation {
    /// `dev.output`, used verbatim
    File(PathBuf),
    /// The client mod's theme folder on this host
    Folder(PathBuf),
}

impl DevLocation {
    /// Only consults the host when `dev.output` is absent.
    fn resolve(runtime: &dyn SystemRuntime, config: &ThemeConfig) -> Result<Self, ConfigError> {
        match config.dev.output.as_deref().filter(|o| !o.is_empty()) {
            Some(explicit) => {
                let explicit = PathBuf::from(explicit);
                ensure_css_extension("dev.output", &explicit)?;
                Ok(DevLocation::File(explicit))
            }
            None => {
                let os = HostOs::detect(runtime)?;
                let client_mod = config.dev.client_mod.unwrap_or(DevMod::BetterDiscord);
                Ok(DevLocation::Folder(client_mod.theme_folder(os, runtime)?))
            }
        }
    }

    fn file(self, theme_name: &str) -> PathBuf {
        match self {
            DevLocation::File(path) => path,
            DevLocation::Folder(folder) => {
                folder.join(ClientPlatform::BetterDiscord.file_name(theme_name))
            }
        }
    }
}

/// Everything the build and dev commands need to know about the theme.
#[derive(Debug, Clone)]
pub struct ThemeSettings {
    pub identity: Identity,
    /// `slug(name)`, used for client file names
    pub theme_name: String,
    /// URL of the distributed source, embedded as `@import` in client files
    pub theme_import: String,
    pub dev_mod: Option<DevMod>,
    /// `dist.clients.compileFor`, in order, duplicates kept
    pub clients: Vec<RequestedClient>,
    pub paths: ResolvedPaths,
}

impl ThemeSettings {
    /// Load the configuration at `config_path` and resolve it.
    ///
    /// The configuration path, every relative path inside it and the package
    /// descriptor are all taken from the working directory.
    pub fn resolve(runtime: &dyn SystemRuntime, config_path: &Path) -> Result<Self, ConfigError> {
        let cwd = runtime.cwd().map_err(ConfigError::WorkingDirectory)?;
        Self::resolve_in(runtime, &cwd, config_path)
    }

    /// [`ThemeSettings::resolve`] with an explicit working directory.
    pub fn resolve_in(
        runtime: &dyn SystemRuntime,
        working_dir: &Path,
        config_path: &Path,
    ) -> Result<Self, ConfigError> {
        let config_path = working_dir.join(config_path);
        let config = ThemeConfig::load(runtime, &config_path)?;
        debug!(path = %config_path.display(), "Loaded theme configuration");

        Self::from_config(runtime, &config, working_dir)
    }

    /// Resolve an already parsed configuration rooted at `base_dir`.
    pub fn from_config(
        runtime: &dyn SystemRuntime,
        config: &ThemeConfig,
        base_dir: &Path,
    ) -> Result<Self, ConfigError> {
        // Unsupported hosts fail before the package descriptor is read
        let dev = DevLocation::resolve(runtime, config)?;

        let package = PackageDescriptor::in_dir(runtime, base_dir);
        let identity = Identity::resolve(&[config, &package])?;

        let theme_name = slug(&identity.name);
        let theme_import = match config.import.as_deref().filter(|i| !i.is_empty()) {
            Some(import) => import.to_string(),
            None => format!(
                "https://{}.github.io/{}/{}",
                slug(&identity.author),
                theme_name,
                config.dist.output.trim_start_matches("./")
            ),
        };

        let paths = ResolvedPaths::resolve(config, &theme_name, base_dir, dev)?;

        let clients = config
            .dist
            .clients
            .compile_for
            .iter()
            .map(|name| RequestedClient::from(name.as_str()))
            .collect();

        Ok(Self {
            identity,
            theme_name,
            theme_import,
            dev_mod: config.dev.client_mod,
            clients,
            paths,
        })
    }
}
