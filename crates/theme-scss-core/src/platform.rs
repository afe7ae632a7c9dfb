//! Closed sets of platforms: host operating systems, development client
//! mods, and distribution client platforms.

use std::path::PathBuf;

use serde::Deserialize;
use theme_scss_runtime::SystemRuntime;

use crate::error::ConfigError;

/// Operating systems with a known development theme folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    /// Map an `std::env::consts::OS` style name to a supported host.
    pub fn from_os_name(name: &str) -> Option<Self> {
        match name {
            "windows" => Some(HostOs::Windows),
            "macos" => Some(HostOs::MacOs),
            "linux" => Some(HostOs::Linux),
            _ => None,
        }
    }

    /// The host the runtime reports, or `UnsupportedPlatform`.
    pub fn detect(runtime: &dyn SystemRuntime) -> Result<Self, ConfigError> {
        let os = runtime.os_name();
        Self::from_os_name(os).ok_or_else(|| ConfigError::UnsupportedPlatform { os: os.to_string() })
    }
}

/// Client mods with a development environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevMod {
    BetterDiscord,
    Vencord,
}

impl DevMod {
    /// Folder name the mod uses under the user's config root.
    pub fn vendor_dir(&self) -> &'static str {
        match self {
            DevMod::BetterDiscord => "BetterDiscord",
            DevMod::Vencord => "Vencord",
        }
    }

    /// Where the mod loads themes from on `os`.
    ///
    /// | OS | Folder |
    /// |---|---|
    /// | Windows | `%APPDATA%\<Vendor>\themes` |
    /// | macOS | `$HOME/Library/Application Support/<Vendor>/themes` |
    /// | Linux | `${XDG_CONFIG_HOME:-$HOME/.config}/<Vendor>/themes` |
    ///
    /// On Linux both BetterDiscord and Vencord keep their data under the XDG
    /// config home, not `~/.local/share`, so that is where their theme
    /// folders live.
    pub fn theme_folder(
        &self,
        os: HostOs,
        runtime: &dyn SystemRuntime,
    ) -> Result<PathBuf, ConfigError> {
        let root = match os {
            HostOs::Windows => require_env(runtime, "APPDATA")?,
            HostOs::MacOs => require_env(runtime, "HOME")?
                .join("Library")
                .join("Application Support"),
            HostOs::Linux => match non_empty_env(runtime, "XDG_CONFIG_HOME") {
                Some(config_home) => config_home,
                None => require_env(runtime, "HOME")?.join(".config"),
            },
        };
        Ok(root.join(self.vendor_dir()).join("themes"))
    }
}

fn non_empty_env(runtime: &dyn SystemRuntime, var: &str) -> Option<PathBuf> {
    runtime
        .env_get(var)
        .ok()
        .flatten()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn require_env(runtime: &dyn SystemRuntime, var: &'static str) -> Result<PathBuf, ConfigError> {
    non_empty_env(runtime, var).ok_or(ConfigError::MissingEnvironment { var })
}

/// Platforms a theme can be distributed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPlatform {
    BetterDiscord,
    Userstyle,
}

impl ClientPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientPlatform::BetterDiscord => "betterdiscord",
            ClientPlatform::Userstyle => "userstyle",
        }
    }

    /// File name of the client output for a theme slug.
    pub fn file_name(&self, theme_name: &str) -> String {
        match self {
            ClientPlatform::BetterDiscord => format!("{}.theme.css", theme_name),
            ClientPlatform::Userstyle => format!("{}.user.css", theme_name),
        }
    }
}

impl std::fmt::Display for ClientPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ClientPlatform {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "betterdiscord" => Ok(ClientPlatform::BetterDiscord),
            "userstyle" => Ok(ClientPlatform::Userstyle),
            _ => Err(format!("{} does not have support for compiling", s)),
        }
    }
}

/// A `compileFor` entry as the user wrote it.
///
/// Unrecognised names are kept rather than rejected: they are reported and
/// skipped at publish time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedClient {
    Known(ClientPlatform),
    Unknown(String),
}

impl From<&str> for RequestedClient {
    fn from(name: &str) -> Self {
        match ClientPlatform::try_from(name) {
            Ok(platform) => RequestedClient::Known(platform),
            Err(_) => RequestedClient::Unknown(name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHost;
    use std::path::Path;

    #[test]
    fn test_host_os_names() {
        assert_eq!(HostOs::from_os_name("windows"), Some(HostOs::Windows));
        assert_eq!(HostOs::from_os_name("macos"), Some(HostOs::MacOs));
        assert_eq!(HostOs::from_os_name("linux"), Some(HostOs::Linux));
        assert_eq!(HostOs::from_os_name("freebsd"), None);
    }

    #[test]
    fn test_detect_unsupported() {
        let host = FakeHost::new("openbsd");
        let err = HostOs::detect(&host).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedPlatform { ref os } if os == "openbsd"));
    }

    #[test]
    fn test_windows_theme_folders() {
        let host = FakeHost::new("windows").with_env("APPDATA", "C:/Users/jane/AppData/Roaming");

        let bd = DevMod::BetterDiscord
            .theme_folder(HostOs::Windows, &host)
            .unwrap();
        let vencord = DevMod::Vencord.theme_folder(HostOs::Windows, &host).unwrap();

        assert_eq!(
            bd,
            Path::new("C:/Users/jane/AppData/Roaming")
                .join("BetterDiscord")
                .join("themes")
        );
        assert_eq!(
            vencord,
            Path::new("C:/Users/jane/AppData/Roaming")
                .join("Vencord")
                .join("themes")
        );
    }

    #[test]
    fn test_macos_theme_folder() {
        let host = FakeHost::new("macos").with_env("HOME", "/Users/jane");

        let folder = DevMod::Vencord.theme_folder(HostOs::MacOs, &host).unwrap();

        assert_eq!(
            folder,
            Path::new("/Users/jane/Library/Application Support/Vencord/themes")
        );
    }

    #[test]
    fn test_linux_theme_folder_prefers_xdg() {
        let host = FakeHost::new("linux").with_env("HOME", "/home/jane");
        let folder = DevMod::BetterDiscord
            .theme_folder(HostOs::Linux, &host)
            .unwrap();
        assert_eq!(folder, Path::new("/home/jane/.config/BetterDiscord/themes"));

        let host = host.with_env("XDG_CONFIG_HOME", "/srv/config");
        let folder = DevMod::BetterDiscord
            .theme_folder(HostOs::Linux, &host)
            .unwrap();
        assert_eq!(folder, Path::new("/srv/config/BetterDiscord/themes"));
    }

    #[test]
    fn test_missing_environment() {
        let host = FakeHost::new("windows");
        let err = DevMod::BetterDiscord
            .theme_folder(HostOs::Windows, &host)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvironment { var: "APPDATA" }));
    }

    #[test]
    fn test_client_platform_parsing() {
        assert_eq!(
            ClientPlatform::try_from("betterdiscord"),
            Ok(ClientPlatform::BetterDiscord)
        );
        assert_eq!(
            ClientPlatform::try_from("userstyle"),
            Ok(ClientPlatform::Userstyle)
        );
        assert!(ClientPlatform::try_from("stylus").is_err());
        assert_eq!(
            ClientPlatform::try_from("Userstyle"),
            Err("Userstyle does not have support for compiling".to_string())
        );
        assert!(ClientPlatform::try_from("BetterDiscord").is_err());
    }

    #[test]
    fn test_requested_client_tolerates_unknown() {
        assert_eq!(
            RequestedClient::from("userstyle"),
            RequestedClient::Known(ClientPlatform::Userstyle)
        );
        assert_eq!(
            RequestedClient::from("Userstyle"),
            RequestedClient::Unknown("Userstyle".to_string())
        );
        assert_eq!(
            RequestedClient::from("stylus"),
            RequestedClient::Unknown("stylus".to_string())
        );
    }

    #[test]
    fn test_client_file_names() {
        assert_eq!(ClientPlatform::BetterDiscord.file_name("foo"), "foo.theme.css");
        assert_eq!(ClientPlatform::Userstyle.file_name("foo"), "foo.user.css");
    }
}
