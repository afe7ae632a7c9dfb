//! Theme identity (name, author, version, description) and its fallback chain.
//!
//! Each field is looked up in an ordered list of [`IdentitySource`]s. The
//! first source with a non-empty value wins and later sources are not asked.
//! In practice the list is `[theme-config.json, package.json]`.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use theme_scss_runtime::SystemRuntime;
use tracing::debug;

use crate::config::ThemeConfig;
use crate::error::ConfigError;

/// One of the identity fields every metadata block starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Name,
    Author,
    Version,
    Description,
}

impl IdentityField {
    /// Fields that must resolve to a non-empty value.
    pub const REQUIRED: [IdentityField; 3] = [Self::Name, Self::Author, Self::Version];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Name => "name",
            IdentityField::Author => "author",
            IdentityField::Version => "version",
            IdentityField::Description => "description",
        }
    }
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A provider of identity values.
pub trait IdentitySource {
    /// Human readable name, used in log output.
    fn source_name(&self) -> &str;

    /// The value this source holds for `field`, if any.
    fn field(&self, field: IdentityField) -> Option<String>;
}

impl IdentitySource for ThemeConfig {
    fn source_name(&self) -> &str {
        "theme config"
    }

    fn field(&self, field: IdentityField) -> Option<String> {
        match field {
            IdentityField::Name => self.name.clone(),
            IdentityField::Author => self.author.clone(),
            IdentityField::Version => self.version.clone(),
            IdentityField::Description => self.description.clone(),
        }
    }
}

/// `package.json` fields we care about.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageFields {
    name: Option<String>,
    author: Option<PackageAuthor>,
    version: Option<String>,
    description: Option<String>,
}

/// npm allows `author` as a string or as a person object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageAuthor {
    Name(String),
    Person { name: String },
}

/// The package descriptor next to the configuration file.
///
/// The file is read on the first lookup and at most once. A missing or
/// malformed descriptor simply provides no values.
pub struct PackageDescriptor<'a> {
    runtime: &'a dyn SystemRuntime,
    path: PathBuf,
    fields: OnceCell<PackageFields>,
}

impl<'a> PackageDescriptor<'a> {
    pub const FILE_NAME: &'static str = "package.json";

    pub fn new(runtime: &'a dyn SystemRuntime, path: PathBuf) -> Self {
        Self {
            runtime,
            path,
            fields: OnceCell::new(),
        }
    }

    /// The descriptor that sits in `dir`.
    pub fn in_dir(runtime: &'a dyn SystemRuntime, dir: &Path) -> Self {
        Self::new(runtime, dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fields(&self) -> &PackageFields {
        self.fields.get_or_init(|| {
            let text = match self.runtime.file_read_string(&self.path) {
                Ok(text) => text,
                Err(err) => {
                    debug!(path = %self.path.display(), error = %err, "No package descriptor");
                    return PackageFields::default();
                }
            };
            serde_json::from_str(&text).unwrap_or_else(|err| {
                debug!(path = %self.path.display(), error = %err, "Ignoring malformed package descriptor");
                PackageFields::default()
            })
        })
    }
}

impl IdentitySource for PackageDescriptor<'_> {
    fn source_name(&self) -> &str {
        PackageDescriptor::FILE_NAME
    }

    fn field(&self, field: IdentityField) -> Option<String> {
        let fields = self.fields();
        match field {
            IdentityField::Name => fields.name.clone(),
            IdentityField::Author => fields.author.as_ref().map(|author| match author {
                PackageAuthor::Name(name) | PackageAuthor::Person { name } => name.clone(),
            }),
            IdentityField::Version => fields.version.clone(),
            IdentityField::Description => fields.description.clone(),
        }
    }
}

/// The resolved identity of a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub author: String,
    pub version: String,
    pub description: Option<String>,
}

impl Identity {
    /// Resolve every field through `sources`, in order.
    ///
    /// Fails with [`ConfigError::MissingRequiredMeta`] naming every required
    /// field that no source could provide.
    pub fn resolve(sources: &[&dyn IdentitySource]) -> Result<Self, ConfigError> {
        let lookup = |field: IdentityField| {
            sources.iter().find_map(|source| {
                let value = source.field(field).filter(|v| !v.trim().is_empty())?;
                debug!(field = %field, source = source.source_name(), "Resolved theme identity field");
                Some(value)
            })
        };

        let name = lookup(IdentityField::Name);
        let author = lookup(IdentityField::Author);
        let version = lookup(IdentityField::Version);

        match (name, author, version) {
            (Some(name), Some(author), Some(version)) => Ok(Self {
                name,
                author,
                version,
                description: lookup(IdentityField::Description),
            }),
            (name, author, version) => {
                let found = [name.is_some(), author.is_some(), version.is_some()];
                let fields = IdentityField::REQUIRED
                    .into_iter()
                    .zip(found)
                    .filter(|(_, found)| !found)
                    .map(|(field, _)| field)
                    .collect();
                Err(ConfigError::MissingRequiredMeta { fields })
            }
        }
    }

    /// Metadata pairs in declared order. `description` is only present when set.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("name".to_string(), self.name.clone()),
            ("author".to_string(), self.author.clone()),
            ("version".to_string(), self.version.clone()),
        ];
        if let Some(description) = &self.description {
            pairs.push(("description".to_string(), description.clone()));
        }
        pairs
    }
}

/// Lowercase and replace spaces with hyphens.
pub fn slug(value: &str) -> String {
    value.to_lowercase().replace(' ', "-")
}
