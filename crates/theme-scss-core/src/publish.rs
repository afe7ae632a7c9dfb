//! Multi-target publishing.
//!
//! | Target | Body |
//! |---|---|
//! | source | compiled CSS, verbatim |
//! | betterdiscord | BetterDiscord block, `@import` of the source, CSS |
//! | userstyle | `@-moz-document` wrapper around a tab-indented UserCSS block, `@import` and CSS |
//! | dev | BetterDiscord block when `dev.mod` is set, CSS |
//!
//! A build never stops at the first failing target. Missing metadata skips
//! that one client; I/O errors fail that one target.

use std::path::{Path, PathBuf};

use theme_scss_runtime::SystemRuntime;
use tracing::{error, info, warn};

use crate::error::{MetaError, PublishError};
use crate::meta::{MetaStyle, MetadataBlock, load_extras};
use crate::platform::{ClientPlatform, RequestedClient};
use crate::settings::ThemeSettings;

/// Something the publisher was asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Source,
    Client(ClientPlatform),
    /// A `compileFor` entry with no matching platform
    Unsupported(String),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Source => write!(f, "source"),
            Target::Client(platform) => write!(f, "{}", platform),
            Target::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

/// Why a target was not written.
#[derive(Debug)]
pub enum SkipReason {
    MetaFileMissing(MetaError),
    UnsupportedTarget(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MetaFileMissing(err) => write!(f, "{}", err),
            SkipReason::UnsupportedTarget(name) => {
                write!(f, "{} does not have support for compiling", name)
            }
        }
    }
}

#[derive(Debug)]
pub enum TargetStatus {
    Written(PathBuf),
    Skipped(SkipReason),
    Failed(PublishError),
}

impl TargetStatus {
    pub fn written_path(&self) -> Option<&Path> {
        match self {
            TargetStatus::Written(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TargetStatus::Failed(_))
    }
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub target: Target,
    pub status: TargetStatus,
}

/// Result of one build publish.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub outcomes: Vec<TargetOutcome>,
    pub warnings: Vec<String>,
}

impl PublishReport {
    /// First outcome recorded for `target`.
    pub fn outcome(&self, target: &Target) -> Option<&TargetOutcome> {
        self.outcomes.iter().find(|o| &o.target == target)
    }

    /// Outcomes for everything except the source target.
    pub fn client_outcomes(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| o.target != Target::Source)
    }

    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| o.status.written_path())
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status.is_failed())
    }

    fn record(&mut self, target: Target, result: Result<PathBuf, PublishError>) {
        let status = match result {
            Ok(path) => {
                info!(kind = %target, path = %path.display(), "Wrote output file");
                TargetStatus::Written(path)
            }
            Err(PublishError::Meta(err)) => {
                warn!("{} Skipping {}.", err, target);
                TargetStatus::Skipped(SkipReason::MetaFileMissing(err))
            }
            Err(err) => {
                error!(kind = %target, "{}", err);
                TargetStatus::Failed(err)
            }
        };
        self.outcomes.push(TargetOutcome { target, status });
    }
}

/// Writes compiled CSS to every requested target.
pub struct Publisher<'a> {
    runtime: &'a dyn SystemRuntime,
    settings: &'a ThemeSettings,
}

impl<'a> Publisher<'a> {
    pub fn new(runtime: &'a dyn SystemRuntime, settings: &'a ThemeSettings) -> Self {
        Self { runtime, settings }
    }

    /// Publish the source target, then each requested client in order.
    pub fn publish(&self, requested: &[RequestedClient], css: &str) -> PublishReport {
        let mut report = PublishReport::default();

        report.record(Target::Source, self.publish_source(css));

        if requested.is_empty() {
            let message = "You provided no clients to compile your source for.".to_string();
            warn!("{}", message);
            report.warnings.push(message);
            return report;
        }

        for request in requested {
            let platform = match request {
                RequestedClient::Known(platform) => *platform,
                RequestedClient::Unknown(name) => {
                    let reason = SkipReason::UnsupportedTarget(name.clone());
                    warn!("{}", reason);
                    report.outcomes.push(TargetOutcome {
                        target: Target::Unsupported(name.clone()),
                        status: TargetStatus::Skipped(reason),
                    });
                    continue;
                }
            };

            info!("Creating an output file for {}", platform);
            let result = self.publish_client(platform, css);
            report.record(Target::Client(platform), result);
        }

        report
    }

    /// Write the development theme file.
    ///
    /// The output folder must already exist. Without a `dev.mod` the CSS is
    /// written bare and no metadata file is needed.
    pub fn publish_dev(&self, css: &str) -> Result<PathBuf, PublishError> {
        let output = &self.settings.paths.dev_output;
        let dir = output.parent().unwrap_or(Path::new(""));
        if !self.runtime.is_dir(dir).unwrap_or(false) {
            return Err(PublishError::OutputDirMissing {
                path: dir.to_path_buf(),
            });
        }

        let body = match self.settings.dev_mod {
            // BetterDiscord style for every mod
            Some(_) => {
                let block = self
                    .metadata_block(ClientPlatform::BetterDiscord)?
                    .render(MetaStyle::BetterDiscord);
                dev_body(&block, css)
            }
            None => css.to_string(),
        };
        self.write(output, &body)?;
        Ok(output.clone())
    }

    /// Identity pairs followed by the platform's extras file.
    pub fn metadata_block(&self, platform: ClientPlatform) -> Result<MetadataBlock, MetaError> {
        let extras = load_extras(self.runtime, self.settings.paths.meta_file(platform))?;
        Ok(MetadataBlock::new(self.settings.identity.pairs(), extras))
    }

    fn publish_source(&self, css: &str) -> Result<PathBuf, PublishError> {
        let output = &self.settings.paths.dist_output;
        if let Some(dir) = output.parent() {
            self.ensure_dir(dir)?;
        }
        self.write(output, css)?;
        Ok(output.clone())
    }

    fn publish_client(&self, platform: ClientPlatform, css: &str) -> Result<PathBuf, PublishError> {
        let block = self.metadata_block(platform)?;
        let import = &self.settings.theme_import;

        let body = match platform {
            ClientPlatform::BetterDiscord => {
                betterdiscord_body(&block.render(MetaStyle::BetterDiscord), import, css)
            }
            ClientPlatform::Userstyle => {
                userstyle_body(&block.render(MetaStyle::Userstyle), import, css)
            }
        };

        self.ensure_dir(&self.settings.paths.clients_dir)?;
        let output = self.settings.paths.client(platform);
        self.write(output, &body)?;
        Ok(output.to_path_buf())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), PublishError> {
        if self.runtime.is_dir(dir).unwrap_or(false) {
            return Ok(());
        }
        info!(path = %dir.display(), "Output folder does not exist, creating it");
        self.runtime
            .dir_create(dir, true)
            .map_err(|source| PublishError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PublishError> {
        self.runtime
            .file_write(path, contents.as_bytes())
            .map_err(|source| PublishError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// `<block>\n\n@import url("<import>");\n\n<css>`
pub fn betterdiscord_body(block: &str, import: &str, css: &str) -> String {
    format!("{}\n\n@import url(\"{}\");\n\n{}", block, import, css)
}

/// The UserCSS wrapper. Block and CSS are indented one tab.
pub fn userstyle_body(block: &str, import: &str, css: &str) -> String {
    format!(
        "@-moz-document domain(\"discord.com\") {{\n{}\n\t@import url(\"{}\");\n\n{}\n}}",
        indent(block),
        import,
        indent(css)
    )
}

/// `<block>\n\n<css>`
pub fn dev_body(block: &str, css: &str) -> String {
    format!("{}\n\n{}", block, css)
}

/// Prefix every line with a tab, including empty ones and the empty line
/// after a trailing newline.
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("\t{}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
