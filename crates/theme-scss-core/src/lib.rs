//! Configuration, metadata and multi-target publishing for theme-scss.
//!
//! This crate provides:
//! - Configuration resolution with package descriptor fallback (`ThemeSettings`)
//! - BetterDiscord and Userstyle metadata blocks (`MetadataBlock`)
//! - A grass-backed compiler adapter with a per-invocation cache (`Compiler`)
//! - Publishing of the source, client and development targets (`Publisher`)

pub mod compile;
pub mod config;
mod error;
pub mod identity;
pub mod meta;
pub mod platform;
pub mod publish;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use compile::Compiler;
pub use config::{DEFAULT_CONFIG_FILE, ThemeConfig};
pub use error::{CompileError, ConfigError, Error, MetaError, PublishError, Result};
pub use identity::{Identity, IdentityField, IdentitySource, PackageDescriptor, slug};
pub use meta::{MetaStyle, MetadataBlock};
pub use platform::{ClientPlatform, DevMod, HostOs, RequestedClient};
pub use publish::{PublishReport, Publisher, SkipReason, Target, TargetOutcome, TargetStatus};
pub use settings::{ResolvedPaths, ThemeSettings};
