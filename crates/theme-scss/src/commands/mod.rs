//! Command implementations for the theme-scss CLI
//!
//! Each command module handles the CLI interface and delegates to
//! theme-scss-core for the actual work.

pub mod build;
pub mod dev;
