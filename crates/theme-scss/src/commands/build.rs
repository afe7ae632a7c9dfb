//! Build command implementation
//!
//! Compiles the theme once and publishes the source file followed by every
//! client file requested in the configuration.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use theme_scss_core::{Compiler, PublishReport, Publisher, ThemeSettings};
use theme_scss_runtime::{SystemRuntime, default_runtime};
use tracing::info;

/// Arguments for the build command
#[derive(Debug)]
pub struct BuildArgs {
    pub config: PathBuf,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let start = Instant::now();
    let runtime = default_runtime();

    let settings = ThemeSettings::resolve(&runtime, &args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let report = build(&runtime, &settings)?;

    let failed = report.outcomes.iter().filter(|o| o.status.is_failed()).count();
    if failed > 0 {
        bail!("{} of {} targets failed to publish", failed, report.outcomes.len());
    }

    info!(
        theme = %settings.identity.name,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Theme built"
    );
    Ok(())
}

/// Compile once and publish every target.
///
/// Only a compile failure is returned as an error; per-target problems are
/// in the report.
pub(crate) fn build(runtime: &dyn SystemRuntime, settings: &ThemeSettings) -> Result<PublishReport> {
    let compiler = Compiler::new(runtime);

    info!(path = %settings.paths.dist_target.display(), "Compiling");
    let css = compiler
        .compile_cached(&settings.paths.dist_target)
        .context("Failed to compile theme")?;

    Ok(Publisher::new(runtime, settings).publish(&settings.clients, css))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use theme_scss_runtime::NativeRuntime;
    use theme_scss_core::{ClientPlatform, Target};

    fn project(compile_for: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("metas")).unwrap();
        fs::write(root.join("src/source.scss"), ".a { .b { color: red; } }").unwrap();
        fs::write(root.join("metas/betterdiscord.json"), r#"{ "invite": "abc" }"#).unwrap();
        let config = root.join("theme-config.json");
        fs::write(
            &config,
            format!(
                r#"{{
                    "name": "Night Owl", "author": "Jane", "version": "1.0.0",
                    "dev": {{ "output": "{}" }},
                    "dist": {{ "clients": {{ "compileFor": {} }} }}
                }}"#,
                root.join("dev.theme.css").display().to_string().replace('\\', "/"),
                compile_for
            ),
        )
        .unwrap();
        (temp, config)
    }

    #[test]
    fn test_build_publishes_requested_clients() {
        let (temp, config) = project(r#"["betterdiscord"]"#);
        let runtime = NativeRuntime::new();
        let settings = ThemeSettings::resolve_in(&runtime, temp.path(), &config).unwrap();

        let report = build(&runtime, &settings).unwrap();

        assert!(!report.has_failures());
        let client = temp.path().join("clients").join("night-owl.theme.css");
        assert_eq!(
            report
                .outcome(&Target::Client(ClientPlatform::BetterDiscord))
                .and_then(|o| o.status.written_path()),
            Some(client.as_path())
        );
        let body = fs::read_to_string(&client).unwrap();
        assert!(body.contains(" * @invite abc\n"));
        assert!(body.contains(".a .b {\n  color: red;\n}"));
    }

    #[test]
    fn test_build_skips_missing_metadata_without_failing() {
        let (temp, config) = project(r#"["userstyle"]"#);
        let runtime = NativeRuntime::new();
        let settings = ThemeSettings::resolve_in(&runtime, temp.path(), &config).unwrap();

        let report = build(&runtime, &settings).unwrap();

        assert!(!report.has_failures());
        assert!(temp.path().join("src/source.css").is_file());
        assert!(!temp.path().join("clients/night-owl.user.css").exists());
    }

    #[test]
    fn test_build_reports_compile_error() {
        let (temp, config) = project("[]");
        fs::write(temp.path().join("src/source.scss"), "a { color: ; ").unwrap();
        let runtime = NativeRuntime::new();
        let settings = ThemeSettings::resolve_in(&runtime, temp.path(), &config).unwrap();

        let err = build(&runtime, &settings).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to compile theme"));
        assert!(!temp.path().join("src/source.css").exists());
    }

    #[test]
    fn test_execute_fails_without_config() {
        let temp = TempDir::new().unwrap();
        let err = execute(BuildArgs {
            config: temp.path().join("theme-config.json"),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("theme-config.json"));
    }
}
