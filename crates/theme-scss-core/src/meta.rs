//! Metadata blocks embedded at the top of client theme files.
//!
//! A block is the theme identity followed by the platform's extra pairs,
//! rendered either as a BetterDiscord doc comment or a UserCSS header:
//!
//! ```text
//! /**                      /* ==UserStyle==
//!  * @name Foo             @name Foo
//!  * @author Bar           @author Bar
//!  */                      ==/UserStyle== */
//! ```
//!
//! Keys are never de-duplicated: an extras file that repeats `name` produces
//! a second `@name` line.

use std::path::Path;

use serde_json::{Map, Value};
use theme_scss_runtime::SystemRuntime;

use crate::error::MetaError;

/// Comment style of a metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaStyle {
    BetterDiscord,
    Userstyle,
}

impl MetaStyle {
    fn open(&self) -> &'static str {
        match self {
            MetaStyle::BetterDiscord => "/**",
            MetaStyle::Userstyle => "/* ==UserStyle==",
        }
    }

    fn line_prefix(&self) -> &'static str {
        match self {
            MetaStyle::BetterDiscord => "\n * @",
            MetaStyle::Userstyle => "\n@",
        }
    }

    fn close(&self) -> &'static str {
        match self {
            MetaStyle::BetterDiscord => "\n */",
            MetaStyle::Userstyle => "\n==/UserStyle== */",
        }
    }
}

/// Ordered `(key, value)` pairs of one metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    pairs: Vec<(String, String)>,
}

impl MetadataBlock {
    /// Defaults first, then extras, both in their given order.
    pub fn new(
        defaults: impl IntoIterator<Item = (String, String)>,
        extras: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            pairs: defaults.into_iter().chain(extras).collect(),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn render(&self, style: MetaStyle) -> String {
        let mut out = String::from(style.open());
        for (key, value) in &self.pairs {
            out.push_str(style.line_prefix());
            out.push_str(key);
            out.push(' ');
            out.push_str(value);
        }
        out.push_str(style.close());
        out
    }
}

/// Read a platform metadata file: a JSON object of key to scalar value.
///
/// Pairs keep the order they are declared in the file.
pub fn load_extras(
    runtime: &dyn SystemRuntime,
    path: &Path,
) -> Result<Vec<(String, String)>, MetaError> {
    let missing = |reason: String| MetaError::MetaFileMissing {
        path: path.to_path_buf(),
        reason,
    };

    let text = runtime.file_read_string(path).map_err(|err| {
        if err.is_not_found() {
            missing("file does not exist".to_string())
        } else {
            missing(err.to_string())
        }
    })?;

    let object: Map<String, Value> =
        serde_json::from_str(&text).map_err(|err| missing(format!("invalid JSON object: {}", err)))?;

    Ok(object
        .into_iter()
        .map(|(key, value)| (key, render_value(&value)))
        .collect())
}

/// Text of a metadata value as it appears after `@key `.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(","),
        // null, bool, number, object: their JSON spelling
        other => other.to_string(),
    }
}
