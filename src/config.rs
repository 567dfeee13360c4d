//! Converter configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Stock defaults (below)
//! 2. `blexit.toml` in the working directory, if present
//! 3. Command-line flags (`--input`, `--posts-dir`, `--comments-dir`)
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input = "Squarespace-Wordpress-Export-07-15-2024.xml"
//! posts_dir = "public/posts"
//! comments_dir = "public/comments"
//! extension = "md"              # File extension for posts and comments
//! on_slug_collision = "overwrite"  # or "error"
//! ```
//!
//! Config files are sparse: override only what you need. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "blexit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What to do when two posts derive the same slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Write every post; the later one replaces the earlier file.
    #[default]
    Overwrite,
    /// Abort before writing anything.
    Error,
}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// WXR export to read.
    pub input: PathBuf,
    /// Directory receiving one file per post.
    pub posts_dir: PathBuf,
    /// Directory receiving one file per comment.
    pub comments_dir: PathBuf,
    /// Extension of every written file, without the dot.
    pub extension: String,
    pub on_slug_collision: CollisionPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Squarespace-Wordpress-Export-07-15-2024.xml"),
            posts_dir: PathBuf::from("public/posts"),
            comments_dir: PathBuf::from("public/comments"),
            extension: "md".to_string(),
            on_slug_collision: CollisionPolicy::default(),
        }
    }
}

impl ExportConfig {
    /// Validate values that serde alone cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation("extension must not be empty".into()));
        }
        if self.extension.starts_with('.') || self.extension.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "extension must be a bare suffix like \"md\"".into(),
            ));
        }
        if self.posts_dir == self.comments_dir {
            return Err(ConfigError::Validation(
                "posts_dir and comments_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ExportConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ExportConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ExportConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<ExportConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `blexit.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# blexit configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
# Command-line flags override values set here.

# WordPress (WXR) export to convert.
input = "Squarespace-Wordpress-Export-07-15-2024.xml"

# One file per post, named <YYYY>-<MM>-<permalink tail>.<extension>.
posts_dir = "public/posts"

# One file per comment, named <post id>-<n>.<extension>.
comments_dir = "public/comments"

# Extension for every generated file, without the dot.
extension = "md"

# Two posts from the same month with the same permalink tail share a slug.
#   "overwrite" - write both; the later post replaces the earlier file
#   "error"     - refuse to convert, write nothing
on_slug_collision = "overwrite"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        ExportConfig::default().validate().unwrap();
    }

    #[test]
    fn default_paths() {
        let config = ExportConfig::default();
        assert_eq!(config.posts_dir, PathBuf::from("public/posts"));
        assert_eq!(config.comments_dir, PathBuf::from("public/comments"));
        assert_eq!(config.extension, "md");
        assert_eq!(config.on_slug_collision, CollisionPolicy::Overwrite);
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn load_config_overrides_only_given_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
input = "export.xml"
on_slug_collision = "error"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.input, PathBuf::from("export.xml"));
        assert_eq!(config.on_slug_collision, CollisionPolicy::Error);
        assert_eq!(config.posts_dir, PathBuf::from("public/posts"));
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "post_dir = \"typo\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_unknown_collision_policy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "on_slug_collision = \"rename\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn empty_extension_is_invalid() {
        let config = ExportConfig {
            extension: String::new(),
            ..ExportConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn dotted_extension_is_invalid() {
        let config = ExportConfig {
            extension: ".md".into(),
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shared_output_dir_is_invalid() {
        let config = ExportConfig {
            comments_dir: PathBuf::from("public/posts"),
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // merge / stock config
    // =========================================================================

    #[test]
    fn merge_toml_overlay_wins() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: ExportConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn stock_defaults_value_is_table() {
        assert!(stock_defaults_value().unwrap().is_table());
    }
}
