//! Optional `robolang.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [language]
//! builtin_values = ["myX", "myY"]
//! robot_values = false
//!
//! [output]
//! format = "json"
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use robolang_core::CheckOptions;
use serde::Deserialize;

use crate::OutputFormat;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "robolang.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub language: LanguageConfig,
    pub output: OutputConfig,
}

/// `[language]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageConfig {
    /// Names accepted as values without a declaration.
    pub builtin_values: Vec<String>,
    /// Enable the robot state names (`myX`, `chipsHere`, ...).
    pub robot_values: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

/// Effective settings after merging the file with command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output: OutputFormat,
    pub options: CheckOptions,
}

// ── Functions ─────────────────────────────────────────────────────────────────

pub fn parse_config(content: &str, path: &Path) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Load the config named by `explicit`, or `robolang.toml` in `cwd` if it
/// exists. An explicit path that cannot be read is an error; a missing
/// default file is not.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, String> {
    let path: PathBuf = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = cwd.join(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(Config::default());
            }
            default
        }
    };
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let config = parse_config(&content, &path)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

impl Config {
    pub fn resolve(&self, output: Option<OutputFormat>, robot_values: bool) -> Settings {
        let mut options = CheckOptions {
            builtin_values: self.language.builtin_values.clone(),
        };
        if robot_values || self.language.robot_values {
            options = options.with_robot_values();
        }
        Settings {
            output: output.or(self.output.format).unwrap_or(OutputFormat::Text),
            options,
        }
    }
}
