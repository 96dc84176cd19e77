use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReviewBranchError, Result};

/// Placeholder replaced by the joined ticket numbers in a branch name pattern.
pub const TICKETS_PLACEHOLDER: &str = "{tickets}";

/// File name looked up in the current directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "reviewbranch.toml";

/// Represents the complete configuration for git-review-branch.
///
/// Contains the review branch naming rules and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub branch: BranchConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_name_pattern() -> String {
    format!("{}_review", TICKETS_PLACEHOLDER)
}

fn default_ticket_separator() -> String {
    "|".to_string()
}

fn default_true() -> bool {
    true
}

/// How review branches are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchConfig {
    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,

    #[serde(default = "default_ticket_separator")]
    pub ticket_separator: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        BranchConfig {
            name_pattern: default_name_pattern(),
            ticket_separator: default_ticket_separator(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Print the follow-up `git log` / `git diff` commands after a run.
    #[serde(default = "default_true")]
    pub show_hints: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig { show_hints: true }
    }
}

impl Config {
    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.branch.name_pattern.contains(TICKETS_PLACEHOLDER) {
            return Err(ReviewBranchError::config(format!(
                "branch.name_pattern '{}' must contain {}",
                self.branch.name_pattern, TICKETS_PLACEHOLDER
            )));
        }
        Ok(())
    }
}

/// Parses and validates configuration from a TOML string.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| ReviewBranchError::config(format!("cannot parse configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `reviewbranch.toml` in current directory
/// 3. `.reviewbranch.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            ReviewBranchError::config(format!("cannot read {}: {}", path.display(), e))
        })?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
