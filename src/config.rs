//! YAML configuration for masked inputs and the demo host.
//!
//! ```yaml
//! label: Birth date
//! log_dir: /tmp/masked-demo
//! input:
//!   mask: "00/00/0000"
//!   prompt_char: "_"
//!   filter: any
//! ```

use crate::error::ConfigError;
use crate::widgets::filters::FilterKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-control configuration of a masked text box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskedInputConfig {
    /// Empty disables masking.
    pub mask: String,
    pub prompt_char: char,
    pub filter: FilterKind,
    pub read_only: bool,
    /// Start in overwrite mode instead of insert mode.
    pub overwrite: bool,
    /// Initial content, coerced through the mask.
    pub text: String,
}

impl Default for MaskedInputConfig {
    fn default() -> Self {
        Self {
            mask: String::new(),
            prompt_char: ' ',
            filter: FilterKind::Any,
            read_only: false,
            overwrite: false,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub label: String,
    /// Directory for the log file; logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub input: MaskedInputConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            label: "Value".to_string(),
            log_dir: None,
            input: MaskedInputConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        Self::from_yaml(&source)
    }
}

/// Parses a prompt character given on the command line.
pub fn parse_prompt_char(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ConfigError::invalid_value(
            "prompt",
            format!("expected a single character, got '{value}'"),
        )),
    }
}
