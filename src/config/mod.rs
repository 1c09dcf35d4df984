//! Persistent user preferences for the reference host.

mod manager;

pub use manager::ConfigManager;

use std::{io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::WizardOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Stores user-configurable preferences. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_true")]
    pub latch_errors: bool,
    #[serde(default = "Config::default_true")]
    pub clear_error_on_retreat: bool,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub quiet_mode: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for suspended sessions. Defaults to
    /// `<app data>/sessions`.
    pub sessions_dir: Option<PathBuf>,
}

impl Config {
    fn default_locale() -> String {
        "en-US".into()
    }

    fn default_true() -> bool {
        true
    }

    pub fn wizard_options(&self) -> WizardOptions {
        WizardOptions {
            latch_errors: self.latch_errors,
            clear_error_on_retreat: self.clear_error_on_retreat,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            latch_errors: true,
            clear_error_on_retreat: true,
            ui_color_enabled: true,
            quiet_mode: false,
            sessions_dir: None,
        }
    }
}
