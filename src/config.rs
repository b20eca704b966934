//! Editor configuration.
//!
//! Settings are read from an optional JSON file; every field has a default,
//! so a partial file only overrides what it names.

use crate::constants::{
    AUDIO_BUTTON_HIT_RADIUS, CODE_GENERATION_ATTEMPTS, DEFAULT_SHORT_ANSWER_HEIGHT,
    DEFAULT_SHORT_ANSWER_WIDTH, OPTION_HIT_RADIUS,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "editor.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Grab radius around choice markers (percentage units)
    pub option_hit_radius: f64,
    /// Grab radius around audio buttons (percentage units)
    pub audio_button_hit_radius: f64,
    /// Width of a newly placed short answer box
    pub short_answer_width: f64,
    /// Height of a newly placed short answer box
    pub short_answer_height: f64,
    /// Random survey codes tried before giving up
    pub code_generation_attempts: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            option_hit_radius: OPTION_HIT_RADIUS,
            audio_button_hit_radius: AUDIO_BUTTON_HIT_RADIUS,
            short_answer_width: DEFAULT_SHORT_ANSWER_WIDTH,
            short_answer_height: DEFAULT_SHORT_ANSWER_HEIGHT,
            code_generation_attempts: CODE_GENERATION_ATTEMPTS,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid editor configuration")
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Default location: `<config dir>/surveycanvas/editor.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("surveycanvas").join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No editor config, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }
}
