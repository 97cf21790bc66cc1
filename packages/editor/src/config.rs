use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "syntree.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Layout constants
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Maximum number of undo levels (0 = unlimited)
    #[serde(default = "default_max_undo_levels")]
    pub max_undo_levels: usize,

    /// Width of one char for monospace measurement
    #[serde(default = "default_char_width")]
    pub char_width: f64,
}

/// Fixed distances used when laying out a tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Vertical distance between a branching node and its highest child
    #[serde(default = "default_level_height")]
    pub level_height: f64,

    /// Y of a terminal node without offset
    #[serde(default = "default_terminal_y")]
    pub terminal_y: f64,

    /// How much higher a triangle terminal sits than a plain one
    #[serde(default = "default_triangle_height")]
    pub triangle_height: f64,
}

fn default_max_undo_levels() -> usize {
    100
}

fn default_char_width() -> f64 {
    8.0
}

fn default_level_height() -> f64 {
    40.0
}

fn default_terminal_y() -> f64 {
    -2.0
}

fn default_triangle_height() -> f64 {
    20.0
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults if there is none
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            max_undo_levels: default_max_undo_levels(),
            char_width: default_char_width(),
        }
    }
}

impl LayoutConfig {
    pub fn triangle_terminal_y(&self) -> f64 {
        self.terminal_y - self.triangle_height
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_height: default_level_height(),
            terminal_y: default_terminal_y(),
            triangle_height: default_triangle_height(),
        }
    }
}
