//! Render configuration
//!
//! Sizes, strokes and label styling handed to the diagram engine. Every
//! field has a default, so a TOML file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Render configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML
    #[error("invalid render config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("failed to read render config: {0}")]
    Io(#[from] std::io::Error),
}

/// Presentation settings for projected nodes and edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RenderConfig {
    /// Width of step nodes
    pub node_width: f64,
    /// Height of step nodes
    pub node_height: f64,
    /// CSS transition applied to fading nodes and edges
    pub fade_transition: String,
    /// Edge and arrowhead colour
    pub edge_stroke: String,
    /// Edge line width
    pub edge_stroke_width: f64,
    /// Edge label colour
    pub label_fill: String,
    /// Edge label font weight
    pub label_font_weight: u16,
    /// Edge label font size
    pub label_font_size: f64,
    /// Horizontal and vertical padding of the label background
    pub label_padding: [f64; 2],
    /// Label background fill
    pub label_background: String,
    /// Label background border width
    pub label_border_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: 260.0,
            node_height: 80.0,
            fade_transition: "opacity 0.5s ease-in-out".to_string(),
            edge_stroke: "#222".to_string(),
            edge_stroke_width: 2.0,
            label_fill: "#222".to_string(),
            label_font_weight: 600,
            label_font_size: 14.0,
            label_padding: [8.0, 4.0],
            label_background: "#fff".to_string(),
            label_border_width: 1.0,
        }
    }
}

impl RenderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With step node size
    #[inline]
    #[must_use]
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// With edge colour and width
    #[inline]
    #[must_use]
    pub fn with_edge_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.edge_stroke = stroke.into();
        self.edge_stroke_width = width;
        self
    }

    /// With fade transition
    #[inline]
    #[must_use]
    pub fn with_fade_transition(mut self, transition: impl Into<String>) -> Self {
        self.fade_transition = transition.into();
        self
    }

    /// Parse a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] on malformed input
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}
