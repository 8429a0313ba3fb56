//! Serialized graph definitions
//!
//! A [`GraphDocument`] is what a JSON or YAML file holds. Steps are listed
//! in reveal order; their order indices are assigned on build and never
//! read from input.

use crate::error::SpecError;
use crate::geometry::{Handle, Point};
use crate::ids::NodeId;
use crate::theme::{ColorTag, NoteTint, Phase};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Step as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDef {
    /// Unique id
    pub id: NodeId,
    /// Title
    pub label: String,
    /// Secondary text
    #[serde(default)]
    pub description: String,
    /// Phase category
    pub phase: Phase,
    /// Responsible agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Colour override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTag>,
    /// Default layout position
    pub position: Point,
}

impl StepDef {
    /// Create step definition at the origin
    #[must_use]
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            phase,
            agent: None,
            color: None,
            position: Point::default(),
        }
    }

    /// With description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With responsible agent
    #[must_use]
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// With colour override
    #[must_use]
    pub fn color(mut self, color: ColorTag) -> Self {
        self.color = Some(color);
        self
    }

    /// With default position
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }
}

/// Edge as written in a definition file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDef {
    /// Source step id
    pub source: NodeId,
    /// Target step id
    pub target: NodeId,
    /// Source handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<Handle>,
    /// Target handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<Handle>,
    /// Caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EdgeDef {
    /// Create edge definition without handles or label
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            label: None,
        }
    }

    /// With source and target handles
    #[must_use]
    pub fn handles(mut self, source: Handle, target: Handle) -> Self {
        self.source_handle = Some(source);
        self.target_handle = Some(target);
        self
    }

    /// With caption
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Note as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDef {
    /// Unique id
    pub id: NodeId,
    /// Reveal cursor at which the note appears
    pub appears_at: usize,
    /// Default layout position
    pub position: Point,
    /// Paper colour
    pub tint: NoteTint,
    /// Text body
    pub content: String,
}

impl NoteDef {
    /// Create note definition at the origin
    #[must_use]
    pub fn new(
        id: impl Into<NodeId>,
        appears_at: usize,
        tint: NoteTint,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            appears_at,
            position: Point::default(),
            tint,
            content: content.into(),
        }
    }

    /// With default position
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }
}

/// Complete graph definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Steps in reveal order
    pub steps: Vec<StepDef>,
    /// Declared edges
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
    /// Notes
    #[serde(default)]
    pub notes: Vec<NoteDef>,
}

impl GraphDocument {
    /// Parse a JSON document
    ///
    /// # Errors
    /// Returns [`SpecError::Json`] on malformed input
    pub fn from_json_str(input: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a YAML document
    ///
    /// # Errors
    /// Returns [`SpecError::Yaml`] on malformed input
    pub fn from_yaml_str(input: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read a document, choosing the parser from the file extension
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, or does not parse
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let input = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&input),
            "yaml" | "yml" => Self::from_yaml_str(&input),
            other => Err(SpecError::UnsupportedFormat(other.to_string())),
        }
    }
}
