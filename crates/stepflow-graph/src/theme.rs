//! Fixed colour and icon lookup per step category
//!
//! Every mapping is an exhaustive `match`; adding a category is a compile
//! error until it has a style.

use serde::{Deserialize, Serialize};

/// Workflow phase a step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Entry point of the workflow
    Entry,
    /// Preparation steps
    Setup,
    /// Coordinating step
    Coordination,
    /// Specialist agents
    Agents,
    /// Repeated implementation work
    Loop,
    /// Branching decision
    Decision,
    /// Terminal step
    Done,
}

/// Per-step colour override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Green accent
    Green,
    /// Blue accent
    Blue,
    /// Purple accent
    Purple,
    /// Red accent
    Red,
}

/// Background tint of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteTint {
    /// Amber paper
    Amber,
    /// Green paper
    Green,
    /// Pink paper
    Pink,
    /// Violet paper
    Violet,
}

/// Resolved visual style of a step node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Fill colour
    pub background: &'static str,
    /// Border colour
    pub border: &'static str,
    /// Leading icon
    pub icon: &'static str,
}

/// Resolved visual style of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TintStyle {
    /// Fill colour
    pub background: &'static str,
    /// Border colour
    pub border: &'static str,
}

impl Phase {
    /// Default style for steps of this phase
    #[must_use]
    pub const fn style(self) -> NodeStyle {
        let (background, border, icon) = match self {
            Phase::Entry => ("#f0f9ff", "#0ea5e9", "🚀"),
            Phase::Setup => ("#fef3c7", "#f59e0b", "⚙️"),
            Phase::Coordination => ("#fef9c3", "#eab308", "🟡"),
            Phase::Agents => ("#f0fdf4", "#22c55e", "🤖"),
            Phase::Loop => ("#f5f5f5", "#6b7280", "🔄"),
            Phase::Decision => ("#fee2e2", "#ef4444", "❓"),
            Phase::Done => ("#d1fae5", "#10b981", "✅"),
        };
        NodeStyle {
            background,
            border,
            icon,
        }
    }
}

impl ColorTag {
    /// Background and border replacing the phase colours
    #[must_use]
    pub const fn tint(self) -> TintStyle {
        let (background, border) = match self {
            ColorTag::Green => ("#f0fdf4", "#22c55e"),
            ColorTag::Blue => ("#eff6ff", "#3b82f6"),
            ColorTag::Purple => ("#faf5ff", "#a855f7"),
            ColorTag::Red => ("#fef2f2", "#ef4444"),
        };
        TintStyle { background, border }
    }
}

impl NoteTint {
    /// Note paper colours
    #[must_use]
    pub const fn style(self) -> TintStyle {
        let (background, border) = match self {
            NoteTint::Amber => ("#fef3c7", "#f59e0b"),
            NoteTint::Green => ("#f0fdf4", "#22c55e"),
            NoteTint::Pink => ("#fce7f3", "#db2777"),
            NoteTint::Violet => ("#ede9fe", "#8b5cf6"),
        };
        TintStyle { background, border }
    }
}

/// Style of a step: phase colours, replaced by the colour tag when present
#[must_use]
pub fn step_style(phase: Phase, color: Option<ColorTag>) -> NodeStyle {
    let base = phase.style();
    match color {
        Some(tag) => {
            let tint = tag.tint();
            NodeStyle {
                background: tint.background,
                border: tint.border,
                icon: base.icon,
            }
        }
        None => base,
    }
}
