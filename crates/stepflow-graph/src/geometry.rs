//! Canvas coordinates and connection handles

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Position on the diagram canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create new point
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Connection point on a step node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// Top edge (incoming)
    Top,
    /// Right edge (outgoing)
    Right,
    /// Bottom edge (outgoing)
    Bottom,
    /// Left edge (incoming)
    Left,
}

/// Direction a handle accepts connections in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleRole {
    /// Edges start here
    Source,
    /// Edges end here
    Target,
}

impl Handle {
    /// All handles, in the order they are laid out on a step node
    pub const ALL: [Handle; 4] = [Handle::Top, Handle::Left, Handle::Right, Handle::Bottom];

    /// Role of this handle on a step node
    #[inline]
    #[must_use]
    pub const fn role(self) -> HandleRole {
        match self {
            Handle::Top | Handle::Left => HandleRole::Target,
            Handle::Right | Handle::Bottom => HandleRole::Source,
        }
    }

    /// Wire name of the handle
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Handle::Top => "top",
            Handle::Right => "right",
            Handle::Bottom => "bottom",
            Handle::Left => "left",
        }
    }
}

impl Display for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_roles_match_step_layout() {
        assert_eq!(Handle::Top.role(), HandleRole::Target);
        assert_eq!(Handle::Left.role(), HandleRole::Target);
        assert_eq!(Handle::Right.role(), HandleRole::Source);
        assert_eq!(Handle::Bottom.role(), HandleRole::Source);
    }

    #[test]
    fn handle_wire_names() {
        let json = serde_json::to_string(&Handle::Bottom).unwrap();
        assert_eq!(json, "\"bottom\"");
        let parsed: Handle = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(parsed, Handle::Left);
    }
}
