//! The reveal cursor
//!
//! Steps with `order_index < position` are revealed. The cursor never
//! leaves `[1, total]`; moves past either end are no-ops.

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Current reveal position out of the total number of steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RevealCursor {
    position: usize,
    total: usize,
}

impl RevealCursor {
    /// Cursor at the first step
    ///
    /// A `total` of zero is treated as one so the invariant holds.
    #[inline]
    #[must_use]
    pub fn start(total: usize) -> Self {
        Self {
            position: 1,
            total: total.max(1),
        }
    }

    /// Cursor at `position`, clamped into `[1, total]`
    #[inline]
    #[must_use]
    pub fn at(position: usize, total: usize) -> Self {
        let total = total.max(1);
        Self {
            position: position.clamp(1, total),
            total,
        }
    }

    /// Current position
    #[inline]
    #[must_use]
    pub fn position(self) -> usize {
        self.position
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn total(self) -> usize {
        self.total
    }

    /// Whether another step can be revealed
    #[inline]
    #[must_use]
    pub fn can_advance(self) -> bool {
        self.position < self.total
    }

    /// Whether a step can be hidden again
    #[inline]
    #[must_use]
    pub fn can_retreat(self) -> bool {
        self.position > 1
    }

    /// Whether every step is revealed
    #[inline]
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.position == self.total
    }

    /// Whether a step with this order index is revealed
    #[inline]
    #[must_use]
    pub fn reveals(self, order_index: usize) -> bool {
        order_index < self.position
    }

    /// Move forward one step; returns false at the end
    pub(crate) fn advance(&mut self) -> bool {
        if self.can_advance() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step; returns false at the start
    pub(crate) fn retreat(&mut self) -> bool {
        if self.can_retreat() {
            self.position -= 1;
            true
        } else {
            false
        }
    }
}

impl Display for RevealCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.position, self.total)
    }
}
