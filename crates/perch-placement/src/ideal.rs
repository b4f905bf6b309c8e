//! Ideal (unconstrained) rectangles.
//!
//! The rectangle a placement would occupy if the viewport were infinite.
//! Only used to decide whether a placement overflows; the style that
//! actually gets applied comes from [`resolve`](crate::resolve).

use serde::Serialize;

use crate::placement::Placement;
use crate::rect::{ClientRect, Viewport};

/// Absolute edges of a placed popover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealRect {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

/// Which ends of one axis leave the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AxisOverflow {
    /// Crosses the left (X) or top (Y) viewport edge.
    pub start: bool,
    /// Crosses the right (X) or bottom (Y) viewport edge.
    pub end: bool,
}

impl AxisOverflow {
    /// Either end overflows.
    #[must_use]
    pub const fn any(self) -> bool {
        self.start || self.end
    }
}

/// Overflow on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Overflow {
    /// Horizontal overflow.
    pub x: AxisOverflow,
    /// Vertical overflow.
    pub y: AxisOverflow,
}

impl Overflow {
    /// Any edge overflows.
    #[must_use]
    pub const fn any(self) -> bool {
        self.x.any() || self.y.any()
    }
}

impl IdealRect {
    /// Compare against the viewport. Touching an edge is not overflow, and
    /// NaN edges never overflow.
    #[must_use]
    pub fn overflow(&self, viewport: Viewport) -> Overflow {
        Overflow {
            x: AxisOverflow {
                start: self.left < 0.0,
                end: self.right > viewport.width,
            },
            y: AxisOverflow {
                start: self.top < 0.0,
                end: self.bottom > viewport.height,
            },
        }
    }
}

/// The unconstrained rectangle for `placement`.
#[must_use]
pub fn ideal_rect(placement: Placement, trigger: &ClientRect, popover: &ClientRect) -> IdealRect {
    let (x, y) = placement.anchors();
    let horizontal = x.x_rect(trigger, popover);
    let vertical = y.y_rect(trigger, popover);
    IdealRect {
        top: vertical.top,
        right: horizontal.right,
        bottom: vertical.bottom,
        left: horizontal.left,
    }
}
