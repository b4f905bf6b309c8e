//! Per-axis popover geometry.
//!
//! Each function answers one question for one axis: "where do the popover's
//! two edges go for this anchor?" There are two families:
//!
//! - `*_pos` (position mode) returns CSS offsets against the viewport edges,
//!   one of them `auto`. These become the final inline style.
//! - `*_rect` (rect mode) returns absolute edges. These are only used to test
//!   for viewport overflow.
//!
//! Outer anchors put the popover outside the trigger, inner anchors align it
//! with one of the trigger's edges and center puts the two midpoints on top
//! of each other.
//!
//! ```text
//!            start outer | start inner       end inner | end outer
//!   [popover]|trigger    |[popover]  ...  ...[popover] |   trigger|[popover]
//! ```
//!
//! All functions are total. NaN inputs produce NaN outputs.
//!
//! The operation order of each formula is fixed: the same inputs must give
//! bit-identical offsets on every call.

use crate::placement::Anchor;
use crate::rect::{
    AutoOr, ClientRect, HorizontalOffsets, HorizontalSpan, VerticalOffsets, VerticalSpan,
    Viewport,
};

const fn right_of(px: f64) -> HorizontalOffsets {
    HorizontalOffsets {
        left: AutoOr::Auto,
        right: AutoOr::Length(px),
    }
}

const fn left_of(px: f64) -> HorizontalOffsets {
    HorizontalOffsets {
        left: AutoOr::Length(px),
        right: AutoOr::Auto,
    }
}

const fn top_of(px: f64) -> VerticalOffsets {
    VerticalOffsets {
        top: AutoOr::Length(px),
        bottom: AutoOr::Auto,
    }
}

const fn bottom_of(px: f64) -> VerticalOffsets {
    VerticalOffsets {
        top: AutoOr::Auto,
        bottom: AutoOr::Length(px),
    }
}

// ---------------------------------------------------------------------------
// Position mode, X axis
// ---------------------------------------------------------------------------

/// Horizontally centered on the trigger, pinned by `right`.
#[must_use]
pub fn center_x_pos(
    trigger: &ClientRect,
    popover: &ClientRect,
    viewport: Viewport,
) -> HorizontalOffsets {
    right_of(viewport.width - trigger.right - (popover.width - trigger.width) / 2.0)
}

/// Left edges aligned.
#[must_use]
pub const fn start_x_inner_pos(trigger: &ClientRect) -> HorizontalOffsets {
    left_of(trigger.left)
}

/// Popover's right edge on the trigger's left edge.
#[must_use]
pub fn start_x_outer_pos(trigger: &ClientRect, viewport: Viewport) -> HorizontalOffsets {
    right_of(viewport.width - trigger.left)
}

/// Right edges aligned.
#[must_use]
pub fn end_x_inner_pos(trigger: &ClientRect, viewport: Viewport) -> HorizontalOffsets {
    right_of(viewport.width - trigger.right)
}

/// Popover's left edge on the trigger's right edge.
#[must_use]
pub const fn end_x_outer_pos(trigger: &ClientRect) -> HorizontalOffsets {
    left_of(trigger.right)
}

// ---------------------------------------------------------------------------
// Position mode, Y axis
// ---------------------------------------------------------------------------

/// Vertically centered on the trigger, pinned by `bottom`.
#[must_use]
pub fn center_y_pos(
    trigger: &ClientRect,
    popover: &ClientRect,
    viewport: Viewport,
) -> VerticalOffsets {
    bottom_of(viewport.height - trigger.bottom - (popover.height - trigger.height) / 2.0)
}

/// Top edges aligned.
#[must_use]
pub const fn start_y_inner_pos(trigger: &ClientRect) -> VerticalOffsets {
    top_of(trigger.top)
}

/// Popover's bottom edge on the trigger's top edge.
#[must_use]
pub fn start_y_outer_pos(trigger: &ClientRect, viewport: Viewport) -> VerticalOffsets {
    bottom_of(viewport.height - trigger.top)
}

/// Bottom edges aligned.
#[must_use]
pub fn end_y_inner_pos(trigger: &ClientRect, viewport: Viewport) -> VerticalOffsets {
    bottom_of(viewport.height - trigger.bottom)
}

/// Popover's top edge on the trigger's bottom edge.
#[must_use]
pub const fn end_y_outer_pos(trigger: &ClientRect) -> VerticalOffsets {
    top_of(trigger.bottom)
}

// ---------------------------------------------------------------------------
// Rect mode, X axis
// ---------------------------------------------------------------------------

/// Absolute X extent when centered.
#[must_use]
pub fn center_x_rect(trigger: &ClientRect, popover: &ClientRect) -> HorizontalSpan {
    let right = popover.width / 2.0 - trigger.width / 2.0 + trigger.right;
    HorizontalSpan {
        left: right - popover.width,
        right,
    }
}

/// Absolute X extent left of the trigger.
#[must_use]
pub fn start_x_outer_rect(trigger: &ClientRect, popover: &ClientRect) -> HorizontalSpan {
    HorizontalSpan {
        left: trigger.left - popover.width,
        right: trigger.left,
    }
}

/// Absolute X extent right of the trigger.
#[must_use]
pub fn end_x_outer_rect(trigger: &ClientRect, popover: &ClientRect) -> HorizontalSpan {
    HorizontalSpan {
        left: trigger.right,
        right: trigger.right + popover.width,
    }
}

/// Absolute X extent with left edges aligned.
#[must_use]
pub fn start_x_inner_rect(trigger: &ClientRect, popover: &ClientRect) -> HorizontalSpan {
    HorizontalSpan {
        left: trigger.left,
        right: trigger.left + popover.width,
    }
}

/// Absolute X extent with right edges aligned.
#[must_use]
pub fn end_x_inner_rect(trigger: &ClientRect, popover: &ClientRect) -> HorizontalSpan {
    HorizontalSpan {
        left: trigger.right - popover.width,
        right: trigger.right,
    }
}

// ---------------------------------------------------------------------------
// Rect mode, Y axis
// ---------------------------------------------------------------------------

/// Absolute Y extent when centered.
#[must_use]
pub fn center_y_rect(trigger: &ClientRect, popover: &ClientRect) -> VerticalSpan {
    let bottom = popover.height / 2.0 - trigger.height / 2.0 + trigger.bottom;
    VerticalSpan {
        top: bottom - popover.height,
        bottom,
    }
}

/// Absolute Y extent above the trigger.
#[must_use]
pub fn start_y_outer_rect(trigger: &ClientRect, popover: &ClientRect) -> VerticalSpan {
    VerticalSpan {
        top: trigger.top - popover.height,
        bottom: trigger.top,
    }
}

/// Absolute Y extent below the trigger.
#[must_use]
pub fn end_y_outer_rect(trigger: &ClientRect, popover: &ClientRect) -> VerticalSpan {
    VerticalSpan {
        top: trigger.bottom,
        bottom: trigger.bottom + popover.height,
    }
}

/// Absolute Y extent with top edges aligned.
#[must_use]
pub fn start_y_inner_rect(trigger: &ClientRect, popover: &ClientRect) -> VerticalSpan {
    VerticalSpan {
        top: trigger.top,
        bottom: trigger.top + popover.height,
    }
}

/// Absolute Y extent with bottom edges aligned.
#[must_use]
pub fn end_y_inner_rect(trigger: &ClientRect, popover: &ClientRect) -> VerticalSpan {
    VerticalSpan {
        top: trigger.bottom - popover.height,
        bottom: trigger.bottom,
    }
}

// ---------------------------------------------------------------------------
// Anchor dispatch
// ---------------------------------------------------------------------------

impl Anchor {
    /// Position-mode offsets for this anchor on the X axis.
    #[must_use]
    pub fn x_pos(
        self,
        trigger: &ClientRect,
        popover: &ClientRect,
        viewport: Viewport,
    ) -> HorizontalOffsets {
        match self {
            Self::StartOuter => start_x_outer_pos(trigger, viewport),
            Self::StartInner => start_x_inner_pos(trigger),
            Self::Center => center_x_pos(trigger, popover, viewport),
            Self::EndInner => end_x_inner_pos(trigger, viewport),
            Self::EndOuter => end_x_outer_pos(trigger),
        }
    }

    /// Position-mode offsets for this anchor on the Y axis.
    #[must_use]
    pub fn y_pos(
        self,
        trigger: &ClientRect,
        popover: &ClientRect,
        viewport: Viewport,
    ) -> VerticalOffsets {
        match self {
            Self::StartOuter => start_y_outer_pos(trigger, viewport),
            Self::StartInner => start_y_inner_pos(trigger),
            Self::Center => center_y_pos(trigger, popover, viewport),
            Self::EndInner => end_y_inner_pos(trigger, viewport),
            Self::EndOuter => end_y_outer_pos(trigger),
        }
    }

    /// Rect-mode extent for this anchor on the X axis.
    #[must_use]
    pub fn x_rect(self, trigger: &ClientRect, popover: &ClientRect) -> HorizontalSpan {
        match self {
            Self::StartOuter => start_x_outer_rect(trigger, popover),
            Self::StartInner => start_x_inner_rect(trigger, popover),
            Self::Center => center_x_rect(trigger, popover),
            Self::EndInner => end_x_inner_rect(trigger, popover),
            Self::EndOuter => end_x_outer_rect(trigger, popover),
        }
    }

    /// Rect-mode extent for this anchor on the Y axis.
    #[must_use]
    pub fn y_rect(self, trigger: &ClientRect, popover: &ClientRect) -> VerticalSpan {
        match self {
            Self::StartOuter => start_y_outer_rect(trigger, popover),
            Self::StartInner => start_y_inner_rect(trigger, popover),
            Self::Center => center_y_rect(trigger, popover),
            Self::EndInner => end_y_inner_rect(trigger, popover),
            Self::EndOuter => end_y_outer_rect(trigger, popover),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> ClientRect {
        ClientRect::from_edges(100.0, 150.0, 120.0, 50.0)
    }

    fn popover() -> ClientRect {
        ClientRect::from_origin_size(0.0, 0.0, 200.0, 60.0)
    }

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn test_center_x_pos_and_rect_agree() {
        // Rect mode: right = 100 - 50 + 150 = 200, left = 0.
        let span = center_x_rect(&trigger(), &popover());
        assert_eq!(span, HorizontalSpan { left: 0.0, right: 200.0 });

        // Position mode: right offset = 1000 - 150 - (200 - 100) / 2 = 800,
        // which is 1000 - span.right.
        let pos = center_x_pos(&trigger(), &popover(), VIEWPORT);
        assert_eq!(pos.right, AutoOr::Length(800.0));
        assert_eq!(pos.left, AutoOr::Auto);
    }

    #[test]
    fn test_outer_y_functions() {
        assert_eq!(
            start_y_outer_rect(&trigger(), &popover()),
            VerticalSpan { top: 40.0, bottom: 100.0 }
        );
        assert_eq!(start_y_outer_pos(&trigger(), VIEWPORT).bottom, AutoOr::Length(700.0));
        assert_eq!(
            end_y_outer_rect(&trigger(), &popover()),
            VerticalSpan { top: 120.0, bottom: 180.0 }
        );
        assert_eq!(end_y_outer_pos(&trigger()).top, AutoOr::Length(120.0));
    }

    #[test]
    fn test_inner_x_functions() {
        assert_eq!(
            start_x_inner_rect(&trigger(), &popover()),
            HorizontalSpan { left: 50.0, right: 250.0 }
        );
        assert_eq!(
            end_x_inner_rect(&trigger(), &popover()),
            HorizontalSpan { left: -50.0, right: 150.0 }
        );
        assert_eq!(end_x_inner_pos(&trigger(), VIEWPORT).right, AutoOr::Length(850.0));
    }

    #[test]
    fn test_nan_propagates() {
        let broken = ClientRect {
            left: f64::NAN,
            ..trigger()
        };
        let span = start_x_outer_rect(&broken, &popover());
        assert!(span.left.is_nan());
        assert!(span.right.is_nan());
    }
}
