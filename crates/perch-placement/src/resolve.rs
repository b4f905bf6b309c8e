//! Final placement resolver: placement name to inline style.

use serde::{Deserialize, Serialize};

use crate::placement::Placement;
use crate::rect::{ClientRect, StyleRect, Viewport};

/// The resolved placement and the offsets that realize it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Placement after overflow correction.
    pub placement: Placement,
    /// Offsets for a `position: fixed` popover.
    pub style: StyleRect,
}

/// Compute the style for `placement` from the position-mode functions.
///
/// Uses the same anchor pair as [`ideal_rect`](crate::ideal_rect), so an
/// overflow-corrected placement always gets the style of the rectangle that
/// was tested.
#[must_use]
pub fn resolve(
    placement: Placement,
    trigger: &ClientRect,
    popover: &ClientRect,
    viewport: Viewport,
) -> PlacementResult {
    let (x, y) = placement.anchors();
    PlacementResult {
        placement,
        style: StyleRect::from_axes(
            x.x_pos(trigger, popover, viewport),
            y.y_pos(trigger, popover, viewport),
        ),
    }
}
