//! Placement names and their per-axis decomposition.
//!
//! Every placement is a pair of [`Anchor`]s, one per axis. `topLeft` is
//! "outside the trigger's top edge, aligned with its left edge": an outer
//! start anchor on Y and an inner start anchor on X. Flipping a placement
//! means swapping an anchor for its mirror image on one axis, never string
//! surgery on the name.
//!
//! ```text
//!              StartOuter  StartInner  Center   EndInner   EndOuter   (X)
//! StartOuter       -        topLeft     top     topRight      -
//! StartInner    leftTop   innerTopLeft innerTop innerTopRight rightTop
//! Center         left      innerLeft   center   innerRight   right
//! EndInner     leftBottom innerBottomLeft innerBottom innerBottomRight rightBottom
//! EndOuter         -       bottomLeft  bottom   bottomRight    -
//! (Y)
//! ```
//!
//! The four outer/outer corners have no name and are never produced.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use perch_common::warning::warn_once;

/// Where the popover sits along one axis, relative to the trigger.
///
/// "Start" is the left edge on X and the top edge on Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Anchor {
    /// Outside the trigger, past its start edge (popover's end edge touches
    /// the trigger's start edge).
    StartOuter,
    /// Overlapping the trigger, aligned with its start edge.
    StartInner,
    /// Centered on the trigger's midpoint.
    Center,
    /// Overlapping the trigger, aligned with its end edge.
    EndInner,
    /// Outside the trigger, past its end edge (popover's start edge touches
    /// the trigger's end edge).
    EndOuter,
}

impl Anchor {
    /// Mirror image across the trigger's center. `Center` is its own mirror.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::StartOuter => Self::EndOuter,
            Self::StartInner => Self::EndInner,
            Self::Center => Self::Center,
            Self::EndInner => Self::StartInner,
            Self::EndOuter => Self::StartOuter,
        }
    }

    /// Whether the popover sits outside the trigger on this axis.
    #[must_use]
    pub const fn is_outer(self) -> bool {
        matches!(self, Self::StartOuter | Self::EndOuter)
    }
}

/// One of the 21 named placements.
///
/// Parsing is ASCII case-insensitive (`"topleft"`, `"TopLeft"` and
/// `"topLeft"` are the same placement). Display and serde use camelCase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Placement {
    /// Above the trigger, centered.
    Top,
    /// Above the trigger, left edges aligned.
    TopLeft,
    /// Above the trigger, right edges aligned.
    TopRight,
    /// Right of the trigger, centered.
    Right,
    /// Right of the trigger, top edges aligned.
    RightTop,
    /// Right of the trigger, bottom edges aligned.
    RightBottom,
    /// Below the trigger, centered.
    #[default]
    Bottom,
    /// Below the trigger, left edges aligned.
    BottomLeft,
    /// Below the trigger, right edges aligned.
    BottomRight,
    /// Left of the trigger, centered.
    Left,
    /// Left of the trigger, top edges aligned.
    LeftTop,
    /// Left of the trigger, bottom edges aligned.
    LeftBottom,
    /// Over the trigger, top edges aligned, centered horizontally.
    InnerTop,
    /// Over the trigger, top-left corners aligned.
    InnerTopLeft,
    /// Over the trigger, top-right corners aligned.
    InnerTopRight,
    /// Over the trigger, right edges aligned, centered vertically.
    InnerRight,
    /// Over the trigger, bottom edges aligned, centered horizontally.
    InnerBottom,
    /// Over the trigger, bottom-left corners aligned.
    InnerBottomLeft,
    /// Over the trigger, bottom-right corners aligned.
    InnerBottomRight,
    /// Over the trigger, left edges aligned, centered vertically.
    InnerLeft,
    /// Centered on the trigger on both axes.
    Center,
}

impl Placement {
    /// The `(x, y)` anchors this placement is made of.
    ///
    /// Both the ideal-rectangle table and the style resolver are driven by
    /// this one mapping.
    #[must_use]
    pub const fn anchors(self) -> (Anchor, Anchor) {
        use Anchor::{Center, EndInner, EndOuter, StartInner, StartOuter};
        match self {
            Self::Top => (Center, StartOuter),
            Self::TopLeft => (StartInner, StartOuter),
            Self::TopRight => (EndInner, StartOuter),
            Self::Right => (EndOuter, Center),
            Self::RightTop => (EndOuter, StartInner),
            Self::RightBottom => (EndOuter, EndInner),
            Self::Bottom => (Center, EndOuter),
            Self::BottomLeft => (StartInner, EndOuter),
            Self::BottomRight => (EndInner, EndOuter),
            Self::Left => (StartOuter, Center),
            Self::LeftTop => (StartOuter, StartInner),
            Self::LeftBottom => (StartOuter, EndInner),
            Self::InnerTop => (Center, StartInner),
            Self::InnerTopLeft => (StartInner, StartInner),
            Self::InnerTopRight => (EndInner, StartInner),
            Self::InnerRight => (EndInner, Center),
            Self::InnerBottom => (Center, EndInner),
            Self::InnerBottomLeft => (StartInner, EndInner),
            Self::InnerBottomRight => (EndInner, EndInner),
            Self::InnerLeft => (StartInner, Center),
            Self::Center => (Center, Center),
        }
    }

    /// Inverse of [`anchors`](Self::anchors). `None` for the four
    /// outer/outer corners, which have no name.
    #[must_use]
    pub const fn from_anchors(x: Anchor, y: Anchor) -> Option<Self> {
        use Anchor::{Center, EndInner, EndOuter, StartInner, StartOuter};
        let placement = match (x, y) {
            (Center, StartOuter) => Self::Top,
            (StartInner, StartOuter) => Self::TopLeft,
            (EndInner, StartOuter) => Self::TopRight,
            (EndOuter, Center) => Self::Right,
            (EndOuter, StartInner) => Self::RightTop,
            (EndOuter, EndInner) => Self::RightBottom,
            (Center, EndOuter) => Self::Bottom,
            (StartInner, EndOuter) => Self::BottomLeft,
            (EndInner, EndOuter) => Self::BottomRight,
            (StartOuter, Center) => Self::Left,
            (StartOuter, StartInner) => Self::LeftTop,
            (StartOuter, EndInner) => Self::LeftBottom,
            (Center, StartInner) => Self::InnerTop,
            (StartInner, StartInner) => Self::InnerTopLeft,
            (EndInner, StartInner) => Self::InnerTopRight,
            (EndInner, Center) => Self::InnerRight,
            (Center, EndInner) => Self::InnerBottom,
            (StartInner, EndInner) => Self::InnerBottomLeft,
            (EndInner, EndInner) => Self::InnerBottomRight,
            (StartInner, Center) => Self::InnerLeft,
            (Center, Center) => Self::Center,
            (StartOuter | EndOuter, StartOuter | EndOuter) => return None,
        };
        Some(placement)
    }

    /// Look a placement up by name, falling back to [`Placement::Center`].
    ///
    /// Unknown names are not an error; the fallback is reported once through
    /// the warning system.
    #[must_use]
    pub fn lookup(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            let _ = warn_once(
                "Placement",
                &format!("unknown placement '{name}', falling back to 'center'"),
            );
            Self::Center
        })
    }

    /// Parse a requested placement name.
    ///
    /// The empty string means "no preference": the containment policy picks
    /// a side (see [`contain`](crate::contain)). Anything else goes through
    /// [`lookup`](Self::lookup).
    #[must_use]
    pub fn requested(name: &str) -> Option<Self> {
        if name.is_empty() {
            None
        } else {
            Some(Self::lookup(name))
        }
    }
}
