//! Overflow correction ("contain").
//!
//! Decides whether a requested placement has to change so the popover stays
//! on screen. The correction works on the placement's [`Anchor`] pair and
//! runs in a fixed order:
//!
//! 1. Measure the ideal rectangle of the requested placement (`center` when
//!    no placement was requested) and how it overflows the viewport.
//! 2. No placement requested: pick a side. Vertical first (`top` when the
//!    bottom overflows, `bottom` when the top does), then horizontal
//!    (`right` when the left overflows, `left` when the right does).
//! 3. X axis. `top`/`bottom` are centered on X; if that overflows, align
//!    with the trigger's left edge (left overflow) or right edge (right
//!    overflow). Any other non-center X anchor is flipped to its mirror when
//!    the edge it grows toward overflows.
//! 4. Y axis. `left`/`right`/`innerLeft`/`innerRight` are centered on Y; if
//!    that overflows, align with the trigger's top or bottom edge. Any other
//!    non-center Y anchor is flipped the same way as on X.
//!
//! Every test in steps 3 and 4 uses the rectangle from step 1. A qualifier
//! added in a centering step is final for that call. When both ends of an
//! axis overflow, the start-edge test wins and a flip is never undone: the
//! result is deterministic even if it still overflows.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::PlacementError;
use crate::ideal::{AxisOverflow, ideal_rect};
use crate::placement::{Anchor, Placement};
use crate::rect::{ClientRect, Viewport};
use crate::resolve::{PlacementResult, resolve};

/// What a custom containment policy or a placement callback answers.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementChoice {
    /// A placement name. Resolved through the lookup table; unknown names
    /// become `center`.
    Named(String),
    /// A finished result, returned without further resolution.
    Resolved(PlacementResult),
}

impl From<&str> for PlacementChoice {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for PlacementChoice {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Placement> for PlacementChoice {
    fn from(placement: Placement) -> Self {
        Self::Named(placement.as_ref().to_owned())
    }
}

impl From<PlacementResult> for PlacementChoice {
    fn from(result: PlacementResult) -> Self {
        Self::Resolved(result)
    }
}

/// Signature of a custom containment policy.
///
/// Receives the requested placement (`None` for "no preference"), the
/// trigger rectangle and the popover rectangle.
pub type CustomPolicy =
    dyn Fn(Option<Placement>, &ClientRect, &ClientRect) -> PlacementChoice + Send + Sync;

/// How to correct a placement that overflows the viewport.
#[derive(Clone, Default)]
pub enum ContainPolicy {
    /// Use the requested placement verbatim.
    None,
    /// Correct both axes.
    #[default]
    Flip,
    /// Correct the horizontal axis only.
    FlipX,
    /// Correct the vertical axis only.
    FlipY,
    /// Integrator-supplied logic.
    Custom(Arc<CustomPolicy>),
}

impl ContainPolicy {
    /// Wrap a closure as a custom policy.
    pub fn custom<F>(policy: F) -> Self
    where
        F: Fn(Option<Placement>, &ClientRect, &ClientRect) -> PlacementChoice
            + Send
            + Sync
            + 'static,
    {
        Self::Custom(Arc::new(policy))
    }

    /// `(x, y)`: which axes the built-in flip policies correct.
    const fn axes(&self) -> (bool, bool) {
        match self {
            Self::Flip => (true, true),
            Self::FlipX => (true, false),
            Self::FlipY => (false, true),
            Self::None | Self::Custom(_) => (false, false),
        }
    }

    /// Name used in configuration; `None` for custom policies.
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::None => Some("none"),
            Self::Flip => Some("flip"),
            Self::FlipX => Some("flipX"),
            Self::FlipY => Some("flipY"),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Debug for ContainPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for ContainPolicy {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" | "null" => Ok(Self::None),
            "flip" => Ok(Self::Flip),
            "flipx" => Ok(Self::FlipX),
            "flipy" => Ok(Self::FlipY),
            _ => Err(PlacementError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl Serialize for ContainPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Custom(_) => Err(S::Error::custom(
                "custom contain policies cannot be serialized",
            )),
            named => serializer.serialize_str(named.name().unwrap_or_default()),
        }
    }
}

impl<'de> Deserialize<'de> for ContainPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map_or(Ok(Self::None), |name| name.parse().map_err(serde::de::Error::custom))
    }
}

/// Should an anchor be mirrored, given how its axis overflows?
///
/// Outer anchors grow away from the trigger, so they flip when the side they
/// grow toward overflows. Inner anchors grow across the trigger toward the
/// opposite side.
const fn needs_flip(anchor: Anchor, overflow: AxisOverflow) -> bool {
    match anchor {
        Anchor::StartOuter | Anchor::EndInner => overflow.start,
        Anchor::StartInner | Anchor::EndOuter => overflow.end,
        Anchor::Center => false,
    }
}

/// Align a centered axis with one of the trigger's edges when centering
/// overflows. The start edge wins when both ends overflow.
const fn edge_for_centered(overflow: AxisOverflow) -> Anchor {
    if overflow.start {
        Anchor::StartInner
    } else if overflow.end {
        Anchor::EndInner
    } else {
        Anchor::Center
    }
}

/// Run the flip algorithm for the built-in policies.
fn correct(
    requested: Option<Placement>,
    trigger: &ClientRect,
    popover: &ClientRect,
    viewport: Viewport,
    (flip_x, flip_y): (bool, bool),
) -> Placement {
    let ideal = ideal_rect(requested.unwrap_or(Placement::Center), trigger, popover);
    let overflow = ideal.overflow(viewport);
    placement_trace!("requested={requested:?} ideal={ideal:?} overflow={overflow:?}");

    let mut placement = requested;
    if placement.is_none() {
        if flip_y {
            if overflow.y.end {
                placement = Some(Placement::Top);
            } else if overflow.y.start {
                placement = Some(Placement::Bottom);
            }
        }
        if placement.is_none() && flip_x {
            if overflow.x.start {
                placement = Some(Placement::Right);
            } else if overflow.x.end {
                placement = Some(Placement::Left);
            }
        }
        placement_trace!("no preference, picked {placement:?}");
    }
    let Some(placement) = placement else {
        return Placement::Center;
    };

    let (mut x, mut y) = placement.anchors();
    if flip_x {
        if x == Anchor::Center && y.is_outer() {
            x = edge_for_centered(overflow.x);
        } else if needs_flip(x, overflow.x) {
            x = x.flipped();
        }
    }
    if flip_y {
        if y == Anchor::Center && x != Anchor::Center {
            y = edge_for_centered(overflow.y);
        } else if needs_flip(y, overflow.y) {
            y = y.flipped();
        }
    }

    let corrected = Placement::from_anchors(x, y).unwrap_or(Placement::Center);
    placement_trace!("{placement} -> {corrected}");
    corrected
}

/// Correct `requested` under `policy` and resolve it to a style.
///
/// `requested` is `None` when the caller expressed no preference. A custom
/// policy that answers with a [`PlacementChoice::Resolved`] result bypasses
/// the resolver entirely.
#[must_use]
pub fn contain(
    requested: Option<Placement>,
    trigger: &ClientRect,
    popover: &ClientRect,
    viewport: Viewport,
    policy: &ContainPolicy,
) -> PlacementResult {
    let placement = match policy {
        ContainPolicy::None => requested.unwrap_or(Placement::Center),
        ContainPolicy::Custom(custom) => match custom(requested, trigger, popover) {
            PlacementChoice::Named(name) => Placement::lookup(&name),
            PlacementChoice::Resolved(result) => return result,
        },
        ContainPolicy::Flip | ContainPolicy::FlipX | ContainPolicy::FlipY => {
            correct(requested, trigger, popover, viewport, policy.axes())
        }
    };
    resolve(placement, trigger, popover, viewport)
}
