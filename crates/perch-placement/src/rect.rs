//! Rectangles, viewport size and CSS offset values.
//!
//! [CSSOM View § 6 `getBoundingClientRect()`](https://www.w3.org/TR/cssom-view-1/#dom-element-getboundingclientrect)
//!
//! All coordinates are viewport pixels as `f64`, the same numbers a browser
//! hands out, so results stay bit-identical with a DOM implementation.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::PlacementError;

/// An axis-aligned box in viewport coordinates.
///
/// Snapshot of an element's bounds at measurement time. Never mutated by the
/// engine, only recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRect {
    /// Distance from the viewport's top edge to the box's top edge.
    pub top: f64,
    /// Distance from the viewport's left edge to the box's right edge.
    pub right: f64,
    /// Distance from the viewport's top edge to the box's bottom edge.
    pub bottom: f64,
    /// Distance from the viewport's left edge to the box's left edge.
    pub left: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl ClientRect {
    /// Build a rectangle from its four edges; width and height are derived.
    #[must_use]
    pub fn from_edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Build a rectangle from its top-left corner and size.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top: y,
            right: x + width,
            bottom: y + height,
            left: x,
            width,
            height,
        }
    }

    /// Same edges, with `width`/`height` replaced.
    ///
    /// Used for the popover, whose rendered offset size (scrollbars and
    /// borders included) is what actually has to fit in the viewport.
    #[must_use]
    pub const fn with_size(self, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

/// Current viewport size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Layout viewport width.
    pub width: f64,
    /// Layout viewport height.
    pub height: f64,
}

impl Viewport {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidViewport`] if either dimension is
    /// negative, infinite or NaN.
    pub fn new(width: f64, height: f64) -> Result<Self, PlacementError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(PlacementError::InvalidViewport { width, height })
        }
    }
}

/// Source of the live viewport size.
///
/// Mirrors the DOM chain `window.innerWidth || document.documentElement.clientWidth`:
/// the inner size wins unless it is zero or NaN.
pub trait WindowMetrics {
    /// `window.innerWidth`.
    fn inner_width(&self) -> f64;
    /// `window.innerHeight`.
    fn inner_height(&self) -> f64;
    /// `document.documentElement.clientWidth`.
    fn client_width(&self) -> f64;
    /// `document.documentElement.clientHeight`.
    fn client_height(&self) -> f64;

    /// The viewport size the placement functions measure against.
    fn viewport(&self) -> Viewport {
        Viewport {
            width: first_truthy(self.inner_width(), self.client_width()),
            height: first_truthy(self.inner_height(), self.client_height()),
        }
    }
}

fn first_truthy(preferred: f64, fallback: f64) -> f64 {
    if preferred == 0.0 || preferred.is_nan() {
        fallback
    } else {
        preferred
    }
}

impl WindowMetrics for Viewport {
    fn inner_width(&self) -> f64 {
        self.width
    }

    fn inner_height(&self) -> f64 {
        self.height
    }

    fn client_width(&self) -> f64 {
        self.width
    }

    fn client_height(&self) -> f64 {
        self.height
    }

    fn viewport(&self) -> Viewport {
        *self
    }
}

/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// A box offset that is either `auto` or a pixel length.
///
/// Serializes as the string `"auto"` or a bare number, which is exactly what
/// an inline style wants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AutoOr {
    /// Unconstrained: the opposite offset plus the intrinsic size decide.
    #[default]
    Auto,
    /// Pixels from the corresponding viewport edge.
    Length(f64),
}

impl AutoOr {
    /// Whether this offset is `auto`.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The pixel length, or `None` for `auto`.
    #[must_use]
    pub const fn length(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Length(px) => Some(px),
        }
    }
}

impl From<f64> for AutoOr {
    fn from(px: f64) -> Self {
        Self::Length(px)
    }
}

impl fmt::Display for AutoOr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Length(px) => write!(f, "{px}px"),
        }
    }
}

impl Serialize for AutoOr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Length(px) => serializer.serialize_f64(*px),
        }
    }
}

impl<'de> Deserialize<'de> for AutoOr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Length(f64),
            Keyword(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Length(px) => Ok(Self::Length(px)),
            Raw::Keyword(keyword) if keyword.eq_ignore_ascii_case("auto") => Ok(Self::Auto),
            Raw::Keyword(other) => Err(de::Error::invalid_value(
                de::Unexpected::Str(&other),
                &"a number or \"auto\"",
            )),
        }
    }
}

/// Horizontal half of a style: `left` and `right` offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalOffsets {
    /// Offset from the viewport's left edge.
    pub left: AutoOr,
    /// Offset from the viewport's right edge.
    pub right: AutoOr,
}

/// Vertical half of a style: `top` and `bottom` offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalOffsets {
    /// Offset from the viewport's top edge.
    pub top: AutoOr,
    /// Offset from the viewport's bottom edge.
    pub bottom: AutoOr,
}

/// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props)
///
/// The four offsets of a `position: fixed` popover.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleRect {
    /// `top` offset.
    #[serde(default)]
    pub top: AutoOr,
    /// `right` offset.
    #[serde(default)]
    pub right: AutoOr,
    /// `bottom` offset.
    #[serde(default)]
    pub bottom: AutoOr,
    /// `left` offset.
    #[serde(default)]
    pub left: AutoOr,
}

impl StyleRect {
    /// Combine the horizontal and vertical halves.
    #[must_use]
    pub const fn from_axes(x: HorizontalOffsets, y: VerticalOffsets) -> Self {
        Self {
            top: y.top,
            right: x.right,
            bottom: y.bottom,
            left: x.left,
        }
    }

    /// All four offsets set to the same pixel length.
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: AutoOr::Length(px),
            right: AutoOr::Length(px),
            bottom: AutoOr::Length(px),
            left: AutoOr::Length(px),
        }
    }

    /// Exactly one of `top`/`bottom` and one of `left`/`right` is `auto`.
    ///
    /// Every style produced by the resolver has this shape.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.top.is_auto() != self.bottom.is_auto() && self.left.is_auto() != self.right.is_auto()
    }
}

impl fmt::Display for StyleRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ top: {}, right: {}, bottom: {}, left: {} }}",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Absolute horizontal extent of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSpan {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
}

/// Absolute vertical extent of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalSpan {
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}
