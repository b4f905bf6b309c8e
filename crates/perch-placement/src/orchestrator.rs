//! Placement orchestrator: measure, correct, resolve.
//!
//! The one entry point the popover layer calls whenever a reposition is
//! needed (placement change, popover opened, window resized or scrolled).

use std::fmt;
use std::sync::Arc;

use crate::contain::{ContainPolicy, PlacementChoice, contain};
use crate::error::PlacementError;
use crate::placement::Placement;
use crate::rect::{ClientRect, StyleRect, WindowMetrics};
use crate::resolve::PlacementResult;

/// Something with a bounding rectangle and a rendered size.
///
/// Implemented by the host's element handles. An element that is not attached
/// to the layout tree reports `None` and the reposition is dropped.
pub trait Measurable {
    /// `getBoundingClientRect()`, or `None` when not mounted.
    fn bounding_client_rect(&self) -> Option<ClientRect>;

    /// Rendered `(offsetWidth, offsetHeight)`, borders and scrollbars
    /// included.
    fn offset_size(&self) -> (f64, f64);
}

/// A bare rectangle is always measurable; its offset size is its own size.
impl Measurable for ClientRect {
    fn bounding_client_rect(&self) -> Option<ClientRect> {
        Some(*self)
    }

    fn offset_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Signature of a placement callback.
pub type PlacementCallback =
    dyn Fn(&ClientRect, &ClientRect, &ContainPolicy) -> PlacementChoice + Send + Sync;

/// What the integrator asked for.
#[derive(Clone)]
pub enum RequestedPlacement {
    /// A placement name, case-insensitive. Empty means "no preference".
    Named(String),
    /// Computed from the live rectangles on every reposition.
    Callback(Arc<PlacementCallback>),
}

impl RequestedPlacement {
    /// Wrap a closure as a placement callback.
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&ClientRect, &ClientRect, &ContainPolicy) -> PlacementChoice
            + Send
            + Sync
            + 'static,
    {
        Self::Callback(Arc::new(callback))
    }

    /// Whether two requests are the same request: equal names, or the very
    /// same callback.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Callback(a), Self::Callback(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for RequestedPlacement {
    fn default() -> Self {
        Self::from(Placement::Bottom)
    }
}

impl From<&str> for RequestedPlacement {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for RequestedPlacement {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Placement> for RequestedPlacement {
    fn from(placement: Placement) -> Self {
        Self::Named(placement.as_ref().to_owned())
    }
}

impl fmt::Debug for RequestedPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A resolved placement together with the request that produced it.
///
/// Keeping the request lets the popover layer reposition on resize or scroll
/// without losing what the user originally asked for.
#[derive(Debug, Clone)]
pub struct PlacementState {
    /// The resolved placement and style.
    pub result: PlacementResult,
    /// The original request, verbatim.
    pub requested: RequestedPlacement,
}

impl PlacementState {
    /// State before the first successful measurement: `bottom` with every
    /// offset at zero.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            result: PlacementResult {
                placement: Placement::Bottom,
                style: StyleRect::uniform(0.0),
            },
            requested: RequestedPlacement::default(),
        }
    }
}

/// Measure both elements and compute the placement.
///
/// Returns `Ok(None)` when either element is missing or not mounted; the
/// caller keeps whatever state it had.
///
/// # Errors
///
/// Returns [`PlacementError::InvalidCallbackResult`] when a placement
/// callback returns a result whose style is not well formed (see
/// [`StyleRect::is_well_formed`](crate::StyleRect::is_well_formed)).
pub fn resolve_placement(
    requested: &RequestedPlacement,
    trigger: Option<&dyn Measurable>,
    popover: Option<&dyn Measurable>,
    policy: &ContainPolicy,
    window: &dyn WindowMetrics,
) -> Result<Option<PlacementState>, PlacementError> {
    let (Some(trigger), Some(popover)) = (trigger, popover) else {
        return Ok(None);
    };
    let (Some(trigger_rect), Some(popover_rect)) =
        (trigger.bounding_client_rect(), popover.bounding_client_rect())
    else {
        return Ok(None);
    };
    let (offset_width, offset_height) = popover.offset_size();
    let popover_rect = popover_rect.with_size(offset_width, offset_height);
    let viewport = window.viewport();

    let name = match requested {
        RequestedPlacement::Named(name) => name.to_ascii_lowercase(),
        RequestedPlacement::Callback(callback) => {
            match callback(&trigger_rect, &popover_rect, policy) {
                PlacementChoice::Named(name) => name.to_ascii_lowercase(),
                PlacementChoice::Resolved(result) => {
                    if !result.style.is_well_formed() {
                        return Err(PlacementError::InvalidCallbackResult {
                            placement: result.placement,
                            style: result.style,
                        });
                    }
                    return Ok(Some(PlacementState {
                        result,
                        requested: requested.clone(),
                    }));
                }
            }
        }
    };

    let result = contain(
        Placement::requested(&name),
        &trigger_rect,
        &popover_rect,
        viewport,
        policy,
    );
    Ok(Some(PlacementState {
        result,
        requested: requested.clone(),
    }))
}
