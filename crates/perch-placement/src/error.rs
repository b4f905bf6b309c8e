//! Errors surfaced by the placement engine.
//!
//! Only integrator mistakes are errors. Unknown placement names fall back to
//! `center` and unmeasurable elements make the orchestrator a no-op.

use thiserror::Error;

use crate::placement::Placement;
use crate::rect::StyleRect;

/// Errors returned by [`resolve_placement`](crate::resolve_placement) and
/// [`Viewport::new`](crate::Viewport::new).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// A placement callback returned a result whose style does not pin each
    /// axis with exactly one numeric offset and one `auto`.
    ///
    /// This is a configuration error: it is reported to the caller and the
    /// reposition is not retried.
    #[error(
        "[Popover] placement callbacks must return a placement name or \
         {{ placement, style }} with one numeric offset and one 'auto' per axis \
         (got '{placement}' with {style})"
    )]
    InvalidCallbackResult {
        /// Placement the callback claimed.
        placement: Placement,
        /// The malformed style it returned.
        style: StyleRect,
    },

    /// A containment policy name other than `flip`, `flipX`, `flipY` or `none`.
    #[error("unknown contain policy '{0}' (expected flip, flipX, flipY or none)")]
    UnknownPolicy(String),

    /// Viewport dimensions were negative, infinite or NaN.
    #[error("viewport must have finite, non-negative dimensions (got {width}x{height})")]
    InvalidViewport {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}
