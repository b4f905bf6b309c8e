//! Placement geometry for popovers anchored to a trigger element.
//!
//! # Scope
//!
//! Given the bounding rectangle of a trigger and of a popover, this crate
//! computes where the popover goes for one of 21 named placements and flips
//! the placement when it would overflow the viewport.
//!
//! - **Rectangle algebra** ([`algebra`]) - per-axis offset functions in two
//!   modes: *position* (CSS `top/right/bottom/left` against the viewport
//!   edges, one side `auto`) and *rect* (absolute edges, for overflow tests)
//! - **Ideal rectangles** ([`ideal`]) - the unconstrained rectangle a
//!   placement would occupy
//! - **Overflow correction** ([`contain`]) - the `flip`, `flipX`, `flipY` and
//!   custom containment policies
//! - **Final resolver** ([`resolve`]) - placement name to CSS offsets
//! - **Orchestrator** ([`orchestrator`]) - measures live elements and drives
//!   the pipeline
//!
//! ```text
//! measure trigger + popover
//!     -> ideal rect of requested placement
//!     -> overflow correction (policy)
//!     -> final resolver
//!     -> PlacementResult { placement, style }
//! ```
//!
//! Everything here is a pure function of its inputs. Nothing is cached
//! between calls.

/// Print one line per correction step when the `placement-trace` feature is on.
macro_rules! placement_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "placement-trace")]
        eprintln!("[PLACEMENT] {}", format_args!($($arg)*));
    };
}

pub mod algebra;
pub mod contain;
pub mod error;
pub mod ideal;
pub mod orchestrator;
pub mod placement;
pub mod rect;
pub mod resolve;

// Re-exports for convenience
pub use contain::{ContainPolicy, PlacementChoice, contain};
pub use error::PlacementError;
pub use ideal::{AxisOverflow, IdealRect, Overflow, ideal_rect};
pub use orchestrator::{Measurable, PlacementState, RequestedPlacement, resolve_placement};
pub use placement::{Anchor, Placement};
pub use rect::{
    AutoOr, ClientRect, HorizontalOffsets, HorizontalSpan, StyleRect, VerticalOffsets,
    VerticalSpan, Viewport, WindowMetrics,
};
pub use resolve::{PlacementResult, resolve};
