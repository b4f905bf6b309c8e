//! Errors surfaced by the popover controller.

use thiserror::Error;

use perch_placement::PlacementError;

/// Errors returned by [`Popover`](crate::Popover) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PopoverError {
    /// The placement engine rejected a callback result.
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// A trigger description named none of `click`, `hover` or `focus`.
    #[error("trigger '{0}' must contain at least one of: click, hover, focus")]
    UnknownTrigger(String),
}
