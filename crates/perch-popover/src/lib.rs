//! Headless popover controller.
//!
//! This crate owns everything around the placement engine that a popover
//! widget needs, without tying it to a UI toolkit:
//!
//! - **Open state** - uncontrolled (`default_open`) or controlled (`open`)
//! - **Triggers** - click toggles, focus opens, hover opens and closes
//! - **Focus effects** - focus the popover on open, give focus back to a click
//!   trigger on close
//! - **Repositioning** - on placement change, on open, and (throttled) on
//!   window resize and scroll
//! - **Styles** - `position: fixed` plus the resolved offsets, visibility and
//!   open/closed classes
//!
//! The host feeds [`PopoverEvent`]s to a [`Popover`] and applies the
//! [`Effect`]s it gets back. When an effect asks for a reposition, the host
//! calls [`Popover::reposition`] with its live element handles.

/// Print placement transitions when the `placement-trace` feature is on.
macro_rules! placement_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "placement-trace")]
        eprintln!("[PLACEMENT] {}", format_args!($($arg)*));
    };
}

pub mod controller;
pub mod error;
pub mod options;
pub mod style;
pub mod throttle;
pub mod trigger;

pub use controller::{Effect, Phase, Popover, PopoverEvent};
pub use error::PopoverError;
pub use options::{PopoverOptions, Portal, Reposition};
pub use style::{StateStyles, StyleMap, class_list};
pub use throttle::Throttle;
pub use trigger::TriggerOn;
