//! Common utilities for the perch popover engine.
//!
//! This crate provides shared infrastructure used by all perch components:
//! - **Warning System** - colored, deduplicated terminal output for recoverable
//!   fallbacks (unknown placement names, ignored policy results)

pub mod warning;
