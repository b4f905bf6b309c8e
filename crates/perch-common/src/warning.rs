//! Deduplicated warnings with colored terminal output.
//!
//! The placement engine never fails on recoverable input (an unknown
//! placement name, a custom policy answering with garbage). It falls back to
//! a safe value and reports the fallback here, once per distinct message, so
//! a popover repositioned on every scroll event does not flood stderr.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Lock the warning set, recovering the data if a previous holder panicked.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recoverable fallback (prints once per unique message).
///
/// Returns `true` if this call printed the warning, `false` if the same
/// message had already been reported.
///
/// # Example
/// ```ignore
/// warn_once("Placement", "unknown placement 'sideways', using 'center'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{YELLOW}[Perch {component}] ⚠ {message}{RESET}");
    }
    should_print
}

/// Whether `message` has already been reported for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Forget all recorded warnings.
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
