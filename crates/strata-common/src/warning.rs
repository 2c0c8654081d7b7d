//! Engine warnings with colored terminal output.
//!
//! Provides deduplication so a corrupt record or a bad selector that is
//! re-evaluated on every synthesis is only reported once.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable anomaly (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("Storage", "stored state failed to parse; starting fresh");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        eprintln!("{}", format!("[Strata {component}] ⚠ {message}").yellow());
    }
}

/// Record a warning, returning whether it was new.
fn first_sighting(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}

/// Clear all recorded warnings (call when a new page session starts).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
