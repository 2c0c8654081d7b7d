//! Verbose tracing of engine state transitions.
//!
//! Off by default. The CLI turns it on with `--verbose`; tests leave it off.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose tracing for the whole process.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

/// Whether verbose tracing is currently enabled.
#[must_use]
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a `[Strata <component>]` line to stderr when verbose tracing is on.
pub fn trace(component: &str, message: &str) {
    if is_verbose() {
        eprintln!("{} {message}", format!("[Strata {component}]").dimmed());
    }
}
