//! Common utilities for the Strata layer engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - deduplicated colored terminal warnings
//! - **Tracing** - opt-in verbose lines for state transitions

pub mod trace;
pub mod warning;
