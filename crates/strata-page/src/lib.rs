//! Page host for the Strata overlay.
//!
//! # Scope
//!
//! This crate drives the layer engine against a live document the way a
//! content script would:
//! - **Style sink** - a single `<style>` element in `<head>` whose text is
//!   replaced on every commit
//! - **Panel** - the control panel subtree, its layer list, and the events
//!   its controls produce
//! - **Session** - the content script's panel lifecycle
//!   (`Uninitialized -> Visible <-> Hidden`)
//! - **Activation** - the ping/toggle protocol that installs the script once
//!   and toggles it afterwards
//!
//! ```text
//! Activator ──ping──> Transport ──> ContentScript ──> Engine ──> Commit
//!     │                                  │                         │
//!     └──install (first time)            └── PanelPresenter        └──> <style>
//! ```
//!
//! # Not Implemented
//!
//! - Panel dragging and any layout or painting
//! - Multiple frames per tab

pub mod activation;
pub mod document;
pub mod panel;
pub mod session;
pub mod tab;

pub use activation::{Activation, Activator, InstallState, Message, Response, Transport};
pub use document::{Page, StyleElementSink};
pub use panel::{PanelEvent, PanelPresenter};
pub use session::{ContentScript, PanelState};
pub use tab::Tab;

/// Version shown in the panel header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
