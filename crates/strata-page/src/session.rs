//! The content script running inside one page.
//!
//! [`ContentScript`] owns the engine and the panel presenter. It follows the
//! panel lifecycle:
//!
//! ```text
//! Uninitialized ──activate──> Visible <──activate──> Hidden
//!                                │                     ▲
//!                                └──────close──────────┘  (clears layers)
//! ```
//!
//! Activation checks the document, not only its own state: if a panel node
//! already exists it is toggled, so running the script again never builds a
//! second panel.

use strata_common::trace::trace;
use strata_common::warning::clear_warnings;
use strata_core::{Commit, Engine, EngineConfig, KeyValueStore, LayerId, StorageError};
use strata_dom::NodeId;
use strum_macros::Display;

use crate::activation::{Message, Response};
use crate::document::Page;
use crate::panel::{PanelEvent, PanelPresenter};

/// Panel lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PanelState {
    /// The panel has not been built.
    Uninitialized,
    /// The panel is shown.
    Visible,
    /// The panel exists but is hidden.
    Hidden,
}

/// Engine plus panel, attached to a page on activation.
#[derive(Debug)]
pub struct ContentScript<S> {
    engine: Engine<S>,
    presenter: PanelPresenter,
    style_id: String,
    state: PanelState,
}

impl<S: KeyValueStore> ContentScript<S> {
    /// A script that has not touched the page yet.
    #[must_use]
    pub fn new(config: &EngineConfig, store: S) -> Self {
        Self {
            engine: Engine::new(config, store),
            presenter: PanelPresenter::new(config),
            style_id: config.style_id.clone(),
            state: PanelState::Uninitialized,
        }
    }

    /// Build the panel on first use, toggle its visibility afterwards.
    ///
    /// First activation loads persisted layers, builds and renders the panel,
    /// and writes the stylesheet. Toggling leaves layer state alone.
    pub fn activate(&mut self, page: &mut Page) -> PanelState {
        if self.presenter.find(page.tree()).is_some() {
            let visible = self.presenter.toggle_visibility(page.tree_mut());
            self.state = if visible { PanelState::Visible } else { PanelState::Hidden };
            trace("Panel", &format!("toggled, now {}", self.state));
            return self.state;
        }

        clear_warnings();
        self.engine.load();
        let _ = self.presenter.build(page.tree_mut());
        self.presenter.render_layers(page.tree_mut(), self.engine.layers());
        self.engine.refresh().apply_to(&mut page.style_sink(&self.style_id));
        self.state = PanelState::Visible;
        trace(
            "Panel",
            &format!("initialized with {} layer(s)", self.engine.layers().len()),
        );
        self.state
    }

    /// Answer a message from the toolbar action.
    pub fn handle_message(&mut self, page: &mut Page, message: Message) -> Option<Response> {
        match message {
            Message::Ping => Some(Response::Ready),
            Message::TogglePanel => {
                let _ = self.activate(page);
                None
            }
        }
    }

    /// Apply a panel event.
    ///
    /// Layer events commit through the engine, write the new stylesheet, and
    /// re-render the list. Close clears every layer, then hides the panel.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails. Layer state and the
    /// page are left as they were.
    pub fn dispatch(&mut self, page: &mut Page, event: PanelEvent) -> Result<(), StorageError> {
        let commit = match event {
            PanelEvent::AddLayer => self.engine.add_layer().map(|(_, commit)| commit)?,
            PanelEvent::ClearAll => self.engine.clear_all()?,
            PanelEvent::Toggle { id, enabled } => self.engine.set_enabled(id, enabled)?,
            PanelEvent::Recolor { id, color } => self.engine.set_color(id, &color)?,
            PanelEvent::Delete { id } => self.engine.delete_layer(id)?,
            PanelEvent::Minimize => {
                let _ = self.presenter.toggle_collapsed(page.tree_mut());
                return Ok(());
            }
            PanelEvent::Close => {
                let commit = self.engine.clear_all()?;
                self.show(page, &commit);
                self.presenter.set_visible(page.tree_mut(), false);
                self.state = PanelState::Hidden;
                return Ok(());
            }
        };
        self.show(page, &commit);
        Ok(())
    }

    /// Dispatch whatever event a click on `target` produces. Returns whether
    /// the click hit a control.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails.
    pub fn click(&mut self, page: &mut Page, target: NodeId) -> Result<bool, StorageError> {
        match self.presenter.event_for_click(page.tree(), target) {
            Some(event) => self.dispatch(page, event).map(|()| true),
            None => Ok(false),
        }
    }

    /// Dispatch a color input change on `target`. Returns whether `target`
    /// is a layer color input.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails.
    pub fn change(
        &mut self,
        page: &mut Page,
        target: NodeId,
        value: &str,
    ) -> Result<bool, StorageError> {
        match self.presenter.event_for_change(page.tree(), target, value) {
            Some(event) => self.dispatch(page, event).map(|()| true),
            None => Ok(false),
        }
    }

    /// Write a committed stylesheet and re-render the layer list.
    fn show(&self, page: &mut Page, commit: &Commit) {
        commit.apply_to(&mut page.style_sink(&self.style_id));
        self.presenter.render_layers(page.tree_mut(), self.engine.layers());
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// The engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// The panel presenter.
    #[must_use]
    pub const fn presenter(&self) -> &PanelPresenter {
        &self.presenter
    }

    /// List item rendered for layer `id`.
    #[must_use]
    pub fn item_for(&self, page: &Page, id: LayerId) -> Option<NodeId> {
        self.presenter.item_for(page.tree(), id)
    }
}
