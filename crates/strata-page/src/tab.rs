//! An in-process browser tab.

use strata_common::warning::warn_once;
use strata_core::{EngineConfig, KeyValueStore, StorageError};
use strata_dom::NodeId;

use crate::activation::{Message, Response, Transport};
use crate::document::Page;
use crate::session::ContentScript;

/// A page at a URL plus the content script injected into it, if any.
///
/// Messages cross the tab boundary in their JSON wire form.
#[derive(Debug)]
pub struct Tab<S> {
    url: String,
    page: Page,
    config: EngineConfig,
    store: Option<S>,
    script: Option<ContentScript<S>>,
    injections: usize,
}

impl<S: KeyValueStore> Tab<S> {
    /// A tab showing `page`. `store` backs the content script once injected.
    #[must_use]
    pub fn new(url: impl Into<String>, page: Page, config: EngineConfig, store: S) -> Self {
        Self {
            url: url.into(),
            page,
            config,
            store: Some(store),
            script: None,
            injections: 0,
        }
    }

    /// The tab's URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The page.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// The content script, once injected.
    #[must_use]
    pub const fn script(&self) -> Option<&ContentScript<S>> {
        self.script.as_ref()
    }

    /// How many times the script was injected.
    #[must_use]
    pub const fn injections(&self) -> usize {
        self.injections
    }

    /// Click `target`. Returns whether a panel control handled it; without a
    /// script nothing does.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails.
    pub fn click(&mut self, target: NodeId) -> Result<bool, StorageError> {
        match self.script.as_mut() {
            Some(script) => script.click(&mut self.page, target),
            None => Ok(false),
        }
    }

    /// Change a color input to `value`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails.
    pub fn change(&mut self, target: NodeId, value: &str) -> Result<bool, StorageError> {
        match self.script.as_mut() {
            Some(script) => script.change(&mut self.page, target, value),
            None => Ok(false),
        }
    }
}

impl<S: KeyValueStore> Transport for Tab<S> {
    fn send(&mut self, message: Message) -> Option<Response> {
        let script = self.script.as_mut()?;
        let Some(received) = Message::decode(&message.encode()) else {
            warn_once("Tab", &format!("dropping undecodable message {message}"));
            return None;
        };
        script
            .handle_message(&mut self.page, received)
            .and_then(|reply| Response::decode(&reply.encode()))
    }

    fn install(&mut self) {
        self.injections += 1;
        if let Some(store) = self.store.take() {
            self.script = Some(ContentScript::new(&self.config, store));
        }
        if let Some(script) = self.script.as_mut() {
            let _ = script.activate(&mut self.page);
        }
    }
}
