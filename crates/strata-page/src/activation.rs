//! Activation protocol between the toolbar action and a tab.
//!
//! The action side never tracks which tabs have the content script. It asks:
//! a `ping` answered with `ready` means the script is installed and only
//! needs a `toggle-panel`; no answer means it is not installed yet and gets
//! injected. Injection is safe to repeat because the content script only
//! builds its panel when none exists.

use serde::{Deserialize, Serialize};
use strata_common::trace::trace;
use strata_core::EngineConfig;
use strum_macros::{Display, EnumString};

/// Command sent to a tab's content script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Message {
    /// Installation probe.
    Ping,
    /// Show or hide the panel.
    TogglePanel,
}

/// Wire form of a [`Message`]: `{"action": "ping"}`.
#[derive(Serialize, Deserialize)]
struct Envelope {
    action: Message,
}

impl Message {
    /// Encode as `{"action": "<name>"}`.
    #[must_use]
    pub fn encode(self) -> String {
        serde_json::json!({ "action": self }).to_string()
    }

    /// Decode a wire message. Unknown actions and malformed JSON yield None.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str::<Envelope>(raw)
            .ok()
            .map(|envelope| envelope.action)
    }
}

/// Reply from a content script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Response {
    /// `{"status": "ready"}`: the script is installed.
    Ready,
}

impl Response {
    /// Encode as `{"status": "<name>"}`.
    #[must_use]
    pub fn encode(self) -> String {
        serde_json::json!(self).to_string()
    }

    /// Decode a wire reply. Anything unrecognized yields None.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Whether a tab already runs the content script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InstallState {
    /// No reply to the probe.
    NotInstalled,
    /// The probe was answered with [`Response::Ready`].
    Installed,
}

/// What [`Activator::ensure_installed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Activation {
    /// The page is restricted; nothing was sent.
    Skipped,
    /// The script was already installed and was asked to toggle the panel.
    Toggled,
    /// The script was injected.
    Installed,
}

/// Channel to one tab.
pub trait Transport {
    /// Deliver `message`. None means nobody answered.
    fn send(&mut self, message: Message) -> Option<Response>;

    /// Inject the content script and its panel stylesheet. Injecting runs the
    /// script's activation once.
    fn install(&mut self);
}

/// Drives the activation protocol for the toolbar action.
#[derive(Debug, Clone)]
pub struct Activator {
    restricted_prefixes: Vec<String>,
}

impl Default for Activator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Activator {
    /// Activator skipping the configured restricted URL prefixes.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            restricted_prefixes: config.restricted_url_prefixes.clone(),
        }
    }

    /// Whether scripts may not run on `url`.
    #[must_use]
    pub fn is_restricted(&self, url: &str) -> bool {
        self.restricted_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }

    /// Ask the tab whether the content script is present.
    pub fn probe<T: Transport + ?Sized>(transport: &mut T) -> InstallState {
        match transport.send(Message::Ping) {
            Some(Response::Ready) => InstallState::Installed,
            None => InstallState::NotInstalled,
        }
    }

    /// Toggle the panel if the script is installed, install it otherwise.
    pub fn ensure_installed<T: Transport + ?Sized>(
        &self,
        url: &str,
        transport: &mut T,
    ) -> Activation {
        if self.is_restricted(url) {
            trace("Activation", &format!("skipping restricted page {url}"));
            return Activation::Skipped;
        }
        match Self::probe(transport) {
            InstallState::Installed => {
                let _ = transport.send(Message::TogglePanel);
                Activation::Toggled
            }
            InstallState::NotInstalled => {
                trace("Activation", &format!("injecting content script into {url}"));
                transport.install();
                Activation::Installed
            }
        }
    }
}
