//! Session state and the input event controller.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: the complete session state
//! - [`Message`]: all actions the controller can take
//! - [`update`]: pure state transitions
//! - [`input::dispatch`]: pure event interception decisions
//! - [`App::run`]: the terminal event loop with rendering
//!
//! Raw events flow through [`input::dispatch`], which decides whether an
//! event is intercepted (consumed, with a side effect) or falls through to
//! the line editor's default behavior. Side effects are interpreted against
//! a [`SessionIo`] bundle so the whole controller runs headless in tests.

mod effects;
mod event_loop;
pub mod input;
mod model;
mod update;

pub use effects::SessionIo;
pub use model::{EchoKind, EchoLine, FontCycle, Model, SessionPhase};
pub use update::{Message, update};

use crate::config::PreferenceStore;
use crate::evaluator::Evaluator;
use crate::fonts::FontProbe;

/// Default prompt marker.
pub const DEFAULT_PROMPT: &str = "» ";

/// Greeting shown on session start and on `Ctrl+H`.
pub const WELCOME: &str = r#"
  ┌─┐┌─┐┬─┐┬  ┌─┐┌┐┌┌─┐┌─┐
  ├─┘├─┤├┬┘│  ├─┤││││  ├┤
  ┴  ┴ ┴┴└─┴─┘┴ ┴┘└┘└─┘└─┘

  Welcome to parlance!
    Press [Ctrl + H]  to show this message
    Press [Ctrl + K]  to show the keymap
    (mobile?)         -> report pointer input
    (switch-font)     -> cycle the font
    (switch-theme)    -> cycle the color theme
"#;

/// Keymap summary shown on `Ctrl+K`.
pub const KEYMAP: &str = r"
  Keymap:
    [arrow keys | swipe]    -> Move cursor | Navigate history
    [Ctrl + F / B / J / P]  -> Move cursor | Navigate history
    [Shift + Enter]         -> Enter multiline insert mode
    [Ctrl + G]              -> Discard pending input
    [Ctrl + H]              -> Show welcome message
    [Ctrl + K]              -> Show this keymap
    [Ctrl + Shift + F]      -> Switch font
    [Ctrl + Shift + T]      -> Switch color theme
    [Ctrl + C / D]          -> Quit
";

/// Main application struct that owns the session configuration and runs the
/// event loop.
pub struct App {
    prompt: String,
    pointer_input: bool,
    trace: bool,
    store: PreferenceStore,
    evaluator: Option<Box<dyn Evaluator>>,
    probe: Option<Box<dyn FontProbe>>,
}

impl App {
    /// Create an application around an evaluator.
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            pointer_input: true,
            trace: false,
            store: PreferenceStore::open_default(),
            evaluator: Some(evaluator),
            probe: None,
        }
    }

    /// Override the prompt marker.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enable or disable pointer-gesture input (mouse capture).
    pub fn with_pointer_input(mut self, enabled: bool) -> Self {
        self.pointer_input = enabled;
        self
    }

    /// Start with session test mode on.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Use a specific preference store.
    pub fn with_store(mut self, store: PreferenceStore) -> Self {
        self.store = store;
        self
    }

    /// Use a specific font probe instead of the system one.
    pub fn with_probe(mut self, probe: Box<dyn FontProbe>) -> Self {
        self.probe = Some(probe);
        self
    }
}
