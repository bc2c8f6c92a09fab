use crate::app::Model;
use crate::app::model::SessionPhase;
use crate::gesture::{Direction, GestureOrigin};

/// All actions the controller can take.
///
/// Intercepted events and pass-through editing defaults both funnel into
/// this one vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Directional intents (arrow keys, bound combos, classified swipes)
    /// Move the cursor (left/right) or navigate history (up/down)
    Arrow(Direction),
    /// Same as [`Message::Arrow`], from a classified pointer swipe; also
    /// clears the armed gesture origin
    Swipe(Direction),
    /// Arm a gesture origin at a pointer press
    GestureStart { x: i32, y: i32 },
    /// Clear the armed origin without classifying (zero-length motion)
    GestureCancel,

    // Matched delimiters
    /// Insert an opening delimiter plus its match, cursor between them
    AutoClose(char),
    /// Backspace with paired-delete semantics
    PairedDelete,

    // Session surface
    /// Discard the pending input line
    CancelInput,
    /// Echo the welcome message
    ShowWelcome,
    /// Echo the keymap summary
    ShowKeymap,
    /// Advance the font preference (asynchronous availability probe)
    CycleFont,
    /// Advance the theme preference
    CycleTheme,
    /// A font availability probe resolved
    FontProbeResolved { family: String, available: bool },

    // Pass-through editing defaults
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Insert a literal newline (multiline insert mode)
    InsertNewline,
    /// Delete the character at the cursor
    DeleteForward,
    /// Move the cursor to the start of the buffer
    CursorHome,
    /// Move the cursor to the end of the buffer
    CursorEnd,
    /// Submit the buffer as one line
    Submit,

    // Transcript
    /// Scroll the transcript up by n lines
    ScrollUp(usize),
    /// Scroll the transcript down by n lines
    ScrollDown(usize),

    // Session lifecycle
    /// The recovery prompt was acknowledged; discard and rebuild the session
    AcknowledgeRestart,
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Only state transitions happen here; every editor, store, renderer, and
/// evaluator interaction lives in the effect layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Any activity besides scrolling snaps the transcript to the bottom.
    if !matches!(msg, Message::ScrollUp(_) | Message::ScrollDown(_)) {
        model.scroll = 0;
    }

    match msg {
        Message::GestureStart { x, y } => {
            model.gesture = Some(GestureOrigin::new(x, y));
        }
        // The origin is consumed by the first move, classified or not.
        Message::Swipe(_) | Message::GestureCancel => {
            model.gesture = None;
        }
        Message::CancelInput => {
            model.gesture = None;
        }
        Message::ScrollUp(n) => {
            model.scroll = model.scroll.saturating_add(n).min(model.max_scroll());
        }
        Message::ScrollDown(n) => {
            model.scroll = model.scroll.saturating_sub(n);
        }
        Message::AcknowledgeRestart => {
            if model.phase == SessionPhase::AwaitingRestart {
                model.restart_requested = true;
            }
        }
        Message::Quit => {
            model.should_quit = true;
        }
        _ => {}
    }

    model
}
