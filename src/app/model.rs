use crate::fonts::FONTS;
use crate::gesture::GestureOrigin;
use crate::theme::{THEMES, Theme};

/// Styling class of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoKind {
    /// An echoed submission (prompt + line).
    Input,
    /// Evaluator or fake-procedure output.
    Output,
    /// The generic evaluator-failure message.
    Error,
    /// Session messages: greeting, keymap, restart prompt.
    Notice,
    /// Diagnostic lines, shown only while test mode is on.
    Trace,
}

/// One echoed entry in the scrollback. `text` may span several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoLine {
    pub kind: EchoKind,
    pub text: String,
}

/// Whether the session is taking input or waiting to be restarted.
///
/// An evaluator failure is unrecoverable: the session moves to
/// `AwaitingRestart`, swallows everything except the acknowledgement, and
/// is then rebuilt from initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Accepting,
    AwaitingRestart,
}

/// In-flight font cycle: the candidate being probed and how many candidates
/// have been probed so far. Bounded by one full pass over the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCycle {
    pub candidate: String,
    pub visited: usize,
}

/// The complete session state.
///
/// Everything the controller decides on lives here; the line buffer itself
/// belongs to the editor widget and stays outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Scrollback of echoed lines.
    pub transcript: Vec<EchoLine>,
    /// Prompt marker shown before the input line and echoed submissions.
    pub prompt: String,
    /// Currently applied font family (mirrored in the store).
    pub active_font: String,
    /// Currently applied theme (mirrored in the store).
    pub active_theme: Theme,
    /// Armed swipe origin; present between a pointer press and its first move.
    pub gesture: Option<GestureOrigin>,
    /// Font cycle awaiting a probe result, if any.
    pub font_cycle: Option<FontCycle>,
    pub phase: SessionPhase,
    /// Whether pointer-gesture input is active (the "mobile" context).
    pub pointer_input: bool,
    /// Session test mode: mirror diagnostics into the transcript.
    pub trace: bool,
    /// Transcript scroll offset in lines up from the bottom.
    pub scroll: usize,
    /// Whether the event loop should exit.
    pub should_quit: bool,
    /// Whether the session should be discarded and rebuilt.
    pub restart_requested: bool,
}

impl Model {
    pub fn new(prompt: impl Into<String>, font: String, theme: Theme) -> Self {
        Self {
            transcript: Vec::new(),
            prompt: prompt.into(),
            active_font: font,
            active_theme: theme,
            gesture: None,
            font_cycle: None,
            phase: SessionPhase::Accepting,
            pointer_input: true,
            trace: false,
            scroll: 0,
            should_quit: false,
            restart_requested: false,
        }
    }

    pub const fn is_accepting(&self) -> bool {
        matches!(self.phase, SessionPhase::Accepting)
    }

    /// Append a (possibly multiline) entry to the scrollback.
    pub fn echo(&mut self, kind: EchoKind, text: impl Into<String>) {
        self.transcript.push(EchoLine {
            kind,
            text: text.into(),
        });
    }

    /// Append a diagnostic line when test mode is on.
    pub fn trace_echo(&mut self, text: impl Into<String>) {
        if self.trace {
            self.echo(EchoKind::Trace, text);
        }
    }

    /// Total rendered transcript height in lines.
    pub fn transcript_line_count(&self) -> usize {
        self.transcript
            .iter()
            .map(|entry| entry.text.lines().count().max(1))
            .sum()
    }

    pub fn max_scroll(&self) -> usize {
        self.transcript_line_count().saturating_sub(1)
    }
}

// Default exists so the event loop can `std::mem::take` the model around
// the pure update call.
impl Default for Model {
    fn default() -> Self {
        Self::new("", FONTS[0].to_string(), THEMES[0].clone())
    }
}
