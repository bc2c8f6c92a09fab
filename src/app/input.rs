//! Event interception: the decision core of the console.
//!
//! [`dispatch`] inspects a raw event against the session state and decides,
//! in order: recovery gate, pointer gestures, modifier combos (with the one
//! paste combo that must never be consumed), literal opening delimiters,
//! the deletion key, composition suppression — or lets the event fall
//! through to the editor's default behavior via [`default_message`].

use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::update::Message;
use crate::app::{Model, SessionPhase};
use crate::delimiters;
use crate::gesture::{self, Direction};

/// A raw key event as the controller sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    /// Platform signal that multi-keystroke (IME) input is being composed.
    pub composing: bool,
}

impl KeyPress {
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            composing: false,
        }
    }

    pub const fn shifted(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
            composing: false,
        }
    }

    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
            composing: false,
        }
    }

    pub const fn ctrl_shift(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL.union(KeyModifiers::SHIFT),
            composing: false,
        }
    }

    pub const fn composing(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            composing: true,
        }
    }
}

/// A raw event in the controller's own vocabulary. The terminal front end
/// translates crossterm events into these; tests construct them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyPress),
    /// Native paste arriving through the terminal's bracketed-paste path.
    Paste(String),
    /// Pointer press at a point (touch start).
    TouchStart { x: i32, y: i32 },
    /// Pointer motion to a point (touch move).
    TouchMove { x: i32, y: i32 },
}

/// Outcome of dispatching one raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The event is intercepted; default handling must not run. An action
    /// may or may not be attached.
    Consumed(Option<Message>),
    /// The event is not the controller's business; default editor behavior
    /// applies.
    PassThrough,
}

/// The static keybinding table: (exact modifier set, lowercased key) to
/// action, first match wins. The paste combo is deliberately absent — it is
/// the one combination that must fall through un-consumed.
pub const KEY_BINDINGS: &[(KeyModifiers, char, Message)] = &[
    (
        KeyModifiers::CONTROL.union(KeyModifiers::SHIFT),
        'f',
        Message::CycleFont,
    ),
    (
        KeyModifiers::CONTROL.union(KeyModifiers::SHIFT),
        't',
        Message::CycleTheme,
    ),
    (KeyModifiers::CONTROL, 'f', Message::Arrow(Direction::Right)),
    (KeyModifiers::CONTROL, 'b', Message::Arrow(Direction::Left)),
    (KeyModifiers::CONTROL, 'j', Message::Arrow(Direction::Down)),
    (KeyModifiers::CONTROL, 'p', Message::Arrow(Direction::Up)),
    (KeyModifiers::CONTROL, 'g', Message::CancelInput),
    (KeyModifiers::CONTROL, 'h', Message::ShowWelcome),
    (KeyModifiers::CONTROL, 'k', Message::ShowKeymap),
    (KeyModifiers::CONTROL, 'c', Message::Quit),
    (KeyModifiers::CONTROL, 'd', Message::Quit),
];

/// Local actions bound to exact literal input lines, checked before the
/// evaluator sees a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeProcedure {
    /// `(mobile?)`: report whether pointer input is active.
    CheckPointer,
    /// `(switch-font)`: start a font cycle.
    SwitchFont,
    /// `(switch-theme)`: cycle the color theme.
    SwitchTheme,
    /// `(test-mode)`: toggle session diagnostics.
    ToggleTrace,
}

pub const FAKE_PROCEDURES: &[(&str, FakeProcedure)] = &[
    ("(mobile?)", FakeProcedure::CheckPointer),
    ("(switch-font)", FakeProcedure::SwitchFont),
    ("(switch-theme)", FakeProcedure::SwitchTheme),
    ("(test-mode)", FakeProcedure::ToggleTrace),
];

/// Look up a normalized line in the fake-procedure table (exact match).
pub fn fake_procedure(line: &str) -> Option<FakeProcedure> {
    FAKE_PROCEDURES
        .iter()
        .find(|(literal, _)| *literal == line)
        .map(|(_, proc)| *proc)
}

/// Collapse internal newlines to single spaces and trim the ends.
pub fn normalize_line(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Decide whether to intercept a raw event. Pure over the session state.
pub fn dispatch(event: &InputEvent, model: &Model) -> Dispatch {
    // Recovery prompt: the session is unrecoverable and waits for a single
    // acknowledgement. Quit combos stay live so the process can exit.
    if model.phase == SessionPhase::AwaitingRestart {
        return match event {
            InputEvent::Key(key)
                if key.code == KeyCode::Enter && key.modifiers == KeyModifiers::NONE =>
            {
                Dispatch::Consumed(Some(Message::AcknowledgeRestart))
            }
            InputEvent::Key(key) if lookup_binding(key) == Some(Message::Quit) => {
                Dispatch::Consumed(Some(Message::Quit))
            }
            _ => Dispatch::Consumed(None),
        };
    }

    match event {
        InputEvent::TouchStart { x, y } => {
            Dispatch::Consumed(Some(Message::GestureStart { x: *x, y: *y }))
        }
        InputEvent::TouchMove { x, y } => match model.gesture {
            // No captured start point: gesture recognition is skipped.
            None => Dispatch::PassThrough,
            Some(origin) => {
                let (dx, dy) = origin.deltas_to(*x, *y);
                if dx == 0 && dy == 0 {
                    Dispatch::Consumed(Some(Message::GestureCancel))
                } else {
                    Dispatch::Consumed(Some(Message::Swipe(gesture::classify(dx, dy))))
                }
            }
        },
        InputEvent::Key(key) => dispatch_key(key, model),
        InputEvent::Paste(_) => Dispatch::PassThrough,
    }
}

fn dispatch_key(key: &KeyPress, model: &Model) -> Dispatch {
    // 1. Modifier combos. Shift alone is not a combo (it produces shifted
    //    characters, including several delimiters).
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        if is_paste_combo(key) {
            // Native paste must proceed; do not consume.
            return Dispatch::PassThrough;
        }
        if let Some(action) = lookup_binding(key) {
            return Dispatch::Consumed(Some(action));
        }
        // Unbound combos are still intercepted.
        return Dispatch::Consumed(None);
    }

    // 2. Literal opening delimiter.
    if let KeyCode::Char(ch) = key.code {
        if delimiters::is_opening(ch) {
            return Dispatch::Consumed(Some(Message::AutoClose(ch)));
        }
    }

    // 3. Deletion key.
    if key.code == KeyCode::Backspace {
        return Dispatch::Consumed(Some(Message::PairedDelete));
    }

    // 4. Composition in progress: suppress only while pointer input is
    //    active, to avoid double-handling composed characters.
    if key.composing {
        return if model.pointer_input {
            Dispatch::Consumed(None)
        } else {
            Dispatch::PassThrough
        };
    }

    Dispatch::PassThrough
}

fn lookup_binding(key: &KeyPress) -> Option<Message> {
    let KeyCode::Char(ch) = key.code else {
        return None;
    };
    let lower = ch.to_ascii_lowercase();
    KEY_BINDINGS
        .iter()
        .find(|(mods, bound, _)| key.modifiers == *mods && *bound == lower)
        .map(|(_, _, action)| action.clone())
}

fn is_paste_combo(key: &KeyPress) -> bool {
    key.modifiers == KeyModifiers::CONTROL
        && matches!(key.code, KeyCode::Char(ch) if ch.to_ascii_lowercase() == 'v')
}

/// Default editor behavior for events the controller did not intercept.
pub fn default_message(event: &InputEvent) -> Option<Message> {
    match event {
        InputEvent::Key(key) => match key.code {
            KeyCode::Char(ch) => Some(Message::InsertChar(ch)),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Message::InsertNewline)
            }
            KeyCode::Enter => Some(Message::Submit),
            KeyCode::Left => Some(Message::Arrow(Direction::Left)),
            KeyCode::Right => Some(Message::Arrow(Direction::Right)),
            KeyCode::Up => Some(Message::Arrow(Direction::Up)),
            KeyCode::Down => Some(Message::Arrow(Direction::Down)),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Home => Some(Message::CursorHome),
            KeyCode::End => Some(Message::CursorEnd),
            _ => None,
        },
        InputEvent::Paste(text) => Some(Message::InsertText(text.clone())),
        InputEvent::TouchStart { .. } | InputEvent::TouchMove { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::default()
    }

    #[test]
    fn test_paste_combo_is_never_consumed() {
        let m = model();
        let event = InputEvent::Key(KeyPress::ctrl('v'));
        assert_eq!(dispatch(&event, &m), Dispatch::PassThrough);
        let event = InputEvent::Key(KeyPress::ctrl('V'));
        assert_eq!(dispatch(&event, &m), Dispatch::PassThrough);
    }

    #[test]
    fn test_unbound_modifier_combo_is_consumed_silently() {
        let m = model();
        let event = InputEvent::Key(KeyPress::ctrl('z'));
        assert_eq!(dispatch(&event, &m), Dispatch::Consumed(None));
    }

    #[test]
    fn test_bound_combos_resolve_through_the_table() {
        let m = model();
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::ctrl('b')), &m),
            Dispatch::Consumed(Some(Message::Arrow(Direction::Left)))
        );
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::ctrl_shift('T')), &m),
            Dispatch::Consumed(Some(Message::CycleTheme))
        );
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::ctrl_shift('f')), &m),
            Dispatch::Consumed(Some(Message::CycleFont))
        );
    }

    #[test]
    fn test_opening_delimiters_intercept_without_modifiers() {
        let m = model();
        for ch in ['(', '[', '{', '"'] {
            assert_eq!(
                dispatch(&InputEvent::Key(KeyPress::plain(KeyCode::Char(ch))), &m),
                Dispatch::Consumed(Some(Message::AutoClose(ch)))
            );
        }
        // shifted delimiters still intercept
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::shifted(KeyCode::Char('{'))), &m),
            Dispatch::Consumed(Some(Message::AutoClose('{')))
        );
        // ordinary characters fall through
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::plain(KeyCode::Char('x'))), &m),
            Dispatch::PassThrough
        );
    }

    #[test]
    fn test_backspace_intercepts_for_paired_delete() {
        let m = model();
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::plain(KeyCode::Backspace)), &m),
            Dispatch::Consumed(Some(Message::PairedDelete))
        );
    }

    #[test]
    fn test_composition_suppressed_only_with_pointer_input() {
        let mut m = model();
        // composing keys must not be handled twice while pointer input is
        // active; elsewhere they fall through to the editor
        let event = InputEvent::Key(KeyPress::composing(KeyCode::Char('x')));
        m.pointer_input = true;
        assert_eq!(dispatch(&event, &m), Dispatch::Consumed(None));
        m.pointer_input = false;
        assert_eq!(dispatch(&event, &m), Dispatch::PassThrough);
    }

    #[test]
    fn test_touch_move_without_start_passes_through() {
        let m = model();
        assert_eq!(
            dispatch(&InputEvent::TouchMove { x: 5, y: 5 }, &m),
            Dispatch::PassThrough
        );
    }

    #[test]
    fn test_recovery_gate_accepts_only_the_acknowledgement() {
        let mut m = model();
        m.phase = SessionPhase::AwaitingRestart;
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::plain(KeyCode::Enter)), &m),
            Dispatch::Consumed(Some(Message::AcknowledgeRestart))
        );
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::plain(KeyCode::Char('x'))), &m),
            Dispatch::Consumed(None)
        );
        assert_eq!(
            dispatch(&InputEvent::Key(KeyPress::ctrl('c')), &m),
            Dispatch::Consumed(Some(Message::Quit))
        );
    }

    #[test]
    fn test_normalize_line_collapses_newlines_and_trims() {
        assert_eq!(normalize_line("   \n  "), "");
        assert_eq!(normalize_line("(+ 1\n   2)"), "(+ 1    2)");
        assert_eq!(normalize_line("\r\n(car x)\r"), "(car x)");
    }

    #[test]
    fn test_fake_procedure_lookup_is_exact() {
        assert_eq!(fake_procedure("(mobile?)"), Some(FakeProcedure::CheckPointer));
        assert_eq!(fake_procedure("(switch-font)"), Some(FakeProcedure::SwitchFont));
        assert_eq!(fake_procedure(" (mobile?)"), None);
        assert_eq!(fake_procedure("(mobile?) "), None);
        assert_eq!(fake_procedure("(+ 1 2)"), None);
    }
}
