use crate::app::input::{self, Dispatch, FakeProcedure, InputEvent};
use crate::app::model::{EchoKind, FontCycle, SessionPhase};
use crate::app::{App, KEYMAP, Message, Model, WELCOME, update};
use crate::config::PreferenceStore;
use crate::delimiters::{self, Deletion};
use crate::editor::LineEditor;
use crate::evaluator::Evaluator;
use crate::fonts::{self, FontProbe};
use crate::gesture::Direction;
use crate::prefs;
use crate::renderer::Renderer;
use crate::theme::{THEMES, Theme};

/// The generic user-facing message for any evaluator failure.
pub(crate) const EVAL_FAILURE_MESSAGE: &str = "Ooops... Something went wrong! :(";
/// The recovery prompt shown with it.
pub(crate) const RESTART_PROMPT: &str = "Press [Enter] to restart";

/// Everything the controller acts on besides its own state: the editor
/// widget, the renderer, the font probe, the evaluator, and the store.
///
/// Bundled behind traits so the whole controller runs headless in tests.
pub struct SessionIo {
    pub editor: Box<dyn LineEditor>,
    pub renderer: Box<dyn Renderer>,
    pub probe: Box<dyn FontProbe>,
    pub evaluator: Box<dyn Evaluator>,
    pub store: PreferenceStore,
}

impl App {
    /// Run one raw event through dispatch, update, and side effects.
    ///
    /// Returns whether the event was intercepted (consumed).
    pub fn process_event(model: &mut Model, io: &mut SessionIo, event: &InputEvent) -> bool {
        match input::dispatch(event, model) {
            Dispatch::Consumed(Some(msg)) => {
                Self::apply(model, io, msg);
                true
            }
            Dispatch::Consumed(None) => true,
            Dispatch::PassThrough => {
                if let Some(msg) = input::default_message(event) {
                    Self::apply(model, io, msg);
                }
                false
            }
        }
    }

    /// Apply one message: pure update first, then its side effects.
    pub fn apply(model: &mut Model, io: &mut SessionIo, msg: Message) {
        tracing::debug!(?msg, "message");
        if !matches!(msg, Message::InsertChar(_) | Message::InsertText(_)) {
            model.trace_echo(format!("; {msg:?}"));
        }
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, io, &side_msg);
    }

    pub(crate) fn handle_message_side_effects(
        model: &mut Model,
        io: &mut SessionIo,
        msg: &Message,
    ) {
        match msg {
            Message::Arrow(direction) | Message::Swipe(direction) => match direction {
                Direction::Left => io.editor.move_cursor(-1),
                Direction::Right => io.editor.move_cursor(1),
                Direction::Up => io.editor.history_prev(),
                Direction::Down => io.editor.history_next(),
            },
            Message::AutoClose(open) => {
                // The dispatcher only emits this for configured openers.
                if let Some(close) = delimiters::closing_for(*open) {
                    io.editor.insert(&open.to_string());
                    io.editor.insert(&close.to_string());
                    io.editor.move_cursor(-1);
                }
            }
            Message::PairedDelete => {
                let text = io.editor.text();
                match delimiters::deletion_at(&text, io.editor.cursor()) {
                    Deletion::None => {}
                    Deletion::Preceding => io.editor.delete(-1),
                    Deletion::Pair => {
                        io.editor.delete(-1);
                        // the orphaned closer now sits at the cursor
                        io.editor.delete(1);
                    }
                }
            }
            Message::InsertChar(ch) => io.editor.insert(&ch.to_string()),
            Message::InsertText(text) => io.editor.insert(text),
            Message::InsertNewline => io.editor.insert("\n"),
            Message::DeleteForward => io.editor.delete(1),
            Message::CursorHome => io.editor.move_to(0),
            Message::CursorEnd => {
                let len = io.editor.len();
                io.editor.move_to(len);
            }
            Message::CancelInput => io.editor.clear(),
            Message::ShowWelcome => model.echo(EchoKind::Notice, WELCOME),
            Message::ShowKeymap => model.echo(EchoKind::Notice, KEYMAP),
            Message::Submit => Self::submit(model, io),
            Message::CycleTheme => {
                Self::cycle_theme(model, io);
            }
            Message::CycleFont => Self::start_font_cycle(model, io),
            Message::FontProbeResolved { family, available } => {
                Self::resolve_font_probe(model, io, family, *available);
            }
            Message::GestureStart { .. }
            | Message::GestureCancel
            | Message::ScrollUp(_)
            | Message::ScrollDown(_)
            | Message::AcknowledgeRestart
            | Message::Quit => {}
        }
    }

    /// Normalize, echo, and route one submitted line.
    fn submit(model: &mut Model, io: &mut SessionIo) {
        let raw = io.editor.take_line();
        let line = input::normalize_line(&raw);
        if line.is_empty() {
            return;
        }

        model.echo(EchoKind::Input, format!("{}{}", model.prompt, line));
        io.editor.push_history(line.clone());

        if let Some(procedure) = input::fake_procedure(&line) {
            let reply = Self::run_fake_procedure(model, io, procedure);
            model.echo(EchoKind::Output, reply);
            return;
        }

        match io.evaluator.evaluate(&line) {
            Ok(output) => model.echo(EchoKind::Output, output),
            Err(err) => {
                tracing::error!(%err, %line, "evaluator failure; session is unrecoverable");
                model.echo(EchoKind::Error, EVAL_FAILURE_MESSAGE);
                model.echo(EchoKind::Notice, RESTART_PROMPT);
                model.phase = SessionPhase::AwaitingRestart;
            }
        }
    }

    fn run_fake_procedure(
        model: &mut Model,
        io: &mut SessionIo,
        procedure: FakeProcedure,
    ) -> String {
        match procedure {
            FakeProcedure::CheckPointer => {
                let state = if model.pointer_input { "enabled" } else { "disabled" };
                format!("pointer gestures are {state}")
            }
            FakeProcedure::SwitchFont => {
                Self::start_font_cycle(model, io);
                "switching font".to_string()
            }
            FakeProcedure::SwitchTheme => {
                let theme = Self::cycle_theme(model, io);
                format!("theme: {} on {}", theme.color, theme.background)
            }
            FakeProcedure::ToggleTrace => {
                model.trace = !model.trace;
                let state = if model.trace { "on" } else { "off" };
                format!("test mode {state}")
            }
        }
    }

    /// Advance the theme: apply to the live display and persist together.
    fn cycle_theme(model: &mut Model, io: &mut SessionIo) -> Theme {
        let next = prefs::next_candidate(&model.active_theme, THEMES.as_slice()).clone();
        io.renderer.apply_theme(&next);
        if let Err(err) = io.store.save_theme(&next) {
            tracing::warn!(%err, "failed to persist theme");
        }
        model.active_theme = next.clone();
        model.trace_echo(format!("; theme -> {}", next.background));
        next
    }

    /// Begin a font cycle; the availability probe answers asynchronously.
    ///
    /// A cycle already in flight is replaced, not queued.
    fn start_font_cycle(model: &mut Model, io: &mut SessionIo) {
        let current = model.active_font.as_str();
        let candidate = (*prefs::next_candidate(&current, fonts::FONTS)).to_string();
        model.font_cycle = Some(FontCycle {
            candidate: candidate.clone(),
            visited: 1,
        });
        io.probe.request(&candidate);
    }

    /// Continue or finish a font cycle when a probe answers.
    ///
    /// Terminates within one full pass over the candidate list: either a
    /// candidate probes available, or the fallback (always acceptable) is
    /// reached by cycling or applied outright once every candidate has been
    /// visited.
    fn resolve_font_probe(model: &mut Model, io: &mut SessionIo, family: &str, available: bool) {
        let Some(cycle) = model.font_cycle.as_ref() else {
            // Stale result from a cycle that no longer exists.
            return;
        };
        if cycle.candidate != family {
            // Superseded by a newer cycle.
            return;
        }

        if available || family == fonts::FALLBACK_FONT {
            Self::apply_font(model, io, family);
            return;
        }

        if cycle.visited >= fonts::FONTS.len() {
            // Every candidate probed unavailable; the fallback is usable by
            // definition.
            Self::apply_font(model, io, fonts::FALLBACK_FONT);
            return;
        }

        let next = (*prefs::next_candidate(&family, fonts::FONTS)).to_string();
        let visited = cycle.visited + 1;
        model.font_cycle = Some(FontCycle {
            candidate: next.clone(),
            visited,
        });
        io.probe.request(&next);
    }

    /// Settle the font: apply to the live display and persist together.
    fn apply_font(model: &mut Model, io: &mut SessionIo, family: &str) {
        io.renderer.apply_font(family);
        if let Err(err) = io.store.save_font(family) {
            tracing::warn!(%err, "failed to persist font");
        }
        model.active_font = family.to_string();
        model.font_cycle = None;
        model.trace_echo(format!("; font -> {family}"));
    }
}
