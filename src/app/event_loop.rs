use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::input::{InputEvent, KeyPress};
use crate::app::{App, EchoKind, Message, Model, SessionIo, WELCOME};
use crate::editor::{LineBuffer, LineEditor};
use crate::fonts::{FontProbe, SystemFontProbe};
use crate::renderer::{Renderer, TerminalRenderer};

/// Lines per mouse-wheel tick.
const SCROLL_LINES: usize = 3;

impl App {
    /// Run the console until quit.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let evaluator = self
            .evaluator
            .take()
            .context("evaluator already consumed by a previous run")?;
        let probe = self
            .probe
            .take()
            .unwrap_or_else(|| Box::new(SystemFontProbe::spawn()));
        let mut io = SessionIo {
            editor: Box::new(LineBuffer::new()),
            renderer: Box::new(TerminalRenderer),
            probe,
            evaluator,
            store: self.store.clone(),
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — parlance requires an interactive terminal")?;
        execute!(stdout(), EnableBracketedPaste)?;
        if self.pointer_input {
            execute!(stdout(), EnableMouseCapture)?;
        }

        let result = self.event_loop(&mut terminal, &mut io);

        if self.pointer_input {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        result
    }

    /// Build a session from initial state: preferences re-read from the
    /// store and applied, editor cleared, fresh greeting. Used at startup
    /// and again after an acknowledged failure (the "full reload").
    pub(crate) fn fresh_session(&self, io: &mut SessionIo) -> Model {
        let font = io.store.load_font();
        let theme = io.store.load_theme();
        io.renderer.apply_font(&font);
        io.renderer.apply_theme(&theme);
        io.editor.clear();

        let mut model = Model::new(self.prompt.clone(), font, theme);
        model.pointer_input = self.pointer_input;
        model.trace = self.trace;
        model.echo(EchoKind::Notice, WELCOME);
        model
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, io: &mut SessionIo) -> Result<()> {
        let mut model = self.fresh_session(io);
        let mut needs_render = true;

        loop {
            // Font probe results ride the same loop as input events.
            while let Some(outcome) = io.probe.poll() {
                Self::apply(
                    &mut model,
                    io,
                    Message::FontProbeResolved {
                        family: outcome.family,
                        available: outcome.available,
                    },
                );
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if model.font_cycle.is_some() {
                // a probe answer is due shortly
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                needs_render |= Self::handle_raw_event(&mut model, io, event::read()?);

                // Coalesce key-repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    needs_render |= Self::handle_raw_event(&mut model, io, event::read()?);
                }
            }

            if model.restart_requested {
                model = self.fresh_session(io);
                needs_render = true;
            }
            if model.should_quit {
                break;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(&model, io.editor.as_ref(), frame))?;
                needs_render = false;
            }
        }
        Ok(())
    }

    /// Translate one crossterm event and run it through the controller.
    ///
    /// Returns whether anything happened that warrants a redraw.
    fn handle_raw_event(model: &mut Model, io: &mut SessionIo, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Self::process_event(
                    model,
                    io,
                    &InputEvent::Key(KeyPress {
                        code: key.code,
                        modifiers: key.modifiers,
                        composing: false,
                    }),
                );
                true
            }
            Event::Paste(text) => {
                Self::process_event(model, io, &InputEvent::Paste(text));
                true
            }
            Event::Mouse(mouse) if model.pointer_input => Self::handle_mouse(model, io, &mouse),
            _ => false,
        }
    }

    /// Mouse press/drag stand in for touch start/move; the wheel scrolls
    /// the transcript.
    fn handle_mouse(model: &mut Model, io: &mut SessionIo, mouse: &MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Self::process_event(
                    model,
                    io,
                    &InputEvent::TouchStart {
                        x: i32::from(mouse.column),
                        y: i32::from(mouse.row),
                    },
                );
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                Self::process_event(
                    model,
                    io,
                    &InputEvent::TouchMove {
                        x: i32::from(mouse.column),
                        y: i32::from(mouse.row),
                    },
                );
                true
            }
            MouseEventKind::ScrollUp => {
                Self::apply(model, io, Message::ScrollUp(SCROLL_LINES));
                true
            }
            MouseEventKind::ScrollDown => {
                Self::apply(model, io, Message::ScrollDown(SCROLL_LINES));
                true
            }
            _ => false,
        }
    }
}
