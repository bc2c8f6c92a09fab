//! Terminal rendering: transcript, input line, status bar.
//!
//! Everything is drawn from the session model and the editor's buffer; the
//! active theme drives the styles each frame so theme cycling is visible
//! even in terminals that ignore the OSC retint.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{EchoKind, Model};
use crate::editor::LineEditor;

/// Render the complete UI.
pub fn render(model: &Model, editor: &dyn LineEditor, frame: &mut Frame) {
    let area = frame.area();
    let theme = &model.active_theme;
    let base = Style::default().fg(theme.fg()).bg(theme.bg());
    frame.render_widget(Block::default().style(base), area);

    let buffer_text = editor.text();
    let input_rows = input_height(&buffer_text, area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(input_rows),
            Constraint::Length(1),
        ])
        .split(area);

    render_transcript(model, frame, chunks[0]);
    render_input(model, editor, &buffer_text, frame, chunks[1]);
    render_status_bar(model, frame, chunks[2]);
}

/// Rows the input area needs: one per buffer line, capped at half the
/// frame so the transcript stays visible.
fn input_height(buffer_text: &str, total_height: u16) -> u16 {
    let rows = buffer_text.split('\n').count();
    let cap = usize::from((total_height / 2).max(1));
    u16::try_from(rows.min(cap)).unwrap_or(1).max(1)
}

fn render_transcript(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.active_theme;
    let lines: Vec<Line> = model
        .transcript
        .iter()
        .flat_map(|entry| {
            let style = match entry.kind {
                EchoKind::Input => Style::default().fg(theme.fg()).add_modifier(Modifier::DIM),
                EchoKind::Output => Style::default().fg(theme.fg()),
                EchoKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                EchoKind::Notice => Style::default().fg(theme.accent()),
                EchoKind::Trace => Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            };
            let text = if entry.text.is_empty() {
                String::from(" ")
            } else {
                entry.text.clone()
            };
            text.lines()
                .map(|line| Line::styled(line.to_string(), style))
                .collect::<Vec<_>>()
        })
        .collect();

    let height = usize::from(area.height);
    let end = lines.len().saturating_sub(model.scroll);
    let start = end.saturating_sub(height);
    let visible: Vec<Line> = lines[start..end].to_vec();
    frame.render_widget(Paragraph::new(visible), area);
}

fn render_input(
    model: &Model,
    editor: &dyn LineEditor,
    buffer_text: &str,
    frame: &mut Frame,
    area: Rect,
) {
    let theme = &model.active_theme;
    let prompt_style = Style::default()
        .fg(theme.accent())
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.fg());

    let mut lines: Vec<Line> = Vec::new();
    for (idx, line) in buffer_text.split('\n').enumerate() {
        if idx == 0 {
            lines.push(Line::from(vec![
                Span::styled(model.prompt.clone(), prompt_style),
                Span::styled(line.to_string(), text_style),
            ]));
        } else {
            lines.push(Line::styled(line.to_string(), text_style));
        }
    }
    frame.render_widget(Paragraph::new(lines), area);

    if model.is_accepting() {
        let (row, col) = cursor_grid(buffer_text, editor.cursor());
        let prompt_width = if row == 0 {
            UnicodeWidthStr::width(model.prompt.as_str())
        } else {
            0
        };
        let x = area.x + clamp_u16(prompt_width + col, area.width.saturating_sub(1));
        let y = area.y + clamp_u16(row, area.height.saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let pointer = if model.pointer_input { "on" } else { "off" };
    let trace = if model.trace { "  [test-mode]" } else { "" };
    let status = format!(
        " {}  |  {}  |  pointer: {}{}  |  Ctrl+K: keymap",
        model.active_font, model.active_theme.background, pointer, trace
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

/// Row and display-width column of the cursor within the buffer text.
fn cursor_grid(text: &str, cursor: usize) -> (usize, usize) {
    let before: String = text.chars().take(cursor).collect();
    match before.rsplit_once('\n') {
        Some((head, tail)) => (
            head.matches('\n').count() + 1,
            UnicodeWidthStr::width(tail),
        ),
        None => (0, UnicodeWidthStr::width(before.as_str())),
    }
}

fn clamp_u16(value: usize, max: u16) -> u16 {
    u16::try_from(value).unwrap_or(max).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_grid_single_line() {
        assert_eq!(cursor_grid("abc", 0), (0, 0));
        assert_eq!(cursor_grid("abc", 2), (0, 2));
    }

    #[test]
    fn test_cursor_grid_multiline() {
        assert_eq!(cursor_grid("ab\ncd", 3), (1, 0));
        assert_eq!(cursor_grid("ab\ncd", 4), (1, 1));
        assert_eq!(cursor_grid("a\nb\nc", 5), (2, 1));
    }

    #[test]
    fn test_cursor_grid_counts_display_width() {
        // fullwidth chars occupy two columns
        assert_eq!(cursor_grid("日本", 1), (0, 2));
    }

    #[test]
    fn test_input_height_caps_at_half_frame() {
        assert_eq!(input_height("one line", 24), 1);
        assert_eq!(input_height("a\nb\nc", 24), 3);
        assert_eq!(input_height(&"x\n".repeat(40), 24), 12);
    }
}
