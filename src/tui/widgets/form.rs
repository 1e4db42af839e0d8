use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{FormField, ReminderForm};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::editor::Editor;

const FIELD_HEIGHT: u16 = 3;

/// Split the form area into one bordered row per field
fn field_areas(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Name
            Constraint::Length(FIELD_HEIGHT), // Dosage
            Constraint::Length(FIELD_HEIGHT), // Time
            Constraint::Length(FIELD_HEIGHT), // Sound
            Constraint::Min(0),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    editor: &Editor,
    active: bool,
    active_style: Style,
    inactive_style: Style,
) -> Option<(u16, u16)> {
    let inner_width = area.width.saturating_sub(2) as usize;
    let (text, col) = editor.visible(inner_width);
    let style = if active { active_style } else { inactive_style };
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);

    if active && area.height > 2 && inner_width > 0 {
        Some((area.x + 1 + col as u16, area.y + 1))
    } else {
        None
    }
}

pub fn render_reminder_form(f: &mut Frame, area: Rect, form: &ReminderForm, palette: &Palette) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let outer = Block::default().borders(Borders::ALL).title(form.title()).style(palette.base());
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let active_style = palette.highlight();
    let inactive_style = Style::default().fg(palette.fg).add_modifier(Modifier::DIM);
    let areas = field_areas(inner);

    let cursor = [
        render_text_field(
            f,
            areas[0],
            "Medicine",
            &form.name,
            form.current_field == FormField::Name,
            active_style,
            inactive_style,
        ),
        render_text_field(
            f,
            areas[1],
            "Dosage (optional)",
            &form.dosage,
            form.current_field == FormField::Dosage,
            active_style,
            inactive_style,
        ),
        render_text_field(
            f,
            areas[2],
            "Time (HH:MM)",
            &form.time,
            form.current_field == FormField::Time,
            active_style,
            inactive_style,
        ),
    ]
    .into_iter()
    .flatten()
    .next();

    let sound_active = form.current_field == FormField::Sound;
    let sound_text = if form.sound { "[x] Play a chime when due" } else { "[ ] Play a chime when due" };
    let sound_paragraph = Paragraph::new(sound_text)
        .style(if sound_active { active_style } else { inactive_style })
        .block(Block::default().borders(Borders::ALL).title("Sound (Space to toggle)"));
    f.render_widget(sound_paragraph, areas[3]);

    if let Some((x, y)) = cursor {
        f.set_cursor_position((x, y));
    }
}
