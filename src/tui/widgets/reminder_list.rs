use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};

use crate::due;
use crate::models::{Reminder, Status};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::truncate;

pub fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Pending => "○",
        Status::Taken => "✓",
        Status::Missed => "✗",
    }
}

fn row_text(reminder: &Reminder, max_width: usize) -> String {
    let bell = if reminder.sound { "" } else { " (silent)" };
    let text = format!(
        "{} {}  {}{}",
        status_marker(reminder.status),
        reminder.time,
        reminder.name,
        bell
    );
    truncate(&text, max_width)
}

pub fn render_reminder_list(
    f: &mut Frame,
    area: Rect,
    reminders: &[&Reminder],
    now: &str,
    list_state: &mut ListState,
    palette: &Palette,
) {
    let title = format!("Reminders ({})", reminders.len());

    if reminders.is_empty() {
        let paragraph = Paragraph::new("No reminders yet.\nPress n to add one.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(palette.base());
        f.render_widget(paragraph, area);
        return;
    }

    let max_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = reminders
        .iter()
        .map(|r| {
            let style = match r.status {
                Status::Taken => Style::default().fg(palette.taken),
                Status::Missed => Style::default().fg(palette.missed),
                Status::Pending if due::is_due_now(r, now) => {
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
                }
                Status::Pending => Style::default().fg(palette.fg),
            };
            ListItem::new(Line::from(Span::styled(row_text(r, max_width), style)))
        })
        .collect();
    let total_items = items.len();

    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Scrollbar
        ])
        .split(area);
    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(palette.base())
        .highlight_style(palette.highlight());
    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    let visible_items = list_area.height.saturating_sub(2) as usize;
    if total_items > visible_items && visible_items > 0 && scrollbar_area.width > 0 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            list_area.y + 1,
            scrollbar_area.width,
            list_area.height.saturating_sub(2),
        );
        let selected_index = list_state.selected().unwrap_or(0);
        let scroll_position = selected_index.saturating_sub(visible_items - 1);
        let mut scrollbar_state = ScrollbarState::new(total_items)
            .viewport_content_length(visible_items)
            .position(scroll_position);
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}
