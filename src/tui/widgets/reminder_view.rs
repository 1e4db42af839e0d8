use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::due;
use crate::models::{Reminder, Status};
use crate::tui::widgets::color::Palette;

fn field<'a>(label: &'a str, value: String, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(value, Style::default().fg(palette.fg)),
    ])
}

pub fn render_reminder_view(f: &mut Frame, area: Rect, reminder: Option<&Reminder>, now: &str, palette: &Palette) {
    let block = Block::default().borders(Borders::ALL).title("Details").style(palette.base());

    let Some(reminder) = reminder else {
        let paragraph = Paragraph::new("Select a reminder to view details").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let status_color = match reminder.status {
        Status::Pending => palette.fg,
        Status::Taken => palette.taken,
        Status::Missed => palette.missed,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            reminder.name.clone(),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Dosage", reminder.dosage_or_dash().to_string(), palette),
        field("Time", reminder.time.clone(), palette),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Status"), Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
            Span::styled(reminder.status.label(), Style::default().fg(status_color)),
        ]),
        field("Sound", if reminder.sound { "On" } else { "Off" }.to_string(), palette),
        field("ID", reminder.short_id().to_string(), palette),
    ];

    if due::is_due_now(reminder, now) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Due now",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
    } else if reminder.notified && reminder.status == Status::Pending {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Alerted, waiting for an answer",
            Style::default().fg(palette.accent),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
