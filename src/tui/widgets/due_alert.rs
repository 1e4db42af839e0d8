use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::lifecycle::DueAlert;
use crate::tui::app::DueChoice;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup_area;

/// Modal for the oldest unanswered alert. `queued` counts the ones behind it.
pub fn render_due_alert(
    f: &mut Frame,
    area: Rect,
    alert: &DueAlert,
    queued: usize,
    selection: usize,
    snooze_minutes: u32,
    palette: &Palette,
) {
    let popup_area = popup_area(area, 50, 45);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Time to take {}", alert.name),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(ref dosage) = alert.dosage {
        lines.push(Line::from(Span::styled(format!("Dosage: {}", dosage), palette.base())));
    }
    lines.push(Line::from(Span::styled(format!("Scheduled at {}", alert.time), palette.base())));
    lines.push(Line::from(""));

    for (index, choice) in DueChoice::ALL.iter().enumerate() {
        let is_selected = index == selection;
        let prefix = if is_selected { "> " } else { "  " };
        let label = match choice {
            DueChoice::Snooze => format!("{} {} min", choice.label(), snooze_minutes),
            _ => choice.label().to_string(),
        };
        let style = if is_selected { palette.highlight() } else { palette.base() };
        lines.push(Line::from(Span::styled(format!("{}{}", prefix, label), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Enter to choose, Esc to dismiss", palette.base())));

    let title = if queued > 0 {
        format!("Reminder ({} more waiting)", queued)
    } else {
        "Reminder".to_string()
    };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup_area);
}
