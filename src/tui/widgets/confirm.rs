use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::Confirmation;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup_area;

pub fn confirmation_message(confirmation: &Confirmation) -> (String, &'static str) {
    match confirmation {
        Confirmation::Delete { label, .. } => (format!("Delete this reminder?\n\n{}", label), "Delete"),
        Confirmation::ClearAll => (
            "Delete every reminder? This cannot be undone.".to_string(),
            "Clear all",
        ),
    }
}

pub fn render_confirm(f: &mut Frame, area: Rect, confirmation: &Confirmation, selection: usize, palette: &Palette) {
    let popup_area = popup_area(area, 50, 35);
    f.render_widget(Clear, popup_area);

    let (message, confirm_label) = confirmation_message(confirmation);
    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), palette.base())))
        .collect();
    lines.push(Line::from(""));

    for (index, option) in [confirm_label, "Cancel"].iter().enumerate() {
        let is_selected = index == selection;
        let prefix = if is_selected { "> " } else { "  " };
        let style = if is_selected { palette.highlight() } else { palette.base() };
        lines.push(Line::from(Span::styled(format!("{}{}", prefix, option), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑↓ to choose, Enter to confirm, Esc to cancel",
        palette.base(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup_area);
}
