pub mod color;
pub mod confirm;
pub mod due_alert;
pub mod editor;
pub mod form;
pub mod help;
pub mod reminder_list;
pub mod reminder_view;
pub mod status_bar;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Centered rect taking a percentage of the available area
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Truncate to `max_width` characters, ending with "..." when cut
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() > max_width {
        text.chars().take(max_width.saturating_sub(3)).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ibuprofen", 20), "Ibuprofen");
        assert_eq!(truncate("Ibuprofen", 6), "Ibu...");
    }

    #[test]
    fn test_popup_area_is_centered() {
        let area = popup_area(Rect::new(0, 0, 100, 40), 50, 50);
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }
}
