use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, palette: &Palette) {
    let popup_area = popup_area(area, 60, 70);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Reminders:\n");
    text.push_str(&format!("  {} / {}: Move selection\n", key(&kb.list_up), key(&kb.list_down)));
    text.push_str(&format!("  {}: New reminder\n", key(&kb.new)));
    text.push_str(&format!("  {}: Edit selected\n", key(&kb.edit)));
    text.push_str(&format!("  {}: Delete selected\n", key(&kb.delete)));
    text.push_str(&format!("  {}: Mark taken\n", key(&kb.mark_taken)));
    text.push_str(&format!("  {}: Mark missed\n", key(&kb.mark_missed)));
    text.push_str(&format!("  {}: Snooze {} minutes\n", key(&kb.snooze), config.snooze_minutes));
    text.push_str(&format!("  {}: Clear all reminders\n", key(&kb.clear_all)));
    text.push('\n');

    text.push_str("Form:\n");
    text.push_str("  Tab / Shift+Tab: Next / previous field\n");
    text.push_str("  Space: Toggle sound (on the Sound field)\n");
    text.push_str(&format!("  Enter or {}: Save\n", key(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("Alerts:\n");
    text.push_str("  ↑ / ↓: Choose taken, missed or snooze\n");
    text.push_str("  Enter: Apply, Esc: Dismiss\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Toggle sound\n", key(&kb.toggle_sound)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_configured_keys() {
        let mut config = Config::default();
        config.key_bindings.snooze = "x".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("x: Snooze 10 minutes"));
        assert!(text.contains("F1: Show/hide help"));
    }
}
