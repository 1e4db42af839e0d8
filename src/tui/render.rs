use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::Mode;
use crate::tui::widgets::{
    color::Palette, confirm::render_confirm, due_alert::render_due_alert, form::render_reminder_form,
    help::render_help, reminder_list::render_reminder_list, reminder_view::render_reminder_view,
    status_bar::render_status_bar,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let palette = Palette::from_theme(&app.config.get_active_theme());

    let sound = if app.tracker.sound_enabled() { "♪ on" } else { "♪ off" };
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("MediTrak  {}  {}", app.ui.now, sound))
        .title_alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(outer_block, f.area());

    {
        let reminders = app.tracker.sorted();
        render_reminder_list(f, layout.list_area, &reminders, &app.ui.now, &mut app.ui.list_state, &palette);
    }

    match (app.ui.mode, app.form.as_ref()) {
        (Mode::Form, Some(form)) => render_reminder_form(f, layout.detail_area, form, &palette),
        _ => render_reminder_view(f, layout.detail_area, app.selected_reminder(), &app.ui.now, &palette),
    }

    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config, &palette);
    }

    if let Some(ref confirmation) = app.modals.confirmation {
        render_confirm(f, f.area(), confirmation, app.modals.confirm_selection, &palette);
    }

    // Due alerts sit above everything else
    if let Some(alert) = app.current_due_alert() {
        render_due_alert(
            f,
            f.area(),
            alert,
            app.modals.due_queue.len().saturating_sub(1),
            app.modals.due_selection,
            app.tracker.snooze_minutes(),
            &palette,
        );
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_deref(), &key_hints, &palette);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    if app.current_due_alert().is_some() {
        return vec!["↑/↓: Choose".to_string(), "Enter: Apply".to_string(), "Esc: Dismiss".to_string()];
    }
    if app.modals.confirmation.is_some() {
        return vec!["↑/↓: Choose".to_string(), "Enter: Confirm".to_string(), "Esc: Cancel".to_string()];
    }
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", key(&kb.help))],
        Mode::Form => vec![
            "Tab: Next field".to_string(),
            "Shift+Tab: Previous field".to_string(),
            format!("Enter/{}: Save", key(&kb.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::View => vec![
            format!("{}: Quit", key(&kb.quit)),
            format!("{}: New", key(&kb.new)),
            format!("{}: Edit", key(&kb.edit)),
            format!("{}: Taken", key(&kb.mark_taken)),
            format!("{}: Missed", key(&kb.mark_missed)),
            format!("{}: Snooze", key(&kb.snooze)),
            format!("{}: Delete", key(&kb.delete)),
            format!("{}: Sound", key(&kb.toggle_sound)),
            format!("{}: Clear all", key(&kb.clear_all)),
            format!("{}: Help", key(&kb.help)),
        ],
    }
}
