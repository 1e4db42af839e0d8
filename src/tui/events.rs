use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

use crate::models::Status;
use crate::scheduler::{Scheduler, SystemClock};
use crate::tui::App;
use crate::tui::app::{DueChoice, FormField, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{ParsedKeyBinding, hhmm_of, parse_key_binding};

/// Restores the terminal when dropped, including on panic
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore on normal exit; drop becomes a no-op afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check size before entering the alternate screen so the error is readable
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;
    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    // Validate bindings up front so a typo in the config fails loudly
    KeyMap::from_config(&app)?;

    let interval = Duration::from_secs(app.config.check_interval_secs);
    let (scheduler, ticks) = Scheduler::new(SystemClock).with_interval(interval).start()?;

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = (|| -> Result<(), TuiError> {
        loop {
            loop {
                match ticks.try_recv() {
                    Ok(tick) => app.run_scan(&tick.hhmm()),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        return Err(TuiError::RenderError("Due checker stopped unexpectedly".to_string()));
                    }
                }
            }
            app.process_tracker_events();
            app.set_now(hhmm_of(chrono::Local::now().naive_local()));
            app.check_status_message_timeout();

            let size = terminal.size()?;
            let terminal_rect = Rect::new(0, 0, size.width, size.height);
            terminal.draw(|f| {
                let layout = Layout::calculate(terminal_rect, app.config.list_width_percent);
                crate::tui::render::render(f, &mut app, &layout);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = event::read()? {
                    // Only Press events; Windows also reports Release
                    if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                        return Ok(());
                    }
                }
            }
        }
    })();

    scheduler.stop();
    if let Err(e) = app.tracker.flush() {
        tracing::error!(error = %e, "final save failed");
    }
    guard.restore()?;
    result
}

/// Parsed view-mode bindings
struct KeyMap {
    quit: ParsedKeyBinding,
    new: ParsedKeyBinding,
    edit: ParsedKeyBinding,
    save: ParsedKeyBinding,
    delete: ParsedKeyBinding,
    mark_taken: ParsedKeyBinding,
    mark_missed: ParsedKeyBinding,
    snooze: ParsedKeyBinding,
    toggle_sound: ParsedKeyBinding,
    clear_all: ParsedKeyBinding,
    list_up: ParsedKeyBinding,
    list_down: ParsedKeyBinding,
    help: ParsedKeyBinding,
}

impl KeyMap {
    fn from_config(app: &App) -> Result<Self, TuiError> {
        let kb = &app.config.key_bindings;
        let parse = |s: &str| parse_key_binding(s).map_err(TuiError::KeyBindingError);
        Ok(Self {
            quit: parse(&kb.quit)?,
            new: parse(&kb.new)?,
            edit: parse(&kb.edit)?,
            save: parse(&kb.save)?,
            delete: parse(&kb.delete)?,
            mark_taken: parse(&kb.mark_taken)?,
            mark_missed: parse(&kb.mark_missed)?,
            snooze: parse(&kb.snooze)?,
            toggle_sound: parse(&kb.toggle_sound)?,
            clear_all: parse(&kb.clear_all)?,
            list_up: parse(&kb.list_up)?,
            list_down: parse(&kb.list_down)?,
            help: parse(&kb.help)?,
        })
    }
}

/// Returns true when the app should quit
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let keys = KeyMap::from_config(app)?;

    // Ctrl+C always quits
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if app.current_due_alert().is_some() {
        handle_due_modal(app, key_event);
        return Ok(false);
    }
    if app.modals.confirmation.is_some() {
        handle_confirmation_modal(app, key_event);
        return Ok(false);
    }

    match app.ui.mode {
        Mode::Help => {
            if key_event.code == KeyCode::Esc || matches_key_event(key_event, &keys.help) {
                app.exit_help_mode();
            }
            Ok(false)
        }
        Mode::Form => {
            handle_form_mode(app, key_event, &keys);
            Ok(false)
        }
        Mode::View => Ok(handle_view_mode(app, key_event, &keys)),
    }
}

fn handle_due_modal(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Up | KeyCode::Left | KeyCode::BackTab => app.move_due_selection(false),
        KeyCode::Down | KeyCode::Right | KeyCode::Tab => app.move_due_selection(true),
        KeyCode::Enter => {
            let choice = DueChoice::ALL[app.modals.due_selection % DueChoice::ALL.len()];
            app.resolve_due(choice);
        }
        KeyCode::Esc => app.dismiss_due(),
        _ => {}
    }
}

fn handle_confirmation_modal(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.modals.confirm_selection = 1 - app.modals.confirm_selection.min(1);
        }
        KeyCode::Enter => app.answer_confirmation(),
        KeyCode::Esc => app.cancel_confirmation(),
        _ => {}
    }
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent, keys: &KeyMap) {
    if matches_key_event(key_event, &keys.save) {
        app.save_form();
        return;
    }

    let on_sound = app.form.as_ref().map(|f| f.current_field) == Some(FormField::Sound);
    match key_event.code {
        KeyCode::Esc => app.exit_form_mode(),
        KeyCode::Enter => app.save_form(),
        KeyCode::Tab | KeyCode::Down => app.navigate_form_field(true),
        KeyCode::BackTab | KeyCode::Up => app.navigate_form_field(false),
        KeyCode::Char(' ') if on_sound => app.toggle_form_sound(),
        code => {
            if let Some(editor) = app.current_form_editor() {
                match code {
                    KeyCode::Char(c) => editor.insert_char(c),
                    KeyCode::Backspace => editor.backspace(),
                    KeyCode::Delete => editor.delete(),
                    KeyCode::Left => editor.move_left(),
                    KeyCode::Right => editor.move_right(),
                    KeyCode::Home => editor.move_home(),
                    KeyCode::End => editor.move_end(),
                    _ => {}
                }
            }
        }
    }
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent, keys: &KeyMap) -> bool {
    if matches_key_event(key_event, &keys.quit) {
        return true;
    }

    if matches_key_event(key_event, &keys.list_down) || key_event.code == KeyCode::Down {
        app.move_selection_down();
    } else if matches_key_event(key_event, &keys.list_up) || key_event.code == KeyCode::Up {
        app.move_selection_up();
    } else if matches_key_event(key_event, &keys.new) || key_event.code == KeyCode::Char('a') {
        app.enter_create_mode();
    } else if matches_key_event(key_event, &keys.edit) || key_event.code == KeyCode::Enter {
        app.enter_edit_mode();
    } else if matches_key_event(key_event, &keys.delete) {
        app.request_delete();
    } else if matches_key_event(key_event, &keys.mark_taken) {
        app.mark_selected(Status::Taken);
    } else if matches_key_event(key_event, &keys.mark_missed) {
        app.mark_selected(Status::Missed);
    } else if matches_key_event(key_event, &keys.snooze) {
        app.snooze_selected();
    } else if matches_key_event(key_event, &keys.toggle_sound) {
        app.toggle_sound();
    } else if matches_key_event(key_event, &keys.clear_all) {
        app.request_clear_all();
    } else if matches_key_event(key_event, &keys.help) {
        app.enter_help_mode();
    }
    false
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Ctrl on Windows/Linux, Option/Alt on macOS
    let has_primary_mod = crate::utils::has_primary_modifier(key_event.modifiers);
    if binding.requires_ctrl != has_primary_mod {
        return false;
    }
    binding.key_code == key_event.code
}
