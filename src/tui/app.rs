use ratatui::widgets::ListState;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use crate::lifecycle::{DueAlert, Tracker, TrackerEvent};
use crate::models::{FormMode, Reminder, ReminderInput, Status};
use crate::tui::widgets::editor::Editor;
use crate::{Config, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Form,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Dosage,
    Time,
    Sound,
}

impl FormField {
    const ORDER: [FormField; 4] = [FormField::Name, FormField::Dosage, FormField::Time, FormField::Sound];

    fn step(self, forward: bool) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone)]
pub struct ReminderForm {
    pub mode: FormMode,
    pub current_field: FormField,
    pub name: Editor,
    pub dosage: Editor,
    pub time: Editor,
    pub sound: bool,
}

impl ReminderForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            current_field: FormField::Name,
            name: Editor::new(),
            dosage: Editor::new(),
            time: Editor::new(),
            sound: true,
        }
    }

    pub fn edit(reminder: &Reminder) -> Self {
        Self {
            mode: FormMode::Edit(reminder.id.clone()),
            current_field: FormField::Name,
            name: Editor::from_string(&reminder.name),
            dosage: Editor::from_string(reminder.dosage.as_deref().unwrap_or("")),
            time: Editor::from_string(&reminder.time),
            sound: reminder.sound,
        }
    }

    pub fn input(&self) -> ReminderInput {
        ReminderInput {
            name: self.name.to_string(),
            dosage: self.dosage.to_string(),
            time: self.time.to_string(),
            sound: self.sound,
        }
    }

    pub fn current_editor(&mut self) -> Option<&mut Editor> {
        match self.current_field {
            FormField::Name => Some(&mut self.name),
            FormField::Dosage => Some(&mut self.dosage),
            FormField::Time => Some(&mut self.time),
            FormField::Sound => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Reminder",
            FormMode::Edit(_) => "Edit Reminder",
        }
    }
}

/// Actions that need a yes/no before they run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Delete { id: String, label: String },
    ClearAll,
}

/// The three answers offered by a due alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueChoice {
    Taken,
    Missed,
    Snooze,
}

impl DueChoice {
    pub const ALL: [DueChoice; 3] = [DueChoice::Taken, DueChoice::Missed, DueChoice::Snooze];

    pub fn label(&self) -> &'static str {
        match self {
            DueChoice::Taken => "Mark Taken",
            DueChoice::Missed => "Mark Missed",
            DueChoice::Snooze => "Snooze",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
    /// Current wall-clock time of day, refreshed by the event loop
    pub now: String,
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    /// Alerts waiting for an answer, oldest first
    pub due_queue: VecDeque<DueAlert>,
    pub due_selection: usize,
    pub confirmation: Option<Confirmation>,
    pub confirm_selection: usize, // 0 = confirm, 1 = cancel
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    profile: Profile,
    config_path: Option<PathBuf>,
    pub tracker: Tracker,

    pub ui: UiState,
    pub form: Option<ReminderForm>,
    pub modals: ModalState,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, profile: Profile, config_path: Option<PathBuf>, tracker: Tracker) -> Self {
        let mut app = Self {
            config,
            profile,
            config_path,
            tracker,
            ui: UiState {
                mode: Mode::View,
                selected_index: 0,
                list_state: ListState::default(),
                now: crate::utils::hhmm_of(chrono::Local::now().naive_local()),
            },
            form: None,
            modals: ModalState::default(),
            status: StatusState::default(),
        };
        // Loading is not a mutation; drop anything queued so far
        app.tracker.drain_events();
        app.sync_list_state();
        app
    }

    pub fn selected_reminder(&self) -> Option<&Reminder> {
        self.tracker.sorted().get(self.ui.selected_index).copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_reminder().map(|r| r.id.clone())
    }

    pub fn sync_list_state(&mut self) {
        let len = self.tracker.list().len();
        if len == 0 {
            self.ui.selected_index = 0;
            self.ui.list_state.select(None);
        } else {
            self.ui.selected_index = self.ui.selected_index.min(len - 1);
            self.ui.list_state.select(Some(self.ui.selected_index));
        }
    }

    /// Keep the same reminder selected after the sort order changes
    fn select_id(&mut self, id: &str) {
        if let Some(index) = self.tracker.sorted().iter().position(|r| r.id == id) {
            self.ui.selected_index = index;
        }
        self.sync_list_state();
    }

    pub fn move_selection_up(&mut self) {
        self.ui.selected_index = self.ui.selected_index.saturating_sub(1);
        self.sync_list_state();
    }

    pub fn move_selection_down(&mut self) {
        self.ui.selected_index += 1;
        self.sync_list_state();
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    pub fn set_now(&mut self, now: String) {
        self.ui.now = now;
    }

    /// Reload outside changes, then run a due scan for `now` and queue any
    /// alerts it raises
    pub fn run_scan(&mut self, now: &str) {
        if let Err(e) = self.tracker.refresh() {
            tracing::warn!(error = %e, "could not reload reminders");
            self.set_status_message(format!("Could not reload reminders: {}", e));
        }
        self.tracker.scan(now);
        self.process_tracker_events();
    }

    /// Move tracker events into UI state
    pub fn process_tracker_events(&mut self) {
        for event in self.tracker.drain_events() {
            match event {
                TrackerEvent::Changed => {
                    // Alerts answered or deleted elsewhere no longer need a modal
                    let tracker = &self.tracker;
                    self.modals
                        .due_queue
                        .retain(|a| tracker.find(&a.id).is_some_and(|r| r.status == Status::Pending));
                    self.sync_list_state();
                }
                TrackerEvent::Due(alert) => {
                    if !self.modals.due_queue.iter().any(|a| a.id == alert.id) {
                        self.modals.due_queue.push_back(alert);
                    }
                }
                TrackerEvent::PersistFailed(message) => {
                    self.set_status_message(format!("Could not save reminders: {}", message));
                }
            }
        }
    }

    pub fn current_due_alert(&self) -> Option<&DueAlert> {
        self.modals.due_queue.front()
    }

    pub fn move_due_selection(&mut self, forward: bool) {
        let len = DueChoice::ALL.len();
        self.modals.due_selection = if forward {
            (self.modals.due_selection + 1) % len
        } else {
            (self.modals.due_selection + len - 1) % len
        };
    }

    /// Apply the user's answer to the front alert
    pub fn resolve_due(&mut self, choice: DueChoice) {
        let Some(alert) = self.modals.due_queue.pop_front() else {
            return;
        };
        self.modals.due_selection = 0;
        let result = match choice {
            DueChoice::Taken => self.tracker.mark(&alert.id, Status::Taken),
            DueChoice::Missed => self.tracker.mark(&alert.id, Status::Missed),
            DueChoice::Snooze => {
                self.tracker.snooze_default(&alert.id);
                Ok(())
            }
        };
        match result {
            Ok(()) => {
                let message = match choice {
                    DueChoice::Taken => format!("{} marked taken", alert.name),
                    DueChoice::Missed => format!("{} marked missed", alert.name),
                    DueChoice::Snooze => match self.tracker.find(&alert.id) {
                        Some(r) => format!("{} snoozed to {}", alert.name, r.time),
                        None => format!("{} snoozed", alert.name),
                    },
                };
                self.set_status_message(message);
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
        self.process_tracker_events();
    }

    /// Close the front alert without recording anything
    pub fn dismiss_due(&mut self) {
        self.modals.due_queue.pop_front();
        self.modals.due_selection = 0;
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::View;
    }

    pub fn enter_create_mode(&mut self) {
        self.form = Some(ReminderForm::create());
        self.ui.mode = Mode::Form;
    }

    pub fn enter_edit_mode(&mut self) {
        let form = self.selected_reminder().map(ReminderForm::edit);
        match form {
            Some(form) => {
                self.form = Some(form);
                self.ui.mode = Mode::Form;
            }
            None => self.set_status_message("No reminder selected".to_string()),
        }
    }

    pub fn exit_form_mode(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    pub fn navigate_form_field(&mut self, forward: bool) {
        if let Some(ref mut form) = self.form {
            form.current_field = form.current_field.step(forward);
        }
    }

    pub fn toggle_form_sound(&mut self) {
        if let Some(ref mut form) = self.form {
            form.sound = !form.sound;
        }
    }

    pub fn current_form_editor(&mut self) -> Option<&mut Editor> {
        self.form.as_mut().and_then(|f| f.current_editor())
    }

    /// Submit the open form. Validation errors keep the form open.
    pub fn save_form(&mut self) {
        let Some(ref form) = self.form else {
            return;
        };
        let mode = form.mode.clone();
        let input = form.input();
        match self.tracker.submit(&mode, &input) {
            Ok(()) => {
                let message = match mode {
                    FormMode::Create => "Reminder added",
                    FormMode::Edit(_) => "Reminder updated",
                };
                self.exit_form_mode();
                self.process_tracker_events();
                let id = match mode {
                    FormMode::Edit(id) => Some(id),
                    // New reminders are appended, so the newest is last
                    FormMode::Create => self.tracker.list().last().map(|r| r.id.clone()),
                };
                if let Some(id) = id {
                    self.select_id(&id);
                }
                self.set_status_message(message.to_string());
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    pub fn mark_selected(&mut self, status: Status) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.tracker.mark(&id, status) {
            Ok(()) => self.set_status_message(format!("Marked {}", status.label().to_lowercase())),
            Err(e) => self.set_status_message(e.to_string()),
        }
        // A manual answer supersedes a queued alert for the same reminder
        self.modals.due_queue.retain(|a| a.id != id);
        self.process_tracker_events();
    }

    pub fn snooze_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.tracker.snooze_default(&id);
        self.modals.due_queue.retain(|a| a.id != id);
        self.process_tracker_events();
        self.select_id(&id);
        if let Some(r) = self.tracker.find(&id) {
            let message = format!("Snoozed to {}", r.time);
            self.set_status_message(message);
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(r) = self.selected_reminder() {
            let confirmation = Confirmation::Delete {
                id: r.id.clone(),
                label: format!("{} at {}", r.name, r.time),
            };
            self.modals.confirmation = Some(confirmation);
            self.modals.confirm_selection = 1;
        }
    }

    pub fn request_clear_all(&mut self) {
        if !self.tracker.list().is_empty() {
            self.modals.confirmation = Some(Confirmation::ClearAll);
            self.modals.confirm_selection = 1;
        }
    }

    /// Run the pending confirmation if "confirm" is selected, then close it
    pub fn answer_confirmation(&mut self) {
        let Some(confirmation) = self.modals.confirmation.take() else {
            return;
        };
        if self.modals.confirm_selection != 0 {
            return;
        }
        match confirmation {
            Confirmation::Delete { id, .. } => {
                self.tracker.delete(&id);
                self.modals.due_queue.retain(|a| a.id != id);
                self.set_status_message("Reminder deleted".to_string());
            }
            Confirmation::ClearAll => {
                self.tracker.clear_all();
                self.modals.due_queue.clear();
                self.set_status_message("All reminders cleared".to_string());
            }
        }
        self.process_tracker_events();
    }

    pub fn cancel_confirmation(&mut self) {
        self.modals.confirmation = None;
    }

    /// Flip the global sound preference and remember it in the config file
    pub fn toggle_sound(&mut self) {
        let enabled = !self.tracker.sound_enabled();
        self.tracker.set_sound_enabled(enabled);
        self.config.sound_enabled = enabled;

        let saved = match self.config_path {
            Some(ref path) => self.config.save_to_path(path),
            None => self.config.save_with_profile(self.profile),
        };
        let state = if enabled { "on" } else { "off" };
        match saved {
            Ok(()) => self.set_status_message(format!("Sound {}", state)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save sound preference");
                self.set_status_message(format!("Sound {} (not saved: {})", state, e));
            }
        }
    }
}
