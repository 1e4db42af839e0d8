use thiserror::Error;

use crate::chime::{Chime, Tone};
use crate::due;
use crate::models::{FormMode, Reminder, ReminderInput, ReminderPatch, Status};
use crate::store::{ReminderStore, StoreError};
use crate::utils;

pub const DEFAULT_SNOOZE_MINUTES: u32 = 10;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

/// What the presentation layer needs to show a due alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueAlert {
    pub id: String,
    pub name: String,
    pub dosage: Option<String>,
    pub time: String,
}

impl From<&Reminder> for DueAlert {
    fn from(reminder: &Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            name: reminder.name.clone(),
            dosage: reminder.dosage.clone(),
            time: reminder.time.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The collection changed and views should redraw
    Changed,
    Due(DueAlert),
    /// A save failed; the in-memory state is kept and the write is retried later
    PersistFailed(String),
}

/// Owns the reminder store and applies every lifecycle transition.
///
/// All mutations persist the full collection and queue events for the
/// presentation layer, which collects them with [`Tracker::drain_events`].
pub struct Tracker {
    store: ReminderStore,
    chime: Box<dyn Chime>,
    sound_enabled: bool,
    snooze_minutes: u32,
    unsaved: bool,
    events: Vec<TrackerEvent>,
}

impl Tracker {
    pub fn new(store: ReminderStore, chime: Box<dyn Chime>) -> Self {
        Self {
            store,
            chime,
            sound_enabled: true,
            snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            unsaved: false,
            events: Vec::new(),
        }
    }

    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn with_snooze_minutes(mut self, minutes: u32) -> Self {
        self.snooze_minutes = minutes;
        self
    }

    pub fn list(&self) -> &[Reminder] {
        self.store.list()
    }

    /// Display order: ascending time, ties keep collection order
    pub fn sorted(&self) -> Vec<&Reminder> {
        let mut sorted: Vec<&Reminder> = self.store.list().iter().collect();
        sorted.sort_by(|a, b| a.time.cmp(&b.time));
        sorted
    }

    pub fn find(&self, id: &str) -> Option<&Reminder> {
        self.store.get(id)
    }

    /// Find the single reminder whose id starts with `prefix`
    pub fn resolve(&self, prefix: &str) -> Result<&Reminder, TrackerError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(TrackerError::Validation("Reminder id is required".to_string()));
        }
        if let Some(exact) = self.store.get(prefix) {
            return Ok(exact);
        }
        let mut matches = self.store.list().iter().filter(|r| r.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (None, _) => Err(TrackerError::Validation(format!("No reminder with id '{}'", prefix))),
            (Some(_), Some(_)) => Err(TrackerError::Validation(format!(
                "Id prefix '{}' matches more than one reminder",
                prefix
            ))),
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        tracing::info!(enabled, "global sound preference changed");
    }

    pub fn snooze_minutes(&self) -> u32 {
        self.snooze_minutes
    }

    /// True while a failed save has not yet been retried successfully
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn drain_events(&mut self) -> Vec<TrackerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Create a new pending reminder
    pub fn add(&mut self, name: &str, dosage: &str, time: &str, sound: bool) -> Result<Reminder, TrackerError> {
        let (name, dosage, time) = validate_fields(name, dosage, time)?;
        let reminder = Reminder::new(name, dosage, time, sound);
        tracing::info!(id = %reminder.id, name = %reminder.name, time = %reminder.time, "reminder added");
        self.store.push(reminder.clone());
        self.commit();
        Ok(reminder)
    }

    /// Merge a patch into an existing reminder. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, patch: ReminderPatch) -> Result<(), TrackerError> {
        let patch = validate_patch(patch)?;
        match self.store.get_mut(id) {
            Some(reminder) => {
                patch.apply(reminder);
                tracing::debug!(id, "reminder updated");
            }
            None => {
                tracing::debug!(id, "update for unknown reminder ignored");
                return Ok(());
            }
        }
        self.commit();
        Ok(())
    }

    pub fn delete(&mut self, id: &str) {
        if self.store.remove(id) {
            tracing::info!(id, "reminder deleted");
        }
        self.commit();
    }

    /// Record the outcome of a dose. Only `Taken` and `Missed` are outcomes.
    pub fn mark(&mut self, id: &str, status: Status) -> Result<(), TrackerError> {
        if status == Status::Pending {
            return Err(TrackerError::Validation(
                "A reminder can only be marked taken or missed".to_string(),
            ));
        }
        if self.store.get(id).is_none() {
            tracing::debug!(id, "mark for unknown reminder ignored");
            return Ok(());
        }
        self.update(
            id,
            ReminderPatch {
                status: Some(status),
                notified: Some(true),
                ..Default::default()
            },
        )?;
        tracing::info!(id, status = %status, "reminder marked");
        Ok(())
    }

    /// Replace the editable fields and start a fresh alert cycle
    pub fn edit(&mut self, id: &str, name: &str, dosage: &str, time: &str, sound: bool) -> Result<(), TrackerError> {
        let (name, dosage, time) = validate_fields(name, dosage, time)?;
        self.update(
            id,
            ReminderPatch {
                name: Some(name),
                dosage: Some(dosage),
                time: Some(time),
                sound: Some(sound),
                status: Some(Status::Pending),
                notified: Some(false),
            },
        )
    }

    /// Single entry point for form submissions
    pub fn submit(&mut self, mode: &FormMode, input: &ReminderInput) -> Result<(), TrackerError> {
        match mode {
            FormMode::Create => self
                .add(&input.name, &input.dosage, &input.time, input.sound)
                .map(|_| ()),
            FormMode::Edit(id) => self.edit(id, &input.name, &input.dosage, &input.time, input.sound),
        }
    }

    /// Raise the due alert for a reminder, at most once per pending cycle.
    /// Returns whether an alert was raised.
    pub fn handle_due(&mut self, id: &str) -> bool {
        let alert = match self.store.get_mut(id) {
            Some(reminder) if reminder.status == Status::Pending && !reminder.notified => {
                // Set before anything else so an overlapping scan cannot fire twice
                reminder.notified = true;
                DueAlert::from(&*reminder)
            }
            _ => return false,
        };
        let wants_sound = self.store.get(id).map(|r| r.sound).unwrap_or(false);
        self.commit();

        if self.sound_enabled && wants_sound {
            if let Err(e) = self.chime.play(Tone::DUE) {
                tracing::debug!(error = %e, "chime failed, alert stays visual");
            }
        }

        tracing::info!(id = %alert.id, name = %alert.name, time = %alert.time, "reminder due");
        self.events.push(TrackerEvent::Due(alert));
        true
    }

    /// Run due detection against `now` (`HH:MM`) and alert every due
    /// reminder in collection order. Returns the number of alerts raised.
    pub fn scan(&mut self, now: &str) -> usize {
        let due = due::due_ids(self.store.list(), now);
        if !due.is_empty() {
            tracing::debug!(now, count = due.len(), "scan found due reminders");
        }
        due.iter().filter(|id| self.handle_due(id)).count()
    }

    /// Push the scheduled time forward and re-arm the alert
    pub fn snooze(&mut self, id: &str, minutes: u32) {
        let new_time = match self.store.get(id) {
            Some(reminder) => utils::add_minutes_wrapping(&reminder.time, minutes),
            None => {
                tracing::debug!(id, "snooze for unknown reminder ignored");
                return;
            }
        };
        let Some(new_time) = new_time else {
            tracing::warn!(id, "cannot snooze reminder with malformed time");
            return;
        };
        if let Some(reminder) = self.store.get_mut(id) {
            tracing::info!(id, from = %reminder.time, to = %new_time, "reminder snoozed");
            reminder.time = new_time;
            reminder.notified = false;
        }
        self.commit();
    }

    /// Snooze by the configured default
    pub fn snooze_default(&mut self, id: &str) {
        self.snooze(id, self.snooze_minutes);
    }

    pub fn clear_all(&mut self) {
        tracing::info!(count = self.store.list().len(), "clearing all reminders");
        self.store.clear();
        self.commit();
    }

    /// Replace the whole collection, e.g. from an imported document
    pub fn replace_all(&mut self, reminders: Vec<Reminder>) -> Result<(), TrackerError> {
        let mut seen = std::collections::HashSet::new();
        let mut accepted = Vec::with_capacity(reminders.len());
        for mut reminder in reminders {
            if reminder.id.trim().is_empty() {
                return Err(TrackerError::Validation("Reminder without an id".to_string()));
            }
            if !seen.insert(reminder.id.clone()) {
                return Err(TrackerError::Validation(format!("Duplicate reminder id '{}'", reminder.id)));
            }
            let (name, dosage, time) =
                validate_fields(&reminder.name, reminder.dosage.as_deref().unwrap_or(""), &reminder.time)?;
            reminder.name = name;
            reminder.dosage = dosage;
            reminder.time = time;
            accepted.push(reminder);
        }
        tracing::info!(count = accepted.len(), "reminders replaced");
        self.store.replace(accepted);
        self.commit();
        Ok(())
    }

    /// The stored document form of the collection
    pub fn export_document(&self) -> Result<String, TrackerError> {
        Ok(self.store.to_document()?)
    }

    /// Pick up changes another process saved since this tracker last read or
    /// wrote the collection. Long-running front ends call this before each
    /// scan. A pending failed save is retried first; while it keeps failing
    /// the in-memory collection is kept and the error returned.
    pub fn refresh(&mut self) -> Result<bool, TrackerError> {
        self.flush()?;
        let reloaded = self.store.reload()?;
        if reloaded {
            self.events.push(TrackerEvent::Changed);
        }
        Ok(reloaded)
    }

    /// Retry an outstanding save and report the result
    pub fn flush(&mut self) -> Result<(), TrackerError> {
        if self.unsaved {
            self.store.save()?;
            self.unsaved = false;
        }
        Ok(())
    }

    /// Persist after a mutation and notify views. Write failures are kept
    /// in memory and reported as an event instead of failing the caller.
    fn commit(&mut self) {
        match self.store.save() {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save reminders, will retry");
                self.unsaved = true;
                self.events.push(TrackerEvent::PersistFailed(e.to_string()));
            }
        }
        self.events.push(TrackerEvent::Changed);
    }
}

fn validate_fields(name: &str, dosage: &str, time: &str) -> Result<(String, Option<String>, String), TrackerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::Validation("Medicine name is required".to_string()));
    }
    let time = utils::parse_time_of_day(time).map_err(TrackerError::Validation)?;
    let dosage = dosage.trim();
    let dosage = if dosage.is_empty() {
        None
    } else {
        Some(dosage.to_string())
    };
    Ok((name.to_string(), dosage, time))
}

fn validate_patch(mut patch: ReminderPatch) -> Result<ReminderPatch, TrackerError> {
    if let Some(ref name) = patch.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation("Medicine name is required".to_string()));
        }
        patch.name = Some(name.to_string());
    }
    if let Some(ref time) = patch.time {
        patch.time = Some(utils::parse_time_of_day(time).map_err(TrackerError::Validation)?);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chime::testing::{BrokenChime, RecordingChime};
    use crate::store::REMINDERS_KEY;
    use crate::store::testing::MemoryBackend;

    fn tracker() -> (Tracker, MemoryBackend, RecordingChime) {
        let backend = MemoryBackend::default();
        let chime = RecordingChime::default();
        let store = ReminderStore::load(Box::new(backend.clone()));
        (Tracker::new(store, Box::new(chime.clone())), backend, chime)
    }

    fn due_alerts(events: &[TrackerEvent]) -> Vec<&DueAlert> {
        events
            .iter()
            .filter_map(|e| match e {
                TrackerEvent::Due(alert) => Some(alert),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_add_appends_pending_reminder() {
        let (mut t, backend, _) = tracker();
        let r = t.add("  Aspirin ", "100 mg", "8:00", true).unwrap();
        assert_eq!(t.list().len(), 1);
        let stored = &t.list()[0];
        assert_eq!(stored, &r);
        assert_eq!(stored.name, "Aspirin");
        assert_eq!(stored.dosage.as_deref(), Some("100 mg"));
        assert_eq!(stored.time, "08:00");
        assert_eq!(stored.status, Status::Pending);
        assert!(!stored.notified);
        assert!(backend.stored(REMINDERS_KEY).unwrap().contains("Aspirin"));
        assert_eq!(t.drain_events(), vec![TrackerEvent::Changed]);
    }

    #[test]
    fn test_add_rejects_missing_fields() {
        let (mut t, backend, _) = tracker();
        assert!(matches!(t.add("", "", "08:00", true), Err(TrackerError::Validation(_))));
        assert!(matches!(t.add("Aspirin", "", "", true), Err(TrackerError::Validation(_))));
        assert!(matches!(t.add("Aspirin", "", "8 am", true), Err(TrackerError::Validation(_))));
        assert!(t.list().is_empty());
        assert_eq!(backend.writes.get(), 0);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut t, backend, _) = tracker();
        t.add("A", "", "08:00", true).unwrap();
        let before = t.list().to_vec();
        let writes = backend.writes.get();
        t.drain_events();

        t.update("missing", ReminderPatch { name: Some("B".to_string()), ..Default::default() })
            .unwrap();
        assert_eq!(t.list(), before.as_slice());
        assert_eq!(backend.writes.get(), writes);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn test_mark_sets_status_and_notified() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "08:00", true).unwrap().id;
        t.mark(&id, Status::Missed).unwrap();
        let r = t.find(&id).unwrap();
        assert_eq!(r.status, Status::Missed);
        assert!(r.notified);
        assert!(t.mark(&id, Status::Pending).is_err());
    }

    #[test]
    fn test_mark_unknown_id_is_noop() {
        let (mut t, backend, _) = tracker();
        t.add("A", "", "08:00", true).unwrap();
        let writes = backend.writes.get();
        t.drain_events();

        t.mark("missing", Status::Taken).unwrap();
        assert_eq!(t.list()[0].status, Status::Pending);
        assert_eq!(backend.writes.get(), writes);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn test_refresh_sees_other_writer_before_next_alert() {
        let (mut watcher, backend, _) = tracker();
        let a = watcher.add("A", "", "08:00", true).unwrap().id;
        watcher.add("B", "", "09:00", true).unwrap();
        assert_eq!(watcher.scan("08:00"), 1);

        // A second process records the dose and adds a reminder
        let mut other = Tracker::new(ReminderStore::load(Box::new(backend.clone())), Box::new(RecordingChime::default()));
        other.mark(&a, Status::Taken).unwrap();
        let c = other.add("C", "", "08:30", true).unwrap().id;
        watcher.drain_events();

        assert!(watcher.refresh().unwrap());
        assert_eq!(watcher.drain_events(), vec![TrackerEvent::Changed]);
        assert_eq!(watcher.scan("09:00"), 2);
        assert!(!watcher.refresh().unwrap());

        let stored = ReminderStore::load(Box::new(backend));
        assert_eq!(stored.get(&a).unwrap().status, Status::Taken);
        assert!(stored.get(&c).unwrap().notified);
        assert_eq!(stored.list().len(), 3);
    }

    #[test]
    fn test_refresh_keeps_unsaved_changes_while_writes_fail() {
        let (mut t, backend, _) = tracker();
        backend.fail_writes.set(true);
        t.add("A", "", "08:00", true).unwrap();
        assert!(t.refresh().is_err());
        assert_eq!(t.list().len(), 1);

        backend.fail_writes.set(false);
        assert!(!t.refresh().unwrap());
        assert!(!t.has_unsaved_changes());
        assert_eq!(ReminderStore::load(Box::new(backend)).list().len(), 1);
    }

    #[test]
    fn test_edit_resets_cycle() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "08:00", true).unwrap().id;
        t.mark(&id, Status::Taken).unwrap();
        t.edit(&id, "A2", "", "08:00", false).unwrap();
        let r = t.find(&id).unwrap();
        assert_eq!(r.status, Status::Pending);
        assert!(!r.notified);
        assert_eq!(r.name, "A2");
        assert_eq!(r.dosage, None);
        assert!(!r.sound);
    }

    #[test]
    fn test_edit_validates() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "08:00", true).unwrap().id;
        assert!(t.edit(&id, " ", "", "09:00", true).is_err());
        assert_eq!(t.find(&id).unwrap().name, "A");
    }

    #[test]
    fn test_submit_dispatches_on_mode() {
        let (mut t, _, _) = tracker();
        let input = ReminderInput {
            name: "Metformin".to_string(),
            dosage: "500 mg".to_string(),
            time: "19:30".to_string(),
            sound: true,
        };
        t.submit(&FormMode::Create, &input).unwrap();
        let id = t.list()[0].id.clone();

        let edited = ReminderInput { time: "20:00".to_string(), ..input };
        t.submit(&FormMode::Edit(id.clone()), &edited).unwrap();
        assert_eq!(t.list().len(), 1);
        assert_eq!(t.find(&id).unwrap().time, "20:00");
    }

    #[test]
    fn test_handle_due_notifies_once() {
        let (mut t, _, chime) = tracker();
        let id = t.add("A", "1 tab", "08:00", true).unwrap().id;
        t.drain_events();

        assert!(t.handle_due(&id));
        assert!(!t.handle_due(&id));
        let events = t.drain_events();
        let alerts = due_alerts(&events);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, id);
        assert_eq!(alerts[0].dosage.as_deref(), Some("1 tab"));
        assert!(t.find(&id).unwrap().notified);
        assert_eq!(chime.played.borrow().as_slice(), &[Tone::DUE]);
    }

    #[test]
    fn test_handle_due_ignores_non_pending() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "08:00", true).unwrap().id;
        t.mark(&id, Status::Taken).unwrap();
        t.update(&id, ReminderPatch { notified: Some(false), ..Default::default() }).unwrap();
        assert!(!t.handle_due(&id));
        assert!(!t.handle_due("missing"));
    }

    #[test]
    fn test_sound_requires_global_and_reminder_flag() {
        let (t, _, chime) = tracker();
        let mut t = t.with_sound_enabled(false);
        let a = t.add("A", "", "08:00", true).unwrap().id;
        t.handle_due(&a);
        assert!(chime.played.borrow().is_empty());

        t.set_sound_enabled(true);
        let b = t.add("B", "", "08:00", false).unwrap().id;
        t.handle_due(&b);
        assert!(chime.played.borrow().is_empty());

        let c = t.add("C", "", "08:00", true).unwrap().id;
        t.handle_due(&c);
        assert_eq!(chime.played.borrow().len(), 1);
    }

    #[test]
    fn test_broken_chime_still_alerts() {
        let store = ReminderStore::load(Box::new(MemoryBackend::default()));
        let mut t = Tracker::new(store, Box::new(BrokenChime));
        let id = t.add("A", "", "08:00", true).unwrap().id;
        assert!(t.handle_due(&id));
        assert_eq!(due_alerts(&t.drain_events()).len(), 1);
    }

    #[test]
    fn test_scan_alerts_once_then_stays_quiet() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "09:00", true).unwrap().id;
        t.drain_events();

        assert_eq!(t.scan("09:00"), 1);
        let events = t.drain_events();
        let alerts = due_alerts(&events);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, id);

        assert_eq!(t.scan("09:01"), 0);
        assert!(due_alerts(&t.drain_events()).is_empty());
    }

    #[test]
    fn test_scan_handles_each_due_reminder_in_collection_order() {
        let (mut t, _, _) = tracker();
        let late = t.add("Late", "", "11:00", true).unwrap().id;
        t.add("Future", "", "23:00", true).unwrap();
        let early = t.add("Early", "", "07:00", true).unwrap().id;
        t.drain_events();

        assert_eq!(t.scan("12:00"), 2);
        let events = t.drain_events();
        let ids: Vec<_> = due_alerts(&events).iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec![late, early]);
    }

    #[test]
    fn test_past_time_fires_on_first_scan() {
        let (mut t, _, _) = tracker();
        t.add("A", "", "06:00", true).unwrap();
        assert_eq!(t.scan("14:30"), 1);
    }

    #[test]
    fn test_snooze_wraps_midnight_and_rearms() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "23:55", true).unwrap().id;
        t.handle_due(&id);
        t.snooze(&id, 10);
        let r = t.find(&id).unwrap();
        assert_eq!(r.time, "00:05");
        assert!(!r.notified);
        assert_eq!(r.status, Status::Pending);
    }

    #[test]
    fn test_snooze_makes_reminder_due_again_later() {
        let (mut t, _, _) = tracker();
        let id = t.add("A", "", "09:00", true).unwrap().id;
        assert_eq!(t.scan("09:00"), 1);
        t.snooze_default(&id);
        assert_eq!(t.find(&id).unwrap().time, "09:10");
        assert_eq!(t.scan("09:05"), 0);
        assert_eq!(t.scan("09:10"), 1);
    }

    #[test]
    fn test_delete_and_clear_all() {
        let (mut t, backend, _) = tracker();
        let a = t.add("A", "", "08:00", true).unwrap().id;
        t.add("B", "", "09:00", true).unwrap();
        t.delete(&a);
        t.delete(&a);
        assert_eq!(t.list().len(), 1);
        t.clear_all();
        assert!(t.list().is_empty());
        assert_eq!(backend.stored(REMINDERS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_sorted_by_time_not_insertion() {
        let (mut t, _, _) = tracker();
        t.add("C", "", "21:00", true).unwrap();
        t.add("A", "", "07:30", true).unwrap();
        t.add("B", "", "12:00", true).unwrap();
        let names: Vec<_> = t.sorted().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_write_failure_keeps_state_and_retries() {
        let (mut t, backend, _) = tracker();
        backend.fail_writes.set(true);
        let id = t.add("A", "", "08:00", true).unwrap().id;
        assert!(t.has_unsaved_changes());
        assert!(t.find(&id).is_some());
        let events = t.drain_events();
        assert!(events.iter().any(|e| matches!(e, TrackerEvent::PersistFailed(_))));

        // Scans keep working while the backend is down
        assert_eq!(t.scan("08:00"), 1);
        assert!(t.flush().is_err());

        backend.fail_writes.set(false);
        t.flush().unwrap();
        assert!(!t.has_unsaved_changes());
        assert!(backend.stored(REMINDERS_KEY).unwrap().contains(&id));
    }

    #[test]
    fn test_resolve_by_prefix() {
        let (mut t, _, _) = tracker();
        let r = t.add("A", "", "08:00", true).unwrap();
        assert_eq!(t.resolve(&r.id[..6]).unwrap().id, r.id);
        assert_eq!(t.resolve(&r.id).unwrap().id, r.id);
        assert!(t.resolve("zzzz").is_err());
        assert!(t.resolve("").is_err());
    }

    #[test]
    fn test_replace_all_rejects_duplicates() {
        let (mut t, _, _) = tracker();
        let a = Reminder::new("A".to_string(), None, "08:00".to_string(), true);
        let dup = a.clone();
        assert!(t.replace_all(vec![a.clone(), dup]).is_err());
        assert!(t.list().is_empty());

        t.replace_all(vec![a.clone()]).unwrap();
        assert_eq!(t.list(), &[a]);
    }
}
