//! Due detection.
//!
//! A reminder is due when it is pending, has not been alerted in its current
//! cycle, and its scheduled time is at or before the current time of day.
//! Anything earlier than `now` counts, not only an exact match, so a reminder
//! created for a time that already passed fires on the next scan.

use crate::models::{Reminder, Status};

/// `now` must be a zero-padded `HH:MM`, which makes string order equal time order.
pub fn is_due(reminder: &Reminder, now: &str) -> bool {
    reminder.status == Status::Pending && !reminder.notified && reminder.time.as_str() <= now
}

/// Ids of every due reminder, in collection order
pub fn due_ids(reminders: &[Reminder], now: &str) -> Vec<String> {
    reminders
        .iter()
        .filter(|r| is_due(r, now))
        .map(|r| r.id.clone())
        .collect()
}

/// Pending and scheduled for exactly this minute; used for highlighting
pub fn is_due_now(reminder: &Reminder, now: &str) -> bool {
    reminder.status == Status::Pending && reminder.time == now
}
