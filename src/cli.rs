use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::lifecycle::{Tracker, TrackerError, TrackerEvent};
use crate::models::{Reminder, Status};
use crate::scheduler::{Scheduler, SystemClock};
use crate::store::{StoreError, decode_document};

#[derive(Parser)]
#[command(name = "meditrak")]
#[command(about = "Medication reminders with due alerts, in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Add a daily reminder
    Add {
        /// Medicine name
        name: String,
        /// Time of day (HH:MM, 24-hour)
        #[arg(long)]
        time: String,
        /// Dosage description
        #[arg(long)]
        dosage: Option<String>,
        /// Never chime for this reminder
        #[arg(long)]
        no_sound: bool,
    },
    /// List reminders by time
    List {
        /// Print the stored JSON document instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Change a reminder; it becomes pending and will alert again
    Edit {
        /// Reminder id or unique id prefix
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        dosage: Option<String>,
        #[arg(long)]
        sound: Option<bool>,
    },
    /// Delete a reminder
    Delete {
        id: String,
    },
    /// Mark a dose as taken
    Take {
        id: String,
    },
    /// Mark a dose as missed
    Miss {
        id: String,
    },
    /// Push a reminder later and re-arm its alert
    Snooze {
        id: String,
        /// Minutes to add (defaults to the configured snooze)
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Delete every reminder
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Run the due checker without the TUI and print alerts
    Watch,
    /// Write the reminder document to a file or stdout
    Export {
        path: Option<PathBuf>,
    },
    /// Replace all reminders with a previously exported document
    Import {
        path: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("Failed to read document: {0}")]
    Document(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Refusing to clear all reminders without --yes")]
    NotConfirmed,
}

/// Handle the add command
pub fn handle_add(
    name: String,
    time: String,
    dosage: Option<String>,
    no_sound: bool,
    tracker: &mut Tracker,
) -> Result<(), CliError> {
    let reminder = tracker.add(&name, dosage.as_deref().unwrap_or(""), &time, !no_sound)?;
    tracker.flush()?;
    println!(
        "Reminder created: {} at {} (ID: {})",
        reminder.name,
        reminder.time,
        reminder.short_id()
    );
    Ok(())
}

/// Handle the list command
pub fn handle_list(json: bool, tracker: &Tracker) -> Result<(), CliError> {
    if json {
        println!("{}", tracker.export_document()?);
        return Ok(());
    }
    let sorted = tracker.sorted();
    if sorted.is_empty() {
        println!("No reminders yet. Add one with `meditrak add <name> --time HH:MM`.");
        return Ok(());
    }
    for reminder in sorted {
        println!("{}", format_row(reminder));
    }
    Ok(())
}

pub fn format_row(reminder: &Reminder) -> String {
    let bell = if reminder.sound { "♪" } else { " " };
    format!(
        "{:<8}  {}  {:<7} {} {}  ({})",
        reminder.short_id(),
        reminder.time,
        reminder.status.label(),
        bell,
        reminder.name,
        reminder.dosage_or_dash()
    )
}

/// Handle the edit command. Omitted fields keep their current values.
pub fn handle_edit(
    id: String,
    name: Option<String>,
    time: Option<String>,
    dosage: Option<String>,
    sound: Option<bool>,
    tracker: &mut Tracker,
) -> Result<(), CliError> {
    let current = tracker.resolve(&id)?.clone();
    let reminder_id = current.id.clone();
    let short_id = current.short_id().to_string();
    let name = name.unwrap_or(current.name);
    let time = time.unwrap_or(current.time);
    let dosage = dosage.or(current.dosage).unwrap_or_default();
    let sound = sound.unwrap_or(current.sound);

    tracker.edit(&reminder_id, &name, &dosage, &time, sound)?;
    tracker.flush()?;
    println!("Reminder updated (ID: {})", short_id);
    Ok(())
}

pub fn handle_delete(id: String, tracker: &mut Tracker) -> Result<(), CliError> {
    let reminder = tracker.resolve(&id)?.clone();
    tracker.delete(&reminder.id);
    tracker.flush()?;
    println!("Deleted reminder \"{}\" at {}", reminder.name, reminder.time);
    Ok(())
}

pub fn handle_mark(id: String, status: Status, tracker: &mut Tracker) -> Result<(), CliError> {
    let reminder = tracker.resolve(&id)?.clone();
    tracker.mark(&reminder.id, status)?;
    tracker.flush()?;
    println!("Marked \"{}\" as {}", reminder.name, status.label().to_lowercase());
    Ok(())
}

pub fn handle_snooze(id: String, minutes: Option<u32>, tracker: &mut Tracker) -> Result<(), CliError> {
    let reminder_id = tracker.resolve(&id)?.id.clone();
    let minutes = minutes.unwrap_or(tracker.snooze_minutes());
    tracker.snooze(&reminder_id, minutes);
    tracker.flush()?;
    if let Some(reminder) = tracker.find(&reminder_id) {
        println!("Snoozed \"{}\" to {}", reminder.name, reminder.time);
    }
    Ok(())
}

pub fn handle_clear(yes: bool, tracker: &mut Tracker) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::NotConfirmed);
    }
    let count = tracker.list().len();
    tracker.clear_all();
    tracker.flush()?;
    println!("Cleared {} reminder(s)", count);
    Ok(())
}

pub fn handle_export(path: Option<PathBuf>, tracker: &Tracker) -> Result<(), CliError> {
    let document = tracker.export_document()?;
    match path {
        Some(path) => {
            fs::write(&path, document)?;
            println!("Exported {} reminder(s) to {}", tracker.list().len(), path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

pub fn handle_import(path: PathBuf, tracker: &mut Tracker) -> Result<(), CliError> {
    let raw = fs::read_to_string(&path)?;
    let reminders = decode_document(&raw)?;
    let count = reminders.len();
    tracker.replace_all(reminders)?;
    tracker.flush()?;
    println!("Imported {} reminder(s) from {}", count, path.display());
    Ok(())
}

/// Run scans on the scheduler's ticks until the process is interrupted
pub fn handle_watch(interval: Duration, tracker: &mut Tracker) -> Result<(), CliError> {
    let (handle, ticks) = Scheduler::new(SystemClock).with_interval(interval).start()?;
    println!("Watching {} reminder(s). Press Ctrl+C to stop.", tracker.list().len());

    for tick in ticks.iter() {
        // Pick up take/add/edit commands run from other terminals
        if let Err(e) = tracker.refresh() {
            tracing::warn!(error = %e, "could not reload reminders");
            eprintln!("Warning: could not reload reminders: {}", e);
        }
        tracker.scan(&tick.hhmm());
        for event in tracker.drain_events() {
            print_event(&event);
        }
        std::io::stdout().flush()?;
    }

    handle.stop();
    Ok(())
}

fn print_event(event: &TrackerEvent) {
    match event {
        TrackerEvent::Due(alert) => {
            let dosage = alert.dosage.as_deref().map(|d| format!(" - {}", d)).unwrap_or_default();
            println!(
                "[{}] Time to take {}{} (scheduled at {}). Record it with `meditrak take {}`.",
                chrono::Local::now().format("%H:%M"),
                alert.name,
                dosage,
                alert.time,
                &alert.id[..alert.id.len().min(8)]
            );
        }
        TrackerEvent::PersistFailed(message) => eprintln!("Warning: could not save reminders: {}", message),
        TrackerEvent::Changed => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chime::SilentChime;
    use crate::store::ReminderStore;
    use crate::store::testing::MemoryBackend;

    fn tracker() -> Tracker {
        Tracker::new(ReminderStore::load(Box::new(MemoryBackend::default())), Box::new(SilentChime))
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from(["meditrak", "add", "Aspirin", "--time", "08:00", "--dosage", "100mg"]).unwrap();
        match cli.command {
            Some(Commands::Add { name, time, dosage, no_sound }) => {
                assert_eq!(name, "Aspirin");
                assert_eq!(time, "08:00");
                assert_eq!(dosage.as_deref(), Some("100mg"));
                assert!(!no_sound);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_cli_without_command_is_none() {
        let cli = Cli::try_parse_from(["meditrak", "--dev"]).unwrap();
        assert!(cli.dev);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_edit_keeps_omitted_fields_and_rearms() {
        let mut t = tracker();
        let r = t.add("Aspirin", "100mg", "08:00", false).unwrap();
        t.mark(&r.id, Status::Taken).unwrap();

        handle_edit(r.short_id().to_string(), None, Some("09:15".to_string()), None, None, &mut t).unwrap();
        let edited = t.find(&r.id).unwrap();
        assert_eq!(edited.name, "Aspirin");
        assert_eq!(edited.dosage.as_deref(), Some("100mg"));
        assert_eq!(edited.time, "09:15");
        assert!(!edited.sound);
        assert_eq!(edited.status, Status::Pending);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut t = tracker();
        t.add("A", "", "08:00", true).unwrap();
        assert!(matches!(handle_clear(false, &mut t), Err(CliError::NotConfirmed)));
        assert_eq!(t.list().len(), 1);
        handle_clear(true, &mut t).unwrap();
        assert!(t.list().is_empty());
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");
        let mut source = tracker();
        source.add("A", "", "08:00", true).unwrap();
        source.add("B", "1 tab", "20:00", false).unwrap();
        handle_export(Some(path.clone()), &source).unwrap();

        let mut target = tracker();
        handle_import(path, &mut target).unwrap();
        assert_eq!(target.list(), source.list());
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let mut t = tracker();
        assert!(matches!(handle_delete("abc".to_string(), &mut t), Err(CliError::Tracker(_))));
    }

    #[test]
    fn test_format_row() {
        let r = Reminder::new("Aspirin".to_string(), None, "08:00".to_string(), true);
        let row = format_row(&r);
        assert!(row.starts_with(r.short_id()));
        assert!(row.contains("08:00"));
        assert!(row.contains("Pending"));
        assert!(row.contains("Aspirin"));
    }
}
