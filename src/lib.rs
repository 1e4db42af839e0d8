pub mod chime;
pub mod cli;
pub mod config;
pub mod database;
pub mod due;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::{Database, KeyValueStore};
pub use lifecycle::{DueAlert, Tracker, TrackerError, TrackerEvent};
pub use models::{FormMode, Reminder, ReminderInput, ReminderPatch, Status};
pub use store::ReminderStore;
pub use utils::Profile;
