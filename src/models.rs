use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a reminder stands in its current daily cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Taken,
    Missed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Taken => "taken",
            Status::Missed => "missed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Taken => "Taken",
            Status::Missed => "Missed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "taken" => Ok(Status::Taken),
            "missed" => Ok(Status::Missed),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

/// A scheduled medication dose. Field names follow the stored JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub dosage: Option<String>,
    pub time: String, // HH:MM, 24-hour, daily
    #[serde(default)]
    pub sound: bool,
    pub status: Status,
    #[serde(default)]
    pub notified: bool,
    #[serde(default)]
    pub created_at: String,
}

impl Reminder {
    /// Build a fresh pending reminder with a new id. Inputs are expected to be validated.
    pub fn new(name: String, dosage: Option<String>, time: String, sound: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name,
            dosage,
            time,
            sound,
            status: Status::Pending,
            notified: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(8);
        self.id.get(..end).unwrap_or(&self.id)
    }

    pub fn dosage_or_dash(&self) -> &str {
        self.dosage.as_deref().unwrap_or("-")
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Partial update merged into an existing reminder. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub name: Option<String>,
    pub dosage: Option<Option<String>>,
    pub time: Option<String>,
    pub sound: Option<bool>,
    pub status: Option<Status>,
    pub notified: Option<bool>,
}

impl ReminderPatch {
    pub fn apply(&self, reminder: &mut Reminder) {
        if let Some(ref name) = self.name {
            reminder.name = name.clone();
        }
        if let Some(ref dosage) = self.dosage {
            reminder.dosage = dosage.clone();
        }
        if let Some(ref time) = self.time {
            reminder.time = time.clone();
        }
        if let Some(sound) = self.sound {
            reminder.sound = sound;
        }
        if let Some(status) = self.status {
            reminder.status = status;
        }
        if let Some(notified) = self.notified {
            reminder.notified = notified;
        }
    }
}

/// Raw values collected by a form or the command line, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderInput {
    pub name: String,
    pub dosage: String,
    pub time: String,
    pub sound: bool,
}

/// What a form submission should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}
