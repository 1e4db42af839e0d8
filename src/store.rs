use std::collections::HashSet;
use thiserror::Error;

use crate::database::{DatabaseError, KeyValueStore};
use crate::models::Reminder;

/// Storage key holding the whole reminder collection
pub const REMINDERS_KEY: &str = "meditrak_reminders_v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Malformed reminder document: {0}")]
    Document(#[from] serde_json::Error),
}

/// In-memory reminder collection mirrored to a key/value backend.
///
/// Every save serializes the full collection and overwrites the stored
/// document; there is no partial persistence.
pub struct ReminderStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    reminders: Vec<Reminder>,
    /// Backend revision the in-memory collection was read from or last wrote
    revision: Option<String>,
}

impl ReminderStore {
    /// Read the persisted collection. Missing or unreadable data yields an
    /// empty collection; the failure is logged and never returned.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        Self::load_with_key(backend, REMINDERS_KEY)
    }

    pub fn load_with_key(backend: Box<dyn KeyValueStore>, key: &str) -> Self {
        // Read the revision first; a write racing the load then shows up as a change
        let revision = backend.updated_at(key).unwrap_or_else(|e| {
            tracing::warn!(error = %e, key, "failed to read reminder revision");
            None
        });
        let reminders = match read_collection(backend.as_ref(), key) {
            Ok(reminders) => reminders,
            Err(e) => {
                tracing::error!(error = %e, key, "failed to load reminders, starting empty");
                Vec::new()
            }
        };
        tracing::info!(count = reminders.len(), "reminders loaded");

        Self {
            backend,
            key: key.to_string(),
            reminders,
            revision,
        }
    }

    /// Write the full collection to the backend
    pub fn save(&mut self) -> Result<(), StoreError> {
        let document = self.to_document()?;
        self.revision = Some(self.backend.put(&self.key, &document)?);
        tracing::debug!(count = self.reminders.len(), "reminders saved");
        Ok(())
    }

    /// Re-read the collection if another writer changed it since the last
    /// load or save. Returns whether the in-memory collection was replaced.
    /// On error the in-memory collection is left as it was.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        let current = self.backend.updated_at(&self.key)?;
        if current == self.revision {
            return Ok(false);
        }
        self.reminders = read_collection(self.backend.as_ref(), &self.key)?;
        self.revision = current;
        tracing::info!(count = self.reminders.len(), "reminders reloaded after an outside change");
        Ok(true)
    }

    /// Read-only view in collection (insertion) order
    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn get(&self, id: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Reminder> {
        self.reminders.iter_mut().find(|r| r.id == id)
    }

    pub(crate) fn push(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    /// Remove by id, returning whether anything was removed
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        self.reminders.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.reminders.clear();
    }

    pub(crate) fn replace(&mut self, reminders: Vec<Reminder>) {
        self.reminders = reminders;
    }

    /// The stored document form of the collection (a JSON array)
    pub fn to_document(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.reminders)?)
    }
}

fn read_collection(backend: &dyn KeyValueStore, key: &str) -> Result<Vec<Reminder>, StoreError> {
    match backend.get(key)? {
        Some(raw) => decode_document(&raw),
        None => Ok(Vec::new()),
    }
}

/// Parse a stored document. Duplicate ids are dropped, first occurrence wins.
pub fn decode_document(raw: &str) -> Result<Vec<Reminder>, StoreError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Vec<Reminder> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let mut reminders = Vec::with_capacity(parsed.len());
    for reminder in parsed {
        if seen.insert(reminder.id.clone()) {
            reminders.push(reminder);
        } else {
            tracing::warn!(id = %reminder.id, "dropping reminder with duplicate id");
        }
    }
    Ok(reminders)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryBackend;
    use super::*;
    use crate::database::Database;
    use crate::models::Status;

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = ReminderStore::load(Box::new(MemoryBackend::default()));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_load_corrupt_document_is_empty() {
        let backend = MemoryBackend::with_value(REMINDERS_KEY, "{not json");
        let store = ReminderStore::load(Box::new(backend.clone()));
        assert!(store.list().is_empty());
        // The corrupt value is left alone until the next save
        assert_eq!(backend.stored(REMINDERS_KEY).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let backend = MemoryBackend::default();
        let mut store = ReminderStore::load(Box::new(backend.clone()));
        let mut taken = Reminder::new("B".to_string(), Some("2 pills".to_string()), "21:00".to_string(), false);
        taken.status = Status::Taken;
        taken.notified = true;
        store.push(Reminder::new("A".to_string(), None, "08:00".to_string(), true));
        store.push(taken);
        store.save().unwrap();

        let reloaded = ReminderStore::load(Box::new(backend));
        assert_eq!(reloaded.list(), store.list());
    }

    #[test]
    fn test_roundtrip_through_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");
        let original = {
            let mut store = ReminderStore::load(Box::new(Database::open(&path).unwrap()));
            store.push(Reminder::new("A".to_string(), None, "06:15".to_string(), true));
            store.save().unwrap();
            store.list().to_vec()
        };
        let store = ReminderStore::load(Box::new(Database::open(&path).unwrap()));
        assert_eq!(store.list(), original.as_slice());
    }

    #[test]
    fn test_decode_drops_duplicate_ids() {
        let raw = r#"[
            {"id":"a","name":"First","time":"08:00","status":"pending"},
            {"id":"a","name":"Second","time":"09:00","status":"pending"},
            {"id":"b","name":"Third","time":"10:00","status":"taken","notified":true}
        ]"#;
        let reminders = decode_document(raw).unwrap();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].name, "First");
        assert_eq!(reminders[1].id, "b");
    }

    #[test]
    fn test_reload_picks_up_outside_write() {
        let backend = MemoryBackend::default();
        let mut watcher = ReminderStore::load(Box::new(backend.clone()));
        watcher.push(Reminder::new("A".to_string(), None, "08:00".to_string(), true));
        watcher.save().unwrap();
        assert!(!watcher.reload().unwrap());

        let mut other = ReminderStore::load(Box::new(backend.clone()));
        other.push(Reminder::new("B".to_string(), None, "09:00".to_string(), true));
        other.save().unwrap();

        assert!(watcher.reload().unwrap());
        let names: Vec<&str> = watcher.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert!(!watcher.reload().unwrap());
    }

    #[test]
    fn test_reload_keeps_memory_on_corrupt_document() {
        let backend = MemoryBackend::default();
        let mut store = ReminderStore::load(Box::new(backend.clone()));
        store.push(Reminder::new("A".to_string(), None, "08:00".to_string(), true));
        store.save().unwrap();

        backend.put(REMINDERS_KEY, "{not json").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut store = ReminderStore::load(Box::new(MemoryBackend::default()));
        let r = Reminder::new("A".to_string(), None, "08:00".to_string(), true);
        let id = r.id.clone();
        store.push(r);
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
    }
}
