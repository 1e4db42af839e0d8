use meditrak::chime::SilentChime;
use meditrak::store::REMINDERS_KEY;
use meditrak::{Database, KeyValueStore, ReminderStore, Status, Tracker};

fn open_tracker(path: &std::path::Path) -> Tracker {
    let db = Database::open(path).unwrap();
    Tracker::new(ReminderStore::load(Box::new(db)), Box::new(SilentChime))
}

#[test]
fn test_reminders_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("meditrak.db");

    let id = {
        let mut tracker = open_tracker(&path);
        let aspirin = tracker.add("Aspirin", "100mg", "08:00", true).unwrap();
        tracker.add("Vitamin D", "", "20:00", false).unwrap();
        tracker.scan("08:30");
        tracker.flush().unwrap();
        aspirin.id
    };

    let tracker = open_tracker(&path);
    assert_eq!(tracker.list().len(), 2);
    let aspirin = tracker.find(&id).unwrap();
    assert!(aspirin.notified);
    assert_eq!(aspirin.status, Status::Pending);
    assert_eq!(aspirin.dosage.as_deref(), Some("100mg"));
}

#[test]
fn test_notified_reminder_is_not_alerted_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meditrak.db");

    {
        let mut tracker = open_tracker(&path);
        tracker.add("Aspirin", "", "08:00", true).unwrap();
        assert_eq!(tracker.scan("08:00"), 1);
    }

    let mut tracker = open_tracker(&path);
    assert_eq!(tracker.scan("09:00"), 0);
}

#[test]
fn test_corrupt_document_loads_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meditrak.db");
    Database::open(&path).unwrap().put(REMINDERS_KEY, "{not json").unwrap();

    let mut tracker = open_tracker(&path);
    assert!(tracker.list().is_empty());
    tracker.add("Fresh", "", "07:00", true).unwrap();

    let raw = Database::open(&path).unwrap().get(REMINDERS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["name"], "Fresh");
    assert_eq!(value[0]["status"], "pending");
    assert!(value[0].get("createdAt").is_some());
}

#[test]
fn test_clear_all_persists_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meditrak.db");

    {
        let mut tracker = open_tracker(&path);
        tracker.add("A", "", "08:00", true).unwrap();
        tracker.clear_all();
    }

    let raw = Database::open(&path).unwrap().get(REMINDERS_KEY).unwrap().unwrap();
    assert_eq!(raw.trim(), "[]");
    assert!(open_tracker(&path).list().is_empty());
}

#[test]
fn test_watcher_keeps_changes_made_by_other_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meditrak.db");

    let mut watcher = open_tracker(&path);
    let a = watcher.add("A", "", "08:00", true).unwrap().id;
    watcher.add("B", "", "09:00", true).unwrap();
    assert_eq!(watcher.scan("08:00"), 1);

    // `meditrak take` and `meditrak add` from another terminal
    let c = {
        let mut cli = open_tracker(&path);
        cli.mark(&a, Status::Taken).unwrap();
        let c = cli.add("C", "", "08:30", true).unwrap().id;
        cli.flush().unwrap();
        c
    };

    assert!(watcher.refresh().unwrap());
    assert_eq!(watcher.scan("09:00"), 2);

    let stored = open_tracker(&path);
    assert_eq!(stored.find(&a).unwrap().status, Status::Taken);
    assert!(stored.find(&c).unwrap().notified);
    let mut names: Vec<&str> = stored.list().iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["A", "B", "C"]);
}
