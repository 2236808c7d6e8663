use chrono::{Local, TimeZone};
use journal::cli::{run_command, Commands};
use journal::{FixedClock, JournalStore, MemoryStorage, SqliteStorage, StoreOptions};
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock(Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
}

fn memory_store() -> JournalStore<MemoryStorage, FixedClock> {
    JournalStore::new(MemoryStorage::new(), clock(), StoreOptions::default())
}

#[test]
fn first_entry_is_dated_today() {
    let mut store = memory_store();
    store.add_entry("Day 1", "It rained.").unwrap();

    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Day 1");
    assert_eq!(entries[0].text, "It rained.");
    assert_eq!(entries[0].date, "2026-10-18");
}

#[test]
fn blank_title_adds_nothing() {
    let mut store = memory_store();
    assert!(store.add_entry("", "text").is_none());
    assert!(store.entries().is_empty());
}

#[test]
fn toggling_twice_restores_task() {
    let mut store = memory_store();
    let id = store.add_task("Buy milk").unwrap();

    assert_eq!(store.toggle_task(id), Some(true));
    assert!(store.task(id).unwrap().completed);
    assert_eq!(store.toggle_task(id), Some(false));

    let task = store.task(id).unwrap();
    assert!(!task.completed);
    assert_eq!(task.task, "Buy milk");
}

#[test]
fn deleting_first_task_keeps_second() {
    let mut store = memory_store();
    let first = store.add_task("first").unwrap();
    let second = store.add_task("second").unwrap();

    assert!(store.delete_task(first));
    let tasks = store.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, second);
    assert_eq!(tasks[0].task, "second");
}

#[test]
fn entries_survive_reopening_sqlite_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("journal.db");

    let before = {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut store = JournalStore::new(storage, clock(), StoreOptions::default());
        store.add_entry("Day 1", "It rained.").unwrap();
        store.add_entry("Day 2", "Sunny.").unwrap();
        let gone = store.add_entry("Day 3", "Deleted later.").unwrap();
        store.delete_entry(gone);
        store.add_task("Buy milk").unwrap();
        (store.entries().to_vec(), store.tasks().to_vec())
    };

    let storage = SqliteStorage::open(&path).unwrap();
    let reloaded = JournalStore::new(storage, clock(), StoreOptions::default());
    assert_eq!(reloaded.entries(), before.0.as_slice());
    assert_eq!(reloaded.tasks(), before.1.as_slice());
}

#[test]
fn tasks_stay_in_memory_when_not_persisted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("journal.db");
    let options = StoreOptions {
        persist_tasks: false,
        ..StoreOptions::default()
    };

    {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut store = JournalStore::new(storage, clock(), options.clone());
        store.add_entry("kept", "yes").unwrap();
        store.add_task("forgotten").unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    let reloaded = JournalStore::new(storage, clock(), options);
    assert_eq!(reloaded.entries().len(), 1);
    assert!(reloaded.tasks().is_empty());
}

#[test]
fn commands_share_one_sqlite_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("journal.db");

    let run = |command: Commands| -> String {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut store = JournalStore::new(storage, clock(), StoreOptions::default());
        let mut out = Vec::new();
        run_command(&command, &mut store, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    };

    run(Commands::AddEntry {
        title: "Day 1".to_string(),
        text: "It rained.".to_string(),
    });
    run(Commands::AddTask {
        task: "Buy milk".to_string(),
    });

    let entries = run(Commands::Entries);
    assert!(entries.contains("Day 1"));
    assert!(entries.contains("It rained."));
    let tasks = run(Commands::Tasks);
    assert!(tasks.contains("Buy milk"));
}
