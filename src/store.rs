//! In-memory journal entries and tasks, kept in sync with a key-value slot.
//!
//! Every operation that changes the entries collection re-serializes the whole
//! collection into storage before returning. Storage failures never abort an
//! operation: they are logged and kept as a warning the caller can pick up
//! with [`JournalStore::take_warning`].

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::clock::Clock;
use crate::models::{JournalEntry, Task};
use crate::storage::KeyValueStore;
use crate::utils::is_blank;

pub const DEFAULT_ENTRIES_KEY: &str = "journalEntries";
pub const DEFAULT_TASKS_KEY: &str = "journalTasks";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Knobs for a [`JournalStore`], normally filled from the config file
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub entries_key: String,
    pub tasks_key: String,
    pub persist_tasks: bool,
    pub date_format: String,
    pub datetime_format: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            entries_key: DEFAULT_ENTRIES_KEY.to_string(),
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            persist_tasks: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

/// Hands out creation-ordered ids based on the millisecond clock.
///
/// Two ids requested within the same millisecond still differ: the second one
/// is bumped past the first.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Make sure ids never collide with ones already handed out
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    /// None once an id of `i64::MAX` has been seen; there is nothing left above it
    pub fn next(&mut self, now_millis: i64) -> Option<i64> {
        let id = now_millis.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}

pub struct JournalStore<S: KeyValueStore, C: Clock> {
    storage: S,
    clock: C,
    options: StoreOptions,
    entries: Vec<JournalEntry>,
    tasks: Vec<Task>,
    ids: IdGenerator,
    warning: Option<String>,
}

impl<S: KeyValueStore, C: Clock> JournalStore<S, C> {
    /// Build a store and load whatever the storage already holds
    pub fn new(storage: S, clock: C, options: StoreOptions) -> Self {
        let mut store = Self {
            storage,
            clock,
            options,
            entries: Vec::new(),
            tasks: Vec::new(),
            ids: IdGenerator::default(),
            warning: None,
        };
        store.initialize();
        store
    }

    /// Load the persisted snapshot. Missing or unreadable data leaves the
    /// collection empty.
    pub fn initialize(&mut self) {
        let entries_key = self.options.entries_key.clone();
        self.entries = self.load_slot(&entries_key);

        self.tasks = if self.options.persist_tasks {
            let tasks_key = self.options.tasks_key.clone();
            self.load_slot(&tasks_key)
        } else {
            Vec::new()
        };

        for id in self.entries.iter().map(|e| e.id).chain(self.tasks.iter().map(|t| t.id)) {
            self.ids.observe(id);
        }

        debug!(
            "store loaded entries={} tasks={}",
            self.entries.len(),
            self.tasks.len()
        );
    }

    fn load_slot<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read slot {}: {}", key, e);
                self.warning = Some(format!("Could not read saved data: {}", e));
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("ignoring malformed data in slot {}: {}", key, e);
                self.warning = Some(format!("Saved data in '{}' was unreadable and has been ignored", key));
                Vec::new()
            }
        }
    }

    fn save_slot<T: Serialize>(storage: &mut S, key: &str, items: &[T]) -> Result<(), String> {
        let json = serde_json::to_string(items).map_err(|e| e.to_string())?;
        storage.set(key, &json).map_err(|e| e.to_string())
    }

    fn persist_entries(&mut self) {
        if let Err(e) = Self::save_slot(&mut self.storage, &self.options.entries_key, &self.entries) {
            warn!("failed to save entries: {}", e);
            self.warning = Some(format!("Failed to save entries: {}", e));
        }
    }

    fn persist_tasks(&mut self) {
        if !self.options.persist_tasks {
            return;
        }
        if let Err(e) = Self::save_slot(&mut self.storage, &self.options.tasks_key, &self.tasks) {
            warn!("failed to save tasks: {}", e);
            self.warning = Some(format!("Failed to save tasks: {}", e));
        }
    }

    fn next_id(&mut self) -> Option<i64> {
        let now = self.clock.now().timestamp_millis();
        let id = self.ids.next(now);
        if id.is_none() {
            warn!("no ids left above the largest stored id");
            self.warning = Some("Cannot add: saved data already uses the largest possible id".to_string());
        }
        id
    }

    /// Append a new entry dated today. Blank title or text is ignored.
    pub fn add_entry(&mut self, title: &str, text: &str) -> Option<i64> {
        if is_blank(title) || is_blank(text) {
            return None;
        }

        let id = self.next_id()?;
        let date = self.clock.now().format(&self.options.date_format).to_string();
        self.entries.push(JournalEntry::new(id, title.to_string(), text.to_string(), date));
        self.persist_entries();

        debug!("entry added id={}", id);
        Some(id)
    }

    /// Returns whether an entry was removed
    pub fn delete_entry(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        self.persist_entries();

        debug!("entry delete id={} removed={}", id, removed);
        removed
    }

    /// Append a new incomplete task. Blank text is ignored.
    pub fn add_task(&mut self, task: &str) -> Option<i64> {
        if is_blank(task) {
            return None;
        }

        let id = self.next_id()?;
        self.tasks.push(Task::new(id, task.to_string()));
        self.persist_tasks();

        debug!("task added id={}", id);
        Some(id)
    }

    pub fn delete_task(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        self.persist_tasks();

        debug!("task delete id={} removed={}", id, removed);
        removed
    }

    /// Flip a task's completion flag and return the new value
    pub fn toggle_task(&mut self, id: i64) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.toggle();
        let completed = task.completed;
        self.persist_tasks();

        debug!("task toggled id={} completed={}", id, completed);
        Some(completed)
    }

    /// Current wall-clock time formatted for display
    pub fn tick(&self) -> String {
        self.clock.now().format(&self.options.datetime_format).to_string()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn entry(&self, id: i64) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Most recent non-fatal storage problem, cleared on read
    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage back, e.g. to reopen a store on the same slots
    pub fn into_storage(self) -> S {
        self.storage
    }
}
