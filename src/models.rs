use serde::{Deserialize, Serialize};

/// A journal record. Never changed after creation, only removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: String, // display snapshot taken at creation
}

/// A checklist item. Only `completed` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

impl JournalEntry {
    pub fn new(id: i64, title: String, text: String, date: String) -> Self {
        Self { id, title, text, date }
    }
}

impl Task {
    pub fn new(id: i64, task: String) -> Self {
        Self {
            id,
            task,
            completed: false,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_storage_field_names() {
        let entry = JournalEntry::new(7, "Day 1".to_string(), "It rained.".to_string(), "2026-10-18".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Day 1");
        assert_eq!(json["text"], "It rained.");
        assert_eq!(json["date"], "2026-10-18");
    }

    #[test]
    fn entries_round_trip_through_json() {
        let entries = vec![
            JournalEntry::new(1, "a".to_string(), "b".to_string(), "1/2/2024".to_string()),
            JournalEntry::new(2, "c".to_string(), "multi\nline".to_string(), "1/3/2024".to_string()),
        ];
        let json = serde_json::to_string(&entries).unwrap();
        let back: Vec<JournalEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn task_defaults_to_incomplete_and_toggles() {
        let mut task = Task::new(3, "Buy milk".to_string());
        assert!(!task.completed);
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
        assert_eq!(task.id, 3);
        assert_eq!(task.task, "Buy milk");
    }

    #[test]
    fn task_without_completed_field_parses_as_incomplete() {
        let task: Task = serde_json::from_str(r#"{"id":1,"task":"x"}"#).unwrap();
        assert!(!task.completed);
    }
}
