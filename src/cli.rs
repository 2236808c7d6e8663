use clap::{Parser, Subcommand};
use std::io::Write;
use thiserror::Error;

use crate::clock::Clock;
use crate::storage::KeyValueStore;
use crate::store::JournalStore;

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Journal entries and a todo checklist - a lightweight terminal notebook")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/storage)
    #[arg(long)]
    pub dev: bool,

    /// Keep everything in memory; nothing is read from or written to disk storage
    #[arg(long)]
    pub ephemeral: bool,

    /// Override the configured log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Add a journal entry dated today
    AddEntry {
        /// Entry title
        title: String,
        /// Entry body
        text: String,
    },
    /// Delete a journal entry by ID
    DeleteEntry {
        id: i64,
    },
    /// List journal entries in the order they were written
    Entries,
    /// Add a task to the checklist
    AddTask {
        /// Task text
        task: String,
    },
    /// Delete a task by ID
    DeleteTask {
        id: i64,
    },
    /// Flip a task between done and not done
    ToggleTask {
        id: i64,
    },
    /// List tasks
    Tasks,
    /// Print the current date and time
    Now,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to write output: {0}")]
    OutputError(#[from] std::io::Error),
    #[error("No {kind} with ID {id}")]
    NotFound { kind: &'static str, id: i64 },
}

/// Run a one-shot command against the store
pub fn run_command<S: KeyValueStore, C: Clock>(
    command: &Commands,
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::Tui => Ok(()),
        Commands::AddEntry { title, text } => handle_add_entry(title, text, store, out),
        Commands::DeleteEntry { id } => handle_delete_entry(*id, store, out),
        Commands::Entries => handle_list_entries(store, out),
        Commands::AddTask { task } => handle_add_task(task, store, out),
        Commands::DeleteTask { id } => handle_delete_task(*id, store, out),
        Commands::ToggleTask { id } => handle_toggle_task(*id, store, out),
        Commands::Tasks => handle_list_tasks(store, out),
        Commands::Now => {
            writeln!(out, "{}", store.tick())?;
            Ok(())
        }
    }
}

/// Handle the add-entry command
pub fn handle_add_entry<S: KeyValueStore, C: Clock>(
    title: &str,
    text: &str,
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match store.add_entry(title, text) {
        Some(id) => writeln!(out, "Entry created successfully (ID: {})", id)?,
        None => writeln!(out, "Nothing added: title and text must not be blank")?,
    }
    report_warning(store, out)
}

pub fn handle_delete_entry<S: KeyValueStore, C: Clock>(
    id: i64,
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if !store.delete_entry(id) {
        return Err(CliError::NotFound { kind: "entry", id });
    }
    writeln!(out, "Entry {} deleted", id)?;
    report_warning(store, out)
}

pub fn handle_list_entries<S: KeyValueStore, C: Clock>(
    store: &JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if store.entries().is_empty() {
        writeln!(out, "No entries yet.")?;
        return Ok(());
    }
    for entry in store.entries() {
        writeln!(out, "[{}] {} ({})", entry.id, entry.title, entry.date)?;
        for line in entry.text.lines() {
            writeln!(out, "    {}", line)?;
        }
    }
    Ok(())
}

/// Handle the add-task command
pub fn handle_add_task<S: KeyValueStore, C: Clock>(
    task: &str,
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match store.add_task(task) {
        Some(id) => writeln!(out, "Task created successfully (ID: {})", id)?,
        None => writeln!(out, "Nothing added: task must not be blank")?,
    }
    if !store.options().persist_tasks {
        writeln!(out, "Note: task persistence is disabled; this task will not be kept")?;
    }
    report_warning(store, out)
}

pub fn handle_delete_task<S: KeyValueStore, C: Clock>(
    id: i64,
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if !store.delete_task(id) {
        return Err(CliError::NotFound { kind: "task", id });
    }
    writeln!(out, "Task {} deleted", id)?;
    report_warning(store, out)
}

pub fn handle_toggle_task<S: KeyValueStore, C: Clock>(
    id: i64,
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let completed = store
        .toggle_task(id)
        .ok_or(CliError::NotFound { kind: "task", id })?;
    let state = if completed { "done" } else { "todo" };
    writeln!(out, "Task {} marked as {}", id, state)?;
    report_warning(store, out)
}

pub fn handle_list_tasks<S: KeyValueStore, C: Clock>(
    store: &JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if store.tasks().is_empty() {
        writeln!(out, "No tasks yet.")?;
        return Ok(());
    }
    for task in store.tasks() {
        let mark = if task.completed { "x" } else { " " };
        writeln!(out, "[{}] {} {}", mark, task.id, task.task)?;
    }
    Ok(())
}

fn report_warning<S: KeyValueStore, C: Clock>(
    store: &mut JournalStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let Some(warning) = store.take_warning() {
        writeln!(out, "Warning: {}", warning)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStorage;
    use crate::store::StoreOptions;
    use chrono::{Local, TimeZone};

    fn store() -> JournalStore<MemoryStorage, FixedClock> {
        let clock = FixedClock(Local.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap());
        JournalStore::new(MemoryStorage::new(), clock, StoreOptions::default())
    }

    fn run(command: Commands, store: &mut JournalStore<MemoryStorage, FixedClock>) -> Result<String, CliError> {
        let mut out = Vec::new();
        run_command(&command, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_and_list_entries() {
        let mut store = store();
        let output = run(
            Commands::AddEntry { title: "Day 1".to_string(), text: "It rained.".to_string() },
            &mut store,
        )
        .unwrap();
        assert!(output.starts_with("Entry created successfully"));

        let listing = run(Commands::Entries, &mut store).unwrap();
        assert!(listing.contains("Day 1 (2026-10-18)"));
        assert!(listing.contains("    It rained."));
    }

    #[test]
    fn blank_entry_is_reported_not_added() {
        let mut store = store();
        let output = run(
            Commands::AddEntry { title: "".to_string(), text: "text".to_string() },
            &mut store,
        )
        .unwrap();
        assert!(output.contains("Nothing added"));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn empty_lists_show_placeholder() {
        let mut store = store();
        assert_eq!(run(Commands::Entries, &mut store).unwrap(), "No entries yet.\n");
        assert_eq!(run(Commands::Tasks, &mut store).unwrap(), "No tasks yet.\n");
    }

    #[test]
    fn toggle_and_list_tasks() {
        let mut store = store();
        let id = store.add_task("Buy milk").unwrap();
        let output = run(Commands::ToggleTask { id }, &mut store).unwrap();
        assert!(output.contains("marked as done"));
        let listing = run(Commands::Tasks, &mut store).unwrap();
        assert_eq!(listing, format!("[x] {} Buy milk\n", id));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut store = store();
        assert!(matches!(
            run(Commands::DeleteEntry { id: 9 }, &mut store),
            Err(CliError::NotFound { kind: "entry", id: 9 })
        ));
        assert!(matches!(
            run(Commands::ToggleTask { id: 9 }, &mut store),
            Err(CliError::NotFound { kind: "task", .. })
        ));
        assert!(matches!(
            run(Commands::DeleteTask { id: 9 }, &mut store),
            Err(CliError::NotFound { kind: "task", .. })
        ));
    }

    #[test]
    fn now_prints_tick() {
        let mut store = store();
        assert_eq!(run(Commands::Now, &mut store).unwrap(), "2026-10-18 12:00:00\n");
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["journal", "--dev", "add-entry", "Title", "Body"]).unwrap();
        assert!(cli.dev);
        assert!(matches!(cli.command, Some(Commands::AddEntry { .. })));

        let cli = Cli::try_parse_from(["journal"]).unwrap();
        assert!(cli.command.is_none());
    }
}
