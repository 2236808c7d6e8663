use crate::Config;
use crate::clock::{Clock, Ticker};
use crate::models::{JournalEntry, Task};
use crate::storage::KeyValueStore;
use crate::store::JournalStore;
use crate::tui::widgets::editor::Editor;
use log::info;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;

/// Areas of the screen that take keyboard focus, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    EntryForm,
    Entries,
    TaskInput,
    Tasks,
}

impl Pane {
    const ORDER: [Pane; 4] = [Pane::EntryForm, Pane::Entries, Pane::TaskInput, Pane::Tasks];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Item waiting for the user to confirm its deletion
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Entry(JournalEntry),
    Task(Task),
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Pane,
    pub entry_field: EntryField,
    pub mode: Mode,
    pub entry_list_state: ListState,
    pub task_list_state: ListState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Pane::EntryForm,
            entry_field: EntryField::Title,
            mode: Mode::Normal,
            entry_list_state: ListState::default(),
            task_list_state: ListState::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub title: Editor,
    pub text: Editor,
    pub task: Editor,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: Editor::single_line(),
            text: Editor::multi_line(),
            task: Editor::single_line(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub delete_confirmation: Option<PendingDelete>,
    pub delete_modal_selection: usize, // 0 = Delete, 1 = Cancel
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App<S: KeyValueStore, C: Clock> {
    pub config: Config,
    pub store: JournalStore<S, C>,

    /// Last value produced by the clock tick
    pub clock_text: String,
    pub ticker: Ticker,

    pub ui: UiState,
    pub form: FormState,
    pub modals: ModalState,
    pub status: StatusState,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    pub fn new(config: Config, store: JournalStore<S, C>) -> Self {
        let interval = Duration::from_millis(config.tick_interval_ms);
        let mut app = Self {
            clock_text: store.tick(),
            ticker: Ticker::start(interval, Instant::now()),
            config,
            store,
            ui: UiState::default(),
            form: FormState::default(),
            modals: ModalState::default(),
            status: StatusState::default(),
        };
        app.sync_list_states();
        app.surface_store_warning();
        app
    }

    /// Refresh the clock if its interval elapsed. Returns whether it did.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if self.ticker.is_due(now) {
            self.clock_text = self.store.tick();
            true
        } else {
            false
        }
    }

    /// Stop the clock before the view goes away
    pub fn shutdown(&mut self) {
        self.ticker.stop();
        info!(
            "event=app_stop entries={} tasks={}",
            self.store.entries().len(),
            self.store.tasks().len()
        );
    }

    pub fn focus_next(&mut self) {
        if self.ui.focus == Pane::EntryForm && self.ui.entry_field == EntryField::Title {
            self.ui.entry_field = EntryField::Text;
            return;
        }
        self.ui.focus = self.ui.focus.next();
        self.ui.entry_field = EntryField::Title;
    }

    pub fn focus_prev(&mut self) {
        if self.ui.focus == Pane::EntryForm && self.ui.entry_field == EntryField::Text {
            self.ui.entry_field = EntryField::Title;
            return;
        }
        self.ui.focus = self.ui.focus.prev();
        self.ui.entry_field = if self.ui.focus == Pane::EntryForm {
            EntryField::Text
        } else {
            EntryField::Title
        };
    }

    /// Editor that receives typed characters, if the focused pane has one
    pub fn active_editor(&mut self) -> Option<&mut Editor> {
        match self.ui.focus {
            Pane::EntryForm => match self.ui.entry_field {
                EntryField::Title => Some(&mut self.form.title),
                EntryField::Text => Some(&mut self.form.text),
            },
            Pane::TaskInput => Some(&mut self.form.task),
            Pane::Entries | Pane::Tasks => None,
        }
    }

    /// Add the typed entry. Blank fields leave everything as it was.
    pub fn submit_entry(&mut self) {
        let title = self.form.title.text();
        let text = self.form.text.text();
        if self.store.add_entry(&title, &text).is_some() {
            self.form.title.clear();
            self.form.text.clear();
            self.ui.entry_field = EntryField::Title;
            self.ui.entry_list_state.select(Some(self.store.entries().len() - 1));
            self.set_status_message("Entry added".to_string());
        }
        self.surface_store_warning();
    }

    /// Add the typed task. A blank task is ignored.
    pub fn submit_task(&mut self) {
        let task = self.form.task.text();
        if self.store.add_task(&task).is_some() {
            self.form.task.clear();
            self.ui.task_list_state.select(Some(self.store.tasks().len() - 1));
            self.set_status_message("Task added".to_string());
        }
        self.surface_store_warning();
    }

    pub fn selected_entry(&self) -> Option<&JournalEntry> {
        self.ui
            .entry_list_state
            .selected()
            .and_then(|i| self.store.entries().get(i))
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.ui
            .task_list_state
            .selected()
            .and_then(|i| self.store.tasks().get(i))
    }

    pub fn move_selection_up(&mut self) {
        let (state, len) = self.focused_list();
        if let Some(state) = state {
            if len > 0 {
                let i = state.selected().unwrap_or(0);
                state.select(Some(i.saturating_sub(1)));
            }
        }
    }

    pub fn move_selection_down(&mut self) {
        let (state, len) = self.focused_list();
        if let Some(state) = state {
            if len > 0 {
                let i = state.selected().map(|i| i + 1).unwrap_or(0);
                state.select(Some(i.min(len - 1)));
            }
        }
    }

    fn focused_list(&mut self) -> (Option<&mut ListState>, usize) {
        match self.ui.focus {
            Pane::Entries => (Some(&mut self.ui.entry_list_state), self.store.entries().len()),
            Pane::Tasks => (Some(&mut self.ui.task_list_state), self.store.tasks().len()),
            _ => (None, 0),
        }
    }

    /// Flip the selected task between done and not done
    pub fn toggle_selected_task(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        if let Some(completed) = self.store.toggle_task(id) {
            let msg = if completed { "Task marked as done" } else { "Task marked as todo" };
            self.set_status_message(msg.to_string());
        }
        self.surface_store_warning();
    }

    /// Ask for confirmation before deleting the selected entry or task
    pub fn request_delete(&mut self) {
        let pending = match self.ui.focus {
            Pane::Entries => self.selected_entry().cloned().map(PendingDelete::Entry),
            Pane::Tasks => self.selected_task().cloned().map(PendingDelete::Task),
            _ => None,
        };
        if pending.is_some() {
            self.modals.delete_confirmation = pending;
            self.modals.delete_modal_selection = 0;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.modals.delete_confirmation = None;
    }

    /// Carry out the pending deletion, or drop it if Cancel is selected
    pub fn confirm_delete(&mut self) {
        let Some(pending) = self.modals.delete_confirmation.take() else {
            return;
        };
        if self.modals.delete_modal_selection != 0 {
            return;
        }
        match pending {
            PendingDelete::Entry(entry) => {
                if self.store.delete_entry(entry.id) {
                    self.set_status_message("Entry deleted".to_string());
                }
            }
            PendingDelete::Task(task) => {
                if self.store.delete_task(task.id) {
                    self.set_status_message("Task deleted".to_string());
                }
            }
        }
        self.sync_list_states();
        self.surface_store_warning();
    }

    /// Keep list selections inside the bounds of their collections
    pub fn sync_list_states(&mut self) {
        fn clamp(state: &mut ListState, len: usize) {
            match (len, state.selected()) {
                (0, _) => state.select(None),
                (_, None) => state.select(Some(0)),
                (len, Some(i)) if i >= len => state.select(Some(len - 1)),
                _ => {}
            }
        }
        clamp(&mut self.ui.entry_list_state, self.store.entries().len());
        clamp(&mut self.ui.task_list_state, self.store.tasks().len());
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::Normal;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Clear the status message once it has been visible long enough
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    fn surface_store_warning(&mut self) {
        if let Some(warning) = self.store.take_warning() {
            self.set_status_message(warning);
        }
    }
}
