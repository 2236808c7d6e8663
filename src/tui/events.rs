use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, size as terminal_size};
use log::debug;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};
use crate::clock::Clock;
use crate::config::KeyBindings;
use crate::storage::KeyValueStore;
use crate::tui::app::{App, EntryField, Mode, Pane};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::editor::Editor;
use crate::utils::{matches_key_event, parse_key_binding, ParsedKeyBinding};

/// Longest the loop blocks waiting for input, so status messages still expire
const MAX_POLL: Duration = Duration::from_millis(250);

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or the alternate screen, the user's
/// shell will be unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore terminal state on normal exit; the guard does nothing on drop afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Key bindings from the config, parsed once
pub struct ParsedBindings {
    pub quit: ParsedKeyBinding,
    pub next_pane: ParsedKeyBinding,
    pub prev_pane: ParsedKeyBinding,
    pub submit: ParsedKeyBinding,
    pub delete: ParsedKeyBinding,
    pub toggle_task: ParsedKeyBinding,
    pub list_up: ParsedKeyBinding,
    pub list_down: ParsedKeyBinding,
    pub help: ParsedKeyBinding,
}

impl ParsedBindings {
    pub fn from_config(kb: &KeyBindings) -> Result<Self, TuiError> {
        let parse = |s: &str| parse_key_binding(s).map_err(TuiError::KeyBindingError);
        Ok(Self {
            quit: parse(&kb.quit)?,
            next_pane: parse(&kb.next_pane)?,
            prev_pane: parse(&kb.prev_pane)?,
            submit: parse(&kb.submit)?,
            delete: parse(&kb.delete)?,
            toggle_task: parse(&kb.toggle_task)?,
            list_up: parse(&kb.list_up)?,
            list_down: parse(&kb.list_down)?,
            help: parse(&kb.help)?,
        })
    }
}

pub fn run_event_loop<S: KeyValueStore, C: Clock>(mut app: App<S, C>) -> Result<(), TuiError> {
    let bindings = ParsedBindings::from_config(&app.config.key_bindings)?;

    // Check terminal size before entering alternate screen so the error is readable
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = drive(&mut terminal, &mut app, &bindings);

    // The clock must not fire into a torn-down view
    app.shutdown();
    guard.restore()?;

    result
}

fn drive<S: KeyValueStore, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S, C>,
    bindings: &ParsedBindings,
) -> Result<(), TuiError> {
    loop {
        app.check_status_message_timeout();
        app.on_tick(Instant::now());

        let size = terminal.size()?;
        let layout = Layout::calculate(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| crate::tui::render::render(f, app, &layout))?;

        let timeout = app
            .ticker
            .time_until_next(Instant::now())
            .map_or(MAX_POLL, |t| t.min(MAX_POLL));

        if event::poll(timeout)? {
            match event::read()? {
                // Only Press events; Windows also reports releases
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(app, bindings, key_event)? {
                        debug!("quit requested");
                        return Ok(());
                    }
                }
                // Resize is picked up by the next draw
                _ => {}
            }
        }
    }
}

fn handle_delete_confirmation_modal<S: KeyValueStore, C: Clock>(app: &mut App<S, C>, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            app.modals.delete_modal_selection = 1 - app.modals.delete_modal_selection.min(1);
        }
        KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('y') => {
            app.modals.delete_modal_selection = 0;
            app.confirm_delete();
        }
        KeyCode::Esc | KeyCode::Char('n') => app.cancel_delete(),
        _ => {}
    }
}

/// Handle one key press. Returns true when the app should quit.
pub fn handle_key_event<S: KeyValueStore, C: Clock>(
    app: &mut App<S, C>,
    bindings: &ParsedBindings,
    key_event: KeyEvent,
) -> Result<bool, TuiError> {
    if app.modals.delete_confirmation.is_some() {
        handle_delete_confirmation_modal(app, key_event);
        return Ok(false);
    }

    if app.ui.mode == Mode::Help {
        if key_event.code == KeyCode::Esc || matches_key_event(key_event, &bindings.help) {
            app.exit_help_mode();
        }
        return Ok(false);
    }

    if matches_key_event(key_event, &bindings.quit) {
        return Ok(true);
    }
    if matches_key_event(key_event, &bindings.help) {
        app.enter_help_mode();
        return Ok(false);
    }
    if matches_key_event(key_event, &bindings.next_pane) {
        app.focus_next();
        return Ok(false);
    }
    if matches_key_event(key_event, &bindings.prev_pane) {
        app.focus_prev();
        return Ok(false);
    }

    match app.ui.focus {
        Pane::EntryForm => {
            if matches_key_event(key_event, &bindings.submit) {
                app.submit_entry();
            } else if key_event.code == KeyCode::Enter && app.ui.entry_field == EntryField::Title {
                app.focus_next();
            } else if let Some(editor) = app.active_editor() {
                handle_editor_input(editor, key_event);
            }
        }
        Pane::TaskInput => {
            if key_event.code == KeyCode::Enter || matches_key_event(key_event, &bindings.submit) {
                app.submit_task();
            } else if let Some(editor) = app.active_editor() {
                handle_editor_input(editor, key_event);
            }
        }
        Pane::Entries | Pane::Tasks => {
            if key_event.code == KeyCode::Up || matches_key_event(key_event, &bindings.list_up) {
                app.move_selection_up();
            } else if key_event.code == KeyCode::Down || matches_key_event(key_event, &bindings.list_down) {
                app.move_selection_down();
            } else if matches_key_event(key_event, &bindings.delete) {
                app.request_delete();
            } else if app.ui.focus == Pane::Tasks
                && (key_event.code == KeyCode::Enter || matches_key_event(key_event, &bindings.toggle_task))
            {
                app.toggle_selected_task();
            }
        }
    }

    Ok(false)
}

fn handle_editor_input(editor: &mut Editor, key_event: KeyEvent) {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char(c) if !ctrl => editor.insert_char(c),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Backspace => editor.delete_char(),
        KeyCode::Delete => editor.delete_forward(),
        KeyCode::Left => editor.move_cursor_left(),
        KeyCode::Right => editor.move_cursor_right(),
        KeyCode::Up => editor.move_cursor_up(),
        KeyCode::Down => editor.move_cursor_down(),
        KeyCode::Home => editor.move_cursor_home(),
        KeyCode::End => editor.move_cursor_end(),
        _ => {}
    }
}
