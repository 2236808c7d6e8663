use ratatui::Frame;
use ratatui::widgets::{Block, Borders};
use ratatui::style::Style;
use crate::clock::Clock;
use crate::storage::KeyValueStore;
use crate::tui::app::{App, Mode, Pane};
use crate::tui::Layout;
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    entry_list::render_entry_list,
    form::{render_entry_form, render_task_input},
    header::render_header,
    help::render_help,
    status_bar::render_status_bar,
    task_list::render_task_list,
};
use crate::utils::format_key_binding_for_display as key;

pub fn render<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &mut App<S, C>, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("journal")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(parse_color(&active_theme.fg)).bg(parse_color(&active_theme.bg)));
    f.render_widget(outer_block, f.area());

    render_header(f, layout.header_area, &app.clock_text, &app.config);

    let focus = app.ui.focus;
    let entry_field = (focus == Pane::EntryForm).then_some(app.ui.entry_field);
    render_entry_form(
        f,
        layout.entry_form_area,
        &mut app.form.title,
        &mut app.form.text,
        entry_field,
        &app.config,
    );
    render_entry_list(
        f,
        layout.entries_area,
        app.store.entries(),
        &mut app.ui.entry_list_state,
        focus == Pane::Entries,
        &app.config,
    );
    render_task_input(
        f,
        layout.task_input_area,
        &mut app.form.task,
        focus == Pane::TaskInput,
        &app.config,
    );
    render_task_list(
        f,
        layout.tasks_area,
        app.store.tasks(),
        &mut app.ui.task_list_state,
        focus == Pane::Tasks,
        &app.config,
    );

    // Overlays go on top of the normal content
    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }
    if let Some(ref item) = app.modals.delete_confirmation {
        render_confirm_delete(f, f.area(), item, app.modals.delete_modal_selection, &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_ref(), &key_hints, &app.config);
}

fn get_key_hints<S: KeyValueStore, C: Clock>(app: &App<S, C>) -> Vec<String> {
    let kb = &app.config.key_bindings;
    if app.modals.delete_confirmation.is_some() {
        return vec!["Enter: Confirm".to_string(), "Esc: Cancel".to_string()];
    }
    if app.ui.mode == Mode::Help {
        return vec![format!("Esc or {}: Exit help", key(&kb.help))];
    }

    let mut hints = vec![format!("{}: Quit", key(&kb.quit)), format!("{}: Next", key(&kb.next_pane))];
    match app.ui.focus {
        Pane::EntryForm => hints.push(format!("{}: Add entry", key(&kb.submit))),
        Pane::TaskInput => hints.push("Enter: Add task".to_string()),
        Pane::Entries => hints.push(format!("{}: Delete", key(&kb.delete))),
        Pane::Tasks => {
            hints.push(format!("{}: Toggle", key(&kb.toggle_task)));
            hints.push(format!("{}: Delete", key(&kb.delete)));
        }
    }
    hints.push(format!("{}: Help", key(&kb.help)));
    hints
}
