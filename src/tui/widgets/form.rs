use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use crate::Config;
use crate::tui::app::EntryField;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::editor::Editor;
use crate::tui::widgets::pane_block;

/// Title and body inputs. `active` is the focused field, if the form has focus.
pub fn render_entry_form(
    f: &mut Frame,
    area: Rect,
    title: &mut Editor,
    text: &mut Editor,
    active: Option<EntryField>,
    config: &Config,
) {
    let [title_area, text_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    render_editor_box(
        f,
        title_area,
        title,
        "Title",
        "Title",
        active == Some(EntryField::Title),
        config,
    );
    render_editor_box(
        f,
        text_area,
        text,
        "Entry",
        "Write your journal entry...",
        active == Some(EntryField::Text),
        config,
    );
}

pub fn render_task_input(f: &mut Frame, area: Rect, task: &mut Editor, focused: bool, config: &Config) {
    render_editor_box(f, area, task, "To-Do List", "Add a task...", focused, config);
}

fn render_editor_box(
    f: &mut Frame,
    area: Rect,
    editor: &mut Editor,
    title: &str,
    placeholder: &str,
    focused: bool,
    config: &Config,
) {
    let block = pane_block(title, focused, config);
    let inner = block.inner(area);
    editor.update_scroll(inner.height as usize, inner.width as usize);

    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);

    let paragraph = if editor.is_empty() && !focused {
        Paragraph::new(placeholder.to_string())
            .style(Style::default().fg(fg_color).add_modifier(Modifier::DIM | Modifier::ITALIC))
    } else {
        let lines: Vec<Line> = editor
            .visible_lines(inner.height as usize, inner.width as usize)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines).style(Style::default().fg(fg_color))
    };

    f.render_widget(paragraph.block(block), area);

    if focused {
        if let Some(pos) = editor.cursor_screen_pos(inner) {
            f.set_cursor_position(pos);
        }
    }
}
