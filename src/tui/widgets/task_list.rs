use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use crate::Config;
use crate::models::Task;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::entry_list::truncate;
use crate::tui::widgets::pane_block;

pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    list_state: &mut ListState,
    focused: bool,
    config: &Config,
) {
    let done = tasks.iter().filter(|t| t.completed).count();
    let title = format!("Tasks ({}/{})", done, tasks.len());
    let block = pane_block(&title, focused, config);

    if tasks.is_empty() {
        f.render_widget(Paragraph::new("No tasks yet.").block(block), area);
        return;
    }

    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = parse_color(&active_theme.highlight_fg);
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let style = if task.completed {
                Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
            } else {
                Style::default()
            };
            ListItem::new(truncate(&task_label(task), max_width)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, list_state);
}

fn task_label(task: &Task) -> String {
    let status_indicator = if task.completed { "✓" } else { "○" };
    format!("{} {}", status_indicator, task.task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_shows_completion() {
        let mut task = Task::new(1, "Buy milk".to_string());
        assert_eq!(task_label(&task), "○ Buy milk");
        task.toggle();
        assert_eq!(task_label(&task), "✓ Buy milk");
    }
}
