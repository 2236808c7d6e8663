use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use crate::Config;
use crate::models::JournalEntry;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::pane_block;

/// Body lines shown per entry before the rest is elided
const MAX_BODY_LINES: usize = 3;

pub fn render_entry_list(
    f: &mut Frame,
    area: Rect,
    entries: &[JournalEntry],
    list_state: &mut ListState,
    focused: bool,
    config: &Config,
) {
    let title = format!("Entries ({})", entries.len());
    let block = pane_block(&title, focused, config);

    if entries.is_empty() {
        f.render_widget(Paragraph::new("No entries yet.").block(block), area);
        return;
    }

    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = parse_color(&active_theme.highlight_fg);
    let max_width = area.width.saturating_sub(4) as usize; // 2 for borders, 2 for padding

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(entry_lines(entry, max_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, list_state);
}

fn entry_lines(entry: &JournalEntry, max_width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        truncate(&entry.title, max_width),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let body: Vec<&str> = entry.text.lines().collect();
    for line in body.iter().take(MAX_BODY_LINES) {
        lines.push(Line::from(format!("  {}", truncate(line, max_width.saturating_sub(2)))));
    }
    if body.len() > MAX_BODY_LINES {
        lines.push(Line::from("  ..."));
    }

    lines.push(Line::from(Span::styled(
        format!("  {}", entry.date),
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines.push(Line::from(""));
    lines
}

/// Cut a string to `max` chars, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(3)).collect::<String>() + "..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long journal title", 10), "a long ...");
    }

    #[test]
    fn long_bodies_are_elided() {
        let entry = JournalEntry::new(1, "t".to_string(), "1\n2\n3\n4\n5".to_string(), "d".to_string());
        let lines = entry_lines(&entry, 40);
        // title + 3 body lines + ellipsis + date + spacer
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[4].to_string(), "  ...");
        assert_eq!(lines[5].to_string(), "  d");
    }
}
