use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&active_theme.fg))
        .bg(parse_color(&active_theme.bg));

    let popup_area = popup_area(area, 60, 70);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Help - Key Bindings")
            .title_alignment(Alignment::Center)
            .style(style))
        .style(style)
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Next / previous field or pane\n", key(&kb.next_pane), key(&kb.prev_pane)));
    text.push_str(&format!("  {} / {} or ↑/↓: Move in a list\n", key(&kb.list_up), key(&kb.list_down)));
    text.push('\n');

    text.push_str("Journal:\n");
    text.push_str("  Enter in Title: Jump to the entry body\n");
    text.push_str(&format!("  {}: Add entry (title and body must not be blank)\n", key(&kb.submit)));
    text.push_str(&format!("  {}: Delete selected entry\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("To-Do List:\n");
    text.push_str(&format!("  Enter or {}: Add task\n", key(&kb.submit)));
    text.push_str(&format!("  {} or Enter: Toggle selected task\n", key(&kb.toggle_task)));
    text.push_str(&format!("  {}: Delete selected task\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {} or Esc: Show/hide help\n", key(&kb.help)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_bindings() {
        let mut config = Config::default();
        config.key_bindings.delete = "x".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("  x: Delete selected entry"));
        assert!(text.contains("Quit"));
    }
}
