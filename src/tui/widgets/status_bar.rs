use ratatui::widgets::Paragraph;
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::Rect;
use crate::Config;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};
use crate::tui::widgets::entry_list::truncate;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let max_width = area.width as usize;

    let (content, style) = match message {
        // Status messages get a highlighted background for visibility
        Some(msg) => (
            truncate(msg, max_width),
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => (fit_hints(key_hints, max_width), Style::default().fg(fg_color).bg(bg_color)),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

/// Join as many hints as fit in `max_width`, ending with "..." when some are left out
pub fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let mut text = String::new();
    for (i, hint) in key_hints.iter().enumerate() {
        let addition = if i == 0 {
            hint.clone()
        } else {
            format!("{}{}", SEPARATOR, hint)
        };
        let current = text.chars().count();
        if current + addition.chars().count() > max_width {
            if text.is_empty() {
                return truncate(hint, max_width);
            }
            if current + ELLIPSIS.len() > max_width {
                text = text.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect();
            }
            text.push_str(ELLIPSIS);
            return text;
        }
        text.push_str(&addition);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["Ctrl+q: Quit".to_string(), "Tab: Next".to_string(), "F1: Help".to_string()]
    }

    #[test]
    fn all_hints_fit_on_wide_bar() {
        assert_eq!(fit_hints(&hints(), 80), "Ctrl+q: Quit • Tab: Next • F1: Help");
    }

    #[test]
    fn narrow_bar_elides_remaining_hints() {
        assert_eq!(fit_hints(&hints(), 20), "Ctrl+q: Quit...");
    }

    #[test]
    fn first_hint_too_long_is_truncated() {
        assert_eq!(fit_hints(&hints(), 8), "Ctrl+...");
    }
}
