use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use crate::Config;
use crate::tui::widgets::color::parse_color;

/// Heading on the left, live clock on the right
pub fn render_header(f: &mut Frame, area: Rect, clock_text: &str, config: &Config) {
    let active_theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&active_theme.fg))
        .bg(parse_color(&active_theme.bg));

    let clock_width = clock_text.chars().count() as u16;
    let [title_area, clock_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(clock_width)]).areas(area);

    f.render_widget(
        Paragraph::new("Personal Journal").style(style.add_modifier(Modifier::BOLD)),
        title_area,
    );
    f.render_widget(Paragraph::new(clock_text.to_string()).style(style), clock_area);
}
