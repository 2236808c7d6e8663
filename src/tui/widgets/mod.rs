pub mod color;
pub mod confirm_delete;
pub mod editor;
pub mod entry_list;
pub mod form;
pub mod header;
pub mod help;
pub mod status_bar;
pub mod task_list;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use crate::Config;
use crate::tui::widgets::color::parse_color;

/// Centered rect covering a percentage of `area`
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Bordered block for a pane; the focused pane gets the highlight color on its border
pub fn pane_block<'a>(title: &'a str, focused: bool, config: &Config) -> Block<'a> {
    let theme = config.get_active_theme();
    let border_color = if focused {
        parse_color(&theme.highlight_bg)
    } else {
        parse_color(&theme.border)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)))
}
