use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub header_area: Rect,
    pub entry_form_area: Rect,
    pub entries_area: Rect,
    pub task_input_area: Rect,
    pub tasks_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: two columns of at least 24 chars each
    /// Height: header + form (title, 3 body lines) + a few list rows + status
    pub const MIN_WIDTH: u16 = 50;
    pub const MIN_HEIGHT: u16 = 18;

    /// Body editor rows inside the entry form
    pub const BODY_LINES: u16 = 5;

    pub fn calculate(size: Rect) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // header (1), content, status (1)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner_area);

        // Journal on the left gets the larger share
        let columns = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical[1]);

        // Title box (3) + body box (BODY_LINES + 2)
        let entry_form_height = 3 + Self::BODY_LINES + 2;
        let left = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(entry_form_height), Constraint::Min(1)])
            .split(columns[0]);

        let right = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(columns[1]);

        Self {
            inner_area,
            header_area: vertical[0],
            entry_form_area: left[0],
            entries_area: left[1],
            task_input_area: right[0],
            tasks_area: right[1],
            status_area: vertical[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn areas_fit_inside_the_border() {
        let layout = Layout::calculate(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.inner_area, Rect::new(1, 1, 98, 38));
        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.entry_form_area.height, 3 + Layout::BODY_LINES + 2);
        assert_eq!(layout.task_input_area.height, 3);
        assert!(layout.entries_area.y >= layout.entry_form_area.bottom());
        assert!(layout.tasks_area.x >= layout.entries_area.right());
    }

    #[test]
    fn small_terminals_are_padded_to_minimum() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 5));
        assert_eq!(layout.inner_area.width, Layout::MIN_WIDTH);
        assert_eq!(layout.inner_area.height, Layout::MIN_HEIGHT);
    }
}
