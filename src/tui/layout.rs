use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub list_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions, excluding the outer border.
    /// Width fits a 24 column list and a 16 column detail pane; height fits
    /// the four form fields plus the status line.
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 14;

    pub fn calculate(size: Rect, list_width_percent: u16) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // List gets at least 24 columns and leaves the detail pane at least 16
        let requested = (inner_area.width as u32 * list_width_percent.min(100) as u32 / 100) as u16;
        let list_width = requested.max(24).min(inner_area.width.saturating_sub(16));

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(list_width), Constraint::Min(1)])
            .split(vertical[0]);

        Self {
            inner_area,
            list_area: horizontal[0],
            detail_area: horizontal[1],
            status_area: vertical[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_panes() {
        let layout = Layout::calculate(Rect::new(0, 0, 102, 30), 40);
        assert_eq!(layout.inner_area, Rect::new(1, 1, 100, 28));
        assert_eq!(layout.list_area.width, 40);
        assert_eq!(layout.detail_area.width, 60);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 28);
    }

    #[test]
    fn test_layout_clamps_small_terminals() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 5), 40);
        assert_eq!(layout.inner_area.width, Layout::MIN_WIDTH);
        assert_eq!(layout.list_area.width, 24);
        assert_eq!(layout.detail_area.width, 16);
    }
}
