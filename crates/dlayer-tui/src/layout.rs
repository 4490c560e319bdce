//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and tab bar (glass container)
    pub header: Rect,

    /// Content of the selected tab
    pub body: Rect,

    /// Single status line
    pub status: Rect,
}

/// Split the terminal into header, body and status line
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Top border + tabs row + bottom border
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Rectangle of the given size centered in `area`, clipped to it
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let areas = create(Rect::new(0, 0, 80, 24));

        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.status.height, 1);
        assert_eq!(areas.status.y, 23);
        assert_eq!(areas.body.height, 20);
        assert_eq!(areas.body.y, 3);
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(40, 10, area);

        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 7);
    }

    #[test]
    fn test_centered_clips_to_small_terminal() {
        let rect = centered(60, 30, Rect::new(0, 0, 40, 12));
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 12);
    }
}
