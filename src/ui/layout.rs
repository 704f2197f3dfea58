use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    /// Title on the left, search bar on the right (two rows)
    pub header: Rect,
    pub title: Rect,
    pub search: Rect,
    /// Results panel; clicks here dismiss an empty search bar
    pub results: Rect,
    pub hints: Rect,
}

/// Create main application layout: header, results panel and keyboard hints
pub fn create_main_layout(area: Rect, search_width: u16) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header (search underline needs two rows)
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Keyboard hints bar
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(search_width)])
        .split(rows[0]);

    MainLayout {
        header: rows[0],
        title: header[0],
        search: header[1],
        results: rows[1],
        hints: rows[2],
    }
}

/// Create centered rectangle for popups/overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
