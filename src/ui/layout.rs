use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the dashboard
pub struct DashboardLayout {
    pub header: Rect,
    pub map: Rect,
    pub district_list: Rect,
    pub detail: Rect,
    pub legend: Rect,
    pub status_bar: Rect,
}

impl DashboardLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Summary header
                Constraint::Min(0),    // Map and side panels
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(32),     // Sub-district list
                Constraint::Min(20),        // Map
                Constraint::Percentage(30), // Detail and legend
            ])
            .split(rows[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),     // Detail panel
                Constraint::Length(14), // Legend and layer toggles
            ])
            .split(columns[2]);

        Self {
            header: rows[0],
            district_list: columns[0],
            map: columns[1],
            detail: side[0],
            legend: side[1],
            status_bar: rows[2],
        }
    }
}

/// Centered box used for the loading and error overlays
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
