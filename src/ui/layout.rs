use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb + search box
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        footer_area: chunks[2],
    }
}

pub struct ContentLayout {
    pub browser: Rect,
    pub player: Rect,
    /// Present only while a playlist is bound.
    pub viewer: Option<Rect>,
}

pub fn get_content_layout(area: Rect, viewer_open: bool) -> ContentLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Min(20)])
        .split(area);

    if viewer_open && area.height >= 16 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);
        ContentLayout {
            browser: columns[0],
            player: rows[0],
            viewer: Some(rows[1]),
        }
    } else {
        ContentLayout {
            browser: columns[0],
            player: columns[1],
            viewer: None,
        }
    }
}
