pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Everything on screen is a pure function of `App`; the only writeback is
/// the rendered controls rect used for pointer hit-testing.
pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let main_layout = layout::get_main_layout(area);
    render_header(f, main_layout.header_area, app);

    let viewer_open = app.player.context().bound().is_some();
    let content = layout::get_content_layout(main_layout.body_area, viewer_open);

    widgets::browser::render(f, content.browser, app);
    widgets::player::render(f, content.player, app);
    if let Some(viewer_area) = content.viewer {
        widgets::playlists::render_viewer(f, viewer_area, app);
    }

    widgets::search::render_results(f, main_layout.body_area, app);
    widgets::playlists::render_panel(f, app);

    render_footer(f, main_layout.footer_area, app);
    widgets::popups::render(f, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(area);

    // Breadcrumb
    let mut spans: Vec<Span> = Vec::new();
    let crumbs = app.breadcrumb();
    for (idx, part) in crumbs.iter().enumerate() {
        let last = idx == crumbs.len() - 1;
        if idx > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(theme.overlay)));
        }
        let style = if last {
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.overlay)
        };
        spans.push(Span::styled(part.clone(), style));
    }
    let breadcrumb = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.surface)),
    );
    f.render_widget(breadcrumb, chunks[0]);

    // Search box
    let cursor = if app.search_active { "▏" } else { "" };
    let query_style = if app.search_active {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.overlay)
    };
    let placeholder = if app.search_query.is_empty() && !app.search_active {
        "Ctrl+f to search".to_string()
    } else {
        format!("{}{}", app.search_query, cursor)
    };
    let border = if app.search_active {
        theme.blue
    } else {
        theme.surface
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled("⌕ ", Style::default().fg(theme.blue)),
        Span::styled(placeholder, query_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(search, chunks[1]);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    if app.show_keyhints {
        return;
    }
    let theme = &app.theme;
    let hint = Line::from(vec![
        Span::styled(
            " ? ",
            Style::default()
                .fg(theme.overlay)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("keys", Style::default().fg(theme.overlay)),
    ]);
    let footer = Paragraph::new(hint).alignment(Alignment::Right);
    f.render_widget(footer, area);
}
