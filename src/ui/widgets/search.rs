use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::models::{MediaKind, SearchKind};
use crate::app::App;
use crate::ui::utils::truncate;

/// Results dropdown under the header, over the body.
pub fn render_results(f: &mut Frame, body: Rect, app: &App) {
    if !app.search_open {
        return;
    }
    let theme = &app.theme;

    let width = (body.width * 2 / 3).max(24).min(body.width);
    let height = (app.search_results.len() as u16 + 3)
        .max(4)
        .min(body.height.saturating_sub(1));
    let area = Rect::new(body.x + (body.width - width) / 2, body.y, width, height);

    f.render_widget(Clear, area);

    let kind_label = match app.search_kind {
        SearchKind::File => "files",
        SearchKind::Folder => "folders",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(Span::styled(
            format!(" Search {kind_label} · Tab switches "),
            Style::default().fg(theme.blue),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    if app.search_results.is_empty() {
        lines.push(Line::from(Span::styled(
            " No results found",
            Style::default().fg(theme.overlay),
        )));
    } else {
        let height = inner.height as usize;
        let start = app
            .search_selected
            .saturating_sub(height / 2)
            .min(app.search_results.len().saturating_sub(height));

        for (offset, hit) in app
            .search_results
            .iter()
            .skip(start)
            .take(height)
            .enumerate()
        {
            let idx = start + offset;
            let is_sel = idx == app.search_selected;

            let (icon, icon_color) = match hit.kind {
                MediaKind::Folder => ("▸", theme.blue),
                MediaKind::Video => ("🎬", theme.magenta),
                MediaKind::Audio => ("♪", theme.green),
            };
            let style = if is_sel {
                Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let folder = hit.folder.clone().unwrap_or_default();
            let folder_w = inner.width as usize / 3;
            let name_w = (inner.width as usize).saturating_sub(folder_w + 6);

            lines.push(Line::from(vec![
                Span::styled(
                    if is_sel { " ● " } else { "   " }.to_string(),
                    Style::default().fg(theme.yellow),
                ),
                Span::styled(format!("{icon} "), Style::default().fg(icon_color)),
                Span::styled(format!("{:<name_w$}", truncate(&hit.name, name_w)), style),
                Span::styled(
                    truncate(&folder, folder_w),
                    Style::default().fg(theme.overlay),
                ),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
