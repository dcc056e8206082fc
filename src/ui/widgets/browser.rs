use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::api::models::{MediaKind, SortOrder};
use crate::app::App;
use crate::ui::utils::{format_size, format_time, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let title = format!(
        " Files · sort: {} {} ",
        app.sort_by.as_str(),
        if app.sort_order == SortOrder::Asc { "↑" } else { "↓" }
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(title, Style::default().fg(theme.blue)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let width = inner.width as usize;
    let height = inner.height as usize;

    if app.loading {
        lines.push(Line::from(Span::styled(
            "  Loading…",
            Style::default().fg(theme.overlay),
        )));
    } else if app.listing.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No files found",
            Style::default().fg(theme.overlay),
        )));
    } else {
        let start = app
            .browser_selected
            .saturating_sub(height / 2)
            .min(app.listing.len().saturating_sub(height));

        for (offset, item) in app.listing.iter().skip(start).take(height).enumerate() {
            let idx = start + offset;
            let is_sel = idx == app.browser_selected;
            let is_active = app.is_active_path(&item.path);

            let (icon, icon_color) = match item.kind {
                MediaKind::Folder => ("▸", theme.blue),
                MediaKind::Video => ("🎬", theme.magenta),
                MediaKind::Audio => ("♪", theme.green),
            };

            let meta = match item.kind {
                MediaKind::Folder => {
                    let count = item.children.as_ref().map(Vec::len).unwrap_or(0);
                    format!("{count} items")
                }
                _ => {
                    let mut meta = format_size(item.size);
                    if let Some(duration) = item.duration {
                        meta.push_str(" · ");
                        meta.push_str(&format_time(duration));
                    }
                    meta
                }
            };

            let marker = if is_active {
                Span::styled("▶ ", Style::default().fg(theme.green))
            } else if is_sel {
                Span::styled("● ", Style::default().fg(theme.yellow))
            } else {
                Span::styled("  ", Style::default())
            };

            let name_style = if is_active {
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD)
            } else if is_sel {
                Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let meta_w = meta.len() + 1;
            let name_w = width.saturating_sub(meta_w + 6);
            let name = truncate(&item.name, name_w);

            lines.push(Line::from(vec![
                Span::raw(" "),
                marker,
                Span::styled(format!("{icon} "), Style::default().fg(icon_color)),
                Span::styled(format!("{name:<name_w$}"), name_style),
                Span::styled(format!(" {meta}"), Style::default().fg(theme.overlay)),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
