use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Panel};
use crate::ui::utils::{format_time, truncate};

/// Centered modal listing the user's playlists (also the pick target for
/// the add-to-playlist flow).
pub fn render_panel(f: &mut Frame, app: &App) {
    if !app.playlists_open {
        return;
    }
    let theme = &app.theme;
    let screen = f.area();

    let width = (screen.width * 3 / 5).clamp(30, 70).min(screen.width);
    let max_h = screen.height.saturating_sub(2);
    let height = (app.playlists.len() as u16 + 6).max(8).min(max_h);
    let area = Rect::new(
        (screen.width.saturating_sub(width)) / 2,
        (screen.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    f.render_widget(Clear, area);

    let title = if app.pending_add.is_some() {
        " Add to playlist "
    } else {
        " Playlists "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(Span::styled(
            title,
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = vec![Line::from("")];

    if app.playlists.is_empty() {
        lines.push(
            Line::from(Span::styled(
                "No playlists found",
                Style::default().fg(theme.overlay),
            ))
            .alignment(Alignment::Center),
        );
    } else {
        for (idx, pl) in app.playlists.iter().enumerate() {
            let is_sel = idx == app.playlist_selected;
            let marker = if is_sel { "● " } else { "  " };
            let name_style = if is_sel {
                Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme.yellow)),
                Span::styled(truncate(&pl.name, inner.width as usize / 2), name_style),
                Span::styled(
                    format!("  {} videos", pl.videos.len()),
                    Style::default().fg(theme.overlay),
                ),
            ];
            if let Some(desc) = pl.description.as_ref().filter(|d| !d.is_empty()) {
                spans.push(Span::styled(
                    format!("  · {}", truncate(desc, inner.width as usize / 3)),
                    Style::default().fg(theme.overlay),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    let hint = if app.pending_add.is_some() {
        "Enter add · Esc cancel"
    } else {
        "Enter play · c create · d delete · Esc close"
    };
    lines.push(
        Line::from(Span::styled(hint, Style::default().fg(theme.overlay)))
            .alignment(Alignment::Center),
    );

    f.render_widget(Paragraph::new(lines), inner);
}

/// The bound playlist's rows, playing row marked; shown while a playlist
/// drives next/previous.
pub fn render_viewer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(bound) = app.player.context().bound() else {
        return;
    };

    let focused = app.focus == Panel::Viewer;
    let border = if focused { theme.blue } else { theme.surface };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", bound.playlist.name),
            Style::default().fg(theme.magenta),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    let start = app
        .viewer_selected
        .saturating_sub(height / 2)
        .min(bound.playlist.videos.len().saturating_sub(height));

    let mut lines: Vec<Line> = Vec::new();
    for (offset, video) in bound
        .playlist
        .videos
        .iter()
        .skip(start)
        .take(height)
        .enumerate()
    {
        let idx = start + offset;
        let playing = idx == bound.index;
        let is_sel = focused && idx == app.viewer_selected;

        let marker = if playing {
            Span::styled("▶ ", Style::default().fg(theme.green))
        } else if is_sel {
            Span::styled("● ", Style::default().fg(theme.yellow))
        } else {
            Span::styled("  ", Style::default())
        };

        let style = if playing {
            Style::default().fg(theme.green).add_modifier(Modifier::BOLD)
        } else if is_sel {
            Style::default().fg(theme.blue)
        } else {
            Style::default().fg(theme.text)
        };

        let time = video.duration.map(format_time).unwrap_or_default();
        let name_w = (inner.width as usize).saturating_sub(time.len() + 5);

        lines.push(Line::from(vec![
            Span::raw(" "),
            marker,
            Span::styled(
                format!("{:<name_w$}", truncate(&video.name, name_w)),
                style,
            ),
            Span::styled(time, Style::default().fg(theme.overlay)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
