use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::utils::{format_time, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(" Now Playing ", Style::default().fg(theme.blue)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(current) = app.player.context().current().cloned() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing playing",
                Style::default().fg(theme.overlay),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Pick a file and press Enter",
                Style::default().fg(theme.overlay),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        app.controls_area = None;
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // path / playlist context
            Constraint::Length(1),
            Constraint::Length(1), // progress gauge
            Constraint::Length(1), // time row
            Constraint::Min(0),    // transport controls
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        truncate(&current.name, inner.width as usize),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, rows[0]);

    let context_line = match app.player.context().bound() {
        Some(bound) => format!(
            "Playlist: {} ({}/{})",
            bound.playlist.name,
            bound.index + 1,
            bound.playlist.videos.len()
        ),
        None => current.path.clone(),
    };
    let context = Paragraph::new(Line::from(Span::styled(
        truncate(&context_line, inner.width as usize),
        Style::default().fg(theme.overlay),
    )))
    .alignment(Alignment::Center);
    f.render_widget(context, rows[1]);

    let duration = if app.duration_secs > 0.0 {
        app.duration_secs
    } else {
        current.duration.unwrap_or(0.0)
    };
    let ratio = if duration > 0.0 {
        (app.position_secs / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.blue).bg(theme.surface))
        .ratio(ratio)
        .label("");
    if rows[3].width > 2 {
        let gauge_area = Rect {
            x: rows[3].x + 1,
            width: rows[3].width - 2,
            ..rows[3]
        };
        f.render_widget(gauge, gauge_area);
    }

    let time = Paragraph::new(Line::from(Span::styled(
        format!(
            "{} / {}",
            format_time(app.position_secs),
            format_time(duration)
        ),
        Style::default().fg(theme.overlay),
    )))
    .alignment(Alignment::Center);
    f.render_widget(time, rows[4]);

    // Transport controls: hidden after the inactivity window while playing.
    if app.player.controls_visible() && rows[5].height > 0 {
        let state_glyph = if app.player.is_playing() { "⏸" } else { "▶" };
        let mut spans = vec![
            Span::styled("⏮ ", Style::default().fg(theme.text)),
            Span::styled(
                format!(" {state_glyph} "),
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ⏭", Style::default().fg(theme.text)),
        ];
        if !app.subtitles.is_empty() {
            spans.push(Span::styled(
                format!("   cc×{}", app.subtitles.len()),
                Style::default().fg(theme.cyan),
            ));
        }
        let controls = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        let controls_row = Rect {
            height: 1,
            ..rows[5]
        };
        f.render_widget(controls, controls_row);
        app.controls_area = Some(controls_row);
    } else {
        app.controls_area = None;
    }
}
