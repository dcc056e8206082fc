use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, app: &App) {
    render_form(f, app);
    render_keyhints(f, app);
    render_toast(f, app);
}

/// Transient notice, top-right, sliding in and out.
fn render_toast(f: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else { return };
    let theme = &app.theme;
    let now = Instant::now();

    let message = &toast.message;
    let width = (message.len() as u16 + 6).min(f.area().width.saturating_sub(4));
    let height = 3;
    let target_x = f.area().width.saturating_sub(width + 1);
    let mut x = target_x;

    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();

    if entrance_elapsed < 300 {
        // Entrance: slide in from the right edge
        let t = entrance_elapsed as f32 / 300.0;
        let ease = 1.0 - (1.0 - t).powi(3);
        x += (width as f32 * (1.0 - ease)) as u16;
    } else if time_remaining < 300 {
        // Exit: slide back out
        let t = (300 - time_remaining) as f32 / 300.0;
        x += (width as f32 * t.powi(3)) as u16;
    }

    if x < f.area().width {
        let full_area = Rect::new(x, 1, width, height);
        let visible_area = full_area.intersection(f.area());
        if !visible_area.is_empty() {
            f.render_widget(Clear, visible_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.blue))
                .style(Style::default().bg(Color::Reset));

            let style = Style::default().fg(theme.blue).add_modifier(Modifier::BOLD);
            let text = Paragraph::new(Line::from(Span::styled(message.as_str(), style)))
                .alignment(Alignment::Center)
                .block(block);

            f.render_widget(text, visible_area);
        }
    }
}

/// Create-playlist form: name + description, Tab between fields.
fn render_form(f: &mut Frame, app: &App) {
    let Some(ref form) = app.form else { return };
    let theme = &app.theme;
    let screen = f.area();

    let width = (screen.width / 2).clamp(30, 60).min(screen.width);
    let height = 8;
    let area = Rect::new(
        (screen.width.saturating_sub(width)) / 2,
        (screen.height.saturating_sub(height)) / 2,
        width,
        height.min(screen.height),
    );

    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.magenta))
        .title(Span::styled(
            " New Playlist ",
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let field = |label: &str, value: &str, active: bool| -> Line<'static> {
        let cursor = if active { "▏" } else { "" };
        let label_style = if active {
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.overlay)
        };
        Line::from(vec![
            Span::styled(format!(" {label:<12}"), label_style),
            Span::styled(
                format!("{value}{cursor}"),
                Style::default().fg(theme.text),
            ),
        ])
    };

    let lines = vec![
        Line::from(""),
        field("Name", &form.name, form.active_field == 0),
        Line::from(""),
        field("Description", &form.description, form.active_field == 1),
        Line::from(""),
        Line::from(Span::styled(
            "Enter create · Tab next field · Esc cancel",
            Style::default().fg(theme.overlay),
        ))
        .alignment(Alignment::Center),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_keyhints(f: &mut Frame, app: &App) {
    if !app.show_keyhints {
        return;
    }
    let theme = &app.theme;
    let keys = &app.keys;
    let screen = f.area();

    let entries: Vec<(String, &str)> = vec![
        (keys.display(&keys.play_pause), "play / pause"),
        (keys.display(&keys.next), "next"),
        (keys.display(&keys.prev), "previous"),
        (keys.display(&keys.seek_backward), "seek -10s"),
        (keys.display(&keys.seek_forward), "seek +10s"),
        (keys.display(&keys.volume_up), "volume up"),
        (keys.display(&keys.volume_down), "volume down"),
        (keys.display(&keys.fullscreen), "fullscreen"),
        (keys.display(&keys.theme), "theme"),
        (keys.display(&keys.playlists), "playlists"),
        (keys.display(&keys.search), "search"),
        (keys.display(&keys.sort_key), "sort key"),
        (keys.display(&keys.sort_order), "sort order"),
        (keys.display(&keys.download), "download"),
        (keys.display(&keys.add_to_playlist), "add to playlist"),
        (keys.display(&keys.focus_next), "switch pane"),
        (keys.display(&keys.quit), "quit"),
    ];

    let width = 34u16.min(screen.width);
    let height = (entries.len() as u16 + 2).min(screen.height);
    let area = Rect::new(
        (screen.width.saturating_sub(width)) / 2,
        (screen.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(Span::styled(" Keys ", Style::default().fg(theme.blue)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = entries
        .into_iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:>6}  "),
                    Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(action.to_string(), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
