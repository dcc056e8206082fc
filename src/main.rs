use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use human_panic::setup_panic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use kino::api::ServerClient;
use kino::app::cli::Args;
use kino::app::config::AppConfig;
use kino::app::events::AppEvent;
use kino::app::input_handler::{
    self, fetch_browse, fetch_permissions, fetch_playlists, start_playback,
};
use kino::app::App;
use kino::transport::{mpv::MpvTransport, PlayerEvent, Transport};
use kino::ui;

fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    // A TUI owns the terminal, so logs go to a file instead.
    let file = tracing_appender::rolling::never(AppConfig::config_dir(), "kino.log");
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kino=info".into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", toml::to_string_pretty(&AppConfig::default())?);
        return Ok(());
    }

    let config = AppConfig::load();
    let _log_guard = init_logging();

    let server = args.server.clone().unwrap_or_else(|| config.server.clone());
    let client = Arc::new(ServerClient::new(&server)?);
    info!("using media server at {server}");

    let mut logged_in = false;
    if let (Some(user), Some(pass)) = (&args.username, &args.password) {
        if let Err(e) = client.login(user, pass).await {
            eprintln!("Login failed: {e}");
            return Ok(());
        }
        logged_in = true;
    }

    let (tx, mut rx) = mpsc::channel(100);

    // The playback surface comes up before the terminal so a missing mpv
    // fails with a readable error.
    let transport: Arc<dyn Transport> = Arc::new(MpvTransport::spawn(&args.mpv, tx.clone())?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Input event task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // Tick task (toast + controls deadlines)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(200));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // Initial state: permissions, then the library root.
    fetch_permissions(&client, &tx);
    fetch_browse(
        &client,
        &tx,
        String::new(),
        app.sort_by,
        app.sort_order,
    );

    loop {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        let Some(event) = rx.recv().await else { break };
        match event {
            AppEvent::Input(Event::Key(key)) => {
                input_handler::handle_key(key, &mut app, &client, &transport, &tx).await;
            }
            AppEvent::Input(Event::Mouse(mouse)) => handle_mouse(mouse, &mut app),
            AppEvent::Input(_) => {}

            AppEvent::PermissionsLoaded(Ok(perms)) => {
                app.permissions = perms;
                if perms.can_use_playlists {
                    fetch_playlists(&client, &tx);
                }
            }
            AppEvent::PermissionsLoaded(Err(e)) => {
                warn!("permissions fetch failed: {e}");
            }

            AppEvent::BrowseLoaded(Ok(resp)) => app.apply_browse(resp),
            AppEvent::BrowseLoaded(Err(e)) => {
                app.loading = false;
                app.show_toast(&e.to_string());
            }

            AppEvent::SearchLoaded(Ok(resp)) => app.apply_search(resp),
            AppEvent::SearchLoaded(Err(e)) => app.show_toast(&e.to_string()),

            AppEvent::PlaylistsLoaded(Ok(playlists)) => app.apply_playlists(playlists),
            AppEvent::PlaylistsLoaded(Err(e)) => app.show_toast(&e.to_string()),

            AppEvent::PlaylistResolved(Ok(playlist)) => {
                match app.player.play_playlist_from(playlist, 0) {
                    Ok(item) => {
                        app.playlists_open = false;
                        start_playback(&mut app, &item, &client, &transport, &tx);
                    }
                    Err(e) => app.show_toast(&e.to_string()),
                }
            }
            AppEvent::PlaylistResolved(Err(e)) => app.show_toast(&e.to_string()),

            AppEvent::PlaylistMutated(Ok(notice)) => {
                app.show_toast(notice);
                fetch_playlists(&client, &tx);
            }
            AppEvent::PlaylistMutated(Err(e)) => app.show_toast(&e.to_string()),

            AppEvent::SubtitlesLoaded { path, tracks } => {
                // Only attach if this is still the current item.
                if app.player.context().is_current(&path) {
                    for track in &tracks {
                        let _ = transport.add_subtitle(
                            &client.absolute(&track.url),
                            &track.language,
                            &track.name,
                        );
                    }
                    app.subtitles = tracks;
                }
            }

            AppEvent::Player(PlayerEvent::Paused(paused)) => {
                app.player.on_play_state_changed(Instant::now(), !paused);
            }
            AppEvent::Player(PlayerEvent::Ended) => {
                if let Some(item) = app.player.on_media_ended() {
                    start_playback(&mut app, &item, &client, &transport, &tx);
                }
            }
            AppEvent::Player(PlayerEvent::Error(reason)) => {
                // Load failure never auto-advances.
                let name = app
                    .player
                    .context()
                    .current()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "media".to_string());
                warn!("playback error for {name}: {reason}");
                app.show_toast(&format!("Failed to load video: {name}"));
            }
            AppEvent::Player(PlayerEvent::Position(secs)) => app.position_secs = secs,
            AppEvent::Player(PlayerEvent::Duration(secs)) => app.duration_secs = secs,

            AppEvent::Tick => app.on_tick(Instant::now()),
        }

        if !app.is_running {
            break;
        }
    }

    if logged_in {
        // Best-effort; the session dies with the process either way.
        let _ = client.logout().await;
    }
    let _ = transport.quit();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Pointer behavior around the transport controls: resting on them holds
/// them open, moving elsewhere restarts the hide countdown.
fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
        return;
    }
    let over_controls = app
        .controls_area
        .is_some_and(|rect| rect.contains((mouse.column, mouse.row).into()));
    if over_controls {
        app.player.suppress_controls();
    } else {
        app.player.poke_controls(Instant::now());
    }
}
