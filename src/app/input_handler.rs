use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::events::AppEvent;
use super::state::{App, Panel, PlaylistForm};
use crate::api::models::{MediaItem, MediaKind, SearchKind, SortKey, SortOrder};
use crate::api::ServerClient;
use crate::transport::Transport;

const SEEK_STEP_SECS: f64 = 10.0;
const VOLUME_STEP: f64 = 0.1;

// ── Fetch tasks ──────────────────────────────────────────────────────────
// Each spawns, completes, and re-enters the loop as an AppEvent. In-flight
// fetches are never cancelled; a newer response just overwrites the state a
// stale one wrote.

pub fn fetch_permissions(client: &Arc<ServerClient>, tx: &mpsc::Sender<AppEvent>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client.permissions().await;
        let _ = tx.send(AppEvent::PermissionsLoaded(res)).await;
    });
}

pub fn fetch_browse(
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
    path: String,
    sort: SortKey,
    order: SortOrder,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client.browse(&path, sort, order).await;
        let _ = tx.send(AppEvent::BrowseLoaded(res)).await;
    });
}

pub fn fetch_search(
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
    query: String,
    kind: SearchKind,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client.search(&query, kind).await;
        let _ = tx.send(AppEvent::SearchLoaded(res)).await;
    });
}

pub fn fetch_playlists(client: &Arc<ServerClient>, tx: &mpsc::Sender<AppEvent>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client.playlists().await;
        let _ = tx.send(AppEvent::PlaylistsLoaded(res)).await;
    });
}

pub fn fetch_playlist_play(
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
    playlist_id: i64,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client.playlist_for_playing(playlist_id).await;
        let _ = tx.send(AppEvent::PlaylistResolved(res)).await;
    });
}

pub fn fetch_subtitles(client: &Arc<ServerClient>, tx: &mpsc::Sender<AppEvent>, path: String) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        match client.subtitles(&path).await {
            Ok(tracks) => {
                let _ = tx.send(AppEvent::SubtitlesLoaded { path, tracks }).await;
            }
            // Missing subtitles are not worth a notice.
            Err(e) => info!("subtitle lookup failed for {path}: {e}"),
        }
    });
}

pub fn create_playlist(
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
    name: String,
    description: String,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client
            .create_playlist(&name, &description)
            .await
            .map(|_| "Playlist created successfully");
        let _ = tx.send(AppEvent::PlaylistMutated(res)).await;
    });
}

pub fn delete_playlist(client: &Arc<ServerClient>, tx: &mpsc::Sender<AppEvent>, playlist_id: i64) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client
            .delete_playlist(playlist_id)
            .await
            .map(|_| "Playlist deleted successfully");
        let _ = tx.send(AppEvent::PlaylistMutated(res)).await;
    });
}

pub fn add_video_to_playlist(
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
    playlist_id: i64,
    mut videos: Vec<String>,
    path: String,
) {
    videos.push(path);
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let res = client
            .set_playlist_videos(playlist_id, &videos)
            .await
            .map(|_| "Video added to playlist");
        let _ = tx.send(AppEvent::PlaylistMutated(res)).await;
    });
}

// ── Playback side effects ────────────────────────────────────────────────

/// Swap the media source to `item` and kick off the per-item side effects
/// (controls poke, permission-gated subtitle lookup).
pub fn start_playback(
    app: &mut App,
    item: &MediaItem,
    client: &Arc<ServerClient>,
    transport: &Arc<dyn Transport>,
    tx: &mpsc::Sender<AppEvent>,
) {
    let url = client.stream_url(item);
    app.subtitles.clear();
    app.position_secs = 0.0;
    app.duration_secs = item.duration.unwrap_or(0.0);

    if let Err(e) = transport.load(&url, &item.name) {
        warn!("media surface rejected {url}: {e}");
        app.show_toast(&format!("Failed to load video: {}", item.name));
        return;
    }

    info!("now playing {}", item.path);
    app.player.poke_controls(Instant::now());
    app.viewer_selected = app.player.context().bound_index().unwrap_or(0);

    if app.permissions.can_use_subtitles {
        fetch_subtitles(client, tx, item.path.clone());
    }
}

// ── Key dispatch ─────────────────────────────────────────────────────────

pub async fn handle_key(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<ServerClient>,
    transport: &Arc<dyn Transport>,
    tx: &mpsc::Sender<AppEvent>,
) {
    // Modal surfaces swallow input first: form, then search box, then the
    // playlist panel. Global shortcuts stay dead while a text input has
    // focus.
    if app.form.is_some() {
        handle_form_key(key, app, client, tx);
        return;
    }
    if app.search_active {
        handle_search_key(key, app, client, transport, tx);
        return;
    }
    if app.playlists_open {
        handle_playlist_panel_key(key, app, client, tx);
        return;
    }

    let keys = app.keys.clone();

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return;
    }

    if keys.matches(key, &keys.quit) {
        // Close popups first, then quit
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.is_running = false;
        }
        return;
    }

    // Transport surface
    if keys.matches(key, &keys.play_pause) {
        let _ = transport.toggle_pause();
        app.player.poke_controls(Instant::now());
        return;
    }
    if keys.matches(key, &keys.seek_forward) {
        let _ = transport.seek_by(SEEK_STEP_SECS);
        app.player.poke_controls(Instant::now());
        return;
    }
    if keys.matches(key, &keys.seek_backward) {
        let _ = transport.seek_by(-SEEK_STEP_SECS);
        app.player.poke_controls(Instant::now());
        return;
    }
    if keys.matches(key, &keys.volume_up) {
        let _ = transport.adjust_volume(VOLUME_STEP);
        app.player.poke_controls(Instant::now());
        app.show_toast("Volume +10%");
        return;
    }
    if keys.matches(key, &keys.volume_down) {
        let _ = transport.adjust_volume(-VOLUME_STEP);
        app.player.poke_controls(Instant::now());
        app.show_toast("Volume -10%");
        return;
    }
    if keys.matches(key, &keys.fullscreen) {
        let _ = transport.toggle_fullscreen();
        app.player.poke_controls(Instant::now());
        return;
    }

    if keys.matches(key, &keys.next) {
        if let Some(item) = app.player.next() {
            start_playback(app, &item, client, transport, tx);
        }
        return;
    }
    if keys.matches(key, &keys.prev) {
        if let Some(item) = app.player.previous() {
            start_playback(app, &item, client, transport, tx);
        }
        return;
    }

    if keys.matches(key, &keys.theme) {
        app.toggle_theme();
        return;
    }

    if keys.matches(key, &keys.search) {
        app.search_active = true;
        app.search_open = !app.search_query.is_empty();
        return;
    }

    if keys.matches(key, &keys.playlists) {
        if app.permissions.can_use_playlists {
            app.playlists_open = true;
            fetch_playlists(client, tx);
        }
        return;
    }

    if keys.matches(key, &keys.focus_next) {
        // The viewer is only a focus target while a playlist is bound.
        app.focus = match app.focus {
            Panel::Browser if app.player.context().bound().is_some() => Panel::Viewer,
            _ => Panel::Browser,
        };
        return;
    }

    if keys.matches(key, &keys.dismiss) || key.code == KeyCode::Esc {
        if app.search_open {
            app.clear_search();
        } else if app.player.context().bound().is_some() {
            // Dismissing the viewer resets the context to fully unbound.
            app.player.unbind();
            app.focus = Panel::Browser;
        } else if app.show_keyhints {
            app.show_keyhints = false;
        }
        return;
    }

    match app.focus {
        Panel::Browser => handle_browser_key(key, app, client, transport, tx),
        Panel::Viewer => handle_viewer_key(key, app, client, transport, tx),
    }
}

fn handle_browser_key(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<ServerClient>,
    transport: &Arc<dyn Transport>,
    tx: &mpsc::Sender<AppEvent>,
) {
    let keys = app.keys.clone();

    if keys.matches(key, &keys.nav_up) {
        app.browser_selected = app.browser_selected.saturating_sub(1);
        return;
    }
    if keys.matches(key, &keys.nav_down) {
        if app.browser_selected + 1 < app.listing.len() {
            app.browser_selected += 1;
        }
        return;
    }

    if keys.matches(key, &keys.open) {
        let Some(item) = app.selected_item().cloned() else {
            return;
        };
        match item.kind {
            MediaKind::Folder => {
                app.loading = true;
                fetch_browse(client, tx, item.path, app.sort_by, app.sort_order);
            }
            MediaKind::Video | MediaKind::Audio => {
                match app.player.play_standalone(&item.path) {
                    Ok(loaded) => start_playback(app, &loaded, client, transport, tx),
                    Err(e) => app.show_toast(&e.to_string()),
                }
            }
        }
        return;
    }

    if keys.matches(key, &keys.back) {
        if let Some(parent) = app.parent_path.clone() {
            app.loading = true;
            fetch_browse(client, tx, parent, app.sort_by, app.sort_order);
        }
        return;
    }

    if keys.matches(key, &keys.sort_key) {
        app.sort_by = app.sort_by.cycle();
        app.config.sort_by = app.sort_by;
        app.config.save();
        fetch_browse(
            client,
            tx,
            app.current_path.clone(),
            app.sort_by,
            app.sort_order,
        );
        return;
    }
    if keys.matches(key, &keys.sort_order) {
        app.sort_order = app.sort_order.toggle();
        app.config.sort_order = app.sort_order;
        app.config.save();
        fetch_browse(
            client,
            tx,
            app.current_path.clone(),
            app.sort_by,
            app.sort_order,
        );
        return;
    }

    if keys.matches(key, &keys.download) {
        if !app.permissions.can_download {
            return;
        }
        if let Some(item) = app.selected_item().filter(|i| i.is_playable()).cloned() {
            let url = client.download_url(&item.path);
            open_external(&url);
            app.show_toast(&format!("Downloading: {}", item.name));
        }
        return;
    }

    if keys.matches(key, &keys.add_to_playlist) {
        if !app.permissions.can_use_playlists {
            return;
        }
        let path = app
            .selected_item()
            .filter(|i| i.is_playable())
            .map(|i| i.path.clone());
        if let Some(path) = path {
            app.pending_add = Some(path);
            app.playlists_open = true;
            fetch_playlists(client, tx);
        }
    }
}

fn handle_viewer_key(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<ServerClient>,
    transport: &Arc<dyn Transport>,
    tx: &mpsc::Sender<AppEvent>,
) {
    let keys = app.keys.clone();
    let Some(len) = app.player.context().bound().map(|b| b.playlist.videos.len()) else {
        app.focus = Panel::Browser;
        return;
    };

    if keys.matches(key, &keys.nav_up) {
        app.viewer_selected = app.viewer_selected.saturating_sub(1);
    } else if keys.matches(key, &keys.nav_down) {
        if app.viewer_selected + 1 < len {
            app.viewer_selected += 1;
        }
    } else if keys.matches(key, &keys.open) {
        match app.player.play_bound_index(app.viewer_selected) {
            Ok(item) => start_playback(app, &item, client, transport, tx),
            Err(e) => app.show_toast(&e.to_string()),
        }
    }
}

fn handle_search_key(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<ServerClient>,
    transport: &Arc<dyn Transport>,
    tx: &mpsc::Sender<AppEvent>,
) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Tab => {
            app.search_kind = app.search_kind.toggle();
            if !app.search_query.is_empty() {
                fetch_search(client, tx, app.search_query.clone(), app.search_kind);
            }
        }
        KeyCode::Up => app.search_selected = app.search_selected.saturating_sub(1),
        KeyCode::Down => {
            if app.search_selected + 1 < app.search_results.len() {
                app.search_selected += 1;
            }
        }
        KeyCode::Enter => {
            let Some(hit) = app.selected_search_result().cloned() else {
                return;
            };
            app.search_active = false;
            app.search_open = false;
            match hit.kind {
                MediaKind::Folder => {
                    app.loading = true;
                    fetch_browse(client, tx, hit.path, app.sort_by, app.sort_order);
                }
                MediaKind::Video | MediaKind::Audio => {
                    // A hit outside the browsed tree is simply not in the
                    // catalog; that reports NotFound and changes nothing.
                    match app.player.play_standalone(&hit.path) {
                        Ok(loaded) => start_playback(app, &loaded, client, transport, tx),
                        Err(e) => app.show_toast(&e.to_string()),
                    }
                }
            }
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            if app.search_query.is_empty() {
                app.search_open = false;
                app.search_results.clear();
            } else {
                fetch_search(client, tx, app.search_query.clone(), app.search_kind);
            }
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            fetch_search(client, tx, app.search_query.clone(), app.search_kind);
        }
        _ => {}
    }
}

fn handle_playlist_panel_key(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
) {
    let keys = app.keys.clone();

    if key.code == KeyCode::Esc || keys.matches(key, &keys.playlists) || keys.matches(key, &keys.quit)
    {
        app.playlists_open = false;
        app.pending_add = None;
        return;
    }

    if keys.matches(key, &keys.nav_up) {
        app.playlist_selected = app.playlist_selected.saturating_sub(1);
        return;
    }
    if keys.matches(key, &keys.nav_down) {
        if app.playlist_selected + 1 < app.playlists.len() {
            app.playlist_selected += 1;
        }
        return;
    }

    if keys.matches(key, &keys.create_playlist) {
        app.form = Some(PlaylistForm::default());
        return;
    }

    if keys.matches(key, &keys.delete_item) {
        if let Some(pl) = app.playlists.get(app.playlist_selected) {
            delete_playlist(client, tx, pl.id);
        }
        return;
    }

    if keys.matches(key, &keys.open) {
        let Some(pl) = app.playlists.get(app.playlist_selected).cloned() else {
            return;
        };
        if let Some(path) = app.pending_add.take() {
            app.playlists_open = false;
            add_video_to_playlist(client, tx, pl.id, pl.videos, path);
        } else {
            // Panel closes once the resolved playlist arrives and plays.
            fetch_playlist_play(client, tx, pl.id);
        }
    }
}

fn handle_form_key(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<ServerClient>,
    tx: &mpsc::Sender<AppEvent>,
) {
    match key.code {
        KeyCode::Esc => app.form = None,
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::Enter => {
            if let Some(form) = app.form.take() {
                if form.name.is_empty() {
                    app.show_toast("Playlist name required");
                    app.form = Some(form);
                } else {
                    create_playlist(client, tx, form.name, form.description);
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.active_value().pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.active_value().push(c);
            }
        }
        _ => {}
    }
}

fn open_external(url: &str) {
    // Downloads are handed to the OS, not fetched in-process.
    let _ = std::process::Command::new("xdg-open")
        .arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn();
}
