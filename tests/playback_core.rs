use std::time::{Duration, Instant};

use kino::api::models::{MediaItem, MediaKind, Playlist};
use kino::playback::{
    ControlsTimer, MediaCatalog, Orchestrator, PlaybackError, CONTROLS_HIDE_DELAY,
};

fn video(name: &str, path: &str) -> MediaItem {
    MediaItem {
        name: name.to_string(),
        path: path.to_string(),
        kind: MediaKind::Video,
        size: 1024,
        url: Some(format!("/static/videos/{path}")),
        modified: None,
        duration: Some(120.0),
        thumbnail: None,
        resolution: None,
        folder: None,
        children: None,
    }
}

fn folder(name: &str, path: &str, children: Vec<MediaItem>) -> MediaItem {
    MediaItem {
        name: name.to_string(),
        path: path.to_string(),
        kind: MediaKind::Folder,
        size: 0,
        url: None,
        modified: None,
        duration: None,
        thumbnail: None,
        resolution: None,
        folder: None,
        children: Some(children),
    }
}

fn playlist(id: i64, name: &str, videos: Vec<MediaItem>) -> Playlist {
    Playlist {
        id,
        name: name.to_string(),
        description: None,
        videos,
    }
}

fn abc_orchestrator() -> Orchestrator {
    let mut player = Orchestrator::new();
    player.set_catalog(&[video("A", "a"), video("B", "b"), video("C", "c")]);
    player
}

// ── Media catalog ────────────────────────────────────────────────────────

#[test]
fn catalog_flattens_depth_first_preorder() {
    let tree = vec![
        video("Intro", "intro.mp4"),
        folder(
            "Season 1",
            "s1",
            vec![
                video("Ep 1", "s1/e1.mp4"),
                folder("Extras", "s1/extras", vec![video("Blooper", "s1/extras/b.mp4")]),
                video("Ep 2", "s1/e2.mp4"),
            ],
        ),
        video("Outro", "outro.mp4"),
    ];

    let mut catalog = MediaCatalog::new();
    catalog.rebuild(&tree);

    let paths: Vec<&str> = catalog.items().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["intro.mp4", "s1/e1.mp4", "s1/extras/b.mp4", "s1/e2.mp4", "outro.mp4"]
    );
}

#[test]
fn catalog_keeps_only_playable_items() {
    let tree = vec![
        folder("Empty", "empty", vec![]),
        folder("NoChildren", "nochild", vec![]),
        video("Clip", "clip.mp4"),
    ];

    let mut catalog = MediaCatalog::new();
    catalog.rebuild(&tree);

    assert_eq!(catalog.len(), 1);
    assert!(catalog.find("empty").is_none());
}

#[test]
fn catalog_rebuild_replaces_previous_contents() {
    let mut catalog = MediaCatalog::new();
    catalog.rebuild(&[video("Old", "old.mp4")]);
    catalog.rebuild(&[video("New", "new.mp4")]);

    assert_eq!(catalog.len(), 1);
    assert!(catalog.find("old.mp4").is_none());
    assert!(catalog.find("new.mp4").is_some());
}

#[test]
fn catalog_neighbours() {
    let mut catalog = MediaCatalog::new();
    catalog.rebuild(&[video("A", "a"), video("B", "b"), video("C", "c")]);

    assert_eq!(catalog.next_after("a").map(|i| i.path.as_str()), Some("b"));
    assert_eq!(catalog.prev_before("b").map(|i| i.path.as_str()), Some("a"));
    assert!(catalog.next_after("c").is_none());
    assert!(catalog.prev_before("a").is_none());
    assert!(catalog.next_after("missing").is_none());
}

// ── Standalone navigation ────────────────────────────────────────────────

#[test]
fn standalone_walks_the_catalog() {
    let mut player = abc_orchestrator();

    let loaded = player.play_standalone("b").unwrap();
    assert_eq!(loaded.path, "b");
    assert_eq!(player.context().current().unwrap().path, "b");

    let next = player.next().unwrap();
    assert_eq!(next.path, "c");

    // Already last: advancing stops advancing, not an error.
    assert!(player.next().is_none());
    assert_eq!(player.context().current().unwrap().path, "c");
}

#[test]
fn advance_then_retreat_restores_current() {
    let mut player = abc_orchestrator();
    player.play_standalone("b").unwrap();

    player.next().unwrap();
    player.previous().unwrap();
    assert_eq!(player.context().current().unwrap().path, "b");
}

#[test]
fn retreat_at_first_item_is_a_noop() {
    let mut player = abc_orchestrator();
    player.play_standalone("a").unwrap();

    assert!(player.previous().is_none());
    assert_eq!(player.context().current().unwrap().path, "a");
}

#[test]
fn play_standalone_missing_path_reports_not_found() {
    let mut player = abc_orchestrator();
    player.play_standalone("a").unwrap();

    let err = player.play_standalone("missing").unwrap_err();
    assert_eq!(err, PlaybackError::NotFound("missing".to_string()));
    // Unchanged from before the call.
    assert_eq!(player.context().current().unwrap().path, "a");
    assert!(player.context().bound().is_none());
}

#[test]
fn play_standalone_reload_is_idempotent() {
    let mut player = abc_orchestrator();
    player.play_standalone("a").unwrap();
    player.play_standalone("a").unwrap();
    assert_eq!(player.context().current().unwrap().path, "a");
}

// ── Playlist binding ─────────────────────────────────────────────────────

#[test]
fn load_from_playlist_binds_consistently() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "Favs", vec![video("X", "x"), video("Y", "y")]);

    player.play_playlist_from(p.clone(), 0).unwrap();

    let bound = player.context().bound().unwrap();
    assert_eq!(bound.playlist, p);
    assert_eq!(bound.index, 0);
    assert_eq!(
        player.context().current().unwrap().path,
        bound.playlist.videos[bound.index].path
    );
}

#[test]
fn load_from_playlist_out_of_range_changes_nothing() {
    let mut player = abc_orchestrator();
    player.play_standalone("a").unwrap();

    let p = playlist(1, "Favs", vec![video("X", "x"), video("Y", "y")]);
    let err = player.play_playlist_from(p, 2).unwrap_err();

    assert_eq!(err, PlaybackError::OutOfRange { index: 2, len: 2 });
    assert_eq!(player.context().current().unwrap().path, "a");
    assert!(player.context().bound().is_none());
}

#[test]
fn empty_playlist_is_rejected() {
    let mut player = abc_orchestrator();
    let err = player
        .play_playlist_from(playlist(1, "Empty", vec![]), 0)
        .unwrap_err();
    assert_eq!(err, PlaybackError::EmptyPlaylist);
    assert!(player.context().current().is_none());
}

#[test]
fn bound_playlist_drives_next_and_previous() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("X", "x"), video("Y", "y")]);
    player.play_playlist_from(p, 0).unwrap();

    let next = player.next().unwrap();
    assert_eq!(next.path, "y");
    assert_eq!(player.context().bound_index(), Some(1));

    let prev = player.previous().unwrap();
    assert_eq!(prev.path, "x");
    assert_eq!(player.context().bound_index(), Some(0));
}

#[test]
fn finished_playlist_falls_through_to_catalog() {
    let mut player = abc_orchestrator();
    // Last playlist entry is "b", which sits mid-catalog.
    let p = playlist(1, "P", vec![video("X", "x"), video("B", "b")]);
    player.play_playlist_from(p, 1).unwrap();

    let next = player.next().unwrap();
    assert_eq!(next.path, "c");
    // Exiting the playlist clears the binding.
    assert!(player.context().bound().is_none());
}

#[test]
fn exhausted_playlist_with_current_absent_from_catalog_is_a_noop() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("X", "x"), video("Y", "y")]);
    player.play_playlist_from(p, 0).unwrap();
    player.next().unwrap(); // now at Y, last index, "y" not in catalog

    assert!(player.next().is_none());
    // State unchanged: still bound at index 1.
    assert_eq!(player.context().bound_index(), Some(1));
    assert_eq!(player.context().current().unwrap().path, "y");
}

#[test]
fn exhausted_playlist_with_current_catalog_last_is_a_noop() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("C", "c")]);
    player.play_playlist_from(p, 0).unwrap();

    assert!(player.next().is_none());
    assert_eq!(player.context().bound_index(), Some(0));
    assert_eq!(player.context().current().unwrap().path, "c");
}

#[test]
fn retreating_off_the_playlist_start_uses_catalog_previous() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("B", "b"), video("X", "x")]);
    player.play_playlist_from(p, 0).unwrap();

    let prev = player.previous().unwrap();
    assert_eq!(prev.path, "a");
    assert!(player.context().bound().is_none());
}

#[test]
fn unbind_keeps_current_playing() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("X", "x")]);
    player.play_playlist_from(p, 0).unwrap();

    player.unbind();
    assert!(player.context().bound().is_none());
    assert_eq!(player.context().current().unwrap().path, "x");
}

#[test]
fn playing_standalone_clears_any_binding() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("X", "x")]);
    player.play_playlist_from(p, 0).unwrap();

    player.play_standalone("a").unwrap();
    assert!(player.context().bound().is_none());
}

#[test]
fn jumping_to_a_bound_row_moves_the_index() {
    let mut player = abc_orchestrator();
    let p = playlist(1, "P", vec![video("X", "x"), video("Y", "y"), video("Z", "z")]);
    player.play_playlist_from(p, 0).unwrap();

    let item = player.play_bound_index(2).unwrap();
    assert_eq!(item.path, "z");
    assert_eq!(player.context().bound_index(), Some(2));

    let err = player.play_bound_index(3).unwrap_err();
    assert_eq!(err, PlaybackError::OutOfRange { index: 3, len: 3 });
    assert_eq!(player.context().bound_index(), Some(2));
}

#[test]
fn natural_end_advances_like_next() {
    let mut player = abc_orchestrator();
    player.play_standalone("a").unwrap();

    let item = player.on_media_ended().unwrap();
    assert_eq!(item.path, "b");
}

// ── Controls visibility timer ────────────────────────────────────────────

#[test]
fn poke_while_playing_arms_one_hide_timer() {
    let mut timer = ControlsTimer::new();
    let t0 = Instant::now();

    timer.poke(t0, true);
    assert!(timer.visible());
    assert!(timer.pending());

    timer.on_tick(t0 + CONTROLS_HIDE_DELAY);
    assert!(!timer.visible());
    assert!(!timer.pending());
}

#[test]
fn poke_twice_keeps_only_the_latest_deadline() {
    let mut timer = ControlsTimer::new();
    let t0 = Instant::now();

    timer.poke(t0, true);
    timer.poke(t0 + Duration::from_millis(1000), true);

    // The first deadline has been cancelled, not doubled up.
    timer.on_tick(t0 + CONTROLS_HIDE_DELAY);
    assert!(timer.visible());

    timer.on_tick(t0 + Duration::from_millis(1000) + CONTROLS_HIDE_DELAY);
    assert!(!timer.visible());
}

#[test]
fn poke_while_paused_shows_without_arming() {
    let mut timer = ControlsTimer::new();
    let t0 = Instant::now();

    timer.poke(t0, false);
    assert!(timer.visible());
    assert!(!timer.pending());

    timer.on_tick(t0 + CONTROLS_HIDE_DELAY * 2);
    assert!(timer.visible());
}

#[test]
fn pausing_forces_controls_visible_and_cancels_hide() {
    let mut timer = ControlsTimer::new();
    let t0 = Instant::now();

    timer.poke(t0, true);
    timer.on_tick(t0 + CONTROLS_HIDE_DELAY);
    assert!(!timer.visible());

    timer.on_play_state_changed(t0 + CONTROLS_HIDE_DELAY, false);
    assert!(timer.visible());
    assert!(!timer.pending());
}

#[test]
fn resuming_playback_restarts_the_countdown() {
    let mut timer = ControlsTimer::new();
    let t0 = Instant::now();

    timer.on_play_state_changed(t0, true);
    assert!(timer.pending());
    timer.on_tick(t0 + CONTROLS_HIDE_DELAY);
    assert!(!timer.visible());
}

#[test]
fn suppress_cancels_pending_hide_without_forcing_visibility() {
    let mut timer = ControlsTimer::new();
    let t0 = Instant::now();

    timer.poke(t0, true);
    timer.suppress();
    assert!(!timer.pending());

    timer.on_tick(t0 + CONTROLS_HIDE_DELAY * 2);
    assert!(timer.visible());
}

#[test]
fn orchestrator_tracks_play_state_for_pokes() {
    let mut player = abc_orchestrator();
    let t0 = Instant::now();

    // Not playing: poke shows controls but never hides them.
    player.poke_controls(t0);
    player.on_tick(t0 + CONTROLS_HIDE_DELAY * 2);
    assert!(player.controls_visible());

    player.on_play_state_changed(t0, true);
    player.on_tick(t0 + CONTROLS_HIDE_DELAY);
    assert!(!player.controls_visible());
}
