use std::time::{Duration, Instant};

use kino::api::models::{
    BrowseResponse, MediaKind, Permissions, PlaylistPlayResponse, SearchKind, SearchResponse,
    SortKey, SortOrder,
};
use kino::app::config::AppConfig;
use kino::app::state::NOTICE_LIFETIME;
use kino::app::{App, Panel, PlaylistForm};
use kino::ui::theme::ThemeMode;

/// Helper to create a test app instance
fn create_test_app() -> App {
    App::new(AppConfig::default())
}

#[test]
fn test_app_initialization() {
    let app = create_test_app();
    assert!(app.is_running);
    assert_eq!(app.focus, Panel::Browser);
    assert_eq!(app.sort_by, SortKey::Name);
    assert_eq!(app.sort_order, SortOrder::Asc);
    assert!(app.listing.is_empty());
    assert!(app.player.context().current().is_none());
    assert!(app.toast.is_none());
}

#[test]
fn test_default_permissions_allow_everything() {
    let perms = Permissions::default();
    assert!(perms.can_use_playlists);
    assert!(perms.can_download);
    assert!(perms.can_use_subtitles);
}

#[test]
fn test_toast_expires_after_lifetime() {
    let mut app = create_test_app();
    app.show_toast("Video not found");
    assert!(app.toast.is_some());

    let deadline = app.toast.as_ref().unwrap().deadline;
    app.on_tick(deadline - Duration::from_millis(1));
    assert!(app.toast.is_some());

    app.on_tick(deadline + Duration::from_millis(1));
    assert!(app.toast.is_none());
}

#[test]
fn test_rapid_toast_updates_keep_start_time() {
    let mut app = create_test_app();
    app.show_toast("first");
    let start = app.toast.as_ref().unwrap().start_time;

    app.show_toast("second");
    let toast = app.toast.as_ref().unwrap();
    assert_eq!(toast.message, "second");
    assert_eq!(toast.start_time, start);
    assert!(toast.deadline >= start + NOTICE_LIFETIME);
}

#[test]
fn test_browse_response_replaces_listing_and_catalog() {
    let mut app = create_test_app();
    app.browser_selected = 5;

    let resp: BrowseResponse = serde_json::from_str(
        r#"{
            "items": [
                {"name": "Movies", "type": "folder", "path": "movies", "children": [
                    {"name": "Heat.mp4", "type": "video", "path": "movies/heat.mp4",
                     "url": "/static/videos/movies/heat.mp4", "size": 700, "duration": 6120.5}
                ]},
                {"name": "song.mp3", "type": "audio", "path": "song.mp3", "size": 9000}
            ],
            "current_path": "",
            "parent_path": null
        }"#,
    )
    .unwrap();

    app.apply_browse(resp);

    assert_eq!(app.listing.len(), 2);
    assert_eq!(app.browser_selected, 0);
    // Folders are flattened away; both playable items are reachable.
    assert_eq!(app.player.catalog().len(), 2);
    assert_eq!(
        app.player
            .catalog()
            .items()
            .first()
            .map(|i| i.path.as_str()),
        Some("movies/heat.mp4")
    );
}

#[test]
fn test_search_results_carry_containing_folder() {
    let resp: SearchResponse = serde_json::from_str(
        r#"{
            "results": [
                {"name": "heat.mp4", "type": "video", "path": "movies/heat.mp4",
                 "folder": "movies", "size": 700},
                {"name": "movies", "type": "folder", "path": "movies", "folder": "Root"}
            ],
            "query": "hea",
            "count": 2
        }"#,
    )
    .unwrap();

    assert_eq!(resp.count, 2);
    assert_eq!(resp.results[0].folder.as_deref(), Some("movies"));
    assert_eq!(resp.results[1].kind, MediaKind::Folder);
}

#[test]
fn test_playlist_play_response_resolves_videos() {
    let resp: PlaylistPlayResponse = serde_json::from_str(
        r#"{
            "playlist": {
                "id": 3,
                "name": "Evening",
                "description": "wind down",
                "videos": [
                    {"name": "a.mp4", "type": "video", "path": "a.mp4",
                     "url": "/static/videos/a.mp4", "size": 1, "thumbnail": null}
                ]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(resp.playlist.id, 3);
    assert_eq!(resp.playlist.videos.len(), 1);
    assert!(resp.playlist.videos[0].is_playable());
}

#[test]
fn test_clear_search_resets_everything() {
    let mut app = create_test_app();
    app.search_active = true;
    app.search_open = true;
    app.search_query = "pink floyd".to_string();
    app.apply_search(SearchResponse {
        results: vec![],
        query: "pink floyd".to_string(),
        count: 0,
    });

    app.clear_search();
    assert!(!app.search_active);
    assert!(!app.search_open);
    assert!(app.search_query.is_empty());
    assert!(app.search_results.is_empty());
}

#[test]
fn test_search_kind_toggle() {
    assert_eq!(SearchKind::File.toggle(), SearchKind::Folder);
    assert_eq!(SearchKind::Folder.toggle(), SearchKind::File);
    assert_eq!(SearchKind::File.as_str(), "file");
    assert_eq!(SearchKind::Folder.as_str(), "folder");
}

#[test]
fn test_sort_cycling_covers_all_keys() {
    let mut key = SortKey::Name;
    let mut seen = vec![key];
    for _ in 0..4 {
        key = key.cycle();
        seen.push(key);
    }
    assert_eq!(key.cycle(), SortKey::Name);
    seen.sort_by_key(|k| k.as_str());
    seen.dedup();
    assert_eq!(seen.len(), 5);

    assert_eq!(SortOrder::Asc.toggle(), SortOrder::Desc);
    assert_eq!(SortOrder::Desc.toggle(), SortOrder::Asc);
}

#[test]
fn test_theme_toggle_flips_mode() {
    let mut app = create_test_app();
    assert_eq!(app.theme_mode, ThemeMode::Dark);
    app.toggle_theme();
    assert_eq!(app.theme_mode, ThemeMode::Light);
    assert_eq!(app.config.theme, ThemeMode::Light);
    app.toggle_theme();
    assert_eq!(app.theme_mode, ThemeMode::Dark);
}

#[test]
fn test_breadcrumb_from_current_path() {
    let mut app = create_test_app();
    assert_eq!(app.breadcrumb(), vec!["Home".to_string()]);

    app.current_path = "movies/classics".to_string();
    assert_eq!(
        app.breadcrumb(),
        vec!["Home".to_string(), "movies".to_string(), "classics".to_string()]
    );
}

#[test]
fn test_playlist_form_field_cycling() {
    let mut form = PlaylistForm::default();
    assert_eq!(form.active_field, 0);

    form.active_value().push_str("Late Night");
    form.next_field();
    assert_eq!(form.active_field, 1);
    form.active_value().push_str("after hours");
    form.next_field();
    assert_eq!(form.active_field, 0);

    assert_eq!(form.name, "Late Night");
    assert_eq!(form.description, "after hours");
}

#[test]
fn test_playlist_selection_clamps_after_refetch() {
    let mut app = create_test_app();
    app.playlist_selected = 4;
    app.apply_playlists(vec![]);
    assert_eq!(app.playlist_selected, 0);
}

#[test]
fn test_tick_hides_controls_after_inactivity() {
    let mut app = create_test_app();
    let now = Instant::now();

    app.player.on_play_state_changed(now, true);
    assert!(app.player.controls_visible());

    app.on_tick(now + Duration::from_millis(3000));
    assert!(!app.player.controls_visible());
}
