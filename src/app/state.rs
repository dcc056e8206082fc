use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use super::config::AppConfig;
use super::keys::KeyConfig;
use crate::api::models::{
    BrowseResponse, MediaItem, Permissions, PlaylistSummary, SearchKind, SearchResponse, SortKey,
    SortOrder, SubtitleTrack,
};
use crate::playback::Orchestrator;
use crate::ui::theme::{Theme, ThemeMode};

/// How long a notice stays on screen.
pub const NOTICE_LIFETIME: Duration = Duration::from_millis(4000);

/// Which pane list navigation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Browser,
    /// The bound-playlist viewer next to the player.
    Viewer,
}

/// Transient auto-dismissing notice, top-right.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// Two-field form for creating a playlist.
#[derive(Debug, Clone, Default)]
pub struct PlaylistForm {
    pub name: String,
    pub description: String,
    pub active_field: usize, // 0=name, 1=description
}

impl PlaylistForm {
    pub fn active_value(&mut self) -> &mut String {
        match self.active_field {
            0 => &mut self.name,
            _ => &mut self.description,
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % 2;
    }
}

pub struct App {
    pub is_running: bool,
    pub theme: Theme,
    pub theme_mode: ThemeMode,
    pub keys: KeyConfig,
    pub permissions: Permissions,

    /// File browser (remote folder tree)
    pub listing: Vec<MediaItem>,
    pub current_path: String,
    pub parent_path: Option<String>,
    pub browser_selected: usize,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub loading: bool,

    /// Search
    pub search_active: bool, // typing into the search box
    pub search_open: bool,   // results overlay visible
    pub search_kind: SearchKind,
    pub search_query: String,
    pub search_results: Vec<MediaItem>,
    pub search_selected: usize,

    /// Playlists
    pub playlists_open: bool,
    pub playlists: Vec<PlaylistSummary>,
    pub playlist_selected: usize,
    /// Path waiting for a playlist pick ("add to playlist" flow).
    pub pending_add: Option<String>,
    pub viewer_selected: usize,

    /// Playback
    pub player: Orchestrator,
    pub subtitles: Vec<SubtitleTrack>,
    pub position_secs: f64,
    pub duration_secs: f64,

    /// UI chrome
    pub focus: Panel,
    pub toast: Option<Toast>,
    pub form: Option<PlaylistForm>,
    pub show_keyhints: bool,
    /// Where the transport controls were drawn last frame (pointer hit-testing).
    pub controls_area: Option<Rect>,

    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            is_running: true,
            theme: Theme::for_mode(config.theme),
            theme_mode: config.theme,
            keys: config.keys.clone(),
            permissions: Permissions::default(),

            listing: Vec::new(),
            current_path: String::new(),
            parent_path: None,
            browser_selected: 0,
            sort_by: config.sort_by,
            sort_order: config.sort_order,
            loading: false,

            search_active: false,
            search_open: false,
            search_kind: SearchKind::default(),
            search_query: String::new(),
            search_results: Vec::new(),
            search_selected: 0,

            playlists_open: false,
            playlists: Vec::new(),
            playlist_selected: 0,
            pending_add: None,
            viewer_selected: 0,

            player: Orchestrator::new(),
            subtitles: Vec::new(),
            position_secs: 0.0,
            duration_secs: 0.0,

            focus: Panel::default(),
            toast: None,
            form: None,
            show_keyhints: false,
            controls_area: None,

            config,
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + NOTICE_LIFETIME;

        if let Some(ref mut current) = self.toast {
            // Rapid updates extend the deadline but keep start_time so the
            // entrance animation doesn't flash.
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to expire deadlines.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(ref toast) = self.toast {
            if now > toast.deadline {
                self.toast = None;
            }
        }
        self.player.on_tick(now);
    }

    /// A browse response replaces the listing and the catalog wholesale.
    pub fn apply_browse(&mut self, resp: BrowseResponse) {
        self.player.set_catalog(&resp.items);
        self.listing = resp.items;
        self.current_path = resp.current_path;
        self.parent_path = resp.parent_path;
        self.browser_selected = 0;
        self.loading = false;
    }

    pub fn apply_search(&mut self, resp: SearchResponse) {
        self.search_results = resp.results;
        self.search_selected = 0;
        self.search_open = !self.search_query.is_empty();
    }

    pub fn apply_playlists(&mut self, playlists: Vec<PlaylistSummary>) {
        if self.playlist_selected >= playlists.len() {
            self.playlist_selected = playlists.len().saturating_sub(1);
        }
        self.playlists = playlists;
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_open = false;
        self.search_query.clear();
        self.search_results.clear();
        self.search_selected = 0;
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggle();
        self.theme = Theme::for_mode(self.theme_mode);
        self.config.theme = self.theme_mode;
        self.config.save();
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.listing.get(self.browser_selected)
    }

    pub fn selected_search_result(&self) -> Option<&MediaItem> {
        self.search_results.get(self.search_selected)
    }

    /// Breadcrumb segments: Home plus each component of the current path.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut parts = vec!["Home".to_string()];
        parts.extend(
            self.current_path
                .split('/')
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        );
        parts
    }

    /// The on-screen "currently active" marker.
    pub fn is_active_path(&self, path: &str) -> bool {
        self.player.context().is_current(path)
    }
}
