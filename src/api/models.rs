use serde::{Deserialize, Serialize};

/// What the server says an entry is. Folders may nest arbitrarily deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Folder,
    Video,
    Audio,
}

/// One entry of a browse or search response. Identity is `path` (unique
/// within the server's virtual filesystem); everything else is a snapshot
/// that gets superseded wholesale by the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub modified: Option<f64>,
    /// Seconds, when the server managed to probe it.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    /// Containing directory, only present on search results ("Root" at top level).
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<MediaItem>>,
}

impl MediaItem {
    pub fn is_playable(&self) -> bool {
        matches!(self.kind, MediaKind::Video | MediaKind::Audio)
    }
}

/// Playlist as listed by `GET /api/playlists`: videos are bare paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Playlist as resolved by `GET /api/playlists/{id}/play`: videos carry the
/// full item objects, in playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub name: String,
    pub url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

/// Feature flags supplied by the server session. Every flag gates both the
/// visible affordance and the corresponding orchestrator path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default = "default_true")]
    pub can_use_playlists: bool,
    #[serde(default = "default_true")]
    pub can_download: bool,
    #[serde(default = "default_true")]
    pub can_use_subtitles: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            can_use_playlists: true,
            can_download: true,
            can_use_subtitles: true,
        }
    }
}

/// Server-side sort key for `/api/browse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Modified,
    Duration,
    Type,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Modified => "modified",
            SortKey::Duration => "duration",
            SortKey::Type => "type",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            SortKey::Name => SortKey::Size,
            SortKey::Size => SortKey::Modified,
            SortKey::Modified => SortKey::Duration,
            SortKey::Duration => SortKey::Type,
            SortKey::Type => SortKey::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// File search matches media files, folder search matches directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    File,
    Folder,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::File => "file",
            SearchKind::Folder => "folder",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SearchKind::File => SearchKind::Folder,
            SearchKind::Folder => SearchKind::File,
        }
    }
}

// Response envelopes.

#[derive(Debug, Clone, Deserialize)]
pub struct BrowseResponse {
    pub items: Vec<MediaItem>,
    #[serde(default)]
    pub current_path: String,
    #[serde(default)]
    pub parent_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<MediaItem>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<PlaylistSummary>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistPlayResponse {
    pub playlist: Playlist,
}

#[derive(Debug, Deserialize)]
pub struct CreatedPlaylistResponse {
    pub playlist_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubtitlesResponse {
    pub subtitles: Vec<SubtitleTrack>,
}

#[derive(Debug, Deserialize)]
pub struct PermissionsResponse {
    pub permissions: Permissions,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
