use crossterm::event::Event;

use crate::api::client::ApiError;
use crate::api::models::{
    BrowseResponse, Permissions, Playlist, PlaylistSummary, SearchResponse, SubtitleTrack,
};
use crate::transport::PlayerEvent;

/// Everything that can wake the event loop. Fetch completions re-enter here
/// instead of being awaited in place, so a stale response simply overwrites
/// whatever a newer one already wrote (last-response-wins).
pub enum AppEvent {
    Input(Event),
    PermissionsLoaded(Result<Permissions, ApiError>),
    BrowseLoaded(Result<BrowseResponse, ApiError>),
    SearchLoaded(Result<SearchResponse, ApiError>),
    PlaylistsLoaded(Result<Vec<PlaylistSummary>, ApiError>),
    PlaylistResolved(Result<Playlist, ApiError>),
    /// A playlist mutation finished; carries the success notice text.
    PlaylistMutated(Result<&'static str, ApiError>),
    SubtitlesLoaded {
        path: String,
        tracks: Vec<SubtitleTrack>,
    },
    Player(PlayerEvent),
    Tick,
}
