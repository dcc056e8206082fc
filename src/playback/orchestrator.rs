use std::time::Instant;

use tracing::debug;

use super::catalog::MediaCatalog;
use super::context::{BoundPlaylist, PlaybackContext};
use super::controls::ControlsTimer;
use super::PlaybackError;
use crate::api::models::{MediaItem, Playlist};

/// Translates user/system events into playback transitions.
///
/// Owns the catalog, the context, and the controls timer; all mutation
/// happens on the event-loop task, one event at a time. Successful
/// operations return the newly loaded item so the caller can swap the
/// media source. The item highlight and playlist row marker are derived
/// from the context at render time and can never go stale between
/// transitions.
#[derive(Debug, Default)]
pub struct Orchestrator {
    context: PlaybackContext,
    catalog: MediaCatalog,
    controls: ControlsTimer,
    playing: bool,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &PlaybackContext {
        &self.context
    }

    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.visible()
    }

    /// Replace the catalog with the flatten of a fresh browse tree.
    pub fn set_catalog(&mut self, tree: &[MediaItem]) {
        self.catalog.rebuild(tree);
        debug!(playable = self.catalog.len(), "catalog rebuilt");
    }

    /// Play the catalog item at `path`, outside any playlist.
    pub fn play_standalone(&mut self, path: &str) -> Result<MediaItem, PlaybackError> {
        let item = self
            .catalog
            .find(path)
            .cloned()
            .ok_or_else(|| PlaybackError::NotFound(path.to_string()))?;
        self.context.load_standalone(item.clone());
        debug!(path, "standalone playback");
        Ok(item)
    }

    /// Bind `playlist` and start at `index`.
    pub fn play_playlist_from(
        &mut self,
        playlist: Playlist,
        index: usize,
    ) -> Result<MediaItem, PlaybackError> {
        if playlist.videos.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        let name = playlist.name.clone();
        let item = self.context.load_from_playlist(playlist, index)?;
        debug!(playlist = %name, index, "playlist playback");
        Ok(item)
    }

    /// Jump to another row of the playlist that is already bound.
    pub fn play_bound_index(&mut self, index: usize) -> Result<MediaItem, PlaybackError> {
        let playlist = match self.context.bound() {
            Some(BoundPlaylist { playlist, .. }) => playlist.clone(),
            None => return Err(PlaybackError::OutOfRange { index, len: 0 }),
        };
        self.context.load_from_playlist(playlist, index)
    }

    /// `None` means playback has nowhere to go; that is not an error.
    pub fn next(&mut self) -> Option<MediaItem> {
        self.context.advance(&self.catalog)
    }

    pub fn previous(&mut self) -> Option<MediaItem> {
        self.context.retreat(&self.catalog)
    }

    /// Natural end-of-media auto-advances; load failures never do.
    pub fn on_media_ended(&mut self) -> Option<MediaItem> {
        self.next()
    }

    /// Dismissing the playlist viewer resets the context to fully unbound.
    pub fn unbind(&mut self) {
        self.context.unbind();
    }

    pub fn on_play_state_changed(&mut self, now: Instant, playing: bool) {
        self.playing = playing;
        self.controls.on_play_state_changed(now, playing);
    }

    pub fn poke_controls(&mut self, now: Instant) {
        self.controls.poke(now, self.playing);
    }

    pub fn suppress_controls(&mut self) {
        self.controls.suppress();
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.controls.on_tick(now);
    }
}
