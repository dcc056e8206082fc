use super::catalog::MediaCatalog;
use super::PlaybackError;
use crate::api::models::{MediaItem, Playlist};

/// A playlist currently driving next/previous semantics.
///
/// Invariant: `index` is always a valid position in `playlist.videos`, and
/// the item at that position is the context's `current` (by path). Both are
/// only ever written together, so the triple cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundPlaylist {
    pub playlist: Playlist,
    pub index: usize,
}

/// What is playing, and under which sequencing scheme. While a playlist is
/// bound it owns next/previous; falling off either end degrades to flat
/// catalog order instead of stopping.
#[derive(Debug, Default)]
pub struct PlaybackContext {
    current: Option<MediaItem>,
    bound: Option<BoundPlaylist>,
}

impl PlaybackContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    pub fn bound(&self) -> Option<&BoundPlaylist> {
        self.bound.as_ref()
    }

    pub fn bound_index(&self) -> Option<usize> {
        self.bound.as_ref().map(|b| b.index)
    }

    pub fn is_current(&self, path: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.path == path)
    }

    /// Play `item` outside any playlist. Idempotent; reloading the item
    /// already playing is fine. Always clears the playlist binding.
    pub fn load_standalone(&mut self, item: MediaItem) {
        self.current = Some(item);
        self.bound = None;
    }

    /// Bind `playlist` and play the video at `index`.
    pub fn load_from_playlist(
        &mut self,
        playlist: Playlist,
        index: usize,
    ) -> Result<MediaItem, PlaybackError> {
        let len = playlist.videos.len();
        if index >= len {
            return Err(PlaybackError::OutOfRange { index, len });
        }
        let item = playlist.videos[index].clone();
        self.current = Some(item.clone());
        self.bound = Some(BoundPlaylist { playlist, index });
        Ok(item)
    }

    /// Move to the next item: within the bound playlist while one remains,
    /// otherwise the catalog item after the current one (which also drops
    /// the binding: a finished playlist falls through to flat browsing).
    /// `None` means nothing to advance to; state is left untouched.
    pub fn advance(&mut self, catalog: &MediaCatalog) -> Option<MediaItem> {
        if let Some(bound) = self.bound.as_mut() {
            if bound.index + 1 < bound.playlist.videos.len() {
                bound.index += 1;
                let item = bound.playlist.videos[bound.index].clone();
                self.current = Some(item.clone());
                return Some(item);
            }
        }

        let next = {
            let current = self.current.as_ref()?;
            catalog.next_after(&current.path)?.clone()
        };
        self.bound = None;
        self.current = Some(next.clone());
        Some(next)
    }

    /// Mirror of [`advance`](Self::advance), moving backwards.
    pub fn retreat(&mut self, catalog: &MediaCatalog) -> Option<MediaItem> {
        if let Some(bound) = self.bound.as_mut() {
            if bound.index > 0 {
                bound.index -= 1;
                let item = bound.playlist.videos[bound.index].clone();
                self.current = Some(item.clone());
                return Some(item);
            }
        }

        let prev = {
            let current = self.current.as_ref()?;
            catalog.prev_before(&current.path)?.clone()
        };
        self.bound = None;
        self.current = Some(prev.clone());
        Some(prev)
    }

    /// Drop the playlist binding, keeping whatever is playing.
    pub fn unbind(&mut self) {
        self.bound = None;
    }
}
