pub mod catalog;
pub mod context;
pub mod controls;
pub mod orchestrator;

pub use catalog::MediaCatalog;
pub use context::{BoundPlaylist, PlaybackContext};
pub use controls::{ControlsTimer, CONTROLS_HIDE_DELAY};
pub use orchestrator::Orchestrator;

use thiserror::Error;

/// Everything here is recovered at the orchestrator boundary: each variant
/// becomes a transient notice and leaves playback state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Video not found: {0}")]
    NotFound(String),
    #[error("Playlist index {index} out of range ({len} videos)")]
    OutOfRange { index: usize, len: usize },
    #[error("Playlist is empty or not found")]
    EmptyPlaylist,
}
