pub mod mpv;

use anyhow::Result;

/// Events coming back from the playback surface, delivered into the app
/// event loop like any other event.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Media reached its natural end (auto-advance trigger).
    Ended,
    /// The surface failed to load or decode the current item.
    Error(String),
    Paused(bool),
    /// Playback position, seconds.
    Position(f64),
    /// Media duration, seconds.
    Duration(f64),
}

/// The media-element seam: everything the orchestrator's side effects need
/// from a playback surface. Implementations must not block the event loop;
/// completion and state changes come back as [`PlayerEvent`]s.
pub trait Transport: Send + Sync {
    fn load(&self, url: &str, title: &str) -> Result<()>;
    fn toggle_pause(&self) -> Result<()>;
    /// Relative seek, seconds (negative seeks backwards).
    fn seek_by(&self, secs: f64) -> Result<()>;
    /// Volume delta as a fraction of full scale (0.1 == one arrow step).
    fn adjust_volume(&self, delta: f64) -> Result<()>;
    fn toggle_fullscreen(&self) -> Result<()>;
    fn add_subtitle(&self, url: &str, language: &str, name: &str) -> Result<()>;
    fn quit(&self) -> Result<()> {
        Ok(())
    }
}
