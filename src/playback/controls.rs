use std::time::{Duration, Instant};

/// Inactivity window before the transport controls hide.
pub const CONTROLS_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Single-shot, restartable countdown for the on-screen transport controls.
///
/// The pending hide is plain data (a deadline) expired on the tick event, so
/// there is structurally at most one outstanding timer: arming overwrites
/// the previous deadline, cancelling clears it. Every method takes `now`
/// explicitly, which keeps the whole thing deterministic under test.
#[derive(Debug)]
pub struct ControlsTimer {
    visible: bool,
    hide_at: Option<Instant>,
}

impl Default for ControlsTimer {
    fn default() -> Self {
        Self {
            visible: true,
            hide_at: None,
        }
    }
}

impl ControlsTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn pending(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Activity on the playback surface: show the controls and, only while
    /// the transport is playing, restart the hide countdown.
    pub fn poke(&mut self, now: Instant, playing: bool) {
        self.visible = true;
        self.hide_at = if playing {
            Some(now + CONTROLS_HIDE_DELAY)
        } else {
            None
        };
    }

    /// Cancel any pending hide without touching visibility (pointer resting
    /// on the controls surface).
    pub fn suppress(&mut self) {
        self.hide_at = None;
    }

    /// Transitioning to playing restarts the countdown; pausing cancels it
    /// and forces the controls visible.
    pub fn on_play_state_changed(&mut self, now: Instant, playing: bool) {
        if playing {
            self.poke(now, true);
        } else {
            self.hide_at = None;
            self.visible = true;
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(deadline) = self.hide_at {
            if now >= deadline {
                self.visible = false;
                self.hide_at = None;
            }
        }
    }
}
