use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// String-keyed bindings so users can remap everything from config.toml.
/// A `C-` prefix means Ctrl (e.g. "C-f").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub toggle_keyhints: String,
    pub theme: String,
    pub search: String,

    // Transport
    pub play_pause: String,
    pub next: String,
    pub prev: String,
    pub seek_forward: String,
    pub seek_backward: String,
    pub volume_up: String,
    pub volume_down: String,
    pub fullscreen: String,

    // Browser / lists
    pub nav_up: String,
    pub nav_down: String,
    pub open: String,
    pub back: String,
    pub dismiss: String,
    pub focus_next: String,
    pub sort_key: String,
    pub sort_order: String,
    pub download: String,
    pub add_to_playlist: String,

    // Playlist panel
    pub playlists: String,
    pub create_playlist: String,
    pub delete_item: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            toggle_keyhints: "?".to_string(),
            theme: "t".to_string(),
            search: "C-f".to_string(),

            play_pause: "Space".to_string(),
            next: "n".to_string(),
            prev: "p".to_string(),
            seek_forward: "Right".to_string(),
            seek_backward: "Left".to_string(),
            volume_up: "Up".to_string(),
            volume_down: "Down".to_string(),
            fullscreen: "f".to_string(),

            nav_up: "k".to_string(),
            nav_down: "j".to_string(),
            open: "Enter".to_string(),
            back: "Backspace".to_string(),
            dismiss: "Esc".to_string(),
            focus_next: "Tab".to_string(),
            sort_key: "s".to_string(),
            sort_order: "o".to_string(),
            download: "d".to_string(),
            add_to_playlist: "a".to_string(),

            playlists: "l".to_string(),
            create_playlist: "c".to_string(),
            delete_item: "d".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        if let Some(rest) = key_str.strip_prefix("C-") {
            return event.modifiers.contains(KeyModifiers::CONTROL)
                && code_matches(event, rest);
        }
        // Bare bindings must not swallow Ctrl chords.
        !event.modifiers.contains(KeyModifiers::CONTROL) && code_matches(event, key_str)
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Space" => "Space".to_string(),
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "Backspace" => "Bksp".to_string(),
            "Enter" => "Enter".to_string(),
            s => s.to_string(),
        }
    }
}

fn code_matches(event: KeyEvent, key_str: &str) -> bool {
    match key_str {
        "Space" => event.code == KeyCode::Char(' '),
        "Enter" => event.code == KeyCode::Enter,
        "Backspace" => event.code == KeyCode::Backspace,
        "Esc" => event.code == KeyCode::Esc,
        "Tab" => event.code == KeyCode::Tab,
        "BackTab" => event.code == KeyCode::BackTab,
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "Left" => event.code == KeyCode::Left,
        "Right" => event.code == KeyCode::Right,
        s if s.chars().count() == 1 => {
            if let Some(ch) = s.chars().next() {
                if ch.is_uppercase() {
                    event.code == KeyCode::Char(ch)
                        || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                            && event.modifiers.contains(KeyModifiers::SHIFT))
                } else {
                    event.code == KeyCode::Char(ch)
                }
            } else {
                false
            }
        }
        _ => false,
    }
}
