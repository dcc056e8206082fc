use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::keys::KeyConfig;
use crate::api::models::{SortKey, SortOrder};
use crate::ui::theme::ThemeMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Media server base URL.
    pub server: String,
    /// "dark" or "light"; flipped and re-saved by the theme toggle.
    pub theme: ThemeMode,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub keys: KeyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:5000".to_string(),
            theme: ThemeMode::Dark,
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
            keys: KeyConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let dir = home.join(".config").join("kino");

        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }

        dir
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load config.toml, creating a default one on first run.
    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                    warn!("malformed config.toml ({e}), using defaults");
                    Self::default()
                }),
                Err(_) => Self::default(),
            }
        } else {
            let config = Self::default();
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = fs::write(&path, content);
            }
            config
        }
    }

    pub fn save(&self) {
        if let Ok(content) = toml::to_string_pretty(self) {
            let _ = fs::write(Self::config_path(), content);
        }
    }
}
