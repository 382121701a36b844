//! Game settings and preferences
//!
//! Stored as JSON: LocalStorage in the browser, a file named by
//! `RETRO_ARCADE_SETTINGS` natively.

use serde::{Deserialize, Serialize};

use crate::consts::breakout::AUTO_RESTART_FRAMES;
use crate::error::SettingsError;

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    #[default]
    Pong,
    Breakout,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Pong => "pong",
            GameKind::Breakout => "breakout",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pong" => Some(GameKind::Pong),
            "breakout" | "bricks" => Some(GameKind::Breakout),
            _ => None,
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Pong => "Retro Pong",
            GameKind::Breakout => "Breakout",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game to start
    pub game: GameKind,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Session ===
    /// Fixed serve seed; None picks one from the clock
    pub seed: Option<u64>,
    /// Breakout returns to play on its own after showing the result
    pub breakout_auto_restart: bool,
    /// Frames the native attract mode runs before exiting
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameKind::Pong,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Session
            seed: None,
            breakout_auto_restart: true,
            demo_frames: 600,
        }
    }
}

impl Settings {
    /// Auto-restart delay for the selected game, in frames
    pub fn auto_restart_frames(&self) -> Option<u32> {
        (self.game == GameKind::Breakout && self.breakout_auto_restart)
            .then_some(AUTO_RESTART_FRAMES)
    }

    /// Override the game from a URL query string such as `?game=breakout`.
    /// Returns true when the selection changed.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let game = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "game")
            .and_then(|(_, value)| GameKind::from_str(value));

        self.select(game)
    }

    fn select(&mut self, game: Option<GameKind>) -> bool {
        match game {
            Some(game) if game != self.game => {
                self.game = game;
                true
            }
            _ => false,
        }
    }

    /// Override the game from command line arguments (program name excluded).
    /// Returns true when the selection changed.
    pub fn apply_args<I, S>(&mut self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(first) = args.into_iter().next() else {
            return false;
        };
        let game = GameKind::from_str(first.as_ref());
        if game.is_none() {
            log::warn!("Unknown game {:?}, keeping {}", first.as_ref(), self.game.as_str());
        }
        self.select(game)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "retro_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SettingsError::Storage("LocalStorage unavailable".into()))?;

        let json = serde_json::to_string(self)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Environment variable naming the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub const PATH_VAR: &'static str = "RETRO_ARCADE_SETTINGS";

    /// Load settings from the file named by `RETRO_ARCADE_SETTINGS`.
    /// Unset variable or missing file gives defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, SettingsError> {
        match std::env::var_os(Self::PATH_VAR) {
            Some(path) => Self::load_from(std::path::Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = serde_json::from_str(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write to the file named by `RETRO_ARCADE_SETTINGS`; no-op when unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SettingsError> {
        match std::env::var_os(Self::PATH_VAR) {
            Some(path) => self.save_to(std::path::Path::new(&path)),
            None => Ok(()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_names() {
        for kind in [GameKind::Pong, GameKind::Breakout] {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_str(" BREAKOUT "), Some(GameKind::Breakout));
        assert_eq!(GameKind::from_str("tetris"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"game":"breakout","muted":true}"#).unwrap();

        assert_eq!(settings.game, GameKind::Breakout);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_auto_restart_only_for_breakout() {
        let mut settings = Settings::default();
        assert_eq!(settings.auto_restart_frames(), None);

        settings.game = GameKind::Breakout;
        assert_eq!(settings.auto_restart_frames(), Some(180));

        settings.breakout_auto_restart = false;
        assert_eq!(settings.auto_restart_frames(), None);
    }

    #[test]
    fn test_query_override() {
        let mut settings = Settings::default();
        assert!(settings.apply_query("?debug=1&game=breakout"));
        assert_eq!(settings.game, GameKind::Breakout);

        assert!(!settings.apply_query("?game=chess"));
        assert_eq!(settings.game, GameKind::Breakout);

        assert!(!settings.apply_query(""));
        assert!(!settings.apply_query("?game=breakout"));
        assert_eq!(settings.game, GameKind::Breakout);
    }

    #[test]
    fn test_args_override() {
        let mut settings = Settings::default();
        assert!(settings.apply_args(["breakout", "extra"]));
        assert_eq!(settings.game, GameKind::Breakout);

        assert!(!settings.apply_args(["nonsense"]));
        assert_eq!(settings.game, GameKind::Breakout);

        assert!(!settings.apply_args(Vec::<String>::new()));
        assert_eq!(settings.game, GameKind::Breakout);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("retro-arcade-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let missing = Settings::load_from(&dir.join("absent.json")).unwrap();
        assert_eq!(missing, Settings::default());

        let settings = Settings {
            game: GameKind::Breakout,
            seed: Some(7),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Json(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
