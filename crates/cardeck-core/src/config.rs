use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Card face width in terminal cells
    #[serde(default = "default_card_width_cells")]
    pub card_width_cells: u16,
    /// Horizontal distance between card anchors in terminal cells
    #[serde(default = "default_card_step_cells")]
    pub card_step_cells: u16,
    /// Show card keywords on the card face
    #[serde(default = "default_true")]
    pub show_keywords: bool,
    /// Theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            card_width_cells: default_card_width_cells(),
            card_step_cells: default_card_step_cells(),
            show_keywords: default_true(),
            theme: default_theme_name(),
        }
    }
}

/// Easing curve applied to the carousel snap animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

/// Geometry and gesture tuning for the card carousel.
///
/// Pixel values describe the engine's abstract coordinate space; the TUI
/// maps them onto terminal cells via `card_step_cells`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Distance between adjacent card anchors, in pixels
    #[serde(default = "default_step_px")]
    pub step_px: f64,
    /// Card face width, in pixels
    #[serde(default = "default_card_width_px")]
    pub card_width_px: f64,
    /// Snap animation duration in milliseconds (0 = instant)
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Extra delay after the snap animation before the silent re-seat runs
    #[serde(default = "default_reseat_margin_ms")]
    pub reseat_margin_ms: u64,
    /// Wrap around the ends of the deck
    #[serde(default = "default_true")]
    pub loop_enabled: bool,
    /// Pointer travel before a gesture is treated as a pan
    #[serde(default = "default_gesture_threshold")]
    pub drag_acquire_px: f64,
    /// Maximum press-to-release travel for a tap to activate a card
    #[serde(default = "default_gesture_threshold")]
    pub click_threshold_px: f64,
    /// Easing curve for the snap animation
    #[serde(default = "default_easing")]
    pub easing: EasingType,
    /// Frame rate while a snap animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            step_px: default_step_px(),
            card_width_px: default_card_width_px(),
            animation_ms: default_animation_ms(),
            reseat_margin_ms: default_reseat_margin_ms(),
            loop_enabled: default_true(),
            drag_acquire_px: default_gesture_threshold(),
            click_threshold_px: default_gesture_threshold(),
            easing: default_easing(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Focus the panel to the left
    #[serde(default = "default_key_focus_left")]
    pub focus_left: String,
    /// Focus the panel to the right
    #[serde(default = "default_key_focus_right")]
    pub focus_right: String,
    /// Move deck selection down
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    /// Move deck selection up
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    /// Advance the carousel by one card
    #[serde(default = "default_key_next_card")]
    pub next_card: String,
    /// Step the carousel back by one card
    #[serde(default = "default_key_prev_card")]
    pub prev_card: String,
    /// Jump to the first card
    #[serde(default = "default_key_first_card")]
    pub first_card: String,
    /// Jump to the last card
    #[serde(default = "default_key_last_card")]
    pub last_card: String,
    /// Open the current card / confirm
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Flip the opened card between front and back
    #[serde(default = "default_key_flip")]
    pub flip: String,
    /// Start filtering the deck list
    #[serde(default = "default_key_filter")]
    pub filter: String,
    /// Reload decks from disk
    #[serde(default = "default_key_reload")]
    pub reload: String,
    /// Toggle the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            focus_left: default_key_focus_left(),
            focus_right: default_key_focus_right(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            next_card: default_key_next_card(),
            prev_card: default_key_prev_card(),
            first_card: default_key_first_card(),
            last_card: default_key_last_card(),
            select: default_key_select(),
            flip: default_key_flip(),
            filter: default_key_filter(),
            reload: default_key_reload(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_focus_left() -> String { "h".to_string() }
fn default_key_focus_right() -> String { "l".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_next_card() -> String { "n".to_string() }
fn default_key_prev_card() -> String { "p".to_string() }
fn default_key_first_card() -> String { "g".to_string() }
fn default_key_last_card() -> String { "G".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_flip() -> String { "f".to_string() }
fn default_key_filter() -> String { "/".to_string() }
fn default_key_reload() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_card_width_cells() -> u16 {
    28
}

fn default_card_step_cells() -> u16 {
    12
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_step_px() -> f64 {
    200.0
}

fn default_card_width_px() -> f64 {
    288.0
}

fn default_animation_ms() -> u64 {
    260
}

fn default_reseat_margin_ms() -> u64 {
    20
}

fn default_gesture_threshold() -> f64 {
    8.0
}

fn default_easing() -> EasingType {
    EasingType::EaseOut
}

fn default_animation_fps() -> u16 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Configuration file path: ~/.config/cardeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("cardeck")
            .join("config.toml")
    }

    /// Data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Directory holding the deck files
    pub fn decks_dir(&self) -> PathBuf {
        self.data_dir().join("decks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.carousel.step_px, 200.0);
        assert_eq!(config.carousel.card_width_px, 288.0);
        assert_eq!(config.carousel.animation_ms, 260);
        assert!(config.carousel.loop_enabled);
        assert_eq!(config.carousel.easing, EasingType::EaseOut);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            loop_enabled = false
            animation_ms = 120
            "#,
        )
        .unwrap();
        assert!(!config.carousel.loop_enabled);
        assert_eq!(config.carousel.animation_ms, 120);
        assert_eq!(config.carousel.step_px, 200.0);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_easing_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            easing = "cubic"
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.easing, EasingType::Cubic);
    }

    #[test]
    fn test_decks_dir_under_data_dir() {
        let config = AppConfig::default();
        assert!(config.decks_dir().ends_with("decks"));
    }
}
