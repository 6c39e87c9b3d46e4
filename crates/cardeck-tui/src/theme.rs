use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,
    pub purple: Color,

    // Semantic colors
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

impl Theme {
    /// Gruvbox Material dark palette
    pub fn gruvbox_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            red: Color::Rgb(0xea, 0x69, 0x62),
            orange: Color::Rgb(0xe7, 0x8a, 0x4e),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            purple: Color::Rgb(0xd3, 0x86, 0x9b),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }

    /// Gruvbox Material light palette
    pub fn gruvbox_light() -> Self {
        Self {
            bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
            bg1: Color::Rgb(0xf2, 0xe5, 0xbc),
            bg2: Color::Rgb(0xe5, 0xd5, 0xad),
            fg0: Color::Rgb(0x65, 0x47, 0x35),
            fg1: Color::Rgb(0x4f, 0x38, 0x29),
            grey0: Color::Rgb(0xa8, 0x98, 0x84),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            red: Color::Rgb(0xc1, 0x4a, 0x4a),
            orange: Color::Rgb(0xc3, 0x5e, 0x0a),
            yellow: Color::Rgb(0xb4, 0x71, 0x09),
            green: Color::Rgb(0x6c, 0x78, 0x2e),
            aqua: Color::Rgb(0x4c, 0x7a, 0x5d),
            blue: Color::Rgb(0x45, 0x70, 0x7a),
            purple: Color::Rgb(0x94, 0x5e, 0x80),
            selection: Color::Rgb(0xe5, 0xd5, 0xad),
            error: Color::Rgb(0xc1, 0x4a, 0x4a),
            success: Color::Rgb(0x6c, 0x78, 0x2e),
            accent: Color::Rgb(0x4c, 0x7a, 0x5d),
        }
    }

    /// Accent color for a deck's named theme; decks without a theme (or with
    /// an unknown one) fall back to the UI accent
    pub fn deck_accent(&self, deck_theme: Option<&str>) -> Color {
        match deck_theme {
            Some("red") => self.red,
            Some("orange") => self.orange,
            Some("yellow") => self.yellow,
            Some("green") => self.green,
            Some("aqua") => self.aqua,
            Some("blue") => self.blue,
            Some("purple") => self.purple,
            _ => self.accent,
        }
    }
}

/// Load a theme by name, falling back to the default on unknown names
pub fn load_theme(name: &str) -> Theme {
    match name {
        "gruvbox-dark" => Theme::gruvbox_dark(),
        "gruvbox-light" => Theme::gruvbox_light(),
        other => {
            warn!("Unknown theme '{}', falling back to gruvbox-dark", other);
            Theme::default()
        }
    }
}
