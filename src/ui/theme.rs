//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two Catppuccin palettes are built in, and a custom
//! theme can be loaded from a file with the same layout.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! liked_fg = "#f38ba8"
//! countdown_fg = "#a6e3a1"
//! ```

use crate::domain::error::{Result, ZcatalogError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

const CATPPUCCIN_MOCHA: &str = r##"
name = "catppuccin-mocha"

[colors]
header_fg = "#cdd6f4"
selection_fg = "#1e1e2e"
selection_bg = "#f5c2e7"
text_normal = "#cdd6f4"
text_dim = "#6c7086"
border = "#45475a"
search_bar_border = "#f5c2e7"
match_highlight_fg = "#1e1e2e"
match_highlight_bg = "#f9e2af"
empty_state_fg = "#89b4fa"
liked_fg = "#f38ba8"
countdown_fg = "#a6e3a1"
"##;

const CATPPUCCIN_LATTE: &str = r##"
name = "catppuccin-latte"

[colors]
header_fg = "#4c4f69"
selection_fg = "#eff1f5"
selection_bg = "#ea76cb"
text_normal = "#4c4f69"
text_dim = "#9ca0b0"
border = "#bcc0cc"
search_bar_border = "#ea76cb"
match_highlight_fg = "#eff1f5"
match_highlight_bg = "#df8e1d"
empty_state_fg = "#1e66f5"
liked_fg = "#d20f39"
countdown_fg = "#40a02b"
"##;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, descriptions, and other secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Heart marker on liked items.
    pub liked_fg: String,

    pub countdown_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zcatalog::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => CATPPUCCIN_MOCHA,
            "catppuccin-latte" => CATPPUCCIN_LATTE,
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZcatalogError::Io`] if the file cannot be read and
    /// [`ZcatalogError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| ZcatalogError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Plain palette used only if the default theme somehow fails to parse.
    fn monochrome() -> Self {
        let light = "#ffffff".to_string();
        let dark = "#000000".to_string();
        let grey = "#808080".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: light.clone(),
                header_bg: None,
                selection_fg: dark.clone(),
                selection_bg: light.clone(),
                text_normal: light.clone(),
                text_dim: grey.clone(),
                border: grey,
                search_bar_border: light.clone(),
                match_highlight_fg: dark,
                match_highlight_bg: light.clone(),
                empty_state_fg: light.clone(),
                liked_fg: light.clone(),
                countdown_fg: light,
            },
        }
    }

    /// Converts a hex color to an RGB tuple; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::monochrome)
    }
}
