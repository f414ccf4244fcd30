//! Toolkit configuration (muek.toml)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::color::{Color, Palette};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Toolkit configuration loaded from muek.toml
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UiConfig {
    /// Animation defaults section
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Scroll defaults section
    #[serde(default)]
    pub scroll: ScrollConfig,

    /// Palette color overrides, as hex strings
    #[serde(default)]
    pub palette: PaletteOverrides,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnimationConfig {
    /// Default interpolation factor per frame
    #[serde(default = "default_animation_speed")]
    pub speed: f32,

    /// Snap transitions instead of stepping
    #[serde(default = "default_true")]
    pub disabled: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: default_animation_speed(),
            disabled: true,
        }
    }
}

fn default_animation_speed() -> f32 {
    0.05
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScrollConfig {
    /// Wheel-delta multiplier
    #[serde(default = "default_scroll_speed")]
    pub speed: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            speed: default_scroll_speed(),
        }
    }
}

fn default_scroll_speed() -> f32 {
    10.0
}

/// Optional per-entry overrides applied on top of the stock palette
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaletteOverrides {
    pub muek: Option<Color>,
    pub light_muek: Option<Color>,
    pub dark_muek: Option<Color>,
    pub muek_red: Option<Color>,
    pub light_muek_red: Option<Color>,
    pub dark_muek_red: Option<Color>,
    pub muek_blue: Option<Color>,
    pub light_muek_blue: Option<Color>,
    pub dark_muek_blue: Option<Color>,
}

impl UiConfig {
    /// Find muek.toml in standard locations: the platform config dir,
    /// the executable's directory, then the working directory
    pub fn find_config_path() -> Option<PathBuf> {
        let candidates = [
            dirs::config_dir().map(|p| p.join("muek").join("muek.toml")),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("muek.toml"))),
            Some(PathBuf::from("muek.toml")),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|candidate| candidate.exists())
    }

    /// Load from the first standard location, or defaults when none exists.
    /// A file that exists but fails to parse also falls back to defaults.
    pub fn load_or_default() -> Self {
        match Self::find_config_path() {
            Some(path) => Self::load(&path).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: UiConfig = toml::from_str(&content)?;
        crate::log!("config loaded from {}", path.display());
        Ok(config)
    }

    /// The stock palette with this config's overrides applied
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        let o = &self.palette;
        let apply = |slot: &mut Color, value: Option<Color>| {
            if let Some(color) = value {
                *slot = color;
            }
        };
        apply(&mut palette.muek, o.muek);
        apply(&mut palette.light_muek, o.light_muek);
        apply(&mut palette.dark_muek, o.dark_muek);
        apply(&mut palette.muek_red, o.muek_red);
        apply(&mut palette.light_muek_red, o.light_muek_red);
        apply(&mut palette.dark_muek_red, o.dark_muek_red);
        apply(&mut palette.muek_blue, o.muek_blue);
        apply(&mut palette.light_muek_blue, o.light_muek_blue);
        apply(&mut palette.dark_muek_blue, o.dark_muek_blue);
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_a_file() {
        let config = UiConfig::default();
        assert_eq!(config.animation.speed, 0.05);
        assert!(config.animation.disabled);
        assert_eq!(config.scroll.speed, 10.0);
        assert_eq!(config.palette(), Palette::default());
    }

    #[test]
    fn test_partial_file_keeps_missing_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\nspeed = 0.2\ndisabled = false").unwrap();

        let config = UiConfig::load(file.path()).unwrap();
        assert_eq!(config.animation.speed, 0.2);
        assert!(!config.animation.disabled);
        assert_eq!(config.scroll.speed, 10.0);
    }

    #[test]
    fn test_palette_overrides_apply() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[palette]\nmuek = \"#ff0000\"").unwrap();

        let config = UiConfig::load(file.path()).unwrap();
        let palette = config.palette();
        assert_eq!(palette.muek, Color::rgb(255, 0, 0));
        assert_eq!(palette.light_muek, Palette::default().light_muek);
    }

    #[test]
    fn test_malformed_file_surfaces_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[palette]\nmuek = \"not a color\"").unwrap();

        assert!(matches!(
            UiConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
