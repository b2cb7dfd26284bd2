//! Configuration loading and discovery for `spritemaker.toml`
//!
//! Settings cover presentation and export defaults (render palette, onion
//! skinning, playback speed, output scale). Discovery walks up from the
//! working directory, then falls back to the XDG config directory. A missing
//! file is not an error; defaults apply.

use crate::color::{parse_color, ColorError};
use crate::export::bytes::PackOrder;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// File I/O error
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritemaker.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// A color field failed to parse
    #[error("invalid color for '{field}': {source}")]
    Color {
        field: &'static str,
        source: ColorError,
    },
}

/// User-tunable defaults, deserialized from `spritemaker.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the previous frame as a dim overlay while editing.
    pub ghosting: bool,
    /// Draw pixel grid lines in interactive views.
    pub grid: bool,
    /// Playback delay per frame, in milliseconds.
    pub frame_delay_ms: u32,
    /// Integer upscale factor applied when rendering frames to images.
    pub canvas_scale: u32,
    /// Foreground (lit pixel) color, hex.
    pub foreground: String,
    /// Background (unlit pixel) color, hex.
    pub background: String,
    /// Onion-skin overlay color, hex.
    pub ghost: String,
    /// Threshold imported pixels on alpha; false thresholds on brightness.
    pub use_alpha_channel: bool,
    /// Downscale imports so the largest dimension fits this size.
    pub import_max_size: Option<u32>,
    /// Import multiple files as one sprite per file instead of one frame
    /// per file.
    pub split_files: bool,
    /// Default byte layout for packed exports.
    pub pack_order: PackOrder,
    /// Whether moved selection background cells overwrite destination
    /// pixels instead of showing through.
    pub overwrite_with_background: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ghosting: true,
            grid: true,
            frame_delay_ms: 1000,
            canvas_scale: 16,
            foreground: "#FFFFFF".to_string(),
            background: "#000000".to_string(),
            ghost: "#555555ff".to_string(),
            use_alpha_channel: true,
            import_max_size: None,
            split_files: false,
            pack_order: PackOrder::Vertical,
            overwrite_with_background: false,
        }
    }
}

/// Parsed render palette derived from [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    pub ghost: Rgba<u8>,
}

impl Settings {
    /// Parse the color fields into a render palette.
    pub fn palette(&self) -> Result<Palette, SettingsError> {
        Ok(Palette {
            foreground: parse_color(&self.foreground)
                .map_err(|source| SettingsError::Color { field: "foreground", source })?,
            background: parse_color(&self.background)
                .map_err(|source| SettingsError::Color { field: "background", source })?,
            ghost: parse_color(&self.ghost)
                .map_err(|source| SettingsError::Color { field: "ghost", source })?,
        })
    }
}

/// Find spritemaker.toml by walking up from the current working directory,
/// falling back to the XDG config directory.
pub fn find_settings() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_settings_from(cwd) {
            return Some(path);
        }
    }
    find_xdg_settings()
}

/// Find spritemaker.toml in XDG_CONFIG_HOME/spritemaker/ (or
/// ~/.config/spritemaker/).
pub fn find_xdg_settings() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let path = xdg_config.join("spritemaker").join("spritemaker.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find spritemaker.toml by walking up from a specific directory.
pub fn find_settings_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let path = current.join("spritemaker.toml");
        if path.exists() {
            return Some(path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load settings from a spritemaker.toml file.
///
/// With an explicit path the file must exist and parse. Without one,
/// discovery runs and a missing file yields [`Settings::default`]. The
/// color fields are validated eagerly so a bad palette fails at load time
/// rather than at first render.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let settings_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_settings(),
    };

    let settings = match settings_path {
        Some(p) => {
            let contents = fs::read_to_string(&p)?;
            toml::from_str::<Settings>(&contents)?
        }
        None => Settings::default(),
    };

    settings.palette()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.ghosting);
        assert!(settings.grid);
        assert_eq!(settings.frame_delay_ms, 1000);
        assert_eq!(settings.canvas_scale, 16);

        let palette = settings.palette().expect("default palette should parse");
        assert_eq!(palette.foreground, Rgba([255, 255, 255, 255]));
        assert_eq!(palette.background, Rgba([0, 0, 0, 255]));
        assert_eq!(palette.ghost, Rgba([85, 85, 85, 255]));

        assert!(settings.use_alpha_channel);
        assert_eq!(settings.import_max_size, None);
        assert!(!settings.split_files);
        assert_eq!(settings.pack_order, PackOrder::Vertical);
        assert!(!settings.overwrite_with_background);
    }

    #[test]
    fn test_pack_order_deserializes_lowercase() {
        let settings: Settings =
            toml::from_str("pack_order = \"horizontal\"").expect("should parse");
        assert_eq!(settings.pack_order, PackOrder::Horizontal);
    }

    #[test]
    fn test_find_settings_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("spritemaker.toml");
        File::create(&path)
            .expect("should create settings file")
            .write_all(b"grid = false")
            .expect("should write settings");

        let subdir = temp.path().join("art").join("sprites");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_settings_from(subdir);
        assert_eq!(found, Some(path));
    }

    #[test]
    fn test_find_settings_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_settings_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("spritemaker.toml");
        File::create(&path)
            .expect("should create settings file")
            .write_all(b"frame_delay_ms = 120\nforeground = \"#0f0\"")
            .expect("should write settings");

        let settings = load_settings(Some(&path)).expect("should load valid settings");
        assert_eq!(settings.frame_delay_ms, 120);
        assert_eq!(settings.foreground, "#0f0");
        // Unspecified fields fall back to defaults.
        assert!(settings.ghosting);
        assert_eq!(settings.canvas_scale, 16);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("spritemaker.toml");
        File::create(&path)
            .expect("should create settings file")
            .write_all(b"not valid toml {{{")
            .expect("should write settings");

        let result = load_settings(Some(&path));
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_load_bad_color_rejected() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("spritemaker.toml");
        File::create(&path)
            .expect("should create settings file")
            .write_all(b"ghost = \"purple\"")
            .expect("should write settings");

        let result = load_settings(Some(&path));
        assert!(matches!(result, Err(SettingsError::Color { field: "ghost", .. })));
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_settings(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
