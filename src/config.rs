//! Configuration persistence
//!
//! Stores host tool preferences in `~/.config/textio/config.yaml`: the width
//! backend, the output format used for wrapping, and the input field setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::InputKeys;
use crate::width::{
    BitmapFontWidth, FontWidth, LibraryRoutines, RoutinesError, DEFAULT_BITMAP_GLYPH_WIDTH,
};
use crate::wrap::OutputFormat;

/// Which width provider to install
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// OS home screen, one cell per character
    #[default]
    Console,
    /// Graphics library font with a uniform glyph width
    Bitmap {
        #[serde(default = "default_glyph_width")]
        glyph_width: u8,
    },
    /// Proportional TTF/OTF font rendered at `px` pixels
    Font { path: PathBuf, px: f32 },
}

fn default_glyph_width() -> u8 {
    DEFAULT_BITMAP_GLYPH_WIDTH
}

impl Backend {
    /// Build the width routines for this backend.
    ///
    /// Font backends read the font file from disk.
    pub fn routines(&self) -> Result<LibraryRoutines, RoutinesError> {
        match self {
            Backend::Console => Ok(LibraryRoutines::console()),
            Backend::Bitmap { glyph_width } => Ok(LibraryRoutines::bitmap(
                BitmapFontWidth::monospace(*glyph_width),
            )),
            Backend::Font { path, px } => {
                let bytes = std::fs::read(path).map_err(|e| {
                    RoutinesError::FontLoad(format!("{}: {}", path.display(), e))
                })?;
                let font = FontWidth::from_bytes(&bytes, *px)?;
                tracing::debug!(px = font.px(), "Loaded font {}", path.display());
                Ok(LibraryRoutines::font(font))
            }
        }
    }
}

/// Input field setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum characters, terminator excluded
    pub capacity: usize,
    /// Width of the scroll window
    pub visible_width: u32,
    pub keys: InputKeys,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            capacity: 9,
            visible_width: 50,
            keys: InputKeys::default(),
        }
    }
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextIoConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_output")]
    pub output: OutputFormat,
    #[serde(default)]
    pub input: InputConfig,
}

fn default_output() -> OutputFormat {
    OutputFormat::homescreen()
}

impl Default for TextIoConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            output: default_output(),
            input: InputConfig::default(),
        }
    }
}

impl TextIoConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let dir = crate::config_paths::ensure_config_dir()?;
        self.save_to(&dir.join("config.yaml"))
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
