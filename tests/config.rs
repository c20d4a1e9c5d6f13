//! Configuration system tests
//!
//! Tests for config paths, persistence and building width routines from the
//! configured backend.

use std::path::PathBuf;

use textio::config::{Backend, InputConfig, TextIoConfig};
use textio::config_paths;
use textio::keypad::ScanCode;
use textio::width::{RoutinesError, TextIo};
use textio::wrap::{OutputFormat, PrintFormat};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_textio() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.ends_with("textio"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
        assert!(path.starts_with(config_paths::config_dir().unwrap()));
    }
}

// ========================================================================
// Persistence Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let config = TextIoConfig {
        backend: Backend::Bitmap { glyph_width: 6 },
        output: OutputFormat::graphx()
            .with_max_line_width(200)
            .with_print_format(PrintFormat::Centered),
        input: InputConfig {
            capacity: 12,
            visible_width: 72,
            ..InputConfig::default()
        },
    };
    config.save_to(&path).unwrap();

    assert_eq!(TextIoConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TextIoConfig::load_from(&dir.path().join("nope.yaml"));
    assert_eq!(config, TextIoConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "backend: [not, a, backend\n").unwrap();

    assert_eq!(TextIoConfig::load_from(&path), TextIoConfig::default());
}

#[test]
fn test_unknown_key_name_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "input:\n  keys:\n    accept: warp-drive\n").unwrap();

    let config = TextIoConfig::load_from(&path);
    assert_eq!(config.input.keys.accept, ScanCode::ENTER);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("config.yaml");
    let err = TextIoConfig::default().save_to(&path).unwrap_err();
    assert!(err.contains("Failed to write config"));
}

// ========================================================================
// Backend Tests
// ========================================================================

#[test]
fn test_default_backend_measures_cells() {
    let config = TextIoConfig::default();
    let io = TextIo::new(config.backend.routines().unwrap()).unwrap();
    assert_eq!(io.get_char_width(b'W'), 1);
    assert_eq!(config.output.max_line_width, 26);
}

#[test]
fn test_bitmap_backend_from_yaml() {
    let config: TextIoConfig =
        serde_yaml::from_str("backend:\n  kind: bitmap\n  glyph_width: 5\n").unwrap();
    let io = TextIo::new(config.backend.routines().unwrap()).unwrap();
    assert_eq!(io.get_char_width(b'A'), 5);
}

#[test]
fn test_font_backend_with_garbage_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("font.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();

    let backend = Backend::Font { path, px: 16.0 };
    assert!(matches!(
        backend.routines(),
        Err(RoutinesError::FontLoad(_))
    ));
}
