//! Persisted resizer preferences.
//!
//! All preferences live in one JSON blob under [`SETTINGS_KEY`]. Loading is
//! lenient: each field falls back to its default on its own, and a missing or
//! unreadable blob yields [`Settings::default`].

use crate::color::Color;
use crate::format::OutputFormat;
use crate::request::{TransformOptions, DEFAULT_QUALITY};
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key the settings blob is stored under.
pub const SETTINGS_KEY: &str = "resizerSettings";

/// Default background color string.
pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";

/// Form preferences, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Target width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Target height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Output format
    pub format: OutputFormat,
    /// Auto-crop flag
    pub auto_crop: bool,
    /// Background color as entered, not necessarily valid hex
    pub bg_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::Jpeg,
            auto_crop: false,
            bg_color: DEFAULT_BG_COLOR.to_string(),
        }
    }
}

impl Settings {
    /// Parse a settings blob, falling back field by field.
    ///
    /// Numbers may be stored as JSON numbers or numeric strings. Empty,
    /// zero, or malformed values take the default.
    pub fn from_json(blob: &str) -> Self {
        match serde_json::from_str::<Value>(blob) {
            Ok(value) => Self::from_value(&value),
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring malformed settings blob");
                Self::default()
            }
        }
    }

    /// Build settings from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(map) = value.as_object() else {
            return defaults;
        };

        Self {
            width: map.get("width").and_then(positive_u32),
            height: map.get("height").and_then(positive_u32),
            quality: map
                .get("quality")
                .and_then(positive_u32)
                .and_then(|q| u8::try_from(q).ok())
                .filter(|q| *q <= 100)
                .unwrap_or(defaults.quality),
            format: map
                .get("format")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.format),
            auto_crop: map.get("autoCrop").and_then(Value::as_bool).unwrap_or(defaults.auto_crop),
            bg_color: map
                .get("bgColor")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.bg_color),
        }
    }

    /// Serialize to the blob format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from a store; absent or unreadable state gives defaults.
    pub fn load(store: &impl PreferenceStore) -> Self {
        match store.read(SETTINGS_KEY) {
            Ok(Some(blob)) => Self::from_json(&blob),
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Persist to a store.
    pub fn save(&self, store: &mut impl PreferenceStore) -> Result<()> {
        store.write(SETTINGS_KEY, &self.to_json()?)
    }

    /// The background color, or white if the stored string is not valid hex.
    pub fn background(&self) -> Color {
        Color::parse_or(&self.bg_color, Color::WHITE)
    }

    /// Transform options for these settings.
    pub fn to_options(&self) -> TransformOptions {
        TransformOptions {
            width: self.width,
            height: self.height,
            format: self.format,
            quality: self.quality,
            auto_crop: self.auto_crop,
            background: self.background(),
            ..TransformOptions::default()
        }
    }
}

fn positive_u32(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| *n > 0)
}

/// Key-value storage for preference blobs.
pub trait PreferenceStore {
    /// Read the blob stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<key>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the user's config directory, e.g. `~/.config/resizer`.
    pub fn user_default() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("resizer")))
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.format, OutputFormat::Jpeg);
        assert!(!settings.auto_crop);
        assert_eq!(settings.bg_color, "#FFFFFF");
        assert_eq!(settings.width, None);
    }

    #[test]
    fn test_reads_browser_blob_with_string_numbers() {
        let blob = r##"{
            "width": "800", "height": "600", "quality": "65",
            "format": "png", "autoCrop": true, "bgColor": "#000000"
        }"##;
        let settings = Settings::from_json(blob);
        assert_eq!(settings.width, Some(800));
        assert_eq!(settings.height, Some(600));
        assert_eq!(settings.quality, 65);
        assert_eq!(settings.format, OutputFormat::Png);
        assert!(settings.auto_crop);
        assert_eq!(settings.background(), Color::BLACK);
    }

    #[test]
    fn test_malformed_blob_gives_defaults() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
        assert_eq!(Settings::from_json("null"), Settings::default());
        assert_eq!(Settings::from_json("[1,2]"), Settings::default());
    }

    #[test]
    fn test_fields_fall_back_individually() {
        let blob = r#"{
            "width": "", "height": -3, "quality": 0,
            "format": "tiff", "autoCrop": "yes", "bgColor": ""
        }"#;
        let settings = Settings::from_json(blob);
        assert_eq!(settings, Settings::default());

        let settings = Settings::from_json(r#"{"width":1200}"#);
        assert_eq!(settings.width, Some(1200));
        assert_eq!(settings.quality, 80);
    }

    #[test]
    fn test_invalid_color_recovers_to_white() {
        let settings = Settings::from_json(r#"{"bgColor":"purple"}"#);
        assert_eq!(settings.bg_color, "purple");
        assert_eq!(settings.to_options().background, Color::WHITE);
    }

    #[test]
    fn test_to_options() {
        let settings = Settings {
            width: Some(300),
            height: Some(200),
            quality: 90,
            format: OutputFormat::Png,
            auto_crop: true,
            bg_color: "#102030".into(),
        };
        let opts = settings.to_options();
        assert_eq!(opts.width, Some(300));
        assert_eq!(opts.height, Some(200));
        assert_eq!(opts.quality, 90);
        assert_eq!(opts.format, OutputFormat::Png);
        assert!(opts.auto_crop);
        assert_eq!(opts.background, Color::new(16, 32, 48));
        assert_eq!(opts.tolerance, 20);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let settings = Settings { width: Some(64), auto_crop: true, ..Settings::default() };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested"));
        assert_eq!(store.read(SETTINGS_KEY).unwrap(), None);

        let settings = Settings {
            height: Some(480),
            format: OutputFormat::Png,
            ..Settings::default()
        };
        settings.save(&mut store).unwrap();

        assert!(tmp.path().join("nested/resizerSettings.json").exists());
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_file_store_corrupt_blob() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("resizerSettings.json"), "garbage").unwrap();
        let store = FileStore::new(tmp.path());
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
