//! Settings shared by the facer front ends.
//!
//! Everything here serializes to a single JSON document so the CLI (and any
//! embedding application) can persist overlay preferences between runs.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Which cartoon overlay is drawn over the tracked face.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlayVariant {
    /// One monkey-face icon stretched over the whole face.
    #[default]
    MonkeyFace,
    /// Dog ears over both eyes plus a dog nose.
    DogFace,
}

impl OverlayVariant {
    pub fn as_label(self) -> &'static str {
        match self {
            OverlayVariant::MonkeyFace => "Monkey face",
            OverlayVariant::DogFace => "Dog face",
        }
    }
}

impl fmt::Display for OverlayVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverlayVariant::MonkeyFace => "monkey",
            OverlayVariant::DogFace => "dog",
        })
    }
}

impl FromStr for OverlayVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monkey" | "monkey_face" | "monkey-face" => Ok(OverlayVariant::MonkeyFace),
            "dog" | "dog_face" | "dog-face" => Ok(OverlayVariant::DogFace),
            other => Err(format!(
                "invalid overlay variant '{other}'; expected 'monkey' or 'dog'"
            )),
        }
    }
}

/// Display surface and camera geometry for the overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlaySettings {
    pub variant: OverlayVariant,
    /// Width of the drawing surface in pixels.
    pub view_width: u32,
    /// Height of the drawing surface in pixels.
    pub view_height: u32,
    /// Width of the image the detector ran on. Defaults to the view width.
    pub preview_width: Option<u32>,
    /// Height of the image the detector ran on. Defaults to the view height.
    pub preview_height: Option<u32>,
    /// Mirror overlays horizontally (front-facing camera).
    pub front_facing: bool,
    /// Directory holding the overlay bitmaps. Placeholders are generated when unset.
    pub assets_dir: Option<PathBuf>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            variant: OverlayVariant::MonkeyFace,
            view_width: 640,
            view_height: 480,
            preview_width: None,
            preview_height: None,
            front_facing: false,
            assets_dir: None,
        }
    }
}

impl OverlaySettings {
    /// Detector image size, falling back to the view size per axis.
    pub fn preview_size(&self) -> (u32, u32) {
        (
            self.preview_width.unwrap_or(self.view_width),
            self.preview_height.unwrap_or(self.view_height),
        )
    }
}

/// Settings controlling optional runtime telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    pub enabled: bool,
    /// Logging level for telemetry output (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "debug".to_string(),
        }
    }
}

impl TelemetrySettings {
    /// Resolve the configured level string; unknown values mean `Debug`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Debug,
        }
    }

    pub fn set_level(&mut self, level: LevelFilter) {
        self.level = level.as_str().to_ascii_lowercase();
    }
}

/// Persistent settings consumed by the front ends.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub overlay: OverlaySettings,
    pub telemetry: TelemetrySettings,
}

impl AppSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings JSON at {}", path.display()))
    }

    /// Write settings as pretty-printed JSON, replacing any existing file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload =
            serde_json::to_string_pretty(self).context("failed to serialize settings JSON")?;
        fs::write(path, payload)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }
}

/// Default location of persisted settings (`config/facer_settings.json`).
pub fn default_settings_path() -> PathBuf {
    env::current_dir()
        .map(|dir| dir.join("config/facer_settings.json"))
        .unwrap_or_else(|_| PathBuf::from("config/facer_settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn default_settings_round_trip() {
        let file = NamedTempFile::new().expect("tempfile");
        let mut settings = AppSettings::default();
        settings.overlay.variant = OverlayVariant::DogFace;
        settings.overlay.front_facing = true;
        settings.save_to_path(file.path()).expect("save");

        let loaded = AppSettings::load_from_path(file.path()).expect("load");
        assert_eq!(loaded.overlay, settings.overlay);
        assert_eq!(loaded.telemetry.level, "debug");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let file = NamedTempFile::new().expect("tempfile");
        fs::write(
            file.path(),
            r#"{ "overlay": { "variant": "dog_face", "preview_width": 320 } }"#,
        )
        .expect("write custom settings");

        let loaded = AppSettings::load_from_path(file.path()).expect("load");
        assert_eq!(loaded.overlay.variant, OverlayVariant::DogFace);
        assert_eq!(loaded.overlay.preview_size(), (320, 480));
        assert!(!loaded.overlay.front_facing);
        assert!(!loaded.telemetry.enabled);
    }

    #[test]
    fn malformed_json_reports_path() {
        let file = NamedTempFile::new().expect("tempfile");
        fs::write(file.path(), "{ not json").expect("write");
        let err = AppSettings::load_from_path(file.path()).unwrap_err();
        assert!(format!("{err}").contains("failed to parse settings JSON"));
    }

    #[test]
    fn variant_parses_cli_spellings() {
        assert_eq!("Dog".parse::<OverlayVariant>(), Ok(OverlayVariant::DogFace));
        assert_eq!(
            "monkey-face".parse::<OverlayVariant>(),
            Ok(OverlayVariant::MonkeyFace)
        );
        assert!("cat".parse::<OverlayVariant>().is_err());
        assert_eq!(OverlayVariant::DogFace.to_string(), "dog");
    }

    #[test]
    fn telemetry_level_parses_variants() {
        let telemetry = TelemetrySettings {
            level: "TRACE".into(),
            ..TelemetrySettings::default()
        };
        assert_eq!(telemetry.level_filter(), LevelFilter::Trace);

        let mut telemetry = TelemetrySettings::default();
        telemetry.set_level(LevelFilter::Warn);
        assert_eq!(telemetry.level, "warn");
        assert_eq!(telemetry.level_filter(), LevelFilter::Warn);
    }
}
