//! Configuration loading and CLI override logic.

use std::path::PathBuf;

use anyhow::{Context, Result};
use facer_utils::{AppSettings, config::default_settings_path, normalize_path};
use log::info;

use crate::args::OverlayArgs;

/// Load application settings from a file or use defaults.
pub fn load_settings(config_path: Option<&PathBuf>) -> Result<AppSettings> {
    if let Some(path) = config_path {
        let resolved = normalize_path(path)?;
        let settings = AppSettings::load_from_path(&resolved)?;
        info!("Loaded settings from {}", resolved.display());
        return Ok(settings);
    }

    let default_path = default_settings_path();
    if !default_path.exists() {
        return Ok(AppSettings::default());
    }
    let settings = AppSettings::load_from_path(&default_path).with_context(|| {
        format!(
            "failed to load default settings from {}",
            default_path.display()
        )
    })?;
    info!("Loaded settings from {}", default_path.display());
    Ok(settings)
}

/// Apply command-line arguments on top of loaded or default settings.
pub fn apply_cli_overrides(settings: &mut AppSettings, args: &OverlayArgs) {
    let overlay = &mut settings.overlay;
    if let Some(variant) = args.variant {
        overlay.variant = variant;
    }
    if let Some(width) = args.view_width {
        overlay.view_width = width;
    }
    if let Some(height) = args.view_height {
        overlay.view_height = height;
    }
    if args.preview_width.is_some() {
        overlay.preview_width = args.preview_width;
    }
    if args.preview_height.is_some() {
        overlay.preview_height = args.preview_height;
    }
    if args.front_facing {
        overlay.front_facing = true;
    }
    if let Some(dir) = args.assets.as_ref() {
        overlay.assets_dir = Some(dir.clone());
    }

    if args.telemetry {
        settings.telemetry.enabled = true;
    }
    if let Some(level) = args.telemetry_level.as_ref() {
        let normalized = level.trim().to_ascii_lowercase();
        if !normalized.is_empty() {
            if normalized == "off" {
                settings.telemetry.enabled = false;
            }
            settings.telemetry.level = normalized;
        }
    }
}
