//! Command-line argument definitions for facer-cli.

use clap::{ArgAction, Parser};
use facer_utils::OverlayVariant;
use std::path::PathBuf;

/// Replay recorded face detections and draw cartoon overlays onto frames.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct OverlayArgs {
    /// JSON file holding an array of detection snapshots, one per frame.
    #[arg(short, long)]
    pub frames: PathBuf,

    /// Overlay to draw: `monkey` (full-face icon) or `dog` (ears and nose).
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<OverlayVariant>,

    /// Optional settings JSON. Defaults to `config/facer_settings.json` when present, otherwise built-in parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Background image for the canvas. Its size becomes the view size.
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Override view width (pixels). Ignored when --background is given.
    #[arg(long)]
    pub view_width: Option<u32>,

    /// Override view height (pixels). Ignored when --background is given.
    #[arg(long)]
    pub view_height: Option<u32>,

    /// Width of the image the detector ran on (defaults to the view width).
    #[arg(long)]
    pub preview_width: Option<u32>,

    /// Height of the image the detector ran on (defaults to the view height).
    #[arg(long)]
    pub preview_height: Option<u32>,

    /// Mirror overlays horizontally, as for a front-facing camera.
    #[arg(long, action = ArgAction::SetTrue)]
    pub front_facing: bool,

    /// Directory holding monkey.png, dog_left_ear.png, dog_right_ear.png and dog_nose.png.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Directory to write one rendered PNG per draw.
    #[arg(long)]
    pub annotate: Option<PathBuf>,

    /// Write draw records to a JSON file instead of stdout.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Pace the replayed detections at this many frames per second (0 = as fast as possible).
    #[arg(long, default_value_t = 0)]
    pub fps: u32,

    /// Enable telemetry timing logs (defaults to settings file).
    #[arg(long, action = ArgAction::SetTrue)]
    pub telemetry: bool,

    /// Override telemetry logging level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub telemetry_level: Option<String>,
}
