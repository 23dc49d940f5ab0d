//! Serializable output records for facer-cli.

use facer_core::{DrawOutcome, PlacedBox};
use serde::Serialize;

/// What one draw put on the canvas.
#[derive(Debug, Serialize)]
pub struct DrawRecord {
    /// Update count the draw observed.
    pub generation: u64,
    pub boxes: Vec<PlacedBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

impl DrawRecord {
    /// Record for a draw that observed a snapshot; `None` for draws on an empty graphic.
    pub fn from_outcome(outcome: DrawOutcome) -> Option<Self> {
        Some(Self {
            generation: outcome.generation?,
            boxes: outcome.boxes,
            rendered: None,
        })
    }
}

/// Full replay summary printed or written by the CLI.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub variant: String,
    pub view: [u32; 2],
    pub mirrored: bool,
    pub frames: usize,
    pub draws: Vec<DrawRecord>,
}
