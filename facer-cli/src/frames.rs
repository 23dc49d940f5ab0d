//! Recorded detection replay: the producer side of the overlay pipeline.

use std::{
    fs,
    path::Path,
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{Context, Result};
use facer_core::{DetectionSnapshot, OverlayUpdater};
use log::{debug, info};

/// Messages delivered to the drawing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// A new snapshot was published; the overlay should be redrawn.
    Redraw,
    /// The producer published every frame.
    Finished { published: usize },
}

/// Load an array of detection snapshots from a JSON file.
pub fn load_frames(path: &Path) -> Result<Vec<DetectionSnapshot>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read frames file {}", path.display()))?;
    let frames: Vec<DetectionSnapshot> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse detection frames at {}", path.display()))?;
    Ok(frames)
}

/// Publish every frame from a background thread, like a detector would.
///
/// `fps == 0` publishes back to back. A [`FrameEvent::Finished`] follows the
/// last frame on `events`.
pub fn spawn_producer(
    frames: Vec<DetectionSnapshot>,
    updater: OverlayUpdater,
    fps: u32,
    events: mpsc::Sender<FrameEvent>,
) -> JoinHandle<()> {
    let pause = (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));
    thread::spawn(move || {
        let total = frames.len();
        for (index, snapshot) in frames.into_iter().enumerate() {
            debug!("Publishing frame {}/{}", index + 1, total);
            updater.update(snapshot);
            if let Some(pause) = pause {
                thread::sleep(pause);
            }
        }
        info!("Published {total} detection frame(s)");
        if events
            .send(FrameEvent::Finished { published: total })
            .is_err()
        {
            debug!("Draw loop exited before the replay finished");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use facer_core::{CoordinateMapper, FaceGraphic, OverlayVariant, Point, layout_for};

    use crate::{assets::load_drawables, canvas::RasterCanvas};

    #[test]
    fn frames_file_accepts_partial_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.json");
        fs::write(
            &path,
            r#"[
                { "position": { "x": 1, "y": 2 }, "width": 10, "height": 20,
                  "nose_base": { "x": 6, "y": 12 } },
                { "width": 10, "height": 20 }
            ]"#,
        )
        .unwrap();

        let frames = load_frames(&path).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].nose_base, Some(Point::new(6.0, 12.0)));
        assert!(frames[1].position.is_none());
    }

    #[test]
    fn malformed_frames_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.json");
        fs::write(&path, r#"{ "not": "an array" }"#).unwrap();

        let err = load_frames(&path).unwrap_err();
        assert!(format!("{err}").contains("failed to parse detection frames"));
    }

    #[test]
    fn producer_finishes_when_draw_loop_is_gone() {
        let layout = layout_for(OverlayVariant::MonkeyFace);
        let drawables = load_drawables(layout.as_ref(), None);
        let graphic: FaceGraphic<RasterCanvas> = FaceGraphic::new(
            CoordinateMapper::new(1.0, 1.0, 640.0, false),
            layout,
            drawables,
            facer_core::NoRedraw,
        )
        .unwrap();

        let (events_tx, events_rx) = mpsc::channel();
        drop(events_rx);
        let frames = vec![
            DetectionSnapshot::new(Point::new(0.0, 0.0), 10.0, 10.0),
            DetectionSnapshot::default(),
        ];

        spawn_producer(frames, graphic.updater(), 0, events_tx)
            .join()
            .unwrap();
        assert_eq!(graphic.state(), facer_core::OverlayState::Populated);
    }
}
