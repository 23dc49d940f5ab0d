mod args;
mod assets;
mod canvas;
mod config;
mod frames;
mod types;

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread::JoinHandle,
    time::Duration,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use facer_core::{CoordinateMapper, FaceGraphic, layout_for};
use facer_utils::{configure_telemetry, init_logging, normalize_path, timing_guard};
use log::{debug, info, warn};

use crate::{
    args::OverlayArgs,
    assets::load_drawables,
    canvas::RasterCanvas,
    config::{apply_cli_overrides, load_settings},
    frames::{FrameEvent, load_frames, spawn_producer},
    types::{DrawRecord, ReplayReport},
};

/// How long the draw loop waits before checking on the producer thread.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    init_logging(log::LevelFilter::Info)?;
    let args = OverlayArgs::parse();

    let mut settings = load_settings(args.config.as_ref())?;
    apply_cli_overrides(&mut settings, &args);
    configure_telemetry(
        settings.telemetry.enabled,
        settings.telemetry.level_filter(),
    );

    let frames_path = normalize_path(&args.frames)?;
    let frames = load_frames(&frames_path)?;
    if frames.is_empty() {
        anyhow::bail!("no detection frames found in {}", frames_path.display());
    }

    let mut canvas = match args.background.as_ref() {
        Some(path) => {
            let path = normalize_path(path)?;
            let background = image::open(&path)
                .with_context(|| format!("failed to open background image {}", path.display()))?
                .to_rgba8();
            (settings.overlay.view_width, settings.overlay.view_height) = background.dimensions();
            RasterCanvas::new(background)
        }
        None => RasterCanvas::blank(settings.overlay.view_width, settings.overlay.view_height),
    };
    let (view_width, view_height) = canvas.dimensions();
    anyhow::ensure!(
        view_width > 0 && view_height > 0,
        "view size must be non-zero (got {view_width}x{view_height})"
    );

    let annotate_dir = if let Some(dir) = args.annotate.as_ref() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create annotation directory {}", dir.display()))?;
        Some(normalize_path(dir)?)
    } else {
        None
    };

    let overlay = &settings.overlay;
    let mapper = CoordinateMapper::from_settings(overlay);
    let layout = layout_for(overlay.variant);
    let drawables = load_drawables(layout.as_ref(), overlay.assets_dir.as_deref());

    info!(
        "Rendering {} overlay on a {}x{} view (detector {}x{}, mirrored: {})",
        overlay.variant.as_label(),
        view_width,
        view_height,
        overlay.preview_size().0,
        overlay.preview_size().1,
        mapper.is_mirrored()
    );

    let (events_tx, events_rx) = mpsc::channel();
    let redraw_tx = events_tx.clone();
    let mut graphic = FaceGraphic::new(mapper, layout, drawables, move || {
        if redraw_tx.send(FrameEvent::Redraw).is_err() {
            debug!("Draw loop is gone; dropping redraw request");
        }
    })?;

    let frame_count = frames.len();
    info!("Replaying {frame_count} detection frame(s)...");
    let producer = spawn_producer(frames, graphic.updater(), args.fps, events_tx);

    let draws = run_draw_loop(
        &mut graphic,
        &mut canvas,
        &events_rx,
        &producer,
        annotate_dir.as_deref(),
    )?;
    producer
        .join()
        .map_err(|_| anyhow!("detection replay thread panicked"))?;

    info!(
        "Replay complete: {} frame(s) published, {} draw(s), {} overlay element(s) drawn",
        frame_count,
        draws.len(),
        draws.iter().map(|d| d.boxes.len()).sum::<usize>()
    );

    let report = ReplayReport {
        variant: overlay.variant.to_string(),
        view: [view_width, view_height],
        mirrored: mapper.is_mirrored(),
        frames: frame_count,
        draws,
    };
    write_report(&report, args.json.as_ref())
}

/// Consume redraw requests until the producer reports completion.
///
/// Requests that queue up while a frame is being drawn collapse into a single
/// draw of the newest snapshot.
fn run_draw_loop(
    graphic: &mut FaceGraphic<RasterCanvas>,
    canvas: &mut RasterCanvas,
    events: &Receiver<FrameEvent>,
    producer: &JoinHandle<()>,
    annotate_dir: Option<&Path>,
) -> Result<Vec<DrawRecord>> {
    let mut records = Vec::new();
    loop {
        let first = match events.recv_timeout(POLL_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) if producer.is_finished() => events
                .try_recv()
                .map_err(|_| anyhow!("detection replay stopped before publishing every frame"))?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                anyhow::bail!("redraw channel closed unexpectedly")
            }
        };

        let mut redraw = false;
        let mut finished = false;
        for event in std::iter::once(first).chain(events.try_iter()) {
            match event {
                FrameEvent::Redraw => redraw = true,
                FrameEvent::Finished { published } => {
                    debug!("Producer finished after {published} frame(s)");
                    finished = true;
                }
            }
        }

        if redraw && let Some(record) = draw_frame(graphic, canvas, annotate_dir) {
            records.push(record);
        }
        if finished {
            return Ok(records);
        }
    }
}

fn draw_frame(
    graphic: &mut FaceGraphic<RasterCanvas>,
    canvas: &mut RasterCanvas,
    annotate_dir: Option<&Path>,
) -> Option<DrawRecord> {
    let _guard = timing_guard("facer_cli::draw_frame", log::Level::Debug);

    canvas.clear();
    let mut record = DrawRecord::from_outcome(graphic.draw(canvas))?;
    debug!(
        "Generation {}: drew {} overlay element(s)",
        record.generation,
        record.boxes.len()
    );

    if let Some(dir) = annotate_dir {
        let path = dir.join(format!("frame_{:06}.png", record.generation));
        match canvas.save(&path) {
            Ok(()) => record.rendered = Some(path.display().to_string()),
            Err(err) => warn!("Failed to save rendered frame: {err:#}"),
        }
    }
    Some(record)
}

fn write_report(report: &ReplayReport, json_path: Option<&PathBuf>) -> Result<()> {
    if let Some(json_path) = json_path {
        if let Some(dir) = json_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        let file = File::create(json_path)
            .with_context(|| format!("failed to create {}", json_path.display()))?;
        serde_json::to_writer_pretty(file, report).with_context(|| {
            format!("failed to write draw records to {}", json_path.display())
        })?;
        info!("Wrote draw records to {}", json_path.display());
    } else {
        let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{json}");
    }
    Ok(())
}
