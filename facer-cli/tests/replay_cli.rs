use std::error::Error;
use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use image::{GenericImageView, Rgba, RgbaImage};
use serde::Deserialize;
use tempfile::tempdir;

#[derive(Debug, Deserialize)]
struct Report {
    variant: String,
    view: [u32; 2],
    mirrored: bool,
    frames: usize,
    draws: Vec<Draw>,
}

#[derive(Debug, Deserialize)]
struct Draw {
    generation: u64,
    boxes: Vec<PlacedBox>,
    rendered: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct PlacedBox {
    element: String,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

fn placed(element: &str, left: i32, top: i32, right: i32, bottom: i32) -> PlacedBox {
    PlacedBox {
        element: element.to_string(),
        left,
        top,
        right,
        bottom,
    }
}

const DOG_FRAMES: &str = r#"[
    { "position": { "x": 70, "y": 60 }, "width": 60, "height": 30,
      "left_eye": { "x": 85, "y": 80 }, "right_eye": { "x": 115, "y": 80 },
      "nose_base": { "x": 100, "y": 100 } },
    { "position": { "x": 70, "y": 60 }, "width": 60, "height": 30,
      "left_eye": { "x": 85, "y": 80 },
      "nose_base": { "x": 100, "y": 100 } },
    { "position": { "x": 70, "y": 60 }, "width": 60, "height": 30,
      "left_eye": { "x": 85, "y": 80 }, "right_eye": { "x": 115, "y": 80 },
      "nose_base": { "x": 100, "y": 100 } }
]"#;

fn run_replay(work_dir: &Path, frames: &str, extra: &[&str]) -> Result<Report, Box<dyn Error>> {
    let frames_path = work_dir.join("frames.json");
    let json_path = work_dir.join("out/report.json");
    fs::write(&frames_path, frames)?;

    let mut cmd = cargo_bin_cmd!("facer-cli");
    cmd.current_dir(work_dir)
        .arg("--frames")
        .arg(&frames_path)
        .arg("--json")
        .arg(&json_path)
        .args(extra);
    cmd.assert().success();

    let contents = fs::read_to_string(&json_path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[test]
fn dog_replay_ends_on_last_complete_frame() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let report = run_replay(work_dir.path(), DOG_FRAMES, &["--variant", "dog"])?;

    assert_eq!(report.variant, "dog");
    assert_eq!(report.view, [640, 480]);
    assert!(!report.mirrored);
    assert_eq!(report.frames, 3);
    assert!(!report.draws.is_empty());

    for draw in &report.draws {
        // Frame 2 lost the right eye; any draw that saw it drew nothing.
        let expected = if draw.generation == 2 { 0 } else { 3 };
        assert_eq!(draw.boxes.len(), expected, "generation {}", draw.generation);
        assert!(draw.rendered.is_none());
    }

    let last = report.draws.last().unwrap();
    assert_eq!(last.generation, 3);
    assert_eq!(
        last.boxes,
        vec![
            placed("left_ear", 79, 42, 91, 77),
            placed("right_ear", 109, 42, 121, 77),
            placed("nose", 88, 95, 112, 105),
        ]
    );
    Ok(())
}

#[test]
fn mirrored_monkey_replay_renders_frames() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let annotate_dir = work_dir.path().join("rendered");
    let frames = r#"[
        { "position": { "x": 10, "y": 30 }, "width": 30, "height": 20,
          "nose_base": { "x": 25, "y": 50 } }
    ]"#;
    let report = run_replay(
        work_dir.path(),
        frames,
        &[
            "--variant",
            "monkey",
            "--view-width",
            "200",
            "--view-height",
            "200",
            "--preview-width",
            "100",
            "--preview-height",
            "100",
            "--front-facing",
            "--annotate",
            annotate_dir.to_str().unwrap(),
        ],
    )?;

    assert_eq!(report.variant, "monkey");
    assert!(report.mirrored);
    assert_eq!(report.draws.len(), 1);
    let draw = &report.draws[0];
    // nose -> (200 - 25 * 2, 50 * 2) = (150, 100); face -> 60 x 40
    assert_eq!(draw.boxes, vec![placed("full_face", 120, 80, 180, 120)]);

    let rendered = draw.rendered.as_ref().expect("frame was rendered");
    assert!(rendered.ends_with("frame_000001.png"));
    let image = image::open(rendered)?;
    assert_eq!(image.dimensions(), (200, 200));
    assert!(image.get_pixel(150, 100)[3] > 0, "overlay painted at the nose");
    assert_eq!(image.get_pixel(10, 10)[3], 0, "background left untouched");
    Ok(())
}

#[test]
fn background_image_sets_view_size() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let background = work_dir.path().join("background.png");
    RgbaImage::from_pixel(320, 240, Rgba([10, 20, 30, 255])).save(&background)?;

    let frames = r#"[ { "width": 10, "height": 10 } ]"#;
    let report = run_replay(
        work_dir.path(),
        frames,
        &["--background", background.to_str().unwrap()],
    )?;

    assert_eq!(report.view, [320, 240]);
    assert_eq!(report.variant, "monkey");
    assert_eq!(report.draws.len(), 1);
    assert!(report.draws[0].boxes.is_empty());
    Ok(())
}

#[test]
fn settings_file_selects_variant() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let config = work_dir.path().join("settings.json");
    fs::write(&config, r#"{ "overlay": { "variant": "dog_face" } }"#)?;

    let report = run_replay(
        work_dir.path(),
        DOG_FRAMES,
        &["--config", config.to_str().unwrap()],
    )?;
    assert_eq!(report.variant, "dog");
    assert_eq!(report.draws.last().unwrap().boxes.len(), 3);
    Ok(())
}

#[test]
fn huge_face_extents_do_not_crash_replay() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let annotate_dir = work_dir.path().join("rendered");
    let frames = r#"[
        { "position": { "x": 0, "y": 0 }, "width": 1e10, "height": 40,
          "nose_base": { "x": 100, "y": 100 } }
    ]"#;
    let report = run_replay(
        work_dir.path(),
        frames,
        &["--annotate", annotate_dir.to_str().unwrap()],
    )?;

    let draw = report.draws.last().unwrap();
    assert_eq!(
        draw.boxes,
        vec![placed("full_face", i32::MIN, 80, i32::MAX, 120)]
    );
    // The oversized overlay is skipped, leaving the blank canvas as-is.
    let rendered = image::open(draw.rendered.as_ref().unwrap())?;
    assert_eq!(rendered.get_pixel(100, 100)[3], 0);
    Ok(())
}

#[test]
fn empty_frames_file_fails() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let frames_path = work_dir.path().join("frames.json");
    fs::write(&frames_path, "[]")?;

    let mut cmd = cargo_bin_cmd!("facer-cli");
    let output = cmd
        .current_dir(work_dir.path())
        .arg("--frames")
        .arg(&frames_path)
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no detection frames found"), "{stderr}");
    Ok(())
}

#[test]
fn missing_frames_file_fails() {
    let work_dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("facer-cli");
    cmd.current_dir(work_dir.path())
        .arg("--frames")
        .arg(work_dir.path().join("absent.json"))
        .assert()
        .failure();
}
