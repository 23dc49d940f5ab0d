//! Detector-space to display-space coordinate mapping.

use facer_utils::{OverlaySettings, Point};
use log::warn;

/// Which way the camera sensor faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraFacing {
    /// Selfie camera; the preview is shown mirrored.
    Front,
    #[default]
    Back,
}

impl CameraFacing {
    pub fn is_mirrored(self) -> bool {
        matches!(self, CameraFacing::Front)
    }
}

/// Size of the frames the detector sees and the sensor orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraInfo {
    pub preview_width: u32,
    pub preview_height: u32,
    pub facing: CameraFacing,
}

/// Maps detector coordinates and extents onto the drawing surface.
///
/// All operations are pure arithmetic; the mapper never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale_x: f32,
    scale_y: f32,
    view_width: f32,
    mirrored: bool,
}

impl CoordinateMapper {
    pub fn new(scale_x: f32, scale_y: f32, view_width: f32, mirrored: bool) -> Self {
        Self {
            scale_x,
            scale_y,
            view_width,
            mirrored,
        }
    }

    /// Derive the scale factors from the view size and the camera preview size.
    ///
    /// A zero preview dimension leaves that axis unscaled.
    pub fn from_camera_info(view_width: u32, view_height: u32, camera: &CameraInfo) -> Self {
        let scale_x = axis_scale(view_width, camera.preview_width, "width");
        let scale_y = axis_scale(view_height, camera.preview_height, "height");
        Self::new(
            scale_x,
            scale_y,
            view_width as f32,
            camera.facing.is_mirrored(),
        )
    }

    /// Mapper for the view described by persisted overlay settings.
    pub fn from_settings(settings: &OverlaySettings) -> Self {
        let (preview_width, preview_height) = settings.preview_size();
        let facing = if settings.front_facing {
            CameraFacing::Front
        } else {
            CameraFacing::Back
        };
        Self::from_camera_info(
            settings.view_width,
            settings.view_height,
            &CameraInfo {
                preview_width,
                preview_height,
                facing,
            },
        )
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn view_width(&self) -> f32 {
        self.view_width
    }

    /// Horizontal position in display space, flipped for front-facing sources.
    pub fn translate_x(&self, x: f32) -> f32 {
        if self.mirrored {
            self.view_width - x * self.scale_x
        } else {
            x * self.scale_x
        }
    }

    /// Vertical position in display space. Never mirrored.
    pub fn translate_y(&self, y: f32) -> f32 {
        y * self.scale_y
    }

    /// Horizontal extent in display space (magnitude only).
    pub fn scale_x(&self, width: f32) -> f32 {
        width * self.scale_x
    }

    /// Vertical extent in display space (magnitude only).
    pub fn scale_y(&self, height: f32) -> f32 {
        height * self.scale_y
    }

    pub fn map_point(&self, point: Point) -> Point {
        Point::new(self.translate_x(point.x), self.translate_y(point.y))
    }
}

fn axis_scale(view: u32, preview: u32, axis: &str) -> f32 {
    if preview == 0 {
        warn!("camera preview {axis} is zero; leaving that axis unscaled");
        return 1.0;
    }
    view as f32 / preview as f32
}
