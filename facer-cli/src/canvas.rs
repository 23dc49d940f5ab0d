//! Raster canvas and bitmap drawables backed by the `image` crate.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use facer_core::{Drawable, OverlayBox};
use image::{RgbaImage, imageops};
use log::{trace, warn};

/// Longest side a single overlay may be stretched to before it is skipped.
const MAX_OVERLAY_SIDE: i32 = 8_192;

/// RGBA frame that overlays are composited onto.
pub struct RasterCanvas {
    background: RgbaImage,
    image: RgbaImage,
}

impl RasterCanvas {
    pub fn new(background: RgbaImage) -> Self {
        Self {
            image: background.clone(),
            background,
        }
    }

    /// Transparent-black canvas of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbaImage::new(width, height))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Restore the background ahead of the next draw.
    pub fn clear(&mut self) {
        self.image.clone_from(&self.background);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        self.image
            .save(path)
            .with_context(|| format!("failed to save rendered frame {}", path.display()))
    }
}

/// Bitmap stretched into its bounds when drawn.
pub struct BitmapDrawable {
    bitmap: RgbaImage,
    bounds: OverlayBox,
}

impl BitmapDrawable {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self {
            bitmap,
            bounds: OverlayBox::new(0, 0, 0, 0),
        }
    }
}

impl Drawable<RasterCanvas> for BitmapDrawable {
    fn set_bounds(&mut self, bounds: OverlayBox) {
        self.bounds = bounds;
    }

    fn draw(&self, canvas: &mut RasterCanvas) {
        let bounds = self.bounds;
        if bounds.is_empty() {
            trace!("skipping overlay with empty bounds {bounds:?}");
            return;
        }
        if bounds.width() > MAX_OVERLAY_SIDE || bounds.height() > MAX_OVERLAY_SIDE {
            warn!("skipping oversized overlay {bounds:?}");
            return;
        }

        let stretched = imageops::resize(
            &self.bitmap,
            bounds.width() as u32,
            bounds.height() as u32,
            imageops::FilterType::Triangle,
        );
        imageops::overlay(
            &mut canvas.image,
            &stretched,
            i64::from(bounds.left),
            i64::from(bounds.top),
        );
    }
}
