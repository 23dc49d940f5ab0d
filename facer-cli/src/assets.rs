//! Overlay bitmap loading, with generated placeholders when no assets are given.

use std::path::Path;

use anyhow::{Context, Result};
use facer_core::{Drawable, OverlayElement, OverlayLayout};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_ellipse_mut;
use log::{debug, warn};

use crate::canvas::{BitmapDrawable, RasterCanvas};

const PLACEHOLDER_SIDE: u32 = 64;

/// File name of the bitmap for an element inside the assets directory.
pub fn asset_file_name(element: OverlayElement) -> &'static str {
    match element {
        OverlayElement::FullFace => "monkey.png",
        OverlayElement::LeftEar => "dog_left_ear.png",
        OverlayElement::RightEar => "dog_right_ear.png",
        OverlayElement::Nose => "dog_nose.png",
    }
}

fn placeholder_color(element: OverlayElement) -> Rgba<u8> {
    match element {
        OverlayElement::FullFace => Rgba([139, 90, 43, 220]),
        OverlayElement::LeftEar | OverlayElement::RightEar => Rgba([92, 64, 51, 230]),
        OverlayElement::Nose => Rgba([20, 20, 20, 240]),
    }
}

/// Filled ellipse on a transparent square, tinted per element.
pub fn placeholder_bitmap(element: OverlayElement) -> RgbaImage {
    let mut bitmap = RgbaImage::new(PLACEHOLDER_SIDE, PLACEHOLDER_SIDE);
    let center = (PLACEHOLDER_SIDE as i32 / 2, PLACEHOLDER_SIDE as i32 / 2);
    let radius = PLACEHOLDER_SIDE as i32 / 2 - 1;
    draw_filled_ellipse_mut(
        &mut bitmap,
        center,
        radius,
        radius,
        placeholder_color(element),
    );
    bitmap
}

/// Read one element's bitmap from `dir`.
pub fn load_bitmap(dir: &Path, element: OverlayElement) -> Result<RgbaImage> {
    let path = dir.join(asset_file_name(element));
    let image = image::open(&path)
        .with_context(|| format!("failed to open overlay bitmap {}", path.display()))?;
    debug!("Loaded {element} bitmap from {}", path.display());
    Ok(image.to_rgba8())
}

/// One drawable per element the layout emits.
///
/// Unreadable asset files fall back to a placeholder so a partial asset
/// folder still renders something.
pub fn load_drawables(
    layout: &dyn OverlayLayout,
    assets_dir: Option<&Path>,
) -> Vec<(OverlayElement, Box<dyn Drawable<RasterCanvas>>)> {
    layout
        .elements()
        .iter()
        .map(|&element| {
            let bitmap = match assets_dir {
                Some(dir) => load_bitmap(dir, element).unwrap_or_else(|err| {
                    warn!("{err:#}; using placeholder for {element}");
                    placeholder_bitmap(element)
                }),
                None => placeholder_bitmap(element),
            };
            let drawable: Box<dyn Drawable<RasterCanvas>> = Box::new(BitmapDrawable::new(bitmap));
            (element, drawable)
        })
        .collect()
}
