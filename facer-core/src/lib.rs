//! Core face overlay primitives.
//!
//! This crate turns a face detector's per-frame output into display-space
//! boxes for cartoon overlay elements and paints them through caller-supplied
//! drawables. Detection, capture and bitmap loading live outside the crate.

/// Typed construction errors.
pub mod error;
/// Face overlay graphic and its draw path.
pub mod graphic;
/// Proportional overlay box layouts (monkey face, dog face).
pub mod layout;
/// Detector-space to display-space mapping.
pub mod mapping;
/// Drawable and redraw-request contracts.
pub mod render;
/// Detection snapshot data model.
pub mod snapshot;
/// Atomic latest-snapshot slot shared by producer and consumer.
pub mod state;

pub use error::GraphicError;
pub use graphic::{DrawOutcome, FaceGraphic};
pub use layout::{
    OverlayBox, OverlayElement, OverlayLayout, PlacedBox, ScreenAnchors, SingleIconLayout,
    ThreePartLayout, centered_box, ear_box, layout_for,
};
pub use mapping::{CameraFacing, CameraInfo, CoordinateMapper};
pub use render::{Drawable, NoRedraw, RedrawRequester};
pub use snapshot::{Anchor, BoundingBox, DetectionSnapshot};
pub use state::{OverlayState, OverlayUpdater, PublishedSnapshot, SnapshotSlot};

pub use facer_utils::{OverlayVariant, Point};
