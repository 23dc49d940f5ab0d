//! Overlay box layout for the cartoon face variants.
//!
//! Boxes are sized as fixed fractions of the display-space face size and
//! anchored on display-space landmarks. Every bound is truncated toward zero
//! (`as i32`) after the floating-point arithmetic so output stays
//! pixel-identical with the Android overlays this mirrors.

use std::fmt;

use facer_utils::{OverlayVariant, Point};
use serde::Serialize;

use crate::snapshot::Anchor;

const EAR_WIDTH_RATIO: f32 = (1.0 / 5.0_f64) as f32;
const EAR_HEIGHT_RATIO: f32 = (1.0 / 6.0_f64) as f32;
const NOSE_WIDTH_RATIO: f32 = (2.0 / 5.0_f64) as f32;
const NOSE_HEIGHT_RATIO: f32 = (2.0 / 6.0_f64) as f32;

/// Decorative bitmap slots an overlay can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayElement {
    FullFace,
    LeftEar,
    RightEar,
    Nose,
}

impl OverlayElement {
    pub fn as_str(self) -> &'static str {
        match self {
            OverlayElement::FullFace => "full_face",
            OverlayElement::LeftEar => "left_ear",
            OverlayElement::RightEar => "right_ear",
            OverlayElement::Nose => "nose",
        }
    }
}

impl fmt::Display for OverlayElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer rectangle in display space, stored the way drawables take bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OverlayBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl OverlayBox {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Signed width; negative when `right < left`. Saturates at the `i32` range.
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Signed height; negative when `bottom < top`. Saturates at the `i32` range.
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// One laid-out element for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedBox {
    pub element: OverlayElement,
    #[serde(flatten)]
    pub bounds: OverlayBox,
}

/// Display-space face geometry handed to a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenAnchors {
    pub position: Option<Point>,
    pub face_width: f32,
    pub face_height: f32,
    pub left_eye: Option<Point>,
    pub right_eye: Option<Point>,
    pub nose_base: Option<Point>,
}

/// Box of `width` x `height` centered on `center`.
pub fn centered_box(center: Point, width: f32, height: f32) -> OverlayBox {
    OverlayBox {
        left: (center.x - width / 2.0) as i32,
        top: (center.y - height / 2.0) as i32,
        right: (center.x + width / 2.0) as i32,
        bottom: (center.y + height / 2.0) as i32,
    }
}

/// Ear box anchored on an eye.
///
/// Horizontal bounds are centered on the eye. The vertical bounds keep the
/// original arithmetic, `top = trunc(y + h) / 2` and `bottom = trunc(y - h/2)`,
/// which puts `top` near half the eye height on screen rather than above the
/// eye. Rendered output depends on this, so it is reproduced as-is.
pub fn ear_box(eye: Point, width: f32, height: f32) -> OverlayBox {
    OverlayBox {
        left: (eye.x - width / 2.0) as i32,
        top: (eye.y + height) as i32 / 2,
        right: (eye.x + width / 2.0) as i32,
        bottom: (eye.y - height / 2.0) as i32,
    }
}

/// Strategy that turns screen anchors into overlay boxes.
pub trait OverlayLayout: fmt::Debug + Send + Sync {
    /// Snapshot fields that must all be present before anything is drawn.
    fn required_anchors(&self) -> &'static [Anchor];

    /// Elements emitted, in draw order.
    fn elements(&self) -> &'static [OverlayElement];

    /// Lay out every element, or nothing when a required anchor is absent.
    fn layout(&self, anchors: &ScreenAnchors) -> Vec<PlacedBox>;
}

/// A single icon covering the whole face, centered on the nose base.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleIconLayout;

impl OverlayLayout for SingleIconLayout {
    fn required_anchors(&self) -> &'static [Anchor] {
        &[Anchor::Position, Anchor::NoseBase]
    }

    fn elements(&self) -> &'static [OverlayElement] {
        &[OverlayElement::FullFace]
    }

    fn layout(&self, anchors: &ScreenAnchors) -> Vec<PlacedBox> {
        let (Some(_), Some(nose)) = (anchors.position, anchors.nose_base) else {
            return Vec::new();
        };
        vec![PlacedBox {
            element: OverlayElement::FullFace,
            bounds: centered_box(nose, anchors.face_width, anchors.face_height),
        }]
    }
}

/// Two ears over the eyes plus a nose over the nose base.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreePartLayout;

impl OverlayLayout for ThreePartLayout {
    fn required_anchors(&self) -> &'static [Anchor] {
        &[
            Anchor::Position,
            Anchor::LeftEye,
            Anchor::RightEye,
            Anchor::NoseBase,
        ]
    }

    fn elements(&self) -> &'static [OverlayElement] {
        &[
            OverlayElement::LeftEar,
            OverlayElement::RightEar,
            OverlayElement::Nose,
        ]
    }

    fn layout(&self, anchors: &ScreenAnchors) -> Vec<PlacedBox> {
        let (Some(_), Some(left_eye), Some(right_eye), Some(nose)) = (
            anchors.position,
            anchors.left_eye,
            anchors.right_eye,
            anchors.nose_base,
        ) else {
            return Vec::new();
        };

        let ear_width = anchors.face_width * EAR_WIDTH_RATIO;
        let ear_height = anchors.face_height * EAR_HEIGHT_RATIO;
        let nose_width = anchors.face_width * NOSE_WIDTH_RATIO;
        let nose_height = anchors.face_height * NOSE_HEIGHT_RATIO;

        vec![
            PlacedBox {
                element: OverlayElement::LeftEar,
                bounds: ear_box(left_eye, ear_width, ear_height),
            },
            PlacedBox {
                element: OverlayElement::RightEar,
                bounds: ear_box(right_eye, ear_width, ear_height),
            },
            PlacedBox {
                element: OverlayElement::Nose,
                bounds: centered_box(nose, nose_width, nose_height),
            },
        ]
    }
}

/// Layout strategy for a configured overlay variant.
pub fn layout_for(variant: OverlayVariant) -> Box<dyn OverlayLayout> {
    match variant {
        OverlayVariant::MonkeyFace => Box::new(SingleIconLayout),
        OverlayVariant::DogFace => Box::new(ThreePartLayout),
    }
}
