use facer_utils::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned face box in detector coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The x-coordinate of the top-left corner.
    pub x: f32,
    /// The y-coordinate of the top-left corner.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fields of a [`DetectionSnapshot`] a layout can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Position,
    LeftEye,
    RightEye,
    NoseBase,
}

/// One frame of face-detector output, in detector space.
///
/// Every coordinate field is optional: detectors routinely lose individual
/// landmarks (a turned head hides an eye). Snapshots are never edited after
/// construction; a newer frame replaces the whole value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSnapshot {
    /// Face anchor (top-left of the detected face).
    pub position: Option<Point>,
    pub width: f32,
    pub height: f32,
    pub left_eye: Option<Point>,
    pub right_eye: Option<Point>,
    pub nose_base: Option<Point>,
}

impl DetectionSnapshot {
    /// Snapshot with a position and size but no landmarks yet.
    pub fn new(position: Point, width: f32, height: f32) -> Self {
        Self {
            position: Some(position),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_left_eye(mut self, point: Point) -> Self {
        self.left_eye = Some(point);
        self
    }

    pub fn with_right_eye(mut self, point: Point) -> Self {
        self.right_eye = Some(point);
        self
    }

    pub fn with_nose_base(mut self, point: Point) -> Self {
        self.nose_base = Some(point);
        self
    }

    /// Build a snapshot from a box plus five landmarks ordered
    /// `[right eye, left eye, nose tip, right mouth, left mouth]`.
    ///
    /// The mouth corners have no overlay counterpart and are dropped.
    pub fn from_landmarks(bbox: BoundingBox, landmarks: [Point; 5]) -> Self {
        let [right_eye, left_eye, nose_tip, _, _] = landmarks;
        Self {
            position: Some(Point::new(bbox.x, bbox.y)),
            width: bbox.width,
            height: bbox.height,
            left_eye: Some(left_eye),
            right_eye: Some(right_eye),
            nose_base: Some(nose_tip),
        }
    }

    pub fn anchor(&self, anchor: Anchor) -> Option<Point> {
        match anchor {
            Anchor::Position => self.position,
            Anchor::LeftEye => self.left_eye,
            Anchor::RightEye => self.right_eye,
            Anchor::NoseBase => self.nose_base,
        }
    }

    /// Returns the first of `anchors` that is absent, if any.
    pub fn first_missing(&self, anchors: &[Anchor]) -> Option<Anchor> {
        anchors.iter().copied().find(|a| self.anchor(*a).is_none())
    }
}
