//! The face overlay graphic: holds the newest detection and draws the cartoon.

use std::{collections::BTreeMap, fmt, sync::Arc};

use facer_utils::{OverlayVariant, timing_guard};
use log::{Level, debug, trace};

use crate::error::GraphicError;
use crate::layout::{OverlayElement, OverlayLayout, PlacedBox, ScreenAnchors, layout_for};
use crate::mapping::CoordinateMapper;
use crate::render::{Drawable, RedrawRequester};
use crate::snapshot::DetectionSnapshot;
use crate::state::{OverlayState, OverlayUpdater, SnapshotSlot};

/// What a single [`FaceGraphic::draw`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Generation of the snapshot the draw observed; `None` while empty.
    pub generation: Option<u64>,
    /// Boxes handed to drawables, in draw order.
    pub boxes: Vec<PlacedBox>,
}

impl DrawOutcome {
    /// Number of drawables painted.
    pub fn draw_calls(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_skipped(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Cartoon overlay for one tracked face, drawn onto canvases of type `C`.
///
/// The detection thread publishes through [`FaceGraphic::updater`] (or
/// [`FaceGraphic::update`]); the drawing thread calls [`FaceGraphic::draw`].
/// The two sides share nothing but the atomically swapped snapshot.
pub struct FaceGraphic<C: ?Sized> {
    mapper: CoordinateMapper,
    layout: Box<dyn OverlayLayout>,
    drawables: BTreeMap<OverlayElement, Box<dyn Drawable<C>>>,
    slot: Arc<SnapshotSlot>,
}

impl<C: ?Sized> FaceGraphic<C> {
    /// Assemble a graphic from a layout strategy and one drawable per element.
    ///
    /// Fails when the layout emits an element that has no drawable.
    pub fn new<I>(
        mapper: CoordinateMapper,
        layout: Box<dyn OverlayLayout>,
        drawables: I,
        redraw: impl RedrawRequester + 'static,
    ) -> Result<Self, GraphicError>
    where
        I: IntoIterator<Item = (OverlayElement, Box<dyn Drawable<C>>)>,
    {
        let drawables: BTreeMap<_, _> = drawables.into_iter().collect();
        if let Some(missing) = layout
            .elements()
            .iter()
            .find(|element| !drawables.contains_key(*element))
        {
            return Err(GraphicError::MissingDrawable(*missing));
        }

        Ok(Self {
            mapper,
            layout,
            drawables,
            slot: Arc::new(SnapshotSlot::new(redraw)),
        })
    }

    /// Graphic using the layout strategy of a configured variant.
    pub fn for_variant<I>(
        variant: OverlayVariant,
        mapper: CoordinateMapper,
        drawables: I,
        redraw: impl RedrawRequester + 'static,
    ) -> Result<Self, GraphicError>
    where
        I: IntoIterator<Item = (OverlayElement, Box<dyn Drawable<C>>)>,
    {
        Self::new(mapper, layout_for(variant), drawables, redraw)
    }

    /// Handle the detection thread uses to publish snapshots.
    pub fn updater(&self) -> OverlayUpdater {
        OverlayUpdater::new(self.slot.clone())
    }

    /// Replace the held detection and request a redraw.
    pub fn update(&self, snapshot: DetectionSnapshot) {
        self.slot.publish(snapshot);
    }

    pub fn state(&self) -> OverlayState {
        self.slot.state()
    }

    /// Swap in new view geometry, e.g. after the camera preview size changed.
    pub fn set_mapper(&mut self, mapper: CoordinateMapper) {
        self.mapper = mapper;
    }

    pub fn layout(&self) -> &dyn OverlayLayout {
        self.layout.as_ref()
    }

    /// Draw the overlay for the newest detection.
    ///
    /// The snapshot is loaded once up front; an update landing mid-draw is
    /// picked up by the next call. Nothing is drawn until every field the
    /// layout needs is present.
    pub fn draw(&mut self, canvas: &mut C) -> DrawOutcome {
        let _guard = timing_guard("facer_core::draw", Level::Trace);

        let Some(frame) = self.slot.latest() else {
            trace!("no detection published yet; skipping draw");
            return DrawOutcome::default();
        };
        let generation = Some(frame.generation);
        let snapshot = &frame.snapshot;

        if let Some(missing) = snapshot.first_missing(self.layout.required_anchors()) {
            debug!(
                "generation {}: {missing:?} missing, nothing to draw",
                frame.generation
            );
            return DrawOutcome {
                generation,
                boxes: Vec::new(),
            };
        }

        let anchors = self.screen_anchors(snapshot);
        let boxes = self.layout.layout(&anchors);
        for placed in &boxes {
            if let Some(drawable) = self.drawables.get_mut(&placed.element) {
                drawable.set_bounds(placed.bounds);
                drawable.draw(canvas);
            }
        }

        trace!(
            "generation {}: drew {} overlay element(s)",
            frame.generation,
            boxes.len()
        );
        DrawOutcome { generation, boxes }
    }

    fn screen_anchors(&self, snapshot: &DetectionSnapshot) -> ScreenAnchors {
        let map = |p: Option<facer_utils::Point>| p.map(|p| self.mapper.map_point(p));
        ScreenAnchors {
            position: map(snapshot.position),
            face_width: self.mapper.scale_x(snapshot.width),
            face_height: self.mapper.scale_y(snapshot.height),
            left_eye: map(snapshot.left_eye),
            right_eye: map(snapshot.right_eye),
            nose_base: map(snapshot.nose_base),
        }
    }
}

impl<C: ?Sized> fmt::Debug for FaceGraphic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceGraphic")
            .field("mapper", &self.mapper)
            .field("layout", &self.layout)
            .field("drawables", &self.drawables.keys().collect::<Vec<_>>())
            .field("slot", &self.slot)
            .finish()
    }
}
