//! Contracts for the platform pieces the overlay draws through.

use crate::layout::OverlayBox;

/// A decorative image that can be positioned and painted onto a canvas `C`.
///
/// Mirrors the platform drawable contract: bounds are set first, then the
/// drawable is asked to paint itself stretched into those bounds.
pub trait Drawable<C: ?Sized>: Send {
    fn set_bounds(&mut self, bounds: OverlayBox);

    fn draw(&self, canvas: &mut C);
}

/// Asks the drawing subsystem to schedule another draw.
///
/// Implementations must return promptly; the caller is usually the detection
/// thread.
pub trait RedrawRequester: Send + Sync {
    fn request_redraw(&self);
}

/// Requester for hosts that redraw on their own schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedraw;

impl RedrawRequester for NoRedraw {
    fn request_redraw(&self) {}
}

impl<F> RedrawRequester for F
where
    F: Fn() + Send + Sync,
{
    fn request_redraw(&self) {
        self()
    }
}
