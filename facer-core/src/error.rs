use thiserror::Error;

use crate::layout::OverlayElement;

/// Errors raised while assembling a face graphic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphicError {
    #[error("no drawable registered for overlay element '{0}'")]
    MissingDrawable(OverlayElement),
}
