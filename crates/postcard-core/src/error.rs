//! Editor errors.

use crate::palette::PaletteKind;
use crate::payload::PayloadError;
use crate::store::StoreError;
use crate::widgets::WidgetId;
use thiserror::Error;

/// Errors from editor operations.
///
/// All of them are recoverable: the operation that failed left the editor
/// unchanged.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Canvas is not mounted")]
    NoCanvas,
    #[error("Unknown widget: {0}")]
    UnknownWidget(WidgetId),
    #[error("Unknown catalog entry: {0}")]
    UnknownCatalogEntry(String),
    #[error("{0:?} entries cannot be dragged")]
    NotDraggable(PaletteKind),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
