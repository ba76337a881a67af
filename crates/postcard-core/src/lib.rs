//! Postcard Core Library
//!
//! Platform-agnostic widget model and interaction logic for the postcard editor.

pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod interaction;
pub mod palette;
pub mod payload;
pub mod stamp;
pub mod store;
pub mod widgets;

pub use catalog::{FontOption, ImageOption, StampOption, StickerOption};
pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use input::{CanvasEvent, EventResponse};
pub use interaction::{DragSession, FocusRequest, InteractionController, InteractionState, Propagation};
pub use palette::{DisclosureMenu, PaletteKind, Toolbar};
pub use payload::{DragData, DragPayload, PayloadError};
pub use stamp::{Instant, StampSlot};
pub use store::{StoreError, WidgetStore};
pub use widgets::{MarkKind, MarkWidget, TextWidget, Widget, WidgetId, WidgetKind, WidgetPatch, WidgetRef, WidgetTrait};
