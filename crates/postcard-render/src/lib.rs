//! Postcard Render Library
//!
//! Display list, rasterizer abstraction and PNG export for the postcard editor.
//! The browser shell supplies the real rasterizer; `BlockoutRasterizer` draws
//! the layout as flat blocks.

pub mod export;
mod renderer;
pub mod surface;

pub use export::{DownloadSink, ExportError, ExportOptions, ExportedImage, Exporter, MIME_PNG, encode_png};
pub use renderer::{Bitmap, BlockoutRasterizer, BoxFuture, Rasterizer, RenderContext, RendererError};
pub use surface::{Anchor, Backdrop, BackdropStyle, SceneItem, StampPlaceholder, SurfaceScene};
