//! Rasterizer abstraction.

use crate::export::ExportOptions;
use crate::surface::{BackdropStyle, SceneItem, SurfaceScene};
use kurbo::{Affine, Rect, Size};
use peniko::Color;
use postcard_core::{Editor, Instant, WidgetId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Invalid bitmap: expected {expected} bytes, got {actual}")]
    InvalidBitmap { expected: usize, actual: usize },
}

/// Boxed future returned by rasterizers. Not `Send`: the browser runs
/// everything on one thread.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// RGBA8 pixels, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Bitmap {
    /// Largest pixel buffer a bitmap may hold (1 GiB).
    pub const MAX_BYTES: usize = 1 << 30;

    /// Buffer length for `width` x `height` RGBA8 pixels, if within `MAX_BYTES`.
    fn byte_len(width: u32, height: u32) -> Result<usize, RendererError> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .filter(|&len| len <= Self::MAX_BYTES)
            .ok_or_else(|| RendererError::RenderFailed(format!("bitmap {}x{} is too large", width, height)))
    }

    /// Wrap pixel data, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Result<Self, RendererError> {
        let expected = Self::byte_len(width, height)?;
        if rgba_data.len() != expected {
            return Err(RendererError::InvalidBitmap {
                expected,
                actual: rgba_data.len(),
            });
        }
        Ok(Self {
            rgba_data,
            width,
            height,
        })
    }

    /// Fully transparent bitmap.
    pub fn blank(width: u32, height: u32) -> Result<Self, RendererError> {
        Ok(Self {
            rgba_data: vec![0; Self::byte_len(width, height)?],
            width,
            height,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at (x, y), or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba_data.get(i..i + 4).and_then(|p| p.try_into().ok())
    }

    /// Overwrite the pixels covered by `rect` (clipped to the bitmap).
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let c = color.to_rgba8();
        let rgba = [c.r, c.g, c.b, c.a];
        let clamp_x = |v: f64| v.clamp(0.0, f64::from(self.width)) as u32;
        let clamp_y = |v: f64| v.clamp(0.0, f64::from(self.height)) as u32;
        let (x0, x1) = (clamp_x(rect.x0.floor()), clamp_x(rect.x1.ceil()));
        let (y0, y1) = (clamp_y(rect.y0.floor()), clamp_y(rect.y1.ceil()));

        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let i = (row + x as usize) * 4;
                self.rgba_data[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
}

/// Context for building one surface frame.
pub struct RenderContext<'a> {
    /// The editor to render.
    pub editor: &'a Editor,
    /// Canvas size in CSS pixels.
    pub canvas_size: Size,
    /// Backdrop colors.
    pub style: BackdropStyle,
    /// Text widget whose input should grab focus on this frame.
    pub focus: Option<WidgetId>,
    /// Frame time, for transitions.
    pub now: Instant,
}

impl<'a> RenderContext<'a> {
    /// Create a render context sized to the editor's canvas bounds.
    pub fn new(editor: &'a Editor, now: Instant) -> Self {
        Self {
            editor,
            canvas_size: editor.canvas_bounds().map(|b| b.size()).unwrap_or(Size::ZERO),
            style: Default::default(),
            focus: None,
            now,
        }
    }

    /// Set the widget whose input should take focus.
    pub fn with_focus(mut self, focus: Option<WidgetId>) -> Self {
        self.focus = focus;
        self
    }
}

/// Turns a surface scene into pixels.
///
/// The browser implementation snapshots the DOM subtree; others can draw the
/// display list directly.
pub trait Rasterizer {
    /// Rasterize `scene` at `options.scale`.
    fn rasterize<'a>(&'a self, scene: &'a SurfaceScene, options: &'a ExportOptions) -> BoxFuture<'a, Result<Bitmap, RendererError>>;
}

/// Draws the scene layout as flat blocks: backdrop regions and widget boxes.
/// Images and glyphs are not drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockoutRasterizer;

impl BlockoutRasterizer {
    /// Approximate glyph box for blockout text.
    const CHAR_WIDTH: f64 = 10.0;
    const LINE_HEIGHT: f64 = 24.0;

    /// Rasterize synchronously.
    pub fn draw(&self, scene: &SurfaceScene, options: &ExportOptions) -> Result<Bitmap, RendererError> {
        let scale = options.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RendererError::RenderFailed(format!("invalid scale {}", scale)));
        }
        let pixels = |length: f64| {
            let pixels = (length * scale).ceil().max(0.0);
            if pixels > f64::from(u32::MAX) {
                return Err(RendererError::RenderFailed(format!("{} pixels at scale {} is too large", length, scale)));
            }
            Ok(pixels as u32)
        };
        let mut bitmap = Bitmap::blank(pixels(scene.size.width)?, pixels(scene.size.height)?)?;
        if bitmap.is_empty() {
            return Ok(bitmap);
        }

        let to_pixels = Affine::scale(scale);
        let backdrop = &scene.backdrop;
        let style = &backdrop.style;
        let mut fill = |rect: Rect, color: Color| bitmap.fill_rect(to_pixels.transform_rect_bbox(rect), color);

        // The backdrop covers the whole bitmap, so there is no page background
        // to make transparent. Border drawn as a frame, then the paper inside it.
        fill(backdrop.border, style.border);
        fill(backdrop.border.inset(-1.0), style.paper);
        fill(backdrop.divider, style.divider);
        fill(backdrop.stamp.bounds, style.divider);
        for line in &backdrop.address_lines {
            fill(*line, style.address_line);
        }

        for item in &scene.items {
            let rect = match item {
                SceneItem::Text {
                    position,
                    anchor,
                    input_size,
                    ..
                } => anchor.rect(
                    *position,
                    Size::new(*input_size as f64 * Self::CHAR_WIDTH, Self::LINE_HEIGHT),
                ),
                SceneItem::Mark { bounds, .. } => *bounds,
            };
            fill(rect, style.ink);
        }

        Ok(bitmap)
    }
}

impl Rasterizer for BlockoutRasterizer {
    fn rasterize<'a>(&'a self, scene: &'a SurfaceScene, options: &'a ExportOptions) -> BoxFuture<'a, Result<Bitmap, RendererError>> {
        Box::pin(std::future::ready(self.draw(scene, options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn scene(editor: &Editor) -> SurfaceScene {
        SurfaceScene::build(&RenderContext::new(editor, Instant::now()))
    }

    #[test]
    fn test_bitmap_length_checked() {
        assert!(Bitmap::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Bitmap::new(2, 2, vec![0; 15]),
            Err(RendererError::InvalidBitmap { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_oversized_bitmap_rejected() {
        assert!(matches!(Bitmap::blank(u32::MAX, u32::MAX), Err(RendererError::RenderFailed(_))));
        assert!(matches!(Bitmap::blank(1 << 16, 1 << 16), Err(RendererError::RenderFailed(_))));
        assert!(Bitmap::new(u32::MAX, u32::MAX, Vec::new()).is_err());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut bitmap = Bitmap::blank(4, 4).unwrap();
        bitmap.fill_rect(Rect::new(2.0, 2.0, 10.0, 10.0), Color::from_rgba8(255, 0, 0, 255));

        assert_eq!(bitmap.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(bitmap.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(bitmap.pixel(4, 0), None);
    }

    #[test]
    fn test_blockout_scales() {
        let mut editor = Editor::default();
        editor.set_canvas_bounds(Some(Rect::new(0.0, 0.0, 300.0, 200.0)));
        editor.add_mark(None, None, Some(Point::new(60.0, 60.0))).unwrap();

        let bitmap = BlockoutRasterizer.draw(&scene(&editor), &ExportOptions::default()).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (600, 400));

        let ink = BackdropStyle::default().ink.to_rgba8();
        assert_eq!(bitmap.pixel(120, 120), Some([ink.r, ink.g, ink.b, ink.a]));
        // Corner is the border frame.
        assert_eq!(bitmap.pixel(0, 0), Some([126, 126, 190, 255]));
    }

    #[test]
    fn test_blockout_rejects_bad_scale() {
        let editor = Editor::default();
        let options = ExportOptions {
            scale: 0.0,
            ..ExportOptions::default()
        };
        assert!(BlockoutRasterizer.draw(&scene(&editor), &options).is_err());
    }

    #[test]
    fn test_blockout_rejects_huge_scale() {
        let mut editor = Editor::default();
        editor.set_canvas_bounds(Some(Rect::new(0.0, 0.0, 400.0, 300.0)));
        for scale in [1e7, 1e12] {
            let options = ExportOptions {
                scale,
                ..ExportOptions::default()
            };
            assert!(matches!(
                BlockoutRasterizer.draw(&scene(&editor), &options),
                Err(RendererError::RenderFailed(_))
            ));
        }
    }
}
