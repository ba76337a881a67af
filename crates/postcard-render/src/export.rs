//! PNG export of the postcard surface.

use crate::renderer::{Bitmap, Rasterizer, RendererError};
use crate::surface::SurfaceScene;
use postcard_core::EditorConfig;
use thiserror::Error;

/// MIME type of exported images.
pub const MIME_PNG: &str = "image/png";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rasterization failed: {0}")]
    Render(#[from] RendererError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Nothing to export: image is {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    #[error("Download failed: {0}")]
    Download(String),
}

/// Export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Upscale factor over CSS pixels.
    pub scale: f64,
    /// Name of the downloaded file.
    pub filename: String,
    /// Leave the page background out of the snapshot.
    pub transparent_background: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            filename: "postcard.png".to_string(),
            transparent_background: true,
        }
    }
}

impl ExportOptions {
    /// Options from the editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            scale: config.export_scale,
            filename: config.export_filename.clone(),
            ..Self::default()
        }
    }
}

/// Encode an RGBA8 bitmap as PNG.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, ExportError> {
    if bitmap.is_empty() {
        return Err(ExportError::EmptyImage {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, bitmap.width, bitmap.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&bitmap.rgba_data)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Where exported files go. The browser implementation clicks a temporary
/// download link.
pub trait DownloadSink {
    fn download(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), ExportError>;
}

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// Encoded size.
    pub byte_len: usize,
}

/// Rasterizes a scene, encodes it and hands it to a download sink.
///
/// Holds no state between exports, so two exports started back to back run
/// independently.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export `scene` and trigger the download.
    pub async fn export(
        &self,
        scene: &SurfaceScene,
        rasterizer: &dyn Rasterizer,
        sink: &dyn DownloadSink,
    ) -> Result<ExportedImage, ExportError> {
        log::info!("Starting PNG export at {}x", self.options.scale);
        let bitmap = rasterizer.rasterize(scene, &self.options).await?;
        let png_data = encode_png(&bitmap)?;
        sink.download(&self.options.filename, &png_data, MIME_PNG)?;

        log::info!(
            "Exported {} ({}x{}, {} bytes)",
            self.options.filename,
            bitmap.width,
            bitmap.height,
            png_data.len()
        );
        Ok(ExportedImage {
            filename: self.options.filename.clone(),
            width: bitmap.width,
            height: bitmap.height,
            byte_len: png_data.len(),
        })
    }

    /// Export, logging failure instead of returning it.
    pub async fn export_or_log(
        &self,
        scene: &SurfaceScene,
        rasterizer: &dyn Rasterizer,
        sink: &dyn DownloadSink,
    ) -> Option<ExportedImage> {
        match self.export(scene, rasterizer, sink).await {
            Ok(image) => Some(image),
            Err(e) => {
                log::error!("Failed to export postcard: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{BlockoutRasterizer, BoxFuture, RenderContext};
    use kurbo::Rect;
    use postcard_core::{Editor, Instant};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        files: RefCell<Vec<(String, Vec<u8>, String)>>,
    }

    impl DownloadSink for RecordingSink {
        fn download(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), ExportError> {
            self.files
                .borrow_mut()
                .push((filename.to_string(), bytes.to_vec(), mime.to_string()));
            Ok(())
        }
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize<'a>(
            &'a self,
            _scene: &'a SurfaceScene,
            _options: &'a ExportOptions,
        ) -> BoxFuture<'a, Result<Bitmap, RendererError>> {
            Box::pin(async { Err(RendererError::RenderFailed("tainted canvas".to_string())) })
        }
    }

    fn scene() -> SurfaceScene {
        let mut editor = Editor::default();
        editor.set_canvas_bounds(Some(Rect::new(10.0, 10.0, 210.0, 110.0)));
        editor.add_default_text().unwrap();
        SurfaceScene::build(&RenderContext::new(&editor, Instant::now()))
    }

    #[test]
    fn test_encode_png_header() {
        let bitmap = Bitmap::blank(3, 2).unwrap();
        let png_data = encode_png(&bitmap).unwrap();

        let decoder = png::Decoder::new(png_data.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (3, 2));
        assert_eq!(reader.info().color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_encode_empty_image() {
        assert!(matches!(
            encode_png(&Bitmap::blank(0, 5).unwrap()),
            Err(ExportError::EmptyImage { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_export_downloads_png() {
        let sink = RecordingSink::default();
        let exporter = Exporter::default();

        let image = pollster::block_on(exporter.export(&scene(), &BlockoutRasterizer, &sink)).unwrap();
        assert_eq!(image.filename, "postcard.png");
        assert_eq!((image.width, image.height), (400, 200));

        let files = sink.files.borrow();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "postcard.png");
        assert_eq!(files[0].2, "image/png");
        assert_eq!(&files[0].1[1..4], b"PNG");
        assert_eq!(files[0].1.len(), image.byte_len);
    }

    #[test]
    fn test_failed_export_is_logged() {
        let sink = RecordingSink::default();
        let exporter = Exporter::default();

        let result = pollster::block_on(exporter.export_or_log(&scene(), &FailingRasterizer, &sink));
        assert!(result.is_none());
        assert!(sink.files.borrow().is_empty());
    }

    #[test]
    fn test_huge_scale_export_is_logged() {
        let config = EditorConfig::from_json(r#"{"export_scale": 1e7}"#).unwrap();
        let exporter = Exporter::new(ExportOptions::from_config(&config));
        let sink = RecordingSink::default();

        let mut editor = Editor::default();
        editor.set_canvas_bounds(Some(Rect::new(0.0, 0.0, 400.0, 300.0)));
        let scene = SurfaceScene::build(&RenderContext::new(&editor, Instant::now()));

        let result = pollster::block_on(exporter.export_or_log(&scene, &BlockoutRasterizer, &sink));
        assert!(result.is_none());
        assert!(sink.files.borrow().is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = EditorConfig::from_json(r#"{"export_scale": 3.0, "export_filename": "hello.png"}"#).unwrap();
        let options = ExportOptions::from_config(&config);

        assert_eq!(options.filename, "hello.png");
        assert!((options.scale - 3.0).abs() < f64::EPSILON);
        assert!(options.transparent_background);
    }
}
