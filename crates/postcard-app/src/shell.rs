//! Platform-independent application shell.

use postcard_core::{
    CanvasEvent, ConfigError, Editor, EditorConfig, EditorError, EventResponse, Instant, PaletteKind, WidgetId,
};
use postcard_render::{DownloadSink, ExportOptions, ExportedImage, Exporter, Rasterizer, RenderContext, SurfaceScene};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shell errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid event: {0}")]
    Event(serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Postcard Editor".to_string(),
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Config(ConfigError::Parse(e)))
    }
}

/// A snapshot ready to be exported. Owns everything it needs, so the editor
/// stays usable while the export runs.
#[derive(Debug, Clone)]
pub struct ExportJob {
    scene: SurfaceScene,
    exporter: Exporter,
}

impl ExportJob {
    pub fn scene(&self) -> &SurfaceScene {
        &self.scene
    }

    /// Run the export. Failures are logged, never raised.
    pub async fn run(self, rasterizer: &dyn Rasterizer, sink: &dyn DownloadSink) -> Option<ExportedImage> {
        self.exporter.export_or_log(&self.scene, rasterizer, sink).await
    }
}

/// The editor plus everything needed to draw and export it.
pub struct EditorShell {
    config: AppConfig,
    editor: Editor,
    exporter: Exporter,
}

impl EditorShell {
    pub fn new(config: AppConfig) -> Self {
        log::info!("Starting {}", config.title);
        let exporter = Exporter::new(ExportOptions::from_config(&config.editor));
        Self {
            editor: Editor::new(config.editor.clone()),
            exporter,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// Route a surface event to the editor.
    pub fn handle_event(&mut self, event: CanvasEvent) -> EventResponse {
        self.editor.handle_event(event)
    }

    /// Route a surface event given as JSON.
    pub fn dispatch_json(&mut self, json: &str) -> Result<EventResponse, AppError> {
        let event: CanvasEvent = serde_json::from_str(json).map_err(AppError::Event)?;
        Ok(self.handle_event(event))
    }

    /// Palette entry clicked. Returns the created widget, if the entry
    /// creates one.
    pub fn choose(&mut self, kind: PaletteKind, id: &str, now: Instant) -> Result<Option<WidgetId>, AppError> {
        let created = match kind {
            PaletteKind::Font => Some(self.editor.choose_font(id)?),
            PaletteKind::Sticker => Some(self.editor.choose_sticker(id)?),
            PaletteKind::Stamp => {
                self.editor.choose_stamp(id, now)?;
                None
            }
        };
        Ok(created)
    }

    /// Build the display list for the next frame. Consumes the pending focus
    /// request.
    pub fn frame(&mut self, now: Instant) -> SurfaceScene {
        let focus = self.editor.take_focus_request().map(|f| f.id);
        SurfaceScene::build(&RenderContext::new(&self.editor, now).with_focus(focus))
    }

    /// Snapshot the canvas for export.
    pub fn prepare_export(&self, now: Instant) -> ExportJob {
        ExportJob {
            scene: SurfaceScene::build(&RenderContext::new(&self.editor, now)),
            exporter: self.exporter.clone(),
        }
    }
}

impl Default for EditorShell {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
