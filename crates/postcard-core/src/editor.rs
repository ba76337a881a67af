//! Editor state and event routing for the postcard canvas.

use crate::catalog;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::input::{CanvasEvent, EventResponse, is_delete_key};
use crate::interaction::{FocusRequest, InteractionController, Propagation};
use crate::palette::{PaletteKind, Toolbar};
use crate::payload::{DragData, DragPayload, PayloadError};
use crate::stamp::{Instant, StampSlot};
use crate::store::WidgetStore;
use crate::widgets::{MarkKind, MarkWidget, TextWidget, Widget, WidgetId, WidgetRef, WidgetTrait};
use kurbo::{Point, Rect};

/// Runtime editor state (not persisted).
///
/// Owns the widget store and the single interaction state. Every method runs
/// to completion on the caller's thread.
#[derive(Debug, Clone)]
pub struct Editor {
    /// All widgets on the postcard.
    store: WidgetStore,
    /// Selection, drag and edit state.
    interaction: InteractionController,
    /// Palette dropdowns.
    toolbar: Toolbar,
    /// Stamp placeholder.
    stamp: StampSlot,
    /// Canvas bounding box in client coordinates. `None` while unmounted.
    canvas_bounds: Option<Rect>,
    /// Input to focus on the next render pass.
    pending_focus: Option<FocusRequest>,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with an empty postcard.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: WidgetStore::new(),
            interaction: InteractionController::new(),
            toolbar: Toolbar::new(),
            stamp: StampSlot::new(config.empty_stamp_src.clone(), config.stamp_animation(), Instant::now()),
            canvas_bounds: None,
            pending_focus: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &WidgetStore {
        &self.store
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn stamp(&self) -> &StampSlot {
        &self.stamp
    }

    /// Look up a widget.
    pub fn widget(&self, id: WidgetId) -> EditorResult<&Widget> {
        self.store.get(id).ok_or(EditorError::UnknownWidget(id))
    }

    /// The live selection.
    pub fn selected(&self) -> Option<WidgetRef> {
        self.interaction.selected(&self.store)
    }

    /// Check if a widget is the selected one.
    pub fn is_selected(&self, id: WidgetId) -> bool {
        self.selected().is_some_and(|r| r.id == id)
    }

    /// Set the canvas bounding box (client coordinates), or `None` when the
    /// canvas is not mounted.
    pub fn set_canvas_bounds(&mut self, bounds: Option<Rect>) {
        self.canvas_bounds = bounds;
    }

    pub fn canvas_bounds(&self) -> Option<Rect> {
        self.canvas_bounds
    }

    /// Convert a client point to canvas-local coordinates using the current
    /// canvas offset.
    pub fn to_canvas_local(&self, client: Point) -> EditorResult<Point> {
        let bounds = self.canvas_bounds.ok_or(EditorError::NoCanvas)?;
        Ok(client - bounds.origin().to_vec2())
    }

    /// Center of the canvas in canvas-local coordinates.
    pub fn canvas_center(&self) -> EditorResult<Point> {
        let bounds = self.canvas_bounds.ok_or(EditorError::NoCanvas)?;
        Ok(Point::new(bounds.width() / 2.0, bounds.height() / 2.0))
    }

    /// Add a text label. Defaults to the canvas center.
    pub fn add_text(&mut self, font_family: &str, text: &str, position: Option<Point>) -> EditorResult<WidgetId> {
        let center = self.canvas_center()?;
        let label = TextWidget::with_font(position.unwrap_or(center), font_family, text);
        let id = self.store.add(label)?;
        log::info!("Added text widget {}", id);
        Ok(id)
    }

    /// The toolbar "add text" action: default font and placeholder text.
    pub fn add_default_text(&mut self) -> EditorResult<WidgetId> {
        let family = self.config.default_font_family.clone();
        let text = self.config.placeholder_text.clone();
        self.add_text(&family, &text, None)
    }

    /// Add a mark. The kind defaults to the one armed on the toolbar.
    pub fn add_mark(
        &mut self,
        kind: Option<MarkKind>,
        image_ref: Option<String>,
        position: Option<Point>,
    ) -> EditorResult<WidgetId> {
        let center = self.canvas_center()?;
        let kind = kind.unwrap_or(self.toolbar.mark_kind());
        let mark = MarkWidget::new(position.unwrap_or(center), kind, image_ref);
        let id = self.store.add(mark)?;
        log::info!("Added {:?} mark {}", kind, id);
        Ok(id)
    }

    /// Toggle a palette dropdown. Returns its new open state.
    pub fn toggle_palette(&mut self, kind: PaletteKind) -> bool {
        self.toolbar.toggle(kind)
    }

    /// Register the regions of an open dropdown for outside-click detection.
    pub fn mount_palette(&mut self, kind: PaletteKind, boundary: Rect, trigger: Option<Rect>) {
        self.toolbar.menu_mut(kind).mount(boundary, trigger);
    }

    /// Font entry chosen: add a label in that font with its sample text.
    pub fn choose_font(&mut self, id: &str) -> EditorResult<WidgetId> {
        let option = catalog::font(id).ok_or_else(|| EditorError::UnknownCatalogEntry(id.to_string()))?;
        self.toolbar.close(PaletteKind::Font);
        self.add_text(option.family, option.sample_text, None)
    }

    /// Sticker entry chosen: add a sticker mark with that image.
    pub fn choose_sticker(&mut self, id: &str) -> EditorResult<WidgetId> {
        let option = catalog::sticker(id).ok_or_else(|| EditorError::UnknownCatalogEntry(id.to_string()))?;
        self.toolbar.close(PaletteKind::Sticker);
        self.add_mark(Some(MarkKind::Sticker), Some(option.src.to_string()), None)
    }

    /// Stamp entry chosen: swap the stamp placeholder. No widget is created.
    pub fn choose_stamp(&mut self, id: &str, now: Instant) -> EditorResult<()> {
        let option = catalog::stamp(id).ok_or_else(|| EditorError::UnknownCatalogEntry(id.to_string()))?;
        self.stamp.select(option.src, now);
        self.toolbar.close(PaletteKind::Stamp);
        log::info!("Stamp set to {}", option.id);
        Ok(())
    }

    /// A drag started from a palette entry. Closes that dropdown and returns
    /// the data to put on the drag channel.
    pub fn start_palette_drag(&mut self, kind: PaletteKind, id: &str) -> EditorResult<DragData> {
        let unknown = || EditorError::UnknownCatalogEntry(id.to_string());
        let data = match kind {
            PaletteKind::Font => DragData::for_font(catalog::font(id).ok_or_else(unknown)?),
            PaletteKind::Sticker => DragData::for_sticker(catalog::sticker(id).ok_or_else(unknown)?),
            PaletteKind::Stamp => return Err(EditorError::NotDraggable(kind)),
        }
        .map_err(PayloadError::from)?;
        self.toolbar.close(kind);
        Ok(data)
    }

    /// External payload dropped at a client point: create the matching
    /// widget there. The selection is left alone.
    pub fn handle_drop(&mut self, data: &DragData, client: Point) -> EditorResult<WidgetId> {
        let payload = data.payload()?;
        let position = self.to_canvas_local(client)?;
        match payload {
            DragPayload::Font { family, text } => self.add_text(&family, &text, Some(position)),
            DragPayload::Sticker { src } => self.add_mark(Some(MarkKind::Sticker), Some(src), Some(position)),
        }
    }

    /// Explicit delete action on the selected widget.
    pub fn delete_selected(&mut self) -> Option<Widget> {
        let removed = self.interaction.delete_selected(&mut self.store)?;
        log::info!("Deleted widget {}", removed.id());
        Some(removed)
    }

    /// Click on the canvas background: close dropdowns, drop the selection.
    pub fn background_click(&mut self) {
        self.toolbar.close_all();
        self.interaction.clear_selection();
    }

    /// Global key press. Returns true if the browser default should be
    /// suppressed.
    pub fn key_down(&mut self, key: &str) -> bool {
        if !is_delete_key(key) || self.store.editing_text().is_some() {
            return false;
        }
        if let Some(removed) = self.interaction.delete_key(&mut self.store) {
            log::info!("Deleted widget {}", removed.id());
        }
        true
    }

    /// Take the pending focus request, if any. Each request is returned once.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.pending_focus.take()
    }

    /// Route a canvas event.
    pub fn handle_event(&mut self, event: CanvasEvent) -> EventResponse {
        match event {
            CanvasEvent::WidgetPointerDown { id, position } => {
                let Ok(local) = self.to_canvas_local(position) else {
                    log::debug!("Pointer down ignored: canvas not mounted");
                    return EventResponse::ignored();
                };
                match self.interaction.pointer_down(&mut self.store, id, local) {
                    Propagation::Stop => EventResponse::changed().with_stop_propagation(),
                    Propagation::Continue => EventResponse::ignored(),
                }
            }
            CanvasEvent::PointerMove { position } => match self.to_canvas_local(position) {
                Ok(local) => EventResponse::ignored().with_changed(self.interaction.pointer_move(&mut self.store, local)),
                Err(_) => EventResponse::ignored(),
            },
            CanvasEvent::PointerUp => {
                let was_dragging = self.interaction.dragging().is_some();
                self.interaction.pointer_up();
                EventResponse::ignored().with_changed(was_dragging)
            }
            CanvasEvent::PointerLeave => {
                let was_dragging = self.interaction.dragging().is_some();
                self.interaction.pointer_leave();
                EventResponse::ignored().with_changed(was_dragging)
            }
            CanvasEvent::WidgetDoubleClick { id } => match self.interaction.double_click(&mut self.store, id) {
                Some(focus) => {
                    self.pending_focus = Some(focus);
                    EventResponse::changed()
                }
                None => EventResponse::ignored(),
            },
            CanvasEvent::TextInput { id, text } => {
                EventResponse::ignored().with_changed(self.interaction.text_input(&mut self.store, id, &text))
            }
            CanvasEvent::TextBlur { id } => {
                self.interaction.blur(&mut self.store, id);
                if self.pending_focus.is_some_and(|f| f.id == id) {
                    self.pending_focus = None;
                }
                EventResponse::changed()
            }
            CanvasEvent::BackgroundClick => {
                self.background_click();
                EventResponse::changed()
            }
            CanvasEvent::KeyDown { key } => {
                let before = self.store.len();
                let prevent = self.key_down(&key);
                let response = EventResponse::ignored().with_changed(self.store.len() != before);
                if prevent { response.with_prevent_default() } else { response }
            }
            CanvasEvent::OutsideClick { position } => {
                EventResponse::ignored().with_changed(self.toolbar.outside_click(position))
            }
            CanvasEvent::DragOver => EventResponse::ignored().with_prevent_default(),
            CanvasEvent::Drop { data, position } => {
                let response = EventResponse::ignored().with_prevent_default();
                match self.handle_drop(&data, position) {
                    Ok(_) => response.with_changed(true),
                    Err(e) => {
                        log::debug!("Drop ignored: {}", e);
                        response
                    }
                }
            }
        }
    }
}
