//! WebAssembly entry point and browser bindings.

use crate::shell::{AppConfig, EditorShell};
use kurbo::{Point, Rect};
use postcard_core::payload::DROP_EFFECT;
use postcard_core::{CanvasEvent, DragData, EventResponse, Instant, PaletteKind};
use postcard_render::{Bitmap, BoxFuture, DownloadSink, ExportError, ExportOptions, Rasterizer, RendererError, SurfaceScene};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Initialize logging and the panic hook.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // A second module instance finds the logger already set.
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }

    log::info!("Starting postcard editor (WASM)");
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn parse_palette(kind: &str) -> Result<PaletteKind, JsValue> {
    serde_json::from_value(serde_json::Value::from(kind)).map_err(js_error)
}

/// Triggers a download by clicking a temporary link.
pub struct BrowserDownload;

impl DownloadSink for BrowserDownload {
    fn download(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), ExportError> {
        download_binary_file(filename, bytes, mime).map_err(|e| ExportError::Download(format!("{:?}", e)))
    }
}

fn download_binary_file(filename: &str, data: &[u8], mime_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("No window"))?;
    let document = window.document().ok_or_else(|| js_error("No document"))?;

    // Create Uint8Array from data
    let uint8_array = js_sys::Uint8Array::from(data);
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&uint8_array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)?;

    // Create download URL
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    // Create and click download link
    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(filename);
    a.click();

    // Clean up
    web_sys::Url::revoke_object_url(&url)
}

/// Rasterizer backed by a page function
/// `(sceneJson, scale, transparentBackground) => Promise<{width, height, data}>`,
/// where `data` holds RGBA8 pixels (an `ImageData.data` array works).
pub struct JsRasterizer {
    render: js_sys::Function,
}

fn render_error(value: JsValue) -> RendererError {
    RendererError::RenderFailed(format!("{:?}", value))
}

fn dimension(value: &JsValue, key: &str) -> Result<u32, RendererError> {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .map_err(render_error)?
        .as_f64()
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
        .ok_or_else(|| RendererError::RenderFailed(format!("missing {}", key)))
}

impl Rasterizer for JsRasterizer {
    fn rasterize<'a>(&'a self, scene: &'a SurfaceScene, options: &'a ExportOptions) -> BoxFuture<'a, Result<Bitmap, RendererError>> {
        Box::pin(async move {
            let json = scene
                .to_json()
                .map_err(|e| RendererError::RenderFailed(e.to_string()))?;
            let result = self
                .render
                .call3(
                    &JsValue::NULL,
                    &JsValue::from_str(&json),
                    &JsValue::from_f64(options.scale),
                    &JsValue::from_bool(options.transparent_background),
                )
                .map_err(render_error)?;
            let promise = result.dyn_into::<js_sys::Promise>().map_err(render_error)?;
            let value = JsFuture::from(promise).await.map_err(render_error)?;

            let width = dimension(&value, "width")?;
            let height = dimension(&value, "height")?;
            let data = js_sys::Reflect::get(&value, &JsValue::from_str("data")).map_err(render_error)?;
            Bitmap::new(width, height, js_sys::Uint8Array::new(&data).to_vec())
        })
    }
}

/// A window listener that is removed when dropped.
struct ListenerGuard {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ListenerGuard {
    fn new(target: web_sys::EventTarget, event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self { target, event, closure })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to remove {} listener", self.event);
        }
    }
}

/// Regions of a mounted dropdown, in client coordinates.
#[derive(Deserialize)]
struct PaletteRegions {
    boundary: Rect,
    #[serde(default)]
    trigger: Option<Rect>,
}

/// Change notification to the page.
type ChangeCallback = Rc<RefCell<Option<js_sys::Function>>>;

fn notify(callback: &ChangeCallback, response: EventResponse) {
    if !response.changed {
        return;
    }
    // Cloned so the callback may replace itself.
    let callback = callback.borrow().clone();
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("Change callback failed: {:?}", e);
        }
    }
}

/// The editor as seen from JavaScript.
#[wasm_bindgen]
pub struct PostcardEditor {
    shell: Rc<RefCell<EditorShell>>,
    rasterizer: Option<Rc<JsRasterizer>>,
    on_change: ChangeCallback,
    listeners: Vec<ListenerGuard>,
}

#[wasm_bindgen]
impl PostcardEditor {
    /// Create an editor. `config_json` may be partial or absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PostcardEditor, JsValue> {
        let config = match config_json {
            Some(json) => AppConfig::from_json(&json).map_err(js_error)?,
            None => AppConfig::default(),
        };
        Ok(Self {
            shell: Rc::new(RefCell::new(EditorShell::new(config))),
            rasterizer: None,
            on_change: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    /// Page title from the configuration.
    pub fn title(&self) -> String {
        self.shell.borrow().config().title.clone()
    }

    /// Canvas bounding box in client coordinates. Call on mount, resize and
    /// scroll.
    pub fn set_canvas_bounds(&self, x: f64, y: f64, width: f64, height: f64) {
        let bounds = Rect::from_origin_size(Point::new(x, y), (width, height));
        self.shell.borrow_mut().editor_mut().set_canvas_bounds(Some(bounds));
    }

    /// The canvas element is gone.
    pub fn clear_canvas_bounds(&self) {
        self.shell.borrow_mut().editor_mut().set_canvas_bounds(None);
    }

    /// Function called after every state change.
    pub fn on_change(&self, callback: Option<js_sys::Function>) {
        *self.on_change.borrow_mut() = callback;
    }

    /// Rasterizer used by `export`.
    pub fn set_rasterizer(&mut self, render: js_sys::Function) {
        self.rasterizer = Some(Rc::new(JsRasterizer { render }));
    }

    /// Route a canvas event (JSON) and return the response (JSON).
    pub fn dispatch(&self, event_json: &str) -> Result<String, JsValue> {
        let response = self.shell.borrow_mut().dispatch_json(event_json).map_err(js_error)?;
        notify(&self.on_change, response);
        serde_json::to_string(&response).map_err(js_error)
    }

    /// Display list for the next frame (JSON).
    pub fn frame(&self) -> Result<String, JsValue> {
        self.shell.borrow_mut().frame(Instant::now()).to_json().map_err(js_error)
    }

    /// Toolbar "add text".
    pub fn add_text(&self) -> Result<String, JsValue> {
        let id = self.shell.borrow_mut().editor_mut().add_default_text().map_err(js_error)?;
        notify(&self.on_change, EventResponse::changed());
        Ok(id.to_string())
    }

    /// Toolbar "add mark", using the armed mark kind.
    pub fn add_mark(&self) -> Result<String, JsValue> {
        let id = self
            .shell
            .borrow_mut()
            .editor_mut()
            .add_mark(None, None, None)
            .map_err(js_error)?;
        notify(&self.on_change, EventResponse::changed());
        Ok(id.to_string())
    }

    /// Toolbar delete button.
    pub fn delete_selected(&self) -> bool {
        let deleted = self.shell.borrow_mut().editor_mut().delete_selected().is_some();
        notify(&self.on_change, EventResponse::ignored().with_changed(deleted));
        deleted
    }

    /// Toggle a palette dropdown (`"font"`, `"stamp"` or `"sticker"`).
    pub fn toggle_palette(&self, kind: &str) -> Result<bool, JsValue> {
        let kind = parse_palette(kind)?;
        let open = self.shell.borrow_mut().editor_mut().toggle_palette(kind);
        notify(&self.on_change, EventResponse::changed());
        Ok(open)
    }

    /// Register a mounted dropdown's regions: `{"boundary": rect, "trigger": rect}`
    /// with rects as `{"x0", "y0", "x1", "y1"}`.
    pub fn mount_palette(&self, kind: &str, regions_json: &str) -> Result<(), JsValue> {
        let kind = parse_palette(kind)?;
        let regions: PaletteRegions = serde_json::from_str(regions_json).map_err(js_error)?;
        self.shell
            .borrow_mut()
            .editor_mut()
            .mount_palette(kind, regions.boundary, regions.trigger);
        Ok(())
    }

    /// Palette entry clicked.
    pub fn choose(&self, kind: &str, id: &str) -> Result<Option<String>, JsValue> {
        let kind = parse_palette(kind)?;
        let created = self
            .shell
            .borrow_mut()
            .choose(kind, id, Instant::now())
            .map_err(js_error)?;
        notify(&self.on_change, EventResponse::changed());
        Ok(created.map(|id| id.to_string()))
    }

    /// Drag started on a palette entry. Returns
    /// `{"effect": "copy", "entries": [[mime, value], ...]}` for the data
    /// transfer.
    pub fn start_palette_drag(&self, kind: &str, id: &str) -> Result<String, JsValue> {
        let kind = parse_palette(kind)?;
        let data = self
            .shell
            .borrow_mut()
            .editor_mut()
            .start_palette_drag(kind, id)
            .map_err(js_error)?;
        notify(&self.on_change, EventResponse::changed());
        let transfer = serde_json::json!({
            "effect": DROP_EFFECT,
            "entries": data.entries(),
        });
        Ok(transfer.to_string())
    }

    /// External drop on the canvas. `entries` maps MIME types to the values
    /// read from the data transfer.
    pub fn drop_at(&self, entries: &js_sys::Object, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let data = DragData::from_channel(|mime| {
            js_sys::Reflect::get(entries, &JsValue::from_str(mime))
                .ok()
                .and_then(|v| v.as_string())
        });
        let event = CanvasEvent::Drop {
            data,
            position: Point::new(client_x, client_y),
        };
        let response = self.shell.borrow_mut().handle_event(event);
        notify(&self.on_change, response);
        serde_json::to_string(&response).map_err(js_error)
    }

    /// Register the global keyboard and outside-click listeners.
    pub fn attach_listeners(&mut self) -> Result<(), JsValue> {
        self.detach_listeners();
        let window: web_sys::EventTarget = web_sys::window().ok_or_else(|| js_error("No window"))?.into();

        let shell = Rc::clone(&self.shell);
        let on_change = Rc::clone(&self.on_change);
        let keydown = ListenerGuard::new(window.clone(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let response = shell.borrow_mut().handle_event(CanvasEvent::KeyDown { key: event.key() });
            if response.prevent_default {
                event.prevent_default();
            }
            notify(&on_change, response);
        })?;

        let shell = Rc::clone(&self.shell);
        let on_change = Rc::clone(&self.on_change);
        let mousedown = ListenerGuard::new(window, "mousedown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            let position = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            let response = shell.borrow_mut().handle_event(CanvasEvent::OutsideClick { position });
            notify(&on_change, response);
        })?;

        self.listeners = vec![keydown, mousedown];
        Ok(())
    }

    /// Remove the global listeners.
    pub fn detach_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Export the postcard as PNG and download it. Resolves to `true` on
    /// success; failures are logged and resolve to `false`.
    pub fn export(&self) -> Result<js_sys::Promise, JsValue> {
        let rasterizer = self
            .rasterizer
            .clone()
            .ok_or_else(|| js_error("No rasterizer set"))?;
        let job = self.shell.borrow().prepare_export(Instant::now());

        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let sink = BrowserDownload;
            let exported = job.run(rasterizer.as_ref(), &sink).await;
            Ok(JsValue::from_bool(exported.is_some()))
        }))
    }
}
