//! Canvas surface display list.
//!
//! The surface is a fixed postcard backdrop with the widget layer on top. The
//! host draws it however it likes (DOM in the browser, `BlockoutRasterizer`
//! for previews); this module only decides what goes where.

use crate::renderer::RenderContext;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use postcard_core::{MarkKind, Widget, WidgetId, WidgetTrait};
use serde::{Serialize, Serializer};

/// How an item's position relates to its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Position is the center of the box.
    #[default]
    Center,
}

impl Anchor {
    /// Box of `size` anchored at `position`.
    pub fn rect(self, position: Point, size: Size) -> Rect {
        match self {
            Anchor::Center => Rect::from_center_size(position, size),
        }
    }
}

fn css_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    let c = color.to_rgba8();
    serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a))
}

/// Colors of the postcard backdrop.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BackdropStyle {
    #[serde(serialize_with = "css_color")]
    pub paper: Color,
    #[serde(serialize_with = "css_color")]
    pub border: Color,
    #[serde(serialize_with = "css_color")]
    pub divider: Color,
    #[serde(serialize_with = "css_color")]
    pub address_line: Color,
    /// Drop shadow forced onto the border when exporting.
    #[serde(serialize_with = "css_color")]
    pub shadow: Color,
    /// Outline of the selected widget.
    #[serde(serialize_with = "css_color")]
    pub selection: Color,
    /// Flat fill for widgets in blockout renders.
    #[serde(serialize_with = "css_color")]
    pub ink: Color,
}

impl Default for BackdropStyle {
    fn default() -> Self {
        Self {
            paper: Color::from_rgba8(255, 255, 255, 255),
            border: Color::from_rgba8(126, 126, 190, 255),
            divider: Color::from_rgba8(210, 210, 232, 255),
            address_line: Color::from_rgba8(190, 190, 216, 255),
            shadow: Color::from_rgba8(126, 126, 190, 38),
            selection: Color::from_rgba8(59, 130, 246, 255), // Blue
            ink: Color::from_rgba8(60, 60, 90, 255),
        }
    }
}

/// The stamp slot in the right panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StampPlaceholder {
    pub src: String,
    pub alt: &'static str,
    /// Swap transition running.
    pub animating: bool,
    pub bounds: Rect,
}

/// Fixed decorative postcard background.
#[derive(Debug, Clone, Serialize)]
pub struct Backdrop {
    pub border: Rect,
    pub left_panel: Rect,
    pub divider: Rect,
    pub right_panel: Rect,
    pub stamp: StampPlaceholder,
    pub address_lines: Vec<Rect>,
    pub style: BackdropStyle,
}

impl Backdrop {
    /// Inner padding between the border and the panels.
    pub const PADDING: f64 = 16.0;
    pub const DIVIDER_WIDTH: f64 = 1.0;
    pub const STAMP_SIZE: Size = Size::new(72.0, 88.0);
    pub const ADDRESS_LINES: usize = 4;

    /// Lay the backdrop out on a canvas of `size`.
    pub fn layout(size: Size, stamp_src: &str, stamp_animating: bool, style: BackdropStyle) -> Self {
        let border = Rect::from_origin_size(Point::ZERO, size);
        let mut content = border.inset(-Self::PADDING);
        if content.width() <= 0.0 || content.height() <= 0.0 {
            content = border;
        }

        let mid = content.center().x;
        let half = Self::DIVIDER_WIDTH / 2.0;
        let left_panel = Rect::new(content.x0, content.y0, mid - half, content.y1);
        let divider = Rect::new(mid - half, content.y0, mid + half, content.y1);
        let right_panel = Rect::new(mid + half, content.y0, content.x1, content.y1);

        let stamp = StampPlaceholder {
            src: stamp_src.to_string(),
            alt: "Stamp placeholder",
            animating: stamp_animating,
            bounds: Rect::from_origin_size(
                Point::new(right_panel.x1 - Self::STAMP_SIZE.width, right_panel.y0),
                Self::STAMP_SIZE,
            ),
        };

        // Lines fill the lower half of the right panel.
        let spacing = right_panel.height() / 2.0 / Self::ADDRESS_LINES as f64;
        let address_lines = (0..Self::ADDRESS_LINES)
            .map(|i| {
                let y = right_panel.y0 + right_panel.height() / 2.0 + spacing * (i as f64 + 0.5);
                Rect::new(right_panel.x0 + Self::PADDING, y, right_panel.x1, y + 1.0)
            })
            .collect();

        Self {
            border,
            left_panel,
            divider,
            right_panel,
            stamp,
            address_lines,
            style,
        }
    }
}

/// One widget in the display list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneItem {
    Text {
        id: WidgetId,
        position: Point,
        anchor: Anchor,
        selected: bool,
        text: String,
        font_family: String,
        editing: bool,
        /// The inline input should take focus on this pass.
        needs_focus: bool,
        /// Input width in characters.
        input_size: usize,
    },
    Mark {
        id: WidgetId,
        position: Point,
        anchor: Anchor,
        selected: bool,
        mark_kind: MarkKind,
        src: String,
        alt: String,
        size: f64,
        bounds: Rect,
    },
}

impl SceneItem {
    pub fn id(&self) -> WidgetId {
        match self {
            SceneItem::Text { id, .. } | SceneItem::Mark { id, .. } => *id,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            SceneItem::Text { position, .. } | SceneItem::Mark { position, .. } => *position,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            SceneItem::Text { selected, .. } | SceneItem::Mark { selected, .. } => *selected,
        }
    }
}

/// Everything drawn on the canvas, in paint order.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceScene {
    pub size: Size,
    pub backdrop: Backdrop,
    pub items: Vec<SceneItem>,
}

impl SurfaceScene {
    /// Build the display list for the current editor state.
    pub fn build(ctx: &RenderContext) -> Self {
        let editor = ctx.editor;
        let selected = editor.selected().map(|r| r.id);
        let mark_size = editor.config().mark_size;

        let items = editor
            .store()
            .widgets_ordered()
            .map(|widget| match widget {
                Widget::Text(text) => {
                    let id = text.id();
                    SceneItem::Text {
                        id,
                        position: text.position,
                        anchor: Anchor::Center,
                        selected: selected == Some(id),
                        text: text.text.clone(),
                        font_family: text.font_family.clone(),
                        editing: text.is_editing,
                        needs_focus: text.is_editing && ctx.focus == Some(id),
                        input_size: text.input_size(),
                    }
                }
                Widget::Mark(mark) => {
                    let id = mark.id();
                    let (src, alt) = mark.image();
                    SceneItem::Mark {
                        id,
                        position: mark.position,
                        anchor: Anchor::Center,
                        selected: selected == Some(id),
                        mark_kind: mark.kind,
                        src: src.to_string(),
                        alt: alt.to_string(),
                        size: mark_size,
                        bounds: mark.bounds(mark_size),
                    }
                }
            })
            .collect();

        let stamp = editor.stamp();
        Self {
            size: ctx.canvas_size,
            backdrop: Backdrop::layout(ctx.canvas_size, stamp.src(), stamp.is_animating(ctx.now), ctx.style),
            items,
        }
    }

    /// Find the item for a widget.
    pub fn item(&self, id: WidgetId) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The item drawn with the selected treatment, if any.
    pub fn selected_item(&self) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.is_selected())
    }

    /// Serialize for the DOM layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcard_core::{CanvasEvent, Editor, Instant, PaletteKind};

    fn editor() -> Editor {
        let mut editor = Editor::default();
        editor.set_canvas_bounds(Some(Rect::new(0.0, 0.0, 600.0, 400.0)));
        editor
    }

    #[test]
    fn test_backdrop_layout() {
        let backdrop = Backdrop::layout(Size::new(600.0, 400.0), "assets/stamp-empty.svg", false, BackdropStyle::default());

        assert_eq!(backdrop.border, Rect::new(0.0, 0.0, 600.0, 400.0));
        assert_eq!(backdrop.divider.center().x, 300.0);
        assert!(backdrop.left_panel.x1 <= backdrop.divider.x0);
        assert!(backdrop.right_panel.contains(backdrop.stamp.bounds.origin()));
        assert_eq!(backdrop.address_lines.len(), 4);
        for line in &backdrop.address_lines {
            assert!(line.y0 > backdrop.stamp.bounds.y1);
            assert!(line.y1 <= backdrop.right_panel.y1);
        }
    }

    #[test]
    fn test_paint_order_and_selection() {
        let mut editor = editor();
        let mark = editor.add_mark(None, None, Some(Point::new(40.0, 40.0))).unwrap();
        let text = editor.add_default_text().unwrap();
        editor.handle_event(CanvasEvent::WidgetPointerDown {
            id: mark,
            position: Point::new(40.0, 40.0),
        });

        let now = Instant::now();
        let scene = SurfaceScene::build(&RenderContext::new(&editor, now));

        let ids: Vec<_> = scene.items.iter().map(SceneItem::id).collect();
        assert_eq!(ids, vec![text, mark]);
        assert_eq!(scene.selected_item().map(SceneItem::id), Some(mark));
        assert!(!scene.item(text).unwrap().is_selected());
    }

    #[test]
    fn test_mark_item_bounds() {
        let mut editor = editor();
        editor.toggle_palette(PaletteKind::Stamp);
        let id = editor.add_mark(None, None, Some(Point::new(100.0, 100.0))).unwrap();

        let scene = SurfaceScene::build(&RenderContext::new(&editor, Instant::now()));
        match scene.item(id).unwrap() {
            SceneItem::Mark { bounds, src, alt, anchor, .. } => {
                assert_eq!(*bounds, Rect::new(74.0, 74.0, 126.0, 126.0));
                assert_eq!(src, "assets/icon-toolbar-stamp.svg");
                assert_eq!(alt, "Stamp mark");
                assert_eq!(*anchor, Anchor::Center);
            }
            other => panic!("expected a mark, got {:?}", other),
        }
    }

    #[test]
    fn test_focus_only_for_editing_text() {
        let mut editor = editor();
        let id = editor.add_text("Great Vibes", "", None).unwrap();
        editor.handle_event(CanvasEvent::WidgetDoubleClick { id });
        let focus = editor.take_focus_request().map(|f| f.id);

        let scene = SurfaceScene::build(&RenderContext::new(&editor, Instant::now()).with_focus(focus));
        match scene.item(id).unwrap() {
            SceneItem::Text {
                editing,
                needs_focus,
                input_size,
                ..
            } => {
                assert!(*editing);
                assert!(*needs_focus);
                assert_eq!(*input_size, 1);
            }
            other => panic!("expected a text, got {:?}", other),
        }
    }

    #[test]
    fn test_stamp_animation_flag() {
        let mut editor = editor();
        let now = Instant::now();
        editor.choose_stamp("cloud", now).unwrap();

        let scene = SurfaceScene::build(&RenderContext::new(&editor, now));
        assert_eq!(scene.backdrop.stamp.src, "assets/stamps/stamp-cloud.svg");
        assert!(scene.backdrop.stamp.animating);

        let later = now + std::time::Duration::from_secs(1);
        let scene = SurfaceScene::build(&RenderContext::new(&editor, later));
        assert!(!scene.backdrop.stamp.animating);
    }

    #[test]
    fn test_scene_json() {
        let mut editor = editor();
        editor.add_default_text().unwrap();

        let scene = SurfaceScene::build(&RenderContext::new(&editor, Instant::now()));
        let value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();

        assert_eq!(value["items"][0]["kind"], "text");
        assert_eq!(value["items"][0]["anchor"], "center");
        assert_eq!(value["backdrop"]["style"]["selection"], "#3b82f6ff");
        assert_eq!(value["backdrop"]["address_lines"].as_array().map(Vec::len), Some(4));
    }
}
