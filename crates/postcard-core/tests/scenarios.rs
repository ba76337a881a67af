//! End-to-end editor scenarios driven through canvas events.

use kurbo::{Point, Rect};
use postcard_core::{CanvasEvent, DragData, Editor, EditorConfig, MarkKind, PaletteKind, WidgetId, WidgetTrait};

/// Editor with a 400x300 canvas placed at client (40, 60).
fn editor() -> Editor {
    let mut editor = Editor::new(EditorConfig::default());
    editor.set_canvas_bounds(Some(Rect::new(40.0, 60.0, 440.0, 360.0)));
    editor
}

fn client(local: Point) -> Point {
    local + kurbo::Vec2::new(40.0, 60.0)
}

fn select(editor: &mut Editor, id: WidgetId) {
    let at = editor.widget(id).unwrap().position();
    editor.handle_event(CanvasEvent::WidgetPointerDown { id, position: client(at) });
    editor.handle_event(CanvasEvent::PointerUp);
}

#[test]
fn test_add_text_then_drag() {
    let mut editor = editor();
    let id = editor.add_default_text().unwrap();

    let text = editor.store().text(id).unwrap();
    assert_eq!(text.position, Point::new(200.0, 150.0));
    assert_eq!(text.text, "Double click to edit");
    assert_eq!(text.font_family, "Unbounded");

    editor.handle_event(CanvasEvent::WidgetPointerDown {
        id,
        position: client(Point::new(210.0, 155.0)),
    });
    for step in 1..=7 {
        let t = f64::from(step) / 7.0;
        editor.handle_event(CanvasEvent::PointerMove {
            position: client(Point::new(210.0 + 30.0 * t, 155.0 - 10.0 * t)),
        });
    }
    editor.handle_event(CanvasEvent::PointerUp);

    let position = editor.store().text(id).unwrap().position;
    assert!((position.x - 230.0).abs() < 1e-9);
    assert!((position.y - 140.0).abs() < 1e-9);
}

#[test]
fn test_drop_font_payload() {
    let mut editor = editor();
    let data = DragData::new(
        Some(r#"{"family":"Great Vibes","text":"Sending love"}"#.to_string()),
        Some("Sending love".to_string()),
    );

    let response = editor.handle_event(CanvasEvent::Drop {
        data,
        position: client(Point::new(50.0, 80.0)),
    });
    assert!(response.changed);

    let text = editor.store().texts().next().unwrap();
    assert_eq!(text.position, Point::new(50.0, 80.0));
    assert_eq!(text.font_family, "Great Vibes");
    assert_eq!(text.text, "Sending love");
    assert!(!text.is_editing);
    assert!(editor.selected().is_none());
}

#[test]
fn test_background_click_then_delete() {
    let mut editor = editor();
    let a = editor.add_default_text().unwrap();
    let b = editor.add_mark(Some(MarkKind::Sticker), None, Some(Point::new(20.0, 20.0))).unwrap();

    select(&mut editor, a);
    assert_eq!(editor.selected().map(|r| r.id), Some(a));

    editor.handle_event(CanvasEvent::BackgroundClick);
    assert!(editor.selected().is_none());

    editor.handle_event(CanvasEvent::KeyDown { key: "Delete".to_string() });
    assert!(editor.store().contains(a));
    assert!(editor.store().contains(b));
}

#[test]
fn test_only_one_dropdown_open() {
    let mut editor = editor();
    assert!(editor.toggle_palette(PaletteKind::Font));
    assert!(editor.toggle_palette(PaletteKind::Sticker));

    assert!(!editor.toolbar().is_open(PaletteKind::Font));
    assert_eq!(editor.toolbar().open_menu(), Some(PaletteKind::Sticker));
}

#[test]
fn test_single_editing_widget() {
    let mut editor = editor();
    let a = editor.add_default_text().unwrap();
    let b = editor.add_text("Great Vibes", "Hi", Some(Point::new(50.0, 50.0))).unwrap();

    editor.handle_event(CanvasEvent::WidgetDoubleClick { id: a });
    editor.handle_event(CanvasEvent::WidgetDoubleClick { id: b });

    assert!(!editor.store().text(a).unwrap().is_editing);
    assert!(editor.store().text(b).unwrap().is_editing);
    assert_eq!(editor.store().editing_text(), Some(b));
}

#[test]
fn test_delete_selected_then_reselect() {
    let mut editor = editor();
    let a = editor.add_default_text().unwrap();
    let b = editor.add_mark(None, None, None).unwrap();

    select(&mut editor, b);
    let removed = editor.delete_selected().unwrap();
    assert_eq!(removed.id(), b);
    assert!(editor.selected().is_none());

    select(&mut editor, a);
    let c = editor.add_mark(None, None, None).unwrap();
    assert!(editor.store().contains(c));
    assert_eq!(editor.selected().map(|r| r.id), Some(a));
}

#[test]
fn test_delete_without_selection() {
    let mut editor = editor();
    editor.add_default_text().unwrap();

    let response = editor.handle_event(CanvasEvent::KeyDown {
        key: "Backspace".to_string(),
    });
    assert!(!response.changed);
    assert_eq!(editor.store().len(), 1);
}

#[test]
fn test_sticker_palette_drag_into_canvas() {
    let mut editor = editor();
    editor.toggle_palette(PaletteKind::Sticker);

    let data = editor.start_palette_drag(PaletteKind::Sticker, "sun").unwrap();
    let over = editor.handle_event(CanvasEvent::DragOver);
    assert!(over.prevent_default);

    editor.handle_event(CanvasEvent::Drop {
        data,
        position: client(Point::new(120.0, 30.0)),
    });

    let mark = editor.store().marks().next().unwrap();
    assert_eq!(mark.position, Point::new(120.0, 30.0));
    assert_eq!(mark.image_ref.as_deref(), Some("assets/stickers/sun.svg"));
}

#[test]
fn test_unmounted_canvas_ignores_drop() {
    let mut editor = editor();
    editor.set_canvas_bounds(None);

    let response = editor.handle_event(CanvasEvent::Drop {
        data: DragData::new(Some(r#"{"type":"sticker","src":"a.svg"}"#.to_string()), None),
        position: Point::new(10.0, 10.0),
    });
    assert!(!response.changed);
    assert!(editor.store().is_empty());
}

#[test]
fn test_drop_payload_with_extra_fields() {
    let mut editor = editor();
    let data = DragData::new(
        Some(r#"{"family":"Great Vibes","text":"Sending love","type":1}"#.to_string()),
        None,
    );

    let response = editor.handle_event(CanvasEvent::Drop {
        data,
        position: client(Point::new(120.0, 40.0)),
    });
    assert!(response.changed);
    assert_eq!(editor.store().len(), 1);
    assert_eq!(editor.store().texts().next().unwrap().font_family, "Great Vibes");
}
