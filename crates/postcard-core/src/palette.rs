//! Toolbar palettes: font, stamp and sticker disclosure menus.

use crate::widgets::MarkKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The three palettes on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Font,
    Stamp,
    Sticker,
}

impl PaletteKind {
    pub fn all() -> &'static [PaletteKind] {
        &[PaletteKind::Font, PaletteKind::Stamp, PaletteKind::Sticker]
    }
}

/// A trigger button plus its dropdown.
///
/// The menu owns the regions that count as "inside" while it is open. They
/// are registered by the host when the dropdown is mounted and released
/// when it closes.
#[derive(Debug, Clone, PartialEq)]
pub struct DisclosureMenu {
    kind: PaletteKind,
    open: bool,
    /// Dropdown region in client coordinates.
    boundary: Option<Rect>,
    /// Trigger button region in client coordinates.
    trigger: Option<Rect>,
}

impl DisclosureMenu {
    pub fn new(kind: PaletteKind) -> Self {
        Self {
            kind,
            open: false,
            boundary: None,
            trigger: None,
        }
    }

    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Register the regions counted as inside this menu.
    pub fn mount(&mut self, boundary: Rect, trigger: Option<Rect>) {
        self.boundary = Some(boundary);
        self.trigger = trigger;
    }

    /// Whether the dropdown region has been registered.
    pub fn is_mounted(&self) -> bool {
        self.boundary.is_some()
    }

    /// Check if a client point falls inside the dropdown or its trigger.
    pub fn contains(&self, point: Point) -> bool {
        self.boundary.is_some_and(|r| r.contains(point)) || self.trigger.is_some_and(|r| r.contains(point))
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.boundary = None;
            self.trigger = None;
        }
    }
}

/// All palettes on the toolbar. At most one dropdown is open at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolbar {
    font: DisclosureMenu,
    stamp: DisclosureMenu,
    sticker: DisclosureMenu,
    /// Mark kind used by "add mark"; armed to stamp while the stamp menu is open.
    mark_kind: MarkKind,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self {
            font: DisclosureMenu::new(PaletteKind::Font),
            stamp: DisclosureMenu::new(PaletteKind::Stamp),
            sticker: DisclosureMenu::new(PaletteKind::Sticker),
            mark_kind: MarkKind::Sticker,
        }
    }

    /// Get a menu.
    pub fn menu(&self, kind: PaletteKind) -> &DisclosureMenu {
        match kind {
            PaletteKind::Font => &self.font,
            PaletteKind::Stamp => &self.stamp,
            PaletteKind::Sticker => &self.sticker,
        }
    }

    /// Get a menu mutably.
    pub fn menu_mut(&mut self, kind: PaletteKind) -> &mut DisclosureMenu {
        match kind {
            PaletteKind::Font => &mut self.font,
            PaletteKind::Stamp => &mut self.stamp,
            PaletteKind::Sticker => &mut self.sticker,
        }
    }

    /// Check if a dropdown is open.
    pub fn is_open(&self, kind: PaletteKind) -> bool {
        self.menu(kind).is_open()
    }

    /// The open dropdown, if any.
    pub fn open_menu(&self) -> Option<PaletteKind> {
        PaletteKind::all().iter().copied().find(|&k| self.is_open(k))
    }

    /// Mark kind currently armed for "add mark".
    pub fn mark_kind(&self) -> MarkKind {
        self.mark_kind
    }

    /// Toggle a dropdown. Opening one closes the others.
    /// Returns the new open state of `kind`.
    pub fn toggle(&mut self, kind: PaletteKind) -> bool {
        let open = !self.is_open(kind);
        if open {
            self.close_all();
        }
        self.set_open(kind, open);
        open
    }

    /// Close one dropdown.
    pub fn close(&mut self, kind: PaletteKind) {
        self.set_open(kind, false);
    }

    /// Close every dropdown.
    pub fn close_all(&mut self) {
        for &kind in PaletteKind::all() {
            self.close(kind);
        }
    }

    /// A press landed at `point` (client coordinates). Closes every open,
    /// mounted dropdown that does not contain it. A dropdown with no
    /// registered region is left alone.
    /// Returns true if anything closed.
    pub fn outside_click(&mut self, point: Point) -> bool {
        let mut closed = false;
        for &kind in PaletteKind::all() {
            let menu = self.menu(kind);
            if menu.is_open() && menu.is_mounted() && !menu.contains(point) {
                self.close(kind);
                closed = true;
            }
        }
        closed
    }

    fn set_open(&mut self, kind: PaletteKind, open: bool) {
        self.menu_mut(kind).set_open(open);
        if kind == PaletteKind::Stamp {
            self.mark_kind = if open { MarkKind::Stamp } else { MarkKind::Sticker };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut toolbar = Toolbar::new();
        assert!(toolbar.toggle(PaletteKind::Font));
        assert!(toolbar.is_open(PaletteKind::Font));
        assert!(!toolbar.toggle(PaletteKind::Font));
        assert_eq!(toolbar.open_menu(), None);
    }

    #[test]
    fn test_opening_one_closes_others() {
        let mut toolbar = Toolbar::new();
        toolbar.toggle(PaletteKind::Font);
        toolbar.toggle(PaletteKind::Sticker);

        assert!(!toolbar.is_open(PaletteKind::Font));
        assert_eq!(toolbar.open_menu(), Some(PaletteKind::Sticker));
    }

    #[test]
    fn test_stamp_menu_arms_mark_kind() {
        let mut toolbar = Toolbar::new();
        assert_eq!(toolbar.mark_kind(), MarkKind::Sticker);

        toolbar.toggle(PaletteKind::Stamp);
        assert_eq!(toolbar.mark_kind(), MarkKind::Stamp);

        toolbar.toggle(PaletteKind::Font);
        assert_eq!(toolbar.mark_kind(), MarkKind::Sticker);
    }

    #[test]
    fn test_outside_click() {
        let mut toolbar = Toolbar::new();
        toolbar.toggle(PaletteKind::Sticker);
        toolbar
            .menu_mut(PaletteKind::Sticker)
            .mount(Rect::new(0.0, 0.0, 100.0, 100.0), Some(Rect::new(0.0, 110.0, 30.0, 140.0)));

        assert!(!toolbar.outside_click(Point::new(50.0, 50.0)));
        assert!(!toolbar.outside_click(Point::new(10.0, 120.0)));
        assert!(toolbar.is_open(PaletteKind::Sticker));

        assert!(toolbar.outside_click(Point::new(300.0, 300.0)));
        assert!(!toolbar.is_open(PaletteKind::Sticker));
    }

    #[test]
    fn test_press_before_mount_keeps_menu_open() {
        let mut toolbar = Toolbar::new();
        toolbar.toggle(PaletteKind::Sticker);

        assert!(!toolbar.outside_click(Point::new(5.0, 5.0)));
        assert!(toolbar.is_open(PaletteKind::Sticker));

        toolbar
            .menu_mut(PaletteKind::Sticker)
            .mount(Rect::new(100.0, 100.0, 200.0, 200.0), None);
        assert!(toolbar.outside_click(Point::new(5.0, 5.0)));
        assert!(!toolbar.is_open(PaletteKind::Sticker));
    }

    #[test]
    fn test_close_releases_regions() {
        let mut toolbar = Toolbar::new();
        toolbar.toggle(PaletteKind::Font);
        toolbar.menu_mut(PaletteKind::Font).mount(Rect::new(0.0, 0.0, 10.0, 10.0), None);
        toolbar.close_all();

        assert!(!toolbar.menu(PaletteKind::Font).contains(Point::new(5.0, 5.0)));
    }
}
