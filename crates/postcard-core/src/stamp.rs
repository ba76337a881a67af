//! The postcard's single stamp slot.

use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Fixed decorative stamp placeholder. Not a widget: it cannot be dragged,
/// selected or deleted, only swapped.
#[derive(Debug, Clone)]
pub struct StampSlot {
    /// Current image reference.
    src: String,
    /// When the image last changed, for the swap transition.
    changed_at: Instant,
    /// Length of the swap transition.
    animation: Duration,
}

impl StampSlot {
    /// Create a slot showing `src`. The first image plays the transition
    /// too, starting at `now`.
    pub fn new(src: impl Into<String>, animation: Duration, now: Instant) -> Self {
        Self {
            src: src.into(),
            changed_at: now,
            animation,
        }
    }

    /// Current image reference.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Swap the image and start the transition.
    pub fn select(&mut self, src: impl Into<String>, now: Instant) {
        self.src = src.into();
        self.changed_at = now;
    }

    /// Whether the swap transition is still running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.changed_at) < self.animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_image_animates() {
        let start = Instant::now();
        let slot = StampSlot::new("assets/stamp-empty.svg", Duration::from_millis(400), start);

        assert!(slot.is_animating(start));
        assert!(slot.is_animating(start + Duration::from_millis(399)));
        assert!(!slot.is_animating(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_select_animates_for_duration() {
        let created = Instant::now();
        let mut slot = StampSlot::new("assets/stamp-empty.svg", Duration::from_millis(400), created);
        let start = created + Duration::from_secs(1);
        assert!(!slot.is_animating(start));

        slot.select("assets/stamps/stamp-piggy.svg", start);
        assert_eq!(slot.src(), "assets/stamps/stamp-piggy.svg");
        assert!(slot.is_animating(start));
        assert!(slot.is_animating(start + Duration::from_millis(399)));
        assert!(!slot.is_animating(start + Duration::from_millis(400)));
    }
}
