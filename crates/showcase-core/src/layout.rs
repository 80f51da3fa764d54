use crate::config::Settings;

/// Viewport size in CSS pixels. Read-only for everything except the resize signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    /// Zero-sized (or not yet measured) viewport.
    pub fn is_degenerate(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }

    pub fn is_mobile(&self, settings: &Settings) -> bool {
        self.width < settings.mobile_breakpoint
    }

    pub fn aspect(&self) -> f32 {
        if self.is_degenerate() {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Lateral slot for `index`: even items to the right, odd to the left.
    ///
    /// Collapses to zero on narrow or degenerate viewports and for galleries
    /// with a single item.
    pub fn slot_offset(&self, index: usize, count: usize, settings: &Settings) -> f32 {
        if count <= 1 || self.is_degenerate() || self.is_mobile(settings) {
            return 0.0;
        }
        if index % 2 == 0 {
            settings.horizontal_offset
        } else {
            -settings.horizontal_offset
        }
    }
}
