// Pure input helpers shared by the DOM listeners. No web-sys types here so the
// host test suite can include this file directly.

use glam::Vec2;
use showcase_core::Viewport;

/// Keyboard navigation intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nav {
    Next,
    Previous,
    First,
    Last,
}

#[inline]
pub fn nav_for_key(key: &str) -> Option<Nav> {
    match key {
        "ArrowDown" | "PageDown" | "j" | "J" => Some(Nav::Next),
        "ArrowUp" | "PageUp" | "k" | "K" => Some(Nav::Previous),
        "Home" => Some(Nav::First),
        "End" => Some(Nav::Last),
        _ => None,
    }
}

/// First (or last) index whose entry in `available` is true.
#[inline]
pub fn edge_index(available: &[bool], last: bool) -> Option<usize> {
    if last {
        available.iter().rposition(|a| *a)
    } else {
        available.iter().position(|a| *a)
    }
}

/// Map a client-space point into the canvas CSS box, the space `Viewport` uses.
///
/// Returns `None` while the canvas has no layout box.
#[inline]
pub fn client_to_css_px(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    Some(client - rect_origin)
}

/// Canvas measured in both pixel spaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    /// Layout box in CSS pixels. Breakpoints and picking work here.
    pub css: Vec2,
    /// Backing store in device pixels, what the renderer draws into.
    pub backing: (u32, u32),
}

impl CanvasSize {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.css.x, self.css.y)
    }
}

#[inline]
pub fn canvas_size(css_width: f64, css_height: f64, dpr: f64, max_dpr: f64) -> CanvasSize {
    CanvasSize {
        css: Vec2::new(css_width.max(0.0) as f32, css_height.max(0.0) as f32),
        backing: backing_size(css_width, css_height, dpr, max_dpr),
    }
}

/// Backing-store size for a CSS box at `dpr`, never below one pixel.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, max_dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_dpr)
    } else {
        1.0
    };
    let w = (css_width.max(0.0) * dpr) as u32;
    let h = (css_height.max(0.0) * dpr) as u32;
    (w.max(1), h.max(1))
}

/// True for element tag names that take text input.
#[inline]
pub fn is_text_input(tag: &str, text_tags: &[&str]) -> bool {
    text_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
}
