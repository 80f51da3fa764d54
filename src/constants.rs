//! Browser-side wiring constants.
//!
//! Presentation tuning lives in `showcase_core::constants`; these only cover
//! the DOM surface.

// Canvas looked up when the host passes no id
pub const DEFAULT_CANVAS_ID: &str = "showcase-canvas";

// Upper bound on the canvas backing-store scale
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Keyboard navigation is skipped while focus is in one of these
pub const TEXT_INPUT_TAGS: [&str; 3] = ["INPUT", "TEXTAREA", "SELECT"];
