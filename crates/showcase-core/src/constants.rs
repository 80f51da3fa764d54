//! Presentation tuning constants.
//!
//! Rates are per second unless noted. Angles are radians.

use std::f32::consts::PI;

// Frame
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // longer gaps (a backgrounded tab) are capped

// Cross-fade
pub const OPACITY_RATE: f32 = 4.0; // lerp factor per second for opacity
pub const POSITION_RATE: f32 = 3.0; // lerp factor per second for horizontal offset
pub const FADE_EPSILON: f32 = 0.01; // below this a fading model is hidden
pub const INACTIVE_DRIFT: f32 = 1.5; // fading models slide outward to this multiple of their slot

// Layout
pub const MODEL_FIT_SIZE: f32 = 2.0; // largest bounding extent after normalisation
pub const BOB_AMPLITUDE: f32 = 0.05;
pub const BOB_FREQUENCY: f32 = 1.2;
pub const BOB_WEIGHT_RATE: f32 = 5.0; // how fast the bob fades back in after a drag

// Deterministic base orientation
pub const BASE_ORIENTATION_SEED: u64 = 42;
pub const BASE_TILT_RANGE: f32 = 0.15; // +- pitch/roll variety
pub const BASE_YAW_RANGE: f32 = PI; // +- yaw variety

// Pointer rotation
pub const ROTATE_SENSITIVITY: f32 = 0.005; // radians per screen pixel
pub const MAX_ROTATE_PER_SAMPLE: f32 = 0.08; // clamp per pointer sample
pub const DRAG_DAMPING: f32 = 0.92; // velocity multiplier per 60 Hz frame
pub const REFERENCE_FRAME_SEC: f32 = 1.0 / 60.0;
pub const ROTATION_SMOOTHING: f32 = 12.0; // critically damped ease toward target
pub const MAX_TILT: f32 = PI / 3.0; // +-60 degrees on the pitch axis

// Idle rotation
pub const IDLE_GRACE_SEC: f32 = 1.5; // cooldown after drag end before idle resumes
pub const IDLE_VELOCITY_THRESHOLD: f32 = 1e-4; // residual velocity that still blocks idle
pub const ACTIVATION_IDLE_PAUSE_SEC: f32 = 0.8; // idle pause after switching models

// Camera
pub const CAMERA_TRANSITION_MIN_MS: f32 = 800.0;
pub const CAMERA_TRANSITION_MAX_MS: f32 = 1500.0;
pub const CAMERA_FOLLOW_DESKTOP: f32 = 0.35; // share of lateral offset the camera follows
pub const CAMERA_FOLLOW_MOBILE: f32 = 0.0;
pub const CAMERA_LOOK_FOLLOW: f32 = 0.6; // share of lateral offset the look-at follows
pub const BREATH_AMPLITUDE: f32 = 0.04;
pub const BREATH_FREQUENCY: f32 = 0.5;
pub const BREATH_WEIGHT_RATE: f32 = 2.0;
pub const CAMERA_FOVY: f32 = PI / 4.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Spotlights
pub const HUE_STEP: f32 = 0.618_034; // golden-ratio conjugate
pub const SPOT_SATURATION: f32 = 0.7;
pub const SPOT_LIGHTNESS: f32 = 0.6;
pub const SPOT_INTENSITY_RATE: f32 = 3.0;
pub const SPOT_PULSE_AMPLITUDE: f32 = 0.08;
pub const SPOT_PULSE_FREQUENCY: f32 = 1.6;
pub const SPOT_FORWARD_OFFSET: f32 = 1.5; // light sits in front of the model on +Z
pub const SPOT_AIM_HEIGHT: f32 = 0.0; // aim target height relative to the model

// Hover picking
pub const PICK_RADIUS_SCALE: f32 = 0.9; // share of the bounding sphere that counts as a hit
