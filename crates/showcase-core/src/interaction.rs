//! Pointer drag and idle auto-rotation for the active model.
//!
//! The two sources are mutually exclusive: while a drag is held, and for a
//! cooldown after it ends, idle rotation contributes nothing. Residual drag
//! velocity coasts and decays geometrically; idle only resumes once the
//! cooldown has elapsed and the residual has died out.

use crate::constants::*;
use crate::math::damp_factor;
use glam::Vec2;
use smallvec::SmallVec;

/// What the controller hands the presentation state machine each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRotation {
    /// Smoothed pointer rotation (yaw, pitch) for the active model.
    pub rotation: Vec2,
    /// Idle yaw to add this frame. Zero whenever a drag or its residual is in charge.
    pub idle_delta: f32,
    pub dragging: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTransition {
    None,
    Started,
    Ended,
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    dragging: bool,
    drag_pointer: Option<i32>,
    last_pointer: Option<Vec2>,
    /// Last clamped per-sample delta, in radians per 60 Hz frame.
    velocity: Vec2,
    target: Vec2,
    current: Vec2,
    idle_speed: f32,
    idle_cooldown: f32,
    pointers: SmallVec<[i32; 4]>,
    /// Set while more than one pointer is down; cleared once all are released.
    multi_touch: bool,
}

impl InteractionController {
    /// `idle_speed` is signed: radians per second around the vertical axis.
    pub fn new(idle_speed: f32) -> Self {
        Self {
            dragging: false,
            drag_pointer: None,
            last_pointer: None,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            idle_speed,
            idle_cooldown: 0.0,
            pointers: SmallVec::new(),
            multi_touch: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn target_rotation(&self) -> Vec2 {
        self.target
    }

    pub fn rotation(&self) -> Vec2 {
        self.current
    }

    pub fn last_pointer(&self) -> Option<Vec2> {
        self.last_pointer
    }

    pub fn idle_speed(&self) -> f32 {
        self.idle_speed
    }

    pub fn set_idle_speed(&mut self, speed: f32) {
        self.idle_speed = speed;
    }

    /// Whether idle rotation would advance on the next frame.
    pub fn idle_allowed(&self) -> bool {
        !self.dragging
            && self.idle_cooldown <= 0.0
            && self.velocity.length() < IDLE_VELOCITY_THRESHOLD
    }

    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_pointer = Some(Vec2::new(x, y));
        self.velocity = Vec2::ZERO;
        self.idle_cooldown = IDLE_GRACE_SEC;
    }

    pub fn on_drag_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let pos = Vec2::new(x, y);
        let Some(last) = self.last_pointer.replace(pos) else {
            return;
        };
        let delta = ((pos - last) * ROTATE_SENSITIVITY).clamp_length_max(MAX_ROTATE_PER_SAMPLE);
        if !delta.is_finite() {
            return;
        }
        self.velocity = delta;
        self.accumulate(delta);
    }

    /// Ends the drag, leaving residual velocity to coast. Returns whether a drag was active.
    pub fn on_drag_end(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        self.drag_pointer = None;
        self.last_pointer = None;
        self.idle_cooldown = IDLE_GRACE_SEC;
        true
    }

    /// Ends any drag and discards its residual velocity.
    pub fn cancel(&mut self) -> bool {
        let was = self.on_drag_end();
        self.velocity = Vec2::ZERO;
        was
    }

    /// Clean handoff to a newly activated model whose pointer rotation is `rotation`.
    ///
    /// Returns whether a drag had to be cancelled.
    pub fn reset_for(&mut self, rotation: Vec2) -> bool {
        let was = self.cancel();
        self.target = clamp_tilt(rotation);
        self.current = self.target;
        self.idle_cooldown = self.idle_cooldown.max(ACTIVATION_IDLE_PAUSE_SEC);
        was
    }

    /// Count a pressed pointer without starting a drag.
    pub fn track_pointer(&mut self, pointer_id: i32) {
        if !self.pointers.contains(&pointer_id) {
            self.pointers.push(pointer_id);
        }
        if self.pointers.len() > 1 {
            self.multi_touch = true;
        }
    }

    pub fn pointer_down(&mut self, pointer_id: i32, x: f32, y: f32) -> DragTransition {
        if !self.pointers.contains(&pointer_id) {
            self.pointers.push(pointer_id);
        }
        if self.pointers.len() > 1 {
            // pinch/zoom gestures never drive rotation
            self.multi_touch = true;
            return if self.cancel() {
                DragTransition::Ended
            } else {
                DragTransition::None
            };
        }
        if self.multi_touch {
            return DragTransition::None;
        }
        self.on_drag_start(x, y);
        self.drag_pointer = Some(pointer_id);
        DragTransition::Started
    }

    pub fn pointer_move(&mut self, pointer_id: i32, x: f32, y: f32) {
        if self.multi_touch || self.drag_pointer != Some(pointer_id) {
            return;
        }
        self.on_drag_move(x, y);
    }

    pub fn pointer_up(&mut self, pointer_id: i32) -> DragTransition {
        self.pointers.retain(|p| *p != pointer_id);
        if self.pointers.is_empty() {
            self.multi_touch = false;
        }
        if self.drag_pointer == Some(pointer_id) && self.on_drag_end() {
            DragTransition::Ended
        } else {
            DragTransition::None
        }
    }

    /// Drop every tracked pointer, e.g. when the pointer leaves the canvas.
    pub fn release_all(&mut self) -> DragTransition {
        self.pointers.clear();
        self.multi_touch = false;
        if self.on_drag_end() {
            DragTransition::Ended
        } else {
            DragTransition::None
        }
    }

    /// Advance one frame and resolve pointer vs idle rotation.
    pub fn advance(&mut self, dt_sec: f32) -> ResolvedRotation {
        let dt = dt_sec.max(0.0);
        let frames = dt / REFERENCE_FRAME_SEC;

        if !self.dragging {
            // coasting
            self.accumulate(self.velocity * frames);
            self.idle_cooldown = (self.idle_cooldown - dt).max(0.0);
        }
        self.velocity *= DRAG_DAMPING.powf(frames);
        if self.velocity.length() < IDLE_VELOCITY_THRESHOLD {
            self.velocity = Vec2::ZERO;
        }

        self.current += (self.target - self.current) * damp_factor(ROTATION_SMOOTHING, dt);
        self.current = clamp_tilt(self.current);

        let idle_delta = if self.idle_allowed() {
            self.idle_speed * dt
        } else {
            0.0
        };

        ResolvedRotation {
            rotation: self.current,
            idle_delta,
            dragging: self.dragging,
        }
    }

    fn accumulate(&mut self, delta: Vec2) {
        self.target = clamp_tilt(self.target + delta);
    }
}

#[inline]
fn clamp_tilt(r: Vec2) -> Vec2 {
    Vec2::new(r.x, r.y.clamp(-MAX_TILT, MAX_TILT))
}
