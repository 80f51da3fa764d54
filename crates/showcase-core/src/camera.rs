//! Camera framing and eased transitions.
//!
//! At most one transition is in flight. A request made while one is running
//! is dropped, never queued and never allowed to cut the running one short.

use crate::config::Settings;
use crate::constants::*;
use crate::layout::Viewport;
use crate::math::{damp_factor, ease_in_out_cubic, lerp, lerp_vec3};
use crate::scene::CameraPose;
use glam::Vec3;
use std::f32::consts::TAU;

/// A camera position/look-at pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// In-flight transition record. Times are in milliseconds on the rig clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
    pub from: Framing,
    pub to: Framing,
    pub start_ms: f32,
    pub duration_ms: f32,
}

impl CameraTransition {
    pub fn fraction(&self, now_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (now_ms - self.start_ms) / self.duration_ms
    }
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    position: Vec3,
    look_at: Vec3,
    transition: Option<CameraTransition>,
    clock_ms: f32,
    breath_weight: f32,
    breath_offset: f32,
}

impl CameraRig {
    pub fn new(initial: Framing) -> Self {
        Self {
            position: initial.position,
            look_at: initial.look_at,
            transition: None,
            clock_ms: 0.0,
            breath_weight: 1.0,
            breath_offset: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Pose for rendering, including the additive breathing offset.
    pub fn pose(&self) -> CameraPose {
        let breath = Vec3::new(0.0, self.breath_offset, 0.0);
        CameraPose {
            eye: self.position + breath,
            target: self.look_at,
        }
    }

    /// Start easing toward `position`/`look_at` over `duration_ms`.
    ///
    /// Returns false, changing nothing, if a transition is already running.
    pub fn transition_to(&mut self, position: Vec3, look_at: Vec3, duration_ms: f32) -> bool {
        if self.transition.is_some() {
            log::debug!("[camera] transition in flight; request dropped");
            return false;
        }
        self.transition = Some(CameraTransition {
            from: Framing {
                position: self.position,
                look_at: self.look_at,
            },
            to: Framing { position, look_at },
            start_ms: self.clock_ms,
            duration_ms: duration_ms.max(0.0),
        });
        true
    }

    /// Frame the model at lateral offset `model_x`, unless the viewport is degenerate.
    pub fn transition_for_model(
        &mut self,
        model_x: f32,
        viewport: &Viewport,
        settings: &Settings,
    ) -> bool {
        if viewport.is_degenerate() {
            return false;
        }
        let f = framing_for_model(model_x, viewport, settings);
        self.transition_to(f.position, f.look_at, settings.transition_ms())
    }

    /// Place the camera without animating. Drops any transition in flight.
    pub fn snap_to(&mut self, framing: Framing) {
        self.transition = None;
        self.position = framing.position;
        self.look_at = framing.look_at;
    }

    /// `allow_breathing` is false while a drag is held.
    pub fn advance(&mut self, dt_sec: f32, allow_breathing: bool) {
        self.clock_ms += dt_sec.max(0.0) * 1000.0;

        if let Some(tr) = self.transition {
            let t = tr.fraction(self.clock_ms);
            if t >= 1.0 {
                // exact destination, no float residue
                self.position = tr.to.position;
                self.look_at = tr.to.look_at;
                self.transition = None;
            } else {
                let e = ease_in_out_cubic(t);
                self.position = lerp_vec3(tr.from.position, tr.to.position, e);
                self.look_at = lerp_vec3(tr.from.look_at, tr.to.look_at, e);
            }
        }

        let breathing = allow_breathing && self.transition.is_none();
        // cut immediately, fade back in
        self.breath_weight = if breathing {
            lerp(self.breath_weight, 1.0, damp_factor(BREATH_WEIGHT_RATE, dt_sec))
        } else {
            0.0
        };
        let secs = self.clock_ms / 1000.0;
        self.breath_offset =
            (secs * BREATH_FREQUENCY * TAU).sin() * BREATH_AMPLITUDE * self.breath_weight;
    }
}

/// Deterministic framing for a model placed at `model_x`.
///
/// Narrow viewports keep the camera centred; wide ones shift it toward the
/// model's side in proportion to its lateral placement.
pub fn framing_for_model(model_x: f32, viewport: &Viewport, settings: &Settings) -> Framing {
    let follow = if viewport.is_degenerate() || viewport.is_mobile(settings) {
        CAMERA_FOLLOW_MOBILE
    } else {
        CAMERA_FOLLOW_DESKTOP
    };
    let look_follow = if follow == 0.0 { 0.0 } else { CAMERA_LOOK_FOLLOW };
    Framing {
        position: Vec3::new(
            model_x * follow,
            settings.camera_height,
            settings.camera_distance,
        ),
        look_at: Vec3::new(model_x * look_follow, 0.0, 0.0),
    }
}
