//! Model arena and cross-fade blending.
//!
//! One `ModelState` per configured item, allocated up front and addressed by
//! index. At most one item is active; every other loaded model blends its
//! opacity toward zero and is hidden from the scene once it is effectively
//! transparent.

use crate::config::{GalleryItem, Settings};
use crate::constants::*;
use crate::interaction::ResolvedRotation;
use crate::layout::Viewport;
use crate::math::{damp_factor, lerp};
use crate::scene::{Bounds, SceneGraph, Transform};
use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No model loaded and activated yet.
    Empty,
    Showing(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    /// Permanently non-activatable.
    Failed,
}

/// Presentation state of one item.
#[derive(Clone, Debug)]
pub struct ModelState<M> {
    pub model: Option<M>,
    pub status: LoadStatus,
    pub opacity: f32,
    pub target_opacity: f32,
    pub offset_x: f32,
    pub target_offset_x: f32,
    /// Lateral slot assigned by index parity.
    pub slot_x: f32,
    /// Deterministic per-index (pitch, yaw, roll) for visual variety.
    pub base_orientation: Vec3,
    /// Pointer-driven (yaw, pitch).
    pub interaction_rotation: Vec2,
    /// Accumulated auto-rotation around the vertical axis.
    pub idle_yaw: f32,
    pub visible: bool,
    pub transform: Transform,
    item_scale: Vec3,
    fit_scale: f32,
    bounds_center: Vec3,
    bounds_radius: f32,
    scene_visible: bool,
}

impl<M> ModelState<M> {
    fn new(index: usize, item: &GalleryItem) -> Self {
        Self {
            model: None,
            status: LoadStatus::Pending,
            opacity: 0.0,
            target_opacity: 0.0,
            offset_x: 0.0,
            target_offset_x: 0.0,
            slot_x: 0.0,
            base_orientation: base_orientation_for(index),
            interaction_rotation: Vec2::ZERO,
            idle_yaw: 0.0,
            visible: false,
            transform: Transform::default(),
            item_scale: Vec3::from_array(item.scale),
            fit_scale: 1.0,
            bounds_center: Vec3::ZERO,
            bounds_radius: MODEL_FIT_SIZE * 0.5,
            scene_visible: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded && self.model.is_some()
    }

    /// World-space centre of the model as currently placed.
    pub fn position(&self) -> Vec3 {
        self.transform.translation + self.transform.rotation * (self.scale() * self.bounds_center)
    }

    /// Bounding sphere radius after scaling.
    pub fn radius(&self) -> f32 {
        self.bounds_radius * self.scale().max_element()
    }

    pub fn scale(&self) -> Vec3 {
        self.item_scale * self.fit_scale
    }
}

/// Seeded from the index so every run places models identically.
pub fn base_orientation_for(index: usize) -> Vec3 {
    let mix = BASE_ORIENTATION_SEED ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = StdRng::seed_from_u64(mix);
    Vec3::new(
        rng.gen_range(-BASE_TILT_RANGE..=BASE_TILT_RANGE),
        rng.gen_range(-BASE_YAW_RANGE..=BASE_YAW_RANGE),
        rng.gen_range(-BASE_TILT_RANGE..=BASE_TILT_RANGE),
    )
}

/// Result of a successful activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation {
    pub previous: Option<usize>,
    pub index: usize,
}

pub struct Presentation<M> {
    models: Vec<ModelState<M>>,
    phase: Phase,
    clock: f32,
    bob_weight: f32,
}

impl<M: Clone + std::fmt::Debug> Presentation<M> {
    pub fn new(items: &[GalleryItem]) -> Self {
        Self {
            models: items
                .iter()
                .enumerate()
                .map(|(i, item)| ModelState::new(i, item))
                .collect(),
            phase: Phase::Empty,
            clock: 0.0,
            bob_weight: 1.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Empty => None,
            Phase::Showing(i) => Some(i),
        }
    }

    pub fn active(&self) -> Option<&ModelState<M>> {
        self.active_index().and_then(|i| self.models.get(i))
    }

    pub fn models(&self) -> &[ModelState<M>] {
        &self.models
    }

    pub fn model(&self, index: usize) -> Option<&ModelState<M>> {
        self.models.get(index)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn is_activatable(&self, index: usize) -> bool {
        self.models.get(index).map_or(false, |m| m.is_loaded())
    }

    /// Record a finished load and attach the model to the scene, hidden.
    ///
    /// Returns false if the item was already loaded or had failed.
    pub fn mark_loaded<S>(&mut self, index: usize, model: M, bounds: Bounds, scene: &mut S) -> bool
    where
        S: SceneGraph<Model = M>,
    {
        let Some(state) = self.models.get_mut(index) else {
            return false;
        };
        if state.status != LoadStatus::Pending {
            log::warn!(
                "[showcase] ignoring load of item {} in state {:?}",
                index,
                state.status
            );
            return false;
        }
        let extent = bounds.largest_extent();
        state.fit_scale = if extent.is_finite() && extent > f32::EPSILON {
            MODEL_FIT_SIZE / extent
        } else {
            1.0
        };
        state.bounds_center = if bounds.center().is_finite() {
            bounds.center()
        } else {
            Vec3::ZERO
        };
        state.bounds_radius = if bounds.radius().is_finite() && bounds.radius() > 0.0 {
            bounds.radius()
        } else {
            MODEL_FIT_SIZE * 0.5
        };
        scene.attach_model(&model);
        scene.set_model_visible(&model, false);
        scene.set_model_opacity(&model, 0.0);
        state.offset_x = state.target_offset_x;
        state.status = LoadStatus::Loaded;
        state.model = Some(model);
        state.scene_visible = false;
        log::info!("[showcase] item {} loaded (fit scale {:.3})", index, state.fit_scale);
        true
    }

    pub fn mark_failed(&mut self, index: usize) -> bool {
        match self.models.get_mut(index) {
            Some(state) if state.status == LoadStatus::Pending => {
                state.status = LoadStatus::Failed;
                log::warn!("[showcase] item {} failed to load; it will not be shown", index);
                true
            }
            _ => false,
        }
    }

    /// Switch the active item. `None` when `index` is current or not loaded.
    pub fn activate(&mut self, index: usize) -> Option<Activation> {
        if !self.is_activatable(index) || self.active_index() == Some(index) {
            return None;
        }
        let previous = self.active_index();
        if let Some(prev) = previous {
            let old = &mut self.models[prev];
            old.target_opacity = 0.0;
            old.target_offset_x = old.slot_x * INACTIVE_DRIFT;
        }
        let next = &mut self.models[index];
        next.target_opacity = 1.0;
        next.target_offset_x = next.slot_x;
        if !next.visible {
            // enter from the drifted-out position
            next.offset_x = next.slot_x * INACTIVE_DRIFT;
        }
        next.visible = true;
        self.phase = Phase::Showing(index);
        Some(Activation { previous, index })
    }

    /// Recompute lateral slots for the current viewport.
    pub fn layout(&mut self, viewport: &Viewport, settings: &Settings) {
        let count = self.models.len();
        let active = self.active_index();
        for (i, m) in self.models.iter_mut().enumerate() {
            m.slot_x = viewport.slot_offset(i, count, settings);
            m.target_offset_x = if Some(i) == active {
                m.slot_x
            } else {
                m.slot_x * INACTIVE_DRIFT
            };
            if !m.visible {
                m.offset_x = m.target_offset_x;
            }
        }
    }

    /// Blend every loaded model one frame forward and push the result to the scene.
    pub fn advance<S>(&mut self, dt_sec: f32, rotation: &ResolvedRotation, scene: &mut S)
    where
        S: SceneGraph<Model = M>,
    {
        self.clock += dt_sec;
        // off at once while dragging, eased back in after release
        self.bob_weight = if rotation.dragging {
            0.0
        } else {
            lerp(self.bob_weight, 1.0, damp_factor(BOB_WEIGHT_RATE, dt_sec))
        };
        let bob = (self.clock * BOB_FREQUENCY * TAU).sin() * BOB_AMPLITUDE * self.bob_weight;

        let active = self.active_index();
        let opacity_t = dt_sec * OPACITY_RATE;
        let position_t = dt_sec * POSITION_RATE;

        for (i, m) in self.models.iter_mut().enumerate() {
            let Some(model) = m.model.clone() else {
                continue;
            };
            let is_active = Some(i) == active;

            m.opacity = lerp(m.opacity, m.target_opacity, opacity_t);
            if m.target_opacity >= 1.0 && m.opacity > 1.0 - FADE_EPSILON {
                m.opacity = 1.0;
            }
            m.offset_x = lerp(m.offset_x, m.target_offset_x, position_t);

            if m.target_opacity <= 0.0 && m.opacity < FADE_EPSILON {
                m.opacity = 0.0;
                m.visible = false;
            }

            if m.visible != m.scene_visible {
                scene.set_model_visible(&model, m.visible);
                m.scene_visible = m.visible;
            }
            if !m.visible {
                continue;
            }

            if is_active {
                m.interaction_rotation = rotation.rotation;
                m.idle_yaw += rotation.idle_delta;
            }
            let yaw = m.base_orientation.y + m.interaction_rotation.x + m.idle_yaw;
            let pitch = m.base_orientation.x + m.interaction_rotation.y;
            let rot = Quat::from_euler(EulerRot::YXZ, yaw, pitch, m.base_orientation.z);
            let scale = m.scale();
            let y = if is_active { bob } else { 0.0 };
            let anchor = Vec3::new(m.offset_x, y, 0.0);
            // pivot around the bounds centre, not the asset origin
            m.transform = Transform {
                translation: anchor - rot * (scale * m.bounds_center),
                rotation: rot,
                scale,
            };

            scene.set_model_opacity(&model, m.opacity);
            scene.set_model_transform(&model, &m.transform);
        }
    }

    /// Detach every loaded model. Used on session teardown.
    pub fn detach_all<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<Model = M>,
    {
        for m in self.models.iter_mut() {
            if let Some(model) = m.model.take() {
                scene.detach_model(&model);
            }
            m.visible = false;
            m.scene_visible = false;
        }
        self.phase = Phase::Empty;
    }
}
