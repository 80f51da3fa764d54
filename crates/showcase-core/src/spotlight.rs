//! One coloured spotlight per item, following its model.

use crate::config::Settings;
use crate::constants::*;
use crate::math::{damp_factor, hsl_to_rgb, lerp};
use crate::presentation::ModelState;
use crate::scene::{LightPose, SceneGraph, SpotlightDesc};
use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct SpotlightState<L> {
    pub light: Option<L>,
    pub color: [f32; 3],
    pub intensity: f32,
    pub target_intensity: f32,
    /// Last intensity pushed to the scene, pulse included.
    pub applied_intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

/// Hue for item `index`, spread by the golden-ratio step.
pub fn hue_for_index(index: usize) -> f32 {
    (index as f32 * HUE_STEP).rem_euclid(1.0)
}

pub fn color_for_index(index: usize) -> [f32; 3] {
    hsl_to_rgb(hue_for_index(index), SPOT_SATURATION, SPOT_LIGHTNESS)
}

pub struct SpotlightManager<L> {
    lights: Vec<SpotlightState<L>>,
    base_intensity: f32,
    height: f32,
    desc: SpotlightDesc,
    clock: f32,
}

impl<L: std::fmt::Debug> SpotlightManager<L> {
    pub fn new(count: usize, settings: &Settings) -> Self {
        let s = &settings.spotlight;
        let lights = (0..count)
            .map(|i| SpotlightState {
                light: None,
                color: s.color.unwrap_or_else(|| color_for_index(i)),
                intensity: 0.0,
                target_intensity: 0.0,
                applied_intensity: 0.0,
                position: Vec3::ZERO,
                target: Vec3::ZERO,
            })
            .collect();
        Self {
            lights,
            base_intensity: settings.spotlight_base_intensity(),
            height: s.height,
            desc: SpotlightDesc {
                color: [1.0, 1.0, 1.0],
                distance: s.distance,
                angle: s.angle,
                penumbra: s.penumbra,
                decay: s.decay,
            },
            clock: 0.0,
        }
    }

    pub fn lights(&self) -> &[SpotlightState<L>] {
        &self.lights
    }

    pub fn get(&self, index: usize) -> Option<&SpotlightState<L>> {
        self.lights.get(index)
    }

    pub fn base_intensity(&self) -> f32 {
        self.base_intensity
    }

    /// Create the light for `index` at zero intensity. No-op if already attached.
    pub fn attach<S>(&mut self, index: usize, scene: &mut S) -> bool
    where
        S: SceneGraph<Light = L>,
    {
        let Some(state) = self.lights.get_mut(index) else {
            return false;
        };
        if state.light.is_some() {
            return false;
        }
        let desc = SpotlightDesc {
            color: state.color,
            ..self.desc
        };
        state.light = Some(scene.add_spotlight(&desc));
        log::debug!("[spot] attached light {} color={:?}", index, desc.color);
        true
    }

    /// Focus `index`: its light returns to base intensity, every other one fades out.
    pub fn retarget(&mut self, index: usize) {
        for (i, l) in self.lights.iter_mut().enumerate() {
            l.target_intensity = if i == index { self.base_intensity } else { 0.0 };
        }
    }

    /// Ease intensities and pin each light to its model's current placement.
    pub fn advance<S, M>(&mut self, dt_sec: f32, models: &[ModelState<M>], scene: &mut S)
    where
        S: SceneGraph<Light = L>,
    {
        self.clock += dt_sec;
        let k = damp_factor(SPOT_INTENSITY_RATE, dt_sec);
        for (i, l) in self.lights.iter_mut().enumerate() {
            l.intensity = lerp(l.intensity, l.target_intensity, k);
            if l.target_intensity <= 0.0 && l.intensity < FADE_EPSILON {
                l.intensity = 0.0;
            }
            let pulse = if l.target_intensity > 0.0 {
                1.0 + SPOT_PULSE_AMPLITUDE
                    * (self.clock * SPOT_PULSE_FREQUENCY * TAU + i as f32).sin()
            } else {
                1.0
            };
            l.applied_intensity = l.intensity * pulse;

            let Some(light) = l.light.as_ref() else {
                continue;
            };
            if let Some(m) = models.get(i).filter(|m| m.visible) {
                let center = m.position();
                l.position = center + Vec3::new(0.0, self.height, SPOT_FORWARD_OFFSET);
                l.target = center + Vec3::new(0.0, SPOT_AIM_HEIGHT, 0.0);
            }
            scene.update_spotlight(
                light,
                &LightPose {
                    position: l.position,
                    target: l.target,
                    intensity: l.applied_intensity,
                },
            );
        }
    }

    pub fn remove_all<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<Light = L>,
    {
        for l in self.lights.iter_mut() {
            if let Some(light) = l.light.take() {
                scene.remove_spotlight(light);
            }
            l.intensity = 0.0;
            l.target_intensity = 0.0;
        }
    }
}
