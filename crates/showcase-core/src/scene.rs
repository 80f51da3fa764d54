//! Seam to the rendering collaborator.
//!
//! The core never rasterizes anything. It drives a scene graph through this
//! trait: models are attached once loaded, lights are created per item, and
//! `render` is issued last in every frame.

use glam::{Mat4, Quat, Vec3};

/// Axis-aligned bounding box reported by the loader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn largest_extent(&self) -> f32 {
        self.size().max_element()
    }

    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Fixed parameters of a spotlight, given once at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightDesc {
    pub color: [f32; 3],
    pub distance: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
}

/// Per-frame light state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightPose {
    pub position: Vec3,
    pub target: Vec3,
    pub intensity: f32,
}

/// Camera handed to `render`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Scene graph the core mutates. Only the presentation state machine
/// (model methods) and the spotlight manager (light methods) call into it.
pub trait SceneGraph {
    type Model: Clone + std::fmt::Debug;
    type Light: std::fmt::Debug;

    fn attach_model(&mut self, model: &Self::Model);
    fn detach_model(&mut self, model: &Self::Model);
    fn set_model_visible(&mut self, model: &Self::Model, visible: bool);
    /// Applied to every surface of the model.
    fn set_model_opacity(&mut self, model: &Self::Model, opacity: f32);
    fn set_model_transform(&mut self, model: &Self::Model, transform: &Transform);

    fn add_spotlight(&mut self, desc: &SpotlightDesc) -> Self::Light;
    fn update_spotlight(&mut self, light: &Self::Light, pose: &LightPose);
    fn remove_spotlight(&mut self, light: Self::Light);

    fn render(&mut self, camera: &CameraPose);
}
