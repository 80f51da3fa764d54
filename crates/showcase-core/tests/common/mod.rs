// Shared fixtures for the showcase-core integration tests.

#![allow(dead_code)]

use glam::Vec3;
use showcase_core::{
    Bounds, CameraPose, GalleryConfig, LightPose, SceneGraph, Showcase, ShowcaseEvent, Signal,
    SpotlightDesc, Transform, Viewport,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Scene graph double that records every call.
#[derive(Default, Debug)]
pub struct RecordingScene {
    pub attached: Vec<u32>,
    pub detached: Vec<u32>,
    pub visible: HashMap<u32, bool>,
    pub opacity: HashMap<u32, f32>,
    pub transforms: HashMap<u32, Transform>,
    pub lights: Vec<(u32, SpotlightDesc)>,
    pub light_poses: HashMap<u32, LightPose>,
    pub removed_lights: Vec<u32>,
    pub renders: Vec<CameraPose>,
    /// Kind of each transform, light-update and render call, in call order.
    pub calls: Vec<&'static str>,
    next_light: u32,
}

impl SceneGraph for RecordingScene {
    type Model = u32;
    type Light = u32;

    fn attach_model(&mut self, model: &u32) {
        self.attached.push(*model);
    }

    fn detach_model(&mut self, model: &u32) {
        self.detached.push(*model);
    }

    fn set_model_visible(&mut self, model: &u32, visible: bool) {
        self.visible.insert(*model, visible);
    }

    fn set_model_opacity(&mut self, model: &u32, opacity: f32) {
        self.opacity.insert(*model, opacity);
    }

    fn set_model_transform(&mut self, model: &u32, transform: &Transform) {
        self.transforms.insert(*model, *transform);
        self.calls.push("model");
    }

    fn add_spotlight(&mut self, desc: &SpotlightDesc) -> u32 {
        let id = self.next_light;
        self.next_light += 1;
        self.lights.push((id, *desc));
        id
    }

    fn update_spotlight(&mut self, light: &u32, pose: &LightPose) {
        self.light_poses.insert(*light, *pose);
        self.calls.push("light");
    }

    fn remove_spotlight(&mut self, light: u32) {
        self.removed_lights.push(light);
    }

    fn render(&mut self, camera: &CameraPose) {
        self.renders.push(*camera);
        self.calls.push("render");
    }
}

pub const DT: f32 = 1.0 / 60.0;

/// Model handles are the item index plus this offset, to catch index/handle mixups.
pub const HANDLE_BASE: u32 = 100;

pub fn config_json(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{ "id": "item-{i}", "title": "Item {i}", "asset": "models/{i}.glb", "scale": [1, 1, 1] }}"#
            )
        })
        .collect();
    format!(r#"{{ "items": [{}] }}"#, items.join(","))
}

pub fn config(n: usize) -> GalleryConfig {
    GalleryConfig::from_json(&config_json(n)).expect("valid test config")
}

pub fn desktop() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

pub fn mobile() -> Viewport {
    Viewport::new(390.0, 844.0)
}

pub fn unit_bounds() -> Bounds {
    Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

pub fn showcase(n: usize) -> Showcase<RecordingScene> {
    Showcase::new(config(n), RecordingScene::default(), desktop())
}

pub fn load(s: &mut Showcase<RecordingScene>, index: usize) {
    s.push_signal(Signal::ModelLoaded {
        index,
        model: HANDLE_BASE + index as u32,
        bounds: unit_bounds(),
    })
    .expect("index in range");
}

/// Showcase with every item loaded; item 0 becomes active on the first tick.
pub fn loaded_showcase(n: usize) -> Showcase<RecordingScene> {
    let mut s = showcase(n);
    for i in 0..n {
        load(&mut s, i);
    }
    s.tick(DT);
    s
}

pub fn record_events(s: &mut Showcase<RecordingScene>) -> Rc<RefCell<Vec<ShowcaseEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    s.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));
    log
}

pub fn run(s: &mut Showcase<RecordingScene>, seconds: f32) {
    let frames = (seconds / DT).ceil() as usize;
    for _ in 0..frames {
        s.tick(DT);
    }
}
