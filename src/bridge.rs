//! Scene graph implemented by the host page.
//!
//! The page owns meshes, materials and lights and hands us numeric handles.
//! Every call is forwarded as-is; the JS side decides how to draw.

use showcase_core::{CameraPose, LightPose, SceneGraph, SpotlightDesc, Transform};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Duck-typed JS object passed to `new ShowcaseApp(...)`.
    pub type JsSceneHost;

    #[wasm_bindgen(method, js_name = attachModel)]
    fn attach_model(this: &JsSceneHost, handle: u32);

    #[wasm_bindgen(method, js_name = detachModel)]
    fn detach_model(this: &JsSceneHost, handle: u32);

    #[wasm_bindgen(method, js_name = setModelVisible)]
    fn set_model_visible(this: &JsSceneHost, handle: u32, visible: bool);

    #[wasm_bindgen(method, js_name = setModelOpacity)]
    fn set_model_opacity(this: &JsSceneHost, handle: u32, opacity: f32);

    // column-major 4x4
    #[wasm_bindgen(method, js_name = setModelTransform)]
    fn set_model_transform(this: &JsSceneHost, handle: u32, matrix: &[f32]);

    #[wasm_bindgen(method, js_name = addSpotlight)]
    fn add_spotlight(this: &JsSceneHost, desc: JsValue) -> u32;

    #[wasm_bindgen(method, js_name = updateSpotlight)]
    fn update_spotlight(this: &JsSceneHost, light: u32, position: &[f32], target: &[f32], intensity: f32);

    #[wasm_bindgen(method, js_name = removeSpotlight)]
    fn remove_spotlight(this: &JsSceneHost, light: u32);

    #[wasm_bindgen(method)]
    fn render(this: &JsSceneHost, eye: &[f32], target: &[f32]);
}

pub struct JsScene {
    host: JsSceneHost,
}

impl JsScene {
    pub fn new(host: JsValue) -> Self {
        Self {
            host: host.unchecked_into(),
        }
    }
}

fn spotlight_desc_object(desc: &SpotlightDesc) -> JsValue {
    let obj = js_sys::Object::new();
    let color = js_sys::Array::of3(
        &desc.color[0].into(),
        &desc.color[1].into(),
        &desc.color[2].into(),
    );
    _ = js_sys::Reflect::set(&obj, &"color".into(), &color);
    _ = js_sys::Reflect::set(&obj, &"distance".into(), &desc.distance.into());
    _ = js_sys::Reflect::set(&obj, &"angle".into(), &desc.angle.into());
    _ = js_sys::Reflect::set(&obj, &"penumbra".into(), &desc.penumbra.into());
    _ = js_sys::Reflect::set(&obj, &"decay".into(), &desc.decay.into());
    obj.into()
}

impl SceneGraph for JsScene {
    type Model = u32;
    type Light = u32;

    fn attach_model(&mut self, model: &u32) {
        self.host.attach_model(*model);
    }

    fn detach_model(&mut self, model: &u32) {
        self.host.detach_model(*model);
    }

    fn set_model_visible(&mut self, model: &u32, visible: bool) {
        self.host.set_model_visible(*model, visible);
    }

    fn set_model_opacity(&mut self, model: &u32, opacity: f32) {
        self.host.set_model_opacity(*model, opacity);
    }

    fn set_model_transform(&mut self, model: &u32, transform: &Transform) {
        let m = transform.matrix().to_cols_array();
        self.host.set_model_transform(*model, &m);
    }

    fn add_spotlight(&mut self, desc: &SpotlightDesc) -> u32 {
        self.host.add_spotlight(spotlight_desc_object(desc))
    }

    fn update_spotlight(&mut self, light: &u32, pose: &LightPose) {
        self.host.update_spotlight(
            *light,
            &pose.position.to_array(),
            &pose.target.to_array(),
            pose.intensity,
        );
    }

    fn remove_spotlight(&mut self, light: u32) {
        self.host.remove_spotlight(light);
    }

    fn render(&mut self, camera: &CameraPose) {
        self.host
            .render(&camera.eye.to_array(), &camera.target.to_array());
    }
}
