#![cfg(target_arch = "wasm32")]
//! Browser front-end for the model showcase.
//!
//! The page creates a `ShowcaseApp` with the gallery JSON and a scene object,
//! reports model load results as they arrive, and receives events through
//! `onEvent`. Pointer, keyboard and resize input is wired here.

use crate::bridge::JsScene;
use crate::frame::{Command, FrameContext, Inbox, SharedShowcase};
use crate::input::Nav;
use glam::Vec3;
use instant::Instant;
use showcase_core::{Bounds, GalleryConfig, Showcase, ShowcaseError, Signal};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod bridge;
mod constants;
mod dom;
mod events;
mod frame;
mod input;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");
    Ok(())
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

#[wasm_bindgen]
pub struct ShowcaseApp {
    showcase: SharedShowcase,
    inbox: Inbox,
    running: Rc<Cell<bool>>,
    canvas: web::HtmlCanvasElement,
    len: usize,
    started: bool,
}

#[wasm_bindgen]
impl ShowcaseApp {
    /// `canvas_id` may be empty to use the default canvas.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: &str, scene: JsValue) -> Result<ShowcaseApp, JsValue> {
        Self::build(canvas_id, config_json, scene).map_err(to_js)
    }

    /// Wire DOM input and start the animation loop. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.running.set(true);

        dom::wire_canvas_resize(&self.canvas, &self.inbox, &self.running);
        events::wire_input_handlers(events::InputWiring {
            canvas: self.canvas.clone(),
            inbox: self.inbox.clone(),
            running: self.running.clone(),
        });
        events::wire_global_keydown(self.inbox.clone(), self.running.clone());

        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            showcase: self.showcase.clone(),
            inbox: self.inbox.clone(),
            running: self.running.clone(),
            last_instant: Instant::now(),
        }));
        frame::start_loop(frame_ctx);
        log::info!("[showcase] started with {} items", self.len);
    }

    /// Report a loaded model: `handle` is the page's id for it, followed by
    /// its axis-aligned bounds.
    #[wasm_bindgen(js_name = modelLoaded)]
    #[allow(clippy::too_many_arguments)]
    pub fn model_loaded(
        &self,
        index: usize,
        handle: u32,
        min_x: f32,
        min_y: f32,
        min_z: f32,
        max_x: f32,
        max_y: f32,
        max_z: f32,
    ) -> Result<(), JsValue> {
        self.check_index(index)?;
        let bounds = Bounds::new(Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z));
        self.push(Command::Signal(Signal::ModelLoaded {
            index,
            model: handle,
            bounds,
        }));
        Ok(())
    }

    #[wasm_bindgen(js_name = modelLoadFailed)]
    pub fn model_load_failed(&self, index: usize) -> Result<(), JsValue> {
        self.check_index(index)?;
        log::warn!("[showcase] item {} failed to load", index);
        self.push(Command::Signal(Signal::ModelLoadFailed(index)));
        Ok(())
    }

    /// Ask for `index` to become active, typically from scroll position.
    #[wasm_bindgen(js_name = requestActivate)]
    pub fn request_activate(&self, index: usize) -> Result<(), JsValue> {
        self.check_index(index)?;
        self.push(Command::Signal(Signal::RequestActivate(index)));
        Ok(())
    }

    #[wasm_bindgen(js_name = activateNext)]
    pub fn activate_next(&self) {
        self.push(Command::Navigate(Nav::Next));
    }

    #[wasm_bindgen(js_name = activatePrevious)]
    pub fn activate_previous(&self) {
        self.push(Command::Navigate(Nav::Previous));
    }

    /// Register `callback(event)`; events are plain objects tagged by `type`.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) -> Result<(), JsValue> {
        let mut guard = self
            .showcase
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("showcase busy"))?;
        let Some(showcase) = guard.as_mut() else {
            return Err(JsValue::from_str("showcase shut down"));
        };
        showcase.subscribe(move |ev| {
            let payload = serde_json::to_string(ev)
                .map_err(|e| JsValue::from_str(&e.to_string()))
                .and_then(|json| js_sys::JSON::parse(&json));
            match payload {
                Ok(obj) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &obj) {
                        log::error!("[event] callback threw: {:?}", e);
                    }
                }
                Err(e) => log::error!("[event] serialise failed: {:?}", e),
            }
        });
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = activeIndex)]
    pub fn active_index(&self) -> Option<usize> {
        self.showcase
            .try_borrow()
            .ok()
            .and_then(|s| s.as_ref().and_then(|s| s.active_index()))
    }

    #[wasm_bindgen(getter, js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.len
    }

    /// Stop the loop and detach every model and light from the scene.
    pub fn shutdown(&mut self) {
        self.running.set(false);
        self.inbox.borrow_mut().clear();
        let taken = match self.showcase.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => {
                log::error!("[showcase] shutdown during a frame ignored");
                return;
            }
        };
        if let Some(showcase) = taken {
            drop(showcase.shutdown());
        }
    }
}

impl ShowcaseApp {
    fn build(canvas_id: &str, config_json: &str, scene: JsValue) -> anyhow::Result<ShowcaseApp> {
        let id = if canvas_id.is_empty() {
            constants::DEFAULT_CANVAS_ID
        } else {
            canvas_id
        };
        let canvas = dom::canvas_by_id(id)?;
        let config = GalleryConfig::from_json(config_json)?;
        let len = config.len();
        let viewport = dom::sync_canvas_backing_size(&canvas).viewport();
        let showcase = Showcase::new(config, JsScene::new(scene), viewport);
        Ok(ShowcaseApp {
            showcase: Rc::new(RefCell::new(Some(showcase))),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            running: Rc::new(Cell::new(false)),
            canvas,
            len,
            started: false,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), JsValue> {
        if index >= self.len {
            let e = ShowcaseError::IndexOutOfRange {
                index,
                len: self.len,
            };
            return Err(JsValue::from_str(&e.to_string()));
        }
        Ok(())
    }

    fn push(&self, command: Command) {
        if self.running.get() || !self.started {
            frame::push(&self.inbox, command);
        }
    }
}
