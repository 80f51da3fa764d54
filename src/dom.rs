use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use crate::frame::{self, Command, Inbox};
use crate::input::{self, CanvasSize};
use showcase_core::Signal;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// Match the canvas backing store to its CSS box and return both sizes.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> CanvasSize {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let size = input::canvas_size(rect.width(), rect.height(), dpr, MAX_DEVICE_PIXEL_RATIO);
    let (w, h) = size.backing;
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    size
}

/// Resize the canvas now and on every window resize, reporting each new
/// viewport to the showcase.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, inbox: &Inbox, running: &Rc<Cell<bool>>) {
    let report = {
        let canvas = canvas.clone();
        let inbox = inbox.clone();
        move || {
            let css = sync_canvas_backing_size(&canvas).css;
            frame::push(
                &inbox,
                Command::Signal(Signal::ViewportResized {
                    width: css.x,
                    height: css.y,
                }),
            );
        }
    };
    report();

    let running = running.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if running.get() {
            report();
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
