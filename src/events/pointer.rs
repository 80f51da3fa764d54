use crate::frame::{self, Command, Inbox};
use crate::input;
use glam::Vec2;
use showcase_core::Signal;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub inbox: Inbox,
    pub running: Rc<Cell<bool>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w, "pointerup");
    wire_pointerup(&w, "pointercancel");
    wire_pointerleave(&w);
}

/// Pointer position in canvas CSS pixels, the space the viewport uses.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_css_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn add_listener(
    target: &web::EventTarget,
    name: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(w.canvas.as_ref(), "pointerdown", move |ev| {
        if !w2.running.get() {
            return;
        }
        let Some(pos) = pointer_canvas_px(&ev, &w2.canvas) else {
            return;
        };
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        frame::push(
            &w2.inbox,
            Command::Signal(Signal::PointerDown {
                pointer_id: ev.pointer_id(),
                x: pos.x,
                y: pos.y,
            }),
        );
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(w.canvas.as_ref(), "pointermove", move |ev| {
        if !w2.running.get() {
            return;
        }
        let Some(pos) = pointer_canvas_px(&ev, &w2.canvas) else {
            return;
        };
        frame::push(
            &w2.inbox,
            Command::Signal(Signal::PointerMove {
                pointer_id: ev.pointer_id(),
                x: pos.x,
                y: pos.y,
            }),
        );
    });
}

fn wire_pointerup(w: &InputWiring, name: &'static str) {
    let w2 = w.clone();
    add_listener(w.canvas.as_ref(), name, move |ev| {
        if !w2.running.get() {
            return;
        }
        let pointer_id = ev.pointer_id();
        if w2.canvas.has_pointer_capture(pointer_id) {
            _ = w2.canvas.release_pointer_capture(pointer_id);
        }
        let signal = if name == "pointercancel" {
            Signal::PointerCancel { pointer_id }
        } else {
            Signal::PointerUp { pointer_id }
        };
        frame::push(&w2.inbox, Command::Signal(signal));
    });
}

fn wire_pointerleave(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(w.canvas.as_ref(), "pointerleave", move |_ev| {
        if !w2.running.get() {
            return;
        }
        frame::push(&w2.inbox, Command::Signal(Signal::PointerLeave));
    });
}
