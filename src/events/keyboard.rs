use crate::constants::TEXT_INPUT_TAGS;
use crate::frame::{self, Command, Inbox};
use crate::input;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Whether the keydown should be left to the page.
fn should_ignore(ev: &web::KeyboardEvent) -> bool {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || ev.repeat() {
        return true;
    }
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map_or(false, |el| input::is_text_input(&el.tag_name(), &TEXT_INPUT_TAGS))
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, inbox: &Inbox) {
    if should_ignore(ev) {
        return;
    }
    let key = ev.key();
    if let Some(nav) = input::nav_for_key(&key) {
        log::debug!("[keys] {} -> {:?}", key, nav);
        frame::push(inbox, Command::Navigate(nav));
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(inbox: Inbox, running: Rc<Cell<bool>>) {
    if let Some(window) = web::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            if running.get() {
                handle_global_keydown(&ev, &inbox);
            }
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
