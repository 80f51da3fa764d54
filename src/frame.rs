use crate::bridge::JsScene;
use crate::input::{self, Nav};
use instant::Instant;
use showcase_core::{Showcase, Signal};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Work queued by DOM listeners and JS calls, applied at the start of a frame.
///
/// Listeners never touch the showcase directly: an event observer may call
/// back into the app while a frame is running.
pub enum Command {
    Signal(Signal<u32>),
    Navigate(Nav),
}

pub type Inbox = Rc<RefCell<VecDeque<Command>>>;
pub type SharedShowcase = Rc<RefCell<Option<Showcase<JsScene>>>>;

pub fn push(inbox: &Inbox, command: Command) {
    inbox.borrow_mut().push_back(command);
}

pub struct FrameContext {
    pub showcase: SharedShowcase,
    pub inbox: Inbox,
    pub running: Rc<Cell<bool>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let Ok(mut guard) = self.showcase.try_borrow_mut() else {
            log::warn!("[frame] showcase busy; frame skipped");
            return;
        };
        let Some(showcase) = guard.as_mut() else {
            return;
        };

        let commands: Vec<Command> = self.inbox.borrow_mut().drain(..).collect();
        for command in commands {
            apply(showcase, command);
        }
        showcase.tick(dt_sec);
    }
}

fn apply(showcase: &mut Showcase<JsScene>, command: Command) {
    let result = match command {
        Command::Signal(signal) => showcase.push_signal(signal),
        Command::Navigate(nav) => {
            // loads queued ahead of the key press count toward it
            showcase.process_signals();
            navigate(showcase, nav).map(|_| ())
        }
    };
    if let Err(e) = result {
        log::warn!("[frame] {}", e);
    }
}

fn navigate(showcase: &mut Showcase<JsScene>, nav: Nav) -> showcase_core::Result<bool> {
    match nav {
        Nav::Next => showcase.activate_next(),
        Nav::Previous => showcase.activate_previous(),
        Nav::First | Nav::Last => {
            let available: Vec<bool> = showcase.models().iter().map(|m| m.is_loaded()).collect();
            match input::edge_index(&available, nav == Nav::Last) {
                Some(i) => showcase.activate_item(i),
                None => Ok(false),
            }
        }
    }
}

/// Drive `frame_ctx` from `requestAnimationFrame` until `running` clears.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow().running.get() {
            log::info!("[frame] loop stopped");
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
