//! Typed messages in and out of the presentation core.

use crate::scene::Bounds;
use serde::Serialize;
use smallvec::SmallVec;

/// Notification emitted by the core for UI collaborators. Fire-and-forget.
///
/// Serialises as `{ "type": "itemActivated", "index": 2 }` and so on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShowcaseEvent {
    ItemActivated {
        index: usize,
    },
    InteractionStarted {
        #[serde(rename = "modelId")]
        model_id: String,
    },
    InteractionEnded,
    HoverChanged {
        #[serde(rename = "isHovering")]
        hovering: bool,
        #[serde(rename = "modelId")]
        model_id: Option<String>,
    },
}

/// Input accepted by the core, queued until the next `tick`.
///
/// `M` is the scene-graph model handle type.
#[derive(Clone, Debug)]
pub enum Signal<M> {
    RequestActivate(usize),
    PointerDown { pointer_id: i32, x: f32, y: f32 },
    PointerMove { pointer_id: i32, x: f32, y: f32 },
    PointerUp { pointer_id: i32 },
    PointerCancel { pointer_id: i32 },
    PointerLeave,
    ViewportResized { width: f32, height: f32 },
    ModelLoaded { index: usize, model: M, bounds: Bounds },
    ModelLoadFailed(usize),
}

impl<M> Signal<M> {
    /// Item index the signal addresses, if any.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Signal::RequestActivate(i) | Signal::ModelLoadFailed(i) => Some(*i),
            Signal::ModelLoaded { index, .. } => Some(*index),
            _ => None,
        }
    }
}

type Observer = Box<dyn FnMut(&ShowcaseEvent)>;

/// Explicit observer list. Events are delivered synchronously in emission order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Observer>,
    pending: SmallVec<[ShowcaseEvent; 4]>,
}

impl EventBus {
    pub fn subscribe(&mut self, observer: impl FnMut(&ShowcaseEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Queue an event; delivered on the next `flush`.
    pub fn emit(&mut self, event: ShowcaseEvent) {
        log::debug!("[event] {:?}", event);
        self.pending.push(event);
    }

    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        for ev in &pending {
            for obs in self.observers.iter_mut() {
                obs(ev);
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
