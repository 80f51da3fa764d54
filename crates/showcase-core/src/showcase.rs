//! Frame orchestration and item activation.
//!
//! `Showcase` owns the scene graph and the four components. Input arrives as
//! queued [`Signal`]s; every `tick` runs, in this order:
//!
//! 1. drain queued signals (pointer, navigation, resize, load results)
//! 2. advance the interaction controller
//! 3. advance the presentation blends and apply the resolved rotation
//! 4. advance the spotlights
//! 5. advance the camera rig
//! 6. render
//!
//! Swapping 3 and 5 would render a frame with camera and models out of step.

use crate::camera::{framing_for_model, CameraRig};
use crate::config::GalleryConfig;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::error::{Result, ShowcaseError};
use crate::events::{EventBus, ShowcaseEvent, Signal};
use crate::interaction::{DragTransition, InteractionController};
use crate::layout::Viewport;
use crate::picking;
use crate::presentation::{LoadStatus, ModelState, Phase, Presentation};
use crate::scene::{Bounds, SceneGraph};
use crate::spotlight::{SpotlightManager, SpotlightState};
use glam::Vec2;
use std::collections::VecDeque;

pub struct Showcase<S: SceneGraph> {
    config: GalleryConfig,
    scene: S,
    presentation: Presentation<S::Model>,
    interaction: InteractionController,
    camera: CameraRig,
    spotlights: SpotlightManager<S::Light>,
    events: EventBus,
    signals: VecDeque<Signal<S::Model>>,
    viewport: Viewport,
    /// Item to show first while still `Empty`; `None` means whichever loads next.
    preferred_initial: Option<usize>,
    hovering: bool,
    pointer: Option<Vec2>,
}

impl<S: SceneGraph> Showcase<S> {
    pub fn new(config: GalleryConfig, scene: S, viewport: Viewport) -> Self {
        let mut presentation = Presentation::new(&config.items);
        presentation.layout(&viewport, &config.settings);
        let first_slot = presentation.model(0).map_or(0.0, |m| m.slot_x);
        let camera = CameraRig::new(framing_for_model(first_slot, &viewport, &config.settings));
        let spotlights = SpotlightManager::new(config.len(), &config.settings);
        let interaction = InteractionController::new(config.settings.idle_speed());
        log::info!(
            "[showcase] {} items, viewport {}x{}",
            config.len(),
            viewport.width,
            viewport.height
        );
        Self {
            config,
            scene,
            presentation,
            interaction,
            camera,
            spotlights,
            events: EventBus::default(),
            signals: VecDeque::new(),
            viewport,
            preferred_initial: Some(0),
            hovering: false,
            pointer: None,
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ShowcaseEvent) + 'static) {
        self.events.subscribe(observer);
    }

    /// Queue an input for the next frame.
    ///
    /// Fails only for item indices outside the configured gallery.
    pub fn push_signal(&mut self, signal: Signal<S::Model>) -> Result<()> {
        if let Some(index) = signal.item_index() {
            self.check_index(index)?;
        }
        self.signals.push_back(signal);
        Ok(())
    }

    pub fn pending_signals(&self) -> usize {
        self.signals.len()
    }

    /// Apply every queued signal now instead of waiting for the next `tick`.
    ///
    /// Navigation that depends on load state queued just before it calls this
    /// first, so inputs take effect in arrival order.
    pub fn process_signals(&mut self) {
        self.drain_signals();
        self.events.flush();
    }

    fn drain_signals(&mut self) {
        while let Some(signal) = self.signals.pop_front() {
            self.handle_signal(signal);
        }
    }

    /// Run one frame with a delta of `dt_sec` seconds.
    pub fn tick(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };

        self.drain_signals();

        let rotation = self.interaction.advance(dt);
        self.presentation.advance(dt, &rotation, &mut self.scene);
        self.spotlights
            .advance(dt, self.presentation.models(), &mut self.scene);
        self.camera.advance(dt, !self.interaction.is_dragging());
        self.scene.render(&self.camera.pose());

        self.events.flush();
    }

    /// Make `index` the active item.
    ///
    /// `Ok(false)` when it is already active or not loaded; an error only if
    /// the index does not exist.
    pub fn activate_item(&mut self, index: usize) -> Result<bool> {
        let changed = self.activate_inner(index)?;
        self.events.flush();
        Ok(changed)
    }

    /// Activate the next loaded item after the current one, if any.
    pub fn activate_next(&mut self) -> Result<bool> {
        let from = self.presentation.active_index().map_or(0, |i| i + 1);
        match (from..self.len()).find(|&i| self.presentation.is_activatable(i)) {
            Some(i) => self.activate_item(i),
            None => Ok(false),
        }
    }

    /// Activate the closest loaded item before the current one, if any.
    pub fn activate_previous(&mut self) -> Result<bool> {
        let Some(current) = self.presentation.active_index() else {
            return Ok(false);
        };
        match (0..current)
            .rev()
            .find(|&i| self.presentation.is_activatable(i))
        {
            Some(i) => self.activate_item(i),
            None => Ok(false),
        }
    }

    /// Tear the session down, detaching every model and light, and hand the scene back.
    pub fn shutdown(mut self) -> S {
        if self.interaction.cancel() {
            self.events.emit(ShowcaseEvent::InteractionEnded);
        }
        self.presentation.detach_all(&mut self.scene);
        self.spotlights.remove_all(&mut self.scene);
        self.events.flush();
        log::info!("[showcase] shut down");
        self.scene
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.presentation.phase()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.presentation.active_index()
    }

    pub fn model(&self, index: usize) -> Option<&ModelState<S::Model>> {
        self.presentation.model(index)
    }

    pub fn models(&self) -> &[ModelState<S::Model>] {
        self.presentation.models()
    }

    pub fn spotlight(&self, index: usize) -> Option<&SpotlightState<S::Light>> {
        self.spotlights.get(index)
    }

    pub fn spotlight_base_intensity(&self) -> f32 {
        self.spotlights.base_intensity()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Last pointer position seen, in viewport pixels.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(ShowcaseError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn activate_inner(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if self.presentation.phase() == Phase::Empty && !self.presentation.is_activatable(index) {
            if self.presentation.model(index).map(|m| m.status) == Some(LoadStatus::Pending) {
                self.preferred_initial = Some(index);
            }
            return Ok(false);
        }
        let Some(activation) = self.presentation.activate(index) else {
            return Ok(false);
        };
        log::info!(
            "[showcase] activate {:?} -> {}",
            activation.previous,
            activation.index
        );

        self.spotlights.retarget(index);

        let (slot_x, rotation) = match self.presentation.model(index) {
            Some(m) => (m.slot_x, m.interaction_rotation),
            None => (0.0, Vec2::ZERO),
        };
        if activation.previous.is_none() {
            // first item: nothing on screen to animate away from
            if !self.viewport.is_degenerate() {
                self.camera.snap_to(framing_for_model(
                    slot_x,
                    &self.viewport,
                    &self.config.settings,
                ));
            }
        } else if !self
            .camera
            .transition_for_model(slot_x, &self.viewport, &self.config.settings)
        {
            log::debug!("[camera] framing for item {} skipped", index);
        }

        if self.interaction.reset_for(rotation) {
            self.events.emit(ShowcaseEvent::InteractionEnded);
        }
        if self.hovering {
            self.hovering = false;
            self.events.emit(ShowcaseEvent::HoverChanged {
                hovering: false,
                model_id: None,
            });
        }

        self.events.emit(ShowcaseEvent::ItemActivated { index });
        Ok(true)
    }

    fn handle_signal(&mut self, signal: Signal<S::Model>) {
        match signal {
            Signal::RequestActivate(index) => {
                if let Err(e) = self.activate_inner(index) {
                    log::error!("[showcase] {}", e);
                }
            }
            Signal::PointerDown { pointer_id, x, y } => {
                self.pointer = Some(Vec2::new(x, y));
                if self.presentation.active_index().is_none() {
                    // counted for the multi-pointer guard, but nothing to rotate yet
                    self.interaction.track_pointer(pointer_id);
                    return;
                }
                let transition = self.interaction.pointer_down(pointer_id, x, y);
                self.emit_drag(transition);
            }
            Signal::PointerMove { pointer_id, x, y } => {
                self.pointer = Some(Vec2::new(x, y));
                self.interaction.pointer_move(pointer_id, x, y);
                if !self.interaction.is_dragging() {
                    self.update_hover(x, y);
                }
            }
            Signal::PointerUp { pointer_id } | Signal::PointerCancel { pointer_id } => {
                let transition = self.interaction.pointer_up(pointer_id);
                self.emit_drag(transition);
            }
            Signal::PointerLeave => {
                self.pointer = None;
                let transition = self.interaction.release_all();
                self.emit_drag(transition);
                self.set_hover(false);
            }
            Signal::ViewportResized { width, height } => self.resize(width, height),
            Signal::ModelLoaded {
                index,
                model,
                bounds,
            } => self.on_model_loaded(index, model, bounds),
            Signal::ModelLoadFailed(index) => self.on_model_failed(index),
        }
    }

    fn emit_drag(&mut self, transition: DragTransition) {
        match transition {
            DragTransition::Started => {
                let model_id = self
                    .presentation
                    .active_index()
                    .and_then(|i| self.config.items.get(i))
                    .map(|item| item.id.clone())
                    .unwrap_or_default();
                self.events
                    .emit(ShowcaseEvent::InteractionStarted { model_id });
            }
            DragTransition::Ended => self.events.emit(ShowcaseEvent::InteractionEnded),
            DragTransition::None => {}
        }
    }

    fn update_hover(&mut self, x: f32, y: f32) {
        let over = self
            .presentation
            .active()
            .filter(|m| m.visible)
            .map_or(false, |m| {
                picking::hits_sphere(
                    &self.viewport,
                    &self.camera.pose(),
                    x,
                    y,
                    m.position(),
                    m.radius(),
                )
            });
        self.set_hover(over);
    }

    fn set_hover(&mut self, hovering: bool) {
        if hovering == self.hovering {
            return;
        }
        self.hovering = hovering;
        let model_id = if hovering {
            self.presentation
                .active_index()
                .and_then(|i| self.config.items.get(i))
                .map(|item| item.id.clone())
        } else {
            None
        };
        self.events
            .emit(ShowcaseEvent::HoverChanged { hovering, model_id });
    }

    fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return;
        }
        log::info!("[showcase] viewport {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.presentation.layout(&self.viewport, &self.config.settings);
        let slot_x = match self.presentation.active() {
            Some(m) => m.slot_x,
            None => self.presentation.model(0).map_or(0.0, |m| m.slot_x),
        };
        if self.presentation.active_index().is_some() {
            self.camera
                .transition_for_model(slot_x, &self.viewport, &self.config.settings);
        } else if !self.camera.is_transitioning() {
            self.camera
                .snap_to(framing_for_model(slot_x, &self.viewport, &self.config.settings));
        }
    }

    fn on_model_loaded(&mut self, index: usize, model: S::Model, bounds: Bounds) {
        if !self
            .presentation
            .mark_loaded(index, model, bounds, &mut self.scene)
        {
            return;
        }
        self.spotlights.attach(index, &mut self.scene);

        if self.presentation.phase() == Phase::Empty
            && self.preferred_initial.map_or(true, |p| p == index)
        {
            if let Err(e) = self.activate_inner(index) {
                log::error!("[showcase] {}", e);
            }
        }
    }

    fn on_model_failed(&mut self, index: usize) {
        if !self.presentation.mark_failed(index) {
            return;
        }
        if self.presentation.phase() != Phase::Empty || self.preferred_initial != Some(index) {
            return;
        }
        // the preferred first item is gone; fall back to anything already loaded
        self.preferred_initial = None;
        if let Some(i) = (0..self.len()).find(|&i| self.presentation.is_activatable(i)) {
            if let Err(e) = self.activate_inner(i) {
                log::error!("[showcase] {}", e);
            }
        }
    }
}
