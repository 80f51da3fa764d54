// Frame loop, navigation helpers and hover reporting.

mod common;

use common::*;
use glam::{Mat4, Vec2, Vec3};
use showcase_core::constants::{CAMERA_FOVY, CAMERA_ZFAR, CAMERA_ZNEAR};
use showcase_core::picking::screen_to_world_ray;
use showcase_core::{CameraPose, Phase, Showcase, ShowcaseEvent, Signal, Viewport};

/// Pixel coordinates of world point `p` as seen from `camera`.
fn project(viewport: &Viewport, camera: &CameraPose, p: Vec3) -> Vec2 {
    let proj = Mat4::perspective_rh(CAMERA_FOVY, viewport.aspect(), CAMERA_ZNEAR, CAMERA_ZFAR);
    let ndc = (proj * camera.view_matrix()).project_point3(p);
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

fn active_model_on_screen(s: &Showcase<RecordingScene>) -> Vec2 {
    let m = s.model(s.active_index().unwrap()).unwrap();
    project(&s.viewport(), &s.camera().pose(), m.position())
}

fn move_pointer(s: &mut Showcase<RecordingScene>, at: Vec2) {
    s.push_signal(Signal::PointerMove {
        pointer_id: 1,
        x: at.x,
        y: at.y,
    })
    .unwrap();
    s.tick(DT);
}

#[test]
fn ray_through_centre_points_at_target() {
    let vp = desktop();
    let cam = CameraPose {
        eye: Vec3::new(0.0, 0.0, 6.0),
        target: Vec3::ZERO,
    };
    let (origin, dir) = screen_to_world_ray(&vp, &cam, 640.0, 360.0).unwrap();
    assert_eq!(origin, cam.eye);
    assert!((dir - Vec3::NEG_Z).length() < 1e-4);
    assert!(screen_to_world_ray(&Viewport::new(0.0, 0.0), &cam, 0.0, 0.0).is_none());
}

#[test]
fn hover_reports_active_model() {
    let mut s = loaded_showcase(2);
    run(&mut s, 2.0);
    let events = record_events(&mut s);

    move_pointer(&mut s, Vec2::new(2.0, 2.0));
    assert!(!s.is_hovering());

    let over = active_model_on_screen(&s);
    move_pointer(&mut s, over);
    assert!(s.is_hovering());
    // staying over the model reports nothing new
    move_pointer(&mut s, over + Vec2::new(1.0, 0.0));

    s.push_signal(Signal::PointerLeave).unwrap();
    s.tick(DT);
    assert!(!s.is_hovering());
    assert_eq!(s.pointer(), None);

    assert_eq!(
        *events.borrow(),
        vec![
            ShowcaseEvent::HoverChanged {
                hovering: true,
                model_id: Some("item-0".into())
            },
            ShowcaseEvent::HoverChanged {
                hovering: false,
                model_id: None
            },
        ]
    );
}

#[test]
fn activation_clears_hover() {
    let mut s = loaded_showcase(2);
    run(&mut s, 2.0);
    let over = active_model_on_screen(&s);
    move_pointer(&mut s, over);
    assert!(s.is_hovering());
    let events = record_events(&mut s);

    s.activate_item(1).unwrap();

    assert!(!s.is_hovering());
    assert_eq!(
        *events.borrow(),
        vec![
            ShowcaseEvent::HoverChanged {
                hovering: false,
                model_id: None
            },
            ShowcaseEvent::ItemActivated { index: 1 },
        ]
    );
}

#[test]
fn no_hover_while_dragging() {
    let mut s = loaded_showcase(2);
    run(&mut s, 2.0);
    let over = active_model_on_screen(&s);
    s.push_signal(Signal::PointerDown {
        pointer_id: 1,
        x: 2.0,
        y: 2.0,
    })
    .unwrap();
    s.tick(DT);
    move_pointer(&mut s, over);
    assert!(s.interaction().is_dragging());
    assert!(!s.is_hovering());
}

#[test]
fn pointer_leave_ends_drag() {
    let mut s = loaded_showcase(1);
    s.push_signal(Signal::PointerDown {
        pointer_id: 4,
        x: 0.0,
        y: 0.0,
    })
    .unwrap();
    s.tick(DT);
    let events = record_events(&mut s);
    s.push_signal(Signal::PointerLeave).unwrap();
    s.tick(DT);
    assert!(!s.interaction().is_dragging());
    assert_eq!(*events.borrow(), vec![ShowcaseEvent::InteractionEnded]);
}

#[test]
fn next_and_previous_skip_unavailable_items() {
    let mut s = showcase(5);
    for i in [0, 2, 4] {
        load(&mut s, i);
    }
    s.push_signal(Signal::ModelLoadFailed(3)).unwrap();
    s.tick(DT);
    assert_eq!(s.active_index(), Some(0));

    assert!(s.activate_next().unwrap());
    assert_eq!(s.active_index(), Some(2));
    assert!(s.activate_next().unwrap());
    assert_eq!(s.active_index(), Some(4));
    assert!(!s.activate_next().unwrap(), "no wrap-around");
    assert_eq!(s.active_index(), Some(4));

    assert!(s.activate_previous().unwrap());
    assert_eq!(s.active_index(), Some(2));
    assert!(s.activate_previous().unwrap());
    assert_eq!(s.active_index(), Some(0));
    assert!(!s.activate_previous().unwrap());
}

#[test]
fn previous_does_nothing_while_empty() {
    let mut s = showcase(3);
    assert!(!s.activate_previous().unwrap());
    assert_eq!(s.phase(), Phase::Empty);
}

#[test]
fn long_frames_are_capped() {
    let mut a = loaded_showcase(2);
    let mut b = loaded_showcase(2);
    a.activate_item(1).unwrap();
    b.activate_item(1).unwrap();
    a.tick(10.0);
    b.tick(0.25);
    assert_eq!(a.model(1).unwrap().opacity, b.model(1).unwrap().opacity);
    a.tick(f32::NAN);
    assert!(a.model(1).unwrap().opacity.is_finite());
}

#[test]
fn degenerate_viewport_keeps_running() {
    let mut s = Showcase::new(config(2), RecordingScene::default(), Viewport::new(0.0, 0.0));
    load(&mut s, 0);
    load(&mut s, 1);
    s.tick(DT);
    assert_eq!(s.active_index(), Some(0));
    s.activate_item(1).unwrap();
    assert!(!s.camera().is_transitioning());
    assert!(s.models().iter().all(|m| m.slot_x == 0.0));

    // becoming visible reframes
    s.push_signal(Signal::ViewportResized {
        width: 1280.0,
        height: 720.0,
    })
    .unwrap();
    s.tick(DT);
    assert!(s.camera().is_transitioning());
    assert_eq!(s.model(1).unwrap().slot_x, -s.config().settings.horizontal_offset);
}

#[test]
fn events_are_delivered_to_every_observer() {
    let mut s = showcase(2);
    let a = record_events(&mut s);
    let b = record_events(&mut s);
    load(&mut s, 0);
    s.tick(DT);
    assert_eq!(*a.borrow(), *b.borrow());
    assert_eq!(a.borrow().len(), 1);
}

#[test]
fn events_serialise_for_the_page() {
    let json = serde_json::to_value(ShowcaseEvent::HoverChanged {
        hovering: true,
        model_id: Some("item-3".into()),
    })
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "type": "hoverChanged", "isHovering": true, "modelId": "item-3" })
    );
    let json = serde_json::to_value(ShowcaseEvent::ItemActivated { index: 2 }).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "itemActivated", "index": 2 }));
    let json = serde_json::to_value(ShowcaseEvent::InteractionEnded).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "interactionEnded" }));
}

#[test]
fn frame_updates_models_then_lights_then_renders() {
    let mut s = loaded_showcase(3);
    s.activate_item(1).unwrap();
    let from = s.scene().calls.len();
    s.tick(DT);
    let calls = &s.scene().calls[from..];
    let last_model = calls.iter().rposition(|c| *c == "model").unwrap();
    let first_light = calls.iter().position(|c| *c == "light").unwrap();
    assert!(last_model < first_light);
    assert_eq!(calls.last(), Some(&"render"));
    assert_eq!(calls.iter().filter(|c| **c == "render").count(), 1);
}

#[test]
fn pointer_pressed_before_activation_still_blocks_second_touch() {
    let mut s = showcase(2);
    s.push_signal(Signal::PointerDown {
        pointer_id: 1,
        x: 5.0,
        y: 5.0,
    })
    .unwrap();
    s.tick(DT);
    load(&mut s, 0);
    s.tick(DT);
    assert_eq!(s.active_index(), Some(0));

    let events = record_events(&mut s);
    s.push_signal(Signal::PointerDown {
        pointer_id: 2,
        x: 50.0,
        y: 50.0,
    })
    .unwrap();
    s.tick(DT);
    assert!(!s.interaction().is_dragging());
    assert!(events.borrow().is_empty());

    // once both are lifted a fresh single touch drags again
    s.push_signal(Signal::PointerUp { pointer_id: 1 }).unwrap();
    s.push_signal(Signal::PointerUp { pointer_id: 2 }).unwrap();
    s.push_signal(Signal::PointerDown {
        pointer_id: 3,
        x: 50.0,
        y: 50.0,
    })
    .unwrap();
    s.tick(DT);
    assert!(s.interaction().is_dragging());
}

#[test]
fn processing_signals_lets_navigation_see_new_loads() {
    let mut s = showcase(3);
    load(&mut s, 0);
    s.tick(DT);
    load(&mut s, 1);
    assert_eq!(s.pending_signals(), 1);

    s.process_signals();
    assert_eq!(s.pending_signals(), 0);
    assert!(s.model(1).unwrap().is_loaded());
    assert!(s.activate_next().unwrap());
    assert_eq!(s.active_index(), Some(1));
}
