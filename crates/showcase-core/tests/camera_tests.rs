// Camera rig framing and transitions.

mod common;

use common::*;
use glam::Vec3;
use showcase_core::constants::{BREATH_AMPLITUDE, CAMERA_FOLLOW_DESKTOP};
use showcase_core::math::ease_in_out_cubic;
use showcase_core::{framing_for_model, CameraRig, Framing, Settings, Signal, Viewport};

fn rig() -> CameraRig {
    CameraRig::new(Framing {
        position: Vec3::new(0.0, 0.0, 6.0),
        look_at: Vec3::ZERO,
    })
}

#[test]
fn easing_curve_matches_reference_points() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
    assert!((ease_in_out_cubic(0.25) - 4.0 * 0.25f32.powi(3)).abs() < 1e-6);
    assert!((ease_in_out_cubic(0.75) - (1.0 - 0.5f32.powi(3) / 2.0)).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_in_out_cubic(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn transition_snaps_exactly_to_destination() {
    let mut c = rig();
    let dest = Vec3::new(0.37, 0.61, 5.93);
    let look = Vec3::new(0.11, 0.0, 0.0);
    assert!(c.transition_to(dest, look, 1000.0));
    let mut frames = 0;
    while c.is_transitioning() {
        c.advance(DT, false);
        frames += 1;
        assert!(frames < 200);
    }
    assert_eq!(c.position(), dest);
    assert_eq!(c.look_at(), look);
    assert!((59..=61).contains(&frames), "took {frames} frames for 1s");
}

#[test]
fn midpoint_follows_easing() {
    let mut c = rig();
    let dest = Vec3::new(2.0, 0.0, 6.0);
    c.transition_to(dest, Vec3::ZERO, 1000.0);
    // 250 ms in
    c.advance(0.25, false);
    let expected = 2.0 * ease_in_out_cubic(0.25);
    assert!((c.position().x - expected).abs() < 1e-5);
}

#[test]
fn request_during_transition_is_dropped() {
    let mut c = rig();
    assert!(c.transition_to(Vec3::new(1.0, 0.0, 6.0), Vec3::ZERO, 1200.0));
    c.advance(0.3, false);
    let before = *c.transition().unwrap();

    assert!(!c.transition_to(Vec3::new(-5.0, 2.0, 3.0), Vec3::ONE, 800.0));

    let after = *c.transition().unwrap();
    assert_eq!(before, after);
    assert_eq!(after.to.position, Vec3::new(1.0, 0.0, 6.0));
    assert_eq!(after.duration_ms, 1200.0);
}

#[test]
fn new_transition_allowed_after_completion() {
    let mut c = rig();
    c.transition_to(Vec3::new(1.0, 0.0, 6.0), Vec3::ZERO, 800.0);
    c.advance(1.0, false);
    assert!(!c.is_transitioning());
    assert!(c.transition_to(Vec3::new(-1.0, 0.0, 6.0), Vec3::ZERO, 800.0));
}

#[test]
fn framing_depends_on_breakpoint() {
    let settings = Settings::default();
    let desk = framing_for_model(1.6, &desktop(), &settings);
    let phone = framing_for_model(1.6, &mobile(), &settings);
    assert!((desk.position.x - 1.6 * CAMERA_FOLLOW_DESKTOP).abs() < 1e-6);
    assert_eq!(phone.position.x, 0.0);
    assert_eq!(phone.look_at.x, 0.0);
    assert_eq!(desk.position.z, settings.camera_distance);
    // mirrored placement mirrors the framing
    let left = framing_for_model(-1.6, &desktop(), &settings);
    assert_eq!(left.position.x, -desk.position.x);
}

#[test]
fn degenerate_viewport_skips_transitions() {
    let settings = Settings::default();
    let mut c = rig();
    assert!(!c.transition_for_model(1.6, &Viewport::new(0.0, 0.0), &settings));
    assert!(!c.is_transitioning());
}

#[test]
fn transition_duration_is_clamped() {
    let mut settings = Settings::default();
    settings.camera_transition_ms = 5000.0;
    let mut c = rig();
    c.transition_for_model(1.6, &desktop(), &settings);
    assert_eq!(c.transition().unwrap().duration_ms, 1500.0);
}

#[test]
fn breathing_only_when_idle() {
    let mut c = rig();
    for _ in 0..100 {
        c.advance(DT, true);
    }
    let rest = c.position();
    // breathing is additive to the pose only
    let offset = c.pose().eye - rest;
    assert!(offset.y.abs() <= BREATH_AMPLITUDE + 1e-6);
    assert!(offset.y.abs() > 0.0);

    c.advance(DT, false);
    assert_eq!(c.pose().eye, c.position(), "no breathing while dragging");

    c.transition_to(Vec3::new(1.0, 0.0, 6.0), Vec3::ZERO, 1000.0);
    c.advance(DT, true);
    assert_eq!(c.pose().eye, c.position(), "no breathing mid-transition");
}

#[test]
fn rapid_navigation_keeps_first_transition() {
    let mut s = loaded_showcase(4);
    s.activate_item(1).unwrap();
    let first = *s.camera().transition().unwrap();
    s.tick(DT);
    s.activate_item(2).unwrap();
    s.activate_item(3).unwrap();
    assert_eq!(s.active_index(), Some(3), "activation itself is not throttled");
    assert_eq!(s.camera().transition().unwrap().to, first.to);
}

#[test]
fn resize_reframes_active_model() {
    let mut s = loaded_showcase(2);
    run(&mut s, 2.0);
    assert!(!s.camera().is_transitioning());
    s.push_signal(Signal::ViewportResized {
        width: 390.0,
        height: 844.0,
    })
    .unwrap();
    s.tick(DT);
    assert_eq!(s.model(0).unwrap().slot_x, 0.0);
    let tr = s.camera().transition().expect("reframe after resize");
    assert_eq!(tr.to.position.x, 0.0);
    run(&mut s, 2.0);
    assert_eq!(s.camera().position().x, 0.0);
}

#[test]
fn render_receives_camera_pose_every_tick() {
    let mut s = loaded_showcase(2);
    let before = s.scene().renders.len();
    run(&mut s, 0.5);
    let renders = &s.scene().renders;
    assert_eq!(renders.len() - before, (0.5 / DT).ceil() as usize);
    assert_eq!(*renders.last().unwrap(), s.camera().pose());
}
