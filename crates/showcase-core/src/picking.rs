use crate::constants::{CAMERA_FOVY, CAMERA_ZFAR, CAMERA_ZNEAR, PICK_RADIUS_SCALE};
use crate::layout::Viewport;
use crate::math::ray_sphere;
use crate::scene::CameraPose;
use glam::{Mat4, Vec3, Vec4};

/// World-space ray through viewport pixel (`sx`, `sy`) for `camera`.
///
/// Returns `(origin, direction)`, or `None` for a degenerate viewport.
pub fn screen_to_world_ray(
    viewport: &Viewport,
    camera: &CameraPose,
    sx: f32,
    sy: f32,
) -> Option<(Vec3, Vec3)> {
    if viewport.is_degenerate() {
        return None;
    }
    let ndc_x = (2.0 * sx / viewport.width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / viewport.height);
    let proj = Mat4::perspective_rh(CAMERA_FOVY, viewport.aspect(), CAMERA_ZNEAR, CAMERA_ZFAR);
    let inv = (proj * camera.view_matrix()).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    if p_far.w.abs() < f32::EPSILON {
        return None;
    }
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let rd = (p1 - camera.eye).normalize_or_zero();
    (rd != Vec3::ZERO).then_some((camera.eye, rd))
}

/// Whether the pointer at (`sx`, `sy`) lies over a sphere at `center`.
pub fn hits_sphere(
    viewport: &Viewport,
    camera: &CameraPose,
    sx: f32,
    sy: f32,
    center: Vec3,
    radius: f32,
) -> bool {
    screen_to_world_ray(viewport, camera, sx, sy)
        .and_then(|(ro, rd)| ray_sphere(ro, rd, center, radius * PICK_RADIUS_SCALE))
        .is_some()
}
