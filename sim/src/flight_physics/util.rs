use bevy_math::{Vec2, Vec3};

/// Degrees→radians factor matching the host's yaw convention.
pub(super) const DEG_TO_RAD: f32 = 0.017_453_292;

/// Squared horizontal displacement since the previous tick's anchor.
#[inline]
pub(super) fn horizontal_motion_sq(position: Vec3, anchor: Vec2) -> f32 {
    Vec2::new(position.x - anchor.x, position.z - anchor.y).length_squared()
}

/// Squared total displacement. The stored anchor has no vertical component,
/// so the current height contributes directly.
#[inline]
pub(super) fn total_motion_sq(position: Vec3, anchor: Vec2) -> f32 {
    Vec3::new(position.x - anchor.x, position.y, position.z - anchor.y).length_squared()
}

/// Project a forward magnitude onto the horizontal plane for a yaw in
/// degrees: `(-f·sin yaw, f·cos yaw)`.
#[inline]
pub(super) fn planar_push(yaw_degrees: f32, forward: f32) -> (f32, f32) {
    let yaw = yaw_degrees * DEG_TO_RAD;
    (-forward * yaw.sin(), forward * yaw.cos())
}
