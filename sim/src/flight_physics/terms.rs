// Scalar terms of the flight integration, kept separate so tests can pin
// them down independently of the full step.

/// Forward glide per tick. Grows with level and with the square root of the
/// squared horizontal displacement (i.e. linearly with actual speed).
#[inline]
pub(super) fn glide_forward_term(level: u32, motion_sq: f32) -> f32 {
    0.000_015 * (1.0 + level as f32 / 10.0) * motion_sq.sqrt()
}

/// Baseline glide drop folded into the forward term.
pub(super) const GLIDE_DROP: f32 = 0.005;

/// Altitude loss per tick; faster flight loses altitude more slowly. The
/// lower bound of 1 also guards the division at standstill.
#[inline]
pub(super) fn gravity_drop_term(gravity_modifier: f32, motion_sq: f32) -> f32 {
    gravity_modifier * 0.01 / (motion_sq * 100.0).max(1.0)
}

/// Thrust decay per tick without a sneak-transition flap; a handful of
/// ticks take the scale to near zero.
pub(super) const THRUST_DECAY: f32 = 0.1889;

#[inline]
pub(super) fn thrust_strength(thrust_scale: f32) -> f32 {
    0.135 * thrust_scale
}

/// Constant downward nudge applied on every flying tick, distinct from the
/// speed-damped drop term.
pub(super) const FLIGHT_GRAVITY_NUDGE: f32 = 0.02;
