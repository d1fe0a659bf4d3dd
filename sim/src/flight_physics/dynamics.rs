use bevy_math::{Vec2, Vec3};
use rand::Rng;

use super::terms::{
    glide_forward_term, gravity_drop_term, thrust_strength, FLIGHT_GRAVITY_NUDGE, GLIDE_DROP,
    THRUST_DECAY,
};
use super::types::{FlightInputs, FlightOutputs, FlightState, FlightStepDebug, PoseReset};
use super::util::{horizontal_motion_sq, planar_push, total_motion_sq};
use crate::capability::FlightCapability;
use crate::reserves::MagicReserves;
use crate::sounds::{SoundCategory, SoundCue, SoundEventId};
use crate::species_specs::SpeciesSpec;

/// Advance one character's flight state by one simulation tick.
/// See `step_flight_dbg` for full details and telemetry.
pub fn step_flight<R: Rng + ?Sized>(
    species: &SpeciesSpec,
    capability: FlightCapability,
    reserves: &mut MagicReserves,
    inputs: &FlightInputs,
    state: &mut FlightState,
    rng: &mut R,
) -> FlightOutputs {
    step_flight_dbg(species, capability, reserves, inputs, state, rng, None)
}

/// Variant of `step_flight` that fills out an optional debug telemetry
/// struct.
///
/// Order within the tick is fixed: pose correction, flight-flag
/// reconciliation, inverted-gravity grounding, then either the flying
/// branch (drain, glide, turbulence, wing cue, gravity nudge) or the
/// grounded branch (engage detection). The horizontal anchor updates last.
pub fn step_flight_dbg<R: Rng + ?Sized>(
    species: &SpeciesSpec,
    capability: FlightCapability,
    reserves: &mut MagicReserves,
    inputs: &FlightInputs,
    state: &mut FlightState,
    rng: &mut R,
    mut dbg: Option<&mut FlightStepDebug>,
) -> FlightOutputs {
    let mut velocity = inputs.velocity;
    let mut out = FlightOutputs {
        flying: inputs.flying,
        ..Default::default()
    };

    // An inverted-gravity character stuck rendering the crouch pose without
    // actually sneaking gets snapped upright, shifted by the height delta.
    if species.is_gravity_inverted() && !inputs.sneaking && inputs.in_sneaking_pose {
        out.pose_reset = Some(PoseReset {
            lift: inputs.pose_height - inputs.standing_height,
        });
    }

    let override_mode = capability == FlightCapability::GrantedByOverride;
    let can_fly = capability.is_granted();

    let mut flying = inputs.flying;
    if !override_mode {
        flying |= (can_fly || inputs.allow_flight) && state.is_flying_either;

        if (inputs.grounded && inputs.sneaking)
            || inputs.touching_liquid
            || inputs.horizontal_collision
            || inputs.vertical_collision
        {
            flying = false;
        }
    }

    state.is_flying_survival = flying && !override_mode;
    state.is_flying_either = state.is_flying_survival || (override_mode && flying);

    if species.is_gravity_inverted() {
        // "Ground" is whatever sits directly above the head.
        let grounded = inputs.solid_above_head;
        out.grounded = Some(grounded);

        if grounded || inputs.horizontal_collision {
            flying = false;
            state.is_flying_either = false;
            state.is_flying_survival = false;
        }
    }

    if let Some(d) = dbg.as_deref_mut() {
        d.capability = capability;
        d.override_mode = override_mode;
    }

    if state.is_flying(inputs.gliding, inputs.mounted) {
        let level = reserves.level().get() + 1;

        // Post-increment: the gate compares the pre-increment age, while the
        // cadence checks below run on the incremented counter.
        let age = state.ticks_in_air;
        state.ticks_in_air += 1;

        if age > level * 100 {
            let motion = horizontal_motion_sq(inputs.position, state.last_horizontal);
            let drain = motion * 50.0 / level as f32;
            reserves.add_mana(-drain);
            if let Some(d) = dbg.as_deref_mut() {
                d.drained_mana = drain;
            }

            if reserves.mana().percent_fill() < 0.2 {
                reserves.exertion_mut().add(2.0);
                reserves.energy_mut().add(2.0 + motion * 5.0);

                if reserves.mana().percent_fill() < 0.1 && state.ticks_in_air % 10 == 0 {
                    let mut exhaustion = 0.3 * state.ticks_in_air as f32 / 70.0;
                    if inputs.sprinting {
                        exhaustion *= 3.11;
                    }
                    out.exhaustion += exhaustion;
                }
            }
        }

        out.reset_fall_distance = true;

        move_flying(
            species,
            reserves,
            inputs,
            state,
            &mut velocity,
            &mut out,
            dbg.as_deref_mut(),
        );
        if inputs.raining {
            apply_turbulence(inputs, &mut velocity, &mut out, rng, dbg.as_deref_mut());
        }

        // Presentation-only wing cue for the local view; the speed check
        // reads the tick's incoming velocity, not the integrated one.
        if inputs.is_client_view
            && state.ticks_in_air % 20 == 0
            && inputs.velocity.length() < 0.29
        {
            out.sounds.push(wing_cue(species));
            state.thrust_scale = 1.0;
            if let Some(d) = dbg.as_deref_mut() {
                d.wing_cue = true;
            }
        }

        velocity.y -= FLIGHT_GRAVITY_NUDGE;
    } else {
        state.ticks_in_air = 0;

        if !override_mode {
            let hor = horizontal_motion_sq(inputs.position, state.last_horizontal);
            let motion = total_motion_sq(inputs.position, state.last_horizontal);
            if let Some(d) = dbg.as_deref_mut() {
                d.horizontal_motion_sq = hor;
                d.total_motion_sq = motion;
            }

            // Upward flap following horizontal momentum, or a sudden vertical
            // impulse. The second disjunct is preserved as written.
            if velocity.y > 0.0 && (hor > 0.2 || (motion > 0.2 && velocity.y < -0.2)) {
                flying = true;
                state.is_flying_either = true;
                state.is_flying_survival = true;

                velocity.y += hor + 0.3;
                apply_thrust(species, inputs, state, &mut velocity, &mut out, dbg.as_deref_mut());

                if let Some(d) = dbg.as_deref_mut() {
                    d.engaged = true;
                }
            }
        }
    }

    state.last_horizontal = Vec2::new(inputs.position.x, inputs.position.z);

    if let Some(d) = dbg.as_deref_mut() {
        d.thrust_scale = state.thrust_scale;
        d.exhaustion = out.exhaustion;
    }

    out.velocity = velocity;
    out.flying = flying;
    out
}

/// External request to set or clear survival flight, subject to a fresh
/// capability check. Returns the host's new authoritative flying flag.
pub fn update_flight_stat(
    state: &mut FlightState,
    capability: FlightCapability,
    allow_flight: bool,
    host_flying: bool,
    requested: bool,
) -> bool {
    if capability.is_granted() || allow_flight {
        let flying = host_flying || requested;
        state.is_flying_survival = flying;
        flying
    } else {
        state.is_flying_survival = false;
        false
    }
}

fn wing_cue(species: &SpeciesSpec) -> SoundCue {
    SoundCue {
        event: species.wing_sound,
        category: SoundCategory::Player,
        volume: 0.5,
        pitch: 1.0,
    }
}

/// Integrate forward glide: one thrust impulse, then a forward push along
/// the facing yaw and the speed-damped altitude drop.
fn move_flying(
    species: &SpeciesSpec,
    reserves: &MagicReserves,
    inputs: &FlightInputs,
    state: &mut FlightState,
    velocity: &mut Vec3,
    out: &mut FlightOutputs,
    mut dbg: Option<&mut FlightStepDebug>,
) {
    apply_thrust(species, inputs, state, velocity, out, dbg.as_deref_mut());

    let motion = horizontal_motion_sq(inputs.position, state.last_horizontal);

    let forward = glide_forward_term(reserves.level().get(), motion) + GLIDE_DROP;
    let drop = gravity_drop_term(
        species.gravity_modifier(inputs.gravity_attribute_scale),
        motion,
    );
    velocity.y -= drop;

    let (dx, dz) = planar_push(inputs.yaw_degrees, forward);
    velocity.x += dx;
    velocity.z += dz;

    if let Some(d) = dbg {
        d.horizontal_motion_sq = motion;
        d.glide_forward = forward;
        d.gravity_drop = drop;
    }
}

/// One flap impulse. A sneak-transition resets the decaying thrust scale to
/// full and sounds the wings; vertical response is asymmetric, favoring
/// upward-facing thrust.
fn apply_thrust(
    species: &SpeciesSpec,
    inputs: &FlightInputs,
    state: &mut FlightState,
    velocity: &mut Vec3,
    out: &mut FlightOutputs,
    dbg: Option<&mut FlightStepDebug>,
) {
    if inputs.sneaking_changed && inputs.sneaking {
        state.thrust_scale = 1.0;
        out.sounds.push(wing_cue(species));
    } else {
        state.thrust_scale *= THRUST_DECAY;
    }

    let strength = thrust_strength(state.thrust_scale);
    let direction = inputs.look_direction.normalize_or_zero() * strength;

    velocity.x += direction.x;
    velocity.z += direction.z;
    velocity.y += direction.y * 2.45 + direction.y.abs() * 10.0;

    if inputs.sneaking {
        velocity.y += 0.4 - 0.25;
        if inputs.sneaking_changed {
            velocity.y += 0.75;
        }
    } else {
        velocity.y -= 0.1;
    }

    if let Some(d) = dbg {
        d.thrust_strength = strength;
    }
}

/// Rain turbulence: a random glancing gust, with rare multiplicative spikes.
/// Both 1/30 rolls are independent and may stack; the thunder kick and the
/// wind-rush cue read the pre-cap magnitude, while velocity only ever sees
/// the capped one.
fn apply_turbulence<R: Rng + ?Sized>(
    inputs: &FlightInputs,
    velocity: &mut Vec3,
    out: &mut FlightOutputs,
    rng: &mut R,
    dbg: Option<&mut FlightStepDebug>,
) {
    debug_assert!(
        (0.0..=1.0).contains(&inputs.rain_gradient),
        "rain gradient out of range: {}",
        inputs.rain_gradient
    );

    let glance = 360.0 * rng.gen::<f32>();
    let mut forward = 0.015 * rng.gen::<f32>() * inputs.rain_gradient;

    if rng.gen_range(0..30) == 0 {
        forward *= 10.0;
    }
    if rng.gen_range(0..30) == 0 {
        forward *= 10.0;
    }
    if rng.gen_range(0..40) == 0 {
        forward *= 100.0;
    }

    let mut kick = 0.0;
    if inputs.thundering && rng.gen_range(0..60) == 0 {
        kick = forward * 3.0;
        velocity.y += kick;
    }

    if forward >= 1.0 {
        out.sounds.push(SoundCue {
            event: SoundEventId::WindRush,
            category: SoundCategory::Ambient,
            volume: 3.0,
            pitch: 1.0,
        });
    }

    let raw = forward;
    if forward > 4.0 {
        forward = 4.0;
    }

    let (dx, dz) = planar_push(inputs.yaw_degrees + glance, forward);
    velocity.x += dx;
    velocity.z += dz;

    if let Some(d) = dbg {
        d.turb_glance = glance;
        d.turb_forward_raw = raw;
        d.turb_forward = forward;
        d.turb_lightning_kick = kick;
    }
}
