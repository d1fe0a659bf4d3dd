use bevy_math::{Vec2, Vec3};

use crate::capability::FlightCapability;
use crate::sounds::SoundCue;

/// Per-tick snapshot the host decodes for one character. Read-only during
/// the step; the host owns how these values are sampled from its world.
#[derive(Debug, Clone, Default)]
pub struct FlightInputs {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Facing yaw in degrees, host convention (0 faces +Z).
    pub yaw_degrees: f32,
    /// Unit facing vector including pitch; drives the thrust impulse.
    pub look_direction: Vec3,
    /// The host's authoritative flying flag coming into this tick.
    pub flying: bool,
    /// Host grants flight regardless of capability (server toggle etc.).
    pub allow_flight: bool,
    pub grounded: bool,
    /// Solid contact directly above the head, host-sampled. Only consulted
    /// for inverted-gravity species, where it redefines "grounded".
    pub solid_above_head: bool,
    pub sneaking: bool,
    /// Sneak flag flipped since the previous tick.
    pub sneaking_changed: bool,
    /// Rendered in the crouched pose (may lag the sneak flag).
    pub in_sneaking_pose: bool,
    /// Hitbox height of the current pose and of the standing pose.
    pub pose_height: f32,
    pub standing_height: f32,
    pub sprinting: bool,
    /// Fall-flying on a glider; suppresses powered flight.
    pub gliding: bool,
    pub mounted: bool,
    pub horizontal_collision: bool,
    pub vertical_collision: bool,
    pub touching_liquid: bool,
    pub raining: bool,
    pub thundering: bool,
    pub rain_gradient: f32,
    /// True only on the locally-simulated view. Presentation cues gated on
    /// this must never change authoritative outcomes.
    pub is_client_view: bool,
    /// Attribute-driven gravity scale; `None` while the host's attribute set
    /// is still initializing.
    pub gravity_attribute_scale: Option<f32>,
}

/// Mutations the host applies after the step completes. Nothing outside the
/// step observes a partially-applied tick.
#[derive(Debug, Clone, Default)]
pub struct FlightOutputs {
    pub velocity: Vec3,
    /// Reconciled authoritative flying flag.
    pub flying: bool,
    /// Redefined grounded state (inverted-gravity species only).
    pub grounded: Option<bool>,
    pub pose_reset: Option<PoseReset>,
    pub reset_fall_distance: bool,
    /// Exhaustion cost for the host's food system, accumulated this tick.
    pub exhaustion: f32,
    pub sounds: Vec<SoundCue>,
}

/// Snap out of the crouched pose, shifting vertically by the pose-height
/// delta so the hitbox stays anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseReset {
    pub lift: f32,
}

/// Tick-persistent flight state, exclusively owned by one character's
/// integrator. Created on attach, destroyed with the character, persisted
/// as a unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightState {
    /// Ticks since the last flight engagement; gates the resource drain.
    pub ticks_in_air: u32,
    /// Decaying flap-impulse magnitude, reset to 1 on a sneak-transition.
    pub thrust_scale: f32,
    /// Horizontal anchor of the previous tick's position. No vertical
    /// component is stored.
    pub last_horizontal: Vec2,
    pub is_flying_survival: bool,
    pub is_flying_either: bool,
}

impl FlightState {
    /// Powered survival flight. Gliding and riding suppress it even while
    /// the survival flag is set.
    pub fn is_flying(&self, gliding: bool, mounted: bool) -> bool {
        self.is_flying_survival && !gliding && !mounted
    }
}

/// Per-tick telemetry filled by `step_flight_dbg`.
#[derive(Debug, Clone, Default)]
pub struct FlightStepDebug {
    pub capability: FlightCapability,
    pub override_mode: bool,
    // Motion detection
    pub horizontal_motion_sq: f32,
    pub total_motion_sq: f32,
    pub engaged: bool,
    // Resource economy
    pub drained_mana: f32,
    pub exhaustion: f32,
    // Thrust and glide breakdown
    pub thrust_scale: f32,
    pub thrust_strength: f32,
    pub glide_forward: f32,
    pub gravity_drop: f32,
    // Turbulence breakdown
    pub turb_glance: f32,
    /// Gust magnitude before the cap; the wind-rush cue threshold reads this.
    pub turb_forward_raw: f32,
    /// Gust magnitude actually applied to velocity (capped at 4).
    pub turb_forward: f32,
    pub turb_lightning_kick: f32,
    pub wing_cue: bool,
}
