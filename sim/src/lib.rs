//! Per-character flight simulation shared by the server and tools.
//!
//! This crate intentionally avoids any Bevy app types. It exposes a
//! tick-synchronous core the host drives exactly once per simulation step:
//! resolve flight capability, run the flight step, apply the returned
//! mutations. All state the step touches is passed in explicitly.

pub use bevy_math::{Vec2, Vec3};

mod reserves;
pub use reserves::{Bar, Level, MagicReserves, DEFAULT_LEVEL_CAP};

mod species_specs;
pub use species_specs::species;
pub use species_specs::{GravitySign, SpeciesSpec};

mod capability;
pub use capability::{
    resolve_flight_capability, CharacterMode, FlightCapability, FlightPredicate,
};

mod sounds;
pub use sounds::{SoundCategory, SoundCue, SoundEventId};

pub mod flight_physics;
pub use flight_physics::{
    step_flight, step_flight_dbg, update_flight_stat, FlightInputs, FlightOutputs, FlightState,
    FlightStepDebug, PoseReset,
};

mod strike;
pub use strike::{on_struck, DislodgedItem, StrikeTarget};

mod persist;
pub use persist::{FlightRecord, RestoreEffects};
