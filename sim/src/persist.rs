use serde::{Deserialize, Serialize};

use crate::flight_physics::FlightState;

/// Minimal persisted flight state. Field names are stable wire names;
/// missing fields restore to the grounded defaults and unknown fields are
/// ignored, so old and partial records keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightRecord {
    pub is_flying_survival: bool,
    pub is_flying_either: bool,
    pub ticks_in_air: u32,
}

/// Follow-up work the host owes after a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreEffects {
    /// Hitbox dimensions depend on flight/pose state and must be recomputed.
    pub recalculate_dimensions: bool,
}

impl FlightRecord {
    pub fn capture(state: &FlightState) -> Self {
        Self {
            is_flying_survival: state.is_flying_survival,
            is_flying_either: state.is_flying_either,
            ticks_in_air: state.ticks_in_air,
        }
    }

    pub fn apply(&self, state: &mut FlightState) -> RestoreEffects {
        state.is_flying_survival = self.is_flying_survival;
        state.is_flying_either = self.is_flying_either;
        state.ticks_in_air = self.ticks_in_air;

        RestoreEffects {
            recalculate_dimensions: true,
        }
    }
}
