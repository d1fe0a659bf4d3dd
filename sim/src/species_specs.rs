use serde::{Deserialize, Serialize};

use crate::sounds::SoundEventId;

/// Direction gravity pulls a character. Inverted species treat the ceiling
/// as their floor; collision and pose logic mirror accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravitySign {
    Normal,
    Inverted,
}

/// Data-driven physics profile for a character species. Selected by data
/// rather than subclassing; all species share one integrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSpec {
    pub innate_flight: bool,
    pub gravity: GravitySign,
    /// Baseline gravity strength before host attribute scaling.
    pub gravity_modifier_base: f32,
    /// Sound played on a wing flap.
    pub wing_sound: SoundEventId,
}

impl SpeciesSpec {
    pub fn can_fly_innately(&self) -> bool {
        self.innate_flight
    }

    pub fn is_gravity_inverted(&self) -> bool {
        self.gravity == GravitySign::Inverted
    }

    /// Effective gravity modifier. The host's attribute set may not exist yet
    /// during character construction; absent attributes fall back to the
    /// unscaled base rather than faulting.
    pub fn gravity_modifier(&self, attribute_scale: Option<f32>) -> f32 {
        self.gravity_modifier_base * attribute_scale.unwrap_or(1.0)
    }
}

pub mod species {
    use super::*;

    /// Winged flier with the stock flap sound.
    pub fn skylark_spec() -> SpeciesSpec {
        SpeciesSpec {
            innate_flight: true,
            gravity: GravitySign::Normal,
            gravity_modifier_base: 1.0,
            wing_sound: SoundEventId::WingFlap,
        }
    }

    /// Insect-winged flier; same physics, different wing sound.
    pub fn mothwing_spec() -> SpeciesSpec {
        SpeciesSpec {
            innate_flight: true,
            gravity: GravitySign::Normal,
            gravity_modifier_base: 1.0,
            wing_sound: SoundEventId::ChitinBuzz,
        }
    }

    /// Ground-bound species; flies only under an effect or override mode.
    pub fn earthbound_spec() -> SpeciesSpec {
        SpeciesSpec {
            innate_flight: false,
            gravity: GravitySign::Normal,
            gravity_modifier_base: 1.0,
            wing_sound: SoundEventId::WingFlap,
        }
    }

    /// Ceiling-walker: gravity pulls upward and "grounded" means solid
    /// contact above the head.
    pub fn gloamer_spec() -> SpeciesSpec {
        SpeciesSpec {
            innate_flight: true,
            gravity: GravitySign::Inverted,
            gravity_modifier_base: 0.85,
            wing_sound: SoundEventId::WingFlap,
        }
    }
}
