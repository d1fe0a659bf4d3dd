use crate::species_specs::SpeciesSpec;

/// How a character is being simulated this tick. Creative and Spectator are
/// unrestricted override modes; the flight state machine only runs for
/// Survival characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterMode {
    Survival,
    Creative,
    Spectator,
}

impl CharacterMode {
    pub fn is_override(self) -> bool {
        !matches!(self, CharacterMode::Survival)
    }
}

/// An active effect may take over the flight eligibility decision while it
/// lasts. A terminated effect falls through to the species default.
pub trait FlightPredicate: Send + Sync {
    fn is_terminated(&self) -> bool;
    fn check_can_fly(&self) -> bool;
}

/// Why (or whether) flight is available this tick. Resolved fresh every
/// tick and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightCapability {
    #[default]
    Denied,
    GrantedByOverride,
    GrantedByEffect,
    GrantedBySpecies,
}

impl FlightCapability {
    pub fn is_granted(self) -> bool {
        !matches!(self, FlightCapability::Denied)
    }
}

/// Short-circuit resolution: override mode, then a live effect exposing the
/// flight predicate (its answer is authoritative either way), then the
/// species trait. Pure function of current state.
pub fn resolve_flight_capability(
    mode: CharacterMode,
    effect: Option<&dyn FlightPredicate>,
    species: &SpeciesSpec,
) -> FlightCapability {
    if mode.is_override() {
        return FlightCapability::GrantedByOverride;
    }

    if let Some(effect) = effect {
        if !effect.is_terminated() {
            return if effect.check_can_fly() {
                FlightCapability::GrantedByEffect
            } else {
                FlightCapability::Denied
            };
        }
    }

    if species.can_fly_innately() {
        FlightCapability::GrantedBySpecies
    } else {
        FlightCapability::Denied
    }
}
