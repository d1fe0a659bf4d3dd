use bevy::prelude::*;
use sim::{
    CharacterMode, FlightInputs, FlightPredicate, FlightState, MagicReserves, SpeciesSpec,
};
use uuid::Uuid;

use crate::config::Config;
use crate::sync::Outbox;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterId(pub Uuid);

#[derive(Component, Debug, Clone)]
pub struct Species(pub SpeciesSpec);

#[derive(Component, Debug, Clone, Copy)]
pub struct Mode(pub CharacterMode);

#[derive(Component, Debug, Clone, Default)]
pub struct Reserves(pub MagicReserves);

#[derive(Component, Debug, Clone, Default)]
pub struct Flight(pub FlightState);

/// An active effect that takes over the flight eligibility check while it
/// lasts. `None` falls through to the species trait.
#[derive(Component, Default)]
pub struct ActiveEffect(pub Option<Box<dyn FlightPredicate>>);

/// Host attribute set. It may lag character construction; gravity lookups
/// fall back to the species base while it is absent.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Attributes(pub Option<AttributeSet>);

#[derive(Debug, Clone, Copy)]
pub struct AttributeSet {
    pub gravity_scale: f32,
}

/// Host-side mirror of one character: the per-tick input snapshot the world
/// systems refresh before the flight step, and the fields the step writes
/// back through once it completes. Nothing reads these mid-tick.
#[derive(Component, Debug, Clone, Default)]
pub struct HostState {
    pub inputs: FlightInputs,
    pub prev_sneaking: bool,
    pub fall_distance: f32,
    /// Accumulated exhaustion owed to the host's food system.
    pub exhaustion: f32,
    /// Set after a restore; the host recomputes hitbox dimensions.
    pub dimensions_dirty: bool,
}

#[derive(Bundle)]
pub struct CharacterBundle {
    pub id: CharacterId,
    pub species: Species,
    pub mode: Mode,
    pub reserves: Reserves,
    pub flight: Flight,
    pub effect: ActiveEffect,
    pub attributes: Attributes,
    pub host: HostState,
}

impl CharacterBundle {
    pub fn new(id: Uuid, species: SpeciesSpec, mode: CharacterMode) -> Self {
        Self {
            id: CharacterId(id),
            species: Species(species),
            mode: Mode(mode),
            reserves: Reserves::default(),
            flight: Flight::default(),
            effect: ActiveEffect::default(),
            attributes: Attributes::default(),
            host: HostState::default(),
        }
    }

    pub fn with_level_cap(mut self, cap: u32) -> Self {
        self.reserves = Reserves(MagicReserves::new(cap));
        self
    }
}

/// Attach a character to the simulation, honoring the configured level cap
/// and announcing the join on the outbox.
pub fn spawn_character(
    world: &mut World,
    spec: SpeciesSpec,
    mode: CharacterMode,
) -> (Entity, Uuid) {
    let cap = world
        .get_resource::<Config>()
        .map(|cfg| cfg.level_cap)
        .unwrap_or(sim::DEFAULT_LEVEL_CAP);

    let id = Uuid::new_v4();
    let entity = world
        .spawn(CharacterBundle::new(id, spec, mode).with_level_cap(cap))
        .id();

    if let Some(outbox) = world.get_resource::<Outbox>() {
        outbox.push(protocol::ServerToClient::JoinAck { character: id });
    }

    (entity, id)
}
