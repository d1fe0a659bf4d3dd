use std::collections::HashMap;

use bevy::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use sim::{resolve_flight_capability, update_flight_stat, DislodgedItem, StrikeTarget, Vec3};

use crate::characters::{ActiveEffect, CharacterId, Flight, HostState, Mode, Species};
use crate::sync::Outbox;

/// External request to set or clear survival flight for one character.
/// Honored only after a fresh capability check.
#[derive(Event, Debug, Clone, Copy)]
pub struct FlightRequest {
    pub character: Uuid,
    pub flying: bool,
}

/// External strike ("buck") against a character's position.
#[derive(Event, Debug, Clone, Copy)]
pub struct Strike {
    pub character: Uuid,
    pub position: Vec3,
}

/// A fruit-bearing structure placed below characters. Struck clusters drop
/// everything they hold once.
#[derive(Debug, Clone)]
pub struct FruitCluster {
    pub item: String,
    pub count: u32,
}

impl StrikeTarget for FruitCluster {
    fn on_struck(&mut self, _position: Vec3) -> Vec<DislodgedItem> {
        let dropped = std::mem::take(&mut self.count);
        if dropped == 0 {
            return Vec::new();
        }
        vec![DislodgedItem {
            id: self.item.clone(),
            count: dropped,
        }]
    }
}

/// Strikable occupants keyed by integer block position.
#[derive(Resource, Default)]
pub struct StrikeTargets(pub HashMap<[i32; 3], FruitCluster>);

impl StrikeTargets {
    /// The occupant of the cell directly below a world position.
    fn below(&mut self, position: Vec3) -> Option<&mut FruitCluster> {
        let key = [
            position.x.floor() as i32,
            position.y.floor() as i32 - 1,
            position.z.floor() as i32,
        ];
        self.0.get_mut(&key)
    }
}

#[allow(clippy::type_complexity)]
pub fn apply_flight_requests(
    mut requests: EventReader<FlightRequest>,
    mut q: Query<(
        &CharacterId,
        &Species,
        &Mode,
        &ActiveEffect,
        &mut Flight,
        &mut HostState,
    )>,
) {
    for request in requests.read() {
        for (id, species, mode, effect, mut flight, mut host) in &mut q {
            if id.0 != request.character {
                continue;
            }
            let capability = resolve_flight_capability(mode.0, effect.0.as_deref(), &species.0);
            let flying = update_flight_stat(
                &mut flight.0,
                capability,
                host.inputs.allow_flight,
                host.inputs.flying,
                request.flying,
            );
            host.inputs.flying = flying;
            debug!(character = %id.0, flying, "flight request applied");
        }
    }
}

pub fn apply_strikes(
    mut strikes: EventReader<Strike>,
    mut targets: ResMut<StrikeTargets>,
    outbox: Res<Outbox>,
    mut q: Query<(&CharacterId, &mut Flight)>,
) {
    for strike in strikes.read() {
        for (id, mut flight) in &mut q {
            if id.0 != strike.character {
                continue;
            }
            let below = targets
                .below(strike.position)
                .map(|t| t as &mut dyn StrikeTarget);
            let items = sim::on_struck(&mut flight.0, below, strike.position);
            if !items.is_empty() {
                info!(character = %id.0, dislodged = items.len(), "strike dislodged items");
                outbox.push(protocol::ServerToClient::ItemsDislodged {
                    character: id.0,
                    items: items.into_iter().map(|i| (i.id, i.count)).collect(),
                });
            }
        }
    }
}
