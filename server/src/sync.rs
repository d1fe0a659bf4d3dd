use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;
use uuid::Uuid;

use protocol::ServerToClient;
use sim::FlightRecord;

use crate::characters::{CharacterId, Flight, HostState, Reserves};
use crate::config::Config;
use crate::systems::TickCount;

/// Outbound message queue at the replication boundary. An external
/// transport drains it between ticks; the lock is never held across one.
#[derive(Resource, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<ServerToClient>>>);

impl Outbox {
    pub fn push(&self, message: ServerToClient) {
        self.0.lock().push(message);
    }

    pub fn drain(&self) -> Vec<ServerToClient> {
        std::mem::take(&mut *self.0.lock())
    }
}

/// Flight-state snapshots keyed by character, shared with whatever owns the
/// save file.
#[derive(Resource, Clone, Default)]
pub struct FlightSaves(Arc<Mutex<HashMap<Uuid, FlightRecord>>>);

impl FlightSaves {
    pub fn store(&self, character: Uuid, record: FlightRecord) {
        self.0.lock().insert(character, record);
    }

    pub fn get(&self, character: &Uuid) -> Option<FlightRecord> {
        self.0.lock().get(character).cloned()
    }
}

/// Replicate bars that changed since the last sync. Observers only ever see
/// values snapshotted between ticks.
pub fn sync_reserves(mut q: Query<(&CharacterId, &mut Reserves)>, outbox: Res<Outbox>) {
    for (id, mut reserves) in &mut q {
        if !reserves.0.take_dirty() {
            continue;
        }
        let r = &reserves.0;
        outbox.push(ServerToClient::ReservesSync {
            character: id.0,
            energy: r.energy().get(),
            exertion: r.exertion().get(),
            mana: r.mana().get(),
            xp: r.xp().get(),
            level: r.level().get(),
        });
    }
}

/// Replicate flight-flag transitions (and each character's initial state).
pub fn sync_flight(
    q: Query<(&CharacterId, &Flight)>,
    outbox: Res<Outbox>,
    mut last: Local<HashMap<Uuid, bool>>,
) {
    for (id, flight) in &q {
        let flying = flight.0.is_flying_survival;
        if last.insert(id.0, flying) != Some(flying) {
            outbox.push(ServerToClient::FlightSync {
                character: id.0,
                is_flying: flying,
                ticks_in_air: flight.0.ticks_in_air,
            });
        }
    }
}

/// Capture every character's flight record on the configured cadence.
pub fn autosave_flight(
    q: Query<(&CharacterId, &Flight)>,
    saves: Res<FlightSaves>,
    cfg: Res<Config>,
    ticks: Res<TickCount>,
) {
    if cfg.autosave_ticks == 0 || ticks.0 % cfg.autosave_ticks != 0 {
        return;
    }
    for (id, flight) in &q {
        saves.store(id.0, FlightRecord::capture(&flight.0));
    }
}

/// Apply a saved record to a character and flag the host to recompute its
/// hitbox dimensions.
pub fn restore_character(record: &FlightRecord, flight: &mut Flight, host: &mut HostState) {
    let effects = record.apply(&mut flight.0);
    host.dimensions_dirty = effects.recalculate_dimensions;
    host.inputs.flying = flight.0.is_flying_survival;
}
