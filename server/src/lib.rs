//! Headless, tick-synchronous simulation host. One `App::update()` advances
//! every character by exactly one flight tick; the schedule runner paces
//! updates at the configured tick rate when running as a binary.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod args;
pub mod characters;
pub mod config;
pub mod events;
pub mod sync;
pub mod systems;

pub use args::Args;
pub use config::{load_config, Config};
pub use systems::{SimRng, TickCount, Weather};

pub fn build_server_app(cfg: Config) -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
        Duration::from_secs_f64(1.0 / cfg.tick_hz),
    )));

    app.insert_resource(SimRng(StdRng::seed_from_u64(cfg.rng_seed)))
        .init_resource::<Weather>()
        .init_resource::<TickCount>()
        .init_resource::<sync::Outbox>()
        .init_resource::<sync::FlightSaves>()
        .init_resource::<events::StrikeTargets>()
        .insert_resource(cfg);

    app.add_event::<events::FlightRequest>()
        .add_event::<events::Strike>();

    // Strict per-tick ordering: external requests land first, then the
    // flight step, then the host applies motion, then replication drains
    // what changed.
    app.add_systems(
        Update,
        (
            events::apply_flight_requests,
            events::apply_strikes,
            systems::tick_characters,
            systems::integrate_host_motion,
            sync::sync_reserves,
            sync::sync_flight,
            sync::autosave_flight,
        )
            .chain(),
    );

    app
}
