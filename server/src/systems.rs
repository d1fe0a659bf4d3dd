use bevy_ecs::prelude::*;
use rand::rngs::StdRng;
use tracing::trace;

use sim::{resolve_flight_capability, step_flight};

use crate::characters::{
    ActiveEffect, Attributes, CharacterId, Flight, HostState, Mode, Reserves, Species,
};
use crate::sync::Outbox;

/// World weather snapshot shared by every character this tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct Weather {
    pub raining: bool,
    pub thundering: bool,
    pub rain_gradient: f32,
}

/// Deterministic RNG for turbulence, seeded from config.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

/// Monotonic tick counter for cadenced systems.
#[derive(Resource, Default)]
pub struct TickCount(pub u64);

/// Advance every character by one flight tick: resolve capability, run the
/// step, apply the outputs to the host mirror, forward sound cues. The
/// capability resolution strictly precedes the step, which strictly
/// precedes everything the host observes.
#[allow(clippy::type_complexity)]
pub fn tick_characters(
    mut q: Query<(
        &CharacterId,
        &Species,
        &Mode,
        &ActiveEffect,
        &Attributes,
        &mut Reserves,
        &mut Flight,
        &mut HostState,
    )>,
    weather: Res<Weather>,
    mut rng: ResMut<SimRng>,
    mut ticks: ResMut<TickCount>,
    outbox: Res<Outbox>,
) {
    ticks.0 += 1;

    for (id, species, mode, effect, attributes, mut reserves, mut flight, mut host) in &mut q {
        let mut inputs = host.inputs.clone();
        inputs.sneaking_changed = inputs.sneaking != host.prev_sneaking;
        inputs.raining = weather.raining;
        inputs.thundering = weather.thundering;
        inputs.rain_gradient = weather.rain_gradient;
        inputs.gravity_attribute_scale = attributes.0.map(|a| a.gravity_scale);

        let capability = resolve_flight_capability(mode.0, effect.0.as_deref(), &species.0);
        let out = step_flight(
            &species.0,
            capability,
            &mut reserves.0,
            &inputs,
            &mut flight.0,
            &mut rng.0,
        );

        // The step completed; only now does the host see any of it.
        host.prev_sneaking = inputs.sneaking;
        host.inputs.velocity = out.velocity;
        host.inputs.flying = out.flying;
        if let Some(grounded) = out.grounded {
            host.inputs.grounded = grounded;
        }
        if let Some(pose) = out.pose_reset {
            host.inputs.position.y += pose.lift;
            host.inputs.in_sneaking_pose = false;
        }
        if out.reset_fall_distance {
            host.fall_distance = 0.0;
        }
        host.exhaustion += out.exhaustion;

        for cue in out.sounds {
            trace!(character = %id.0, event = ?cue.event, "sound cue");
            outbox.push(sound_message(cue));
        }
    }
}

fn sound_message(cue: sim::SoundCue) -> protocol::ServerToClient {
    protocol::ServerToClient::Sound {
        event: match cue.event {
            sim::SoundEventId::WingFlap => protocol::SoundEvent::WingFlap,
            sim::SoundEventId::ChitinBuzz => protocol::SoundEvent::ChitinBuzz,
            sim::SoundEventId::WindRush => protocol::SoundEvent::WindRush,
        },
        channel: match cue.category {
            sim::SoundCategory::Player => protocol::SoundChannel::Player,
            sim::SoundCategory::Ambient => protocol::SoundChannel::Ambient,
        },
        volume: cue.volume,
        pitch: cue.pitch,
    }
}

/// Minimal host motion: characters advance by their velocity once per tick.
/// A full world simulation would also resolve collisions here and set the
/// collision/liquid flags on the snapshot.
pub fn integrate_host_motion(mut q: Query<&mut HostState>) {
    for mut host in &mut q {
        let velocity = host.inputs.velocity;
        host.inputs.position += velocity;
    }
}
