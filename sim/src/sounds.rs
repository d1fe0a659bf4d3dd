use serde::{Deserialize, Serialize};

/// Identifier of a fire-and-forget sound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEventId {
    WingFlap,
    ChitinBuzz,
    WindRush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCategory {
    Player,
    Ambient,
}

/// Outbound sound descriptor. The host's audio/replication layer consumes
/// these after the tick completes; emitting one has no return value and no
/// effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    pub event: SoundEventId,
    pub category: SoundCategory,
    pub volume: f32,
    pub pitch: f32,
}
