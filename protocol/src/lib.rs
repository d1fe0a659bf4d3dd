//! Wire messages for the replication boundary. This crate defines shapes
//! and encoding only; the transport that carries them lives elsewhere.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("message encode failed: {0}")]
    Encode(#[source] bincode::Error),
    #[error("message decode failed: {0}")]
    Decode(#[source] bincode::Error),
}

/// Wire copy of the sim's sound identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    WingFlap,
    ChitinBuzz,
    WindRush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundChannel {
    Player,
    Ambient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputTick {
    pub tick: u64,
    pub sneaking: bool,
    pub sprinting: bool,
    pub jumping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientToServer {
    Hello { name: Option<String> },
    InputTick(InputTick),
    /// Request to set or clear survival flight; the server re-checks
    /// capability before honoring it.
    FlightRequest { flying: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerToClient {
    JoinAck {
        character: Uuid,
    },
    /// Sent only when at least one bar changed since the last sync.
    ReservesSync {
        character: Uuid,
        energy: f32,
        exertion: f32,
        mana: f32,
        xp: f32,
        level: u32,
    },
    FlightSync {
        character: Uuid,
        is_flying: bool,
        ticks_in_air: u32,
    },
    Sound {
        event: SoundEvent,
        channel: SoundChannel,
        volume: f32,
        pitch: f32,
    },
    ItemsDislodged {
        character: Uuid,
        items: Vec<(String, u32)>,
    },
}

pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, ProtocolError> {
    bincode::serialize(msg).map_err(ProtocolError::Encode)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    bincode::deserialize(bytes).map_err(ProtocolError::Decode)
}
