//! Seam to the replay decoder that turns a recording into typed events.
//!
//! The analyzer only needs the "player eliminated" subscription, so that is all
//! the seam exposes. [`KillFeedDecoder`] is the bundled implementation.

pub mod kill_feed_decoder;

pub use kill_feed_decoder::{KillFeedDecoder, KillFeedDecoderFactory};

use crate::data_processing::equipment::EquipmentType;
use crate::data_processing::player_id::PlayerId;

use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use thiserror::Error;

/// The player on the receiving end of an elimination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Victim {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<EquipmentType>,
}

/// A player was eliminated. `victim` is `None` when the decoder could not
/// resolve who died.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEliminated {
    #[serde(default)]
    pub victim: Option<Victim>,
}

/// Callback registered for elimination events.
pub type EliminationHandler<'h> = Box<dyn FnMut(&PlayerEliminated) + 'h>;

/// Errors reported by a decoder while walking a stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("malformed event on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Stream(String),
}

/// A decoder bound to one byte stream.
///
/// The decoder is released when dropped; callers keep it in a scope that ends
/// on every exit path.
pub trait ReplayDecoder<'h> {
    /// Registers `handler` for every elimination found in the stream.
    fn on_player_eliminated(&mut self, handler: EliminationHandler<'h>);

    /// Decodes the whole stream, dispatching events as they are found.
    fn parse_to_end(&mut self) -> Result<(), DecodeError>;
}

/// Creates decoders. Shared by every worker, hence `Send + Sync`.
pub trait DecoderFactory: Send + Sync {
    fn open<'h>(&self, source: Box<dyn Read + 'h>) -> Box<dyn ReplayDecoder<'h> + 'h>;
}
