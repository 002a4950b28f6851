use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a player across replays (the 64-bit platform account id).
///
/// Serializes as the bare number, so maps keyed by it render with numeric keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
