//! Room configuration.

use deckhand_game::{MAX_PLAYERS, MIN_PLAYERS};
use serde::{Deserialize, Serialize};

/// Settings for a room instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Maximum players allowed. Clamped to the 2–6 range the game
    /// supports; the table enforces the same bound.
    pub max_players: usize,
}

impl RoomConfig {
    pub fn new(max_players: usize) -> Self {
        Self {
            max_players: max_players.clamp(MIN_PLAYERS, MAX_PLAYERS),
        }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { max_players: 4 }
    }
}
