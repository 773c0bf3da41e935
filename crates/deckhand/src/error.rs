//! Unified error type for the Deckhand facade.

use deckhand_game::GameError;
use deckhand_room::RoomError;

/// Top-level error that wraps the crate-specific errors.
///
/// Callers of the `deckhand` meta-crate deal with this single type;
/// `#[from]` generates the conversions so `?` works across layers.
#[derive(Debug, thiserror::Error)]
pub enum DeckhandError {
    /// A routing error (unknown room, closed mailbox) or a rule
    /// violation surfaced through a room.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A rule violation from direct use of the game layer.
    #[error(transparent)]
    Game(#[from] GameError),
}

impl DeckhandError {
    /// The rule violation behind this error, if that is what it is.
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            DeckhandError::Room(RoomError::Game(err)) => Some(err),
            DeckhandError::Game(err) => Some(err),
            DeckhandError::Room(_) => None,
        }
    }
}
