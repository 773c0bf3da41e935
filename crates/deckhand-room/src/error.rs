//! Error types for the room layer.

use deckhand_game::GameError;
use deckhand_protocol::{PlayerId, RoomId};

/// Errors that can occur when routing an operation to a room.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The actor is already in a room; one room at a time.
    #[error("player {0} already in room {1}")]
    AlreadyInRoom(PlayerId, RoomId),

    /// The room's command channel is full or closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    /// A game rule rejected the operation.
    #[error(transparent)]
    Game(#[from] GameError),
}
