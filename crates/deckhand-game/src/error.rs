//! Rule-violation taxonomy for game operations.

use deckhand_protocol::{CardId, PlayerId, RoomStatus};

/// Why a game operation was rejected.
///
/// Every variant is an expected, non-fatal rule violation: the
/// operation fails cleanly, mutates nothing, and the reason is reported
/// back to the originating actor only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The acting player is not the current player.
    #[error("not your turn")]
    NotYourTurn,

    /// The named card is not in the acting player's hand.
    #[error("card {0} not in hand")]
    CardNotInHand(CardId),

    /// The discard pile is empty. Should not occur after a start.
    #[error("no top card on the discard pile")]
    NoTopCard,

    /// The card does not follow the current top card.
    #[error("card does not follow the top card")]
    DoesNotFollow,

    /// WildDrawFour is only legal when no other hand card matches the
    /// effective color.
    #[error("wild draw four not allowed while holding a matching color")]
    WildDrawFourRestricted,

    /// A wild card was played without choosing a concrete color.
    #[error("must choose a color for a wild card")]
    MustChooseColor,

    /// The room has no free seat.
    #[error("room is full")]
    RoomFull,

    /// The player already holds a seat in this room.
    #[error("player {0} already joined")]
    AlreadyJoined(PlayerId),

    /// The room's status does not allow this operation.
    #[error("operation not allowed while room is {0}")]
    WrongStatus(RoomStatus),

    /// A game needs at least two players to start.
    #[error("not enough players to start")]
    NotEnoughPlayers,

    /// No player with this identity is seated in the room.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}
