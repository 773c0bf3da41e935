//! Outbound state: what the core hands back for distribution.
//!
//! Two views exist deliberately. [`RoomSnapshot`] is safe to broadcast
//! to every participant — it carries only public facts (card counts,
//! top card, whose turn). [`HandSnapshot`] lists actual cards and is
//! delivered only to the hand's owner. The core never builds a view
//! containing another player's hand contents.

use serde::{Deserialize, Serialize};

use crate::{Card, Color, Direction, PlayerId, RoomId, RoomStatus};

/// Public per-player summary inside a [`RoomSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub name: String,
    /// Number of cards in hand — never the cards themselves.
    pub cards: usize,
    pub is_current: bool,
}

/// Full public view of a room, suitable for broadcast to all members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub name: String,
    pub status: RoomStatus,
    pub direction: Direction,
    /// The actor whose turn it is. `None` before the game starts.
    pub current: Option<PlayerId>,
    /// Top of the discard pile. `None` before the game starts.
    pub top_card: Option<Card>,
    /// Color override while a played wild's choice is in effect.
    pub active_color: Option<Color>,
    /// Players in turn order.
    pub players: Vec<PlayerSummary>,
    pub draw_pile: usize,
    /// Set once the game finishes with a winner.
    pub winner: Option<PlayerId>,
}

/// Private view of one player's hand. Delivered only to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSnapshot {
    pub player: PlayerId,
    pub cards: Vec<Card>,
}

/// One row of the lobby listing: a waiting, not-full room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyEntry {
    pub room_id: RoomId,
    pub name: String,
    pub players: usize,
    pub max_players: usize,
}

/// An outbound message from a room to one player's connection handler.
///
/// `#[serde(tag = "type")]` keeps the wire shape flat:
/// `{ "type": "Room", "room_id": ..., ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Broadcast: the room's public state changed.
    Room(RoomSnapshot),
    /// Private: the recipient's own hand.
    Hand(HandSnapshot),
    /// Private: cards just drawn by the recipient.
    Drawn { cards: Vec<Card> },
}
