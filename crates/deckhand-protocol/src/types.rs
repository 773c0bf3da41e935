//! Identity handles, card value objects, and room status.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque handle for a connected actor.
///
/// The transport layer mints one per connection and tags every inbound
/// command with it; the core never sees the connection itself.
///
/// `#[serde(transparent)]` serializes this as the bare number, so a
/// `PlayerId(42)` is just `42` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Opaque handle for a room (one game instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// Unique identity of a single physical card.
///
/// Two Red 5s in the same deck carry distinct ids, so clients can name
/// exactly which copy they are playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// A card's color. `Wild` is only ever carried by wild cards; a color
/// chosen for a played wild is always one of the four concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl Color {
    /// The four playable colors, in deck-building order.
    pub const CONCRETE: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Returns `true` for the four real colors (everything but `Wild`).
    pub fn is_concrete(self) -> bool {
        !matches!(self, Color::Wild)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Wild => "Wild",
        };
        write!(f, "{s}")
    }
}

/// What a card does. A closed set — effect dispatch matches on this
/// tag rather than on subclassed card types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

/// A single card: flat, immutable value object.
///
/// `number` is `Some` iff `kind` is [`CardKind::Number`] (0–9).
/// Ownership is tracked by whichever pile or hand currently holds the
/// value; a card lives in exactly one place at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub kind: CardKind,
    pub number: Option<u8>,
}

impl Card {
    /// A numbered card (0–9) in a concrete color.
    pub fn number(id: CardId, color: Color, number: u8) -> Self {
        Self {
            id,
            color,
            kind: CardKind::Number,
            number: Some(number),
        }
    }

    /// A colored action card (Skip / Reverse / DrawTwo).
    pub fn action(id: CardId, color: Color, kind: CardKind) -> Self {
        Self {
            id,
            color,
            kind,
            number: None,
        }
    }

    /// A wild card (Wild / WildDrawFour). Carries the `Wild` color
    /// until a color is chosen at play time.
    pub fn wild(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            color: Color::Wild,
            kind,
            number: None,
        }
    }

    /// Returns `true` for Wild and WildDrawFour.
    pub fn is_wild(&self) -> bool {
        matches!(self.kind, CardKind::Wild | CardKind::WildDrawFour)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Number => {
                write!(f, "{} {}", self.color, self.number.unwrap_or(0))
            }
            CardKind::Wild | CardKind::WildDrawFour => write!(f, "{:?}", self.kind),
            _ => write!(f, "{} {:?}", self.color, self.kind),
        }
    }
}

// ---------------------------------------------------------------------------
// Turn direction and room status
// ---------------------------------------------------------------------------

/// Traversal direction through the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// The lifecycle state of a room.
///
/// ```text
/// Waiting → InProgress → Finished
/// ```
///
/// - **Waiting**: accepting joins, game not started.
/// - **InProgress**: game running; joins rejected.
/// - **Finished**: someone won, or the player count fell below two
///   mid-game. The room lingers until its last player leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Waiting,
    InProgress,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(self) -> bool {
        matches!(self, RoomStatus::Waiting)
    }

    /// Returns `true` if a game is actively running.
    pub fn is_active(self) -> bool {
        matches!(self, RoomStatus::InProgress)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Waiting => write!(f, "Waiting"),
            RoomStatus::InProgress => write!(f, "InProgress"),
            RoomStatus::Finished => write!(f, "Finished"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
