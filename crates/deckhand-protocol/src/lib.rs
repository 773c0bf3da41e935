//! Boundary types for the Deckhand card game core.
//!
//! Everything the core accepts from, or hands back to, the excluded
//! transport/lobby layers is defined here: identity newtypes, the card
//! value objects, the inbound [`Command`] set, and the outbound
//! [`ServerEvent`] snapshots.
//!
//! The core never exposes transport-specific objects — actors and rooms
//! are always referred to by the opaque [`PlayerId`] / [`RoomId`]
//! handles defined in this crate.

mod command;
mod snapshot;
mod types;

pub use command::Command;
pub use snapshot::{HandSnapshot, LobbyEntry, PlayerSummary, RoomSnapshot, ServerEvent};
pub use types::{Card, CardId, CardKind, Color, Direction, PlayerId, RoomId, RoomStatus};
