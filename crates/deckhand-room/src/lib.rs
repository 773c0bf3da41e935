//! Room lifecycle for Deckhand.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! [`deckhand_game::Table`]. All mutations of a room's state flow
//! through its mailbox, so joins, starts, plays, and draws against the
//! same room are applied as a strict sequence with no interleaving.
//! Rooms are independent of each other and process in parallel.
//!
//! # Key types
//!
//! - [`Registry`] — creates rooms, routes actors, prunes empty rooms
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomConfig`] — per-room settings (player limit)
//! - [`RoomError`] — routing failures plus wrapped rule violations

mod config;
mod error;
mod registry;
mod room;

pub use config::RoomConfig;
pub use error::RoomError;
pub use registry::{Registry, lobby};
pub use room::{PlayerSender, RoomHandle, RoomInfo};
