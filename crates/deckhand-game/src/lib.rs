//! Game rules core for Deckhand: deck construction, turn order, move
//! validation, and the authoritative per-room [`Table`] state machine.
//!
//! Everything in this crate is synchronous and side-effect free apart
//! from the table's own RNG. Serialization of concurrent access is the
//! room layer's job — a `Table` is only ever touched by the single room
//! actor that owns it.
//!
//! # Key pieces
//!
//! - [`deck`] — the fixed 108-card population and unbiased shuffling
//! - [`TurnEngine`] — seat pointer + direction, advance/skip/reverse
//! - [`rules`] — pure legality checks, reusable without mutation
//! - [`Table`] — join/leave/start/play/draw as atomic transactions
//! - [`GameError`] — the rule-violation taxonomy

pub mod deck;
mod error;
pub mod rules;
mod table;
mod turn;

pub use error::GameError;
pub use table::{LeaveOutcome, PlayOutcome, Table, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
pub use turn::TurnEngine;
