//! # Deckhand
//!
//! Server-authoritative core for a real-time multiplayer turn-based
//! card game. Deckhand owns the canonical state of every active room,
//! validates every proposed move, and serializes all mutations of a
//! room behind that room's actor — transport, lobby REST, and
//! presentation layers sit outside and talk to the [`Engine`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use deckhand::prelude::*;
//! use tokio::sync::mpsc;
//!
//! # async fn demo() -> Result<(), DeckhandError> {
//! let engine = Engine::new();
//! let room = engine.create_room("kitchen table", 4).await;
//!
//! let (tx, mut rx) = mpsc::unbounded_channel();
//! engine.join_room(room, PlayerId(1), "ada".into(), tx).await?;
//! // ... join more players, then:
//! engine.start_game(room).await?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;

pub use engine::{Dispatch, Engine};
pub use error::DeckhandError;

pub mod prelude {
    //! Everything a transport adapter typically needs.

    pub use crate::{Dispatch, DeckhandError, Engine};
    pub use deckhand_game::{GameError, PlayOutcome, Table};
    pub use deckhand_protocol::{
        Card, CardId, CardKind, Color, Command, Direction, HandSnapshot, LobbyEntry, PlayerId,
        PlayerSummary, RoomId, RoomSnapshot, RoomStatus, ServerEvent,
    };
    pub use deckhand_room::{PlayerSender, Registry, RoomError};
}
