//! The engine: translates boundary commands into room operations.
//!
//! This is the seam the excluded transport layer plugs into. Inbound
//! actions arrive either through the typed methods or as a
//! [`Command`] via [`Engine::dispatch`]; outbound state flows back
//! through the per-player channels registered at join time, plus the
//! direct return values (drawn cards, play outcomes) for private
//! delivery to the caller.

use deckhand_game::PlayOutcome;
use deckhand_protocol::{Card, CardId, Color, Command, LobbyEntry, PlayerId, RoomId};
use deckhand_room::{PlayerSender, Registry};
use tokio::sync::Mutex;

use crate::DeckhandError;

/// Shared entry point over the room registry.
///
/// The mutex guards only the registry's own directory. Gameplay
/// commands clone the target room's handle under the lock and await
/// the room actor after releasing it, so rooms never serialize each
/// other. Membership changes (join, leave, disconnect) do run under
/// the lock — they must update the player-to-room index atomically
/// with the room's answer.
pub struct Engine {
    registry: Mutex<Registry>,
}

/// The result of a dispatched [`Command`].
#[derive(Debug)]
pub enum Dispatch {
    RoomCreated(RoomId),
    Joined,
    Started,
    Played(PlayOutcome),
    /// Drawn cards, for private delivery to the acting player.
    Drawn(Vec<Card>),
    Left,
    Lobby(Vec<LobbyEntry>),
}

impl Engine {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
        }
    }

    /// Creates a room. `max_players` is clamped to [2, 6].
    pub async fn create_room(&self, name: &str, max_players: usize) -> RoomId {
        self.registry.lock().await.create_room(name, max_players)
    }

    /// Seats an actor in a room. `sender` is their outbound channel
    /// for snapshots and private events.
    pub async fn join_room(
        &self,
        room_id: RoomId,
        actor: PlayerId,
        display_name: String,
        sender: PlayerSender,
    ) -> Result<(), DeckhandError> {
        self.registry
            .lock()
            .await
            .join_room(room_id, actor, display_name, sender)
            .await?;
        Ok(())
    }

    pub async fn start_game(&self, room_id: RoomId) -> Result<(), DeckhandError> {
        let room = self.registry.lock().await.room(room_id)?;
        room.start().await?;
        Ok(())
    }

    pub async fn play_card(
        &self,
        room_id: RoomId,
        actor: PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, DeckhandError> {
        let room = self.registry.lock().await.room(room_id)?;
        let outcome = room.play(actor, card_id, chosen_color).await?;
        Ok(outcome)
    }

    /// Draws for the current actor; the returned cards are for private
    /// delivery only.
    pub async fn draw_card(
        &self,
        room_id: RoomId,
        actor: PlayerId,
    ) -> Result<Vec<Card>, DeckhandError> {
        let room = self.registry.lock().await.room(room_id)?;
        let drawn = room.draw(actor).await?;
        Ok(drawn)
    }

    pub async fn leave_room(&self, room_id: RoomId, actor: PlayerId) -> Result<(), DeckhandError> {
        self.registry.lock().await.leave_room(room_id, actor).await?;
        Ok(())
    }

    /// The transport lost this actor; equivalent to leaving whatever
    /// room they were in.
    pub async fn disconnect(&self, actor: PlayerId) -> Result<(), DeckhandError> {
        tracing::debug!(%actor, "disconnect");
        self.registry.lock().await.disconnect(actor).await?;
        Ok(())
    }

    /// Waiting, not-full rooms for the lobby surface, newest first.
    pub async fn lobby(&self) -> Vec<LobbyEntry> {
        let handles = self.registry.lock().await.rooms();
        deckhand_room::lobby(handles).await
    }

    /// Translates one boundary [`Command`] into the matching operation.
    ///
    /// `outbound` is the issuing connection's channel; only a join
    /// registers it, the other commands ignore it.
    pub async fn dispatch(
        &self,
        cmd: Command,
        outbound: &PlayerSender,
    ) -> Result<Dispatch, DeckhandError> {
        match cmd {
            Command::CreateRoom { name, max_players } => {
                let room_id = self.create_room(&name, max_players).await;
                Ok(Dispatch::RoomCreated(room_id))
            }
            Command::JoinRoom {
                room_id,
                actor,
                display_name,
            } => {
                self.join_room(room_id, actor, display_name, outbound.clone())
                    .await?;
                Ok(Dispatch::Joined)
            }
            Command::StartGame { room_id } => {
                self.start_game(room_id).await?;
                Ok(Dispatch::Started)
            }
            Command::PlayCard {
                room_id,
                actor,
                card_id,
                chosen_color,
            } => {
                let outcome = self.play_card(room_id, actor, card_id, chosen_color).await?;
                Ok(Dispatch::Played(outcome))
            }
            Command::DrawCard { room_id, actor } => {
                let drawn = self.draw_card(room_id, actor).await?;
                Ok(Dispatch::Drawn(drawn))
            }
            Command::LeaveRoom { room_id, actor } => {
                self.leave_room(room_id, actor).await?;
                Ok(Dispatch::Left)
            }
            Command::Disconnect { actor } => {
                self.disconnect(actor).await?;
                Ok(Dispatch::Left)
            }
            Command::ListLobby => Ok(Dispatch::Lobby(self.lobby().await)),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
