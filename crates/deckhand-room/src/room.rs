//! Room actor: an isolated Tokio task that owns one table.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. Since the actor processes one command at a
//! time, every table operation runs to completion — read, validate,
//! mutate, broadcast — before the next one is looked at.

use std::collections::HashMap;
use std::time::Instant;

use deckhand_game::{LeaveOutcome, PlayOutcome, Table};
use deckhand_protocol::{Card, CardId, Color, PlayerId, RoomId, RoomStatus, ServerEvent};
use tokio::sync::{mpsc, oneshot};

use crate::{RoomConfig, RoomError};

/// Channel sender for delivering outbound events to a player.
pub type PlayerSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its mailbox.
///
/// Variants that need an answer carry a oneshot reply channel; the
/// caller awaits the response on it.
pub(crate) enum RoomCommand {
    Join {
        actor: PlayerId,
        display_name: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Leave {
        actor: PlayerId,
        reply: oneshot::Sender<LeaveOutcome>,
    },
    Start {
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Play {
        actor: PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
        reply: oneshot::Sender<Result<PlayOutcome, RoomError>>,
    },
    Draw {
        actor: PlayerId,
        reply: oneshot::Sender<Result<Vec<Card>, RoomError>>,
    },
    GetInfo {
        reply: oneshot::Sender<RoomInfo>,
    },
    Shutdown,
}

/// A snapshot of room metadata (not the game state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub name: String,
    pub status: RoomStatus,
    pub player_count: usize,
    pub max_players: usize,
    /// Used only for lobby ordering (newest first).
    pub created_at: Instant,
}

/// Handle to a running room actor. Cheap to clone — an mpsc sender
/// wrapper. The [`Registry`](crate::Registry) holds one per room.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub async fn join(
        &self,
        actor: PlayerId,
        display_name: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                actor,
                display_name,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    pub async fn leave(&self, actor: PlayerId) -> Result<LeaveOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                actor,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    pub async fn start(&self) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Start { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    pub async fn play(
        &self,
        actor: PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Play {
                actor,
                card_id,
                chosen_color,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    pub async fn draw(&self, actor: PlayerId) -> Result<Vec<Card>, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Draw {
                actor,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    name: String,
    created_at: Instant,
    table: Table,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    actor,
                    display_name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(actor, display_name, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { actor, reply } => {
                    let outcome = self.handle_leave(actor);
                    let _ = reply.send(outcome);
                }
                RoomCommand::Start { reply } => {
                    let result = self.handle_start();
                    let _ = reply.send(result);
                }
                RoomCommand::Play {
                    actor,
                    card_id,
                    chosen_color,
                    reply,
                } => {
                    let result = self.handle_play(actor, card_id, chosen_color);
                    let _ = reply.send(result);
                }
                RoomCommand::Draw { actor, reply } => {
                    let result = self.handle_draw(actor);
                    let _ = reply.send(result);
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room_id = %self.room_id, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        actor: PlayerId,
        display_name: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        self.table.join(actor, display_name)?;
        self.senders.insert(actor, sender);
        tracing::info!(
            room_id = %self.room_id,
            %actor,
            players = self.table.player_count(),
            "player joined"
        );
        self.broadcast();
        Ok(())
    }

    fn handle_leave(&mut self, actor: PlayerId) -> LeaveOutcome {
        let outcome = self.table.leave(actor);
        if outcome.removed {
            self.senders.remove(&actor);
            tracing::info!(
                room_id = %self.room_id,
                %actor,
                players = self.table.player_count(),
                "player left"
            );
            self.broadcast();
        }
        outcome
    }

    fn handle_start(&mut self) -> Result<(), RoomError> {
        self.table.start()?;
        tracing::info!(
            room_id = %self.room_id,
            players = self.table.player_count(),
            "game started"
        );
        self.broadcast();
        Ok(())
    }

    fn handle_play(
        &mut self,
        actor: PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, RoomError> {
        let outcome = self.table.play_card(actor, card_id, chosen_color)?;
        if let Some(winner) = outcome.winner {
            tracing::info!(room_id = %self.room_id, %winner, "game finished");
        }
        self.broadcast();
        Ok(outcome)
    }

    fn handle_draw(&mut self, actor: PlayerId) -> Result<Vec<Card>, RoomError> {
        let drawn = self.table.draw_for_current(actor)?;
        self.send_to(
            actor,
            ServerEvent::Drawn {
                cards: drawn.clone(),
            },
        );
        self.broadcast();
        Ok(drawn)
    }

    /// Pushes the public snapshot to every member and each member's
    /// private hand to them alone.
    fn broadcast(&self) {
        let snapshot = self.table.room_snapshot(self.room_id, &self.name);
        for (&actor, sender) in &self.senders {
            let _ = sender.send(ServerEvent::Room(snapshot.clone()));
            if let Some(hand) = self.table.hand_snapshot(actor) {
                let _ = sender.send(ServerEvent::Hand(hand));
            }
        }
    }

    /// Sends one event to a single player. Silently drops if the
    /// receiver is gone (player disconnected).
    fn send_to(&self, actor: PlayerId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&actor) {
            let _ = sender.send(event);
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room_id,
            name: self.name.clone(),
            status: self.table.status(),
            player_count: self.table.player_count(),
            max_players: self.table.max_players(),
            created_at: self.created_at,
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
///
/// `channel_size` bounds the mailbox — senders wait when it fills up.
pub(crate) fn spawn_room(
    room_id: RoomId,
    name: String,
    config: RoomConfig,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id,
        name,
        created_at: Instant::now(),
        table: Table::new(config.max_players),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
