//! Registry: creates, tracks, and routes actors to rooms.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use deckhand_protocol::{LobbyEntry, PlayerId, RoomId};

use crate::room::spawn_room;
use crate::{PlayerSender, RoomConfig, RoomError, RoomHandle, RoomInfo};

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Default mailbox size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Directory of all active rooms.
///
/// The registry itself holds no game state — each room's state lives in
/// its own actor and is serialized by that actor's mailbox. The
/// registry only needs concurrency-safety for its own insert, lookup,
/// and remove, which higher layers provide by wrapping it in a mutex.
/// Gameplay commands should [`room`](Registry::room) a cloned handle
/// out and await the actor without holding that mutex.
pub struct Registry {
    /// Active rooms, keyed by room ID.
    rooms: HashMap<RoomId, RoomHandle>,

    /// Maps each actor to the room they're currently in.
    /// An actor can be in at most ONE room at a time (key invariant);
    /// this index is also how a bare disconnect finds its room.
    player_rooms: HashMap<PlayerId, RoomId>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
        }
    }

    /// Creates a new room and returns its ID. Always succeeds.
    pub fn create_room(&mut self, name: impl Into<String>, max_players: usize) -> RoomId {
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let config = RoomConfig::new(max_players);
        let handle = spawn_room(room_id, name.into(), config, DEFAULT_CHANNEL_SIZE);
        self.rooms.insert(room_id, handle);
        tracing::info!(%room_id, "room created");
        room_id
    }

    /// A cloned handle to a room's actor.
    ///
    /// Handles stay valid independently of the registry, so callers
    /// can look one up under a short lock and await the room on it
    /// afterwards.
    pub fn room(&self, room_id: RoomId) -> Result<RoomHandle, RoomError> {
        self.rooms
            .get(&room_id)
            .cloned()
            .ok_or(RoomError::NotFound(room_id))
    }

    /// Cloned handles to every active room, for registry-wide queries.
    pub fn rooms(&self) -> Vec<RoomHandle> {
        self.rooms.values().cloned().collect()
    }

    /// Adds an actor to a room, enforcing one-room-at-a-time.
    pub async fn join_room(
        &mut self,
        room_id: RoomId,
        actor: PlayerId,
        display_name: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if let Some(&current) = self.player_rooms.get(&actor) {
            return Err(RoomError::AlreadyInRoom(actor, current));
        }

        let handle = self.room(room_id)?;
        handle.join(actor, display_name, sender).await?;
        self.player_rooms.insert(actor, room_id);
        Ok(())
    }

    /// Removes an actor from a room. Unknown actors are a clean no-op.
    ///
    /// When the last player leaves, the room is pruned from the
    /// registry and its actor shut down.
    pub async fn leave_room(&mut self, room_id: RoomId, actor: PlayerId) -> Result<(), RoomError> {
        let handle = self.room(room_id)?;
        let outcome = handle.leave(actor).await?;

        if outcome.removed {
            self.player_rooms.remove(&actor);
        }
        if outcome.now_empty {
            self.rooms.remove(&room_id);
            let _ = handle.shutdown().await;
            tracing::info!(%room_id, "empty room pruned");
        }
        Ok(())
    }

    /// Maps a transport disconnect to a leave of whatever room the
    /// actor was in. No-op if they were in none.
    pub async fn disconnect(&mut self, actor: PlayerId) -> Result<(), RoomError> {
        let Some(&room_id) = self.player_rooms.get(&actor) else {
            return Ok(());
        };
        self.leave_room(room_id, actor).await
    }

    /// The room an actor is currently in, if any.
    pub fn player_room(&self, actor: &PlayerId) -> Option<RoomId> {
        self.player_rooms.get(actor).copied()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists waiting, not-full rooms, newest first.
///
/// Takes owned handles (see [`Registry::rooms`]) so callers can
/// snapshot the registry under a short lock and run the per-room
/// queries outside it. Rooms that fail to respond (e.g., shutting
/// down) are silently skipped.
pub async fn lobby(handles: Vec<RoomHandle>) -> Vec<LobbyEntry> {
    let mut infos: Vec<RoomInfo> = Vec::with_capacity(handles.len());
    for handle in handles {
        if let Ok(info) = handle.get_info().await {
            if info.status.is_joinable() && info.player_count < info.max_players {
                infos.push(info);
            }
        }
    }
    infos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.room_id.0.cmp(&a.room_id.0))
    });
    infos
        .into_iter()
        .map(|info| LobbyEntry {
            room_id: info.room_id,
            name: info.name,
            players: info.player_count,
            max_players: info.max_players,
        })
        .collect()
}
