//! Integration tests for the room system: registry, actors, broadcast.

use deckhand_game::GameError;
use deckhand_protocol::{
    Card, CardKind, HandSnapshot, PlayerId, RoomSnapshot, RoomStatus, ServerEvent,
};
use deckhand_room::{Registry, RoomError};
use tokio::sync::mpsc;

type Outbound = mpsc::UnboundedReceiver<ServerEvent>;

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);
const P3: PlayerId = PlayerId(3);

/// Joins an actor to a room and returns their outbound channel.
async fn join(
    registry: &mut Registry,
    room_id: deckhand_protocol::RoomId,
    actor: PlayerId,
) -> Outbound {
    let (tx, rx) = mpsc::unbounded_channel();
    registry
        .join_room(room_id, actor, format!("{actor}"), tx)
        .await
        .unwrap();
    rx
}

/// Drains an outbound channel, returning the last room and hand
/// snapshots seen.
fn drain(rx: &mut Outbound) -> (Option<RoomSnapshot>, Option<HandSnapshot>) {
    let mut room = None;
    let mut hand = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            ServerEvent::Room(s) => room = Some(s),
            ServerEvent::Hand(h) => hand = Some(h),
            ServerEvent::Drawn { .. } => {}
        }
    }
    (room, hand)
}

#[tokio::test]
async fn create_join_start_broadcasts_state() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("test room", 4);

    let mut rx1 = join(&mut registry, room_id, P1).await;
    let mut rx2 = join(&mut registry, room_id, P2).await;

    registry.room(room_id).unwrap().start().await.unwrap();

    let (room, hand) = drain(&mut rx1);
    let room = room.unwrap();
    assert_eq!(room.status, RoomStatus::InProgress);
    assert_eq!(room.players.len(), 2);
    assert_eq!(room.current, Some(P1));
    assert!(room.top_card.is_some());
    assert_eq!(hand.unwrap().cards.len(), 7);

    // The other player got their own hand, not P1's.
    let (_, hand2) = drain(&mut rx2);
    assert_eq!(hand2.unwrap().player, P2);
}

#[tokio::test]
async fn join_rejected_when_full_or_started() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("tiny", 2);

    let _rx1 = join(&mut registry, room_id, P1).await;
    let _rx2 = join(&mut registry, room_id, P2).await;

    let (tx, _rx) = mpsc::unbounded_channel();
    let err = registry
        .join_room(room_id, P3, "late".into(), tx)
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::Game(GameError::RoomFull)));
}

#[tokio::test]
async fn one_room_at_a_time() {
    let mut registry = Registry::new();
    let room_a = registry.create_room("a", 4);
    let room_b = registry.create_room("b", 4);

    let _rx = join(&mut registry, room_a, P1).await;

    let (tx, _rx2) = mpsc::unbounded_channel();
    let err = registry
        .join_room(room_b, P1, "again".into(), tx)
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::AlreadyInRoom(p, r) if p == P1 && r == room_a));
}

#[tokio::test]
async fn unknown_room_is_not_found() {
    let registry = Registry::new();
    let bogus = deckhand_protocol::RoomId(9999);
    let err = registry.room(bogus).unwrap_err();
    assert!(matches!(err, RoomError::NotFound(r) if r == bogus));
}

#[tokio::test]
async fn play_and_draw_flow_through_the_actor() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("flow", 4);

    let mut rx1 = join(&mut registry, room_id, P1).await;
    let _rx2 = join(&mut registry, room_id, P2).await;
    registry.room(room_id).unwrap().start().await.unwrap();

    let (_, hand) = drain(&mut rx1);
    let hand = hand.unwrap().cards;
    let room = registry.room(room_id).unwrap();

    // Play a plain number card if one follows (action cards would hand
    // the turn straight back in a two-player game); draw otherwise.
    let mut played = false;
    for card in hand.iter().filter(|c| c.kind == CardKind::Number) {
        match room.play(P1, card.id, None).await {
            Ok(outcome) => {
                assert_eq!(outcome.card.id, card.id);
                played = true;
                break;
            }
            Err(RoomError::Game(_)) => continue,
            Err(other) => panic!("unexpected routing error: {other}"),
        }
    }
    if !played {
        let drawn: Vec<Card> = room.draw(P1).await.unwrap();
        assert_eq!(drawn.len(), 1);
    }

    // Either way the turn moved on and P1 acting again is rejected.
    let err = room.draw(P1).await.unwrap_err();
    assert!(matches!(err, RoomError::Game(GameError::NotYourTurn)));
}

#[tokio::test]
async fn out_of_turn_play_is_rejected_without_state_change() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("turns", 4);

    let mut rx1 = join(&mut registry, room_id, P1).await;
    let mut rx2 = join(&mut registry, room_id, P2).await;
    registry.room(room_id).unwrap().start().await.unwrap();

    let (_, hand2) = drain(&mut rx2);
    let card = hand2.unwrap().cards[0];
    let err = registry
        .room(room_id)
        .unwrap()
        .play(P2, card.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::Game(GameError::NotYourTurn)));

    // No broadcast happened for the failed play.
    let (room, _) = drain(&mut rx1);
    assert_eq!(room.unwrap().players[0].cards, 7);
}

#[tokio::test]
async fn leaving_last_player_prunes_the_room() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("empties", 4);

    let _rx1 = join(&mut registry, room_id, P1).await;
    assert_eq!(registry.room_count(), 1);
    assert_eq!(registry.player_room(&P1), Some(room_id));

    registry.leave_room(room_id, P1).await.unwrap();
    assert_eq!(registry.room_count(), 0);
    assert_eq!(registry.player_room(&P1), None);
}

#[tokio::test]
async fn mid_game_leave_finishes_short_handed_game() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("leavers", 4);

    let mut rx1 = join(&mut registry, room_id, P1).await;
    let _rx2 = join(&mut registry, room_id, P2).await;
    registry.room(room_id).unwrap().start().await.unwrap();

    registry.leave_room(room_id, P2).await.unwrap();
    // Room survives with one player, but the game is over.
    assert_eq!(registry.room_count(), 1);
    let (room, _) = drain(&mut rx1);
    assert_eq!(room.unwrap().status, RoomStatus::Finished);
}

#[tokio::test]
async fn disconnect_maps_to_leave() {
    let mut registry = Registry::new();
    let room_id = registry.create_room("drops", 4);

    let _rx1 = join(&mut registry, room_id, P1).await;
    registry.disconnect(P1).await.unwrap();
    assert_eq!(registry.room_count(), 0);

    // Disconnecting an actor in no room is a clean no-op.
    registry.disconnect(P3).await.unwrap();
}

#[tokio::test]
async fn lobby_lists_waiting_not_full_rooms_newest_first() {
    let mut registry = Registry::new();
    let older = registry.create_room("older", 4);
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let newer = registry.create_room("newer", 4);
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let full = registry.create_room("full", 2);
    let started = registry.create_room("started", 4);

    let _a = join(&mut registry, full, P1).await;
    let _b = join(&mut registry, full, P2).await;
    let _c = join(&mut registry, started, P3).await;
    let _d = join(&mut registry, started, PlayerId(4)).await;
    registry.room(started).unwrap().start().await.unwrap();

    let lobby = deckhand_room::lobby(registry.rooms()).await;
    let ids: Vec<_> = lobby.iter().map(|e| e.room_id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(lobby[0].players, 0);
    assert_eq!(lobby[0].max_players, 4);
}

#[tokio::test]
async fn rooms_process_independently() {
    // Two rooms driven from concurrent tasks never interfere.
    let mut registry = Registry::new();
    let room_a = registry.create_room("a", 4);
    let room_b = registry.create_room("b", 4);

    let mut rx_a = join(&mut registry, room_a, P1).await;
    let _a2 = join(&mut registry, room_a, P2).await;
    let mut rx_b = join(&mut registry, room_b, P3).await;
    let _b2 = join(&mut registry, room_b, PlayerId(4)).await;

    registry.room(room_a).unwrap().start().await.unwrap();
    registry.room(room_b).unwrap().start().await.unwrap();

    let (room_a_snap, _) = drain(&mut rx_a);
    let (room_b_snap, _) = drain(&mut rx_b);
    let a = room_a_snap.unwrap();
    let b = room_b_snap.unwrap();
    assert_eq!(a.room_id, room_a);
    assert_eq!(b.room_id, room_b);
    assert_eq!(a.players.len(), 2);
    assert_eq!(b.players.len(), 2);
    assert!(a.players.iter().all(|p| p.player != P3));
}

#[tokio::test]
async fn cloned_handles_drive_rooms_without_the_registry() {
    // Gameplay routing looks a handle up under the registry lock and
    // awaits the actor on the clone, so the room must keep working
    // with no registry access at all — here, with the registry gone.
    let mut registry = Registry::new();
    let room_id = registry.create_room("detached", 4);

    let mut rx1 = join(&mut registry, room_id, P1).await;
    let _rx2 = join(&mut registry, room_id, P2).await;
    let room = registry.room(room_id).unwrap();
    drop(registry);

    room.start().await.unwrap();
    let (snap, hand) = drain(&mut rx1);
    assert_eq!(snap.unwrap().status, RoomStatus::InProgress);
    assert_eq!(hand.unwrap().cards.len(), 7);

    // The actor still answers rule verdicts through the handle.
    let err = room.draw(P2).await.unwrap_err();
    assert!(matches!(err, RoomError::Game(GameError::NotYourTurn)));
}
