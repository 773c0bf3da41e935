//! Inbound commands: the actions the transport layer can request.

use serde::{Deserialize, Serialize};

use crate::{CardId, Color, PlayerId, RoomId};

/// One actor action, as delivered by the transport layer.
///
/// Every game-affecting variant carries the room and actor handles
/// explicitly — the core holds no connection state of its own.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{ "type": "PlayCard", "room_id": 1, "actor": 42, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Create a new room. `max_players` is clamped to the 2–6 range.
    CreateRoom { name: String, max_players: usize },

    /// Join an existing room that is still waiting for players.
    JoinRoom {
        room_id: RoomId,
        actor: PlayerId,
        display_name: String,
    },

    /// Start the game in a waiting room with at least two players.
    StartGame { room_id: RoomId },

    /// Play a card from the actor's hand. `chosen_color` is required
    /// when the card is wild, and must be a concrete color.
    PlayCard {
        room_id: RoomId,
        actor: PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
    },

    /// Draw one card from the pile and pass the turn.
    DrawCard { room_id: RoomId, actor: PlayerId },

    /// Leave a room explicitly.
    LeaveRoom { room_id: RoomId, actor: PlayerId },

    /// The transport lost this actor's connection. Mapped to a leave
    /// of whatever room they were in.
    Disconnect { actor: PlayerId },

    /// List joinable rooms for the lobby surface.
    ListLobby,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_is_internally_tagged() {
        let cmd = Command::PlayCard {
            room_id: RoomId(1),
            actor: PlayerId(42),
            card_id: CardId(7),
            chosen_color: Some(Color::Red),
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "PlayCard");
        assert_eq!(json["room_id"], 1);
        assert_eq!(json["actor"], 42);
        assert_eq!(json["card_id"], 7);
        assert_eq!(json["chosen_color"], "Red");
    }

    #[test]
    fn test_command_chosen_color_optional() {
        let cmd = Command::PlayCard {
            room_id: RoomId(1),
            actor: PlayerId(2),
            card_id: CardId(3),
            chosen_color: None,
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();
        assert!(json["chosen_color"].is_null());
    }

    #[test]
    fn test_command_round_trip() {
        let cmds = [
            Command::CreateRoom {
                name: "table one".into(),
                max_players: 4,
            },
            Command::JoinRoom {
                room_id: RoomId(9),
                actor: PlayerId(1),
                display_name: "ada".into(),
            },
            Command::StartGame { room_id: RoomId(9) },
            Command::DrawCard {
                room_id: RoomId(9),
                actor: PlayerId(1),
            },
            Command::LeaveRoom {
                room_id: RoomId(9),
                actor: PlayerId(1),
            },
            Command::Disconnect { actor: PlayerId(1) },
            Command::ListLobby,
        ];
        for cmd in cmds {
            let bytes = serde_json::to_vec(&cmd).unwrap();
            let decoded: Command = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(cmd, decoded);
        }
    }

    #[test]
    fn test_decode_unknown_command_type_returns_error() {
        let unknown = r#"{"type": "FlyToMoon", "speed": 9000}"#;
        let result: Result<Command, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }
}
