use serde::{Deserialize, Serialize};

use crate::game::types::Race;

/// Client intents, in the exact JSON shape the game clients send:
/// `{"type": "<kebab-case>", "value": {...}}`.
///
/// Setup intents name the acting player in the payload; move intents rely
/// on the validated identity of the connection that delivered them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum PlayerAction {
    #[serde(rename_all = "camelCase")]
    JoinGame { player_id: String },

    #[serde(rename_all = "camelCase")]
    SetRace { player_id: String, race: Race },

    #[serde(rename_all = "camelCase")]
    SignalReady { player_id: String },

    SelectTile { row: usize, column: usize, size: u8 },

    #[serde(rename_all = "camelCase")]
    PlacePalisade { palisade_id: String },

    EndTurn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_game_ignores_extra_fields() {
        let json = r#"{"type":"join-game","value":{"playerId":"player-1","username":"Ann"}}"#;
        let action: PlayerAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            PlayerAction::JoinGame {
                player_id: "player-1".to_string()
            }
        );
    }

    #[test]
    fn test_parse_set_race() {
        let json = r#"{"type":"set-race","value":{"playerId":"player-2","race":"mage"}}"#;
        let action: PlayerAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            PlayerAction::SetRace {
                player_id: "player-2".to_string(),
                race: Race::Mage,
            }
        );
    }

    #[test]
    fn test_parse_select_tile() {
        let json = r#"{"type":"select-tile","value":{"row":0,"column":1,"size":2}}"#;
        let action: PlayerAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            PlayerAction::SelectTile {
                row: 0,
                column: 1,
                size: 2,
            }
        );
    }

    #[test]
    fn test_parse_end_turn_without_value() {
        let action: PlayerAction = serde_json::from_str(r#"{"type":"end-turn"}"#).unwrap();
        assert_eq!(action, PlayerAction::EndTurn);
    }

    #[test]
    fn test_place_palisade_round_trips_exactly() {
        let action = PlayerAction::PlacePalisade {
            palisade_id: "8-16".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "place-palisade", "value": {"palisadeId": "8-16"}})
        );
        let back: PlayerAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        assert!(serde_json::from_str::<PlayerAction>(r#"{"type":"roll-dice"}"#).is_err());
    }
}
