use axum::extract::ws::{Message, WebSocket};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use std::sync::Arc;

use crate::actions::PlayerAction;
use crate::application::GameService;
use crate::errors::{AppError, AppResult};
use crate::game::types::{GameId, GameState};

/// Server-to-client WebSocket messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WsMessage {
    /// Fresh full snapshot, pushed after every accepted action.
    GameState { game: GameState },

    /// A rejected action or transport failure, explained to the player.
    Error { message: String },

    Greeting { message: String },
}

/// WebSocket service that handles real-time communication.
/// Purely an infrastructure concern - no game logic here.
#[derive(Clone)]
pub struct WebSocketService {
    game_service: Arc<GameService>,
    broadcaster: broadcast::Sender<(GameId, WsMessage)>,
}

impl WebSocketService {
    pub fn new(game_service: Arc<GameService>) -> Self {
        let (broadcaster, _) = broadcast::channel(1000);

        Self {
            game_service,
            broadcaster,
        }
    }

    /// Handle a new WebSocket connection for one player in one game.
    pub async fn handle_connection(&self, socket: WebSocket, game_id: String, player_id: String) {
        log::info!("WebSocket connected: {player_id} (game {game_id})");

        let (mut sender, mut receiver) = socket.split();

        let greeting = WsMessage::Greeting {
            message: "Connected to Get the Gold".to_string(),
        };
        if let Err(e) = Self::send_message(&mut sender, &greeting).await {
            log::error!("Failed to send greeting to {player_id}: {e}");
            return;
        }

        // Send the initial game state, or bail out if the game is unknown
        match self.game_service.snapshot(&game_id).await {
            Ok(game) => {
                let state_msg = WsMessage::GameState { game };
                if Self::send_message(&mut sender, &state_msg).await.is_err() {
                    return;
                }
            }
            Err(e) => {
                let error = WsMessage::Error {
                    message: e.to_string(),
                };
                let _ = Self::send_message(&mut sender, &error).await;
                return;
            }
        }

        // Subscribe to game updates before processing any action
        let mut game_updates = self.broadcaster.subscribe();

        // Task to forward this game's updates to the client
        let game_id_for_updates = game_id.clone();
        let player_id_for_updates = player_id.clone();
        let mut update_task = tokio::spawn(async move {
            while let Ok((update_game_id, message)) = game_updates.recv().await {
                if update_game_id == game_id_for_updates {
                    if let Err(e) = Self::send_message(&mut sender, &message).await {
                        log::debug!("Dropping connection {player_id_for_updates}: {e}");
                        break;
                    }
                }
            }
        });

        // Task to handle incoming actions
        let game_service = self.game_service.clone();
        let broadcaster = self.broadcaster.clone();
        let game_id_for_messages = game_id.clone();
        let player_id_for_messages = player_id.clone();
        let mut message_task = tokio::spawn(async move {
            while let Some(Ok(message)) = receiver.next().await {
                match message {
                    Message::Text(text) => {
                        Self::handle_text_message(
                            &game_service,
                            &broadcaster,
                            &game_id_for_messages,
                            &player_id_for_messages,
                            text.to_string(),
                        )
                        .await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        });

        // Wait for either task to finish (client disconnect or error)
        tokio::select! {
            _ = &mut update_task => {
                message_task.abort();
            }
            _ = &mut message_task => {
                update_task.abort();
            }
        }

        log::info!("WebSocket connection closed: {player_id} (game {game_id})");
    }

    /// Decode one client message and run it through the game service.
    async fn handle_text_message(
        game_service: &GameService,
        broadcaster: &broadcast::Sender<(GameId, WsMessage)>,
        game_id: &str,
        player_id: &str,
        text: String,
    ) {
        let result = Self::apply_wire_action(game_service, game_id, player_id, &text).await;
        let message = match result {
            Ok(game) => WsMessage::GameState { game },
            Err(AppError::Engine(error)) => {
                log::warn!("Game {game_id}: rejected action from {player_id}: {error}");
                WsMessage::Error {
                    message: error.to_string(),
                }
            }
            Err(error) => {
                log::error!("Game {game_id}: failed to process message: {error}");
                WsMessage::Error {
                    message: error.to_string(),
                }
            }
        };
        let _ = broadcaster.send((game_id.to_string(), message));
    }

    async fn apply_wire_action(
        game_service: &GameService,
        game_id: &str,
        player_id: &str,
        text: &str,
    ) -> AppResult<GameState> {
        let action: PlayerAction =
            serde_json::from_str(text).map_err(|e| AppError::Deserialization {
                details: e.to_string(),
            })?;
        game_service.apply_action(game_id, player_id, action).await
    }

    async fn send_message(
        sender: &mut futures::stream::SplitSink<WebSocket, Message>,
        message: &WsMessage,
    ) -> Result<(), axum::Error> {
        let json = serde_json::to_string(message).map_err(axum::Error::new)?;

        sender
            .send(Message::Text(json.into()))
            .await
            .map_err(axum::Error::new)
    }

    /// The broadcaster for pushing messages to every connected client.
    pub fn broadcaster(&self) -> broadcast::Sender<(GameId, WsMessage)> {
        self.broadcaster.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_messages_tag_with_kebab_case_types() {
        let msg = WsMessage::Error {
            message: "The game is already over".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "error");

        let state = WsMessage::GameState {
            game: GameState::new(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["type"], "game-state");
        assert_eq!(json["game"]["currentState"], "prologue");
    }
}
