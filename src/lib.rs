// Get the Gold server library - core module organization
//
// This file serves as the central organization point for the Get the Gold
// game server, exporting all the necessary modules and types.

// Core game engine
pub mod game;

// Action wire format
pub mod actions;

// Error taxonomy
pub mod errors;

// Server implementation
pub mod application;
pub mod websocket;

// Re-export common types for convenient access
pub use crate::actions::PlayerAction;
pub use crate::application::GameService;
pub use crate::errors::{AppError, AppResult, EngineError, EngineResult};
pub use crate::game::{GameEngine, GameState, Phase, Race, Tile};
pub use crate::websocket::{WebSocketService, WsMessage};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
