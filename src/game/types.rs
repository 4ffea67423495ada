// src/game/types.rs
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::board;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for games
pub type GameId = String;

/// Canonical key for the palisade slot between two adjacent tiles,
/// e.g. `"1-2"` (smaller linear tile index first).
pub type PalisadeId = String;

pub const BOARD_ROWS: usize = 5;
pub const BOARD_COLS: usize = 8;
pub const MAX_PLAYERS: usize = 4;
pub const MAX_ARMY_SIZE: u8 = 5;

/// Reserve dealt to every player at game start, indexed by army size - 1.
pub const INITIAL_RESERVE: [u8; MAX_ARMY_SIZE as usize] = [11, 2, 1, 1, 1];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Mage,
    Elf,
    Orc,
    Goblin,
}

pub const AVAILABLE_RACES: [Race; 4] = [Race::Mage, Race::Elf, Race::Orc, Race::Goblin];

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Race::Mage => write!(f, "mage"),
            Race::Elf => write!(f, "elf"),
            Race::Orc => write!(f, "orc"),
            Race::Goblin => write!(f, "goblin"),
        }
    }
}

/// Game lifecycle phase, strictly forward: prologue -> awaiting-move -> game-over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    #[serde(rename = "prologue")]
    Prologue,
    #[serde(rename = "awaiting-move")]
    AwaitingMove,
    #[serde(rename = "game-over")]
    GameOver,
}

/// A palisade slot between two adjacent tiles. Serialized as 0/1 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PalisadeState {
    Unplaced,
    Placed,
}

impl From<PalisadeState> for u8 {
    fn from(state: PalisadeState) -> u8 {
        match state {
            PalisadeState::Unplaced => 0,
            PalisadeState::Placed => 1,
        }
    }
}

impl TryFrom<u8> for PalisadeState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PalisadeState::Unplaced),
            1 => Ok(PalisadeState::Placed),
            other => Err(format!("invalid palisade state: {other}")),
        }
    }
}

/// Contents of one board tile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tile {
    Empty,
    Gold { value: u8 },
    Army { player: PlayerId, value: u8 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub race: Option<Race>,
    pub ready: bool,
    /// Remaining reserve per army size; empty until the game starts.
    pub tokens: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSetup {
    pub available_races: Vec<Race>,
}

/// The root aggregate: one authoritative instance per game.
///
/// All mutation goes through [`super::engine::GameEngine`]; everything here
/// is inert, serializable data suitable for transmission to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: HashMap<PlayerId, PlayerState>,
    /// Join order; fixed as the turn cycle when setup completes.
    pub player_order: Vec<PlayerId>,
    pub current_player: Option<PlayerId>,
    pub current_state: Phase,
    pub player_setup: PlayerSetup,
    pub tiles: Vec<Vec<Tile>>,
    pub palisades: HashMap<PalisadeId, PalisadeState>,
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Fresh prologue-phase state with the fixed board layout.
    pub fn new() -> Self {
        GameState {
            players: HashMap::new(),
            player_order: Vec::new(),
            current_player: None,
            current_state: Phase::Prologue,
            player_setup: PlayerSetup {
                available_races: AVAILABLE_RACES.to_vec(),
            },
            tiles: board::starting_tiles(),
            palisades: board::starting_palisades(),
            winner: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
