// src/game/mod.rs
pub mod board;
pub mod engine;
pub mod scoring;
pub mod territory;
pub mod types;

pub use engine::{default_end_condition, EndCondition, GameEngine};
pub use scoring::Score;
pub use types::*;
