// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Skirmish: a grid-based tactical battle engine with a roaming overworld.
//!
//! A hero roams a tile map; touching an enemy opens a turn-based battle on
//! a small grid. The battle layer is deterministic and render-agnostic:
//! - Breadth-first movement reachability with ally pass-through
//! - Distance-band attack targeting for melee, reach and ranged units
//! - A select → move → attack phase machine with a delayed enemy phase
//! - A greedy one-step enemy AI
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play TUI / script runner)    │
//! ├─────────────────────────────────────┤
//! │   Game (scene controller) + render  │
//! ├──────────────────┬──────────────────┤
//! │    Overworld     │  Battle session  │
//! └──────────────────┴──────────────────┘
//! ```

pub mod battle;
pub mod config;
pub mod error;
pub mod game;
pub mod overworld;
pub mod render;

pub use error::{ConfigError, ScriptError, SetupError};

// Re-export key battle types at crate root for convenience
pub use battle::{
    BattleConfig, BattleInput, BattleResult, BattleSession, Coord, Direction, GridSize, Outcome,
    Phase, Side, Unit,
};
pub use config::GameConfig;
pub use game::{Game, GameInput, Scene};
