//! Tactical battle layer.
//!
//! Implements one grid encounter between a friendly and an enemy roster:
//! - Grid geometry and unit data
//! - Occupancy queries, reachability and targeting
//! - Deterministic attack resolution
//! - Greedy enemy AI
//! - The turn/phase state machine that drives a session

mod ai;
mod board;
mod combat;
mod grid;
mod input;
mod invariants;
mod movement;
mod scenario;
mod session;
mod targeting;
mod unit;

pub use ai::{act as enemy_act, choose_target, step_candidates, AiStyle, EnemyAction};
pub use board::{Board, Occupant, UnitRef};
pub use combat::{resolve_attack, AttackReport};
pub use grid::{Coord, Direction, GridSize, BATTLE_GRID_H, BATTLE_GRID_W};
pub use input::{parse_script, BattleInput};
pub use invariants::{check_invariants, InvariantViolation};
pub use movement::{reachable, TileSet};
pub use scenario::{Rosters, Scenario, FOE_MOVEMENT, LEAD_MOVEMENT};
pub use session::{
    BattleConfig, BattleResult, BattleSession, Outcome, Phase, DEFAULT_ENEMY_PHASE_DELAY,
    LOG_CAPACITY,
};
pub use targeting::{legal_targets, targets_in_range};
pub use unit::{Side, Unit};
