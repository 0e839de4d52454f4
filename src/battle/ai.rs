//! Greedy enemy AI.
//!
//! Each enemy picks the nearest living friendly unit, attacks it when
//! adjacent, and otherwise takes one step from a fixed candidate list. The
//! heuristic has no path planning and can stall behind obstacles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battle::combat::{resolve_attack, AttackReport};
use crate::battle::{Board, Coord, Direction, GridSize, Unit};

/// Candidate ordering for the one-step advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiStyle {
    /// Diagonal toward the target first, then horizontal, then vertical.
    #[default]
    Diagonal,
    /// Horizontal first, then vertical, then diagonal.
    Axis,
}

/// Outcome of one enemy's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnemyAction {
    /// Struck the friendly unit at this roster index.
    Attack {
        /// Index into the friendly roster.
        target: usize,
        /// Attack details.
        report: AttackReport,
    },
    /// Stepped to a new tile.
    Advance {
        /// Tile before the step.
        from: Coord,
        /// Tile after the step.
        to: Coord,
    },
    /// Could neither attack nor move.
    Hold,
}

/// Nearest living friendly unit to `enemy`; ties go to roster order.
#[must_use]
pub fn choose_target(enemy: &Unit, friendly: &[Unit]) -> Option<usize> {
    friendly
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.is_alive())
        .min_by_key(|(index, unit)| (enemy.distance_to(unit), *index))
        .map(|(index, _)| index)
}

/// Preferred step tiles from `from` toward `target`, in order.
///
/// Entries that fall off the grid are dropped. When the target shares a
/// row or column some candidates coincide with `from`; those are rejected
/// later because the mover itself occupies its tile.
#[must_use]
pub fn step_candidates(style: AiStyle, from: Coord, target: Coord, size: GridSize) -> Vec<Coord> {
    let dx = i32::from(target.x > from.x) - i32::from(target.x < from.x);
    let dy = i32::from(target.y > from.y) - i32::from(target.y < from.y);

    let order = match style {
        AiStyle::Diagonal => [(dx, dy), (dx, 0), (0, dy)],
        AiStyle::Axis => [(dx, 0), (0, dy), (dx, dy)],
    };

    order
        .into_iter()
        .filter_map(|(ox, oy)| from.offset(ox, oy, size))
        .collect()
}

/// Pick the tile the enemy at `from` steps to, if any.
fn choose_step(board: &Board<'_>, style: AiStyle, from: Coord, target: Coord) -> Option<Coord> {
    let size = board.size();

    step_candidates(style, from, target, size)
        .into_iter()
        .find(|c| board.is_free(*c))
        .or_else(|| {
            Direction::CARDINAL
                .into_iter()
                .filter_map(|direction| from.step(direction, size))
                .find(|c| board.is_free(*c))
        })
}

/// Run one enemy's turn against the current board.
///
/// Defeated enemies and battles with no living friendly units yield
/// [`EnemyAction::Hold`].
pub fn act(
    style: AiStyle,
    size: GridSize,
    enemy_index: usize,
    friendly: &mut [Unit],
    enemies: &mut [Unit],
) -> EnemyAction {
    let Some(enemy) = enemies.get(enemy_index) else {
        return EnemyAction::Hold;
    };
    if !enemy.is_alive() {
        return EnemyAction::Hold;
    }
    let Some(target) = choose_target(enemy, friendly) else {
        return EnemyAction::Hold;
    };

    if enemy.distance_to(&friendly[target]) == 1 {
        let report = resolve_attack(enemy, &mut friendly[target]);
        debug!(enemy = %enemy.name, target = %report.defender, damage = report.damage, "enemy attacks");
        return EnemyAction::Attack { target, report };
    }

    let from = enemy.pos;
    let goal = friendly[target].pos;
    let step = {
        let board = Board::new(size, friendly, enemies);
        choose_step(&board, style, from, goal)
    };

    match step {
        Some(to) => {
            enemies[enemy_index].pos = to;
            debug!(enemy = %enemies[enemy_index].name, %from, %to, "enemy advances");
            EnemyAction::Advance { from, to }
        }
        None => {
            debug!(enemy = %enemies[enemy_index].name, at = %from, "enemy holds");
            EnemyAction::Hold
        }
    }
}
