//! Battle invariants - sanity checks that detect bugs.
//!
//! These should never trigger for any input sequence. The session asserts
//! them after every input and after every enemy phase in debug builds.

use std::fmt;

use crate::battle::{BattleSession, Phase, Side, Unit};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all battle invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(session: &BattleSession) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut fail = |message: String| violations.push(InvariantViolation { message });

    let size = session.size();
    let phase = session.phase();

    if !size.contains(session.cursor()) {
        fail(format!("cursor {} is off the grid", session.cursor()));
    }

    // Positions and hit points
    let living: Vec<&Unit> = session
        .friendly()
        .iter()
        .chain(session.enemies())
        .filter(|u| u.is_alive())
        .collect();
    for (i, unit) in living.iter().enumerate() {
        if let Some(other) = living[i + 1..].iter().find(|o| o.pos == unit.pos) {
            fail(format!("{} and {} share {}", unit.name, other.name, unit.pos));
        }
    }
    for unit in session.friendly().iter().chain(session.enemies()) {
        if !size.contains(unit.pos) {
            fail(format!("{} stands off the grid at {}", unit.name, unit.pos));
        }
        if unit.hp() > unit.max_hp() {
            fail(format!("{} has hp {} > max {}", unit.name, unit.hp(), unit.max_hp()));
        }
    }
    for (roster, side) in [(session.friendly(), Side::Friendly), (session.enemies(), Side::Enemy)] {
        if let Some(unit) = roster.iter().find(|u| u.side != side) {
            fail(format!("{} is in the {side:?} roster but tagged {:?}", unit.name, unit.side));
        }
    }

    // Selection is bound exactly in the move and attack phases
    let bound = matches!(phase, Phase::FriendlyMove | Phase::FriendlyAttack);
    match (bound, session.selected()) {
        (true, None) => fail(format!("{phase:?} without a selected unit")),
        (false, Some(unit)) => fail(format!("{} still selected in {phase:?}", unit.name)),
        (true, Some(unit)) if !unit.is_ready() => {
            fail(format!("selected unit {} is not ready", unit.name));
        }
        _ => {}
    }

    if phase != Phase::FriendlyMove && !session.reachable().is_empty() {
        fail(format!("reachable set populated in {phase:?}"));
    }
    if phase != Phase::FriendlyAttack && !session.targets().is_empty() {
        fail(format!("target set populated in {phase:?}"));
    }

    // Phase consistency with the rosters
    let board = session.board();
    let friendly_alive = board.any_alive(Side::Friendly);
    let enemies_alive = board.any_alive(Side::Enemy);
    match phase {
        Phase::Victory if enemies_alive => fail("victory with living enemies".to_string()),
        Phase::Victory | Phase::Defeat => {}
        _ if !friendly_alive || !enemies_alive => {
            fail(format!("{phase:?} with an empty side still in play"));
        }
        Phase::FriendlySelect if !session.friendly().iter().any(Unit::is_ready) => {
            fail("select phase with no ready friendly unit".to_string());
        }
        Phase::EnemyPhase if session.friendly().iter().any(Unit::is_ready) => {
            fail("enemy phase while a friendly unit is ready".to_string());
        }
        _ => {}
    }

    violations
}

/// Assert all battle invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub(crate) fn assert_invariants(session: &BattleSession) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Battle invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub(crate) fn assert_invariants(_session: &BattleSession) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattleConfig, BattleInput, Coord, GridSize};

    fn session() -> BattleSession {
        let friendly = vec![Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 20, 5, 4)];
        let enemies = vec![Unit::new("Goblin", Side::Enemy, Coord::new(6, 3), 10, 3, 3)];
        BattleSession::from_rosters(GridSize::BATTLE, friendly, enemies, BattleConfig::default()).unwrap()
    }

    #[test]
    fn test_fresh_session_is_valid() {
        assert!(check_invariants(&session()).is_empty());
    }

    #[test]
    fn test_valid_through_a_turn() {
        let mut session = session();
        for input in [BattleInput::Confirm, BattleInput::Confirm, BattleInput::Skip] {
            session.handle_input(input);
            assert!(check_invariants(&session).is_empty());
        }
        session.run_enemy_phase();
        assert!(check_invariants(&session).is_empty());
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation {
            message: "cursor off grid".to_string(),
        };
        assert_eq!(violation.to_string(), "Invariant violation: cursor off grid");
    }
}
