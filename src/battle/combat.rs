//! Attack resolution.
//!
//! Deterministic subtraction: the defender loses exactly the attacker's
//! `atk`, saturating at zero. There are no rolls, crits or modifiers.

use serde::Serialize;

use crate::battle::Unit;

/// What happened when one unit struck another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    /// Attacker display name.
    pub attacker: String,
    /// Defender display name.
    pub defender: String,
    /// Hit points actually removed.
    pub damage: u32,
    /// Defender hit points after the attack.
    pub remaining_hp: u32,
    /// Whether this attack brought the defender to zero.
    pub defeated: bool,
}

impl AttackReport {
    /// Status line describing the attack.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = format!("{} hits {} for {}!", self.attacker, self.defender, self.damage);
        if self.defeated {
            message.push_str(&format!(" {} defeated!", self.defender));
        }
        message
    }
}

/// Apply one attack from `attacker` to `defender`.
///
/// The caller is responsible for range and liveness checks.
pub fn resolve_attack(attacker: &Unit, defender: &mut Unit) -> AttackReport {
    let was_alive = defender.is_alive();
    let damage = defender.take_damage(attacker.atk);

    AttackReport {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        damage,
        remaining_hp: defender.hp(),
        defeated: was_alive && !defender.is_alive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Coord, Side};

    fn pair(atk: u32, defender_hp: u32) -> (Unit, Unit) {
        let attacker = Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 20, atk, 4);
        let defender = Unit::new("Goblin", Side::Enemy, Coord::new(2, 3), 10, 3, 3).with_hp(defender_hp);
        (attacker, defender)
    }

    #[test]
    fn test_attack_reduces_hp() {
        let (attacker, mut defender) = pair(5, 10);
        let report = resolve_attack(&attacker, &mut defender);

        assert_eq!(defender.hp(), 5);
        assert_eq!(report.damage, 5);
        assert!(!report.defeated);
        assert_eq!(report.message(), "Hero hits Goblin for 5!");
    }

    #[test]
    fn test_overkill_clamps_at_zero() {
        let (attacker, mut defender) = pair(5, 3);
        let report = resolve_attack(&attacker, &mut defender);

        assert_eq!(defender.hp(), 0);
        assert!(!defender.is_alive());
        assert!(report.defeated);
        assert_eq!(report.damage, 3);
        assert_eq!(report.message(), "Hero hits Goblin for 3! Goblin defeated!");
    }

    #[test]
    fn test_exact_kill() {
        let (attacker, mut defender) = pair(10, 10);
        let report = resolve_attack(&attacker, &mut defender);
        assert!(report.defeated);
        assert_eq!(report.remaining_hp, 0);
    }

    #[test]
    fn test_zero_attack_changes_nothing() {
        let (attacker, mut defender) = pair(0, 7);
        let report = resolve_attack(&attacker, &mut defender);
        assert_eq!(defender.hp(), 7);
        assert_eq!(report.damage, 0);
        assert!(!report.defeated);
    }
}
