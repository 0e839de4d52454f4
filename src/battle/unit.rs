//! Unit data model.

use serde::Serialize;

use crate::battle::{Coord, Direction};

/// Which side of the battle a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Player-controlled units.
    Friendly,
    /// AI-controlled units.
    Enemy,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }
}

/// A single combatant.
///
/// Battle units are copies of overworld units and never alias them; the
/// session owns its copies for the lifetime of the encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Display name (not required to be unique).
    pub name: String,
    /// Side this unit fights for.
    pub side: Side,
    /// Current tile.
    pub pos: Coord,
    /// Current hit points, always `<= max_hp`.
    hp: u32,
    /// Hit points at creation.
    max_hp: u32,
    /// Damage dealt per attack.
    pub atk: u32,
    /// Maximum tiles travelled per turn.
    pub movement: u32,
    /// Maximum Manhattan distance of a legal attack.
    pub attack_range: u32,
    /// Minimum Manhattan distance of a legal attack.
    pub min_range: u32,
    /// Whether this unit has finished its action this round.
    pub has_acted: bool,
    /// Presentation-only facing.
    pub facing: Direction,
}

impl Unit {
    /// Create a melee unit at full health.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        side: Side,
        pos: Coord,
        max_hp: u32,
        atk: u32,
        movement: u32,
    ) -> Self {
        Self {
            name: name.into(),
            side,
            pos,
            hp: max_hp,
            max_hp,
            atk,
            movement,
            attack_range: 1,
            min_range: 1,
            has_acted: false,
            facing: Direction::Down,
        }
    }

    /// Set the attack range policy.
    ///
    /// `min_range` is clamped into `1..=attack_range`.
    #[must_use]
    pub fn with_range(mut self, min_range: u32, attack_range: u32) -> Self {
        self.attack_range = attack_range.max(1);
        self.min_range = min_range.clamp(1, self.attack_range);
        self
    }

    /// Set current hit points, clamped to `max_hp`.
    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.set_hp(hp);
        self
    }

    /// Set facing.
    #[must_use]
    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Current hit points.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Hit points at creation.
    #[must_use]
    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Overwrite current hit points, clamped to `max_hp`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Whether the unit still stands.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Manhattan distance to another unit.
    #[must_use]
    pub fn distance_to(&self, other: &Unit) -> u32 {
        self.pos.distance(other.pos)
    }

    /// Whether a target at `distance` is inside this unit's attack band.
    #[must_use]
    pub const fn in_attack_range(&self, distance: u32) -> bool {
        self.min_range <= distance && distance <= self.attack_range
    }

    /// Subtract damage, saturating at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        before - self.hp
    }

    /// Whether this unit can still be selected in the friendly phase.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.is_alive() && !self.has_acted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Unit {
        Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 20, 5, 4)
    }

    #[test]
    fn test_unit_creation_defaults() {
        let unit = hero();
        assert_eq!(unit.hp(), 20);
        assert_eq!(unit.max_hp(), 20);
        assert_eq!(unit.attack_range, 1);
        assert_eq!(unit.min_range, 1);
        assert!(unit.is_alive());
        assert!(unit.is_ready());
    }

    #[test]
    fn test_take_damage_saturates() {
        let mut unit = hero().with_hp(3);
        assert_eq!(unit.take_damage(5), 3);
        assert_eq!(unit.hp(), 0);
        assert!(!unit.is_alive());
        assert_eq!(unit.take_damage(5), 0);
    }

    #[test]
    fn test_hp_never_exceeds_max() {
        let mut unit = hero();
        unit.set_hp(999);
        assert_eq!(unit.hp(), unit.max_hp());
        assert_eq!(hero().with_hp(50).hp(), 20);
    }

    #[test]
    fn test_with_range_clamps_min() {
        let archer = hero().with_range(2, 3);
        assert_eq!((archer.min_range, archer.attack_range), (2, 3));
        assert!(!archer.in_attack_range(1));
        assert!(archer.in_attack_range(2));
        assert!(archer.in_attack_range(3));
        assert!(!archer.in_attack_range(4));

        let odd = hero().with_range(5, 2);
        assert_eq!((odd.min_range, odd.attack_range), (2, 2));
        let zero = hero().with_range(0, 0);
        assert_eq!((zero.min_range, zero.attack_range), (1, 1));
    }

    #[test]
    fn test_distance_to() {
        let a = hero();
        let b = Unit::new("Goblin", Side::Enemy, Coord::new(6, 3), 10, 3, 3);
        assert_eq!(a.distance_to(&b), 5);
        assert_eq!(Side::Friendly.opponent(), Side::Enemy);
    }
}
