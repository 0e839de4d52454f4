//! Occupancy queries over both rosters.
//!
//! Defeated units stay in their rosters for the HUD but are invisible to
//! every query here.

use crate::battle::{Coord, GridSize, Side, Unit};

/// What stands on a tile, relative to the side asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// No living unit.
    Free,
    /// A living unit of the asking side.
    Ally,
    /// A living unit of the opposing side.
    Enemy,
}

/// Reference to a unit inside one of the two rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitRef {
    /// Roster the unit belongs to.
    pub side: Side,
    /// Index into that roster.
    pub index: usize,
}

/// Read-only view of the battlefield.
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    size: GridSize,
    friendly: &'a [Unit],
    enemies: &'a [Unit],
}

impl<'a> Board<'a> {
    /// Create a board view over both rosters.
    #[must_use]
    pub const fn new(size: GridSize, friendly: &'a [Unit], enemies: &'a [Unit]) -> Self {
        Self {
            size,
            friendly,
            enemies,
        }
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Roster for one side.
    #[must_use]
    pub const fn roster(&self, side: Side) -> &'a [Unit] {
        match side {
            Side::Friendly => self.friendly,
            Side::Enemy => self.enemies,
        }
    }

    /// Every living unit on both sides, friendly roster first.
    pub fn living(&self) -> impl Iterator<Item = (UnitRef, &'a Unit)> {
        let friendly = self.friendly.iter().enumerate().map(|(index, unit)| {
            (
                UnitRef {
                    side: Side::Friendly,
                    index,
                },
                unit,
            )
        });
        let enemies = self.enemies.iter().enumerate().map(|(index, unit)| {
            (
                UnitRef {
                    side: Side::Enemy,
                    index,
                },
                unit,
            )
        });
        friendly.chain(enemies).filter(|(_, unit)| unit.is_alive())
    }

    /// The living unit standing on `coord`, if any.
    #[must_use]
    pub fn unit_at(&self, coord: Coord) -> Option<(UnitRef, &'a Unit)> {
        self.living().find(|(_, unit)| unit.pos == coord)
    }

    /// Whether no living unit stands on `coord`.
    #[must_use]
    pub fn is_free(&self, coord: Coord) -> bool {
        self.unit_at(coord).is_none()
    }

    /// Classify `coord` from the point of view of `side`.
    #[must_use]
    pub fn occupant(&self, side: Side, coord: Coord) -> Occupant {
        match self.unit_at(coord) {
            None => Occupant::Free,
            Some((unit_ref, _)) if unit_ref.side == side.opponent() => Occupant::Enemy,
            Some(_) => Occupant::Ally,
        }
    }

    /// Whether any unit on `side` is still alive.
    #[must_use]
    pub fn any_alive(&self, side: Side) -> bool {
        self.roster(side).iter().any(Unit::is_alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rosters() -> (Vec<Unit>, Vec<Unit>) {
        let friendly = vec![
            Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 20, 5, 4),
            Unit::new("Archer", Side::Friendly, Coord::new(1, 1), 12, 4, 3),
        ];
        let mut fallen = Unit::new("Minion", Side::Enemy, Coord::new(5, 5), 6, 2, 3);
        fallen.take_damage(6);
        let enemies = vec![
            Unit::new("Goblin", Side::Enemy, Coord::new(6, 3), 10, 3, 3),
            fallen,
        ];
        (friendly, enemies)
    }

    #[test]
    fn test_occupant_relative_to_side() {
        let (friendly, enemies) = rosters();
        let board = Board::new(GridSize::BATTLE, &friendly, &enemies);

        assert_eq!(board.occupant(Side::Friendly, Coord::new(1, 1)), Occupant::Ally);
        assert_eq!(board.occupant(Side::Friendly, Coord::new(6, 3)), Occupant::Enemy);
        assert_eq!(board.occupant(Side::Enemy, Coord::new(6, 3)), Occupant::Ally);
        assert_eq!(board.occupant(Side::Enemy, Coord::new(1, 3)), Occupant::Enemy);
        assert_eq!(board.occupant(Side::Enemy, Coord::new(0, 0)), Occupant::Free);
    }

    #[test]
    fn test_defeated_units_are_invisible() {
        let (friendly, enemies) = rosters();
        let board = Board::new(GridSize::BATTLE, &friendly, &enemies);

        assert!(board.is_free(Coord::new(5, 5)));
        assert_eq!(board.living().count(), 3);
    }

    #[test]
    fn test_unit_at_reports_roster_index() {
        let (friendly, enemies) = rosters();
        let board = Board::new(GridSize::BATTLE, &friendly, &enemies);

        let (unit_ref, unit) = board.unit_at(Coord::new(1, 1)).unwrap();
        assert_eq!(unit_ref, UnitRef { side: Side::Friendly, index: 1 });
        assert_eq!(unit.name, "Archer");
    }

    #[test]
    fn test_any_alive() {
        let (friendly, mut enemies) = rosters();
        assert!(Board::new(GridSize::BATTLE, &friendly, &enemies).any_alive(Side::Enemy));
        enemies[0].take_damage(100);
        assert!(!Board::new(GridSize::BATTLE, &friendly, &enemies).any_alive(Side::Enemy));
    }
}
