//! Persistent overworld that hosts battles.
//!
//! The overworld owns the only long-lived units: the hero, whose hp carries
//! across battles, and the roaming enemies, which are removed for good once
//! beaten. Battles receive copies and hand back a [`BattleResult`].

mod terrain;

pub use terrain::{Terrain, TerrainMap};

use tracing::{debug, info};

use crate::battle::{BattleResult, Coord, Direction, GridSize, Outcome, Side, Unit, FOE_MOVEMENT};

/// Overworld width in tiles.
pub const OVERWORLD_W: u16 = 20;

/// Overworld height in tiles.
pub const OVERWORLD_H: u16 = 15;

/// Result of a hero step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The hero moved to this tile.
    Moved(Coord),
    /// Edge of the map, a wall or a tree.
    Blocked,
    /// A living enemy stood on the target tile; the hero stays put.
    Encounter(usize),
}

/// The roaming world.
#[derive(Debug, Clone)]
pub struct Overworld {
    terrain: TerrainMap,
    hero: Unit,
    enemies: Vec<Unit>,
}

impl Overworld {
    /// Build the standard world: a wall on row 7, seeded trees, the hero and
    /// two enemies.
    #[must_use]
    pub fn new(seed: u64, tree_density: f64) -> Self {
        let hero = Unit::new("Hero", Side::Friendly, Coord::new(5, 5), 20, 5, 4);
        let enemies = vec![
            Unit::new("Goblin", Side::Enemy, Coord::new(10, 8), 10, 3, FOE_MOVEMENT),
            Unit::new("Dragon", Side::Enemy, Coord::new(15, 10), 18, 7, FOE_MOVEMENT),
        ];

        let mut terrain = TerrainMap::new(GridSize::new(OVERWORLD_W, OVERWORLD_H));
        terrain.wall_row(7, 3, 7);

        let spawns: Vec<Coord> = std::iter::once(hero.pos)
            .chain(enemies.iter().map(|e| e.pos))
            .collect();
        terrain.scatter_trees(seed, tree_density, &spawns);

        debug!(seed, trees = terrain.count(Terrain::Tree), "overworld generated");
        Self::with_units(terrain, hero, enemies)
    }

    /// Build a world from explicit parts.
    #[must_use]
    pub const fn with_units(terrain: TerrainMap, hero: Unit, enemies: Vec<Unit>) -> Self {
        Self {
            terrain,
            hero,
            enemies,
        }
    }

    /// Terrain grid.
    #[must_use]
    pub const fn terrain(&self) -> &TerrainMap {
        &self.terrain
    }

    /// Map dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.terrain.size()
    }

    /// The persistent hero.
    #[must_use]
    pub const fn hero(&self) -> &Unit {
        &self.hero
    }

    /// All enemies, beaten ones included.
    #[must_use]
    pub fn enemies(&self) -> &[Unit] {
        &self.enemies
    }

    /// Index of the living enemy standing on `coord`.
    #[must_use]
    pub fn enemy_at(&self, coord: Coord) -> Option<usize> {
        self.enemies
            .iter()
            .position(|e| e.is_alive() && e.pos == coord)
    }

    /// Try to step the hero one tile. Facing always turns toward `direction`.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        self.hero.facing = direction;

        let Some(target) = self.hero.pos.step(direction, self.size()) else {
            return StepOutcome::Blocked;
        };
        if let Some(index) = self.enemy_at(target) {
            debug!(enemy = %self.enemies[index].name, "encounter on contact");
            return StepOutcome::Encounter(index);
        }
        if !self.terrain.is_passable(target) {
            return StepOutcome::Blocked;
        }

        self.hero.pos = target;
        debug!(pos = %target, "hero moved");
        StepOutcome::Moved(target)
    }

    /// First living enemy adjacent to the hero, in roster order.
    #[must_use]
    pub fn interact(&self) -> Option<usize> {
        self.enemies
            .iter()
            .position(|e| e.is_alive() && e.distance_to(&self.hero) == 1)
    }

    /// Write a finished battle back into the world.
    ///
    /// The hero takes the battle's final hp. On victory the fought enemy is
    /// removed for good.
    pub fn apply_battle_result(&mut self, enemy_index: usize, result: BattleResult) {
        self.hero.set_hp(result.hero_hp);
        if result.outcome == Outcome::Victory {
            if let Some(enemy) = self.enemies.get_mut(enemy_index) {
                enemy.set_hp(0);
                info!(enemy = %enemy.name, "enemy removed from the overworld");
            }
        }
        debug!(hero_hp = self.hero.hp(), outcome = ?result.outcome, "battle result applied");
    }

    /// Whether the hero has fallen.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.hero.is_alive()
    }

    /// Whether every enemy has been beaten.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        !self.enemies.iter().any(Unit::is_alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_world() -> Overworld {
        let terrain = TerrainMap::new(GridSize::new(OVERWORLD_W, OVERWORLD_H));
        let hero = Unit::new("Hero", Side::Friendly, Coord::new(5, 5), 20, 5, 4);
        let enemies = vec![
            Unit::new("Goblin", Side::Enemy, Coord::new(7, 5), 10, 3, 3),
            Unit::new("Dragon", Side::Enemy, Coord::new(5, 6), 18, 7, 3),
        ];
        Overworld::with_units(terrain, hero, enemies)
    }

    #[test]
    fn test_standard_world_layout() {
        let world = Overworld::new(42, 0.15);
        assert_eq!(world.size(), GridSize::new(20, 15));
        assert_eq!(world.terrain().count(Terrain::Wall), 5);
        assert_eq!(world.hero().pos, Coord::new(5, 5));
        assert_eq!(world.hero().hp(), 20);
        assert_eq!(world.enemies().len(), 2);
        for unit in std::iter::once(world.hero()).chain(world.enemies()) {
            assert!(world.terrain().is_passable(unit.pos));
        }
    }

    #[test]
    fn test_step_moves_and_turns() {
        let mut world = open_world();
        assert_eq!(world.step(Direction::Up), StepOutcome::Moved(Coord::new(5, 4)));
        assert_eq!(world.hero().facing, Direction::Up);
    }

    #[test]
    fn test_step_blocked_by_terrain_and_edge() {
        let mut world = open_world();
        world.terrain.set(Coord::new(4, 5), Terrain::Tree);
        assert_eq!(world.step(Direction::Left), StepOutcome::Blocked);
        assert_eq!(world.hero().pos, Coord::new(5, 5));
        assert_eq!(world.hero().facing, Direction::Left);

        world.hero.pos = Coord::new(0, 0);
        assert_eq!(world.step(Direction::Up), StepOutcome::Blocked);
    }

    #[test]
    fn test_step_into_enemy_starts_encounter() {
        let mut world = open_world();
        assert_eq!(world.step(Direction::Down), StepOutcome::Encounter(1));
        assert_eq!(world.hero().pos, Coord::new(5, 5));
    }

    #[test]
    fn test_interact_finds_adjacent_enemy() {
        let mut world = open_world();
        assert_eq!(world.interact(), Some(1));

        world.enemies[1].set_hp(0);
        assert_eq!(world.interact(), None);

        world.step(Direction::Right);
        assert_eq!(world.interact(), Some(0));
    }

    #[test]
    fn test_apply_victory_removes_fought_enemy() {
        let mut world = open_world();
        world.apply_battle_result(
            1,
            BattleResult {
                outcome: Outcome::Victory,
                hero_hp: 11,
            },
        );
        assert_eq!(world.hero().hp(), 11);
        assert!(world.enemies()[0].is_alive());
        assert!(!world.enemies()[1].is_alive());
        // The beaten enemy no longer blocks or triggers encounters.
        assert_eq!(world.step(Direction::Down), StepOutcome::Moved(Coord::new(5, 6)));
    }

    #[test]
    fn test_apply_defeat_keeps_enemy() {
        let mut world = open_world();
        world.apply_battle_result(
            0,
            BattleResult {
                outcome: Outcome::Defeat,
                hero_hp: 0,
            },
        );
        assert!(world.is_game_over());
        assert!(world.enemies()[0].is_alive());
        assert!(!world.is_cleared());
    }
}
