//! Roster seeding for a new battle.
//!
//! Stats of the auxiliary units are fixed here rather than loaded from data.

use serde::{Deserialize, Serialize};

use crate::battle::{Coord, GridSize, Side, Unit};

/// Movement granted to the friendly lead in battle.
pub const LEAD_MOVEMENT: u32 = 4;

/// Movement granted to the enemy lead in battle.
pub const FOE_MOVEMENT: u32 = 3;

/// Which units join the two contacting units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// One unit per side.
    Duel,
    /// The hero's party against the foe and its minions.
    #[default]
    Party,
}

/// Friendly and enemy rosters, lead unit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rosters {
    /// Player-controlled units.
    pub friendly: Vec<Unit>,
    /// AI-controlled units.
    pub enemies: Vec<Unit>,
}

impl Scenario {
    /// Build both rosters from copies of the two contacting units.
    ///
    /// The hero's current hp, max hp, attack and facing carry over; the
    /// foe keeps its hp, attack and name. Positions are fixed per scenario.
    #[must_use]
    pub fn build(self, hero: &Unit, foe: &Unit, size: GridSize) -> Rosters {
        let mid = size.height / 2;
        let front = 1;
        let back = size.width.saturating_sub(2);

        let lead = Unit::new(
            hero.name.clone(),
            Side::Friendly,
            Coord::new(front, mid),
            hero.max_hp(),
            hero.atk,
            LEAD_MOVEMENT,
        )
        .with_hp(hero.hp())
        .facing(hero.facing);

        let boss = Unit::new(
            foe.name.clone(),
            Side::Enemy,
            Coord::new(back, mid),
            foe.max_hp(),
            foe.atk,
            FOE_MOVEMENT,
        )
        .with_hp(foe.hp())
        .facing(foe.facing);

        let mut friendly = vec![lead];
        let mut enemies = vec![boss];

        if self == Scenario::Party {
            let upper = mid.saturating_sub(2);
            let lower = (mid + 2).min(size.height.saturating_sub(1));

            friendly.push(
                Unit::new("Archer", Side::Friendly, Coord::new(front, upper), 12, 4, 3).with_range(2, 3),
            );
            friendly.push(
                Unit::new("Lancer", Side::Friendly, Coord::new(front, lower), 14, 4, 3).with_range(1, 2),
            );

            let minion = format!("{} Minion", foe.name);
            enemies.push(Unit::new(minion.clone(), Side::Enemy, Coord::new(back, upper), 6, 2, 3));
            enemies.push(Unit::new(minion, Side::Enemy, Coord::new(back, lower), 6, 2, 3));
        }

        Rosters { friendly, enemies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Direction;

    fn overworld_pair() -> (Unit, Unit) {
        let hero = Unit::new("Hero", Side::Friendly, Coord::new(5, 5), 20, 5, 4)
            .with_hp(13)
            .facing(Direction::Right);
        let foe = Unit::new("Goblin", Side::Enemy, Coord::new(10, 8), 10, 3, 0);
        (hero, foe)
    }

    #[test]
    fn test_duel_places_leads() {
        let (hero, foe) = overworld_pair();
        let rosters = Scenario::Duel.build(&hero, &foe, GridSize::BATTLE);

        assert_eq!(rosters.friendly.len(), 1);
        assert_eq!(rosters.enemies.len(), 1);

        let lead = &rosters.friendly[0];
        assert_eq!(lead.pos, Coord::new(1, 3));
        assert_eq!(lead.hp(), 13);
        assert_eq!(lead.max_hp(), 20);
        assert_eq!(lead.movement, LEAD_MOVEMENT);
        assert_eq!(lead.facing, Direction::Right);

        let boss = &rosters.enemies[0];
        assert_eq!(boss.pos, Coord::new(6, 3));
        assert_eq!(boss.movement, FOE_MOVEMENT);
    }

    #[test]
    fn test_party_adds_auxiliaries() {
        let (hero, foe) = overworld_pair();
        let rosters = Scenario::Party.build(&hero, &foe, GridSize::BATTLE);

        assert_eq!(rosters.friendly.len(), 3);
        assert_eq!(rosters.enemies.len(), 3);
        assert_eq!(rosters.friendly[1].min_range, 2);
        assert_eq!(rosters.enemies[2].name, "Goblin Minion");

        let mut tiles: Vec<_> = rosters
            .friendly
            .iter()
            .chain(&rosters.enemies)
            .map(|u| u.pos)
            .collect();
        tiles.sort();
        tiles.dedup();
        assert_eq!(tiles.len(), 6, "no two units share a tile");
        assert!(tiles.iter().all(|c| GridSize::BATTLE.contains(*c)));
    }

    #[test]
    fn test_battle_copies_do_not_alias() {
        let (hero, foe) = overworld_pair();
        let mut rosters = Scenario::Duel.build(&hero, &foe, GridSize::BATTLE);
        rosters.friendly[0].take_damage(5);
        assert_eq!(hero.hp(), 13);
    }
}
