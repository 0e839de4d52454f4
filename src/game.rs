//! Scene controller bridging the overworld and battles.
//!
//! The controller owns the overworld and at most one battle session. On
//! contact it seeds a session from copies of the two units, forwards input
//! and elapsed time while the battle runs, and writes the result back once
//! the player confirms out of a finished battle.

use std::time::Duration;

use tracing::{info, warn};

use crate::battle::{BattleInput, BattleResult, BattleSession, Direction, Outcome};
use crate::config::GameConfig;
use crate::overworld::{Overworld, StepOutcome};

/// Which scene is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Roaming the overworld.
    Overworld,
    /// Fighting a battle.
    Battle,
}

/// Input accepted by the game, independent of key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Step the hero or move the battle cursor.
    Move(Direction),
    /// Confirm in battle.
    Confirm,
    /// Cancel the bound unit in battle.
    Cancel,
    /// Skip the bound unit's attack.
    Skip,
    /// Forfeit the battle.
    Forfeit,
    /// Engage an adjacent enemy on the overworld.
    Interact,
}

#[derive(Debug)]
struct ActiveBattle {
    session: BattleSession,
    /// Overworld roster index of the enemy being fought.
    enemy_index: usize,
}

/// Top-level game state.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    world: Overworld,
    battle: Option<ActiveBattle>,
    message: String,
}

impl Game {
    /// Start a new game on the standard overworld.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let world = Overworld::new(config.seed, config.tree_density);
        Self::with_world(config, world)
    }

    /// Start a game on an explicit overworld.
    #[must_use]
    pub fn with_world(config: GameConfig, world: Overworld) -> Self {
        Self {
            config,
            world,
            battle: None,
            message: "Explore. Walk into an enemy or press Space next to one.".to_string(),
        }
    }

    /// Active scene.
    #[must_use]
    pub const fn scene(&self) -> Scene {
        if self.battle.is_some() {
            Scene::Battle
        } else {
            Scene::Overworld
        }
    }

    /// The persistent world.
    #[must_use]
    pub const fn overworld(&self) -> &Overworld {
        &self.world
    }

    /// The running battle, if any.
    #[must_use]
    pub fn battle(&self) -> Option<&BattleSession> {
        self.battle.as_ref().map(|b| &b.session)
    }

    /// Overworld message (battle messages live on the session).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the hero has fallen.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.battle.is_none() && self.world.is_game_over()
    }

    /// Whether every overworld enemy is beaten.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.battle.is_none() && self.world.is_cleared()
    }

    /// Feed one input to the active scene.
    ///
    /// Returns the battle result when this input closed a battle.
    pub fn handle_input(&mut self, input: GameInput) -> Option<BattleResult> {
        if let Some(active) = &mut self.battle {
            let battle_input = match input {
                GameInput::Move(direction) => BattleInput::Cursor(direction),
                GameInput::Confirm => BattleInput::Confirm,
                GameInput::Cancel => BattleInput::Cancel,
                GameInput::Skip => BattleInput::Skip,
                GameInput::Forfeit => BattleInput::Forfeit,
                GameInput::Interact => return None,
            };
            let result = active.session.handle_input(battle_input)?;
            let enemy_index = active.enemy_index;
            self.finish_battle(enemy_index, result);
            return Some(result);
        }

        if self.world.is_game_over() {
            return None;
        }

        match input {
            GameInput::Move(direction) => match self.world.step(direction) {
                StepOutcome::Encounter(index) => self.start_battle(index),
                StepOutcome::Moved(_) => self.message.clear(),
                StepOutcome::Blocked => self.message = "The way is blocked.".to_string(),
            },
            GameInput::Interact => match self.world.interact() {
                Some(index) => self.start_battle(index),
                None => self.message = "Nobody to engage here.".to_string(),
            },
            _ => {}
        }
        None
    }

    /// Advance the clock for the running battle.
    pub fn update(&mut self, elapsed: Duration) {
        if let Some(active) = &mut self.battle {
            active.session.update(elapsed);
        }
    }

    fn start_battle(&mut self, enemy_index: usize) {
        let Some(foe) = self.world.enemies().get(enemy_index) else {
            return;
        };
        match BattleSession::new(self.world.hero(), foe, self.config.battle()) {
            Ok(session) => {
                info!(enemy = %foe.name, "encounter");
                self.battle = Some(ActiveBattle {
                    session,
                    enemy_index,
                });
            }
            Err(err) => {
                warn!(%err, "could not start battle");
                self.message = format!("Cannot fight: {err}");
            }
        }
    }

    fn finish_battle(&mut self, enemy_index: usize, result: BattleResult) {
        self.battle = None;
        self.world.apply_battle_result(enemy_index, result);

        let name = self
            .world
            .enemies()
            .get(enemy_index)
            .map_or("the enemy", |e| e.name.as_str());
        self.message = match result.outcome {
            Outcome::Victory if self.world.is_game_over() => {
                format!("{name} defeated, but the hero has fallen. Game over.")
            }
            Outcome::Victory if self.world.is_cleared() => {
                format!("{name} defeated. The land is at peace.")
            }
            Outcome::Victory => format!("{name} defeated. Hero has {} hp.", result.hero_hp),
            Outcome::Defeat if self.world.is_game_over() => "The hero has fallen. Game over.".to_string(),
            Outcome::Defeat => format!("Retreated from {name}. Hero has {} hp.", result.hero_hp),
        };
    }
}
