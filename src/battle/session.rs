//! Battle session: rosters, phase machine and the read-only query surface.
//!
//! A session advances only on discrete inputs ([`BattleSession::handle_input`])
//! and on elapsed time ([`BattleSession::update`]), which fires the deferred
//! enemy phase once its delay has run out.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::battle::{
    ai, invariants, legal_targets, reachable, resolve_attack, AiStyle, BattleInput, Board, Coord,
    Direction, EnemyAction, GridSize, Scenario, Side, TileSet, Unit, UnitRef,
};
use crate::error::SetupError;

/// Recent event messages kept for the HUD.
pub const LOG_CAPACITY: usize = 6;

/// Default delay between the last friendly action and the enemy phase.
pub const DEFAULT_ENEMY_PHASE_DELAY: Duration = Duration::from_millis(400);

/// State of the turn machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Cursor roams; confirm on a ready friendly unit binds it.
    FriendlySelect,
    /// A unit is bound and picks a destination.
    FriendlyMove,
    /// The bound unit has moved and picks a target or skips.
    FriendlyAttack,
    /// Every friendly unit is spent; the AI acts once the delay elapses.
    EnemyPhase,
    /// Every enemy is down.
    Victory,
    /// Every friendly unit is down, or the player forfeited.
    Defeat,
}

impl Phase {
    /// Whether the battle is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::Defeat)
    }

    /// Short label for HUDs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::FriendlySelect => "SELECT",
            Phase::FriendlyMove => "MOVE",
            Phase::FriendlyAttack => "ATTACK",
            Phase::EnemyPhase => "ENEMY TURN",
            Phase::Victory => "VICTORY",
            Phase::Defeat => "DEFEAT",
        }
    }
}

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// All enemies defeated.
    Victory,
    /// All friendly units defeated or the battle was forfeited.
    Defeat,
}

/// What a finished session hands back to the overworld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BattleResult {
    /// How the battle ended.
    pub outcome: Outcome,
    /// Final hp of the friendly lead unit.
    pub hero_hp: u32,
}

/// Tunables for one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleConfig {
    /// Pause before the enemy phase runs.
    pub enemy_phase_delay: Duration,
    /// Step preference order for the AI.
    pub ai_style: AiStyle,
    /// Which auxiliary units join the battle.
    pub scenario: Scenario,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            enemy_phase_delay: DEFAULT_ENEMY_PHASE_DELAY,
            ai_style: AiStyle::default(),
            scenario: Scenario::default(),
        }
    }
}

/// One tactical encounter.
#[derive(Debug, Clone)]
pub struct BattleSession {
    size: GridSize,
    friendly: Vec<Unit>,
    enemies: Vec<Unit>,
    phase: Phase,
    cursor: Coord,
    /// Index of the bound unit in the friendly roster.
    selected: Option<usize>,
    /// Where the bound unit stood before moving.
    origin: Option<Coord>,
    reachable: TileSet,
    targets: TileSet,
    message: String,
    log: VecDeque<String>,
    enemy_timer: Option<Duration>,
    round: u32,
    config: BattleConfig,
}

impl BattleSession {
    /// Start a battle between copies of two contacting overworld units.
    ///
    /// # Errors
    ///
    /// Returns an error if the seeded rosters are invalid, e.g. the hero is
    /// already at zero hp.
    pub fn new(hero: &Unit, foe: &Unit, config: BattleConfig) -> Result<Self, SetupError> {
        let rosters = config.scenario.build(hero, foe, GridSize::BATTLE);
        Self::from_rosters(GridSize::BATTLE, rosters.friendly, rosters.enemies, config)
    }

    /// Start a battle from explicit rosters.
    ///
    /// Units are re-tagged with the side of the roster they are in and their
    /// acted flags are cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if a roster has no living unit, a unit is off the
    /// grid, or two living units share a tile.
    pub fn from_rosters(
        size: GridSize,
        mut friendly: Vec<Unit>,
        mut enemies: Vec<Unit>,
        config: BattleConfig,
    ) -> Result<Self, SetupError> {
        for unit in &mut friendly {
            unit.side = Side::Friendly;
            unit.has_acted = false;
        }
        for unit in &mut enemies {
            unit.side = Side::Enemy;
            unit.has_acted = false;
        }

        validate_rosters(size, &friendly, &enemies)?;

        let cursor = friendly
            .iter()
            .find(|u| u.is_alive())
            .map_or(Coord::new(size.width / 2, size.height / 2), |u| u.pos);

        info!(
            friendly = friendly.len(),
            enemies = enemies.len(),
            scenario = ?config.scenario,
            "battle started"
        );

        let mut session = Self {
            size,
            friendly,
            enemies,
            phase: Phase::FriendlySelect,
            cursor,
            selected: None,
            origin: None,
            reachable: TileSet::new(),
            targets: TileSet::new(),
            message: String::new(),
            log: VecDeque::with_capacity(LOG_CAPACITY),
            enemy_timer: None,
            round: 1,
            config,
        };
        session.announce("Battle start! Select a unit.");
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Cursor tile.
    #[must_use]
    pub const fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Friendly roster, defeated units included.
    #[must_use]
    pub fn friendly(&self) -> &[Unit] {
        &self.friendly
    }

    /// Enemy roster, defeated units included.
    #[must_use]
    pub fn enemies(&self) -> &[Unit] {
        &self.enemies
    }

    /// Index of the bound friendly unit.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The bound friendly unit.
    #[must_use]
    pub fn selected(&self) -> Option<&Unit> {
        self.selected.and_then(|index| self.friendly.get(index))
    }

    /// Tiles the bound unit may move to (empty outside the move phase).
    #[must_use]
    pub const fn reachable(&self) -> &TileSet {
        &self.reachable
    }

    /// Tiles the bound unit may attack (empty outside the attack phase).
    #[must_use]
    pub const fn targets(&self) -> &TileSet {
        &self.targets
    }

    /// Most recent status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Recent event messages, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Friendly round number, starting at 1.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Whether the enemy phase is waiting on its delay.
    #[must_use]
    pub const fn enemy_phase_pending(&self) -> bool {
        self.enemy_timer.is_some()
    }

    /// Occupancy view over both rosters.
    #[must_use]
    pub fn board(&self) -> Board<'_> {
        Board::new(self.size, &self.friendly, &self.enemies)
    }

    /// Final result once the battle is over.
    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        let outcome = match self.phase {
            Phase::Victory => Outcome::Victory,
            Phase::Defeat => Outcome::Defeat,
            _ => return None,
        };
        Some(BattleResult {
            outcome,
            hero_hp: self.friendly.first().map_or(0, Unit::hp),
        })
    }

    // ------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------

    /// Feed one input event.
    ///
    /// Returns the battle result when the player confirms out of a finished
    /// battle; the session should then be discarded.
    pub fn handle_input(&mut self, input: BattleInput) -> Option<BattleResult> {
        if self.phase.is_terminal() {
            return match input {
                BattleInput::Confirm => {
                    let result = self.result();
                    info!(?result, "battle closed");
                    result
                }
                _ => None,
            };
        }

        if self.phase == Phase::EnemyPhase {
            return None;
        }

        match input {
            BattleInput::Cursor(direction) => {
                self.cursor = self.size.clamp_step(self.cursor, direction);
            }
            BattleInput::Confirm => match self.phase {
                Phase::FriendlySelect => self.confirm_select(),
                Phase::FriendlyMove => self.confirm_move(),
                Phase::FriendlyAttack => self.confirm_attack(),
                _ => {}
            },
            BattleInput::Cancel => self.cancel(),
            BattleInput::Skip => self.skip(),
            BattleInput::Forfeit => self.forfeit(),
        }

        invariants::assert_invariants(self);
        None
    }

    /// Advance the clock, running the enemy phase once its delay elapses.
    pub fn update(&mut self, elapsed: Duration) {
        let Some(remaining) = self.enemy_timer else {
            return;
        };
        if elapsed >= remaining {
            self.run_enemy_phase();
        } else {
            self.enemy_timer = Some(remaining - elapsed);
        }
    }

    /// Run the enemy phase now, skipping any remaining delay.
    ///
    /// Does nothing outside [`Phase::EnemyPhase`].
    pub fn run_enemy_phase(&mut self) {
        if self.phase != Phase::EnemyPhase {
            return;
        }
        self.enemy_timer = None;
        debug!(round = self.round, "enemy phase");

        for index in 0..self.enemies.len() {
            if !self.enemies[index].is_alive() {
                continue;
            }
            if !self.board().any_alive(Side::Friendly) {
                break;
            }

            let action = ai::act(
                self.config.ai_style,
                self.size,
                index,
                &mut self.friendly,
                &mut self.enemies,
            );
            let name = &self.enemies[index].name;
            match action {
                EnemyAction::Attack { report, .. } => self.announce(report.message()),
                EnemyAction::Advance { .. } => {
                    let text = format!("{name} advances.");
                    self.announce(text);
                }
                EnemyAction::Hold => {
                    let text = format!("{name} holds its ground.");
                    self.announce(text);
                }
            }
        }

        if self.board().any_alive(Side::Friendly) {
            for unit in &mut self.friendly {
                unit.has_acted = false;
            }
            self.round += 1;
            if let Some(pos) = self.next_ready_pos(None) {
                self.cursor = pos;
            }
            self.set_phase(Phase::FriendlySelect);
        } else {
            self.announce("Defeat...");
            self.set_phase(Phase::Defeat);
        }

        invariants::assert_invariants(self);
    }

    /// Feed a sequence of inputs, running each pending enemy phase at once
    /// instead of waiting for its delay.
    ///
    /// Stops early and returns the result when an input closes the battle.
    pub fn play_through<I>(&mut self, inputs: I) -> Option<BattleResult>
    where
        I: IntoIterator<Item = BattleInput>,
    {
        for input in inputs {
            if let Some(result) = self.handle_input(input) {
                return Some(result);
            }
            self.run_enemy_phase();
        }
        None
    }

    fn confirm_select(&mut self) {
        let Some((unit_ref, unit)) = self.board().unit_at(self.cursor) else {
            self.advise("No unit there.");
            return;
        };
        match unit_ref {
            UnitRef {
                side: Side::Friendly,
                index,
            } if unit.is_ready() => {
                let name = unit.name.clone();
                let origin = unit.pos;
                self.reachable = reachable(&self.board(), &self.friendly[index]);
                self.selected = Some(index);
                self.origin = Some(origin);
                self.set_phase(Phase::FriendlyMove);
                self.advise(format!("{name}: choose a destination."));
            }
            UnitRef {
                side: Side::Friendly,
                ..
            } => {
                let text = format!("{} has already acted.", unit.name);
                self.advise(text);
            }
            UnitRef {
                side: Side::Enemy,
                ..
            } => self.advise("Select one of your units."),
        }
    }

    fn confirm_move(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if !self.reachable.contains(&self.cursor) {
            self.advise("Cannot move there.");
            return;
        }

        let unit = &mut self.friendly[index];
        if let Some(facing) = Direction::towards(unit.pos, self.cursor) {
            unit.facing = facing;
        }
        unit.pos = self.cursor;
        let name = unit.name.clone();

        self.reachable.clear();
        self.targets = legal_targets(&self.friendly[index], &self.enemies);
        self.set_phase(Phase::FriendlyAttack);

        if self.targets.is_empty() {
            self.advise(format!("{name} moved. No targets in range, skip to end."));
        } else {
            self.advise(format!("{name} moved. Choose a target."));
        }
    }

    fn confirm_attack(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if !self.targets.contains(&self.cursor) {
            self.advise("No target there.");
            return;
        }
        let Some(target) = self
            .enemies
            .iter()
            .position(|e| e.is_alive() && e.pos == self.cursor)
        else {
            self.advise("No target there.");
            return;
        };

        let report = resolve_attack(&self.friendly[index], &mut self.enemies[target]);
        debug!(attacker = %report.attacker, defender = %report.defender, damage = report.damage, "attack");
        self.friendly[index].has_acted = true;
        self.announce(report.message());
        self.finish_action();
    }

    fn skip(&mut self) {
        match (self.phase, self.selected) {
            (Phase::FriendlyAttack, Some(index)) => {
                self.friendly[index].has_acted = true;
                let text = format!("{} waits.", self.friendly[index].name);
                self.announce(text);
                self.finish_action();
            }
            (Phase::FriendlyMove, _) => self.advise("Choose a destination first."),
            _ => {}
        }
    }

    fn cancel(&mut self) {
        let (Some(index), Some(origin)) = (self.selected, self.origin) else {
            return;
        };
        let unit = &mut self.friendly[index];
        unit.pos = origin;
        let text = format!("{} stands down.", unit.name);

        self.cursor = origin;
        self.release();
        self.set_phase(Phase::FriendlySelect);
        self.advise(text);
    }

    fn forfeit(&mut self) {
        if self.selected.is_some() {
            self.advise("Cancel the current unit before forfeiting.");
            return;
        }
        self.announce("You fled. Defeat...");
        self.set_phase(Phase::Defeat);
    }

    /// Post-action check after a unit attacks or skips.
    fn finish_action(&mut self) {
        let last = self.selected;
        self.release();

        if !self.board().any_alive(Side::Enemy) {
            self.announce("Victory!");
            self.set_phase(Phase::Victory);
            return;
        }

        match self.next_ready_pos(last) {
            Some(pos) => {
                self.cursor = pos;
                self.set_phase(Phase::FriendlySelect);
            }
            None => {
                self.enemy_timer = Some(self.config.enemy_phase_delay);
                self.set_phase(Phase::EnemyPhase);
            }
        }
    }

    /// Position of the next ready friendly unit after `after`, wrapping.
    fn next_ready_pos(&self, after: Option<usize>) -> Option<Coord> {
        let len = self.friendly.len();
        let start = after.map_or(0, |index| index + 1);
        (0..len)
            .map(|offset| &self.friendly[(start + offset) % len])
            .find(|unit| unit.is_ready())
            .map(|unit| unit.pos)
    }

    fn release(&mut self) {
        self.selected = None;
        self.origin = None;
        self.reachable.clear();
        self.targets.clear();
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
        if phase.is_terminal() {
            info!(?phase, round = self.round, "battle decided");
        }
    }

    /// Set an advisory message that is not worth keeping in the log.
    fn advise(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Set the message and record it in the log.
    fn announce(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(message.clone());
        self.message = message;
    }
}

fn validate_rosters(size: GridSize, friendly: &[Unit], enemies: &[Unit]) -> Result<(), SetupError> {
    if !friendly.iter().any(Unit::is_alive) {
        return Err(SetupError::EmptyRoster(Side::Friendly));
    }
    if !enemies.iter().any(Unit::is_alive) {
        return Err(SetupError::EmptyRoster(Side::Enemy));
    }

    // Defeated units stay on the board for the HUD, so they are bounds-checked too.
    if let Some(unit) = friendly.iter().chain(enemies).find(|u| !size.contains(u.pos)) {
        return Err(SetupError::OutOfBounds {
            name: unit.name.clone(),
            pos: unit.pos,
        });
    }

    let living: Vec<&Unit> = friendly.iter().chain(enemies).filter(|u| u.is_alive()).collect();
    for (i, unit) in living.iter().enumerate() {
        if let Some(other) = living[i + 1..].iter().find(|o| o.pos == unit.pos) {
            return Err(SetupError::Overlap {
                first: unit.name.clone(),
                second: other.name.clone(),
                pos: unit.pos,
            });
        }
    }
    Ok(())
}
