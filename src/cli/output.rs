//! Output formatting utilities for CLI.

use serde::Serialize;
use skirmish::battle::{BattleResult, BattleSession, Outcome, Phase, Scenario, Unit};
use skirmish::render::render_battle_ascii;

/// JSON-serializable battle summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonBattleSummary {
    /// Enemy lead name.
    pub(super) enemy: String,
    /// Roster seeding policy.
    pub(super) scenario: Scenario,
    /// Number of script inputs parsed.
    pub(super) inputs: usize,
    /// Phase when the script ended.
    pub(super) phase: Phase,
    /// Friendly round reached.
    pub(super) round: u32,
    /// Outcome (null if the battle is still running).
    pub(super) outcome: Option<Outcome>,
    /// Whether the script confirmed out of the finished battle.
    pub(super) closed: bool,
    /// Final hp of the friendly lead.
    pub(super) hero_hp: u32,
    /// Last status message.
    pub(super) message: String,
    /// Friendly roster.
    pub(super) friendly: Vec<JsonUnit>,
    /// Enemy roster.
    pub(super) enemies: Vec<JsonUnit>,
    /// Recent event log.
    pub(super) log: Vec<String>,
}

/// JSON-serializable unit state.
#[derive(Debug, Serialize)]
pub(super) struct JsonUnit {
    /// Display name.
    pub(super) name: String,
    /// Column.
    pub(super) x: u16,
    /// Row.
    pub(super) y: u16,
    /// Current hit points.
    pub(super) hp: u32,
    /// Maximum hit points.
    pub(super) max_hp: u32,
    /// Acted this round.
    pub(super) acted: bool,
}

impl From<&Unit> for JsonUnit {
    fn from(unit: &Unit) -> Self {
        Self {
            name: unit.name.clone(),
            x: unit.pos.x,
            y: unit.pos.y,
            hp: unit.hp(),
            max_hp: unit.max_hp(),
            acted: unit.has_acted,
        }
    }
}

impl JsonBattleSummary {
    /// Summarise a session after a script ran.
    pub(super) fn from_session(
        session: &BattleSession,
        scenario: Scenario,
        inputs: usize,
        closed: Option<BattleResult>,
    ) -> Self {
        let result = closed.or_else(|| session.result());
        Self {
            enemy: session
                .enemies()
                .first()
                .map_or_else(String::new, |e| e.name.clone()),
            scenario,
            inputs,
            phase: session.phase(),
            round: session.round(),
            outcome: result.map(|r| r.outcome),
            closed: closed.is_some(),
            hero_hp: session.friendly().first().map_or(0, Unit::hp),
            message: session.message().to_string(),
            friendly: session.friendly().iter().map(JsonUnit::from).collect(),
            enemies: session.enemies().iter().map(JsonUnit::from).collect(),
            log: session.log().map(str::to_string).collect(),
        }
    }
}

/// Format a finished script run as human-readable text.
pub(super) fn format_text(session: &BattleSession, closed: Option<BattleResult>) -> String {
    let mut output = render_battle_ascii(session);
    output.push('\n');

    match closed.or_else(|| session.result()) {
        Some(result) => {
            let outcome = match result.outcome {
                Outcome::Victory => "Victory",
                Outcome::Defeat => "Defeat",
            };
            output.push_str(&format!("Outcome: {outcome} (hero hp {})\n", result.hero_hp));
        }
        None => {
            output.push_str(&format!(
                "Outcome: undecided ({} phase, round {})\n",
                session.phase().label(),
                session.round()
            ));
        }
    }

    output
}
