//! Script command implementation - headless battles driven by an input file.

use super::output::{format_text, JsonBattleSummary};
use super::{init_stderr_logging, load_config, CliError, EnemyArg, OutputFormat, ScenarioArg};
use skirmish::battle::{parse_script, BattleSession};
use skirmish::overworld::Overworld;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the script command.
///
/// # Errors
///
/// Returns an error if the config or script cannot be loaded, or the battle
/// cannot be set up.
pub(crate) fn execute(
    script: &Path,
    enemy: EnemyArg,
    scenario: Option<ScenarioArg>,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    init_stderr_logging();

    let config = load_config(config, None, scenario)?;
    let source = fs::read_to_string(script)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", script.display())))?;
    let inputs = parse_script(&source)?;

    // Fight a copy of the overworld enemy so stats match the real game.
    let world = Overworld::new(config.seed, config.tree_density);
    let foe = world
        .enemies()
        .iter()
        .find(|e| e.name == enemy.name())
        .ok_or_else(|| CliError::new(format!("No enemy named {}", enemy.name())))?;

    let mut session = BattleSession::new(world.hero(), foe, config.battle())?;
    info!(inputs = inputs.len(), enemy = %foe.name, "running script");
    let closed = session.play_through(inputs.iter().copied());

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&session, closed));
        }
        OutputFormat::Json => {
            let summary = JsonBattleSummary::from_session(&session, config.scenario, inputs.len(), closed);
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
