//! CLI command implementations for Skirmish.

pub(crate) mod play;
pub(crate) mod script;

mod output;

use clap::ValueEnum;
use skirmish::battle::Scenario;
use skirmish::{ConfigError, GameConfig, ScriptError, SetupError};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Output format for the `script` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Final frame and outcome as text.
    Text,
    /// Machine-readable JSON summary.
    Json,
}

/// Roster seeding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScenarioArg {
    /// One unit per side.
    Duel,
    /// Hero's party against the foe and its minions.
    Party,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Duel => Scenario::Duel,
            ScenarioArg::Party => Scenario::Party,
        }
    }
}

/// Overworld enemy to fight in a scripted battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum EnemyArg {
    /// The goblin.
    Goblin,
    /// The dragon.
    Dragon,
}

impl EnemyArg {
    /// Overworld display name.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            EnemyArg::Goblin => "Goblin",
            EnemyArg::Dragon => "Dragon",
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ScriptError> for CliError {
    fn from(e: ScriptError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SetupError> for CliError {
    fn from(e: SetupError) -> Self {
        Self::new(format!("Failed to start battle: {e}"))
    }
}

/// Load the config file if given, then apply flag overrides.
pub(crate) fn load_config(
    path: Option<&Path>,
    seed: Option<u64>,
    scenario: Option<ScenarioArg>,
) -> Result<GameConfig, CliError> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(scenario) = scenario {
        config.scenario = scenario.into();
    }
    Ok(config)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr.
pub(crate) fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file, or nowhere if no path is given.
pub(crate) fn init_file_logging(path: Option<&Path>) -> Result<(), CliError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .map_err(|e| CliError::new(format!("Failed to create log file {}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
