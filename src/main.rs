//! Skirmish CLI - play the game in a terminal or run scripted battles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Skirmish - a grid-based tactical battle engine
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Tree scattering seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Roster seeding policy (overrides the config file)
        #[arg(long)]
        scenario: Option<cli::ScenarioArg>,

        /// Write logs to this file (the terminal is taken by the UI)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run a battle headlessly from an input script
    Script {
        /// Script file: whitespace separated inputs, `#` comments
        #[arg(required = true)]
        script: PathBuf,

        /// Overworld enemy to fight
        #[arg(short, long, default_value = "goblin")]
        enemy: cli::EnemyArg,

        /// Roster seeding policy (overrides the config file)
        #[arg(long)]
        scenario: Option<cli::ScenarioArg>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            seed,
            config,
            scenario,
            log_file,
        } => cli::play::execute(seed, config.as_deref(), scenario, log_file.as_deref()),

        Commands::Script {
            script,
            enemy,
            scenario,
            config,
            format,
        } => cli::script::execute(&script, enemy, scenario, config.as_deref(), format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
