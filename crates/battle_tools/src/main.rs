//! Battle development tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a catalog file
//! cargo run -p battle_tools -- validate --catalog assets/data/units.ron
//!
//! # Preview the army a budget buys
//! cargo run -p battle_tools -- compose --points 300 --seed 7
//!
//! # Fight a full battle and print the report as JSON
//! cargo run -p battle_tools -- simulate --player-points 300 --computer-points 250 --json
//! ```
//!
//! Logs go to stderr; reports go to stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battle_core::battle::BattleConfig;
use battle_core::catalog::UnitCatalog;
use battle_core::grid::Side;
use battle_tools::catalog_loader::{load_catalog, resolve_catalog_path};
use battle_tools::simulate::{compose_army, run_simulation, SimulationRequest};
use battle_tools::validate::validate_catalog_file;

#[derive(Parser)]
#[command(name = "battle-tools")]
#[command(about = "Development tools for the tactical battle core")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Unit catalog file (defaults to $BATTLE_CATALOG, then assets/data/units.ron)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Left => Side::Left,
            SideArg::Right => Side::Right,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the unit catalog
    Validate,

    /// Compose an army and print its layout
    Compose {
        /// Point budget
        #[arg(short, long)]
        points: u32,

        /// Side of the battlefield to place the army on
        #[arg(long, value_enum, default_value = "left")]
        side: SideArg,

        /// Placement seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compose both armies and fight a battle
    Simulate {
        /// Player budget
        #[arg(long)]
        player_points: u32,

        /// Computer budget
        #[arg(long)]
        computer_points: u32,

        /// Placement seed
        #[arg(long)]
        seed: Option<u64>,

        /// Round budget before the battle is abandoned
        #[arg(long, default_value = "1000")]
        max_rounds: u32,

        /// Print every strike
        #[arg(long)]
        strikes: bool,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let catalog_path = resolve_catalog_path(cli.catalog);

    match cli.command {
        Commands::Validate => cmd_validate(&catalog_path),
        Commands::Compose {
            points,
            side,
            seed,
            json,
        } => {
            let catalog = load_or_exit(&catalog_path);
            cmd_compose(&catalog, points, side.into(), seed, json);
        }
        Commands::Simulate {
            player_points,
            computer_points,
            seed,
            max_rounds,
            strikes,
            json,
        } => {
            let catalog = load_or_exit(&catalog_path);
            let request = SimulationRequest {
                player_points,
                computer_points,
                seed,
                config: BattleConfig::default().with_max_rounds(max_rounds),
            };
            cmd_simulate(&catalog, &request, strikes, json);
        }
    }
}

fn load_or_exit(path: &std::path::Path) -> UnitCatalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_validate(path: &std::path::Path) {
    tracing::info!("Validating catalog: {}", path.display());
    match validate_catalog_file(path) {
        Ok(count) => tracing::info!("Validation passed ({count} archetypes)"),
        Err(e) => {
            tracing::error!("Validation failed: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_compose(catalog: &UnitCatalog, points: u32, side: Side, seed: Option<u64>, json: bool) {
    let army = match compose_army(catalog, points, side, seed) {
        Ok(army) => army,
        Err(e) => {
            tracing::error!("Composition failed: {e}");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&army.summary());
        return;
    }

    println!("Army: {} units, {} / {points} points", army.len(), army.points());
    for unit in army.units() {
        let position = unit
            .position()
            .map_or_else(|| "unplaced".to_string(), |p| p.to_string());
        println!(
            "  {:<16} hp {:>4}  atk {:>3} {:<8} at {position}",
            unit.name(),
            unit.health().current,
            unit.base_attack(),
            unit.attack_type()
        );
    }
}

fn cmd_simulate(catalog: &UnitCatalog, request: &SimulationRequest, strikes: bool, json: bool) {
    let (result, recorder) = match run_simulation(catalog, request) {
        Ok(done) => done,
        Err(e) => {
            tracing::error!("Battle ended abnormally: {e}");
            std::process::exit(1);
        }
    };

    if strikes {
        for s in &recorder.strikes {
            eprintln!(
                "{} -> {}: {} damage ({} left)",
                s.attacker, s.target, s.damage, s.remaining_health
            );
        }
    }

    if json {
        print_json(&result);
        return;
    }

    let report = &result.report;
    println!("Outcome: {:?}", report.outcome);
    println!("Rounds:  {}", report.rounds);
    println!("Strikes: {}", report.strikes);
    println!(
        "Survivors: player {} / {}, computer {} / {}",
        report.player_survivors.len(),
        result.player.len(),
        report.computer_survivors.len(),
        result.computer.len()
    );
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}
