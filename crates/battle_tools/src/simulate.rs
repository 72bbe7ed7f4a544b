//! Headless composition and battle runs.

use battle_core::army::{Army, UnitSummary};
use battle_core::battle::{Battle, BattleConfig, BattleReport, StrikeRecorder};
use battle_core::catalog::UnitCatalog;
use battle_core::composer::{ArmyComposer, ComposerConfig};
use battle_core::error::Result;
use battle_core::grid::Side;
use serde::Serialize;

/// Parameters of a headless battle.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    /// Player budget.
    pub player_points: u32,
    /// Computer budget.
    pub computer_points: u32,
    /// Placement seed; the computer army uses `seed + 1`.
    pub seed: Option<u64>,
    /// Battle configuration.
    pub config: BattleConfig,
}

/// Outcome of a headless battle, ready for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Player army at the start.
    pub player: Vec<UnitSummary>,
    /// Computer army at the start.
    pub computer: Vec<UnitSummary>,
    /// Battle report.
    pub report: BattleReport,
}

/// Compose one army for `side`.
///
/// # Errors
///
/// Returns an error if the army does not fit its placement box.
pub fn compose_army(
    catalog: &UnitCatalog,
    points: u32,
    side: Side,
    seed: Option<u64>,
) -> Result<Army> {
    let mut config = ComposerConfig::default().with_side(side);
    config.seed = seed;
    ArmyComposer::new(config).compose(catalog.archetypes(), points)
}

/// Compose both armies and fight the battle.
///
/// The player army stands on the right, the computer army on the left.
///
/// # Errors
///
/// Returns an error if an army cannot be composed, a targeting strategy fails
/// or the round budget runs out.
pub fn run_simulation(
    catalog: &UnitCatalog,
    request: &SimulationRequest,
) -> Result<(SimulationResult, StrikeRecorder)> {
    let player = compose_army(catalog, request.player_points, Side::Right, request.seed)?;
    let computer = compose_army(
        catalog,
        request.computer_points,
        Side::Left,
        request.seed.map(|s| s.wrapping_add(1)),
    )?;

    let player_start = player.summary();
    let computer_start = computer.summary();

    let mut recorder = StrikeRecorder::default();
    let mut battle = Battle::new(player, computer, request.config.clone());
    let report = battle.run(Some(&mut recorder))?;

    Ok((
        SimulationResult {
            player: player_start,
            computer: computer_start,
            report,
        },
        recorder,
    ))
}
