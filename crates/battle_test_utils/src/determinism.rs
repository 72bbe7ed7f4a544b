//! Determinism testing utilities.
//!
//! Placement is the only source of randomness in the battle core. With a
//! seeded composer, the same catalog and budgets must produce the same battle
//! every time: same layout, same strikes, same outcome.

use battle_core::battle::{Battle, BattleConfig, BattleReport, StrikeRecorder};
use battle_core::composer::{ArmyComposer, ComposerConfig};
use battle_core::error::Result;
use battle_core::grid::Side;
use battle_core::unit::UnitArchetype;

/// A reproducible battle setup.
#[derive(Debug, Clone)]
pub struct SeededMatchup {
    /// Catalog both armies are built from.
    pub catalog: Vec<UnitArchetype>,
    /// Player budget.
    pub player_points: u32,
    /// Computer budget.
    pub computer_points: u32,
    /// Seed for the player's placement; the computer uses `seed + 1`.
    pub seed: u64,
    /// Battle configuration.
    pub config: BattleConfig,
}

/// Everything observable about one run of a matchup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleTrace {
    /// Final report, or the error message if the battle ended abnormally.
    pub report: std::result::Result<BattleReport, String>,
    /// Every strike as `(attacker, target, damage, remaining health)`.
    pub strikes: Vec<(String, String, u32, u32)>,
}

impl SeededMatchup {
    /// Compose both armies and fight the battle once.
    ///
    /// # Errors
    ///
    /// Returns an error if either army cannot be composed.
    pub fn play(&self) -> Result<BattleTrace> {
        let player = ArmyComposer::new(
            ComposerConfig::default()
                .with_side(Side::Right)
                .with_seed(self.seed),
        )
        .compose(&self.catalog, self.player_points)?;
        let computer = ArmyComposer::new(
            ComposerConfig::default()
                .with_side(Side::Left)
                .with_seed(self.seed.wrapping_add(1)),
        )
        .compose(&self.catalog, self.computer_points)?;

        let mut recorder = StrikeRecorder::default();
        let mut battle = Battle::new(player, computer, self.config.clone());
        let report = battle.run(Some(&mut recorder)).map_err(|e| e.to_string());

        Ok(BattleTrace {
            report,
            strikes: recorder
                .strikes
                .into_iter()
                .map(|s| (s.attacker, s.target, s.damage, s.remaining_health))
                .collect(),
        })
    }
}

/// Result of a determinism check.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical traces.
    pub is_deterministic: bool,
    /// Trace of each run.
    pub traces: Vec<BattleTrace>,
}

impl DeterminismResult {
    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if any run diverged from the first.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let strike_counts: Vec<_> = self.traces.iter().map(|t| t.strikes.len()).collect();
            panic!(
                "Battle is non-deterministic!\n\
                 Runs: {}\n\
                 Strikes per run: {:?}",
                self.traces.len(),
                strike_counts
            );
        }
    }
}

/// Play `matchup` `runs` times and compare the traces.
///
/// # Errors
///
/// Returns an error if an army cannot be composed.
pub fn verify_determinism(matchup: &SeededMatchup, runs: usize) -> Result<DeterminismResult> {
    let traces = (0..runs)
        .map(|_| matchup.play())
        .collect::<Result<Vec<_>>>()?;
    let is_deterministic = traces.windows(2).all(|w| w[0] == w[1]);
    Ok(DeterminismResult {
        is_deterministic,
        traces,
    })
}

/// Proptest strategies for battle inputs.
pub mod strategies {
    use battle_core::grid::{GridPos, HEIGHT, WIDTH};
    use battle_core::targeting::TargetingKind;
    use battle_core::unit::UnitArchetype;
    use proptest::prelude::*;

    /// Generate a cell on the battlefield.
    pub fn arb_grid_pos() -> impl Strategy<Value = GridPos> {
        (0..WIDTH, 0..HEIGHT).prop_map(|(x, y)| GridPos::new(x, y))
    }

    /// Generate one of the built-in targeting kinds.
    pub fn arb_targeting_kind() -> impl Strategy<Value = TargetingKind> {
        prop_oneof![
            Just(TargetingKind::FrontLine),
            Just(TargetingKind::Nearest),
            Just(TargetingKind::Weakest),
        ]
    }

    /// Generate an archetype with positive stats.
    ///
    /// The type tag is `T{index}` so catalogs stay free of duplicates.
    pub fn arb_archetype(index: usize) -> impl Strategy<Value = UnitArchetype> {
        (1u32..200, 1u32..50, 1u32..60, arb_targeting_kind()).prop_map(
            move |(health, attack, cost, targeting)| {
                UnitArchetype::new(format!("T{index}"), health, attack, cost)
                    .with_targeting(targeting)
            },
        )
    }

    /// Generate a catalog of one to `max_len - 1` archetypes.
    pub fn arb_catalog(max_len: usize) -> impl Strategy<Value = Vec<UnitArchetype>> {
        (1..max_len).prop_flat_map(|len| (0..len).map(arb_archetype).collect::<Vec<_>>())
    }
}
