//! Budget-constrained army composition.
//!
//! A single greedy pass: archetypes are ranked by attack per point of cost and
//! each one takes as many copies as the remaining budget allows, up to a
//! per-archetype cap. Selected units are then scattered over the army's
//! placement box without overlap.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::army::Army;
use crate::error::{BattleError, Result};
use crate::grid::{GridPos, Side, PLACEMENT_HEIGHT, PLACEMENT_WIDTH};
use crate::unit::{Unit, UnitArchetype};

/// Most copies of a single archetype an army may contain.
pub const MAX_COPIES_PER_ARCHETYPE: u32 = 11;

/// Configuration for army composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Copies allowed per archetype.
    pub max_copies: u32,
    /// Columns in the placement box.
    pub placement_width: u32,
    /// Rows in the placement box.
    pub placement_height: u32,
    /// Side of the battlefield the army is placed on.
    pub side: Side,
    /// Seed for placement; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_copies: MAX_COPIES_PER_ARCHETYPE,
            placement_width: PLACEMENT_WIDTH,
            placement_height: PLACEMENT_HEIGHT,
            side: Side::Left,
            seed: None,
        }
    }
}

impl ComposerConfig {
    /// Set the side the army is placed on.
    #[must_use]
    pub const fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Set a placement seed for reproducible layouts.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the per-archetype copy cap.
    #[must_use]
    pub const fn with_max_copies(mut self, max_copies: u32) -> Self {
        self.max_copies = max_copies;
        self
    }

    /// Number of cells in the placement box.
    #[must_use]
    pub const fn placement_cells(&self) -> usize {
        (self.placement_width as usize) * (self.placement_height as usize)
    }
}

/// Builds armies from a unit catalog and a point budget.
#[derive(Debug, Clone, Default)]
pub struct ArmyComposer {
    config: ComposerConfig,
}

impl ArmyComposer {
    /// Create a composer with the given configuration.
    #[must_use]
    pub const fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose an army, placing it with the configured RNG.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::PlacementExhausted`] if more units were selected
    /// than the placement box can hold.
    pub fn compose(&self, archetypes: &[UnitArchetype], max_points: u32) -> Result<Army> {
        match self.config.seed {
            Some(seed) => {
                self.compose_with_rng(archetypes, max_points, &mut StdRng::seed_from_u64(seed))
            }
            None => self.compose_with_rng(archetypes, max_points, &mut rand::thread_rng()),
        }
    }

    /// Compose an army, drawing placement coordinates from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::PlacementExhausted`] if more units were selected
    /// than the placement box can hold.
    pub fn compose_with_rng<R: Rng + ?Sized>(
        &self,
        archetypes: &[UnitArchetype],
        max_points: u32,
        rng: &mut R,
    ) -> Result<Army> {
        tracing::info!(archetypes = archetypes.len(), max_points, "Composing army");

        let mut army = Army::new(self.config.side);

        for archetype in rank_by_efficiency(archetypes) {
            let copies = self.copies_affordable(archetype, max_points, army.points());
            tracing::debug!(
                unit = %archetype.name,
                attack = archetype.base_attack,
                cost = archetype.cost,
                copies,
                "Considering archetype"
            );
            for index in 0..copies {
                let unit = archetype.instantiate(format!("{} {index}", archetype.unit_type));
                army.add_unit(unit);
            }
        }

        self.place_units(army.units_mut(), rng)?;

        tracing::info!(
            units = army.len(),
            points = army.points(),
            max_points,
            "Army composed"
        );
        Ok(army)
    }

    /// Copies of `archetype` that fit the remaining budget, capped per archetype.
    fn copies_affordable(&self, archetype: &UnitArchetype, max_points: u32, spent: u32) -> u32 {
        if archetype.cost == 0 {
            return 0;
        }
        let remaining = max_points.saturating_sub(spent);
        (remaining / archetype.cost).min(self.config.max_copies)
    }

    /// Assign every unit a distinct random cell of the placement box.
    fn place_units<R: Rng + ?Sized>(&self, units: &mut [Unit], rng: &mut R) -> Result<()> {
        let available = self.config.placement_cells();
        if units.len() > available {
            return Err(BattleError::PlacementExhausted {
                requested: units.len(),
                available,
            });
        }

        let first_column = self.config.side.first_column(self.config.placement_width);
        let mut occupied = HashSet::with_capacity(units.len());

        for unit in units.iter_mut() {
            let pos = loop {
                let candidate = GridPos::new(
                    first_column + rng.gen_range(0..self.config.placement_width),
                    rng.gen_range(0..self.config.placement_height),
                );
                if occupied.insert(candidate) {
                    break candidate;
                }
            };
            tracing::debug!(unit = unit.name(), position = %pos, "Unit placed");
            unit.set_position(pos);
        }
        Ok(())
    }
}

/// Order archetypes by descending attack-per-cost ratio.
///
/// The sort is stable, so ties keep catalog order. Zero-cost archetypes have
/// no ratio and are dropped.
fn rank_by_efficiency(archetypes: &[UnitArchetype]) -> Vec<&UnitArchetype> {
    let mut ranked: Vec<_> = archetypes
        .iter()
        .filter(|a| {
            if a.cost == 0 {
                tracing::warn!(unit = %a.name, "Skipping archetype with zero cost");
            }
            a.cost > 0
        })
        .collect();
    ranked.sort_by(|a, b| b.cmp_efficiency(a));
    ranked
}

/// Compose a left-side army with the default configuration.
///
/// # Errors
///
/// Returns [`BattleError::PlacementExhausted`] if more units were selected
/// than the placement box can hold.
pub fn compose(archetypes: &[UnitArchetype], max_points: u32) -> Result<Army> {
    ArmyComposer::default().compose(archetypes, max_points)
}
