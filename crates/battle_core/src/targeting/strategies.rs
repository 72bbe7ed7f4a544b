//! Built-in targeting strategies.

use super::{find_eligible, BattleView, TargetingStrategy};
use crate::error::Result;
use crate::grid::Side;
use crate::pathfinding::find_path;
use crate::unit::{Unit, UnitId};

/// Melee targeting along the front line.
///
/// **Behavior:**
/// - Only units exposed on the defenders' front line are considered
/// - Picks the one with the shortest obstacle-free path from the attacker
/// - Unreachable units are skipped; ties go to the first in row order
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontLineStrategy;

impl TargetingStrategy for FrontLineStrategy {
    fn choose_target(&self, attacker: &Unit, view: &BattleView<'_>) -> Result<Option<UnitId>> {
        let rows = view.defenders.rows();
        let eligible = find_eligible(&rows, view.defender_side() == Side::Left);

        let best = eligible
            .into_iter()
            .filter_map(|target| {
                let path = find_path(attacker, target, view.all_units());
                (!path.is_empty()).then_some((path.len(), target.id()))
            })
            .min_by_key(|&(steps, _)| steps);

        Ok(best.map(|(_, id)| id))
    }

    fn name(&self) -> &'static str {
        "FrontLine"
    }
}

/// Targets the closest living enemy by Manhattan distance.
///
/// Ties are broken by army order. An unplaced attacker takes the first
/// living enemy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestStrategy;

impl TargetingStrategy for NearestStrategy {
    fn choose_target(&self, attacker: &Unit, view: &BattleView<'_>) -> Result<Option<UnitId>> {
        let Some(origin) = attacker.position() else {
            return Ok(view.defenders.living().next().map(Unit::id));
        };

        Ok(view
            .defenders
            .living()
            .min_by_key(|u| u.position().map_or(u32::MAX, |p| origin.manhattan_distance(p)))
            .map(Unit::id))
    }

    fn name(&self) -> &'static str {
        "Nearest"
    }
}

/// Targets the living enemy with the least current health.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakestStrategy;

impl TargetingStrategy for WeakestStrategy {
    fn choose_target(&self, _attacker: &Unit, view: &BattleView<'_>) -> Result<Option<UnitId>> {
        Ok(view
            .defenders
            .living()
            .min_by_key(|u| u.health().current)
            .map(Unit::id))
    }

    fn name(&self) -> &'static str {
        "Weakest"
    }
}
