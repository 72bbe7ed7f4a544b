//! Test fixtures and helpers.
//!
//! Pre-built catalogs, units and armies for consistent testing.

use std::sync::Arc;

use battle_core::army::Army;
use battle_core::error::{BattleError, Result};
use battle_core::grid::{GridPos, Side};
use battle_core::targeting::{BattleView, TargetingKind, TargetingStrategy};
use battle_core::unit::{Unit, UnitArchetype, UnitId};

/// A small four-archetype catalog.
///
/// Efficiency order is Archer (1.5), Swordsman (1.0), Pikeman (0.8),
/// Knight (0.67).
#[must_use]
pub fn standard_catalog() -> Vec<UnitArchetype> {
    vec![
        UnitArchetype::new("Knight", 100, 20, 30),
        UnitArchetype::new("Archer", 50, 15, 10),
        UnitArchetype::new("Swordsman", 60, 12, 12),
        UnitArchetype::new("Pikeman", 70, 8, 10),
    ]
}

/// The same catalog as [`standard_catalog`], as RON text.
pub const STANDARD_CATALOG_RON: &str = r#"UnitCatalog(
    units: [
        UnitArchetype(name: "Knight", unit_type: "Knight", health: 100, base_attack: 20, cost: 30, attack_type: "melee"),
        UnitArchetype(name: "Archer", unit_type: "Archer", health: 50, base_attack: 15, cost: 10, attack_type: "melee"),
        UnitArchetype(name: "Swordsman", unit_type: "Swordsman", health: 60, base_attack: 12, cost: 12, attack_type: "melee"),
        UnitArchetype(name: "Pikeman", unit_type: "Pikeman", health: 70, base_attack: 8, cost: 10, attack_type: "melee"),
    ],
)"#;

/// A placed unit of type `"Soldier"` costing one point.
#[must_use]
pub fn soldier(name: &str, health: u32, attack: u32, x: u32, y: u32) -> Unit {
    UnitArchetype::new("Soldier", health, attack, 1)
        .instantiate(name)
        .placed_at(GridPos::new(x, y))
}

/// Like [`soldier`], but targeting the nearest enemy instead of the front line.
#[must_use]
pub fn skirmisher(name: &str, health: u32, attack: u32, x: u32, y: u32) -> Unit {
    UnitArchetype::new("Soldier", health, attack, 1)
        .with_targeting(TargetingKind::Nearest)
        .instantiate(name)
        .placed_at(GridPos::new(x, y))
}

/// Build an army on `side` from the given units, in order.
#[must_use]
pub fn army_of(side: Side, units: impl IntoIterator<Item = Unit>) -> Army {
    let mut army = Army::new(side);
    for unit in units {
        army.add_unit(unit);
    }
    army
}

/// Always picks the same defender.
#[derive(Debug, Clone, Copy)]
pub struct PinnedTarget(pub UnitId);

impl TargetingStrategy for PinnedTarget {
    fn choose_target(&self, _attacker: &Unit, _view: &BattleView<'_>) -> Result<Option<UnitId>> {
        Ok(Some(self.0))
    }

    fn name(&self) -> &'static str {
        "PinnedTarget"
    }
}

/// Never picks a target.
#[derive(Debug, Clone, Copy)]
pub struct HoldFire;

impl TargetingStrategy for HoldFire {
    fn choose_target(&self, _attacker: &Unit, _view: &BattleView<'_>) -> Result<Option<UnitId>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "HoldFire"
    }
}

/// Always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingTargeting(pub &'static str);

impl TargetingStrategy for FailingTargeting {
    fn choose_target(&self, _attacker: &Unit, _view: &BattleView<'_>) -> Result<Option<UnitId>> {
        Err(BattleError::InvalidState(self.0.to_string()))
    }

    fn name(&self) -> &'static str {
        "FailingTargeting"
    }
}

/// Shorthand for wrapping a strategy for [`Unit::with_targeting`].
#[must_use]
pub fn strategy<S: TargetingStrategy + 'static>(s: S) -> Arc<dyn TargetingStrategy> {
    Arc::new(s)
}
