//! Army container.
//!
//! An army owns its units in insertion order and keeps a running point total.
//! Row views used for target eligibility are borrowed projections of the
//! owned units, never copies.

use serde::{Deserialize, Serialize};

use crate::grid::{Side, HEIGHT, WIDTH};
use crate::unit::{Unit, UnitId};

/// Ordered collection of units belonging to one side of a battle.
#[derive(Debug, Clone, Default)]
pub struct Army {
    /// Side of the battlefield the army stands on.
    side: Side,
    /// Units in insertion order.
    units: Vec<Unit>,
    /// Sum of the costs of all units ever added.
    points: u32,
    /// Next unit ID to assign.
    next_id: u32,
}

impl Army {
    /// Create an empty army on the given side.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            units: Vec::new(),
            points: 0,
            next_id: 1,
        }
    }

    /// Side of the battlefield the army stands on.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Running point total.
    ///
    /// Removing a unit never refunds its cost.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Units in insertion order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the army has no units left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Add a unit, assign its ID and charge its cost.
    pub fn add_unit(&mut self, mut unit: Unit) -> UnitId {
        let id = UnitId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        unit.set_id(id);
        self.points = self.points.saturating_add(unit.cost());
        self.units.push(unit);
        id
    }

    /// Get a unit by ID.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id() == id)
    }

    /// Get a mutable reference to a unit by ID.
    pub(crate) fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id() == id)
    }

    /// Remove a unit by ID, keeping the order of the rest.
    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id() == id)?;
        Some(self.units.remove(index))
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    /// Living units in insertion order.
    pub fn living(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    /// Project living, placed units onto battlefield rows.
    ///
    /// Returns `HEIGHT` rows of `WIDTH` slots; slot `x` of row `y` holds the
    /// unit standing on `(x, y)`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<&Unit>>> {
        let mut rows = vec![vec![None; WIDTH as usize]; HEIGHT as usize];
        for unit in self.living() {
            if let Some(pos) = unit.position().filter(|p| p.in_bounds()) {
                rows[pos.y as usize][pos.x as usize] = Some(unit);
            }
        }
        rows
    }

    /// Snapshot of the surviving units for reports.
    #[must_use]
    pub fn summary(&self) -> Vec<UnitSummary> {
        self.units.iter().map(UnitSummary::from).collect()
    }
}

/// Serializable snapshot of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSummary {
    /// Display name.
    pub name: String,
    /// Type tag.
    pub unit_type: String,
    /// Damage type of its attacks.
    pub attack_type: String,
    /// Current health.
    pub health: u32,
    /// Cell occupied, if placed.
    pub position: Option<(u32, u32)>,
}

impl From<&Unit> for UnitSummary {
    fn from(unit: &Unit) -> Self {
        Self {
            name: unit.name().to_string(),
            unit_type: unit.unit_type().to_string(),
            attack_type: unit.attack_type().to_string(),
            health: unit.health().current,
            position: unit.position().map(|p| (p.x, p.y)),
        }
    }
}
