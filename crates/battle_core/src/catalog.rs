//! Unit catalog parsed from RON.
//!
//! **Note:** This module performs no IO. Reading catalog files is the job of
//! the caller (see `battle_tools`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, Result};
use crate::unit::UnitArchetype;

/// The archetypes an army can be built from.
///
/// # Example RON
///
/// ```ron
/// UnitCatalog(
///     units: [
///         UnitArchetype(
///             name: "Archer",
///             unit_type: "Archer",
///             health: 50,
///             base_attack: 12,
///             cost: 20,
///             attack_type: "ranged",
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCatalog {
    /// Archetypes in catalog order.
    pub units: Vec<UnitArchetype>,
}

impl UnitCatalog {
    /// Parse a catalog from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::CatalogParse`] if the text is not a valid catalog.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| BattleError::CatalogParse {
            message: e.to_string(),
        })
    }

    /// Archetypes in catalog order.
    #[must_use]
    pub fn archetypes(&self) -> &[UnitArchetype] {
        &self.units
    }

    /// Check every archetype and collect all problems found.
    ///
    /// Zero-cost archetypes are tolerated by the composer (it skips them) but
    /// are still reported here.
    #[must_use]
    pub fn validate(&self) -> Vec<BattleError> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for unit in &self.units {
            let mut invalid = |reason: &str| {
                problems.push(BattleError::InvalidArchetype {
                    unit_type: unit.unit_type.clone(),
                    reason: reason.to_string(),
                });
            };

            if unit.unit_type.trim().is_empty() {
                invalid("unit type is empty");
            }
            if unit.cost == 0 {
                invalid("cost must be positive");
            }
            if unit.health == 0 {
                invalid("health must be positive");
            }
            if !seen.insert(unit.unit_type.as_str()) {
                invalid("duplicate unit type");
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::TargetingKind;

    const CATALOG: &str = r#"UnitCatalog(
        units: [
            UnitArchetype(
                name: "Knight",
                unit_type: "Knight",
                health: 100,
                base_attack: 20,
                cost: 30,
                attack_type: "melee",
                attack_bonuses: { "Archer": 150 },
            ),
            UnitArchetype(
                name: "Archer",
                unit_type: "Archer",
                health: 50,
                base_attack: 12,
                cost: 20,
                attack_type: "ranged",
                targeting: Weakest,
            ),
        ],
    )"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = UnitCatalog::from_ron_str(CATALOG).unwrap();
        let [knight, archer] = catalog.archetypes() else {
            panic!("expected two archetypes");
        };
        assert_eq!(knight.attack_bonuses["Archer"], 150);
        assert_eq!(archer.targeting, TargetingKind::Weakest);
        assert_eq!(archer.attack_type, "ranged");
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_parse_error() {
        let result = UnitCatalog::from_ron_str("UnitCatalog(units: [Broken])");
        assert!(matches!(result, Err(BattleError::CatalogParse { .. })));
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let catalog = UnitCatalog {
            units: vec![
                UnitArchetype::new("Knight", 100, 20, 0),
                UnitArchetype::new("Knight", 0, 20, 10),
                UnitArchetype::new(" ", 10, 1, 1),
            ],
        };
        let problems = catalog.validate();
        assert_eq!(problems.len(), 4);
    }
}
