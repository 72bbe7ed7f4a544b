//! Unit archetypes and the unit instances built from them.
//!
//! An archetype is a read-only blueprint loaded from the catalog. A unit is a
//! full copy of an archetype with its own name, health, position and
//! targeting strategy.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;
use crate::math::{compare_ratios, percent, Fixed};
use crate::targeting::{TargetingKind, TargetingStrategy};

/// Identifier of a unit, unique within its owning army.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Health of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: u32,
    /// Maximum health points.
    pub max: u32,
}

impl Health {
    /// Create new health at full.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Check if the unit is dead (health reached zero).
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Apply damage, returning actual damage dealt.
    /// Uses saturating subtraction to prevent underflow.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current = self.current.saturating_sub(actual);
        actual
    }
}

/// Unit template from the catalog.
///
/// # Example RON
///
/// ```ron
/// UnitArchetype(
///     name: "Knight",
///     unit_type: "Knight",
///     health: 100,
///     base_attack: 20,
///     cost: 30,
///     attack_type: "melee",
///     attack_bonuses: { "Archer": 150 },
///     defence_bonuses: { "Pikeman": 50 },
///     targeting: FrontLine,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitArchetype {
    /// Display name of the archetype.
    pub name: String,

    /// Type tag; instances are named after it.
    pub unit_type: String,

    /// Maximum health points.
    pub health: u32,

    /// Damage dealt per strike.
    pub base_attack: u32,

    /// Point cost of one instance.
    pub cost: u32,

    /// Damage type of this unit's attacks.
    pub attack_type: String,

    /// Attack multiplier in percent against enemy unit types (100 = neutral).
    #[serde(default)]
    pub attack_bonuses: BTreeMap<String, u32>,

    /// Incoming damage multiplier in percent from attacker unit types (100 = neutral).
    #[serde(default)]
    pub defence_bonuses: BTreeMap<String, u32>,

    /// Built-in strategy attached to every instance.
    #[serde(default)]
    pub targeting: TargetingKind,
}

impl UnitArchetype {
    /// Create an archetype with neutral bonus tables and front-line targeting.
    #[must_use]
    pub fn new(unit_type: impl Into<String>, health: u32, base_attack: u32, cost: u32) -> Self {
        let unit_type = unit_type.into();
        Self {
            name: unit_type.clone(),
            unit_type,
            health,
            base_attack,
            cost,
            attack_type: "melee".to_string(),
            attack_bonuses: BTreeMap::new(),
            defence_bonuses: BTreeMap::new(),
            targeting: TargetingKind::default(),
        }
    }

    /// Builder method to set the targeting strategy.
    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetingKind) -> Self {
        self.targeting = targeting;
        self
    }

    /// Builder method to add an attack bonus against an enemy type.
    #[must_use]
    pub fn with_attack_bonus(mut self, enemy_type: impl Into<String>, percent: u32) -> Self {
        self.attack_bonuses.insert(enemy_type.into(), percent);
        self
    }

    /// Builder method to add a defence bonus against an attacker type.
    #[must_use]
    pub fn with_defence_bonus(mut self, attacker_type: impl Into<String>, percent: u32) -> Self {
        self.defence_bonuses.insert(attacker_type.into(), percent);
        self
    }

    /// Compare attack-per-cost ratios exactly. Both costs must be non-zero.
    #[must_use]
    pub fn cmp_efficiency(&self, other: &Self) -> Ordering {
        compare_ratios(self.base_attack, self.cost, other.base_attack, other.cost)
    }

    /// Create an unplaced instance with the given display name.
    #[must_use]
    pub fn instantiate(&self, name: impl Into<String>) -> Unit {
        Unit {
            id: UnitId::default(),
            name: name.into(),
            unit_type: self.unit_type.clone(),
            health: Health::new(self.health),
            base_attack: self.base_attack,
            cost: self.cost,
            attack_type: self.attack_type.clone(),
            attack_bonuses: self.attack_bonuses.clone(),
            defence_bonuses: self.defence_bonuses.clone(),
            position: None,
            targeting: self.targeting.strategy(),
        }
    }
}

/// A unit taking part in a battle.
#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    name: String,
    unit_type: String,
    health: Health,
    base_attack: u32,
    cost: u32,
    attack_type: String,
    attack_bonuses: BTreeMap<String, u32>,
    defence_bonuses: BTreeMap<String, u32>,
    position: Option<GridPos>,
    targeting: Arc<dyn TargetingStrategy>,
}

impl Unit {
    /// Create an unplaced instance named after the archetype.
    #[must_use]
    pub fn from_archetype(archetype: &UnitArchetype) -> Self {
        archetype.instantiate(archetype.name.clone())
    }

    /// Builder method to place the unit on a cell.
    #[must_use]
    pub fn placed_at(mut self, position: GridPos) -> Self {
        self.position = Some(position);
        self
    }

    /// Builder method to attach a custom targeting strategy.
    #[must_use]
    pub fn with_targeting(mut self, targeting: Arc<dyn TargetingStrategy>) -> Self {
        self.targeting = targeting;
        self
    }

    /// Identifier within the owning army.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag.
    #[must_use]
    pub fn unit_type(&self) -> &str {
        &self.unit_type
    }

    /// Current and maximum health.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Damage dealt per strike.
    #[must_use]
    pub const fn base_attack(&self) -> u32 {
        self.base_attack
    }

    /// Point cost.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Damage type of this unit's attacks.
    #[must_use]
    pub fn attack_type(&self) -> &str {
        &self.attack_type
    }

    /// Cell occupied by the unit, `None` while unplaced.
    #[must_use]
    pub const fn position(&self) -> Option<GridPos> {
        self.position
    }

    /// Strategy used to pick a target each half-round.
    #[must_use]
    pub fn targeting(&self) -> &Arc<dyn TargetingStrategy> {
        &self.targeting
    }

    /// A unit is alive while its health is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Attack multiplier against an enemy unit type.
    #[must_use]
    pub fn attack_multiplier_vs(&self, enemy_type: &str) -> Fixed {
        self.attack_bonuses
            .get(enemy_type)
            .map_or(Fixed::ONE, |&p| percent(p))
    }

    /// Incoming damage multiplier from an attacker unit type.
    #[must_use]
    pub fn defence_multiplier_vs(&self, attacker_type: &str) -> Fixed {
        self.defence_bonuses
            .get(attacker_type)
            .map_or(Fixed::ONE, |&p| percent(p))
    }

    pub(crate) fn set_id(&mut self, id: UnitId) {
        self.id = id;
    }

    pub(crate) fn set_position(&mut self, position: GridPos) {
        self.position = Some(position);
    }

    pub(crate) fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health.apply_damage(amount)
    }
}
