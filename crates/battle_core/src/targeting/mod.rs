//! Target selection.
//!
//! Every unit carries a [`TargetingStrategy`] that the battle loop asks for a
//! target once per half-round. Strategies are pluggable values; the catalog
//! picks one of the built-in variants through [`TargetingKind`].

mod eligibility;
mod strategies;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::army::Army;
use crate::error::Result;
use crate::grid::Side;
use crate::unit::{Unit, UnitId};

pub use eligibility::find_eligible;
pub use strategies::{FrontLineStrategy, NearestStrategy, WeakestStrategy};

/// Read-only view of the battle handed to a targeting strategy.
#[derive(Debug, Clone, Copy)]
pub struct BattleView<'a> {
    /// Army the attacker belongs to.
    pub allies: &'a Army,
    /// Army under attack.
    pub defenders: &'a Army,
}

impl<'a> BattleView<'a> {
    /// Side the defending army stands on.
    #[must_use]
    pub fn defender_side(&self) -> Side {
        self.defenders.side()
    }

    /// Every unit on the battlefield, allies first.
    pub fn all_units(&self) -> impl Iterator<Item = &'a Unit> + Clone {
        self.allies.units().iter().chain(self.defenders.units())
    }
}

/// Strategy for picking an attack target.
///
/// Implementations must be deterministic for a given view.
pub trait TargetingStrategy: fmt::Debug + Send + Sync {
    /// Pick a defender to strike, by ID within `view.defenders`.
    ///
    /// `Ok(None)` means the attacker holds this turn. An error interrupts the
    /// whole battle.
    fn choose_target(&self, attacker: &Unit, view: &BattleView<'_>) -> Result<Option<UnitId>>;

    /// Returns the strategy name for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Built-in strategies selectable from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetingKind {
    /// Closest reachable unit on the enemy's front line.
    #[default]
    FrontLine,
    /// Closest living enemy by Manhattan distance.
    Nearest,
    /// Living enemy with the least health.
    Weakest,
}

impl TargetingKind {
    /// Create the strategy value for this kind.
    #[must_use]
    pub fn strategy(self) -> Arc<dyn TargetingStrategy> {
        match self {
            Self::FrontLine => Arc::new(FrontLineStrategy),
            Self::Nearest => Arc::new(NearestStrategy),
            Self::Weakest => Arc::new(WeakestStrategy),
        }
    }
}
