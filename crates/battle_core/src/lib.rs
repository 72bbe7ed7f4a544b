//! # Battle Core
//!
//! Turn-based tactical battle engine for two armies on a 27×21 grid.
//!
//! This crate contains the game rules only:
//! - No rendering
//! - No file IO
//! - Randomness is confined to unit placement and can be seeded
//!
//! ## Crate Structure
//!
//! - [`composer`] - Budget-constrained army building and placement
//! - [`targeting`] - Front-line eligibility and targeting strategies
//! - [`pathfinding`] - Shortest obstacle-free paths between units
//! - [`battle`] - Round-by-round battle resolution
//! - [`catalog`] - Unit archetype catalog loaded from RON
//! - [`math`] - Fixed-point helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod army;
pub mod battle;
pub mod catalog;
pub mod composer;
pub mod error;
pub mod grid;
pub mod math;
pub mod pathfinding;
pub mod targeting;
pub mod unit;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::army::{Army, UnitSummary};
    pub use crate::battle::{
        Battle, BattleConfig, BattleLog, BattleOutcome, BattleReport, DamageRule, StrikeRecord,
        StrikeRecorder,
    };
    pub use crate::catalog::UnitCatalog;
    pub use crate::composer::{compose, ArmyComposer, ComposerConfig, MAX_COPIES_PER_ARCHETYPE};
    pub use crate::error::{BattleError, Result};
    pub use crate::grid::{Edge, GridPos, Side, HEIGHT, WIDTH};
    pub use crate::math::Fixed;
    pub use crate::pathfinding::{find_path, shortest_path, NavGrid};
    pub use crate::targeting::{
        find_eligible, BattleView, FrontLineStrategy, NearestStrategy, TargetingKind,
        TargetingStrategy, WeakestStrategy,
    };
    pub use crate::unit::{Health, Unit, UnitArchetype, UnitId};
}
