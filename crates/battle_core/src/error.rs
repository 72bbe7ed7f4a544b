//! Error types for army composition and battle resolution.

use thiserror::Error;

/// Result type alias using [`BattleError`].
pub type Result<T> = std::result::Result<T, BattleError>;

/// Top-level error type for the battle core.
///
/// Unreachable paths and stale targets are ordinary outcomes and never
/// surface as errors.
#[derive(Debug, Error)]
pub enum BattleError {
    /// The army holds more units than the placement box has cells.
    #[error("Cannot place {requested} units: placement grid has only {available} cells")]
    PlacementExhausted {
        /// Units waiting for a coordinate.
        requested: usize,
        /// Cells in the placement box.
        available: usize,
    },

    /// Catalog text could not be parsed.
    #[error("Failed to parse unit catalog: {message}")]
    CatalogParse {
        /// Parser error message.
        message: String,
    },

    /// A catalog entry failed validation.
    #[error("Invalid archetype '{unit_type}': {reason}")]
    InvalidArchetype {
        /// Type tag of the offending archetype.
        unit_type: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A unit's targeting strategy failed; the battle cannot continue.
    #[error("Targeting failed for '{attacker}': {message}")]
    Targeting {
        /// Name of the attacking unit.
        attacker: String,
        /// Error message reported by the strategy.
        message: String,
    },

    /// The host-imposed round budget ran out before either army was eliminated.
    #[error("Battle interrupted after {rounds} rounds without a winner")]
    RoundLimitExceeded {
        /// Rounds played before the interruption.
        rounds: u32,
    },

    /// Invalid battle state.
    #[error("Invalid battle state: {0}")]
    InvalidState(String),
}
