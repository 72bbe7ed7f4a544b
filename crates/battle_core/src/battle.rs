//! Battle resolution loop.
//!
//! A round is two half-rounds: every player unit strikes the computer army,
//! then every computer unit strikes the player army. Defenders killed during a
//! half-round are removed at once, so later attackers in the same half-round
//! never see them and they get no counter-attack. Rounds repeat until one
//! army is empty.
//!
//! # Example
//!
//! ```
//! use battle_core::prelude::*;
//!
//! let catalog = vec![UnitArchetype::new("Swordsman", 40, 10, 10)];
//! let player = ArmyComposer::new(ComposerConfig::default().with_side(Side::Right).with_seed(1))
//!     .compose(&catalog, 50)
//!     .unwrap();
//! let computer = ArmyComposer::new(ComposerConfig::default().with_seed(2))
//!     .compose(&catalog, 30)
//!     .unwrap();
//!
//! let mut battle = Battle::new(player, computer, BattleConfig::default().with_max_rounds(500));
//! let report = battle.run(None).unwrap();
//! assert_ne!(report.outcome, BattleOutcome::Ongoing);
//! ```

use serde::{Deserialize, Serialize};

use crate::army::{Army, UnitSummary};
use crate::error::{BattleError, Result};
use crate::math::scale;
use crate::targeting::BattleView;
use crate::unit::Unit;

/// State of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Both armies still have units.
    Ongoing,
    /// The player army was eliminated.
    PlayerLost,
    /// The computer army was eliminated.
    ComputerLost,
}

impl BattleOutcome {
    /// Whether the battle has ended.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    /// Outcome for the given armies; the player is checked first.
    fn evaluate(player: &Army, computer: &Army) -> Self {
        if player.is_empty() {
            Self::PlayerLost
        } else if computer.is_empty() {
            Self::ComputerLost
        } else {
            Self::Ongoing
        }
    }
}

/// How strike damage is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageRule {
    /// Flat base attack; bonus tables are ignored.
    #[default]
    Flat,
    /// Base attack scaled by the attacker's attack bonus against the target
    /// type and the target's defence bonus against the attacker type.
    WithBonuses,
}

impl DamageRule {
    /// Damage `attacker` deals to `target` under this rule.
    #[must_use]
    pub fn damage(self, attacker: &Unit, target: &Unit) -> u32 {
        match self {
            Self::Flat => attacker.base_attack(),
            Self::WithBonuses => {
                let multiplier = attacker
                    .attack_multiplier_vs(target.unit_type())
                    .saturating_mul(target.defence_multiplier_vs(attacker.unit_type()));
                scale(attacker.base_attack(), multiplier)
            }
        }
    }
}

/// Configuration for a battle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleConfig {
    /// Round budget; `None` runs until one army is eliminated.
    pub max_rounds: Option<u32>,
    /// Damage computation.
    pub damage_rule: DamageRule,
}

impl BattleConfig {
    /// Set a round budget.
    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Set the damage rule.
    #[must_use]
    pub const fn with_damage_rule(mut self, damage_rule: DamageRule) -> Self {
        self.damage_rule = damage_rule;
        self
    }
}

/// Observer notified after every successful strike.
///
/// Logging never changes the course of a battle.
pub trait BattleLog {
    /// Called after `target` took damage from `attacker`.
    fn record_strike(&mut self, attacker: &Unit, target: &Unit, damage: u32);
}

/// One strike as seen by a [`StrikeRecorder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeRecord {
    /// Attacker's name.
    pub attacker: String,
    /// Target's name.
    pub target: String,
    /// Damage dealt.
    pub damage: u32,
    /// Target health after the strike.
    pub remaining_health: u32,
}

/// Battle log that keeps every strike in memory.
#[derive(Debug, Clone, Default)]
pub struct StrikeRecorder {
    /// Strikes in the order they happened.
    pub strikes: Vec<StrikeRecord>,
}

impl BattleLog for StrikeRecorder {
    fn record_strike(&mut self, attacker: &Unit, target: &Unit, damage: u32) {
        self.strikes.push(StrikeRecord {
            attacker: attacker.name().to_string(),
            target: target.name().to_string(),
            damage,
            remaining_health: target.health().current,
        });
    }
}

/// Summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    /// Terminal outcome.
    pub outcome: BattleOutcome,
    /// Rounds played.
    pub rounds: u32,
    /// Successful strikes.
    pub strikes: u32,
    /// Player units left standing.
    pub player_survivors: Vec<UnitSummary>,
    /// Computer units left standing.
    pub computer_survivors: Vec<UnitSummary>,
}

/// A battle between the player army and the computer army.
#[derive(Debug, Clone)]
pub struct Battle {
    player: Army,
    computer: Army,
    config: BattleConfig,
    outcome: BattleOutcome,
    rounds: u32,
    strikes: u32,
}

impl Battle {
    /// Create a battle. An empty army loses immediately.
    #[must_use]
    pub fn new(player: Army, computer: Army, config: BattleConfig) -> Self {
        let outcome = BattleOutcome::evaluate(&player, &computer);
        Self {
            player,
            computer,
            config,
            outcome,
            rounds: 0,
            strikes: 0,
        }
    }

    /// Current outcome.
    #[must_use]
    pub const fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    /// Rounds played so far.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The player army.
    #[must_use]
    pub const fn player(&self) -> &Army {
        &self.player
    }

    /// The computer army.
    #[must_use]
    pub const fn computer(&self) -> &Army {
        &self.computer
    }

    /// Play one full round: the player's half-round, then the computer's.
    ///
    /// Does nothing once the battle has finished.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::Targeting`] if a targeting strategy fails.
    pub fn play_round(&mut self, mut log: Option<&mut (dyn BattleLog + '_)>) -> Result<BattleOutcome> {
        if self.outcome.is_finished() {
            return Ok(self.outcome);
        }

        self.rounds += 1;
        tracing::debug!(round = self.rounds, "Round started");

        self.strikes += execute_attacks(
            &self.player,
            &mut self.computer,
            self.config.damage_rule,
            log.as_deref_mut(),
        )?;
        self.strikes += execute_attacks(
            &self.computer,
            &mut self.player,
            self.config.damage_rule,
            log.as_deref_mut(),
        )?;

        self.outcome = BattleOutcome::evaluate(&self.player, &self.computer);
        Ok(self.outcome)
    }

    /// Play rounds until one army is eliminated.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::Targeting`] if a targeting strategy fails, or
    /// [`BattleError::RoundLimitExceeded`] if the configured round budget runs
    /// out first. Either way the battle ended abnormally.
    pub fn run(&mut self, mut log: Option<&mut (dyn BattleLog + '_)>) -> Result<BattleReport> {
        tracing::info!(
            player_units = self.player.len(),
            computer_units = self.computer.len(),
            "Battle started"
        );

        while !self.outcome.is_finished() {
            if let Some(limit) = self.config.max_rounds {
                if self.rounds >= limit {
                    tracing::warn!(rounds = self.rounds, "Round budget exhausted");
                    return Err(BattleError::RoundLimitExceeded {
                        rounds: self.rounds,
                    });
                }
            }
            self.play_round(log.as_deref_mut())?;
        }

        match self.outcome {
            BattleOutcome::PlayerLost => tracing::info!(rounds = self.rounds, "Player army lost"),
            _ => tracing::info!(rounds = self.rounds, "Computer army lost"),
        }
        Ok(self.report())
    }

    /// Snapshot of the battle so far.
    #[must_use]
    pub fn report(&self) -> BattleReport {
        BattleReport {
            outcome: self.outcome,
            rounds: self.rounds,
            strikes: self.strikes,
            player_survivors: self.player.summary(),
            computer_survivors: self.computer.summary(),
        }
    }

    /// Hand back both armies.
    #[must_use]
    pub fn into_armies(self) -> (Army, Army) {
        (self.player, self.computer)
    }
}

/// One half-round: every living attacker strikes once at its chosen target.
///
/// Returns the number of strikes that landed.
fn execute_attacks(
    attackers: &Army,
    defenders: &mut Army,
    damage_rule: DamageRule,
    mut log: Option<&mut (dyn BattleLog + '_)>,
) -> Result<u32> {
    let mut strikes = 0;

    for attacker in attackers.units() {
        if defenders.is_empty() {
            tracing::debug!("Defending army is empty; half-round over");
            break;
        }
        if !attacker.is_alive() {
            continue;
        }

        let view = BattleView {
            allies: attackers,
            defenders: &*defenders,
        };
        let choice = attacker
            .targeting()
            .choose_target(attacker, &view)
            .map_err(|e| match e {
                BattleError::Targeting { .. } => e,
                other => BattleError::Targeting {
                    attacker: attacker.name().to_string(),
                    message: other.to_string(),
                },
            })?;
        let Some(target_id) = choice else {
            continue;
        };

        let Some(target) = defenders.get_mut(target_id).filter(|t| t.is_alive()) else {
            tracing::trace!(attacker = attacker.name(), target = %target_id, "Stale target ignored");
            continue;
        };

        let damage = damage_rule.damage(attacker, target);
        target.apply_damage(damage);
        strikes += 1;

        if let Some(log) = log.as_deref_mut() {
            log.record_strike(attacker, target, damage);
        }
        tracing::debug!(
            attacker = attacker.name(),
            target = target.name(),
            damage,
            health = target.health().current,
            "Strike"
        );

        if !target.is_alive() {
            let name = target.name().to_string();
            defenders.remove_unit(target_id);
            tracing::debug!(target = %name, "Unit destroyed");
        }
    }

    Ok(strikes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridPos, Side};
    use crate::targeting::{TargetingKind, TargetingStrategy};
    use crate::unit::{UnitArchetype, UnitId};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn unit(name: &str, health: u32, attack: u32, x: u32, y: u32) -> Unit {
        UnitArchetype::new("Soldier", health, attack, 1)
            .with_targeting(TargetingKind::Nearest)
            .instantiate(name)
            .placed_at(GridPos::new(x, y))
    }

    fn army(side: Side, units: Vec<Unit>) -> Army {
        let mut army = Army::new(side);
        for u in units {
            army.add_unit(u);
        }
        army
    }

    #[derive(Debug)]
    struct Failing;

    impl TargetingStrategy for Failing {
        fn choose_target(&self, _: &Unit, _: &BattleView<'_>) -> Result<Option<UnitId>> {
            Err(BattleError::InvalidState("no sensors".into()))
        }

        fn name(&self) -> &'static str {
            "Failing"
        }
    }

    #[derive(Debug)]
    struct Pinned(UnitId);

    impl TargetingStrategy for Pinned {
        fn choose_target(&self, _: &Unit, _: &BattleView<'_>) -> Result<Option<UnitId>> {
            Ok(Some(self.0))
        }

        fn name(&self) -> &'static str {
            "Pinned"
        }
    }

    #[derive(Debug)]
    struct Counting(Arc<AtomicUsize>);

    impl TargetingStrategy for Counting {
        fn choose_target(&self, _: &Unit, view: &BattleView<'_>) -> Result<Option<UnitId>> {
            self.0.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(view.defenders.living().next().map(Unit::id))
        }

        fn name(&self) -> &'static str {
            "Counting"
        }
    }

    #[test]
    fn test_no_targeting_after_defenders_wiped_out() {
        let calls = Arc::new(AtomicUsize::new(0));
        let player = army(
            Side::Right,
            vec![
                unit("first", 10, 5, 24, 0).with_targeting(Arc::new(Counting(Arc::clone(&calls)))),
                unit("second", 10, 5, 24, 1).with_targeting(Arc::new(Counting(Arc::clone(&calls)))),
            ],
        );
        let computer = army(Side::Left, vec![unit("lone", 1, 1, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        let outcome = battle.play_round(None).unwrap();
        assert_eq!(outcome, BattleOutcome::ComputerLost);
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[test]
    fn test_lethal_hit_removes_defender() {
        let player = army(Side::Right, vec![unit("striker", 50, 10, 24, 0)]);
        let computer = army(
            Side::Left,
            vec![unit("victim", 10, 1, 2, 0), unit("other", 50, 1, 0, 20)],
        );
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        battle.play_round(None).unwrap();
        let names: Vec<_> = battle.computer().units().iter().map(Unit::name).collect();
        assert_eq!(names, vec!["other"]);
    }

    #[test]
    fn test_removed_defender_not_struck_again() {
        let victim_id = UnitId(1);
        let first = unit("first", 50, 10, 24, 0).with_targeting(Arc::new(Pinned(victim_id)));
        let second = unit("second", 50, 10, 24, 1).with_targeting(Arc::new(Pinned(victim_id)));
        let player = army(Side::Right, vec![first, second]);
        let computer = army(
            Side::Left,
            vec![unit("victim", 10, 0, 2, 0), unit("bystander", 100, 0, 2, 5)],
        );
        let mut recorder = StrikeRecorder::default();
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        battle.play_round(Some(&mut recorder)).unwrap();

        let player_strikes: Vec<_> = recorder
            .strikes
            .iter()
            .filter(|s| s.attacker == "first" || s.attacker == "second")
            .collect();
        assert_eq!(player_strikes.len(), 1);
        assert_eq!(player_strikes[0].target, "victim");
        assert_eq!(player_strikes[0].remaining_health, 0);
    }

    #[test]
    fn test_dead_defender_cannot_counter_attack() {
        let player = army(Side::Right, vec![unit("hero", 100, 5, 24, 0)]);
        let computer = army(Side::Left, vec![unit("brute", 5, 100, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        let outcome = battle.play_round(None).unwrap();
        assert_eq!(outcome, BattleOutcome::ComputerLost);
        assert_eq!(battle.player().units()[0].health().current, 100);
    }

    #[test]
    fn test_player_attacks_first() {
        let player = army(Side::Right, vec![unit("glass", 5, 100, 24, 0)]);
        let computer = army(Side::Left, vec![unit("tank", 100, 5, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        let report = battle.run(None).unwrap();
        assert_eq!(report.outcome, BattleOutcome::ComputerLost);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.strikes, 1);
    }

    #[test]
    fn test_run_to_completion() {
        let player = army(Side::Right, vec![unit("p", 30, 10, 24, 0)]);
        let computer = army(Side::Left, vec![unit("c", 25, 10, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        let report = battle.run(None).unwrap();
        // Player strikes on rounds 1-3; computer strikes on rounds 1-2.
        assert_eq!(report.outcome, BattleOutcome::ComputerLost);
        assert_eq!(report.rounds, 3);
        assert_eq!(report.player_survivors[0].health, 10);
        assert!(report.computer_survivors.is_empty());
    }

    #[test]
    fn test_empty_army_loses_immediately() {
        let player = Army::new(Side::Right);
        let computer = Army::new(Side::Left);
        let battle = Battle::new(player, computer, BattleConfig::default());
        // Player is checked first.
        assert_eq!(battle.outcome(), BattleOutcome::PlayerLost);

        let player = army(Side::Right, vec![unit("p", 1, 1, 24, 0)]);
        let battle = Battle::new(player, Army::new(Side::Left), BattleConfig::default());
        assert_eq!(battle.outcome(), BattleOutcome::ComputerLost);
    }

    #[test]
    fn test_targeting_failure_interrupts() {
        let player = army(
            Side::Right,
            vec![unit("confused", 10, 10, 24, 0).with_targeting(Arc::new(Failing))],
        );
        let computer = army(Side::Left, vec![unit("c", 10, 1, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        let err = battle.run(None).unwrap_err();
        assert!(matches!(err, BattleError::Targeting { ref attacker, .. } if attacker == "confused"));
    }

    #[test]
    fn test_stale_target_is_skipped() {
        let player = army(
            Side::Right,
            vec![unit("lost", 10, 10, 24, 0).with_targeting(Arc::new(Pinned(UnitId(99))))],
        );
        let computer = army(Side::Left, vec![unit("c", 10, 0, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default());

        battle.play_round(None).unwrap();
        assert_eq!(battle.computer().units()[0].health().current, 10);
    }

    #[test]
    fn test_round_limit() {
        // Nobody deals damage, so only the budget ends the battle.
        let player = army(Side::Right, vec![unit("p", 10, 0, 24, 0)]);
        let computer = army(Side::Left, vec![unit("c", 10, 0, 2, 0)]);
        let mut battle = Battle::new(player, computer, BattleConfig::default().with_max_rounds(5));

        let err = battle.run(None).unwrap_err();
        assert!(matches!(err, BattleError::RoundLimitExceeded { rounds: 5 }));
        assert_eq!(battle.outcome(), BattleOutcome::Ongoing);
    }

    #[test]
    fn test_flat_damage_ignores_bonuses() {
        let attacker = UnitArchetype::new("Knight", 10, 10, 1)
            .with_attack_bonus("Archer", 200)
            .instantiate("k");
        let target = UnitArchetype::new("Archer", 10, 1, 1)
            .with_defence_bonus("Knight", 50)
            .instantiate("a");

        assert_eq!(DamageRule::Flat.damage(&attacker, &target), 10);
        // 10 x 2.0 x 0.5
        assert_eq!(DamageRule::WithBonuses.damage(&attacker, &target), 10);

        let plain = UnitArchetype::new("Archer", 10, 1, 1).instantiate("b");
        assert_eq!(DamageRule::WithBonuses.damage(&attacker, &plain), 20);
    }

    #[test]
    fn test_huge_attack_bonus_saturates() {
        let attacker = UnitArchetype::new("Knight", 10, 10, 1)
            .with_attack_bonus("Archer", 3_000_000_000)
            .instantiate("k");
        let target = UnitArchetype::new("Archer", 10, 1, 1).instantiate("a");

        let damage = DamageRule::WithBonuses.damage(&attacker, &target);
        assert!(damage > 10);
    }

    #[test]
    fn test_huge_combined_bonuses_saturate() {
        let attacker = UnitArchetype::new("Knight", 10, 10, 1)
            .with_attack_bonus("Archer", 10_000_000)
            .instantiate("k");
        let target = UnitArchetype::new("Archer", 10, 1, 1)
            .with_defence_bonus("Knight", 10_000_000)
            .instantiate("a");

        assert_eq!(DamageRule::WithBonuses.damage(&attacker, &target), 2_147_483_647);
    }
}
