//! Phase controller that advances one tick at a time.

use crate::builder::{BuildError, ControllerConfig};
use crate::checkpoint::{CheckpointError, ControllerCheckpoint, ControllerMetadata};
use crate::controller::error::TickError;
use crate::controller::phase::{ControlDecision, Phase, PhaseState, SwitchReason};
use crate::controller::policy;
use crate::core::{DirectionPair, StateHistory, StateTransition};
use crate::density::{PairDensities, Readings};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Density-driven controller for one intersection.
///
/// The controller is purely reactive: it holds no threads and never blocks.
/// Each intersection needs its own instance.
///
/// ```rust
/// use phaseplan::{Approach, ApproachMeasurement, ControlDecision, PhaseController, Readings};
/// use std::time::Duration;
///
/// let mut controller = PhaseController::with_defaults();
/// let readings: Readings = Approach::ALL
///     .into_iter()
///     .map(|a| (a, ApproachMeasurement::new(3, 120.0)))
///     .collect();
///
/// let decision = controller.advance_tick(&readings, Duration::from_secs(1)).unwrap();
/// assert_eq!(decision, ControlDecision::Continue);
/// assert_eq!(controller.current_state().elapsed, Duration::from_secs(1));
/// ```
#[derive(Clone, Debug)]
pub struct PhaseController {
    config: ControllerConfig,
    state: PhaseState,
    history: StateHistory<Phase>,
    metadata: ControllerMetadata,
}

impl PhaseController {
    /// Create a controller in `Green(default_pair)` after validating `config`.
    pub fn new(config: ControllerConfig) -> Result<Self, BuildError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Controller with the reference timing (20 s / 60 s / 3 s, ratio 1.5).
    pub fn with_defaults() -> Self {
        Self::from_validated(ControllerConfig::default())
    }

    fn from_validated(config: ControllerConfig) -> Self {
        let state = PhaseState::green(config.default_pair);
        let history = StateHistory::with_limit(config.history_limit);
        Self {
            config,
            state,
            history,
            metadata: ControllerMetadata::default(),
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &PhaseState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }

    pub fn metadata(&self) -> &ControllerMetadata {
        &self.metadata
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.metadata.ticks
    }

    /// Human-readable name of `pair`, e.g. `North-South`.
    pub fn pair_label(&self, pair: DirectionPair) -> String {
        self.config.approach_pairs.label(pair)
    }

    /// Advance the controller by one tick.
    ///
    /// The decision is taken against the time already spent in the current
    /// phase; if the phase holds, `tick` is then added to it. Any change of
    /// phase resets the elapsed time to zero.
    ///
    /// Fails without touching the state if `tick` is zero or a configured
    /// approach has no reading.
    pub fn advance_tick(
        &mut self,
        readings: &Readings,
        tick: Duration,
    ) -> Result<ControlDecision, TickError> {
        if tick.is_zero() {
            return Err(TickError::ZeroTickDuration);
        }
        self.check_readings(readings)?;

        let decision = self.decide(readings);
        self.apply(decision, tick);
        Ok(decision)
    }

    fn check_readings(&self, readings: &Readings) -> Result<(), TickError> {
        for approach in self.config.approach_pairs.approaches() {
            if !readings.contains_key(&approach) {
                warn!(%approach, tick = self.metadata.ticks + 1, "missing approach reading");
                return Err(TickError::MissingReading { approach });
            }
        }
        Ok(())
    }

    fn decide(&self, readings: &Readings) -> ControlDecision {
        let elapsed = self.state.elapsed;
        match self.state.phase {
            Phase::Green(active) => {
                if elapsed < self.config.min_green_time {
                    return ControlDecision::Continue;
                }

                let densities =
                    PairDensities::from_readings(readings, &self.config.approach_pairs);
                let current = densities.of(active);
                let waiting = densities.of(active.opposite());
                debug!(
                    active = %self.pair_label(active),
                    current_density = current,
                    waiting_density = waiting,
                    elapsed_secs = elapsed.as_secs_f64(),
                    "evaluating green phase"
                );

                match policy::switch_reason(&self.config, elapsed, current, waiting) {
                    Some(reason) => ControlDecision::BeginTransition {
                        target: active.opposite(),
                        reason,
                    },
                    None => ControlDecision::Continue,
                }
            }
            Phase::Yellow { to, .. } => {
                if elapsed >= self.config.yellow_clearance {
                    ControlDecision::CompleteTransition { now_green: to }
                } else {
                    ControlDecision::Continue
                }
            }
        }
    }

    fn apply(&mut self, decision: ControlDecision, tick: Duration) {
        self.metadata.ticks += 1;
        self.metadata.updated_at = Utc::now();

        match decision {
            ControlDecision::Continue => {
                self.state.elapsed = self.state.elapsed.saturating_add(tick);
            }
            ControlDecision::BeginTransition { target, reason } => {
                info!(
                    from = %self.pair_label(target.opposite()),
                    to = %self.pair_label(target),
                    %reason,
                    "switching traffic light phase"
                );
                self.enter(Phase::yellow_from(target.opposite()), Some(reason));
            }
            ControlDecision::CompleteTransition { now_green } => {
                info!(green = %self.pair_label(now_green), "switched to green");
                self.enter(Phase::Green(now_green), None);
            }
        }
    }

    fn enter(&mut self, next: Phase, reason: Option<SwitchReason>) {
        self.history.record(StateTransition {
            from: self.state.phase,
            to: next,
            timestamp: Utc::now(),
            tick: self.metadata.ticks,
            dwell: self.state.elapsed,
            reason: reason.map(|r| r.to_string()),
        });
        self.metadata.transitions += 1;
        self.state = PhaseState::entering(next);
    }

    /// Snapshot the controller for persistence.
    pub fn checkpoint(&self) -> ControllerCheckpoint {
        ControllerCheckpoint::new(
            self.config.clone(),
            self.state,
            self.history.clone(),
            self.metadata.clone(),
        )
    }

    /// Rebuild a controller from a checkpoint.
    ///
    /// The configuration is validated again and the saved phase must be one
    /// the controller could have reached.
    pub fn resume(checkpoint: ControllerCheckpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        Ok(Self {
            config: checkpoint.config,
            state: checkpoint.state,
            history: checkpoint.history,
            metadata: checkpoint.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ControllerBuilder;
    use crate::core::{Approach, State};
    use crate::density::ApproachMeasurement;

    const TICK: Duration = Duration::from_secs(1);

    /// Readings where every approach of pair A has `a` vehicles per 100 m and
    /// every approach of pair B has `b` vehicles per 100 m.
    fn readings(a: u32, b: u32) -> Readings {
        [
            (Approach::North, ApproachMeasurement::new(a, 100.0)),
            (Approach::South, ApproachMeasurement::new(a, 100.0)),
            (Approach::East, ApproachMeasurement::new(b, 100.0)),
            (Approach::West, ApproachMeasurement::new(b, 100.0)),
        ]
        .into_iter()
        .collect()
    }

    fn run(controller: &mut PhaseController, readings: &Readings, ticks: usize) {
        for _ in 0..ticks {
            controller.advance_tick(readings, TICK).unwrap();
        }
    }

    #[test]
    fn holds_green_below_minimum_despite_imbalance() {
        let mut controller = PhaseController::with_defaults();
        let skewed = readings(0, 1000);

        for _ in 0..20 {
            assert_eq!(
                controller.advance_tick(&skewed, TICK).unwrap(),
                ControlDecision::Continue
            );
        }
        assert_eq!(controller.current_state().elapsed, Duration::from_secs(20));
    }

    #[test]
    fn imbalance_switches_once_minimum_reached() {
        let mut controller = PhaseController::with_defaults();
        let skewed = readings(0, 1000);
        run(&mut controller, &skewed, 20);

        assert_eq!(
            controller.advance_tick(&skewed, TICK).unwrap(),
            ControlDecision::BeginTransition {
                target: DirectionPair::B,
                reason: SwitchReason::DensityImbalance,
            }
        );
        assert_eq!(
            controller.current_state().phase,
            Phase::yellow_from(DirectionPair::A)
        );
        assert_eq!(controller.current_state().elapsed, Duration::ZERO);
    }

    #[test]
    fn maximum_green_forces_switch_with_equal_densities() {
        let mut controller = PhaseController::with_defaults();
        let even = readings(5, 5);
        run(&mut controller, &even, 60);

        assert_eq!(
            controller.advance_tick(&even, TICK).unwrap(),
            ControlDecision::BeginTransition {
                target: DirectionPair::B,
                reason: SwitchReason::MaxGreenExceeded,
            }
        );
    }

    #[test]
    fn yellow_lasts_exactly_the_clearance() {
        let mut controller = PhaseController::with_defaults();
        let skewed = readings(0, 1000);
        run(&mut controller, &skewed, 21);
        assert!(controller.current_state().phase.is_clearance());

        for _ in 0..3 {
            assert_eq!(
                controller.advance_tick(&skewed, TICK).unwrap(),
                ControlDecision::Continue
            );
            assert!(controller.current_state().phase.is_clearance());
        }
        assert_eq!(
            controller.advance_tick(&skewed, TICK).unwrap(),
            ControlDecision::CompleteTransition {
                now_green: DirectionPair::B
            }
        );
        assert_eq!(
            *controller.current_state(),
            PhaseState::green(DirectionPair::B)
        );
    }

    #[test]
    fn yellow_ignores_densities() {
        let mut controller = PhaseController::with_defaults();
        run(&mut controller, &readings(0, 1000), 21);

        // A flood on the old green must not abort the clearance
        run(&mut controller, &readings(1000, 0), 3);
        assert_eq!(
            controller.advance_tick(&readings(1000, 0), TICK).unwrap(),
            ControlDecision::CompleteTransition {
                now_green: DirectionPair::B
            }
        );
    }

    #[test]
    fn missing_reading_leaves_state_untouched() {
        let mut controller = PhaseController::with_defaults();
        run(&mut controller, &readings(1, 1), 5);
        let before = *controller.current_state();

        let mut partial = readings(1, 1);
        partial.remove(&Approach::West);

        assert_eq!(
            controller.advance_tick(&partial, TICK),
            Err(TickError::MissingReading {
                approach: Approach::West
            })
        );
        assert_eq!(*controller.current_state(), before);
        assert_eq!(controller.ticks(), 5);
    }

    #[test]
    fn zero_tick_is_rejected() {
        let mut controller = PhaseController::with_defaults();
        assert_eq!(
            controller.advance_tick(&readings(1, 1), Duration::ZERO),
            Err(TickError::ZeroTickDuration)
        );
        assert_eq!(controller.ticks(), 0);
    }

    #[test]
    fn zero_length_approaches_count_as_empty() {
        let mut controller = PhaseController::with_defaults();
        let mut blind = readings(2, 0);
        blind.insert(Approach::East, ApproachMeasurement::new(50, 0.0));
        blind.insert(Approach::West, ApproachMeasurement::new(50, 0.0));

        run(&mut controller, &blind, 59);
        assert_eq!(
            controller.current_state().phase,
            Phase::Green(DirectionPair::A)
        );
    }

    #[test]
    fn history_records_both_halves_of_a_switch() {
        let mut controller = PhaseController::with_defaults();
        run(&mut controller, &readings(0, 1000), 25);

        let path: Vec<&Phase> = controller.history().get_path();
        assert_eq!(
            path,
            vec![
                &Phase::Green(DirectionPair::A),
                &Phase::yellow_from(DirectionPair::A),
                &Phase::Green(DirectionPair::B),
            ]
        );

        let mut transitions = controller.history().transitions();
        let first = transitions.next().unwrap();
        assert_eq!(first.tick, 21);
        assert_eq!(first.dwell, Duration::from_secs(20));
        assert_eq!(
            first.reason,
            Some(SwitchReason::DensityImbalance.to_string())
        );

        let second = transitions.next().unwrap();
        assert_eq!(second.tick, 25);
        assert_eq!(second.reason, None);
        assert_eq!(controller.metadata().transitions, 2);
    }

    #[test]
    fn history_records_max_green_reason() {
        let mut controller = PhaseController::with_defaults();
        run(&mut controller, &readings(5, 5), 61);

        let last = controller.history().last().unwrap();
        assert_eq!(last.tick, 61);
        assert_eq!(last.dwell, Duration::from_secs(60));
        assert_eq!(
            last.reason,
            Some(SwitchReason::MaxGreenExceeded.to_string())
        );
    }

    #[test]
    fn fractional_ticks_accumulate() {
        let mut controller = ControllerBuilder::new()
            .min_green(Duration::from_secs(1))
            .max_green(Duration::from_secs(2))
            .build()
            .unwrap();
        let even = readings(1, 1);

        for _ in 0..4 {
            controller
                .advance_tick(&even, Duration::from_millis(500))
                .unwrap();
        }
        assert_eq!(controller.current_state().elapsed, Duration::from_secs(2));
        assert!(matches!(
            controller
                .advance_tick(&even, Duration::from_millis(500))
                .unwrap(),
            ControlDecision::BeginTransition {
                reason: SwitchReason::MaxGreenExceeded,
                ..
            }
        ));
    }

    #[test]
    fn starts_on_configured_default_pair() {
        let controller = ControllerBuilder::new()
            .default_pair(DirectionPair::B)
            .build()
            .unwrap();

        assert_eq!(
            controller.current_state().phase,
            Phase::Green(DirectionPair::B)
        );
        assert_eq!(controller.pair_label(DirectionPair::B), "East-West");
    }
}
