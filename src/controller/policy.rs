//! Green-phase switch policy.

use crate::builder::ControllerConfig;
use crate::controller::phase::SwitchReason;
use std::time::Duration;

/// Decide whether a green that has lasted `elapsed` should end.
///
/// Below the minimum green nothing can end the phase. At or past the maximum
/// green the phase always ends. In between, the waiting pair must be more
/// congested than the active pair by more than the configured ratio.
pub fn switch_reason(
    config: &ControllerConfig,
    elapsed: Duration,
    current_density: f64,
    waiting_density: f64,
) -> Option<SwitchReason> {
    if elapsed < config.min_green_time {
        return None;
    }
    if elapsed >= config.max_green_time {
        return Some(SwitchReason::MaxGreenExceeded);
    }
    if waiting_density > current_density * config.density_switch_ratio {
        return Some(SwitchReason::DensityImbalance);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn minimum_green_is_a_hard_floor() {
        let config = ControllerConfig::default();

        assert_eq!(switch_reason(&config, secs(0), 0.0, 1000.0), None);
        assert_eq!(switch_reason(&config, secs(19), 0.0, 1000.0), None);
    }

    #[test]
    fn maximum_green_wins_over_density() {
        let config = ControllerConfig::default();

        assert_eq!(
            switch_reason(&config, secs(60), 0.5, 0.5),
            Some(SwitchReason::MaxGreenExceeded)
        );
        assert_eq!(
            switch_reason(&config, secs(75), 10.0, 0.0),
            Some(SwitchReason::MaxGreenExceeded)
        );
    }

    #[test]
    fn ratio_boundary_is_exclusive() {
        let config = ControllerConfig::default();

        assert_eq!(switch_reason(&config, secs(30), 2.0, 3.0), None);
        assert_eq!(
            switch_reason(&config, secs(30), 2.0, 3.00002),
            Some(SwitchReason::DensityImbalance)
        );
    }

    #[test]
    fn empty_intersection_holds_green() {
        let config = ControllerConfig::default();
        assert_eq!(switch_reason(&config, secs(40), 0.0, 0.0), None);
    }

    #[test]
    fn any_waiting_traffic_beats_an_empty_active_pair() {
        let config = ControllerConfig::default();
        assert_eq!(
            switch_reason(&config, secs(20), 0.0, 0.001),
            Some(SwitchReason::DensityImbalance)
        );
    }
}
