//! Configuration checks.
//!
//! Each rule produces a `Validation`, and all of them are combined so a
//! rejected configuration lists every problem instead of only the first.

use crate::builder::config::ControllerConfig;
use crate::builder::error::ConfigViolation;
use crate::core::{Approach, DirectionPair, PairGroups};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Run every configuration rule, accumulating ALL violations.
pub fn validate(config: &ControllerConfig) -> Check {
    let mut checks = vec![
        green_bounds(config),
        yellow_clearance(config),
        switch_ratio(config),
    ];
    checks.extend(pair_partition(&config.approach_pairs));

    Validation::all_vec(checks).map(|_| ())
}

fn require(holds: bool, violation: impl FnOnce() -> ConfigViolation) -> Check {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn green_bounds(config: &ControllerConfig) -> Check {
    require(config.min_green_time < config.max_green_time, || {
        ConfigViolation::GreenBoundsInverted {
            min: config.min_green_time,
            max: config.max_green_time,
        }
    })
}

fn yellow_clearance(config: &ControllerConfig) -> Check {
    require(!config.yellow_clearance.is_zero(), || {
        ConfigViolation::ZeroYellowClearance
    })
}

fn switch_ratio(config: &ControllerConfig) -> Check {
    let ratio = config.density_switch_ratio;
    require(ratio.is_finite() && ratio >= 1.0, || {
        ConfigViolation::InvalidSwitchRatio { ratio }
    })
}

/// Both pairs non-empty, disjoint, and together covering every approach.
fn pair_partition(groups: &PairGroups) -> Vec<Check> {
    let mut checks = Vec::new();

    for pair in [DirectionPair::A, DirectionPair::B] {
        checks.push(require(!groups.members(pair).is_empty(), || {
            ConfigViolation::EmptyPair { pair }
        }));
    }

    for approach in groups.a.intersection(&groups.b) {
        checks.push(Validation::fail(ConfigViolation::OverlappingApproach {
            approach: *approach,
        }));
    }

    for approach in Approach::ALL {
        let assigned = groups.a.contains(&approach) || groups.b.contains(&approach);
        checks.push(require(assigned, || ConfigViolation::UnassignedApproach {
            approach,
        }));
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failures(check: Check) -> Vec<ConfigViolation> {
        match check {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn default_config_passes() {
        assert!(validate(&ControllerConfig::default()).is_success());
    }

    #[test]
    fn equal_green_bounds_are_rejected() {
        let config = ControllerConfig {
            min_green_time: ControllerConfig::default().max_green_time,
            ..ControllerConfig::default()
        };

        let violations = failures(validate(&config));
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            ConfigViolation::GreenBoundsInverted { .. }
        ));
    }

    #[test]
    fn ratio_below_one_is_rejected() {
        let config = ControllerConfig {
            density_switch_ratio: 0.9,
            ..ControllerConfig::default()
        };

        assert_eq!(
            failures(validate(&config)),
            vec![ConfigViolation::InvalidSwitchRatio { ratio: 0.9 }]
        );
    }

    #[test]
    fn overlapping_pairs_are_rejected() {
        let groups = PairGroups::new(
            [Approach::North, Approach::South, Approach::East],
            [Approach::East, Approach::West],
        );

        assert_eq!(
            failures(Validation::all_vec(pair_partition(&groups)).map(|_| ())),
            vec![ConfigViolation::OverlappingApproach {
                approach: Approach::East
            }]
        );
    }

    #[test]
    fn empty_pair_and_unassigned_approaches_are_all_reported() {
        let groups = PairGroups::new([Approach::North, Approach::South], []);

        let violations = failures(Validation::all_vec(pair_partition(&groups)).map(|_| ()));

        assert!(violations.contains(&ConfigViolation::EmptyPair {
            pair: DirectionPair::B
        }));
        assert!(violations.contains(&ConfigViolation::UnassignedApproach {
            approach: Approach::East
        }));
        assert!(violations.contains(&ConfigViolation::UnassignedApproach {
            approach: Approach::West
        }));
        assert_eq!(violations.len(), 3);
    }
}
