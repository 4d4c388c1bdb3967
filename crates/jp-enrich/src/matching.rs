//! Angular association between jets and trigger objects.

use crate::trigger::TriggerLeg;
use jp_core::Direction;

/// A successful trigger association.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerMatch {
    /// Index of the matched leg in the candidate list
    pub index: usize,
    /// Angular distance to the matched leg
    pub delta_r: f64,
}

/// Angular distance between two directions.
///
/// `sqrt((Δeta)^2 + (acos(cos(Δphi)))^2)`: the `acos(cos(·))` composition
/// canonicalizes the azimuthal difference into `[0, π]`, so the wraparound
/// at ±π needs no explicit modulo.
pub fn angular_distance(a: Direction, b: Direction) -> f64 {
    let deta = a.eta - b.eta;
    let dphi = (a.phi - b.phi).cos().acos();
    (deta * deta + dphi * dphi).sqrt()
}

/// First candidate within `max_delta_r` of `target`, in list order.
///
/// The scan stops at the first leg whose distance is strictly below the
/// threshold; it does not continue looking for a globally nearer one.
/// Callers that care which of several in-threshold legs wins must order the
/// candidate list accordingly. `None` when no leg qualifies (an empty list
/// is a valid input).
pub fn first_match_within(
    target: Direction,
    legs: &[TriggerLeg],
    max_delta_r: f64,
) -> Option<TriggerMatch> {
    legs.iter().enumerate().find_map(|(index, leg)| {
        let delta_r = angular_distance(target, leg.direction());
        (delta_r < max_delta_r).then_some(TriggerMatch { index, delta_r })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn leg(eta: f64, phi: f64) -> TriggerLeg {
        TriggerLeg { eta, phi, pt: 30.0, energy: 40.0 }
    }

    #[test]
    fn test_phi_wraparound_near_pi() {
        // Candidates on either side of the ±π seam: the second is ~0.083
        // away from the target once Δphi is canonicalized, not ~6.28.
        let legs = [leg(0.0, 0.0), leg(0.0, 3.0)];
        let target = Direction::new(0.0, -3.2);

        let m = first_match_within(target, &legs, 0.5).unwrap();
        assert_eq!(m.index, 1);
        assert_relative_eq!(m.delta_r, 2.0 * std::f64::consts::PI - 6.2, max_relative = 1e-9);
        assert!(m.delta_r < 0.1);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Direction::new(0.7, 2.9);
        let b = Direction::new(-1.2, -3.0);
        assert_relative_eq!(angular_distance(a, b), angular_distance(b, a), max_relative = 1e-12);
    }

    #[test]
    fn test_first_match_wins_over_nearer_later_leg() {
        // Both legs are within threshold; the scan must return the first in
        // list order even though the second is closer.
        let legs = [leg(0.3, 0.0), leg(0.05, 0.0)];
        let target = Direction::new(0.0, 0.0);

        let m = first_match_within(target, &legs, 0.5).unwrap();
        assert_eq!(m.index, 0);
        assert_relative_eq!(m.delta_r, 0.3, max_relative = 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        let legs = [leg(0.5, 0.0)];
        let target = Direction::new(0.0, 0.0);
        assert!(first_match_within(target, &legs, 0.5).is_none());
        assert!(first_match_within(target, &legs, 0.5 + 1e-9).is_some());
    }

    #[test]
    fn test_empty_candidate_list() {
        assert!(first_match_within(Direction::new(0.0, 0.0), &[], 0.5).is_none());
    }
}
