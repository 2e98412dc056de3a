//! Route decimation for bounded provider load.

use crate::models::Coordinate;

/// Reduce a dense route geometry to a set of representative sample points.
///
/// Takes every `step`-th coordinate starting from the first, with
/// `step = max(1, len / max_samples)`. Deterministic: the same route and
/// density always select the same indices. Routes shorter than the
/// requested density are returned whole, and an empty route yields an
/// empty sample set.
pub fn sample_route(route: &[Coordinate], max_samples: usize) -> Vec<Coordinate> {
    if route.is_empty() {
        return Vec::new();
    }
    let step = (route.len() / max_samples.max(1)).max(1);
    route.iter().copied().step_by(step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(i as f64 * 0.001, 0.0))
            .collect()
    }

    #[test]
    fn empty_route_yields_empty_samples() {
        assert!(sample_route(&[], 12).is_empty());
        assert!(sample_route(&[], 1).is_empty());
    }

    #[test]
    fn short_route_is_returned_whole() {
        let route = line(5);
        let samples = sample_route(&route, 12);
        assert_eq!(samples, route);
    }

    #[test]
    fn samples_never_exceed_route_length() {
        for n in 1..40 {
            let route = line(n);
            for density in 1..30 {
                assert!(sample_route(&route, density).len() <= n);
            }
        }
    }

    #[test]
    fn stride_starts_at_first_point_and_preserves_order() {
        let route = line(100);
        let samples = sample_route(&route, 10);
        // step = 10, so indices 0, 10, 20, ...
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0], route[0]);
        assert_eq!(samples[1], route[10]);
        assert_eq!(samples[9], route[90]);
    }

    #[test]
    fn floor_division_can_overshoot_density() {
        // 25 points at density 12 gives step = 2 and 13 samples. This
        // matches the stride contract and is not clamped.
        let samples = sample_route(&line(25), 12);
        assert_eq!(samples.len(), 13);
    }

    #[test]
    fn sampling_is_deterministic() {
        let route = line(73);
        assert_eq!(sample_route(&route, 12), sample_route(&route, 12));
    }
}
