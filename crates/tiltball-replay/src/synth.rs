use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tiltball_core::AccelSample;

/// Largest acceleration magnitude per axis, roughly a device tilted flat on
/// its edge.
pub const MAX_TILT: f32 = 9.81;
/// Largest change in acceleration between consecutive samples.
const TILT_STEP: f32 = 0.5;

/// Generate `count` samples of a slowly wandering tilt. The same seed always
/// yields the same stream.
pub fn synthetic_samples(count: u32, seed: u64, dt: f32) -> Vec<AccelSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ax = 0.0f32;
    let mut ay = 0.0f32;
    (0..count)
        .map(|_| {
            ax = (ax + rng.random_range(-TILT_STEP..=TILT_STEP)).clamp(-MAX_TILT, MAX_TILT);
            ay = (ay + rng.random_range(-TILT_STEP..=TILT_STEP)).clamp(-MAX_TILT, MAX_TILT);
            AccelSample::new(ax, ay, dt)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_seed() {
        assert_eq!(
            synthetic_samples(50, 7, 0.016),
            synthetic_samples(50, 7, 0.016)
        );
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(synthetic_samples(50, 1, 0.016), synthetic_samples(50, 2, 0.016));
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(synthetic_samples(0, 0, 0.1).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tilt_bounded_and_smooth(seed in 0u64..1000, count in 1u32..300) {
                let samples = synthetic_samples(count, seed, 0.02);
                prop_assert_eq!(samples.len(), count as usize);
                let mut prev = AccelSample::new(0.0, 0.0, 0.02);
                for s in &samples {
                    prop_assert!(s.ax.abs() <= MAX_TILT && s.ay.abs() <= MAX_TILT);
                    prop_assert!((s.ax - prev.ax).abs() <= TILT_STEP + 1e-5);
                    prop_assert!((s.ay - prev.ay).abs() <= TILT_STEP + 1e-5);
                    prop_assert_eq!(s.dt, 0.02);
                    prev = *s;
                }
            }
        }
    }
}
