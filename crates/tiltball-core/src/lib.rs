pub mod ball;
pub mod config;
pub mod field;
pub mod frame;
pub mod sample;

pub use ball::{Ball, BallSnapshot, SamplePhase, WallContacts};
pub use config::{ReplayConfig, TiltballConfig};
pub use field::{Field, FieldIssue};
pub use sample::AccelSample;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::ball::{Ball, BallSnapshot};
    use crate::field::Field;
    use crate::sample::AccelSample;

    /// Tolerance used by the approximate assertions.
    pub const EPSILON: f32 = 1e-4;

    /// A 100 x 100 field with a 10-unit ball, starting at (45, 45).
    pub fn small_field() -> Field {
        Field::new(100.0, 100.0, 10.0)
    }

    /// A ball on [`small_field`].
    pub fn small_ball() -> Ball {
        Ball::with_field(small_field())
    }

    /// `n` identical samples.
    pub fn constant_samples(ax: f32, ay: f32, dt: f32, n: usize) -> Vec<AccelSample> {
        vec![AccelSample::new(ax, ay, dt); n]
    }

    /// Feed every sample to `ball`, returning a snapshot after each one.
    /// Ticks are numbered from 1.
    pub fn run_samples(ball: &mut Ball, samples: &[AccelSample]) -> Vec<BallSnapshot> {
        samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                ball.apply(s);
                ball.snapshot(i as u64 + 1)
            })
            .collect()
    }

    /// Assert two floats agree within [`EPSILON`].
    pub fn assert_approx(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "{what}: expected {expected}, got {actual}"
        );
    }

    /// Assert the ball lies within `[0, max_x] x [0, max_y]`.
    pub fn assert_in_field(ball: &Ball) {
        let (x, y) = ball.position();
        let field = ball.field();
        assert!(
            (0.0..=field.max_x()).contains(&x),
            "x = {x} outside [0, {}]",
            field.max_x()
        );
        assert!(
            (0.0..=field.max_y()).contains(&y),
            "y = {y} outside [0, {}]",
            field.max_y()
        );
    }
}
