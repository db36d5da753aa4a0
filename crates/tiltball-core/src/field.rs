use serde::{Deserialize, Serialize};

/// Default field width, a portrait phone canvas in pixels.
pub const DEFAULT_FIELD_WIDTH: f32 = 1080.0;
/// Default field height.
pub const DEFAULT_FIELD_HEIGHT: f32 = 1920.0;
/// Default ball edge length (the ball is treated as a square of this size).
pub const DEFAULT_BALL_SIZE: f32 = 100.0;

/// Rectangular region the ball moves in, plus the ball's own size.
///
/// Positions refer to the ball's top-left corner, so the valid range on each
/// axis is `[0, dimension - ball_size]`. Nothing here is validated; see
/// [`Field::diagnose`] for a non-fatal report of suspicious geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub ball_size: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            ball_size: DEFAULT_BALL_SIZE,
        }
    }
}

/// A problem with field geometry that keeps the ball from having a sensible
/// range of motion. Reported, never enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldIssue {
    /// A dimension is NaN or infinite.
    NonFinite { name: &'static str, value: f32 },
    /// A dimension is zero or negative.
    NonPositive { name: &'static str, value: f32 },
    /// The ball is wider than the field; `max_x` is negative.
    BallWiderThanField { ball_size: f32, width: f32 },
    /// The ball is taller than the field; `max_y` is negative.
    BallTallerThanField { ball_size: f32, height: f32 },
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite { name, value } => write!(f, "{name} is not finite ({value})"),
            Self::NonPositive { name, value } => write!(f, "{name} must be > 0 (got {value})"),
            Self::BallWiderThanField { ball_size, width } => {
                write!(f, "ball_size {ball_size} exceeds field width {width}")
            },
            Self::BallTallerThanField { ball_size, height } => {
                write!(f, "ball_size {ball_size} exceeds field height {height}")
            },
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32, ball_size: f32) -> Self {
        Self {
            width,
            height,
            ball_size,
        }
    }

    /// Largest valid x position.
    pub fn max_x(&self) -> f32 {
        self.width - self.ball_size
    }

    /// Largest valid y position.
    pub fn max_y(&self) -> f32 {
        self.height - self.ball_size
    }

    /// Position that centers the ball in the field.
    pub fn center(&self) -> (f32, f32) {
        (self.max_x() / 2.0, self.max_y() / 2.0)
    }

    /// List geometry problems. An empty list means every position in
    /// `[0, max_x] x [0, max_y]` is reachable.
    pub fn diagnose(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        let dims = [
            ("width", self.width),
            ("height", self.height),
            ("ball_size", self.ball_size),
        ];
        for (name, value) in dims {
            if !value.is_finite() {
                issues.push(FieldIssue::NonFinite { name, value });
            } else if value <= 0.0 {
                issues.push(FieldIssue::NonPositive { name, value });
            }
        }
        if self.ball_size > self.width {
            issues.push(FieldIssue::BallWiderThanField {
                ball_size: self.ball_size,
                width: self.width,
            });
        }
        if self.ball_size > self.height {
            issues.push(FieldIssue::BallTallerThanField {
                ball_size: self.ball_size,
                height: self.height,
            });
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_center() {
        let field = Field::new(100.0, 200.0, 10.0);
        assert_eq!(field.max_x(), 90.0);
        assert_eq!(field.max_y(), 190.0);
        assert_eq!(field.center(), (45.0, 95.0));
    }

    #[test]
    fn default_field_is_clean() {
        assert!(Field::default().diagnose().is_empty());
    }

    #[test]
    fn oversized_ball_reported_per_axis() {
        let issues = Field::new(50.0, 200.0, 60.0).diagnose();
        assert_eq!(
            issues,
            vec![FieldIssue::BallWiderThanField {
                ball_size: 60.0,
                width: 50.0
            }]
        );
    }

    #[test]
    fn non_positive_and_non_finite_dimensions() {
        let issues = Field::new(0.0, f32::NAN, 10.0).diagnose();
        assert!(issues.contains(&FieldIssue::NonPositive {
            name: "width",
            value: 0.0
        }));
        assert!(
            issues
                .iter()
                .any(|i| matches!(i, FieldIssue::NonFinite { name: "height", .. }))
        );
    }

    #[test]
    fn issue_messages_are_readable() {
        let msg = FieldIssue::BallTallerThanField {
            ball_size: 30.0,
            height: 20.0,
        }
        .to_string();
        assert_eq!(msg, "ball_size 30 exceeds field height 20");
    }
}
