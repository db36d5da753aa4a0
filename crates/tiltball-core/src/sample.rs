use serde::{Deserialize, Serialize};

/// One tick of input: the acceleration acting on the ball and the time
/// elapsed since the previous tick.
///
/// Units are whatever the caller uses for position; no conversion happens.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AccelSample {
    pub ax: f32,
    pub ay: f32,
    pub dt: f32,
}

impl AccelSample {
    pub fn new(ax: f32, ay: f32, dt: f32) -> Self {
        Self { ax, ay, dt }
    }
}

impl From<(f32, f32, f32)> for AccelSample {
    fn from((ax, ay, dt): (f32, f32, f32)) -> Self {
        Self { ax, ay, dt }
    }
}
