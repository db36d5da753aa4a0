use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::sample::AccelSample;

/// Where the ball is in its two-sample integration cycle.
///
/// The position update needs the previous tick's acceleration, so the first
/// sample after construction or [`Ball::reset`] only seeds it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SamplePhase {
    /// No acceleration has been seen yet; the next update seeds.
    AwaitingFirstSample,
    /// Holds the acceleration from the last update.
    Integrating { ax: f32, ay: f32 },
}

/// Walls touched during the most recent update, or by clamps since then.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WallContacts {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallContacts {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };

    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Observable state of a ball at a given tick, for rendering or transport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BallSnapshot {
    pub tick: u64,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub contacts: WallContacts,
    /// True while the ball is waiting for its seeding sample.
    pub seeding: bool,
}

/// A ball moving inside a fixed rectangular field under sampled acceleration.
///
/// Walls are inelastic: touching one stops motion on that axis and forgets
/// the acceleration along it. Inputs are never validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    field: Field,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    phase: SamplePhase,
    contacts: WallContacts,
}

impl Ball {
    pub fn new(field_width: f32, field_height: f32, size: f32) -> Self {
        Self::with_field(Field::new(field_width, field_height, size))
    }

    pub fn with_field(field: Field) -> Self {
        let (x, y) = field.center();
        Self {
            field,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            phase: SamplePhase::AwaitingFirstSample,
            contacts: WallContacts::NONE,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    pub fn phase(&self) -> SamplePhase {
        self.phase
    }

    pub fn is_awaiting_first_sample(&self) -> bool {
        self.phase == SamplePhase::AwaitingFirstSample
    }

    /// Walls hit since the start of the last update.
    pub fn contacts(&self) -> WallContacts {
        self.contacts
    }

    /// Advance one tick with acceleration `(ax, ay)` over `dt`.
    ///
    /// Uses the previous tick's acceleration `a0` and this one `a1`:
    /// `dp = v*dt + dt^2/6 * (3*a0 + a1)` and `dv = (a0 + a1)/2 * dt`,
    /// with `dp` taken from the velocity before this tick.
    pub fn update(&mut self, ax: f32, ay: f32, dt: f32) {
        self.contacts = WallContacts::NONE;
        match self.phase {
            SamplePhase::AwaitingFirstSample => {},
            SamplePhase::Integrating {
                ax: prev_ax,
                ay: prev_ay,
            } => {
                integrate_axis(&mut self.x, &mut self.vx, prev_ax, ax, dt);
                integrate_axis(&mut self.y, &mut self.vy, prev_ay, ay, dt);
            },
        }
        self.phase = SamplePhase::Integrating { ax, ay };
        self.clamp_to_bounds();
    }

    pub fn apply(&mut self, sample: AccelSample) {
        self.update(sample.ax, sample.ay, sample.dt);
    }

    /// Pull the ball back inside the field. On each axis that was out of
    /// range, velocity and stored acceleration along that axis become zero.
    /// Hits are added to [`Ball::contacts`]; an in-range ball is left as is.
    pub fn clamp_to_bounds(&mut self) {
        let (mut prev_ax, mut prev_ay) = match self.phase {
            SamplePhase::AwaitingFirstSample => (0.0, 0.0),
            SamplePhase::Integrating { ax, ay } => (ax, ay),
        };

        let (left, right) = clamp_axis(&mut self.x, &mut self.vx, &mut prev_ax, self.field.max_x());
        let (top, bottom) = clamp_axis(&mut self.y, &mut self.vy, &mut prev_ay, self.field.max_y());

        if let SamplePhase::Integrating { ax, ay } = &mut self.phase {
            *ax = prev_ax;
            *ay = prev_ay;
        }
        self.contacts.left |= left;
        self.contacts.right |= right;
        self.contacts.top |= top;
        self.contacts.bottom |= bottom;
    }

    /// Recenter the ball, stop it, and re-arm the seeding sample.
    pub fn reset(&mut self) {
        *self = Self::with_field(self.field);
    }

    pub fn snapshot(&self, tick: u64) -> BallSnapshot {
        BallSnapshot {
            tick,
            x: self.x,
            y: self.y,
            vx: self.vx,
            vy: self.vy,
            contacts: self.contacts,
            seeding: self.is_awaiting_first_sample(),
        }
    }
}

fn integrate_axis(pos: &mut f32, vel: &mut f32, prev_acc: f32, acc: f32, dt: f32) {
    *pos += *vel * dt + (dt * dt) / 6.0 * (3.0 * prev_acc + acc);
    *vel += 0.5 * (prev_acc + acc) * dt;
}

/// Returns `(hit_low, hit_high)`. Both checks run in order, so with a
/// negative `max` the position ends at `max`.
fn clamp_axis(pos: &mut f32, vel: &mut f32, acc: &mut f32, max: f32) -> (bool, bool) {
    let mut hit_low = false;
    let mut hit_high = false;
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = 0.0;
        *acc = 0.0;
        hit_low = true;
    }
    if *pos > max {
        *pos = max;
        *vel = 0.0;
        *acc = 0.0;
        hit_high = true;
    }
    (hit_low, hit_high)
}
