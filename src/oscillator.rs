//! Driving-value oscillator.
//!
//! A one-dimensional accelerate/decelerate loop. While heading
//! [`Direction::Forward`] the velocity grows by `step` each frame; once the
//! position passes zero the direction flips and the velocity shrinks again.
//! The position swings back and forth through zero with an amplitude set by
//! the starting value.
//!
//! Two separate signals come out of each step:
//!
//! - `flipped`: the position crossed zero and the acceleration direction
//!   changed
//! - `reversed`: the velocity changed sign compared to the previous step
//!
//! They fire on different frames. The field rotates its channel order on
//! `reversed` only.

use crate::config::OscillatorConfig;

/// Which way the oscillator is accelerating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Velocity increases each step.
    #[default]
    Forward,
    /// Velocity decreases each step.
    Backward,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Outcome of a single [`Oscillator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct OscillatorStep {
    /// The position crossed zero and the direction changed.
    pub flipped: bool,
    /// The velocity changed sign since the previous step.
    pub reversed: bool,
}

/// Scalar oscillator producing the driving value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    position: f64,
    velocity: f64,
    direction: Direction,
    step: f64,
}

impl Oscillator {
    /// Oscillator at rest at `start`, accelerating forward by `step` per frame.
    pub fn new(start: f64, step: f64) -> Self {
        Self {
            position: start,
            velocity: 0.0,
            direction: Direction::Forward,
            step,
        }
    }

    pub fn from_config(config: &OscillatorConfig) -> Self {
        Self::new(config.start, config.step)
    }

    /// Advance one frame.
    pub fn step(&mut self) -> OscillatorStep {
        let last_velocity = self.velocity;
        let mut flipped = false;

        match self.direction {
            Direction::Forward => {
                self.velocity += self.step;
                self.position += self.velocity;
                if self.position > 0.0 {
                    self.direction = self.direction.flipped();
                    flipped = true;
                }
            }
            Direction::Backward => {
                self.velocity -= self.step;
                self.position += self.velocity;
                if self.position < 0.0 {
                    self.direction = self.direction.flipped();
                    flipped = true;
                }
            }
        }

        // Zero on either side is not a sign change
        let reversed = (self.velocity < 0.0 && last_velocity > 0.0)
            || (self.velocity > 0.0 && last_velocity < 0.0);

        OscillatorStep { flipped, reversed }
    }

    /// Current driving value.
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Per-frame velocity increment.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::from_config(&OscillatorConfig::default())
    }
}
