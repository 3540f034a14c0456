//! Fixed-timestep accumulator.
//!
//! Render frames arrive at whatever rate the display allows; the locomotion
//! simulation wants a constant `dt`. [`FixedTimestep`] turns elapsed frame
//! time into a whole number of simulation steps and carries the remainder.

use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// Catch-up cap used by [`FixedTimestep::new`].
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    /// `step` is the simulation `dt` in seconds. Non-positive or non-finite
    /// values fall back to 50 Hz.
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0 / 50.0
        };
        Self {
            step,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn from_hz(hz: u32) -> Self {
        Self::new(1.0 / hz.max(1) as f32)
    }

    /// Cap on steps returned by a single [`advance`](Self::advance).
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add elapsed frame time and return how many steps to simulate.
    ///
    /// When more than `max_steps` are owed, the backlog beyond the cap is
    /// dropped rather than carried into later frames.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.as_secs_f32();

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            let dropped = (self.accumulator / self.step) as u32;
            debug!(dropped, "fixed timestep fell behind, dropping backlog");
            self.accumulator %= self.step;
        }

        steps
    }

    /// Simulation `dt` in seconds.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FixedTimestep::new(0.02);

        assert_eq!(clock.advance(Duration::from_millis(15)), 0);
        assert_eq!(clock.advance(Duration::from_millis(15)), 1);
        assert!((clock.alpha() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn long_frame_yields_several_steps() {
        let mut clock = FixedTimestep::new(0.02);
        assert_eq!(clock.advance(Duration::from_millis(65)), 3);
        assert!((clock.alpha() - 0.25).abs() < 1e-3);
    }

    #[test]
    fn backlog_is_capped() {
        let mut clock = FixedTimestep::from_hz(50).with_max_steps(4);
        assert_eq!(clock.advance(Duration::from_secs(2)), 4);
        assert!(clock.alpha() < 1.0);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn invalid_step_falls_back() {
        assert_eq!(FixedTimestep::new(0.0).step(), 0.02);
        assert_eq!(FixedTimestep::new(f32::NAN).step(), 0.02);
        assert_eq!(FixedTimestep::from_hz(0).step(), 1.0);
    }
}
