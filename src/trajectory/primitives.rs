//! One-dimensional motion primitives: constants, ramps, and the periodic
//! swings the planar trajectories are built from.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::ControlError;
use crate::trajectory::{check_positive, check_speed_bound, Anchor, Trajectory1d, PI_SQUARED};

/// Phase displacement putting a pendulum at its lowest point on the first
/// sample: three quarters of a full turn.
pub(crate) const PENDULUM_PHASE: f64 = 3. * FRAC_PI_2;

/// A fixed position with zero velocity.
#[derive(Debug, Clone, Copy)]
pub struct ConstantTrajectory1d {
    value: f64,
}

impl ConstantTrajectory1d {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Trajectory1d for ConstantTrajectory1d {
    fn desired_position(&self, _time: f64) -> f64 {
        self.value
    }

    fn desired_velocity(&self, _time: f64) -> f64 {
        0.
    }
}

/// A linear ramp from `start` at a constant rate, anchored to the first
/// sampled time.
#[derive(Debug)]
pub struct LinearTrajectory1d {
    start: f64,
    rate: f64,
    anchor: Anchor,
}

impl LinearTrajectory1d {
    pub fn new(start: f64, rate: f64) -> Result<Self, ControlError> {
        if rate.abs() >= crate::trajectory::MAX_ABSOLUTE_VELOCITY {
            return Err(ControlError::ExceedsMaxVelocity {
                actual: rate.abs(),
                limit: crate::trajectory::MAX_ABSOLUTE_VELOCITY,
            });
        }
        Ok(Self {
            start,
            rate,
            anchor: Anchor::new(),
        })
    }
}

impl Trajectory1d for LinearTrajectory1d {
    fn desired_position(&self, time: f64) -> f64 {
        self.start + self.rate * self.anchor.relative(time)
    }

    fn desired_velocity(&self, _time: f64) -> f64 {
        self.rate
    }
}

/// A sinusoidal swing `origin + r * cos(2 pi f t + phase)` with its analytic
/// derivative as velocity.
#[derive(Debug)]
pub struct SwingTrajectory1d {
    origin: f64,
    radius: f64,
    angular_rate: f64,
    phase: f64,
    anchor: Anchor,
}

impl SwingTrajectory1d {
    pub fn new(origin: f64, radius: f64, frequency: f64, phase: f64) -> Result<Self, ControlError> {
        check_positive(radius, "radius")?;
        check_positive(frequency, "frequency")?;
        check_speed_bound(radius, frequency)?;
        Ok(Self {
            origin,
            radius,
            angular_rate: TAU * frequency,
            phase,
            anchor: Anchor::new(),
        })
    }
}

impl Trajectory1d for SwingTrajectory1d {
    fn desired_position(&self, time: f64) -> f64 {
        let elapsed = self.anchor.relative(time);
        self.origin + self.radius * (self.angular_rate * elapsed + self.phase).cos()
    }

    fn desired_velocity(&self, time: f64) -> f64 {
        let elapsed = self.anchor.relative(time);
        -self.radius * self.angular_rate * (self.angular_rate * elapsed + self.phase).sin()
    }
}

/// The swing angle of a pendulum with the z-axis at a given time: the string
/// sweeps between -pi/2 and pi/2 as the bob trades kinetic for potential
/// energy.
pub(crate) fn pendulum_angle(elapsed: f64, frequency: f64) -> f64 {
    FRAC_PI_2 * (TAU * frequency * elapsed).cos()
}

/// One axis of a pendulum swing: `origin + r * cos(angle(t) + phase)` where
/// `angle(t)` is the [`pendulum_angle`]. The velocity is the exact analytic
/// derivative of the position function, phase included.
#[derive(Debug)]
pub struct PendulumSwingTrajectory1d {
    origin: f64,
    radius: f64,
    frequency: f64,
    phase: f64,
    anchor: Anchor,
}

impl PendulumSwingTrajectory1d {
    pub fn new(origin: f64, radius: f64, frequency: f64, phase: f64) -> Result<Self, ControlError> {
        check_positive(radius, "radius")?;
        check_positive(frequency, "frequency")?;
        check_speed_bound(radius, frequency)?;
        Ok(Self {
            origin,
            radius,
            frequency,
            phase: PENDULUM_PHASE + phase,
            anchor: Anchor::new(),
        })
    }

    pub(crate) fn position_at(&self, elapsed: f64) -> f64 {
        self.origin + self.radius * (pendulum_angle(elapsed, self.frequency) + self.phase).cos()
    }

    pub(crate) fn velocity_at(&self, elapsed: f64) -> f64 {
        PI_SQUARED
            * self.frequency
            * self.radius
            * (TAU * self.frequency * elapsed).sin()
            * (pendulum_angle(elapsed, self.frequency) + self.phase).sin()
    }
}

impl Trajectory1d for PendulumSwingTrajectory1d {
    fn desired_position(&self, time: f64) -> f64 {
        self.position_at(self.anchor.relative(time))
    }

    fn desired_velocity(&self, time: f64) -> f64 {
        self.velocity_at(self.anchor.relative(time))
    }
}
