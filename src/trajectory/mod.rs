//! Time-parameterized motion primitives.
//!
//! A trajectory is a pure function of time yielding a desired position and
//! its analytic velocity. One-dimensional primitives cover single axes,
//! two-dimensional cores couple a pair of axes sharing one phase, and
//! four-dimensional composites bundle x, y, z and yaw into the reference a
//! [`crate::control::PidController4d`] tracks.
//!
//! Periodic trajectories anchor themselves to the first time value they are
//! sampled with, so the motion is phase-continuous from whenever the caller
//! starts the control loop rather than from wall-clock zero.

use std::sync::{Arc, OnceLock};

mod circle;
mod hold;
mod origin;
mod primitives;
mod swing;

pub use circle::{CircleConfig, CircleTrajectory2d, CircleTrajectory4d};
pub use hold::HoldPositionTrajectory4d;
pub use origin::OriginTransform;
pub use primitives::{
    ConstantTrajectory1d, LinearTrajectory1d, PendulumSwingTrajectory1d, SwingTrajectory1d,
};
pub use swing::{PendulumTrajectory2d, SwingConfig, SwingTrajectory4d};

use crate::error::ControlError;

/// Physical bound on the speed any trajectory may command, in m/s.
pub const MAX_ABSOLUTE_VELOCITY: f64 = 1.0;

pub(crate) const PI_SQUARED: f64 = std::f64::consts::PI * std::f64::consts::PI;

/// A scalar reference along one axis: desired position and velocity over time.
pub trait Trajectory1d: Send + Sync {
    fn desired_position(&self, time: f64) -> f64;
    fn desired_velocity(&self, time: f64) -> f64;
}

/// A planar reference: two coupled axes sharing one phase.
pub trait Trajectory2d: Send + Sync {
    fn desired_position_abscissa(&self, time: f64) -> f64;
    fn desired_velocity_abscissa(&self, time: f64) -> f64;
    fn desired_position_ordinate(&self, time: f64) -> f64;
    fn desired_velocity_ordinate(&self, time: f64) -> f64;
}

/// A full reference for the four controlled dimensions: three linear axes and
/// the yaw angle.
pub trait Trajectory4d: Send + Sync {
    fn desired_position_x(&self, time: f64) -> f64;
    fn desired_velocity_x(&self, time: f64) -> f64;
    fn desired_position_y(&self, time: f64) -> f64;
    fn desired_velocity_y(&self, time: f64) -> f64;
    fn desired_position_z(&self, time: f64) -> f64;
    fn desired_velocity_z(&self, time: f64) -> f64;
    fn desired_angle_z(&self, time: f64) -> f64;
    fn desired_angular_velocity_z(&self, time: f64) -> f64;
}

/// A trajectory with a defined total duration, composable into larger finite
/// sequences.
pub trait FiniteTrajectory4d: Trajectory4d {
    fn trajectory_duration(&self) -> f64;
}

macro_rules! forward_trajectory4d {
    () => {
        fn desired_position_x(&self, time: f64) -> f64 {
            (**self).desired_position_x(time)
        }

        fn desired_velocity_x(&self, time: f64) -> f64 {
            (**self).desired_velocity_x(time)
        }

        fn desired_position_y(&self, time: f64) -> f64 {
            (**self).desired_position_y(time)
        }

        fn desired_velocity_y(&self, time: f64) -> f64 {
            (**self).desired_velocity_y(time)
        }

        fn desired_position_z(&self, time: f64) -> f64 {
            (**self).desired_position_z(time)
        }

        fn desired_velocity_z(&self, time: f64) -> f64 {
            (**self).desired_velocity_z(time)
        }

        fn desired_angle_z(&self, time: f64) -> f64 {
            (**self).desired_angle_z(time)
        }

        fn desired_angular_velocity_z(&self, time: f64) -> f64 {
            (**self).desired_angular_velocity_z(time)
        }
    };
}

impl<T: Trajectory4d + ?Sized> Trajectory4d for Arc<T> {
    forward_trajectory4d!();
}

impl<T: Trajectory4d + ?Sized> Trajectory4d for Box<T> {
    forward_trajectory4d!();
}

impl<T: Trajectory1d + ?Sized> Trajectory1d for Arc<T> {
    fn desired_position(&self, time: f64) -> f64 {
        (**self).desired_position(time)
    }

    fn desired_velocity(&self, time: f64) -> f64 {
        (**self).desired_velocity(time)
    }
}

/// The axes of a [`Trajectory4d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    LinearX,
    LinearY,
    LinearZ,
    AngularZ,
}

/// Projects one axis of a [`Trajectory4d`] as a standalone [`Trajectory1d`].
pub struct AxisTrajectory {
    trajectory: Arc<dyn Trajectory4d>,
    axis: Axis,
}

impl AxisTrajectory {
    pub fn new(trajectory: Arc<dyn Trajectory4d>, axis: Axis) -> Self {
        Self { trajectory, axis }
    }
}

impl Trajectory1d for AxisTrajectory {
    fn desired_position(&self, time: f64) -> f64 {
        match self.axis {
            Axis::LinearX => self.trajectory.desired_position_x(time),
            Axis::LinearY => self.trajectory.desired_position_y(time),
            Axis::LinearZ => self.trajectory.desired_position_z(time),
            Axis::AngularZ => self.trajectory.desired_angle_z(time),
        }
    }

    fn desired_velocity(&self, time: f64) -> f64 {
        match self.axis {
            Axis::LinearX => self.trajectory.desired_velocity_x(time),
            Axis::LinearY => self.trajectory.desired_velocity_y(time),
            Axis::LinearZ => self.trajectory.desired_velocity_z(time),
            Axis::AngularZ => self.trajectory.desired_angular_velocity_z(time),
        }
    }
}

/// Lazily anchored start time. The first sampled time value wins, exactly
/// once, even under concurrent first calls; the anchor never changes after
/// that.
#[derive(Debug, Default)]
pub(crate) struct Anchor(OnceLock<f64>);

impl Anchor {
    pub(crate) fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Time elapsed since the anchor, anchoring on the first call.
    pub(crate) fn relative(&self, time: f64) -> f64 {
        time - *self.0.get_or_init(|| time)
    }
}

/// Checks the construction-time speed bound shared by all periodic
/// trajectories: |radius * frequency| must stay below
/// [`MAX_ABSOLUTE_VELOCITY`] / pi^2.
pub(crate) fn check_speed_bound(radius: f64, frequency: f64) -> Result<(), ControlError> {
    let limit = MAX_ABSOLUTE_VELOCITY / PI_SQUARED;
    let actual = (radius * frequency).abs();
    if actual >= limit {
        return Err(ControlError::ExceedsMaxVelocity { actual, limit });
    }
    Ok(())
}

pub(crate) fn check_positive(value: f64, what: &str) -> Result<(), ControlError> {
    if !(value > 0.) || !value.is_finite() {
        return Err(ControlError::InvalidConfiguration(format!(
            "{what} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn anchor_is_set_by_first_sample_only() {
        let anchor = Anchor::new();

        assert_abs_diff_eq!(anchor.relative(4.), 0.);
        assert_abs_diff_eq!(anchor.relative(6.5), 2.5);
        assert_abs_diff_eq!(anchor.relative(4.), 0.);
    }

    #[test]
    fn speed_bound_rejects_fast_trajectories() {
        assert!(check_speed_bound(1., 0.05).is_ok());
        assert!(check_speed_bound(5., 1.).is_err());
        assert!(check_speed_bound(-5., 1.).is_err());
    }

    #[test]
    fn axis_trajectory_projects_each_axis() {
        let hold = Arc::new(HoldPositionTrajectory4d::new(crate::types::Point4::new(
            1., 2., 3., 0.4,
        )));

        let x = AxisTrajectory::new(hold.clone(), Axis::LinearX);
        let yaw = AxisTrajectory::new(hold, Axis::AngularZ);

        assert_abs_diff_eq!(x.desired_position(11.), 1.);
        assert_abs_diff_eq!(x.desired_velocity(11.), 0.);
        assert_abs_diff_eq!(yaw.desired_position(11.), 0.4);
    }
}
