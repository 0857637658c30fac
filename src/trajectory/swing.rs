//! Pendulum swing primitives: a half-circle swing with the modeled
//! transition between kinetic and potential energy, as a planar core and as
//! a 4D composite whose swing plane can be rotated about the z-axis.

use crate::error::ControlError;
use crate::trajectory::primitives::PendulumSwingTrajectory1d;
use crate::trajectory::{Anchor, Trajectory2d, Trajectory4d};
use crate::types::Point4;

/// Configuration for pendulum swing trajectories. The radius is the length
/// of the virtual pendulum string; the frequency is the number of full swing
/// cycles per second.
#[derive(Debug, Clone, Copy)]
pub struct SwingConfig {
    pub origin: Point4,
    pub radius: f64,
    pub frequency: f64,
    /// Extra phase added to the swing angle, in radians.
    pub phase: f64,
    /// Angle between the swing plane and the xz-plane.
    pub plane_angle: f64,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            origin: Point4::origin(),
            radius: 1.,
            frequency: 0.05,
            phase: 0.,
            plane_angle: 0.,
        }
    }
}

/// A pendulum swing in two dimensions: the abscissa sweeps the half circle
/// while the ordinate follows the string's vertical drop, both driven by one
/// shared anchor.
#[derive(Debug)]
pub struct PendulumTrajectory2d {
    abscissa: PendulumSwingTrajectory1d,
    ordinate: PendulumSwingTrajectory1d,
    anchor: Anchor,
}

impl PendulumTrajectory2d {
    pub fn new(
        abscissa_origin: f64,
        ordinate_origin: f64,
        radius: f64,
        frequency: f64,
        phase: f64,
    ) -> Result<Self, ControlError> {
        // the ordinate lags the abscissa by a quarter turn: cos vs sin of the
        // same swing angle
        Ok(Self {
            abscissa: PendulumSwingTrajectory1d::new(abscissa_origin, radius, frequency, phase)?,
            ordinate: PendulumSwingTrajectory1d::new(
                ordinate_origin,
                radius,
                frequency,
                phase - std::f64::consts::FRAC_PI_2,
            )?,
            anchor: Anchor::new(),
        })
    }
}

impl Trajectory2d for PendulumTrajectory2d {
    fn desired_position_abscissa(&self, time: f64) -> f64 {
        self.abscissa.position_at(self.anchor.relative(time))
    }

    fn desired_velocity_abscissa(&self, time: f64) -> f64 {
        self.abscissa.velocity_at(self.anchor.relative(time))
    }

    fn desired_position_ordinate(&self, time: f64) -> f64 {
        self.ordinate.position_at(self.anchor.relative(time))
    }

    fn desired_velocity_ordinate(&self, time: f64) -> f64 {
        self.ordinate.velocity_at(self.anchor.relative(time))
    }
}

/// A pendulum swing in space. The swing plane contains the z-axis and is
/// rotated about it by `plane_angle`: the planar abscissa displacement
/// distributes over x and y, the ordinate hangs below the origin in z, and
/// the yaw is held fixed at the origin's angle.
#[derive(Debug)]
pub struct SwingTrajectory4d {
    pendulum: PendulumTrajectory2d,
    origin: Point4,
    plane_cos: f64,
    plane_sin: f64,
}

impl SwingTrajectory4d {
    pub fn new(config: SwingConfig) -> Result<Self, ControlError> {
        Ok(Self {
            pendulum: PendulumTrajectory2d::new(
                config.origin.x,
                config.origin.z,
                config.radius,
                config.frequency,
                config.phase,
            )?,
            origin: config.origin,
            plane_cos: config.plane_angle.cos(),
            plane_sin: config.plane_angle.sin(),
        })
    }

    /// A swing in the xz-plane around `origin`.
    pub fn xz_plane(origin: Point4, radius: f64, frequency: f64) -> Result<Self, ControlError> {
        Self::new(SwingConfig {
            origin,
            radius,
            frequency,
            ..SwingConfig::default()
        })
    }

    fn swing_displacement(&self, time: f64) -> f64 {
        self.pendulum.desired_position_abscissa(time) - self.origin.x
    }
}

impl Trajectory4d for SwingTrajectory4d {
    fn desired_position_x(&self, time: f64) -> f64 {
        self.origin.x + self.plane_cos * self.swing_displacement(time)
    }

    fn desired_velocity_x(&self, time: f64) -> f64 {
        self.plane_cos * self.pendulum.desired_velocity_abscissa(time)
    }

    fn desired_position_y(&self, time: f64) -> f64 {
        self.origin.y + self.plane_sin * self.swing_displacement(time)
    }

    fn desired_velocity_y(&self, time: f64) -> f64 {
        self.plane_sin * self.pendulum.desired_velocity_abscissa(time)
    }

    fn desired_position_z(&self, time: f64) -> f64 {
        self.pendulum.desired_position_ordinate(time)
    }

    fn desired_velocity_z(&self, time: f64) -> f64 {
        self.pendulum.desired_velocity_ordinate(time)
    }

    fn desired_angle_z(&self, _time: f64) -> f64 {
        self.origin.angle
    }

    fn desired_angular_velocity_z(&self, _time: f64) -> f64 {
        0.
    }
}
