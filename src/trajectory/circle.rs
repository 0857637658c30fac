//! Circular motion primitives: the planar circle core and the tilted 4D
//! composite built on it.

use std::f64::consts::TAU;

use crate::error::ControlError;
use crate::trajectory::{
    check_positive, check_speed_bound, Anchor, Trajectory2d, Trajectory4d,
};
use crate::types::Point4;

/// Configuration for circle trajectories. Defaults describe a one meter
/// radius circle around the origin, slow enough to pass the speed bound.
#[derive(Debug, Clone, Copy)]
pub struct CircleConfig {
    pub origin: Point4,
    pub radius: f64,
    pub frequency: f64,
    /// Phase offset of the first sample along the circle, in radians.
    pub phase: f64,
    /// Angle between the plane of motion and the xy-plane.
    pub plane_angle: f64,
    pub clockwise: bool,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            origin: Point4::origin(),
            radius: 1.,
            frequency: 0.05,
            phase: 0.,
            plane_angle: 0.,
            clockwise: false,
        }
    }
}

/// A circle in a plane: abscissa and ordinate are two sinusoids a quarter
/// period apart, sharing one anchor so the phase stays coupled.
#[derive(Debug)]
pub struct CircleTrajectory2d {
    abscissa_origin: f64,
    ordinate_origin: f64,
    radius: f64,
    angular_rate: f64,
    phase: f64,
    direction: f64,
    anchor: Anchor,
}

impl CircleTrajectory2d {
    pub fn new(config: CircleConfig) -> Result<Self, ControlError> {
        check_positive(config.radius, "radius")?;
        check_positive(config.frequency, "frequency")?;
        check_speed_bound(config.radius, config.frequency)?;
        Ok(Self {
            abscissa_origin: config.origin.x,
            ordinate_origin: config.origin.y,
            radius: config.radius,
            angular_rate: TAU * config.frequency,
            phase: config.phase,
            direction: if config.clockwise { -1. } else { 1. },
            anchor: Anchor::new(),
        })
    }

    fn angle(&self, time: f64) -> f64 {
        self.angular_rate * self.anchor.relative(time) + self.phase
    }
}

impl Trajectory2d for CircleTrajectory2d {
    fn desired_position_abscissa(&self, time: f64) -> f64 {
        self.abscissa_origin + self.radius * self.angle(time).cos()
    }

    fn desired_velocity_abscissa(&self, time: f64) -> f64 {
        -self.radius * self.angular_rate * self.angle(time).sin()
    }

    fn desired_position_ordinate(&self, time: f64) -> f64 {
        self.ordinate_origin + self.direction * self.radius * self.angle(time).sin()
    }

    fn desired_velocity_ordinate(&self, time: f64) -> f64 {
        self.direction * self.radius * self.angular_rate * self.angle(time).cos()
    }
}

/// A circle in space: the planar circle supplies x and y, the z-axis tilts
/// out of the xy-plane by the configured angle, and the yaw is held fixed at
/// the origin's angle.
#[derive(Debug)]
pub struct CircleTrajectory4d {
    circle: CircleTrajectory2d,
    ordinate_origin: f64,
    z_origin: f64,
    tilt: f64,
    yaw: f64,
}

impl CircleTrajectory4d {
    pub fn new(config: CircleConfig) -> Result<Self, ControlError> {
        Ok(Self {
            circle: CircleTrajectory2d::new(config)?,
            ordinate_origin: config.origin.y,
            z_origin: config.origin.z,
            tilt: config.plane_angle.tan(),
            yaw: config.origin.angle,
        })
    }

    /// A flat circle in the xy-plane around `origin`.
    pub fn flat(origin: Point4, radius: f64, frequency: f64) -> Result<Self, ControlError> {
        Self::new(CircleConfig {
            origin,
            radius,
            frequency,
            ..CircleConfig::default()
        })
    }
}

impl Trajectory4d for CircleTrajectory4d {
    fn desired_position_x(&self, time: f64) -> f64 {
        self.circle.desired_position_abscissa(time)
    }

    fn desired_velocity_x(&self, time: f64) -> f64 {
        self.circle.desired_velocity_abscissa(time)
    }

    fn desired_position_y(&self, time: f64) -> f64 {
        self.circle.desired_position_ordinate(time)
    }

    fn desired_velocity_y(&self, time: f64) -> f64 {
        self.circle.desired_velocity_ordinate(time)
    }

    fn desired_position_z(&self, time: f64) -> f64 {
        self.z_origin + self.tilt * (self.circle.desired_position_ordinate(time) - self.ordinate_origin)
    }

    fn desired_velocity_z(&self, time: f64) -> f64 {
        self.tilt * self.circle.desired_velocity_ordinate(time)
    }

    fn desired_angle_z(&self, _time: f64) -> f64 {
        self.yaw
    }

    fn desired_angular_velocity_z(&self, _time: f64) -> f64 {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::MAX_ABSOLUTE_VELOCITY;
    use approx::assert_abs_diff_eq;

    const RADIUS: f64 = 0.065;

    fn sample_times() -> impl Iterator<Item = f64> {
        (0..1000).map(|step| step as f64 / 10.)
    }

    #[test]
    fn position_stays_within_radius_of_origin() {
        let origin = Point4::new(3., -2., 1.5, 0.);

        for frequency in [0.1, 1.5] {
            let circle = CircleTrajectory4d::flat(origin, RADIUS, frequency).unwrap();
            for time in sample_times() {
                let x = circle.desired_position_x(time);
                let y = circle.desired_position_y(time);
                let z = circle.desired_position_z(time);
                assert!(x >= origin.x - RADIUS - 1e-9 && x <= origin.x + RADIUS + 1e-9);
                assert!(y >= origin.y - RADIUS - 1e-9 && y <= origin.y + RADIUS + 1e-9);
                assert_abs_diff_eq!(z, origin.z);
            }
        }
    }

    #[test]
    fn speed_stays_below_bound() {
        for frequency in [0.1, 1.5] {
            let circle =
                CircleTrajectory4d::flat(Point4::origin(), RADIUS, frequency).unwrap();
            for time in sample_times() {
                let speed = (circle.desired_velocity_x(time).powi(2)
                    + circle.desired_velocity_y(time).powi(2)
                    + circle.desired_velocity_z(time).powi(2))
                .sqrt();
                assert!(speed < MAX_ABSOLUTE_VELOCITY);
            }
        }
    }

    #[test]
    fn tilted_circle_oscillates_in_z() {
        let config = CircleConfig {
            radius: RADIUS,
            frequency: 0.1,
            plane_angle: std::f64::consts::FRAC_PI_4,
            ..CircleConfig::default()
        };
        let circle = CircleTrajectory4d::new(config).unwrap();

        // at a 45 degree tilt the z displacement mirrors the ordinate
        for time in sample_times() {
            assert_abs_diff_eq!(
                circle.desired_position_z(time),
                circle.desired_position_y(time),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn clockwise_reverses_the_ordinate() {
        let counter = CircleTrajectory2d::new(CircleConfig {
            radius: RADIUS,
            frequency: 0.1,
            ..CircleConfig::default()
        })
        .unwrap();
        let clockwise = CircleTrajectory2d::new(CircleConfig {
            radius: RADIUS,
            frequency: 0.1,
            clockwise: true,
            ..CircleConfig::default()
        })
        .unwrap();

        for time in sample_times().take(100) {
            assert_abs_diff_eq!(
                counter.desired_position_ordinate(time),
                -clockwise.desired_position_ordinate(time),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn yaw_is_held_at_origin_angle() {
        let circle = CircleTrajectory4d::flat(Point4::new(0., 0., 1., 0.8), RADIUS, 0.1).unwrap();

        assert_abs_diff_eq!(circle.desired_angle_z(0.), 0.8);
        assert_abs_diff_eq!(circle.desired_angle_z(42.), 0.8);
        assert_abs_diff_eq!(circle.desired_angular_velocity_z(42.), 0.);
    }

    #[test]
    fn construction_rejects_speeds_above_bound() {
        assert!(CircleTrajectory4d::flat(Point4::origin(), 5., 1.).is_err());
    }
}
