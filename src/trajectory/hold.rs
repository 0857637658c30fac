use crate::trajectory::Trajectory4d;
use crate::types::Point4;

/// Holds a single pose: every axis reports the target position with zero
/// velocity. Used to implement hovering and move-to-pose.
#[derive(Debug, Clone, Copy)]
pub struct HoldPositionTrajectory4d {
    target: Point4,
}

impl HoldPositionTrajectory4d {
    pub fn new(target: Point4) -> Self {
        Self { target }
    }
}

impl Trajectory4d for HoldPositionTrajectory4d {
    fn desired_position_x(&self, _time: f64) -> f64 {
        self.target.x
    }

    fn desired_velocity_x(&self, _time: f64) -> f64 {
        0.
    }

    fn desired_position_y(&self, _time: f64) -> f64 {
        self.target.y
    }

    fn desired_velocity_y(&self, _time: f64) -> f64 {
        0.
    }

    fn desired_position_z(&self, _time: f64) -> f64 {
        self.target.z
    }

    fn desired_velocity_z(&self, _time: f64) -> f64 {
        0.
    }

    fn desired_angle_z(&self, _time: f64) -> f64 {
        self.target.angle
    }

    fn desired_angular_velocity_z(&self, _time: f64) -> f64 {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_axis_reports_the_target() {
        let hold = HoldPositionTrajectory4d::new(Point4::new(1., 2., 3., 0.4));

        for time in [0., 0.5, 100.] {
            assert_eq!(hold.desired_position_x(time), 1.);
            assert_eq!(hold.desired_position_y(time), 2.);
            assert_eq!(hold.desired_position_z(time), 3.);
            assert_eq!(hold.desired_angle_z(time), 0.4);
            assert_eq!(hold.desired_velocity_x(time), 0.);
            assert_eq!(hold.desired_angular_velocity_z(time), 0.);
        }
    }
}
