use crate::trajectory::Trajectory4d;
use crate::types::Point4;

/// Transposes a trajectory to a new origin: a fixed offset is added to every
/// axis's position while velocities pass through unchanged. Plain
/// composition; the wrapped trajectory is not modified.
#[derive(Debug)]
pub struct OriginTransform<T> {
    inner: T,
    offset: Point4,
}

impl<T: Trajectory4d> OriginTransform<T> {
    pub fn new(inner: T, offset: Point4) -> Self {
        Self { inner, offset }
    }
}

impl<T: Trajectory4d> Trajectory4d for OriginTransform<T> {
    fn desired_position_x(&self, time: f64) -> f64 {
        self.offset.x + self.inner.desired_position_x(time)
    }

    fn desired_velocity_x(&self, time: f64) -> f64 {
        self.inner.desired_velocity_x(time)
    }

    fn desired_position_y(&self, time: f64) -> f64 {
        self.offset.y + self.inner.desired_position_y(time)
    }

    fn desired_velocity_y(&self, time: f64) -> f64 {
        self.inner.desired_velocity_y(time)
    }

    fn desired_position_z(&self, time: f64) -> f64 {
        self.offset.z + self.inner.desired_position_z(time)
    }

    fn desired_velocity_z(&self, time: f64) -> f64 {
        self.inner.desired_velocity_z(time)
    }

    fn desired_angle_z(&self, time: f64) -> f64 {
        self.offset.angle + self.inner.desired_angle_z(time)
    }

    fn desired_angular_velocity_z(&self, time: f64) -> f64 {
        self.inner.desired_angular_velocity_z(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::{CircleTrajectory4d, HoldPositionTrajectory4d};
    use approx::assert_abs_diff_eq;

    #[test]
    fn positions_are_offset_and_velocities_pass_through() {
        let circle = CircleTrajectory4d::flat(Point4::origin(), 0.1, 0.1).unwrap();
        let moved = OriginTransform::new(circle, Point4::new(10., -5., 2., 0.3));
        let reference = CircleTrajectory4d::flat(Point4::origin(), 0.1, 0.1).unwrap();

        for step in 0..100 {
            let time = step as f64 / 10.;
            assert_abs_diff_eq!(
                moved.desired_position_x(time),
                10. + reference.desired_position_x(time),
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                moved.desired_position_z(time),
                2. + reference.desired_position_z(time),
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                moved.desired_angle_z(time),
                0.3 + reference.desired_angle_z(time),
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                moved.desired_velocity_x(time),
                reference.desired_velocity_x(time),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn composes_over_shared_trajectories() {
        let hold = std::sync::Arc::new(HoldPositionTrajectory4d::new(Point4::origin()));
        let moved = OriginTransform::new(hold, Point4::new(1., 1., 1., 0.));

        assert_abs_diff_eq!(moved.desired_position_x(0.), 1.);
    }
}
