//! Reference-frame transforms: quaternion to Euler conversion, inertial/body
//! frame velocity rotation, and point rotate/translate utilities for
//! trajectory construction.
//!
//! Everything here is pure f64 math with no state, shared by the PID
//! controller and the velocity transport boundary. Results are reproducible
//! bit for bit across calls, which the transform tests rely on.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point3, Quaternion, Rotation3, Vector3};

use crate::types::{BodyFrameVelocity, EulerAngle, InertialFrameVelocity, Pose};

/// Convert a quaternion orientation to Euler angles, each in [-pi, pi].
pub fn quaternion_to_euler(quaternion: &Quaternion<f64>) -> EulerAngle {
    let q0 = quaternion.w;
    let q1 = quaternion.i;
    let q2 = quaternion.j;
    let q3 = quaternion.k;

    let angle_x = (2. * (q0 * q1 + q2 * q3)).atan2(1. - 2. * (q1 * q1 + q2 * q2));
    let angle_y = (2. * (q0 * q2 - q3 * q1)).asin();
    let angle_z = (2. * (q0 * q3 + q1 * q2)).atan2(1. - 2. * (q2 * q2 + q3 * q3));

    EulerAngle::new(angle_x, angle_y, angle_z)
}

/// Rotate an inertial frame velocity into the body frame of the given pose.
/// Linear z and angular z pass through unchanged.
pub fn inertial_to_body(velocity: &InertialFrameVelocity, pose: &Pose) -> BodyFrameVelocity {
    let theta = -pose.yaw;
    let (sin, cos) = theta.sin_cos();

    BodyFrameVelocity::new(
        velocity.linear_x * cos - velocity.linear_y * sin,
        velocity.linear_x * sin + velocity.linear_y * cos,
        velocity.linear_z,
        velocity.angular_z,
    )
}

/// Rotate a body frame velocity back into the inertial frame of the given
/// pose. Inverse of [`inertial_to_body`] for the same pose.
pub fn body_to_inertial(velocity: &BodyFrameVelocity, pose: &Pose) -> InertialFrameVelocity {
    let theta = pose.yaw;
    let (sin, cos) = theta.sin_cos();

    InertialFrameVelocity::new(
        velocity.linear_x * cos - velocity.linear_y * sin,
        velocity.linear_x * sin + velocity.linear_y * cos,
        velocity.linear_z,
        velocity.angular_z,
    )
}

/// The shortest signed angular distance from `from` to `to`, in [-pi, pi].
pub fn shortest_angle_distance(from: f64, to: f64) -> f64 {
    let distance = (to - from) % TAU;
    if distance > PI {
        distance - TAU
    } else if distance < -PI {
        distance + TAU
    } else {
        distance
    }
}

/// Rotate a point with an extrinsic x-y-z Euler rotation (first about x, then
/// y, then z, right hand rule).
pub fn rotate(point: Point3<f64>, roll: f64, pitch: f64, yaw: f64) -> Point3<f64> {
    Rotation3::from_euler_angles(roll, pitch, yaw) * point
}

/// Translate a point along the three linear axes.
pub fn translate(point: Point3<f64>, dx: f64, dy: f64, dz: f64) -> Point3<f64> {
    point + Vector3::new(dx, dy, dz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_quaternion_is_zero_euler() {
        let euler = quaternion_to_euler(&Quaternion::new(1., 0., 0., 0.));

        assert_abs_diff_eq!(euler.angle_x, 0.);
        assert_abs_diff_eq!(euler.angle_y, 0.);
        assert_abs_diff_eq!(euler.angle_z, 0.);
    }

    #[test]
    fn quarter_turn_about_y_is_half_pi_pitch() {
        let euler = quaternion_to_euler(&Quaternion::new(0.7071, 0., 0.7071, 0.));

        assert_abs_diff_eq!(euler.angle_x, 0., epsilon = 0.01);
        assert_abs_diff_eq!(euler.angle_y, FRAC_PI_2, epsilon = 0.01);
        assert_abs_diff_eq!(euler.angle_z, 0., epsilon = 0.01);
    }

    #[test]
    fn negative_quarter_turn_about_y_is_negative_half_pi_pitch() {
        let euler = quaternion_to_euler(&Quaternion::new(0.7071, 0., -0.7071, 0.));

        assert_abs_diff_eq!(euler.angle_x, 0., epsilon = 0.01);
        assert_abs_diff_eq!(euler.angle_y, -FRAC_PI_2, epsilon = 0.01);
        assert_abs_diff_eq!(euler.angle_z, 0., epsilon = 0.01);
    }

    #[test]
    fn frame_transforms_round_trip() {
        let poses = [
            Pose::new(0., 0., 0., 0.),
            Pose::new(1., -2., 3., 0.7),
            Pose::new(-4., 5., 1., -2.9),
            Pose::new(2., 2., 2., PI),
        ];
        let velocity = InertialFrameVelocity::new(0.4, -0.3, 0.2, 0.1);

        for pose in &poses {
            let round_trip = body_to_inertial(&inertial_to_body(&velocity, pose), pose);

            assert_abs_diff_eq!(round_trip.linear_x, velocity.linear_x, epsilon = 1e-12);
            assert_abs_diff_eq!(round_trip.linear_y, velocity.linear_y, epsilon = 1e-12);
            assert_abs_diff_eq!(round_trip.linear_z, velocity.linear_z, epsilon = 1e-12);
            assert_abs_diff_eq!(round_trip.angular_z, velocity.angular_z, epsilon = 1e-12);
        }
    }

    #[test]
    fn body_transform_rotates_by_heading() {
        // Flying along world x while heading along world y: the body sees the
        // velocity coming from its right.
        let pose = Pose::new(0., 0., 0., FRAC_PI_2);
        let velocity = InertialFrameVelocity::new(1., 0., 0., 0.);

        let body = inertial_to_body(&velocity, &pose);

        assert_abs_diff_eq!(body.linear_x, 0., epsilon = 1e-12);
        assert_abs_diff_eq!(body.linear_y, -1., epsilon = 1e-12);
    }

    #[test]
    fn angle_distance_wraps_at_pi() {
        assert_abs_diff_eq!(shortest_angle_distance(0.1, 0.4), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(
            shortest_angle_distance(PI - 0.1, -PI + 0.1),
            0.2,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            shortest_angle_distance(-PI + 0.1, PI - 0.1),
            -0.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let rotated = rotate(Point3::new(1., 0., 0.), 0., 0., FRAC_PI_2);

        assert_abs_diff_eq!(rotated.x, 0., epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.y, 1., epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.z, 0., epsilon = 1e-12);
    }

    #[test]
    fn translate_moves_each_axis() {
        let moved = translate(Point3::new(1., 2., 3.), 0.5, -1., 2.);

        assert_abs_diff_eq!(moved.x, 1.5);
        assert_abs_diff_eq!(moved.y, 1.);
        assert_abs_diff_eq!(moved.z, 5.);
    }
}
