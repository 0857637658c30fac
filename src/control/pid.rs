use std::sync::Arc;

use crate::control::{Pid4dConfig, PidParameters};
use crate::trajectory::{Axis, AxisTrajectory, Trajectory1d, Trajectory4d};
use crate::transform::shortest_angle_distance;
use crate::types::{InertialFrameVelocity, Pose};

/// A scalar PID controller tracking one axis of a trajectory.
///
/// The derivative term compares the trajectory's analytic velocity against
/// the measured one instead of differencing positions, so discretization
/// noise never enters it, and the same analytic velocity is added as a feed
/// forward term. The integral accumulates error * dt from construction
/// onwards; there is no anti-windup reset.
pub struct PidController1d {
    parameters: PidParameters,
    trajectory: Arc<dyn Trajectory1d>,
    accumulated_error: f64,
    last_time: Option<f64>,
}

impl PidController1d {
    pub fn new(parameters: PidParameters, trajectory: Arc<dyn Trajectory1d>) -> Self {
        Self {
            parameters,
            trajectory,
            accumulated_error: 0.,
            last_time: None,
        }
    }

    /// The next velocity response for the current measurement at `time`.
    pub fn compute(&mut self, current_position: f64, current_velocity: f64, time: f64) -> f64 {
        let desired_position = self.trajectory.desired_position(time);
        let desired_velocity = self.trajectory.desired_velocity(time);

        let error = desired_position - current_position;

        let dt = match self.last_time {
            Some(last) => (time - last).clamp(0., self.parameters.lag_time()),
            None => 0.,
        };
        self.last_time = Some(time);
        self.accumulated_error += error * dt;

        self.parameters.kp() * error
            + self.parameters.kd() * (desired_velocity - current_velocity)
            + self.parameters.ki() * self.accumulated_error
            + desired_velocity
    }
}

/// The composition of four scalar controllers: three for the linear axes in
/// the inertial frame and one for yaw.
///
/// Yaw tracking measures the error as the shortest signed angular distance
/// in [-pi, pi], so headings on either side of the pi boundary never produce
/// a discontinuous correction. The output is an inertial frame velocity;
/// converting to the body frame before transmission is the caller's job.
pub struct PidController4d {
    trajectory: Arc<dyn Trajectory4d>,
    linear_x: PidController1d,
    linear_y: PidController1d,
    linear_z: PidController1d,
    angular_z: PidController1d,
}

impl PidController4d {
    pub fn new(trajectory: Arc<dyn Trajectory4d>, config: Pid4dConfig) -> Self {
        let axis = |axis| Arc::new(AxisTrajectory::new(trajectory.clone(), axis)) as Arc<dyn Trajectory1d>;
        Self {
            linear_x: PidController1d::new(config.linear_x, axis(Axis::LinearX)),
            linear_y: PidController1d::new(config.linear_y, axis(Axis::LinearY)),
            linear_z: PidController1d::new(config.linear_z, axis(Axis::LinearZ)),
            angular_z: PidController1d::new(config.angular_z, axis(Axis::AngularZ)),
            trajectory,
        }
    }

    /// The next velocity response of the control loop for the current pose
    /// and velocity at `time`.
    pub fn compute(
        &mut self,
        pose: &Pose,
        velocity: &InertialFrameVelocity,
        time: f64,
    ) -> InertialFrameVelocity {
        let linear_x = self.linear_x.compute(pose.x, velocity.linear_x, time);
        let linear_y = self.linear_y.compute(pose.y, velocity.linear_y, time);
        let linear_z = self.linear_z.compute(pose.z, velocity.linear_z, time);

        // feed the yaw controller a measurement shifted onto the desired
        // heading's side of the +-pi seam, so its internal subtraction sees
        // the wrapped error
        let desired_yaw = self.trajectory.desired_angle_z(time);
        let angular_error = shortest_angle_distance(pose.yaw, desired_yaw);
        let adapted_yaw = desired_yaw - angular_error;
        let angular_z = self.angular_z.compute(adapted_yaw, velocity.angular_z, time);

        InertialFrameVelocity::new(linear_x, linear_y, linear_z, angular_z)
    }
}
