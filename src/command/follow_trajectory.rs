use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};

use crate::command::{check_positive_duration, run_periodic, Command, DEFAULT_CONTROL_RATE};
use crate::control::{Pid4dConfig, PidController4d};
use crate::error::ControlError;
use crate::executor::CancellationToken;
use crate::services::{StateEstimator, VelocityService};
use crate::trajectory::Trajectory4d;
use crate::transform;

/// Tuning knobs for [`FollowTrajectory`] beyond the mandatory ones.
#[derive(Debug, Clone, Copy)]
pub struct FollowTrajectoryConfig {
    pub control_rate: Duration,
    pub pid: Pid4dConfig,
}

impl Default for FollowTrajectoryConfig {
    fn default() -> Self {
        Self {
            control_rate: DEFAULT_CONTROL_RATE,
            pid: Pid4dConfig::default(),
        }
    }
}

/// Drives the vehicle along a trajectory with the PID control loop.
///
/// Every tick pulls the latest state estimate, computes the next inertial
/// frame velocity, rotates it into the body frame with the current yaw, and
/// sends it to the velocity service. A tick without a state estimate sends
/// nothing: the vehicle keeps the transport's last command, and control
/// resumes with the next estimate.
pub struct FollowTrajectory {
    velocity_service: Arc<dyn VelocityService>,
    state_estimator: Arc<dyn StateEstimator>,
    trajectory: Arc<dyn Trajectory4d>,
    duration: Duration,
    config: FollowTrajectoryConfig,
}

impl FollowTrajectory {
    pub fn new(
        velocity_service: Arc<dyn VelocityService>,
        state_estimator: Arc<dyn StateEstimator>,
        trajectory: Arc<dyn Trajectory4d>,
        duration: Duration,
    ) -> Result<Self, ControlError> {
        Self::with_config(
            velocity_service,
            state_estimator,
            trajectory,
            duration,
            FollowTrajectoryConfig::default(),
        )
    }

    pub fn with_config(
        velocity_service: Arc<dyn VelocityService>,
        state_estimator: Arc<dyn StateEstimator>,
        trajectory: Arc<dyn Trajectory4d>,
        duration: Duration,
        config: FollowTrajectoryConfig,
    ) -> Result<Self, ControlError> {
        check_positive_duration(duration)?;
        if config.control_rate.is_zero() {
            return Err(ControlError::InvalidConfiguration(
                "control rate must be positive".into(),
            ));
        }
        Ok(Self {
            velocity_service,
            state_estimator,
            trajectory,
            duration,
            config,
        })
    }
}

impl Command for FollowTrajectory {
    fn execute(&self, cancel: &CancellationToken) {
        debug!("executing follow trajectory command for {:?}", self.duration);

        // controller state is per execution: a re-run starts with a clean
        // integral and the trajectory's anchor already set
        let mut controller = PidController4d::new(self.trajectory.clone(), self.config.pid);

        run_periodic(self.config.control_rate, self.duration, cancel, |elapsed| {
            let Some(state) = self.state_estimator.current_state() else {
                trace!("no state estimate, skipping control tick");
                return;
            };

            let next_velocity = controller.compute(&state.pose, &state.velocity, elapsed);
            self.velocity_service
                .send_velocity(transform::inertial_to_body(&next_velocity, &state.pose));
        });
    }
}
