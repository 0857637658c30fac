use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};

use crate::command::{check_positive_duration, Command, FollowTrajectory};
use crate::error::ControlError;
use crate::executor::CancellationToken;
use crate::services::{StateEstimator, VelocityService};
use crate::trajectory::HoldPositionTrajectory4d;
use crate::types::{Point4, Pose};

/// Flies to a goal pose and keeps correcting toward it for the duration.
///
/// A facade over [`FollowTrajectory`] with a hold-position reference at the
/// goal: the PID loop converges on the pose and then holds it until the
/// duration elapses.
pub struct MoveToPose {
    velocity_service: Arc<dyn VelocityService>,
    state_estimator: Arc<dyn StateEstimator>,
    goal_pose: Pose,
    duration: Duration,
}

impl MoveToPose {
    pub fn new(
        velocity_service: Arc<dyn VelocityService>,
        state_estimator: Arc<dyn StateEstimator>,
        goal_pose: Pose,
        duration: Duration,
    ) -> Result<Self, ControlError> {
        check_positive_duration(duration)?;
        Ok(Self {
            velocity_service,
            state_estimator,
            goal_pose,
            duration,
        })
    }
}

impl Command for MoveToPose {
    fn execute(&self, cancel: &CancellationToken) {
        debug!(
            "executing move to pose ({}, {}, {}, yaw {})",
            self.goal_pose.x, self.goal_pose.y, self.goal_pose.z, self.goal_pose.yaw
        );

        let hold = Arc::new(HoldPositionTrajectory4d::new(Point4::from_pose(
            &self.goal_pose,
        )));
        match FollowTrajectory::new(
            self.velocity_service.clone(),
            self.state_estimator.clone(),
            hold,
            self.duration,
        ) {
            Ok(follow) => follow.execute(cancel),
            Err(err) => error!("cannot move to pose: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StateCell;
    use crate::types::{BodyFrameVelocity, DroneState, InertialFrameVelocity};
    use std::sync::Mutex;

    #[derive(Default)]
    struct VelocityRecorder {
        sent: Mutex<Vec<BodyFrameVelocity>>,
    }

    impl VelocityService for VelocityRecorder {
        fn send_velocity(&self, velocity: BodyFrameVelocity) {
            self.sent.lock().unwrap().push(velocity);
        }
    }

    #[test]
    fn corrects_toward_the_goal() {
        let recorder = Arc::new(VelocityRecorder::default());
        let estimator = Arc::new(StateCell::new());
        estimator.update(DroneState::new(
            Pose::new(0., 0., 1., 0.),
            InertialFrameVelocity::zero(),
            0.,
        ));

        let command = MoveToPose::new(
            recorder.clone(),
            estimator,
            Pose::new(0., 0., 2., 0.),
            Duration::from_millis(120),
        )
        .unwrap();
        command.execute(&CancellationToken::new());

        let sent = recorder.sent.lock().unwrap();
        assert!(!sent.is_empty());
        // the goal is straight up: every correction climbs
        assert!(sent.iter().all(|velocity| velocity.linear_z > 0.));
    }

    #[test]
    fn rejects_a_zero_duration() {
        let recorder = Arc::new(VelocityRecorder::default());
        let estimator = Arc::new(StateCell::new());

        assert!(
            MoveToPose::new(recorder, estimator, Pose::new(0., 0., 0., 0.), Duration::ZERO)
                .is_err()
        );
    }
}
