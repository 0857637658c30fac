use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};

use crate::command::{check_positive_duration, Command, FollowTrajectory};
use crate::error::ControlError;
use crate::executor::CancellationToken;
use crate::services::{StateEstimator, VelocityService};
use crate::trajectory::HoldPositionTrajectory4d;
use crate::types::Point4;

/// Holds the pose the vehicle is at when the command starts, for a duration.
///
/// Hovering is active: the PID loop keeps correcting toward the captured
/// pose, so drift gets pushed back instead of accumulating. Without a state
/// estimate there is no pose to capture; the command logs a warning and
/// returns, leaving the transport's last velocity in effect.
pub struct Hover {
    velocity_service: Arc<dyn VelocityService>,
    state_estimator: Arc<dyn StateEstimator>,
    duration: Duration,
}

impl Hover {
    pub fn new(
        velocity_service: Arc<dyn VelocityService>,
        state_estimator: Arc<dyn StateEstimator>,
        duration: Duration,
    ) -> Result<Self, ControlError> {
        check_positive_duration(duration)?;
        Ok(Self {
            velocity_service,
            state_estimator,
            duration,
        })
    }
}

impl Command for Hover {
    fn execute(&self, cancel: &CancellationToken) {
        let Some(state) = self.state_estimator.current_state() else {
            warn!("cannot hover: no state estimate available");
            return;
        };

        debug!(
            "hovering at ({}, {}, {}) for {:?}",
            state.pose.x, state.pose.y, state.pose.z, self.duration
        );

        let hold = Arc::new(HoldPositionTrajectory4d::new(Point4::from_pose(&state.pose)));
        match FollowTrajectory::new(
            self.velocity_service.clone(),
            self.state_estimator.clone(),
            hold,
            self.duration,
        ) {
            Ok(follow) => follow.execute(cancel),
            Err(err) => error!("cannot hover: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StateCell;
    use crate::types::{BodyFrameVelocity, DroneState, InertialFrameVelocity, Pose};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingVelocityService {
        sent: AtomicUsize,
    }

    impl VelocityService for CountingVelocityService {
        fn send_velocity(&self, _velocity: BodyFrameVelocity) {
            self.sent.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn without_a_state_estimate_nothing_is_sent() {
        let service = Arc::new(CountingVelocityService::default());
        let command = Hover::new(
            service.clone(),
            Arc::new(StateCell::new()),
            Duration::from_millis(50),
        )
        .unwrap();

        command.execute(&CancellationToken::new());

        assert_eq!(service.sent.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn holds_the_captured_pose() {
        let service = Arc::new(CountingVelocityService::default());
        let estimator = Arc::new(StateCell::new());
        estimator.update(DroneState::new(
            Pose::new(1., 2., 3., 0.),
            InertialFrameVelocity::zero(),
            0.,
        ));
        let command = Hover::new(service.clone(), estimator, Duration::from_millis(120)).unwrap();

        command.execute(&CancellationToken::new());

        assert!(service.sent.load(Ordering::SeqCst) > 0);
    }
}
