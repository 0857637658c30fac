//! Flight commands: each flight action is a single blocking operation with a
//! uniform execute contract, composed into [`crate::executor::Task`]s.
//!
//! A command blocks its worker until the action's intrinsic stopping
//! condition is reached or the cancellation token is raised, whichever comes
//! first. Decoration is by wrapping (see [`WaitForLocalization`]), and every
//! command receives its service capabilities at construction.

mod follow_trajectory;
mod hover;
mod movement;
mod move_to_pose;
mod periodic;
mod takeoff_land;
mod wait_for_localization;

pub use follow_trajectory::{FollowTrajectory, FollowTrajectoryConfig};
pub use hover::Hover;
pub use move_to_pose::MoveToPose;
pub use movement::{Move, RotateClockwise};
pub use periodic::run_periodic;
pub use takeoff_land::{Land, Takeoff};
pub use wait_for_localization::WaitForLocalization;

use std::time::Duration;

use crate::executor::CancellationToken;

/// Interval between control ticks when a command does not configure its own.
pub const DEFAULT_CONTROL_RATE: Duration = Duration::from_millis(50);

/// A single blocking flight action.
pub trait Command: Send + Sync {
    /// Executes the action, blocking until it completes or until `cancel` is
    /// observed at a safe point. Cancellation is cooperative and is not a
    /// failure: the command simply unwinds early.
    fn execute(&self, cancel: &CancellationToken);
}

pub(crate) fn check_positive_duration(duration: Duration) -> Result<(), crate::ControlError> {
    if duration.is_zero() {
        return Err(crate::ControlError::InvalidConfiguration(
            "duration must be positive".into(),
        ));
    }
    Ok(())
}
