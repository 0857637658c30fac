//! Seams to the vehicle-specific collaborators this crate does not own: the
//! state estimation pipeline and the message transport for velocity,
//! takeoff, and land triggers.
//!
//! Implementations live with the transport layer (simulator bridge, flight
//! controller adapter); the control core only ever talks to these traits.
//! Capabilities are passed directly into command constructors, never looked
//! up from shared globals.

use std::sync::{Arc, Mutex};

use crate::error::ControlError;
use crate::types::{BodyFrameVelocity, DroneState};

/// Supplier of the vehicle's latest known state. Non-blocking: `None` means
/// no estimate has been produced yet (or the pipeline dropped out), which
/// the control loop treats as a skipped tick, not an error.
pub trait StateEstimator: Send + Sync {
    fn current_state(&self) -> Option<DroneState>;
}

/// Fire-and-forget velocity transport. No acknowledgment is observed by the
/// control core; the last sent command stays in effect at the vehicle until
/// superseded.
pub trait VelocityService: Send + Sync {
    fn send_velocity(&self, velocity: BodyFrameVelocity);
}

/// Fire-and-forget takeoff trigger. Confirmation, if any, arrives through
/// the state estimator, not through this call.
pub trait TakeOffService: Send + Sync {
    fn send_take_off(&self);
}

/// Fire-and-forget land trigger.
pub trait LandService: Send + Sync {
    fn send_land(&self);
}

/// Binds the control services for one vehicle. Every accessor fails fast
/// with [`ControlError::ServiceUnavailable`] when a service cannot be bound,
/// so flight plan assembly aborts before any command executes.
pub trait ServiceFactory {
    fn take_off_service(&self) -> Result<Arc<dyn TakeOffService>, ControlError>;
    fn land_service(&self) -> Result<Arc<dyn LandService>, ControlError>;
    fn velocity_service(&self) -> Result<Arc<dyn VelocityService>, ControlError>;
}

/// Last-write-wins cell holding the most recent state estimate.
///
/// One producer (the estimation subscription) writes; any number of control
/// loops read. Reads are whole-struct snapshots, never a torn partial state,
/// and no history is kept: a new sample replaces the previous one.
#[derive(Default)]
pub struct StateCell {
    latest: Mutex<Option<DroneState>>,
}

impl StateCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, state: DroneState) {
        *self.latest.lock().unwrap() = Some(state);
    }
}

impl StateEstimator for StateCell {
    fn current_state(&self) -> Option<DroneState> {
        *self.latest.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InertialFrameVelocity, Pose};

    fn state_at(timestamp: f64) -> DroneState {
        DroneState::new(
            Pose::new(1., 2., 3., 0.),
            InertialFrameVelocity::zero(),
            timestamp,
        )
    }

    #[test]
    fn starts_absent() {
        assert!(StateCell::new().current_state().is_none());
    }

    #[test]
    fn keeps_only_the_latest_sample() {
        let cell = StateCell::new();

        cell.update(state_at(1.));
        cell.update(state_at(2.));

        assert_eq!(cell.current_state().unwrap().timestamp, 2.);
    }
}
