use std::sync::Arc;

use log::debug;

use crate::command::Command;
use crate::executor::CancellationToken;
use crate::services::{LandService, TakeOffService};

/// Triggers a takeoff. Fire-and-forget: confirmation, if any, is observed
/// through the state estimator.
pub struct Takeoff {
    take_off_service: Arc<dyn TakeOffService>,
}

impl Takeoff {
    pub fn new(take_off_service: Arc<dyn TakeOffService>) -> Self {
        Self { take_off_service }
    }
}

impl Command for Takeoff {
    fn execute(&self, _cancel: &CancellationToken) {
        debug!("executing takeoff command");
        self.take_off_service.send_take_off();
    }
}

/// Triggers a landing. Fire-and-forget, like [`Takeoff`]; this is the usual
/// body of an emergency task.
pub struct Land {
    land_service: Arc<dyn LandService>,
}

impl Land {
    pub fn new(land_service: Arc<dyn LandService>) -> Self {
        Self { land_service }
    }
}

impl Command for Land {
    fn execute(&self, _cancel: &CancellationToken) {
        debug!("executing land command");
        self.land_service.send_land();
    }
}
