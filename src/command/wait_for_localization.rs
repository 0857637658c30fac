use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::command::Command;
use crate::executor::CancellationToken;
use crate::services::StateEstimator;
use crate::types::DroneState;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Blocks until the state estimation pipeline is live, then delegates to the
/// wrapped command.
///
/// "Live" means a state change was observed: two non-absent reads with
/// differing timestamps. A single stale sample left over from a previous
/// session does not count. The poll loop re-checks the cancellation token on
/// every wakeup, so an estimator that never comes up cannot wedge the
/// worker.
pub struct WaitForLocalization {
    state_estimator: Arc<dyn StateEstimator>,
    command: Box<dyn Command>,
}

impl WaitForLocalization {
    pub fn new(state_estimator: Arc<dyn StateEstimator>, command: Box<dyn Command>) -> Self {
        Self {
            state_estimator,
            command,
        }
    }
}

impl Command for WaitForLocalization {
    fn execute(&self, cancel: &CancellationToken) {
        debug!("waiting for localization");

        let mut last_seen: Option<DroneState> = None;
        loop {
            if cancel.is_cancelled() {
                debug!("localization wait cancelled");
                return;
            }

            if let Some(state) = self.state_estimator.current_state() {
                match last_seen {
                    None => last_seen = Some(state),
                    Some(previous) if state.timestamp != previous.timestamp => break,
                    Some(_) => {}
                }
            }

            std::thread::sleep(POLL_INTERVAL);
        }

        debug!("localization is live");
        self.command.execute(cancel);
    }
}
