use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::command::{check_positive_duration, run_periodic, Command, DEFAULT_CONTROL_RATE};
use crate::error::ControlError;
use crate::executor::CancellationToken;
use crate::services::VelocityService;
use crate::types::BodyFrameVelocity;

/// Sends a fixed body frame velocity for a duration, then stops.
///
/// The velocity is re-sent every control tick so the transport's command
/// stays fresh, and a zero velocity is sent once the duration elapses. A
/// cancelled move skips the stop: the preempting task's commands supersede
/// whatever was in flight.
pub struct Move {
    velocity_service: Arc<dyn VelocityService>,
    velocity: BodyFrameVelocity,
    duration: Duration,
}

impl Move {
    pub fn new(
        velocity_service: Arc<dyn VelocityService>,
        velocity: BodyFrameVelocity,
        duration: Duration,
    ) -> Result<Self, ControlError> {
        check_positive_duration(duration)?;
        Ok(Self {
            velocity_service,
            velocity,
            duration,
        })
    }
}

impl Command for Move {
    fn execute(&self, cancel: &CancellationToken) {
        debug!("executing move command for {:?}", self.duration);
        run_periodic(DEFAULT_CONTROL_RATE, self.duration, cancel, |_| {
            self.velocity_service.send_velocity(self.velocity);
        });
        if !cancel.is_cancelled() {
            self.velocity_service.send_velocity(BodyFrameVelocity::zero());
        }
    }
}

/// Rotates clockwise at a fixed rate for a duration. A facade over [`Move`]
/// with a negative angular z rate.
pub struct RotateClockwise {
    inner: Move,
}

impl RotateClockwise {
    pub fn new(
        velocity_service: Arc<dyn VelocityService>,
        rate: f64,
        duration: Duration,
    ) -> Result<Self, ControlError> {
        if !(rate > 0.) || !rate.is_finite() {
            return Err(ControlError::InvalidConfiguration(format!(
                "rotation rate must be positive, got {rate}"
            )));
        }
        Ok(Self {
            inner: Move::new(
                velocity_service,
                BodyFrameVelocity::new(0., 0., 0., -rate),
                duration,
            )?,
        })
    }
}

impl Command for RotateClockwise {
    fn execute(&self, cancel: &CancellationToken) {
        self.inner.execute(cancel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn sends_the_velocity_then_stops() {
        let recorder = Arc::new(VelocityRecorder::default());
        let velocity = BodyFrameVelocity::new(0., 0., 0.3, 0.);
        let command = Move::new(recorder.clone(), velocity, Duration::from_millis(120)).unwrap();

        command.execute(&CancellationToken::new());

        let sent = recorder.sent.lock().unwrap();
        assert!(sent.len() >= 2);
        assert!(sent[..sent.len() - 1].iter().all(|v| *v == velocity));
        assert_eq!(*sent.last().unwrap(), BodyFrameVelocity::zero());
    }

    #[test]
    fn a_cancelled_move_leaves_the_last_command_standing() {
        let recorder = Arc::new(VelocityRecorder::default());
        let velocity = BodyFrameVelocity::new(0.2, 0., 0., 0.);
        let command = Move::new(recorder.clone(), velocity, Duration::from_secs(5)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        command.execute(&cancel);

        assert!(recorder.sent.lock().unwrap().iter().all(|v| *v == velocity));
    }

    #[test]
    fn rejects_a_zero_duration() {
        let recorder = Arc::new(VelocityRecorder::default());
        assert!(Move::new(recorder, BodyFrameVelocity::zero(), Duration::ZERO).is_err());
    }

    #[test]
    fn rotate_clockwise_sends_a_negative_angular_rate() {
        let recorder = Arc::new(VelocityRecorder::default());
        let command =
            RotateClockwise::new(recorder.clone(), 0.4, Duration::from_millis(60)).unwrap();

        command.execute(&CancellationToken::new());

        let sent = recorder.sent.lock().unwrap();
        assert!(sent.iter().rev().skip(1).all(|v| v.angular_z == -0.4));
    }

    #[test]
    fn rotate_clockwise_rejects_a_non_positive_rate() {
        let recorder = Arc::new(VelocityRecorder::default());
        assert!(RotateClockwise::new(recorder, 0., Duration::from_secs(1)).is_err());
    }
}
