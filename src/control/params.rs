use crate::error::ControlError;

/// Caps the integration step when the loop stalls, so one late tick cannot
/// dump a large error * dt into the integral in a single compute.
const DEFAULT_LAG_TIME: f64 = 0.2;

/// Gains for one PID axis. Immutable once validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidParameters {
    kp: f64,
    kd: f64,
    ki: f64,
    lag_time: f64,
}

impl PidParameters {
    pub fn new(kp: f64, kd: f64, ki: f64) -> Result<Self, ControlError> {
        Self::with_lag_time(kp, kd, ki, DEFAULT_LAG_TIME)
    }

    pub fn with_lag_time(kp: f64, kd: f64, ki: f64, lag_time: f64) -> Result<Self, ControlError> {
        for (name, value) in [("kp", kp), ("kd", kd), ("ki", ki)] {
            if !value.is_finite() {
                return Err(ControlError::InvalidConfiguration(format!(
                    "pid gain {name} must be finite, got {value}"
                )));
            }
        }
        if !(lag_time > 0.) || !lag_time.is_finite() {
            return Err(ControlError::InvalidConfiguration(format!(
                "lag time must be positive, got {lag_time}"
            )));
        }
        Ok(Self {
            kp,
            kd,
            ki,
            lag_time,
        })
    }

    /// Flight-tested default gains for the linear axes.
    pub fn default_linear() -> Self {
        Self {
            kp: 0.5,
            kd: 1.,
            ki: 0.,
            lag_time: DEFAULT_LAG_TIME,
        }
    }

    /// Flight-tested default gains for the yaw axis.
    pub fn default_angular() -> Self {
        Self {
            kp: 0.1,
            kd: 0.5,
            ki: 0.,
            lag_time: DEFAULT_LAG_TIME,
        }
    }

    pub fn kp(&self) -> f64 {
        self.kp
    }

    pub fn kd(&self) -> f64 {
        self.kd
    }

    pub fn ki(&self) -> f64 {
        self.ki
    }

    pub fn lag_time(&self) -> f64 {
        self.lag_time
    }
}

/// Per-axis gains for the four-dimensional controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pid4dConfig {
    pub linear_x: PidParameters,
    pub linear_y: PidParameters,
    pub linear_z: PidParameters,
    pub angular_z: PidParameters,
}

impl Default for Pid4dConfig {
    fn default() -> Self {
        Self {
            linear_x: PidParameters::default_linear(),
            linear_y: PidParameters::default_linear(),
            linear_z: PidParameters::default_linear(),
            angular_z: PidParameters::default_angular(),
        }
    }
}
