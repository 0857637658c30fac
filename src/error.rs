use thiserror::Error;

/// Errors surfaced while assembling a flight: invalid configuration or a
/// missing control service. All of these are construction-time failures;
/// nothing in this crate fails mid-flight.
#[derive(Debug, Error)]
pub enum ControlError {
    /// A periodic trajectory would command a speed above the physical bound.
    #[error(
        "trajectory too fast: |radius * frequency| = {actual} exceeds {limit} \
         (maximum absolute velocity / pi^2)"
    )]
    ExceedsMaxVelocity { actual: f64, limit: f64 },

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required control service could not be bound at assembly time.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}
