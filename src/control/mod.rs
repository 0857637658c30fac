//! PID velocity control: tracks a trajectory by computing an inertial frame
//! velocity command from the current state every control tick.

mod params;
mod pid;

pub use params::{Pid4dConfig, PidParameters};
pub use pid::{PidController1d, PidController4d};
