//! # quad-pilot
//! Closed-loop trajectory tracking and flight task execution for quadrotor
//! drones: given a time-parameterized reference trajectory and a stream of
//! state estimates, it computes the velocity commands that fly the vehicle
//! along the trajectory, and it sequences flight actions as preemptible
//! tasks.
//!
//! # Trajectories
//! [`trajectory`] contains the motion primitives: scalar swings and ramps,
//! circles and pendulum swings in space, hold-position references, and the
//! origin transform decorator.
//!
//! [`Choreography`] sequences timed trajectory segments into one finite
//! trajectory.
//!
//! # Control
//! [`PidController4d`](control::PidController4d) turns a trajectory and the
//! current state into the next velocity command; [`transform`] holds the
//! reference-frame math shared with the transport boundary.
//!
//! # Tasks
//! [`command`] wraps each flight action (takeoff, hover, follow a
//! trajectory, land) as a blocking [`Command`](command::Command);
//! [`TaskExecutor`] runs one priority-tagged [`Task`] at a time on a
//! dedicated worker and preempts it when an emergency arrives, e.g. via an
//! [`EmergencyRelay`](executor::EmergencyRelay) hooked to an external
//! signal.
//!
//! ```
//! use quad_pilot::command::{Command, FollowTrajectory};
//! use quad_pilot::executor::CancellationToken;
//! use quad_pilot::services::{StateCell, VelocityService};
//! use quad_pilot::trajectory::CircleTrajectory4d;
//! use quad_pilot::types::{BodyFrameVelocity, Point4};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct Sink;
//!
//! impl VelocityService for Sink {
//!     fn send_velocity(&self, _velocity: BodyFrameVelocity) {
//!         // hand off to the vehicle transport
//!     }
//! }
//!
//! let circle = CircleTrajectory4d::flat(Point4::new(0., 0., 1., 0.), 0.5, 0.1)?;
//! let follow = FollowTrajectory::new(
//!     Arc::new(Sink),
//!     Arc::new(StateCell::new()),
//!     Arc::new(circle),
//!     Duration::from_secs(1),
//! )?;
//! follow.execute(&CancellationToken::new());
//! # Ok::<(), quad_pilot::ControlError>(())
//! ```

pub mod choreography;
pub use choreography::{ChoreoSegment, Choreography};

pub mod command;

pub mod control;

mod error;
pub use error::ControlError;

pub mod executor;
pub use executor::{SubmitOutcome, Task, TaskExecutor, TaskType};

pub mod services;

pub mod trajectory;
pub use trajectory::{FiniteTrajectory4d, Trajectory1d, Trajectory2d, Trajectory4d};

pub mod transform;

pub mod types;
pub use types::{BodyFrameVelocity, DroneState, InertialFrameVelocity, Point4, Pose};
