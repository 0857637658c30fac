//! A choreography sequences timed trajectory segments and exposes them as a
//! single finite trajectory, so a whole routine can be handed to the control
//! loop as one reference.

use std::sync::{Arc, Mutex};

use crate::error::ControlError;
use crate::trajectory::{Anchor, FiniteTrajectory4d, Trajectory4d};

/// One step of a choreography: a trajectory and the duration to fly it for.
#[derive(Clone)]
pub struct ChoreoSegment {
    trajectory: Arc<dyn Trajectory4d>,
    duration: f64,
}

impl ChoreoSegment {
    pub fn new(trajectory: Arc<dyn Trajectory4d>, duration: f64) -> Self {
        Self {
            trajectory,
            duration,
        }
    }

    /// A segment lasting as long as the finite trajectory declares, so whole
    /// choreographies compose into larger ones without restating durations.
    pub fn finite<T: FiniteTrajectory4d + 'static>(trajectory: Arc<T>) -> Self {
        let duration = trajectory.trajectory_duration();
        Self {
            trajectory,
            duration,
        }
    }
}

struct Cursor {
    index: usize,
    time_shift: f64,
    /// The last timestamp a segment was resolved for. All accessors called
    /// with the same timestamp observe the same segment, regardless of call
    /// order or interleaving.
    last_checked: Option<f64>,
}

/// An ordered sequence of timed trajectory segments.
///
/// The active segment advances as the modeled time passes each segment's
/// declared duration, one segment per newly observed timestamp, and the last
/// segment never advances past itself: once reached, it keeps being sampled
/// indefinitely, which is what holds the final trajectory at the end of a
/// routine.
pub struct Choreography {
    segments: Vec<ChoreoSegment>,
    anchor: Anchor,
    cursor: Mutex<Cursor>,
}

impl Choreography {
    pub fn new(segments: Vec<ChoreoSegment>) -> Result<Self, ControlError> {
        if segments.is_empty() {
            return Err(ControlError::InvalidConfiguration(
                "a choreography needs at least one segment".into(),
            ));
        }
        for segment in &segments {
            if !(segment.duration > 0.) || !segment.duration.is_finite() {
                return Err(ControlError::InvalidConfiguration(format!(
                    "segment duration must be positive, got {}",
                    segment.duration
                )));
            }
        }
        Ok(Self {
            segments,
            anchor: Anchor::new(),
            cursor: Mutex::new(Cursor {
                index: 0,
                time_shift: 0.,
                last_checked: None,
            }),
        })
    }

    /// Resolves the active segment for a timestamp and returns its index with
    /// the locally-normalized time. The advance check runs once per new
    /// timestamp; repeats of a timestamp reuse the memoized resolution.
    fn resolve(&self, time: f64) -> (usize, f64) {
        let local = self.anchor.relative(time);
        let mut cursor = self.cursor.lock().unwrap();

        if cursor.last_checked != Some(local) {
            let normalized = local - cursor.time_shift;
            if cursor.index + 1 < self.segments.len()
                && normalized >= self.segments[cursor.index].duration
            {
                cursor.time_shift += self.segments[cursor.index].duration;
                cursor.index += 1;
            }
            cursor.last_checked = Some(local);
        }

        (cursor.index, local - cursor.time_shift)
    }
}

impl Trajectory4d for Choreography {
    fn desired_position_x(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_position_x(local)
    }

    fn desired_velocity_x(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_velocity_x(local)
    }

    fn desired_position_y(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_position_y(local)
    }

    fn desired_velocity_y(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_velocity_y(local)
    }

    fn desired_position_z(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_position_z(local)
    }

    fn desired_velocity_z(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_velocity_z(local)
    }

    fn desired_angle_z(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index].trajectory.desired_angle_z(local)
    }

    fn desired_angular_velocity_z(&self, time: f64) -> f64 {
        let (index, local) = self.resolve(time);
        self.segments[index]
            .trajectory
            .desired_angular_velocity_z(local)
    }
}

impl FiniteTrajectory4d for Choreography {
    fn trajectory_duration(&self) -> f64 {
        self.segments.iter().map(|segment| segment.duration).sum()
    }
}
