//! Core value types shared by the trajectory, control, and command layers.
//!
//! Velocities are tagged by reference frame with distinct types so a body
//! frame command can never be handed to a consumer expecting world-aligned
//! axes. Conversion between the two lives in [`crate::transform`] and always
//! requires the yaw of a contemporaneous [`Pose`].

/// Position and heading of the vehicle at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Heading around the world z-axis, in radians.
    pub yaw: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64, yaw: f64) -> Self {
        Self { x, y, z, yaw }
    }
}

/// A velocity expressed in the world-aligned (inertial) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialFrameVelocity {
    pub linear_x: f64,
    pub linear_y: f64,
    pub linear_z: f64,
    pub angular_z: f64,
}

impl InertialFrameVelocity {
    pub fn new(linear_x: f64, linear_y: f64, linear_z: f64, angular_z: f64) -> Self {
        Self {
            linear_x,
            linear_y,
            linear_z,
            angular_z,
        }
    }

    pub fn zero() -> Self {
        Self::new(0., 0., 0., 0.)
    }
}

/// A velocity expressed in the vehicle-heading-aligned (body) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrameVelocity {
    pub linear_x: f64,
    pub linear_y: f64,
    pub linear_z: f64,
    pub angular_z: f64,
}

impl BodyFrameVelocity {
    pub fn new(linear_x: f64, linear_y: f64, linear_z: f64, angular_z: f64) -> Self {
        Self {
            linear_x,
            linear_y,
            linear_z,
            angular_z,
        }
    }

    pub fn zero() -> Self {
        Self::new(0., 0., 0., 0.)
    }
}

/// The latest known state of the vehicle: pose, inertial frame velocity, and
/// the estimate's timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneState {
    pub pose: Pose,
    pub velocity: InertialFrameVelocity,
    pub timestamp: f64,
}

impl DroneState {
    pub fn new(pose: Pose, velocity: InertialFrameVelocity, timestamp: f64) -> Self {
        Self {
            pose,
            velocity,
            timestamp,
        }
    }
}

/// A point in the four controlled dimensions (x, y, z, yaw angle), used as a
/// trajectory origin or hold target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle: f64,
}

impl Point4 {
    pub fn new(x: f64, y: f64, z: f64, angle: f64) -> Self {
        Self { x, y, z, angle }
    }

    pub fn origin() -> Self {
        Self::new(0., 0., 0., 0.)
    }

    pub fn from_pose(pose: &Pose) -> Self {
        Self::new(pose.x, pose.y, pose.z, pose.yaw)
    }
}

/// An orientation as roll/pitch/yaw angles in radians, each in [-pi, pi].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngle {
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
}

impl EulerAngle {
    pub fn new(angle_x: f64, angle_y: f64, angle_z: f64) -> Self {
        Self {
            angle_x,
            angle_y,
            angle_z,
        }
    }
}
