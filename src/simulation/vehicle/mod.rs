//! Vehicle module containing kinematics, controls and driving behavior.

mod autopilot;
mod car;
mod controls;

pub use autopilot::{Autopilot, DrivingState, ObstacleFlags};
pub use car::Vehicle;
pub use controls::{Behavior, Controls};
