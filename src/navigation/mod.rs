//! Navigation module.
//!
//! This module provides:
//! - Waypoint following over planned paths
//! - Obstacle probe sequencing after rejected steps
//! - The turn-based navigation state machine tying them together

mod follower;
mod machine;
mod probe;

pub use follower::WaypointFollower;
pub use machine::{NavState, Navigator, NavigatorConfig};
pub use probe::{ObstacleProbe, ProbeSlot};
