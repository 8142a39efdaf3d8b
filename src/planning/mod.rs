//! Path planning module for grid navigation.
//!
//! This module provides:
//! - Obstacle memory accumulated from probe feedback
//! - A* path planner over the two horizontal grid axes

mod astar;
mod obstacles;

pub use astar::{AStarConfig, AStarPlanner};
pub use obstacles::ObstacleMemory;
