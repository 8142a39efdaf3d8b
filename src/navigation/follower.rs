//! Waypoint follower for planned grid paths.
//!
//! Converts a static path into one cardinal direction at a time. The
//! follower owns the path cursor; the cursor only moves forward and the
//! path itself is never edited — a replan replaces it wholesale.

use crate::grid::{Cell, Direction};

/// Follows a planned path waypoint by waypoint.
#[derive(Clone, Debug, Default)]
pub struct WaypointFollower {
    /// Current path to follow (empty when none)
    path: Vec<Cell>,
    /// Index of the waypoint currently being pursued
    cursor: usize,
}

impl WaypointFollower {
    /// Create a follower with no path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new path to follow, resetting the cursor.
    pub fn set_path(&mut self, path: Vec<Cell>) {
        if path.is_empty() {
            tracing::warn!("set_path: received empty path");
            self.clear_path();
        } else {
            tracing::info!("set_path: {} waypoints", path.len());
            self.path = path;
            self.cursor = 0;
        }
    }

    /// Clear the current path.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.cursor = 0;
    }

    /// Whether a path with waypoints still ahead of the cursor is loaded.
    pub fn has_usable_path(&self) -> bool {
        self.cursor < self.path.len()
    }

    /// The waypoint currently being pursued.
    pub fn current_waypoint(&self) -> Option<Cell> {
        self.path.get(self.cursor).copied()
    }

    /// Advance the cursor by one if the agent stands on the cursor
    /// waypoint and it is not the last one. Elevation is not compared.
    pub fn advance_if_reached(&mut self, current: Cell) {
        if let Some(waypoint) = self.current_waypoint()
            && current.x == waypoint.x
            && current.z == waypoint.z
            && self.cursor + 1 < self.path.len()
        {
            self.cursor += 1;
            tracing::debug!("Reached waypoint {}/{}", self.cursor, self.path.len());
        }
    }

    /// The single cardinal direction to send next: toward the cursor
    /// waypoint along whichever horizontal axis has the larger absolute
    /// offset. Ties go to the x axis (east/west) by policy.
    ///
    /// `None` means the path is empty, exhausted, or the agent already
    /// stands on the final waypoint — the caller must replan before
    /// asking again.
    pub fn direction_toward(&self, current: Cell) -> Option<Direction> {
        let waypoint = self.current_waypoint()?;
        let dx = waypoint.x - current.x;
        let dz = waypoint.z - current.z;

        if dx == 0 && dz == 0 {
            return None;
        }

        if dx.abs() >= dz.abs() {
            Some(if dx > 0 { Direction::East } else { Direction::West })
        } else {
            Some(if dz > 0 { Direction::South } else { Direction::North })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Vec<Cell> {
        vec![
            Cell::new(0, 100, 0),
            Cell::new(1, 100, 0),
            Cell::new(2, 100, 0),
            Cell::new(3, 100, 0),
        ]
    }

    #[test]
    fn test_follower_creation() {
        let follower = WaypointFollower::new();
        assert!(!follower.has_usable_path());
        assert_eq!(follower.direction_toward(Cell::new(0, 0, 0)), None);
    }

    #[test]
    fn test_set_empty_path_clears() {
        let mut follower = WaypointFollower::new();
        follower.set_path(straight_path());
        assert!(follower.has_usable_path());

        follower.set_path(Vec::new());
        assert!(!follower.has_usable_path());
    }

    #[test]
    fn test_direction_along_path() {
        let mut follower = WaypointFollower::new();
        follower.set_path(straight_path());

        // Standing on waypoint 0, cursor advances and points east
        let mut pos = Cell::new(0, 100, 0);
        for _ in 0..3 {
            follower.advance_if_reached(pos);
            assert_eq!(follower.direction_toward(pos), Some(Direction::East));
            pos = pos.step(Direction::East);
        }

        // On the final waypoint: nothing left to emit
        follower.advance_if_reached(pos);
        assert_eq!(follower.direction_toward(pos), None);
    }

    #[test]
    fn test_larger_axis_wins() {
        let mut follower = WaypointFollower::new();
        follower.set_path(vec![Cell::new(5, 100, 2)]);

        // |dx| = 5 beats |dz| = 2
        assert_eq!(
            follower.direction_toward(Cell::new(0, 100, 0)),
            Some(Direction::East)
        );
        // |dz| = 4 beats |dx| = 1
        assert_eq!(
            follower.direction_toward(Cell::new(4, 100, 6)),
            Some(Direction::North)
        );
    }

    #[test]
    fn test_axis_tie_goes_east_west() {
        let mut follower = WaypointFollower::new();
        follower.set_path(vec![Cell::new(3, 100, 3)]);

        assert_eq!(
            follower.direction_toward(Cell::new(0, 100, 0)),
            Some(Direction::East)
        );
        assert_eq!(
            follower.direction_toward(Cell::new(6, 100, 6)),
            Some(Direction::West)
        );
    }

    #[test]
    fn test_cursor_never_passes_last_waypoint() {
        let mut follower = WaypointFollower::new();
        follower.set_path(straight_path());

        // Walk the whole path; the cursor stops on the final waypoint
        for x in 0..=3 {
            follower.advance_if_reached(Cell::new(x, 100, 0));
        }
        assert_eq!(follower.current_waypoint(), Some(Cell::new(3, 100, 0)));
        assert!(follower.has_usable_path());
    }

    #[test]
    fn test_cursor_ignores_elevation() {
        let mut follower = WaypointFollower::new();
        follower.set_path(straight_path());

        // Same column at a different elevation still counts as reached
        follower.advance_if_reached(Cell::new(0, 37, 0));
        assert_eq!(follower.current_waypoint(), Some(Cell::new(1, 100, 0)));
    }
}
