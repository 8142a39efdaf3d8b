//! A* path planner over the horizontal grid axes.
//!
//! The search space is 2-axis: every node shares the start cell's
//! elevation and expands to its four cardinal neighbors at unit cost.
//! Obstacle knowledge comes entirely from [`ObstacleMemory`] — the world
//! is assumed passable until a probe has proven otherwise.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::grid::Cell;

use super::obstacles::ObstacleMemory;

/// Configuration for the A* planner.
#[derive(Clone, Debug)]
pub struct AStarConfig {
    /// Maximum node expansions before giving up
    pub max_nodes: usize,
    /// Goal acceptance tolerance in cells on each horizontal axis
    pub goal_tolerance: i32,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            max_nodes: 10_000,
            goal_tolerance: 2,
        }
    }
}

/// Open-heap entry. Ordering is reversed so the `BinaryHeap` pops the
/// lowest f-cost first; ties are broken however the heap likes.
#[derive(Clone, Copy, Debug)]
struct OpenNode {
    cell: Cell,
    f_cost: i32,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower f_cost = higher priority)
        other.f_cost.cmp(&self.f_cost)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-cell search record. The arena maps `Cell -> SearchRecord`, so
/// parent references are lookups rather than owned links and the whole
/// structure is dropped when the plan call returns.
#[derive(Clone, Copy, Debug)]
struct SearchRecord {
    g_cost: i32,
    parent: Option<Cell>,
}

/// A* path planner.
pub struct AStarPlanner {
    config: AStarConfig,
}

impl AStarPlanner {
    /// Create a new planner with configuration.
    pub fn new(config: AStarConfig) -> Self {
        Self { config }
    }

    /// Create a new planner with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AStarConfig::default())
    }

    /// Plan a shortest path from `start` to a cell accepted as `goal`.
    ///
    /// The returned path begins at `start`, ends at an accepted cell, and
    /// each consecutive pair differs by exactly one cardinal step. Returns
    /// `None` when the search space is exhausted or the node budget runs
    /// out — the caller must treat that as "no path", never as "already
    /// there".
    pub fn plan(&self, start: Cell, goal: Cell, obstacles: &ObstacleMemory) -> Option<Vec<Cell>> {
        let mut open_set = BinaryHeap::new();
        let mut arena: HashMap<Cell, SearchRecord> = HashMap::new();
        let mut closed_set: HashSet<Cell> = HashSet::new();

        arena.insert(
            start,
            SearchRecord {
                g_cost: 0,
                parent: None,
            },
        );
        open_set.push(OpenNode {
            cell: start,
            f_cost: Self::heuristic(start, goal),
        });

        let mut expanded = 0;

        while let Some(OpenNode { cell: current, .. }) = open_set.pop() {
            // Stale heap entry for an already-expanded cell
            if closed_set.contains(&current) {
                continue;
            }

            expanded += 1;
            if expanded > self.config.max_nodes {
                tracing::warn!(
                    "A* gave up after {} expansions without reaching {}",
                    self.config.max_nodes,
                    goal
                );
                return None;
            }

            closed_set.insert(current);

            if self.accepts(current, goal) {
                let path = Self::reconstruct(&arena, current);
                tracing::debug!(
                    "A* found a {}-step path after {} expansions",
                    path.len().saturating_sub(1),
                    expanded
                );
                return Some(path);
            }

            let Some(current_g) = arena.get(&current).map(|r| r.g_cost) else {
                continue;
            };

            for neighbor in current.neighbors_4() {
                if closed_set.contains(&neighbor) {
                    continue;
                }
                if obstacles.contains(&neighbor) {
                    continue;
                }

                let tentative_g = current_g + 1;
                let known_g = arena.get(&neighbor).map(|r| r.g_cost);

                if known_g.is_none_or(|g| tentative_g < g) {
                    arena.insert(
                        neighbor,
                        SearchRecord {
                            g_cost: tentative_g,
                            parent: Some(current),
                        },
                    );
                    open_set.push(OpenNode {
                        cell: neighbor,
                        f_cost: tentative_g + Self::heuristic(neighbor, goal),
                    });
                }
            }
        }

        tracing::debug!("A* exhausted the search space after {} expansions", expanded);
        None
    }

    /// Goal acceptance: the exact goal cell, or any cell within the
    /// tolerance box on the horizontal axes. The box makes the search stop
    /// early, so accepted paths may end short of the exact goal.
    fn accepts(&self, cell: Cell, goal: Cell) -> bool {
        cell == goal || cell.within_xz_box(&goal, self.config.goal_tolerance)
    }

    /// Manhattan distance on (x, z). Admissible and consistent for
    /// unit-cost cardinal movement.
    #[inline]
    fn heuristic(from: Cell, to: Cell) -> i32 {
        from.manhattan_xz(&to)
    }

    /// Walk parent links back from the accepted cell, then reverse into
    /// start-to-goal order. The start is the one record without a parent.
    fn reconstruct(arena: &HashMap<Cell, SearchRecord>, accepted: Cell) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut current = accepted;

        loop {
            path.push(current);
            match arena.get(&current).and_then(|r| r.parent) {
                Some(p) => current = p,
                None => break,
            }
        }

        path.reverse();
        path
    }
}
