//! Turn-based navigation state machine.
//!
//! Orchestrates planning, waypoint following, and obstacle probing into
//! the external turn protocol: exactly one outstanding request at a time.
//! The caller alternates [`Navigator::next_action`] with one external
//! round trip and one [`Navigator::handle_feedback`] call; the machine
//! itself performs no I/O, never blocks, and has no notion of time.

use crate::grid::{Cell, Direction};
use crate::planning::{AStarConfig, AStarPlanner, ObstacleMemory};
use crate::protocol::{Action, BlockReport, Feedback};
use crate::tracker::PositionTracker;

use super::follower::WaypointFollower;
use super::probe::ObstacleProbe;

/// Configuration for the navigator.
#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    /// Maximum confirmed steps before giving up on the target
    pub step_budget: u32,
    /// Arrival tolerance in cells on each horizontal axis
    pub target_tolerance: i32,
    /// Node expansion budget for each planner run
    pub max_search_nodes: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            step_budget: 2000,
            target_tolerance: 2,
            max_search_nodes: 10_000,
        }
    }
}

/// State of the navigation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    /// No target set yet
    Idle,
    /// Waiting for the first confirmed position
    AwaitingInitialPosition,
    /// Walking the planned path one step per turn
    Moving,
    /// A step was rejected; waiting for a corrected position
    AwaitingRefreshedPosition,
    /// Inspecting the two cells ahead after a rejected step
    ProbingObstacle,
    /// Terminal: target reached, budget exhausted, or no path
    Finished,
}

/// Turn-based navigator for one agent.
///
/// Owns all mutable navigation state: tracked position, obstacle memory,
/// the current path and cursor, the probe sequence, and the step counter.
/// Single-threaded by design — if the surrounding driver is multithreaded
/// it must serialize calls externally, one in flight at a time.
pub struct Navigator {
    config: NavigatorConfig,
    state: NavState,
    planner: AStarPlanner,
    tracker: PositionTracker,
    obstacles: ObstacleMemory,
    follower: WaypointFollower,
    probe: ObstacleProbe,
    /// Cell the agent is trying to reach
    target: Option<Cell>,
    /// Direction of the last emitted step; probe facing after a failure
    facing: Direction,
    /// Confirmed successful steps this session
    step_count: u32,
    /// Discard the current path on the next move turn
    needs_replan: bool,
    /// Whether Finished was reached inside the arrival tolerance
    target_reached: bool,
}

impl Navigator {
    /// Create a navigator with configuration.
    pub fn new(config: NavigatorConfig) -> Self {
        let planner = AStarPlanner::new(AStarConfig {
            max_nodes: config.max_search_nodes,
            goal_tolerance: config.target_tolerance,
        });
        Self {
            config,
            state: NavState::Idle,
            planner,
            tracker: PositionTracker::new(),
            obstacles: ObstacleMemory::new(),
            follower: WaypointFollower::new(),
            probe: ObstacleProbe::new(Direction::East),
            target: None,
            facing: Direction::East,
            step_count: 0,
            needs_replan: false,
            target_reached: false,
        }
    }

    /// Create a navigator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(NavigatorConfig::default())
    }

    /// Set the cell to navigate toward.
    ///
    /// Resets the step counter and the current path. From Idle this
    /// starts the session; Finished is terminal and stays Finished.
    /// Obstacle memory persists across retargets.
    pub fn set_target(&mut self, target: Cell) {
        self.target = Some(target);
        self.step_count = 0;
        self.target_reached = false;
        self.needs_replan = true;
        self.follower.clear_path();

        if self.state == NavState::Idle {
            tracing::info!("Target set to {}", target);
            self.state = NavState::AwaitingInitialPosition;
        }
    }

    /// Current state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Whether the session has terminated.
    ///
    /// Finished alone does not say why; see [`Navigator::target_reached`].
    pub fn is_complete(&self) -> bool {
        self.state == NavState::Finished
    }

    /// Whether the agent ended within the arrival tolerance of the target.
    pub fn target_reached(&self) -> bool {
        self.target_reached
    }

    /// Confirmed successful steps so far.
    pub fn steps_taken(&self) -> u32 {
        self.step_count
    }

    /// Last-confirmed agent position, if any.
    pub fn position(&self) -> Option<Cell> {
        self.tracker.position()
    }

    /// Obstacles discovered so far.
    pub fn obstacles(&self) -> &ObstacleMemory {
        &self.obstacles
    }

    /// Produce the next request to send, or `None` when this turn needs
    /// no round trip. After a `Some`, exactly one matching
    /// [`Navigator::handle_feedback`] call is expected before the next
    /// `next_action`.
    pub fn next_action(&mut self) -> Option<Action> {
        let target = self.target?;

        match self.state {
            NavState::Idle | NavState::Finished => None,

            NavState::AwaitingInitialPosition | NavState::AwaitingRefreshedPosition => {
                Some(Action::Position)
            }

            NavState::Moving => self.next_move(target),

            NavState::ProbingObstacle => {
                let origin = self.tracker.position()?;
                Some(Action::BlockAt {
                    position: self.probe.target_cell(origin),
                })
            }
        }
    }

    /// Consume one reply. Irrelevant or malformed feedback for the
    /// current state is a no-op — noise, not failure.
    pub fn handle_feedback(&mut self, msg: &Feedback) {
        match self.state {
            NavState::Idle | NavState::Finished => {}

            NavState::AwaitingInitialPosition => {
                if let Some(cell) = msg.position() {
                    if let Some(target) = self.target {
                        tracing::info!(
                            "Position confirmed at {}, {} cells from target",
                            cell,
                            cell.manhattan_xz(&target)
                        );
                        self.tracker.confirm(cell);
                        self.replan(cell, target);
                        self.state = NavState::Moving;
                    }
                }
            }

            NavState::AwaitingRefreshedPosition => {
                if let Some(cell) = msg.position() {
                    tracing::debug!("Corrected position {}", cell);
                    self.tracker.confirm(cell);
                    self.probe.reset(self.facing);
                    self.state = NavState::ProbingObstacle;
                }
            }

            NavState::Moving => {
                if let Some(ok) = msg.step_result() {
                    if ok {
                        self.step_count += 1;
                        self.tracker.apply_step(self.facing);
                        tracing::debug!(
                            "Step {} confirmed ({} steps)",
                            self.facing,
                            self.step_count
                        );
                    } else {
                        tracing::info!("Step {} rejected, refreshing position", self.facing);
                        self.state = NavState::AwaitingRefreshedPosition;
                    }
                }
            }

            NavState::ProbingObstacle => {
                if let Some(report) = msg.block_report() {
                    if let Some(origin) = self.tracker.position() {
                        if let BlockReport::Occupied { name } = &report {
                            let cell = self.probe.target_cell(origin);
                            tracing::info!("Probe found {} at {}", name, cell);
                            self.obstacles.insert(cell);
                            self.needs_replan = true;
                        }
                    }
                    if self.probe.advance() {
                        // Both slots inspected; walk on with a fresh plan
                        self.needs_replan = true;
                        self.state = NavState::Moving;
                    }
                }
            }
        }
    }

    /// One move turn: terminal checks, replanning, then a single step.
    fn next_move(&mut self, target: Cell) -> Option<Action> {
        let current = self.tracker.position()?;

        if current.within_xz_box(&target, self.config.target_tolerance) {
            tracing::info!(
                "Target {} reached at {} in {} steps",
                target,
                current,
                self.step_count
            );
            self.target_reached = true;
            self.state = NavState::Finished;
            return None;
        }

        if self.step_count >= self.config.step_budget {
            tracing::warn!(
                "Step budget ({}) exhausted {} cells from target",
                self.config.step_budget,
                current.manhattan_xz(&target)
            );
            self.state = NavState::Finished;
            return None;
        }

        if self.needs_replan || !self.follower.has_usable_path() {
            self.replan(current, target);
            if !self.follower.has_usable_path() {
                tracing::warn!("No path to {}, giving up", target);
                self.state = NavState::Finished;
                return None;
            }
        }

        self.follower.advance_if_reached(current);
        match self.follower.direction_toward(current) {
            Some(dir) => {
                self.facing = dir;
                Some(Action::Step { dir })
            }
            None => {
                // Standing on the final waypoint outside the tolerance
                // box: the plan stopped short, get a fresh one next turn.
                self.needs_replan = true;
                None
            }
        }
    }

    /// Replace the current path wholesale from the latest knowledge.
    fn replan(&mut self, current: Cell, target: Cell) {
        match self.planner.plan(current, target, &self.obstacles) {
            Some(path) => self.follower.set_path(path),
            None => self.follower.clear_path(),
        }
        self.needs_replan = false;
    }
}
