//! Obstacle probe sequencing after a failed step.
//!
//! A rejected step means something blocks the cell ahead, but not at
//! which height. Two cells must be inspected in order: the ground-level
//! cell one step ahead, then the head-level cell above it.

use crate::grid::{Cell, Direction};

/// Vertical slot of the cell under inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeSlot {
    /// One step ahead at the agent's elevation
    Ground,
    /// One step ahead, one cell up
    Head,
}

/// Two-slot probe sequence in a fixed facing direction.
#[derive(Clone, Copy, Debug)]
pub struct ObstacleProbe {
    facing: Direction,
    slot: ProbeSlot,
}

impl ObstacleProbe {
    /// Create a probe facing the given direction, at the first slot.
    pub fn new(facing: Direction) -> Self {
        Self {
            facing,
            slot: ProbeSlot::Ground,
        }
    }

    /// Restart the sequence at the ground slot, facing a new direction.
    pub fn reset(&mut self, facing: Direction) {
        self.facing = facing;
        self.slot = ProbeSlot::Ground;
    }

    /// The slot currently under inspection.
    pub fn slot(&self) -> ProbeSlot {
        self.slot
    }

    /// The cell to query for the current slot, given the agent's
    /// corrected position.
    pub fn target_cell(&self, from: Cell) -> Cell {
        let ahead = from.step(self.facing);
        match self.slot {
            ProbeSlot::Ground => ahead,
            ProbeSlot::Head => Cell::new(ahead.x, ahead.y + 1, ahead.z),
        }
    }

    /// Move to the next slot. Returns `true` once both slots have been
    /// probed and the sequence is complete.
    pub fn advance(&mut self) -> bool {
        match self.slot {
            ProbeSlot::Ground => {
                self.slot = ProbeSlot::Head;
                false
            }
            ProbeSlot::Head => true,
        }
    }
}
