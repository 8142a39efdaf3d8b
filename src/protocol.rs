//! Wire protocol types for the actuator.
//!
//! Requests are typed and serialize to exactly one JSON object each;
//! replies are read tolerantly from raw JSON, because the actuator mixes
//! several reply shapes and unrelated messages on the same channel. A reply
//! that does not match what an accessor looks for yields `None` — the
//! caller treats that as a no-op, never as an error.

use serde::Serialize;
use serde_json::Value;

use crate::grid::{Cell, Direction};

/// A request to the actuator. At most one is outstanding at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Ask for the agent's current coordinates
    Position,
    /// Attempt a single one-cell step
    Step { dir: Direction },
    /// Ask for the contents of a specific cell
    BlockAt { position: Cell },
}

/// Contents report for a probed cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockReport {
    /// The cell holds an identified block and is impassable
    Occupied { name: String },
    /// The cell is empty/passable
    Empty,
}

/// One reply from the actuator, read tolerantly.
#[derive(Clone, Debug)]
pub struct Feedback(Value);

impl Feedback {
    /// Wrap a parsed reply
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Extract coordinates from a position reply.
    ///
    /// Accepts `status`/`type` of `"position"` (some actuators reply with
    /// `status: "ok"` instead) with the coordinates either flat on the
    /// object or nested under `position`. Anything else is `None`.
    pub fn position(&self) -> Option<Cell> {
        let tag_ok = matches!(self.0.get("status").and_then(Value::as_str), Some("position" | "ok"))
            || matches!(self.0.get("type").and_then(Value::as_str), Some("position"));
        if !tag_ok {
            return None;
        }

        let coords = match self.0.get("position") {
            Some(nested) => nested,
            None => &self.0,
        };

        let x = coords.get("x").and_then(Value::as_i64)?;
        let y = coords.get("y").and_then(Value::as_i64)?;
        let z = coords.get("z").and_then(Value::as_i64)?;
        Some(Cell::new(x as i32, y as i32, z as i32))
    }

    /// Extract the outcome of a step reply.
    ///
    /// Requires `action: "step"` and an `ok` field carrying a boolean or
    /// the strings `"true"`/`"false"`.
    pub fn step_result(&self) -> Option<bool> {
        if self.0.get("action").and_then(Value::as_str) != Some("step") {
            return None;
        }
        match self.0.get("ok")? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(s == "true"),
            _ => None,
        }
    }

    /// Extract the contents report from a cell probe reply.
    ///
    /// Requires `action`/`type` of `"block_at"`. A `name` field means the
    /// cell is occupied; its absence means empty.
    pub fn block_report(&self) -> Option<BlockReport> {
        let tag_ok = self.0.get("action").and_then(Value::as_str) == Some("block_at")
            || self.0.get("type").and_then(Value::as_str) == Some("block_at");
        if !tag_ok {
            return None;
        }

        match self.0.get("name").and_then(Value::as_str) {
            Some(name) => Some(BlockReport::Occupied { name: name.to_string() }),
            None => Some(BlockReport::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_wire_shapes() {
        let position = serde_json::to_value(Action::Position).unwrap();
        assert_eq!(position, json!({"action": "position"}));

        let step = serde_json::to_value(Action::Step { dir: Direction::East }).unwrap();
        assert_eq!(step, json!({"action": "step", "dir": "east"}));

        let probe = serde_json::to_value(Action::BlockAt {
            position: Cell::new(1, 100, -3),
        })
        .unwrap();
        assert_eq!(
            probe,
            json!({"action": "block_at", "position": {"x": 1, "y": 100, "z": -3}})
        );
    }

    #[test]
    fn test_position_flat_and_nested() {
        let flat = Feedback::new(json!({"type": "position", "x": 1, "y": 100, "z": 2}));
        assert_eq!(flat.position(), Some(Cell::new(1, 100, 2)));

        let nested = Feedback::new(json!({
            "status": "position",
            "position": {"x": -4, "y": 64, "z": 9}
        }));
        assert_eq!(nested.position(), Some(Cell::new(-4, 64, 9)));

        let ok_tag = Feedback::new(json!({"status": "ok", "x": 0, "y": 0, "z": 0}));
        assert_eq!(ok_tag.position(), Some(Cell::new(0, 0, 0)));
    }

    #[test]
    fn test_position_rejects_untagged_or_incomplete() {
        // Coordinates without an identifying tag
        let untagged = Feedback::new(json!({"x": 1, "y": 2, "z": 3}));
        assert_eq!(untagged.position(), None);

        // Tag without full coordinates
        let incomplete = Feedback::new(json!({"type": "position", "x": 1, "y": 2}));
        assert_eq!(incomplete.position(), None);

        // A step reply is not a position reply
        let step = Feedback::new(json!({"action": "step", "ok": true}));
        assert_eq!(step.position(), None);
    }

    #[test]
    fn test_step_result_bool_or_string() {
        let ok = Feedback::new(json!({"action": "step", "ok": true}));
        assert_eq!(ok.step_result(), Some(true));

        let failed = Feedback::new(json!({"action": "step", "ok": false}));
        assert_eq!(failed.step_result(), Some(false));

        let stringy = Feedback::new(json!({"action": "step", "ok": "true"}));
        assert_eq!(stringy.step_result(), Some(true));

        let stringy_false = Feedback::new(json!({"action": "step", "ok": "false"}));
        assert_eq!(stringy_false.step_result(), Some(false));

        let missing = Feedback::new(json!({"action": "step"}));
        assert_eq!(missing.step_result(), None);
    }

    #[test]
    fn test_block_report_name_presence() {
        let stone = Feedback::new(json!({"action": "block_at", "name": "stone"}));
        assert_eq!(
            stone.block_report(),
            Some(BlockReport::Occupied { name: "stone".to_string() })
        );

        let empty = Feedback::new(json!({"type": "block_at"}));
        assert_eq!(empty.block_report(), Some(BlockReport::Empty));

        let unrelated = Feedback::new(json!({"action": "step", "ok": true}));
        assert_eq!(unrelated.block_report(), None);
    }
}
