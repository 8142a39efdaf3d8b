//! Cell and direction types for the voxel grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Voxel grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    /// X coordinate (east positive)
    pub x: i32,
    /// Y coordinate (vertical)
    pub y: i32,
    /// Z coordinate (south positive)
    pub z: i32,
}

impl Cell {
    /// Create a new cell coordinate
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance on the two horizontal axes.
    ///
    /// The vertical axis is ignored: movement and planning happen at a
    /// fixed elevation.
    #[inline]
    pub fn manhattan_xz(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }

    /// Get the 4 cardinal neighbors at the same elevation (E, W, S, N)
    #[inline]
    pub fn neighbors_4(&self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.y, self.z), // East
            Cell::new(self.x - 1, self.y, self.z), // West
            Cell::new(self.x, self.y, self.z + 1), // South
            Cell::new(self.x, self.y, self.z - 1), // North
        ]
    }

    /// The neighboring cell one step in the given direction
    #[inline]
    pub fn step(&self, dir: Direction) -> Cell {
        let (dx, dy, dz) = dir.delta();
        Cell::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Whether this cell lies within the ±`tolerance` box around `other`
    /// on the horizontal axes. Elevation is not compared.
    #[inline]
    pub fn within_xz_box(&self, other: &Cell, tolerance: i32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.z - other.z).abs() <= tolerance
    }
}

impl Add for Cell {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Cell::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Cell {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Cell::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Cardinal movement direction.
///
/// Steps never change elevation; the vertical component of every delta
/// is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
}

impl Direction {
    /// Unit delta on (x, y, z) for one step in this direction
    #[inline]
    pub fn delta(&self) -> (i32, i32, i32) {
        match self {
            Direction::East => (1, 0, 0),
            Direction::West => (-1, 0, 0),
            Direction::South => (0, 0, 1),
            Direction::North => (0, 0, -1),
        }
    }

    /// Wire name of this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
