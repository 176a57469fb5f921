//! Snake data structures shared by the chain, grid and engine.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A cell on the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floored-modulo wrap into `[0, width) x [0, height)`.
    ///
    /// `-1` on a width-25 level becomes `24`, `25` becomes `0`.
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width.max(1)),
            y: self.y.rem_euclid(height.max(1)),
        }
    }
}

/// Cardinal direction intent from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Inverse of `delta`; `None` for the resting or diagonal deltas.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// When the tail's cell is released relative to the collision test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Free the tail cell first, so the head may enter the cell the tail
    /// leaves on the same step.
    #[default]
    ReleaseTailFirst,
    /// Test the candidate cell while the tail still holds its cell.
    CheckBeforeRelease,
}

impl CollisionPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReleaseTailFirst => "release-tail-first",
            Self::CheckBeforeRelease => "check-before-release",
        }
    }
}
