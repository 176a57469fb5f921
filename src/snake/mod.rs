//! Snake core: segment chain, occupancy mask and the stepping engine.

pub mod chain;
pub mod engine;
pub mod grid;
pub mod types;

pub use chain::{SegmentChain, SegmentId};
pub use engine::{EngineSnapshot, SnakeEngine};
pub use grid::OccupancyGrid;
pub use types::{CollisionPolicy, Direction, Position};
