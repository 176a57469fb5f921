//! Snake engine: direction latching, stepping, growth and self-collision.
//!
//! The engine owns the body chain and the occupancy mask. Every step recycles
//! the tail segment as the new head, so a steady-state snake never allocates.

use super::chain::SegmentChain;
use super::grid::OccupancyGrid;
use super::types::{CollisionPolicy, Direction, Position};
use crate::constants::{DEFAULT_INITIAL_LENGTH, DEFAULT_START_X, DEFAULT_START_Y};
use serde::Serialize;

/// Read-only copy of the engine state, tail to head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub width: i32,
    pub height: i32,
    pub direction: (i32, i32),
    pub segments: Vec<Position>,
}

#[derive(Debug, Clone)]
pub struct SnakeEngine {
    chain: SegmentChain,
    grid: OccupancyGrid,
    width: i32,
    height: i32,
    policy: CollisionPolicy,

    /// Latched direction used by the next step.
    dir_x: i32,
    dir_y: i32,
    /// Pending input, consumed by the next step.
    move_x: i32,
    move_y: i32,
}

impl SnakeEngine {
    /// Engine on a `width x height` level, coiled at the default start.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_policy(width, height, CollisionPolicy::default())
    }

    pub fn with_policy(width: u16, height: u16, policy: CollisionPolicy) -> Self {
        let grid = OccupancyGrid::new(width, height);
        let mut engine = Self {
            width: grid.width(),
            height: grid.height(),
            grid,
            chain: SegmentChain::new(),
            policy,
            dir_x: 0,
            dir_y: 0,
            move_x: 0,
            move_y: 0,
        };
        engine.initialize(DEFAULT_START_X, DEFAULT_START_Y, DEFAULT_INITIAL_LENGTH);
        engine
    }

    /// Tear down the body and mask, then stack `initial_length` segments on
    /// the start cell heading right.
    ///
    /// The start is wrapped onto the level and a length of 0 is treated as 1.
    pub fn initialize(&mut self, start_x: i32, start_y: i32, initial_length: usize) {
        self.chain.clear();
        self.grid.clear();

        let start = Position::new(start_x, start_y).wrapped(self.width, self.height);
        for _ in 0..initial_length.max(1) {
            self.chain.push_head(start);
        }
        self.grid.set_at(start, true);

        self.dir_x = 1;
        self.dir_y = 0;
        self.move_x = 0;
        self.move_y = 0;
    }

    /// Record player intent for the next step. Last call before the step wins.
    pub fn set_desired_direction(&mut self, dx: i32, dy: i32) {
        self.move_x = dx;
        self.move_y = dy;
    }

    pub fn steer(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.set_desired_direction(dx, dy);
    }

    /// Fold pending input into the latched direction.
    ///
    /// An axis only accepts input while it is at rest, so a snake moving
    /// right ignores "left" and can only turn through up or down.
    fn latch_pending_input(&mut self) {
        if self.move_x != 0 && self.dir_x == 0 {
            self.dir_y = 0;
            self.dir_x = self.move_x.signum();
        }
        if self.move_y != 0 && self.dir_y == 0 {
            self.dir_x = 0;
            self.dir_y = self.move_y.signum();
        }
        self.move_x = 0;
        self.move_y = 0;
    }

    /// Advance one cell. Returns `false` when the head ran into the body.
    ///
    /// The body still moves on a colliding step; callers decide what a
    /// collision means.
    pub fn step(&mut self) -> bool {
        self.latch_pending_input();

        let (Some(tail), Some(head)) = (self.chain.tail(), self.chain.head()) else {
            return true;
        };

        let head_pos = self.chain.position(head);
        let candidate = Position::new(head_pos.x + self.dir_x, head_pos.y + self.dir_y)
            .wrapped(self.width, self.height);

        let tail_pos = self.chain.position(tail);
        let collision = match self.policy {
            CollisionPolicy::ReleaseTailFirst => {
                self.grid.set_at(tail_pos, false);
                self.grid.get_at(candidate)
            }
            CollisionPolicy::CheckBeforeRelease => {
                let hit = self.grid.get_at(candidate);
                self.grid.set_at(tail_pos, false);
                hit
            }
        };

        // Recycle the tail as the new head. A single segment just moves.
        if tail != head {
            self.chain.insert_after(tail, head);
        }
        self.chain.set_position(tail, candidate);

        // The new tail may share the released cell (fresh or just-grown body)
        if let Some(new_tail) = self.chain.tail() {
            let pos = self.chain.position(new_tail);
            self.grid.set_at(pos, true);
        }
        self.grid.set_at(candidate, true);

        !collision
    }

    /// Add a segment after the head, at `at` or on the head's own cell.
    pub fn grow(&mut self, at: Option<Position>) {
        let pos = match (at, self.chain.head()) {
            (Some(pos), _) => pos,
            (None, Some(head)) => self.chain.position(head),
            (None, None) => Position::new(DEFAULT_START_X, DEFAULT_START_Y)
                .wrapped(self.width, self.height),
        };
        self.chain.push_head(pos);
        self.grid.set_at(pos, true);
    }

    pub fn head(&self) -> Position {
        self.chain
            .head()
            .map(|id| self.chain.position(id))
            .unwrap_or_default()
    }

    pub fn tail(&self) -> Position {
        self.chain
            .tail()
            .map(|id| self.chain.position(id))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Latched (dx, dy).
    pub fn direction(&self) -> (i32, i32) {
        (self.dir_x, self.dir_y)
    }

    pub fn heading(&self) -> Option<Direction> {
        Direction::from_delta(self.dir_x, self.dir_y)
    }

    /// Segment coordinates from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.chain.iter().map(|(_, pos)| pos)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.grid.get_at(pos)
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CollisionPolicy) {
        self.policy = policy;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            width: self.width,
            height: self.height,
            direction: self.direction(),
            segments: self.chain.positions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Build a body tail-first from explicit cells.
    fn body(width: u16, height: u16, cells: &[(i32, i32)], policy: CollisionPolicy) -> SnakeEngine {
        let mut engine = SnakeEngine::with_policy(width, height, policy);
        let (x, y) = cells[0];
        engine.initialize(x, y, 1);
        for &(x, y) in &cells[1..] {
            engine.grow(Some(p(x, y)));
        }
        engine
    }

    /// Marked cells are exactly the cells some segment covers.
    fn assert_mask_matches_body(engine: &SnakeEngine) {
        let covered: HashSet<Position> = engine.segments().collect();
        assert_eq!(engine.occupied_count(), covered.len());
        for pos in covered {
            assert!(engine.is_occupied(pos), "{pos:?} should be marked");
        }
    }

    #[test]
    fn test_new_engine_defaults() {
        let engine = SnakeEngine::new(25, 25);
        assert_eq!(engine.len(), 5);
        assert_eq!(engine.head(), p(5, 5));
        assert_eq!(engine.tail(), p(5, 5));
        assert_eq!(engine.direction(), (1, 0));
        assert_eq!(engine.heading(), Some(Direction::Right));
        assert_eq!(engine.policy(), CollisionPolicy::ReleaseTailFirst);
        assert_eq!(engine.occupied_count(), 1);
    }

    #[test]
    fn test_initialize_wraps_start_and_keeps_one_segment() {
        let mut engine = SnakeEngine::new(4, 4);
        engine.initialize(-1, 9, 0);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.head(), p(3, 1));
    }

    #[test]
    fn test_initialize_resets_direction_and_input() {
        let mut engine = SnakeEngine::new(25, 25);
        engine.set_desired_direction(0, 1);
        engine.step();
        assert_eq!(engine.direction(), (0, 1));

        engine.set_desired_direction(-1, 0);
        engine.initialize(5, 5, 5);
        assert_eq!(engine.direction(), (1, 0));
        engine.step();
        assert_eq!(engine.head(), p(6, 5));
    }

    #[test]
    fn test_first_steps_spread_stacked_body() {
        let mut engine = SnakeEngine::new(25, 25);
        for _ in 0..4 {
            assert!(engine.step());
        }
        assert_eq!(
            engine.segments().collect::<Vec<_>>(),
            vec![p(5, 5), p(6, 5), p(7, 5), p(8, 5), p(9, 5)]
        );
        assert_mask_matches_body(&engine);

        assert!(engine.step());
        assert_eq!(engine.tail(), p(6, 5));
        assert!(!engine.is_occupied(p(5, 5)));
        assert_mask_matches_body(&engine);
    }

    #[test]
    fn test_pending_input_applies_once() {
        let mut engine = SnakeEngine::new(25, 25);
        engine.set_desired_direction(0, -1);
        engine.step();
        assert_eq!(engine.head(), p(5, 4));
        engine.step();
        assert_eq!(engine.head(), p(5, 3));
    }

    #[test]
    fn test_last_input_before_step_wins() {
        let mut engine = SnakeEngine::new(25, 25);
        engine.set_desired_direction(0, -1);
        engine.set_desired_direction(0, 1);
        engine.step();
        assert_eq!(engine.direction(), (0, 1));
    }

    #[test]
    fn test_reverse_input_is_ignored() {
        let mut engine = SnakeEngine::new(25, 25);
        engine.set_desired_direction(-1, 0);
        engine.step();
        assert_eq!(engine.head(), p(6, 5));
        assert_eq!(engine.direction(), (1, 0));

        engine.set_desired_direction(0, 1);
        engine.step();
        engine.set_desired_direction(0, -1);
        engine.step();
        assert_eq!(engine.direction(), (0, 1));
        assert_eq!(engine.head(), p(6, 7));
    }

    #[test]
    fn test_input_magnitude_is_normalized() {
        let mut engine = SnakeEngine::new(25, 25);
        engine.set_desired_direction(0, 7);
        engine.step();
        assert_eq!(engine.direction(), (0, 1));
        assert_eq!(engine.head(), p(5, 6));
    }

    #[test]
    fn test_single_segment_wraps_every_edge() {
        let mut engine = body(6, 4, &[(5, 2)], CollisionPolicy::ReleaseTailFirst);
        assert!(engine.step());
        assert_eq!(engine.head(), p(0, 2));

        engine.initialize(0, 1, 1);
        engine.set_desired_direction(0, -1);
        assert!(engine.step());
        assert_eq!(engine.head(), p(0, 0));
        assert!(engine.step());
        assert_eq!(engine.head(), p(0, 3));

        engine.set_desired_direction(-1, 0);
        assert!(engine.step());
        assert_eq!(engine.head(), p(5, 3));
        assert_mask_matches_body(&engine);
    }

    #[test]
    fn test_single_segment_never_hits_itself() {
        for policy in [
            CollisionPolicy::ReleaseTailFirst,
            CollisionPolicy::CheckBeforeRelease,
        ] {
            let mut engine = body(3, 3, &[(1, 1)], policy);
            for _ in 0..10 {
                assert!(engine.step());
                assert_eq!(engine.occupied_count(), 1);
            }
        }
    }

    #[test]
    fn test_grow_on_head_cell() {
        let mut engine = SnakeEngine::new(25, 25);
        for _ in 0..4 {
            engine.step();
        }
        let head = engine.head();
        engine.grow(None);
        assert_eq!(engine.len(), 6);
        assert_eq!(engine.head(), head);

        for _ in 0..10 {
            assert!(engine.step());
            let cells: Vec<Position> = engine.segments().collect();
            let unique: HashSet<Position> = cells.iter().copied().collect();
            assert!(unique.len() >= cells.len() - 1);
        }
        assert_mask_matches_body(&engine);
    }

    #[test]
    fn test_grow_at_explicit_cell() {
        let mut engine = SnakeEngine::new(25, 25);
        engine.grow(Some(p(20, 20)));
        assert_eq!(engine.len(), 6);
        assert_eq!(engine.head(), p(20, 20));
        assert!(engine.is_occupied(p(20, 20)));
    }

    #[test]
    fn test_self_collision_detected() {
        // Hook: head at (4,5) moving right into (5,5), which is not the tail
        let mut engine = body(
            25,
            25,
            &[(4, 4), (5, 4), (5, 5), (4, 5)],
            CollisionPolicy::ReleaseTailFirst,
        );
        assert_eq!(engine.direction(), (1, 0));
        assert!(!engine.step());
    }

    #[test]
    fn test_tail_chase_allowed_when_tail_released_first() {
        let mut engine = body(
            25,
            25,
            &[(5, 5), (6, 5), (6, 6), (5, 6)],
            CollisionPolicy::ReleaseTailFirst,
        );
        let turns = [(0, -1), (1, 0), (0, 1), (-1, 0)];
        for i in 0..40 {
            let (dx, dy) = turns[i % 4];
            engine.set_desired_direction(dx, dy);
            assert!(engine.step(), "step {i} should chase the tail");
            assert_mask_matches_body(&engine);
        }
    }

    #[test]
    fn test_tail_chase_blocked_when_checked_before_release() {
        let mut engine = body(
            25,
            25,
            &[(5, 5), (6, 5), (6, 6), (5, 6)],
            CollisionPolicy::CheckBeforeRelease,
        );
        engine.set_desired_direction(0, -1);
        assert!(!engine.step());
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine = body(8, 8, &[(1, 1), (2, 1)], CollisionPolicy::ReleaseTailFirst);
        let snap = engine.snapshot();
        assert_eq!(snap.segments, vec![p(1, 1), p(2, 1)]);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"segments\":[{\"x\":1,\"y\":1},{\"x\":2,\"y\":1}]"));
    }
}
