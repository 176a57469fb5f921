//! Game session: one snake, one piece of food, a score and a game-over flag.

use crate::config::GameConfig;
use crate::constants::{MAX_CADENCE_MS, MIN_CADENCE_MS};
use crate::snake::{Direction, Position, SnakeEngine};
use rand::Rng;

/// What a single `update` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    /// The snake moved this tick.
    pub stepped: bool,
    /// The head landed on the food.
    pub ate_food: bool,
    /// The step ran into the body; the session is now over.
    pub collided: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    engine: SnakeEngine,
    food: Position,
    score: u32,
    game_over: bool,
    cadence_ms: u64,
    tick_count: u64,

    start: Position,
    initial_length: usize,
    food_start: Position,
    base_cadence_ms: u64,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        let mut engine =
            SnakeEngine::with_policy(config.width, config.height, config.collision_policy);
        engine.initialize(config.start.x, config.start.y, config.initial_length);
        let food_start = config
            .food_start
            .wrapped(engine.width(), engine.height());
        let cadence_ms = config.clamped_cadence_ms();

        Self {
            engine,
            food: food_start,
            score: 0,
            game_over: false,
            cadence_ms,
            tick_count: 0,
            start: config.start,
            initial_length: config.initial_length,
            food_start,
            base_cadence_ms: cadence_ms,
        }
    }

    /// Run one tick: move, then feed. No-op once the game is over.
    ///
    /// Food is checked even on the colliding tick, so a snake can score
    /// with its last move.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> TickResult {
        if self.game_over {
            return TickResult::default();
        }

        let mut result = TickResult {
            stepped: true,
            ..Default::default()
        };
        self.tick_count += 1;

        if !self.engine.step() {
            self.game_over = true;
            result.collided = true;
            tracing::info!(
                score = self.score,
                length = self.engine.len(),
                head = ?self.engine.head(),
                "snake collided with itself"
            );
        }

        if self.engine.head() == self.food {
            self.engine.grow(None);
            self.food = spawn_food(self.engine.width(), self.engine.height(), rng);
            self.score += 1;
            result.ate_food = true;
            tracing::debug!(
                score = self.score,
                length = self.engine.len(),
                food = ?self.food,
                "food eaten"
            );
        }

        result
    }

    /// Forward a direction intent to the engine.
    pub fn steer(&mut self, direction: Direction) {
        self.engine.steer(direction);
    }

    pub fn set_desired_direction(&mut self, dx: i32, dy: i32) {
        self.engine.set_desired_direction(dx, dy);
    }

    /// Set the step interval, clamped to `[MIN_CADENCE_MS, MAX_CADENCE_MS]`.
    pub fn set_cadence(&mut self, ms: u64) {
        self.cadence_ms = ms.clamp(MIN_CADENCE_MS, MAX_CADENCE_MS);
    }

    /// Start over from the configured layout.
    pub fn reset(&mut self) {
        self.engine
            .initialize(self.start.x, self.start.y, self.initial_length);
        self.food = self.food_start;
        self.score = 0;
        self.game_over = false;
        self.tick_count = 0;
        self.cadence_ms = self.base_cadence_ms;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn cadence_ms(&self) -> u64 {
        self.cadence_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Test hook and level-editor seam: place the food directly.
    pub fn set_food(&mut self, pos: Position) {
        self.food = pos.wrapped(self.engine.width(), self.engine.height());
    }

    pub fn engine(&self) -> &SnakeEngine {
        &self.engine
    }

    pub fn width(&self) -> i32 {
        self.engine.width()
    }

    pub fn height(&self) -> i32 {
        self.engine.height()
    }
}

/// Uniform random cell. Ignores the body, so food may land on the snake.
pub fn spawn_food<R: Rng>(width: i32, height: i32, rng: &mut R) -> Position {
    Position {
        x: rng.gen_range(0..width.max(1)),
        y: rng.gen_range(0..height.max(1)),
    }
}
