//! Default tunables for the arcade.

/// Level width in cells.
pub const DEFAULT_LEVEL_WIDTH: u16 = 25;

/// Level height in cells.
pub const DEFAULT_LEVEL_HEIGHT: u16 = 25;

/// Where a fresh snake is coiled up.
pub const DEFAULT_START_X: i32 = 5;
pub const DEFAULT_START_Y: i32 = 5;

/// Segments stacked on the start cell by `initialize`.
pub const DEFAULT_INITIAL_LENGTH: usize = 5;

/// First food position after construction or reset.
pub const DEFAULT_FOOD_X: i32 = 10;
pub const DEFAULT_FOOD_Y: i32 = 10;

/// Milliseconds between movement steps (lower = faster).
pub const DEFAULT_CADENCE_MS: u64 = 150;

/// Largest level `GameConfig::validate` accepts, in cells.
pub const MAX_LEVEL_CELLS: usize = 1 << 20;

/// Cadence clamp range enforced by `GameSession::set_cadence`.
pub const MIN_CADENCE_MS: u64 = 5;
pub const MAX_CADENCE_MS: u64 = 1000;

/// The score readout shows the raw score times this.
pub const DEFAULT_SCORE_MULTIPLIER: u32 = 9;

// ── Starfield ────────────────────────────────────────────────────────

pub const DEFAULT_STAR_COUNT: usize = 100;
pub const DEFAULT_STAR_SPEED: f64 = 2.0;
/// The arcade slows the field down from the widget default.
pub const ARCADE_STAR_SPEED: f64 = 0.25;
pub const DEFAULT_Z_NEAR: f64 = 1.0;
pub const DEFAULT_Z_FAR: f64 = 10.0;
/// Virtual canvas the stars are projected onto.
pub const STARFIELD_CANVAS: f64 = 500.0;
/// Perspective scale applied to x/z and y/z.
pub const STAR_PROJECTION_SCALE: f64 = 1.75;
/// Frame deltas at or above this (seconds) are treated as a stall and skipped.
pub const MAX_STAR_DELTA_SECS: f64 = 0.65;

/// Terminal input poll interval.
pub const INPUT_POLL_MS: u64 = 50;

/// Cadence nudge applied by the `+`/`-` keys.
pub const CADENCE_NUDGE_MS: u64 = 10;
