//! The arcade cabinet: drives session ticks from wall-clock frames and wires
//! the score readout and starfield to what happens in the game.
//!
//! Logic speed is decoupled from frame rate. Each frame runs as many whole
//! cadence intervals as have elapsed, possibly none, possibly several.

use crate::config::GameConfig;
use crate::constants::{MAX_CADENCE_MS, MIN_CADENCE_MS};
use crate::session::GameSession;
use crate::snake::Direction;
use crate::starfield::Starfield;
use rand::Rng;

/// Converts frame timestamps into a count of due logic ticks.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Time up to which ticks have been issued.
    anchor_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks due at `now_ms` for the given cadence. The first frame only
    /// anchors the clock.
    pub fn advance(&mut self, now_ms: u64, cadence_ms: u64) -> u64 {
        let cadence_ms = cadence_ms.max(1);
        let Some(anchor) = self.anchor_ms else {
            self.anchor_ms = Some(now_ms);
            return 0;
        };
        let due = now_ms.saturating_sub(anchor) / cadence_ms;
        self.anchor_ms = Some(anchor + due * cadence_ms);
        due
    }

    pub fn reset(&mut self) {
        self.anchor_ms = None;
    }
}

/// Edge events derived from level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadeEvent {
    ScoreChanged(u32),
    GameOver,
}

/// Diffs score and game-over against the previous frame.
#[derive(Debug, Clone, Default)]
pub struct ChangeWatcher {
    score: u32,
    game_over: bool,
}

impl ChangeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, score: u32, game_over: bool) -> Vec<ArcadeEvent> {
        let mut events = Vec::new();
        if score != self.score {
            self.score = score;
            events.push(ArcadeEvent::ScoreChanged(score));
        }
        if game_over && !self.game_over {
            events.push(ArcadeEvent::GameOver);
        }
        self.game_over = game_over;
        events
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Session plus decorations, driven one frame at a time.
pub struct Arcade {
    session: GameSession,
    starfield: Starfield,
    clock: FrameClock,
    watcher: ChangeWatcher,
    last_frame_ms: Option<u64>,
    displayed_score: u32,
    score_multiplier: u32,
    star_speed: f64,
    stars_enabled: bool,
}

impl Arcade {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let starfield = Starfield::from_config(&config.starfield, rng);
        Self {
            session: GameSession::new(config),
            star_speed: starfield.speed(),
            starfield,
            clock: FrameClock::new(),
            watcher: ChangeWatcher::new(),
            last_frame_ms: None,
            displayed_score: 0,
            score_multiplier: config.score_multiplier,
            stars_enabled: config.starfield.enabled,
        }
    }

    /// Run one rendered frame at `now_ms`: due ticks, starfield drift, then
    /// change reactions. Returns the events raised this frame.
    pub fn frame<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> Vec<ArcadeEvent> {
        let due = self.clock.advance(now_ms, self.session.cadence_ms());
        for _ in 0..due {
            if self.session.is_game_over() {
                break;
            }
            self.session.update(rng);
        }

        if let Some(prev) = self.last_frame_ms {
            let delta_secs = now_ms.saturating_sub(prev) as f64 / 1000.0;
            self.starfield.update(delta_secs);
        }
        self.last_frame_ms = Some(now_ms);

        let events = self
            .watcher
            .observe(self.session.score(), self.session.is_game_over());
        for event in &events {
            self.react(*event);
        }
        events
    }

    fn react(&mut self, event: ArcadeEvent) {
        match event {
            ArcadeEvent::ScoreChanged(score) => {
                self.displayed_score = score * self.score_multiplier;

                // 10% faster per point, at least 1ms
                let cadence = self.session.cadence_ms();
                let faster = cadence.saturating_sub((cadence / 10).max(1));
                self.session.set_cadence(faster);

                // Stars pick up 1% per point
                let speed = self.starfield.speed();
                self.starfield.set_speed(speed + (speed * 0.01).max(0.001));

                tracing::debug!(
                    score,
                    cadence_ms = self.session.cadence_ms(),
                    star_speed = self.starfield.speed(),
                    "score changed"
                );
            }
            ArcadeEvent::GameOver => {
                self.starfield.set_speed(0.0);
                tracing::info!(score = self.session.score(), "game over");
            }
        }
    }

    pub fn steer(&mut self, direction: Direction) {
        self.session.steer(direction);
    }

    /// Nudge the cadence by `delta_ms` (negative = faster).
    pub fn adjust_cadence(&mut self, delta_ms: i64) {
        let target = (self.session.cadence_ms() as i64 + delta_ms)
            .clamp(MIN_CADENCE_MS as i64, MAX_CADENCE_MS as i64);
        self.session.set_cadence(target as u64);
        tracing::debug!(cadence_ms = self.session.cadence_ms(), "cadence adjusted");
    }

    /// New game with the configured layout and a fresh clock.
    pub fn restart(&mut self) {
        self.session.reset();
        self.clock.reset();
        self.watcher.reset();
        self.last_frame_ms = None;
        self.displayed_score = 0;
        self.starfield.set_speed(self.star_speed);
        tracing::info!("arcade restarted");
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn stars_enabled(&self) -> bool {
        self.stars_enabled
    }

    /// Score as shown on the readout.
    pub fn displayed_score(&self) -> u32 {
        self.displayed_score
    }
}
