//! Snake Arcade - wrap-around snake for the terminal.
//!
//! The library holds the engine, session and arcade wiring so they can be
//! driven and tested without a terminal.

pub mod arcade;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod logging;
pub mod session;
pub mod snake;
pub mod starfield;
pub mod ui;

pub use arcade::{Arcade, ArcadeEvent, ChangeWatcher, FrameClock};
pub use config::{GameConfig, StarfieldConfig};
pub use error::{ArcadeError, Result};
pub use session::{GameSession, TickResult};
pub use snake::{CollisionPolicy, Direction, Position, SnakeEngine};
pub use starfield::Starfield;
