//! Terminal rendering for the arcade.

pub mod game_common;
pub mod snake_scene;
pub mod starfield_scene;

use crate::arcade::Arcade;
use ratatui::Frame;

/// Draw one frame of the arcade over the whole terminal.
pub fn draw_ui(frame: &mut Frame, arcade: &Arcade) {
    let area = frame.size();
    snake_scene::render_arcade(frame, area, arcade);
}
