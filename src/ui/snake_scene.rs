//! Board rendering.
//!
//! Uses half-block pixel rendering. Each level cell maps to a colored pixel;
//! pairs of vertical pixels are packed into one terminal row using the `▀`
//! (upper half block) character with fg=top, bg=bottom colors.

use super::game_common::{
    arcade_layout, centered, draw_cabinet, draw_panel, format_score, render_game_over,
    render_hints,
};
use super::starfield_scene::render_starfield;
use crate::arcade::Arcade;
use crate::session::GameSession;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

/// Head, body, tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakePalette {
    pub head: Color,
    pub body: Color,
    pub tail: Color,
}

pub const ALIVE: SnakePalette = SnakePalette {
    head: Color::Rgb(18, 255, 22),
    body: Color::Rgb(18, 204, 22),
    tail: Color::Rgb(18, 150, 22),
};

pub const DEAD: SnakePalette = SnakePalette {
    head: Color::Rgb(255, 18, 22),
    body: Color::Rgb(204, 18, 22),
    tail: Color::Rgb(150, 18, 22),
};

const FOOD_COLOR: Color = Color::Rgb(255, 18, 18);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const BORDER_COLOR: Color = Color::Rgb(85, 85, 18);
const PANEL_WIDTH: u16 = 22;

/// Render the whole arcade: stars, board, status bar and score panel.
pub fn render_arcade(frame: &mut Frame, area: Rect, arcade: &Arcade) {
    let session = arcade.session();
    let inner = draw_cabinet(frame, area, "Snake", Color::LightGreen);
    let layout = arcade_layout(inner, PANEL_WIDTH);

    if arcade.stars_enabled() {
        render_starfield(frame, layout.board, arcade.starfield());
    }
    render_play_field(frame, layout.board, session);

    if session.is_game_over() {
        render_game_over(
            frame,
            layout.board,
            "GAME OVER",
            &format!("Score {}", format_score(arcade.displayed_score())),
        );
    }

    render_hint_line(frame, layout.hints, session);
    render_score_panel(frame, layout.panel, arcade);
}

/// Color per level cell; `None` is empty floor.
///
/// Painted food, body, tail, head, so the head wins on shared cells.
pub fn board_pixels(session: &GameSession) -> Vec<Vec<Option<Color>>> {
    let grid_w = session.width() as usize;
    let grid_h = session.height() as usize;
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid_w]; grid_h];
    let palette = if session.is_game_over() { DEAD } else { ALIVE };

    let mut paint = |x: i32, y: i32, color: Color| {
        if x >= 0 && y >= 0 && (x as usize) < grid_w && (y as usize) < grid_h {
            pixels[y as usize][x as usize] = Some(color);
        }
    };

    let food = session.food();
    paint(food.x, food.y, FOOD_COLOR);

    let engine = session.engine();
    for seg in engine.segments() {
        paint(seg.x, seg.y, palette.body);
    }
    let tail = engine.tail();
    paint(tail.x, tail.y, palette.tail);
    let head = engine.head();
    paint(head.x, head.y, palette.head);

    pixels
}

/// Pack two level rows into one terminal row of `▀` cells.
///
/// `bottom` is `None` for the unpaired last row of an odd-height level.
/// Neighbouring cells with the same colors share one span.
fn half_block_row(
    top: &[Option<Color>],
    bottom: Option<&[Option<Color>]>,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run: Option<(Color, Color, String)> = None;

    for (x, cell) in top.iter().enumerate() {
        let fg = cell.unwrap_or(EMPTY_BG);
        let bg = match bottom {
            Some(row) => row.get(x).copied().flatten().unwrap_or(EMPTY_BG),
            None => Color::Reset,
        };
        match &mut run {
            Some((run_fg, run_bg, text)) if *run_fg == fg && *run_bg == bg => {
                text.push(HALF_TOP);
            }
            _ => {
                if let Some((run_fg, run_bg, text)) = run.take() {
                    spans.push(Span::styled(text, Style::default().fg(run_fg).bg(run_bg)));
                }
                run = Some((fg, bg, HALF_TOP.to_string()));
            }
        }
    }
    if let Some((fg, bg, text)) = run {
        spans.push(Span::styled(text, Style::default().fg(fg).bg(bg)));
    }
    spans
}

/// Draw the board centered in `area`, cropped when the terminal is small.
fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.height < 3 || area.width < 3 {
        return;
    }

    let pixels = board_pixels(session);
    let term_rows = (pixels.len() as u16).div_ceil(2);
    let cols = session.width() as u16;

    let framed = centered(area, cols.saturating_add(2), term_rows.saturating_add(2));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_COLOR));
    let inner = block.inner(framed);
    frame.render_widget(Clear, framed);
    frame.render_widget(block, framed);

    let lines: Vec<Line> = pixels
        .chunks(2)
        .take(inner.height as usize)
        .map(|pair| {
            let top = &pair[0][..(inner.width as usize).min(pair[0].len())];
            let bottom = pair.get(1).map(|row| &row[..top.len()]);
            Line::from(half_block_row(top, bottom))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_hint_line(frame: &mut Frame, area: Rect, session: &GameSession) {
    if session.is_game_over() {
        let keys = [("R", "restart"), ("Q", "quit")];
        render_hints(frame, area, ("Game Over", Color::Red), &keys);
    } else {
        let keys = [
            ("\u{2190}\u{2191}\u{2192}\u{2193}", "move"),
            ("+/-", "speed"),
            ("R", "restart"),
            ("Q", "quit"),
        ];
        render_hints(frame, area, ("Slither!", Color::Green), &keys);
    }
}

fn render_score_panel(frame: &mut Frame, area: Rect, arcade: &Arcade) {
    if area.width == 0 {
        return;
    }
    let inner = draw_panel(frame, area, "Score");
    let session = arcade.session();
    let engine = session.engine();

    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
    let value = |s: String| Span::styled(s, Style::default().fg(Color::White));

    let lines: Vec<Line> = vec![
        Line::from(vec![
            label("Score: "),
            Span::styled(
                format_score(arcade.displayed_score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Eaten: "), value(session.score().to_string())]),
        Line::from(vec![label("Length: "), value(engine.len().to_string())]),
        Line::from(""),
        Line::from(vec![
            label("Grid: "),
            value(format!("{}x{}", session.width(), session.height())),
        ]),
        Line::from(vec![
            label("Speed: "),
            value(format!("{}ms", session.cadence_ms())),
        ]),
        Line::from(vec![label("Rule: "), value(engine.policy().name().to_string())]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(ALIVE.head)),
            label("Head"),
        ]),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(ALIVE.body)),
            label("Body"),
        ]),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(FOOD_COLOR)),
            label("Food"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
