//! Starfield backdrop: projects stars from the virtual canvas onto terminal cells.

use crate::starfield::Starfield;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Glyph and color for a star of the given brightness.
fn star_glyph(brightness: f64) -> (char, Color) {
    let level = (brightness * 255.0).round().clamp(40.0, 255.0) as u8;
    let glyph = if brightness > 0.75 {
        '*'
    } else if brightness > 0.4 {
        '+'
    } else {
        '.'
    };
    (glyph, Color::Rgb(level, level, level))
}

/// Rasterize the field into `width x height` cells. Brighter stars win ties.
pub fn rasterize(field: &Starfield, width: u16, height: u16) -> Vec<Vec<Option<(char, f64)>>> {
    let (w, h) = (width as usize, height as usize);
    let mut cells: Vec<Vec<Option<(char, f64)>>> = vec![vec![None; w]; h];
    if w == 0 || h == 0 {
        return cells;
    }

    let (canvas_w, canvas_h) = field.canvas_size();
    for star in field.project() {
        if star.x < 0.0 || star.y < 0.0 || star.x >= canvas_w || star.y >= canvas_h {
            continue;
        }
        let col = ((star.x / canvas_w) * w as f64) as usize;
        let row = ((star.y / canvas_h) * h as f64) as usize;
        if col >= w || row >= h {
            continue;
        }
        let (glyph, _) = star_glyph(star.brightness);
        match cells[row][col] {
            Some((_, b)) if b >= star.brightness => {}
            _ => cells[row][col] = Some((glyph, star.brightness)),
        }
    }
    cells
}

/// Paint the field over `area`. Draw this before anything meant to sit on top.
pub fn render_starfield(frame: &mut Frame, area: Rect, field: &Starfield) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let cells = rasterize(field, area.width, area.height);
    let lines: Vec<Line> = cells
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| match cell {
                        Some((_, brightness)) => {
                            let (glyph, color) = star_glyph(brightness);
                            Span::styled(glyph.to_string(), Style::default().fg(color))
                        }
                        None => Span::raw(" "),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
