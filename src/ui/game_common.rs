//! Cabinet chrome shared by the arcade scenes: outer frame, layout split,
//! hint line, side panel and the game-over overlay.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Narrowest board column that still leaves room for a side panel.
const MIN_BOARD_WIDTH: u16 = 16;

/// Areas inside the cabinet frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcadeLayout {
    pub board: Rect,
    /// One line under the board. Empty when the cabinet is too short.
    pub hints: Rect,
    /// Right-hand column. Empty when the cabinet is too narrow.
    pub panel: Rect,
}

/// Split the cabinet interior into board, hint line and side panel.
///
/// The panel is dropped before the board is squeezed below
/// `MIN_BOARD_WIDTH`, and the hint line before the board loses its last row.
pub fn arcade_layout(inner: Rect, panel_width: u16) -> ArcadeLayout {
    let (main, panel) = if inner.width >= MIN_BOARD_WIDTH + panel_width {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(MIN_BOARD_WIDTH), Constraint::Length(panel_width)])
            .split(inner);
        (cols[0], cols[1])
    } else {
        (inner, Rect::default())
    };

    if main.height < 2 {
        return ArcadeLayout {
            board: main,
            hints: Rect::default(),
            panel,
        };
    }

    ArcadeLayout {
        board: Rect {
            height: main.height - 1,
            ..main
        },
        hints: Rect {
            y: main.y + main.height - 1,
            height: 1,
            ..main
        },
        panel,
    }
}

/// Clear `area`, draw the rounded cabinet frame and return its interior.
pub fn draw_cabinet(frame: &mut Frame, area: Rect, title: &str, accent: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// One-line hint bar: a colored state word followed by `key action` pairs.
pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    state: (&str, Color),
    keys: &[(&str, &str)],
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let (label, color) = state;
    let mut spans = vec![Span::styled(
        label.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    for (key, action) in keys {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Titled side panel frame; returns the interior. No-op on an empty area.
pub fn draw_panel(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Yellow),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// `width x height` rect centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Boxed game-over notice centered over the board, which stays visible
/// around it.
pub fn render_game_over(frame: &mut Frame, area: Rect, headline: &str, detail: &str) {
    let prompt = "R: again  Q: quit";
    let text_w = headline.len().max(detail.len()).max(prompt.len()) as u16;
    let overlay = centered(area, text_w + 4, 5);
    if overlay.height < 3 || overlay.width < 4 {
        return;
    }

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::from(Span::styled(
            headline.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail.to_string(), Style::default().fg(Color::White))),
        Line::from(Span::styled(prompt, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Group digits in threes ("12 345").
pub fn format_score(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
