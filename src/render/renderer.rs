use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Cell, Game, GameStatus, Geometry, PixelRect};
use crate::metrics::GameMetrics;

const GREEN: Color = Color::Rgb(173, 204, 96);
const DARK_GREEN: Color = Color::Rgb(43, 51, 24);
const HEAD_GREEN: Color = Color::Rgb(20, 26, 8);
const FOOD_RED: Color = Color::Rgb(196, 48, 36);
const BANNER_GRAY: Color = Color::Rgb(80, 80, 80);

const TITLE: &str = "Cowboy Snake";

/// Title row above the board
const HEADER_ROWS: u16 = 1;
/// Score, status and stats rows below the board
const FOOTER_ROWS: u16 = 3;

impl From<PixelRect> for Rect {
    fn from(rect: PixelRect) -> Self {
        Rect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Screen areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub board: Rect,
    pub score: Rect,
    pub status: Rect,
    pub stats: Rect,
}

impl ScreenLayout {
    /// Center the board inside `area`, or `None` if it does not fit
    pub fn compute(area: Rect, geometry: &Geometry) -> Option<Self> {
        let PixelRect { width, height, .. } = geometry.frame();
        let total_height = height.checked_add(HEADER_ROWS + FOOTER_ROWS)?;
        if width > area.width || total_height > area.height {
            return None;
        }

        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - total_height) / 2;
        let board = Rect::new(x, y + HEADER_ROWS, width, height);

        Some(Self {
            title: Rect::new(x, y, width, 1),
            board,
            score: Rect::new(x, board.bottom(), width, 1),
            status: Rect::new(area.x, board.bottom() + 1, area.width, 1),
            stats: Rect::new(area.x, board.bottom() + 2, area.width, 1),
        })
    }
}

pub struct Renderer {
    geometry: Geometry,
}

impl Renderer {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    pub fn render(&self, frame: &mut Frame, game: &Game, metrics: &GameMetrics) {
        let area = frame.area();
        let Some(layout) = ScreenLayout::compute(area, &self.geometry) else {
            frame.render_widget(self.render_too_small(), area);
            return;
        };

        frame.render_widget(self.render_title(game), layout.title);
        frame.render_widget(self.render_board_frame(), layout.board);

        // Food first so the snake covers it, as on a real board
        self.draw_food(frame.buffer_mut(), layout.board, game.food());
        self.draw_snake(frame.buffer_mut(), layout.board, game);

        if let Some(banner) = game.banner() {
            let playfield = Rect::from(self.geometry.playfield());
            let row = Rect::new(
                layout.board.x + playfield.x,
                layout.board.y + playfield.y + playfield.height / 2,
                playfield.width,
                1,
            );
            let text = Paragraph::new(Line::from(Span::styled(
                banner.text.as_str(),
                Style::default()
                    .fg(BANNER_GRAY)
                    .bg(GREEN)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(text, row);
        }

        frame.render_widget(self.render_score(game), layout.score);
        frame.render_widget(self.render_status(game), layout.status);
        frame.render_widget(self.render_stats(metrics), layout.stats);
    }

    /// Board-relative cell rectangle moved into screen space
    fn screen_rect(&self, board: Rect, cell: Cell) -> Option<Rect> {
        self.geometry
            .cell_rect(cell)
            .map(|rect| Rect::from(rect.offset(board.x, board.y)))
    }

    fn draw_food(&self, buf: &mut Buffer, board: Rect, food: Cell) {
        if let Some(rect) = self.screen_rect(board, food) {
            let style = Style::default().fg(FOOD_RED).bg(GREEN);
            fill(buf, rect, &food_glyph(rect.width), style);
        }
    }

    fn draw_snake(&self, buf: &mut Buffer, board: Rect, game: &Game) {
        let snake = game.snake();
        let body_style = Style::default().fg(DARK_GREEN).bg(GREEN);
        let head_style = Style::default()
            .fg(HEAD_GREEN)
            .bg(GREEN)
            .add_modifier(Modifier::BOLD);

        for (index, cell) in snake.segments().enumerate() {
            let Some(rect) = self.screen_rect(board, cell) else {
                continue;
            };
            let style = if index == 0 { head_style } else { body_style };
            fill(buf, rect, &segment_glyph(rect.width), style);
        }
    }

    fn render_board_frame(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(DARK_GREEN))
            .style(Style::default().bg(GREEN))
    }

    fn render_title(&self, game: &Game) -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::styled(
                TITLE,
                Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
            ),
            Span::raw("       "),
            Span::styled(
                format!("Level : {}", game.level()),
                Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
            ),
        ]))
    }

    fn render_score(&self, game: &Game) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            format!("Score : {}", game.score()),
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        )))
    }

    fn render_status(&self, game: &Game) -> Paragraph<'static> {
        let line = match game.status() {
            GameStatus::Running => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            GameStatus::Stopped => Line::from(vec![
                Span::styled(
                    "GAME OVER",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" | press ", Style::default().fg(Color::Gray)),
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::styled(" to play again", Style::default().fg(Color::Gray)),
            ]),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_stats(&self, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        Paragraph::new(Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]))
        .alignment(Alignment::Center)
    }

    fn render_too_small(&self) -> Paragraph<'static> {
        let (width, height) = self.geometry.window_size();
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "need at least {}x{}",
                width,
                height + HEADER_ROWS + FOOTER_ROWS
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Rounded bar filling `width` columns
fn segment_glyph(width: u16) -> String {
    match width {
        0 => String::new(),
        1 => "●".to_string(),
        _ => format!("◖{}◗", "█".repeat(usize::from(width - 2))),
    }
}

fn food_glyph(width: u16) -> String {
    match width {
        0 => String::new(),
        1 => "■".to_string(),
        _ => format!("▐{}▌", "█".repeat(usize::from(width - 2))),
    }
}

fn fill(buf: &mut Buffer, rect: Rect, row_glyph: &str, style: Style) {
    for y in rect.top()..rect.bottom() {
        buf.set_string(rect.x, y, row_glyph, style);
    }
}
