use ratatui::prelude::*;
use ratatui::text::{Line, Span};

use crate::game::{Cell, Color as PieceColor};
use crate::{Game, CELL_W, PLAY_H, PLAY_W};

const BLOCK: char = '█';

pub fn tint(color: PieceColor) -> Color {
    match color {
        PieceColor::Cyan => Color::Cyan,
        PieceColor::Yellow => Color::Yellow,
        PieceColor::Purple => Color::Magenta,
        PieceColor::Blue => Color::Blue,
        PieceColor::Orange => Color::Rgb(255, 165, 0),
        PieceColor::Green => Color::Green,
        PieceColor::Red => Color::Red,
    }
}

/// The well as styled text: walls, locked cells, then the falling piece.
/// Reads the session only.
pub fn playfield_lines(game: &Game) -> Vec<Line<'static>> {
    let wall = Style::default().fg(Color::DarkGray);
    let mut grid = vec![vec![(' ', Style::default()); PLAY_W]; PLAY_H];

    // Border: top/ceiling, sides, heavy floor.
    grid[0][0] = ('┌', wall);
    grid[0][PLAY_W - 1] = ('┐', wall);
    for x in 1..PLAY_W - 1 {
        grid[0][x] = ('─', wall);
        grid[PLAY_H - 1][x] = ('═', wall);
    }
    for row in grid.iter_mut().take(PLAY_H - 1).skip(1) {
        row[0] = ('│', wall);
        row[PLAY_W - 1] = ('│', wall);
    }
    grid[PLAY_H - 1][0] = ('└', wall);
    grid[PLAY_H - 1][PLAY_W - 1] = ('┘', wall);

    let plot = |grid: &mut [Vec<(char, Style)>], bx: usize, by: usize, color: PieceColor| {
        let gx = 1 + bx * CELL_W;
        let gy = 1 + by;
        if gy < PLAY_H - 1 && gx + CELL_W < PLAY_W {
            let style = Style::default().fg(tint(color));
            for cell in &mut grid[gy][gx..gx + CELL_W] {
                *cell = (BLOCK, style);
            }
        }
    };

    for y in 0..game.board.height {
        for x in 0..game.board.width {
            if let Cell::Occupied(color) = game.board.get(x, y) {
                plot(&mut grid, x, y, color);
            }
        }
    }

    if let Some(piece) = &game.current {
        for (x, y) in piece.cells() {
            if x >= 0 && y >= 0 {
                let (xu, yu) = (x as usize, y as usize);
                if xu < game.board.width && yu < game.board.height {
                    plot(&mut grid, xu, yu, piece.color);
                }
            }
        }
    }

    grid.into_iter().map(row_to_line).collect()
}

fn row_to_line(row: Vec<(char, Style)>) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (ch, style) in row {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}
