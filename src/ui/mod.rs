pub mod render;

use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::{Game, MIN_PANE_WIDTH, PLAY_H, PLAY_W};

pub use render::playfield_lines;

pub fn draw_game(frame: &mut Frame, game: &Game) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH {
        let msg = Paragraph::new(format!("RESIZE PANE (min width: {})", MIN_PANE_WIDTH))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("TETRIS"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("GESTURE TETRIS")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let col_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_W as u16),
            Constraint::Min(0),
        ])
        .split(cabinet_inner)[1];

    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(PLAY_H as u16),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(col_rect);

    draw_info(frame, game, stack[1]);
    draw_playfield(frame, game, stack[2]);
    draw_controls(frame, stack[3]);
}

fn draw_playfield(frame: &mut Frame, game: &Game, play_rect: Rect) {
    let paragraph = Paragraph::new(playfield_lines(game)).alignment(Alignment::Left);
    frame.render_widget(paragraph, play_rect);

    if game.is_over() {
        let overlay_w = (PLAY_W as u16).saturating_sub(4).max(8);
        let overlay_h = 5u16;
        let popup = Rect {
            x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
            y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
            width: overlay_w.min(play_rect.width),
            height: overlay_h.min(play_rect.height),
        };
        let overlay = Paragraph::new("GAME OVER\nr restart\nq quit")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, popup);
        frame.render_widget(overlay, popup);
    }
}

fn draw_info(frame: &mut Frame, game: &Game, area: Rect) {
    let status = if game.is_over() { "OVER" } else { "RUNNING" };
    let info = Paragraph::new(vec![
        Line::raw(format!("{:<7} {}", "SCORE:", game.score)),
        Line::raw(format!("{:<7} {}", "LINES:", game.lines_cleared)),
        Line::raw(format!("{:<7} {}", "STATUS:", status)),
    ])
    .block(Block::default().title("INFO").borders(Borders::ALL));
    frame.render_widget(info, area);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(vec![
        Line::raw("swipe / ←→  move"),
        Line::raw("fist / ↑    rotate"),
        Line::raw("pinch / spc drop"),
        Line::raw("r restart  q quit"),
    ])
    .block(Block::default().title("CONTROLS").borders(Borders::ALL));
    frame.render_widget(controls, area);
}
