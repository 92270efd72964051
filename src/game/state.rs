use std::time::Duration;

use log::{debug, info};

use crate::game::{Board, Piece, Shape, Spawner};
use crate::{BOARD_H, BOARD_W, POINTS_PER_LINE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Things the host may want to react to (sound, logging).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Rotated,
    HardDropped,
    Locked { lines: u32 },
    LinesCleared(u32),
    ScoreChanged(u64),
    GameOver,
}

pub struct Game {
    pub board: Board,
    pub current: Option<Piece>,
    pub status: GameStatus,
    pub score: u64,
    pub lines_cleared: u64,
    pub drop_interval: Duration,
    last_drop: Duration,
    spawner: Spawner,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(drop_interval: Duration, spawner: Spawner) -> Self {
        Self {
            board: Board::new(BOARD_W, BOARD_H),
            current: None,
            status: GameStatus::Running,
            score: 0,
            lines_cleared: 0,
            drop_interval,
            last_drop: Duration::ZERO,
            spawner,
            events: Vec::new(),
        }
    }

    /// Fresh session; `now` is the loop clock the drop timer counts from.
    pub fn start(&mut self, now: Duration) {
        self.board.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.status = GameStatus::Running;
        self.last_drop = now;
        self.events.clear();
        self.current = Some(self.spawner.spawn(self.board.width));
        info!("session started");
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn is_valid_position(&self, piece: &Piece, dx: i32, dy: i32, shape: Option<&Shape>) -> bool {
        let shape = shape.unwrap_or(&piece.shape);
        self.board.fits(shape, piece.x + dx, piece.y + dy)
    }

    /// Gravity step, at most once per drop interval.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.is_over() || self.current.is_none() {
            return false;
        }
        if now.saturating_sub(self.last_drop) <= self.drop_interval {
            return false;
        }
        self.last_drop = now;
        self.drop_step();
        true
    }

    /// One row down, or lock and bring in the next piece.
    pub fn drop_step(&mut self) {
        if self.is_over() {
            return;
        }
        if !self.move_down() {
            self.settle();
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.shift(0, 1)
    }

    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active() else {
            return false;
        };
        let rotated = piece.shape.rotated();
        if !self.is_valid_position(piece, 0, 0, Some(&rotated)) {
            return false;
        }
        if let Some(piece) = self.current.as_mut() {
            piece.shape = rotated;
        }
        self.events.push(GameEvent::Rotated);
        true
    }

    pub fn hard_drop(&mut self) {
        if self.active().is_none() {
            return;
        }
        while self.move_down() {}
        self.settle();
        self.events.push(GameEvent::HardDropped);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn active(&self) -> Option<&Piece> {
        if self.is_over() {
            return None;
        }
        self.current.as_ref()
    }

    fn shift(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active() else {
            return false;
        };
        if !self.is_valid_position(piece, dx, dy, None) {
            return false;
        }
        if let Some(piece) = self.current.as_mut() {
            piece.x += dx;
            piece.y += dy;
        }
        true
    }

    fn settle(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        let on_board = self.board.lock(&piece);
        let lines = self.board.clear_full_lines();
        self.events.push(GameEvent::Locked { lines });
        debug!("locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.add_score(lines);

        let next = self.spawner.spawn(self.board.width);
        // Spawns sit fully above the board, so in practice only lock-out fires.
        let blocked = !self.is_valid_position(&next, 0, 0, None);
        self.current = Some(next);
        if !on_board || blocked {
            self.status = GameStatus::GameOver;
            self.events.push(GameEvent::GameOver);
            info!("game over with score {}", self.score);
        }
    }

    fn add_score(&mut self, lines: u32) {
        if lines == 0 {
            return;
        }
        self.lines_cleared += u64::from(lines);
        self.score += POINTS_PER_LINE * u64::from(lines);
        self.events.push(GameEvent::LinesCleared(lines));
        self.events.push(GameEvent::ScoreChanged(self.score));
        info!("cleared {lines} line(s), score {}", self.score);
    }
}
