//! Hand-landmark interpretation.
//!
//! A [`GestureSource`] yields landmark snapshots (normalized image
//! coordinates, y growing downward). [`GestureController`] turns them into
//! discrete [`GestureCommand`]s using fixed thresholds, a cooldown for
//! sideways moves, an edge trigger for rotation and a hysteresis band for the
//! pinch drop. The controller is pure; timing comes in as an argument.

pub mod socket;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::GestureTuning;
use crate::error::LandmarkError;
use crate::Game;

pub use socket::SocketSource;

pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Landmark>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Landmark>) -> Result<Self, LandmarkError> {
        if points.len() < LANDMARK_COUNT {
            return Err(LandmarkError::TooFewLandmarks {
                found: points.len(),
                expected: LANDMARK_COUNT,
            });
        }
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    pub fn wrist_x(&self) -> f32 {
        self.points[WRIST].x
    }

    /// Index and middle fingertips below their middle joints.
    pub fn is_closed(&self) -> bool {
        let index_down = self.points[INDEX_TIP].y > self.points[INDEX_PIP].y;
        let middle_down = self.points[MIDDLE_TIP].y > self.points[MIDDLE_PIP].y;
        index_down && middle_down
    }

    pub fn pinch_distance(&self) -> f32 {
        self.points[THUMB_TIP].distance_2d(&self.points[INDEX_TIP])
    }
}

/// One detector result. `hand` is `None` when nothing was in view.
#[derive(Clone, Debug)]
pub struct LandmarkFrame {
    pub at: Instant,
    pub hand: Option<HandLandmarks>,
}

pub trait GestureSource {
    /// Frames received since the last poll, oldest first.
    fn poll(&mut self) -> Vec<LandmarkFrame>;
}

impl GestureSource for VecDeque<LandmarkFrame> {
    fn poll(&mut self) -> Vec<LandmarkFrame> {
        self.drain(..).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureCommand {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
}

impl GestureCommand {
    pub fn apply(self, game: &mut Game) {
        match self {
            GestureCommand::MoveLeft => {
                let _ = game.move_left();
            }
            GestureCommand::MoveRight => {
                let _ = game.move_right();
            }
            GestureCommand::Rotate => {
                let _ = game.rotate();
            }
            GestureCommand::HardDrop => game.hard_drop(),
        }
    }
}

pub struct GestureController {
    tuning: GestureTuning,
    last_wrist_x: Option<f32>,
    last_move_at: Option<Duration>,
    hand_closed: bool,
    drop_latched: bool,
}

impl GestureController {
    pub fn new(tuning: GestureTuning) -> Self {
        Self {
            tuning,
            last_wrist_x: None,
            last_move_at: None,
            hand_closed: false,
            drop_latched: false,
        }
    }

    pub fn update(&mut self, hand: Option<&HandLandmarks>, now: Duration) -> Vec<GestureCommand> {
        let Some(hand) = hand else {
            self.last_wrist_x = None;
            self.drop_latched = false;
            return Vec::new();
        };

        let mut commands = Vec::new();
        if let Some(cmd) = self.horizontal(hand.wrist_x(), now) {
            commands.push(cmd);
        }

        let closed = hand.is_closed();
        if closed && !self.hand_closed {
            commands.push(GestureCommand::Rotate);
        }
        self.hand_closed = closed;

        let distance = hand.pinch_distance();
        if distance < self.tuning.pinch_trigger && !self.drop_latched {
            commands.push(GestureCommand::HardDrop);
            self.drop_latched = true;
        } else if distance >= self.tuning.pinch_release {
            self.drop_latched = false;
        }

        commands
    }

    fn horizontal(&mut self, x: f32, now: Duration) -> Option<GestureCommand> {
        let previous = self.last_wrist_x.replace(x)?;
        let cooled = self
            .last_move_at
            .is_none_or(|at| now.saturating_sub(at) > self.tuning.move_cooldown);
        if !cooled {
            return None;
        }
        let dx = x - previous;
        let cmd = if dx > self.tuning.move_threshold {
            GestureCommand::MoveRight
        } else if dx < -self.tuning.move_threshold {
            GestureCommand::MoveLeft
        } else {
            return None;
        };
        self.last_move_at = Some(now);
        Some(cmd)
    }
}
