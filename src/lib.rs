pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod gesture;
pub mod logging;
pub mod ui;

pub use config::{
    BOARD_H, BOARD_W, CELL_W, DROP_INTERVAL_MS, FRAME_MS, MIN_PANE_WIDTH, PLAY_H, PLAY_W,
    POINTS_PER_LINE, SOCKET_PATH,
};
pub use game::{Game, GameEvent, GameStatus};
