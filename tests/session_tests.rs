//! Whole-session scenarios driven through the public API.

use std::time::Duration;

use gesture_tetris::game::{Cell, Color, Piece, Spawner, Tetromino};
use gesture_tetris::{Game, GameEvent, GameStatus, BOARD_H, BOARD_W};

const INTERVAL: Duration = Duration::from_millis(1000);

fn session(seed: u64) -> Game {
    let mut game = Game::new(INTERVAL, Spawner::seeded(seed));
    game.start(Duration::ZERO);
    game
}

#[test]
fn o_piece_falls_into_the_bottom_rows() {
    let mut game = session(11);
    game.current = Some(Piece::spawn(Tetromino::O, BOARD_W));
    let piece = game.current.as_ref().unwrap();
    assert_eq!((piece.x, piece.y), (4, -2));

    for k in 1..=22u64 {
        assert!(game.tick(Duration::from_millis(1001 * k)));
    }
    assert_eq!(game.board.get(4, 18), Cell::Occupied(Color::Yellow));
    assert_eq!(game.board.get(5, 19), Cell::Occupied(Color::Yellow));
    assert_eq!(game.board.cells.iter().filter(|c| c.is_occupied()).count(), 4);
    assert_eq!(game.score, 0);
}

#[test]
fn hard_dropping_forever_tops_out() {
    let mut game = session(5);
    let mut drops = 0;
    while game.status == GameStatus::Running {
        game.hard_drop();
        drops += 1;
        assert!(drops < 1000, "session never ended");
    }
    assert!(game.drain_events().contains(&GameEvent::GameOver));
    assert_eq!(game.score % 100, 0);
    assert_eq!(game.score, 100 * game.lines_cleared);
}

#[test]
fn same_seed_replays_the_same_game() {
    let mut a = session(77);
    let mut b = session(77);
    for _ in 0..30 {
        a.move_left();
        b.move_left();
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.board, b.board);
    assert_eq!(a.score, b.score);
    assert_eq!(a.status, b.status);
}

#[test]
fn filling_a_row_with_pieces_clears_it() {
    let mut game = session(3);
    // Leave a two-wide hole at columns 4 and 5 on the floor, two rows tall.
    for y in [BOARD_H - 2, BOARD_H - 1] {
        for x in (0..BOARD_W).filter(|x| *x != 4 && *x != 5) {
            game.board.set(x, y, Cell::Occupied(Color::Green));
        }
    }
    game.current = Some(Piece::spawn(Tetromino::O, BOARD_W));
    game.drain_events();
    game.hard_drop();

    assert_eq!(game.score, 200);
    assert!(game.board.cells.iter().all(|c| !c.is_occupied()));
    let events = game.drain_events();
    assert_eq!(
        events,
        vec![
            GameEvent::Locked { lines: 2 },
            GameEvent::LinesCleared(2),
            GameEvent::ScoreChanged(200),
            GameEvent::HardDropped,
        ]
    );
}
