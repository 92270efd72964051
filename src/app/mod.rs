use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::audio::{self, AudioSink};
use crate::config::Settings;
use crate::game::Spawner;
use crate::gesture::{GestureController, GestureSource, SocketSource};
use crate::ui::draw_game;
use crate::{Game, FRAME_MS};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(settings: Settings) -> Result<()> {
    let mut audio = audio::open(&settings);
    let mut gestures = match SocketSource::bind(&settings.socket_path) {
        Ok(source) => Some(source),
        Err(err) => {
            warn!(
                "cannot listen on {}: {err}; keyboard only",
                settings.socket_path.display()
            );
            None
        }
    };
    let spawner = match settings.seed {
        Some(seed) => Spawner::seeded(seed),
        None => Spawner::from_entropy(),
    };
    let mut session = Session {
        game: Game::new(settings.drop_interval, spawner),
        controller: GestureController::new(settings.gesture),
        clock: Instant::now(),
    };

    let mut tui = TuiGuard::new()?;
    let result = run_loop(tui.terminal_mut(), &mut session, gestures.as_mut(), audio.as_mut());
    audio.stop_music();
    info!("exiting with score {}", session.game.score);
    result
}

/// Everything the frame loop owns.
pub struct Session {
    pub game: Game,
    pub controller: GestureController,
    pub clock: Instant,
}

impl Session {
    pub fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn start(&mut self, audio: &mut dyn AudioSink) {
        let now = self.now();
        self.game.start(now);
        audio.start_music();
    }

    /// Feeds pending gesture frames, advances gravity and forwards game
    /// events to the audio sink.
    pub fn frame<S: GestureSource + ?Sized>(&mut self, gestures: Option<&mut S>, audio: &mut dyn AudioSink) {
        if let Some(source) = gestures {
            for landmarks in source.poll() {
                let at = landmarks.at.saturating_duration_since(self.clock);
                for cmd in self.controller.update(landmarks.hand.as_ref(), at) {
                    debug!("gesture {cmd:?}");
                    cmd.apply(&mut self.game);
                }
            }
        }
        let now = self.now();
        self.game.tick(now);
        for event in self.game.drain_events() {
            audio::react(audio, event);
        }
    }
}

fn run_loop<S: GestureSource + ?Sized>(
    terminal: &mut Term,
    session: &mut Session,
    mut gestures: Option<&mut S>,
    audio: &mut dyn AudioSink,
) -> Result<()> {
    session.start(audio);

    loop {
        session.frame(gestures.as_deref_mut(), audio);

        terminal.draw(|frame| draw_game(frame, &session.game))?;

        if event::poll(Duration::from_millis(FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => {
                        info!("restart requested");
                        session.start(audio);
                    }
                    code => handle_input(code, &mut session.game),
                }
            }
        }
    }
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn handle_input(code: KeyCode, game: &mut Game) {
    match code {
        KeyCode::Left => {
            let _ = game.move_left();
        }
        KeyCode::Right => {
            let _ = game.move_right();
        }
        KeyCode::Down => {
            let _ = game.move_down();
        }
        KeyCode::Up => {
            let _ = game.rotate();
        }
        KeyCode::Char(' ') => {
            game.hard_drop();
        }
        _ => {}
    }
}
