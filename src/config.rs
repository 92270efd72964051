use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

// Shared game UI/constants.
pub const BOARD_W: usize = 10;
pub const BOARD_H: usize = 20;
pub const CELL_W: usize = 2; // render each block two characters wide
pub const PLAY_W: usize = BOARD_W * CELL_W + 2; // inner width plus side walls
pub const PLAY_H: usize = BOARD_H + 2; // inner height plus ceiling/floor
// Minimal pane width to fit the well + cabinet border.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + 2;
pub const POINTS_PER_LINE: u64 = 100;
pub const DROP_INTERVAL_MS: u64 = 1000;
pub const FRAME_MS: u64 = 16;
pub const SOCKET_PATH: &str = "/tmp/gesture-tetris.sock";
pub const SOUNDS_DIR: &str = "sounds";
pub const LOG_FILE_NAME: &str = "gesture-tetris.log";

// Gesture thresholds, in normalized image units.
pub const MOVE_THRESHOLD: f32 = 0.05;
pub const MOVE_COOLDOWN_MS: u64 = 150;
pub const PINCH_TRIGGER: f32 = 0.05;
pub const PINCH_RELEASE: f32 = 0.08;

#[derive(Debug, Parser)]
#[command(name = "gesture-tetris", version, about = "Falling blocks, steered by your hand")]
pub struct Cli {
    /// Milliseconds between gravity steps.
    #[arg(long, env = "GESTURE_TETRIS_DROP_MS", default_value_t = DROP_INTERVAL_MS)]
    pub drop_interval_ms: u64,

    /// Unix socket the landmark detector writes JSON frames to.
    #[arg(long, env = "GESTURE_TETRIS_SOCKET", default_value = SOCKET_PATH)]
    pub socket: PathBuf,

    /// Directory holding the sound clips.
    #[arg(long, env = "GESTURE_TETRIS_SOUNDS", default_value = SOUNDS_DIR)]
    pub sounds_dir: PathBuf,

    /// Log file (defaults to the system temp dir).
    #[arg(long, env = "GESTURE_TETRIS_LOG")]
    pub log_file: Option<PathBuf>,

    /// Seed for the piece generator.
    #[arg(long, env = "GESTURE_TETRIS_SEED")]
    pub seed: Option<u64>,

    #[arg(long)]
    pub no_audio: bool,

    /// Wrist displacement that counts as a sideways move.
    #[arg(long, default_value_t = MOVE_THRESHOLD)]
    pub move_threshold: f32,

    #[arg(long, default_value_t = MOVE_COOLDOWN_MS)]
    pub move_cooldown_ms: u64,

    /// Thumb-index distance that fires a hard drop.
    #[arg(long, default_value_t = PINCH_TRIGGER)]
    pub pinch_trigger: f32,

    /// Thumb-index distance that re-arms the hard drop.
    #[arg(long, default_value_t = PINCH_RELEASE)]
    pub pinch_release: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureTuning {
    pub move_threshold: f32,
    pub move_cooldown: Duration,
    pub pinch_trigger: f32,
    pub pinch_release: f32,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            move_threshold: MOVE_THRESHOLD,
            move_cooldown: Duration::from_millis(MOVE_COOLDOWN_MS),
            pinch_trigger: PINCH_TRIGGER,
            pinch_release: PINCH_RELEASE,
        }
    }
}

impl GestureTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("move threshold", self.move_threshold)?;
        positive("pinch trigger", self.pinch_trigger)?;
        positive("pinch release", self.pinch_release)?;
        if self.pinch_trigger >= self.pinch_release {
            return Err(ConfigError::PinchBand {
                trigger: self.pinch_trigger,
                release: self.pinch_release,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub drop_interval: Duration,
    pub socket_path: PathBuf,
    pub sounds_dir: PathBuf,
    pub log_file: PathBuf,
    pub seed: Option<u64>,
    pub audio: bool,
    pub gesture: GestureTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drop_interval: Duration::from_millis(DROP_INTERVAL_MS),
            socket_path: PathBuf::from(SOCKET_PATH),
            sounds_dir: PathBuf::from(SOUNDS_DIR),
            log_file: std::env::temp_dir().join(LOG_FILE_NAME),
            seed: None,
            audio: true,
            gesture: GestureTuning::default(),
        }
    }
}

impl TryFrom<Cli> for Settings {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        let gesture = GestureTuning {
            move_threshold: cli.move_threshold,
            move_cooldown: Duration::from_millis(cli.move_cooldown_ms),
            pinch_trigger: cli.pinch_trigger,
            pinch_release: cli.pinch_release,
        };
        gesture.validate()?;
        Ok(Self {
            drop_interval: Duration::from_millis(cli.drop_interval_ms),
            socket_path: cli.socket,
            sounds_dir: cli.sounds_dir,
            log_file: cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME)),
            seed: cli.seed,
            audio: !cli.no_audio,
            gesture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["gesture-tetris"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_match_constants() {
        let settings = Settings::try_from(parse(&[])).unwrap();
        assert_eq!(settings.drop_interval, Duration::from_millis(DROP_INTERVAL_MS));
        assert_eq!(settings.gesture, GestureTuning::default());
        assert!(settings.audio);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn flags_override_defaults() {
        let settings = Settings::try_from(parse(&[
            "--drop-interval-ms",
            "250",
            "--seed",
            "7",
            "--no-audio",
            "--move-cooldown-ms",
            "90",
        ]))
        .unwrap();
        assert_eq!(settings.drop_interval, Duration::from_millis(250));
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.audio);
        assert_eq!(settings.gesture.move_cooldown, Duration::from_millis(90));
    }

    #[test]
    fn zero_drop_interval_is_rejected() {
        let err = Settings::try_from(parse(&["--drop-interval-ms", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDropInterval));
    }

    #[test]
    fn inverted_pinch_band_is_rejected() {
        let err = Settings::try_from(parse(&["--pinch-trigger", "0.1", "--pinch-release", "0.05"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::PinchBand { .. }));
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let tuning = GestureTuning {
            move_threshold: 0.0,
            ..GestureTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidThreshold { name: "move threshold", .. })
        ));
    }
}
