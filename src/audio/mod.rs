//! Sound cues and background music.
//!
//! Clips are read from a sounds directory up front. A clip that is missing
//! or fails to decode is skipped whenever its cue fires.

#[cfg(feature = "audio")]
pub mod player;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::Settings;
use crate::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Rotate,
    LineClear,
    HardDrop,
    Music,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Rotate, Cue::LineClear, Cue::HardDrop, Cue::Music];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Rotate => "rotate.wav",
            Cue::LineClear => "clear.mp3",
            Cue::HardDrop => "harddrop.wav",
            Cue::Music => "tetris_theme.mp3",
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Used when sound is disabled or no output device is available.
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: Cue) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Encoded clip bytes keyed by cue.
#[derive(Default)]
pub struct SoundBank {
    clips: HashMap<Cue, Arc<[u8]>>,
}

impl SoundBank {
    pub fn load(dir: &Path) -> Self {
        let mut clips = HashMap::new();
        for cue in Cue::ALL {
            let path = dir.join(cue.file_name());
            match fs::read(&path) {
                Ok(bytes) => {
                    clips.insert(cue, Arc::from(bytes));
                }
                Err(err) => debug!("no clip for {cue:?} at {}: {err}", path.display()),
            }
        }
        info!("loaded {} of {} sound clips from {}", clips.len(), Cue::ALL.len(), dir.display());
        Self { clips }
    }

    pub fn get(&self, cue: Cue) -> Option<Arc<[u8]>> {
        self.clips.get(&cue).cloned()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Picks the sink for this run. Falls back to [`Silent`] when audio is off
/// or the device cannot be opened.
pub fn open(settings: &Settings) -> Box<dyn AudioSink> {
    if !settings.audio {
        info!("audio disabled");
        return Box::new(Silent);
    }
    let bank = SoundBank::load(&settings.sounds_dir);
    open_device(bank)
}

#[cfg(feature = "audio")]
fn open_device(bank: SoundBank) -> Box<dyn AudioSink> {
    match player::RodioPlayer::new(bank) {
        Ok(player) => Box::new(player),
        Err(err) => {
            warn!("audio output unavailable, continuing silently: {err}");
            Box::new(Silent)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_device(bank: SoundBank) -> Box<dyn AudioSink> {
    if !bank.is_empty() {
        warn!("built without the `audio` feature; sound clips will not play");
    }
    Box::new(Silent)
}

/// Maps a game event onto the sink.
pub fn react(sink: &mut dyn AudioSink, event: GameEvent) {
    match event {
        GameEvent::Rotated => sink.play(Cue::Rotate),
        GameEvent::LinesCleared(_) => sink.play(Cue::LineClear),
        GameEvent::HardDropped => sink.play(Cue::HardDrop),
        GameEvent::GameOver => sink.stop_music(),
        GameEvent::Locked { .. } | GameEvent::ScoreChanged(_) => {}
    }
}
