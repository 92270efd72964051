use std::io::Cursor;
use std::sync::Arc;

use log::warn;
use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::audio::{AudioSink, Cue, SoundBank};

/// rodio-backed sink. Effects are fire-and-forget; the music loops in its
/// own [`Sink`] so it can be stopped on game over.
pub struct RodioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    music: Option<Sink>,
}

impl RodioPlayer {
    pub fn new(bank: SoundBank) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            bank,
            music: None,
        })
    }

    fn decoder(&self, cue: Cue) -> Option<Decoder<Cursor<Arc<[u8]>>>> {
        let bytes = self.bank.get(cue)?;
        match Decoder::new(Cursor::new(bytes)) {
            Ok(decoder) => Some(decoder),
            Err(err) => {
                warn!("cannot decode {}: {err}", cue.file_name());
                None
            }
        }
    }
}

impl AudioSink for RodioPlayer {
    fn play(&mut self, cue: Cue) {
        let Some(source) = self.decoder(cue) else {
            return;
        };
        if let Err(err) = self.handle.play_raw(source.convert_samples()) {
            warn!("cannot play {}: {err}", cue.file_name());
        }
    }

    fn start_music(&mut self) {
        self.stop_music();
        let Some(source) = self.decoder(Cue::Music) else {
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source.repeat_infinite());
                self.music = Some(sink);
            }
            Err(err) => warn!("cannot start music: {err}"),
        }
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}
