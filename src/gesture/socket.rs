use std::fs;
use std::io::{self, BufRead, BufReader};
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::LandmarkError;
use crate::gesture::{GestureSource, HandLandmarks, Landmark, LandmarkFrame};

/// One JSON line from the detector: every hand it found this frame.
#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(rename = "multiHandLandmarks", alias = "hands", default)]
    hands: Vec<Vec<Landmark>>,
}

/// Landmark frames from a detector process writing JSON lines to a Unix
/// socket. Parsing happens on a listener thread; frames reach the game loop
/// through a channel.
pub struct SocketSource {
    rx: mpsc::Receiver<LandmarkFrame>,
    path: PathBuf,
}

impl SocketSource {
    /// Binds `path`, replacing a stale socket left by an earlier run.
    /// Anything else already at `path` is left alone and reported.
    pub fn bind(path: &Path) -> io::Result<Self> {
        remove_stale_socket(path)?;
        let listener = UnixListener::bind(path)?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => handle_stream(stream, &tx),
                    Err(err) => warn!("landmark socket accept failed: {err}"),
                }
            }
        });
        info!("listening for landmarks on {}", path.display());
        Ok(Self {
            rx,
            path: path.to_path_buf(),
        })
    }
}

impl GestureSource for SocketSource {
    fn poll(&mut self) -> Vec<LandmarkFrame> {
        self.rx.try_iter().collect()
    }
}

impl Drop for SocketSource {
    fn drop(&mut self) {
        let _ = remove_stale_socket(&self.path);
    }
}

fn remove_stale_socket(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_socket() => fs::remove_file(path),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a socket", path.display()),
        )),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

fn handle_stream(stream: UnixStream, tx: &mpsc::Sender<LandmarkFrame>) {
    debug!("landmark detector connected");
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_frame(&line) {
            Ok(hand) => {
                let frame = LandmarkFrame {
                    at: Instant::now(),
                    hand,
                };
                if tx.send(frame).is_err() {
                    return;
                }
            }
            Err(err) => warn!("skipping landmark line: {err}"),
        }
    }
    debug!("landmark detector disconnected");
}

/// First hand of a frame, or `None` if no hand was detected.
pub fn parse_frame(line: &str) -> Result<Option<HandLandmarks>, LandmarkError> {
    let frame: WireFrame = serde_json::from_str(line.trim())?;
    frame
        .hands
        .into_iter()
        .next()
        .map(HandLandmarks::new)
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::gesture::{INDEX_TIP, LANDMARK_COUNT, WRIST};

    fn hand_json(wrist_x: f32) -> String {
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| {
                let x = if i == WRIST { wrist_x } else { 0.5 };
                format!(r#"{{"x":{x},"y":0.{i:02},"z":0.0}}"#)
            })
            .collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn first_hand_is_used() {
        let line = format!(r#"{{"multiHandLandmarks":[{},{}]}}"#, hand_json(0.25), hand_json(0.75));
        let hand = parse_frame(&line).unwrap().unwrap();
        assert_eq!(hand.wrist_x(), 0.25);
        assert_eq!(hand.point(INDEX_TIP).unwrap().y, 0.08);
    }

    #[test]
    fn empty_or_missing_hands_mean_no_hand() {
        assert!(parse_frame(r#"{"multiHandLandmarks":[]}"#).unwrap().is_none());
        assert!(parse_frame("{}").unwrap().is_none());
    }

    #[test]
    fn hands_alias_and_missing_z_are_accepted() {
        let points: Vec<String> = (0..LANDMARK_COUNT).map(|_| r#"{"x":0.1,"y":0.2}"#.to_string()).collect();
        let line = format!(r#"{{"hands":[[{}]]}}"#, points.join(","));
        let hand = parse_frame(&line).unwrap().unwrap();
        assert_eq!(hand.point(3).unwrap().z, 0.0);
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(matches!(parse_frame("not json"), Err(LandmarkError::Json(_))));
        assert!(matches!(
            parse_frame(r#"{"multiHandLandmarks":[[{"x":0.1,"y":0.1}]]}"#),
            Err(LandmarkError::TooFewLandmarks { found: 1, .. })
        ));
    }

    #[test]
    fn frames_arrive_over_the_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landmarks.sock");
        let mut source = SocketSource::bind(&path).unwrap();

        let mut client = UnixStream::connect(&path).unwrap();
        writeln!(client, r#"{{"multiHandLandmarks":[{}]}}"#, hand_json(0.4)).unwrap();
        writeln!(client, "garbage").unwrap();
        writeln!(client, r#"{{"multiHandLandmarks":[]}}"#).unwrap();
        drop(client);

        let mut frames = Vec::new();
        for _ in 0..200 {
            frames.extend(source.poll());
            if frames.len() >= 2 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].hand.as_ref().map(|h| h.wrist_x()), Some(0.4));
        assert!(frames[1].hand.is_none());

        drop(source);
        assert!(!path.exists());
    }

    #[test]
    fn bind_refuses_to_replace_a_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "important").unwrap();

        let err = SocketSource::bind(&path).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "important");
    }

    #[test]
    fn stale_socket_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.sock");
        drop(UnixListener::bind(&path).unwrap());
        assert!(path.exists());

        let source = SocketSource::bind(&path).unwrap();
        assert!(UnixStream::connect(&path).is_ok());
        drop(source);
        assert!(!path.exists());
    }
}
