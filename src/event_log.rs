//! JSON-lines event log.
//!
//! One object per game event, appended to a file:
//!
//! ```text
//! {"ts_ms":5120,"event":"locked","kind":"T","lines_cleared":1,"points":100,"score":100}
//! ```
//!
//! Write failures never interrupt play. The first one is kept and reported
//! by [`EventLog::finish`].

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Started,
    Spawned {
        kind: &'static str,
    },
    Held {
        kind: &'static str,
        swapped_in: Option<&'static str>,
    },
    Locked {
        kind: &'static str,
        lines_cleared: u32,
        points: u32,
        score: u32,
    },
    LevelUp {
        level: u32,
        frames_for_gravity: u32,
    },
    GameOver {
        score: u32,
        level: u32,
        lines: u32,
    },
}

impl From<&GameEvent> for EventRecord {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::Started => EventRecord::Started,
            GameEvent::Spawned { kind } => EventRecord::Spawned {
                kind: kind.as_str(),
            },
            GameEvent::Held { kind, swapped_in } => EventRecord::Held {
                kind: kind.as_str(),
                swapped_in: swapped_in.map(|k| k.as_str()),
            },
            GameEvent::Locked {
                kind,
                lines_cleared,
                points,
                score,
            } => EventRecord::Locked {
                kind: kind.as_str(),
                lines_cleared,
                points,
                score,
            },
            GameEvent::LevelUp {
                level,
                frames_for_gravity,
            } => EventRecord::LevelUp {
                level,
                frames_for_gravity,
            },
            GameEvent::GameOver {
                score,
                level,
                lines,
            } => EventRecord::GameOver {
                score,
                level,
                lines,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine {
    ts_ms: u64,
    #[serde(flatten)]
    record: EventRecord,
}

/// Buffered JSON-lines sink; a disabled log drops everything.
pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl EventLog {
    /// Open `path` for appending, or build a disabled log when there is none.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("event log: cannot open {}", path.display()))?;
        Ok(Self::with_writer(Some(BufWriter::new(file))))
    }

    pub fn disabled() -> Self {
        Self::with_writer(None)
    }
}

impl<W: Write> EventLog<W> {
    pub fn with_writer(out: Option<W>) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    pub fn record(&mut self, ts_ms: u64, event: &GameEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        if self.error.is_some() {
            return;
        }

        let line = LogLine {
            ts_ms,
            record: EventRecord::from(event),
        };
        self.buf.clear();
        if let Err(err) = serde_json::to_writer(&mut self.buf, &line) {
            self.error = Some(err.into());
            return;
        }
        self.buf.push(b'\n');
        if let Err(err) = out.write_all(&self.buf) {
            self.error = Some(err);
        }
    }

    /// Flush and hand back the writer, or the first error seen.
    pub fn finish(mut self) -> Result<Option<W>> {
        if let Some(err) = self.error.take() {
            return Err(err).context("event log: write failed");
        }
        if let Some(out) = self.out.as_mut() {
            out.flush().context("event log: flush failed")?;
        }
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockType;
    use serde_json::Value;

    fn lines(bytes: &[u8]) -> Vec<Value> {
        std::str::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn one_object_per_event() {
        let mut log = EventLog::with_writer(Some(Vec::new()));
        log.record(0, &GameEvent::Started);
        log.record(
            5_120,
            &GameEvent::Locked {
                kind: BlockType::T,
                lines_cleared: 1,
                points: 100,
                score: 100,
            },
        );
        let out = log.finish().unwrap().unwrap();

        let values = lines(&out);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["event"], "started");
        assert_eq!(values[0]["ts_ms"], 0);
        assert_eq!(values[1]["event"], "locked");
        assert_eq!(values[1]["kind"], "T");
        assert_eq!(values[1]["lines_cleared"], 1);
        assert_eq!(values[1]["score"], 100);
        assert_eq!(values[1]["ts_ms"], 5_120);
    }

    #[test]
    fn empty_hold_is_null() {
        let mut log = EventLog::with_writer(Some(Vec::new()));
        log.record(
            1,
            &GameEvent::Held {
                kind: BlockType::I,
                swapped_in: None,
            },
        );
        let values = lines(&log.finish().unwrap().unwrap());
        assert_eq!(values[0]["event"], "held");
        assert!(values[0]["swapped_in"].is_null());
    }

    #[test]
    fn multi_word_events_are_snake_case() {
        let mut log = EventLog::with_writer(Some(Vec::new()));
        log.record(
            1,
            &GameEvent::LevelUp {
                level: 2,
                frames_for_gravity: 27,
            },
        );
        log.record(
            2,
            &GameEvent::GameOver {
                score: 300,
                level: 2,
                lines: 5,
            },
        );
        let values = lines(&log.finish().unwrap().unwrap());
        assert_eq!(values[0]["event"], "level_up");
        assert_eq!(values[0]["frames_for_gravity"], 27);
        assert_eq!(values[1]["event"], "game_over");
    }

    #[test]
    fn missing_path_gives_a_disabled_log() {
        let mut log = EventLog::open(None).unwrap();
        log.record(0, &GameEvent::Started);
        assert!(log.finish().unwrap().is_none());
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_surface_on_finish() {
        let mut log = EventLog::with_writer(Some(Broken));
        log.record(0, &GameEvent::Started);
        log.record(1, &GameEvent::Started);
        let err = log.finish().err().unwrap();
        assert!(err.to_string().contains("event log"), "{err}");
    }
}
