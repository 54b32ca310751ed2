//! Session recording in JSON Lines format.
use crate::color::Color;
use crate::game::{Difficulty, Outcome};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordEvent {
    Reset {
        difficulty: Difficulty,
        palette: Vec<Color>,
        target: Color,
    },
    Guess {
        surface: usize,
        color: Color,
        outcome: Outcome,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    pub time: DateTime<Local>,
    pub event: RecordEvent,
}

#[derive(Debug)]
pub struct Recorder<W = BufWriter<File>> {
    writer: W,
}

impl Recorder<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to open {:?}: {e}", path.as_ref()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Recorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn record(&mut self, event: RecordEvent) -> anyhow::Result<()> {
        let entry = RecordEntry {
            time: Local::now(),
            event,
        };
        serde_json::to_writer(&mut self.writer, &entry)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_object_per_line() {
        let mut recorder = Recorder::new(Vec::new());
        let palette = vec![Color::new(1, 2, 3), Color::new(4, 5, 6), Color::new(7, 8, 9)];
        recorder
            .record(RecordEvent::Reset {
                difficulty: Difficulty::Easy,
                palette: palette.clone(),
                target: palette[1],
            })
            .unwrap();
        recorder
            .record(RecordEvent::Guess {
                surface: 0,
                color: palette[0],
                outcome: Outcome::Miss,
            })
            .unwrap();

        let text = String::from_utf8(recorder.into_inner()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"]["type"], "reset");
        assert_eq!(first["event"]["difficulty"], "easy");
        assert_eq!(first["event"]["target"]["g"], 5);

        let second: RecordEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(
            second.event,
            RecordEvent::Guess {
                surface: 0,
                color: palette[0],
                outcome: Outcome::Miss,
            }
        );
    }
}
