// Frame source abstraction over the upstream hand tracker
// Recorded MediaPipe output (JSON lines) or in-memory frames

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::models::gesture::GestureResult;
use crate::models::hand::Frame;

/// Source of hand tracking frames
/// Implement this for any upstream tracker output
pub trait FrameSource: Send {
    /// Next frame, `Ok(None)` once the source is exhausted.
    ///
    /// An I/O error means the source itself failed and will not recover.
    /// Any other error concerns only the frame being read; the following
    /// call continues with the next one.
    fn next_frame(&mut self) -> GestureResult<Option<Frame>>;

    /// Human readable description of the source
    fn describe(&self) -> String;
}

// ==============================================================================
// JSON Lines (recorded tracker output)
// ==============================================================================

/// Reads one JSON-encoded [`Frame`] per line, skipping blank lines
pub struct JsonLinesSource<R: BufRead + Send> {
    reader: R,
    name: String,
    line_number: usize,
}

impl<R: BufRead + Send> JsonLinesSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line_number: 0,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> GestureResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl JsonLinesSource<BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()), "<stdin>")
    }
}

impl<R: BufRead + Send> FrameSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> GestureResult<Option<Frame>> {
        // Raw bytes so invalid UTF-8 surfaces as a decode error for this line
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let frame: Frame = serde_json::from_slice(&line)?;
            debug!(
                "{}:{} frame {} with {} hand(s)",
                self.name,
                self.line_number,
                frame.timestamp,
                frame.hands.len()
            );
            return Ok(Some(frame));
        }
    }

    fn describe(&self) -> String {
        format!("JSON lines frame source ({})", self.name)
    }
}

// ==============================================================================
// In-memory replay
// ==============================================================================

/// Yields a fixed list of frames in order
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    frames: VecDeque<Frame>,
}

impl ReplaySource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> GestureResult<Option<Frame>> {
        Ok(self.frames.pop_front())
    }

    fn describe(&self) -> String {
        format!("Replay frame source ({} frames remaining)", self.frames.len())
    }
}
