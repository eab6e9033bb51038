//! JSON-lines frame output, one serialized [`Frame`] per line.
//!
//! Meant for an external plotter: it reads frames from a pipe and draws
//! them, keeping plotting out of this crate.

use super::{RenderSink, SinkControl};
use crate::error::CompareResult;
use crate::orchestrator::Frame;
use crate::runner::RunOutcome;
use std::io::Write;

/// Writes every frame as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &Frame) -> CompareResult<SinkControl> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        Ok(SinkControl::Continue)
    }

    fn finish(&mut self, _outcome: &RunOutcome) -> CompareResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
