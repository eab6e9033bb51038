//! Human-readable frame output.
//!
//! One block per printed frame: the title, then one line per algorithm with
//! attempts, cities visited, distance, and tour. The first block also carries
//! a one-line explanation under each algorithm.

use super::{RenderSink, SinkControl};
use crate::error::CompareResult;
use crate::orchestrator::{Frame, RenderRequest};
use crate::runner::{RunOutcome, StopReason};
use std::io::Write;

/// Writes frames as aligned text lines.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
    /// Print every n-th frame (the final frame is always printed).
    every: u64,
    last_printed: Option<u64>,
    last_seen: Option<Frame>,
    /// Explanations are printed under the first frame only.
    captions_shown: bool,
}

impl<W: Write> TextSink<W> {
    /// Print every `every`-th frame; `0` is treated as `1`.
    pub fn new(writer: W, every: u64) -> Self {
        Self {
            writer,
            every: every.max(1),
            last_printed: None,
            last_seen: None,
            captions_shown: false,
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &Frame) -> CompareResult<()> {
        writeln!(self.writer, "== {} | tick {} ==", frame.title, frame.tick)?;
        for request in &frame.requests {
            writeln!(self.writer, "  {}", format_request(request))?;
            if !self.captions_shown {
                writeln!(self.writer, "      {}", request.explanation)?;
            }
        }
        self.captions_shown = true;
        self.last_printed = Some(frame.tick);
        Ok(())
    }
}

/// Format one request as a single line.
#[must_use]
pub fn format_request(request: &RenderRequest) -> String {
    let distance = request
        .distance
        .map_or_else(|| "-".to_string(), |d| format!("{d:.2}"));
    let status = if request.complete { "done" } else { "running" };
    format!(
        "{:<18} attempts {:>8}  cities {:>3}/{:<3} distance {:>9}  [{status}] {:?}",
        request.label,
        request.attempts,
        request.cities_visited,
        request.total_cities,
        distance,
        request.tour
    )
}

impl<W: Write> RenderSink for TextSink<W> {
    fn render(&mut self, frame: &Frame) -> CompareResult<SinkControl> {
        if frame.tick % self.every == 0 || frame.all_exhausted {
            self.write_frame(frame)?;
        }
        self.last_seen = Some(frame.clone());
        Ok(SinkControl::Continue)
    }

    fn finish(&mut self, outcome: &RunOutcome) -> CompareResult<()> {
        // Make sure the final state is on screen even when skipped by `every`
        if let Some(frame) = self.last_seen.take() {
            if self.last_printed != Some(frame.tick) {
                self.write_frame(&frame)?;
            }
        }
        let message = match outcome.reason {
            StopReason::Exhausted => "All iterations completed.",
            StopReason::SinkStopped => "Stopped by request.",
            StopReason::TickLimit => "Tick limit reached.",
        };
        writeln!(self.writer, "{message} ({} ticks)", outcome.ticks)?;
        self.writer.flush()?;
        Ok(())
    }
}
