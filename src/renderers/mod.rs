//! Render sinks for comparison frames.
//!
//! The orchestrator never draws anything. Once per tick it hands a
//! [`Frame`] to a [`RenderSink`], and the sink answers whether the run
//! should go on. Returning [`SinkControl::Stop`] is the external stop
//! signal (the equivalent of closing a plot window).
//!
//! # Architecture
//!
//! ```text
//! ComparisonOrchestrator::tick()
//!       ↓ Frame
//! ┌─────────────────────┐
//! │     RenderSink      │
//! └─────────────────────┘
//!    ↓        ↓        ↓
//!  Text    JsonLines  Recording
//! ```

pub mod json;
pub mod text;

pub use json::JsonLinesSink;
pub use text::TextSink;

use crate::error::CompareResult;
use crate::orchestrator::Frame;
use crate::runner::RunOutcome;

/// Whether the run should continue after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkControl {
    Continue,
    Stop,
}

/// Receives one frame per tick.
pub trait RenderSink {
    /// Consume a frame.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot write the frame.
    fn render(&mut self, frame: &Frame) -> CompareResult<SinkControl>;

    /// Called once after the last frame.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot flush its output.
    fn finish(&mut self, _outcome: &RunOutcome) -> CompareResult<()> {
        Ok(())
    }
}

/// Keeps every frame in memory. Optionally requests a stop after a fixed
/// number of frames.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<Frame>,
    stop_after: Option<usize>,
    finished: bool,
}

impl RecordingSink {
    /// Record every frame until the run ends on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal a stop once `frames` frames have been received.
    #[must_use]
    pub fn stop_after(frames: usize) -> Self {
        Self {
            stop_after: Some(frames),
            ..Self::default()
        }
    }

    /// Frames received so far.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Whether `finish` has been called.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &Frame) -> CompareResult<SinkControl> {
        self.frames.push(frame.clone());
        match self.stop_after {
            Some(limit) if self.frames.len() >= limit => Ok(SinkControl::Stop),
            _ => Ok(SinkControl::Continue),
        }
    }

    fn finish(&mut self, _outcome: &RunOutcome) -> CompareResult<()> {
        self.finished = true;
        Ok(())
    }
}
