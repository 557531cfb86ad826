//! Streaming output sink.
//!
//! Bridges asynchronously-arriving output chunks to the parser and the
//! display buffer, carrying the active style across chunks. The sink is
//! the single owner of both the parser state and the buffer; all
//! submissions must arrive on one consumer context (see the channel
//! relay in [`crate::pty`]).

use tracing::trace;

use super::buffer::DisplayBuffer;
use super::parser::{parse_chunk, ControlSignal, ParseEvent, StyleTag, StyledRun};
use crate::echo::CommandEcho;

/// Applies parsed output events to a display buffer, preserving style
/// continuity between chunks.
#[derive(Debug, Default)]
pub struct OutputSink {
    style: StyleTag,
    buffer: DisplayBuffer,
}

impl OutputSink {
    /// Create a sink with an empty buffer and default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit one output chunk.
    ///
    /// The chunk is parsed with the style left over from the previous
    /// submission. A clear signal truncates the buffer before any run
    /// from the same chunk is appended.
    pub fn submit(&mut self, chunk: &str) {
        let (events, next) = parse_chunk(chunk, self.style);
        trace!(events = events.len(), "applying output chunk");

        for event in events {
            match event {
                ParseEvent::Control(ControlSignal::ClearScreen) => self.buffer.clear(),
                ParseEvent::Run(run) => self.buffer.push(run),
            }
        }
        self.style = next;
    }

    /// Append a command echo ahead of forwarding the command.
    pub fn push_echo(&mut self, echo: &CommandEcho) {
        for run in echo.segments() {
            self.buffer.push(run.clone());
        }
    }

    /// Append a red notice line, e.g. a termination message.
    ///
    /// Notices bypass the parser and do not disturb the carried style.
    pub fn push_notice(&mut self, text: &str) {
        if !text.is_empty() {
            self.buffer.push(StyledRun::new(text, StyleTag::Red));
        }
    }

    /// Style that will seed the next submission.
    pub fn style(&self) -> StyleTag {
        self.style
    }

    /// The display buffer.
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }
}
