//! Display buffer of styled runs.

use super::parser::StyledRun;

/// Append-only sequence of styled runs backing the display surface.
///
/// The buffer is mutated by exactly one writer (the sink's consumer
/// context). The only way it shrinks is a clear-screen truncation.
#[derive(Debug, Default)]
pub struct DisplayBuffer {
    runs: Vec<StyledRun>,
    clears: u64,
}

impl DisplayBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run in arrival order.
    pub fn push(&mut self, run: StyledRun) {
        self.runs.push(run);
    }

    /// Truncate the buffer to empty.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.clears += 1;
    }

    /// Number of clear truncations over the buffer's lifetime.
    ///
    /// An incremental renderer compares generations to detect a clear
    /// even when the run count has already grown back past what it
    /// last painted.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// All runs in arrival order.
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Number of runs currently held.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if the buffer holds no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Concatenated text of all runs, styles dropped.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}
