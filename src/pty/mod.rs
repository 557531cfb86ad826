//! PTY (Pseudo-Terminal) abstraction layer.
//!
//! The wrapped program runs inside a PTY so its stdout and stderr arrive
//! as one combined stream, the contract the output sink expects. The
//! [`relay`] adapters turn the blocking PTY endpoints into channel-based
//! producers and consumers.

mod native;
mod relay;

pub use native::{default_shell, NativePty};
pub use relay::{AsyncCommandWriter, AsyncLineReader};

use std::io::{Read, Write};

use portable_pty::ChildKiller;

/// Size of a PTY in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtySize {
    /// Number of rows (height).
    pub rows: u16,
    /// Number of columns (width).
    pub cols: u16,
}

impl PtySize {
    /// Create a new PtySize with the given dimensions.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

impl Default for PtySize {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// A handle to a spawned PTY process.
pub struct PtyHandle<R: Read + Send, W: Write + Send> {
    /// Reader for the combined output stream.
    pub reader: R,
    /// Writer for the process input.
    pub writer: W,
    /// Process ID of the spawned child.
    pub pid: u32,
    /// Kill switch for the child, used on user-initiated shutdown.
    /// Stays usable after the reader and writer have been moved out.
    pub killer: Box<dyn ChildKiller + Send + Sync>,
    /// The underlying PTY pair (kept alive to prevent cleanup).
    _pty: Box<dyn std::any::Any + Send>,
}

impl<R: Read + Send, W: Write + Send> PtyHandle<R, W> {
    /// Create a new PtyHandle.
    pub fn new(
        reader: R,
        writer: W,
        pid: u32,
        killer: Box<dyn ChildKiller + Send + Sync>,
        pty: Box<dyn std::any::Any + Send>,
    ) -> Self {
        Self {
            reader,
            writer,
            pid,
            killer,
            _pty: pty,
        }
    }
}
