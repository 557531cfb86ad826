//! # shell-console
//!
//! Styled live console for interactive subprocess output.
//!
//! This crate mirrors the output of a long-running interactive program
//! as a sequence of styled text runs while forwarding user-submitted
//! commands to the program's input stream. The heart of it is an
//! incremental ANSI-escape-aware parser that carries color state across
//! arbitrarily-chunked output.
//!
//! ## Features
//!
//! - **Incremental styled parsing**: SGR color runs and clear-screen
//!   handling with style continuity across chunks
//! - **Cross-platform PTY**: the wrapped program's stdout and stderr
//!   arrive as one combined stream
//! - **Channel relay**: blocking PTY I/O bridged to a single consumer
//!   loop, no locks, strict FIFO ordering
//!
//! ## Quick Start
//!
//! ```
//! use shell_console::{format_command, OutputSink, StyleTag};
//!
//! let mut sink = OutputSink::new();
//!
//! // Subprocess output, one line per chunk, styles crossing chunks.
//! sink.submit("\x1b[32mready\n");
//! sink.submit("still green\x1b[0m\n");
//!
//! // Echo a submitted command before forwarding it.
//! let echo = format_command("alice", "box", "/tmp", "ls");
//! sink.push_echo(&echo);
//!
//! assert_eq!(sink.buffer().runs()[0].style, StyleTag::Green);
//! ```

pub mod cli;
pub mod config;
pub mod echo;
pub mod error;
pub mod logging;
pub mod pty;
pub mod render;
pub mod status;

// Re-export commonly used types
pub use echo::{echo_current, format_command, wire_format, CommandEcho};
pub use error::{ConsoleError, Result};
pub use pty::{AsyncCommandWriter, AsyncLineReader, NativePty, PtyHandle, PtySize};
pub use render::{
    parse_chunk, ControlSignal, DisplayBuffer, OutputSink, ParseEvent, StyleTag, StyledRun,
};
pub use status::ConsoleStatus;
