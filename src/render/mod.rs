//! Styled output rendering.
//!
//! This module turns raw subprocess output into display-ready runs:
//! - An incremental, escape-aware parser that yields styled runs and
//!   control signals per chunk
//! - A display buffer of runs in arrival order
//! - A sink that owns the persistent style state and applies parsed
//!   events to the buffer
//!
//! # Example
//!
//! ```
//! use shell_console::render::{OutputSink, StyleTag};
//!
//! let mut sink = OutputSink::new();
//! sink.submit("\x1b[31malert\x1b[0m ok\n");
//!
//! let runs = sink.buffer().runs();
//! assert_eq!(runs[0].style, StyleTag::Red);
//! assert_eq!(sink.buffer().plain_text(), "alert ok\n");
//! ```

mod buffer;
mod parser;
mod sink;

pub use buffer::DisplayBuffer;
pub use parser::{
    parse_chunk, ControlSignal, ParseEvent, StyleTag, StyledRun, CLEAR_ERASE, CLEAR_HOME,
};
pub use sink::OutputSink;
