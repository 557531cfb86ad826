//! Channel relay between the blocking PTY endpoints and the consumer.
//!
//! PTY reads block indefinitely, so they must run off the consumer
//! context. The reader sends one output line per channel message, in
//! production order; the single-consumer queue is what keeps the sink
//! and display buffer under exactly one writer without locks.

use std::io::{BufRead, BufReader, Read, Write};
use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::echo::wire_format;

/// Line-oriented reader for PTY output.
///
/// Runs in a blocking thread and sends whole output lines (including
/// the trailing newline) through a channel. At EOF any final partial
/// line is still delivered before the sender is dropped; the closed
/// channel is the producer-closed signal to the consumer.
pub struct AsyncLineReader<R: Read + Send + 'static> {
    reader: R,
    tx: mpsc::Sender<String>,
}

impl<R: Read + Send + 'static> AsyncLineReader<R> {
    /// Create a new AsyncLineReader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The PTY reader (blocking).
    /// * `tx` - Channel sender for output lines.
    pub fn new(reader: R, tx: mpsc::Sender<String>) -> Self {
        Self { reader, tx }
    }

    /// Start the reader loop in a blocking thread.
    ///
    /// This method spawns a blocking task that reads lines from the PTY
    /// and sends them through the channel. It returns when:
    /// - The PTY is closed (read returns 0 or EIO)
    /// - The channel is closed (receiver dropped)
    /// - An unrecoverable error occurs
    pub async fn run(self) {
        let reader = self.reader;
        let tx = self.tx;

        let result = tokio::task::spawn_blocking(move || {
            let mut reader = BufReader::new(reader);
            let mut raw = Vec::new();

            loop {
                raw.clear();
                match reader.read_until(b'\n', &mut raw) {
                    Ok(0) => {
                        debug!("PTY reader: EOF");
                        break;
                    }
                    Ok(n) => {
                        trace!("PTY reader: read {} byte line", n);
                        // Output is a superset of ASCII; decode leniently
                        // so a stray byte never kills the stream.
                        let line = String::from_utf8_lossy(&raw).into_owned();
                        if tx.blocking_send(line).is_err() {
                            debug!("PTY reader: channel closed");
                            break;
                        }
                    }
                    Err(e) => {
                        // EIO on Unix typically means the PTY slave was closed
                        #[cfg(unix)]
                        if e.raw_os_error() == Some(libc::EIO) {
                            debug!("PTY reader: PTY closed (EIO)");
                            break;
                        }

                        if e.kind() == std::io::ErrorKind::BrokenPipe {
                            debug!("PTY reader: broken pipe");
                            break;
                        }

                        error!("PTY reader error: {}", e);
                        break;
                    }
                }
            }
        })
        .await;

        if let Err(e) = result {
            error!("PTY reader task panicked: {}", e);
        }
    }
}

/// Command writer for PTY input.
///
/// Receives submitted command lines through a channel and writes each
/// to the PTY as the literal command plus one newline, flushing after
/// every write.
pub struct AsyncCommandWriter<W: Write + Send + 'static> {
    writer: W,
    rx: mpsc::Receiver<String>,
}

impl<W: Write + Send + 'static> AsyncCommandWriter<W> {
    /// Create a new AsyncCommandWriter.
    ///
    /// # Arguments
    ///
    /// * `writer` - The PTY writer (blocking).
    /// * `rx` - Channel receiver for command lines.
    pub fn new(writer: W, rx: mpsc::Receiver<String>) -> Self {
        Self { writer, rx }
    }

    /// Start the writer loop in a blocking thread.
    ///
    /// This method spawns a blocking task that receives commands from
    /// the channel and writes them to the PTY. It returns when:
    /// - The channel is closed (sender dropped)
    /// - An unrecoverable error occurs
    pub async fn run(self) {
        let mut writer = self.writer;
        let mut rx = self.rx;

        let result = tokio::task::spawn_blocking(move || {
            while let Some(command) = rx.blocking_recv() {
                trace!("PTY writer: forwarding {} byte command", command.len());
                let wire = wire_format(&command);
                if let Err(e) = writer.write_all(wire.as_bytes()) {
                    if e.kind() == std::io::ErrorKind::BrokenPipe {
                        debug!("PTY writer: broken pipe");
                        break;
                    }
                    error!("PTY writer error: {}", e);
                    break;
                }
                if let Err(e) = writer.flush() {
                    error!("PTY writer flush error: {}", e);
                    break;
                }
            }
            debug!("PTY writer: channel closed");
        })
        .await;

        if let Err(e) = result {
            error!("PTY writer task panicked: {}", e);
        }
    }
}
