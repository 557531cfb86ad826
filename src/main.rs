//! Shell-console binary entry point.
//!
//! Wires the pieces together: spawn the wrapped program in a PTY, pump
//! its output lines through a channel into the sink-owning consumer
//! loop, and forward lines typed on stdin as commands. The consumer
//! loop is the only context that touches the sink and display buffer.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use shell_console::{
    cli, config::Config, echo, logging, AsyncCommandWriter, AsyncLineReader, ConsoleError,
    ConsoleStatus, NativePty, OutputSink, PtySize, StyleTag, StyledRun,
};

/// How long the final drain waits for the child's last output.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> shell_console::Result<()> {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("shell-console: {}", e);
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }
    if args.version {
        cli::print_version();
        return Ok(());
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("shell-console: {}", e);
            std::process::exit(2);
        }
    };

    logging::init_with_filter(config.log_filter());
    info!("shell-console v{}", env!("CARGO_PKG_VERSION"));

    let mut status = ConsoleStatus::Initializing;

    let pty = NativePty::new();
    let mut handle = match pty.spawn(
        &config.program.command,
        &config.program.args,
        config.program.working_dir.as_deref(),
        PtySize::default(),
    ) {
        Ok(handle) => handle,
        Err(e) => {
            status.transition_to(ConsoleStatus::Terminated)?;
            return Err(e);
        }
    };
    info!(pid = handle.pid, program = %config.program.command, "spawned");
    status.transition_to(ConsoleStatus::Running)?;

    // FIFO handoff: the reader is the producer, this loop the consumer.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    let (cmd_tx, cmd_rx) = mpsc::channel::<String>(16);

    tokio::spawn(AsyncLineReader::new(handle.reader, line_tx).run());
    tokio::spawn(AsyncCommandWriter::new(handle.writer, cmd_rx).run());

    let mut sink = OutputSink::new();
    let mut renderer = Renderer::new();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            // Output is only consumed while the session is live.
            chunk = line_rx.recv(), if status.accepts_output() => match chunk {
                Some(chunk) => {
                    sink.submit(&chunk);
                    renderer.flush(&sink);
                }
                None => {
                    // Producer closed: the reader already drained any
                    // final partial line before dropping its sender.
                    debug!("producer closed");
                    sink.push_notice("[Process terminated]\n");
                    renderer.flush(&sink);
                    status.transition_to(ConsoleStatus::Terminated)?;
                    break;
                }
            },
            line = input.next_line() => match line {
                Ok(Some(line)) => {
                    let accepted = forward_command(&mut sink, &cmd_tx, &line).await;
                    renderer.flush(&sink);
                    if !accepted {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("stdin closed");
                    break;
                }
                Err(e) => return Err(e.into()),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    // User-initiated exits reach here with the child still up:
    // terminate it, drain the last of its output, then mark the
    // session terminated.
    if !status.is_terminal() {
        if let Err(e) = handle.killer.kill() {
            warn!(pid = handle.pid, error = %e, "failed to terminate child");
        }
        let _ = tokio::time::timeout(DRAIN_TIMEOUT, async {
            while let Some(chunk) = line_rx.recv().await {
                sink.submit(&chunk);
                renderer.flush(&sink);
            }
        })
        .await;
        sink.push_notice("[Process terminated]\n");
        renderer.flush(&sink);
        status.transition_to(ConsoleStatus::Terminated)?;
    }

    info!(status = %status, "shutting down");
    Ok(())
}

/// Echo a submitted line and hand it off to the command writer.
///
/// Returns `false` when the handoff channel is closed, meaning the
/// writer task is gone and no further input can be accepted.
async fn forward_command(
    sink: &mut OutputSink,
    cmd_tx: &mpsc::Sender<String>,
    line: &str,
) -> bool {
    let command = line.trim();
    if command.is_empty() {
        return true;
    }
    sink.push_echo(&echo::echo_current(command));
    match cmd_tx.send(command.to_string()).await {
        Ok(()) => true,
        Err(e) => {
            let err = ConsoleError::HandoffFailure(e.to_string());
            warn!(%err, "stopping input");
            false
        }
    }
}

/// Incremental terminal renderer over the sink's display buffer.
///
/// Tracks how many runs have been printed and the buffer's clear
/// generation. A generation bump wipes the terminal and reprints the
/// whole post-clear buffer, so a clearing chunk that appends runs of
/// its own never leaves stale text on screen.
struct Renderer {
    rendered: usize,
    clears: u64,
}

impl Renderer {
    fn new() -> Self {
        Self {
            rendered: 0,
            clears: 0,
        }
    }

    fn flush(&mut self, sink: &OutputSink) {
        let mut stdout = std::io::stdout().lock();
        let _ = self.write_pending(&mut stdout, sink);
        let _ = stdout.flush();
    }

    fn write_pending(&mut self, out: &mut impl Write, sink: &OutputSink) -> std::io::Result<()> {
        let buffer = sink.buffer();
        if buffer.clears() != self.clears {
            write!(out, "\x1b[2J\x1b[H")?;
            self.clears = buffer.clears();
            self.rendered = 0;
        }
        for run in &buffer.runs()[self.rendered..] {
            write_run(out, run)?;
        }
        self.rendered = buffer.runs().len();
        Ok(())
    }
}

fn write_run(out: &mut impl Write, run: &StyledRun) -> std::io::Result<()> {
    match run.style {
        StyleTag::Default => write!(out, "{}", run.text),
        style => write!(out, "\x1b[{}m{}\x1b[0m", style.sgr_param(), run.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_appends_new_runs_only() {
        let mut sink = OutputSink::new();
        let mut renderer = Renderer::new();
        let mut out = Vec::new();

        sink.submit("one\n");
        renderer.write_pending(&mut out, &sink).unwrap();
        sink.submit("two\n");
        renderer.write_pending(&mut out, &sink).unwrap();

        assert_eq!(out, b"one\ntwo\n");
    }

    #[test]
    fn renderer_reprints_after_mid_stream_clear() {
        let mut sink = OutputSink::new();
        let mut renderer = Renderer::new();
        let mut out = Vec::new();

        sink.submit("hello\n");
        renderer.write_pending(&mut out, &sink).unwrap();

        // The clearing chunk appends as many runs as were already
        // painted, so only the clear generation reveals the truncation.
        out.clear();
        sink.submit("\x1b[2Ja\x1b[31mb\n");
        renderer.write_pending(&mut out, &sink).unwrap();

        assert_eq!(out, b"\x1b[2J\x1b[Ha\x1b[31mb\n\x1b[0m");
    }

    #[test]
    fn renderer_reencodes_styles() {
        let mut sink = OutputSink::new();
        let mut renderer = Renderer::new();
        let mut out = Vec::new();

        sink.submit("\x1b[32mok\x1b[0m\n");
        renderer.write_pending(&mut out, &sink).unwrap();

        assert_eq!(out, b"\x1b[32mok\x1b[0m\n");
    }

    #[tokio::test]
    async fn input_rejected_after_handoff_failure() {
        let (tx, rx) = mpsc::channel::<String>(1);
        drop(rx);

        let mut sink = OutputSink::new();
        assert!(!forward_command(&mut sink, &tx, "ls").await);
        // The echo still lands before the failure is noticed.
        assert!(sink.buffer().plain_text().ends_with("ls\n"));
    }

    #[tokio::test]
    async fn blank_input_is_skipped() {
        let (tx, _rx) = mpsc::channel::<String>(1);

        let mut sink = OutputSink::new();
        assert!(forward_command(&mut sink, &tx, "   ").await);
        assert!(sink.buffer().is_empty());
    }
}
