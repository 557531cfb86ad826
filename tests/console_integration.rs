//! Integration tests for the output pipeline.
//!
//! These drive the parser, sink, echo formatter, and channel relay
//! together the way the binary wires them, without spawning a PTY.

use std::io::Cursor;
use std::time::Duration;

use tokio::sync::mpsc;

use shell_console::{
    format_command, AsyncLineReader, ConsoleStatus, OutputSink, StyleTag,
};

/// Pump a canned byte stream through the line reader into a sink, the
/// producer/consumer split used by the binary.
async fn pump(data: &[u8]) -> OutputSink {
    let (tx, mut rx) = mpsc::channel(64);
    let reader = AsyncLineReader::new(Cursor::new(data.to_vec()), tx);
    let producer = tokio::spawn(reader.run());

    let mut sink = OutputSink::new();
    while let Some(chunk) = rx.recv().await {
        sink.submit(&chunk);
    }
    let _ = tokio::time::timeout(Duration::from_millis(500), producer).await;

    sink
}

#[tokio::test]
async fn styled_output_survives_line_boundaries() {
    let sink = pump(b"\x1b[32mBUILD OK\nstill green\x1b[0m done\n").await;

    let runs = sink.buffer().runs();
    assert_eq!(runs[0].text, "BUILD OK\n");
    assert_eq!(runs[0].style, StyleTag::Green);
    assert_eq!(runs[1].text, "still green");
    assert_eq!(runs[1].style, StyleTag::Green);
    assert_eq!(runs[2].text, " done\n");
    assert_eq!(runs[2].style, StyleTag::Default);
    assert_eq!(sink.style(), StyleTag::Default);
}

#[tokio::test]
async fn clear_screen_truncates_earlier_lines() {
    let sink = pump(b"old line 1\nold line 2\n\x1b[2Jafter clear\n").await;

    assert_eq!(sink.buffer().plain_text(), "after clear\n");
}

#[tokio::test]
async fn cursor_home_alone_clears() {
    let sink = pump(b"stale\n\x1b[H\x1b[2J\n").await;

    // Only the newline of the clearing line survives.
    assert_eq!(sink.buffer().plain_text(), "\n");
}

#[tokio::test]
async fn final_partial_line_is_not_lost() {
    let sink = pump(b"prompt> \x1b[31merr").await;

    assert_eq!(sink.buffer().plain_text(), "prompt> err");
    let last = sink.buffer().runs().last().unwrap();
    assert_eq!(last.style, StyleTag::Red);
}

#[tokio::test]
async fn unknown_sequences_degrade_to_plain_text() {
    let sink = pump(b"\x1b[99m\x1b[5Avisible\x1b]0;title\x07\n").await;

    // Unmapped SGR and cursor-up vanish; the OSC opener is not in the
    // grammar so its bytes stay, minus nothing recognized.
    let text = sink.buffer().plain_text();
    assert!(text.contains("visible"));
    assert_eq!(sink.style(), StyleTag::Default);
}

#[tokio::test]
async fn echo_then_output_interleave() {
    let mut sink = OutputSink::new();

    sink.push_echo(&format_command("alice", "box", "/srv", "make"));
    sink.submit("\x1b[33mwarning: dusty\x1b[0m\n");
    sink.push_echo(&format_command("alice", "box", "/srv", "make install"));

    assert_eq!(
        sink.buffer().plain_text(),
        "alice@box:/srv$ make\nwarning: dusty\nalice@box:/srv$ make install\n"
    );

    let runs = sink.buffer().runs();
    assert_eq!(runs[0].style, StyleTag::Green); // identity
    assert_eq!(runs[1].style, StyleTag::Blue); // cwd
    assert_eq!(runs[3].style, StyleTag::Yellow); // warning line
}

#[tokio::test]
async fn producer_close_then_notice() {
    let (tx, mut rx) = mpsc::channel(8);
    let reader = AsyncLineReader::new(Cursor::new(b"last words\n".to_vec()), tx);
    tokio::spawn(reader.run());

    let mut sink = OutputSink::new();
    let mut status = ConsoleStatus::Initializing;
    status.transition_to(ConsoleStatus::Running).unwrap();

    while let Some(chunk) = rx.recv().await {
        sink.submit(&chunk);
    }
    // Channel closed: terminated notice, no further producer input.
    sink.push_notice("[Process terminated]\n");
    status.transition_to(ConsoleStatus::Terminated).unwrap();

    assert!(status.is_terminal());
    assert!(!status.accepts_output());
    assert_eq!(
        sink.buffer().plain_text(),
        "last words\n[Process terminated]\n"
    );
    assert_eq!(
        sink.buffer().runs().last().unwrap().style,
        StyleTag::Red
    );
}

#[tokio::test]
async fn split_chunks_match_combined_submission() {
    let whole = "\x1b[36mnorth\x1b[0m and \x1b[35msouth\x1b[0m\n";

    let mut combined = OutputSink::new();
    combined.submit(whole);

    // Split at char boundaries that do not land inside a sequence.
    let mut split = OutputSink::new();
    split.submit("\x1b[36mnorth\x1b[0m and ");
    split.submit("\x1b[35msouth\x1b[0m\n");

    assert_eq!(combined.buffer().plain_text(), split.buffer().plain_text());
    assert_eq!(combined.style(), split.style());
}
