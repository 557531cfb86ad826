//! Incremental ANSI escape sequence parser.
//!
//! Splits a chunk of subprocess output into styled text runs and control
//! signals. The parser is a pure function: the caller passes in the style
//! active at the start of the chunk and receives the style active at its
//! end, so style state survives arbitrary chunk boundaries without the
//! parser holding any state of its own.
//!
//! Only a small fixed grammar is recognized: SGR foreground colors
//! (`ESC [ digits* m`) and the clear-screen pair `ESC[2J` / `ESC[H`.
//! Everything else is consumed and discarded; malformed input never fails.
//!
//! Known limitation: an escape sequence split across two chunks is not
//! reassembled. Each chunk is parsed independently. The upstream reader
//! delivers whole output lines, so a split can only happen if a sequence
//! straddles a newline, which terminal programs do not emit.

const ESC: char = '\x1b';

/// Erase-display sequence, recognized as a clear trigger.
pub const CLEAR_ERASE: &str = "\x1b[2J";
/// Cursor-home sequence, recognized as a clear trigger.
pub const CLEAR_HOME: &str = "\x1b[H";

/// Foreground style active for a run of text.
///
/// Exactly one tag is active at any point in the stream; an SGR sequence
/// replaces the previous tag, there is no stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleTag {
    /// No color applied (SGR 0, reset).
    #[default]
    Default,
    /// SGR 31.
    Red,
    /// SGR 32.
    Green,
    /// SGR 33.
    Yellow,
    /// SGR 34.
    Blue,
    /// SGR 35.
    Magenta,
    /// SGR 36.
    Cyan,
    /// SGR 37.
    White,
}

impl StyleTag {
    /// Map an SGR parameter to a style tag.
    ///
    /// Returns `None` for parameters outside the recognized table, which
    /// leaves the current style unchanged.
    pub fn from_sgr(param: u16) -> Option<Self> {
        match param {
            0 => Some(Self::Default),
            31 => Some(Self::Red),
            32 => Some(Self::Green),
            33 => Some(Self::Yellow),
            34 => Some(Self::Blue),
            35 => Some(Self::Magenta),
            36 => Some(Self::Cyan),
            37 => Some(Self::White),
            _ => None,
        }
    }

    /// The SGR parameter that selects this style.
    pub fn sgr_param(&self) -> u16 {
        match self {
            Self::Default => 0,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }
}

/// A run of text under a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// The text of the run. Never empty, never contains a recognized
    /// control sequence.
    pub text: String,
    /// Style active for the whole run.
    pub style: StyleTag,
}

impl StyledRun {
    /// Create a new styled run.
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Non-text signal recognized in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// The display buffer should be truncated to empty.
    ClearScreen,
}

/// One parser output: either a styled run or a control signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// Styled text to append to the display.
    Run(StyledRun),
    /// Control signal to apply to the display.
    Control(ControlSignal),
}

/// Scanner state for the escape sequence grammar.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Accumulating plain text.
    Plain,
    /// Saw `ESC`, waiting for `[`.
    SawEscape,
    /// Inside `ESC [`, consuming parameter digits.
    InParamDigits { param: u16, has_digits: bool },
}

/// Parse one chunk of output into an ordered event sequence.
///
/// `style` is the style active at the start of the chunk; the returned
/// tag is the style active at its end and must seed the next call.
///
/// The clear triggers [`CLEAR_ERASE`] and [`CLEAR_HOME`] are scanned for
/// up front: if either appears anywhere in the chunk, a single
/// [`ControlSignal::ClearScreen`] is emitted before any run, and every
/// occurrence is excised before the rest of the chunk is parsed.
pub fn parse_chunk(chunk: &str, style: StyleTag) -> (Vec<ParseEvent>, StyleTag) {
    let mut events = Vec::new();

    let cleaned: std::borrow::Cow<'_, str> =
        if chunk.contains(CLEAR_ERASE) || chunk.contains(CLEAR_HOME) {
            events.push(ParseEvent::Control(ControlSignal::ClearScreen));
            chunk.replace(CLEAR_ERASE, "").replace(CLEAR_HOME, "").into()
        } else {
            chunk.into()
        };

    let mut current = style;
    let mut buf = String::new();
    let mut state = ScanState::Plain;

    for ch in cleaned.chars() {
        state = match state {
            ScanState::Plain => {
                if ch == ESC {
                    ScanState::SawEscape
                } else {
                    buf.push(ch);
                    ScanState::Plain
                }
            }
            ScanState::SawEscape => {
                if ch == '[' {
                    flush(&mut events, &mut buf, current);
                    ScanState::InParamDigits {
                        param: 0,
                        has_digits: false,
                    }
                } else if ch == ESC {
                    // The first ESC was not an opener; keep it as text.
                    buf.push(ESC);
                    ScanState::SawEscape
                } else {
                    buf.push(ESC);
                    buf.push(ch);
                    ScanState::Plain
                }
            }
            ScanState::InParamDigits { param, has_digits } => {
                if let Some(d) = ch.to_digit(10) {
                    ScanState::InParamDigits {
                        param: param.saturating_mul(10).saturating_add(d as u16),
                        has_digits: true,
                    }
                } else if ch == 'm' {
                    // SGR: absence of digits means parameter 0 (reset).
                    let p = if has_digits { param } else { 0 };
                    if let Some(tag) = StyleTag::from_sgr(p) {
                        current = tag;
                    }
                    ScanState::Plain
                } else if ch == ESC {
                    // Unterminated sequence followed by a new escape:
                    // drop the partial parameters and restart recognition.
                    ScanState::SawEscape
                } else {
                    // Unrecognized terminator: consume and discard.
                    ScanState::Plain
                }
            }
        };
    }

    match state {
        ScanState::Plain => {}
        // A trailing lone ESC is plain text, same as mid-chunk.
        ScanState::SawEscape => buf.push(ESC),
        // A chunk ending mid-sequence drops the unterminated tail.
        ScanState::InParamDigits { .. } => {}
    }
    flush(&mut events, &mut buf, current);

    (events, current)
}

fn flush(events: &mut Vec<ParseEvent>, buf: &mut String, style: StyleTag) {
    if !buf.is_empty() {
        events.push(ParseEvent::Run(StyledRun::new(std::mem::take(buf), style)));
    }
}
