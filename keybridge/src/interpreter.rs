//! Command interpreter: turns one received line into an ordered list of [`Step`]s.
//!
//! A line is one of
//! - a macro chain, segments joined by `||` and run left to right with a pause
//!   after every split-off segment,
//! - a single `!` directive, see [`crate::directive`],
//! - literal text, typed character by character.
//!
//! Steps are produced lazily and without allocation, so the same
//! [`Interpretation`] can be dispatched or inspected any number of times.

use core::str::Utf8Chunks;

use embassy_time::Duration;
use keybridge_types::action::KeyAction;
use keybridge_types::keycode::HidKeyCode;

use crate::config::InterpreterConfig;
use crate::directive::{self, Expansion};
use crate::fmt::Text;

/// Delimiter between the segments of a macro chain
pub const MACRO_DELIMITER: &[u8] = b"||";
/// Acknowledgment sent back to the transport after every non-empty write
pub const ACK: &[u8] = b"OK";

/// One unit of work for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Forward to the key action sink
    Key(KeyAction),
    /// Pause before the next step
    Wait(Duration),
}

/// How a received line was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputKind {
    /// Nothing left after trimming
    Empty,
    /// Contains `||`
    MacroChain,
    /// Starts with `!`
    Directive,
    /// Everything else, typed from the untrimmed bytes
    Literal,
}

/// Result of interpreting one received line
#[derive(Debug, Clone, Copy)]
pub struct Interpretation<'a> {
    raw: &'a [u8],
    input: &'a [u8],
    kind: InputKind,
    segment_delay: Duration,
}

/// Interpret one write event received from the transport.
pub fn interpret<'a>(raw: &'a [u8], config: &InterpreterConfig) -> Interpretation<'a> {
    let input = trim(raw);
    if !raw.is_empty() {
        info!("Received: [{}]", Text(input));
    }

    let kind = if input.is_empty() {
        InputKind::Empty
    } else if find(input, MACRO_DELIMITER).is_some() {
        InputKind::MacroChain
    } else if input.starts_with(b"!") {
        InputKind::Directive
    } else {
        InputKind::Literal
    };

    Interpretation {
        raw,
        input,
        kind,
        segment_delay: config.segment_delay,
    }
}

impl<'a> Interpretation<'a> {
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// The trimmed input
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Payload to notify once every step has been dispatched.
    ///
    /// Any non-empty write is acknowledged, even when it produced no key action.
    pub fn acknowledgment(&self) -> Option<&'static [u8]> {
        if self.raw.is_empty() { None } else { Some(ACK) }
    }

    /// A fresh iterator over every step of this line
    pub fn steps(&self) -> Steps<'a> {
        let (current, rest) = match self.kind {
            InputKind::Empty => (SegmentSteps::Idle, None),
            InputKind::MacroChain => (SegmentSteps::Idle, Some(self.input)),
            InputKind::Directive => (SegmentSteps::Directive(directive::resolve(self.input)), None),
            InputKind::Literal => (SegmentSteps::Text(TextSteps::new(self.raw)), None),
        };
        Steps {
            current,
            rest,
            pending_wait: false,
            segment_delay: self.segment_delay,
        }
    }
}

impl<'a> IntoIterator for &Interpretation<'a> {
    type Item = Step;
    type IntoIter = Steps<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps()
    }
}

/// Iterator over the steps of one [`Interpretation`]
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    current: SegmentSteps<'a>,
    // Unsplit remainder of a macro chain
    rest: Option<&'a [u8]>,
    pending_wait: bool,
    segment_delay: Duration,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.current.next() {
                return Some(step);
            }
            if self.pending_wait {
                self.pending_wait = false;
                return Some(Step::Wait(self.segment_delay));
            }

            let rest = self.rest.take()?;
            match find(rest, MACRO_DELIMITER) {
                Some(pos) => {
                    self.current = SegmentSteps::segment(trim(&rest[..pos]));
                    self.rest = Some(&rest[pos + MACRO_DELIMITER.len()..]);
                    self.pending_wait = true;
                }
                None => self.current = SegmentSteps::segment(trim(rest)),
            }
        }
    }
}

#[derive(Debug, Clone)]
enum SegmentSteps<'a> {
    Idle,
    Text(TextSteps<'a>),
    Directive(Expansion),
}

impl<'a> SegmentSteps<'a> {
    /// Steps of one trimmed macro chain segment
    fn segment(segment: &'a [u8]) -> Self {
        if segment.is_empty() {
            return SegmentSteps::Idle;
        }
        debug!("Macro segment: [{}]", Text(segment));
        if segment.starts_with(b"!") {
            SegmentSteps::Directive(directive::resolve(segment))
        } else {
            SegmentSteps::Text(TextSteps::new(segment))
        }
    }
}

impl Iterator for SegmentSteps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            SegmentSteps::Idle => None,
            SegmentSteps::Text(text) => text.next(),
            SegmentSteps::Directive(expansion) => expansion.next(),
        }
    }
}

/// Types text one character at a time.
///
/// `\n` is an Enter tap and `\r` is skipped. Every invalid UTF-8 sequence is
/// typed as a single U+FFFD.
#[derive(Debug, Clone)]
struct TextSteps<'a> {
    chunks: Utf8Chunks<'a>,
    valid: core::str::Chars<'a>,
    // Invalid bytes at the end of the current chunk
    invalid: bool,
    release_enter: bool,
}

impl<'a> TextSteps<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self {
            chunks: text.utf8_chunks(),
            valid: "".chars(),
            invalid: false,
            release_enter: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.valid.next() {
                return Some(c);
            }
            if self.invalid {
                self.invalid = false;
                return Some(char::REPLACEMENT_CHARACTER);
            }
            let chunk = self.chunks.next()?;
            self.valid = chunk.valid().chars();
            self.invalid = !chunk.invalid().is_empty();
        }
    }
}

impl Iterator for TextSteps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.release_enter {
            self.release_enter = false;
            return Some(Step::Key(KeyAction::Release(HidKeyCode::Enter)));
        }
        loop {
            match self.next_char()? {
                '\r' => continue,
                '\n' => {
                    self.release_enter = true;
                    return Some(Step::Key(KeyAction::Press(HidKeyCode::Enter)));
                }
                c => return Some(Step::Key(KeyAction::Type(c))),
            }
        }
    }
}

fn is_trimmed(b: &u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Strip space, tab, CR and LF from both ends.
pub fn trim(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|b| !is_trimmed(b)).unwrap_or(s.len());
    let end = s.iter().rposition(|b| !is_trimmed(b)).map_or(start, |i| i + 1);
    &s[start..end]
}

/// Position of the first occurrence of `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
