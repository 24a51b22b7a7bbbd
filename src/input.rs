//! Input source for generated programs.
//!
//! A context object threaded through the `Runtime`, never a module-level
//! singleton. Two operating modes:
//! - `Stdin`: the real process input stream. Whole-stream reads are
//!   memoized: the stream is consumed at most once and every later call
//!   returns the cached text.
//! - `Scripted`: preset text for tests and embedders, with a cursor for
//!   line reads and a fixed terminal flag.
//!
//! End-of-input is never an error: line reads yield the empty string and
//! whole-stream reads yield whatever was available. The language has no
//! "no more input" exception; callers check for emptiness themselves.

use std::io::{BufRead, IsTerminal, Read};

use parking_lot::Mutex;

/// Where the runtime reads program input from.
pub enum InputSource {
    /// Process standard input, with a memoized whole-stream buffer.
    Stdin {
        /// Populated at most once; later reads return the cached value.
        memo: Mutex<Option<String>>,
    },
    /// Preset input text for tests and embedders.
    Scripted {
        text: String,
        /// Byte offset of the next unread line.
        cursor: Mutex<usize>,
        tty: bool,
    },
}

/// Populate `memo` on first use; every later call serves the cache and
/// never runs `pull` again.
fn memoize(memo: &Mutex<Option<String>>, pull: impl FnOnce() -> String) -> String {
    let mut memo = memo.lock();
    if let Some(cached) = memo.as_ref() {
        return cached.clone();
    }
    let text = pull();
    *memo = Some(text.clone());
    text
}

impl InputSource {
    /// Input from the real process stdin.
    pub fn stdin() -> Self {
        InputSource::Stdin {
            memo: Mutex::new(None),
        }
    }

    /// Scripted input with the given text, reporting a non-interactive
    /// input channel.
    pub fn scripted(text: impl Into<String>) -> Self {
        InputSource::Scripted {
            text: text.into(),
            cursor: Mutex::new(0),
            tty: false,
        }
    }

    /// Scripted input that reports an interactive terminal.
    pub fn scripted_tty(text: impl Into<String>) -> Self {
        InputSource::Scripted {
            text: text.into(),
            cursor: Mutex::new(0),
            tty: true,
        }
    }

    /// The entire input stream decoded as text.
    ///
    /// Read once and memoized for the lifetime of this source; the first
    /// call wins and every subsequent call returns the cached value.
    pub fn read_all(&self) -> String {
        match self {
            InputSource::Stdin { memo } => memoize(memo, || {
                let mut text = String::new();
                // A read failure yields whatever was decoded so far
                let _ = std::io::stdin().lock().read_to_string(&mut text);
                text
            }),
            InputSource::Scripted { text, .. } => text.clone(),
        }
    }

    /// One line of input, trimmed of trailing whitespace.
    ///
    /// Returns the empty string on end-of-input.
    pub fn read_line(&self) -> String {
        match self {
            InputSource::Stdin { .. } => {
                let mut line = String::new();
                let _ = std::io::stdin().lock().read_line(&mut line);
                line.trim_end().to_string()
            }
            InputSource::Scripted { text, cursor, .. } => {
                let mut cursor = cursor.lock();
                let rest = &text[*cursor..];
                if rest.is_empty() {
                    return String::new();
                }
                let (line, consumed) = match rest.find('\n') {
                    Some(pos) => (&rest[..pos], pos.saturating_add(1)),
                    None => (rest, rest.len()),
                };
                *cursor = cursor.saturating_add(consumed);
                line.trim_end().to_string()
            }
        }
    }

    /// Whether the input channel is an interactive terminal.
    pub fn is_tty(&self) -> bool {
        match self {
            InputSource::Stdin { .. } => std::io::stdin().is_terminal(),
            InputSource::Scripted { tty, .. } => *tty,
        }
    }
}

impl Default for InputSource {
    fn default() -> Self {
        Self::stdin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_read_all_returns_full_text() {
        let input = InputSource::scripted("a\nb\na");
        assert_eq!(input.read_all(), "a\nb\na");
        // Idempotent
        assert_eq!(input.read_all(), "a\nb\na");
    }

    #[test]
    fn scripted_line_reads_advance_and_trim() {
        let input = InputSource::scripted("first  \nsecond\r\n");
        assert_eq!(input.read_line(), "first");
        assert_eq!(input.read_line(), "second");
        // End-of-input yields the empty string, not an error
        assert_eq!(input.read_line(), "");
        assert_eq!(input.read_line(), "");
    }

    #[test]
    fn scripted_final_line_without_newline() {
        let input = InputSource::scripted("only");
        assert_eq!(input.read_line(), "only");
        assert_eq!(input.read_line(), "");
    }

    #[test]
    fn memoize_consumes_the_stream_at_most_once() {
        let memo = Mutex::new(None);
        let pulls = std::cell::Cell::new(0_u32);

        let first = memoize(&memo, || {
            pulls.set(pulls.get().saturating_add(1));
            "stream".to_string()
        });
        assert_eq!(first, "stream");

        // The cache wins: the stream is never touched again
        let second = memoize(&memo, || unreachable!("stream already consumed"));
        assert_eq!(second, "stream");
        assert_eq!(pulls.get(), 1);
    }

    #[test]
    fn scripted_tty_flag() {
        assert!(!InputSource::scripted("").is_tty());
        assert!(InputSource::scripted_tty("").is_tty());
    }
}
