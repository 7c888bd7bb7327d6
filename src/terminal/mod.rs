//! # Output/Input Surface
//!
//! Every line the game shows and every line the player types goes through a
//! [`Terminal`]. Phases never touch stdout directly, which gives the session a
//! single, well-defined append order and lets the state machine run headless
//! under test.
//!
//! ## Components
//!
//! - [`console`] - ANSI console surface used by the `ladyblack` binary
//! - [`recording`] - headless surface that records lines and replays scripted input
//!
//! ## Primitives and effects
//!
//! Implementors provide four primitives: [`Terminal::print_line`],
//! [`Terminal::rewrite_line`], [`Terminal::clear_screen`] and
//! [`Terminal::request_input`]. The timed effects (typewriter reveal, art
//! rendering, dividers, pauses) are provided on top of them, so every surface
//! paces text identically.
//!
//! ```rust,no_run
//! use ladyblack::terminal::{LineStyle, RecordingTerminal, Terminal};
//!
//! # async fn demo() -> Result<(), ladyblack::terminal::SurfaceError> {
//! let mut term = RecordingTerminal::with_inputs(["piano"]);
//! term.type_line("  Tell me, traveller...", LineStyle::Lady, 22).await?;
//! let guess = term.request_input("your answer...").await?;
//! assert_eq!(guess, "piano");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod console;
pub mod recording;

pub use console::ConsoleTerminal;
pub use recording::{RecordedLine, RecordingTerminal};

/// Errors raised by an output/input surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Writing to or reading from the underlying stream failed.
    #[error("terminal io error: {0}")]
    Io(#[from] std::io::Error),

    /// The player's input stream ended while a phase was waiting for a line.
    #[error("input closed")]
    InputClosed,
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Visual class of a printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Plain,
    System,
    Dim,
    Art,
    ArtLady,
    Lady,
    Error,
    Win,
    Bright,
    Divider,
    Attempts,
}

/// Position of a line on the current screen, counted from the last clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

#[async_trait]
pub trait Terminal: Send {
    /// Append one line instantly.
    fn print_line(&mut self, text: &str, style: LineStyle) -> SurfaceResult<LineId>;

    /// Replace the text of an already printed line, keeping its style.
    fn rewrite_line(&mut self, id: LineId, text: &str) -> SurfaceResult<()>;

    /// Discard everything printed so far. Clearing an empty screen is a no-op.
    fn clear_screen(&mut self) -> SurfaceResult<()>;

    /// Show the input prompt and suspend until the player commits a line.
    ///
    /// The committed text is trimmed, echoed as its own `> text` line and
    /// returned. Each call owns its read; nothing lingers between calls.
    async fn request_input(&mut self, placeholder: &str) -> SurfaceResult<String>;

    /// Multiplier applied to every delay. `0.0` renders instantly.
    fn pacing(&self) -> f64 {
        1.0
    }

    fn print_blank(&mut self) -> SurfaceResult<()> {
        self.print_line("", LineStyle::Plain).map(|_| ())
    }

    fn divider(&mut self, ch: char, len: usize) -> SurfaceResult<()> {
        let rule: String = std::iter::repeat(ch).take(len).collect();
        self.print_line(&rule, LineStyle::Divider).map(|_| ())
    }

    /// Pure suspension, scaled by [`Terminal::pacing`].
    async fn wait_ms(&mut self, ms: u64) {
        let scaled = (ms as f64 * self.pacing().max(0.0)).round() as u64;
        if scaled > 0 {
            tokio::time::sleep(Duration::from_millis(scaled)).await;
        }
    }

    /// Reveal `text` one character at a time, pausing `char_delay_ms` after each.
    ///
    /// An empty string yields an empty line and resolves immediately.
    async fn type_line(
        &mut self,
        text: &str,
        style: LineStyle,
        char_delay_ms: u64,
    ) -> SurfaceResult<()> {
        let id = self.print_line("", style)?;
        let mut shown = String::with_capacity(text.len());
        for ch in text.chars() {
            shown.push(ch);
            self.rewrite_line(id, &shown)?;
            self.wait_ms(char_delay_ms).await;
        }
        Ok(())
    }

    /// Typewrite each line in order, pausing `line_delay_ms` after every line.
    async fn type_lines(
        &mut self,
        lines: &[&str],
        style: LineStyle,
        char_delay_ms: u64,
        line_delay_ms: u64,
    ) -> SurfaceResult<()> {
        for line in lines {
            self.type_line(line, style, char_delay_ms).await?;
            self.wait_ms(line_delay_ms).await;
        }
        Ok(())
    }

    /// Print a multi-line block one line at a time, `line_delay_ms` apart.
    async fn print_art(
        &mut self,
        art: &str,
        style: LineStyle,
        line_delay_ms: u64,
    ) -> SurfaceResult<()> {
        for line in art.split('\n') {
            self.print_line(line, style)?;
            self.wait_ms(line_delay_ms).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn type_line_paces_each_character() {
        let mut term = RecordingTerminal::new();
        let started = Instant::now();
        term.type_line("BONG", LineStyle::System, 12).await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(48));
        assert_eq!(term.screen(), vec!["BONG"]);
    }

    #[tokio::test(start_paused = true)]
    async fn type_line_accepts_empty_text() {
        let mut term = RecordingTerminal::new();
        let started = Instant::now();
        term.type_line("", LineStyle::Lady, 22).await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(term.screen(), vec![""]);
    }

    #[tokio::test(start_paused = true)]
    async fn type_lines_keeps_order_and_line_delay() {
        let mut term = RecordingTerminal::new();
        let started = Instant::now();
        term.type_lines(&["ab", "", "c"], LineStyle::Lady, 10, 60)
            .await
            .unwrap();
        // 3 characters at 10ms plus three 60ms line pauses
        assert_eq!(started.elapsed(), Duration::from_millis(210));
        assert_eq!(term.screen(), vec!["ab", "", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn print_art_splits_on_newlines() {
        let mut term = RecordingTerminal::new();
        let started = Instant::now();
        term.print_art("\n /\\\n \\/", LineStyle::Art, 25).await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(75));
        assert_eq!(term.screen(), vec!["", " /\\", " \\/"]);
        assert!(term.transcript().iter().all(|l| l.style == LineStyle::Art));
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_zero_is_instant() {
        let mut term = RecordingTerminal::new().with_pacing(0.0);
        let started = Instant::now();
        term.type_line("no waiting here", LineStyle::Dim, 500).await.unwrap();
        term.wait_ms(10_000).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn divider_repeats_character() {
        let mut term = RecordingTerminal::new();
        term.divider('═', 6).unwrap();
        term.print_blank().unwrap();
        assert_eq!(term.screen(), vec!["══════", ""]);
        assert_eq!(term.transcript()[0].style, LineStyle::Divider);
    }
}
