//! ANSI console surface.
//!
//! The cursor is parked at the end of the most recent line instead of on a
//! fresh one, so the last line can be rewritten in place with a carriage
//! return and a line clear. That is all the typewriter and the loading
//! indicator need.

use super::{LineId, LineStyle, SurfaceError, SurfaceResult, Terminal};
use async_trait::async_trait;
use crossterm::cursor::{MoveTo, MoveToColumn, MoveToPreviousLine};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use log::debug;
use std::io::{Stdout, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::time::timeout;

/// How long stdin must stay quiet before a prompt is drawn.
const DRAIN_WINDOW: Duration = Duration::from_millis(15);

/// Colour and boldness for each line style.
fn palette(style: LineStyle) -> Option<(Color, bool)> {
    match style {
        LineStyle::Plain => None,
        LineStyle::System => Some((Color::Green, false)),
        LineStyle::Dim | LineStyle::Divider => Some((Color::DarkGrey, false)),
        LineStyle::Art => Some((Color::Grey, false)),
        LineStyle::ArtLady => Some((Color::Magenta, false)),
        LineStyle::Lady => Some((Color::White, false)),
        LineStyle::Error => Some((Color::Red, false)),
        LineStyle::Win => Some((Color::Yellow, true)),
        LineStyle::Bright => Some((Color::Cyan, true)),
        LineStyle::Attempts => Some((Color::DarkMagenta, true)),
    }
}

pub struct ConsoleTerminal<R, W> {
    input: R,
    out: W,
    color: bool,
    // True when the tty echoes typed input, which then has to be replaced.
    interactive: bool,
    pacing: f64,
    printed: usize,
    last_style: LineStyle,
}

impl ConsoleTerminal<BufReader<Stdin>, Stdout> {
    /// Console bound to the process stdin/stdout.
    pub fn stdio(color: bool, pacing: f64) -> Self {
        let interactive = atty::is(atty::Stream::Stdin);
        let color = color && atty::is(atty::Stream::Stdout);
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stdout(), pacing)
            .with_color(color)
            .interactive(interactive)
    }
}

impl<R, W> ConsoleTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, out: W, pacing: f64) -> Self {
        Self {
            input,
            out,
            color: false,
            interactive: false,
            pacing,
            printed: 0,
            last_style: LineStyle::Plain,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Drop whatever the player typed before the prompt appeared.
    ///
    /// Reads until the input has been quiet for [`DRAIN_WINDOW`]. Returns the
    /// number of bytes thrown away.
    async fn discard_typeahead(&mut self) -> SurfaceResult<usize> {
        let mut dropped = 0;
        loop {
            let available = match timeout(DRAIN_WINDOW, self.input.fill_buf()).await {
                Ok(Ok(buf)) => buf.len(),
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => 0,
            };
            if available == 0 {
                break;
            }
            self.input.consume(available);
            dropped += available;
        }
        Ok(dropped)
    }

    fn begin_line(&mut self) -> std::io::Result<()> {
        if self.printed > 0 {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_styled(&mut self, text: &str, style: LineStyle) -> std::io::Result<()> {
        match palette(style).filter(|_| self.color) {
            Some((color, bold)) => {
                queue!(self.out, SetForegroundColor(color))?;
                if bold {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                queue!(
                    self.out,
                    Print(text),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            }
            None => queue!(self.out, Print(text))?,
        }
        Ok(())
    }
}

#[async_trait]
impl<R, W> Terminal for ConsoleTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn print_line(&mut self, text: &str, style: LineStyle) -> SurfaceResult<LineId> {
        self.begin_line()?;
        self.write_styled(text, style)?;
        self.out.flush()?;
        self.printed += 1;
        self.last_style = style;
        Ok(LineId(self.printed - 1))
    }

    fn rewrite_line(&mut self, id: LineId, text: &str) -> SurfaceResult<()> {
        if id.0 + 1 != self.printed {
            debug!(
                "console skips rewrite of line {} (cursor is on line {})",
                id.0,
                self.printed.saturating_sub(1)
            );
            return Ok(());
        }
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.write_styled(text, self.last_style)?;
        self.out.flush()?;
        Ok(())
    }

    fn clear_screen(&mut self) -> SurfaceResult<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()?;
        self.printed = 0;
        Ok(())
    }

    async fn request_input(&mut self, placeholder: &str) -> SurfaceResult<String> {
        // Keys pressed during narration must not answer the prompt.
        if self.interactive {
            let dropped = self.discard_typeahead().await?;
            if dropped > 0 {
                debug!("console dropped {} bytes of typeahead", dropped);
            }
        }
        self.begin_line()?;
        self.write_styled(&format!("  [{}] > ", placeholder), LineStyle::Dim)?;
        self.out.flush()?;

        let mut raw = String::new();
        if self.input.read_line(&mut raw).await? == 0 {
            return Err(SurfaceError::InputClosed);
        }
        let committed = raw.trim().to_string();

        // The prompt row becomes the echo row.
        if self.interactive {
            queue!(self.out, MoveToPreviousLine(1))?;
        } else {
            queue!(self.out, MoveToColumn(0))?;
        }
        queue!(self.out, Clear(ClearType::CurrentLine))?;
        self.write_styled(&format!("> {}", committed), LineStyle::Bright)?;
        self.out.flush()?;
        self.printed += 1;
        self.last_style = LineStyle::Bright;
        Ok(committed)
    }

    fn pacing(&self) -> f64 {
        self.pacing
    }
}
