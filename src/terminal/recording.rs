//! Headless surface: records every line and answers input requests from a script.

use super::{LineId, LineStyle, SurfaceError, SurfaceResult, Terminal};
use async_trait::async_trait;
use std::collections::VecDeque;

/// One line as it finally appeared, after any in-place rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLine {
    pub text: String,
    pub style: LineStyle,
}

/// A [`Terminal`] that keeps everything in memory.
///
/// `transcript` survives [`Terminal::clear_screen`]; `screen` only holds what
/// has been printed since the last clear. When the input script runs dry,
/// [`Terminal::request_input`] fails with [`SurfaceError::InputClosed`].
#[derive(Debug, Default)]
pub struct RecordingTerminal {
    history: Vec<RecordedLine>,
    // Indexes into `history` for the lines currently on screen.
    screen: Vec<usize>,
    script: VecDeque<String>,
    prompts: Vec<String>,
    clears: usize,
    pacing: Option<f64>,
}

impl RecordingTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a recorder that will answer input requests with `inputs`, in order.
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_pacing(mut self, pacing: f64) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Text of the lines printed since the last clear.
    pub fn screen(&self) -> Vec<&str> {
        self.screen
            .iter()
            .map(|&idx| self.history[idx].text.as_str())
            .collect()
    }

    /// Every line printed during the session, across clears.
    pub fn transcript(&self) -> &[RecordedLine] {
        &self.history
    }

    pub fn transcript_text(&self) -> String {
        self.history
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.history.iter().any(|line| line.text.contains(needle))
    }

    /// Lines with the given style, in print order.
    pub fn lines_styled(&self, style: LineStyle) -> Vec<&str> {
        self.history
            .iter()
            .filter(|line| line.style == style)
            .map(|line| line.text.as_str())
            .collect()
    }

    /// Placeholders of every input request made so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn remaining_inputs(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl Terminal for RecordingTerminal {
    fn print_line(&mut self, text: &str, style: LineStyle) -> SurfaceResult<LineId> {
        self.history.push(RecordedLine {
            text: text.to_string(),
            style,
        });
        self.screen.push(self.history.len() - 1);
        Ok(LineId(self.screen.len() - 1))
    }

    fn rewrite_line(&mut self, id: LineId, text: &str) -> SurfaceResult<()> {
        if let Some(&idx) = self.screen.get(id.0) {
            self.history[idx].text = text.to_string();
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> SurfaceResult<()> {
        self.screen.clear();
        self.clears += 1;
        Ok(())
    }

    async fn request_input(&mut self, placeholder: &str) -> SurfaceResult<String> {
        self.prompts.push(placeholder.to_string());
        let raw = self.script.pop_front().ok_or(SurfaceError::InputClosed)?;
        let committed = raw.trim().to_string();
        self.print_line(&format!("> {}", committed), LineStyle::Bright)?;
        Ok(committed)
    }

    fn pacing(&self) -> f64 {
        self.pacing.unwrap_or(1.0)
    }
}
