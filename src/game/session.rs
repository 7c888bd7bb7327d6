//! The phase runner. One [`Game`] owns one session: its terminal, its oracle
//! and the [`GameState`] record. Phases run strictly one after another; each
//! returns the step that follows it.

use log::{debug, info, warn};

use super::art;
use super::loading::{with_indicator, RIDDLE, VERDICT};
use super::script::*;
use super::state::{GameState, Phase};
use super::text::{gems_display, wrap_text};
use crate::logutil::escape_log;
use crate::oracle::{check_guess, HintRequest, Oracle};
use crate::stats;
use crate::terminal::{LineStyle, SurfaceResult, Terminal};
use crate::validation::validate_guess;

pub const DEFAULT_WRAP_WIDTH: usize = 58;

const WIDE_RULE: usize = 60;
const HINT_RULE: usize = 40;
const INDENT: &str = "  ";

/// How a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player declined another round after Win or Lose.
    Declined,
    /// The riddle could not be fetched. Nothing the player does will resume it.
    RiddleUnavailable,
}

enum Step {
    Advance(Phase),
    Stop(SessionEnd),
}

pub struct Game<T: Terminal> {
    term: T,
    oracle: Box<dyn Oracle>,
    state: GameState,
    wrap_width: usize,
}

impl<T: Terminal> Game<T> {
    pub fn new(term: T, oracle: Box<dyn Oracle>) -> Self {
        Game {
            term,
            oracle,
            state: GameState::new(),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }

    /// Widest riddle or hint line, two-space indent included.
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width.max(1);
        self
    }

    /// Start from `phase` instead of [`Phase::Boot`].
    pub fn starting_at(mut self, phase: Phase) -> Self {
        self.state.phase = phase;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn terminal(&self) -> &T {
        &self.term
    }

    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Drive phases until the session ends.
    pub async fn run(&mut self) -> anyhow::Result<SessionEnd> {
        loop {
            let phase = self.state.phase;
            debug!("entering phase {:?}", phase);
            let step = match phase {
                Phase::Boot => self.boot().await?,
                Phase::Midnight => self.midnight().await?,
                Phase::Appear => self.appear().await?,
                Phase::Question => self.question().await?,
                Phase::Guessing => self.guessing().await?,
                Phase::Win => self.win().await?,
                Phase::Lose => self.lose().await?,
                Phase::Restart => self.restart().await?,
                Phase::End => Step::Stop(SessionEnd::Declined),
            };
            match step {
                Step::Advance(next) => {
                    debug!("phase {:?} -> {:?}", phase, next);
                    self.state.phase = next;
                }
                Step::Stop(end) => {
                    info!("session ended in {:?}: {:?}", phase, end);
                    return Ok(end);
                }
            }
        }
    }

    async fn boot(&mut self) -> SurfaceResult<Step> {
        self.term.clear_screen()?;
        self.term.wait_ms(400).await;
        for line in BOOT_LINES {
            if line.is_empty() {
                self.term.print_blank()?;
                self.term.wait_ms(100).await;
            } else {
                self.term.type_line(line, LineStyle::System, 18).await?;
                self.term.wait_ms(40).await;
            }
        }
        self.term.wait_ms(600).await;
        Ok(Step::Advance(Phase::Midnight))
    }

    async fn midnight(&mut self) -> SurfaceResult<Step> {
        self.term.clear_screen()?;
        self.term.wait_ms(300).await;
        self.term.print_line(art::FRAME_TOP, LineStyle::Dim)?;
        self.term.print_blank()?;
        self.term.print_art(art::CLOCK_MIDNIGHT, LineStyle::Art, 25).await?;
        self.term.print_blank()?;
        self.term.print_line(art::FRAME_BOTTOM, LineStyle::Dim)?;
        self.term.wait_ms(800).await;

        for strike in 1..=BONG_COUNT {
            self.term
                .type_line(&bong_line(strike), LineStyle::System, 12)
                .await?;
            self.term.wait_ms(180).await;
        }
        self.term.wait_ms(500).await;
        Ok(Step::Advance(Phase::Appear))
    }

    async fn appear(&mut self) -> SurfaceResult<Step> {
        self.term.clear_screen()?;
        self.term.wait_ms(200).await;
        self.term.print_line(CHILL_LINE, LineStyle::System)?;
        self.term.wait_ms(400).await;
        self.term.print_line(CANDLES_LINE, LineStyle::System)?;
        self.term.wait_ms(500).await;
        self.term.print_blank()?;

        self.term
            .print_art(art::LADY_BLACK, LineStyle::ArtLady, 20)
            .await?;
        self.term.wait_ms(600).await;
        self.term.print_blank()?;
        self.term.divider('─', WIDE_RULE)?;
        self.term.print_blank()?;
        self.term
            .type_lines(INTRO_LINES, LineStyle::Lady, 22, 60)
            .await?;
        self.term.print_blank()?;
        self.term.divider('─', WIDE_RULE)?;
        self.term.wait_ms(600).await;
        Ok(Step::Advance(Phase::Question))
    }

    async fn question(&mut self) -> SurfaceResult<Step> {
        self.term.print_blank()?;
        self.term.print_line(PREPARING_LINE, LineStyle::Dim)?;
        let fetched =
            with_indicator(&mut self.term, &RIDDLE, self.oracle.generate_riddle()).await?;

        let riddle = match fetched {
            Ok(riddle) => riddle,
            Err(err) => {
                warn!("riddle generation failed: {}", err);
                stats::inc_riddle_failures();
                self.term
                    .print_line(&error_line(&err.to_string()), LineStyle::Error)?;
                self.term.print_line(SILENT_SPIRITS_LINE, LineStyle::System)?;
                return Ok(Step::Stop(SessionEnd::RiddleUnavailable));
            }
        };
        info!(
            "riddle fetched (theme: {}, category: {})",
            riddle.theme.as_deref().unwrap_or("-"),
            riddle.category.as_deref().unwrap_or("-")
        );
        stats::inc_riddles_served();
        self.state.begin_round(riddle);

        let lines = self.wrap_indented(&self.state.question);
        self.term.print_blank()?;
        self.term.divider('═', WIDE_RULE)?;
        self.term.print_blank()?;
        self.term
            .type_lines(&as_strs(&lines), LineStyle::Lady, 24, 50)
            .await?;
        self.term.print_blank()?;
        self.term.divider('═', WIDE_RULE)?;
        self.term.print_blank()?;
        if let Some(theme) = self.state.theme.clone() {
            self.term.print_line(&theme_line(&theme), LineStyle::Dim)?;
        }
        self.term.print_blank()?;
        Ok(Step::Advance(Phase::Guessing))
    }

    async fn guessing(&mut self) -> SurfaceResult<Step> {
        while !self.state.out_of_attempts() {
            self.term.print_line(ATTEMPTS_LABEL, LineStyle::Dim)?;
            self.term.print_line(
                &format!("  {}", gems_display(self.state.attempts_left)),
                LineStyle::Attempts,
            )?;
            self.term.print_blank()?;

            let raw = self.term.request_input("your answer...").await?;
            let guess = match validate_guess(&raw) {
                Ok(guess) => guess,
                Err(rejected) => {
                    debug!("guess rejected: {}", rejected);
                    self.term.print_line(rejected.scolding(), LineStyle::System)?;
                    self.term.print_blank()?;
                    continue;
                }
            };

            self.term.print_line("", LineStyle::Dim)?;
            let verdict = with_indicator(
                &mut self.term,
                &VERDICT,
                check_guess(self.oracle.as_ref(), &self.state.answer, &guess),
            )
            .await?;
            let correct = match verdict {
                Ok(correct) => correct,
                Err(err) => {
                    warn!("guess validation failed: {}", err);
                    stats::inc_validation_failures();
                    self.term
                        .print_line(&error_line(&err.to_string()), LineStyle::Error)?;
                    self.term.print_blank()?;
                    continue;
                }
            };
            debug!("guess '{}' judged correct={}", escape_log(&guess), correct);
            if correct {
                return Ok(Step::Advance(Phase::Win));
            }

            self.state.record_wrong_guess(guess);
            self.term.print_blank()?;
            self.term.print_line(INCORRECT_LINE, LineStyle::Error)?;
            self.term.print_blank()?;
            if self.state.out_of_attempts() {
                break;
            }

            self.term.print_line(NARROWS_LINE, LineStyle::Dim)?;
            self.term.wait_ms(600).await;
            let request = HintRequest {
                question: self.state.question.clone(),
                answer: self.state.answer.clone(),
                wrong_guesses: self.state.wrong_guesses.clone(),
                attempt_number: self.state.attempt_number(),
            };
            match self.oracle.fetch_hint(request).await {
                Ok(reply) => {
                    stats::inc_hints_shown();
                    self.show_hint(&reply.hint).await?;
                }
                // The wrong guess above stays counted.
                Err(err) => {
                    warn!("hint fetch failed: {}", err);
                    stats::inc_hint_failures();
                    self.term
                        .print_line(&error_line(&err.to_string()), LineStyle::Error)?;
                    self.term.print_blank()?;
                }
            }
        }
        Ok(Step::Advance(Phase::Lose))
    }

    async fn show_hint(&mut self, hint: &str) -> SurfaceResult<()> {
        let lines = self.wrap_indented(&format!("\"{}\"", hint.trim()));
        self.term.print_blank()?;
        self.term.divider('·', HINT_RULE)?;
        self.term
            .type_lines(&as_strs(&lines), LineStyle::Lady, 20, 40)
            .await?;
        self.term.divider('·', HINT_RULE)?;
        self.term.print_blank()
    }

    async fn win(&mut self) -> SurfaceResult<Step> {
        stats::inc_wins();
        info!(
            "riddle solved with {} wrong guesses",
            self.state.wrong_guesses.len()
        );
        self.term.clear_screen()?;
        self.term.wait_ms(300).await;
        let lines = win_lines(&self.state.answer);
        self.closing(art::WIN_BANNER, LineStyle::Win, &lines, LineStyle::Lady)
            .await?;
        Ok(Step::Advance(Phase::Restart))
    }

    async fn lose(&mut self) -> SurfaceResult<Step> {
        stats::inc_losses();
        info!(
            "riddle lost after {} wrong guesses",
            self.state.wrong_guesses.len()
        );
        self.term.clear_screen()?;
        self.term.wait_ms(400).await;
        let lines = lose_lines(&self.state.answer);
        self.closing(art::LOSE_BANNER, LineStyle::Error, &lines, LineStyle::Error)
            .await?;
        Ok(Step::Advance(Phase::Restart))
    }

    /// Banner, framed narration and closing rule shared by Win and Lose.
    async fn closing(
        &mut self,
        banner: &str,
        banner_style: LineStyle,
        lines: &[String],
        style: LineStyle,
    ) -> SurfaceResult<()> {
        self.term.print_blank()?;
        self.term.print_art(banner, banner_style, 40).await?;
        self.term.print_blank()?;
        self.term.divider('═', WIDE_RULE)?;
        self.term.print_blank()?;
        self.term.type_lines(&as_strs(lines), style, 22, 60).await?;
        self.term.print_blank()?;
        self.term.divider('─', WIDE_RULE)?;
        self.term.print_blank()
    }

    async fn restart(&mut self) -> SurfaceResult<Step> {
        self.term
            .type_line(PLAY_AGAIN_LINE, LineStyle::System, 28)
            .await?;
        self.term.print_blank()?;
        let answer = self.term.request_input("y or n").await?;

        if wants_replay(&answer) {
            self.state = GameState::replay();
            self.term.clear_screen()?;
            self.term.wait_ms(300).await;
            self.term
                .type_lines(REMATERIALISE_LINES, LineStyle::Lady, 22, 60)
                .await?;
            self.term.print_blank()?;
            return Ok(Step::Advance(Phase::Question));
        }

        self.term.clear_screen()?;
        self.term.print_blank()?;
        self.term.print_blank()?;
        self.term
            .type_lines(FAREWELL_LINES, LineStyle::Dim, 30, 80)
            .await?;
        self.term.print_blank()?;
        Ok(Step::Advance(Phase::End))
    }

    /// Wrap `text` so that, with its two-space indent, no line is wider
    /// than the wrap width.
    fn wrap_indented(&self, text: &str) -> Vec<String> {
        let width = self.wrap_width.saturating_sub(INDENT.len()).max(1);
        wrap_text(text, width)
            .into_iter()
            .map(|line| format!("{}{}", INDENT, line))
            .collect()
    }
}

fn as_strs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{HintResponse, OracleError, Riddle, ValidateRequest, ValidateResponse};
    use crate::terminal::RecordingTerminal;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::time::Instant;

    struct Mute;

    #[async_trait]
    impl Oracle for Mute {
        async fn generate_riddle(&self) -> Result<Riddle, OracleError> {
            Err(OracleError::Malformed("mute".into()))
        }

        async fn fetch_hint(&self, _: HintRequest) -> Result<HintResponse, OracleError> {
            Err(OracleError::Malformed("mute".into()))
        }

        async fn validate_guess(
            &self,
            _: ValidateRequest,
        ) -> Result<ValidateResponse, OracleError> {
            Err(OracleError::Malformed("mute".into()))
        }
    }

    fn game() -> Game<RecordingTerminal> {
        Game::new(RecordingTerminal::new(), Box::new(Mute))
    }

    fn typed_ms(lines: &[&str], char_ms: u64, line_ms: u64) -> u64 {
        lines
            .iter()
            .map(|line| line.chars().count() as u64 * char_ms + line_ms)
            .sum()
    }

    #[tokio::test(start_paused = true)]
    async fn boot_pacing() {
        let mut game = game();
        let started = Instant::now();
        game.boot().await.unwrap();

        let lines: u64 = BOOT_LINES
            .iter()
            .map(|line| match line.chars().count() as u64 {
                0 => 100,
                n => n * 18 + 40,
            })
            .sum();
        assert_eq!(started.elapsed(), Duration::from_millis(400 + lines + 600));
        assert_eq!(game.terminal().clears(), 1);
        assert_eq!(
            game.terminal().lines_styled(LineStyle::System)[0],
            BOOT_LINES[0]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn appear_pacing() {
        let mut game = game();
        let started = Instant::now();
        game.appear().await.unwrap();

        let art_lines = art::LADY_BLACK.split('\n').count() as u64;
        let expected =
            200 + 400 + 500 + art_lines * 20 + 600 + typed_ms(INTRO_LINES, 22, 60) + 600;
        assert_eq!(started.elapsed(), Duration::from_millis(expected));

        let term = game.terminal();
        assert_eq!(
            term.lines_styled(LineStyle::System),
            vec![CHILL_LINE, CANDLES_LINE]
        );
        assert_eq!(term.lines_styled(LineStyle::Divider).len(), 2);
    }

    #[test]
    fn indented_lines_fit_the_wrap_width() {
        let game = game().with_wrap_width(20);
        let lines = game.wrap_indented("What walks the halls at midnight yet leaves no print?");
        assert!(lines.iter().all(|line| line.starts_with("  ")));
        assert!(lines.iter().all(|line| line.chars().count() <= 20));
        assert_eq!(lines[0], "  What walks the");
    }
}
