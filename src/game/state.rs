use crate::oracle::Riddle;

/// Wrong guesses allowed per riddle.
pub const MAX_ATTEMPTS: u32 = 5;

/// Step of the game state machine.
///
/// ```text
/// Boot -> Midnight -> Appear -> Question -> Guessing -> {Win, Lose} -> Restart -> {Question, End}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Boot,
    Midnight,
    Appear,
    Question,
    Guessing,
    Win,
    Lose,
    Restart,
    /// The player declined another round; nothing follows.
    End,
}

/// Everything the state machine knows about the current round.
///
/// `question`, `answer`, `theme` and `category` are only meaningful once a
/// riddle has been fetched; `answer` is never shown before Win or Lose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub question: String,
    pub answer: String,
    pub theme: Option<String>,
    pub category: Option<String>,
    pub attempts_left: u32,
    pub wrong_guesses: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh state for a new session, starting at [`Phase::Boot`].
    pub fn new() -> Self {
        GameState {
            phase: Phase::Boot,
            question: String::new(),
            answer: String::new(),
            theme: None,
            category: None,
            attempts_left: MAX_ATTEMPTS,
            wrong_guesses: Vec::new(),
        }
    }

    /// Fresh state after "play again": same as [`GameState::new`] but
    /// re-seeded at [`Phase::Question`].
    pub fn replay() -> Self {
        GameState {
            phase: Phase::Question,
            ..GameState::new()
        }
    }

    /// Install a freshly fetched riddle and reset the attempt budget.
    pub fn begin_round(&mut self, riddle: Riddle) {
        self.question = riddle.question;
        self.answer = riddle.answer;
        self.theme = riddle.theme;
        self.category = riddle.category;
        self.attempts_left = MAX_ATTEMPTS;
        self.wrong_guesses.clear();
    }

    /// Consume one attempt for a wrong guess; returns the attempts left.
    pub fn record_wrong_guess(&mut self, guess: String) -> u32 {
        self.attempts_left = self.attempts_left.saturating_sub(1);
        self.wrong_guesses.push(guess);
        self.attempts_left
    }

    /// 1-based count of attempts used so far.
    pub fn attempt_number(&self) -> u32 {
        MAX_ATTEMPTS - self.attempts_left.min(MAX_ATTEMPTS)
    }

    pub fn out_of_attempts(&self) -> bool {
        self.attempts_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piano() -> Riddle {
        Riddle {
            question: "What has keys but no locks?".into(),
            answer: "piano".into(),
            theme: Some("music".into()),
            category: None,
        }
    }

    #[test]
    fn new_state_starts_at_boot_with_full_attempts() {
        let state = GameState::new();
        assert_eq!(state.phase, Phase::Boot);
        assert_eq!(state.attempts_left, MAX_ATTEMPTS);
        assert!(state.wrong_guesses.is_empty());
        assert!(state.answer.is_empty());
    }

    #[test]
    fn replay_reseeds_question_phase() {
        let state = GameState::replay();
        assert_eq!(state.phase, Phase::Question);
        assert_eq!(state.attempts_left, MAX_ATTEMPTS);
    }

    #[test]
    fn begin_round_resets_attempts() {
        let mut state = GameState::replay();
        state.record_wrong_guess("organ".into());
        state.begin_round(piano());
        assert_eq!(state.answer, "piano");
        assert_eq!(state.theme.as_deref(), Some("music"));
        assert_eq!(state.attempts_left, MAX_ATTEMPTS);
        assert!(state.wrong_guesses.is_empty());
    }

    #[test]
    fn wrong_guesses_count_down_and_never_underflow() {
        let mut state = GameState::replay();
        state.begin_round(piano());
        for n in 1..=MAX_ATTEMPTS {
            let left = state.record_wrong_guess(format!("guess {}", n));
            assert_eq!(left, MAX_ATTEMPTS - n);
            assert_eq!(state.attempt_number(), n);
        }
        assert!(state.out_of_attempts());
        assert_eq!(state.record_wrong_guess("one more".into()), 0);
        assert_eq!(state.attempt_number(), MAX_ATTEMPTS);
    }
}
