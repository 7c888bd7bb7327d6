//! Player guess validation, applied before anything reaches the oracle.

/// Longest guess the manor will consider.
pub const MAX_GUESS_CHARS: usize = 200;

/// Why a guess was turned away without consuming an attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("Guess is empty")]
    Empty,

    #[error("Guess is too long (maximum {max} characters)")]
    TooLong { max: usize },
}

impl GuessError {
    /// What Lady Black says when she turns the guess away.
    pub fn scolding(&self) -> &'static str {
        match self {
            GuessError::Empty => "  Speak up. The manor does not hear silence.",
            GuessError::TooLong { .. } => "  The manor will not hear a speech. Be brief.",
        }
    }
}

/// Trim a committed line and check it is a usable guess.
pub fn validate_guess(raw: &str) -> Result<String, GuessError> {
    let guess = raw.trim();
    if guess.is_empty() {
        return Err(GuessError::Empty);
    }
    if guess.chars().count() > MAX_GUESS_CHARS {
        return Err(GuessError::TooLong {
            max: MAX_GUESS_CHARS,
        });
    }
    Ok(guess.to_string())
}
