//! # Oracle: the riddle, hint and judgement backend
//!
//! Lady Black's riddles, hints and verdicts come from a language model. The
//! game only sees the three operations of the [`Oracle`] trait; which service
//! answers them is a configuration choice.
//!
//! - [`http`] - JSON RPC against a riddle server exposing `/api/question`,
//!   `/api/hint` and `/api/validate`
//! - [`claude`] - talks to the Anthropic Messages API directly
//! - [`prompts`] - persona, riddle, hint and judge prompts plus the
//!   crypticity schedule
//!
//! Guesses that match the answer exactly (ignoring case and surrounding
//! whitespace) never reach a backend; see [`check_guess`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod claude;
pub mod http;
pub mod prompts;

pub use claude::ClaudeOracle;
pub use http::HttpOracle;

use crate::config::{OracleBackend, OracleConfig};

/// Failures of the three oracle operations.
///
/// The `Display` text is what the player sees inside the error line, so it
/// stays short and free of structured codes.
#[derive(Debug, Error)]
pub enum OracleError {
    /// A required credential (API key) is absent.
    #[error("{0} is not configured")]
    MissingCredential(String),

    /// The service answered, but not with something the game can use.
    #[error("{0}")]
    Malformed(String),

    /// Network or HTTP client failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Failed to {operation}: {status} - {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A playable riddle. `question` and `answer` are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Riddle {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Riddle as it arrives on the wire, before the mandatory fields are checked.
#[derive(Debug, Default, Deserialize)]
struct RiddlePayload {
    question: Option<String>,
    answer: Option<String>,
    theme: Option<String>,
    category: Option<String>,
}

impl TryFrom<RiddlePayload> for Riddle {
    type Error = OracleError;

    fn try_from(payload: RiddlePayload) -> Result<Self, Self::Error> {
        let question = non_empty(payload.question)
            .ok_or_else(|| OracleError::Malformed("Riddle has no question".to_string()))?;
        let answer = non_empty(payload.answer)
            .ok_or_else(|| OracleError::Malformed("Riddle has no answer".to_string()))?;
        Ok(Riddle {
            question,
            answer,
            theme: non_empty(payload.theme),
            category: non_empty(payload.category),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub question: String,
    pub answer: String,
    pub wrong_guesses: Vec<String>,
    pub attempt_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub answer: String,
    pub player_guess: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub correct: bool,
}

/// The three content operations the game depends on.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate_riddle(&self) -> Result<Riddle, OracleError>;

    async fn fetch_hint(&self, request: HintRequest) -> Result<HintResponse, OracleError>;

    async fn validate_guess(
        &self,
        request: ValidateRequest,
    ) -> Result<ValidateResponse, OracleError>;
}

/// Build the backend selected in `config`.
pub fn from_config(config: &OracleConfig) -> Result<Box<dyn Oracle>, OracleError> {
    Ok(match config.backend {
        OracleBackend::Http => Box::new(HttpOracle::new(config)?),
        OracleBackend::Anthropic => Box::new(ClaudeOracle::new(config)?),
    })
}

/// Case-insensitive comparison of trimmed answer and guess.
pub fn is_exact_match(answer: &str, guess: &str) -> bool {
    answer.trim().to_lowercase() == guess.trim().to_lowercase()
}

/// Judge a guess: exact matches are accepted locally, anything else goes to
/// the oracle's fuzzy validation.
pub async fn check_guess(
    oracle: &dyn Oracle,
    answer: &str,
    guess: &str,
) -> Result<bool, OracleError> {
    if is_exact_match(answer, guess) {
        return Ok(true);
    }
    let verdict = oracle
        .validate_guess(ValidateRequest {
            answer: answer.to_string(),
            player_guess: guess.to_string(),
        })
        .await?;
    Ok(verdict.correct)
}

/// The span from the first `{` to the last `}` of a model reply, which may
/// be wrapped in prose or code fences.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse a riddle out of a raw reply body.
pub fn parse_riddle(raw: &str) -> Result<Riddle, OracleError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| OracleError::Malformed("No JSON found in model response".to_string()))?;
    let payload: RiddlePayload = serde_json::from_str(json)?;
    Riddle::try_from(payload)
}
