//! Direct Anthropic Messages API backend.
//!
//! Plays the part of the riddle server in-process: builds the persona
//! prompts, pulls the riddle JSON out of the model's reply and falls back to
//! an exact comparison when the judge model cannot be reached.

use super::prompts;
use super::{
    is_exact_match, parse_riddle, HintRequest, HintResponse, Oracle, OracleError, Riddle,
    ValidateRequest, ValidateResponse,
};
use crate::config::OracleConfig;
use crate::logutil::escape_log;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

pub struct ClaudeOracle {
    client: reqwest::Client,
    config: OracleConfig,
    api_key: Option<String>,
}

impl ClaudeOracle {
    /// Reads the API key from the environment variable named in `config`.
    ///
    /// A missing key is not an error here; each operation reports it instead.
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
            api_key,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    fn api_key(&self) -> Result<&str, OracleError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| OracleError::MissingCredential(self.config.api_key_env.clone()))
    }

    /// One system + user exchange; returns the trimmed text of the reply.
    async fn complete(
        &self,
        operation: &'static str,
        model: &str,
        max_tokens: u32,
        system: &str,
        user: &str,
    ) -> Result<String, OracleError> {
        let api_key = self.api_key()?;
        let body = serde_json::json!({
            "model": model,
            "max_tokens": max_tokens,
            "system": system,
            "messages": [{ "role": "user", "content": user }],
        });

        debug!("{}: asking {}", operation, model);
        let response = self
            .client
            .post(&self.config.anthropic_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("{}: model API returned {}: {}", operation, status, escape_log(&text));
            return Err(OracleError::Status {
                operation,
                status: status.as_u16(),
                body: text,
            });
        }

        reply_text(&text)
    }
}

/// Text of the first text block of a Messages API reply.
fn reply_text(body: &str) -> Result<String, OracleError> {
    let parsed: MessagesResponse = serde_json::from_str(body)?;
    parsed
        .content
        .into_iter()
        .find_map(|block| block.text)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| OracleError::Malformed("Model reply contained no text".to_string()))
}

#[async_trait]
impl Oracle for ClaudeOracle {
    async fn generate_riddle(&self) -> Result<Riddle, OracleError> {
        let reply = self
            .complete(
                "fetch question",
                &self.config.riddle_model,
                512,
                &prompts::riddle_system(),
                prompts::RIDDLE_USER,
            )
            .await?;
        debug!("riddle reply: {}", escape_log(&reply));
        parse_riddle(&reply)
    }

    async fn fetch_hint(&self, request: HintRequest) -> Result<HintResponse, OracleError> {
        if request.question.trim().is_empty() || request.answer.trim().is_empty() {
            return Err(OracleError::Malformed(
                "Missing question or answer".to_string(),
            ));
        }
        let system = prompts::hint_system(
            &request.question,
            &request.answer,
            &request.wrong_guesses,
            request.attempt_number,
        );
        let hint = self
            .complete(
                "fetch hint",
                &self.config.hint_model,
                200,
                &system,
                prompts::HINT_USER,
            )
            .await?;
        Ok(HintResponse { hint })
    }

    async fn validate_guess(
        &self,
        request: ValidateRequest,
    ) -> Result<ValidateResponse, OracleError> {
        if request.answer.trim().is_empty() || request.player_guess.trim().is_empty() {
            return Err(OracleError::Malformed(
                "Missing answer or playerGuess".to_string(),
            ));
        }
        let exact = is_exact_match(&request.answer, &request.player_guess);
        if exact {
            return Ok(ValidateResponse { correct: true });
        }

        let system = prompts::judge_system(&request.answer, &request.player_guess);
        match self
            .complete(
                "validate guess",
                &self.config.judge_model,
                64,
                &system,
                prompts::JUDGE_USER,
            )
            .await
        {
            Ok(reply) => Ok(ValidateResponse {
                correct: prompts::parse_verdict(&reply),
            }),
            Err(e) => {
                warn!("judge unavailable, falling back to exact match: {}", e);
                Ok(ValidateResponse { correct: exact })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless() -> ClaudeOracle {
        ClaudeOracle::new(&OracleConfig::default())
            .unwrap()
            .with_api_key(None)
    }

    #[tokio::test]
    async fn missing_key_fails_riddle_generation() {
        let err = keyless().generate_riddle().await.unwrap_err();
        assert!(matches!(err, OracleError::MissingCredential(_)));
        assert_eq!(err.to_string(), "ANTHROPIC_API_KEY is not configured");
    }

    #[tokio::test]
    async fn missing_key_fails_hints() {
        let err = keyless()
            .fetch_hint(HintRequest {
                question: "What has keys but no locks?".into(),
                answer: "piano".into(),
                wrong_guesses: vec!["organ".into()],
                attempt_number: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, OracleError::MissingCredential(_)));
    }

    #[tokio::test]
    async fn hint_requires_question_and_answer() {
        let err = keyless()
            .fetch_hint(HintRequest {
                question: "".into(),
                answer: "piano".into(),
                wrong_guesses: vec![],
                attempt_number: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing question or answer");
    }

    #[tokio::test]
    async fn judge_short_circuits_exact_match() {
        let verdict = keyless()
            .validate_guess(ValidateRequest {
                answer: "Piano".into(),
                player_guess: " piano ".into(),
            })
            .await
            .unwrap();
        assert!(verdict.correct);
    }

    #[tokio::test]
    async fn unreachable_judge_falls_back_to_exact_match() {
        let verdict = keyless()
            .validate_guess(ValidateRequest {
                answer: "piano".into(),
                player_guess: "pianoforte".into(),
            })
            .await
            .unwrap();
        assert!(!verdict.correct);
    }

    #[test]
    fn reply_text_takes_first_text_block() {
        let body = r#"{"id":"msg_1","content":[{"type":"text","text":"  CORRECT \n"}]}"#;
        assert_eq!(reply_text(body).unwrap(), "CORRECT");
        let empty = r#"{"content":[]}"#;
        assert!(matches!(
            reply_text(empty).unwrap_err(),
            OracleError::Malformed(_)
        ));
    }
}
