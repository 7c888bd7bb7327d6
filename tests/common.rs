//! Test utilities: a scripted oracle and a headless game builder.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ladyblack::game::Game;
use ladyblack::oracle::{
    HintRequest, HintResponse, Oracle, OracleError, Riddle, ValidateRequest, ValidateResponse,
};
use ladyblack::terminal::RecordingTerminal;

/// One call the game made against the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Riddle,
    Hint(HintRequest),
    Validate(ValidateRequest),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Oracle answering from queues filled by the test. Every call is logged.
///
/// Running out of scripted riddles or verdicts is an error; running out of
/// hints yields a stock hint.
#[derive(Default)]
pub struct ScriptedOracle {
    riddles: Mutex<VecDeque<Result<Riddle, String>>>,
    verdicts: Mutex<VecDeque<Result<bool, String>>>,
    hints: Mutex<VecDeque<Result<String, String>>>,
    log: CallLog,
}

#[allow(dead_code)]
impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn riddle(self, question: &str, answer: &str, theme: Option<&str>) -> Self {
        self.riddles.lock().unwrap().push_back(Ok(Riddle {
            question: question.to_string(),
            answer: answer.to_string(),
            theme: theme.map(str::to_string),
            category: None,
        }));
        self
    }

    pub fn riddle_failure(self, message: &str) -> Self {
        self.riddles
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn verdict(self, correct: bool) -> Self {
        self.verdicts.lock().unwrap().push_back(Ok(correct));
        self
    }

    pub fn verdict_failure(self, message: &str) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn hint(self, text: &str) -> Self {
        self.hints.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn hint_failure(self, message: &str) -> Self {
        self.hints
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// Handle on the call log that stays valid after the oracle is boxed.
    pub fn calls(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate_riddle(&self) -> Result<Riddle, OracleError> {
        self.log.lock().unwrap().push(Call::Riddle);
        match self.riddles.lock().unwrap().pop_front() {
            Some(Ok(riddle)) => Ok(riddle),
            Some(Err(message)) => Err(OracleError::Malformed(message)),
            None => Err(OracleError::Malformed("no riddle scripted".into())),
        }
    }

    async fn fetch_hint(&self, request: HintRequest) -> Result<HintResponse, OracleError> {
        self.log.lock().unwrap().push(Call::Hint(request));
        match self.hints.lock().unwrap().pop_front() {
            Some(Ok(hint)) => Ok(HintResponse { hint }),
            Some(Err(message)) => Err(OracleError::Malformed(message)),
            None => Ok(HintResponse {
                hint: "Think harder, traveller.".into(),
            }),
        }
    }

    async fn validate_guess(
        &self,
        request: ValidateRequest,
    ) -> Result<ValidateResponse, OracleError> {
        self.log.lock().unwrap().push(Call::Validate(request));
        match self.verdicts.lock().unwrap().pop_front() {
            Some(Ok(correct)) => Ok(ValidateResponse { correct }),
            Some(Err(message)) => Err(OracleError::Malformed(message)),
            None => Err(OracleError::Malformed("no verdict scripted".into())),
        }
    }
}

/// The riddle used throughout the session tests.
#[allow(dead_code)]
pub fn piano() -> ScriptedOracle {
    ScriptedOracle::new().riddle("What has keys but no locks?", "piano", Some("music"))
}

/// A game that starts at Boot, reads `inputs` in order and renders instantly.
#[allow(dead_code)]
pub fn headless<I, S>(oracle: ScriptedOracle, inputs: I) -> Game<RecordingTerminal>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let term = RecordingTerminal::with_inputs(inputs).with_pacing(0.0);
    Game::new(term, Box::new(oracle))
}

#[allow(dead_code)]
pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}
