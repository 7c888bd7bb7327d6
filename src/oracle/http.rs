//! Riddle server client.
//!
//! Speaks the small JSON RPC the web build of the game uses: every operation
//! is a `POST` under `/api`, with a JSON body and a JSON reply.

use super::{
    parse_riddle, HintRequest, HintResponse, Oracle, OracleError, Riddle, ValidateRequest,
    ValidateResponse,
};
use crate::config::OracleConfig;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use std::time::Duration;

pub struct HttpOracle {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOracle {
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/api/{}", self.base_url, route)
    }

    /// POST `body` to `/api/{route}` and return the raw reply text.
    async fn post<B: Serialize + ?Sized>(
        &self,
        route: &str,
        operation: &'static str,
        body: &B,
    ) -> Result<String, OracleError> {
        let url = self.endpoint(route);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("{} returned {}", url, status);
            return Err(OracleError::Status {
                operation,
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn generate_riddle(&self) -> Result<Riddle, OracleError> {
        let raw = self
            .post("question", "fetch question", &serde_json::json!({}))
            .await?;
        parse_riddle(&raw)
    }

    async fn fetch_hint(&self, request: HintRequest) -> Result<HintResponse, OracleError> {
        let raw = self.post("hint", "fetch hint", &request).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn validate_guess(
        &self,
        request: ValidateRequest,
    ) -> Result<ValidateResponse, OracleError> {
        let raw = self.post("validate", "validate guess", &request).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
