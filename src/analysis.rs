//! Client for the remote analysis endpoint.
//!
//! One POST per call to `<base_url>/calculate` carrying the canvas snapshot and
//! the current variables. Single attempt: no retries, no backoff, and no
//! timeout beyond the HTTP client's defaults.

use std::collections::HashMap;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::Error;

const CALCULATE_PATH: &str = "/calculate";

/// One decoded item of a response batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    /// Binds `name` to `value` for future requests.
    Assignment { name: String, value: String },
    /// A plain evaluation, shown but not remembered.
    Evaluation { expression: String, value: String },
}

impl AnalysisResult {
    /// Label text, `"<expression> = <answer>"`.
    pub fn label_text(&self) -> String {
        match self {
            Self::Assignment { name, value } => format!("{name} = {value}"),
            Self::Evaluation { expression, value } => format!("{expression} = {value}"),
        }
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Serialize)]
struct CalculateRequest<'a> {
    image: &'a str,
    dict_of_vars: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
struct CalculateResponse {
    data: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireResult {
    expr: String,
    result: String,
    #[serde(default)]
    assign: bool,
}

impl From<WireResult> for AnalysisResult {
    fn from(w: WireResult) -> Self {
        if w.assign {
            Self::Assignment { name: w.expr, value: w.result }
        } else {
            Self::Evaluation { expression: w.expr, value: w.result }
        }
    }
}

/// Decode a response body, preserving the server's order.
pub fn parse_response(body: &str) -> Result<Vec<AnalysisResult>, Error> {
    let resp: CalculateResponse =
        serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;
    Ok(resp.data.into_iter().map(AnalysisResult::from).collect())
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct AnalysisClient {
    http: Client,
    url: String,
}

impl AnalysisClient {
    /// `base_url` is the endpoint root, without the trailing `/calculate`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(concat!("mathpad/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Request(format!("build http client: {e}")))?;
        let url = format!("{}{}", base_url.trim_end_matches('/'), CALCULATE_PATH);
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `image` (a data URI) and `variables`, return the decoded batch.
    pub fn analyze(
        &self,
        image: &str,
        variables: &HashMap<String, String>,
    ) -> Result<Vec<AnalysisResult>, Error> {
        let body = CalculateRequest { image, dict_of_vars: variables };
        tracing::debug!(url = %self.url, vars = variables.len(), bytes = image.len(), "sending analysis");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| Error::Request(e.to_string()))?;

        let status = response.status();
        let text = response.text().map_err(|e| Error::Request(format!("read body: {e}")))?;
        if !status.is_success() {
            return Err(Error::Response { status: status.as_u16(), body: text });
        }

        let results = parse_response(&text)?;
        tracing::info!(count = results.len(), "analysis returned");
        Ok(results)
    }
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
