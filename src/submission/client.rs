//! HTTP client for the franchise enquiry endpoint

use super::payload::{EnquiryPayload, USER_AGENT};
use super::traits::EnquiryClientTrait;
use crate::error::SubmissionError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;

/// Response body of the enquiry endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnquiryResponse {
    #[serde(default)]
    success: bool,
    confirmation_id: Option<String>,
    message: Option<String>,
}

/// Client posting enquiries as JSON
#[derive(Debug, Clone)]
pub struct HttpEnquiryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEnquiryClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmissionError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SubmissionError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EnquiryClientTrait for HttpEnquiryClient {
    async fn submit(&self, payload: &EnquiryPayload) -> Result<String, SubmissionError> {
        tracing::debug!("Posting enquiry to {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        classify_response(status, &body)
    }
}

/// Map an endpoint response to a confirmation id or a failure
pub fn classify_response(status: u16, body: &str) -> Result<String, SubmissionError> {
    let parsed = serde_json::from_str::<EnquiryResponse>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Request failed".to_string());
        return Err(SubmissionError::Server {
            status: Some(status),
            message,
        });
    }

    let response = parsed
        .map_err(|e| SubmissionError::Unknown(format!("unreadable response body: {e}")))?;

    if !response.success {
        return Err(SubmissionError::Server {
            status: None,
            message: response
                .message
                .unwrap_or_else(|| "Submission was rejected".to_string()),
        });
    }

    match response.confirmation_id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(SubmissionError::Unknown(
            "response did not include a confirmation id".to_string(),
        )),
    }
}
