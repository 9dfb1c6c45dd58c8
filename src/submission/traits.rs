//! Trait abstraction for the enquiry endpoint to enable mocking in tests

use super::payload::EnquiryPayload;
use crate::error::SubmissionError;
use async_trait::async_trait;

/// One delivery attempt against the enquiry endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnquiryClientTrait: Send + Sync {
    /// Send the payload; returns the confirmation id on success
    async fn submit(&self, payload: &EnquiryPayload) -> Result<String, SubmissionError>;
}
