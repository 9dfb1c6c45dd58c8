//! JSON body sent to the enquiry endpoint

use crate::state::FieldId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// User agent reported in the payload metadata
pub const USER_AGENT: &str = concat!("franchise-tui/", env!("CARGO_PKG_VERSION"));

/// Where the enquiry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionMetadata {
    pub source: String,
    pub user_agent: String,
    pub referrer: String,
}

impl Default for SubmissionMetadata {
    fn default() -> Self {
        Self {
            source: "franchise-page".to_string(),
            user_agent: USER_AGENT.to_string(),
            referrer: "direct".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city_state: String,
    pub investment_range: String,
    pub message: String,
    pub acknowledgment: bool,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub user_agent: String,
    pub referrer: String,
}

impl EnquiryPayload {
    /// Build the payload from validated form values
    pub fn from_values(
        values: &BTreeMap<FieldId, String>,
        metadata: &SubmissionMetadata,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let get = |id: FieldId| values.get(&id).cloned().unwrap_or_default();
        Self {
            full_name: get(FieldId::FullName),
            email: get(FieldId::Email),
            phone: get(FieldId::Phone),
            city_state: get(FieldId::CityState),
            investment_range: get(FieldId::InvestmentRange),
            message: get(FieldId::Message),
            acknowledgment: !get(FieldId::Acknowledgment).is_empty(),
            timestamp,
            source: metadata.source.clone(),
            user_agent: metadata.user_agent.clone(),
            referrer: metadata.referrer.clone(),
        }
    }
}
