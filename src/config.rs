//! Configuration handling

use crate::submission::{RetryPolicy, SubmissionMetadata, USER_AGENT};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the submission endpoint
pub const ENDPOINT_ENV: &str = "FRANCHISE_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/franchise/enquiry";
const DEFAULT_FALLBACK_EMAIL: &str = "franchise@rabuste.com";

/// User configuration; every key is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FranchiseConfig {
    /// Enquiry endpoint URL
    pub endpoint: Option<String>,
    /// Wait threshold for one submission attempt
    pub request_timeout_ms: Option<u64>,
    /// Base of the linear retry back-off
    pub retry_base_delay_ms: Option<u64>,
    /// Automatic retries after network or timeout failures
    pub max_retries: Option<u32>,
    pub notification_duration_ms: Option<u64>,
    pub error_panel_duration_ms: Option<u64>,
    pub fallback_cta_duration_ms: Option<u64>,
    /// Contact address offered when submission fails
    pub fallback_email: Option<String>,
    pub source: Option<String>,
    pub referrer: Option<String>,
    /// Show the assistant bubble without animating it
    pub reduce_motion: Option<bool>,
    /// Wizard role name → key
    #[serde(default)]
    pub key_bindings: BTreeMap<String, String>,
}

impl FranchiseConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "rabuste", "franchise-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the user's config dir, then apply the environment
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok()))
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FranchiseConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Replace the endpoint when `endpoint` is set and non-empty
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = Some(endpoint);
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            base_delay: self
                .retry_base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            timeout: self
                .request_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms.unwrap_or(4000))
    }

    pub fn error_panel_duration(&self) -> Duration {
        Duration::from_millis(self.error_panel_duration_ms.unwrap_or(15_000))
    }

    pub fn fallback_cta_duration(&self) -> Duration {
        Duration::from_millis(self.fallback_cta_duration_ms.unwrap_or(10_000))
    }

    pub fn fallback_email(&self) -> &str {
        self.fallback_email
            .as_deref()
            .unwrap_or(DEFAULT_FALLBACK_EMAIL)
    }

    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion.unwrap_or(false)
    }

    pub fn metadata(&self) -> SubmissionMetadata {
        let defaults = SubmissionMetadata::default();
        SubmissionMetadata {
            source: self.source.clone().unwrap_or(defaults.source),
            user_agent: USER_AGENT.to_string(),
            referrer: self.referrer.clone().unwrap_or(defaults.referrer),
        }
    }
}
