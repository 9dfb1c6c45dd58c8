//! Error taxonomy for the wizard and the enquiry pipeline

use thiserror::Error;

/// Failures of a single submission attempt against the enquiry endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// No response was received (connection refused, DNS, reset, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The client-side wait threshold elapsed before a response arrived.
    #[error("Request timeout: the endpoint did not respond in time")]
    Timeout,

    /// The endpoint answered, but reported a failure.
    #[error("Server error{}: {}", status_suffix(.status), .message)]
    Server {
        /// HTTP status, if the failure came with one.
        status: Option<u16>,
        /// Message from the response body or the status text.
        message: String,
    },

    /// Anything we could not classify (malformed body, missing confirmation id).
    #[error("Unexpected response: {0}")]
    Unknown(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl SubmissionError {
    /// Whether the automatic back-off loop may try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Unknown(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Setup problems that make the wizard unusable.
///
/// These are never shown as errors: the wizard disables itself and the
/// fallback call-to-action is offered instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no key bound for wizard role '{0}'")]
    MissingBinding(&'static str),

    #[error("cannot parse key '{key}' for wizard role '{role}'")]
    UnparsableKey { role: &'static str, key: String },

    #[error("key '{key}' is bound to both '{first}' and '{second}'")]
    DuplicateBinding {
        key: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("terminal too small for the wizard ({width}x{height})")]
    TerminalTooSmall { width: u16, height: u16 },
}

/// Faults raised inside wizard handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("wizard screen {screen} does not match {answers} collected answers")]
    InconsistentState { screen: String, answers: usize },
}
