//! Application state definitions

use super::bubble::BubbleState;
use super::forms::EnquiryForm;
use super::notifications::Notifications;
use super::wizard::Wizard;
use crate::submission::SubmissionOutcome;
use std::time::{Duration, Instant};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Landing page with the assistant bubble; the wizard opens over it
    #[default]
    Landing,
    /// Franchise enquiry form
    Form,
    /// Shown after a successful submission
    Confirmation,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Landing => "Franchise with Rabuste",
            Self::Form => "Franchise Application",
            Self::Confirmation => "Application Received",
        }
    }
}

/// Control holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    Bubble,
    /// Close control of the wizard modal
    WizardClose,
    Form,
}

/// Persistent panel shown after a submission fails for good
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub title: &'static str,
    pub message: &'static str,
    pub suggestions: Vec<String>,
    pub details: String,
    /// Offer "Try Again"
    pub can_retry: bool,
    pub expires_at: Instant,
}

impl ErrorPanel {
    /// Panel for a failed outcome; `None` for success and validation failures
    pub fn for_outcome(
        outcome: &SubmissionOutcome,
        fallback_email: &str,
        now: Instant,
        duration: Duration,
    ) -> Option<Self> {
        let (title, message, can_retry) = match outcome {
            SubmissionOutcome::Success { .. } | SubmissionOutcome::ValidationFailed { .. } => {
                return None
            }
            SubmissionOutcome::NetworkError(_) => (
                "Connection Error",
                "We're having trouble connecting to our servers. This might be due to a temporary network issue.",
                true,
            ),
            SubmissionOutcome::TimeoutError => (
                "Timeout Error",
                "The request is taking longer than expected. Please check your internet connection and try again.",
                true,
            ),
            SubmissionOutcome::ServerError(_) | SubmissionOutcome::UnknownError(_) => (
                "Submission Error",
                "We encountered an unexpected error while processing your request.",
                false,
            ),
        };

        Some(Self {
            title,
            message,
            suggestions: vec![
                "Check your internet connection".to_string(),
                "Try submitting the form again".to_string(),
                format!("If the problem persists, email us directly at {fallback_email}"),
            ],
            details: outcome.details(),
            can_retry,
            expires_at: now + duration,
        })
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub focus: Focus,

    // Wizard and form
    pub wizard: Wizard,
    pub form: EnquiryForm,
    pub error_panel: Option<ErrorPanel>,
    /// Confirmation id of the last successful submission
    pub confirmation_id: Option<String>,

    // Landing
    pub bubble: BubbleState,

    // UI state
    pub notifications: Notifications,
    /// Latest announcement, shown in the status bar
    pub status_message: Option<(String, Instant)>,
}

impl AppState {
    /// How long an announcement stays in the status bar
    pub const STATUS_DURATION: Duration = Duration::from_secs(3);

    pub fn new(wizard: Wizard, bubble: BubbleState, notifications: Notifications) -> Self {
        Self {
            current_view: View::Landing,
            focus: Focus::Page,
            wizard,
            form: EnquiryForm::new(),
            error_panel: None,
            confirmation_id: None,
            bubble,
            notifications,
            status_message: None,
        }
    }

    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        self.status_message = Some((message.into(), now));
    }

    /// Announcement still on screen at `now`
    pub fn current_status(&self, now: Instant) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < Self::STATUS_DURATION)
            .map(|(message, _)| message.as_str())
    }

    /// Drop expired notifications, panels and announcements
    pub fn expire(&mut self, now: Instant) {
        self.notifications.prune(now);
        if self
            .error_panel
            .as_ref()
            .is_some_and(|panel| panel.is_expired(now))
        {
            self.error_panel = None;
        }
        if self.current_status(now).is_none() {
            self.status_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BindingTable;

    fn state() -> AppState {
        AppState::new(
            Wizard::initialize(Ok(BindingTable::default()), (80, 24)),
            BubbleState::new(Instant::now(), false),
            Notifications::default(),
        )
    }

    mod error_panel {
        use super::*;

        const PANEL: Duration = Duration::from_secs(15);

        #[test]
        fn test_network_panel_offers_retry_and_email() {
            let now = Instant::now();
            let panel = ErrorPanel::for_outcome(
                &SubmissionOutcome::NetworkError("connection refused".into()),
                "franchise@rabuste.com",
                now,
                PANEL,
            )
            .unwrap();
            assert_eq!(panel.title, "Connection Error");
            assert!(panel.can_retry);
            assert!(panel.suggestions[2].contains("franchise@rabuste.com"));
            assert_eq!(panel.details, "Network error: connection refused");
        }

        #[test]
        fn test_timeout_panel() {
            let panel = ErrorPanel::for_outcome(
                &SubmissionOutcome::TimeoutError,
                "x@y.z",
                Instant::now(),
                PANEL,
            )
            .unwrap();
            assert_eq!(panel.title, "Timeout Error");
            assert!(panel.can_retry);
        }

        #[test]
        fn test_server_panel_has_no_retry() {
            let panel = ErrorPanel::for_outcome(
                &SubmissionOutcome::ServerError("Server error (500): boom".into()),
                "x@y.z",
                Instant::now(),
                PANEL,
            )
            .unwrap();
            assert_eq!(panel.title, "Submission Error");
            assert!(!panel.can_retry);
        }

        #[test]
        fn test_no_panel_for_success() {
            let outcome = SubmissionOutcome::Success {
                confirmation_id: "FR-1".into(),
            };
            assert!(ErrorPanel::for_outcome(&outcome, "x@y.z", Instant::now(), PANEL).is_none());
        }

        #[test]
        fn test_panel_expires() {
            let now = Instant::now();
            let mut state = state();
            state.error_panel = ErrorPanel::for_outcome(
                &SubmissionOutcome::UnknownError("?".into()),
                "x@y.z",
                now,
                PANEL,
            );
            state.expire(now + Duration::from_secs(14));
            assert!(state.error_panel.is_some());
            state.expire(now + PANEL);
            assert!(state.error_panel.is_none());
        }
    }

    #[test]
    fn test_starts_on_landing() {
        let state = state();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.confirmation_id.is_none());
    }

    #[test]
    fn test_announcement_fades() {
        let now = Instant::now();
        let mut state = state();
        state.announce("Question 2 of 3", now);
        assert_eq!(state.current_status(now), Some("Question 2 of 3"));
        state.expire(now + AppState::STATUS_DURATION);
        assert!(state.status_message.is_none());
    }
}
