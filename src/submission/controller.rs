//! Enquiry submission: validation gate, delivery and the retry loop
//!
//! `prepare` runs on the UI side and either rejects the submit or yields a
//! payload. `deliver` runs the attempts, backing off linearly between
//! retryable failures, and reports progress through a callback. `spawn` runs
//! `deliver` on a tokio task and forwards progress over a channel.

use super::payload::{EnquiryPayload, SubmissionMetadata};
use super::traits::EnquiryClientTrait;
use crate::error::SubmissionError;
use crate::state::{EnquiryForm, FieldId, ValidationRuleSet};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Back-off and timeout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_retries: u32,
    /// Wait threshold for a single attempt
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry_count + 1`
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        self.base_delay * (retry_count + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(1000),
            max_retries: 2,
            timeout: Duration::from_millis(10_000),
        }
    }
}

/// Result of one submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { confirmation_id: String },
    ValidationFailed { errors: BTreeMap<FieldId, String> },
    NetworkError(String),
    TimeoutError,
    ServerError(String),
    UnknownError(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::TimeoutError)
    }

    /// Short name used in analytics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::ValidationFailed { .. } => "validation",
            Self::NetworkError(_) => "network",
            Self::TimeoutError => "timeout",
            Self::ServerError(_) => "server",
            Self::UnknownError(_) => "unknown",
        }
    }

    /// One-line description for notifications
    pub fn user_message(&self) -> String {
        match self {
            Self::Success { confirmation_id } => {
                format!("Application submitted. Confirmation ID: {confirmation_id}")
            }
            Self::ValidationFailed { errors } => {
                format!("Please fix {} highlighted field(s)", errors.len())
            }
            Self::NetworkError(_) => "Unable to reach our servers".to_string(),
            Self::TimeoutError => "The request took too long".to_string(),
            Self::ServerError(_) => "Our servers reported a problem".to_string(),
            Self::UnknownError(_) => "Something unexpected happened".to_string(),
        }
    }

    /// Technical detail shown in the error panel
    pub fn details(&self) -> String {
        match self {
            Self::NetworkError(m) => format!("Network error: {m}"),
            Self::TimeoutError => "Request timeout: the endpoint did not respond in time".into(),
            Self::ServerError(m) | Self::UnknownError(m) => m.clone(),
            Self::Success { .. } | Self::ValidationFailed { .. } => String::new(),
        }
    }
}

impl From<SubmissionError> for SubmissionOutcome {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Network(message) => Self::NetworkError(message),
            SubmissionError::Timeout => Self::TimeoutError,
            server @ SubmissionError::Server { .. } => Self::ServerError(server.to_string()),
            SubmissionError::Unknown(message) => Self::UnknownError(message),
        }
    }
}

/// Progress of a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// An attempt is on the wire; `retry_count` retries preceded it
    AttemptStarted { retry_count: u32 },
    /// A retryable failure; the next attempt starts after `delay`
    RetryScheduled {
        retry_count: u32,
        delay: Duration,
        reason: SubmissionOutcome,
    },
    Finished(SubmissionOutcome),
}

/// What `prepare` decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// A submission is already under way
    InFlight,
    /// Client-side validation failed
    Invalid(SubmissionOutcome),
    Ready(EnquiryPayload),
}

#[derive(Clone)]
pub struct SubmissionController {
    client: Arc<dyn EnquiryClientTrait>,
    policy: RetryPolicy,
    metadata: SubmissionMetadata,
}

impl SubmissionController {
    pub fn new(
        client: Arc<dyn EnquiryClientTrait>,
        policy: RetryPolicy,
        metadata: SubmissionMetadata,
    ) -> Self {
        Self {
            client,
            policy,
            metadata,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Gate a submit: refuse while busy, validate, then mark the form submitting
    pub fn prepare(
        &self,
        form: &mut EnquiryForm,
        rules: &ValidationRuleSet,
        now: DateTime<Utc>,
    ) -> Prepared {
        if form.is_busy() {
            return Prepared::InFlight;
        }

        let errors = form.validate_all(rules);
        if !errors.is_empty() {
            form.submitting = false;
            form.focus_first_error();
            return Prepared::Invalid(SubmissionOutcome::ValidationFailed { errors });
        }

        form.apply(&SubmissionEvent::AttemptStarted { retry_count: 0 });
        Prepared::Ready(EnquiryPayload::from_values(
            &form.values(),
            &self.metadata,
            now,
        ))
    }

    /// One attempt under the policy timeout. Hitting the timeout drops the
    /// request future, which cancels the request in flight.
    async fn attempt(&self, payload: &EnquiryPayload) -> Result<String, SubmissionError> {
        match tokio::time::timeout(self.policy.timeout, self.client.submit(payload)).await {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::Timeout),
        }
    }

    /// Run attempts until success, a terminal failure, or retries run out
    pub async fn deliver<F>(&self, payload: EnquiryPayload, mut on_event: F) -> SubmissionOutcome
    where
        F: FnMut(SubmissionEvent) + Send,
    {
        let mut retry_count = 0;
        loop {
            on_event(SubmissionEvent::AttemptStarted { retry_count });

            let outcome = match self.attempt(&payload).await {
                Ok(confirmation_id) => SubmissionOutcome::Success { confirmation_id },
                Err(err) => SubmissionOutcome::from(err),
            };

            if outcome.is_retryable() && retry_count < self.policy.max_retries {
                let delay = self.policy.delay_for(retry_count);
                retry_count += 1;
                tracing::warn!(
                    "Submission attempt failed ({}), retry {} of {} in {:?}",
                    outcome.kind(),
                    retry_count,
                    self.policy.max_retries,
                    delay
                );
                on_event(SubmissionEvent::RetryScheduled {
                    retry_count,
                    delay,
                    reason: outcome,
                });
                tokio::time::sleep(delay).await;
                continue;
            }

            if outcome.is_success() {
                tracing::info!("Enquiry submitted after {} retries", retry_count);
            } else {
                tracing::error!(
                    "Enquiry submission failed ({}): {}",
                    outcome.kind(),
                    outcome.details()
                );
            }
            on_event(SubmissionEvent::Finished(outcome.clone()));
            return outcome;
        }
    }

    /// Deliver on a background task, forwarding progress to `events`
    pub fn spawn(
        &self,
        payload: EnquiryPayload,
        events: UnboundedSender<SubmissionEvent>,
    ) -> JoinHandle<SubmissionOutcome> {
        let controller = self.clone();
        tokio::spawn(async move {
            controller
                .deliver(payload, move |event| {
                    // The UI may have gone away; nothing left to report to
                    let _ = events.send(event);
                })
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Form;
    use crate::submission::MockEnquiryClientTrait;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn rules() -> ValidationRuleSet {
        ValidationRuleSet::franchise_enquiry().unwrap()
    }

    fn fill(form: &mut EnquiryForm, id: FieldId, text: &str) {
        if let Some(field) = form.field_mut(id) {
            field.set_text(text.to_string());
        }
    }

    fn valid_form() -> EnquiryForm {
        let mut form = EnquiryForm::new();
        fill(&mut form, FieldId::FullName, "Priya Sharma");
        fill(&mut form, FieldId::Email, "priya@example.com");
        fill(&mut form, FieldId::Phone, "5551234567");
        fill(&mut form, FieldId::CityState, "Pune, MH");
        if let Some(field) = form.field_mut(FieldId::InvestmentRange) {
            field.push_char('3');
        }
        if let Some(field) = form.field_mut(FieldId::Acknowledgment) {
            field.push_char(' ');
        }
        form
    }

    fn controller(client: impl EnquiryClientTrait + 'static) -> SubmissionController {
        SubmissionController::new(
            Arc::new(client),
            RetryPolicy::default(),
            SubmissionMetadata::default(),
        )
    }

    fn payload() -> EnquiryPayload {
        EnquiryPayload::from_values(
            &valid_form().values(),
            &SubmissionMetadata::default(),
            Utc::now(),
        )
    }

    async fn run(controller: &SubmissionController) -> (SubmissionOutcome, Vec<SubmissionEvent>) {
        let mut events = Vec::new();
        let outcome = controller
            .deliver(payload(), |event| events.push(event))
            .await;
        (outcome, events)
    }

    /// Client that never answers within the timeout
    struct SlowClient;

    #[async_trait]
    impl EnquiryClientTrait for SlowClient {
        async fn submit(&self, _payload: &EnquiryPayload) -> Result<String, SubmissionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too-late".to_string())
        }
    }

    mod policy {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_delay_grows_linearly() {
            let policy = RetryPolicy::default();
            assert_eq!(policy.delay_for(0), Duration::from_secs(1));
            assert_eq!(policy.delay_for(1), Duration::from_secs(2));
            assert_eq!(policy.delay_for(2), Duration::from_secs(3));
        }

        #[test]
        fn test_outcome_classification() {
            assert!(SubmissionOutcome::NetworkError("x".into()).is_retryable());
            assert!(SubmissionOutcome::TimeoutError.is_retryable());
            assert!(!SubmissionOutcome::ServerError("x".into()).is_retryable());
            assert!(!SubmissionOutcome::UnknownError("x".into()).is_retryable());
        }

        #[test]
        fn test_server_error_keeps_status_in_details() {
            let outcome = SubmissionOutcome::from(SubmissionError::Server {
                status: Some(503),
                message: "Service Unavailable".into(),
            });
            assert_eq!(outcome.details(), "Server error (503): Service Unavailable");
        }
    }

    mod prepare {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_email_blocks_submit() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().times(0);
            let controller = controller(mock);

            let mut form = valid_form();
            fill(&mut form, FieldId::Email, "not-an-email");
            let prepared = controller.prepare(&mut form, &rules(), Utc::now());

            let expected = BTreeMap::from([(
                FieldId::Email,
                "Please enter a valid email address".to_string(),
            )]);
            assert_eq!(
                prepared,
                Prepared::Invalid(SubmissionOutcome::ValidationFailed { errors: expected })
            );
            assert!(!form.submitting);
            assert_eq!(form.active_field_id(), Some(FieldId::Email));
        }

        #[test]
        fn test_missing_acknowledgment_reports_only_that_field() {
            let controller = controller(MockEnquiryClientTrait::new());
            let mut form = valid_form();
            if let Some(field) = form.field_mut(FieldId::Acknowledgment) {
                field.push_char(' ');
            }
            let Prepared::Invalid(SubmissionOutcome::ValidationFailed { errors }) =
                controller.prepare(&mut form, &rules(), Utc::now())
            else {
                panic!("expected validation failure");
            };
            assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![FieldId::Acknowledgment]);
        }

        #[test]
        fn test_valid_form_marks_submitting() {
            let controller = controller(MockEnquiryClientTrait::new());
            let mut form = valid_form();
            let prepared = controller.prepare(&mut form, &rules(), Utc::now());
            assert!(matches!(prepared, Prepared::Ready(_)));
            assert!(form.submitting);
        }

        #[test]
        fn test_busy_form_is_refused() {
            let controller = controller(MockEnquiryClientTrait::new());
            let mut form = valid_form();
            form.retry_pending = true;
            assert_eq!(
                controller.prepare(&mut form, &rules(), Utc::now()),
                Prepared::InFlight
            );
        }
    }

    mod deliver {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test(start_paused = true)]
        async fn test_success_on_first_attempt() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok("FR-2026-0042".to_string()));

            let (outcome, events) = run(&controller(mock)).await;
            assert_eq!(
                outcome,
                SubmissionOutcome::Success {
                    confirmation_id: "FR-2026-0042".into()
                }
            );
            assert_eq!(
                events,
                vec![
                    SubmissionEvent::AttemptStarted { retry_count: 0 },
                    SubmissionEvent::Finished(outcome.clone()),
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_network_failures_retry_twice_then_stop() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(3)
                .returning(|_| Err(SubmissionError::Network("connection refused".into())));

            let started = tokio::time::Instant::now();
            let (outcome, events) = run(&controller(mock)).await;

            assert_eq!(
                outcome,
                SubmissionOutcome::NetworkError("connection refused".into())
            );
            let delays: Vec<Duration> = events
                .iter()
                .filter_map(|e| match e {
                    SubmissionEvent::RetryScheduled { delay, .. } => Some(*delay),
                    _ => None,
                })
                .collect();
            assert_eq!(delays, vec![Duration::from_secs(1), Duration::from_secs(2)]);
            assert_eq!(started.elapsed(), Duration::from_secs(3));
            assert!(matches!(events.last(), Some(SubmissionEvent::Finished(_))));
        }

        #[tokio::test(start_paused = true)]
        async fn test_recovers_after_one_network_failure() {
            let mut mock = MockEnquiryClientTrait::new();
            let mut calls = 0;
            mock.expect_submit().times(2).returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(SubmissionError::Network("reset".into()))
                } else {
                    Ok("FR-7".to_string())
                }
            });

            let (outcome, events) = run(&controller(mock)).await;
            assert!(outcome.is_success());
            assert!(events.contains(&SubmissionEvent::AttemptStarted { retry_count: 1 }));
        }

        #[tokio::test(start_paused = true)]
        async fn test_server_error_is_not_retried() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().times(1).returning(|_| {
                Err(SubmissionError::Server {
                    status: Some(500),
                    message: "Internal Server Error".into(),
                })
            });

            let (outcome, events) = run(&controller(mock)).await;
            assert!(matches!(outcome, SubmissionOutcome::ServerError(_)));
            assert!(!events
                .iter()
                .any(|e| matches!(e, SubmissionEvent::RetryScheduled { .. })));
        }

        #[test]
        fn test_rejected_submission_blocks_to_server_error() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().times(1).returning(|_| {
                Err(SubmissionError::Server {
                    status: None,
                    message: "Duplicate application".into(),
                })
            });

            let (outcome, _) = tokio_test::block_on(run(&controller(mock)));
            assert_eq!(
                outcome,
                SubmissionOutcome::ServerError("Server error: Duplicate application".into())
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_unknown_error_is_not_retried() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Err(SubmissionError::Unknown("garbage".into())));

            let (outcome, _) = run(&controller(mock)).await;
            assert_eq!(outcome, SubmissionOutcome::UnknownError("garbage".into()));
        }

        #[tokio::test(start_paused = true)]
        async fn test_slow_endpoint_times_out_and_retries() {
            let started = tokio::time::Instant::now();
            let (outcome, events) = run(&controller(SlowClient)).await;

            assert_eq!(outcome, SubmissionOutcome::TimeoutError);
            let attempts = events
                .iter()
                .filter(|e| matches!(e, SubmissionEvent::AttemptStarted { .. }))
                .count();
            assert_eq!(attempts, 3);
            // Three 10s timeouts plus 1s and 2s of back-off
            assert_eq!(started.elapsed(), Duration::from_secs(33));
        }

        #[tokio::test(start_paused = true)]
        async fn test_spawn_forwards_events() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().returning(|_| Ok("FR-9".to_string()));
            let controller = controller(mock);

            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
            let handle = controller.spawn(payload(), tx);
            let outcome = handle.await.unwrap();

            assert!(outcome.is_success());
            assert_eq!(
                rx.recv().await,
                Some(SubmissionEvent::AttemptStarted { retry_count: 0 })
            );
            assert_eq!(rx.recv().await, Some(SubmissionEvent::Finished(outcome)));
            assert_eq!(rx.recv().await, None);
        }

        #[test]
        fn test_form_follows_events_to_terminal_failure() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(3)
                .returning(|_| Err(SubmissionError::Network("down".into())));
            let controller = controller(mock);

            let mut form = valid_form();
            let Prepared::Ready(payload) = controller.prepare(&mut form, &rules(), Utc::now())
            else {
                panic!("expected a payload");
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap();
            let outcome = runtime.block_on(controller.deliver(payload, |event| form.apply(&event)));

            assert!(matches!(outcome, SubmissionOutcome::NetworkError(_)));
            assert!(!form.is_busy());
            assert_eq!(form.retry_count, 2);
            assert_eq!(form.value(FieldId::FullName), "Priya Sharma");
            assert_eq!(form.active_field(), 0);
        }
    }

    proptest! {
        #[test]
        fn prop_invalid_input_never_reaches_network(email in "[a-z0-9.]{0,20}") {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().times(0);
            let controller = controller(mock);

            let mut form = valid_form();
            fill(&mut form, FieldId::Email, &email);
            let prepared = controller.prepare(&mut form, &rules(), Utc::now());

            prop_assert!(
                matches!(prepared, Prepared::Invalid(_)),
                "email without @ must be rejected"
            );
            prop_assert!(!form.is_busy());
        }
    }
}
