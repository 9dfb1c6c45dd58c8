//! Application state and core logic
//!
//! `App` owns the only mutable references to the wizard and form state. Key
//! presses are routed through the binding table to the wizard, or edit the
//! form; submission progress arrives over a channel and is folded in on tick.

use crate::config::FranchiseConfig;
use crate::state::{
    AppState, BindingTable, BubblePhase, BubbleState, Capability, ErrorPanel, Focus, Form,
    NotificationKind, Notifications, Role, ValidationRuleSet, View, Wizard, WizardAction,
    WizardEffect,
};
use crate::submission::{
    EnquiryClientTrait, HttpEnquiryClient, Prepared, SubmissionController, SubmissionEvent,
    SubmissionOutcome,
};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Window for the second Ctrl+C press
const QUIT_CONFIRM_WINDOW: Duration = Duration::from_secs(1);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    config: FranchiseConfig,
    rules: ValidationRuleSet,
    controller: SubmissionController,
    events_tx: UnboundedSender<SubmissionEvent>,
    events_rx: UnboundedReceiver<SubmissionEvent>,
    /// Toast announcing the pending retry, replaced as the submission moves on
    retry_notice: Option<Uuid>,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create an app posting to the configured endpoint
    pub fn new(config: FranchiseConfig, terminal_size: (u16, u16)) -> Result<Self> {
        let client = HttpEnquiryClient::new(config.endpoint())?;
        tracing::info!("Submitting enquiries to {}", client.endpoint());
        Self::with_client(config, Arc::new(client), terminal_size)
    }

    /// Create an app with an explicit endpoint client; `terminal_size` is (width, height)
    pub fn with_client(
        config: FranchiseConfig,
        client: Arc<dyn EnquiryClientTrait>,
        terminal_size: (u16, u16),
    ) -> Result<Self> {
        let now = Instant::now();
        let rules = ValidationRuleSet::franchise_enquiry()?;
        let controller =
            SubmissionController::new(client, config.retry_policy(), config.metadata());

        let wizard = Wizard::initialize(
            BindingTable::resolve(&config.key_bindings),
            terminal_size,
        );
        let state = AppState::new(
            wizard,
            BubbleState::new(now, config.reduce_motion()),
            Notifications::new(config.notification_duration()),
        );
        let (events_tx, events_rx) = unbounded_channel();

        let mut app = Self {
            state,
            config,
            rules,
            controller,
            events_tx,
            events_rx,
            retry_notice: None,
            quit: false,
            last_ctrl_c: None,
        };

        if let Capability::Disabled(reason) = app.state.wizard.capability().clone() {
            app.report_wizard_disabled(&reason, now);
        }
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance timers and fold in submission progress
    pub fn tick(&mut self, now: Instant) {
        if self.state.current_view == View::Landing {
            self.state.bubble.update(now);
        }
        self.poll_submission(now);
        self.state.expire(now);
    }

    /// Whether the UI should redraw at animation speed
    pub fn is_animating(&self) -> bool {
        (self.state.current_view == View::Landing && !self.state.bubble.is_visible())
            || self.state.bubble.phase == BubblePhase::Entering
            || self.state.form.is_busy()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let now = Instant::now();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c(now);
            return Ok(());
        }

        if key.code == KeyCode::Char('x')
            && crate::platform::has_command_modifier(key.modifiers)
            && !self.state.notifications.is_empty()
        {
            self.state.notifications.dismiss_latest();
            return Ok(());
        }

        // Error panel is modal over every view
        if self.state.error_panel.is_some() {
            self.handle_error_panel_key(key, now);
            return Ok(());
        }

        match self.state.current_view {
            View::Landing => self.handle_landing_key(key, now),
            View::Form => self.handle_form_key(key, now),
            View::Confirmation => self.handle_confirmation_key(key, now),
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self, now: Instant) {
        match self.last_ctrl_c {
            Some(at) if now.duration_since(at) < QUIT_CONFIRM_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.state.announce("Press Ctrl+C again to quit", now);
            }
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent, now: Instant) {
        let action = self.state.wizard.bindings().action_for(key.code);
        let wizard_open = self.state.wizard.session().is_open();

        match action {
            Some(action) if wizard_open => self.dispatch(action, now),
            Some(WizardAction::Role(role @ (Role::Open | Role::GoToForm))) => {
                self.state.bubble.skip();
                self.dispatch(WizardAction::Role(role), now);
            }
            // Activating the focused bubble opens the wizard
            Some(WizardAction::Role(Role::Start)) if self.state.focus == Focus::Bubble => {
                self.dispatch(WizardAction::Role(Role::Open), now);
            }
            _ if !wizard_open && key.code == KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Run a wizard action and carry out its effects.
    ///
    /// A fault inside the wizard disables it; the rest of the app keeps going.
    pub fn dispatch(&mut self, action: WizardAction, now: Instant) {
        match self.state.wizard.dispatch(action) {
            Ok(effects) => self.apply_effects(effects, now),
            Err(err) => {
                tracing::error!("Wizard fault: {err}");
                self.state.wizard.disable(err.to_string());
                self.state.focus = Focus::Page;
                self.report_wizard_disabled(&err.to_string(), now);
            }
        }
    }

    fn apply_effects(&mut self, effects: Vec<WizardEffect>, now: Instant) {
        for effect in effects {
            match effect {
                WizardEffect::Announce(message) => self.state.announce(message, now),
                WizardEffect::Track(event) => {
                    tracing::info!(target: "analytics", event = event.name, data = ?event.data);
                }
                WizardEffect::FocusCloseControl => self.state.focus = Focus::WizardClose,
                WizardEffect::FocusBubble => {
                    self.state.bubble.skip();
                    self.state.focus = Focus::Bubble;
                }
                WizardEffect::HandOffToForm => self.open_form(),
            }
        }
    }

    fn report_wizard_disabled(&mut self, reason: &str, now: Instant) {
        tracing::info!(target: "analytics", event = "wizard_disabled", reason);
        let key = self.state.wizard.bindings().label_for(Role::GoToForm);
        self.state.notifications.show_at(
            format!("Ready to apply? Press {key} to go to the form"),
            NotificationKind::Info,
            now,
            self.config.fallback_cta_duration(),
        );
    }

    /// Switch to the form with focus on the first field
    pub fn open_form(&mut self) {
        self.state.current_view = View::Form;
        self.state.focus = Focus::Form;
        self.state.form.focus(0);
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        let form = &mut self.state.form;
        let on_submit_row = form.is_submit_row_active();

        match key.code {
            KeyCode::Char('s') if crate::platform::has_command_modifier(key.modifiers) => {
                self.submit(now);
            }
            KeyCode::Tab | KeyCode::Down => form.advance(&self.rules),
            KeyCode::BackTab | KeyCode::Up => form.retreat(&self.rules),
            KeyCode::Esc => {
                self.state.current_view = View::Landing;
                self.state.focus = Focus::Page;
            }
            KeyCode::Enter if on_submit_row => self.submit(now),
            KeyCode::Enter => {
                let multiline = form
                    .get_active_field_mut()
                    .map(|f| f.is_multiline)
                    .unwrap_or(false);
                if multiline {
                    if let Some(field) = form.get_active_field_mut() {
                        field.push_char('\n');
                    }
                } else {
                    form.advance(&self.rules);
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = form.get_active_field_mut() {
                    field.cycle_choice(key.code == KeyCode::Right);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
    }

    /// Validate and, if clean, start delivering the enquiry
    pub fn submit(&mut self, now: Instant) {
        match self
            .controller
            .prepare(&mut self.state.form, &self.rules, Utc::now())
        {
            Prepared::InFlight => {
                tracing::debug!("Submit ignored, a submission is already under way");
            }
            Prepared::Invalid(outcome) => {
                tracing::info!(target: "analytics", event = "form_error", kind = outcome.kind());
                self.state.notifications.show(
                    outcome.user_message(),
                    NotificationKind::Warning,
                    now,
                );
            }
            Prepared::Ready(payload) => {
                tracing::info!(target: "analytics", event = "form_submit");
                self.state.error_panel = None;
                self.controller.spawn(payload, self.events_tx.clone());
            }
        }
    }

    /// Drain progress events from the submission task
    pub fn poll_submission(&mut self, now: Instant) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_submission_event(event, now);
        }
    }

    fn handle_submission_event(&mut self, event: SubmissionEvent, now: Instant) {
        self.state.form.apply(&event);
        if let Some(id) = self.retry_notice.take() {
            self.state.notifications.dismiss(id);
        }

        match event {
            SubmissionEvent::AttemptStarted { .. } => {}
            SubmissionEvent::RetryScheduled {
                retry_count,
                delay,
                reason,
            } => {
                let attempts = self.controller.policy().max_retries + 1;
                self.retry_notice = Some(self.state.notifications.show(
                    format!(
                        "{}. Retrying in {}s (attempt {} of {attempts})",
                        reason.user_message(),
                        delay.as_secs(),
                        retry_count + 1
                    ),
                    NotificationKind::Warning,
                    now,
                ));
            }
            SubmissionEvent::Finished(SubmissionOutcome::Success { confirmation_id }) => {
                self.state.error_panel = None;
                self.state.confirmation_id = Some(confirmation_id);
                self.state.current_view = View::Confirmation;
                self.state.focus = Focus::Page;
                self.state.notifications.show(
                    "Application submitted successfully!",
                    NotificationKind::Success,
                    now,
                );
            }
            SubmissionEvent::Finished(outcome) => {
                tracing::info!(target: "analytics", event = "form_error", kind = outcome.kind());
                self.state.error_panel = ErrorPanel::for_outcome(
                    &outcome,
                    self.config.fallback_email(),
                    now,
                    self.config.error_panel_duration(),
                );
            }
        }
    }

    fn handle_error_panel_key(&mut self, key: KeyEvent, now: Instant) {
        let can_retry = self
            .state
            .error_panel
            .as_ref()
            .is_some_and(|panel| panel.can_retry);

        match key.code {
            KeyCode::Char('r') | KeyCode::Enter if can_retry => {
                self.state.error_panel = None;
                self.state.current_view = View::Form;
                self.state.focus = Focus::Form;
                self.submit(now);
            }
            KeyCode::Esc | KeyCode::Enter => self.state.error_panel = None,
            _ => {}
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('y') => self.copy_confirmation_id(now),
            KeyCode::Enter => {
                self.state.confirmation_id = None;
                self.state.form.reset();
                self.open_form();
            }
            KeyCode::Esc => {
                self.state.current_view = View::Landing;
                self.state.focus = Focus::Page;
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn copy_confirmation_id(&mut self, now: Instant) {
        let Some(id) = self.state.confirmation_id.clone() else {
            return;
        };
        match self.copy_to_clipboard(&id) {
            Ok(()) => self.state.announce(format!("Copied {id}"), now),
            Err(err) => {
                tracing::warn!("Clipboard unavailable: {err}");
                self.state.notifications.show(
                    "Could not copy to the clipboard",
                    NotificationKind::Error,
                    now,
                );
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;
    use crate::state::{FieldId, WizardScreen};
    use crate::submission::MockEnquiryClientTrait;
    use std::collections::BTreeMap;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(mock: MockEnquiryClientTrait) -> App {
        App::with_client(FranchiseConfig::default(), Arc::new(mock), (80, 24)).unwrap()
    }

    fn app() -> App {
        app_with(MockEnquiryClientTrait::new())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Fill every field with valid input, leaving focus on the submit row
    fn fill_valid_form(app: &mut App) {
        app.open_form();
        type_text(app, "Priya Sharma");
        press(app, KeyCode::Tab);
        type_text(app, "priya@example.com");
        press(app, KeyCode::Tab);
        type_text(app, "5551234567");
        press(app, KeyCode::Tab);
        type_text(app, "Pune, MH");
        press(app, KeyCode::Tab);
        press(app, KeyCode::Char('3'));
        press(app, KeyCode::Tab);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Char(' '));
        press(app, KeyCode::Tab);
    }

    /// Let the submission task run to completion
    async fn settle(app: &mut App) {
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(500)).await;
            app.tick(Instant::now());
            if !app.state.form.is_busy() {
                return;
            }
        }
        panic!("submission did not settle");
    }

    mod wizard {
        use super::*;

        #[test]
        fn test_open_key_shows_welcome() {
            let mut app = app();
            press(&mut app, KeyCode::Char('a'));
            assert_eq!(app.state.wizard.session().screen(), WizardScreen::Welcome);
            assert_eq!(app.state.focus, Focus::WizardClose);
            assert_eq!(
                app.state.current_status(Instant::now()),
                Some("Franchise qualification helper opened")
            );
        }

        #[test]
        fn test_full_run_reaches_results() {
            let mut app = app();
            press(&mut app, KeyCode::Char('a'));
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('2'));
            press(&mut app, KeyCode::Char('1'));
            let session = app.state.wizard.session();
            assert_eq!(session.screen(), WizardScreen::Results);
            assert!(session
                .recommendation()
                .unwrap()
                .headline
                .contains("ideal franchise candidate"));
        }

        #[test]
        fn test_close_returns_focus_to_bubble() {
            let mut app = app();
            press(&mut app, KeyCode::Char('a'));
            press(&mut app, KeyCode::Esc);
            assert!(!app.state.wizard.session().is_open());
            assert_eq!(app.state.focus, Focus::Bubble);
        }

        #[test]
        fn test_start_key_on_focused_bubble_reopens() {
            let mut app = app();
            press(&mut app, KeyCode::Char('a'));
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.wizard.session().screen(), WizardScreen::Question1);
            assert_eq!(app.state.focus, Focus::WizardClose);
        }

        #[test]
        fn test_go_to_form_hands_off() {
            let mut app = app();
            press(&mut app, KeyCode::Char('a'));
            press(&mut app, KeyCode::Char('f'));
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(app.state.form.active_field_id(), Some(FieldId::FullName));
        }

        #[test]
        fn test_small_terminal_disables_wizard_and_offers_cta() {
            let app = App::with_client(
                FranchiseConfig::default(),
                Arc::new(MockEnquiryClientTrait::new()),
                (30, 10),
            )
            .unwrap();
            assert!(!app.state.wizard.is_enabled());
            assert_eq!(
                app.state.notifications.active()[0].message,
                "Ready to apply? Press f to go to the form"
            );
        }

        #[test]
        fn test_disabled_wizard_still_reaches_form() {
            let config = FranchiseConfig {
                key_bindings: BTreeMap::from([("close".to_string(), String::new())]),
                ..Default::default()
            };
            let mut app =
                App::with_client(config, Arc::new(MockEnquiryClientTrait::new()), (80, 24))
                    .unwrap();
            press(&mut app, KeyCode::Char('a'));
            assert!(!app.state.wizard.session().is_open());
            press(&mut app, KeyCode::Char('f'));
            assert_eq!(app.state.current_view, View::Form);
        }

        #[test]
        fn test_q_quits_from_landing() {
            let mut app = app();
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }
    }

    mod form {
        use super::*;

        #[test]
        fn test_invalid_submit_shows_inline_errors() {
            let mut app = app();
            app.open_form();
            app.handle_key(ctrl('s')).unwrap();
            assert!(app.state.form.errors.contains_key(&FieldId::FullName));
            assert!(!app.state.form.is_busy());
            assert_eq!(app.state.form.active_field_id(), Some(FieldId::FullName));
        }

        #[test]
        fn test_tab_formats_phone() {
            let mut app = app();
            app.open_form();
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "5551234567");
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.state.form.value(FieldId::Phone), "(555) 123-4567");
        }

        #[test]
        fn test_esc_returns_to_landing_keeping_values() {
            let mut app = app();
            app.open_form();
            type_text(&mut app, "Priya");
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Landing);
            assert_eq!(app.state.form.value(FieldId::FullName), "Priya");
        }
    }

    mod submission {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_success_shows_confirmation_and_resets_form() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok("FR-2026-0042".to_string()));
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            assert!(app.state.form.is_submit_row_active());
            press(&mut app, KeyCode::Enter);
            assert!(app.state.form.submitting);
            settle(&mut app).await;

            assert_eq!(app.state.current_view, View::Confirmation);
            assert_eq!(app.state.confirmation_id.as_deref(), Some("FR-2026-0042"));
            assert!(!app.state.form.submitting);
            assert!(app.state.form.values().values().all(String::is_empty));
        }

        #[tokio::test(start_paused = true)]
        async fn test_network_failures_end_in_error_panel() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(3)
                .returning(|_| Err(SubmissionError::Network("connection refused".into())));
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            settle(&mut app).await;

            let panel = app.state.error_panel.as_ref().unwrap();
            assert_eq!(panel.title, "Connection Error");
            assert!(panel.can_retry);
            assert!(panel.suggestions[2].contains("franchise@rabuste.com"));
            assert!(!app.state.form.is_busy());
            assert_eq!(app.state.form.value(FieldId::FullName), "Priya Sharma");
            assert!(app
                .state
                .notifications
                .active()
                .iter()
                .all(|n| !n.message.contains("Retrying")));
        }

        #[tokio::test(start_paused = true)]
        async fn test_try_again_resubmits() {
            let mut mock = MockEnquiryClientTrait::new();
            let mut calls = 0;
            mock.expect_submit().times(4).returning(move |_| {
                calls += 1;
                if calls <= 3 {
                    Err(SubmissionError::Timeout)
                } else {
                    Ok("FR-2".to_string())
                }
            });
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            settle(&mut app).await;
            assert_eq!(app.state.error_panel.as_ref().unwrap().title, "Timeout Error");

            press(&mut app, KeyCode::Char('r'));
            assert!(app.state.error_panel.is_none());
            settle(&mut app).await;
            assert_eq!(app.state.confirmation_id.as_deref(), Some("FR-2"));
        }

        #[tokio::test(start_paused = true)]
        async fn test_server_error_panel_has_no_retry() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().times(1).returning(|_| {
                Err(SubmissionError::Server {
                    status: Some(500),
                    message: "Internal Server Error".into(),
                })
            });
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            settle(&mut app).await;

            let panel = app.state.error_panel.as_ref().unwrap();
            assert!(!panel.can_retry);
            press(&mut app, KeyCode::Char('r'));
            assert!(app.state.error_panel.is_some());
            press(&mut app, KeyCode::Esc);
            assert!(app.state.error_panel.is_none());
        }

        #[tokio::test(start_paused = true)]
        async fn test_panel_over_landing_takes_keys() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().times(1).returning(|_| {
                Err(SubmissionError::Server {
                    status: Some(502),
                    message: "Bad Gateway".into(),
                })
            });
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::Landing);
            settle(&mut app).await;
            assert!(app.state.error_panel.is_some());

            press(&mut app, KeyCode::Esc);
            assert!(app.state.error_panel.is_none());
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[tokio::test(start_paused = true)]
        async fn test_try_again_from_landing_returns_to_form() {
            let mut mock = MockEnquiryClientTrait::new();
            let mut calls = 0;
            mock.expect_submit().times(4).returning(move |_| {
                calls += 1;
                if calls <= 3 {
                    Err(SubmissionError::Network("unreachable".into()))
                } else {
                    Ok("FR-5".to_string())
                }
            });
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Esc);
            settle(&mut app).await;
            assert!(app.state.error_panel.as_ref().unwrap().can_retry);

            press(&mut app, KeyCode::Enter);
            assert!(app.state.error_panel.is_none());
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(app.state.wizard.session().screen(), WizardScreen::Closed);
            settle(&mut app).await;
            assert_eq!(app.state.confirmation_id.as_deref(), Some("FR-5"));
        }

        #[tokio::test(start_paused = true)]
        async fn test_second_submit_while_busy_is_ignored() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok("FR-3".to_string()));
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
            settle(&mut app).await;
            assert_eq!(app.state.confirmation_id.as_deref(), Some("FR-3"));
        }

        #[tokio::test(start_paused = true)]
        async fn test_enter_on_confirmation_starts_new_enquiry() {
            let mut mock = MockEnquiryClientTrait::new();
            mock.expect_submit().returning(|_| Ok("FR-4".to_string()));
            let mut app = app_with(mock);

            fill_valid_form(&mut app);
            press(&mut app, KeyCode::Enter);
            settle(&mut app).await;
            press(&mut app, KeyCode::Enter);

            assert_eq!(app.state.current_view, View::Form);
            assert!(app.state.confirmation_id.is_none());
            assert_eq!(app.state.form.active_field_id(), Some(FieldId::FullName));
        }
    }

    #[test]
    fn test_ctrl_x_dismisses_latest_notification() {
        let mut app = App::with_client(
            FranchiseConfig::default(),
            Arc::new(MockEnquiryClientTrait::new()),
            (30, 10),
        )
        .unwrap();
        assert!(!app.state.notifications.is_empty());
        app.handle_key(ctrl('x')).unwrap();
        assert!(app.state.notifications.is_empty());
    }

    #[test]
    fn test_double_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(ctrl('c')).unwrap();
        assert!(!app.should_quit());
        app.handle_key(ctrl('c')).unwrap();
        assert!(app.should_quit());
    }
}
