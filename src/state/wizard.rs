//! Franchise qualification wizard
//!
//! `WizardSession` holds the screen and the collected answers and is changed
//! only through its transition methods. Each transition returns the effects
//! (announcements, analytics, focus moves, form hand-off) for the UI layer to
//! carry out. `Wizard` wraps a session with the capability check performed at
//! startup and the post-transition invariant check.

use super::bindings::{BindingTable, Role, WizardAction};
use super::recommendation::{recommend, Recommendation};
use crate::error::{ConfigurationError, WizardError};
use std::fmt;

/// Number of qualification questions
pub const QUESTION_COUNT: usize = 3;

/// Smallest terminal the wizard modal fits in
pub const MIN_TERMINAL_SIZE: (u16, u16) = (40, 12);

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub token: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        prompt: "What's your experience in the food & beverage industry?",
        options: &[
            AnswerOption {
                token: "extensive",
                label: "Extensive (5+ years)",
            },
            AnswerOption {
                token: "some",
                label: "Some experience",
            },
            AnswerOption {
                token: "none",
                label: "New to the industry",
            },
        ],
    },
    Question {
        prompt: "What investment range are you considering?",
        options: &[
            AnswerOption {
                token: "75-100k",
                label: "₹75K - ₹100K",
            },
            AnswerOption {
                token: "100-150k",
                label: "₹100K - ₹150K",
            },
            AnswerOption {
                token: "150k+",
                label: "₹150K+",
            },
            AnswerOption {
                token: "exploring",
                label: "Still exploring",
            },
        ],
    },
    Question {
        prompt: "How involved do you want to be in daily operations?",
        options: &[
            AnswerOption {
                token: "hands-on",
                label: "Hands-on owner-operator",
            },
            AnswerOption {
                token: "semi-passive",
                label: "Semi-passive with a manager",
            },
            AnswerOption {
                token: "passive",
                label: "Passive investor",
            },
        ],
    },
];

/// Token for option `index` of question `question` (1-based), empty if there is none
pub fn option_token(question: usize, index: usize) -> &'static str {
    question
        .checked_sub(1)
        .and_then(|q| QUESTIONS.get(q))
        .and_then(|q| q.options.get(index))
        .map(|o| o.token)
        .unwrap_or("")
}

/// Screens of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardScreen {
    #[default]
    Closed,
    Welcome,
    Question1,
    Question2,
    Question3,
    Results,
}

impl WizardScreen {
    /// 1-based question number for question screens
    pub fn question_number(&self) -> Option<usize> {
        match self {
            Self::Question1 => Some(1),
            Self::Question2 => Some(2),
            Self::Question3 => Some(3),
            _ => None,
        }
    }

    fn question(number: usize) -> Self {
        match number {
            1 => Self::Question1,
            2 => Self::Question2,
            _ => Self::Question3,
        }
    }

    /// How many answers must have been collected on this screen
    fn expected_answers(&self) -> Option<usize> {
        match self {
            Self::Closed => None,
            Self::Welcome => Some(0),
            Self::Question1 => Some(0),
            Self::Question2 => Some(1),
            Self::Question3 => Some(2),
            Self::Results => Some(QUESTION_COUNT),
        }
    }
}

impl fmt::Display for WizardScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Answers in the order they were given; position `i` answers question `i + 1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(Vec<String>);

impl Answers {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Answer to question `number` (1-based)
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .map(String::as_str)
    }

    /// (question number, token) pairs in answer order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().enumerate().map(|(i, t)| (i + 1, t.as_str()))
    }

    fn record(&mut self, number: usize, token: &str) {
        let index = number - 1;
        if index < self.0.len() {
            self.0[index] = token.to_string();
        } else if index == self.0.len() && index < QUESTION_COUNT {
            self.0.push(token.to_string());
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for Answers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(n, t)| format!("q{n}={t}")).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Analytics event emitted by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub data: Vec<(&'static str, String)>,
}

impl AnalyticsEvent {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            data: Vec::new(),
        }
    }

    fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.data.push((key, value.into()));
        self
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    Announce(String),
    Track(AnalyticsEvent),
    FocusCloseControl,
    FocusBubble,
    /// Leave the wizard and put the user on the first form field
    HandOffToForm,
}

/// Screen and collected answers of one wizard session
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    screen: WizardScreen,
    answers: Answers,
    recommendation: Option<Recommendation>,
    /// Screen to restore when the wizard is opened again
    parked: Option<WizardScreen>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> WizardScreen {
        self.screen
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.screen != WizardScreen::Closed
    }

    /// Show the wizard, resuming where the user left off (Welcome for a fresh session)
    pub fn open(&mut self) -> Vec<WizardEffect> {
        if self.is_open() {
            return Vec::new();
        }
        self.screen = self.parked.take().unwrap_or(WizardScreen::Welcome);
        vec![
            WizardEffect::FocusCloseControl,
            WizardEffect::Announce("Franchise qualification helper opened".into()),
            WizardEffect::Track(AnalyticsEvent::new("wizard_opened")),
        ]
    }

    /// Hide the wizard. Answers are kept; only `reset` erases them.
    pub fn close(&mut self) -> Vec<WizardEffect> {
        if !self.is_open() {
            return Vec::new();
        }
        self.parked = Some(self.screen);
        self.screen = WizardScreen::Closed;
        vec![
            WizardEffect::FocusBubble,
            WizardEffect::Announce("Franchise qualification helper closed".into()),
            WizardEffect::Track(AnalyticsEvent::new("wizard_closed")),
        ]
    }

    /// Welcome → Question1
    pub fn start_questions(&mut self) -> Vec<WizardEffect> {
        if self.screen != WizardScreen::Welcome {
            return Vec::new();
        }
        self.screen = WizardScreen::Question1;
        vec![
            WizardEffect::Announce("Starting qualification questions".into()),
            WizardEffect::Track(AnalyticsEvent::new("wizard_questions_started")),
        ]
    }

    /// Record `token` for the current question and move on.
    ///
    /// Empty tokens and answers outside a question screen are ignored.
    pub fn submit_answer(&mut self, token: &str) -> Vec<WizardEffect> {
        let Some(number) = self.screen.question_number() else {
            return Vec::new();
        };
        if token.is_empty() {
            return Vec::new();
        }

        self.answers.record(number, token);
        let answered = AnalyticsEvent::new("wizard_question_answered")
            .with("question", number.to_string())
            .with("answer", token);

        if number < QUESTION_COUNT {
            self.screen = WizardScreen::question(number + 1);
            vec![
                WizardEffect::Announce(format!(
                    "Question {} of {QUESTION_COUNT}",
                    number + 1
                )),
                WizardEffect::Track(answered),
            ]
        } else {
            self.recommendation = Some(recommend(
                self.answers.get(1),
                self.answers.get(2),
                self.answers.get(3),
            ));
            self.screen = WizardScreen::Results;
            vec![
                WizardEffect::Announce("Qualification results ready".into()),
                WizardEffect::Track(answered),
                WizardEffect::Track(
                    AnalyticsEvent::new("wizard_results_shown")
                        .with("answers", self.answers.to_string()),
                ),
            ]
        }
    }

    /// Any state → Welcome with no answers
    pub fn reset(&mut self) -> Vec<WizardEffect> {
        if self.screen == WizardScreen::Welcome && self.answers.is_empty() {
            return Vec::new();
        }
        self.answers.clear();
        self.recommendation = None;
        self.parked = None;
        self.screen = WizardScreen::Welcome;
        vec![
            WizardEffect::Announce("Qualification helper reset".into()),
            WizardEffect::Track(AnalyticsEvent::new("wizard_reset")),
        ]
    }

    /// Close the wizard and hand the user over to the enquiry form
    pub fn go_to_form(&mut self) -> Vec<WizardEffect> {
        let mut effects = self.close();
        effects.retain(|e| !matches!(e, WizardEffect::FocusBubble));
        effects.push(WizardEffect::HandOffToForm);
        effects.push(WizardEffect::Track(AnalyticsEvent::new("wizard_go_to_form")));
        effects
    }

    /// Screen shown, or parked while closed
    fn effective_screen(&self) -> WizardScreen {
        match self.screen {
            WizardScreen::Closed => self.parked.unwrap_or(WizardScreen::Welcome),
            screen => screen,
        }
    }

    /// Check that the screen agrees with the number of answers
    pub fn check_invariants(&self) -> Result<(), WizardError> {
        let screen = self.effective_screen();
        let consistent = self.answers.len() <= QUESTION_COUNT
            && screen.expected_answers() == Some(self.answers.len())
            && (screen == WizardScreen::Results) == self.recommendation.is_some();
        if consistent {
            Ok(())
        } else {
            Err(WizardError::InconsistentState {
                screen: screen.to_string(),
                answers: self.answers.len(),
            })
        }
    }
}

/// Whether the wizard may run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Enabled,
    Disabled(String),
}

/// Wizard session guarded by the startup capability check
#[derive(Debug, Clone)]
pub struct Wizard {
    session: WizardSession,
    bindings: BindingTable,
    capability: Capability,
}

impl Wizard {
    /// Resolve the binding table and check the terminal.
    ///
    /// On any configuration problem the wizard comes up disabled.
    pub fn initialize(
        bindings: Result<BindingTable, ConfigurationError>,
        terminal_size: (u16, u16),
    ) -> Self {
        let (width, height) = terminal_size;
        let checked = bindings.and_then(|table| {
            if width < MIN_TERMINAL_SIZE.0 || height < MIN_TERMINAL_SIZE.1 {
                Err(ConfigurationError::TerminalTooSmall { width, height })
            } else {
                Ok(table)
            }
        });
        match checked {
            Ok(bindings) => Self {
                session: WizardSession::new(),
                bindings,
                capability: Capability::Enabled,
            },
            Err(err) => {
                tracing::info!("Wizard disabled: {err}");
                Self {
                    session: WizardSession::new(),
                    bindings: BindingTable::default(),
                    capability: Capability::Disabled(err.to_string()),
                }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capability == Capability::Enabled
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Turn the wizard off after a fault; the session is closed
    pub fn disable(&mut self, reason: impl Into<String>) {
        self.session = WizardSession::new();
        self.capability = Capability::Disabled(reason.into());
    }

    /// Run `action` against the session.
    ///
    /// A disabled wizard ignores everything except the form hand-off.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<Vec<WizardEffect>, WizardError> {
        if !self.is_enabled() {
            return Ok(match action {
                WizardAction::Role(Role::GoToForm) => vec![WizardEffect::HandOffToForm],
                _ => Vec::new(),
            });
        }

        let effects = match action {
            WizardAction::Role(Role::Open) => self.session.open(),
            WizardAction::Role(Role::Close) => self.session.close(),
            WizardAction::Role(Role::Start) => self.session.start_questions(),
            WizardAction::Role(Role::GoToForm) => self.session.go_to_form(),
            WizardAction::Role(Role::Restart) => {
                if self.session.screen() == WizardScreen::Results {
                    self.session.reset()
                } else {
                    Vec::new()
                }
            }
            WizardAction::Answer(index) => {
                let token = self
                    .session
                    .screen()
                    .question_number()
                    .map(|q| option_token(q, index))
                    .unwrap_or("");
                self.session.submit_answer(token)
            }
        };

        self.session.check_invariants()?;
        Ok(effects)
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut WizardSession {
        &mut self.session
    }
}
