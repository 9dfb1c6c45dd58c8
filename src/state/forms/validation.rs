//! Declarative field rules and the validator that applies them

use super::field::FieldId;
use regex::Regex;
use std::collections::BTreeMap;

/// Format check run after the length checks
#[derive(Debug, Clone)]
pub enum FormatCheck {
    Pattern(Regex),
    /// Count of ASCII digits once formatting characters are ignored
    DigitCount { min: usize, max: usize },
}

impl FormatCheck {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(value),
            Self::DigitCount { min, max } => {
                let digits = value.chars().filter(char::is_ascii_digit).count();
                (*min..=*max).contains(&digits)
            }
        }
    }
}

/// Messages reported for each failing check
#[derive(Debug, Clone, Default)]
pub struct RuleMessages {
    pub required: String,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<FormatCheck>,
    pub messages: RuleMessages,
}

impl FieldRule {
    /// Run the checks in order (required, min, max, format) and return the
    /// first failing message.
    pub fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();

        if value.is_empty() {
            // Empty values are governed solely by `required`
            return self.required.then(|| self.messages.required.clone());
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Some(self.message_or_required(&self.messages.min_length));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Some(self.message_or_required(&self.messages.max_length));
            }
        }
        if let Some(format) = &self.format {
            if !format.accepts(value) {
                return Some(self.message_or_required(&self.messages.pattern));
            }
        }
        None
    }

    fn message_or_required(&self, message: &Option<String>) -> String {
        message
            .clone()
            .unwrap_or_else(|| self.messages.required.clone())
    }
}

/// Static per-field rule table
#[derive(Debug, Clone, Default)]
pub struct ValidationRuleSet {
    rules: BTreeMap<FieldId, FieldRule>,
}

impl ValidationRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, field: FieldId, rule: FieldRule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    pub fn rule(&self, field: FieldId) -> Option<&FieldRule> {
        self.rules.get(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.rules.keys().copied()
    }

    /// Rules of the franchise enquiry form
    pub fn franchise_enquiry() -> Result<Self, regex::Error> {
        Ok(Self::new()
            .with_rule(
                FieldId::FullName,
                FieldRule {
                    required: true,
                    min_length: Some(2),
                    max_length: Some(50),
                    format: Some(FormatCheck::Pattern(Regex::new(r"^[a-zA-Z\s'-]+$")?)),
                    messages: RuleMessages {
                        required: "Full name is required".into(),
                        min_length: Some("Name must be at least 2 characters".into()),
                        max_length: Some("Name must be less than 50 characters".into()),
                        pattern: Some(
                            "Please enter a valid name (letters, spaces, hyphens, and apostrophes only)"
                                .into(),
                        ),
                    },
                },
            )
            .with_rule(
                FieldId::Email,
                FieldRule {
                    required: true,
                    format: Some(FormatCheck::Pattern(Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?)),
                    messages: RuleMessages {
                        required: "Email address is required".into(),
                        pattern: Some("Please enter a valid email address".into()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .with_rule(
                FieldId::Phone,
                FieldRule {
                    required: true,
                    format: Some(FormatCheck::DigitCount { min: 10, max: 15 }),
                    messages: RuleMessages {
                        required: "Phone number is required".into(),
                        pattern: Some("Please enter a valid phone number (at least 10 digits)".into()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .with_rule(
                FieldId::CityState,
                FieldRule {
                    required: true,
                    min_length: Some(3),
                    max_length: Some(100),
                    format: Some(FormatCheck::Pattern(Regex::new(r"^[a-zA-Z\s,.-]+$")?)),
                    messages: RuleMessages {
                        required: "City & State is required".into(),
                        min_length: Some("Please enter at least city and state".into()),
                        max_length: Some("Location must be less than 100 characters".into()),
                        pattern: Some("Please enter a valid city and state".into()),
                    },
                },
            )
            .with_rule(
                FieldId::InvestmentRange,
                FieldRule {
                    required: true,
                    messages: RuleMessages {
                        required: "Please select your investment range".into(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .with_rule(
                FieldId::Message,
                FieldRule {
                    max_length: Some(MESSAGE_MAX_LENGTH),
                    messages: RuleMessages {
                        max_length: Some(format!(
                            "Message must be {MESSAGE_MAX_LENGTH} characters or fewer"
                        )),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .with_rule(
                FieldId::Acknowledgment,
                FieldRule {
                    required: true,
                    messages: RuleMessages {
                        required: "Please acknowledge that you understand this is a premium Robusta-only concept".into(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            ))
    }
}

/// Longest accepted message body
pub const MESSAGE_MAX_LENGTH: usize = 500;

/// Validate one field. Fields without a rule always pass.
pub fn validate_field(field: FieldId, value: &str, rules: &ValidationRuleSet) -> Option<String> {
    rules.rule(field).and_then(|rule| rule.check(value))
}

/// Validate every field that has a rule; only failing fields appear in the result.
///
/// A field missing from `values` is treated as empty.
pub fn validate_form(
    values: &BTreeMap<FieldId, String>,
    rules: &ValidationRuleSet,
) -> BTreeMap<FieldId, String> {
    rules
        .fields()
        .filter_map(|field| {
            let value = values.get(&field).map(String::as_str).unwrap_or("");
            validate_field(field, value, rules).map(|message| (field, message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rules() -> ValidationRuleSet {
        ValidationRuleSet::franchise_enquiry().unwrap()
    }

    fn valid_values() -> BTreeMap<FieldId, String> {
        BTreeMap::from([
            (FieldId::FullName, "Priya Sharma".to_string()),
            (FieldId::Email, "priya@example.com".to_string()),
            (FieldId::Phone, "(555) 123-4567".to_string()),
            (FieldId::CityState, "Surat, Gujarat".to_string()),
            (FieldId::InvestmentRange, "₹100K - ₹150K".to_string()),
            (FieldId::Message, String::new()),
            (FieldId::Acknowledgment, "true".to_string()),
        ])
    }

    mod field_checks {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_email_message() {
            assert_eq!(
                validate_field(FieldId::Email, "not-an-email", &rules()),
                Some("Please enter a valid email address".to_string())
            );
        }

        #[test]
        fn test_required_wins_over_everything() {
            assert_eq!(
                validate_field(FieldId::FullName, "   ", &rules()),
                Some("Full name is required".to_string())
            );
        }

        #[test]
        fn test_min_length_checked_before_pattern() {
            // "1" is both too short and not letters; the length message comes first
            assert_eq!(
                validate_field(FieldId::FullName, "1", &rules()),
                Some("Name must be at least 2 characters".to_string())
            );
        }

        #[test]
        fn test_max_length_checked_before_pattern() {
            let long = "9".repeat(51);
            assert_eq!(
                validate_field(FieldId::FullName, &long, &rules()),
                Some("Name must be less than 50 characters".to_string())
            );
        }

        #[test]
        fn test_pattern_failure() {
            assert_eq!(
                validate_field(FieldId::CityState, "Surat 395007", &rules()),
                Some("Please enter a valid city and state".to_string())
            );
        }

        #[test]
        fn test_phone_digit_count() {
            assert_eq!(validate_field(FieldId::Phone, "(555) 123-4567", &rules()), None);
            assert_eq!(validate_field(FieldId::Phone, "+91 98765 43210", &rules()), None);
            assert_eq!(
                validate_field(FieldId::Phone, "555-1234", &rules()),
                Some("Please enter a valid phone number (at least 10 digits)".to_string())
            );
            assert_eq!(
                validate_field(FieldId::Phone, "1234567890123456", &rules()),
                Some("Please enter a valid phone number (at least 10 digits)".to_string())
            );
        }

        #[test]
        fn test_optional_empty_field_passes() {
            assert_eq!(validate_field(FieldId::Message, "", &rules()), None);
        }

        #[test]
        fn test_optional_field_still_length_checked() {
            let long = "a".repeat(MESSAGE_MAX_LENGTH + 1);
            assert_eq!(
                validate_field(FieldId::Message, &long, &rules()),
                Some("Message must be 500 characters or fewer".to_string())
            );
        }

        #[test]
        fn test_pattern_skipped_for_empty_optional_value() {
            let rules = ValidationRuleSet::new().with_rule(
                FieldId::CityState,
                FieldRule {
                    required: false,
                    format: Some(FormatCheck::Pattern(Regex::new("^x+$").unwrap())),
                    messages: RuleMessages {
                        pattern: Some("only x".into()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            );
            assert_eq!(validate_field(FieldId::CityState, "", &rules), None);
            assert_eq!(
                validate_field(FieldId::CityState, "y", &rules),
                Some("only x".to_string())
            );
        }

        #[test]
        fn test_field_without_rule_passes() {
            let rules = ValidationRuleSet::new();
            assert_eq!(validate_field(FieldId::Email, "", &rules), None);
        }

        #[test]
        fn test_length_counts_characters_not_bytes() {
            // Two non-ASCII letters: 2 chars, 4+ bytes. Length passes, pattern fails.
            assert_eq!(
                validate_field(FieldId::FullName, "éé", &rules()),
                Some(
                    "Please enter a valid name (letters, spaces, hyphens, and apostrophes only)"
                        .to_string()
                )
            );
        }
    }

    mod form_checks {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_form_has_no_errors() {
            assert!(validate_form(&valid_values(), &rules()).is_empty());
        }

        #[test]
        fn test_unchecked_acknowledgment_is_the_only_error() {
            let mut values = valid_values();
            values.insert(FieldId::Acknowledgment, String::new());
            let errors = validate_form(&values, &rules());
            assert_eq!(
                errors,
                BTreeMap::from([(
                    FieldId::Acknowledgment,
                    "Please acknowledge that you understand this is a premium Robusta-only concept"
                        .to_string()
                )])
            );
        }

        #[test]
        fn test_missing_values_count_as_empty() {
            let errors = validate_form(&BTreeMap::new(), &rules());
            let failing: Vec<_> = errors.keys().copied().collect();
            assert_eq!(
                failing,
                vec![
                    FieldId::FullName,
                    FieldId::Email,
                    FieldId::Phone,
                    FieldId::CityState,
                    FieldId::InvestmentRange,
                    FieldId::Acknowledgment,
                ]
            );
        }
    }
}
