//! Form field value objects

/// Identifies a field of the enquiry form.
///
/// Declaration order is the on-screen order and the order errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    FullName,
    Email,
    Phone,
    CityState,
    InvestmentRange,
    Message,
    Acknowledgment,
}

impl FieldId {
    /// Wire name used by the enquiry endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CityState => "cityState",
            Self::InvestmentRange => "investmentRange",
            Self::Message => "message",
            Self::Acknowledgment => "acknowledgment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::CityState => "City & State",
            Self::InvestmentRange => "Investment Range",
            Self::Message => "Tell us about yourself (optional)",
            Self::Acknowledgment => "Acknowledgment",
        }
    }
}

/// Investment ranges offered by the form's select field
pub const INVESTMENT_RANGES: &[&str] = &[
    "₹50K - ₹75K",
    "₹75K - ₹100K",
    "₹100K - ₹150K",
    "₹150K - ₹200K",
    "₹200K+",
];

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Index into the field's option list, `None` until the user picks one
    Choice(Option<usize>),
    Checkbox(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub value: FieldValue,
    pub is_multiline: bool,
    pub options: &'static [&'static str],
}

impl FormField {
    /// Create a new text field
    pub fn text(id: FieldId, is_multiline: bool) -> Self {
        Self {
            id,
            value: FieldValue::Text(String::new()),
            is_multiline,
            options: &[],
        }
    }

    /// Create a select field over a fixed option list
    pub fn choice(id: FieldId, options: &'static [&'static str]) -> Self {
        Self {
            id,
            value: FieldValue::Choice(None),
            is_multiline: false,
            options,
        }
    }

    pub fn checkbox(id: FieldId) -> Self {
        Self {
            id,
            value: FieldValue::Checkbox(false),
            is_multiline: false,
            options: &[],
        }
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    /// The value as the validator and the payload see it.
    ///
    /// Text is trimmed, an unselected choice is empty and an unchecked box is empty.
    pub fn value_text(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Choice(Some(i)) => self.options.get(*i).copied().unwrap_or("").to_string(),
            FieldValue::Choice(None) => String::new(),
            FieldValue::Checkbox(true) => "true".to_string(),
            FieldValue::Checkbox(false) => String::new(),
        }
    }

    /// Raw text, untrimmed (empty for non-text fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => {
                if c == '\n' && !self.is_multiline {
                    return;
                }
                s.push(c);
            }
            FieldValue::Choice(_) => {
                if let Some(d) = c.to_digit(10) {
                    let idx = d as usize;
                    if (1..=self.options.len()).contains(&idx) {
                        self.value = FieldValue::Choice(Some(idx - 1));
                    }
                }
            }
            FieldValue::Checkbox(checked) => {
                if c == ' ' || c == 'x' {
                    *checked = !*checked;
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Choice(choice) => *choice = None,
            FieldValue::Checkbox(_) => {}
        }
    }

    /// Step through the options of a select field (wraps around)
    pub fn cycle_choice(&mut self, forward: bool) {
        let count = self.options.len();
        if count == 0 {
            return;
        }
        if let FieldValue::Choice(choice) = &mut self.value {
            *choice = Some(match (*choice, forward) {
                (None, true) => 0,
                (None, false) => count - 1,
                (Some(i), true) => (i + 1) % count,
                (Some(0), false) => count - 1,
                (Some(i), false) => i - 1,
            });
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice(choice) => *choice = None,
            FieldValue::Checkbox(checked) => *checked = false,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(Some(i)) => self.options.get(*i).copied().unwrap_or("").to_string(),
            FieldValue::Choice(None) => "Select your investment range".to_string(),
            FieldValue::Checkbox(checked) => format!(
                "[{}] I understand this is a premium Robusta-only concept",
                if *checked { "x" } else { " " }
            ),
        }
    }
}

/// Reformat a phone number as `(xxx) xxx-xxxx` when it has exactly ten digits.
///
/// Anything else is returned untouched.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}
