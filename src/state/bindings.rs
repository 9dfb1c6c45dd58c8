//! Key binding table for the wizard
//!
//! Every interactive role of the wizard is bound to a key once at startup.
//! Input handling looks keys up here instead of inspecting them ad hoc.

use crate::error::ConfigurationError;
use crossterm::event::KeyCode;
use std::collections::BTreeMap;

/// An interactive role the wizard exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Open,
    Close,
    Start,
    GoToForm,
    Restart,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Open,
        Role::Close,
        Role::Start,
        Role::GoToForm,
        Role::Restart,
    ];

    /// Name used in the `key_bindings` config section
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Start => "start",
            Self::GoToForm => "go_to_form",
            Self::Restart => "restart",
        }
    }

    fn default_key(&self) -> KeyCode {
        match self {
            Self::Open => KeyCode::Char('a'),
            Self::Close => KeyCode::Esc,
            Self::Start => KeyCode::Enter,
            Self::GoToForm => KeyCode::Char('f'),
            Self::Restart => KeyCode::Char('r'),
        }
    }
}

/// What a key press means to the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Role(Role),
    /// Zero-based option index on the current question
    Answer(usize),
}

/// Highest option index reachable with the digit keys
const MAX_OPTIONS: usize = 4;

/// Resolved key → action table
#[derive(Debug, Clone)]
pub struct BindingTable {
    keys: BTreeMap<Role, KeyCode>,
}

impl BindingTable {
    /// Build the table from defaults plus `overrides` (role name → key).
    ///
    /// Fails when an override is empty or cannot be parsed, or when two
    /// roles end up on the same key.
    pub fn resolve(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigurationError> {
        let mut keys: BTreeMap<Role, KeyCode> = BTreeMap::new();
        for role in Role::ALL {
            let key = match overrides.get(role.name()) {
                Some(raw) if raw.trim().is_empty() => {
                    return Err(ConfigurationError::MissingBinding(role.name()))
                }
                Some(raw) => parse_key(raw).ok_or_else(|| ConfigurationError::UnparsableKey {
                    role: role.name(),
                    key: raw.clone(),
                })?,
                None => role.default_key(),
            };
            if let Some((other, _)) = keys.iter().find(|(_, k)| **k == key) {
                return Err(ConfigurationError::DuplicateBinding {
                    key: key_label(key),
                    first: other.name(),
                    second: role.name(),
                });
            }
            keys.insert(role, key);
        }
        Ok(Self { keys })
    }

    pub fn key_for(&self, role: Role) -> Option<KeyCode> {
        self.keys.get(&role).copied()
    }

    /// Label for hints, e.g. "Enter" or "a"
    pub fn label_for(&self, role: Role) -> String {
        self.key_for(role).map(key_label).unwrap_or_default()
    }

    /// Look up a key. Digits `1`..`4` select answer options.
    pub fn action_for(&self, key: KeyCode) -> Option<WizardAction> {
        if let Some((role, _)) = self.keys.iter().find(|(_, k)| **k == key) {
            return Some(WizardAction::Role(*role));
        }
        match key {
            KeyCode::Char(c) => c
                .to_digit(10)
                .map(|d| d as usize)
                .filter(|d| (1..=MAX_OPTIONS).contains(d))
                .map(|d| WizardAction::Answer(d - 1)),
            _ => None,
        }
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self {
            keys: Role::ALL.iter().map(|r| (*r, r.default_key())).collect(),
        }
    }
}

/// Parse a key name from config: a single character or Enter/Esc/Tab/Space
pub fn parse_key(raw: &str) -> Option<KeyCode> {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                // Digits are reserved for answer options
                (Some(c), None) if !c.is_ascii_digit() => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{other:?}"),
    }
}
