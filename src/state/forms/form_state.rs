//! Enquiry form state

use super::field::{format_phone_number, FieldId, FormField, INVESTMENT_RANGES};
use super::validation::{validate_field, validate_form, ValidationRuleSet};
use crate::submission::SubmissionEvent;
use std::collections::BTreeMap;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The franchise enquiry form: values, inline errors and submission flags
#[derive(Debug, Clone)]
pub struct EnquiryForm {
    fields: Vec<FormField>,
    /// Current error per field; absent means valid
    pub errors: BTreeMap<FieldId, String>,
    /// An attempt is on the wire
    pub submitting: bool,
    /// A retry is scheduled and waiting for its back-off delay
    pub retry_pending: bool,
    pub retry_count: u32,
    /// Index into the fields, `fields.len()` is the submit button row
    pub active_field_index: usize,
}

impl EnquiryForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::text(FieldId::FullName, false),
                FormField::text(FieldId::Email, false),
                FormField::text(FieldId::Phone, false),
                FormField::text(FieldId::CityState, false),
                FormField::choice(FieldId::InvestmentRange, INVESTMENT_RANGES),
                FormField::text(FieldId::Message, true),
                FormField::checkbox(FieldId::Acknowledgment),
            ],
            errors: BTreeMap::new(),
            submitting: false,
            retry_pending: false,
            retry_count: 0,
            active_field_index: 0,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Index of the submit button row
    pub fn submit_row(&self) -> usize {
        self.fields.len()
    }

    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == self.submit_row()
    }

    pub fn active_field_id(&self) -> Option<FieldId> {
        self.get_field(self.active_field_index).map(|f| f.id)
    }

    /// Whether a submission (attempt or pending retry) is under way
    pub fn is_busy(&self) -> bool {
        self.submitting || self.retry_pending
    }

    /// Current values keyed by field, as validation and the payload see them
    pub fn values(&self) -> BTreeMap<FieldId, String> {
        self.fields
            .iter()
            .map(|f| (f.id, f.value_text()))
            .collect()
    }

    pub fn value(&self, id: FieldId) -> String {
        self.field(id).map(FormField::value_text).unwrap_or_default()
    }

    /// Focus a field, clearing its inline error
    pub fn focus(&mut self, index: usize) {
        self.set_active_field(index);
        if let Some(id) = self.active_field_id() {
            self.errors.remove(&id);
        }
    }

    /// The user left `id`: tidy the value and validate it
    pub fn blur(&mut self, id: FieldId, rules: &ValidationRuleSet) -> Option<String> {
        if id == FieldId::Phone {
            if let Some(field) = self.field_mut(id) {
                let formatted = format_phone_number(field.as_text().trim());
                field.set_text(formatted);
            }
        }
        let error = validate_field(id, &self.value(id), rules);
        match &error {
            Some(message) => {
                self.errors.insert(id, message.clone());
            }
            None => {
                self.errors.remove(&id);
            }
        }
        error
    }

    /// Move focus forward, validating the field being left
    pub fn advance(&mut self, rules: &ValidationRuleSet) {
        if let Some(id) = self.active_field_id() {
            self.blur(id, rules);
        }
        self.next_field();
        self.focus(self.active_field_index);
    }

    /// Move focus backward, validating the field being left
    pub fn retreat(&mut self, rules: &ValidationRuleSet) {
        if let Some(id) = self.active_field_id() {
            self.blur(id, rules);
        }
        self.prev_field();
        self.focus(self.active_field_index);
    }

    /// Validate every field and replace the inline errors
    pub fn validate_all(&mut self, rules: &ValidationRuleSet) -> BTreeMap<FieldId, String> {
        self.errors = validate_form(&self.values(), rules);
        self.errors.clone()
    }

    /// Focus the first field that has an error
    pub fn focus_first_error(&mut self) {
        if let Some(index) = self
            .fields
            .iter()
            .position(|f| self.errors.contains_key(&f.id))
        {
            self.set_active_field(index);
        }
    }

    /// "n / 500 characters"
    pub fn message_counter(&self) -> (usize, usize) {
        let len = self
            .field(FieldId::Message)
            .map(|f| f.as_text().chars().count())
            .unwrap_or(0);
        (len, super::validation::MESSAGE_MAX_LENGTH)
    }

    /// Back to initial values, as after a successful submission
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.errors.clear();
        self.submitting = false;
        self.retry_pending = false;
        self.retry_count = 0;
        self.active_field_index = 0;
    }

    /// Fold a progress event from the submission loop into the form
    pub fn apply(&mut self, event: &SubmissionEvent) {
        match event {
            SubmissionEvent::AttemptStarted { retry_count } => {
                self.submitting = true;
                self.retry_pending = false;
                self.retry_count = *retry_count;
            }
            SubmissionEvent::RetryScheduled { retry_count, .. } => {
                self.submitting = false;
                self.retry_pending = true;
                self.retry_count = *retry_count;
            }
            SubmissionEvent::Finished(outcome) => {
                if outcome.is_success() {
                    self.reset();
                } else {
                    self.submitting = false;
                    self.retry_pending = false;
                }
            }
        }
    }
}

impl Default for EnquiryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for EnquiryForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}
