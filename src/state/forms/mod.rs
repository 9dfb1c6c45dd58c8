//! Form domain layer
//!
//! Field values, the enquiry form state and the declarative validation rules.

mod field;
mod form_state;
mod validation;

pub use field::{FieldId, FieldValue, FormField};
pub use form_state::{EnquiryForm, Form};
pub use validation::ValidationRuleSet;
