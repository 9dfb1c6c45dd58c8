//! Enquiry submission pipeline: payload, endpoint client and retry loop

mod client;
mod controller;
mod payload;
mod traits;

pub use client::HttpEnquiryClient;
pub use controller::{
    Prepared, RetryPolicy, SubmissionController, SubmissionEvent, SubmissionOutcome,
};
pub use payload::{SubmissionMetadata, USER_AGENT};
pub use traits::EnquiryClientTrait;

#[cfg(test)]
pub use traits::MockEnquiryClientTrait;
