//! User input validated before it reaches the services.

use thiserror::Error;
use validator::ValidationErrors;

pub mod filter;
pub mod login;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid event id")]
    InvalidEventId,

    #[error("invalid entry status")]
    InvalidEntryStatus,

    #[error("invalid page size")]
    InvalidPageSize,
}
