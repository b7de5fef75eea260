//! Transport-agnostic check-in services.
//!
//! Services accept any implementation of the [`crate::api`] traits and turn
//! every failure into a single [`ServiceError`] the UI can show as-is.

use thiserror::Error;

use crate::api::errors::ApiError;

pub mod auth;
pub mod events;
pub mod participant_list;
pub mod participants;
pub mod scan;
pub mod sessions;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Participant already checked in")]
    AlreadyScanned,

    #[error("Select an event first")]
    NoEventSelected,

    #[error("Participant not found")]
    NotFound,

    #[error("Form error: {0}")]
    Form(String),

    #[error("Invalid value: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
