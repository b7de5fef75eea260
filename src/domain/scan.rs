use serde::Serialize;

use crate::domain::types::{AttendeeEmail, NonEmptyString};

/// What a scanned QR code identifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ScanTarget {
    /// Attendee email, usually extracted from a vCard badge.
    Email(AttendeeEmail),
    /// Opaque participant code printed on the badge.
    Code(NonEmptyString),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    /// The backend recorded a new entry.
    Entered,
    /// The backend already had an entry and did not record another one.
    AlreadyEntered,
}

/// Normalized reply of a "mark entered" or session check-in call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanReceipt {
    pub status: ScanStatus,
    pub message: String,
}
