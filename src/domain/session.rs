//! Authenticated staff session.
//!
//! A [`Session`] is created by a successful login and consumed by logout.
//! Controllers borrow it, so none of them can outlive the login that created
//! them.

use std::fmt::{Debug, Formatter};

use serde::Deserialize;

use crate::domain::types::{AttendeeEmail, NonEmptyString, PartnerId, StaffId};

/// Event partner the staff member works for.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Partner {
    pub id: PartnerId,
    pub name: NonEmptyString,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: NonEmptyString,
    pub email: AttendeeEmail,
}

/// Login credentials after form validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: AttendeeEmail,
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct Session {
    token: String,
    pub user: StaffMember,
    pub partner: Partner,
}

impl Session {
    pub fn new(token: impl Into<String>, user: StaffMember, partner: Partner) -> Self {
        Self {
            token: token.into(),
            user,
            partner,
        }
    }

    /// Bearer token attached to every authorized request.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("partner", &self.partner)
            .finish()
    }
}
