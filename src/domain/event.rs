use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EventId, NonEmptyString, SessionId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: NonEmptyString,
    pub venue: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// A session (talk, workshop, meal slot) inside an event with its own check-in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventSession {
    pub id: SessionId,
    pub event_id: EventId,
    pub title: NonEmptyString,
    pub starts_at: Option<DateTime<Utc>>,
    pub checked_in: Option<usize>,
}
