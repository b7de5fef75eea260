use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AttendeeEmail, ParticipantId};

/// Entry state filter applied to the participant list.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    All,
    Scanned,
    NotScanned,
}

impl EntryStatus {
    /// Value sent to the backend, `None` meaning "do not filter".
    pub fn as_query_value(self) -> Option<&'static str> {
        match self {
            EntryStatus::All => None,
            EntryStatus::Scanned => Some("scanned"),
            EntryStatus::NotScanned => Some("not_scanned"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub company_name: Option<String>,
    pub email: Option<AttendeeEmail>,
    pub is_scanned: bool,
    /// Set by the backend, or by the client when a scan is applied optimistically.
    pub scanned_at: Option<DateTime<Utc>>,
}

impl Participant {
    /// Marks the participant as entered at `at` unless already scanned.
    ///
    /// Returns `false` when the record was already marked.
    pub fn mark_scanned(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_scanned {
            return false;
        }
        self.is_scanned = true;
        self.scanned_at = Some(at);
        true
    }
}

/// Aggregate counts over the whole filtered set, as delivered by the backend.
///
/// The three values are kept exactly as received; the client never derives one
/// from the others.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantCounts {
    pub total: usize,
    pub scanned: usize,
    pub not_scanned: usize,
}

impl ParticipantCounts {
    /// Whether the aggregates add up. Only used for diagnostics.
    pub fn is_consistent(&self) -> bool {
        self.scanned + self.not_scanned == self.total
    }
}

/// One page returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantPage {
    pub participants: Vec<Participant>,
    pub counts: ParticipantCounts,
}
