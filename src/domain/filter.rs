use serde::{Deserialize, Serialize};

use crate::domain::participant::EntryStatus;
use crate::domain::types::{EventId, PageSize};

/// Filter applied to the participant list of one screen.
///
/// Changing any field starts a new filter epoch.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantFilter {
    pub event_id: Option<EventId>,
    pub entry_status: EntryStatus,
    pub search: String,
    pub page_size: PageSize,
}

impl ParticipantFilter {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id: Some(event_id),
            ..Self::default()
        }
    }

    pub fn entry_status(mut self, entry_status: EntryStatus) -> Self {
        self.entry_status = entry_status;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_string();
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Search term to send, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }
}
