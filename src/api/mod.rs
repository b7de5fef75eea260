//! Network contract of the check-in backend.
//!
//! Each concern is a separate trait so services can require only what they
//! use. [`HttpApi`] implements all of them over REST; tests use the mockall
//! mocks from [`mock`].

use crate::{
    api::errors::ApiResult,
    domain::{
        event::{Event, EventSession},
        filter::ParticipantFilter,
        participant::{EntryStatus, ParticipantCounts, ParticipantPage},
        scan::{ScanReceipt, ScanTarget},
        session::{Credentials, Session},
        types::{EventId, ParticipantId, PartnerId, SessionId},
    },
    pagination::PageRequest,
};

#[cfg(feature = "http")]
pub mod auth;
pub mod errors;
#[cfg(feature = "http")]
pub mod event;
#[cfg(feature = "http")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
#[cfg(feature = "http")]
pub mod participant;

#[cfg(feature = "http")]
pub use http::HttpApi;

/// Participant listing request scoped to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantQuery {
    pub event_id: EventId,
    pub entry_status: EntryStatus,
    pub search: Option<String>,
    pub pagination: Option<PageRequest>,
}

impl ParticipantQuery {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            entry_status: EntryStatus::All,
            search: None,
            pagination: None,
        }
    }

    /// Builds the unpaginated query for `filter`, `None` without an event.
    pub fn from_filter(filter: &ParticipantFilter) -> Option<Self> {
        let event_id = filter.event_id.clone()?;
        let mut query = Self::new(event_id).entry_status(filter.entry_status);
        if let Some(term) = filter.search_term() {
            query = query.search(term);
        }
        Some(query)
    }

    pub fn entry_status(mut self, entry_status: EntryStatus) -> Self {
        self.entry_status = entry_status;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request);
        self
    }
}

pub trait AuthApi {
    fn login(&self, credentials: &Credentials) -> ApiResult<Session>;
    fn logout(&self, session: &Session) -> ApiResult<()>;
}

pub trait EventReader {
    fn list_events(&self, session: &Session, partner_id: &PartnerId) -> ApiResult<Vec<Event>>;
    fn list_event_sessions(
        &self,
        session: &Session,
        event_id: &EventId,
    ) -> ApiResult<Vec<EventSession>>;
}

pub trait ParticipantReader {
    fn list_participants(
        &self,
        session: &Session,
        query: &ParticipantQuery,
    ) -> ApiResult<ParticipantPage>;
    /// Aggregates over the whole filtered set; pagination in `query` is ignored.
    fn count_participants(
        &self,
        session: &Session,
        query: &ParticipantQuery,
    ) -> ApiResult<ParticipantCounts>;
}

pub trait ParticipantWriter {
    fn mark_participant_scanned(
        &self,
        session: &Session,
        participant_id: &ParticipantId,
        event_id: &EventId,
    ) -> ApiResult<ScanReceipt>;
    fn mark_scanned_by_target(
        &self,
        session: &Session,
        event_id: &EventId,
        target: &ScanTarget,
    ) -> ApiResult<ScanReceipt>;
}

pub trait SessionCheckInWriter {
    fn check_in_to_session(
        &self,
        session: &Session,
        session_id: &SessionId,
        target: &ScanTarget,
    ) -> ApiResult<ScanReceipt>;
}
