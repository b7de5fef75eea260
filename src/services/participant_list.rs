//! Pagination and aggregate-count state of one participant list screen.
//!
//! [`ParticipantList`] performs no I/O. Every `begin_*` call hands out a
//! ticket describing the request to send, and the matching `complete_*` call
//! applies the response. Tickets carry the list epoch they were issued under;
//! responses for an older epoch are discarded, so a slow reply for a previous
//! filter can never overwrite the current one.
//!
//! The epoch is bumped on every filter change and on every refresh.

use chrono::{DateTime, Utc};

use crate::api::ParticipantQuery;
use crate::api::errors::ApiResult;
use crate::domain::filter::ParticipantFilter;
use crate::domain::participant::{Participant, ParticipantCounts, ParticipantPage};
use crate::domain::scan::ScanTarget;
use crate::domain::types::ParticipantId;
use crate::pagination::{self, DEFAULT_ALL_UPPER_BOUND, PageRequest};
use crate::services::ServiceResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
    /// First page after a filter change or refresh.
    Initial,
    /// Next page requested by "view more".
    More,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTicket {
    pub epoch: u64,
    pub page: usize,
    pub kind: FetchKind,
    pub request: PageRequest,
    pub query: ParticipantQuery,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountTicket {
    pub epoch: u64,
    pub query: ParticipantQuery,
}

/// Page and count requests that should be sent concurrently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchPlan {
    pub page: PageTicket,
    pub counts: CountTicket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response belonged to an older epoch and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ParticipantList {
    filter: ParticipantFilter,
    epoch: u64,
    page: usize,
    records: Vec<Participant>,
    counts: Option<ParticipantCounts>,
    exhausted: bool,
    initial_in_flight: bool,
    more_in_flight: bool,
    all_upper_bound: usize,
}

impl Default for ParticipantList {
    fn default() -> Self {
        Self::new(DEFAULT_ALL_UPPER_BOUND)
    }
}

impl ParticipantList {
    /// Creates an empty list with the default filter and no event selected.
    pub fn new(all_upper_bound: usize) -> Self {
        Self {
            filter: ParticipantFilter::default(),
            epoch: 0,
            page: 1,
            records: Vec::new(),
            counts: None,
            exhausted: true,
            initial_in_flight: false,
            more_in_flight: false,
            all_upper_bound: all_upper_bound.max(1),
        }
    }

    pub fn filter(&self) -> &ParticipantFilter {
        &self.filter
    }

    pub fn participants(&self) -> &[Participant] {
        &self.records
    }

    pub fn counts(&self) -> Option<ParticipantCounts> {
        self.counts
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.initial_in_flight
    }

    pub fn is_loading_more(&self) -> bool {
        self.more_in_flight
    }

    /// Whether a "view more" action would currently issue a request.
    pub fn can_load_more(&self) -> bool {
        self.filter.event_id.is_some()
            && !self.initial_in_flight
            && !self.more_in_flight
            && !self.exhausted
            && !self.filter.page_size.is_all()
    }

    /// Limit requested per page for the current filter.
    pub fn effective_page_size(&self) -> usize {
        pagination::effective_page_size(
            self.filter.page_size,
            self.counts.map(|counts| counts.total),
            self.all_upper_bound,
        )
    }

    pub fn find(&self, id: &ParticipantId) -> Option<&Participant> {
        self.records
            .iter()
            .find(|participant| &participant.id == id)
    }

    /// Finds the loaded record a scanned badge refers to.
    pub fn find_by_target(&self, target: &ScanTarget) -> Option<&Participant> {
        self.records.iter().find(|participant| match target {
            ScanTarget::Email(email) => participant.email.as_ref() == Some(email),
            ScanTarget::Code(code) => participant.id.as_str() == code.as_str(),
        })
    }

    /// Replaces the filter and starts a new epoch.
    ///
    /// Records and counts are cleared immediately. Returns `None` when no
    /// event is selected, in which case nothing needs to be fetched.
    pub fn set_filter(&mut self, filter: ParticipantFilter) -> Option<FetchPlan> {
        self.epoch += 1;
        self.filter = filter;
        self.records.clear();
        self.counts = None;
        self.page = 1;
        self.more_in_flight = false;

        let Some(query) = ParticipantQuery::from_filter(&self.filter) else {
            log::debug!("Filter without event, nothing to fetch");
            self.exhausted = true;
            self.initial_in_flight = false;
            return None;
        };

        self.exhausted = false;
        self.initial_in_flight = true;
        Some(self.plan(query))
    }

    /// Starts reloading page 1 and the counts for the current filter.
    ///
    /// Loaded records stay visible until the new first page arrives.
    pub fn begin_refresh(&mut self) -> Option<FetchPlan> {
        let query = ParticipantQuery::from_filter(&self.filter)?;
        if self.initial_in_flight {
            log::debug!("Refresh already in flight");
            return None;
        }

        self.epoch += 1;
        self.page = 1;
        self.exhausted = false;
        self.initial_in_flight = true;
        self.more_in_flight = false;
        Some(self.plan(query))
    }

    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if !self.can_load_more() {
            log::debug!(
                "Skipping load more: exhausted {}, loading {}, loading more {}",
                self.exhausted,
                self.initial_in_flight,
                self.more_in_flight
            );
            return None;
        }
        let query = ParticipantQuery::from_filter(&self.filter)?;

        self.page += 1;
        self.more_in_flight = true;
        Some(self.page_ticket(query, self.page, FetchKind::More))
    }

    /// Count request for the current filter, `None` without an event.
    pub fn begin_counts(&self) -> Option<CountTicket> {
        let query = ParticipantQuery::from_filter(&self.filter)?;
        Some(CountTicket {
            epoch: self.epoch,
            query,
        })
    }

    pub fn complete_page(
        &mut self,
        ticket: &PageTicket,
        result: ApiResult<ParticipantPage>,
    ) -> ServiceResult<Completion> {
        if ticket.epoch != self.epoch {
            log::debug!(
                "Discarding page {} of epoch {} (current epoch {})",
                ticket.page,
                ticket.epoch,
                self.epoch
            );
            return Ok(Completion::Stale);
        }

        match ticket.kind {
            FetchKind::Initial => self.initial_in_flight = false,
            FetchKind::More => self.more_in_flight = false,
        }

        match result {
            Ok(page) => {
                let returned = page.participants.len();
                let total = page.counts.total;
                self.exhausted = pagination::is_exhausted(ticket.request, returned, total);
                if self.filter.page_size.is_all() && !self.exhausted {
                    // "All" is a single page sized from the last known total.
                    log::warn!(
                        "Loaded {returned} of {total} participants; refresh to load the rest"
                    );
                    self.exhausted = true;
                }
                if ticket.page == 1 {
                    self.records = page.participants;
                } else {
                    self.records.extend(page.participants);
                }
                self.page = ticket.page;
                Ok(Completion::Applied)
            }
            Err(err) => {
                log::error!("Failed to load participants page {}: {err}", ticket.page);
                self.exhausted = true;
                if ticket.kind == FetchKind::More {
                    self.page = ticket.page.saturating_sub(1).max(1);
                }
                Err(err.into())
            }
        }
    }

    pub fn complete_counts(
        &mut self,
        ticket: &CountTicket,
        result: ApiResult<ParticipantCounts>,
    ) -> ServiceResult<Completion> {
        if ticket.epoch != self.epoch {
            log::debug!(
                "Discarding counts of epoch {} (current epoch {})",
                ticket.epoch,
                self.epoch
            );
            return Ok(Completion::Stale);
        }

        match result {
            Ok(counts) => {
                self.counts = Some(counts);
                Ok(Completion::Applied)
            }
            Err(err) => {
                log::error!("Failed to load participant counts: {err}");
                Err(err.into())
            }
        }
    }

    /// Optimistically marks a loaded record as scanned.
    ///
    /// Returns `false` when the record is not loaded or already scanned.
    pub fn mark_scanned(&mut self, id: &ParticipantId, at: DateTime<Utc>) -> bool {
        self.records
            .iter_mut()
            .find(|participant| &participant.id == id)
            .is_some_and(|participant| participant.mark_scanned(at))
    }

    fn plan(&self, query: ParticipantQuery) -> FetchPlan {
        FetchPlan {
            page: self.page_ticket(query.clone(), 1, FetchKind::Initial),
            counts: CountTicket {
                epoch: self.epoch,
                query,
            },
        }
    }

    fn page_ticket(&self, query: ParticipantQuery, page: usize, kind: FetchKind) -> PageTicket {
        let request = PageRequest::for_page(page, self.effective_page_size());
        PageTicket {
            epoch: self.epoch,
            page,
            kind,
            request,
            query: query.paginate(request),
        }
    }
}
