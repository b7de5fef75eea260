//! Participant list controller driving [`ParticipantList`] against the API.

use std::thread;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{ParticipantReader, ParticipantWriter};
use crate::domain::filter::ParticipantFilter;
use crate::domain::participant::{ParticipantCounts, ParticipantPage};
use crate::domain::session::Session;
use crate::domain::types::{EventId, PageSize};
use crate::dto::participants::ParticipantListView;
use crate::models::config::ClientConfig;
use crate::services::ServiceResult;
use crate::services::participant_list::{FetchPlan, ParticipantList};

/// Owns the list state of one participant screen.
///
/// Borrows the API and the [`Session`]; dropping the controller discards all
/// of its state.
///
/// Every call blocks until its requests complete, so two calls on one
/// controller can never overlap and the in-flight guards never trigger here.
/// UI layers that send requests in the background should drive
/// [`ParticipantList`] directly: its `begin_*` methods refuse overlapping
/// page fetches and `complete_*` drops responses of an older epoch.
pub struct ParticipantsController<'a, A: ?Sized> {
    pub(crate) api: &'a A,
    pub(crate) session: &'a Session,
    pub(crate) list: ParticipantList,
    default_page_size: PageSize,
}

impl<'a, A> ParticipantsController<'a, A>
where
    A: ParticipantReader + ParticipantWriter + Sync + ?Sized,
{
    pub fn new(api: &'a A, session: &'a Session, config: &ClientConfig) -> Self {
        Self {
            api,
            session,
            list: ParticipantList::new(config.all_page_upper_bound),
            default_page_size: PageSize::fixed(config.default_page_size).unwrap_or_default(),
        }
    }

    pub fn list(&self) -> &ParticipantList {
        &self.list
    }

    pub fn view(&self) -> ParticipantListView<'_> {
        ParticipantListView::from(&self.list)
    }

    /// Filter for `event_id` with the configured default page size.
    pub fn default_filter(&self, event_id: EventId) -> ParticipantFilter {
        ParticipantFilter::new(event_id).page_size(self.default_page_size)
    }

    /// Replaces the filter, then loads page 1 and the counts concurrently.
    ///
    /// Both responses are applied even when one of them fails; the first
    /// failure is returned.
    pub fn set_filter(&mut self, filter: ParticipantFilter) -> ServiceResult<()> {
        match self.list.set_filter(filter) {
            Some(plan) => self.run_plan(plan),
            None => Ok(()),
        }
    }

    /// Reloads page 1 and the counts. Returns `false` when nothing was sent.
    pub fn refresh(&mut self) -> ServiceResult<bool> {
        match self.list.begin_refresh() {
            Some(plan) => self.run_plan(plan).map(|_| true),
            None => Ok(false),
        }
    }

    /// Appends the next page. Returns `false` when nothing was sent.
    pub fn load_more(&mut self) -> ServiceResult<bool> {
        let Some(ticket) = self.list.begin_load_more() else {
            return Ok(false);
        };
        let result = self.api.list_participants(self.session, &ticket.query);
        self.list.complete_page(&ticket, result)?;
        Ok(true)
    }

    /// Refreshes only the aggregate counts.
    pub fn fetch_counts(&mut self) -> ServiceResult<()> {
        let Some(ticket) = self.list.begin_counts() else {
            log::debug!("No event selected, skipping counts");
            return Ok(());
        };
        let result = self.api.count_participants(self.session, &ticket.query);
        self.list.complete_counts(&ticket, result)?;
        Ok(())
    }

    fn run_plan(&mut self, plan: FetchPlan) -> ServiceResult<()> {
        let (page, counts) = fetch_concurrently(self.api, self.session, &plan);
        let page = self.list.complete_page(&plan.page, page);
        let counts = self.list.complete_counts(&plan.counts, counts);
        page?;
        counts?;
        Ok(())
    }
}

/// Sends the page and count requests of `plan` in parallel.
fn fetch_concurrently<A>(
    api: &A,
    session: &Session,
    plan: &FetchPlan,
) -> (ApiResult<ParticipantPage>, ApiResult<ParticipantCounts>)
where
    A: ParticipantReader + Sync + ?Sized,
{
    thread::scope(|scope| {
        let counts = scope.spawn(|| api.count_participants(session, &plan.counts.query));
        let page = api.list_participants(session, &plan.page.query);
        let counts = counts
            .join()
            .unwrap_or_else(|_| Err(ApiError::Transport("count request aborted".to_string())));
        (page, counts)
    })
}
