//! Participant endpoints over HTTP.

use crate::api::errors::ApiResult;
use crate::api::{HttpApi, ParticipantQuery, ParticipantReader, ParticipantWriter};
use crate::domain::participant::{ParticipantCounts, ParticipantPage};
use crate::domain::scan::{ScanReceipt, ScanTarget};
use crate::domain::session::Session;
use crate::domain::types::{EventId, ParticipantId};
use crate::models::participant::{ParticipantCountsResponse, ParticipantListResponse};
use crate::models::scan::{MarkScannedRequest, ScanResponse, ScanTargetRequest};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageRequest};

/// Query string for a listing request.
fn query_params(query: &ParticipantQuery, request: PageRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("skip", request.skip.to_string()),
        ("limit", request.limit.to_string()),
    ];
    if let Some(status) = query.entry_status.as_query_value() {
        params.push(("entryStatus", status.to_string()));
    }
    if let Some(search) = &query.search {
        params.push(("search", search.clone()));
    }
    params
}

fn participants_path(event_id: &EventId) -> String {
    format!("events/{event_id}/participants")
}

impl ParticipantReader for HttpApi {
    fn list_participants(
        &self,
        session: &Session,
        query: &ParticipantQuery,
    ) -> ApiResult<ParticipantPage> {
        let request = query
            .pagination
            .unwrap_or_else(|| PageRequest::for_page(1, DEFAULT_ITEMS_PER_PAGE));
        let response: ParticipantListResponse = self.get_json(
            session,
            &participants_path(&query.event_id),
            &query_params(query, request),
        )?;
        ParticipantPage::try_from(response)
    }

    fn count_participants(
        &self,
        session: &Session,
        query: &ParticipantQuery,
    ) -> ApiResult<ParticipantCounts> {
        // The backend has no dedicated count route; a one-record page carries
        // the aggregates for the whole filtered set.
        let request = PageRequest { skip: 0, limit: 1 };
        let response: ParticipantListResponse = self.get_json(
            session,
            &participants_path(&query.event_id),
            &query_params(query, request),
        )?;
        ParticipantCounts::try_from(ParticipantCountsResponse::from(&response))
    }
}

impl ParticipantWriter for HttpApi {
    fn mark_participant_scanned(
        &self,
        session: &Session,
        participant_id: &ParticipantId,
        event_id: &EventId,
    ) -> ApiResult<ScanReceipt> {
        let response: ScanResponse = self.post_scan(
            session,
            &format!("participants/{participant_id}/scan"),
            &MarkScannedRequest {
                event_id: event_id.as_str(),
            },
        )?;
        ScanReceipt::try_from(response)
    }

    fn mark_scanned_by_target(
        &self,
        session: &Session,
        event_id: &EventId,
        target: &ScanTarget,
    ) -> ApiResult<ScanReceipt> {
        let response: ScanResponse = self.post_scan(
            session,
            &format!("events/{event_id}/scan"),
            &ScanTargetRequest::new(Some(event_id), target),
        )?;
        ScanReceipt::try_from(response)
    }
}
