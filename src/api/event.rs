//! Event and session endpoints over HTTP.

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{EventReader, HttpApi, SessionCheckInWriter};
use crate::domain::event::{Event, EventSession};
use crate::domain::scan::{ScanReceipt, ScanTarget};
use crate::domain::session::Session;
use crate::domain::types::{EventId, PartnerId, SessionId};
use crate::models::event::{EventListResponse, EventSessionListResponse};
use crate::models::scan::{ScanResponse, ScanTargetRequest};

impl EventReader for HttpApi {
    fn list_events(&self, session: &Session, partner_id: &PartnerId) -> ApiResult<Vec<Event>> {
        let response: EventListResponse =
            self.get_json(session, &format!("partners/{partner_id}/events"), &[])?;
        Vec::<Event>::try_from(response)
    }

    fn list_event_sessions(
        &self,
        session: &Session,
        event_id: &EventId,
    ) -> ApiResult<Vec<EventSession>> {
        let response: EventSessionListResponse =
            self.get_json(session, &format!("events/{event_id}/sessions"), &[])?;
        response
            .sessions
            .ok_or_else(|| ApiError::missing_field("sessions"))?
            .into_iter()
            .map(|row| row.into_session(event_id))
            .collect()
    }
}

impl SessionCheckInWriter for HttpApi {
    fn check_in_to_session(
        &self,
        session: &Session,
        session_id: &SessionId,
        target: &ScanTarget,
    ) -> ApiResult<ScanReceipt> {
        let response: ScanResponse = self.post_scan(
            session,
            &format!("sessions/{session_id}/check-in"),
            &ScanTargetRequest::new(None, target),
        )?;
        ScanReceipt::try_from(response)
    }
}
