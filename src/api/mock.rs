//! Mock API implementations for isolating services in tests.

use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{
    AuthApi, EventReader, ParticipantQuery, ParticipantReader, ParticipantWriter,
    SessionCheckInWriter,
};
use crate::domain::event::{Event, EventSession};
use crate::domain::participant::{ParticipantCounts, ParticipantPage};
use crate::domain::scan::{ScanReceipt, ScanTarget};
use crate::domain::session::{Credentials, Session};
use crate::domain::types::{EventId, ParticipantId, PartnerId, SessionId};

mock! {
    pub Api {}

    impl AuthApi for Api {
        fn login(&self, credentials: &Credentials) -> ApiResult<Session>;
        fn logout(&self, session: &Session) -> ApiResult<()>;
    }

    impl EventReader for Api {
        fn list_events(&self, session: &Session, partner_id: &PartnerId) -> ApiResult<Vec<Event>>;
        fn list_event_sessions(
            &self,
            session: &Session,
            event_id: &EventId,
        ) -> ApiResult<Vec<EventSession>>;
    }

    impl ParticipantReader for Api {
        fn list_participants(
            &self,
            session: &Session,
            query: &ParticipantQuery,
        ) -> ApiResult<ParticipantPage>;
        fn count_participants(
            &self,
            session: &Session,
            query: &ParticipantQuery,
        ) -> ApiResult<ParticipantCounts>;
    }

    impl ParticipantWriter for Api {
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

    impl SessionCheckInWriter for Api {
        fn check_in_to_session(
            &self,
            session: &Session,
            session_id: &SessionId,
            target: &ScanTarget,
        ) -> ApiResult<ScanReceipt>;
    }
}
