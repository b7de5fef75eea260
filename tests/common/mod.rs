#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use event_checkin::api::ParticipantQuery;
use event_checkin::api::mock::MockApi;
use event_checkin::domain::participant::{Participant, ParticipantCounts, ParticipantPage};
use event_checkin::domain::session::{Partner, Session, StaffMember};
use event_checkin::domain::types::{
    AttendeeEmail, NonEmptyString, ParticipantId, PartnerId, StaffId,
};
use event_checkin::models::config::ClientConfig;
use event_checkin::pagination::PageRequest;

pub fn session() -> Session {
    Session::new(
        "test-token",
        StaffMember {
            id: StaffId::new("staff-1").unwrap(),
            name: NonEmptyString::new("Door Staff").unwrap(),
            email: AttendeeEmail::new("door@expo.io").unwrap(),
        },
        Partner {
            id: PartnerId::new("partner-1").unwrap(),
            name: NonEmptyString::new("Expo Ltd").unwrap(),
        },
    )
}

pub fn config() -> ClientConfig {
    ClientConfig::new("http://localhost:8080")
}

pub fn participant(n: usize) -> Participant {
    Participant {
        id: ParticipantId::new(format!("p{n}")).unwrap(),
        display_name: format!("Participant {n}"),
        company_name: Some("Acme".to_string()),
        email: Some(AttendeeEmail::new(format!("p{n}@acme.io")).unwrap()),
        is_scanned: false,
        scanned_at: None,
    }
}

pub fn counts(total: usize, scanned: usize) -> ParticipantCounts {
    ParticipantCounts {
        total,
        scanned,
        not_scanned: total - scanned,
    }
}

/// Window `request` of a `total`-sized result set, as the backend returns it.
pub fn serve(request: PageRequest, total: usize) -> ParticipantPage {
    let end = (request.skip + request.limit).min(total);
    ParticipantPage {
        participants: (request.skip..end).map(participant).collect(),
        counts: counts(total, 0),
    }
}

pub type Requests = Arc<Mutex<Vec<PageRequest>>>;

/// Serves pages of a `total`-sized event, recording every requested window.
pub fn expect_pages(api: &mut MockApi, total: usize, times: usize) -> Requests {
    let requests: Requests = Arc::default();
    let recorder = requests.clone();
    api.expect_list_participants()
        .times(times)
        .returning(move |_, query: &ParticipantQuery| {
            let request = query.pagination.expect("listing requests are paginated");
            recorder.lock().unwrap().push(request);
            Ok(serve(request, total))
        });
    requests
}

pub fn expect_counts(api: &mut MockApi, counts: ParticipantCounts, times: usize) {
    api.expect_count_participants()
        .times(times)
        .returning(move |_, _| Ok(counts));
}
