use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::api::EventReader;
use crate::domain::event::{Event, EventSession};
use crate::domain::session::Session;
use crate::domain::types::EventId;
use crate::services::{ServiceError, ServiceResult};

/// Undated entries sort after dated ones.
fn by_start(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lists the events of the signed-in partner, earliest first.
pub fn list_events<A>(api: &A, session: &Session) -> ServiceResult<Vec<Event>>
where
    A: EventReader + ?Sized,
{
    let mut events = api
        .list_events(session, &session.partner.id)
        .map_err(|err| {
            log::error!(
                "Failed to load events of partner {}: {err}",
                session.partner.id
            );
            ServiceError::from(err)
        })?;

    events.sort_by(|a, b| {
        by_start(a.starts_at, b.starts_at).then_with(|| a.name.as_str().cmp(b.name.as_str()))
    });
    Ok(events)
}

/// Lists the sessions of an event, earliest first.
pub fn list_event_sessions<A>(
    api: &A,
    session: &Session,
    event_id: &EventId,
) -> ServiceResult<Vec<EventSession>>
where
    A: EventReader + ?Sized,
{
    let mut sessions = api
        .list_event_sessions(session, event_id)
        .map_err(|err| {
            log::error!("Failed to load sessions of event {event_id}: {err}");
            ServiceError::from(err)
        })?;

    sessions.sort_by(|a, b| {
        by_start(a.starts_at, b.starts_at).then_with(|| a.title.as_str().cmp(b.title.as_str()))
    });
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::session::{Partner, StaffMember};
    use crate::domain::types::{AttendeeEmail, NonEmptyString, PartnerId, StaffId};

    fn session() -> Session {
        Session::new(
            "tok",
            StaffMember {
                id: StaffId::new("u1").unwrap(),
                name: NonEmptyString::new("Door").unwrap(),
                email: AttendeeEmail::new("door@expo.io").unwrap(),
            },
            Partner {
                id: PartnerId::new("partner-7").unwrap(),
                name: NonEmptyString::new("Expo").unwrap(),
            },
        )
    }

    fn event(id: &str, name: &str, day: Option<u32>) -> Event {
        Event {
            id: EventId::new(id).unwrap(),
            name: NonEmptyString::new(name).unwrap(),
            venue: None,
            starts_at: day.map(|d| Utc.with_ymd_and_hms(2026, 6, d, 9, 0, 0).unwrap()),
            ends_at: None,
        }
    }

    #[test]
    fn events_are_scoped_to_partner_and_sorted() {
        let mut api = MockApi::new();
        api.expect_list_events()
            .times(1)
            .withf(|_, partner_id| partner_id.as_str() == "partner-7")
            .returning(|_, _| {
                Ok(vec![
                    event("e3", "Undated", None),
                    event("e2", "Later", Some(20)),
                    event("e1", "Sooner", Some(2)),
                    event("e4", "Also later", Some(20)),
                ])
            });

        let events = list_events(&api, &session()).unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e4", "e2", "e3"]);
    }
}
