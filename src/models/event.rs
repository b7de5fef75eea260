use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::event::{Event, EventSession};
use crate::domain::types::{EventId, NonEmptyString, SessionId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "title", alias = "eventName")]
    pub name: Option<String>,
    #[serde(alias = "location")]
    pub venue: Option<String>,
    #[serde(alias = "startDate")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(alias = "endDate")]
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct EventListResponse {
    #[serde(alias = "data")]
    pub events: Option<Vec<EventRow>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSessionRow {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub event_id: Option<String>,
    #[serde(alias = "name", alias = "sessionName")]
    pub title: Option<String>,
    #[serde(alias = "startTime")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(alias = "checkInCount")]
    pub checked_in_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EventSessionListResponse {
    #[serde(alias = "data")]
    pub sessions: Option<Vec<EventSessionRow>>,
}

impl TryFrom<EventRow> for Event {
    type Error = ApiError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::new(row.id.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("event id"))?,
            name: NonEmptyString::new(row.name.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("event name"))?,
            venue: row
                .venue
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            starts_at: row.starts_at,
            ends_at: row.ends_at,
        })
    }
}

impl EventSessionRow {
    /// Converts the row, using `event_id` when the backend omits it.
    pub fn into_session(self, event_id: &EventId) -> ApiResult<EventSession> {
        let session_event = match self.event_id {
            Some(raw) => EventId::new(raw).map_err(|_| ApiError::missing_field("eventId"))?,
            None => event_id.clone(),
        };
        let checked_in = self
            .checked_in_count
            .map(|count| {
                usize::try_from(count).map_err(|_| {
                    ApiError::MalformedResponse(format!("negative `checkedInCount`: {count}"))
                })
            })
            .transpose()?;

        Ok(EventSession {
            id: SessionId::new(self.id.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("session id"))?,
            event_id: session_event,
            title: NonEmptyString::new(self.title.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("session title"))?,
            starts_at: self.starts_at,
            checked_in,
        })
    }
}

impl TryFrom<EventListResponse> for Vec<Event> {
    type Error = ApiError;

    fn try_from(response: EventListResponse) -> Result<Self, Self::Error> {
        response
            .events
            .ok_or_else(|| ApiError::missing_field("events"))?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }
}
