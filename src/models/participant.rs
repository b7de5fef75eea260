//! Wire shapes of the participant endpoints and their normalization.
//!
//! Field names differ between backend code paths (`totalCount` vs `total`,
//! `isScanned` vs `entered`), so aliases are accepted here. Anything still
//! missing after that is reported as [`ApiError::MalformedResponse`] instead
//! of being defaulted.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::participant::{Participant, ParticipantCounts, ParticipantPage};
use crate::domain::types::{AttendeeEmail, ParticipantId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "fullName")]
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(alias = "company")]
    pub company_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "isEntered", alias = "entered")]
    pub is_scanned: Option<bool>,
    #[serde(alias = "enteredAt", alias = "entryTime")]
    pub scanned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantListResponse {
    #[serde(alias = "data", alias = "items")]
    pub participants: Option<Vec<ParticipantRow>>,
    #[serde(alias = "total")]
    pub total_count: Option<i64>,
    #[serde(alias = "scanned", alias = "enteredCount")]
    pub scanned_count: Option<i64>,
    #[serde(alias = "notScanned", alias = "notEnteredCount")]
    pub not_scanned_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCountsResponse {
    #[serde(alias = "total")]
    pub total_count: Option<i64>,
    #[serde(alias = "scanned", alias = "enteredCount")]
    pub scanned_count: Option<i64>,
    #[serde(alias = "notScanned", alias = "notEnteredCount")]
    pub not_scanned_count: Option<i64>,
}

fn count_value(value: Option<i64>, field: &str) -> ApiResult<usize> {
    let value = value.ok_or_else(|| ApiError::missing_field(field))?;
    usize::try_from(value)
        .map_err(|_| ApiError::MalformedResponse(format!("negative `{field}`: {value}")))
}

fn normalize_counts(
    total: Option<i64>,
    scanned: Option<i64>,
    not_scanned: Option<i64>,
) -> ApiResult<ParticipantCounts> {
    let counts = ParticipantCounts {
        total: count_value(total, "totalCount")?,
        scanned: count_value(scanned, "scannedCount")?,
        not_scanned: count_value(not_scanned, "notScannedCount")?,
    };
    if !counts.is_consistent() {
        log::warn!(
            "Backend counts do not add up: total {} scanned {} not scanned {}",
            counts.total,
            counts.scanned,
            counts.not_scanned
        );
    }
    Ok(counts)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = ApiError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let id = ParticipantId::new(row.id.unwrap_or_default())
            .map_err(|_| ApiError::missing_field("participant id"))?;

        let email = non_blank(row.email).and_then(|raw| match AttendeeEmail::new(raw.as_str()) {
            Ok(email) => Some(email),
            Err(err) => {
                log::warn!("Ignoring email `{raw}` of participant {id}: {err}");
                None
            }
        });

        let joined = [non_blank(row.first_name), non_blank(row.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let display_name = non_blank(row.name)
            .or_else(|| non_blank(Some(joined)))
            .or_else(|| email.as_ref().map(|email| email.to_string()))
            .ok_or_else(|| ApiError::missing_field("participant name"))?;

        let is_scanned = row
            .is_scanned
            .or(row.scanned_at.map(|_| true))
            .ok_or_else(|| ApiError::missing_field("isScanned"))?;

        Ok(Participant {
            id,
            display_name,
            company_name: non_blank(row.company_name),
            email,
            is_scanned,
            scanned_at: row.scanned_at,
        })
    }
}

impl TryFrom<ParticipantListResponse> for ParticipantPage {
    type Error = ApiError;

    fn try_from(response: ParticipantListResponse) -> Result<Self, Self::Error> {
        let counts = normalize_counts(
            response.total_count,
            response.scanned_count,
            response.not_scanned_count,
        )?;
        let participants = response
            .participants
            .ok_or_else(|| ApiError::missing_field("participants"))?
            .into_iter()
            .map(Participant::try_from)
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(ParticipantPage {
            participants,
            counts,
        })
    }
}

impl TryFrom<ParticipantCountsResponse> for ParticipantCounts {
    type Error = ApiError;

    fn try_from(response: ParticipantCountsResponse) -> Result<Self, Self::Error> {
        normalize_counts(
            response.total_count,
            response.scanned_count,
            response.not_scanned_count,
        )
    }
}

impl From<&ParticipantListResponse> for ParticipantCountsResponse {
    fn from(response: &ParticipantListResponse) -> Self {
        Self {
            total_count: response.total_count,
            scanned_count: response.scanned_count,
            not_scanned_count: response.not_scanned_count,
        }
    }
}
