use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::scan::{ScanReceipt, ScanStatus, ScanTarget};
use crate::domain::types::EventId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkScannedRequest<'a> {
    pub event_id: &'a str,
}

/// Body of a scan by badge contents: exactly one of `email`/`code` is set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTargetRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
}

impl<'a> ScanTargetRequest<'a> {
    pub fn new(event_id: Option<&'a EventId>, target: &'a ScanTarget) -> Self {
        let (email, code) = match target {
            ScanTarget::Email(email) => (Some(email.as_str()), None),
            ScanTarget::Code(code) => (None, Some(code.as_str())),
        };
        Self {
            event_id: event_id.map(EventId::as_str),
            email,
            code,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    #[serde(alias = "alreadyEntered")]
    pub already_scanned: Option<bool>,
}

impl TryFrom<ScanResponse> for ScanReceipt {
    type Error = ApiError;

    fn try_from(response: ScanResponse) -> Result<Self, Self::Error> {
        let success = response
            .success
            .ok_or_else(|| ApiError::missing_field("success"))?;
        let message = response
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let already = response.already_scanned.unwrap_or(false)
            || message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains("already"));

        match (success, already) {
            (_, true) => Ok(ScanReceipt {
                status: ScanStatus::AlreadyEntered,
                message: message.unwrap_or_else(|| "Participant already checked in".to_string()),
            }),
            (true, false) => Ok(ScanReceipt {
                status: ScanStatus::Entered,
                message: message.unwrap_or_else(|| "Checked in".to_string()),
            }),
            (false, false) => Err(ApiError::Rejected(
                message.unwrap_or_else(|| "Check-in rejected".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::AttendeeEmail;

    fn receipt(value: serde_json::Value) -> Result<ScanReceipt, ApiError> {
        ScanReceipt::try_from(serde_json::from_value::<ScanResponse>(value).unwrap())
    }

    #[test]
    fn success_is_entered() {
        let receipt = receipt(json!({ "success": true, "message": "Welcome" })).unwrap();
        assert_eq!(receipt.status, ScanStatus::Entered);
        assert_eq!(receipt.message, "Welcome");
    }

    #[test]
    fn already_scanned_message_is_distinguished() {
        let receipt =
            receipt(json!({ "success": false, "message": "Participant Already scanned" })).unwrap();
        assert_eq!(receipt.status, ScanStatus::AlreadyEntered);
    }

    #[test]
    fn other_failures_are_rejections() {
        let err = receipt(json!({ "success": false, "message": "Not registered" })).unwrap_err();
        assert_eq!(err, ApiError::Rejected("Not registered".to_string()));
    }

    #[test]
    fn missing_success_flag_is_malformed() {
        let err = receipt(json!({ "message": "ok" })).unwrap_err();
        assert_eq!(err, ApiError::missing_field("success"));
    }

    #[test]
    fn target_request_serializes_one_key() {
        let target = ScanTarget::Email(AttendeeEmail::new("a@b.io").unwrap());
        let event = EventId::new("E1").unwrap();

        let body = serde_json::to_value(ScanTargetRequest::new(Some(&event), &target)).unwrap();

        assert_eq!(body, json!({ "eventId": "E1", "email": "a@b.io" }));
    }
}
