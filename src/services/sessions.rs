use crate::api::SessionCheckInWriter;
use crate::domain::scan::{ScanReceipt, ScanStatus, ScanTarget};
use crate::domain::session::Session;
use crate::domain::types::SessionId;
use crate::qr::normalize_qr_payload;
use crate::services::{ServiceError, ServiceResult};

/// Records a session-level check-in for a scanned badge.
///
/// A repeated check-in is reported through [`ScanStatus::AlreadyEntered`].
pub fn check_in_to_session<A>(
    api: &A,
    session: &Session,
    session_id: &SessionId,
    target: &ScanTarget,
) -> ServiceResult<ScanReceipt>
where
    A: SessionCheckInWriter + ?Sized,
{
    let receipt = api
        .check_in_to_session(session, session_id, target)
        .map_err(|err| {
            log::error!("Failed to check in {target:?} to session {session_id}: {err}");
            ServiceError::from(err)
        })?;

    match receipt.status {
        ScanStatus::Entered => log::info!("Checked in {target:?} to session {session_id}"),
        ScanStatus::AlreadyEntered => {
            log::info!("{target:?} was already checked in to session {session_id}")
        }
    }
    Ok(receipt)
}

/// Normalizes a raw QR payload and records a session check-in for it.
pub fn check_in_qr_to_session<A>(
    api: &A,
    session: &Session,
    session_id: &SessionId,
    payload: &str,
) -> ServiceResult<ScanReceipt>
where
    A: SessionCheckInWriter + ?Sized,
{
    let target = normalize_qr_payload(payload)?;
    check_in_to_session(api, session, session_id, &target)
}

#[cfg(test)]
mod tests {
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
                id: PartnerId::new("p1").unwrap(),
                name: NonEmptyString::new("Expo").unwrap(),
            },
        )
    }

    #[test]
    fn vcard_badge_checks_in_by_email() {
        let mut api = MockApi::new();
        api.expect_check_in_to_session()
            .times(1)
            .withf(|_, session_id, target| {
                session_id.as_str() == "s1"
                    && *target == ScanTarget::Email(AttendeeEmail::new("ann@acme.io").unwrap())
            })
            .returning(|_, _, _| {
                Ok(ScanReceipt {
                    status: ScanStatus::AlreadyEntered,
                    message: "Already checked in".to_string(),
                })
            });

        let receipt = check_in_qr_to_session(
            &api,
            &session(),
            &SessionId::new("s1").unwrap(),
            "BEGIN:VCARD\nEMAIL:Ann@acme.io\nEND:VCARD",
        )
        .unwrap();

        assert_eq!(receipt.status, ScanStatus::AlreadyEntered);
    }

    #[test]
    fn unreadable_payload_never_reaches_api() {
        let mut api = MockApi::new();
        api.expect_check_in_to_session().never();

        let result =
            check_in_qr_to_session(&api, &session(), &SessionId::new("s1").unwrap(), "   ");

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }
}
