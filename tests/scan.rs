use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use event_checkin::api::errors::ApiError;
use event_checkin::api::mock::MockApi;
use event_checkin::domain::participant::{ParticipantCounts, ParticipantPage};
use event_checkin::domain::scan::{ScanReceipt, ScanStatus, ScanTarget};
use event_checkin::domain::types::{AttendeeEmail, EventId, ParticipantId};
use event_checkin::services::ServiceError;
use event_checkin::services::participants::ParticipantsController;
use event_checkin::services::scan::{Decision, ScanIntent};

mod common;

/// Three participants of event E1, the first one already scanned.
fn expect_event_page(api: &mut MockApi) {
    api.expect_list_participants().times(1).returning(|_, _| {
        let mut participants: Vec<_> = (0..3).map(common::participant).collect();
        participants[0].is_scanned = true;
        Ok(ParticipantPage {
            participants,
            counts: common::counts(3, 1),
        })
    });
}

/// Serves `first` on the initial load and `after` on every later count call.
fn expect_counts_sequence(
    api: &mut MockApi,
    first: ParticipantCounts,
    after: Result<ParticipantCounts, ApiError>,
    times: usize,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    api.expect_count_participants()
        .times(times)
        .returning(move |_, _| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(first)
            } else {
                after.clone()
            }
        });
}

fn entered(message: &str) -> ScanReceipt {
    ScanReceipt {
        status: ScanStatus::Entered,
        message: message.to_string(),
    }
}

fn id(value: &str) -> ParticipantId {
    ParticipantId::new(value).unwrap()
}

fn load(controller: &mut ParticipantsController<'_, MockApi>) {
    controller
        .set_filter(controller.default_filter(EventId::new("E1").unwrap()))
        .unwrap();
}

#[test]
fn confirmed_scan_patches_record_and_refetches_counts_only() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    expect_counts_sequence(&mut api, common::counts(3, 1), Ok(common::counts(3, 2)), 2);
    api.expect_mark_participant_scanned()
        .times(1)
        .withf(|_, participant_id, event_id| {
            participant_id.as_str() == "p1" && event_id.as_str() == "E1"
        })
        .returning(|_, _, _| Ok(entered("Welcome")));
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    let intent = controller.prepare_scan(&id("p1")).unwrap();
    assert_eq!(intent.prompt(), "Check in Participant 1 (Acme)?");
    let outcome = controller.commit_scan(intent).unwrap();

    assert_eq!(outcome.receipt, entered("Welcome"));
    assert!(outcome.counts_error.is_none());
    let record = controller.list().find(&id("p1")).unwrap();
    assert!(record.is_scanned);
    assert!(record.scanned_at.is_some());
    assert_eq!(controller.list().counts(), Some(common::counts(3, 2)));
    assert_eq!(controller.list().participants().len(), 3);
}

#[test]
fn already_scanned_participant_issues_no_request() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    common::expect_counts(&mut api, common::counts(3, 1), 1);
    api.expect_mark_participant_scanned().never();
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    assert_eq!(
        controller.prepare_scan(&id("p0")),
        Err(ServiceError::AlreadyScanned)
    );
    let result = controller.scan_with_confirmation(&id("p0"), &|_: &ScanIntent| -> Decision {
        panic!("confirmation must not be requested")
    });

    assert!(matches!(result, Err(ServiceError::AlreadyScanned)));
    assert_eq!(controller.list().counts(), Some(common::counts(3, 1)));
}

#[test]
fn declined_confirmation_leaves_state_untouched() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    common::expect_counts(&mut api, common::counts(3, 1), 1);
    api.expect_mark_participant_scanned().never();
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    let outcome = controller
        .scan_with_confirmation(&id("p2"), &|_: &ScanIntent| Decision::Declined)
        .unwrap();

    assert!(outcome.is_none());
    assert!(!controller.list().find(&id("p2")).unwrap().is_scanned);
}

#[test]
fn rejected_scan_keeps_record_unscanned() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    common::expect_counts(&mut api, common::counts(3, 1), 1);
    api.expect_mark_participant_scanned()
        .times(1)
        .returning(|_, _, _| Err(ApiError::Rejected("Registration cancelled".to_string())));
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    let result =
        controller.scan_with_confirmation(&id("p2"), &|_: &ScanIntent| Decision::Confirmed);

    assert_eq!(
        result.unwrap_err(),
        ServiceError::Api(ApiError::Rejected("Registration cancelled".to_string()))
    );
    assert!(!controller.list().find(&id("p2")).unwrap().is_scanned);
    assert_eq!(controller.list().counts(), Some(common::counts(3, 1)));
}

#[test]
fn counts_failure_after_scan_is_reported_separately() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    expect_counts_sequence(
        &mut api,
        common::counts(3, 1),
        Err(ApiError::Transport("timed out".to_string())),
        2,
    );
    api.expect_mark_participant_scanned()
        .times(1)
        .returning(|_, _, _| Ok(entered("Welcome")));
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    let outcome = controller
        .scan_with_confirmation(&id("p1"), &|_: &ScanIntent| Decision::Confirmed)
        .unwrap()
        .unwrap();

    assert_eq!(outcome.receipt.status, ScanStatus::Entered);
    assert_eq!(
        outcome.counts_error,
        Some(ServiceError::Api(ApiError::Transport("timed out".to_string())))
    );
    assert!(controller.list().find(&id("p1")).unwrap().is_scanned);
    assert_eq!(controller.list().counts(), Some(common::counts(3, 1)));
}

#[test]
fn qr_badge_is_checked_in_by_email() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    expect_counts_sequence(&mut api, common::counts(3, 1), Ok(common::counts(3, 2)), 2);
    api.expect_mark_scanned_by_target()
        .times(1)
        .withf(|_, event_id, target| {
            event_id.as_str() == "E1"
                && *target == ScanTarget::Email(AttendeeEmail::new("p2@acme.io").unwrap())
        })
        .returning(|_, _, _| Ok(entered("Participant 2 checked in")));
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    let badge = concat!(
        "BEGIN:VCARD\r\n",
        "VERSION:3.0\r\n",
        "FN:Participant 2\r\n",
        "EMAIL;TYPE=work:P2@Acme.io\r\n",
        "END:VCARD",
    );
    let outcome = controller.scan_qr(badge).unwrap();

    assert_eq!(outcome.receipt.message, "Participant 2 checked in");
    assert!(controller.list().find(&id("p2")).unwrap().is_scanned);
    assert_eq!(controller.list().counts(), Some(common::counts(3, 2)));
}

#[test]
fn qr_badge_of_scanned_participant_issues_no_request() {
    let mut api = MockApi::new();
    expect_event_page(&mut api);
    common::expect_counts(&mut api, common::counts(3, 1), 1);
    api.expect_mark_scanned_by_target().never();
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);
    load(&mut controller);

    let result = controller.scan_qr("p0@acme.io");

    assert!(matches!(result, Err(ServiceError::AlreadyScanned)));
}

#[test]
fn scan_without_event_is_refused() {
    let api = MockApi::new();
    let session = common::session();
    let config = common::config();
    let mut controller = ParticipantsController::new(&api, &session, &config);

    assert!(matches!(
        controller.scan_qr("p0@acme.io"),
        Err(ServiceError::NoEventSelected)
    ));
    assert!(matches!(
        controller.prepare_scan(&id("p0")),
        Err(ServiceError::NoEventSelected)
    ));
}
