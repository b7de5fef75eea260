//! Marking participants as entered.
//!
//! A manual scan is a two-step operation: [`ParticipantsController::prepare_scan`]
//! applies the local already-scanned guard and returns a [`ScanIntent`], the UI
//! asks the user through [`ScanIntent::request_confirmation`], and
//! [`ParticipantsController::commit_scan`] performs the remote call. On
//! success the loaded record is patched optimistically and only the counts
//! are re-fetched.

use chrono::Utc;

use crate::api::{ParticipantReader, ParticipantWriter};
use crate::domain::scan::{ScanReceipt, ScanTarget};
use crate::domain::types::{EventId, ParticipantId};
use crate::qr::normalize_qr_payload;
use crate::services::participants::ParticipantsController;
use crate::services::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Declined,
}

/// Asks the user whether a scan should be committed.
pub trait Confirm {
    fn request_confirmation(&self, intent: &ScanIntent) -> Decision;
}

impl<F> Confirm for F
where
    F: Fn(&ScanIntent) -> Decision,
{
    fn request_confirmation(&self, intent: &ScanIntent) -> Decision {
        self(intent)
    }
}

/// A scan that passed the local guard and awaits confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanIntent {
    pub participant_id: ParticipantId,
    pub event_id: EventId,
    pub display_name: String,
    pub company_name: Option<String>,
}

impl ScanIntent {
    pub fn request_confirmation<C: Confirm + ?Sized>(&self, confirm: &C) -> Decision {
        confirm.request_confirmation(self)
    }

    /// Question shown to the user before committing.
    pub fn prompt(&self) -> String {
        match &self.company_name {
            Some(company) => format!("Check in {} ({company})?", self.display_name),
            None => format!("Check in {}?", self.display_name),
        }
    }
}

/// Result of a committed scan.
#[derive(Debug)]
pub struct ScanOutcome {
    pub receipt: ScanReceipt,
    /// Set when the scan succeeded but refreshing the counts failed.
    pub counts_error: Option<ServiceError>,
}

impl<A> ParticipantsController<'_, A>
where
    A: ParticipantReader + ParticipantWriter + Sync + ?Sized,
{
    /// Checks that `participant_id` is loaded and not yet scanned.
    pub fn prepare_scan(&self, participant_id: &ParticipantId) -> ServiceResult<ScanIntent> {
        let event_id = self
            .list
            .filter()
            .event_id
            .clone()
            .ok_or(ServiceError::NoEventSelected)?;
        let participant = self
            .list
            .find(participant_id)
            .ok_or(ServiceError::NotFound)?;
        if participant.is_scanned {
            log::debug!("Participant {participant_id} already scanned, skipping");
            return Err(ServiceError::AlreadyScanned);
        }

        Ok(ScanIntent {
            participant_id: participant.id.clone(),
            event_id,
            display_name: participant.display_name.clone(),
            company_name: participant.company_name.clone(),
        })
    }

    /// Sends the "mark entered" call for a confirmed intent.
    pub fn commit_scan(&mut self, intent: ScanIntent) -> ServiceResult<ScanOutcome> {
        if self
            .list
            .find(&intent.participant_id)
            .is_some_and(|participant| participant.is_scanned)
        {
            return Err(ServiceError::AlreadyScanned);
        }

        let receipt = self
            .api
            .mark_participant_scanned(self.session, &intent.participant_id, &intent.event_id)
            .map_err(|err| {
                log::error!(
                    "Failed to check in participant {}: {err}",
                    intent.participant_id
                );
                err
            })?;
        log::info!(
            "Participant {} checked in to event {} by {}: {}",
            intent.participant_id,
            intent.event_id,
            self.session.user.email,
            receipt.message
        );

        self.list.mark_scanned(&intent.participant_id, Utc::now());
        Ok(self.reconcile(receipt))
    }

    /// Runs the whole manual flow. Returns `None` when the user declined.
    pub fn scan_with_confirmation<C: Confirm + ?Sized>(
        &mut self,
        participant_id: &ParticipantId,
        confirm: &C,
    ) -> ServiceResult<Option<ScanOutcome>> {
        let intent = self.prepare_scan(participant_id)?;
        match intent.request_confirmation(confirm) {
            Decision::Confirmed => self.commit_scan(intent).map(Some),
            Decision::Declined => {
                log::debug!("Check-in of {participant_id} declined");
                Ok(None)
            }
        }
    }

    /// Marks entry for a badge scanned at the door.
    pub fn scan_target(&mut self, target: ScanTarget) -> ServiceResult<ScanOutcome> {
        let event_id = self
            .list
            .filter()
            .event_id
            .clone()
            .ok_or(ServiceError::NoEventSelected)?;
        if self
            .list
            .find_by_target(&target)
            .is_some_and(|participant| participant.is_scanned)
        {
            return Err(ServiceError::AlreadyScanned);
        }

        let receipt = self
            .api
            .mark_scanned_by_target(self.session, &event_id, &target)
            .map_err(|err| {
                log::error!("Failed to check in {target:?}: {err}");
                err
            })?;
        log::info!(
            "Badge {target:?} checked in to event {event_id}: {}",
            receipt.message
        );

        let loaded = self
            .list
            .find_by_target(&target)
            .map(|participant| participant.id.clone());
        if let Some(id) = loaded {
            self.list.mark_scanned(&id, Utc::now());
        }
        Ok(self.reconcile(receipt))
    }

    /// Normalizes a raw QR payload and marks entry for it.
    pub fn scan_qr(&mut self, payload: &str) -> ServiceResult<ScanOutcome> {
        let target = normalize_qr_payload(payload).map_err(|err| {
            log::error!("Unreadable badge payload: {err}");
            ServiceError::from(err)
        })?;
        self.scan_target(target)
    }

    fn reconcile(&mut self, receipt: ScanReceipt) -> ScanOutcome {
        let counts_error = self.fetch_counts().err();
        ScanOutcome {
            receipt,
            counts_error,
        }
    }
}
