//! Normalization of raw QR badge payloads.
//!
//! Badges either carry a vCard (the attendee email is the identifying field),
//! a bare email, or an opaque participant code.

use crate::domain::scan::ScanTarget;
use crate::domain::types::{AttendeeEmail, NonEmptyString, TypeConstraintError};

const VCARD_BEGIN: &str = "BEGIN:VCARD";

/// Turns a raw scanner payload into a [`ScanTarget`].
pub fn normalize_qr_payload(raw: &str) -> Result<ScanTarget, TypeConstraintError> {
    let payload = raw.trim().trim_start_matches('\u{feff}');
    if payload.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }

    if is_vcard(payload) {
        let email = vcard_email(payload).ok_or_else(|| {
            TypeConstraintError::InvalidValue("vCard without an email".to_string())
        })?;
        return AttendeeEmail::new(email).map(ScanTarget::Email);
    }

    let candidate = strip_mailto(payload);
    if candidate.contains('@') {
        if let Ok(email) = AttendeeEmail::new(candidate) {
            return Ok(ScanTarget::Email(email));
        }
    }

    NonEmptyString::new(payload).map(ScanTarget::Code)
}

fn is_vcard(payload: &str) -> bool {
    payload
        .get(..VCARD_BEGIN.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(VCARD_BEGIN))
}

fn strip_mailto(value: &str) -> &str {
    match value.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("mailto:") => value[7..].trim(),
        _ => value,
    }
}

/// Joins folded vCard lines (continuations start with a space or tab).
fn unfold(payload: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in payload.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(line.to_string());
    }
    lines
}

fn vcard_email(payload: &str) -> Option<String> {
    unfold(payload).into_iter().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        // Property names may carry a group prefix (`item1.EMAIL`) and parameters.
        let property = name.split(';').next()?.rsplit('.').next()?;
        if !property.eq_ignore_ascii_case("EMAIL") {
            return None;
        }
        let value = strip_mailto(value.trim());
        (!value.is_empty()).then(|| value.to_string())
    })
}
