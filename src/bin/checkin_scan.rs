//! Door scanner loop: reads QR badge payloads from stdin and checks the
//! participant in to the selected event.
//!
//! Each non-empty line is one payload, except vCards, which run from
//! `BEGIN:VCARD` to `END:VCARD` over several lines.
//!
//! Usage: `checkin_scan <event-id>` (or `CHECKIN_EVENT_ID`), with
//! `CHECKIN_EMAIL` and `CHECKIN_PASSWORD` holding the staff credentials.

use std::env;
use std::io::{self, BufRead, Lines, Write};

use dotenvy::dotenv;

use event_checkin::api::HttpApi;
use event_checkin::domain::participant::ParticipantCounts;
use event_checkin::domain::scan::ScanStatus;
use event_checkin::domain::types::EventId;
use event_checkin::forms::login::LoginForm;
use event_checkin::models::config::ClientConfig;
use event_checkin::services::auth;
use event_checkin::services::participants::ParticipantsController;
use event_checkin::services::scan::ScanOutcome;

const VCARD_BEGIN: &str = "BEGIN:VCARD";
const VCARD_END: &str = "END:VCARD";

/// Scanner payloads read from line-based input.
struct Payloads<R> {
    lines: Lines<R>,
}

fn read_payloads<R: BufRead>(input: R) -> Payloads<R> {
    Payloads {
        lines: input.lines(),
    }
}

fn starts_vcard(line: &str) -> bool {
    line.get(..VCARD_BEGIN.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(VCARD_BEGIN))
}

impl<R: BufRead> Iterator for Payloads<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = loop {
            match self.lines.next()? {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => break line.trim().to_string(),
                Err(err) => return Some(Err(err)),
            }
        };
        if !starts_vcard(&first) {
            return Some(Ok(first));
        }

        // Continuation lines keep their leading whitespace for unfolding.
        let mut card = vec![first];
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            let end = line.trim().eq_ignore_ascii_case(VCARD_END);
            card.push(line);
            if end {
                break;
            }
        }
        Some(Ok(card.join("\n")))
    }
}

fn format_counts(counts: Option<ParticipantCounts>) -> String {
    match counts {
        Some(counts) => format!(
            "{} / {} checked in, {} remaining",
            counts.scanned, counts.total, counts.not_scanned
        ),
        None => "counts unavailable".to_string(),
    }
}

fn report(outcome: &ScanOutcome, counts: Option<ParticipantCounts>) -> String {
    let marker = match outcome.receipt.status {
        ScanStatus::Entered => "OK",
        ScanStatus::AlreadyEntered => "ALREADY",
    };
    match &outcome.counts_error {
        Some(err) => format!("{marker}: {} ({err})", outcome.receipt.message),
        None => format!(
            "{marker}: {} [{}]",
            outcome.receipt.message,
            format_counts(counts)
        ),
    }
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ClientConfig::load(&app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let event_id = env::args()
        .nth(1)
        .or_else(|| env::var("CHECKIN_EVENT_ID").ok())
        .map(EventId::new);
    let event_id = match event_id {
        Some(Ok(event_id)) => event_id,
        Some(Err(err)) => {
            log::error!("Invalid event id: {err}");
            std::process::exit(2);
        }
        None => {
            log::error!("Usage: checkin_scan <event-id>");
            std::process::exit(2);
        }
    };

    let api = match HttpApi::new(&config) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let form = LoginForm {
        email: env::var("CHECKIN_EMAIL").unwrap_or_default(),
        password: env::var("CHECKIN_PASSWORD").unwrap_or_default(),
    };
    let session = match auth::login(&api, form) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Sign in failed: {err}");
            std::process::exit(1);
        }
    };

    {
        let mut controller = ParticipantsController::new(&api, &session, &config);
        if let Err(err) = controller.set_filter(controller.default_filter(event_id.clone())) {
            log::warn!("Initial load of event {event_id} incomplete: {err}");
        }
        println!(
            "Scanning for event {event_id}: {}",
            format_counts(controller.list().counts())
        );

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for payload in read_payloads(stdin.lock()) {
            let payload = match payload {
                Ok(payload) => payload,
                Err(err) => {
                    log::error!("Failed to read scanner input: {err}");
                    break;
                }
            };

            let message = match controller.scan_qr(&payload) {
                Ok(outcome) => report(&outcome, controller.list().counts()),
                Err(err) => format!("FAILED: {err}"),
            };
            if writeln!(stdout, "{message}").is_err() {
                break;
            }
        }
    }

    if let Err(err) = auth::logout(&api, session) {
        log::warn!("{err}");
    }
}
