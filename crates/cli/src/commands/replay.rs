use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wayfare_core::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
use wayfare_core::catalog::CatalogStatus;
use wayfare_core::session::{BookingSession, Confirmation};
use wayfare_core::summary::BookingSummary;
use wayfare_core::validation::{step_issues, FieldIssue};
use wayfare_core::wizard::{WizardAction, WizardStep};

use crate::commands::quote::{step_reports, StepReport};
use crate::commands::{
    load_catalog, load_config, read_json, CommandResult, EXIT_INPUT, EXIT_REJECTED,
};

/// A scripted session: actions are dispatched in order, then the booking is
/// optionally confirmed.
#[derive(Debug, Deserialize)]
struct ReplayScript {
    actions: Vec<WizardAction>,
    #[serde(default)]
    confirm: bool,
    /// Dispatch `next` even when the current step does not validate.
    #[serde(default)]
    ungated: bool,
}

#[derive(Debug, Serialize)]
struct ReplayEntry {
    index: usize,
    action: &'static str,
    from: WizardStep,
    to: WizardStep,
    blocked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<FieldIssue>,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    session_id: String,
    catalog: CatalogStatus,
    entries: Vec<ReplayEntry>,
    final_step: WizardStep,
    total: Decimal,
    summary: BookingSummary,
    audit_events: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmation: Option<Confirmation>,
}

#[derive(Debug, Serialize)]
struct RejectedReport {
    session_id: String,
    error: String,
    steps: Vec<StepReport>,
}

pub fn run(path: &Path) -> CommandResult {
    let config = match load_config("replay") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let script: ReplayScript = match read_json(path) {
        Ok(script) => script,
        Err(error) => {
            return CommandResult::failure("replay", "invalid_input", format!("{error:#}"), EXIT_INPUT)
        }
    };

    let (catalog, status) = load_catalog(&config);

    let sink = InMemoryAuditSink::default();
    let catalog_event = match &status {
        CatalogStatus::Ready { records } => catalog_audit("catalog.loaded", AuditOutcome::Success)
            .with_metadata("records", records.to_string()),
        CatalogStatus::Failed { message } => {
            catalog_audit("catalog.load_failed", AuditOutcome::Failed)
                .with_metadata("error", message.clone())
        }
    };
    sink.emit(catalog_event);
    let mut session = BookingSession::new(catalog, config.price_schedule())
        .with_audit_sink(Arc::new(sink.clone()));

    let mut entries = Vec::with_capacity(script.actions.len());
    for (index, action) in script.actions.into_iter().enumerate() {
        let from = session.current_step();
        let is_next = matches!(action, WizardAction::Next { .. });

        if is_next && !script.ungated && !session.can_advance() {
            let issues = step_issues(from, session.data());
            warn!(
                event_name = "cli.replay_next_blocked",
                session_id = %session.id(),
                step = from.number(),
                issues = issues.len(),
                "next blocked by step validation"
            );
            entries.push(ReplayEntry {
                index,
                action: action.name(),
                from,
                to: from,
                blocked: true,
                issues,
            });
            continue;
        }

        let name = action.name();
        let to = session.dispatch(action).current_step;
        entries.push(ReplayEntry { index, action: name, from, to, blocked: false, issues: Vec::new() });
    }

    let final_step = session.current_step();
    let total = session.total();
    let summary = session.summary();

    let confirmation = if script.confirm {
        match session.confirm() {
            Ok(confirmation) => Some(confirmation),
            Err(error) => {
                let report = RejectedReport {
                    session_id: session.id().to_string(),
                    error: error.to_string(),
                    steps: step_reports(session.data()),
                };
                return CommandResult::failure_with(
                    "replay",
                    "confirm_rejected",
                    "booking is not ready to confirm",
                    EXIT_REJECTED,
                    report,
                );
            }
        }
    } else {
        None
    };

    info!(
        event_name = "cli.replay_completed",
        session_id = %session.id(),
        actions = entries.len(),
        confirmed = confirmation.is_some(),
        "replay completed"
    );

    let message = match &confirmation {
        Some(confirmation) => format!(
            "Booking confirmed! Reference {} for {}",
            confirmation.reference, confirmation.destination
        ),
        None => format!("replayed {} actions; now at step {final_step}", entries.len()),
    };

    CommandResult::success_with(
        "replay",
        message,
        ReplayReport {
            session_id: session.id().to_string(),
            catalog: status,
            entries,
            final_step,
            total,
            summary,
            audit_events: sink.events().len(),
            confirmation,
        },
    )
}

fn catalog_audit(event_type: &str, outcome: AuditOutcome) -> AuditEvent {
    AuditEvent::new(None, "cli-replay", event_type, AuditCategory::Catalog, "cli", outcome)
}
