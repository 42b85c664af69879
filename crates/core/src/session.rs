use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::catalog::FlightCatalog;
use crate::domain::BookingData;
use crate::errors::DomainError;
use crate::pricing::{DeterministicPricingEngine, PriceSchedule, PricingEngine, PricingResult};
use crate::summary::BookingSummary;
use crate::validation::is_step_valid;
use crate::wizard::{BookingWizard, WizardAction, WizardEngine, WizardState, WizardStep};

/// Success notification returned by [`BookingSession::confirm`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub reference: String,
    pub destination: String,
    pub total: Decimal,
    pub confirmed_at: DateTime<Utc>,
    pub booking: BookingData,
}

/// One booking session. The session is the only writer of its wizard state:
/// every intent goes through [`BookingSession::dispatch`] and is applied whole.
pub struct BookingSession {
    id: Uuid,
    engine: WizardEngine<BookingWizard>,
    state: WizardState,
    catalog: FlightCatalog,
    pricing: Arc<dyn PricingEngine>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl BookingSession {
    pub fn new(catalog: FlightCatalog, schedule: PriceSchedule) -> Self {
        let engine = WizardEngine::default();
        let state = engine.initial_state();
        Self {
            id: Uuid::new_v4(),
            engine,
            state,
            catalog,
            pricing: Arc::new(DeterministicPricingEngine::new(schedule)),
            audit: None,
        }
    }

    pub fn with_pricing_engine(mut self, pricing: Arc<dyn PricingEngine>) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn data(&self) -> &BookingData {
        &self.state.data
    }

    pub fn catalog(&self) -> &FlightCatalog {
        &self.catalog
    }

    pub fn dispatch(&mut self, action: WizardAction) -> &WizardState {
        let outcome = match &self.audit {
            Some(sink) => self.engine.apply_with_audit(
                &self.state,
                &action,
                sink.as_ref(),
                &self.audit_context(),
            ),
            None => self.engine.apply(&self.state, &action),
        };

        if !outcome.invalidated.is_empty() {
            info!(
                event_name = "session.steps_invalidated",
                session_id = %self.id,
                action = outcome.action,
                invalidated = ?outcome.invalidated,
                "downstream step data reset"
            );
        }

        self.state = outcome.to;
        &self.state
    }

    pub fn is_current_step_valid(&self) -> bool {
        is_step_valid(self.state.current_step, &self.state.data)
    }

    /// Whether a "Next" control should be enabled.
    pub fn can_advance(&self) -> bool {
        self.state.current_step < WizardStep::LAST && self.is_current_step_valid()
    }

    pub fn pricing(&self) -> PricingResult {
        self.pricing.price(&self.state.data)
    }

    pub fn total(&self) -> Decimal {
        self.pricing().total
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary::from_pricing(&self.state.data, &self.pricing())
    }

    /// Confirms the reservation from the review step and returns the session
    /// to its entry state.
    pub fn confirm(&mut self) -> Result<Confirmation, DomainError> {
        let incomplete = [
            WizardStep::TravelInfo,
            WizardStep::TravelerInfo,
            WizardStep::AdditionalServices,
        ]
        .into_iter()
        .filter(|step| !is_step_valid(*step, &self.state.data))
        .collect::<Vec<_>>();

        if self.state.current_step != WizardStep::Review || !incomplete.is_empty() {
            let error =
                DomainError::NotReadyToConfirm { step: self.state.current_step, incomplete };
            warn!(
                event_name = "session.confirm_rejected",
                session_id = %self.id,
                error = %error,
                "booking confirmation rejected"
            );
            self.emit(
                AuditEvent::new(
                    Some(self.id.to_string()),
                    self.id.to_string(),
                    "session.confirm_rejected",
                    AuditCategory::Confirmation,
                    "session",
                    AuditOutcome::Rejected,
                )
                .with_metadata("error", error.to_string()),
            );
            return Err(error);
        }

        let pricing = self.pricing();
        self.emit(
            AuditEvent::new(
                Some(self.id.to_string()),
                self.id.to_string(),
                "pricing.finalized",
                AuditCategory::Pricing,
                "session",
                AuditOutcome::Success,
            )
            .with_metadata("lines", pricing.steps.len().to_string())
            .with_metadata("total", pricing.total.to_string()),
        );

        let total = pricing.total;
        let booking = std::mem::replace(&mut self.state, self.engine.initial_state()).data;
        let confirmation = Confirmation {
            reference: booking_reference(self.id),
            destination: booking.step1.destination.clone().unwrap_or_default(),
            total,
            confirmed_at: Utc::now(),
            booking,
        };

        info!(
            event_name = "session.confirmed",
            session_id = %self.id,
            reference = %confirmation.reference,
            total = %confirmation.total,
            "booking confirmed"
        );
        self.emit(
            AuditEvent::new(
                Some(self.id.to_string()),
                self.id.to_string(),
                "session.confirmed",
                AuditCategory::Confirmation,
                "session",
                AuditOutcome::Success,
            )
            .with_metadata("reference", confirmation.reference.clone())
            .with_metadata("total", confirmation.total.to_string()),
        );

        Ok(confirmation)
    }

    fn audit_context(&self) -> AuditContext {
        AuditContext::new(Some(self.id.to_string()), self.id.to_string(), "session")
    }

    fn emit(&self, event: AuditEvent) {
        if let Some(sink) = &self.audit {
            sink.emit(event);
        }
    }
}

fn booking_reference(session_id: Uuid) -> String {
    let simple = session_id.simple().to_string().to_ascii_uppercase();
    format!("WF-{}", &simple[..8])
}
