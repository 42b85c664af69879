use tracing::debug;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::{BookingData, Step2Data, Step3Data};
use crate::wizard::states::{TransitionOutcome, WizardAction, WizardState, WizardStep};

pub trait WizardDefinition {
    fn initial_state(&self) -> WizardState;
    fn transition(&self, current: &WizardState, action: &WizardAction) -> TransitionOutcome;
}

/// The four-step booking wizard. Transitions never fail: out-of-range
/// navigation clamps, and gating forward moves belongs to the caller.
#[derive(Clone, Debug, Default)]
pub struct BookingWizard;

impl WizardDefinition for BookingWizard {
    fn initial_state(&self) -> WizardState {
        WizardState::default()
    }

    fn transition(&self, current: &WizardState, action: &WizardAction) -> TransitionOutcome {
        transition_booking(current, action)
    }
}

pub struct WizardEngine<W> {
    wizard: W,
}

impl<W> WizardEngine<W>
where
    W: WizardDefinition,
{
    pub fn new(wizard: W) -> Self {
        Self { wizard }
    }

    pub fn initial_state(&self) -> WizardState {
        self.wizard.initial_state()
    }

    pub fn apply(&self, current: &WizardState, action: &WizardAction) -> TransitionOutcome {
        let outcome = self.wizard.transition(current, action);
        debug!(
            event_name = "wizard.transition_applied",
            action = outcome.action,
            from = outcome.from.number(),
            to = outcome.to.current_step.number(),
            invalidated = ?outcome.invalidated,
            "wizard transition applied"
        );
        outcome
    }

    pub fn apply_with_audit<S>(
        &self,
        current: &WizardState,
        action: &WizardAction,
        sink: &S,
        audit: &AuditContext,
    ) -> TransitionOutcome
    where
        S: AuditSink + ?Sized,
    {
        let outcome = self.apply(current, action);
        let category = match action {
            WizardAction::SetData { .. } => AuditCategory::Edit,
            _ => AuditCategory::Navigation,
        };
        let mut event = AuditEvent::new(
            audit.session_id.clone(),
            audit.correlation_id.clone(),
            "wizard.transition_applied",
            category,
            audit.actor.clone(),
            AuditOutcome::Success,
        )
        .with_metadata("action", outcome.action)
        .with_metadata("from", outcome.from.number().to_string())
        .with_metadata("to", outcome.to.current_step.number().to_string());

        if !outcome.invalidated.is_empty() {
            let invalidated = outcome
                .invalidated
                .iter()
                .map(|step| step.number().to_string())
                .collect::<Vec<_>>()
                .join(",");
            event = event.with_metadata("invalidated", invalidated);
        }
        if let WizardAction::SetData { patch } = action {
            event = event.with_metadata("slots", patch.touched_slots().join(","));
        }

        sink.emit(event);
        outcome
    }
}

impl Default for WizardEngine<BookingWizard> {
    fn default() -> Self {
        Self::new(BookingWizard)
    }
}

/// Pure reducer form of [`BookingWizard`].
pub fn reduce(state: &WizardState, action: &WizardAction) -> WizardState {
    transition_booking(state, action).to
}

fn transition_booking(current: &WizardState, action: &WizardAction) -> TransitionOutcome {
    let from = current.current_step;
    let mut data = current.data.clone();

    let (to_step, invalidated) = match action {
        WizardAction::Next { replace } => {
            replace.apply_to(&mut data);
            (from.next(), Vec::new())
        }
        WizardAction::Previous => {
            let target = from.previous();
            (target, invalidate_after(target, &mut data))
        }
        WizardAction::SetStep { step } => {
            let invalidated =
                if *step < from { invalidate_after(*step, &mut data) } else { Vec::new() };
            (*step, invalidated)
        }
        WizardAction::SetData { patch } => {
            patch.apply_to(&mut data);
            (from, Vec::new())
        }
    };

    TransitionOutcome {
        from,
        to: WizardState { current_step: to_step, data },
        action: action.name(),
        invalidated,
    }
}

/// Resets the data of every step after `target` that depends on earlier answers.
fn invalidate_after(target: WizardStep, data: &mut BookingData) -> Vec<WizardStep> {
    match target {
        WizardStep::TravelInfo => {
            data.step2 = Step2Data::default();
            data.step3 = Step3Data::default();
            vec![WizardStep::TravelerInfo, WizardStep::AdditionalServices]
        }
        WizardStep::TravelerInfo => {
            data.step3 = Step3Data::default();
            vec![WizardStep::AdditionalServices]
        }
        WizardStep::AdditionalServices | WizardStep::Review => Vec::new(),
    }
}
