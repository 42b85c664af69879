use std::path::Path;

use serde::Serialize;
use wayfare_core::domain::BookingData;
use wayfare_core::pricing::{DeterministicPricingEngine, PricingEngine, PricingResult};
use wayfare_core::summary::BookingSummary;
use wayfare_core::validation::{
    assistance_notes_counter, is_step_valid, return_date_hint, step_issues, FieldIssue,
};
use wayfare_core::wizard::WizardStep;

use crate::commands::{load_config, read_json, CommandResult, EXIT_INPUT};

#[derive(Debug, Serialize)]
pub(crate) struct StepReport {
    pub step: WizardStep,
    pub label: &'static str,
    pub valid: bool,
    pub issues: Vec<FieldIssue>,
}

#[derive(Debug, Serialize)]
struct QuoteReport {
    steps: Vec<StepReport>,
    hints: Vec<FieldIssue>,
    assistance_notes: String,
    pricing: PricingResult,
    summary: BookingSummary,
}

pub(crate) fn step_reports(data: &BookingData) -> Vec<StepReport> {
    [WizardStep::TravelInfo, WizardStep::TravelerInfo, WizardStep::AdditionalServices]
        .into_iter()
        .map(|step| StepReport {
            step,
            label: step.label(),
            valid: is_step_valid(step, data),
            issues: step_issues(step, data),
        })
        .collect()
}

pub fn run(path: &Path) -> CommandResult {
    let config = match load_config("quote") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let data: BookingData = match read_json(path) {
        Ok(data) => data,
        Err(error) => {
            return CommandResult::failure("quote", "invalid_input", format!("{error:#}"), EXIT_INPUT)
        }
    };

    let pricing = DeterministicPricingEngine::new(config.price_schedule()).price(&data);
    let steps = step_reports(&data);
    let incomplete = steps.iter().filter(|report| !report.valid).count();
    let report = QuoteReport {
        hints: return_date_hint(&data.step1).into_iter().collect(),
        assistance_notes: assistance_notes_counter(&data.step3).label(),
        summary: BookingSummary::from_pricing(&data, &pricing),
        pricing,
        steps,
    };

    let message = if incomplete == 0 {
        format!("booking is complete; total {} USD", report.pricing.total)
    } else {
        format!("booking has {incomplete} incomplete step(s); total {} USD", report.pricing.total)
    };

    CommandResult::success_with("quote", message, report)
}
