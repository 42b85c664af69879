use serde::{Deserialize, Serialize};

use crate::domain::{
    BookingData, Step1Data, Step2Data, Step3Data, MAX_ASSISTANCE_NOTES_CHARS, MAX_TRAVELERS,
    MIN_TRAVELERS,
};
use crate::wizard::WizardStep;

pub fn is_step1_valid(step1: &Step1Data) -> bool {
    step1.has_destination()
        && step1.departure_date.is_some()
        && step1.return_date.is_some()
        && step1.flight_class.as_deref().is_some_and(|class| !class.is_empty())
}

pub fn is_step2_valid(step2: &Step2Data) -> bool {
    (MIN_TRAVELERS..=MAX_TRAVELERS).contains(&step2.number_of_travelers)
        && step2.travelers.len() == step2.number_of_travelers as usize
        && step2.travelers.iter().all(|traveler| traveler.is_complete())
        && (!step2.pets.enabled || step2.pets.quantity >= 1)
        && (!step2.extra_luggage.enabled || step2.extra_luggage.quantity >= 1)
}

pub fn is_step3_valid(step3: &Step3Data) -> bool {
    !step3.special_assistance
        || (!step3.assistance_notes.trim().is_empty()
            && step3.assistance_notes_len() <= MAX_ASSISTANCE_NOTES_CHARS)
}

/// Gate for leaving `step` forward. The review step has nothing after it and always passes.
pub fn is_step_valid(step: WizardStep, data: &BookingData) -> bool {
    match step {
        WizardStep::TravelInfo => is_step1_valid(&data.step1),
        WizardStep::TravelerInfo => is_step2_valid(&data.step2),
        WizardStep::AdditionalServices => is_step3_valid(&data.step3),
        WizardStep::Review => true,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub code: String,
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(code: &str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), field: field.into(), message: message.into() }
    }
}

/// Display-only check: a return before departure is flagged for the user but
/// does not block navigation.
pub fn return_date_hint(step1: &Step1Data) -> Option<FieldIssue> {
    match (step1.departure_date, step1.return_date) {
        (Some(departure), Some(returning)) if returning < departure => Some(FieldIssue::new(
            "RETURN_BEFORE_DEPARTURE",
            "returnDate",
            "Return date must be after departure date",
        )),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesCounter {
    pub length: usize,
    pub limit: usize,
    pub over_limit: bool,
}

impl NotesCounter {
    pub fn label(&self) -> String {
        format!("{}/{} characters", self.length, self.limit)
    }
}

pub fn assistance_notes_counter(step3: &Step3Data) -> NotesCounter {
    let length = step3.assistance_notes_len();
    NotesCounter {
        length,
        limit: MAX_ASSISTANCE_NOTES_CHARS,
        over_limit: length > MAX_ASSISTANCE_NOTES_CHARS,
    }
}

/// Field-level error text for a step. Empty exactly when [`is_step_valid`] holds;
/// date order is reported separately by [`return_date_hint`].
pub fn step_issues(step: WizardStep, data: &BookingData) -> Vec<FieldIssue> {
    match step {
        WizardStep::TravelInfo => step1_issues(&data.step1),
        WizardStep::TravelerInfo => step2_issues(&data.step2),
        WizardStep::AdditionalServices => step3_issues(&data.step3),
        WizardStep::Review => Vec::new(),
    }
}

fn step1_issues(step1: &Step1Data) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if !step1.has_destination() {
        issues.push(FieldIssue::new("MISSING_FIELD", "destination", "Select your destination"));
    }
    if step1.departure_date.is_none() {
        issues.push(FieldIssue::new("MISSING_FIELD", "departureDate", "Choose a departure date"));
    }
    if step1.return_date.is_none() {
        issues.push(FieldIssue::new("MISSING_FIELD", "returnDate", "Choose a return date"));
    }
    if step1.flight_class.as_deref().map_or(true, str::is_empty) {
        issues.push(FieldIssue::new("MISSING_FIELD", "flightClass", "Select a flight class"));
    }
    issues
}

fn step2_issues(step2: &Step2Data) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&step2.number_of_travelers) {
        issues.push(FieldIssue::new(
            "TRAVELER_COUNT_OUT_OF_RANGE",
            "numberOfTravelers",
            format!("Number of travelers must be between {MIN_TRAVELERS} and {MAX_TRAVELERS}"),
        ));
    }
    if step2.travelers.len() != step2.number_of_travelers as usize {
        issues.push(FieldIssue::new(
            "TRAVELER_COUNT_MISMATCH",
            "travelers",
            format!(
                "Expected {} traveler records but found {}",
                step2.number_of_travelers,
                step2.travelers.len()
            ),
        ));
    }

    for (index, traveler) in step2.travelers.iter().enumerate() {
        if traveler.full_name.trim().is_empty() {
            issues.push(FieldIssue::new(
                "MISSING_FIELD",
                format!("travelers[{index}].fullName"),
                format!("Traveler {} needs a full name", index + 1),
            ));
        }
        if traveler.date_of_birth.is_none() {
            issues.push(FieldIssue::new(
                "MISSING_FIELD",
                format!("travelers[{index}].dateOfBirth"),
                format!("Traveler {} needs a date of birth", index + 1),
            ));
        }
        if traveler.document_number.trim().is_empty() {
            issues.push(FieldIssue::new(
                "MISSING_FIELD",
                format!("travelers[{index}].documentNumber"),
                format!("Traveler {} needs a document number", index + 1),
            ));
        }
    }

    if step2.pets.enabled && step2.pets.quantity < 1 {
        issues.push(FieldIssue::new(
            "ZERO_QUANTITY",
            "pets.quantity",
            "Pets quantity must be at least 1",
        ));
    }
    if step2.extra_luggage.enabled && step2.extra_luggage.quantity < 1 {
        issues.push(FieldIssue::new(
            "ZERO_QUANTITY",
            "extraLuggage.quantity",
            "Extra luggage quantity must be at least 1",
        ));
    }

    issues
}

fn step3_issues(step3: &Step3Data) -> Vec<FieldIssue> {
    if !step3.special_assistance {
        return Vec::new();
    }

    let mut issues = Vec::new();
    if step3.assistance_notes.trim().is_empty() {
        issues.push(FieldIssue::new(
            "MISSING_FIELD",
            "assistanceNotes",
            "Please describe the type of assistance you require.",
        ));
    }
    if step3.assistance_notes_len() > MAX_ASSISTANCE_NOTES_CHARS {
        issues.push(FieldIssue::new(
            "NOTES_TOO_LONG",
            "assistanceNotes",
            format!("Assistance notes are limited to {MAX_ASSISTANCE_NOTES_CHARS} characters"),
        ));
    }
    issues
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        assistance_notes_counter, is_step1_valid, is_step2_valid, is_step3_valid, is_step_valid,
        return_date_hint, step_issues,
    };
    use crate::domain::{
        BookingData, DocumentType, LuggageOption, PetsOption, Step1Data, Step2Data, Step3Data,
        TravelerRecord,
    };
    use crate::wizard::WizardStep;

    fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn paris_trip() -> Step1Data {
        Step1Data {
            destination: Some("Paris".to_owned()),
            departure_date: date(2025, 6, 1),
            return_date: date(2025, 6, 10),
            flight_class: Some("Economy".to_owned()),
            ..Step1Data::default()
        }
    }

    fn traveler(name: &str) -> TravelerRecord {
        TravelerRecord {
            full_name: name.to_owned(),
            date_of_birth: date(1990, 4, 12),
            document_type: DocumentType::DriverLicense,
            document_number: "DL-778".to_owned(),
        }
    }

    fn two_travelers() -> Step2Data {
        Step2Data {
            number_of_travelers: 2,
            travelers: vec![traveler("Ana Ruiz"), traveler("Luis Ruiz")],
            ..Step2Data::default()
        }
    }

    #[test]
    fn step1_requires_all_four_fields() {
        assert!(is_step1_valid(&paris_trip()));
        assert!(!is_step1_valid(&Step1Data { flight_class: None, ..paris_trip() }));
        assert!(!is_step1_valid(&Step1Data { destination: None, ..paris_trip() }));
        assert!(!is_step1_valid(&Step1Data { departure_date: None, ..paris_trip() }));
        assert!(!is_step1_valid(&Step1Data { return_date: None, ..paris_trip() }));
        assert!(!is_step1_valid(&Step1Data::default()));
    }

    #[test]
    fn step1_gate_ignores_date_order() {
        let reversed = Step1Data { return_date: date(2025, 5, 20), ..paris_trip() };

        assert!(is_step1_valid(&reversed));
        let hint = return_date_hint(&reversed).expect("reversed dates are flagged");
        assert_eq!(hint.code, "RETURN_BEFORE_DEPARTURE");
        assert_eq!(hint.message, "Return date must be after departure date");
        assert!(return_date_hint(&paris_trip()).is_none());

        let same_day = Step1Data { return_date: date(2025, 6, 1), ..paris_trip() };
        assert!(return_date_hint(&same_day).is_none());
    }

    #[test]
    fn step2_rejects_length_mismatch() {
        let step2 = Step2Data { travelers: vec![traveler("Ana Ruiz")], ..two_travelers() };
        assert!(!is_step2_valid(&step2));
        assert!(step_issues(WizardStep::TravelerInfo, &BookingData { step2, ..BookingData::default() })
            .iter()
            .any(|issue| issue.code == "TRAVELER_COUNT_MISMATCH"));
    }

    #[test]
    fn step2_rejects_enabled_option_with_zero_quantity() {
        let pets = Step2Data { pets: PetsOption { enabled: true, quantity: 0 }, ..two_travelers() };
        assert!(!is_step2_valid(&pets));

        let luggage = Step2Data {
            extra_luggage: LuggageOption { enabled: true, quantity: 0 },
            ..two_travelers()
        };
        assert!(!is_step2_valid(&luggage));
    }

    #[test]
    fn step2_accepts_fully_populated_travelers() {
        assert!(is_step2_valid(&two_travelers()));

        let with_pets = Step2Data { pets: PetsOption { enabled: true, quantity: 2 }, ..two_travelers() };
        assert!(is_step2_valid(&with_pets));
    }

    #[test]
    fn step2_rejects_out_of_range_count_and_blank_fields() {
        let empty = Step2Data { number_of_travelers: 0, travelers: Vec::new(), ..Step2Data::default() };
        assert!(!is_step2_valid(&empty));

        let mut blank_document = two_travelers();
        blank_document.travelers[1].document_number = "  ".to_owned();
        assert!(!is_step2_valid(&blank_document));

        assert!(!is_step2_valid(&Step2Data::default()));
    }

    #[test]
    fn step3_notes_rules_apply_only_with_special_assistance() {
        let assistance = |notes: String| Step3Data {
            special_assistance: true,
            assistance_notes: notes,
            ..Step3Data::default()
        };

        assert!(!is_step3_valid(&assistance(String::new())));
        assert!(!is_step3_valid(&assistance("   ".to_owned())));
        assert!(!is_step3_valid(&assistance("a".repeat(201))));
        assert!(is_step3_valid(&assistance("a".repeat(150))));
        assert!(is_step3_valid(&assistance("a".repeat(200))));

        let no_assistance = Step3Data { assistance_notes: "a".repeat(300), ..Step3Data::default() };
        assert!(is_step3_valid(&no_assistance));
        assert!(is_step3_valid(&Step3Data::default()));
    }

    #[test]
    fn notes_counter_reports_length_against_limit() {
        let step3 = Step3Data { assistance_notes: "a".repeat(201), ..Step3Data::default() };
        let counter = assistance_notes_counter(&step3);

        assert!(counter.over_limit);
        assert_eq!(counter.label(), "201/200 characters");
    }

    #[test]
    fn review_step_always_passes() {
        assert!(is_step_valid(WizardStep::Review, &BookingData::default()));
        assert!(!is_step_valid(WizardStep::TravelInfo, &BookingData::default()));
        assert!(is_step_valid(WizardStep::AdditionalServices, &BookingData::default()));
    }

    #[test]
    fn issues_are_empty_whenever_gate_passes() {
        let data = BookingData { step1: paris_trip(), step2: two_travelers(), ..BookingData::default() };
        for step in WizardStep::ALL {
            assert_eq!(
                step_issues(step, &data).is_empty(),
                is_step_valid(step, &data),
                "issues and gate disagree for step {step}"
            );
        }

        let issues = step_issues(WizardStep::TravelInfo, &BookingData::default());
        assert_eq!(issues.len(), 4);
    }
}
