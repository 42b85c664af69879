use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::services::Step3Data;
use crate::domain::travel::Step1Data;
use crate::domain::traveler::{DocumentType, LuggageOption, PetsOption, Step2Data, TravelerRecord};

/// Everything accumulated across the three data-entry steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingData {
    pub step1: Step1Data,
    pub step2: Step2Data,
    pub step3: Step3Data,
}

/// Field-level update for [`Step1Data`]. Nullable fields use a double option:
/// `None` leaves the field alone, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step1Patch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub destination: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub departure_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub return_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub flight_class: Option<Option<String>>,
    #[serde(rename = "priceUSD", default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step2Patch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_travelers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<Vec<TravelerRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets: Option<PetsOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_luggage: Option<LuggageOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step3Patch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_insurance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferential_seats: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_assistance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistance_notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
}

/// Partial update across step slots. Only the named slots are touched and,
/// within a slot, only the supplied fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step1: Option<Step1Patch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step2: Option<Step2Patch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step3: Option<Step3Patch>,
}

/// Whole-slot replacement carried by an advance action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReplacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step1: Option<Step1Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step2: Option<Step2Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step3: Option<Step3Data>,
}

impl Step1Patch {
    pub fn apply_to(&self, step1: &mut Step1Data) {
        if let Some(destination) = &self.destination {
            step1.destination = destination.clone();
        }
        if let Some(departure_date) = self.departure_date {
            step1.departure_date = departure_date;
        }
        if let Some(return_date) = self.return_date {
            step1.return_date = return_date;
        }
        if let Some(flight_class) = &self.flight_class {
            step1.flight_class = flight_class.clone();
        }
        if let Some(price_usd) = self.price_usd {
            step1.price_usd = price_usd;
        }
    }
}

impl Step2Patch {
    pub fn apply_to(&self, step2: &mut Step2Data) {
        if let Some(number_of_travelers) = self.number_of_travelers {
            step2.number_of_travelers = number_of_travelers;
        }
        if let Some(travelers) = &self.travelers {
            step2.travelers = travelers.clone();
        }
        if let Some(pets) = self.pets {
            step2.pets = pets;
        }
        if let Some(extra_luggage) = self.extra_luggage {
            step2.extra_luggage = extra_luggage;
        }
    }
}

impl Step3Patch {
    pub fn apply_to(&self, step3: &mut Step3Data) {
        if let Some(travel_insurance) = self.travel_insurance {
            step3.travel_insurance = travel_insurance;
        }
        if let Some(preferential_seats) = self.preferential_seats {
            step3.preferential_seats = preferential_seats;
        }
        if let Some(special_assistance) = self.special_assistance {
            step3.special_assistance = special_assistance;
        }
        if let Some(assistance_notes) = &self.assistance_notes {
            step3.assistance_notes = assistance_notes.clone();
        }
    }
}

impl TravelerPatch {
    pub fn apply_to(&self, traveler: &mut TravelerRecord) {
        if let Some(full_name) = &self.full_name {
            traveler.full_name = full_name.clone();
        }
        if let Some(date_of_birth) = self.date_of_birth {
            traveler.date_of_birth = date_of_birth;
        }
        if let Some(document_type) = self.document_type {
            traveler.document_type = document_type;
        }
        if let Some(document_number) = &self.document_number {
            traveler.document_number = document_number.clone();
        }
    }
}

impl BookingPatch {
    pub fn step1(patch: Step1Patch) -> Self {
        Self { step1: Some(patch), ..Self::default() }
    }

    pub fn step2(patch: Step2Patch) -> Self {
        Self { step2: Some(patch), ..Self::default() }
    }

    pub fn step3(patch: Step3Patch) -> Self {
        Self { step3: Some(patch), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.step1.is_none() && self.step2.is_none() && self.step3.is_none()
    }

    pub fn apply_to(&self, data: &mut BookingData) {
        if let Some(step1) = &self.step1 {
            step1.apply_to(&mut data.step1);
        }
        if let Some(step2) = &self.step2 {
            step2.apply_to(&mut data.step2);
        }
        if let Some(step3) = &self.step3 {
            step3.apply_to(&mut data.step3);
        }
    }

    /// Names of the step slots this patch touches, for audit metadata.
    pub fn touched_slots(&self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        if self.step1.is_some() {
            slots.push("step1");
        }
        if self.step2.is_some() {
            slots.push("step2");
        }
        if self.step3.is_some() {
            slots.push("step3");
        }
        slots
    }
}

impl BookingReplacement {
    pub fn is_empty(&self) -> bool {
        self.step1.is_none() && self.step2.is_none() && self.step3.is_none()
    }

    pub fn apply_to(&self, data: &mut BookingData) {
        if let Some(step1) = &self.step1 {
            data.step1 = step1.clone();
        }
        if let Some(step2) = &self.step2 {
            data.step2 = step2.clone();
        }
        if let Some(step3) = &self.step3 {
            data.step3 = step3.clone();
        }
    }
}
