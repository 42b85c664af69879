use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    #[serde(rename = "passport")]
    Passport,
    #[serde(rename = "id")]
    NationalId,
    #[serde(rename = "driverLicense")]
    DriverLicense,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] =
        [DocumentType::Passport, DocumentType::NationalId, DocumentType::DriverLicense];

    pub fn label(self) -> &'static str {
        match self {
            Self::Passport => "Passport",
            Self::NationalId => "ID Card",
            Self::DriverLicense => "Driver License",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelerRecord {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub document_type: DocumentType,
    pub document_number: String,
}

impl TravelerRecord {
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && self.date_of_birth.is_some()
            && !self.document_number.trim().is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetsOption {
    #[serde(rename = "hasPets")]
    pub enabled: bool,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuggageOption {
    #[serde(rename = "hasExtraLuggage")]
    pub enabled: bool,
    pub quantity: u32,
}

impl PetsOption {
    /// Quantity that counts toward pricing; zero while disabled.
    pub fn billable_quantity(&self) -> u32 {
        if self.enabled {
            self.quantity
        } else {
            0
        }
    }
}

impl LuggageOption {
    pub fn billable_quantity(&self) -> u32 {
        if self.enabled {
            self.quantity
        } else {
            0
        }
    }
}

/// Traveler information collected on the second wizard step.
///
/// `travelers.len()` tracks `number_of_travelers`; the edit helpers in
/// [`crate::wizard::edits`] keep the two in step whenever the count changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step2Data {
    pub number_of_travelers: u32,
    pub travelers: Vec<TravelerRecord>,
    pub pets: PetsOption,
    pub extra_luggage: LuggageOption,
}

impl Default for Step2Data {
    fn default() -> Self {
        Self {
            number_of_travelers: MIN_TRAVELERS,
            travelers: vec![TravelerRecord::default()],
            pets: PetsOption::default(),
            extra_luggage: LuggageOption::default(),
        }
    }
}
