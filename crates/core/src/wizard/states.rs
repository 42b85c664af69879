use serde::{Deserialize, Serialize};

use crate::domain::{BookingData, BookingPatch, BookingReplacement};
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    TravelInfo = 1,
    TravelerInfo = 2,
    AdditionalServices = 3,
    Review = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::TravelInfo,
        WizardStep::TravelerInfo,
        WizardStep::AdditionalServices,
        WizardStep::Review,
    ];

    pub const FIRST: WizardStep = WizardStep::TravelInfo;
    pub const LAST: WizardStep = WizardStep::Review;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::TravelInfo),
            2 => Some(Self::TravelerInfo),
            3 => Some(Self::AdditionalServices),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    /// Clamped at [`WizardStep::LAST`].
    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// Clamped at [`WizardStep::FIRST`].
    pub fn previous(self) -> Self {
        self.number().checked_sub(1).and_then(Self::from_number).unwrap_or(Self::FIRST)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TravelInfo => "Travel Information",
            Self::TravelerInfo => "Traveler Information",
            Self::AdditionalServices => "Additional Services",
            Self::Review => "Review & Confirm",
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or(DomainError::InvalidStep(value))
    }
}

impl From<WizardStep> for u8 {
    fn from(value: WizardStep) -> Self {
        value.number()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: WizardStep,
    pub data: BookingData,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    Next {
        #[serde(default, skip_serializing_if = "BookingReplacement::is_empty")]
        replace: BookingReplacement,
    },
    Previous,
    SetStep {
        step: WizardStep,
    },
    SetData {
        patch: BookingPatch,
    },
}

impl WizardAction {
    pub fn next() -> Self {
        Self::Next { replace: BookingReplacement::default() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Next { .. } => "next",
            Self::Previous => "previous",
            Self::SetStep { .. } => "set_step",
            Self::SetData { .. } => "set_data",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    pub from: WizardStep,
    pub to: WizardState,
    pub action: &'static str,
    /// Steps whose data was reset to canonical defaults by this transition.
    pub invalidated: Vec<WizardStep>,
}
