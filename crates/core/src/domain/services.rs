use serde::{Deserialize, Serialize};

pub const MAX_ASSISTANCE_NOTES_CHARS: usize = 200;

/// Add-on services chosen on the third wizard step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step3Data {
    pub travel_insurance: bool,
    pub preferential_seats: bool,
    pub special_assistance: bool,
    pub assistance_notes: String,
}

impl Step3Data {
    pub fn assistance_notes_len(&self) -> usize {
        self.assistance_notes.chars().count()
    }
}
