use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Travel information collected on the first wizard step.
///
/// `flight_class` and `price_usd` only mean something next to a selected
/// destination. Changing the destination must clear both, see
/// [`crate::wizard::edits::select_destination`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step1Data {
    pub destination: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub flight_class: Option<String>,
    #[serde(rename = "priceUSD", default)]
    pub price_usd: Decimal,
}

impl Step1Data {
    pub fn has_destination(&self) -> bool {
        self.destination.as_deref().is_some_and(|destination| !destination.is_empty())
    }
}
