use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::BookingData;
use crate::pricing::PricingResult;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerLine {
    pub full_name: String,
    pub date_of_birth: String,
    pub document: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnLine {
    pub label: String,
    pub amount: Decimal,
}

/// Review-screen view of a booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub destination: String,
    pub flight_class: String,
    pub departure_date: String,
    pub return_date: String,
    pub number_of_travelers: u32,
    pub travelers: Vec<TravelerLine>,
    pub add_ons: Vec<AddOnLine>,
    pub travel_insurance: bool,
    pub preferential_seats: bool,
    pub special_assistance: bool,
    pub assistance_notes: Option<String>,
    pub destination_price: Decimal,
    pub total: Decimal,
}

impl BookingSummary {
    pub fn from_pricing(data: &BookingData, pricing: &PricingResult) -> Self {
        let step1 = &data.step1;
        let step2 = &data.step2;
        let step3 = &data.step3;

        let travelers = step2
            .travelers
            .iter()
            .map(|traveler| TravelerLine {
                full_name: traveler.full_name.clone(),
                date_of_birth: format_date(traveler.date_of_birth),
                document: format!(
                    "{}: {}",
                    traveler.document_type.label(),
                    traveler.document_number
                ),
            })
            .collect();

        let add_ons = pricing
            .steps
            .iter()
            .skip(1)
            .map(|step| AddOnLine { label: add_on_label(&step.stage, step.quantity), amount: step.amount })
            .collect();

        let assistance_notes = (step3.special_assistance && !step3.assistance_notes.is_empty())
            .then(|| step3.assistance_notes.clone());

        Self {
            destination: step1.destination.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            flight_class: step1.flight_class.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            departure_date: format_date(step1.departure_date),
            return_date: format_date(step1.return_date),
            number_of_travelers: step2.number_of_travelers,
            travelers,
            add_ons,
            travel_insurance: step3.travel_insurance,
            preferential_seats: step3.preferential_seats,
            special_assistance: step3.special_assistance,
            assistance_notes,
            destination_price: step1.price_usd,
            total: pricing.total,
        }
    }
}

/// `June 1, 2025`, or `Not specified` when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn add_on_label(stage: &str, quantity: u32) -> String {
    let plural = if quantity == 1 { "" } else { "s" };
    match stage {
        "pets" => format!("Traveling with {quantity} pet{plural}"),
        "extra_luggage" => format!("{quantity} extra luggage item{plural}"),
        "travel_insurance" => "Travel Insurance".to_string(),
        "preferential_seats" => "Preferential Seats".to_string(),
        other => other.to_string(),
    }
}
