use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::BookingData;

pub const PET_PRICE: u32 = 100;
pub const LUGGAGE_PRICE: u32 = 50;
pub const DEFAULT_INSURANCE_PRICE: u32 = 40;
pub const DEFAULT_PREFERENTIAL_SEATS_PRICE: u32 = 25;

/// Fixed per-unit add-on prices in USD. Insurance and seat prices come from
/// configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSchedule {
    pub pet: Decimal,
    pub luggage: Decimal,
    pub insurance: Decimal,
    pub preferential_seats: Decimal,
}

impl Default for PriceSchedule {
    fn default() -> Self {
        Self {
            pet: Decimal::from(PET_PRICE),
            luggage: Decimal::from(LUGGAGE_PRICE),
            insurance: Decimal::from(DEFAULT_INSURANCE_PRICE),
            preferential_seats: Decimal::from(DEFAULT_PREFERENTIAL_SEATS_PRICE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub currency: String,
    pub base_fare: Decimal,
    pub add_ons: Decimal,
    pub total: Decimal,
    pub steps: Vec<PricingTraceStep>,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, data: &BookingData) -> PricingResult;
}

#[derive(Clone, Debug, Default)]
pub struct DeterministicPricingEngine {
    schedule: PriceSchedule,
}

impl DeterministicPricingEngine {
    pub fn new(schedule: PriceSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &PriceSchedule {
        &self.schedule
    }
}

impl PricingEngine for DeterministicPricingEngine {
    fn price(&self, data: &BookingData) -> PricingResult {
        price_booking(data, &self.schedule)
    }
}

/// Total booking cost. Never fails: missing upstream data contributes zero and
/// amounts past the decimal range saturate at `Decimal::MAX`.
pub fn compute_total(data: &BookingData, schedule: &PriceSchedule) -> Decimal {
    price_booking(data, schedule).total
}

pub fn price_booking(data: &BookingData, schedule: &PriceSchedule) -> PricingResult {
    let travelers = data.step2.number_of_travelers;
    let mut steps = vec![PricingTraceStep {
        stage: "base_fare".to_string(),
        detail: "priceUSD * numberOfTravelers".to_string(),
        quantity: travelers,
        unit_price: data.step1.price_usd,
        amount: data.step1.price_usd.saturating_mul(Decimal::from(travelers)),
    }];

    if data.step2.pets.enabled {
        steps.push(line("pets", "pets.quantity * pet price", data.step2.pets.quantity, schedule.pet));
    }
    if data.step2.extra_luggage.enabled {
        steps.push(line(
            "extra_luggage",
            "extraLuggage.quantity * luggage price",
            data.step2.extra_luggage.quantity,
            schedule.luggage,
        ));
    }
    if data.step3.travel_insurance {
        steps.push(line(
            "travel_insurance",
            "insurance price * numberOfTravelers",
            travelers,
            schedule.insurance,
        ));
    }
    if data.step3.preferential_seats {
        steps.push(line(
            "preferential_seats",
            "seat price * numberOfTravelers",
            travelers,
            schedule.preferential_seats,
        ));
    }

    let base_fare = steps[0].amount;
    let total = steps.iter().fold(Decimal::ZERO, |sum, step| sum.saturating_add(step.amount));

    PricingResult {
        currency: "USD".to_string(),
        base_fare,
        add_ons: total.saturating_sub(base_fare),
        total,
        steps,
    }
}

fn line(stage: &str, detail: &str, quantity: u32, unit_price: Decimal) -> PricingTraceStep {
    PricingTraceStep {
        stage: stage.to_string(),
        detail: detail.to_string(),
        quantity,
        unit_price,
        amount: unit_price.saturating_mul(Decimal::from(quantity)),
    }
}
