//! Patch builders for field edits.
//!
//! The reducer merges whatever it is given. These helpers compute patches that
//! keep the data invariants intact: destination changes clear the class and
//! fare, the traveler list tracks the traveler count, and add-on quantities
//! follow their toggles.

use rust_decimal::Decimal;

use crate::catalog::FlightCatalog;
use crate::domain::{
    BookingPatch, LuggageOption, PetsOption, Step1Data, Step1Patch, Step2Data, Step2Patch,
    TravelerPatch, TravelerRecord, MAX_TRAVELERS, MIN_TRAVELERS,
};

pub fn select_destination(destination: Option<String>) -> BookingPatch {
    BookingPatch::step1(Step1Patch {
        destination: Some(destination),
        flight_class: Some(None),
        price_usd: Some(Decimal::ZERO),
        ..Step1Patch::default()
    })
}

/// Picks a class for the current destination, pricing it from the catalog
/// (zero when the pair is not listed).
pub fn select_flight_class(
    catalog: &FlightCatalog,
    step1: &Step1Data,
    class: impl Into<String>,
) -> BookingPatch {
    let class = class.into();
    let price = step1
        .destination
        .as_deref()
        .and_then(|destination| catalog.price_for(destination, &class))
        .unwrap_or(Decimal::ZERO);

    BookingPatch::step1(Step1Patch {
        flight_class: Some(Some(class)),
        price_usd: Some(price),
        ..Step1Patch::default()
    })
}

/// Clamps `count` into the traveler bounds and grows or truncates the list to match.
pub fn set_traveler_count(step2: &Step2Data, count: u32) -> BookingPatch {
    let count = count.clamp(MIN_TRAVELERS, MAX_TRAVELERS);
    let target = count as usize;

    let travelers = if step2.travelers.len() == target {
        None
    } else {
        let mut travelers = step2.travelers.clone();
        travelers.resize_with(target, TravelerRecord::default);
        Some(travelers)
    };

    BookingPatch::step2(Step2Patch {
        number_of_travelers: Some(count),
        travelers,
        ..Step2Patch::default()
    })
}

/// `None` when the count is already at the maximum.
pub fn increment_travelers(step2: &Step2Data) -> Option<BookingPatch> {
    (step2.number_of_travelers < MAX_TRAVELERS)
        .then(|| set_traveler_count(step2, step2.number_of_travelers + 1))
}

/// `None` when the count is already at the minimum.
pub fn decrement_travelers(step2: &Step2Data) -> Option<BookingPatch> {
    (step2.number_of_travelers > MIN_TRAVELERS)
        .then(|| set_traveler_count(step2, step2.number_of_travelers - 1))
}

pub fn update_traveler(step2: &Step2Data, index: usize, patch: &TravelerPatch) -> BookingPatch {
    let Some(current) = step2.travelers.get(index) else {
        return BookingPatch::default();
    };

    let mut updated = current.clone();
    patch.apply_to(&mut updated);

    let mut travelers = step2.travelers.clone();
    travelers[index] = updated;
    BookingPatch::step2(Step2Patch { travelers: Some(travelers), ..Step2Patch::default() })
}

pub fn toggle_pets(step2: &Step2Data, enabled: bool) -> BookingPatch {
    let quantity = toggled_quantity(enabled, step2.pets.quantity);
    BookingPatch::step2(Step2Patch {
        pets: Some(PetsOption { enabled, quantity }),
        ..Step2Patch::default()
    })
}

pub fn toggle_extra_luggage(step2: &Step2Data, enabled: bool) -> BookingPatch {
    let quantity = toggled_quantity(enabled, step2.extra_luggage.quantity);
    BookingPatch::step2(Step2Patch {
        extra_luggage: Some(LuggageOption { enabled, quantity }),
        ..Step2Patch::default()
    })
}

pub fn set_pets_quantity(step2: &Step2Data, quantity: u32) -> BookingPatch {
    BookingPatch::step2(Step2Patch {
        pets: Some(PetsOption { quantity, ..step2.pets }),
        ..Step2Patch::default()
    })
}

pub fn set_luggage_quantity(step2: &Step2Data, quantity: u32) -> BookingPatch {
    BookingPatch::step2(Step2Patch {
        extra_luggage: Some(LuggageOption { quantity, ..step2.extra_luggage }),
        ..Step2Patch::default()
    })
}

fn toggled_quantity(enabled: bool, current: u32) -> u32 {
    match (enabled, current) {
        (false, _) => 0,
        (true, 0) => 1,
        (true, quantity) => quantity,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{
        decrement_travelers, increment_travelers, select_destination, select_flight_class,
        set_pets_quantity, set_traveler_count, toggle_extra_luggage, toggle_pets, update_traveler,
    };
    use crate::catalog::{FlightCatalog, FlightRecord};
    use crate::domain::{
        BookingData, PetsOption, Step1Data, Step2Data, TravelerPatch, TravelerRecord,
        MAX_TRAVELERS,
    };

    fn named(name: &str) -> TravelerRecord {
        TravelerRecord { full_name: name.to_owned(), ..TravelerRecord::default() }
    }

    #[test]
    fn changing_destination_clears_class_and_fare() {
        let mut data = BookingData::default();
        data.step1 = Step1Data {
            destination: Some("Paris".to_owned()),
            flight_class: Some("Business".to_owned()),
            price_usd: Decimal::new(1_400, 0),
            ..Step1Data::default()
        };

        let edit = select_destination(Some("Lima".to_owned()));
        edit.apply_to(&mut data);

        assert_eq!(data.step1.destination.as_deref(), Some("Lima"));
        assert!(data.step1.flight_class.is_none());
        assert_eq!(data.step1.price_usd, Decimal::ZERO);
    }

    #[test]
    fn selecting_class_prices_it_from_catalog() {
        let catalog = FlightCatalog::new(vec![FlightRecord {
            destination: "Paris".to_owned(),
            class: "Economy".to_owned(),
            price_usd: Decimal::new(500, 0),
        }]);
        let mut data = BookingData::default();
        let edit = select_destination(Some("Paris".to_owned()));
        edit.apply_to(&mut data);

        let edit = select_flight_class(&catalog, &data.step1, "Economy");
        edit.apply_to(&mut data);
        assert_eq!(data.step1.price_usd, Decimal::new(500, 0));

        let edit = select_flight_class(&catalog, &data.step1, "First");
        edit.apply_to(&mut data);
        assert_eq!(data.step1.flight_class.as_deref(), Some("First"));
        assert_eq!(data.step1.price_usd, Decimal::ZERO);
    }

    #[test]
    fn traveler_count_grows_with_blank_records_and_truncates_from_end() {
        let mut data = BookingData::default();
        data.step2.travelers = vec![named("Ana")];

        let edit = set_traveler_count(&data.step2, 3);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.number_of_travelers, 3);
        assert_eq!(data.step2.travelers.len(), 3);
        assert_eq!(data.step2.travelers[0].full_name, "Ana");
        assert_eq!(data.step2.travelers[2], TravelerRecord::default());

        let edit = set_traveler_count(&data.step2, 1);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.travelers, vec![named("Ana")]);
    }

    #[test]
    fn traveler_count_is_clamped_to_bounds() {
        let step2 = Step2Data::default();

        let mut data = BookingData::default();
        let edit = set_traveler_count(&step2, 42);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.number_of_travelers, MAX_TRAVELERS);
        assert_eq!(data.step2.travelers.len(), MAX_TRAVELERS as usize);

        let mut data = BookingData::default();
        let edit = set_traveler_count(&step2, 0);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.number_of_travelers, 1);
        assert_eq!(data.step2.travelers.len(), 1);
    }

    #[test]
    fn increment_and_decrement_stop_at_bounds() {
        assert!(decrement_travelers(&Step2Data::default()).is_none());
        assert!(increment_travelers(&Step2Data::default()).is_some());

        let full = Step2Data {
            number_of_travelers: MAX_TRAVELERS,
            travelers: vec![TravelerRecord::default(); MAX_TRAVELERS as usize],
            ..Step2Data::default()
        };
        assert!(increment_travelers(&full).is_none());
        assert!(decrement_travelers(&full).is_some());
    }

    #[test]
    fn update_traveler_merges_one_record() {
        let mut data = BookingData::default();
        let edit = set_traveler_count(&data.step2, 2);
        edit.apply_to(&mut data);

        let patch = TravelerPatch {
            full_name: Some("Luis".to_owned()),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1988, 9, 3)),
            ..TravelerPatch::default()
        };
        let edit = update_traveler(&data.step2, 1, &patch);
        edit.apply_to(&mut data);

        assert_eq!(data.step2.travelers[1].full_name, "Luis");
        assert!(data.step2.travelers[1].date_of_birth.is_some());
        assert_eq!(data.step2.travelers[0], TravelerRecord::default());

        assert!(update_traveler(&data.step2, 5, &patch).is_empty());
    }

    #[test]
    fn toggles_default_quantity_to_one_and_reset_to_zero() {
        let mut data = BookingData::default();

        let edit = toggle_pets(&data.step2, true);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.pets, PetsOption { enabled: true, quantity: 1 });

        let edit = set_pets_quantity(&data.step2, 3);
        edit.apply_to(&mut data);
        let edit = toggle_pets(&data.step2, true);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.pets.quantity, 3);

        let edit = toggle_pets(&data.step2, false);
        edit.apply_to(&mut data);
        assert_eq!(data.step2.pets, PetsOption { enabled: false, quantity: 0 });

        let edit = toggle_extra_luggage(&data.step2, true);
        edit.apply_to(&mut data);
        assert!(data.step2.extra_luggage.enabled);
        assert_eq!(data.step2.extra_luggage.quantity, 1);
    }
}
