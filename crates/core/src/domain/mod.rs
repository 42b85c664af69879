pub mod booking;
pub mod services;
pub mod travel;
pub mod traveler;

pub use booking::{
    BookingData, BookingPatch, BookingReplacement, Step1Patch, Step2Patch, Step3Patch,
    TravelerPatch,
};
pub use services::{Step3Data, MAX_ASSISTANCE_NOTES_CHARS};
pub use travel::Step1Data;
pub use traveler::{
    DocumentType, LuggageOption, PetsOption, Step2Data, TravelerRecord, MAX_TRAVELERS,
    MIN_TRAVELERS,
};
