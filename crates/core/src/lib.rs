pub mod audit;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod session;
pub mod summary;
pub mod validation;
pub mod wizard;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
pub use catalog::{
    CatalogError, CatalogSource, CatalogStatus, ClassPrice, FlightCatalog, FlightRecord,
    JsonFileCatalogSource, StaticCatalogSource,
};
pub use domain::{BookingData, BookingPatch, BookingReplacement, Step1Data, Step2Data, Step3Data};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use pricing::{
    compute_total, price_booking, DeterministicPricingEngine, PriceSchedule, PricingEngine,
    PricingResult,
};
pub use session::{BookingSession, Confirmation};
pub use summary::BookingSummary;
pub use validation::{is_step1_valid, is_step2_valid, is_step3_valid, is_step_valid};
pub use wizard::{reduce, WizardAction, WizardEngine, WizardState, WizardStep};
