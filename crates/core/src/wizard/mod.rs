pub mod edits;
pub mod engine;
pub mod states;

pub use engine::{reduce, BookingWizard, WizardDefinition, WizardEngine};
pub use states::{TransitionOutcome, WizardAction, WizardState, WizardStep};
