//! Tax calculation modules for SARS personal income tax.

pub mod assessment;
pub mod common;
pub mod income_tax;
pub mod rebates;

pub use assessment::{TaxAssessment, TaxEngine, TaxEngineError};
pub use income_tax::{IncomeTaxError, IncomeTaxSchedule};
pub use rebates::{SECONDARY_REBATE_AGE, TERTIARY_REBATE_AGE, rebate_for_age};
