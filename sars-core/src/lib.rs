pub mod calculations;
pub mod models;
pub mod registration;
pub mod tables;

pub use calculations::{TaxAssessment, TaxEngine, TaxEngineError};
pub use models::{RebateTable, TableError, TaxBracket, TaxTables, TaxYearTable};
pub use registration::{Citizenship, Registrant, RegistrationError, RegistrationForm};
