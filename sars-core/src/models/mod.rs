mod rebate;
mod tax_bracket;
mod tax_year;

pub use rebate::RebateTable;
pub use tax_bracket::TaxBracket;
pub use tax_year::{TableError, TaxTables, TaxYearTable};
