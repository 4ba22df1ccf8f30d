use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The flat rebate amounts for one tax year.
///
/// The primary rebate applies to every taxpayer; the secondary and tertiary
/// rebates are additional amounts granted from the qualifying ages onwards,
/// and they stack rather than replace each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateTable {
    pub tax_year: i32,
    pub primary: Decimal,
    pub secondary: Decimal,
    pub tertiary: Decimal,
}
