use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a year's progressive tax schedule.
///
/// `base_tax` is the cumulative tax owed on income exactly equal to
/// `min_income`, as published by SARS. The last slice of a schedule is
/// open-ended (`max_income` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub tax_year: i32,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}
