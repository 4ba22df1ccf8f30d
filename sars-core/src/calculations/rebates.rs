//! Age-tiered rebates.

use rust_decimal::Decimal;

use crate::models::RebateTable;

/// Age from which the secondary rebate applies.
pub const SECONDARY_REBATE_AGE: u32 = 65;

/// Age from which the tertiary rebate additionally applies.
pub const TERTIARY_REBATE_AGE: u32 = 75;

/// Total rebate for a taxpayer of the given age.
///
/// The primary rebate always applies; the secondary and tertiary amounts
/// stack on top of it from ages 65 and 75 respectively, so a 75-year-old
/// receives all three amounts summed.
pub fn rebate_for_age(
    rebates: &RebateTable,
    age: u32,
) -> Decimal {
    let mut total = rebates.primary;
    if age >= SECONDARY_REBATE_AGE {
        total += rebates.secondary;
    }
    if age >= TERTIARY_REBATE_AGE {
        total += rebates.tertiary;
    }
    total
}
